//! reqwest-backed GraphQL transport.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE, REFERER, USER_AGENT};
use serde_json::Value;

use super::{GraphQlRequest, GraphQlTransport, LeetCodeError};
use crate::config::{LeetCodeConfig, Site};
use crate::utils::{HttpClient, DEFAULT_USER_AGENT};

/// Transport for the LeetCode GraphQL endpoint
#[derive(Debug, Clone)]
pub struct LeetCodeClient {
    http: HttpClient,
    site: Site,
    endpoint: String,
    session: Option<String>,
    csrf_token: Option<String>,
}

impl LeetCodeClient {
    /// Create a client for the configured site
    pub fn new(http: HttpClient, config: &LeetCodeConfig) -> Self {
        Self {
            http,
            site: config.site,
            endpoint: config.graphql_url(),
            session: config.session.clone(),
            csrf_token: config.csrf_token.clone(),
        }
    }

    fn cookie_header(&self) -> Option<String> {
        let session = self.session.as_deref()?;
        Some(match self.csrf_token.as_deref() {
            Some(token) => format!("LEETCODE_SESSION={}; csrftoken={}", session, token),
            None => format!("LEETCODE_SESSION={}", session),
        })
    }
}

#[async_trait]
impl GraphQlTransport for LeetCodeClient {
    async fn send(&self, request: &GraphQlRequest) -> Result<Value, LeetCodeError> {
        if request.query.trim().is_empty() {
            return Err(LeetCodeError::InvalidRequest("query text is empty".to_string()));
        }

        tracing::debug!(endpoint = %self.endpoint, "Sending GraphQL request");

        let mut builder = self
            .http
            .client()
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, DEFAULT_USER_AGENT)
            .header(REFERER, self.site.base_url())
            .json(request);

        if let Some(cookie) = self.cookie_header() {
            builder = builder.header(COOKIE, cookie);
        }
        if let Some(ref token) = self.csrf_token {
            builder = builder.header("x-csrftoken", token);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!("GraphQL request to {} failed: {}", self.endpoint, e);
            LeetCodeError::Transport(format!("Request to LeetCode failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("LeetCode API returned status {}", status);
            return Err(LeetCodeError::Transport(format!(
                "LeetCode API returned status: {}",
                status
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| LeetCodeError::Transport(format!("Invalid JSON from LeetCode: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http() -> HttpClient {
        HttpClient::new().unwrap()
    }

    fn config(session: Option<&str>, csrf_token: Option<&str>) -> LeetCodeConfig {
        LeetCodeConfig {
            site: Site::Global,
            session: session.map(str::to_string),
            csrf_token: csrf_token.map(str::to_string),
            endpoint: Some("http://localhost/graphql/".to_string()),
        }
    }

    #[test]
    fn test_endpoint_follows_site() {
        let config = LeetCodeConfig {
            site: Site::Cn,
            session: None,
            csrf_token: None,
            endpoint: None,
        };
        let client = LeetCodeClient::new(http(), &config);
        assert_eq!(client.endpoint, "https://leetcode.cn/graphql/");
        assert_eq!(client.site, Site::Cn);
    }

    #[test]
    fn test_endpoint_override() {
        let client = LeetCodeClient::new(http(), &config(None, None));
        assert_eq!(client.endpoint, "http://localhost/graphql/");
        assert_eq!(client.site, Site::Global);
    }

    #[test]
    fn test_cookie_header() {
        let client = LeetCodeClient::new(http(), &config(None, None));
        assert_eq!(client.cookie_header(), None);

        let client = LeetCodeClient::new(http(), &config(Some("abc"), None));
        assert_eq!(client.cookie_header().as_deref(), Some("LEETCODE_SESSION=abc"));

        let client = LeetCodeClient::new(http(), &config(Some("abc"), Some("tok")));
        assert_eq!(
            client.cookie_header().as_deref(),
            Some("LEETCODE_SESSION=abc; csrftoken=tok")
        );
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let client = LeetCodeClient::new(http(), &config(None, None));
        let result = client.send(&GraphQlRequest::new("   ")).await;
        assert!(matches!(result, Err(LeetCodeError::InvalidRequest(_))));
    }
}
