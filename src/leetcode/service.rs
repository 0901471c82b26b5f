//! Typed access to the catalog queries.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

use super::queries::{self, DAILY_CHALLENGE_FIELD, PROBLEM_FIELD, SEARCH_FIELD, USER_FIELD};
use super::{GraphQlTransport, LeetCodeError};
use crate::config::Site;
use crate::models::{DailyChallenge, Lookup, ProblemDetail, ProblemList, ProblemSearch, UserProfile};

/// Problem-catalog operations on top of a shared transport
#[derive(Debug, Clone)]
pub struct LeetCodeService {
    transport: Arc<dyn GraphQlTransport>,
    site: Site,
}

impl LeetCodeService {
    pub fn new(transport: Arc<dyn GraphQlTransport>, site: Site) -> Self {
        Self { transport, site }
    }

    /// The site the transport targets
    pub fn site(&self) -> Site {
        self.site
    }

    /// Today's daily coding challenge
    pub async fn daily_challenge(&self) -> Result<DailyChallenge, LeetCodeError> {
        let response = self.transport.send(&queries::daily_challenge()).await?;

        extract(response, DAILY_CHALLENGE_FIELD, "daily challenge")?.ok_or_else(|| {
            LeetCodeError::Parse("Failed to parse daily challenge: no active challenge".to_string())
        })
    }

    /// Full detail of one problem
    pub async fn problem(&self, title_slug: &str) -> Result<Lookup<ProblemDetail>, LeetCodeError> {
        if title_slug.trim().is_empty() {
            return Err(LeetCodeError::InvalidRequest(
                "title_slug must not be empty".to_string(),
            ));
        }

        tracing::debug!(title_slug, "Fetching problem detail");
        let response = self.transport.send(&queries::problem_detail(title_slug)).await?;
        extract(response, PROBLEM_FIELD, "problem").map(Lookup::from)
    }

    /// One page of problems matching the filters
    pub async fn search_problems(&self, search: &ProblemSearch) -> Result<ProblemList, LeetCodeError> {
        tracing::debug!(?search, "Searching problems");
        let response = self.transport.send(&queries::problem_search(search)).await?;

        extract(response, SEARCH_FIELD, "search results")?.ok_or_else(|| {
            LeetCodeError::Parse("Failed to parse search results: question list is null".to_string())
        })
    }

    /// Public profile of a user
    pub async fn user_profile(&self, username: &str) -> Result<Lookup<UserProfile>, LeetCodeError> {
        if username.trim().is_empty() {
            return Err(LeetCodeError::InvalidRequest(
                "username must not be empty".to_string(),
            ));
        }

        tracing::debug!(username, "Fetching user profile");
        let response = self.transport.send(&queries::user_profile(username)).await?;
        extract(response, USER_FIELD, "user profile").map(Lookup::from)
    }
}

/// Pull `data.<field>` out of a GraphQL response.
///
/// `Ok(None)` means the catalog answered with an explicit `null` record.
fn extract<T: DeserializeOwned>(
    response: Value,
    field: &str,
    what: &str,
) -> Result<Option<T>, LeetCodeError> {
    let mut root = match response {
        Value::Object(root) => root,
        _ => {
            return Err(LeetCodeError::Parse(format!(
                "Failed to parse {}: response is not a JSON object",
                what
            )))
        }
    };

    let mut data = match root.remove("data") {
        Some(Value::Object(data)) => data,
        _ => {
            let reason = graphql_errors(&root)
                .unwrap_or_else(|| "response has no 'data' object".to_string());
            return Err(LeetCodeError::Parse(format!(
                "Failed to parse {}: {}",
                what, reason
            )));
        }
    };

    match data.remove(field) {
        None => Err(LeetCodeError::Parse(format!(
            "Failed to parse {}: missing field '{}'",
            what, field
        ))),
        Some(Value::Null) => Ok(None),
        Some(node) => serde_json::from_value(node)
            .map(Some)
            .map_err(|e| LeetCodeError::Parse(format!("Failed to parse {}: {}", what, e))),
    }
}

fn graphql_errors(root: &Map<String, Value>) -> Option<String> {
    let messages: Vec<&str> = root
        .get("errors")?
        .as_array()?
        .iter()
        .filter_map(|e| e.get("message").and_then(Value::as_str))
        .collect();

    if messages.is_empty() {
        None
    } else {
        Some(format!("GraphQL errors: {}", messages.join("; ")))
    }
}
