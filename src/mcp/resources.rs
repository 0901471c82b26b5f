//! MCP resources.
//!
//! The server exposes a single resource, `leetcode://daily`, whose contents
//! are the current daily challenge as pretty-printed JSON.

use async_trait::async_trait;
use pmcp::{
    Content, Error, ListResourcesResult, ReadResourceResult, RequestHandlerExtra, ResourceHandler,
    ResourceInfo,
};

use crate::leetcode::LeetCodeService;

/// URI of the daily challenge resource
pub const DAILY_PROBLEM_URI: &str = "leetcode://daily";

const JSON_MIME_TYPE: &str = "application/json";

/// Serves `leetcode://daily` from the catalog
#[derive(Debug, Clone)]
pub struct DailyProblemResource {
    leetcode: LeetCodeService,
}

impl DailyProblemResource {
    pub fn new(leetcode: LeetCodeService) -> Self {
        Self { leetcode }
    }

    /// Resources this handler can read
    pub fn descriptors(&self) -> Vec<ResourceInfo> {
        vec![ResourceInfo {
            uri: DAILY_PROBLEM_URI.to_string(),
            name: "Daily Problem".to_string(),
            description: Some("Today's LeetCode daily problem".to_string()),
            mime_type: Some(JSON_MIME_TYPE.to_string()),
            meta: None,
        }]
    }

    /// Read a resource by URI
    pub async fn contents(&self, uri: &str) -> Result<ReadResourceResult, Error> {
        if uri != DAILY_PROBLEM_URI {
            return Err(Error::not_found(format!("Unknown resource: {}", uri)));
        }

        let daily = self.leetcode.daily_challenge().await.map_err(|e| {
            tracing::warn!("Reading {} failed: {}", uri, e);
            Error::internal(e.to_string())
        })?;
        let text = serde_json::to_string_pretty(&daily)
            .map_err(|e| Error::internal(format!("Failed to encode daily challenge: {}", e)))?;

        Ok(ReadResourceResult::new(vec![Content::Resource {
            uri: uri.to_string(),
            text: Some(text),
            mime_type: Some(JSON_MIME_TYPE.to_string()),
            meta: None,
        }]))
    }
}

#[async_trait]
impl ResourceHandler for DailyProblemResource {
    async fn read(&self, uri: &str, _extra: RequestHandlerExtra) -> Result<ReadResourceResult, Error> {
        tracing::debug!(uri, "Resource read");
        self.contents(uri).await
    }

    async fn list(
        &self,
        _cursor: Option<String>,
        _extra: RequestHandlerExtra,
    ) -> Result<ListResourcesResult, Error> {
        Ok(ListResourcesResult::new(self.descriptors()))
    }
}
