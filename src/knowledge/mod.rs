//! Knowledge store: a graph database for notes plus an LLM for summaries.
//!
//! The store is optional. [`KnowledgeStore::connect`] tries exactly once at
//! startup; without both credentials or without a reachable database it stays
//! disabled for the lifetime of the process and every operation fails with
//! [`KnowledgeError::Configuration`].
//!
//! Backends sit behind the [`GraphStore`] and [`CompletionClient`] traits:
//! [`Neo4jStore`] and [`OpenAiClient`] in production, [`MemoryGraphStore`] and
//! [`MockCompletion`] in tests.

pub mod mock;
mod neo4j;
mod openai;
mod store;

pub use mock::{MemoryGraphStore, MockCompletion};
pub use neo4j::Neo4jStore;
pub use openai::OpenAiClient;
pub use store::{Insights, KnowledgeStatus, KnowledgeStore};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Group used when the caller does not name one
pub const DEFAULT_GROUP_ID: &str = "default";

/// Default number of records returned by a search
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// One stored note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    /// Opaque id assigned by the database
    pub id: String,
    pub text: String,
    pub group_id: String,
    /// Assigned by the database on creation
    pub created_at: DateTime<Utc>,
}

/// Storage of knowledge records
#[async_trait]
pub trait GraphStore: Send + Sync + std::fmt::Debug {
    /// Create one record and return it with its id and timestamp
    async fn add(&self, text: &str, group_id: &str) -> Result<KnowledgeRecord, KnowledgeError>;

    /// Records of `group_id` whose text contains `query` (case-sensitive),
    /// newest first, at most `limit`
    async fn search(
        &self,
        query: &str,
        group_id: &str,
        limit: usize,
    ) -> Result<Vec<KnowledgeRecord>, KnowledgeError>;
}

/// A single chat-completion call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Text generation
#[async_trait]
pub trait CompletionClient: Send + Sync + std::fmt::Debug {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, KnowledgeError>;
}

/// Errors that can occur in the knowledge store
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KnowledgeError {
    /// The store is disabled
    #[error("Knowledge store is not configured: {0}")]
    Configuration(String),

    #[error("Graph database error: {0}")]
    Database(String),

    /// The completion service failed or returned nothing
    #[error("Insight generation failed: {0}")]
    UpstreamGeneration(String),

    #[error("no relevant knowledge found for topic '{0}'")]
    NoRelevantKnowledge(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<neo4rs::Error> for KnowledgeError {
    fn from(err: neo4rs::Error) -> Self {
        KnowledgeError::Database(err.to_string())
    }
}
