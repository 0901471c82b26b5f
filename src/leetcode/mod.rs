//! LeetCode problem-catalog access.
//!
//! The catalog is a single GraphQL endpoint. Every call goes through the
//! [`GraphQlTransport`] trait so the [`LeetCodeService`] can be exercised with
//! the [`MockTransport`] in tests and with the reqwest-backed
//! [`LeetCodeClient`] in production.
//!
//! ```text
//! tool handler -> LeetCodeService -> queries::* -> GraphQlTransport::send
//!                        ^                                  |
//!                        +---- typed extraction <-----------+
//! ```

mod client;
pub mod mock;
pub mod queries;
mod service;

pub use client::LeetCodeClient;
pub use mock::MockTransport;
pub use queries::GraphQlRequest;
pub use service::LeetCodeService;

use async_trait::async_trait;
use serde_json::Value;

/// Sends one GraphQL request and returns the decoded JSON body.
///
/// Implementations convert every failure into a [`LeetCodeError`] value and
/// never panic.
#[async_trait]
pub trait GraphQlTransport: Send + Sync + std::fmt::Debug {
    async fn send(&self, request: &GraphQlRequest) -> Result<Value, LeetCodeError>;
}

/// Errors that can occur when talking to the problem catalog
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LeetCodeError {
    /// Connection failure, non-2xx status or undecodable body
    #[error("{0}")]
    Transport(String),

    /// The catalog returned a null record for a valid query
    #[error("{0}")]
    NotFound(String),

    /// The response did not have the expected shape
    #[error("{0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for LeetCodeError {
    fn from(err: reqwest::Error) -> Self {
        LeetCodeError::Transport(err.to_string())
    }
}
