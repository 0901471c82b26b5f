//! # LeetCode MCP
//!
//! A Model Context Protocol (MCP) server exposing the LeetCode problem catalog
//! and an optional Neo4j-backed knowledge store as tools.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`leetcode`]: GraphQL transport, query catalog and typed catalog access
//! - [`knowledge`]: the optional knowledge store (graph database + LLM)
//! - [`models`]: catalog payloads and the response [`Envelope`]
//! - [`mcp`]: tool registry, handlers, the `leetcode://daily` resource and the MCP server
//! - [`utils`]: the shared HTTP client
//! - [`config`]: configuration management

pub mod config;
pub mod knowledge;
pub mod leetcode;
pub mod mcp;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use knowledge::KnowledgeStore;
pub use leetcode::{GraphQlTransport, LeetCodeService};
pub use models::Envelope;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
