//! Utility modules.
//!
//! - [`HttpClient`]: the process-wide reqwest client shared by every outbound adapter

mod http;

pub use http::{HttpClient, DEFAULT_USER_AGENT, REQUEST_TIMEOUT};
