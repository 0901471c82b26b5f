//! MCP (Model Context Protocol) implementation.

mod handlers;
pub mod resources;
pub mod server;
mod tools;

pub use handlers::SERVER_NAME;
pub use resources::{DailyProblemResource, DAILY_PROBLEM_URI};
pub use server::McpServer;
pub use tools::{Services, Tool, ToolHandler, ToolRegistry};
