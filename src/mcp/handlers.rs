//! Tool handlers.
//!
//! Every data tool answers with an [`Envelope`]; failures, including missing
//! arguments, become `{success: false, error}` rather than protocol errors.

use std::sync::Arc;

use serde_json::{json, Value};

use super::tools::ToolHandler;
use crate::config::Site;
use crate::knowledge::{KnowledgeStore, DEFAULT_GROUP_ID, DEFAULT_SEARCH_LIMIT};
use crate::leetcode::LeetCodeService;
use crate::models::{Envelope, Lookup, ProblemSearch, DEFAULT_SEARCH_LIMIT as DEFAULT_PROBLEM_LIMIT};

/// Server name reported by `get_server_info`
pub const SERVER_NAME: &str = "LeetCode MCP Server";

fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, String> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| format!("Missing '{}' parameter", key))
}

fn optional_str(args: &Value, key: &str) -> Option<String> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

/// Integers may arrive as JSON numbers or numeric strings
fn optional_u64(args: &Value, key: &str) -> Result<Option<u64>, String> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| format!("'{}' must be a non-negative integer", key)),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| format!("'{}' must be a non-negative integer", key)),
        Some(_) => Err(format!("'{}' must be a non-negative integer", key)),
    }
}

fn optional_u32(args: &Value, key: &str) -> Result<Option<u32>, String> {
    optional_u64(args, key)?
        .map(|v| u32::try_from(v).map_err(|_| format!("'{}' is too large", key)))
        .transpose()
}

fn group_id(args: &Value) -> String {
    optional_str(args, "group_id").unwrap_or_else(|| DEFAULT_GROUP_ID.to_string())
}

/// Handler for today's daily challenge
#[derive(Debug)]
pub struct GetDailyChallengeHandler {
    pub leetcode: LeetCodeService,
}

#[async_trait::async_trait]
impl ToolHandler for GetDailyChallengeHandler {
    async fn execute(&self, _args: Value) -> Result<Value, String> {
        let result = self.leetcode.daily_challenge().await;
        if let Err(ref e) = result {
            tracing::warn!("get_daily_challenge failed: {}", e);
        }
        Ok(Envelope::from_result(result).into_value())
    }
}

/// Handler for a single problem's detail
#[derive(Debug)]
pub struct GetProblemHandler {
    pub leetcode: LeetCodeService,
}

#[async_trait::async_trait]
impl ToolHandler for GetProblemHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let title_slug = match required_str(&args, "title_slug") {
            Ok(slug) => slug,
            Err(e) => return Ok(Envelope::error(e).into_value()),
        };

        let envelope = match self.leetcode.problem(title_slug).await {
            Ok(Lookup::Found(problem)) => Envelope::ok(problem),
            Ok(Lookup::NotFound) => Envelope::error(format!("Problem '{}' not found", title_slug)),
            Err(e) => {
                tracing::warn!("get_problem({}) failed: {}", title_slug, e);
                Envelope::error(e.to_string())
            }
        };
        Ok(envelope.into_value())
    }
}

/// Handler for filtered problem search
#[derive(Debug)]
pub struct SearchProblemsHandler {
    pub leetcode: LeetCodeService,
}

impl SearchProblemsHandler {
    fn parse_args(args: &Value) -> Result<ProblemSearch, String> {
        Ok(ProblemSearch {
            category: optional_str(args, "category"),
            tags: optional_str(args, "tags"),
            difficulty: optional_str(args, "difficulty"),
            search: optional_str(args, "search"),
            limit: optional_u32(args, "limit")?.unwrap_or(DEFAULT_PROBLEM_LIMIT),
            offset: optional_u32(args, "offset")?.unwrap_or(0),
        })
    }
}

#[async_trait::async_trait]
impl ToolHandler for SearchProblemsHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let search = match Self::parse_args(&args) {
            Ok(search) => search,
            Err(e) => return Ok(Envelope::error(e).into_value()),
        };

        let result = self.leetcode.search_problems(&search).await;
        if let Err(ref e) = result {
            tracing::warn!("search_problems failed: {}", e);
        }
        Ok(Envelope::from_result(result).into_value())
    }
}

/// Handler for a user's public profile
#[derive(Debug)]
pub struct GetUserProfileHandler {
    pub leetcode: LeetCodeService,
}

#[async_trait::async_trait]
impl ToolHandler for GetUserProfileHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let username = match required_str(&args, "username") {
            Ok(username) => username,
            Err(e) => return Ok(Envelope::error(e).into_value()),
        };

        let envelope = match self.leetcode.user_profile(username).await {
            Ok(Lookup::Found(user)) => Envelope::ok(user),
            Ok(Lookup::NotFound) => Envelope::error(format!("User '{}' not found", username)),
            Err(e) => {
                tracing::warn!("get_user_profile({}) failed: {}", username, e);
                Envelope::error(e.to_string())
            }
        };
        Ok(envelope.into_value())
    }
}

/// Handler for storing knowledge
#[derive(Debug)]
pub struct AddKnowledgeHandler {
    pub knowledge: Arc<KnowledgeStore>,
}

#[async_trait::async_trait]
impl ToolHandler for AddKnowledgeHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let text = match required_str(&args, "text") {
            Ok(text) => text,
            Err(e) => return Ok(Envelope::error(e).into_value()),
        };
        let group_id = group_id(&args);

        let result = self
            .knowledge
            .add_knowledge(text, &group_id)
            .await
            .map(|record| {
                json!({
                    "id": record.id,
                    "group_id": record.group_id,
                    "created_at": record.created_at,
                })
            });
        Ok(Envelope::from_result(result).into_value())
    }
}

/// Handler for substring search over stored knowledge
#[derive(Debug)]
pub struct SearchKnowledgeHandler {
    pub knowledge: Arc<KnowledgeStore>,
}

#[async_trait::async_trait]
impl ToolHandler for SearchKnowledgeHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let query = match required_str(&args, "query") {
            Ok(query) => query,
            Err(e) => return Ok(Envelope::error(e).into_value()),
        };
        let group_id = group_id(&args);
        let limit = match optional_u64(&args, "limit") {
            Ok(limit) => limit.map_or(DEFAULT_SEARCH_LIMIT, |l| l as usize),
            Err(e) => return Ok(Envelope::error(e).into_value()),
        };

        let result = self
            .knowledge
            .search_knowledge(query, &group_id, limit)
            .await
            .map(|records| {
                json!({
                    "query": query,
                    "group_id": group_id,
                    "count": records.len(),
                    "results": records,
                })
            });
        Ok(Envelope::from_result(result).into_value())
    }
}

/// Handler for the knowledge store status
#[derive(Debug)]
pub struct KnowledgeStatusHandler {
    pub knowledge: Arc<KnowledgeStore>,
}

#[async_trait::async_trait]
impl ToolHandler for KnowledgeStatusHandler {
    async fn execute(&self, _args: Value) -> Result<Value, String> {
        Ok(Envelope::ok(self.knowledge.status()).into_value())
    }
}

/// Handler for LLM insights over stored knowledge
#[derive(Debug)]
pub struct GenerateInsightsHandler {
    pub knowledge: Arc<KnowledgeStore>,
}

#[async_trait::async_trait]
impl ToolHandler for GenerateInsightsHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let topic = match required_str(&args, "topic") {
            Ok(topic) => topic,
            Err(e) => return Ok(Envelope::error(e).into_value()),
        };
        let group_id = group_id(&args);

        let result = self.knowledge.generate_insights(topic, &group_id).await;
        Ok(Envelope::from_result(result).into_value())
    }
}

/// Liveness check; answers with plain text
#[derive(Debug)]
pub struct GreetHandler;

#[async_trait::async_trait]
impl ToolHandler for GreetHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let greeting = match optional_str(&args, "name") {
            Some(name) => format!("Hello, {}! Welcome to the LeetCode MCP server!", name),
            None => "Hello! Welcome to the LeetCode MCP server!".to_string(),
        };
        Ok(Value::String(greeting))
    }
}

/// Handler describing the server itself
#[derive(Debug)]
pub struct ServerInfoHandler {
    pub tool_names: Vec<String>,
    pub site: Site,
    pub environment: String,
    pub knowledge: Arc<KnowledgeStore>,
}

#[async_trait::async_trait]
impl ToolHandler for ServerInfoHandler {
    async fn execute(&self, _args: Value) -> Result<Value, String> {
        Ok(Envelope::ok(json!({
            "server_name": SERVER_NAME,
            "version": crate::VERSION,
            "environment": self.environment,
            "leetcode_site": self.site,
            "knowledge_store_enabled": self.knowledge.is_enabled(),
            "available_tools": self.tool_names,
        }))
        .into_value())
    }
}
