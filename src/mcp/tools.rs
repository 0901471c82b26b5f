//! Tool registry for MCP tools.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::handlers::{
    AddKnowledgeHandler, GenerateInsightsHandler, GetDailyChallengeHandler, GetProblemHandler,
    GetUserProfileHandler, GreetHandler, KnowledgeStatusHandler, SearchKnowledgeHandler,
    SearchProblemsHandler, ServerInfoHandler,
};
use crate::config::Config;
use crate::knowledge::{KnowledgeStore, DEFAULT_GROUP_ID, DEFAULT_SEARCH_LIMIT};
use crate::leetcode::{LeetCodeClient, LeetCodeService};
use crate::models::DEFAULT_SEARCH_LIMIT as DEFAULT_PROBLEM_LIMIT;
use crate::utils::HttpClient;

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "get_problem")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: serde_json::Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Handler for executing a tool
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments
    async fn execute(&self, args: Value) -> Result<Value, String>;
}

/// Everything the handlers talk to, built once at startup
#[derive(Debug, Clone)]
pub struct Services {
    pub leetcode: LeetCodeService,
    pub knowledge: Arc<KnowledgeStore>,
    /// Environment label reported by `get_server_info`
    pub environment: String,
}

impl Services {
    /// Build the production services from configuration.
    ///
    /// The knowledge store connection is attempted here, once.
    pub async fn connect(config: &Config) -> Result<Self, reqwest::Error> {
        let http = HttpClient::new()?;

        let transport = LeetCodeClient::new(http.clone(), &config.leetcode);
        let leetcode = LeetCodeService::new(Arc::new(transport), config.leetcode.site);
        let knowledge = KnowledgeStore::connect(&config.knowledge, http).await;

        Ok(Self {
            leetcode,
            knowledge: Arc::new(knowledge),
            environment: config.server.environment.clone(),
        })
    }
}

/// Registry for all MCP tools
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Create a registry with every tool wired to `services`
    pub fn new(services: Services) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };

        registry.register_leetcode_tools(&services);
        registry.register_knowledge_tools(&services);

        registry.register(Tool {
            name: "greet".to_string(),
            description: "Greet a user by name with a welcome message from the MCP server"
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Name to greet"
                    }
                },
                "required": ["name"]
            }),
            handler: Arc::new(GreetHandler),
        });

        // Registered last so it can list every tool, itself included.
        let mut names: Vec<String> = registry.tools.keys().cloned().collect();
        names.push("get_server_info".to_string());
        names.sort();

        registry.register(Tool {
            name: "get_server_info".to_string(),
            description: "Get information about the MCP server".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
            handler: Arc::new(ServerInfoHandler {
                tool_names: names,
                site: services.leetcode.site(),
                environment: services.environment.clone(),
                knowledge: services.knowledge.clone(),
            }),
        });

        registry
    }

    fn register_leetcode_tools(&mut self, services: &Services) {
        let leetcode = &services.leetcode;

        // 1. get_daily_challenge
        self.register(Tool {
            name: "get_daily_challenge".to_string(),
            description: "Get today's LeetCode Daily Challenge problem".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
            handler: Arc::new(GetDailyChallengeHandler {
                leetcode: leetcode.clone(),
            }),
        });

        // 2. get_problem
        self.register(Tool {
            name: "get_problem".to_string(),
            description: "Get details about a specific LeetCode problem".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "title_slug": {
                        "type": "string",
                        "description": "Problem title slug (e.g., 'two-sum')"
                    }
                },
                "required": ["title_slug"]
            }),
            handler: Arc::new(GetProblemHandler {
                leetcode: leetcode.clone(),
            }),
        });

        // 3. search_problems
        self.register(Tool {
            name: "search_problems".to_string(),
            description: "Search LeetCode problems with filters".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "description": "Category slug (e.g., 'algorithms', 'database')"
                    },
                    "tags": {
                        "type": "string",
                        "description": "Comma-separated topic tag slugs (e.g., 'array,hash-table')"
                    },
                    "difficulty": {
                        "type": "string",
                        "description": "Difficulty filter",
                        "enum": ["easy", "medium", "hard", "EASY", "MEDIUM", "HARD"]
                    },
                    "search": {
                        "type": "string",
                        "description": "Search keywords"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of problems to return",
                        "default": DEFAULT_PROBLEM_LIMIT
                    },
                    "offset": {
                        "type": "integer",
                        "description": "Number of problems to skip",
                        "default": 0
                    }
                }
            }),
            handler: Arc::new(SearchProblemsHandler {
                leetcode: leetcode.clone(),
            }),
        });

        // 4. get_user_profile
        self.register(Tool {
            name: "get_user_profile".to_string(),
            description: "Get LeetCode user profile information".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "username": {
                        "type": "string",
                        "description": "LeetCode username"
                    }
                },
                "required": ["username"]
            }),
            handler: Arc::new(GetUserProfileHandler {
                leetcode: leetcode.clone(),
            }),
        });
    }

    fn register_knowledge_tools(&mut self, services: &Services) {
        let knowledge = &services.knowledge;

        self.register(Tool {
            name: "zep_add_knowledge".to_string(),
            description: "Store a piece of knowledge in the knowledge graph".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "Text to store"
                    },
                    "group_id": {
                        "type": "string",
                        "description": "Namespace for the record",
                        "default": DEFAULT_GROUP_ID
                    }
                },
                "required": ["text"]
            }),
            handler: Arc::new(AddKnowledgeHandler {
                knowledge: knowledge.clone(),
            }),
        });

        self.register(Tool {
            name: "zep_search_knowledge".to_string(),
            description: "Search stored knowledge whose text contains the query".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Text to look for (case-sensitive)"
                    },
                    "group_id": {
                        "type": "string",
                        "description": "Namespace to search",
                        "default": DEFAULT_GROUP_ID
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of records",
                        "default": DEFAULT_SEARCH_LIMIT
                    }
                },
                "required": ["query"]
            }),
            handler: Arc::new(SearchKnowledgeHandler {
                knowledge: knowledge.clone(),
            }),
        });

        self.register(Tool {
            name: "zep_get_status".to_string(),
            description: "Report whether the knowledge store is enabled and which credentials are configured".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
            handler: Arc::new(KnowledgeStatusHandler {
                knowledge: knowledge.clone(),
            }),
        });

        self.register(Tool {
            name: "zep_generate_insights".to_string(),
            description: "Summarize stored knowledge about a topic using the language model".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "topic": {
                        "type": "string",
                        "description": "Topic to summarize"
                    },
                    "group_id": {
                        "type": "string",
                        "description": "Namespace to draw knowledge from",
                        "default": DEFAULT_GROUP_ID
                    }
                },
                "required": ["topic"]
            }),
            handler: Arc::new(GenerateInsightsHandler {
                knowledge: knowledge.clone(),
            }),
        });
    }

    /// Register a tool
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get all tools
    pub fn all(&self) -> Vec<&Tool> {
        self.tools.values().collect()
    }

    /// Sorted tool names
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, String> {
        let tool = self
            .get(name)
            .ok_or_else(|| format!("Tool '{}' not found", name))?;

        tool.handler.execute(args).await
    }
}
