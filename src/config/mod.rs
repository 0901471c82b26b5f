//! Configuration management.
//!
//! Configuration is read once at startup. Every section falls back to the
//! process environment (`PORT`, `LEETCODE_SITE`, `OPENAI_API_KEY`, ...) and an
//! optional TOML file can override any value.
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//! environment = "production"
//!
//! [leetcode]
//! site = "cn"
//! session = "your-session-cookie"
//!
//! [knowledge]
//! openai_api_key = "sk-..."
//! model = "gpt-4o-mini"
//! neo4j_uri = "bolt://localhost:7687"
//! neo4j_user = "neo4j"
//! neo4j_password = "secret"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "leetcode-mcp.toml";

/// Prefix for environment overrides of file values (`LEETCODE_MCP__SERVER__PORT`)
pub const ENV_PREFIX: &str = "LEETCODE_MCP";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// LeetCode GraphQL settings
    #[serde(default)]
    pub leetcode: LeetCodeConfig,

    /// Knowledge store credentials
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Free-form environment label reported by `get_server_info`
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000)
}

fn default_environment() -> String {
    std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
}

/// Which LeetCode deployment the catalog queries target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    /// leetcode.com
    #[default]
    Global,
    /// leetcode.cn
    Cn,
}

impl Site {
    /// Base URL of the site
    pub fn base_url(&self) -> &'static str {
        match self {
            Site::Global => "https://leetcode.com",
            Site::Cn => "https://leetcode.cn",
        }
    }

    /// GraphQL endpoint of the site
    pub fn graphql_url(&self) -> String {
        format!("{}/graphql/", self.base_url())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Site::Global => "global",
            Site::Cn => "cn",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Site {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "global" | "com" | "us" => Ok(Site::Global),
            "cn" | "china" => Ok(Site::Cn),
            other => Err(format!("Unknown LeetCode site '{}' (expected 'global' or 'cn')", other)),
        }
    }
}

/// LeetCode API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeetCodeConfig {
    /// Site selector
    #[serde(default = "default_site")]
    pub site: Site,

    /// Optional `LEETCODE_SESSION` cookie sent with every request
    #[serde(default = "default_session")]
    pub session: Option<String>,

    /// Optional CSRF token paired with the session cookie
    #[serde(default = "default_csrf_token")]
    pub csrf_token: Option<String>,

    /// GraphQL endpoint override (proxies, mirrors); the site's endpoint otherwise
    #[serde(default = "default_endpoint")]
    pub endpoint: Option<String>,
}

impl Default for LeetCodeConfig {
    fn default() -> Self {
        Self {
            site: default_site(),
            session: default_session(),
            csrf_token: default_csrf_token(),
            endpoint: default_endpoint(),
        }
    }
}

impl LeetCodeConfig {
    /// The GraphQL endpoint requests are sent to
    pub fn graphql_url(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| self.site.graphql_url())
    }
}

fn default_site() -> Site {
    std::env::var("LEETCODE_SITE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

fn default_session() -> Option<String> {
    non_empty_env("LEETCODE_SESSION")
}

fn default_csrf_token() -> Option<String> {
    non_empty_env("LEETCODE_CSRF_TOKEN")
}

fn default_endpoint() -> Option<String> {
    non_empty_env("LEETCODE_GRAPHQL_URL")
}

/// Knowledge store configuration (completion service + graph database)
#[derive(Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Completion-service API key
    #[serde(default = "default_openai_api_key")]
    pub openai_api_key: Option<String>,

    /// Completion-service base URL
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Completion model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Graph database URI
    #[serde(default = "default_neo4j_uri")]
    pub neo4j_uri: String,

    /// Graph database user
    #[serde(default = "default_neo4j_user")]
    pub neo4j_user: String,

    /// Graph database password
    #[serde(default = "default_neo4j_password")]
    pub neo4j_password: Option<String>,
}

impl KnowledgeConfig {
    /// Whether a completion-service key is configured
    pub fn has_openai_key(&self) -> bool {
        self.openai_api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Whether a graph-database password is configured
    pub fn has_neo4j_password(&self) -> bool {
        self.neo4j_password.as_deref().is_some_and(|p| !p.is_empty())
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            openai_api_key: default_openai_api_key(),
            openai_base_url: default_openai_base_url(),
            model: default_model(),
            neo4j_uri: default_neo4j_uri(),
            neo4j_user: default_neo4j_user(),
            neo4j_password: default_neo4j_password(),
        }
    }
}

// Secrets stay out of logs.
impl fmt::Debug for KnowledgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KnowledgeConfig")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("openai_base_url", &self.openai_base_url)
            .field("model", &self.model)
            .field("neo4j_uri", &self.neo4j_uri)
            .field("neo4j_user", &self.neo4j_user)
            .field("neo4j_password", &self.neo4j_password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn default_openai_api_key() -> Option<String> {
    non_empty_env("OPENAI_API_KEY")
}

fn default_openai_base_url() -> String {
    std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".to_string())
}

fn default_model() -> String {
    std::env::var("MODEL_NAME").unwrap_or_else(|_| "gpt-4o-mini".to_string())
}

fn default_neo4j_uri() -> String {
    std::env::var("NEO4J_URI").unwrap_or_else(|_| "bolt://localhost:7687".to_string())
}

fn default_neo4j_user() -> String {
    std::env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string())
}

fn default_neo4j_password() -> Option<String> {
    non_empty_env("NEO4J_PASSWORD")
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Load configuration from a file, with `LEETCODE_MCP__*` environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("leetcode-mcp").join("config.toml"))
        .filter(|p| p.is_file())
}

/// Get the default configuration (from env vars or defaults)
pub fn get_config() -> Config {
    Config::default()
}
