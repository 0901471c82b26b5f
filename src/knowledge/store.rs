//! The knowledge store gate: enabled or disabled once at startup.

use serde::Serialize;
use std::sync::Arc;

use super::{
    CompletionClient, CompletionRequest, GraphStore, KnowledgeError, KnowledgeRecord, Neo4jStore,
    OpenAiClient,
};
use crate::config::KnowledgeConfig;
use crate::utils::HttpClient;

/// Records fed to the completion service as context
const INSIGHT_SOURCE_LIMIT: usize = 5;
const INSIGHT_MAX_TOKENS: u32 = 300;
const INSIGHT_TEMPERATURE: f32 = 0.3;

const INSIGHT_SYSTEM_PROMPT: &str = "You summarize a developer's saved notes about coding \
problems. Answer in a few sentences and stay strictly on the requested topic.";

enum State {
    Disabled {
        reason: String,
    },
    Enabled {
        graph: Arc<dyn GraphStore>,
        completion: Arc<dyn CompletionClient>,
    },
}

/// The knowledge store gate.
///
/// The state is fixed at construction; there is no transition afterwards.
pub struct KnowledgeStore {
    state: State,
    openai_key_configured: bool,
    neo4j_password_configured: bool,
    model: String,
    neo4j_uri: String,
}

impl std::fmt::Debug for KnowledgeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeStore")
            .field("status", &self.status())
            .finish()
    }
}

/// Public view of the store's state; never contains secrets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeStatus {
    pub enabled: bool,
    pub openai_key_configured: bool,
    pub neo4j_password_configured: bool,
    pub model: String,
    pub neo4j_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_reason: Option<String>,
}

/// Result of `generate_insights`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub topic: String,
    pub insights: String,
    pub sources_used: usize,
}

impl KnowledgeStore {
    /// Build the store from configuration, connecting to the graph database once.
    ///
    /// Never fails: any missing credential or connection error leaves the store
    /// disabled and is logged.
    pub async fn connect(config: &KnowledgeConfig, http: HttpClient) -> Self {
        let (Some(api_key), Some(password)) = (
            config.openai_api_key.as_deref().filter(|_| config.has_openai_key()),
            config.neo4j_password.as_deref().filter(|_| config.has_neo4j_password()),
        ) else {
            let mut missing = Vec::new();
            if !config.has_openai_key() {
                missing.push("OPENAI_API_KEY");
            }
            if !config.has_neo4j_password() {
                missing.push("NEO4J_PASSWORD");
            }
            let reason = format!("missing {}", missing.join(" and "));
            tracing::warn!("Knowledge store disabled: {}", reason);
            return Self::disabled(config, reason);
        };

        match Neo4jStore::connect(&config.neo4j_uri, &config.neo4j_user, password).await {
            Ok(graph) => {
                let completion =
                    OpenAiClient::new(http, &config.openai_base_url, api_key, &config.model);
                tracing::info!("Knowledge store enabled (model: {})", config.model);
                Self::with_backends(config, Arc::new(graph), Arc::new(completion))
            }
            Err(e) => {
                tracing::warn!("Knowledge store disabled: {}", e);
                Self::disabled(config, e.to_string())
            }
        }
    }

    /// A permanently disabled store
    pub fn disabled(config: &KnowledgeConfig, reason: impl Into<String>) -> Self {
        Self::build(
            config,
            State::Disabled {
                reason: reason.into(),
            },
        )
    }

    /// An enabled store over explicit backends
    pub fn with_backends(
        config: &KnowledgeConfig,
        graph: Arc<dyn GraphStore>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self::build(config, State::Enabled { graph, completion })
    }

    fn build(config: &KnowledgeConfig, state: State) -> Self {
        Self {
            state,
            openai_key_configured: config.has_openai_key(),
            neo4j_password_configured: config.has_neo4j_password(),
            model: config.model.clone(),
            neo4j_uri: config.neo4j_uri.clone(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.state, State::Enabled { .. })
    }

    pub fn status(&self) -> KnowledgeStatus {
        KnowledgeStatus {
            enabled: self.is_enabled(),
            openai_key_configured: self.openai_key_configured,
            neo4j_password_configured: self.neo4j_password_configured,
            model: self.model.clone(),
            neo4j_uri: self.neo4j_uri.clone(),
            disabled_reason: match &self.state {
                State::Disabled { reason } => Some(reason.clone()),
                State::Enabled { .. } => None,
            },
        }
    }

    fn backends(&self) -> Result<(&Arc<dyn GraphStore>, &Arc<dyn CompletionClient>), KnowledgeError> {
        match &self.state {
            State::Enabled { graph, completion } => Ok((graph, completion)),
            State::Disabled { reason } => Err(KnowledgeError::Configuration(format!(
                "{} (set OPENAI_API_KEY and NEO4J_PASSWORD)",
                reason
            ))),
        }
    }

    /// Store one note
    pub async fn add_knowledge(
        &self,
        text: &str,
        group_id: &str,
    ) -> Result<KnowledgeRecord, KnowledgeError> {
        let (graph, _) = self.backends()?;
        if text.trim().is_empty() {
            return Err(KnowledgeError::InvalidRequest("text must not be empty".to_string()));
        }

        let record = graph.add(text, group_id).await?;
        tracing::debug!(id = %record.id, group_id, "Stored knowledge record");
        Ok(record)
    }

    /// Case-sensitive substring search within one group, newest first
    pub async fn search_knowledge(
        &self,
        query: &str,
        group_id: &str,
        limit: usize,
    ) -> Result<Vec<KnowledgeRecord>, KnowledgeError> {
        let (graph, _) = self.backends()?;
        graph.search(query, group_id, limit).await
    }

    /// Summarize what the group knows about `topic`
    pub async fn generate_insights(
        &self,
        topic: &str,
        group_id: &str,
    ) -> Result<Insights, KnowledgeError> {
        let (_, completion) = self.backends()?;
        if topic.trim().is_empty() {
            return Err(KnowledgeError::InvalidRequest("topic must not be empty".to_string()));
        }

        let sources = self
            .search_knowledge(topic, group_id, INSIGHT_SOURCE_LIMIT)
            .await?;
        if sources.is_empty() {
            return Err(KnowledgeError::NoRelevantKnowledge(topic.to_string()));
        }

        let context = sources
            .iter()
            .map(|r| format!("- {}", r.text))
            .collect::<Vec<_>>()
            .join("\n");

        let request = CompletionRequest {
            system: INSIGHT_SYSTEM_PROMPT.to_string(),
            prompt: format!(
                "Topic: {}\n\nSaved notes:\n{}\n\nSummarize the key insights about the topic \
                 using only these notes.",
                topic, context
            ),
            max_tokens: INSIGHT_MAX_TOKENS,
            temperature: INSIGHT_TEMPERATURE,
        };

        let insights = completion.complete(&request).await.map_err(|e| {
            tracing::warn!("Insight generation failed: {}", e);
            match e {
                KnowledgeError::UpstreamGeneration(_) => e,
                other => KnowledgeError::UpstreamGeneration(other.to_string()),
            }
        })?;

        if insights.trim().is_empty() {
            return Err(KnowledgeError::UpstreamGeneration(
                "completion was empty".to_string(),
            ));
        }

        Ok(Insights {
            topic: topic.to_string(),
            insights,
            sources_used: sources.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{MemoryGraphStore, MockCompletion, DEFAULT_GROUP_ID};

    fn config(openai: Option<&str>, password: Option<&str>) -> KnowledgeConfig {
        KnowledgeConfig {
            openai_api_key: openai.map(str::to_string),
            openai_base_url: "http://localhost:1".to_string(),
            model: "test-model".to_string(),
            neo4j_uri: "bolt://localhost:1".to_string(),
            neo4j_user: "neo4j".to_string(),
            neo4j_password: password.map(str::to_string),
        }
    }

    fn enabled(completion: Arc<MockCompletion>) -> KnowledgeStore {
        KnowledgeStore::with_backends(
            &config(Some("sk"), Some("pw")),
            Arc::new(MemoryGraphStore::new()),
            completion,
        )
    }

    #[tokio::test]
    async fn test_connect_without_openai_key_is_disabled() {
        let store = KnowledgeStore::connect(&config(None, Some("pw")), HttpClient::new().unwrap()).await;
        let status = store.status();

        assert!(!status.enabled);
        assert!(!status.openai_key_configured);
        assert!(status.neo4j_password_configured);
        assert!(status.disabled_reason.unwrap().contains("OPENAI_API_KEY"));
    }

    #[tokio::test]
    async fn test_connect_without_password_is_disabled() {
        let store = KnowledgeStore::connect(&config(Some("sk"), None), HttpClient::new().unwrap()).await;
        assert!(!store.is_enabled());

        let err = store.add_knowledge("x", DEFAULT_GROUP_ID).await.unwrap_err();
        assert!(matches!(err, KnowledgeError::Configuration(_)));
        let err = store.search_knowledge("x", DEFAULT_GROUP_ID, 10).await.unwrap_err();
        assert!(matches!(err, KnowledgeError::Configuration(_)));
        let err = store.generate_insights("x", DEFAULT_GROUP_ID).await.unwrap_err();
        assert!(matches!(err, KnowledgeError::Configuration(_)));
    }

    #[test]
    fn test_status_never_reveals_secrets() {
        let store = KnowledgeStore::disabled(&config(Some("sk-secret"), Some("hunter2")), "test");
        let json = serde_json::to_string(&store.status()).unwrap();
        assert!(!json.contains("sk-secret"));
        assert!(!json.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_add_then_search_same_group() {
        let store = enabled(Arc::new(MockCompletion::replying("unused")));

        let record = store.add_knowledge("x marks the spot", "g1").await.unwrap();
        assert!(!record.id.is_empty());
        assert_eq!(record.group_id, "g1");

        let found = store.search_knowledge("x", "g1", 10).await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].text.contains('x'));

        assert!(store.search_knowledge("x", "g2", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_is_case_sensitive_newest_first_and_limited() {
        let store = enabled(Arc::new(MockCompletion::replying("unused")));
        for text in ["DP one", "dp two", "dp three", "dp four"] {
            store.add_knowledge(text, "g").await.unwrap();
        }

        let found = store.search_knowledge("dp", "g", 2).await.unwrap();
        let texts: Vec<_> = found.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["dp four", "dp three"]);

        let upper = store.search_knowledge("DP", "g", 10).await.unwrap();
        assert_eq!(upper.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let store = enabled(Arc::new(MockCompletion::replying("unused")));
        let err = store.add_knowledge("   ", "g").await.unwrap_err();
        assert!(matches!(err, KnowledgeError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_insights_without_knowledge_skip_completion() {
        let completion = Arc::new(MockCompletion::replying("should not be used"));
        let store = enabled(completion.clone());

        let err = store.generate_insights("graphs", DEFAULT_GROUP_ID).await.unwrap_err();
        assert!(err.to_string().starts_with("no relevant knowledge found"));
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn test_insights_use_at_most_five_sources() {
        let completion = Arc::new(MockCompletion::replying("Use BFS for shortest paths."));
        let store = enabled(completion.clone());
        for i in 0..7 {
            store
                .add_knowledge(&format!("graphs note {}", i), DEFAULT_GROUP_ID)
                .await
                .unwrap();
        }
        store.add_knowledge("graphs elsewhere", "other").await.unwrap();

        let insights = store.generate_insights("graphs", DEFAULT_GROUP_ID).await.unwrap();
        assert_eq!(insights.sources_used, 5);
        assert_eq!(insights.insights, "Use BFS for shortest paths.");
        assert_eq!(completion.calls(), 1);

        let request = completion.last_request().unwrap();
        assert_eq!(request.max_tokens, INSIGHT_MAX_TOKENS);
        assert!(request.prompt.contains("graphs note 6"));
        assert!(!request.prompt.contains("graphs note 1"));
        assert!(!request.prompt.contains("elsewhere"));
    }

    #[tokio::test]
    async fn test_insights_upstream_failure() {
        let store = enabled(Arc::new(MockCompletion::failing("503")));
        store.add_knowledge("heaps are trees", "g").await.unwrap();

        let err = store.generate_insights("heaps", "g").await.unwrap_err();
        assert!(matches!(err, KnowledgeError::UpstreamGeneration(_)));
    }

    #[tokio::test]
    async fn test_insights_empty_completion() {
        let store = enabled(Arc::new(MockCompletion::replying("  ")));
        store.add_knowledge("tries store prefixes", "g").await.unwrap();

        let err = store.generate_insights("tries", "g").await.unwrap_err();
        assert!(matches!(err, KnowledgeError::UpstreamGeneration(_)));
    }
}
