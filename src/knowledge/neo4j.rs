//! Neo4j-backed knowledge storage.

use async_trait::async_trait;
use chrono::DateTime;
use neo4rs::{query, Graph, Row};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

use super::{GraphStore, KnowledgeError, KnowledgeRecord};
use crate::utils::REQUEST_TIMEOUT;

const PING: &str = "RETURN 1";

const ENSURE_INDEX: &str =
    "CREATE INDEX knowledge_group IF NOT EXISTS FOR (k:Knowledge) ON (k.group_id)";

// created_at is epoch millis from the server clock
const ADD: &str = "\
CREATE (k:Knowledge {text: $text, group_id: $group_id, created_at: timestamp()})
RETURN elementId(k) AS id, k.text AS text, k.group_id AS group_id, k.created_at AS created_at";

const SEARCH: &str = "\
MATCH (k:Knowledge {group_id: $group_id})
WHERE k.text CONTAINS $query
RETURN elementId(k) AS id, k.text AS text, k.group_id AS group_id, k.created_at AS created_at
ORDER BY k.created_at DESC
LIMIT $limit";

/// Knowledge records stored as `(:Knowledge)` nodes.
///
/// `Graph` is a pooled handle: each query checks a connection out of the pool
/// and returns it when the call completes, so concurrent tool calls never share
/// a session. Every round trip to the database is bounded by `op_timeout`.
#[derive(Clone)]
pub struct Neo4jStore {
    graph: Graph,
    op_timeout: Duration,
}

impl std::fmt::Debug for Neo4jStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Neo4jStore").finish_non_exhaustive()
    }
}

impl Neo4jStore {
    /// Connect and verify that the database answers a query
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self, KnowledgeError> {
        Self::connect_with_timeout(uri, user, password, REQUEST_TIMEOUT).await
    }

    /// Like [`Neo4jStore::connect`], with an explicit per-operation bound
    pub async fn connect_with_timeout(
        uri: &str,
        user: &str,
        password: &str,
        op_timeout: Duration,
    ) -> Result<Self, KnowledgeError> {
        let graph = bounded(op_timeout, "connect", Graph::new(uri, user, password)).await?;
        bounded(op_timeout, "ping", graph.run(query(PING))).await?;

        if let Err(e) = bounded(op_timeout, "create index", graph.run(query(ENSURE_INDEX))).await {
            tracing::warn!("Could not create knowledge group index: {}", e);
        }

        tracing::info!("Connected to graph database at {}", uri);
        Ok(Self { graph, op_timeout })
    }
}

/// Run one database round trip, failing with `Database` once `limit` elapses
async fn bounded<T, F>(limit: Duration, what: &str, fut: F) -> Result<T, KnowledgeError>
where
    F: Future<Output = Result<T, neo4rs::Error>>,
{
    timeout(limit, fut)
        .await
        .map_err(|_| {
            KnowledgeError::Database(format!("{} timed out after {:?}", what, limit))
        })?
        .map_err(KnowledgeError::from)
}

fn record_from_row(row: &Row) -> Result<KnowledgeRecord, KnowledgeError> {
    let column = |e: neo4rs::DeError| KnowledgeError::Database(format!("Unexpected row: {}", e));

    let created_ms: i64 = row.get("created_at").map_err(column)?;
    let created_at = DateTime::from_timestamp_millis(created_ms).ok_or_else(|| {
        KnowledgeError::Database(format!("Invalid created_at timestamp: {}", created_ms))
    })?;

    Ok(KnowledgeRecord {
        id: row.get("id").map_err(column)?,
        text: row.get("text").map_err(column)?,
        group_id: row.get("group_id").map_err(column)?,
        created_at,
    })
}

#[async_trait]
impl GraphStore for Neo4jStore {
    async fn add(&self, text: &str, group_id: &str) -> Result<KnowledgeRecord, KnowledgeError> {
        let mut rows = bounded(
            self.op_timeout,
            "add",
            self.graph
                .execute(query(ADD).param("text", text).param("group_id", group_id)),
        )
        .await?;

        let row = bounded(self.op_timeout, "add", rows.next())
            .await?
            .ok_or_else(|| KnowledgeError::Database("CREATE returned no row".to_string()))?;

        record_from_row(&row)
    }

    async fn search(
        &self,
        query_text: &str,
        group_id: &str,
        limit: usize,
    ) -> Result<Vec<KnowledgeRecord>, KnowledgeError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut rows = bounded(
            self.op_timeout,
            "search",
            self.graph.execute(
                query(SEARCH)
                    .param("query", query_text)
                    .param("group_id", group_id)
                    .param("limit", limit),
            ),
        )
        .await?;

        let mut records = Vec::new();
        while let Some(row) = bounded(self.op_timeout, "search", rows.next()).await? {
            records.push(record_from_row(&row)?);
        }
        Ok(records)
    }
}
