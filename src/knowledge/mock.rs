//! In-memory backends for testing purposes.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use super::{CompletionClient, CompletionRequest, GraphStore, KnowledgeError, KnowledgeRecord};

/// A graph store that keeps records in a vector, with the same search
/// semantics as the Neo4j backend.
#[derive(Debug, Default)]
pub struct MemoryGraphStore {
    records: Mutex<Vec<KnowledgeRecord>>,
    next_id: AtomicU64,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GraphStore for MemoryGraphStore {
    async fn add(&self, text: &str, group_id: &str) -> Result<KnowledgeRecord, KnowledgeError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = KnowledgeRecord {
            id: format!("mem:{}", id),
            text: text.to_string(),
            group_id: group_id.to_string(),
            created_at: Utc::now(),
        };

        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(record)
    }

    async fn search(
        &self,
        query: &str,
        group_id: &str,
        limit: usize,
    ) -> Result<Vec<KnowledgeRecord>, KnowledgeError> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);

        // insertion order is creation order
        Ok(records
            .iter()
            .rev()
            .filter(|r| r.group_id == group_id && r.text.contains(query))
            .take(limit)
            .cloned()
            .collect())
    }
}

/// A completion client returning a canned reply and recording its calls.
#[derive(Debug)]
pub struct MockCompletion {
    reply: Result<String, KnowledgeError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockCompletion {
    /// Always answer with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::with_result(Ok(reply.into()))
    }

    /// Always fail with an upstream error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_result(Err(KnowledgeError::UpstreamGeneration(message.into())))
    }

    fn with_result(reply: Result<String, KnowledgeError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// How many times `complete` was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, KnowledgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(request.clone());
        self.reply.clone()
    }
}
