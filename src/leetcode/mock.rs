//! Mock transport for testing purposes.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use super::{GraphQlRequest, GraphQlTransport, LeetCodeError};

/// A transport that records requests and replays predefined responses.
///
/// Queued responses are consumed first; once the queue is empty the sticky
/// response (if any) is returned for every call.
#[derive(Debug, Default)]
pub struct MockTransport {
    queued: Mutex<VecDeque<Result<Value, LeetCodeError>>>,
    sticky: Mutex<Option<Value>>,
    requests: Mutex<Vec<GraphQlRequest>>,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return this body for every call that has no queued response.
    pub fn set_response(&self, body: Value) {
        *self.sticky.lock().unwrap_or_else(PoisonError::into_inner) = Some(body);
    }

    /// Queue a body for the next call.
    pub fn push_response(&self, body: Value) {
        self.queued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(body));
    }

    /// Queue a transport failure for the next call.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.queued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(LeetCodeError::Transport(message.into())));
    }

    /// All requests seen so far.
    pub fn requests(&self) -> Vec<GraphQlRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<GraphQlRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

#[async_trait]
impl GraphQlTransport for MockTransport {
    async fn send(&self, request: &GraphQlRequest) -> Result<Value, LeetCodeError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        if let Some(next) = self
            .queued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
        {
            return next;
        }

        self.sticky
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| LeetCodeError::Transport("no mock response configured".to_string()))
    }
}
