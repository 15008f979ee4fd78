#![allow(dead_code)]

//! Mock transport for unit tests.
//!
//! Gated with `#[cfg(test)]` in `lib.rs`.

use crate::error::{Result, RulerError, TransportError};
use crate::traits::{FetchRequest, FetchResponse, RulerTransport};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Transport that replays scripted outcomes and records every request.
///
/// Clones share the same script and request log. Once the script is exhausted
/// every call succeeds with an empty JSON object.
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<Result<FetchResponse>>>>,
    requests: Arc<Mutex<Vec<FetchRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, data: serde_json::Value) -> Self {
        self.push(Ok(FetchResponse { status: 200, data }));
        self
    }

    pub fn with_error(self, error: TransportError) -> Self {
        self.push(Err(RulerError::Transport(error)));
        self
    }

    pub fn with_fault(self, error: RulerError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, outcome: Result<FetchResponse>) {
        self.script.lock().unwrap().push_back(outcome);
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl RulerTransport for MockTransport {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(FetchResponse {
                    status: 200,
                    data: serde_json::json!({}),
                })
            })
    }
}
