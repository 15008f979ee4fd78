//! Scripted transport shared by the integration tests.

use async_trait::async_trait;
use ruler_client::api::{RulerDataSourceConfig, RulerDialect};
use ruler_client::error::{Result, RulerError, TransportError};
use ruler_client::traits::{FetchRequest, FetchResponse, RulerTransport};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays scripted outcomes in order and records every request. Clones share
/// state, so keep one clone for assertions after handing another to the client.
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
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(FetchResponse { status: 200, data }));
        self
    }

    pub fn with_error(self, status: u16, message: &str) -> Self {
        self.with_fault(RulerError::Transport(TransportError::with_message(
            status, message,
        )))
    }

    pub fn with_fault(self, error: RulerError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
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
            .expect("MockTransport called more times than scripted")
    }
}

pub fn cloud_config(dialect: RulerDialect) -> RulerDataSourceConfig {
    RulerDataSourceConfig::new("cortex", dialect)
}
