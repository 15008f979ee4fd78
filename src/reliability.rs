//! Instrumented transport wrapper that emits metrics and tracing events.

use crate::error::Result;
use crate::traits::{FetchRequest, FetchResponse, RulerTransport};
use async_trait::async_trait;
use std::time::Instant;

/// Wraps any [`RulerTransport`] and records `ruler_request.duration_seconds`
/// and `ruler_request.total` for each call. Results pass through untouched.
///
/// The `status` label is the HTTP status for responses and backend errors,
/// and `"error"` when no response was received.
pub struct InstrumentedTransport<T> {
    pub inner: T,
    pub data_source: String,
}

impl<T: RulerTransport> InstrumentedTransport<T> {
    pub fn new(inner: T, data_source: impl Into<String>) -> Self {
        Self {
            inner,
            data_source: data_source.into(),
        }
    }
}

#[async_trait]
impl<T: RulerTransport> RulerTransport for InstrumentedTransport<T> {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse> {
        let method = request.method.as_str();
        let start = Instant::now();
        let res = self.inner.fetch(request).await;
        let duration = start.elapsed();

        let status = match &res {
            Ok(response) => response.status.to_string(),
            Err(e) => e
                .status()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "error".to_string()),
        };

        if let Err(e) = &res {
            tracing::debug!(
                data_source = %self.data_source,
                method,
                error = %e,
                "Ruler request failed"
            );
        }

        metrics::histogram!(
            "ruler_request.duration_seconds",
            "data_source" => self.data_source.clone(),
            "method" => method
        )
        .record(duration.as_secs_f64());

        metrics::counter!(
            "ruler_request.total",
            "data_source" => self.data_source.clone(),
            "method" => method,
            "status" => status
        )
        .increment(1);

        res
    }
}
