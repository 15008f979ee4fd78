//! The transport seam: the only place a ruler client performs I/O.

use crate::error::Result;
use async_trait::async_trait;

/// HTTP method of a ruler request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request handed to a [`RulerTransport`].
///
/// `url` is a server-relative path that may already carry a query string;
/// `params` are appended by the transport.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchRequest {
    pub url: String,
    pub method: HttpMethod,
    pub data: Option<serde_json::Value>,
    pub params: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn post(url: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Post,
            data: Some(data),
            params: Vec::new(),
        }
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Delete,
            ..Self::default()
        }
    }

    pub fn with_params(mut self, params: Vec<(String, String)>) -> Self {
        self.params = params;
        self
    }
}

/// A successful (2xx) response.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    /// Decoded body; `Null` when the body was empty.
    pub data: serde_json::Value,
}

/// Performs HTTP requests on behalf of a [`RulerClient`](crate::client::RulerClient).
///
/// Implementations must report every non-2xx response as
/// [`RulerError::Transport`](crate::error::RulerError::Transport) carrying the
/// status and decoded body, and use other variants for faults where no
/// response was received. Authentication, connection pooling and retries are
/// the implementation's concern.
#[async_trait]
pub trait RulerTransport: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse>;
}
