//! Error types for the ruler client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RulerError>;

/// Message substituted into a backend error when the data source does not
/// expose a ruler API at all.
///
/// Match on it with [`RulerError::is_ruler_not_supported`] rather than by
/// comparing strings.
pub const RULER_NOT_SUPPORTED_MSG: &str = "ruler not supported";

/// Unified error type for ruler operations.
///
/// Only [`Transport`](Self::Transport) originates from a backend response;
/// every other variant is a local fault and is never reclassified.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RulerError {
    /// The backend answered with a non-2xx status.
    #[error("Ruler API error: {0}")]
    Transport(TransportError),

    /// The request could not be sent or no response was received.
    #[error("Network error: {0}")]
    Network(String),

    /// A response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A caller precondition was violated before any request was issued.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid or missing client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RulerError {
    /// HTTP status of a backend error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => Some(e.status),
            _ => None,
        }
    }

    /// The backend-supplied `message` field, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Transport(e) => e.message(),
            _ => None,
        }
    }

    /// Returns `true` when the error was raised because the data source has no
    /// usable ruler API. Callers use this to switch to a "feature unavailable"
    /// path instead of reporting a failure.
    pub fn is_ruler_not_supported(&self) -> bool {
        self.message() == Some(RULER_NOT_SUPPORTED_MSG)
    }
}

impl From<TransportError> for RulerError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

/// A non-2xx response as reported by a [`RulerTransport`](crate::traits::RulerTransport).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportError {
    /// HTTP status code.
    pub status: u16,
    /// Decoded error body. `None` when the backend sent nothing usable; such
    /// errors are propagated without classification.
    pub data: Option<ErrorBody>,
}

impl TransportError {
    pub fn new(status: u16, data: ErrorBody) -> Self {
        Self {
            status,
            data: Some(data),
        }
    }

    /// Shorthand for an error whose body carries only a `message`.
    pub fn with_message(status: u16, message: impl Into<String>) -> Self {
        Self::new(status, ErrorBody::message(message))
    }

    pub fn message(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.message.as_deref())
    }

    /// Return the same error with `data.message` overwritten. All other body
    /// fields and the status are kept.
    pub fn replace_message(mut self, message: impl Into<String>) -> Self {
        self.data.get_or_insert_with(ErrorBody::default).message = Some(message.into());
        self
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.message() {
            Some(message) => write!(f, "HTTP {}: {}", self.status, message),
            None => write!(f, "HTTP {}", self.status),
        }
    }
}

/// Error payload returned by ruler backends.
///
/// Backends disagree on the exact shape; `message` and `error` are the two
/// fields in common use and anything else is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }
}
