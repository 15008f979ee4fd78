//! Shared HTTP helpers: response status mapping, error body decoding, and API
//! key resolution.

use crate::error::{ErrorBody, Result, RulerError, TransportError};
use crate::traits::FetchResponse;
use serde_json::Value;

/// Convert a raw response into a [`FetchResponse`], or a
/// [`RulerError::Transport`] for non-2xx statuses.
///
/// Success bodies are never rejected here: an empty body is `Null` and a
/// non-JSON body is passed on as a JSON string. Shape checks belong to the
/// reader.
pub(crate) async fn check_http_status(response: reqwest::Response) -> Result<FetchResponse> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| RulerError::Network(e.to_string()))?;

    if status.is_success() {
        return Ok(FetchResponse {
            status: status.as_u16(),
            data: parse_success_body(text),
        });
    }

    Err(RulerError::Transport(TransportError::new(
        status.as_u16(),
        parse_error_body(&text),
    )))
}

fn parse_success_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

/// Decode an error body.
///
/// JSON objects map onto [`ErrorBody`]; a bare JSON string or plain text (as
/// Cortex-style rulers send) becomes the `message`. An empty body yields an
/// empty [`ErrorBody`] so the status can still be classified.
pub(crate) fn parse_error_body(text: &str) -> ErrorBody {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ErrorBody::default();
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value @ Value::Object(_)) => {
            serde_json::from_value(value).unwrap_or_else(|_| ErrorBody::message(trimmed))
        }
        Ok(Value::String(message)) => ErrorBody::message(message),
        _ => ErrorBody::message(trimmed),
    }
}

/// Read a bearer token from the environment variable `env_var_name`.
pub(crate) fn resolve_api_key(env_var_name: &str) -> Result<String> {
    std::env::var(env_var_name)
        .map_err(|_| RulerError::Config(format!("{} env var not set", env_var_name)))
}
