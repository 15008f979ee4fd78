//! Public API types: data source configuration, filters, and rule payloads.

use crate::error::{Result, RulerError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Name of the built-in rules source. Only this source supports filtering by
/// dashboard; every other source is treated as a cloud ruler.
pub const BUILT_IN_RULES_SOURCE_NAME: &str = "grafana";

/// URL and query-parameter convention spoken by a ruler backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RulerDialect {
    /// Rules under `api/v1/rules`. This is the default.
    #[default]
    Standard,
    /// Rules under `api/v1/rules`, requested with `noProxy=true`.
    Legacy,
    /// Rules under `config/v1/rules`.
    Config,
}

impl RulerDialect {
    /// Path suffix (without leading slash) where this dialect serves rules.
    pub fn rules_path(self) -> &'static str {
        match self {
            Self::Config => "config/v1/rules",
            Self::Standard | Self::Legacy => "api/v1/rules",
        }
    }
}

impl std::fmt::Display for RulerDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Legacy => write!(f, "legacy"),
            Self::Config => write!(f, "config"),
        }
    }
}

/// Identifies a rules source and the dialect it speaks.
///
/// # Example JSON
///
/// ```json
/// {
///   "data_source_name": "mimir-prod",
///   "api_dialect": "config",
///   "uses_source_param": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RulerDataSourceConfig {
    /// Data source identifier, placed in the URL path after percent-encoding.
    pub data_source_name: String,
    /// Defaults to [`RulerDialect::Standard`].
    #[serde(default)]
    pub api_dialect: RulerDialect,
    /// When `true` every request carries `source=ruler`.
    #[serde(default)]
    pub uses_source_param: bool,
}

impl RulerDataSourceConfig {
    pub fn new(data_source_name: impl Into<String>, api_dialect: RulerDialect) -> Self {
        Self {
            data_source_name: data_source_name.into(),
            api_dialect,
            uses_source_param: false,
        }
    }

    /// Configuration for the built-in rules source.
    pub fn built_in() -> Self {
        Self::new(BUILT_IN_RULES_SOURCE_NAME, RulerDialect::Standard)
    }

    pub fn with_source_param(mut self, enabled: bool) -> Self {
        self.uses_source_param = enabled;
        self
    }

    pub fn is_built_in(&self) -> bool {
        self.data_source_name == BUILT_IN_RULES_SOURCE_NAME
    }

    /// The data source name must be non-empty and free of surrounding whitespace.
    pub fn validate(&self) -> Result<()> {
        if self.data_source_name.is_empty() {
            return Err(RulerError::Config(
                "Data source name cannot be empty".to_string(),
            ));
        }
        if self.data_source_name.trim() != self.data_source_name {
            return Err(RulerError::Config(format!(
                "Data source name '{}' has leading or trailing whitespace",
                self.data_source_name
            )));
        }
        Ok(())
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let config: Self = serde_json::from_value(value).map_err(|e| {
            RulerError::Config(format!("Invalid data source config JSON: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s).map_err(|e| {
            RulerError::Config(format!("Invalid data source config JSON: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Narrows a list-all request to the rules attached to one dashboard (and
/// optionally one panel). Only valid against the built-in source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_id: Option<i64>,
}

impl RulesFilter {
    pub fn dashboard(uid: impl Into<String>) -> Self {
        Self {
            dashboard_uid: Some(uid.into()),
            panel_id: None,
        }
    }

    pub fn with_panel(mut self, panel_id: i64) -> Self {
        self.panel_id = Some(panel_id);
        self
    }

    /// The dashboard UID, treating an empty string as unset.
    pub fn dashboard_uid(&self) -> Option<&str> {
        self.dashboard_uid.as_deref().filter(|uid| !uid.is_empty())
    }
}

/// A rule group exactly as the backend serves it. The client never inspects
/// the rules themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleGroupPayload(pub serde_json::Value);

impl RuleGroupPayload {
    /// The group's `name` field, if present.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(|v| v.as_str())
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for RuleGroupPayload {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Rule groups keyed by namespace, as returned by a list-all request.
pub type RulesByNamespace = BTreeMap<String, Vec<RuleGroupPayload>>;

/// Settings for the bundled HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpTransportConfig {
    /// Server root that relative ruler paths are joined onto,
    /// e.g. `http://localhost:3000`.
    pub base_url: String,
    /// Environment variable holding a bearer token. No `Authorization` header
    /// is sent when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

impl HttpTransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key_env: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url).map_err(|e| {
            RulerError::Config(format!("Invalid base_url '{}': {}", self.base_url, e))
        })?;
        Ok(())
    }
}

/// Complete client configuration, as read by the `ruler` binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub transport: HttpTransportConfig,
    pub data_source: RulerDataSourceConfig,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        self.transport.validate()?;
        self.data_source.validate()
    }
}

/// Parse a [`ClientConfig`] from a JSON string.
pub fn config_from_str(s: &str) -> Result<ClientConfig> {
    let config: ClientConfig = serde_json::from_str(s)
        .map_err(|e| RulerError::Config(format!("Invalid client config JSON: {}", e)))?;
    config.validate()?;
    Ok(config)
}

/// Read and parse a [`ClientConfig`] from a JSON file.
pub fn config_from_file(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        RulerError::Config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    config_from_str(&contents)
}
