//! The request orchestrator: issues ruler calls through a [`RulerTransport`] and
//! normalizes backend failures.

use crate::api::{RuleGroupPayload, RulerDataSourceConfig, RulesByNamespace, RulesFilter};
use crate::classify::{Classification, classify};
use crate::error::{RULER_NOT_SUPPORTED_MSG, Result, RulerError};
use crate::traits::{FetchRequest, RulerTransport};
use crate::url_builder::{RulerUrlBuilder, legacy_group_url};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Namespace and group requested by [`RulerClient::probe_ruler_support`].
const PROBE_NAME: &str = "test";

/// Client for ruler-compatible rule APIs.
///
/// The client holds no per-request state; every operation takes the data
/// source configuration it should target, so one client can serve many data
/// sources concurrently.
///
/// Reads downgrade "does not exist" responses to an empty value and rewrite
/// "no ruler here" responses to carry [`RULER_NOT_SUPPORTED_MSG`]. Writes and
/// deletes surface every error unmodified.
#[derive(Clone)]
pub struct RulerClient {
    transport: Arc<dyn RulerTransport>,
}

impl RulerClient {
    pub fn new(transport: impl RulerTransport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn from_arc(transport: Arc<dyn RulerTransport>) -> Self {
        Self { transport }
    }

    /// Create or replace a rule group in `namespace`.
    pub async fn upsert_group(
        &self,
        config: &RulerDataSourceConfig,
        namespace: &str,
        group: &RuleGroupPayload,
    ) -> Result<()> {
        config.validate()?;
        let url = RulerUrlBuilder::new(config).namespace(namespace);
        tracing::debug!(data_source = %config.data_source_name, namespace, "Upserting rule group");
        self.transport
            .fetch(FetchRequest::post(url, group.0.clone()))
            .await?;
        Ok(())
    }

    /// Fetch every rule group, keyed by namespace.
    ///
    /// Filtering by dashboard is only supported by the built-in source; any
    /// other source fails with [`RulerError::InvalidArgument`] before a request
    /// is made.
    pub async fn fetch_all(
        &self,
        config: &RulerDataSourceConfig,
        filter: Option<&RulesFilter>,
    ) -> Result<RulesByNamespace> {
        config.validate()?;
        if filter.and_then(|f| f.dashboard_uid()).is_some() && !config.is_built_in() {
            return Err(RulerError::InvalidArgument(
                "Filtering by dashboard UID is only supported for the built-in rules source"
                    .to_string(),
            ));
        }
        let target = RulerUrlBuilder::new(config).rules(filter);
        self.request(target.url, RulesByNamespace::new(), target.params)
            .await
    }

    /// Fetch the rule groups of one namespace. A namespace missing from the
    /// response yields an empty vector.
    pub async fn fetch_namespace(
        &self,
        config: &RulerDataSourceConfig,
        namespace: &str,
    ) -> Result<Vec<RuleGroupPayload>> {
        config.validate()?;
        let url = RulerUrlBuilder::new(config).namespace(namespace);
        let mut result: RulesByNamespace =
            self.request(url, RulesByNamespace::new(), Vec::new()).await?;
        Ok(result.remove(namespace).unwrap_or_default())
    }

    /// Fetch one rule group using the stable `api/v1/rules` path, bypassing the
    /// data source's dialect. Returns `None` if the group does not exist.
    pub async fn fetch_group(
        &self,
        data_source_name: &str,
        namespace: &str,
        group: &str,
    ) -> Result<Option<RuleGroupPayload>> {
        if data_source_name.is_empty() {
            return Err(RulerError::Config(
                "Data source name cannot be empty".to_string(),
            ));
        }
        let url = legacy_group_url(data_source_name, namespace, group);
        self.request(url, None, Vec::new()).await
    }

    /// Fetch one rule group using the data source's dialect. Returns `None` if
    /// the group does not exist.
    pub async fn fetch_group_v2(
        &self,
        config: &RulerDataSourceConfig,
        namespace: &str,
        group: &str,
    ) -> Result<Option<RuleGroupPayload>> {
        config.validate()?;
        let url = RulerUrlBuilder::new(config).namespace_group(namespace, group);
        self.request(url, None, Vec::new()).await
    }

    pub async fn delete_group(
        &self,
        config: &RulerDataSourceConfig,
        namespace: &str,
        group: &str,
    ) -> Result<()> {
        config.validate()?;
        let url = RulerUrlBuilder::new(config).namespace_group(namespace, group);
        tracing::debug!(data_source = %config.data_source_name, namespace, group, "Deleting rule group");
        self.transport.fetch(FetchRequest::delete(url)).await?;
        Ok(())
    }

    pub async fn delete_namespace(
        &self,
        config: &RulerDataSourceConfig,
        namespace: &str,
    ) -> Result<()> {
        config.validate()?;
        let url = RulerUrlBuilder::new(config).namespace(namespace);
        tracing::debug!(data_source = %config.data_source_name, namespace, "Deleting namespace");
        self.transport.fetch(FetchRequest::delete(url)).await?;
        Ok(())
    }

    /// Check whether the data source exposes a ruler API at all.
    ///
    /// Requests a placeholder group: success or "does not exist" means the
    /// ruler is reachable, the not-supported outcome yields `false`, and any
    /// other error is returned.
    pub async fn probe_ruler_support(&self, config: &RulerDataSourceConfig) -> Result<bool> {
        match self.fetch_group_v2(config, PROBE_NAME, PROBE_NAME).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_ruler_not_supported() => {
                tracing::info!(data_source = %config.data_source_name, "Ruler API not supported");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Perform a read and classify any failure. A success with no body counts
    /// as absent.
    #[tracing::instrument(skip(self, url, on_absent, params), fields(url = %url))]
    async fn request<T: DeserializeOwned>(
        &self,
        url: String,
        on_absent: T,
        params: Vec<(String, String)>,
    ) -> Result<T> {
        let request = FetchRequest::get(url).with_params(params);
        let error = match self.transport.fetch(request).await {
            Ok(response) if response.data.is_null() => return Ok(on_absent),
            Ok(response) => {
                return serde_json::from_value(response.data).map_err(|e| {
                    RulerError::Decode(format!("Unexpected ruler response body: {}", e))
                });
            }
            Err(e) => e,
        };

        let classification = classify(&error);
        metrics::counter!("ruler_request.classified", "outcome" => classification.as_str())
            .increment(1);

        match classification {
            Classification::Absent => {
                tracing::debug!(error = %error, "Treating ruler response as empty");
                Ok(on_absent)
            }
            Classification::NotSupported => {
                tracing::warn!(
                    status = error.status(),
                    backend_message = error.message(),
                    "Ruler API not supported by data source"
                );
                Err(match error {
                    RulerError::Transport(e) => {
                        RulerError::Transport(e.replace_message(RULER_NOT_SUPPORTED_MSG))
                    }
                    other => other,
                })
            }
            Classification::Passthrough => Err(error),
        }
    }
}
