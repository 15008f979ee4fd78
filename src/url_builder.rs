//! Dialect-aware URL construction for ruler endpoints.
//!
//! A [`RulerUrlBuilder`] is computed once from a [`RulerDataSourceConfig`] and is
//! immutable afterwards: every method is a pure function of the builder and its
//! arguments, so calling them in any order yields the same query parameters.

use crate::api::{RulerDataSourceConfig, RulerDialect, RulesFilter};
use url::form_urlencoded;
use urlencoding::encode;

/// Server path under which every ruler data source is proxied.
pub const RULER_API_ROOT: &str = "/api/ruler";

/// A URL paired with query parameters that have not been encoded into it.
///
/// Returned for the list-all endpoint, whose parameters are handed to the
/// transport separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulerRequestTarget {
    pub url: String,
    pub params: Vec<(String, String)>,
}

/// Builds request URLs for one data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulerUrlBuilder {
    base_path: String,
    base_params: Vec<(String, String)>,
}

impl RulerUrlBuilder {
    pub fn new(config: &RulerDataSourceConfig) -> Self {
        let base_path = format!(
            "{}/{}",
            data_source_root(&config.data_source_name),
            config.api_dialect.rules_path()
        );

        let mut base_params = Vec::new();
        if config.uses_source_param {
            base_params.push(("source".to_string(), "ruler".to_string()));
        }
        if config.api_dialect == RulerDialect::Legacy {
            base_params.push(("noProxy".to_string(), "true".to_string()));
        }

        Self {
            base_path,
            base_params,
        }
    }

    /// Path of the rules collection, without a query string.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Query parameters carried by every request to this data source.
    pub fn base_params(&self) -> &[(String, String)] {
        &self.base_params
    }

    /// Target for listing every rule group, optionally narrowed to a dashboard.
    ///
    /// `panel_id` is only sent together with a dashboard UID.
    pub fn rules(&self, filter: Option<&RulesFilter>) -> RulerRequestTarget {
        let mut params = self.base_params.clone();
        if let Some(filter) = filter {
            if let Some(uid) = filter.dashboard_uid() {
                params.push(("dashboard_uid".to_string(), uid.to_string()));
                if let Some(panel_id) = filter.panel_id {
                    params.push(("panel_id".to_string(), panel_id.to_string()));
                }
            }
        }
        RulerRequestTarget {
            url: self.base_path.clone(),
            params,
        }
    }

    /// URL of a namespace, with the base query string appended.
    ///
    /// The `?` separator is always present, even with no parameters.
    pub fn namespace(&self, namespace: &str) -> String {
        format!(
            "{}/{}?{}",
            self.base_path,
            encode_segment(namespace),
            self.query_string()
        )
    }

    /// URL of a single group within a namespace.
    pub fn namespace_group(&self, namespace: &str, group: &str) -> String {
        format!(
            "{}/{}/{}?{}",
            self.base_path,
            encode_segment(namespace),
            encode_segment(group),
            self.query_string()
        )
    }

    fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.base_params.iter())
            .finish()
    }
}

/// URL of a rule group on the stable `api/v1/rules` path, with no query string.
///
/// Used for the built-in source, whose URL shape never varies by dialect.
pub fn legacy_group_url(data_source_name: &str, namespace: &str, group: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        data_source_root(data_source_name),
        RulerDialect::Standard.rules_path(),
        encode_segment(namespace),
        encode_segment(group)
    )
}

/// Sub-delimiters that URI component encoding conventionally leaves
/// untouched but `urlencoding` escapes.
const KEPT_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encode one path segment. Only `A-Z a-z 0-9 - _ . ! ~ * ' ( )` pass
/// through unescaped.
fn encode_segment(segment: &str) -> String {
    let encoded = encode(segment).into_owned();
    if !encoded.contains('%') {
        return encoded;
    }
    KEPT_MARKS
        .iter()
        .fold(encoded, |acc, (escaped, mark)| acc.replace(escaped, mark))
}

fn data_source_root(data_source_name: &str) -> String {
    format!("{}/{}", RULER_API_ROOT, encode_segment(data_source_name))
}
