//! Classification of failed ruler reads.
//!
//! Ruler backends signal "nothing here" and "no ruler at all" in different,
//! overlapping ways. The rules below are evaluated in order and the first
//! match wins, so the specific absent-resource messages must stay ahead of the
//! generic 404 handling.

use crate::error::{RulerError, TransportError};

/// What the request primitive should do with a failed read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The resource does not exist; return the caller's empty value.
    Absent,
    /// The data source has no usable ruler API; re-raise with the sentinel
    /// message.
    NotSupported,
    /// Anything else; re-raise unchanged.
    Passthrough,
}

impl Classification {
    /// Stable label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::NotSupported => "not_supported",
            Self::Passthrough => "passthrough",
        }
    }
}

struct Rule {
    id: &'static str,
    status: u16,
    /// Message must contain one of these. Empty matches any message.
    any_of: &'static [&'static str],
    outcome: Classification,
}

const ABSENT_MESSAGES: &[&str] = &["group does not exist", "no rule groups found"];

const HTML_UPSTREAM_MESSAGE: &str =
    "unexpected content type from upstream. expected YAML, got text/html";

const RULES: &[Rule] = &[
    Rule {
        id: "absent_group",
        status: 404,
        any_of: ABSENT_MESSAGES,
        outcome: Classification::Absent,
    },
    Rule {
        id: "ruler_not_found",
        status: 404,
        any_of: &[],
        outcome: Classification::NotSupported,
    },
    Rule {
        id: "html_upstream",
        status: 500,
        any_of: &[HTML_UPSTREAM_MESSAGE],
        outcome: Classification::NotSupported,
    },
];

fn matches_rule(error: &TransportError, rule: &Rule) -> bool {
    if error.status != rule.status {
        return false;
    }
    if rule.any_of.is_empty() {
        return true;
    }
    let Some(message) = error.message() else {
        return false;
    };
    rule.any_of.iter().any(|needle| message.contains(needle))
}

/// The backend error inside `error`, if it carries both a status and a body.
///
/// Errors without that shape are local faults and are never reclassified.
pub fn as_response_error(error: &RulerError) -> Option<&TransportError> {
    match error {
        RulerError::Transport(e) if e.data.is_some() => Some(e),
        _ => None,
    }
}

/// Classify a failed read.
pub fn classify(error: &RulerError) -> Classification {
    let Some(response) = as_response_error(error) else {
        return Classification::Passthrough;
    };
    RULES
        .iter()
        .find(|rule| matches_rule(response, rule))
        .map(|rule| {
            tracing::trace!(rule = rule.id, status = response.status, "Matched ruler error rule");
            rule.outcome
        })
        .unwrap_or(Classification::Passthrough)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(status: u16, message: &str) -> RulerError {
        RulerError::from(TransportError::with_message(status, message))
    }

    #[test]
    fn absent_messages_classify_as_absent() {
        assert_eq!(
            classify(&transport(404, "group does not exist")),
            Classification::Absent
        );
        assert_eq!(
            classify(&transport(404, "error: no rule groups found for user")),
            Classification::Absent
        );
    }

    #[test]
    fn absent_wins_over_generic_not_found() {
        let err = transport(404, "rule group does not exist");
        assert_eq!(classify(&err), Classification::Absent);
    }

    #[test]
    fn other_not_found_is_not_supported() {
        assert_eq!(
            classify(&transport(404, "unrelated issue")),
            Classification::NotSupported
        );
    }

    #[test]
    fn not_found_without_message_is_not_supported() {
        let err = RulerError::from(TransportError::new(404, Default::default()));
        assert_eq!(classify(&err), Classification::NotSupported);
    }

    #[test]
    fn html_upstream_is_not_supported() {
        let err = transport(
            500,
            "proxy failed: unexpected content type from upstream. expected YAML, got text/html; charset=utf-8",
        );
        assert_eq!(classify(&err), Classification::NotSupported);
    }

    #[test]
    fn other_server_errors_pass_through() {
        assert_eq!(
            classify(&transport(500, "internal error")),
            Classification::Passthrough
        );
        assert_eq!(
            classify(&transport(400, "group does not exist")),
            Classification::Passthrough
        );
    }

    #[test]
    fn errors_without_body_pass_through() {
        let err = RulerError::Transport(TransportError {
            status: 404,
            data: None,
        });
        assert_eq!(classify(&err), Classification::Passthrough);
        assert!(as_response_error(&err).is_none());
    }

    #[test]
    fn local_faults_pass_through() {
        let err = RulerError::Network("group does not exist".to_string());
        assert_eq!(classify(&err), Classification::Passthrough);
    }

    #[test]
    fn absent_rule_precedes_not_supported_rule() {
        let absent = RULES
            .iter()
            .position(|r| r.outcome == Classification::Absent)
            .unwrap();
        let not_found = RULES.iter().position(|r| r.id == "ruler_not_found").unwrap();
        assert!(absent < not_found);
    }
}
