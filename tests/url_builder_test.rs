//! URL shapes across dialects, as seen from outside the crate.

use ruler_client::api::{RulerDataSourceConfig, RulerDialect, RulesFilter};
use ruler_client::url_builder::{RulerUrlBuilder, legacy_group_url};
use std::collections::BTreeSet;
use url::form_urlencoded;

fn query_set(url: &str) -> BTreeSet<(String, String)> {
    let query = url.split_once('?').map(|(_, q)| q).unwrap_or("");
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[test]
fn test_base_path_by_dialect() {
    let cases = [
        (RulerDialect::Standard, "/api/ruler/ds/api/v1/rules"),
        (RulerDialect::Legacy, "/api/ruler/ds/api/v1/rules"),
        (RulerDialect::Config, "/api/ruler/ds/config/v1/rules"),
    ];
    for (dialect, expected) in cases {
        let builder = RulerUrlBuilder::new(&RulerDataSourceConfig::new("ds", dialect));
        assert_eq!(builder.rules(None).url, expected, "dialect {dialect}");
    }
}

#[test]
fn test_all_dialect_and_source_combinations_share_query_sets() {
    for dialect in [RulerDialect::Standard, RulerDialect::Legacy, RulerDialect::Config] {
        for source in [false, true] {
            let config = RulerDataSourceConfig::new("ds", dialect).with_source_param(source);
            let builder = RulerUrlBuilder::new(&config);

            let ns = query_set(&builder.namespace("a/b"));
            let group = query_set(&builder.namespace_group("a/b", "c d"));
            let rules: BTreeSet<_> = builder.rules(None).params.into_iter().collect();

            assert_eq!(ns, group);
            assert_eq!(ns, rules);
            assert_eq!(ns.contains(&("source".to_string(), "ruler".to_string())), source);
            assert_eq!(
                ns.contains(&("noProxy".to_string(), "true".to_string())),
                dialect == RulerDialect::Legacy
            );
        }
    }
}

#[test]
fn test_builder_is_reusable() {
    let config = RulerDataSourceConfig::new("ds", RulerDialect::Legacy).with_source_param(true);
    let builder = RulerUrlBuilder::new(&config);
    let first = builder.namespace("ns");
    let _ = builder.rules(Some(&RulesFilter::dashboard("d")));
    let _ = builder.namespace_group("ns", "g");
    assert_eq!(builder.namespace("ns"), first);
    assert_eq!(builder, RulerUrlBuilder::new(&config));
}

#[test]
fn test_unicode_names_are_percent_encoded() {
    let builder = RulerUrlBuilder::new(&RulerDataSourceConfig::new("ds", RulerDialect::Standard));
    assert_eq!(
        builder.namespace("règles"),
        "/api/ruler/ds/api/v1/rules/r%C3%A8gles?"
    );
}

#[test]
fn test_legacy_group_url_has_no_query() {
    let url = legacy_group_url("grafana", "ns", "g");
    assert!(!url.contains('?'));
    assert_eq!(url, "/api/ruler/grafana/api/v1/rules/ns/g");
}

#[test]
fn test_unreserved_marks_stay_literal() {
    let builder = RulerUrlBuilder::new(&RulerDataSourceConfig::new("ds", RulerDialect::Standard));
    assert_eq!(
        builder.namespace_group("team's (prod)", "cpu*!"),
        "/api/ruler/ds/api/v1/rules/team's%20(prod)/cpu*!?"
    );
}
