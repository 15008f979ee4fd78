//! `ruler`: inspect and edit rule groups on a ruler-compatible data source.
//!
//! Usage:
//!
//! ```text
//! ruler <config.json> <command> [ARGS] [OPTIONS]
//! ```
//!
//! The config file holds a `transport` section (`base_url`, optional
//! `api_key_env`) and a `data_source` section (`data_source_name`,
//! `api_dialect`, `uses_source_param`). Results are printed as pretty JSON.

use ruler_client::api::{RuleGroupPayload, RulesFilter, config_from_file};
use ruler_client::client::RulerClient;
use ruler_client::error::RulerError;
use ruler_client::reliability::InstrumentedTransport;
use ruler_client::transport::HttpTransport;
use serde::Serialize;
use std::process;

fn print_usage() {
    eprintln!("Usage: ruler <config.json> <command> [ARGS] [OPTIONS]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  list                        List all rule groups by namespace");
    eprintln!("  namespace <ns>              List the rule groups of one namespace");
    eprintln!("  group <ns> <group>          Show one rule group");
    eprintln!("  upsert <ns> <group.json>    Create or replace a rule group");
    eprintln!("  delete-group <ns> <group>   Delete one rule group");
    eprintln!("  delete-namespace <ns>       Delete a namespace and all its groups");
    eprintln!("  probe                       Check whether the data source has a ruler");
    eprintln!();
    eprintln!("Options (list only):");
    eprintln!("  --dashboard-uid <uid>       Only rules attached to this dashboard");
    eprintln!("  --panel-id <id>             Only rules attached to this panel");
    eprintln!("  --help                      Show this message");
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // --- Argument parsing ---------------------------------------------------
    let mut args = std::env::args().skip(1);
    let mut positional: Vec<String> = Vec::new();
    let mut dashboard_uid: Option<String> = None;
    let mut panel_id: Option<i64> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--dashboard-uid" => {
                dashboard_uid = Some(args.next().ok_or_else(|| {
                    anyhow::anyhow!("--dashboard-uid requires a value")
                })?);
            }
            "--panel-id" => {
                let raw = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--panel-id requires a value"))?;
                panel_id = Some(
                    raw.parse()
                        .map_err(|_| anyhow::anyhow!("--panel-id must be an integer: {raw}"))?,
                );
            }
            _ if arg.starts_with('-') => {
                anyhow::bail!("Unknown option: {arg}");
            }
            _ => positional.push(arg),
        }
    }

    if positional.len() < 2 {
        print_usage();
        anyhow::bail!("Missing required arguments: <config.json> <command>");
    }
    let config_path = positional.remove(0);
    let command = positional.remove(0);

    // --- Client -------------------------------------------------------------
    let config = config_from_file(&config_path)
        .map_err(|e| anyhow::anyhow!("Failed to load config '{config_path}': {e}"))?;
    let data_source = config.data_source;
    let transport = InstrumentedTransport::new(
        HttpTransport::new(&config.transport)?,
        data_source.data_source_name.clone(),
    );
    let client = RulerClient::new(transport);

    // --- Dispatch -----------------------------------------------------------
    let name = data_source.data_source_name.as_str();
    let ok = serde_json::json!({"status": "ok"});
    let output = match (command.as_str(), positional.as_slice()) {
        ("list", []) => {
            let filter = dashboard_uid.map(|uid| RulesFilter {
                dashboard_uid: Some(uid),
                panel_id,
            });
            let rules = client
                .fetch_all(&data_source, filter.as_ref())
                .await
                .map_err(|e| report(e, name))?;
            render(&rules)?
        }
        ("namespace", [ns]) => {
            let groups = client
                .fetch_namespace(&data_source, ns)
                .await
                .map_err(|e| report(e, name))?;
            render(&groups)?
        }
        ("group", [ns, group]) => {
            let group = client
                .fetch_group_v2(&data_source, ns, group)
                .await
                .map_err(|e| report(e, name))?;
            render(&group)?
        }
        ("upsert", [ns, path]) => {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read '{path}': {e}"))?;
            let group: RuleGroupPayload = serde_json::from_str(&contents)
                .map_err(|e| anyhow::anyhow!("Invalid rule group JSON in '{path}': {e}"))?;
            client
                .upsert_group(&data_source, ns, &group)
                .await
                .map_err(|e| report(e, name))?;
            render(&ok)?
        }
        ("delete-group", [ns, group]) => {
            client
                .delete_group(&data_source, ns, group)
                .await
                .map_err(|e| report(e, name))?;
            render(&ok)?
        }
        ("delete-namespace", [ns]) => {
            client
                .delete_namespace(&data_source, ns)
                .await
                .map_err(|e| report(e, name))?;
            render(&ok)?
        }
        ("probe", []) => {
            let supported = client
                .probe_ruler_support(&data_source)
                .await
                .map_err(|e| report(e, name))?;
            render(&serde_json::json!({"ruler_supported": supported}))?
        }
        _ => {
            print_usage();
            anyhow::bail!("Unknown command or wrong arguments: {command}");
        }
    };

    println!("{output}");
    Ok(())
}

fn render<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| anyhow::anyhow!("Failed to render output: {e}"))
}

/// Turn the not-supported sentinel into a readable message.
fn report(error: RulerError, data_source: &str) -> anyhow::Error {
    if error.is_ruler_not_supported() {
        anyhow::anyhow!("data source '{data_source}' does not support the ruler API")
    } else {
        error.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruler_client::error::TransportError;
    use std::collections::BTreeMap;

    #[test]
    fn render_propagates_serialization_errors() {
        let mut map = BTreeMap::new();
        map.insert((1, 2), "non-string key");
        assert!(render(&map).is_err());
    }

    #[test]
    fn render_pretty_prints() {
        let out = render(&serde_json::json!({"status": "ok"})).unwrap();
        assert_eq!(out, "{\n  \"status\": \"ok\"\n}");
    }

    #[test]
    fn report_rewrites_sentinel() {
        let err = RulerError::Transport(TransportError::with_message(404, "ruler not supported"));
        assert_eq!(
            report(err, "loki").to_string(),
            "data source 'loki' does not support the ruler API"
        );

        let other = RulerError::Network("reset".to_string());
        assert_eq!(report(other, "loki").to_string(), "Network error: reset");
    }
}
