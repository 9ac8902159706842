//! # Catalog Subcommands
//!
//! `check-containers` loads a containers catalog on its own and lists each
//! labware with its location count, a quick way to confirm a catalog is the
//! one a protocol expects before validating against it. `slots` prints the
//! fixed deck-slot grid.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{json, Map, Value};

use protoval_core::ContainersCatalog;
use protoval_engine::rules::DECK_SLOTS;

use crate::output::OutputFormat;
use crate::{resolve_source, EXIT_INVALID, EXIT_VALID};

/// Arguments for the `protoval check-containers` subcommand.
#[derive(Args, Debug)]
pub struct CheckContainersArgs {
    /// Containers catalog: a JSON/YAML file path or raw JSON/YAML text.
    #[arg(value_name = "SRC", env = "PROTOVAL_CONTAINERS")]
    pub containers: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the check-containers subcommand.
///
/// Returns exit code: 0 when the catalog holds labware, 1 when it is empty.
pub fn run_check_containers(args: &CheckContainersArgs, out: &mut dyn Write) -> Result<u8> {
    let source = resolve_source(&args.containers);
    let label = source.label();
    let document = source
        .load()
        .with_context(|| format!("failed to load containers catalog {label}"))?;
    let catalog = ContainersCatalog::from_value(document);

    tracing::debug!(labware = catalog.labware_count(), "catalog loaded");

    match args.format {
        OutputFormat::Text => {
            writeln!(out, "Labware: {}", catalog.labware_count())?;
            for name in catalog.labware_names() {
                writeln!(out, "  {name}: {} location(s)", catalog.location_names(name).len())?;
            }
        }
        OutputFormat::Json => {
            let labware: Map<String, Value> = catalog
                .labware_names()
                .into_iter()
                .map(|name| (name.to_string(), json!(catalog.location_names(name).len())))
                .collect();
            writeln!(out, "{}", json!({ "labware": labware }))?;
        }
    }

    if catalog.is_empty() {
        tracing::warn!(source = %label, "containers catalog declares no labware");
        Ok(EXIT_INVALID)
    } else {
        Ok(EXIT_VALID)
    }
}

/// Execute the slots subcommand: one row of the deck per line.
pub fn run_slots(out: &mut dyn Write) -> Result<u8> {
    for row in ["A", "B", "C", "D", "E"] {
        let line: Vec<&str> = DECK_SLOTS
            .iter()
            .copied()
            .filter(|slot| slot.starts_with(row))
            .collect();
        writeln!(out, "{}", line.join(" "))?;
    }
    Ok(EXIT_VALID)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(containers: &str, format: OutputFormat) -> (u8, String) {
        let args = CheckContainersArgs {
            containers: containers.to_string(),
            format,
        };
        let mut out = Vec::new();
        let code = run_check_containers(&args, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_lists_labware_with_location_counts() {
        let (code, text) = check(
            r#"{"containers": {"point": {"locations": {"A1": {}}}, "trough": {"locations": {"A1": {}, "A2": {}}}}}"#,
            OutputFormat::Text,
        );
        assert_eq!(code, EXIT_VALID);
        assert_eq!(text, "Labware: 2\n  point: 1 location(s)\n  trough: 2 location(s)\n");
    }

    #[test]
    fn test_json_output() {
        let (_, text) = check(r#"{"containers": {"point": {"locations": {"A1": {}}}}}"#, OutputFormat::Json);
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!({ "labware": { "point": 1 } }));
    }

    #[test]
    fn test_catalog_without_containers_key_is_empty() {
        let (code, text) = check(r#"{"labware": {}}"#, OutputFormat::Text);
        assert_eq!(code, EXIT_INVALID);
        assert_eq!(text, "Labware: 0\n");
    }

    #[test]
    fn test_slots_grid() {
        let mut out = Vec::new();
        run_slots(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let rows: Vec<_> = text.lines().collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], "A1 A2 A3");
        assert_eq!(rows[4], "E1 E2 E3");
    }
}
