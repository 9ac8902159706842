//! # Validate Subcommand
//!
//! Loads a protocol and a containers catalog, runs a full validation pass
//! and writes the report. A document that cannot be loaded is an
//! operational failure, not a report finding: the caller gets an error
//! and exit code 2.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use protoval_engine::ProtocolValidator;

use crate::output::{render, OutputFormat};
use crate::{resolve_source, EXIT_INVALID, EXIT_VALID};

/// Arguments for the `protoval validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Protocol document: a JSON/YAML file path or raw JSON/YAML text.
    #[arg(long, value_name = "SRC")]
    pub protocol: String,

    /// Containers catalog: a JSON/YAML file path or raw JSON/YAML text.
    #[arg(long, value_name = "SRC", env = "PROTOVAL_CONTAINERS")]
    pub containers: String,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Indent JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Treat warnings as a failing result.
    #[arg(long)]
    pub strict: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when valid, 1 when the report fails.
pub fn run_validate(args: &ValidateArgs, out: &mut dyn Write) -> Result<u8> {
    let validator = ProtocolValidator::try_from_sources(
        resolve_source(&args.protocol),
        resolve_source(&args.containers),
    )
    .context("failed to load input documents")?;

    tracing::info!(
        labware = validator.containers().labware_count(),
        "loaded containers catalog"
    );

    let report = validator.validate();
    render(&report, args.format, args.pretty, out).context("failed to write report")?;

    let failed = !report.is_valid() || (args.strict && !report.warnings.is_empty());
    Ok(if failed { EXIT_INVALID } else { EXIT_VALID })
}
