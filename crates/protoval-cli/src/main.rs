//! # protoval CLI entry point
//!
//! Parses command-line arguments, sets up logging on stderr, and dispatches
//! to subcommand handlers. Reports go to stdout.

use std::io::Write;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use protoval_cli::catalog::{run_check_containers, run_slots, CheckContainersArgs};
use protoval_cli::validate::{run_validate, ValidateArgs};
use protoval_cli::EXIT_FAILURE;

/// Liquid-handling protocol validator.
///
/// Checks a protocol document for structural and semantic faults against a
/// containers catalog before it is run on a robot.
#[derive(Parser, Debug)]
#[command(name = "protoval", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit log events as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a protocol against a containers catalog.
    Validate(ValidateArgs),

    /// Load a containers catalog and summarize its labware.
    CheckContainers(CheckContainersArgs),

    /// Print the deck-slot vocabulary.
    Slots,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "protoval starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &mut out),
        Commands::CheckContainers(args) => run_check_containers(&args, &mut out),
        Commands::Slots => run_slots(&mut out),
    };
    let result = result.and_then(|code| {
        out.flush()?;
        Ok(code)
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
