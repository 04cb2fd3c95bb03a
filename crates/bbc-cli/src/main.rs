//! # bbc CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bbc_cli::coerce::{run_coerce, CoerceArgs};
use bbc_cli::diff::{run_diff, DiffArgs};
use bbc_cli::slug::{run_slug, SlugArgs};

/// Connector directory tooling.
///
/// Runs the same coercion, diffing, and identifier derivation the API
/// applies to submissions, against local JSON files.
#[derive(Parser, Debug)]
#[command(name = "bbc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Coerce a submission into a candidate record for its kind.
    Coerce(CoerceArgs),

    /// Show field-level differences between a proposal and an existing record.
    Diff(DiffArgs),

    /// Print the identifier derived from a display name.
    Slug(SlugArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Coerce(args) => run_coerce(&args),
        Commands::Diff(args) => run_diff(&args),
        Commands::Slug(args) => run_slug(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
