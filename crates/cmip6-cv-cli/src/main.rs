//! # cmip6-cv CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmip6_cv_cli::config::GeneratorConfig;
use cmip6_cv_cli::generate::{run_generate, GenerateArgs};
use cmip6_cv_cli::validate::{run_validate, ValidateArgs};

/// CMIP6 controlled vocabulary tools.
///
/// Generates the JSON Schema for CMIP6 global attributes from the CVs and
/// validates dataset attributes against it.
#[derive(Parser, Debug)]
#[command(name = "cmip6-cv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Regenerate the global attributes schema from the CVs.
    Generate(GenerateArgs),

    /// Validate a dataset's global attributes.
    Validate(ValidateArgs),
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

    let config = GeneratorConfig::from_env();
    tracing::debug!(?config, "loaded configuration");

    let result = match cli.command {
        Commands::Generate(args) => run_generate(&args, config),
        Commands::Validate(args) => run_validate(&args, config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
