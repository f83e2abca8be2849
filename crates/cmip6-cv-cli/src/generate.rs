//! # Generate Subcommand
//!
//! Rebuilds the global attributes schema from the CV directory and writes
//! it to disk (or stdout). The schema is always rebuilt in full.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cmip6_cv_core::CvDirectory;
use cmip6_cv_schema::{to_pretty_json, write_schema, SchemaBuilder, SchemaOptions};

use crate::config::GeneratorConfig;

/// Arguments for the `cmip6-cv generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory containing the CMIP6_<key>.json CV files.
    #[arg(long, value_name = "DIR")]
    pub cv_dir: Option<PathBuf>,

    /// Where to write the schema.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Prefix every attribute name with `<PREFIX>:`.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Emit compact `enum` lists instead of titled `oneOf` branches.
    #[arg(long = "enum")]
    pub use_enum: bool,

    /// Print the schema instead of writing it.
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

/// Execute the generate subcommand.
///
/// Returns exit code 0 on success. Fatal CV errors propagate.
pub fn run_generate(args: &GenerateArgs, config: GeneratorConfig) -> Result<u8> {
    let config = config.with_overrides(
        args.cv_dir.as_deref(),
        args.output.as_deref(),
        args.prefix.as_deref(),
    );

    let options = SchemaOptions {
        prefix: config.prefix.clone(),
        use_enum: args.use_enum,
    };
    tracing::info!(
        cv_dir = %config.cv_dir.display(),
        prefix = ?options.prefix,
        use_enum = options.use_enum,
        "generating global attributes schema"
    );

    let cvs = CvDirectory::new(&config.cv_dir);
    let schema = SchemaBuilder::new(&cvs)
        .with_options(options)
        .build()
        .with_context(|| format!("failed to build schema from {}", config.cv_dir.display()))?;

    if args.stdout {
        print!("{}", to_pretty_json(&schema)?);
        return Ok(0);
    }

    let path = config.schema_path();
    write_schema(&schema, &path)
        .with_context(|| format!("failed to write schema to {}", path.display()))?;

    let count = schema["properties"].as_object().map_or(0, |p| p.len());
    println!("Wrote {} ({count} attributes)", path.display());
    Ok(0)
}
