//! # Validate Subcommand
//!
//! Checks a dataset's global attributes (a JSON or YAML mapping) against
//! the global attributes schema. The schema is read from `--schema` when
//! given, otherwise generated on the fly from the CV directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cmip6_cv_core::CvDirectory;
use cmip6_cv_schema::{
    load_attributes, AttributeValidator, SchemaBuilder, SchemaOptions, SchemaValidationError,
};

use crate::config::GeneratorConfig;

/// Arguments for the `cmip6-cv validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Attribute file (.json, .yaml or .yml).
    #[arg(value_name = "ATTRS")]
    pub attributes: PathBuf,

    /// Pre-generated schema file.
    #[arg(long, value_name = "PATH", conflicts_with = "cv_dir")]
    pub schema: Option<PathBuf>,

    /// Generate the schema from this CV directory.
    #[arg(long, value_name = "DIR")]
    pub cv_dir: Option<PathBuf>,

    /// Attribute prefix used when generating the schema.
    #[arg(long)]
    pub prefix: Option<String>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if the attributes conform, 1 if they do not.
pub fn run_validate(args: &ValidateArgs, config: GeneratorConfig) -> Result<u8> {
    let validator = match &args.schema {
        Some(path) => AttributeValidator::from_file(&crate::resolve_path(path))
            .with_context(|| format!("failed to load schema {}", path.display()))?,
        None => {
            let config = config.with_overrides(args.cv_dir.as_deref(), None, args.prefix.as_deref());
            let cvs = CvDirectory::new(&config.cv_dir);
            let schema = SchemaBuilder::new(&cvs)
                .with_options(SchemaOptions {
                    prefix: config.prefix.clone(),
                    use_enum: true,
                })
                .build()
                .with_context(|| format!("failed to build schema from {}", config.cv_dir.display()))?;
            AttributeValidator::new(&schema).context("generated schema does not compile")?
        }
    };

    let attributes_path = crate::resolve_path(&args.attributes);
    let attributes = load_attributes(&attributes_path)?;

    match validator.validate(&attributes) {
        Ok(()) => {
            println!("OK: {}", args.attributes.display());
            Ok(0)
        }
        Err(SchemaValidationError::ValidationFailed { violations, .. }) => {
            println!(
                "FAIL: {} ({} violation(s))",
                args.attributes.display(),
                violations.len()
            );
            println!("{violations}");
            Ok(1)
        }
        Err(other) => Err(other.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cv_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("CMIP6_required_global_attributes.json"),
            r#"{"required_global_attributes": ["activity_id", "mip_era", "realization_index"], "version_metadata": {}}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("CMIP6_activity_id.json"),
            r#"{"activity_id": {"CMIP": "CMIP DECK"}, "version_metadata": {}}"#,
        )
        .unwrap();
        dir
    }

    fn args(dir: &tempfile::TempDir, attrs: &str) -> ValidateArgs {
        let path = dir.path().join("attrs.json");
        std::fs::write(&path, attrs).unwrap();
        ValidateArgs {
            attributes: path,
            schema: None,
            cv_dir: Some(dir.path().to_path_buf()),
            prefix: None,
        }
    }

    #[test]
    fn test_conforming_attributes_exit_zero() {
        let dir = cv_dir();
        let args = args(
            &dir,
            r#"{"activity_id": "CMIP", "mip_era": "CMIP6", "realization_index": 1}"#,
        );
        assert_eq!(run_validate(&args, GeneratorConfig::default()).unwrap(), 0);
    }

    #[test]
    fn test_violations_exit_one() {
        let dir = cv_dir();
        let args = args(
            &dir,
            r#"{"activity_id": "CMIP", "mip_era": "CMIP5", "realization_index": 1}"#,
        );
        assert_eq!(run_validate(&args, GeneratorConfig::default()).unwrap(), 1);
    }

    #[test]
    fn test_validates_against_stored_schema() {
        let dir = cv_dir();
        let cvs = CvDirectory::new(dir.path());
        let schema = SchemaBuilder::new(&cvs).build().unwrap();
        let schema_path = dir.path().join("schema.json");
        cmip6_cv_schema::write_schema(&schema, &schema_path).unwrap();

        let mut args = args(
            &dir,
            r#"{"activity_id": "DAMIP", "mip_era": "CMIP6", "realization_index": 1}"#,
        );
        args.cv_dir = None;
        args.schema = Some(schema_path);
        assert_eq!(run_validate(&args, GeneratorConfig::default()).unwrap(), 1);
    }

    #[test]
    fn test_unreadable_attributes_is_an_error() {
        let dir = cv_dir();
        let mut args = args(&dir, "{}");
        args.attributes = dir.path().join("nope.json");
        assert!(run_validate(&args, GeneratorConfig::default()).is_err());
    }
}
