//! Generator configuration.
//!
//! Defaults come from the environment; command-line flags override them.
//!
//! Variables:
//! - `CMIP6_CV_DIR`: directory holding the `CMIP6_<key>.json` files
//!   (default: current directory)
//! - `CMIP6_SCHEMA_OUTPUT`: where `generate` writes the schema
//!   (default: `<cv dir>/cmip6-global-attrs-schema.json`)
//! - `CMIP6_SCHEMA_PREFIX`: attribute prefix (default: none)

use std::path::{Path, PathBuf};

use cmip6_cv_schema::SCHEMA_FILE_NAME;

/// Environment variable naming the CV directory.
pub const CV_DIR_VAR: &str = "CMIP6_CV_DIR";
/// Environment variable naming the schema output path.
pub const OUTPUT_VAR: &str = "CMIP6_SCHEMA_OUTPUT";
/// Environment variable naming the attribute prefix.
pub const PREFIX_VAR: &str = "CMIP6_SCHEMA_PREFIX";

/// Resolved settings shared by all subcommands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory holding the CV files.
    pub cv_dir: PathBuf,
    /// Explicit schema output path, if configured.
    pub output: Option<PathBuf>,
    /// Attribute prefix, if configured.
    pub prefix: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            cv_dir: PathBuf::from("."),
            output: None,
            prefix: None,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            cv_dir: get(CV_DIR_VAR).map(PathBuf::from).unwrap_or(defaults.cv_dir),
            output: get(OUTPUT_VAR).map(PathBuf::from),
            prefix: get(PREFIX_VAR),
        }
    }

    /// Apply command-line overrides.
    pub fn with_overrides(
        mut self,
        cv_dir: Option<&Path>,
        output: Option<&Path>,
        prefix: Option<&str>,
    ) -> Self {
        if let Some(dir) = cv_dir {
            self.cv_dir = dir.to_path_buf();
        }
        if let Some(path) = output {
            self.output = Some(path.to_path_buf());
        }
        if let Some(prefix) = prefix {
            self.prefix = Some(prefix.to_string());
        }
        self
    }

    /// Schema path: the configured output, else the default file in the CV
    /// directory.
    pub fn schema_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.cv_dir.join(SCHEMA_FILE_NAME))
    }
}
