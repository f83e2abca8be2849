//! # cmip6-cv-cli: CMIP6 CV Command-Line Interface
//!
//! Provides the `cmip6-cv` binary.
//!
//! ## Subcommands
//!
//! - `cmip6-cv generate`: rebuild the global attributes schema from the CVs.
//! - `cmip6-cv validate`: check a dataset's global attributes against it.
//!
//! ```bash
//! cmip6-cv generate --cv-dir CMIP6_CVs --enum
//! cmip6-cv validate attrs.json --schema CMIP6_CVs/cmip6-global-attrs-schema.json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; schema logic lives in `cmip6-cv-schema`.
//! - Defaults come from the environment (see [`config`]); flags win.

pub mod config;
pub mod generate;
pub mod validate;

use std::path::{Path, PathBuf};

/// Resolve a user-supplied path against the current directory.
///
/// Absolute paths are returned unchanged. If the current directory cannot
/// be determined the path is returned as given.
pub fn resolve_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_paths_are_unchanged() {
        let path = Path::new("/data/attrs.json");
        assert_eq!(resolve_path(path), PathBuf::from("/data/attrs.json"));
    }

    #[test]
    fn test_relative_paths_become_absolute() {
        assert!(resolve_path(Path::new("attrs.json")).is_absolute());
    }
}
