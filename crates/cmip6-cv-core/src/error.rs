//! # Error Types
//!
//! One error enum covers every way a CV can fail to load. All variants carry
//! the facet key so a caller can tell which CV was at fault.
//!
//! ## Recovery
//!
//! Not-Found and Malformed-CV are recoverable when they concern a single
//! facet: the schema builder degrades that facet to a free-text property.
//! Parse and I/O failures are never recovered.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading or interpreting a controlled-vocabulary document.
#[derive(Error, Debug)]
pub enum CvError {
    /// No CV document exists for the facet key.
    #[error("CV '{key}' not found at {}", .path.display())]
    NotFound {
        /// Facet key that was requested.
        key: String,
        /// Location that was checked.
        path: PathBuf,
    },

    /// The CV exists but does not have the expected shape.
    #[error("malformed CV '{key}': {reason}")]
    Malformed {
        /// Facet key of the offending CV.
        key: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The CV file is not valid JSON.
    #[error("CV '{key}' at {} is not valid JSON: {source}", .path.display())]
    Parse {
        /// Facet key of the offending CV.
        key: String,
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing a file failed for a reason other than absence.
    #[error("io error on {}: {source}", .path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Encoding an output document failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An output document was not valid UTF-8.
    #[error("encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl CvError {
    /// Build a [`CvError::Malformed`] for `key`.
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Whether a per-facet lookup may degrade instead of failing the build.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Malformed { .. })
    }

    /// The facet key this error concerns, when there is one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::NotFound { key, .. } | Self::Malformed { key, .. } | Self::Parse { key, .. } => {
                Some(key)
            }
            Self::Io { .. } | Self::Serialization(_) | Self::Encoding(_) => None,
        }
    }
}
