//! # CV Loader
//!
//! Resolves a facet key to its CV document and parses it. The on-disk
//! convention is one file per facet, named `CMIP6_<key>.json`, all in a
//! single root directory.
//!
//! Nothing is cached. Two reads of the same key hit storage twice, so a
//! long-lived [`CvDirectory`] always reflects the current files.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::document::CvDocument;
use crate::error::CvError;

/// File name of the CV for `key`.
pub fn cv_file_name(key: &str) -> String {
    format!("CMIP6_{key}.json")
}

/// A provider of raw CV documents keyed by facet.
pub trait CvSource {
    /// Load the raw CV tree for `key`.
    ///
    /// # Errors
    ///
    /// [`CvError::NotFound`] if there is no such CV, [`CvError::Parse`] if
    /// its content is not JSON, [`CvError::Io`] for other read failures.
    fn read_cv(&self, key: &str) -> Result<Value, CvError>;

    /// Load and interpret the CV for `key`.
    fn read_document(&self, key: &str) -> Result<CvDocument, CvError> {
        CvDocument::from_value(key, self.read_cv(key)?)
    }
}

/// CVs stored as `CMIP6_<key>.json` files under one directory.
#[derive(Debug, Clone)]
pub struct CvDirectory {
    root: PathBuf,
}

impl CvDirectory {
    /// Serve CVs from `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The CV root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the CV file for `key`.
    pub fn cv_path(&self, key: &str) -> PathBuf {
        self.root.join(cv_file_name(key))
    }
}

impl CvSource for CvDirectory {
    fn read_cv(&self, key: &str) -> Result<Value, CvError> {
        let path = self.cv_path(key);
        tracing::debug!(key, path = %path.display(), "reading CV");

        let content = match std::fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CvError::NotFound {
                    key: key.to_string(),
                    path,
                })
            }
            Err(source) => return Err(CvError::Io { path, source }),
        };

        // Invalid UTF-8 surfaces here as a Parse error.
        serde_json::from_slice(&content).map_err(|source| CvError::Parse {
            key: key.to_string(),
            path,
            source,
        })
    }
}

/// CVs held in memory, keyed by facet.
///
/// Useful for building a schema from documents fetched elsewhere, and for
/// tests. Missing keys report [`CvError::NotFound`] with the path the file
/// would have had.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCvs {
    documents: HashMap<String, Value>,
}

impl InMemoryCvs {
    /// An empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the CV for `key`.
    pub fn insert(&mut self, key: impl Into<String>, document: Value) -> &mut Self {
        self.documents.insert(key.into(), document);
        self
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, document: Value) -> Self {
        self.insert(key, document);
        self
    }

    /// Number of documents held.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if no documents are held.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl CvSource for InMemoryCvs {
    fn read_cv(&self, key: &str) -> Result<Value, CvError> {
        self.documents
            .get(key)
            .cloned()
            .ok_or_else(|| CvError::NotFound {
                key: key.to_string(),
                path: PathBuf::from(cv_file_name(key)),
            })
    }
}

impl<S: CvSource + ?Sized> CvSource for &S {
    fn read_cv(&self, key: &str) -> Result<Value, CvError> {
        (**self).read_cv(key)
    }
}
