//! # cmip6-cv-core: Controlled Vocabulary Primitives
//!
//! The leaf crate of the CMIP6 CV toolchain. It knows how to find a
//! controlled-vocabulary (CV) document on disk, parse it, and check that it
//! has the expected envelope. It knows nothing about JSON Schema; that is
//! the job of `cmip6-cv-schema`.
//!
//! ## Key Types
//!
//! - [`CvSource`]: anything that can hand out a raw CV by facet key.
//!   [`CvDirectory`] reads `CMIP6_<key>.json` files from a root directory;
//!   [`InMemoryCvs`] serves documents from a map.
//! - [`CvDocument`]: a CV with `version_metadata` stripped and its single
//!   payload classified as a [`CvPayload::Mapping`] or [`CvPayload::List`].
//! - [`CvError`]: Not-Found, Malformed-CV, Parse, and I/O failures. The
//!   first two are recoverable per facet (see [`CvError::is_recoverable`]).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cmip6-cv-*` crates.
//! - No caching: every read goes back to storage.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod loader;

pub use document::{CvDocument, CvPayload, VERSION_METADATA_KEY};
pub use error::CvError;
pub use loader::{cv_file_name, CvDirectory, CvSource, InMemoryCvs};
