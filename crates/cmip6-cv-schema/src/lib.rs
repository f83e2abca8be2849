//! # cmip6-cv-schema: Global Attributes Schema Generation
//!
//! Turns the CMIP6 controlled vocabularies into one Draft-07 JSON Schema
//! that validates a dataset's global attributes.
//!
//! ## Generation (`builder`, `facet`, `property`)
//!
//! [`make_global_attrs_schema`] reads `required_global_attributes`, classifies
//! every listed facet into a [`FacetKind`], renders a [`PropertyFragment`]
//! per facet, and wraps the result in the fixed top-level metadata.
//! [`SchemaBuilder`] is the same operation with a builder API.
//!
//! ```no_run
//! use cmip6_cv_core::CvDirectory;
//! use cmip6_cv_schema::SchemaBuilder;
//!
//! let schema = SchemaBuilder::new(CvDirectory::new("CMIP6_CVs"))
//!     .use_enum(true)
//!     .build()?;
//! # Ok::<(), cmip6_cv_core::CvError>(())
//! ```
//!
//! ## Persistence (`output`)
//!
//! [`write_schema`] writes the canonical on-disk form; [`create_json_schema`]
//! regenerates `cmip6-global-attrs-schema.json` next to the CVs.
//!
//! ## Validation (`validate`)
//!
//! [`AttributeValidator`] compiles a generated schema and checks attribute
//! mappings against it, returning structured [`Violation`]s.
//!
//! ## Crate Policy
//!
//! - Depends only on `cmip6-cv-core` internally.
//! - The `$schema`, `$id`, `title` and `description` of the generated
//!   document are fixed constants; downstream tools key on them.
//! - A missing or malformed facet CV never aborts generation.

pub mod builder;
pub mod facet;
pub mod output;
pub mod property;
pub mod validate;

pub use builder::{make_global_attrs_schema, required_attributes, SchemaBuilder, SchemaOptions};
pub use facet::{FacetKind, DISPLAY_FIELDS, FORMAT_OVERLAYS, INTEGER_FACETS};
pub use output::{create_json_schema, to_pretty_json, write_schema, SCHEMA_FILE_NAME};
pub use property::{cv_to_property, PropertyFragment, PropertyShape, TitledConst};
pub use validate::{
    load_attributes, AttributeValidator, SchemaValidationError, ValidationViolations, Violation,
};
