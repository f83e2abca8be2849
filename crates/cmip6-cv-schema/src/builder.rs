//! # Global Attributes Schema Builder
//!
//! Assembles the Draft-07 schema for CMIP6 global attributes:
//!
//! 1. Read `required_global_attributes`. Its list is the schema's `required`
//!    array and the order in which properties are generated.
//! 2. Classify each facet ([`FacetKind::classify`]) and render its
//!    [`PropertyFragment`], then apply the format overlay.
//! 3. Wrap the properties in the fixed top-level metadata.
//!
//! Property keys and `required` entries go through the same prefixing, so
//! they always match.
//!
//! ## Failure Policy
//!
//! A facet whose own CV is missing or malformed degrades to
//! `{"type": "string"}`. Anything wrong with `required_global_attributes`
//! itself, and any parse or I/O failure, aborts the build. No partial
//! schema is ever returned.

use serde_json::{json, Map, Value};

use cmip6_cv_core::{CvError, CvSource};

use crate::facet::{FacetKind, REQUIRED_ATTRIBUTES_KEY};
use crate::property::PropertyFragment;

/// JSON Schema dialect of the generated document.
pub const SCHEMA_DRAFT: &str = "http://json-schema.org/draft-07/schema#";

/// `$id` of the generated document.
pub const SCHEMA_ID: &str = "cmip6-global-attrs-schema.json#";

/// `title` of the generated document.
pub const SCHEMA_TITLE: &str = "CMIP6 metadata schema for global attributes";

/// `description` of the generated document.
pub const SCHEMA_DESCRIPTION: &str = "JSON schema for global attributes metadata of CMIP6 datasets. \
This schema is automatically generated from the CVs. Manual edits will be overwritten.";

/// Options recognized by the builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaOptions {
    /// Namespace prepended as `<prefix>:` to every property and required key.
    pub prefix: Option<String>,
    /// Emit bare `enum`s instead of titled `oneOf`s for mapping facets.
    pub use_enum: bool,
}

impl SchemaOptions {
    /// `key`, prefixed if a non-empty prefix is set.
    pub fn prefixed(&self, key: &str) -> String {
        match self.prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}:{key}"),
            _ => key.to_string(),
        }
    }
}

/// Builds the global attributes schema from a [`CvSource`].
#[derive(Debug, Clone)]
pub struct SchemaBuilder<S> {
    source: S,
    options: SchemaOptions,
}

impl<S: CvSource> SchemaBuilder<S> {
    /// Builder over `source` with default options.
    pub fn new(source: S) -> Self {
        Self {
            source,
            options: SchemaOptions::default(),
        }
    }

    /// Set the property prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.prefix = Some(prefix.into());
        self
    }

    /// Select enum mode.
    pub fn use_enum(mut self, use_enum: bool) -> Self {
        self.options.use_enum = use_enum;
        self
    }

    /// Replace all options.
    pub fn with_options(mut self, options: SchemaOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> &SchemaOptions {
        &self.options
    }

    /// Build the schema document.
    ///
    /// # Errors
    ///
    /// Any error reading `required_global_attributes`, and any parse or I/O
    /// error reading a facet CV.
    pub fn build(&self) -> Result<Value, CvError> {
        let facets = required_attributes(&self.source)?;
        tracing::debug!(count = facets.len(), "required global attributes");

        let mut properties = Map::with_capacity(facets.len());
        for facet in &facets {
            let fragment = self.property_for(facet)?;
            properties.insert(self.options.prefixed(facet), fragment.to_value());
        }

        let required: Vec<String> = facets.iter().map(|f| self.options.prefixed(f)).collect();

        Ok(json!({
            "$schema": SCHEMA_DRAFT,
            "$id": SCHEMA_ID,
            "title": SCHEMA_TITLE,
            "description": SCHEMA_DESCRIPTION,
            "type": "object",
            "properties": properties,
            "required": required,
        }))
    }

    /// Classify and render one facet.
    fn property_for(&self, facet: &str) -> Result<PropertyFragment, CvError> {
        let kind = FacetKind::classify(facet, &self.source)?;
        let kind_name = kind.name();

        let fragment = match PropertyFragment::from_kind(facet, kind, self.options.use_enum) {
            Ok(fragment) => fragment,
            Err(e) if e.is_recoverable() => {
                tracing::warn!(facet, error = %e, "unusable CV; accepting any string");
                PropertyFragment::fallback()
            }
            Err(e) => return Err(e),
        };

        tracing::debug!(facet, kind = kind_name, "classified facet");
        Ok(fragment.with_format_overlay(facet))
    }
}

/// Facet keys listed in `required_global_attributes`, in order.
///
/// # Errors
///
/// Every failure is fatal here, including Not-Found and Malformed-CV.
pub fn required_attributes<S: CvSource + ?Sized>(source: &S) -> Result<Vec<String>, CvError> {
    source.read_document(REQUIRED_ATTRIBUTES_KEY)?.string_list()
}

/// Build the global attributes schema from `source` with `options`.
pub fn make_global_attrs_schema<S: CvSource + ?Sized>(
    source: &S,
    options: &SchemaOptions,
) -> Result<Value, CvError> {
    SchemaBuilder::new(source).with_options(options.clone()).build()
}
