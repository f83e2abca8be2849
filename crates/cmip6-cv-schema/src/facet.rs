//! # Facet Classification
//!
//! Each required global attribute is classified exactly once into a
//! [`FacetKind`]. The first matching rule wins:
//!
//! 1. Ensemble index facets (`realization_index`, ...) are integers.
//! 2. `mip_era` is pinned to the one era this project validates.
//! 3. Otherwise the facet's own CV decides: a mapping payload or a list
//!    payload.
//! 4. A facet whose CV is absent or malformed falls back to free text.
//!
//! The lookup tables below encode CMIP6 domain knowledge and have no
//! general pattern; extend them by hand.

use serde_json::{Map, Value};

use cmip6_cv_core::{CvError, CvPayload, CvSource};

/// CV listing the mandatory global attributes.
pub const REQUIRED_ATTRIBUTES_KEY: &str = "required_global_attributes";

/// Facet whose value is fixed for the whole project.
pub const MIP_ERA_KEY: &str = "mip_era";

/// The only accepted `mip_era`.
pub const MIP_ERA_VALUE: &str = "CMIP6";

/// Facets holding a member of the variant label `r<k>i<l>p<m>f<n>`.
pub const INTEGER_FACETS: &[&str] = &[
    "initialization_index",
    "physics_index",
    "realization_index",
    "forcing_index",
];

/// Facet → field of each mapping entry used as the entry's title.
pub const DISPLAY_FIELDS: &[(&str, &str)] = &[
    ("source_id", "label"),
    ("experiment_id", "description"),
];

/// Facet → JSON Schema `format` overlaid on its property.
pub const FORMAT_OVERLAYS: &[(&str, &str)] = &[
    ("creation_date", "date-time"),
    ("further_info_url", "uri"),
];

/// Whether `facet` is an ensemble index.
pub fn is_integer_facet(facet: &str) -> bool {
    INTEGER_FACETS.contains(&facet)
}

/// Display field for mapping entries of `facet`, if it has one.
pub fn display_field(facet: &str) -> Option<&'static str> {
    lookup(DISPLAY_FIELDS, facet)
}

/// Format overlay for `facet`, if it has one.
pub fn format_overlay(facet: &str) -> Option<&'static str> {
    lookup(FORMAT_OVERLAYS, facet)
}

fn lookup(table: &[(&str, &'static str)], facet: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == facet)
        .map(|(_, value)| *value)
}

/// How a facet is constrained.
#[derive(Debug, Clone, PartialEq)]
pub enum FacetKind {
    /// Ensemble index; any integer.
    Integer,
    /// Exactly one literal value.
    Constant(&'static str),
    /// Codes with titles, from a mapping CV.
    Mapping(Map<String, Value>),
    /// Literal values, from a list CV.
    List(Vec<Value>),
    /// No usable CV; any string.
    Fallback,
}

impl FacetKind {
    /// Classify `facet`, reading its CV from `source` when the fixed rules
    /// do not apply.
    ///
    /// # Errors
    ///
    /// Parse and I/O failures propagate. Not-Found and Malformed-CV degrade
    /// to [`FacetKind::Fallback`].
    pub fn classify<S: CvSource + ?Sized>(facet: &str, source: &S) -> Result<Self, CvError> {
        if is_integer_facet(facet) {
            return Ok(Self::Integer);
        }
        if facet == MIP_ERA_KEY {
            return Ok(Self::Constant(MIP_ERA_VALUE));
        }

        match source.read_document(facet) {
            Ok(document) => Ok(Self::from_payload(document.payload)),
            Err(e) if e.is_recoverable() => {
                tracing::warn!(facet, error = %e, "no usable CV; accepting any string");
                Ok(Self::Fallback)
            }
            Err(e) => Err(e),
        }
    }

    /// Kind implied by a CV payload.
    pub fn from_payload(payload: CvPayload) -> Self {
        match payload {
            CvPayload::Mapping(map) => Self::Mapping(map),
            CvPayload::List(items) => Self::List(items),
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Constant(_) => "constant",
            Self::Mapping(_) => "mapping",
            Self::List(_) => "list",
            Self::Fallback => "fallback",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmip6_cv_core::InMemoryCvs;
    use serde_json::json;

    #[test]
    fn test_index_facets_are_integers_without_reading_cvs() {
        let empty = InMemoryCvs::new();
        for facet in INTEGER_FACETS {
            assert_eq!(FacetKind::classify(facet, &empty).unwrap(), FacetKind::Integer);
        }
    }

    #[test]
    fn test_mip_era_ignores_its_cv() {
        let cvs = InMemoryCvs::new().with(
            "mip_era",
            json!({"mip_era": ["CMIP5", "CMIP6"], "version_metadata": {}}),
        );
        assert_eq!(
            FacetKind::classify("mip_era", &cvs).unwrap(),
            FacetKind::Constant("CMIP6")
        );
    }

    #[test]
    fn test_missing_cv_falls_back() {
        let kind = FacetKind::classify("tracking_id", &InMemoryCvs::new()).unwrap();
        assert_eq!(kind, FacetKind::Fallback);
    }

    #[test]
    fn test_malformed_cv_falls_back() {
        let cvs = InMemoryCvs::new().with(
            "realm",
            json!({"realm": {}, "frequency": {}, "version_metadata": {}}),
        );
        assert_eq!(FacetKind::classify("realm", &cvs).unwrap(), FacetKind::Fallback);
    }

    #[test]
    fn test_payload_shape_decides() {
        let cvs = InMemoryCvs::new()
            .with("realm", json!({"realm": {"ocean": "Ocean"}, "version_metadata": {}}))
            .with("table_id", json!({"table_id": ["Omon"], "version_metadata": {}}));
        assert_eq!(FacetKind::classify("realm", &cvs).unwrap().name(), "mapping");
        assert_eq!(
            FacetKind::classify("table_id", &cvs).unwrap(),
            FacetKind::List(vec![json!("Omon")])
        );
    }

    #[test]
    fn test_lookup_tables() {
        assert_eq!(display_field("source_id"), Some("label"));
        assert_eq!(display_field("experiment_id"), Some("description"));
        assert_eq!(display_field("realm"), None);
        assert_eq!(format_overlay("creation_date"), Some("date-time"));
        assert_eq!(format_overlay("further_info_url"), Some("uri"));
        assert_eq!(format_overlay("source"), None);
    }
}
