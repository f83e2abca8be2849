//! # Schema Property Fragments
//!
//! A [`PropertyFragment`] is the JSON Schema constraint for one facet. It is
//! rendered from a [`FacetKind`] and emitted with [`PropertyFragment::to_value`]:
//!
//! | kind | fragment |
//! |------|----------|
//! | `Integer` | `{"type": "integer"}` |
//! | `Constant` | `{"const": "CMIP6"}` |
//! | `Mapping` | `{"oneOf": [{"const": code, "title": title}, ...]}`, or `{"enum": [codes]}` in enum mode |
//! | `List` | `{"enum": [values]}` |
//! | `Fallback` | `{"type": "string"}` |
//!
//! A `format` overlay is appended for date and URI facets.

use serde::Serialize;
use serde_json::{json, Map, Value};

use cmip6_cv_core::{CvDocument, CvError};

use crate::facet::{display_field, format_overlay, FacetKind};

/// One `oneOf` branch: a code and its human-readable title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitledConst {
    /// The accepted value.
    #[serde(rename = "const")]
    pub code: String,
    /// Display title taken from the CV.
    pub title: String,
}

/// Shape of a facet's constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyShape {
    /// Any string.
    String,
    /// Any integer.
    Integer,
    /// Exactly this value.
    Const(Value),
    /// One of these values.
    Enum(Vec<Value>),
    /// One of these codes, each with a title.
    OneOf(Vec<TitledConst>),
}

/// The JSON Schema property for one facet.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyFragment {
    /// Value constraint.
    pub shape: PropertyShape,
    /// Optional `format` keyword.
    pub format: Option<&'static str>,
}

impl PropertyFragment {
    /// Fragment with no format overlay.
    pub fn new(shape: PropertyShape) -> Self {
        Self {
            shape,
            format: None,
        }
    }

    /// Unconstrained free-text fragment.
    pub fn fallback() -> Self {
        Self::new(PropertyShape::String)
    }

    /// Render `kind` for `facet`.
    ///
    /// With `use_enum`, mapping facets collapse to a bare `enum` of their
    /// codes and the titles are dropped.
    ///
    /// # Errors
    ///
    /// [`CvError::Malformed`] if a mapping entry is an object but `facet` has
    /// no display field.
    pub fn from_kind(facet: &str, kind: FacetKind, use_enum: bool) -> Result<Self, CvError> {
        let shape = match kind {
            FacetKind::Integer => PropertyShape::Integer,
            FacetKind::Constant(value) => PropertyShape::Const(Value::String(value.to_string())),
            FacetKind::List(items) => PropertyShape::Enum(items),
            FacetKind::Fallback => PropertyShape::String,
            FacetKind::Mapping(map) => {
                let items = titled_entries(facet, &map)?;
                if use_enum {
                    PropertyShape::Enum(items.into_iter().map(|item| Value::String(item.code)).collect())
                } else {
                    PropertyShape::OneOf(items)
                }
            }
        };
        Ok(Self::new(shape))
    }

    /// Apply the fixed format overlay for `facet`, if any.
    pub fn with_format_overlay(mut self, facet: &str) -> Self {
        if let Some(format) = format_overlay(facet) {
            self.format = Some(format);
        }
        self
    }

    /// Emit the fragment as a JSON Schema object.
    pub fn to_value(&self) -> Value {
        let mut out = match &self.shape {
            PropertyShape::String => json!({"type": "string"}),
            PropertyShape::Integer => json!({"type": "integer"}),
            PropertyShape::Const(value) => json!({"const": value}),
            PropertyShape::Enum(values) => json!({"enum": values}),
            PropertyShape::OneOf(items) => json!({"oneOf": items}),
        };
        if let (Some(format), Value::Object(map)) = (self.format, &mut out) {
            map.insert("format".to_string(), Value::String(format.to_string()));
        }
        out
    }
}

/// Convert a raw CV document straight to a property fragment.
///
/// Unlike the schema builder, this does not degrade on bad input: a
/// document with more than one payload key is reported as
/// [`CvError::Malformed`].
pub fn cv_to_property(facet: &str, cv: Value, use_enum: bool) -> Result<PropertyFragment, CvError> {
    let document = CvDocument::from_value(facet, cv)?;
    PropertyFragment::from_kind(facet, FacetKind::from_payload(document.payload), use_enum)
}

/// `{const, title}` pairs for every usable entry of a mapping CV.
fn titled_entries(facet: &str, map: &Map<String, Value>) -> Result<Vec<TitledConst>, CvError> {
    let mut items = Vec::with_capacity(map.len());
    for (code, value) in map {
        let title = match value {
            Value::String(title) => title.clone(),
            Value::Object(attrs) => {
                let field = display_field(facet).ok_or_else(|| {
                    CvError::malformed(facet, format!("entry '{code}' is an object but the facet has no display field"))
                })?;
                match attrs.get(field) {
                    Some(Value::String(title)) => title.clone(),
                    Some(other) => {
                        tracing::warn!(facet, code = %code, field, "display field is not a string; using its JSON text");
                        other.to_string()
                    }
                    None => {
                        tracing::warn!(facet, code = %code, field, "entry has no display field; using empty title");
                        String::new()
                    }
                }
            }
            other => {
                tracing::warn!(facet, code = %code, value = %other, "skipping entry that is neither a string nor an object");
                continue;
            }
        };
        items.push(TitledConst {
            code: code.clone(),
            title,
        });
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(value: Value) -> FacetKind {
        match value {
            Value::Object(map) => FacetKind::Mapping(map),
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_string_entries_become_titled_branches() {
        let kind = mapping(json!({"CMIP": "CMIP DECK", "DAMIP": "Detection and Attribution Model Intercomparison Project"}));
        let fragment = PropertyFragment::from_kind("activity_id", kind, false).unwrap();
        assert_eq!(
            fragment.to_value(),
            json!({"oneOf": [
                {"const": "CMIP", "title": "CMIP DECK"},
                {"const": "DAMIP", "title": "Detection and Attribution Model Intercomparison Project"}
            ]})
        );
    }

    #[test]
    fn test_enum_mode_keeps_codes_only() {
        let kind = mapping(json!({"CMIP": "CMIP DECK", "DAMIP": "DAMIP"}));
        let fragment = PropertyFragment::from_kind("activity_id", kind, true).unwrap();
        assert_eq!(fragment.to_value(), json!({"enum": ["CMIP", "DAMIP"]}));
    }

    #[test]
    fn test_object_entries_use_display_field() {
        let kind = mapping(json!({
            "1pctCO2": {"description": "DECK: 1pctCO2", "activity_id": ["CMIP"]},
            "amip": {"description": "DECK: AMIP", "activity_id": ["CMIP"]}
        }));
        let fragment = PropertyFragment::from_kind("experiment_id", kind, false).unwrap();
        assert_eq!(
            fragment.to_value()["oneOf"],
            json!([
                {"const": "1pctCO2", "title": "DECK: 1pctCO2"},
                {"const": "amip", "title": "DECK: AMIP"}
            ])
        );
    }

    #[test]
    fn test_missing_display_field_gives_empty_title() {
        let kind = mapping(json!({"ACCESS-CM2": {"institution_id": ["CSIRO-ARCCSS"]}}));
        let fragment = PropertyFragment::from_kind("source_id", kind, false).unwrap();
        assert_eq!(
            fragment.shape,
            PropertyShape::OneOf(vec![TitledConst {
                code: "ACCESS-CM2".to_string(),
                title: String::new(),
            }])
        );
    }

    #[test]
    fn test_non_string_display_field_uses_json_text() {
        let kind = mapping(json!({"M": {"label": ["a"]}}));
        let fragment = PropertyFragment::from_kind("source_id", kind, false).unwrap();
        assert_eq!(
            fragment.to_value(),
            json!({"oneOf": [{"const": "M", "title": "[\"a\"]"}]})
        );
    }

    #[test]
    fn test_object_entries_without_display_table_entry_are_malformed() {
        let kind = mapping(json!({"CSIRO": {"name": "Commonwealth Scientific and Industrial Research Organisation"}}));
        let err = PropertyFragment::from_kind("institution_id", kind, false).unwrap_err();
        assert!(matches!(err, CvError::Malformed { .. }));
    }

    #[test]
    fn test_non_string_non_object_entries_are_skipped() {
        let kind = mapping(json!({"gn": "native grid", "bogus": 3}));
        let fragment = PropertyFragment::from_kind("grid_label", kind, true).unwrap();
        assert_eq!(fragment.to_value(), json!({"enum": ["gn"]}));
    }

    #[test]
    fn test_list_kind_is_enum() {
        let fragment =
            PropertyFragment::from_kind("table_id", FacetKind::List(vec![json!("Amon"), json!("Omon")]), false)
                .unwrap();
        assert_eq!(fragment.to_value(), json!({"enum": ["Amon", "Omon"]}));
    }

    #[test]
    fn test_format_overlay_is_merged() {
        let fragment = PropertyFragment::fallback().with_format_overlay("creation_date");
        assert_eq!(fragment.to_value(), json!({"type": "string", "format": "date-time"}));

        let fragment = PropertyFragment::fallback().with_format_overlay("further_info_url");
        assert_eq!(fragment.to_value(), json!({"type": "string", "format": "uri"}));

        let fragment = PropertyFragment::fallback().with_format_overlay("source");
        assert_eq!(fragment.to_value(), json!({"type": "string"}));
    }

    #[test]
    fn test_cv_to_property_rejects_two_payload_keys() {
        let err = cv_to_property(
            "activity_id",
            json!({"activity_id": {"CMIP": "CMIP DECK"}, "experiment_id": {}, "version_metadata": {}}),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, CvError::Malformed { ref key, .. } if key == "activity_id"));
    }

    #[test]
    fn test_oneof_and_enum_modes_agree_on_codes() {
        let cv = json!({
            "source_type": {"AER": "aerosol treatment", "AGCM": "atmospheric general circulation model", "OGCM": "ocean general circulation model"},
            "version_metadata": {}
        });
        let one_of = cv_to_property("source_type", cv.clone(), false).unwrap().to_value();
        let enumerated = cv_to_property("source_type", cv, true).unwrap().to_value();

        let consts: Vec<&Value> = one_of["oneOf"]
            .as_array()
            .unwrap()
            .iter()
            .map(|branch| &branch["const"])
            .collect();
        let values: Vec<&Value> = enumerated["enum"].as_array().unwrap().iter().collect();
        assert_eq!(consts, values);
    }
}
