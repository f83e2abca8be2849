//! # CV Document Model
//!
//! Every CMIP6 CV file is a JSON object with two top-level keys: the
//! provenance block `version_metadata` and a payload keyed by the facet name.
//!
//! ```json
//! {
//!     "activity_id": { "CMIP": "CMIP DECK: 1pctCO2, abrupt4xCO2, amip, esm-piControl, esm-historical, historical, and piControl experiments" },
//!     "version_metadata": { "CV_collection_version": "6.2.58.64" }
//! }
//! ```
//!
//! [`CvDocument::from_value`] strips the provenance block and enforces that
//! exactly one payload key remains.

use serde_json::{Map, Value};

use crate::error::CvError;

/// Provenance key present in every CV document.
pub const VERSION_METADATA_KEY: &str = "version_metadata";

/// The interpreted payload of a CV.
#[derive(Debug, Clone, PartialEq)]
pub enum CvPayload {
    /// Code → description string, or code → attribute object.
    Mapping(Map<String, Value>),
    /// Plain list of allowed literal values.
    List(Vec<Value>),
}

impl CvPayload {
    /// Number of entries in the payload.
    pub fn len(&self) -> usize {
        match self {
            Self::Mapping(map) => map.len(),
            Self::List(items) => items.len(),
        }
    }

    /// Returns true if the payload has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A CV with its version metadata removed.
#[derive(Debug, Clone, PartialEq)]
pub struct CvDocument {
    /// Facet key the document was requested under.
    pub key: String,
    /// Name of the payload field inside the document.
    pub payload_key: String,
    /// The payload itself.
    pub payload: CvPayload,
}

impl CvDocument {
    /// Interpret a raw CV tree.
    ///
    /// # Errors
    ///
    /// Returns [`CvError::Malformed`] if the document is not an object, has
    /// no `version_metadata`, does not have exactly one other key, or its
    /// payload is neither an object nor an array.
    pub fn from_value(key: &str, value: Value) -> Result<Self, CvError> {
        let Value::Object(mut fields) = value else {
            return Err(CvError::malformed(key, "document is not a JSON object"));
        };

        if fields.remove(VERSION_METADATA_KEY).is_none() {
            return Err(CvError::malformed(
                key,
                format!("missing '{VERSION_METADATA_KEY}'"),
            ));
        }

        if fields.len() != 1 {
            let mut keys: Vec<&str> = fields.keys().map(String::as_str).collect();
            keys.sort_unstable();
            return Err(CvError::malformed(
                key,
                format!(
                    "expected exactly one payload key besides '{VERSION_METADATA_KEY}', found {}: {keys:?}",
                    fields.len()
                ),
            ));
        }

        let Some((payload_key, payload)) = fields.into_iter().next() else {
            return Err(CvError::malformed(key, "empty document"));
        };

        let payload = match payload {
            Value::Object(map) => CvPayload::Mapping(map),
            Value::Array(items) => CvPayload::List(items),
            other => {
                return Err(CvError::malformed(
                    key,
                    format!("payload '{payload_key}' must be an object or array, found {}", json_type(&other)),
                ))
            }
        };

        Ok(Self {
            key: key.to_string(),
            payload_key,
            payload,
        })
    }

    /// Interpret the payload as a list of strings.
    ///
    /// Used for `required_global_attributes`, whose payload names facets.
    ///
    /// # Errors
    ///
    /// Returns [`CvError::Malformed`] if the payload is a mapping or any
    /// entry is not a string.
    pub fn string_list(&self) -> Result<Vec<String>, CvError> {
        let CvPayload::List(items) = &self.payload else {
            return Err(CvError::malformed(&self.key, "payload must be a list"));
        };
        items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    CvError::malformed(
                        &self.key,
                        format!("list entry {item} is a {}, not a string", json_type(item)),
                    )
                })
            })
            .collect()
    }
}

/// Human-readable JSON type name for diagnostics.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
