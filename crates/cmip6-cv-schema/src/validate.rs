//! # Attribute Validation
//!
//! Validates a dataset's global attributes against a generated schema
//! using the `jsonschema` crate (Draft 7).
//!
//! Attributes can be supplied as a parsed JSON value or loaded from a JSON
//! or YAML file. Failures carry structured violations (instance path,
//! schema path, message) rather than a single string.
//!
//! Validation is the consumer side of this crate; it does not change how
//! schemas are generated.

use std::fmt;
use std::path::Path;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

/// Error during attribute validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The attributes did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// `$id` or file name of the schema.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The schema file could not be loaded.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema file name or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The attributes file could not be loaded or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built (e.g., invalid schema).
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema file name or identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },
}

/// A single validation violation with structured context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer path to the violating attribute.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A compiled global attributes schema.
pub struct AttributeValidator {
    schema_name: String,
    validator: Validator,
}

impl fmt::Debug for AttributeValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeValidator")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

impl AttributeValidator {
    /// Compile `schema`.
    ///
    /// # Errors
    ///
    /// `SchemaValidationError::ValidatorBuildError` if the schema is not a
    /// valid Draft-07 schema.
    pub fn new(schema: &Value) -> Result<Self, SchemaValidationError> {
        let schema_name = schema
            .get("$id")
            .and_then(Value::as_str)
            .unwrap_or("(anonymous)")
            .to_string();

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft7);
        let validator = opts
            .build(schema)
            .map_err(|e| SchemaValidationError::ValidatorBuildError {
                schema_name: schema_name.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            schema_name,
            validator,
        })
    }

    /// Load and compile a schema file written by
    /// [`write_schema`](crate::output::write_schema).
    pub fn from_file(path: &Path) -> Result<Self, SchemaValidationError> {
        let load_error = |reason: String| SchemaValidationError::SchemaLoadError {
            schema_name: path.display().to_string(),
            reason,
        };
        let content =
            std::fs::read_to_string(path).map_err(|e| load_error(format!("cannot read file: {e}")))?;
        let schema: Value =
            serde_json::from_str(&content).map_err(|e| load_error(format!("invalid JSON: {e}")))?;
        Self::new(&schema)
    }

    /// `$id` of the compiled schema.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Whether `attributes` conforms.
    pub fn is_valid(&self, attributes: &Value) -> bool {
        self.validator.is_valid(attributes)
    }

    /// Validate an attribute mapping.
    ///
    /// # Errors
    ///
    /// `SchemaValidationError::ValidationFailed` listing every violation.
    pub fn validate(&self, attributes: &Value) -> Result<(), SchemaValidationError> {
        let errors: Vec<Violation> = self
            .validator
            .iter_errors(attributes)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                schema_name: self.schema_name.clone(),
                violations: ValidationViolations { violations: errors },
            })
        }
    }

    /// Validate attributes stored in a JSON or YAML file.
    ///
    /// The format follows the extension: `.yaml`/`.yml` is YAML, anything
    /// else is JSON.
    pub fn validate_file(&self, path: &Path) -> Result<(), SchemaValidationError> {
        let attributes = load_attributes(path)?;
        self.validate(&attributes)
    }
}

/// Load an attribute mapping from a JSON or YAML file.
pub fn load_attributes(path: &Path) -> Result<Value, SchemaValidationError> {
    let load_error = |reason: String| SchemaValidationError::DocumentLoadError {
        path: path.display().to_string(),
        reason,
    };

    let content =
        std::fs::read_to_string(path).map_err(|e| load_error(format!("cannot read file: {e}")))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "yaml" | "yml" => {
            let yaml_value: serde_yaml::Value =
                serde_yaml::from_str(&content).map_err(|e| load_error(format!("invalid YAML: {e}")))?;
            yaml_to_json_value(&yaml_value)
                .map_err(|e| load_error(format!("YAML-to-JSON conversion failed: {e}")))
        }
        _ => serde_json::from_str(&content).map_err(|e| load_error(format!("invalid JSON: {e}"))),
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Attribute dumps only use the JSON-compatible subset of YAML. Tags are
/// dropped and non-string map keys are stringified.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
