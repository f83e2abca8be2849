//! # Schema Persistence
//!
//! Writes a generated schema as pretty-printed UTF-8 JSON with four-space
//! indentation. Non-ASCII characters (institution names, accented author
//! names in the CVs) are written as-is, not `\u` escaped.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use cmip6_cv_core::{CvDirectory, CvError};

use crate::builder::{make_global_attrs_schema, SchemaOptions};

/// File name of the schema generated next to the CVs.
pub const SCHEMA_FILE_NAME: &str = "cmip6-global-attrs-schema.json";

/// Serialize `schema` with the canonical on-disk formatting.
pub fn to_pretty_json(schema: &Value) -> Result<String, CvError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    schema.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(String::from_utf8(buf)?)
}

/// Write `schema` to `path`, replacing any existing file.
pub fn write_schema(schema: &Value, path: &Path) -> Result<(), CvError> {
    let content = to_pretty_json(schema)?;
    std::fs::write(path, content).map_err(|source| CvError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "wrote global attributes schema");
    Ok(())
}

/// Regenerate the enum-mode schema into [`SCHEMA_FILE_NAME`] under the CV
/// root and return the path written.
pub fn create_json_schema(cvs: &CvDirectory) -> Result<PathBuf, CvError> {
    let options = SchemaOptions {
        prefix: None,
        use_enum: true,
    };
    let schema = make_global_attrs_schema(cvs, &options)?;
    let path = cvs.root().join(SCHEMA_FILE_NAME);
    write_schema(&schema, &path)?;
    Ok(path)
}
