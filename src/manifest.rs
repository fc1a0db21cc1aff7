//! Package manifest version rewrite.
//!
//! The manifest is read as JSON5, so `//` and `/* */` comments and trailing
//! commas are accepted. It is rewritten as pretty-printed JSON with two-space
//! indentation, original key order and a trailing newline; comments are not
//! preserved.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, TagReleaseError};

/// What happened to the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestUpdate {
    /// The version field was rewritten
    Updated { previous: String },
    /// No manifest at the given path
    Missing,
    /// The manifest has no usable top-level version to replace
    NoVersionField,
}

/// Replace the top-level `version` of the manifest at `path`
///
/// The file is only written when it exists and already declares a version.
/// `null`, `false`, `0` and `""` count as no version.
pub fn write_version(path: &Path, version: &str) -> Result<ManifestUpdate> {
    if !path.exists() {
        return Ok(ManifestUpdate::Missing);
    }

    let content = fs::read_to_string(path)?;
    let mut json: Value = json5::from_str(&content)
        .map_err(|e| TagReleaseError::manifest(path, format!("Invalid JSON: {}", e)))?;

    let previous = match json.get("version") {
        Some(value) if is_set(value) => match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
        _ => return Ok(ManifestUpdate::NoVersionField),
    };

    json["version"] = Value::String(version.to_string());

    let output = serde_json::to_string_pretty(&json)
        .map_err(|e| TagReleaseError::manifest(path, format!("Failed to serialize JSON: {}", e)))?;
    fs::write(path, format!("{}\n", output))?;

    debug!(path = %path.display(), %previous, %version, "Rewrote manifest version");
    Ok(ManifestUpdate::Updated { previous })
}

fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
