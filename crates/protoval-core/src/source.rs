//! # Document Sources
//!
//! Where a protocol or containers document comes from. The caller decides
//! the source explicitly; nothing here inspects the filesystem to guess.
//!
//! - [`DocumentSource::Inline`]: an already-parsed value.
//! - [`DocumentSource::Path`]: a file. `.yaml`/`.yml` is read as YAML,
//!   anything else as JSON.
//! - [`DocumentSource::Text`]: raw text, JSON first, then YAML.
//!
//! YAML deserializes straight into the JSON value model, so both formats
//! validate identically.

use std::path::PathBuf;

use serde_json::Value;

use crate::error::{type_name, LoadError};

/// Placeholder label for inline values.
pub const INLINE_LABEL: &str = "<inline>";
/// Placeholder label for raw text.
pub const TEXT_LABEL: &str = "<text>";

/// An explicitly chosen document source.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSource {
    /// An already-parsed document.
    Inline(Value),
    /// A JSON or YAML file on disk.
    Path(PathBuf),
    /// Raw JSON or YAML text.
    Text(String),
}

impl DocumentSource {
    /// Label used in load diagnostics.
    pub fn label(&self) -> String {
        match self {
            Self::Inline(_) => INLINE_LABEL.to_string(),
            Self::Path(path) => path.display().to_string(),
            Self::Text(_) => TEXT_LABEL.to_string(),
        }
    }

    /// Resolve the source into a parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Read`] if a file cannot be read,
    /// [`LoadError::Parse`] if content is not valid JSON/YAML, and
    /// [`LoadError::NotADocument`] if text parses to a bare scalar.
    pub fn load(self) -> Result<Value, LoadError> {
        let label = self.label();
        let value = match self {
            Self::Inline(value) => value,
            Self::Path(path) => {
                let content = std::fs::read_to_string(&path).map_err(|source| {
                    LoadError::Read {
                        label: label.clone(),
                        source,
                    }
                })?;
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
                match ext {
                    "yaml" | "yml" => parse_yaml(&label, &content)?,
                    _ => parse_json(&label, &content)?,
                }
            }
            Self::Text(text) => parse_text(&label, &text)?,
        };
        tracing::debug!(source = %label, kind = type_name(&value), "document loaded");
        Ok(value)
    }
}

fn parse_json(label: &str, content: &str) -> Result<Value, LoadError> {
    serde_json::from_str(content).map_err(|e| LoadError::Parse {
        label: label.to_string(),
        format: "JSON",
        reason: e.to_string(),
    })
}

fn parse_yaml(label: &str, content: &str) -> Result<Value, LoadError> {
    serde_yaml::from_str(content).map_err(|e| LoadError::Parse {
        label: label.to_string(),
        format: "YAML",
        reason: e.to_string(),
    })
}

/// Parse raw text: JSON first, then YAML. A scalar result is rejected,
/// which catches a mistyped path handed over as text.
fn parse_text(label: &str, text: &str) -> Result<Value, LoadError> {
    let value = serde_json::from_str::<Value>(text).or_else(|json_err| {
        serde_yaml::from_str::<Value>(text).map_err(|yaml_err| LoadError::Parse {
            label: label.to_string(),
            format: "JSON or YAML",
            reason: format!("JSON: {json_err}; YAML: {yaml_err}"),
        })
    })?;
    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        other => Err(LoadError::NotADocument {
            label: label.to_string(),
            found: type_name(&other),
        }),
    }
}
