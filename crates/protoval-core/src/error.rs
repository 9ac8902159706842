//! # Error Types
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - [`LoadError`] covers obtaining a document: reading a file or parsing
//!   JSON or YAML text.
//! - [`CommandDecodeError`] covers decoding a group into a [`Command`].
//!   It is a structural failure, reported separately from business rules.
//! - [`ProtovalError`] is the top-level error for fallible library calls.
//!
//! Validation findings are not errors in this sense: they are values
//! collected into a report (see [`crate::report`]).
//!
//! [`Command`]: crate::command::Command

use thiserror::Error;

/// Top-level error type for the protocol validator.
#[derive(Error, Debug)]
pub enum ProtovalError {
    /// A protocol or containers document could not be loaded.
    #[error("document load error: {0}")]
    Load(#[from] LoadError),

    /// Report serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error obtaining a document from its source.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("cannot read '{label}': {source}")]
    Read {
        /// Path of the file.
        label: String,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid in the expected format.
    #[error("invalid {format} in '{label}': {reason}")]
    Parse {
        /// Path of the file or a placeholder for inline text.
        label: String,
        /// Format the parser expected ("JSON", "YAML", or "JSON or YAML").
        format: &'static str,
        /// Parser message.
        reason: String,
    },

    /// The content parsed, but to a scalar rather than a mapping or sequence.
    #[error("'{label}' is not a document: expected a mapping at the root, found {found}")]
    NotADocument {
        /// Path of the file or a placeholder for inline text.
        label: String,
        /// JSON type name of what was found.
        found: &'static str,
    },
}

/// Error decoding a group into one of the four command variants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandDecodeError {
    /// The group is not a mapping.
    #[error("group must be an object with a single command key")]
    NotAnObject,

    /// The group mapping has zero or several keys.
    #[error("group must contain exactly one command, found {found} keys ({keys})")]
    KeyCount {
        /// Number of keys present.
        found: usize,
        /// The keys, comma separated.
        keys: String,
    },

    /// The single key is not a known command tag.
    #[error("unknown command \"{tag}\", expected one of: {allowed}")]
    UnknownTag {
        /// The offending key.
        tag: String,
        /// The allowed tags, comma separated.
        allowed: String,
    },
}

/// JSON type name of a value, used in diagnostics.
pub fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "sequence",
        serde_json::Value::Object(_) => "mapping",
    }
}
