//! Attribute-level helpers shared by the section and instruction validators.
//!
//! `subject` is whatever prefixes a message: a coordinate such as
//! `instruction #1, group #2, transfer command #1` or a label such as
//! `tool "p200"`.

use std::fmt::Display;

use protoval_core::error::type_name;
use protoval_core::{Findings, Issue};
use serde_json::{Map, Value};

use crate::rules::VOLUME_NORMAL_MAX;

/// A required attribute is absent.
pub(crate) fn missing(subject: &dyn Display, key: &str) -> Issue {
    Issue::structural(format!("{subject}: missing required attribute \"{key}\""))
}

/// Keep the `Ok` value, or record the issue as an error and continue.
pub(crate) fn record<T>(findings: &mut Findings, result: Result<T, Issue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(issue) => {
            findings.push_error(issue);
            None
        }
    }
}

/// A required string attribute.
pub(crate) fn required_string<'v>(
    subject: &dyn Display,
    object: &'v Map<String, Value>,
    key: &str,
) -> Result<&'v str, Issue> {
    match object.get(key) {
        None => Err(missing(subject, key)),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(Issue::structural(format!(
            "{subject}: attribute \"{key}\" must be a string, found {}",
            type_name(other)
        ))),
    }
}

/// An optional numeric attribute. `Ok(None)` when absent.
pub(crate) fn optional_number(
    subject: &dyn Display,
    object: &Map<String, Value>,
    key: &str,
) -> Result<Option<f64>, Issue> {
    match object.get(key) {
        None => Ok(None),
        Some(value) => number(subject, key, value).map(Some),
    }
}

/// A value that must be a number (integer or floating).
pub(crate) fn number(subject: &dyn Display, key: &str, value: &Value) -> Result<f64, Issue> {
    value.as_f64().ok_or_else(|| {
        Issue::structural(format!(
            "{subject}: attribute \"{key}\" must be a number, found {}",
            type_name(value)
        ))
    })
}

/// An optional attribute that must be exactly `true` or `false` when present.
pub(crate) fn check_boolean(
    subject: &dyn Display,
    object: &Map<String, Value>,
    key: &str,
) -> Findings {
    match object.get(key) {
        Some(value) if !value.is_boolean() => Findings::error(Issue::structural(format!(
            "{subject}: attribute \"{key}\" must be true or false, found {value}"
        ))),
        _ => Findings::new(),
    }
}

/// Volume policy: negative is an error, above the normal maximum a warning.
pub(crate) fn check_volume(subject: &dyn Display, value: &Value) -> Findings {
    let volume = match number(subject, "volume", value) {
        Ok(volume) => volume,
        Err(issue) => return Findings::error(issue),
    };
    if volume < 0.0 {
        Findings::error(Issue::semantic(format!(
            "{subject}: attribute \"volume\" must not be negative, found {volume}"
        )))
    } else if volume > VOLUME_NORMAL_MAX {
        Findings::warning(Issue::semantic(format!(
            "{subject}: attribute \"volume\" {volume} exceeds the normal maximum of {VOLUME_NORMAL_MAX}"
        )))
    } else {
        Findings::new()
    }
}
