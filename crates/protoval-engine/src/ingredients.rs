//! Ingredients are accepted but not checked. Content in the section earns a
//! single advisory so the author knows nothing in it was looked at.

use protoval_core::{Findings, Issue};
use serde_json::Value;

/// Validate the `ingredients` section.
pub fn validate_ingredients(section: Option<&Value>) -> Findings {
    if section.is_some_and(has_content) {
        Findings::warning(Issue::semantic(
            "\"ingredients\" section is not supported yet and was not validated",
        ))
    } else {
        Findings::new()
    }
}

fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}
