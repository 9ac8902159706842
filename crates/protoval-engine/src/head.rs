//! # Head Validation
//!
//! Every tool declares the full set of pipette attributes. Each missing
//! attribute is its own error. Present attributes are checked by type and
//! value:
//!
//! | attribute | error | warning |
//! |---|---|---|
//! | `tool` | not `"pipette"` | |
//! | `tip-racks` | not a sequence; entry `container` not on the deck | |
//! | `trash-container` | not an object; `container` not on the deck | |
//! | `multi-channel` | not boolean | |
//! | `axis` | not `a`/`b` | |
//! | `volume`, plunger speeds, `tip-plunge`, extra-pull volume/delay | not numeric | outside normal range |
//! | `distribute-percentage` | not floating; outside `[0, 1]` | |
//! | `points` | not a sequence of `{f1, f2}` | `f1`/`f2` outside `[0, 110]` |

use protoval_core::error::type_name;
use protoval_core::{Deck, Findings, Issue};
use serde_json::{Map, Value};

use crate::checks::{check_boolean, missing, number, optional_number, record, required_string};
use crate::rules::{
    AXIS_VALUES, DISTRIBUTE_PERCENTAGE_RANGE, PIPETTE_TOOL, POINT_NORMAL_RANGE,
    REQUIRED_TOOL_ATTRIBUTES, TOOL_NORMAL_RANGES,
};

/// Validate the `head` section. Absent means nothing to check.
pub fn validate_head(section: Option<&Value>, deck: Deck<'_>) -> Findings {
    match section {
        None => Findings::new(),
        Some(Value::Object(tools)) => tools
            .iter()
            .map(|(name, definition)| validate_tool(name, definition, deck))
            .collect(),
        Some(other) => Findings::error(Issue::structural(format!(
            "\"head\" section must be a mapping of tool names to definitions, found {}",
            type_name(other)
        ))),
    }
}

fn validate_tool(name: &str, definition: &Value, deck: Deck<'_>) -> Findings {
    let subject = format!("tool \"{name}\"");
    let Some(object) = definition.as_object() else {
        return Findings::error(Issue::structural(format!(
            "{subject} must be an object, found {}",
            type_name(definition)
        )));
    };

    let mut findings: Findings = REQUIRED_TOOL_ATTRIBUTES
        .iter()
        .filter(|attribute| !object.contains_key(**attribute))
        .map(|attribute| Findings::error(missing(&subject, attribute)))
        .collect();

    if let Some(kind) = object.get("tool") {
        if kind.as_str() != Some(PIPETTE_TOOL) {
            findings.push_error(Issue::semantic(format!(
                "{subject}: attribute \"tool\" must be \"{PIPETTE_TOOL}\", found {kind}"
            )));
        }
    }

    if let Some(racks) = object.get("tip-racks") {
        findings.absorb(check_tip_racks(&subject, racks, deck));
    }

    if let Some(trash) = object.get("trash-container") {
        findings.absorb(check_deck_reference(
            &format!("{subject}: trash-container"),
            trash,
            deck,
        ));
    }

    findings.absorb(check_boolean(&subject, object, "multi-channel"));

    if let Some(axis) = object.get("axis") {
        if !axis.as_str().is_some_and(|a| AXIS_VALUES.contains(&a)) {
            findings.push_error(Issue::semantic(format!(
                "{subject}: attribute \"axis\" must be one of: {}, found {axis}",
                AXIS_VALUES.join(", ")
            )));
        }
    }

    for (attribute, range) in TOOL_NORMAL_RANGES {
        let value = record(&mut findings, optional_number(&subject, object, attribute)).flatten();
        if let Some(value) = value.filter(|v| !range.contains(*v)) {
            findings.push_warning(Issue::semantic(format!(
                "{subject}: attribute \"{attribute}\" {value} is outside the normal range {range}"
            )));
        }
    }

    findings.absorb(check_distribute_percentage(&subject, object));

    if let Some(points) = object.get("points") {
        findings.absorb(check_points(&subject, points));
    }

    findings
}

fn check_tip_racks(subject: &str, racks: &Value, deck: Deck<'_>) -> Findings {
    let Some(racks) = racks.as_array() else {
        return Findings::error(Issue::structural(format!(
            "{subject}: attribute \"tip-racks\" must be a sequence, found {}",
            type_name(racks)
        )));
    };
    racks
        .iter()
        .enumerate()
        .map(|(i, rack)| {
            check_deck_reference(&format!("{subject}: tip-rack #{}", i + 1), rack, deck)
        })
        .collect()
}

/// `{ "container": <deck container> }`
fn check_deck_reference(label: &str, reference: &Value, deck: Deck<'_>) -> Findings {
    let Some(object) = reference.as_object() else {
        return Findings::error(Issue::structural(format!(
            "{label} must be an object with a \"container\" attribute, found {}",
            type_name(reference)
        )));
    };
    match required_string(&label, object, "container") {
        Err(issue) => Findings::error(issue),
        Ok(container) if !deck.has_container(container) => Findings::error(Issue::semantic(
            format!("{label}: container \"{container}\" is not defined in the deck"),
        )),
        Ok(_) => Findings::new(),
    }
}

/// Must be a floating value, so `1` is rejected while `1.0` is accepted.
fn check_distribute_percentage(subject: &str, object: &Map<String, Value>) -> Findings {
    let Some(value) = object.get("distribute-percentage") else {
        return Findings::new();
    };
    let percentage = match value {
        Value::Number(n) if n.is_f64() => n.as_f64(),
        _ => None,
    };
    match percentage {
        None => Findings::error(Issue::structural(format!(
            "{subject}: attribute \"distribute-percentage\" must be a floating-point number, found {value}"
        ))),
        Some(p) if !DISTRIBUTE_PERCENTAGE_RANGE.contains(p) => Findings::error(Issue::semantic(format!(
            "{subject}: attribute \"distribute-percentage\" {p} is outside the allowed range {DISTRIBUTE_PERCENTAGE_RANGE}"
        ))),
        Some(_) => Findings::new(),
    }
}

fn check_points(subject: &str, points: &Value) -> Findings {
    let Some(points) = points.as_array() else {
        return Findings::error(Issue::structural(format!(
            "{subject}: attribute \"points\" must be a sequence, found {}",
            type_name(points)
        )));
    };

    let mut findings = Findings::new();
    for (i, point) in points.iter().enumerate() {
        let label = format!("{subject}: point #{}", i + 1);
        let Some(object) = point.as_object() else {
            findings.push_error(Issue::structural(format!(
                "{label} must be an object with \"f1\" and \"f2\", found {}",
                type_name(point)
            )));
            continue;
        };
        for key in ["f1", "f2"] {
            let Some(value) = object.get(key) else {
                findings.push_error(missing(&label, key));
                continue;
            };
            match number(&label, key, value) {
                Err(issue) => findings.push_error(issue),
                Ok(v) if !POINT_NORMAL_RANGE.contains(v) => {
                    findings.push_warning(Issue::semantic(format!(
                        "{label}: attribute \"{key}\" {v} is outside the normal range {POINT_NORMAL_RANGE}"
                    )))
                }
                Ok(_) => {}
            }
        }
    }
    findings
}
