//! # Deck Validation
//!
//! Each deck container must name a labware known to the containers catalog.
//! A missing `slot` is advisory. A present slot on known labware must be one
//! of the fixed deck slots.

use protoval_core::error::type_name;
use protoval_core::{ContainersCatalog, Findings, Issue};
use serde_json::Value;

use crate::rules::{is_deck_slot, DECK_SLOTS};

/// Validate the `deck` section. Absent means nothing to check.
pub fn validate_deck(section: Option<&Value>, containers: &ContainersCatalog) -> Findings {
    match section {
        None => Findings::new(),
        Some(Value::Object(entries)) => entries
            .iter()
            .map(|(name, definition)| validate_deck_container(name, definition, containers))
            .collect(),
        Some(other) => Findings::error(Issue::structural(format!(
            "\"deck\" section must be a mapping of container names to definitions, found {}",
            type_name(other)
        ))),
    }
}

fn validate_deck_container(
    name: &str,
    definition: &Value,
    containers: &ContainersCatalog,
) -> Findings {
    let Some(object) = definition.as_object() else {
        return Findings::error(Issue::structural(format!(
            "deck container \"{name}\" must be an object, found {}",
            type_name(definition)
        )));
    };

    let mut findings = Findings::new();

    let labware = match object.get("labware") {
        None => {
            findings.push_error(Issue::structural(format!(
                "deck container \"{name}\" must define a \"labware\" attribute"
            )));
            None
        }
        Some(Value::String(labware)) => Some(labware.as_str()),
        Some(other) => {
            findings.push_error(Issue::structural(format!(
                "deck container \"{name}\": attribute \"labware\" must be a string, found {}",
                type_name(other)
            )));
            None
        }
    };

    let slot = match object.get("slot") {
        None => {
            findings.push_warning(Issue::structural(format!(
                "deck container \"{name}\" does not define a \"slot\" attribute"
            )));
            None
        }
        Some(Value::String(slot)) => Some(slot.as_str()),
        Some(other) => {
            findings.push_error(Issue::structural(format!(
                "deck container \"{name}\": attribute \"slot\" must be a string, found {}",
                type_name(other)
            )));
            None
        }
    };

    if let Some(labware) = labware {
        if !containers.has_labware(labware) {
            findings.push_error(Issue::semantic(format!(
                "labware \"{labware}\" of deck container \"{name}\" was not found in the containers catalog"
            )));
        } else if let Some(slot) = slot.filter(|slot| !is_deck_slot(slot)) {
            findings.push_error(Issue::semantic(format!(
                "slot \"{slot}\" of deck container \"{name}\" is not a deck slot, expected one of: {}",
                DECK_SLOTS.join(", ")
            )));
        }
    }

    findings
}
