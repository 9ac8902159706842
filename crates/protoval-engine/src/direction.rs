//! # Direction Validation
//!
//! A direction is one location reference plus optional handling modifiers:
//!
//! ```json
//! { "container": "plate", "location": "A1", "tip-offset": -2, "delay": 1,
//!   "touch-tip": true, "blowout": false, "extra-pull": false,
//!   "liquid-tracking": true, "repetitions": 3 }
//! ```
//!
//! `container` must name a deck container and `location` must exist in the
//! labware that container holds. Every optional modifier is checked on its
//! own; all applicable findings are returned.

use protoval_core::error::type_name;
use protoval_core::{Findings, Issue};
use serde_json::{Map, Value};

use crate::checks::{check_boolean, number, optional_number, record, required_string};
use crate::coordinate::{DirectionAt, DirectionRole};
use crate::rules::{DIRECTION_FLAGS, TIP_OFFSET_LIMIT};
use crate::scope::Scope;

/// Validate one direction. The role is taken from `at`.
pub fn validate_direction(direction: &Value, at: &DirectionAt, scope: &Scope<'_>) -> Findings {
    let Some(object) = direction.as_object() else {
        return Findings::error(Issue::structural(format!(
            "{at}: direction must be an object, found {}",
            type_name(direction)
        )));
    };

    let mut findings = check_reference(object, at, scope);
    findings.absorb(check_modifiers(object, at));
    if at.role == DirectionRole::Mix {
        findings.absorb(check_repetitions(object, at));
    }
    findings
}

/// `container` resolves in the deck and `location` in that container's labware.
fn check_reference(object: &Map<String, Value>, at: &DirectionAt, scope: &Scope<'_>) -> Findings {
    let mut findings = Findings::new();
    let container = record(&mut findings, required_string(at, object, "container"));
    let location = record(&mut findings, required_string(at, object, "location"));

    let Some(container) = container else {
        return findings;
    };
    if !scope.deck.has_container(container) {
        findings.push_error(Issue::semantic(format!(
            "{at}: container \"{container}\" is not defined in the deck"
        )));
        return findings;
    }

    let Some(location) = location else {
        return findings;
    };
    match scope.deck.labware_of(container) {
        Some(labware) if scope.containers.has_location(labware, location) => {}
        Some(labware) => findings.push_error(Issue::semantic(format!(
            "{at}: location \"{location}\" was not found in labware \"{labware}\" of container \"{container}\""
        ))),
        None => findings.push_error(Issue::semantic(format!(
            "{at}: location \"{location}\" cannot be resolved, container \"{container}\" declares no labware"
        ))),
    }
    findings
}

fn check_modifiers(object: &Map<String, Value>, at: &DirectionAt) -> Findings {
    let mut findings = Findings::new();

    if let Some(offset) = record(&mut findings, optional_number(at, object, "tip-offset")).flatten() {
        if offset.abs() > TIP_OFFSET_LIMIT {
            findings.push_warning(Issue::semantic(format!(
                "{at}: attribute \"tip-offset\" {offset} is beyond the normal limit of ±{TIP_OFFSET_LIMIT}"
            )));
        }
    }

    if let Some(delay) = record(&mut findings, optional_number(at, object, "delay")).flatten() {
        if delay < 0.0 {
            findings.push_error(Issue::semantic(format!(
                "{at}: attribute \"delay\" must not be negative, found {delay}"
            )));
        }
    }

    for flag in DIRECTION_FLAGS {
        findings.absorb(check_boolean(at, object, flag));
    }
    findings
}

/// Mix points should say how often to mix. When they do, it is a number.
fn check_repetitions(object: &Map<String, Value>, at: &DirectionAt) -> Findings {
    let Some(value) = object.get("repetitions") else {
        return Findings::warning(Issue::semantic(format!(
            "{at}: attribute \"repetitions\" could be set but is not"
        )));
    };
    match number(at, "repetitions", value) {
        Ok(_) => Findings::new(),
        Err(issue) => Findings::error(issue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protoval_core::{CommandTag, ContainersCatalog, Protocol};
    use serde_json::json;

    use crate::coordinate::InstructionAt;

    fn containers() -> ContainersCatalog {
        ContainersCatalog::from_value(json!({
            "containers": {
                "96-flat": { "locations": { "A1": {}, "B1": {}, "C1": {} } },
                "point": { "locations": { "A1": {} } }
            }
        }))
    }

    fn protocol() -> Protocol {
        Protocol::from_value(json!({
            "deck": {
                "plate": { "labware": "96-flat", "slot": "B1" },
                "trash": { "labware": "point", "slot": "A3" },
                "mystery": { "slot": "C2" }
            }
        }))
    }

    fn at(role: DirectionRole) -> DirectionAt {
        InstructionAt::from_index(0)
            .group(0)
            .nth_command(CommandTag::Transfer, 0)
            .direction(role)
    }

    fn run(direction: Value, role: DirectionRole) -> Findings {
        let protocol = protocol();
        let containers = containers();
        let scope = Scope::new(&protocol, &containers);
        validate_direction(&direction, &at(role), &scope)
    }

    #[test]
    fn test_fully_valid_direction_is_clean() {
        let findings = run(
            json!({
                "container": "plate",
                "location": "A1",
                "tip-offset": -5,
                "delay": 2.5,
                "touch-tip": true,
                "blowout": false,
                "extra-pull": true,
                "liquid-tracking": false
            }),
            DirectionRole::From,
        );
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn test_non_object_direction() {
        let findings = run(json!("plate:A1"), DirectionRole::To);
        assert_eq!(findings.errors().len(), 1);
        assert!(findings.errors()[0].message.contains("direction must be an object"));
    }

    #[test]
    fn test_missing_container_and_location_both_reported() {
        let findings = run(json!({}), DirectionRole::From);
        assert_eq!(findings.errors().len(), 2);
        assert!(findings.errors().iter().all(Issue::is_structural));
    }

    #[test]
    fn test_unknown_container() {
        let findings = run(json!({ "container": "reservoir", "location": "A1" }), DirectionRole::To);
        assert_eq!(findings.errors().len(), 1);
        let msg = &findings.errors()[0].message;
        assert!(msg.contains("\"reservoir\" is not defined in the deck"));
        assert!(msg.starts_with("instruction #1, group #1, transfer command #1, 'to' direction"));
    }

    #[test]
    fn test_unknown_location() {
        let findings = run(json!({ "container": "plate", "location": "H12" }), DirectionRole::To);
        assert_eq!(findings.errors().len(), 1);
        assert!(findings.errors()[0]
            .message
            .contains("location \"H12\" was not found in labware \"96-flat\""));
    }

    #[test]
    fn test_container_without_labware() {
        let findings = run(json!({ "container": "mystery", "location": "A1" }), DirectionRole::To);
        assert_eq!(findings.errors().len(), 1);
        assert!(findings.errors()[0].message.contains("declares no labware"));
    }

    #[test]
    fn test_tip_offset_warning() {
        let findings = run(
            json!({ "container": "plate", "location": "A1", "tip-offset": -31 }),
            DirectionRole::From,
        );
        assert!(!findings.has_errors());
        assert_eq!(findings.warnings().len(), 1);
        assert!(run(
            json!({ "container": "plate", "location": "A1", "tip-offset": 30 }),
            DirectionRole::From
        )
        .is_empty());
    }

    #[test]
    fn test_negative_delay_is_error() {
        let findings = run(
            json!({ "container": "plate", "location": "A1", "delay": -1 }),
            DirectionRole::From,
        );
        assert_eq!(findings.errors().len(), 1);
        assert!(findings.errors()[0].message.contains("\"delay\" must not be negative"));
    }

    #[test]
    fn test_extra_pull_checks_its_own_value() {
        let findings = run(
            json!({ "container": "plate", "location": "A1", "extra-pull": "yes", "blowout": true }),
            DirectionRole::From,
        );
        assert_eq!(findings.errors().len(), 1);
        assert!(findings.errors()[0].message.contains("\"extra-pull\""));
    }

    #[test]
    fn test_all_optional_violations_collected() {
        let findings = run(
            json!({
                "container": "plate",
                "location": "A1",
                "tip-offset": 45,
                "delay": -3,
                "touch-tip": 1,
                "blowout": "no",
                "extra-pull": null,
                "liquid-tracking": []
            }),
            DirectionRole::To,
        );
        assert_eq!(findings.errors().len(), 5);
        assert_eq!(findings.warnings().len(), 1);
    }

    #[test]
    fn test_mix_point_without_repetitions_warns() {
        let findings = run(json!({ "container": "plate", "location": "B1" }), DirectionRole::Mix);
        assert!(!findings.has_errors());
        assert_eq!(findings.warnings().len(), 1);
        assert!(findings.warnings()[0].message.contains("could be set but is not"));
    }

    #[test]
    fn test_repetitions_ignored_outside_mix() {
        let findings = run(json!({ "container": "plate", "location": "B1" }), DirectionRole::From);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_repetitions_value_is_not_range_checked() {
        for count in [json!(0), json!(-2), json!(2.5), json!(3)] {
            let findings = run(
                json!({ "container": "plate", "location": "B1", "repetitions": count.clone() }),
                DirectionRole::Mix,
            );
            assert!(findings.is_empty(), "repetitions {count}: {findings:?}");
        }
    }

    #[test]
    fn test_repetitions_must_be_a_number() {
        let findings = run(
            json!({ "container": "plate", "location": "B1", "repetitions": "3" }),
            DirectionRole::Mix,
        );
        assert_eq!(findings.errors().len(), 1);
        assert!(findings.errors()[0].is_structural());
        assert!(findings.errors()[0].message.contains("\"repetitions\" must be a number"));
    }
}
