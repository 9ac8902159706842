//! # Command-Variant Validation
//!
//! One validator per [`Command`] variant, dispatched by exhaustive match.
//! Each delegates its endpoints to [`validate_direction`].
//!
//! - `transfer`: a sequence of `{ from, to, volume }`.
//! - `distribute`: one `from`, a sequence of `to`, optional `blowout`.
//! - `consolidate`: a sequence of `from`, one `to`, optional `blowout`.
//! - `mix`: a sequence of mix points.
//!
//! Only a transfer step's `volume` is checked against the volume policy.

use protoval_core::error::type_name;
use protoval_core::{Command, CommandTag, Findings, Issue};
use serde_json::Value;

use crate::checks::{check_boolean, check_volume, missing};
use crate::coordinate::{CommandAt, DirectionRole, GroupAt};
use crate::direction::validate_direction;
use crate::scope::Scope;

const TRANSFER_ATTRIBUTES: [&str; 3] = ["from", "to", "volume"];

/// Validate a decoded command at group coordinate `at`.
pub fn validate_command(command: Command<'_>, at: GroupAt, scope: &Scope<'_>) -> Findings {
    tracing::trace!(%at, command = %command.tag(), "checking command");
    match command {
        Command::Transfer(payload) => validate_transfer(payload, at, scope),
        Command::Distribute(payload) => validate_fan(
            payload,
            at.command(CommandTag::Distribute),
            DirectionRole::From,
            DirectionRole::To,
            scope,
        ),
        Command::Consolidate(payload) => validate_fan(
            payload,
            at.command(CommandTag::Consolidate),
            DirectionRole::To,
            DirectionRole::From,
            scope,
        ),
        Command::Mix(payload) => validate_mix(payload, at, scope),
    }
}

/// `transfer`: each entry moves `volume` from one direction to another.
pub fn validate_transfer(payload: &Value, at: GroupAt, scope: &Scope<'_>) -> Findings {
    let Some(steps) = payload.as_array() else {
        return Findings::error(Issue::structural(format!(
            "{}: payload must be a sequence of commands, found {}",
            at.command(CommandTag::Transfer),
            type_name(payload)
        )));
    };
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            validate_transfer_step(step, at.nth_command(CommandTag::Transfer, i), scope)
        })
        .collect()
}

fn validate_transfer_step(step: &Value, at: CommandAt, scope: &Scope<'_>) -> Findings {
    let Some(object) = step.as_object() else {
        return Findings::error(Issue::structural(format!(
            "{at}: command must be an object, found {}",
            type_name(step)
        )));
    };

    let (Some(from), Some(to), Some(volume)) =
        (object.get("from"), object.get("to"), object.get("volume"))
    else {
        return TRANSFER_ATTRIBUTES
            .iter()
            .filter(|key| !object.contains_key(**key))
            .map(|key| Findings::error(missing(&at, key)))
            .collect();
    };

    let mut findings = validate_direction(from, &at.direction(DirectionRole::From), scope);
    findings.absorb(validate_direction(to, &at.direction(DirectionRole::To), scope));
    findings.absorb(check_volume(&at, volume));
    findings
}

/// `distribute` and `consolidate`: one direction on the `single` side, a
/// sequence on the `many` side.
fn validate_fan(
    payload: &Value,
    at: CommandAt,
    single: DirectionRole,
    many: DirectionRole,
    scope: &Scope<'_>,
) -> Findings {
    let Some(object) = payload.as_object() else {
        return Findings::error(Issue::structural(format!(
            "{at}: payload must be an object with \"{single}\" and \"{many}\", found {}",
            type_name(payload)
        )));
    };

    let mut findings = Findings::new();

    match object.get(single.as_str()) {
        None => findings.push_error(missing(&at, single.as_str())),
        Some(direction) => {
            findings.absorb(validate_direction(direction, &at.direction(single), scope));
        }
    }

    match object.get(many.as_str()) {
        None => findings.push_error(missing(&at, many.as_str())),
        Some(Value::Array(directions)) => {
            for (i, direction) in directions.iter().enumerate() {
                findings.absorb(validate_direction(direction, &at.nth_direction(many, i), scope));
            }
        }
        Some(other) => findings.push_error(Issue::structural(format!(
            "{at}: attribute \"{many}\" must be a sequence of directions, found {}",
            type_name(other)
        ))),
    }

    findings.absorb(check_boolean(&at, object, "blowout"));
    findings
}

/// `mix`: each entry is a mix point.
pub fn validate_mix(payload: &Value, at: GroupAt, scope: &Scope<'_>) -> Findings {
    let at = at.command(CommandTag::Mix);
    let Some(points) = payload.as_array() else {
        return Findings::error(Issue::structural(format!(
            "{at}: payload must be a sequence of mix points, found {}",
            type_name(payload)
        )));
    };
    points
        .iter()
        .enumerate()
        .map(|(i, point)| validate_direction(point, &at.nth_direction(DirectionRole::Mix, i), scope))
        .collect()
}
