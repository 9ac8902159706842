//! # Instruction and Group Validation
//!
//! ```json
//! "instructions": [
//!   { "tool": "p200", "groups": [ { "transfer": [ ... ] }, { "mix": [ ... ] } ] }
//! ]
//! ```
//!
//! An instruction's `tool` must be a head tool and its `groups` a sequence;
//! the two are checked independently. A group must decode to exactly one
//! command variant before its payload is looked at.

use protoval_core::error::type_name;
use protoval_core::{Command, Findings, Issue};
use serde_json::Value;

use crate::checks::missing;
use crate::commands::validate_command;
use crate::coordinate::{GroupAt, InstructionAt};
use crate::scope::Scope;

/// Validate the `instructions` section. Absent means nothing to check.
pub fn validate_instructions(section: Option<&Value>, scope: &Scope<'_>) -> Findings {
    match section {
        None => Findings::new(),
        Some(Value::Array(instructions)) => instructions
            .iter()
            .enumerate()
            .map(|(i, instruction)| {
                validate_instruction(instruction, InstructionAt::from_index(i), scope)
            })
            .collect(),
        Some(other) => Findings::error(Issue::structural(format!(
            "\"instructions\" section must be a sequence, found {}",
            type_name(other)
        ))),
    }
}

/// Validate one instruction.
pub fn validate_instruction(instruction: &Value, at: InstructionAt, scope: &Scope<'_>) -> Findings {
    let Some(object) = instruction.as_object() else {
        return Findings::error(Issue::structural(format!(
            "{at}: instruction must be an object, found {}",
            type_name(instruction)
        )));
    };

    let mut findings = Findings::new();

    match object.get("tool") {
        None => findings.push_error(missing(&at, "tool")),
        Some(Value::String(tool)) => {
            if !scope.head.has_tool(tool) {
                findings.push_error(Issue::semantic(format!(
                    "{at}: tool \"{tool}\" is not defined in the head"
                )));
            }
        }
        Some(other) => findings.push_error(Issue::structural(format!(
            "{at}: attribute \"tool\" must be a string, found {}",
            type_name(other)
        ))),
    }

    match object.get("groups") {
        None => findings.push_error(missing(&at, "groups")),
        Some(Value::Array(groups)) => findings.extend(
            groups
                .iter()
                .enumerate()
                .map(|(i, group)| validate_group(group, at.group(i), scope)),
        ),
        Some(other) => findings.push_error(Issue::structural(format!(
            "{at}: attribute \"groups\" must be a sequence, found {}",
            type_name(other)
        ))),
    }

    findings
}

/// Validate one group: decode its single tag, then its payload.
pub fn validate_group(group: &Value, at: GroupAt, scope: &Scope<'_>) -> Findings {
    match Command::decode(group) {
        Ok(command) => validate_command(command, at, scope),
        Err(e) => Findings::error(Issue::structural(format!("{at}: {e}"))),
    }
}
