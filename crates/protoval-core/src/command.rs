//! # Command Variants
//!
//! A group wraps exactly one liquid-movement command, selected by its single
//! key. [`Command::decode`] turns that key into the tagged union [`Command`],
//! so every consumer handles the four variants with an exhaustive `match`.
//!
//! | tag | payload |
//! |---|---|
//! | `transfer` | sequence of `{ from, to, volume }` |
//! | `distribute` | `{ from, to: [..], blowout? }` |
//! | `consolidate` | `{ from: [..], to, blowout? }` |
//! | `mix` | sequence of mix-point directions |

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::CommandDecodeError;

/// The four command-variant tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandTag {
    /// One-to-one moves.
    Transfer,
    /// One source, many destinations.
    Distribute,
    /// Many sources, one destination.
    Consolidate,
    /// Repeated agitation at a set of points.
    Mix,
}

impl CommandTag {
    /// All tags in canonical order.
    pub const ALL: [CommandTag; 4] = [
        Self::Transfer,
        Self::Distribute,
        Self::Consolidate,
        Self::Mix,
    ];

    /// The group key for this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::Distribute => "distribute",
            Self::Consolidate => "consolidate",
            Self::Mix => "mix",
        }
    }

    /// The allowed tags, comma separated, for diagnostics.
    pub fn allowed() -> String {
        Self::ALL
            .iter()
            .map(CommandTag::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for CommandTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandTag {
    type Err = CommandDecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| CommandDecodeError::UnknownTag {
                tag: s.to_string(),
                allowed: Self::allowed(),
            })
    }
}

/// A group decoded into its command variant, borrowing the payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command<'a> {
    /// `transfer` payload.
    Transfer(&'a Value),
    /// `distribute` payload.
    Distribute(&'a Value),
    /// `consolidate` payload.
    Consolidate(&'a Value),
    /// `mix` payload.
    Mix(&'a Value),
}

impl<'a> Command<'a> {
    /// Decode a group: a mapping with exactly one known command key.
    ///
    /// The payload is not inspected; a group with more than one key is
    /// rejected before either payload is looked at.
    pub fn decode(group: &'a Value) -> Result<Self, CommandDecodeError> {
        let map = group.as_object().ok_or(CommandDecodeError::NotAnObject)?;

        let mut entries = map.iter();
        let (key, payload) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => {
                return Err(CommandDecodeError::KeyCount {
                    found: map.len(),
                    keys: map.keys().map(String::as_str).collect::<Vec<_>>().join(", "),
                })
            }
        };

        Ok(match key.parse::<CommandTag>()? {
            CommandTag::Transfer => Self::Transfer(payload),
            CommandTag::Distribute => Self::Distribute(payload),
            CommandTag::Consolidate => Self::Consolidate(payload),
            CommandTag::Mix => Self::Mix(payload),
        })
    }

    /// The tag this command was decoded from.
    pub fn tag(&self) -> CommandTag {
        match self {
            Self::Transfer(_) => CommandTag::Transfer,
            Self::Distribute(_) => CommandTag::Distribute,
            Self::Consolidate(_) => CommandTag::Consolidate,
            Self::Mix(_) => CommandTag::Mix,
        }
    }
}
