//! # Rule Constants
//!
//! Fixed vocabularies and numeric policies. A value outside a hard limit is
//! an error; a value outside a normal range is a warning. The two never
//! apply to the same field.

use std::fmt;

/// The 15 deck slots: 3 columns × 5 rows.
pub const DECK_SLOTS: [&str; 15] = [
    "A1", "B1", "C1", "D1", "E1", //
    "A2", "B2", "C2", "D2", "E2", //
    "A3", "B3", "C3", "D3", "E3",
];

/// Allowed pipette axes.
pub const AXIS_VALUES: [&str; 2] = ["a", "b"];

/// The only supported tool kind.
pub const PIPETTE_TOOL: &str = "pipette";

/// Attributes every head tool must declare.
pub const REQUIRED_TOOL_ATTRIBUTES: [&str; 13] = [
    "tool",
    "tip-racks",
    "trash-container",
    "multi-channel",
    "axis",
    "volume",
    "down-plunger-speed",
    "up-plunger-speed",
    "tip-plunge",
    "extra-pull-volume",
    "extra-pull-delay",
    "distribute-percentage",
    "points",
];

/// Numeric tool attributes and their normal ranges.
pub const TOOL_NORMAL_RANGES: [(&str, Range); 6] = [
    ("volume", Range::new(0.1, 10000.0)),
    ("down-plunger-speed", Range::new(1.0, 900.0)),
    ("up-plunger-speed", Range::new(1.0, 900.0)),
    ("tip-plunge", Range::new(0.5, 15.0)),
    ("extra-pull-volume", Range::new(0.0, 1000.0)),
    ("extra-pull-delay", Range::new(0.0, 1000.0)),
];

/// Hard limits of `distribute-percentage`.
pub const DISTRIBUTE_PERCENTAGE_RANGE: Range = Range::new(0.0, 1.0);

/// Normal range of calibration point coordinates `f1`/`f2`.
pub const POINT_NORMAL_RANGE: Range = Range::new(0.0, 110.0);

/// Largest normal magnitude of a direction's `tip-offset`.
pub const TIP_OFFSET_LIMIT: f64 = 30.0;

/// Largest normal command volume.
pub const VOLUME_NORMAL_MAX: f64 = 5000.0;

/// Boolean modifiers a direction may carry.
pub const DIRECTION_FLAGS: [&str; 4] = ["touch-tip", "blowout", "extra-pull", "liquid-tracking"];

/// Whether `slot` is one of the fixed deck slots.
pub fn is_deck_slot(slot: &str) -> bool {
    DECK_SLOTS.contains(&slot)
}

/// An inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive.
    pub max: f64,
}

impl Range {
    /// A range from `min` to `max`, both inclusive.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies within the bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
