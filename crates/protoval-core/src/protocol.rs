//! # Protocol Document Model
//!
//! Typed, read-only views over a protocol document. The document is a tree
//! with optional top-level sections:
//!
//! | section | shape |
//! |---|---|
//! | `head` | tool name → tool definition |
//! | `deck` | deck container name → `{ labware, slot? }` |
//! | `ingredients` | opaque |
//! | `instructions` | sequence of `{ tool, groups }` |
//! | `info` | opaque metadata, passed through |
//!
//! A deck container name is a protocol-local alias; the `labware` it names
//! is the key into the [`ContainersCatalog`](crate::ContainersCatalog).

use std::fmt;

use serde_json::{Map, Value};

/// Top-level sections of a protocol document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Tool (pipette) definitions.
    Head,
    /// Labware placement.
    Deck,
    /// Reagent declarations. Presence-checked only.
    Ingredients,
    /// Ordered liquid-handling instructions.
    Instructions,
    /// Free-form metadata.
    Info,
}

impl Section {
    /// All sections in document order.
    pub const ALL: [Section; 5] = [
        Self::Head,
        Self::Deck,
        Self::Ingredients,
        Self::Instructions,
        Self::Info,
    ];

    /// The key of this section in the protocol document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Deck => "deck",
            Self::Ingredients => "ingredients",
            Self::Instructions => "instructions",
            Self::Info => "info",
        }
    }

    /// Whether a protocol is unusable without this section.
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Head | Self::Deck)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed protocol document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Protocol {
    root: Map<String, Value>,
}

impl Protocol {
    /// Wrap a parsed document. A root that is not a mapping is modelled as
    /// an empty protocol, which then fails the main-section checks.
    pub fn from_value(document: Value) -> Self {
        match document {
            Value::Object(root) => Self { root },
            _ => Self::default(),
        }
    }

    /// A protocol with no sections.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the section key is present, whatever its value.
    pub fn has_section(&self, section: Section) -> bool {
        self.root.contains_key(section.as_str())
    }

    /// Raw value of a section.
    pub fn section(&self, section: Section) -> Option<&Value> {
        self.root.get(section.as_str())
    }

    /// View over the `head` section.
    pub fn head(&self) -> Head<'_> {
        Head::new(self.section(Section::Head))
    }

    /// View over the `deck` section.
    pub fn deck(&self) -> Deck<'_> {
        Deck::new(self.section(Section::Deck))
    }

    /// The instruction sequence, if `instructions` is present and a sequence.
    pub fn instructions(&self) -> Option<&[Value]> {
        self.section(Section::Instructions)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// Number of instructions; zero when absent or malformed.
    pub fn instruction_count(&self) -> usize {
        self.instructions().map_or(0, <[Value]>::len)
    }

    /// The `info` metadata, unvalidated.
    pub fn info(&self) -> Option<&Value> {
        self.section(Section::Info)
    }

    /// The `ingredients` section, unvalidated.
    pub fn ingredients(&self) -> Option<&Value> {
        self.section(Section::Ingredients)
    }
}

/// Borrowed view over the `deck` section.
///
/// A missing or non-mapping section behaves as an empty deck.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deck<'a> {
    containers: Option<&'a Map<String, Value>>,
}

impl<'a> Deck<'a> {
    /// View over a raw `deck` value.
    pub fn new(section: Option<&'a Value>) -> Self {
        Self {
            containers: section.and_then(Value::as_object),
        }
    }

    /// Whether `name` is a declared deck container.
    pub fn has_container(&self, name: &str) -> bool {
        self.containers.is_some_and(|c| c.contains_key(name))
    }

    /// The labware name a deck container declares, if it declares one as a string.
    pub fn labware_of(&self, name: &str) -> Option<&'a str> {
        self.containers
            .and_then(|c| c.get(name))
            .and_then(|definition| definition.get("labware"))
            .and_then(Value::as_str)
    }

    /// Number of declared deck containers.
    pub fn len(&self) -> usize {
        self.containers.map_or(0, Map::len)
    }

    /// Whether no deck containers are declared.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Borrowed view over the `head` section.
///
/// A missing or non-mapping section behaves as a head with no tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct Head<'a> {
    tools: Option<&'a Map<String, Value>>,
}

impl<'a> Head<'a> {
    /// View over a raw `head` value.
    pub fn new(section: Option<&'a Value>) -> Self {
        Self {
            tools: section.and_then(Value::as_object),
        }
    }

    /// Whether `name` is a declared tool.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.is_some_and(|t| t.contains_key(name))
    }

    /// Number of declared tools.
    pub fn len(&self) -> usize {
        self.tools.map_or(0, Map::len)
    }

    /// Whether no tools are declared.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
