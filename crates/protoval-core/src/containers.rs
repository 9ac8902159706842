//! # Containers Catalog
//!
//! Read-only view over the labware reference document:
//!
//! ```json
//! { "containers": { "96-flat": { "locations": { "A1": { ... }, "B1": { ... } } } } }
//! ```
//!
//! Location geometry is opaque here; only the existence of a labware name
//! and of a location name within it is ever queried.

use serde_json::{Map, Value};

/// The labware catalog a protocol's deck is resolved against.
///
/// Built once from the containers document and shared read-only, typically
/// behind an `Arc`, by every validation pass that needs it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainersCatalog {
    labware: Map<String, Value>,
}

impl ContainersCatalog {
    /// Build the catalog from a parsed containers document.
    ///
    /// A root that is not a mapping, or a missing or non-mapping
    /// `containers` key, yields an empty catalog.
    pub fn from_value(document: Value) -> Self {
        let labware = match document {
            Value::Object(mut root) => match root.remove("containers") {
                Some(Value::Object(labware)) => labware,
                _ => Map::new(),
            },
            _ => Map::new(),
        };
        Self { labware }
    }

    /// An empty catalog. Every lookup answers `false`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether `name` is a known labware definition.
    pub fn has_labware(&self, name: &str) -> bool {
        self.labware.contains_key(name)
    }

    /// Whether `location` exists within labware `labware`.
    ///
    /// Returns `false` (not a fault) when the labware itself is unknown or
    /// declares no `locations` mapping.
    pub fn has_location(&self, labware: &str, location: &str) -> bool {
        self.locations_of(labware)
            .is_some_and(|locations| locations.contains_key(location))
    }

    /// Location names of a labware definition, in catalog order.
    pub fn location_names(&self, labware: &str) -> Vec<&str> {
        self.locations_of(labware)
            .map(|locations| locations.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Names of all labware definitions, in catalog order.
    pub fn labware_names(&self) -> Vec<&str> {
        self.labware.keys().map(String::as_str).collect()
    }

    /// Number of labware definitions.
    pub fn labware_count(&self) -> usize {
        self.labware.len()
    }

    /// Whether the catalog holds no labware at all.
    pub fn is_empty(&self) -> bool {
        self.labware.is_empty()
    }

    fn locations_of(&self, labware: &str) -> Option<&Map<String, Value>> {
        self.labware
            .get(labware)
            .and_then(|definition| definition.get("locations"))
            .and_then(Value::as_object)
    }
}
