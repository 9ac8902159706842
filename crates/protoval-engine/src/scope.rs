//! The read-only lookups every instruction-tree check resolves against.

use protoval_core::{ContainersCatalog, Deck, Head, Protocol};

/// Deck, head, and catalog views for one validation pass.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    /// The protocol's deck.
    pub deck: Deck<'a>,
    /// The protocol's head.
    pub head: Head<'a>,
    /// The labware catalog.
    pub containers: &'a ContainersCatalog,
}

impl<'a> Scope<'a> {
    /// Views over `protocol` resolved against `containers`.
    pub fn new(protocol: &'a Protocol, containers: &'a ContainersCatalog) -> Self {
        Self {
            deck: protocol.deck(),
            head: protocol.head(),
            containers,
        }
    }
}
