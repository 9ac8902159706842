//! # protoval-engine: Protocol Validation Engine
//!
//! Walks a liquid-handling protocol and checks it against itself and a
//! containers catalog. Every validator returns an owned [`Findings`]; a
//! parent concatenates its children's findings in traversal order, so the
//! report is stable across runs.
//!
//! ## Traversal
//!
//! ```text
//! validate
//! ├── ensure_main_sections     (missing head/deck ends the pass)
//! ├── deck                     deck containers → catalog labware, slots
//! ├── head                     tool attributes, tip-racks/trash → deck
//! ├── ingredients              advisory only
//! └── instructions
//!     └── instruction          tool → head
//!         └── group            exactly one command tag
//!             └── command      transfer | distribute | consolidate | mix
//!                 └── direction  container → deck, location → labware
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `protoval-core` internally.
//! - Pure over its inputs: no I/O during a pass. Loading happens before,
//!   through [`protoval_core::DocumentSource`].
//!
//! [`Findings`]: protoval_core::Findings

pub(crate) mod checks;
pub mod commands;
pub mod coordinate;
pub mod deck;
pub mod direction;
pub mod head;
pub mod ingredients;
pub mod instructions;
pub mod rules;
pub mod scope;
pub mod validator;

pub use coordinate::{CommandAt, DirectionAt, DirectionRole, GroupAt, InstructionAt};
pub use scope::Scope;
pub use validator::{ensure_main_sections, validate_protocol, ProtocolValidator};
