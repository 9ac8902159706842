//! # protoval-core: Foundational Types for the Protocol Validator
//!
//! This crate is the leaf of the workspace. It defines the typed views over
//! the two documents a validation pass consumes, the way those documents are
//! obtained, and the report a pass produces. Every other crate depends on
//! `protoval-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Read-only document model.** [`Protocol`] and [`ContainersCatalog`]
//!    are built once and never mutated. [`Deck`] and [`Head`] are borrowed
//!    views exposing pure membership queries; absence is a `false`, never
//!    a fault.
//!
//! 2. **Malformed input degrades, it does not crash.** A document whose root
//!    is not a mapping, or that lacks a section, is modelled as empty so
//!    downstream checks report "nothing found".
//!
//! 3. **One tag enum for command variants.** [`CommandTag`] and the tagged
//!    union [`Command`] make the four liquid-movement variants an exhaustive
//!    `match`. Anything else is a [`CommandDecodeError`].
//!
//! 4. **Two finding classes.** Every [`Issue`] is either
//!    [`IssueClass::Structural`] or [`IssueClass::Semantic`]; the report keeps
//!    them distinguishable while serializing as plain strings.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `protoval-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod command;
pub mod containers;
pub mod error;
pub mod protocol;
pub mod report;
pub mod source;

pub use command::{Command, CommandTag};
pub use containers::ContainersCatalog;
pub use error::{CommandDecodeError, LoadError, ProtovalError};
pub use protocol::{Deck, Head, Protocol, Section};
pub use report::{Findings, Issue, IssueClass, Salient, ValidationReport};
pub use source::DocumentSource;
