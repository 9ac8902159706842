//! # protoval-cli: Command-Line Front End
//!
//! Provides the `protoval` binary.
//!
//! ## Subcommands
//!
//! - `protoval validate`: validate a protocol against a containers catalog.
//! - `protoval check-containers`: load a catalog and summarize its labware.
//! - `protoval slots`: print the deck-slot vocabulary.
//!
//! ```bash
//! protoval validate --protocol p200.json --containers containers.json
//! PROTOVAL_CONTAINERS=containers.json protoval validate --protocol p200.yaml --format json --pretty
//! protoval check-containers containers.json
//! ```
//!
//! ## Exit Codes
//!
//! `0` valid, `1` the report has errors (or warnings under `--strict`),
//! `2` a document could not be loaded or output could not be written.
//!
//! Handlers write to a caller-supplied sink so they can be driven from
//! tests as well as from `main`.

pub mod catalog;
pub mod output;
pub mod validate;

use std::path::Path;

use protoval_core::DocumentSource;

/// Exit code for a valid result.
pub const EXIT_VALID: u8 = 0;
/// Exit code for a report that fails.
pub const EXIT_INVALID: u8 = 1;
/// Exit code for an operational failure.
pub const EXIT_FAILURE: u8 = 2;

/// Turn a command-line document argument into a source.
///
/// An argument naming an existing file is read from disk; anything else
/// is treated as raw JSON or YAML text.
pub fn resolve_source(arg: &str) -> DocumentSource {
    let path = Path::new(arg);
    if path.is_file() {
        DocumentSource::Path(path.to_path_buf())
    } else {
        DocumentSource::Text(arg.to_string())
    }
}
