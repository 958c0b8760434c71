//! # Example Scanning
//!
//! Single forward pass over a README that pulls out runnable examples.
//!
//! ## Phases
//!
//! 1. **Line Classification** (`classify`): `LineClassifier` gives each line a
//!    `LineRole` from the current `ScanState` and the line text alone.
//!    `ScanState::after` is the pure transition function.
//!
//! 2. **Extraction** (`extractor`): `ExampleExtractor` applies each role, emitting
//!    output lines and buffering example source until the block is sealed.
//!
//! ## Key Invariants
//!
//! - Example indices are dense and start at 1
//! - The Nth image reference in the output names the Nth example's image
//! - Passthrough lines are never reordered or modified
//! - An example fence left open at end of input is an error, never a silent drop

pub mod classify;
pub mod extractor;
pub mod kinds;

#[cfg(test)]
mod tests;

pub use classify::{LineClassifier, LineRole, ScanState};
pub use extractor::{ExampleBlock, ExampleExtractor, ExtractError, Extraction};

use crate::{document::Document, linker::ImageLinker};

/// Markers that identify examples and directives in the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleSyntax {
    /// Language tag of an example fence (```` ```example ````).
    pub example_tag: String,
    /// Tag the example fence is rewritten to in the output.
    pub rendered_tag: String,
    /// Prefix of a directive line inside an example.
    pub directive_marker: String,
    /// What the directive marker becomes in the composed script.
    pub renderer_directive: String,
}

impl Default for ExampleSyntax {
    fn default() -> Self {
        Self {
            example_tag: "example".to_string(),
            rendered_tag: "typ".to_string(),
            directive_marker: "%".to_string(),
            renderer_directive: "#".to_string(),
        }
    }
}

pub fn extract_examples(
    document: &Document,
    syntax: &ExampleSyntax,
    linker: &ImageLinker,
) -> Result<Extraction, ExtractError> {
    let mut extractor = ExampleExtractor::new(syntax, linker);

    for line in document.lines() {
        extractor.push(&line);
    }

    extractor.finish()
}
