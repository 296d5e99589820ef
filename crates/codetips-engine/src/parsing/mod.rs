//! # Parsing
//!
//! Turns a fenced block into a [`ParserResult`]: the fallback scan over the
//! definition registry, an optional language parser, and the merge between
//! the two.
//!
//! ```text
//! source ──► FallbackParser ──────────────┐
//!        └─► LanguageParser (by fence tag) ┴─► merge ─► hydrate ─► result
//! ```

pub mod dispatch;
pub mod fallback;
pub mod merge;
pub mod types;
pub mod typescript;

#[cfg(test)]
mod tests;

pub use dispatch::{LanguageParser, ParserDispatch, flavor_for, normalize_language};
pub use fallback::FallbackParser;
pub use types::{
    Capabilities, FALLBACK_PARSER, IdentifierInfo, ParserResult, TokenLocation, TokenType,
};
pub use typescript::{Flavor, SignatureKind, TypeScriptParser, TypeSignature};

/// A language parser could not run at all.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("failed to load the {grammar} grammar: {source}")]
    Grammar {
        grammar: &'static str,
        source: tree_sitter::LanguageError,
    },
}
