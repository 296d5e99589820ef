//! Shared helpers for unit tests.

use std::path::PathBuf;

use tempfile::TempDir;

use crate::parsing::{Capabilities, LanguageParser, ParserError, ParserResult};
use crate::registry::DefinitionRegistry;

/// An empty docs directory that is removed when dropped.
pub fn create_test_docs_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Write `content` to `relative` under `dir`, creating parent directories.
pub fn create_test_file(dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
    }
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// A language parser whose grammar never loads.
pub struct BrokenGrammar;

impl LanguageParser for BrokenGrammar {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    fn parse(
        &self,
        _source: &str,
        _registry: &DefinitionRegistry,
    ) -> Result<ParserResult, ParserError> {
        Err(ParserError::Grammar {
            grammar: "broken",
            source: tree_sitter::LanguageError::Version(0),
        })
    }
}
