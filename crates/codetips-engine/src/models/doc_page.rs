use relative_path::{RelativePath, RelativePathBuf};

use super::code_block::{CodeBlock, extract_blocks};

/// A markdown page of the docs tree, split into fenced blocks and prose.
#[derive(Debug, Clone, PartialEq)]
pub struct DocPage {
    relative_path: RelativePathBuf,
    blocks: Vec<CodeBlock>,
    prose: String,
}

impl DocPage {
    /// Parse a page's markdown; block ids are prefixed with `relative_path`.
    pub fn parse(relative_path: RelativePathBuf, markdown: &str) -> Self {
        let extracted = extract_blocks(relative_path.as_str(), markdown);
        Self {
            relative_path,
            blocks: extracted.blocks,
            prose: extracted.prose,
        }
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    pub fn blocks(&self) -> &[CodeBlock] {
        &self.blocks
    }

    pub fn prose(&self) -> &str {
        &self.prose
    }
}
