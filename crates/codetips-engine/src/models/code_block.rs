use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use serde::Serialize;

use crate::parsing::normalize_language;

/// A fenced code region extracted from a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// `<relative-path>#<index>`, unique across the docs tree.
    pub id: String,
    /// Normalized fence tag; empty when the fence has none.
    pub language: String,
    pub source: String,
}

impl CodeBlock {
    pub fn new(id: impl Into<String>, language: &str, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            language: normalize_language(language),
            source: source.into(),
        }
    }
}

/// What a page splits into: fenced blocks, and the prose outside them.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Extracted {
    pub blocks: Vec<CodeBlock>,
    /// Rendered text outside code: no fences, no inline code, no HTML.
    pub prose: String,
}

enum InCode {
    No,
    Fenced { info: String, source: String },
    Indented,
}

/// Walks the markdown event stream of `page_id`, collecting fenced blocks
/// in document order and the surrounding prose.
pub fn extract_blocks(page_id: &str, markdown: &str) -> Extracted {
    let mut out = Extracted::default();
    let mut code = InCode::No;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                code = InCode::Fenced {
                    info: info.to_string(),
                    source: String::new(),
                };
            }
            Event::Start(Tag::CodeBlock(CodeBlockKind::Indented)) => code = InCode::Indented,
            Event::End(TagEnd::CodeBlock) => {
                if let InCode::Fenced { info, mut source } =
                    std::mem::replace(&mut code, InCode::No)
                {
                    if source.ends_with('\n') {
                        source.pop();
                    }
                    let id = format!("{page_id}#{}", out.blocks.len());
                    out.blocks.push(CodeBlock::new(id, &info, source));
                }
            }
            Event::Text(text) => match &mut code {
                InCode::Fenced { source, .. } => source.push_str(&text),
                InCode::Indented => {}
                InCode::No => out.prose.push_str(&text),
            },
            Event::SoftBreak => out.prose.push(' '),
            Event::HardBreak | Event::End(_) => {
                if !out.prose.is_empty() && !out.prose.ends_with('\n') {
                    out.prose.push('\n');
                }
            }
            _ => {}
        }
    }

    out
}
