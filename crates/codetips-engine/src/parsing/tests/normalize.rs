use serde::Serialize;

use crate::parsing::ParserResult;

/// Flattened view of a token for comparisons in tests.
#[derive(Debug, PartialEq, Serialize)]
pub struct TokenSnap {
    /// Token type as a string ("identifier", "keyword", "error").
    pub kind: &'static str,
    /// Byte span as (start, end) tuple.
    pub span: (usize, usize),
    pub text: String,
    /// Tooltip title, or the diagnostic for error tokens.
    pub label: Option<String>,
}

impl TokenSnap {
    pub fn new(kind: &'static str, span: (usize, usize), text: &str, label: Option<&str>) -> Self {
        Self {
            kind,
            span,
            text: text.to_string(),
            label: label.map(str::to_string),
        }
    }
}

/// Tokens followed by errors, in result order.
pub fn normalize(result: &ParserResult) -> Vec<TokenSnap> {
    result
        .tokens()
        .iter()
        .chain(result.errors())
        .map(|t| TokenSnap {
            kind: t.token_type.as_str(),
            span: (t.start, t.end),
            text: t.text.clone(),
            label: t
                .error
                .clone()
                .or_else(|| t.info.as_ref().map(|i| i.type_label().to_string())),
        })
        .collect()
}
