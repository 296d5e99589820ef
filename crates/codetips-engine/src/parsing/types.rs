use std::ops::Range;

use serde::Serialize;

use crate::parsing::typescript::TypeSignature;
use crate::registry::{Color, DefinitionEntry, Palette};

/// Name the fallback parser reports in [`ParserResult::parsers`].
pub const FALLBACK_PARSER: &str = "fallback";

/// Syntactic class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Identifier,
    Keyword,
    Error,
}

impl TokenType {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::Identifier => "identifier",
            TokenType::Keyword => "keyword",
            TokenType::Error => "error",
        }
    }
}

/// Hover content attached to a token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum IdentifierInfo {
    /// Straight from the definition registry.
    Definition {
        #[serde(rename = "type")]
        type_name: String,
        documentation: String,
        color: Color,
    },
    /// Interface, class or type alias declared in the block.
    TypeSignature {
        title: String,
        signature: TypeSignature,
        documentation: String,
        color: Color,
    },
    /// Terse signature derived from the surrounding declaration.
    Contextual { label: String, color: Color },
}

impl IdentifierInfo {
    pub fn from_definition(entry: &DefinitionEntry) -> Self {
        IdentifierInfo::Definition {
            type_name: entry.type_name.clone(),
            documentation: entry.documentation.clone(),
            color: entry.color,
        }
    }

    pub fn from_signature(signature: TypeSignature) -> Self {
        IdentifierInfo::TypeSignature {
            title: signature.header(),
            documentation: signature.to_fenced(),
            signature,
            color: Palette::TypeSignature.color(),
        }
    }

    pub fn contextual(label: impl Into<String>) -> Self {
        IdentifierInfo::Contextual {
            label: label.into(),
            color: Palette::Contextual.color(),
        }
    }

    /// The one-line type shown as the tooltip title.
    pub fn type_label(&self) -> &str {
        match self {
            IdentifierInfo::Definition { type_name, .. } => type_name,
            IdentifierInfo::TypeSignature { title, .. } => title,
            IdentifierInfo::Contextual { label, .. } => label,
        }
    }

    pub fn documentation(&self) -> Option<&str> {
        match self {
            IdentifierInfo::Definition { documentation, .. }
            | IdentifierInfo::TypeSignature { documentation, .. } => Some(documentation),
            IdentifierInfo::Contextual { .. } => None,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            IdentifierInfo::Definition { color, .. }
            | IdentifierInfo::TypeSignature { color, .. }
            | IdentifierInfo::Contextual { color, .. } => *color,
        }
    }
}

/// A half-open byte range `[start, end)` over a block's source.
///
/// Only constructible through [`TokenLocation::new`] and
/// [`TokenLocation::error`], which guarantee a non-empty range on `char`
/// boundaries whose slice equals `text`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenLocation {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<IdentifierInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TokenLocation {
    pub fn new(source: &str, range: Range<usize>, token_type: TokenType) -> Option<Self> {
        if range.start >= range.end {
            return None;
        }
        let text = source.get(range.clone())?;
        Some(Self {
            start: range.start,
            end: range.end,
            token_type,
            text: text.to_string(),
            info: None,
            error: None,
        })
    }

    pub fn error(source: &str, range: Range<usize>, message: impl Into<String>) -> Option<Self> {
        let mut token = Self::new(source, range, TokenType::Error)?;
        token.error = Some(message.into());
        Some(token)
    }

    pub fn with_info(mut self, info: Option<IdentifierInfo>) -> Self {
        self.info = info;
        self
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Which optional analyses a parser ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub jsx: bool,
    pub type_checking: bool,
}

/// Everything a block's parse produced.
///
/// `is_valid` always equals `errors.is_empty()`; `uses_fallback` is true
/// unless a language parser completed its walk.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserResult {
    tokens: Vec<TokenLocation>,
    errors: Vec<TokenLocation>,
    is_valid: bool,
    uses_fallback: bool,
    parsers: Vec<&'static str>,
    capabilities: Capabilities,
    #[serde(skip)]
    warnings: Vec<String>,
}

impl ParserResult {
    pub(crate) fn fallback(tokens: Vec<TokenLocation>) -> Self {
        Self {
            tokens,
            errors: Vec::new(),
            is_valid: true,
            uses_fallback: true,
            parsers: vec![FALLBACK_PARSER],
            capabilities: Capabilities::default(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn language(
        parser: &'static str,
        capabilities: Capabilities,
        tokens: Vec<TokenLocation>,
        errors: Vec<TokenLocation>,
    ) -> Self {
        Self {
            tokens,
            is_valid: errors.is_empty(),
            errors,
            uses_fallback: false,
            parsers: vec![parser],
            capabilities,
            warnings: Vec::new(),
        }
    }

    /// A language parser that could not finish: one error spanning the whole
    /// block, no tokens of its own, and a warning for the batch metrics.
    pub(crate) fn downgraded(
        parser: &'static str,
        capabilities: Capabilities,
        source: &str,
        reason: &dyn std::fmt::Display,
    ) -> Self {
        let errors: Vec<TokenLocation> =
            TokenLocation::error(source, 0..source.len(), reason.to_string())
                .into_iter()
                .collect();
        Self {
            tokens: Vec::new(),
            is_valid: errors.is_empty(),
            errors,
            uses_fallback: true,
            parsers: vec![parser],
            capabilities,
            warnings: vec![format!("{parser} parser failed: {reason}")],
        }
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut Vec<TokenLocation> {
        &mut self.tokens
    }

    pub(crate) fn into_parts(self) -> ResultParts {
        ResultParts {
            tokens: self.tokens,
            errors: self.errors,
            uses_fallback: self.uses_fallback,
            parsers: self.parsers,
            capabilities: self.capabilities,
            warnings: self.warnings,
        }
    }

    pub(crate) fn from_parts(parts: ResultParts) -> Self {
        Self {
            tokens: parts.tokens,
            is_valid: parts.errors.is_empty(),
            errors: parts.errors,
            uses_fallback: parts.uses_fallback,
            parsers: parts.parsers,
            capabilities: parts.capabilities,
            warnings: parts.warnings,
        }
    }

    pub fn tokens(&self) -> &[TokenLocation] {
        &self.tokens
    }

    pub fn errors(&self) -> &[TokenLocation] {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn uses_fallback(&self) -> bool {
        self.uses_fallback
    }

    /// Parsers that ran, fallback first.
    pub fn parsers(&self) -> &[&'static str] {
        &self.parsers
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Internal parser failures. Not part of the side-car output.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Owned fields of a [`ParserResult`], for the merger to recombine.
#[derive(Debug)]
pub(crate) struct ResultParts {
    pub tokens: Vec<TokenLocation>,
    pub errors: Vec<TokenLocation>,
    pub uses_fallback: bool,
    pub parsers: Vec<&'static str>,
    pub capabilities: Capabilities,
    pub warnings: Vec<String>,
}
