//! Diagnostics for a single isolated block: syntax errors from the parse tree
//! and a local assignability check for annotated declarations whose
//! initializer is a literal. Checks run in non-strict mode, so `null` and
//! `undefined` are assignable to everything.

use std::ops::Range;

use tree_sitter::Node;

use super::WalkError;
use super::syntax::{compact, compact_text, first_named_child, named_children, node_text};

/// A diagnostic in wrapped-text coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Diagnostic {
    pub range: Range<usize>,
    pub message: String,
}

/// Syntax diagnostic for an `ERROR` or `MISSING` node, if it is one.
///
/// `ERROR` nodes often swallow part of the wrapper; they are clipped to
/// `window` (the source inside the wrapped text) and reported on the clipped
/// text. An `ERROR` node entirely outside `window` yields nothing.
pub(crate) fn syntax_diagnostic(
    node: Node<'_>,
    src: &[u8],
    window: &Range<usize>,
) -> Result<Option<Diagnostic>, WalkError> {
    if node.is_missing() {
        let message = if node.is_named() {
            format!("{} expected.", capitalize(&node.kind().replace('_', " ")))
        } else {
            format!("'{}' expected.", node.kind())
        };
        return Ok(Some(Diagnostic {
            range: node.byte_range(),
            message,
        }));
    }
    if node.is_error() {
        let Some(range) = clip(node.byte_range(), window) else {
            return Ok(None);
        };
        let range = trim(range, src)?;
        let text = slice(src, &range)?;
        let message = match text.split_whitespace().next() {
            Some(first) => format!("Unexpected token '{}'.", truncate(first, 24)),
            None => "Unexpected token.".to_string(),
        };
        return Ok(Some(Diagnostic { range, message }));
    }
    Ok(None)
}

fn clip(range: Range<usize>, window: &Range<usize>) -> Option<Range<usize>> {
    let start = range.start.max(window.start);
    let end = range.end.min(window.end);
    (start < end).then_some(start..end)
}

/// Narrows `range` to its non-whitespace text; all-whitespace ranges stay as
/// they are.
fn trim(range: Range<usize>, src: &[u8]) -> Result<Range<usize>, WalkError> {
    let text = slice(src, &range)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(range);
    }
    let start = range.start + (text.len() - text.trim_start().len());
    Ok(start..start + trimmed.len())
}

fn slice<'t>(src: &'t [u8], range: &Range<usize>) -> Result<&'t str, WalkError> {
    let bytes = src.get(range.clone()).ok_or(WalkError::Range {
        start: range.start,
        end: range.end,
    })?;
    Ok(std::str::from_utf8(bytes)?)
}

/// Checks `name: T = literal` in a variable declarator, parameter or field.
pub(crate) fn check_initializer(
    decl: Node<'_>,
    src: &[u8],
) -> Result<Option<Diagnostic>, WalkError> {
    let (Some(annotation), Some(value)) = (
        decl.child_by_field_name("type"),
        decl.child_by_field_name("value"),
    ) else {
        return Ok(None);
    };
    let Some(declared) = first_named_child(annotation) else {
        return Ok(None);
    };
    let Some(literal) = Literal::of(value, src)? else {
        return Ok(None);
    };

    match assignable(declared, &literal, src)? {
        Assignable::Yes | Assignable::Unknown => Ok(None),
        Assignable::No { literal_target } => {
            let shown = if literal_target {
                literal.display()
            } else {
                literal.base.to_string()
            };
            Ok(Some(Diagnostic {
                range: value.byte_range(),
                message: format!(
                    "Type '{shown}' is not assignable to type '{}'.",
                    type_display(declared, src)?
                ),
            }))
        }
    }
}

#[derive(Debug)]
struct Literal {
    base: &'static str,
    text: String,
}

impl Literal {
    fn of(value: Node<'_>, src: &[u8]) -> Result<Option<Self>, WalkError> {
        let text = node_text(value, src)?;
        let base = match value.kind() {
            "number" if text.ends_with('n') => "bigint",
            "number" => "number",
            "string" | "template_string" => "string",
            "true" | "false" => "boolean",
            "null" => "null",
            "undefined" => "undefined",
            "parenthesized_expression" => {
                return match first_named_child(value) {
                    Some(inner) => Literal::of(inner, src),
                    None => Ok(None),
                };
            }
            _ => return Ok(None),
        };
        Ok(Some(Literal {
            base,
            text: text.to_string(),
        }))
    }

    /// Literal as a type: string quotes normalized to `"`.
    fn display(&self) -> String {
        match self.base {
            "string" => format!("\"{}\"", unquote(&self.text)),
            _ => compact(&self.text),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Assignable {
    Yes,
    No { literal_target: bool },
    /// A type this checker does not model; never reported.
    Unknown,
}

fn assignable(declared: Node<'_>, literal: &Literal, src: &[u8]) -> Result<Assignable, WalkError> {
    if matches!(literal.base, "null" | "undefined") {
        return Ok(Assignable::Yes);
    }
    let result = match declared.kind() {
        "predefined_type" => match node_text(declared, src)? {
            "any" | "unknown" => Assignable::Yes,
            ty @ ("number" | "string" | "boolean" | "bigint") if ty == literal.base => {
                Assignable::Yes
            }
            "number" | "string" | "boolean" | "bigint" | "symbol" | "object" | "never" | "void" => {
                Assignable::No {
                    literal_target: false,
                }
            }
            _ => Assignable::Unknown,
        },
        "literal_type" => {
            let Some(target) = Literal::of_type(declared, src)? else {
                return Ok(Assignable::Unknown);
            };
            if target.base == literal.base && target.display() == literal.display() {
                Assignable::Yes
            } else {
                Assignable::No {
                    literal_target: true,
                }
            }
        }
        "union_type" => {
            let mut literal_target = false;
            let mut unknown = false;
            for member in named_children(declared) {
                match assignable(member, literal, src)? {
                    Assignable::Yes => return Ok(Assignable::Yes),
                    Assignable::Unknown => unknown = true,
                    Assignable::No { literal_target: l } => literal_target |= l,
                }
            }
            if unknown {
                Assignable::Unknown
            } else {
                Assignable::No { literal_target }
            }
        }
        "parenthesized_type" => match first_named_child(declared) {
            Some(inner) => return assignable(inner, literal, src),
            None => Assignable::Unknown,
        },
        _ => Assignable::Unknown,
    };
    Ok(result)
}

/// A declared type as the checker prints it: literal members with
/// normalized quotes, everything else as written.
fn type_display(declared: Node<'_>, src: &[u8]) -> Result<String, WalkError> {
    match declared.kind() {
        "literal_type" => match Literal::of_type(declared, src)? {
            Some(literal) => Ok(literal.display()),
            None => compact_text(declared, src),
        },
        "union_type" => {
            let members = named_children(declared)
                .into_iter()
                .map(|member| type_display(member, src))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(members.join(" | "))
        }
        "parenthesized_type" => match first_named_child(declared) {
            Some(inner) => Ok(format!("({})", type_display(inner, src)?)),
            None => compact_text(declared, src),
        },
        _ => compact_text(declared, src),
    }
}

impl Literal {
    /// Literal of a `literal_type` node such as `'a'`, `1` or `true`.
    fn of_type(declared: Node<'_>, src: &[u8]) -> Result<Option<Self>, WalkError> {
        match first_named_child(declared) {
            Some(inner) if inner.kind() == "unary_expression" => Ok(Some(Literal {
                base: "number",
                text: node_text(inner, src)?.to_string(),
            })),
            Some(inner) => Literal::of(inner, src),
            None => Ok(None),
        }
    }
}

fn unquote(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.len() >= 2 {
        let first = trimmed.as_bytes()[0];
        let last = trimmed.as_bytes()[trimmed.len() - 1];
        if first == last && matches!(first, b'"' | b'\'' | b'`') {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_keeps_the_overlap_with_the_window() {
        assert_eq!(clip(1..16, &(9..22)), Some(9..16));
        assert_eq!(clip(10..12, &(9..22)), Some(10..12));
        assert_eq!(clip(22..25, &(9..22)), None);
        assert_eq!(clip(0..9, &(9..22)), None);
    }

    #[test]
    fn trim_skips_surrounding_whitespace() {
        let src = b"ab \n}x \ncd";
        assert_eq!(trim(2..8, src).unwrap(), 4..6);
        assert_eq!(trim(2..4, src).unwrap(), 2..4);
    }

    #[test]
    fn unquote_strips_matching_quotes() {
        assert_eq!(unquote("'a'"), "a");
        assert_eq!(unquote("\"a\""), "a");
        assert_eq!(unquote("`a`"), "a");
        assert_eq!(unquote("'a\""), "'a\"");
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("identifier"), "Identifier");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn truncate_long_tokens() {
        assert_eq!(truncate("short", 24), "short");
        assert_eq!(truncate("abcdef", 3), "abc…");
    }
}
