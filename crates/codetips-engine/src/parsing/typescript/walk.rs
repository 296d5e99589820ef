use std::collections::HashMap;
use std::ops::Range;

use tree_sitter::{Node, Tree};

use super::contextual::{
    function_label, method_label, parameter_label, property_label, variable_label,
};
use super::diagnostics::{Diagnostic, check_initializer, syntax_diagnostic};
use super::signature::{SignatureKind, TypeSignature};
use super::syntax::{is_field, node_text};
use super::wrap::Wrapped;
use super::{Flavor, WalkError};
use crate::parsing::{IdentifierInfo, TokenLocation, TokenType};
use crate::registry::DefinitionRegistry;

const IDENTIFIER_KINDS: &[&str] = &[
    "identifier",
    "type_identifier",
    "property_identifier",
    "shorthand_property_identifier",
    "shorthand_property_identifier_pattern",
    "private_property_identifier",
    "statement_identifier",
];

/// Identifier kinds that name a binding, so a later use can borrow the
/// declaration's info. Member names (`obj.prop`) are excluded.
const BINDING_KINDS: &[&str] = &[
    "identifier",
    "type_identifier",
    "shorthand_property_identifier",
    "shorthand_property_identifier_pattern",
];

/// Named nodes that read as keywords.
const KEYWORD_LITERALS: &[&str] = &["this", "super", "true", "false", "null", "undefined"];

fn is_keyword(kind: &str) -> bool {
    matches!(
        kind,
        "abstract" | "any" | "as" | "async" | "await" | "bigint" | "boolean" | "break" | "case"
            | "catch" | "class" | "const" | "continue" | "declare" | "default" | "delete" | "do"
            | "else" | "enum" | "export" | "extends" | "finally" | "for" | "from" | "function"
            | "get" | "if" | "implements" | "import" | "in" | "infer" | "instanceof" | "interface"
            | "is" | "keyof" | "let" | "module" | "namespace" | "never" | "new" | "number"
            | "object" | "of" | "override" | "private" | "protected" | "public" | "readonly"
            | "return" | "satisfies" | "set" | "static" | "string" | "switch" | "symbol"
            | "throw" | "try" | "type" | "typeof" | "unknown" | "var" | "void" | "while"
            | "yield"
    )
}

struct Pending {
    range: Range<usize>,
    token_type: TokenType,
    info: Option<IdentifierInfo>,
    binding: bool,
}

/// What one walk over the wrapped block found, in source coordinates.
pub(crate) struct WalkOutput {
    pub tokens: Vec<TokenLocation>,
    pub errors: Vec<TokenLocation>,
}

pub(crate) struct Walker<'a> {
    wrapped: &'a Wrapped<'a>,
    registry: &'a DefinitionRegistry,
    flavor: Flavor,
    pending: Vec<Pending>,
    diagnostics: Vec<Diagnostic>,
    declarations: HashMap<String, IdentifierInfo>,
}

impl<'a> Walker<'a> {
    pub fn new(wrapped: &'a Wrapped<'a>, registry: &'a DefinitionRegistry, flavor: Flavor) -> Self {
        Self {
            wrapped,
            registry,
            flavor,
            pending: Vec::new(),
            diagnostics: Vec::new(),
            declarations: HashMap::new(),
        }
    }

    pub fn walk(mut self, tree: &Tree) -> Result<WalkOutput, WalkError> {
        let mut cursor = tree.walk();
        'walk: loop {
            self.visit(cursor.node())?;
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }
        self.finish()
    }

    fn src(&self) -> &'a [u8] {
        self.wrapped.text().as_bytes()
    }

    fn visit(&mut self, node: Node<'_>) -> Result<(), WalkError> {
        let window = self.wrapped.source_range();
        if let Some(diagnostic) = syntax_diagnostic(node, self.src(), &window)? {
            self.diagnostics.push(diagnostic);
            return Ok(());
        }

        if !node.is_named() {
            if is_keyword(node.kind()) {
                self.push_keyword(node);
            }
            return Ok(());
        }

        let kind = node.kind();
        if IDENTIFIER_KINDS.contains(&kind) {
            self.identifier(node)?;
        } else if KEYWORD_LITERALS.contains(&kind) {
            self.push_keyword(node);
        } else if self.flavor.type_checking()
            && matches!(
                kind,
                "variable_declarator"
                    | "required_parameter"
                    | "optional_parameter"
                    | "public_field_definition"
            )
            && let Some(diagnostic) = check_initializer(node, self.src())?
        {
            self.diagnostics.push(diagnostic);
        }
        Ok(())
    }

    fn push_keyword(&mut self, node: Node<'_>) {
        if let Some(range) = self.wrapped.to_source(node.byte_range()) {
            self.pending.push(Pending {
                range,
                token_type: TokenType::Keyword,
                info: None,
                binding: false,
            });
        }
    }

    fn identifier(&mut self, node: Node<'_>) -> Result<(), WalkError> {
        let Some(range) = self.wrapped.to_source(node.byte_range()) else {
            return Ok(());
        };
        let name = node_text(node, self.src())?;
        let info = self.declaration_info(node, name)?;
        if let Some(info) = &info {
            self.declarations
                .entry(name.to_string())
                .or_insert_with(|| info.clone());
        }
        self.pending.push(Pending {
            range,
            token_type: TokenType::Identifier,
            info,
            binding: BINDING_KINDS.contains(&node.kind()),
        });
        Ok(())
    }

    /// Info read off the declaration `node` names, if it names one.
    fn declaration_info(
        &self,
        node: Node<'_>,
        name: &str,
    ) -> Result<Option<IdentifierInfo>, WalkError> {
        let Some(parent) = node.parent() else {
            return Ok(None);
        };
        let src = self.src();

        if SignatureKind::of_declaration(parent.kind()).is_some() && is_field(parent, "name", node)
        {
            let signature = TypeSignature::from_declaration(parent, src)?;
            return Ok(signature.map(IdentifierInfo::from_signature));
        }

        let label = match parent.kind() {
            "variable_declarator" if is_field(parent, "name", node) => {
                Some(variable_label(parent, name, src)?)
            }
            "required_parameter" | "optional_parameter" if is_field(parent, "pattern", node) => {
                Some(parameter_label(parent, name, src)?)
            }
            "arrow_function" if is_field(parent, "parameter", node) => {
                Some(format!("(parameter) {name}: any"))
            }
            "public_field_definition" | "property_signature" if is_field(parent, "name", node) => {
                Some(property_label(parent, name, src)?)
            }
            "function_declaration" | "generator_function_declaration" | "function_signature"
                if is_field(parent, "name", node) =>
            {
                Some(function_label(parent, name, src)?)
            }
            "method_definition" | "method_signature" | "abstract_method_signature"
                if is_field(parent, "name", node) =>
            {
                Some(method_label(parent, name, src)?)
            }
            _ => None,
        };
        Ok(label.map(IdentifierInfo::contextual))
    }

    fn finish(self) -> Result<WalkOutput, WalkError> {
        let wrapped = self.wrapped;
        let source = wrapped.source();

        let mut tokens = Vec::with_capacity(self.pending.len());
        for pending in self.pending {
            let token = TokenLocation::new(source, pending.range.clone(), pending.token_type)
                .ok_or(WalkError::Range {
                    start: pending.range.start,
                    end: pending.range.end,
                })?;
            let info = pending
                .info
                .or_else(|| {
                    pending
                        .binding
                        .then(|| self.declarations.get(&token.text).cloned())
                        .flatten()
                })
                .or_else(|| {
                    self.registry
                        .lookup(&token.text)
                        .map(IdentifierInfo::from_definition)
                });
            tokens.push(token.with_info(info));
        }

        let mut errors: Vec<TokenLocation> = Vec::new();
        for diagnostic in self.diagnostics {
            let Some(range) = error_range(wrapped, diagnostic.range) else {
                continue;
            };
            let duplicate = errors.iter().any(|e| {
                e.range() == range && e.error.as_deref() == Some(diagnostic.message.as_str())
            });
            if duplicate {
                continue;
            }
            if let Some(token) = TokenLocation::error(source, range, diagnostic.message) {
                errors.push(token);
            }
        }

        Ok(WalkOutput { tokens, errors })
    }
}

/// Source range for a diagnostic. Zero-width diagnostics (missing tokens) are
/// widened to the character before them, or after them at the start of the
/// block.
fn error_range(wrapped: &Wrapped<'_>, range: Range<usize>) -> Option<Range<usize>> {
    if range.start < range.end {
        return wrapped.to_source(range);
    }
    let text = wrapped.text();
    let at = range.start;
    let before = text
        .get(..at)
        .and_then(|head| head.chars().next_back())
        .map(|c| at - c.len_utf8()..at);
    let after = text
        .get(at..)
        .and_then(|tail| tail.chars().next())
        .map(|c| at..at + c.len_utf8());
    before
        .and_then(|r| wrapped.to_source(r))
        .or_else(|| after.and_then(|r| wrapped.to_source(r)))
}
