use serde::Serialize;
use tree_sitter::Node;

use super::WalkError;
use super::contextual::infer_type;
use super::syntax::{
    annotation_text, children, compact, compact_text, has_child_kind, modifiers, named_children,
    node_text,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureKind {
    Interface,
    Class,
    TypeAlias,
}

impl SignatureKind {
    pub fn keyword(self) -> &'static str {
        match self {
            SignatureKind::Interface => "interface",
            SignatureKind::Class => "class",
            SignatureKind::TypeAlias => "type",
        }
    }

    pub(crate) fn of_declaration(kind: &str) -> Option<Self> {
        match kind {
            "interface_declaration" => Some(SignatureKind::Interface),
            "class_declaration" | "abstract_class_declaration" | "class" => {
                Some(SignatureKind::Class)
            }
            "type_alias_declaration" => Some(SignatureKind::TypeAlias),
            _ => None,
        }
    }
}

/// Shape of an interface, class or type alias declared in a block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSignature {
    pub kind: SignatureKind,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,
    pub members: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,
    pub modifiers: Vec<String>,
    /// Right-hand side of a type alias.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliased: Option<String>,
}

impl TypeSignature {
    /// First line of the signature, e.g. `export class Store<T> extends Base implements Sub`.
    pub fn header(&self) -> String {
        let mut out = String::new();
        for modifier in &self.modifiers {
            out.push_str(modifier);
            out.push(' ');
        }
        out.push_str(self.kind.keyword());
        out.push(' ');
        out.push_str(&self.name);
        if !self.type_parameters.is_empty() {
            out.push('<');
            out.push_str(&self.type_parameters.join(", "));
            out.push('>');
        }
        if let Some(aliased) = &self.aliased {
            out.push_str(" = ");
            out.push_str(aliased);
            return out;
        }
        if !self.extends.is_empty() {
            out.push_str(" extends ");
            out.push_str(&self.extends.join(", "));
        }
        if !self.implements.is_empty() {
            out.push_str(" implements ");
            out.push_str(&self.implements.join(", "));
        }
        out
    }

    /// Pseudo-code rendering as a fenced block.
    pub fn to_fenced(&self) -> String {
        let mut out = String::from("```typescript\n");
        out.push_str(&self.header());
        if self.aliased.is_some() {
            out.push(';');
        } else if self.members.is_empty() {
            out.push_str(" {}");
        } else {
            out.push_str(" {\n");
            for member in &self.members {
                out.push_str("  ");
                out.push_str(member);
                out.push_str(";\n");
            }
            out.push('}');
        }
        out.push_str("\n```");
        out
    }

    /// Builds the signature of `decl`, an interface, class or type alias node.
    pub(crate) fn from_declaration(decl: Node<'_>, src: &[u8]) -> Result<Option<Self>, WalkError> {
        let Some(kind) = SignatureKind::of_declaration(decl.kind()) else {
            return Ok(None);
        };
        let Some(name) = decl.child_by_field_name("name") else {
            return Ok(None);
        };

        let mut signature = TypeSignature {
            kind,
            name: node_text(name, src)?.to_string(),
            type_parameters: Vec::new(),
            members: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            modifiers: declaration_modifiers(decl),
            aliased: None,
        };

        if let Some(params) = decl.child_by_field_name("type_parameters") {
            for param in named_children(params) {
                if param.kind() == "type_parameter" {
                    signature.type_parameters.push(compact_text(param, src)?);
                }
            }
        }

        match kind {
            SignatureKind::Interface => {
                for child in children(decl) {
                    if child.kind() == "extends_type_clause" {
                        signature.extends.extend(heritage_types(child, src)?);
                    }
                }
                if let Some(body) = decl.child_by_field_name("body") {
                    signature.members = interface_members(body, src)?;
                }
            }
            SignatureKind::Class => {
                for child in children(decl) {
                    if child.kind() != "class_heritage" {
                        continue;
                    }
                    for clause in named_children(child) {
                        match clause.kind() {
                            "extends_clause" => {
                                signature.extends.extend(heritage_types(clause, src)?)
                            }
                            "implements_clause" => {
                                signature.implements.extend(heritage_types(clause, src)?)
                            }
                            _ => {}
                        }
                    }
                }
                if let Some(body) = decl.child_by_field_name("body") {
                    signature.members = class_members(body, src)?;
                }
            }
            SignatureKind::TypeAlias => {
                if let Some(value) = decl.child_by_field_name("value") {
                    signature.aliased = Some(compact_text(value, src)?);
                }
            }
        }

        Ok(Some(signature))
    }
}

fn declaration_modifiers(decl: Node<'_>) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(parent) = decl.parent() {
        match parent.kind() {
            "export_statement" => {
                out.push("export".to_string());
                if has_child_kind(parent, "default") {
                    out.push("default".to_string());
                }
            }
            "ambient_declaration" => out.push("declare".to_string()),
            _ => {}
        }
    }
    if has_child_kind(decl, "abstract") {
        out.push("abstract".to_string());
    }
    out
}

/// Types named in an `extends`/`implements` clause. Type arguments are glued
/// back onto the expression they belong to.
fn heritage_types(clause: Node<'_>, src: &[u8]) -> Result<Vec<String>, WalkError> {
    let mut out: Vec<String> = Vec::new();
    for child in named_children(clause) {
        let text = compact_text(child, src)?;
        match (child.kind(), out.last_mut()) {
            ("type_arguments", Some(last)) => last.push_str(&text),
            ("comment", _) => {}
            _ => out.push(text),
        }
    }
    Ok(out)
}

fn interface_members(body: Node<'_>, src: &[u8]) -> Result<Vec<String>, WalkError> {
    let mut out = Vec::new();
    for member in named_children(body) {
        match member.kind() {
            "property_signature" => out.push(property_member(member, src)?),
            "method_signature" => out.push(method_member(member, src)?),
            "comment" => {}
            _ => out.push(trimmed_member(member, src)?),
        }
    }
    Ok(out)
}

fn class_members(body: Node<'_>, src: &[u8]) -> Result<Vec<String>, WalkError> {
    let mut out = Vec::new();
    for member in named_children(body) {
        match member.kind() {
            "public_field_definition" => out.push(property_member(member, src)?),
            "method_definition" | "method_signature" | "abstract_method_signature" => {
                out.push(method_member(member, src)?)
            }
            "index_signature" => out.push(trimmed_member(member, src)?),
            _ => {}
        }
    }
    Ok(out)
}

fn property_member(member: Node<'_>, src: &[u8]) -> Result<String, WalkError> {
    let mut out = prefixed(modifiers(member, src)?);
    if let Some(name) = member.child_by_field_name("name") {
        out.push_str(node_text(name, src)?);
    }
    if has_child_kind(member, "?") {
        out.push('?');
    } else if has_child_kind(member, "!") {
        out.push('!');
    }
    let ty = match (
        member.child_by_field_name("type"),
        member.child_by_field_name("value"),
    ) {
        (Some(annotation), _) => annotation_text(annotation, src)?,
        (None, Some(value)) => infer_type(value, src, true)?,
        (None, None) => "any".to_string(),
    };
    out.push_str(": ");
    out.push_str(&ty);
    Ok(out)
}

pub(crate) fn method_member(member: Node<'_>, src: &[u8]) -> Result<String, WalkError> {
    let mut out = prefixed(modifiers(member, src)?);
    if let Some(name) = member.child_by_field_name("name") {
        out.push_str(node_text(name, src)?);
    }
    if has_child_kind(member, "?") {
        out.push('?');
    }
    out.push_str(&callable_tail(member, src)?);
    Ok(out)
}

/// `<T>(params): Return` of anything with `parameters`/`return_type` fields.
/// An unannotated return reads `void` when the body never returns a value and
/// `any` otherwise.
pub(crate) fn callable_tail(node: Node<'_>, src: &[u8]) -> Result<String, WalkError> {
    let mut out = String::new();
    if let Some(tps) = node.child_by_field_name("type_parameters") {
        out.push_str(&compact_text(tps, src)?);
    }
    match node.child_by_field_name("parameters") {
        Some(params) => out.push_str(&parameter_list(params, src)?),
        None => out.push_str("()"),
    }
    out.push_str(": ");
    match node.child_by_field_name("return_type") {
        Some(ret) => out.push_str(&annotation_text(ret, src)?),
        None => out.push_str(&implicit_return(node)),
    }
    Ok(out)
}

/// `(a: T, b?: U)` with every parameter typed: unannotated ones read as their
/// default's widened type or `any`, and parameters with a default are
/// optional.
pub(crate) fn parameter_list(params: Node<'_>, src: &[u8]) -> Result<String, WalkError> {
    let mut out = Vec::new();
    for param in named_children(params) {
        if !matches!(param.kind(), "required_parameter" | "optional_parameter") {
            continue;
        }
        let Some(pattern) = param.child_by_field_name("pattern") else {
            continue;
        };
        let default = param.child_by_field_name("value");
        let optional = param.kind() == "optional_parameter" || default.is_some();
        let ty = match (param.child_by_field_name("type"), default) {
            (Some(annotation), _) => annotation_text(annotation, src)?,
            (None, Some(value)) => infer_type(value, src, true)?,
            (None, None) => "any".to_string(),
        };
        let mark = if optional { "?" } else { "" };
        out.push(format!("{}{mark}: {ty}", compact_text(pattern, src)?));
    }
    Ok(format!("({})", out.join(", ")))
}

/// Return type of a callable without an annotation.
pub(crate) fn implicit_return(node: Node<'_>) -> String {
    let base = match node.child_by_field_name("body") {
        Some(body) if body.kind() == "statement_block" && !returns_value(body) => "void",
        _ => "any",
    };
    if has_child_kind(node, "async") {
        format!("Promise<{base}>")
    } else {
        base.to_string()
    }
}

/// True when a `return <expr>` belongs to this body, ignoring nested functions
/// and classes.
fn returns_value(body: Node<'_>) -> bool {
    named_children(body).into_iter().any(|child| match child.kind() {
        "return_statement" => named_children(child).iter().any(|c| c.kind() != "comment"),
        "function_declaration"
        | "generator_function_declaration"
        | "function_expression"
        | "arrow_function"
        | "class_declaration"
        | "class" => false,
        _ => returns_value(child),
    })
}

fn trimmed_member(member: Node<'_>, src: &[u8]) -> Result<String, WalkError> {
    Ok(compact(node_text(member, src)?.trim_end_matches([';', ','])))
}

fn prefixed(modifiers: Vec<String>) -> String {
    if modifiers.is_empty() {
        String::new()
    } else {
        format!("{} ", modifiers.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature(kind: SignatureKind) -> TypeSignature {
        TypeSignature {
            kind,
            name: "Store".into(),
            type_parameters: vec!["T".into()],
            members: vec!["items: T[]".into(), "add(item: T): void".into()],
            extends: vec!["Base<T>".into()],
            implements: vec!["Iterable<T>".into()],
            modifiers: vec!["export".into()],
            aliased: None,
        }
    }

    #[test]
    fn class_header() {
        assert_eq!(
            signature(SignatureKind::Class).header(),
            "export class Store<T> extends Base<T> implements Iterable<T>"
        );
    }

    #[test]
    fn fenced_rendering() {
        insta::assert_snapshot!(signature(SignatureKind::Class).to_fenced(), @r"
        ```typescript
        export class Store<T> extends Base<T> implements Iterable<T> {
          items: T[];
          add(item: T): void;
        }
        ```
        ");
    }

    #[test]
    fn type_alias_rendering() {
        let alias = TypeSignature {
            kind: SignatureKind::TypeAlias,
            name: "Id".into(),
            type_parameters: vec![],
            members: vec![],
            extends: vec![],
            implements: vec![],
            modifiers: vec![],
            aliased: Some("string | number".into()),
        };
        assert_eq!(alias.header(), "type Id = string | number");
        assert_eq!(alias.to_fenced(), "```typescript\ntype Id = string | number;\n```");
    }

    #[test]
    fn empty_interface_rendering() {
        let empty = TypeSignature {
            kind: SignatureKind::Interface,
            name: "Marker".into(),
            type_parameters: vec![],
            members: vec![],
            extends: vec![],
            implements: vec![],
            modifiers: vec![],
            aliased: None,
        };
        assert_eq!(empty.to_fenced(), "```typescript\ninterface Marker {}\n```");
    }
}
