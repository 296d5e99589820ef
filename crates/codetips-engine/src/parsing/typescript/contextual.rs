//! Terse hover labels derived from the declaration around an identifier,
//! in the style of an editor's quick info:
//!
//! ```text
//! (const variable) x: number
//! (parameter) name?: string = "anon"
//! (private readonly property) cache: Map<string, T>
//! (function) load(id: string): Promise<User>
//! ```

use tree_sitter::Node;

use super::WalkError;
use super::signature::{callable_tail, implicit_return, parameter_list};
use super::syntax::{
    annotation_text, children, compact_text, first_named_child, has_child_kind, modifiers,
    named_children, node_text,
};

/// `(<const|let|var> variable) name: type`
pub(crate) fn variable_label(
    declarator: Node<'_>,
    name: &str,
    src: &[u8],
) -> Result<String, WalkError> {
    let keyword = declarator
        .parent()
        .map(|decl| match decl.kind() {
            "variable_declaration" => "var",
            _ => children(decl)
                .first()
                .map(|first| first.kind())
                .filter(|k| matches!(*k, "const" | "let"))
                .unwrap_or("let"),
        })
        .unwrap_or("let");

    let ty = match (
        declarator.child_by_field_name("type"),
        declarator.child_by_field_name("value"),
    ) {
        (Some(annotation), _) => annotation_text(annotation, src)?,
        (None, Some(value)) => infer_type(value, src, keyword != "const")?,
        (None, None) => "any".to_string(),
    };
    Ok(format!("({keyword} variable) {name}: {ty}"))
}

/// `(parameter) name[?]: type[ = default]`
pub(crate) fn parameter_label(
    param: Node<'_>,
    name: &str,
    src: &[u8],
) -> Result<String, WalkError> {
    let optional = param.kind() == "optional_parameter";
    let default = param.child_by_field_name("value");
    let ty = match (param.child_by_field_name("type"), default) {
        (Some(annotation), _) => annotation_text(annotation, src)?,
        (None, Some(value)) => infer_type(value, src, true)?,
        (None, None) => "any".to_string(),
    };

    let mut label = format!("(parameter) {name}{}: {ty}", if optional { "?" } else { "" });
    if let Some(value) = default {
        label.push_str(" = ");
        label.push_str(&compact_text(value, src)?);
    }
    Ok(label)
}

/// `(<modifiers> property) name[?]: type`
pub(crate) fn property_label(
    member: Node<'_>,
    name: &str,
    src: &[u8],
) -> Result<String, WalkError> {
    let modifiers = modifiers(member, src)?;
    let optional = has_child_kind(member, "?");
    let ty = match (
        member.child_by_field_name("type"),
        member.child_by_field_name("value"),
    ) {
        (Some(annotation), _) => annotation_text(annotation, src)?,
        (None, Some(value)) => infer_type(value, src, true)?,
        (None, None) => "any".to_string(),
    };

    let kind = if modifiers.is_empty() {
        "property".to_string()
    } else {
        format!("{} property", modifiers.join(" "))
    };
    Ok(format!("({kind}) {name}{}: {ty}", if optional { "?" } else { "" }))
}

/// `(function) name(params): return`
pub(crate) fn function_label(decl: Node<'_>, name: &str, src: &[u8]) -> Result<String, WalkError> {
    Ok(format!("(function) {name}{}", callable_tail(decl, src)?))
}

/// `(method) name(params): return`
pub(crate) fn method_label(member: Node<'_>, name: &str, src: &[u8]) -> Result<String, WalkError> {
    Ok(format!("(method) {name}{}", callable_tail(member, src)?))
}

/// Type of an initializer, as far as it can be read off the syntax. Literal
/// types are kept unless `widen` is set (`let`, `var`, parameters, fields).
pub(crate) fn infer_type(value: Node<'_>, src: &[u8], widen: bool) -> Result<String, WalkError> {
    let text = node_text(value, src)?;
    let ty = match value.kind() {
        "number" if widen && text.ends_with('n') => "bigint".into(),
        "number" if widen => "number".into(),
        "string" if widen => "string".into(),
        "number" | "string" => text.into(),
        "template_string" => "string".into(),
        "true" | "false" if widen => "boolean".into(),
        "null" | "undefined" if widen => "any".into(),
        "true" | "false" | "null" | "undefined" => value.kind().into(),
        "regex" => "RegExp".into(),
        "array" => array_type(value, src)?,
        "object" => object_type(value, src)?,
        "arrow_function" | "function_expression" | "function" => function_type(value, src)?,
        "new_expression" => match value.child_by_field_name("constructor") {
            Some(ctor) => {
                let mut ty = compact_text(ctor, src)?;
                if let Some(args) = value.child_by_field_name("type_arguments") {
                    ty.push_str(&compact_text(args, src)?);
                }
                ty
            }
            None => "any".into(),
        },
        "as_expression" => match named_children(value).last() {
            Some(ty) => compact_text(*ty, src)?,
            None => "any".into(),
        },
        "parenthesized_expression" | "satisfies_expression" => match first_named_child(value) {
            Some(inner) => infer_type(inner, src, widen)?,
            None => "any".into(),
        },
        "unary_expression" => match value.child_by_field_name("operator").map(|op| op.kind()) {
            Some("!") => "boolean".into(),
            Some("typeof") => "string".into(),
            Some("-") | Some("+") | Some("~") => "number".into(),
            Some("void") => "undefined".into(),
            _ => "any".into(),
        },
        "binary_expression" => match value.child_by_field_name("operator").map(|op| op.kind()) {
            Some("==" | "!=" | "===" | "!==" | "<" | ">" | "<=" | ">=" | "instanceof" | "in") => {
                "boolean".into()
            }
            Some("-" | "*" | "/" | "%" | "**" | "&" | "|" | "^" | "<<" | ">>" | ">>>") => {
                "number".into()
            }
            _ => "any".into(),
        },
        _ => "any".into(),
    };
    Ok(ty)
}

fn array_type(array: Node<'_>, src: &[u8]) -> Result<String, WalkError> {
    let mut element: Option<String> = None;
    for item in named_children(array) {
        if item.kind() == "comment" {
            continue;
        }
        let ty = infer_type(item, src, true)?;
        match &element {
            None => element = Some(ty),
            Some(existing) if *existing == ty => {}
            Some(_) => return Ok("any[]".into()),
        }
    }
    Ok(match element {
        Some(ty) if ty.contains(' ') => format!("({ty})[]"),
        Some(ty) => format!("{ty}[]"),
        None => "any[]".into(),
    })
}

fn object_type(object: Node<'_>, src: &[u8]) -> Result<String, WalkError> {
    let mut fields = Vec::new();
    for member in named_children(object) {
        match member.kind() {
            "pair" => {
                let key = match member.child_by_field_name("key") {
                    Some(key) => compact_text(key, src)?,
                    None => continue,
                };
                let ty = match member.child_by_field_name("value") {
                    Some(value) => infer_type(value, src, true)?,
                    None => "any".into(),
                };
                fields.push(format!("{key}: {ty}"));
            }
            "shorthand_property_identifier" => {
                fields.push(format!("{}: any", node_text(member, src)?));
            }
            "method_definition" => {
                if let Some(name) = member.child_by_field_name("name") {
                    let name = node_text(name, src)?;
                    fields.push(format!("{name}{}", callable_tail(member, src)?));
                }
            }
            _ => {}
        }
    }
    if fields.is_empty() {
        return Ok("{}".into());
    }
    Ok(format!("{{ {}; }}", fields.join("; ")))
}

fn function_type(function: Node<'_>, src: &[u8]) -> Result<String, WalkError> {
    let mut out = String::new();
    if let Some(tps) = function.child_by_field_name("type_parameters") {
        out.push_str(&compact_text(tps, src)?);
    }
    match (
        function.child_by_field_name("parameters"),
        function.child_by_field_name("parameter"),
    ) {
        (Some(params), _) => out.push_str(&parameter_list(params, src)?),
        (None, Some(param)) => out.push_str(&format!("({}: any)", node_text(param, src)?)),
        (None, None) => out.push_str("()"),
    }
    out.push_str(" => ");
    match function.child_by_field_name("return_type") {
        Some(ret) => out.push_str(&annotation_text(ret, src)?),
        None => out.push_str(&implicit_return(function)),
    }
    Ok(out)
}
