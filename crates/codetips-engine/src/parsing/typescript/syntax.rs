//! Small helpers over `tree_sitter::Node` shared by the walk, the signature
//! builder and the checker.

use tree_sitter::Node;

use super::WalkError;

pub(crate) fn node_text<'t>(node: Node<'_>, src: &'t [u8]) -> Result<&'t str, WalkError> {
    Ok(node.utf8_text(src)?)
}

/// Collapses every whitespace run to a single space.
pub(crate) fn compact(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn compact_text(node: Node<'_>, src: &[u8]) -> Result<String, WalkError> {
    Ok(compact(node_text(node, src)?))
}

pub(crate) fn first_named_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let first = node.named_children(&mut cursor).next();
    first
}

pub(crate) fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let nodes = node.named_children(&mut cursor).collect();
    nodes
}

pub(crate) fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let nodes = node.children(&mut cursor).collect();
    nodes
}

/// True when `node` sits in `field` of `parent`.
pub(crate) fn is_field(parent: Node<'_>, field: &str, node: Node<'_>) -> bool {
    parent.child_by_field_name(field) == Some(node)
}

pub(crate) fn has_child_kind(node: Node<'_>, kind: &str) -> bool {
    children(node).iter().any(|c| c.kind() == kind)
}

/// The type written after `:` in a `type_annotation`.
pub(crate) fn annotation_text(annotation: Node<'_>, src: &[u8]) -> Result<String, WalkError> {
    match first_named_child(annotation) {
        Some(ty) => compact_text(ty, src),
        None => Ok(compact(node_text(annotation, src)?.trim_start_matches(':'))),
    }
}

/// Modifier keywords written before a member or parameter name, in source
/// order.
pub(crate) fn modifiers(node: Node<'_>, src: &[u8]) -> Result<Vec<String>, WalkError> {
    let mut out = Vec::new();
    for child in children(node) {
        match child.kind() {
            "accessibility_modifier" | "override_modifier" => out.push(compact_text(child, src)?),
            "static" | "readonly" | "declare" | "abstract" | "async" | "get" | "set" => {
                if !child.is_named() {
                    out.push(child.kind().to_string());
                }
            }
            _ => {}
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_collapses_whitespace() {
        assert_eq!(compact("(a: number,\n    b: string)"), "(a: number, b: string)");
        assert_eq!(compact("  T  "), "T");
    }
}
