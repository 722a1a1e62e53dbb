//! Controller discovery over one file's syntax tree.

use crate::attr::{classify, AttributeMarker, DISCOVERABLE};
use crate::decl::{NodeKind, SyntaxNode};

/// Identifiers of every controller found under `nodes`, in traversal order.
///
/// A type is found either through the `#[controller]` attribute on its
/// declaration or through a `ControllerDiscoverable` conformance. The two
/// checks are independent: a type matching both is listed twice. Children of
/// a matched node are not visited.
pub fn discover<'a, N>(nodes: impl IntoIterator<Item = &'a N>) -> Vec<String>
where
    N: SyntaxNode + 'a,
{
    let mut found = Vec::new();
    for node in nodes {
        visit(node, &mut found);
    }
    found
}

fn visit<N: SyntaxNode>(node: &N, found: &mut Vec<String>) {
    let mut matched = false;

    if is_type_like(node.kind()) && has_controller_marker(node) {
        if let Some(ident) = node.identifier() {
            tracing::trace!(controller = %ident, "found #[controller]");
            found.push(ident);
            matched = true;
        }
    }

    if node.conformances().iter().any(|name| name == DISCOVERABLE) {
        if let Some(ident) = node.identifier() {
            tracing::trace!(controller = %ident, "found discoverable conformance");
            found.push(ident);
            matched = true;
        }
    }

    if !matched {
        for child in node.children() {
            visit(child, found);
        }
    }
}

fn is_type_like(kind: NodeKind) -> bool {
    matches!(kind, NodeKind::Struct | NodeKind::Enum | NodeKind::Impl)
}

fn has_controller_marker<N: SyntaxNode>(node: &N) -> bool {
    node.attributes()
        .iter()
        .any(|attr| classify(&attr.name) == Some(AttributeMarker::Controller))
}
