//! Tree queries: path-pattern matching and node-path classification.
//!
//! Patterns are sequences of literal keys, array indices, and the `Any`
//! wildcard. A literal key only descends through object properties with that
//! key; an index only through the array element at that position (negative or
//! out-of-range indices match nothing); `Any` fans out over array elements or
//! object property values. A pattern that does not fit the tree shape is zero
//! matches, never an error. Traversal is a pre-order walk, so results come
//! back in document order.

use super::tree::{JsonTree, NodeId, NodeKind};
use std::ops::ControlFlow;

/// One segment of a borrowed path pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal object key.
    Key(&'a str),
    /// Literal array index. Negative values match nothing.
    Index(i64),
    /// Wildcard over array elements or object property values.
    Any,
}

/// One segment of a concrete node path (no wildcards, no negatives).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedSegment {
    Key(String),
    Index(usize),
}

/// All nodes matching `pattern` starting from `root`, in document order.
pub fn find_all(tree: &JsonTree, root: NodeId, pattern: &[Segment<'_>]) -> Vec<NodeId> {
    find_all_where(tree, root, pattern, |_| true)
}

/// Like [`find_all`], but starting from several roots. An empty root set is
/// an empty result.
pub fn find_all_from(tree: &JsonTree, roots: &[NodeId], pattern: &[Segment<'_>]) -> Vec<NodeId> {
    let mut matches = Vec::new();
    for root in roots {
        let _ = walk(tree, *root, pattern, &mut |node| {
            matches.push(node);
            ControlFlow::Continue(())
        });
    }
    matches
}

/// Like [`find_all`], but a predicate may reject individual candidates
/// without aborting the traversal.
pub fn find_all_where(
    tree: &JsonTree,
    root: NodeId,
    pattern: &[Segment<'_>],
    mut accept: impl FnMut(NodeId) -> bool,
) -> Vec<NodeId> {
    let mut matches = Vec::new();
    let _ = walk(tree, root, pattern, &mut |node| {
        if accept(node) {
            matches.push(node);
        }
        ControlFlow::Continue(())
    });
    matches
}

/// First structural match for `pattern`, if any.
pub fn find_first(tree: &JsonTree, root: NodeId, pattern: &[Segment<'_>]) -> Option<NodeId> {
    find_first_where(tree, root, pattern, |_| true)
}

/// First match accepted by the predicate; traversal stops as soon as one is
/// found.
pub fn find_first_where(
    tree: &JsonTree,
    root: NodeId,
    pattern: &[Segment<'_>],
    mut accept: impl FnMut(NodeId) -> bool,
) -> Option<NodeId> {
    match walk(tree, root, pattern, &mut |node| {
        if accept(node) {
            ControlFlow::Break(node)
        } else {
            ControlFlow::Continue(())
        }
    }) {
        ControlFlow::Break(node) => Some(node),
        ControlFlow::Continue(()) => None,
    }
}

fn walk(
    tree: &JsonTree,
    node: NodeId,
    pattern: &[Segment<'_>],
    visit: &mut impl FnMut(NodeId) -> ControlFlow<NodeId>,
) -> ControlFlow<NodeId> {
    let Some((segment, rest)) = pattern.split_first() else {
        return visit(node);
    };
    match (segment, &tree.node(node).kind) {
        (Segment::Key(key), NodeKind::Object { properties }) => {
            for prop in properties {
                if tree.property_key(*prop) == Some(*key) {
                    if let Some(value) = tree.property_value(*prop) {
                        walk(tree, value, rest, visit)?;
                    }
                }
            }
        }
        (Segment::Index(index), NodeKind::Array { elements }) => {
            if *index >= 0 {
                if let Some(element) = elements.get(*index as usize) {
                    walk(tree, *element, rest, visit)?;
                }
            }
        }
        (Segment::Any, NodeKind::Array { elements }) => {
            for element in elements {
                walk(tree, *element, rest, visit)?;
            }
        }
        (Segment::Any, NodeKind::Object { properties }) => {
            for prop in properties {
                if let Some(value) = tree.property_value(*prop) {
                    walk(tree, value, rest, visit)?;
                }
            }
        }
        _ => {}
    }
    ControlFlow::Continue(())
}

/// The property node reached by following `keys` through nested objects.
///
/// Unlike [`find_all`], which lands on property *values*, this returns the
/// property node itself, which is what field-level diagnostics attach to.
pub fn property_at(tree: &JsonTree, root: NodeId, keys: &[&str]) -> Option<NodeId> {
    let (last, prefix) = keys.split_last()?;
    let mut current = root;
    for key in prefix {
        current = tree.object_get(current, key)?;
    }
    tree.object_property(current, last)
}

/// The concrete path of a node from the tree root.
///
/// Property nodes classify by their key, so a property and its value map to
/// the same path.
pub fn path_of(tree: &JsonTree, node: NodeId) -> Vec<OwnedSegment> {
    let mut segments = Vec::new();
    let mut current = node;
    while let Some(parent) = tree.parent(current) {
        match &tree.node(parent).kind {
            NodeKind::Object { .. } => {
                if let Some(key) = tree.property_key(current) {
                    segments.push(OwnedSegment::Key(key.to_string()));
                }
            }
            NodeKind::Array { elements } => {
                if let Some(pos) = elements.iter().position(|e| *e == current) {
                    segments.push(OwnedSegment::Index(pos));
                }
            }
            NodeKind::Property { .. } => {}
            _ => {}
        }
        current = parent;
    }
    segments.reverse();
    segments
}

/// Render a concrete path as a dotted/bracketed expression.
///
/// Identifier-like keys are dotted (`a.b`), anything else is bracket-quoted
/// (`a["x y"]`), and indices are bracketed unquoted (`a[0]`).
pub fn path_to_display_string(path: &[OwnedSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            OwnedSegment::Key(key) => {
                if crate::util::is_valid_identifier(key) {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                } else {
                    out.push_str(&format!("[\"{}\"]", key.replace('"', "\\\"")));
                }
            }
            OwnedSegment::Index(index) => {
                out.push_str(&format!("[{index}]"));
            }
        }
    }
    out
}
