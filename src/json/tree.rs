//! Arena-backed JSONC syntax tree.
//!
//! Nodes live in a flat arena owned by [`JsonTree`]; children are stored as
//! owned node ids and parents as plain back-indices, so ownership flows in
//! one direction only. Every node carries its byte offset and length in the
//! source text.

/// Index of a node inside a [`JsonTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The kind of a tree node, with per-kind payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// An object; payload is the property nodes in document order.
    Object { properties: Vec<NodeId> },
    /// An array; payload is the element nodes in document order.
    Array { elements: Vec<NodeId> },
    /// A `"key": value` pair. The value is absent in partial trees.
    Property { key: NodeId, value: Option<NodeId> },
    /// A string literal, with its decoded value.
    String { value: String },
    /// A number literal.
    Number { value: f64 },
    /// A boolean literal.
    Bool { value: bool },
    /// The `null` literal.
    Null,
}

/// One node of the parse tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Byte offset of the node in the source text.
    pub offset: usize,
    /// Byte length of the node in the source text.
    pub len: usize,
    /// Upward link; `None` only for the root.
    pub parent: Option<NodeId>,
}

impl Node {
    /// End byte offset (exclusive).
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// A parsed JSONC document tree.
#[derive(Debug, Clone)]
pub struct JsonTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl JsonTree {
    pub(crate) fn new(nodes: Vec<Node>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    /// The root value node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Parent of a node, `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Decoded string value, if the node is a string.
    pub fn string_value(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::String { value } => Some(value),
            _ => None,
        }
    }

    /// Numeric value, if the node is a number.
    pub fn number_value(&self, id: NodeId) -> Option<f64> {
        match self.node(id).kind {
            NodeKind::Number { value } => Some(value),
            _ => None,
        }
    }

    /// Boolean value, if the node is a boolean.
    pub fn bool_value(&self, id: NodeId) -> Option<bool> {
        match self.node(id).kind {
            NodeKind::Bool { value } => Some(value),
            _ => None,
        }
    }

    /// Property nodes of an object, or an empty slice for any other kind.
    pub fn properties(&self, id: NodeId) -> &[NodeId] {
        match &self.node(id).kind {
            NodeKind::Object { properties } => properties,
            _ => &[],
        }
    }

    /// Element nodes of an array, or an empty slice for any other kind.
    pub fn elements(&self, id: NodeId) -> &[NodeId] {
        match &self.node(id).kind {
            NodeKind::Array { elements } => elements,
            _ => &[],
        }
    }

    /// Key text of a property node.
    pub fn property_key(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Property { key, .. } => self.string_value(*key),
            _ => None,
        }
    }

    /// Key node of a property node.
    pub fn property_key_node(&self, id: NodeId) -> Option<NodeId> {
        match &self.node(id).kind {
            NodeKind::Property { key, .. } => Some(*key),
            _ => None,
        }
    }

    /// Value node of a property node.
    pub fn property_value(&self, id: NodeId) -> Option<NodeId> {
        match &self.node(id).kind {
            NodeKind::Property { value, .. } => *value,
            _ => None,
        }
    }

    /// The property node of an object with the given key.
    pub fn object_property(&self, id: NodeId, key: &str) -> Option<NodeId> {
        self.properties(id)
            .iter()
            .copied()
            .find(|p| self.property_key(*p) == Some(key))
    }

    /// The value node of an object's property with the given key.
    pub fn object_get(&self, id: NodeId, key: &str) -> Option<NodeId> {
        self.object_property(id, key)
            .and_then(|p| self.property_value(p))
    }

    /// Whether the node is an object.
    pub fn is_object(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Object { .. })
    }

    /// Whether the node is an array.
    pub fn is_array(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Array { .. })
    }

    /// Whether the node is a string.
    pub fn is_string(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::String { .. })
    }

    /// Whether the node is a property.
    pub fn is_property(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Property { .. })
    }
}

#[cfg(test)]
mod tests {
    use crate::json::parse;

    #[test]
    fn object_lookup_by_key() {
        let tree = parse(r#"{"a": 1, "b": "two"}"#).unwrap();
        let root = tree.root();

        assert!(tree.is_object(root));
        assert_eq!(tree.properties(root).len(), 2);

        let a = tree.object_get(root, "a").unwrap();
        assert_eq!(tree.number_value(a), Some(1.0));

        let b = tree.object_get(root, "b").unwrap();
        assert_eq!(tree.string_value(b), Some("two"));

        assert!(tree.object_get(root, "c").is_none());
    }

    #[test]
    fn parent_links_point_upward() {
        let tree = parse(r#"{"a": [true]}"#).unwrap();
        let root = tree.root();
        let arr = tree.object_get(root, "a").unwrap();
        let elem = tree.elements(arr)[0];

        assert_eq!(tree.parent(elem), Some(arr));
        let prop = tree.parent(arr).unwrap();
        assert!(tree.is_property(prop));
        assert_eq!(tree.parent(prop), Some(root));
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn node_spans_cover_source() {
        let src = r#"{"key": "value"}"#;
        let tree = parse(src).unwrap();
        let root = tree.root();

        assert_eq!(tree.node(root).offset, 0);
        assert_eq!(tree.node(root).len, src.len());

        let value = tree.object_get(root, "key").unwrap();
        let node = tree.node(value);
        assert_eq!(&src[node.offset..node.end()], "\"value\"");
    }
}
