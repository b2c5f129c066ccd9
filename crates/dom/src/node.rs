// ABOUTME: Arena-backed document tree with element and text node variants.
// ABOUTME: Provides Document storage, NodeId handles, and the Node accessor API.

use crate::error::TreeError;
use crate::serialize;

/// Stable handle to a node inside a [`Document`].
///
/// Ids are plain indices into the document's arena; they stay valid for the
/// life of the document and are meaningless in any other document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// The two node shapes. Text nodes carry no attribute map and no child list,
/// so "text nodes never have children or attributes" holds by construction.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NodeKind {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<NodeId>,
        text: Option<String>,
    },
    Text {
        content: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NodeData {
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
}

/// An XML document tree.
///
/// The document exclusively owns every node; parent links are bare indices
/// and never extend a node's lifetime. Dropping the document releases the
/// whole tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: Option<NodeId>,
}

impl Document {
    /// Creates an empty document with no nodes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new detached element node and returns its id.
    ///
    /// Duplicate attribute names collapse to the last value given.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty, or if any attribute name is empty.
    pub fn new_element(
        &mut self,
        name: impl Into<String>,
        attributes: Vec<(String, String)>,
    ) -> NodeId {
        let name = name.into();
        assert!(!name.is_empty(), "element name must be non-empty");

        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            parent: None,
            kind: NodeKind::Element {
                name,
                attributes: Vec::new(),
                children: Vec::new(),
                text: None,
            },
        });
        for (key, value) in attributes {
            self.set_attr(id, key, value);
        }
        id
    }

    /// Creates a new detached text node and returns its id.
    pub fn new_text(&mut self, content: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            parent: None,
            kind: NodeKind::Text {
                content: content.into(),
            },
        });
        id
    }

    /// Appends `child` to `parent`'s children and sets the child's parent link.
    ///
    /// Fails without touching the tree when the parent is a text node, when
    /// the child is already attached somewhere, or when the attachment would
    /// place a node inside its own subtree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if self.nodes[child.0].parent.is_some() {
            return Err(TreeError::Attached);
        }
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(TreeError::Cycle);
            }
            cursor = self.nodes[id.0].parent;
        }
        match &mut self.nodes[parent.0].kind {
            NodeKind::Element { children, .. } => children.push(child),
            NodeKind::Text { .. } => return Err(TreeError::TextChild),
        }
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Sets or replaces an attribute on an element node.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or if `id` refers to a text node.
    pub fn set_attr(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        assert!(!name.is_empty(), "attribute name must be non-empty");
        match &mut self.nodes[id.0].kind {
            NodeKind::Element { attributes, .. } => {
                let value = value.into();
                match attributes.iter_mut().find(|(key, _)| *key == name) {
                    Some(slot) => slot.1 = value,
                    None => attributes.push((name, value)),
                }
            }
            NodeKind::Text { .. } => panic!("cannot set an attribute on a text node"),
        }
    }

    /// Sets a node's own text. Replaces the content of a text node.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element { text: own, .. } => *own = Some(text.into()),
            NodeKind::Text { content } => *content = text.into(),
        }
    }

    /// Marks `id` as the document root.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// The document root, if one has been established.
    pub fn root(&self) -> Option<Node<'_>> {
        self.root.map(|id| self.node(id))
    }

    /// Returns a read handle for the node with the given id.
    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node { doc: self, id }
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// Read handle to a single node, borrowed from its [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> Node<'a> {
    /// This node's id within its document.
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn data(&self) -> &'a NodeData {
        self.doc.data(self.id)
    }

    /// True for text nodes.
    pub fn is_text(&self) -> bool {
        matches!(self.data().kind, NodeKind::Text { .. })
    }

    /// The element name. Text nodes have none.
    pub fn name(&self) -> Option<&'a str> {
        match &self.data().kind {
            NodeKind::Element { name, .. } => Some(name),
            NodeKind::Text { .. } => None,
        }
    }

    /// The node's own text: accumulated character data for elements,
    /// the content itself for text nodes.
    pub fn text(&self) -> Option<&'a str> {
        match &self.data().kind {
            NodeKind::Element { text, .. } => text.as_deref(),
            NodeKind::Text { content } => Some(content),
        }
    }

    /// The enclosing node, or None for the root and detached nodes.
    pub fn parent(&self) -> Option<Node<'a>> {
        self.data().parent.map(|id| self.doc.node(id))
    }

    /// The attribute value for `name`, or None if it is not set.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        match &self.data().kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            NodeKind::Text { .. } => None,
        }
    }

    /// Interprets an attribute as a decimal number.
    ///
    /// A missing attribute and a value that does not parse both degrade to
    /// None; the two cases are deliberately indistinguishable.
    pub fn num_attr(&self, name: &str) -> Option<f64> {
        self.attr(name)?.trim().parse().ok()
    }

    /// Interprets an attribute as a bool.
    ///
    /// Returns false if the attribute is missing, empty, or reads "null",
    /// "0", "false" or "no" in any case; true for every other value.
    pub fn bool_attr(&self, name: &str) -> bool {
        match self.attr(name) {
            None | Some("") => false,
            Some(value) => !matches!(
                value.to_ascii_lowercase().as_str(),
                "null" | "0" | "false" | "no"
            ),
        }
    }

    /// Interprets the node's own text as a bool.
    ///
    /// Any form of "true", "yes" and "1" is true, everything else false.
    pub fn bool_value(&self) -> bool {
        match self.text() {
            Some(text) => {
                let trimmed = text.trim();
                trimmed.eq_ignore_ascii_case("true")
                    || trimmed.eq_ignore_ascii_case("yes")
                    || trimmed == "1"
            }
            None => false,
        }
    }

    /// The attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        let attributes: &[(String, String)] = match &self.data().kind {
            NodeKind::Element { attributes, .. } => attributes,
            NodeKind::Text { .. } => &[],
        };
        attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// The direct children in document order. Empty for text nodes.
    pub fn children(&self) -> impl Iterator<Item = Node<'a>> {
        let children: &[NodeId] = match &self.data().kind {
            NodeKind::Element { children, .. } => children,
            NodeKind::Text { .. } => &[],
        };
        let doc = self.doc;
        children.iter().map(move |id| doc.node(*id))
    }

    /// The first child node, or None.
    pub fn first_child(&self) -> Option<Node<'a>> {
        self.children().next()
    }

    /// The first direct child with the given name. No deep searching.
    pub fn child_named(&self, name: &str) -> Option<Node<'a>> {
        self.children().find(|child| child.name() == Some(name))
    }

    /// All direct children with the given name, in document order.
    /// Yields nothing when none match; no deep searching.
    pub fn children_named(&self, name: &'a str) -> impl Iterator<Item = Node<'a>> {
        self.children()
            .filter(move |child| child.name() == Some(name))
    }

    /// Serializes this node and its subtree to compact XML.
    pub fn xml(&self) -> String {
        serialize::node_xml(self.doc, self.id)
    }

    /// Serializes only this node's content, without its own tag.
    pub fn child_xml(&self) -> String {
        serialize::content_xml(self.doc, self.id)
    }

    /// Serializes this node and its subtree with per-depth indentation.
    pub fn pretty_xml(&self) -> String {
        serialize::pretty_xml(self.doc, self.id)
    }
}
