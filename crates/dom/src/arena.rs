//! Arena-based document storage
//!
//! Every node of one document lives in a single `Vec<DomNode>` and is
//! referenced by a 4-byte [`NodeId`]. Index 0 is always the document node.
//! Nodes are never freed: a removed node stays in the arena, detached, and
//! can be inserted again.
//!
//! ## Memory Layout
//!
//! ```text
//! Arena: Vec<DomNode>
//!        [#document][html][head][body]...
//!         ↑ 4-byte index, not 8-byte pointer
//! ```

use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId, NodeType, HTML_NAMESPACE};
use crate::utils;
use tracing::trace;

/// Configuration for a document arena
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    /// Pre-allocated node slots
    pub initial_capacity: usize,
    /// HTML document semantics: `create_element` lowercases names into the
    /// HTML namespace, and tag/attribute lookups on HTML elements are
    /// ASCII case-insensitive
    pub html: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 1024, // Pre-allocate for typical page
            html: true,
        }
    }
}

/// One live document: the document node plus every node ever created for it
#[derive(Debug, Clone)]
pub struct DomArena {
    nodes: Vec<DomNode>,
    config: ArenaConfig,
}

impl DomArena {
    /// Create an empty HTML document
    pub fn new() -> Self {
        Self::with_config(ArenaConfig::default())
    }

    pub fn with_config(config: ArenaConfig) -> Self {
        let mut nodes = Vec::with_capacity(config.initial_capacity.max(1));
        let name = NodeType::Document.fixed_name().unwrap_or_default();
        nodes.push(DomNode::new(NodeId(0), NodeType::Document, name.to_string()));
        Self { nodes, config }
    }

    /// HTML document with `<html>`, `<head>` and `<body>` scaffolding
    pub fn html_document() -> Result<Self> {
        let mut arena = Self::new();
        let html = arena.create_element("html")?;
        let head = arena.create_element("head")?;
        let body = arena.create_element("body")?;
        arena.append_child(arena.root_id(), html)?;
        arena.append_child(html, head)?;
        arena.append_child(html, body)?;
        Ok(arena)
    }

    pub fn is_html(&self) -> bool {
        self.config.html
    }

    fn add_node(&mut self, mut node: DomNode) -> NodeId {
        let node_id = NodeId(self.nodes.len() as u32);
        node.node_id = node_id;
        self.nodes.push(node);
        node_id
    }

    /// `document.createElement`: HTML namespace, lowercased name in HTML documents
    pub fn create_element(&mut self, tag: &str) -> Result<NodeId> {
        if self.config.html {
            let tag = tag.to_ascii_lowercase();
            self.create_element_ns(Some(HTML_NAMESPACE), &tag)
        } else {
            self.create_element_ns(None, tag)
        }
    }

    /// `document.createElementNS`: the name is kept verbatim
    pub fn create_element_ns(&mut self, namespace: Option<&str>, qualified_name: &str) -> Result<NodeId> {
        if !utils::is_valid_name(qualified_name) {
            return Err(DomError::InvalidCharacter(qualified_name.to_string()));
        }

        let mut node = DomNode::new(NodeId(0), NodeType::Element, qualified_name.to_string());
        node.namespace_uri = namespace.filter(|ns| !ns.is_empty()).map(String::from);

        let node_id = self.add_node(node);
        trace!(node = %node_id, name = qualified_name, ?namespace, "created element");
        Ok(node_id)
    }

    pub fn create_text_node(&mut self, data: &str) -> NodeId {
        self.create_character_data(NodeType::Text, data)
    }

    pub fn create_comment(&mut self, data: &str) -> NodeId {
        self.create_character_data(NodeType::Comment, data)
    }

    fn create_character_data(&mut self, node_type: NodeType, data: &str) -> NodeId {
        let name = node_type.fixed_name().unwrap_or_default();
        let mut node = DomNode::new(NodeId(0), node_type, name.to_string());
        node.node_value = data.to_string();
        self.add_node(node)
    }

    /// Get node by ID (immutable)
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id.index())
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable)
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id.index())
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID, requiring an element
    pub fn element(&self, node_id: NodeId) -> Result<&DomNode> {
        let node = self.get(node_id)?;
        if node.is_element() {
            Ok(node)
        } else {
            Err(DomError::InvalidNodeType {
                expected: NodeType::Element.to_string(),
                actual: node.node_type.to_string(),
            })
        }
    }

    pub(crate) fn element_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        let node = self.get_mut(node_id)?;
        if node.is_element() {
            Ok(node)
        } else {
            Err(DomError::InvalidNodeType {
                expected: NodeType::Element.to_string(),
                actual: node.node_type.to_string(),
            })
        }
    }

    /// Whether the handle belongs to this document
    pub fn contains(&self, node_id: NodeId) -> bool {
        node_id.index() < self.nodes.len()
    }

    /// The document node
    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> &DomNode {
        &self.nodes[0]
    }

    /// The document's element child (`<html>`), if any
    pub fn document_element(&self) -> Option<NodeId> {
        self.root()
            .children_ids
            .iter()
            .copied()
            .find(|&id| self.nodes[id.index()].is_element())
    }

    /// The `<body>` child of the document element, if any
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.nodes[html.index()]
            .children_ids
            .iter()
            .copied()
            .find(|&id| {
                let node = &self.nodes[id.index()];
                node.is_html_element() && node.node_name == "body"
            })
    }

    /// Total number of nodes, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if arena holds nothing but the document node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Children of a node
    pub fn children(&self, node_id: NodeId) -> Result<&[NodeId]> {
        Ok(self.get(node_id)?.children_ids())
    }

    /// Parent of a node
    pub fn parent(&self, node_id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.get(node_id)?.parent_id)
    }

    /// Traverse tree depth-first (iterative, no recursion)
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(&DomNode) -> Result<()>,
    {
        let mut stack = vec![start_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            visit(node)?;

            // Push children in reverse order (so they're visited left-to-right)
            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }

        Ok(())
    }

    /// All descendants of `start_id` in tree order, `start_id` excluded
    pub fn descendants(&self, start_id: NodeId) -> Result<Vec<NodeId>> {
        self.find(start_id, |_| true)
    }

    /// Descendants of `start_id` matching predicate, in tree order
    pub fn find<F>(&self, start_id: NodeId, mut predicate: F) -> Result<Vec<NodeId>>
    where
        F: FnMut(&DomNode) -> bool,
    {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.get(start_id)?.children_ids.iter().rev().copied().collect();

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            if predicate(node) {
                found.push(node_id);
            }
            stack.extend(node.children_ids.iter().rev().copied());
        }

        Ok(found)
    }

    /// First descendant of `start_id` matching predicate, in tree order
    pub fn find_one<F>(&self, start_id: NodeId, mut predicate: F) -> Result<Option<NodeId>>
    where
        F: FnMut(&DomNode) -> bool,
    {
        let mut stack: Vec<NodeId> = self.get(start_id)?.children_ids.iter().rev().copied().collect();

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            if predicate(node) {
                return Ok(Some(node_id));
            }
            stack.extend(node.children_ids.iter().rev().copied());
        }

        Ok(None)
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id.index()).and_then(|n| n.parent_id);
        }
        false
    }

    /// Whether the node is attached under the document node
    pub fn is_connected(&self, node_id: NodeId) -> bool {
        self.contains(node_id) && self.is_inclusive_ancestor(self.root_id(), node_id)
    }

    /// Concatenated text of the subtree
    pub fn text_content(&self, node_id: NodeId) -> Result<String> {
        utils::get_text_content(self, node_id)
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}
