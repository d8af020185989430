//! Core type definitions for the live document tree
//!
//! Key design principles:
//! 1. Use u32 handles for nodes (index into the arena, not a pointer)
//! 2. Use SmallVec for child lists (most nodes have <4 children)
//! 3. Attributes keep insertion order, like a NamedNodeMap

use crate::style::StyleDeclaration;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Node handle (index into arena)
/// u32 allows 4 billion nodes, enough for any document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node type matching the DOM `nodeType` numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Comment = 8,
    Document = 9,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            3 => Some(NodeType::Text),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            _ => None,
        }
    }

    /// The fixed `nodeName` of non-element nodes
    pub fn fixed_name(self) -> Option<&'static str> {
        match self {
            NodeType::Element => None,
            NodeType::Text => Some("#text"),
            NodeType::Comment => Some("#comment"),
            NodeType::Document => Some("#document"),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Element => "Element",
            NodeType::Text => "Text",
            NodeType::Comment => "Comment",
            NodeType::Document => "Document",
        };
        f.write_str(name)
    }
}

/// A single name/value attribute pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// The main DOM tree node structure
///
/// Tree links are crate-private: every edit goes through the arena so
/// parent and child lists never disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomNode {
    pub node_id: NodeId,
    pub node_type: NodeType,

    // Navigation indices
    pub(crate) parent_id: Option<NodeId>,
    pub(crate) children_ids: SmallVec<[NodeId; 4]>,

    pub node_name: String,
    pub namespace_uri: Option<String>,
    /// Character data for text and comment nodes
    pub node_value: String,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) style: StyleDeclaration,
}

impl DomNode {
    pub(crate) fn new(node_id: NodeId, node_type: NodeType, node_name: String) -> Self {
        Self {
            node_id,
            node_type,
            parent_id: None,
            children_ids: SmallVec::new(),
            node_name,
            namespace_uri: None,
            node_value: String::new(),
            attributes: Vec::new(),
            style: StyleDeclaration::default(),
        }
    }

    /// Get tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        if self.node_type == NodeType::Element {
            Some(&self.node_name)
        } else {
            None
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    pub fn is_document(&self) -> bool {
        self.node_type == NodeType::Document
    }

    /// Element in the HTML namespace
    pub fn is_html_element(&self) -> bool {
        self.is_element() && self.namespace_uri.as_deref() == Some(HTML_NAMESPACE)
    }

    /// Text and comment nodes never hold children
    pub fn can_have_children(&self) -> bool {
        matches!(self.node_type, NodeType::Element | NodeType::Document)
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }

    pub fn children_ids(&self) -> &[NodeId] {
        &self.children_ids
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.children_ids.first().copied()
    }

    /// Raw attribute value; the `style` attribute lives in [`DomNode::style`]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn style(&self) -> &StyleDeclaration {
        &self.style
    }

    /// Whitespace-separated tokens of the `class` attribute
    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }
}
