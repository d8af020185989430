//! Snapshot loader - builds a live document from JSON
//!
//! Reads the format written by [`DomSerializer::snapshot`](crate::serializer::DomSerializer::snapshot):
//!
//! ```json
//! {
//!   "root": {
//!     "nodeType": 9,
//!     "nodeName": "#document",
//!     "children": [
//!       { "nodeType": 1, "nodeName": "html", "attributes": ["lang", "en"], "children": [] }
//!     ]
//!   }
//! }
//! ```
//!
//! An element without a `namespaceURI` key is created like
//! `document.createElement`; an explicit `null` means no namespace.

use crate::arena::{ArenaConfig, DomArena};
use crate::error::{DomError, Result};
use crate::types::{NodeId, NodeType};
use serde_json::Value;
use tracing::debug;

impl DomArena {
    /// Build a document from a `{"root": ...}` snapshot
    pub fn from_snapshot(snapshot: &Value) -> Result<Self> {
        Self::from_snapshot_with_config(snapshot, ArenaConfig::default())
    }

    pub fn from_snapshot_with_config(snapshot: &Value, config: ArenaConfig) -> Result<Self> {
        let root = snapshot
            .get("root")
            .ok_or_else(|| DomError::SnapshotError("Missing 'root' in snapshot".to_string()))?;

        let node_type = parse_node_type(root)?;
        if node_type != NodeType::Document {
            return Err(DomError::InvalidNodeType {
                expected: NodeType::Document.to_string(),
                actual: node_type.to_string(),
            });
        }

        let mut arena = Self::with_config(config);
        let document = arena.root_id();
        arena.load_children(root, document)?;

        debug!(nodes = arena.len(), "loaded document snapshot");
        Ok(arena)
    }

    /// Parse a JSON string snapshot
    pub fn from_snapshot_str(snapshot: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(snapshot)?;
        Self::from_snapshot(&value)
    }

    /// Build a detached subtree from a node snapshot, returning its root
    pub fn load_fragment(&mut self, node: &Value) -> Result<NodeId> {
        self.parse_node(node)
    }

    /// Parse a snapshot node and its subtree (iterative, no recursion)
    fn parse_node(&mut self, node: &Value) -> Result<NodeId> {
        let root = self.create_from_snapshot(node)?;
        self.load_children(node, root)?;
        Ok(root)
    }

    /// Load every descendant of `node` under `parent`, in document order
    fn load_children(&mut self, node: &Value, parent: NodeId) -> Result<()> {
        let mut stack: Vec<(&Value, NodeId)> = Vec::new();
        push_children(&mut stack, node, parent);

        while let Some((child, parent)) = stack.pop() {
            let child_id = self.create_from_snapshot(child)?;
            self.append_child(parent, child_id)?;
            push_children(&mut stack, child, child_id);
        }
        Ok(())
    }

    /// Create one detached node (attributes included, children not)
    fn create_from_snapshot(&mut self, node: &Value) -> Result<NodeId> {
        let node_type = parse_node_type(node)?;
        let node_value = node["nodeValue"].as_str().unwrap_or("");

        let node_id = match node_type {
            NodeType::Text => return Ok(self.create_text_node(node_value)),
            NodeType::Comment => return Ok(self.create_comment(node_value)),
            NodeType::Document => {
                return Err(DomError::SnapshotError(
                    "Nested document node in snapshot".to_string(),
                ))
            }
            NodeType::Element => {
                let name = node["nodeName"]
                    .as_str()
                    .ok_or_else(|| DomError::SnapshotError("Missing nodeName".to_string()))?;
                match node.get("namespaceURI") {
                    None => self.create_element(name)?,
                    Some(ns) => self.create_element_ns(ns.as_str(), name)?,
                }
            }
        };

        // Parse attributes (flat name/value list)
        if let Some(attrs) = node["attributes"].as_array() {
            for pair in attrs.chunks(2) {
                if let [name, value] = pair {
                    if let (Some(name), Some(value)) = (name.as_str(), value.as_str()) {
                        self.set_attribute(node_id, name, value)?;
                    }
                }
            }
        }

        Ok(node_id)
    }
}

/// Queue the children of `node` so they pop in document order
fn push_children<'a>(stack: &mut Vec<(&'a Value, NodeId)>, node: &'a Value, parent: NodeId) {
    if let Some(children) = node["children"].as_array() {
        stack.extend(children.iter().rev().map(|child| (child, parent)));
    }
}

fn parse_node_type(node: &Value) -> Result<NodeType> {
    let node_type_val = node["nodeType"]
        .as_u64()
        .ok_or_else(|| DomError::SnapshotError("Missing nodeType".to_string()))?;

    u8::try_from(node_type_val)
        .ok()
        .and_then(NodeType::from_u8)
        .ok_or_else(|| DomError::InvalidNodeType {
            expected: "Element, Text, Comment or Document".to_string(),
            actual: node_type_val.to_string(),
        })
}
