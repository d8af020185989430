//! DOM Serializer - markup and JSON snapshots of a subtree
//!
//! This module handles:
//! - `outer_html` / `inner_html` markup, compact or indented
//! - JSON snapshots in the format the loader reads back

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::*;
use serde_json::{json, Value};

/// Elements that never get a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    /// Spaces per nesting level; `None` writes compact markup
    pub indent: Option<usize>,
    /// Emit the `style` attribute
    pub include_style: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            indent: None,
            include_style: true,
        }
    }
}

/// DOM Tree Serializer
pub struct DomSerializer {
    config: SerializerConfig,
}

impl DomSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// Markup of the node itself and its subtree
    pub fn outer_html(&self, arena: &DomArena, node_id: NodeId) -> Result<String> {
        let mut output = String::with_capacity(256);
        self.serialize_node(arena, node_id, 0, &mut output)?;
        Ok(output)
    }

    /// Markup of the node's children only
    pub fn inner_html(&self, arena: &DomArena, node_id: NodeId) -> Result<String> {
        let mut output = String::with_capacity(256);
        for &child_id in arena.children(node_id)? {
            self.serialize_node(arena, child_id, 0, &mut output)?;
        }
        Ok(output)
    }

    /// Serialize a node and its subtree (iterative, no recursion)
    fn serialize_node(
        &self,
        arena: &DomArena,
        node_id: NodeId,
        depth: usize,
        output: &mut String,
    ) -> Result<()> {
        let newline = if self.config.indent.is_some() { "\n" } else { "" };
        let mut stack = vec![Step::Open(node_id, depth)];

        while let Some(step) = stack.pop() {
            let (node_id, depth) = match step {
                Step::Open(id, depth) => (id, depth),
                Step::Close(id, depth) => {
                    // Closing tag
                    let node = arena.get(id)?;
                    output.push_str(&self.indent(depth));
                    output.push_str("</");
                    output.push_str(&node.node_name);
                    output.push('>');
                    output.push_str(newline);
                    continue;
                }
            };
            let node = arena.get(node_id)?;
            let indent = self.indent(depth);

            match node.node_type {
                NodeType::Element => {
                    // Format: <tag id="123" class="foo">
                    output.push_str(&indent);
                    output.push('<');
                    output.push_str(&node.node_name);

                    for attr in node.attributes() {
                        output.push_str(&format!(" {}=\"{}\"", attr.name, escape_attribute(&attr.value)));
                    }
                    if self.config.include_style && node.style().is_present() {
                        output.push_str(&format!(
                            " style=\"{}\"",
                            escape_attribute(&node.style().css_text())
                        ));
                    }

                    output.push('>');
                    output.push_str(newline);

                    if node.is_html_element() && VOID_ELEMENTS.contains(&node.node_name.as_str()) {
                        continue;
                    }

                    stack.push(Step::Close(node_id, depth));
                    for &child_id in node.children_ids().iter().rev() {
                        stack.push(Step::Open(child_id, depth + 1));
                    }
                }
                NodeType::Text => {
                    let text = if self.config.indent.is_some() {
                        node.node_value.trim()
                    } else {
                        node.node_value.as_str()
                    };
                    if !text.is_empty() {
                        output.push_str(&indent);
                        output.push_str(&escape_text(text));
                        output.push_str(newline);
                    }
                }
                NodeType::Comment => {
                    output.push_str(&indent);
                    output.push_str("<!--");
                    output.push_str(&node.node_value);
                    output.push_str("-->");
                    output.push_str(newline);
                }
                NodeType::Document => {
                    // For document nodes, just serialize children
                    for &child_id in node.children_ids().iter().rev() {
                        stack.push(Step::Open(child_id, depth));
                    }
                }
            }
        }

        Ok(())
    }

    fn indent(&self, depth: usize) -> String {
        self.config
            .indent
            .map(|width| " ".repeat(width * depth))
            .unwrap_or_default()
    }

    /// JSON snapshot of a subtree
    ///
    /// ```json
    /// { "nodeType": 1, "nodeName": "div", "namespaceURI": "...",
    ///   "nodeValue": "", "attributes": ["id", "main"], "children": [] }
    /// ```
    ///
    /// Built bottom-up with an explicit stack: a node is emitted once all of
    /// its children sit on top of `built`, in order.
    pub fn snapshot(&self, arena: &DomArena, node_id: NodeId) -> Result<Value> {
        let mut stack = vec![Step::Open(node_id, 0)];
        let mut built: Vec<Value> = Vec::new();

        while let Some(step) = stack.pop() {
            match step {
                Step::Open(id, depth) => {
                    stack.push(Step::Close(id, depth));
                    for &child_id in arena.get(id)?.children_ids().iter().rev() {
                        stack.push(Step::Open(child_id, depth + 1));
                    }
                }
                Step::Close(id, _) => {
                    let node = arena.get(id)?;
                    let children = built.split_off(built.len() - node.children_ids().len());
                    built.push(node_snapshot(node, children));
                }
            }
        }

        built
            .pop()
            .ok_or_else(|| DomError::SnapshotError(format!("Empty snapshot for {}", node_id)))
    }

    /// Snapshot of the whole document, wrapped as `{"root": ...}`
    pub fn document_snapshot(&self, arena: &DomArena) -> Result<Value> {
        Ok(json!({ "root": self.snapshot(arena, arena.root_id())? }))
    }
}

impl Default for DomSerializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Pending work for the iterative tree walks
enum Step {
    Open(NodeId, usize),
    Close(NodeId, usize),
}

fn node_snapshot(node: &DomNode, children: Vec<Value>) -> Value {
    let mut attributes = Vec::with_capacity(node.attributes().len() * 2);
    for attr in node.attributes() {
        attributes.push(Value::String(attr.name.clone()));
        attributes.push(Value::String(attr.value.clone()));
    }
    if node.style().is_present() {
        attributes.push(Value::String("style".to_string()));
        attributes.push(Value::String(node.style().css_text()));
    }

    json!({
        "nodeType": node.node_type as u8,
        "nodeName": node.node_name,
        "namespaceURI": node.namespace_uri,
        "nodeValue": node.node_value,
        "attributes": attributes,
        "children": children,
    })
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
