//! Element factory

use crate::attrs::{attr, css, stringify};
use crate::error::{Error, Result};
use crate::text::text;
use crate::Document;
use qd_dom::NodeId;
use serde_json::Value;
use tracing::debug;

/// Content for a newly created element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Children {
    #[default]
    Empty,
    Single(NodeId),
    /// Appended in order; `None` entries are skipped
    Many(Vec<Option<NodeId>>),
    Text(String),
}

impl From<()> for Children {
    fn from(_: ()) -> Self {
        Children::Empty
    }
}

impl From<NodeId> for Children {
    fn from(node: NodeId) -> Self {
        Children::Single(node)
    }
}

impl From<Option<NodeId>> for Children {
    fn from(node: Option<NodeId>) -> Self {
        node.map_or(Children::Empty, Children::Single)
    }
}

impl From<Vec<NodeId>> for Children {
    fn from(nodes: Vec<NodeId>) -> Self {
        Children::Many(nodes.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<NodeId>>> for Children {
    fn from(nodes: Vec<Option<NodeId>>) -> Self {
        Children::Many(nodes)
    }
}

impl From<&[NodeId]> for Children {
    fn from(nodes: &[NodeId]) -> Self {
        Children::Many(nodes.iter().copied().map(Some).collect())
    }
}

impl<const N: usize> From<[NodeId; N]> for Children {
    fn from(nodes: [NodeId; N]) -> Self {
        Children::Many(nodes.into_iter().map(Some).collect())
    }
}

impl<const N: usize> From<[Option<NodeId>; N]> for Children {
    fn from(nodes: [Option<NodeId>; N]) -> Self {
        Children::Many(nodes.into())
    }
}

impl From<&str> for Children {
    fn from(text: &str) -> Self {
        Children::Text(text.to_string())
    }
}

impl From<String> for Children {
    fn from(text: String) -> Self {
        Children::Text(text)
    }
}

/// Build one new, detached element.
///
/// `attrs` is a JSON object (anything else counts as no attributes):
///
/// - `xmlns` creates the element in that namespace and is not set as an attribute
/// - `class` sets the class-name property
/// - `style` (or `css` holding an object) goes through [`css`]; a string
///   `style` is taken as the style attribute text
/// - every other key is set with [`attr`]; `null` and object values are skipped
///
/// Attaching the element is up to the caller.
pub fn create(
    doc: &mut Document,
    tag: &str,
    attrs: &Value,
    children: impl Into<Children>,
) -> Result<NodeId> {
    if tag.is_empty() {
        return Err(Error::MissingTag("No tag name provided to create"));
    }

    let params = attrs.as_object();
    let namespace = params
        .and_then(|p| p.get("xmlns"))
        .and_then(Value::as_str)
        .filter(|ns| !ns.is_empty());

    let elem = match namespace {
        Some(ns) => doc.create_element_ns(Some(ns), tag)?,
        None => doc.create_element(tag)?,
    };

    for (key, value) in params.into_iter().flatten() {
        match (key.as_str(), value) {
            ("xmlns", _) => {}
            ("style", Value::Object(_)) | ("css", Value::Object(_)) => css(doc, elem, value)?,
            ("class", _) => set_stringified(doc, elem, "className", value)?,
            _ => set_stringified(doc, elem, key, value)?,
        }
    }

    match children.into() {
        Children::Many(nodes) if !nodes.is_empty() => {
            for node in nodes.into_iter().flatten() {
                append_child(doc, elem, node)?;
            }
        }
        Children::Text(content) if !content.is_empty() => {
            text(doc, content, Some(elem))?;
        }
        Children::Single(node) => append_child(doc, elem, node)?,
        _ => {}
    }

    debug!(element = %elem, tag, "created element");
    Ok(elem)
}

fn set_stringified(doc: &mut Document, elem: NodeId, name: &str, value: &Value) -> Result<()> {
    match stringify(value) {
        Some(text) => {
            attr(doc, elem, name, Some(&text))?;
        }
        None => debug!(element = %elem, name, "skipping attribute without a string form"),
    }
    Ok(())
}

/// Unknown handles are skipped, not reported
fn append_child(doc: &mut Document, elem: NodeId, child: NodeId) -> Result<()> {
    if !doc.contains(child) {
        debug!(element = %elem, child = %child, "skipping unknown child handle");
        return Ok(());
    }
    doc.append_child(elem, child)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use qd_dom::{DomSerializer, SVG_NAMESPACE};
    use serde_json::json;

    #[test]
    fn test_create_bare_element() {
        let mut doc = Document::new();
        let div = create(&mut doc, "div", &Value::Null, ()).unwrap();

        let node = doc.get(div).unwrap();
        assert_eq!(node.tag_name(), Some("div"));
        assert!(node.children_ids().is_empty());
        assert_eq!(node.parent_id(), None);
    }

    #[test]
    fn test_create_with_class_and_text() {
        let mut doc = Document::new();
        let p = create(&mut doc, "p", &json!({ "class": "x" }), "hello").unwrap();

        assert_eq!(doc.class_name(p).unwrap(), "x");
        let children = doc.children(p).unwrap();
        assert_eq!(children.len(), 1);
        let child = doc.get(children[0]).unwrap();
        assert!(child.is_text());
        assert_eq!(child.node_value, "hello");
    }

    #[test]
    fn test_create_with_children_skips_none() {
        let mut doc = Document::new();
        let a = doc.create_element("a").unwrap();
        let b = doc.create_element("b").unwrap();

        let div = create(&mut doc, "div", &json!({}), vec![Some(a), None, Some(b)]).unwrap();
        assert_eq!(doc.children(div).unwrap(), &[a, b]);
    }

    #[test]
    fn test_create_with_single_child() {
        let mut doc = Document::new();
        let span = doc.create_element("span").unwrap();
        let div = create(&mut doc, "div", &Value::Null, span).unwrap();

        assert_eq!(doc.children(div).unwrap(), &[span]);
    }

    #[test]
    fn test_create_attributes_and_style() {
        let mut doc = Document::new();
        let input = create(
            &mut doc,
            "input",
            &json!({
                "type": "number",
                "max": 10,
                "step": 0.5,
                "size": 20.0,
                "disabled": true,
                "placeholder": null,
                "data": { "nested": 1 },
                "style": { "width": "4em", "backgroundColor": "#fff" }
            }),
            (),
        )
        .unwrap();

        assert_eq!(doc.get_attribute(input, "type").unwrap().as_deref(), Some("number"));
        assert_eq!(doc.get_attribute(input, "max").unwrap().as_deref(), Some("10"));
        assert_eq!(doc.get_attribute(input, "step").unwrap().as_deref(), Some("0.5"));
        assert_eq!(doc.get_attribute(input, "size").unwrap().as_deref(), Some("20"));
        assert_eq!(doc.get_attribute(input, "disabled").unwrap().as_deref(), Some("true"));
        assert_eq!(doc.get_attribute(input, "placeholder").unwrap(), None);
        assert_eq!(doc.get_attribute(input, "data").unwrap(), None);

        let style = doc.style(input).unwrap();
        assert_eq!(style.get_property("width"), Some("4em"));
        assert_eq!(style.get_property("background-color"), Some("#fff"));
    }

    #[test]
    fn test_css_key_and_style_string() {
        let mut doc = Document::new();
        let a = create(&mut doc, "div", &json!({ "css": { "color": "red" } }), ()).unwrap();
        let b = create(&mut doc, "div", &json!({ "style": "color: blue" }), ()).unwrap();
        let c = create(&mut doc, "div", &json!({ "css": "plain" }), ()).unwrap();

        assert_eq!(doc.style(a).unwrap().get_property("color"), Some("red"));
        assert_eq!(doc.style(b).unwrap().get_property("color"), Some("blue"));
        assert_eq!(doc.get_attribute(c, "css").unwrap().as_deref(), Some("plain"));
    }

    #[test]
    fn test_create_in_namespace() {
        let mut doc = Document::new();
        let svg = create(
            &mut doc,
            "svg",
            &json!({ "xmlns": SVG_NAMESPACE, "viewBox": "0 0 10 10" }),
            (),
        )
        .unwrap();

        let node = doc.get(svg).unwrap();
        assert_eq!(node.namespace_uri.as_deref(), Some(SVG_NAMESPACE));
        assert_eq!(doc.get_attribute(svg, "xmlns").unwrap(), None);
        assert_eq!(doc.get_attribute(svg, "viewBox").unwrap().as_deref(), Some("0 0 10 10"));
    }

    #[test]
    fn test_missing_tag() {
        let mut doc = Document::new();
        let err = create(&mut doc, "", &json!({}), ()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingTag);
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_empty_children_specs() {
        let mut doc = Document::new();
        let a = create(&mut doc, "div", &json!({}), Vec::<NodeId>::new()).unwrap();
        let b = create(&mut doc, "div", &json!({}), "").unwrap();
        let c = create(&mut doc, "div", &json!({}), vec![NodeId(4000)]).unwrap();

        for el in [a, b, c] {
            assert!(doc.children(el).unwrap().is_empty());
        }
    }

    #[test]
    fn test_markup() {
        let mut doc = Document::new();
        let li = create(&mut doc, "li", &json!({ "class": "item" }), "one").unwrap();
        let ul = create(&mut doc, "ul", &json!({ "id": "list" }), [li]).unwrap();

        assert_eq!(
            DomSerializer::new().outer_html(&doc, ul).unwrap(),
            r#"<ul id="list"><li class="item">one</li></ul>"#
        );
    }
}
