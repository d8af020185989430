//! Text node helper

use crate::error::Result;
use crate::{require_node, Document};
use qd_dom::utils::cap_text_length;
use qd_dom::NodeId;
use serde_json::Value;
use tracing::debug;

/// Create a text node, or append one to `target`.
///
/// Anything but a string is silently ignored: no node, no mutation. With a
/// target the new node is appended and `None` is returned; without one the
/// detached node is returned.
pub fn text(doc: &mut Document, txt: impl Into<Value>, target: Option<NodeId>) -> Result<Option<NodeId>> {
    let txt = match txt.into() {
        Value::String(s) => s,
        other => {
            debug!(value = %other, "text called with a non-string value, ignoring");
            return Ok(None);
        }
    };

    let target = match target {
        Some(t) => Some(require_node(doc, Some(t), "No such target element for text")?),
        None => None,
    };

    let node = doc.create_text_node(&txt);
    debug!(node = %node, text = %cap_text_length(&txt, 32), ?target, "created text node");

    match target {
        Some(t) => {
            doc.append_child(t, node)?;
            Ok(None)
        }
        None => Ok(Some(node)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_detached_text_node() {
        let mut doc = Document::new();
        let node = text(&mut doc, "hello", None).unwrap().unwrap();

        let data = doc.get(node).unwrap();
        assert!(data.is_text());
        assert_eq!(data.node_value, "hello");
        assert_eq!(data.parent_id(), None);
    }

    #[test]
    fn test_append_to_target() {
        let mut doc = Document::new();
        let p = doc.create_element("p").unwrap();

        assert_eq!(text(&mut doc, "one ", Some(p)).unwrap(), None);
        assert_eq!(text(&mut doc, String::from("two"), Some(p)).unwrap(), None);
        assert_eq!(doc.text_content(p).unwrap(), "one two");
    }

    #[test]
    fn test_non_string_is_a_no_op() {
        let mut doc = Document::new();
        let p = doc.create_element("p").unwrap();
        let before = doc.len();

        assert_eq!(text(&mut doc, 42, Some(p)).unwrap(), None);
        assert_eq!(text(&mut doc, true, None).unwrap(), None);
        assert_eq!(text(&mut doc, Value::Null, None).unwrap(), None);
        assert_eq!(doc.len(), before);
        assert!(doc.children(p).unwrap().is_empty());
    }

    #[test]
    fn test_empty_string_still_creates_node() {
        let mut doc = Document::new();
        assert!(text(&mut doc, "", None).unwrap().is_some());
    }

    #[test]
    fn test_unknown_target() {
        let mut doc = Document::new();
        let err = text(&mut doc, "x", Some(NodeId(50))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingElement);
    }
}
