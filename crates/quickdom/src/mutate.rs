//! Single-step tree edits on already-resolved nodes

use crate::error::Result;
use crate::{require_node, Document};
use qd_dom::NodeId;
use tracing::debug;

/// Insert `elem` as the last child of `target`
pub fn append(
    doc: &mut Document,
    elem: impl Into<Option<NodeId>>,
    target: impl Into<Option<NodeId>>,
) -> Result<()> {
    let target = require_node(doc, target.into(), "No target element provided to append")?;
    let elem = require_node(doc, elem.into(), "No element provided to append")?;

    doc.append_child(target, elem)?;
    debug!(element = %elem, target = %target, "appended");
    Ok(())
}

/// Insert `elem` before the current first child of `target`
pub fn prepend(
    doc: &mut Document,
    elem: impl Into<Option<NodeId>>,
    target: impl Into<Option<NodeId>>,
) -> Result<()> {
    let target = require_node(doc, target.into(), "No target element provided to prepend")?;
    let elem = require_node(doc, elem.into(), "No element provided to prepend")?;

    let first = doc.get(target)?.first_child();
    doc.insert_before(target, elem, first)?;
    debug!(element = %elem, target = %target, "prepended");
    Ok(())
}

/// Detach `elem` from its parent. A node without a parent is a host error.
pub fn remove(doc: &mut Document, elem: impl Into<Option<NodeId>>) -> Result<()> {
    let elem = require_node(doc, elem.into(), "No element provided to remove")?;

    doc.detach(elem)?;
    debug!(element = %elem, "removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn setup() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let ul = doc.create_element("ul").unwrap();
        let a = doc.create_element("li").unwrap();
        let b = doc.create_element("li").unwrap();
        (doc, ul, a, b)
    }

    #[test]
    fn test_append_order() {
        let (mut doc, ul, a, b) = setup();
        append(&mut doc, a, ul).unwrap();
        append(&mut doc, b, ul).unwrap();

        assert_eq!(doc.children(ul).unwrap(), &[a, b]);
    }

    #[test]
    fn test_prepend() {
        let (mut doc, ul, a, b) = setup();
        prepend(&mut doc, a, ul).unwrap();
        assert_eq!(doc.children(ul).unwrap(), &[a]);

        prepend(&mut doc, b, ul).unwrap();
        assert_eq!(doc.children(ul).unwrap(), &[b, a]);

        // Prepending the first child again is a no-op
        prepend(&mut doc, b, ul).unwrap();
        assert_eq!(doc.children(ul).unwrap(), &[b, a]);
    }

    #[test]
    fn test_remove() {
        let (mut doc, ul, a, b) = setup();
        append(&mut doc, a, ul).unwrap();
        append(&mut doc, b, ul).unwrap();

        remove(&mut doc, a).unwrap();
        assert_eq!(doc.children(ul).unwrap(), &[b]);
        assert_eq!(doc.parent(a).unwrap(), None);
    }

    #[test]
    fn test_removed_node_keeps_its_slot() {
        let (mut doc, ul, a, _) = setup();
        let before = doc.len();

        for _ in 0..10 {
            append(&mut doc, a, ul).unwrap();
            remove(&mut doc, a).unwrap();
        }
        assert_eq!(doc.len(), before);

        // The handle is still live and can be attached again
        append(&mut doc, a, ul).unwrap();
        assert_eq!(doc.children(ul).unwrap(), &[a]);
    }

    #[test]
    fn test_remove_without_parent_is_host_error() {
        let (mut doc, _, a, _) = setup();
        let err = remove(&mut doc, a).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Host);
    }

    #[test]
    fn test_missing_arguments() {
        let (mut doc, ul, a, _) = setup();

        let err = append(&mut doc, a, None::<NodeId>).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingElement);
        assert_eq!(err.to_string(), "No target element provided to append");

        let err = append(&mut doc, None::<NodeId>, ul).unwrap_err();
        assert_eq!(err.to_string(), "No element provided to append");

        let err = prepend(&mut doc, None::<NodeId>, None::<NodeId>).unwrap_err();
        assert_eq!(err.to_string(), "No target element provided to prepend");

        let err = remove(&mut doc, None::<NodeId>).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingElement);

        let err = remove(&mut doc, NodeId(321)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingElement);
    }

    #[test]
    fn test_cycle_is_host_error() {
        let (mut doc, ul, a, _) = setup();
        append(&mut doc, a, ul).unwrap();

        let err = append(&mut doc, ul, a).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Host);
    }
}
