//! QuickDOM - small DOM manipulation helpers
//!
//! Stateless functions over a live [`Document`]:
//!
//! - [`create`] builds a detached element from a tag, a JSON attribute map and [`Children`]
//! - [`attr`] / [`css`] read and write attributes and inline style
//! - [`text`] creates text nodes
//! - [`get`] resolves `#id`, `.class`, `tag` and descendant paths; [`get_id`],
//!   [`get_class`], [`get_tag`] are the single-kind lookups
//! - [`append`] / [`prepend`] / [`remove`] edit the tree
//!
//! ```
//! use quickdom::{append, create, get, Document};
//! use serde_json::json;
//!
//! let mut doc = Document::html_document()?;
//! let body = doc.body().expect("scaffolded body");
//!
//! let item = create(&mut doc, "li", &json!({ "class": "item" }), "first")?;
//! let list = create(&mut doc, "ul", &json!({ "id": "list" }), vec![item])?;
//! append(&mut doc, list, body)?;
//!
//! let found = get(&doc, "#list .item", ())?;
//! assert_eq!(found.nodes(&doc), vec![item]);
//! # Ok::<(), quickdom::Error>(())
//! ```

pub mod attrs;
pub mod error;
pub mod factory;
pub mod mutate;
pub mod select;
pub mod text;

pub use attrs::{attr, css};
pub use error::{Error, ErrorKind, Result};
pub use factory::{create, Children};
pub use mutate::{append, prepend, remove};
pub use select::{get, get_class, get_id, get_tag, Query, Selection, Selector};
pub use text::text;

pub use qd_dom::{LiveCollection, NodeId};

/// The live document every helper operates on
///
/// Nodes are never freed. [`remove`] detaches a node but keeps its slot, so
/// the handle stays valid and can be inserted again; a detached [`text`] or
/// [`create`] result also keeps its slot. A document that keeps creating and
/// discarding nodes grows for as long as it lives. Serialize it with
/// `DomSerializer::document_snapshot` and reload it with
/// `Document::from_snapshot` to compact it.
pub type Document = qd_dom::DomArena;

/// A handle that is absent or foreign to `doc` counts as a missing element
pub(crate) fn require_node(doc: &Document, node: Option<NodeId>, message: &'static str) -> Result<NodeId> {
    match node {
        Some(node) if doc.contains(node) => Ok(node),
        _ => Err(Error::MissingElement(message)),
    }
}
