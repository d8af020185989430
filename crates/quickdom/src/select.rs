//! Selector resolver
//!
//! A selector is a single token (`#id`, `.class` or a tag name) or a path of
//! tokens read as a descendant chain. Resolution is plain tree-walking:
//!
//! ```text
//! get(["div", "span"])
//!   div  in context          → [div₁, div₂]
//!   span in div₁, then div₂  → [span₁, span₂]   (flattened, context order)
//! ```
//!
//! A string containing whitespace is split into such a path. Paths are
//! borrowed, never consumed, so one selector value can be reused.

use crate::error::{Error, Result};
use crate::{require_node, Document};
use qd_dom::{LiveCollection, NodeId};
use tracing::{debug, trace};

/// What to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<'a> {
    /// No selector at all; resolving it fails
    Missing,
    Token(&'a str),
    Path(Vec<&'a str>),
}

impl<'a> From<&'a str> for Selector<'a> {
    fn from(token: &'a str) -> Self {
        Selector::Token(token)
    }
}

impl<'a> From<&'a String> for Selector<'a> {
    fn from(token: &'a String) -> Self {
        Selector::Token(token.as_str())
    }
}

impl<'a> From<Option<&'a str>> for Selector<'a> {
    fn from(token: Option<&'a str>) -> Self {
        token.map_or(Selector::Missing, Selector::Token)
    }
}

impl<'a> From<&'a [&'a str]> for Selector<'a> {
    fn from(path: &'a [&'a str]) -> Self {
        Selector::Path(path.to_vec())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Selector<'a> {
    fn from(path: [&'a str; N]) -> Self {
        Selector::Path(path.to_vec())
    }
}

impl<'a> From<Vec<&'a str>> for Selector<'a> {
    fn from(path: Vec<&'a str>) -> Self {
        Selector::Path(path)
    }
}

impl<'a> From<&'a [String]> for Selector<'a> {
    fn from(path: &'a [String]) -> Self {
        Selector::Path(path.iter().map(String::as_str).collect())
    }
}

impl<'a> From<&'a Vec<String>> for Selector<'a> {
    fn from(path: &'a Vec<String>) -> Self {
        Selector::from(path.as_slice())
    }
}

/// Where to look and which match to pick
///
/// Passing a bare [`NodeId`] where a query is expected means "this is the
/// context"; passing a bare `usize` means "this is the index".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Query {
    pub index: Option<usize>,
    pub context: Option<NodeId>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn within(mut self, context: NodeId) -> Self {
        self.context = Some(context);
        self
    }
}

impl From<()> for Query {
    fn from(_: ()) -> Self {
        Query::default()
    }
}

impl From<usize> for Query {
    fn from(index: usize) -> Self {
        Query::new().index(index)
    }
}

impl From<NodeId> for Query {
    fn from(context: NodeId) -> Self {
        Query::new().within(context)
    }
}

impl From<(usize, NodeId)> for Query {
    fn from((index, context): (usize, NodeId)) -> Self {
        Query::new().index(index).within(context)
    }
}

/// Result of a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// An id lookup, or any indexed lookup
    Single(Option<NodeId>),
    /// An unindexed class or tag lookup
    Live(LiveCollection),
    /// A flattened path result
    List(Vec<NodeId>),
}

impl Selection {
    /// Every selected node, in order
    pub fn nodes(&self, doc: &Document) -> Vec<NodeId> {
        match self {
            Selection::Single(node) => node.iter().copied().collect(),
            Selection::Live(collection) => collection.to_vec(doc),
            Selection::List(nodes) => nodes.clone(),
        }
    }

    pub fn item(&self, doc: &Document, index: usize) -> Option<NodeId> {
        match self {
            Selection::Single(node) => node.filter(|_| index == 0),
            Selection::Live(collection) => collection.item(doc, index),
            Selection::List(nodes) => nodes.get(index).copied(),
        }
    }

    pub fn first(&self, doc: &Document) -> Option<NodeId> {
        self.item(doc, 0)
    }

    pub fn len(&self, doc: &Document) -> usize {
        match self {
            Selection::Single(node) => usize::from(node.is_some()),
            Selection::Live(collection) => collection.len(doc),
            Selection::List(nodes) => nodes.len(),
        }
    }

    pub fn is_empty(&self, doc: &Document) -> bool {
        self.first(doc).is_none()
    }
}

/// Resolve a selector against the document (or `query.context`)
pub fn get<'a>(doc: &Document, selector: impl Into<Selector<'a>>, query: impl Into<Query>) -> Result<Selection> {
    let selector = selector.into();
    let query = query.into();
    debug!(?selector, ?query, "resolving selector");

    match selector {
        Selector::Missing => Err(Error::MissingSelector("No selector provided to get")),
        Selector::Token(token) => {
            let context = context_or_root(doc, query.context)?;
            resolve_token(doc, token, query.index, context, 0)
        }
        Selector::Path(path) => {
            let context = context_or_root(doc, query.context)?;
            resolve_path(doc, &path, query.index, context, 0)
        }
    }
}

/// Element with the given id, searched under `context` (default: document)
pub fn get_id(doc: &Document, id: &str, context: impl Into<Option<NodeId>>) -> Result<Option<NodeId>> {
    if id.is_empty() {
        return Err(Error::MissingSelector("No ID provided to get_id"));
    }
    let context = context_or_root(doc, context.into())?;
    Ok(doc.get_element_by_id(context, id)?)
}

/// Elements carrying the class; indexed lookups give a single node
pub fn get_class(doc: &Document, class_name: &str, query: impl Into<Query>) -> Result<Selection> {
    if class_name.is_empty() {
        return Err(Error::MissingSelector("No Class name provided to get_class"));
    }
    let query = query.into();
    let context = context_or_root(doc, query.context)?;
    let collection = doc.get_elements_by_class_name(context, class_name)?;
    Ok(pick(doc, collection, query.index))
}

/// Elements with the tag name; indexed lookups give a single node
pub fn get_tag(doc: &Document, tag_name: &str, query: impl Into<Query>) -> Result<Selection> {
    if tag_name.is_empty() {
        return Err(Error::MissingSelector("No Tag name provided to get_tag"));
    }
    let query = query.into();
    let context = context_or_root(doc, query.context)?;
    let collection = doc.get_elements_by_tag_name(context, tag_name)?;
    Ok(pick(doc, collection, query.index))
}

fn pick(doc: &Document, collection: LiveCollection, index: Option<usize>) -> Selection {
    match index {
        Some(i) => Selection::Single(collection.item(doc, i)),
        None => Selection::Live(collection),
    }
}

fn context_or_root(doc: &Document, context: Option<NodeId>) -> Result<NodeId> {
    match context {
        None => Ok(doc.root_id()),
        Some(c) => require_node(doc, Some(c), "Context node is not part of this document"),
    }
}

fn resolve_token(
    doc: &Document,
    token: &str,
    index: Option<usize>,
    context: NodeId,
    depth: usize,
) -> Result<Selection> {
    if token.is_empty() {
        return Err(Error::EmptySelector("Selector is empty"));
    }

    if token.contains(char::is_whitespace) {
        let path: Vec<&str> = token.split_whitespace().collect();
        if path.is_empty() {
            return Err(Error::EmptySelector("Selector is empty"));
        }
        trace!(token, depth, "splitting selector into a path");
        return resolve_path(doc, &path, index, context, depth);
    }

    trace!(token, depth, context = %context, "resolving token");
    if let Some(id) = token.strip_prefix('#') {
        // Ids are unique: the index does not apply
        Ok(Selection::Single(get_id(doc, id, context)?))
    } else if let Some(class_name) = token.strip_prefix('.') {
        get_class(doc, class_name, Query { index, context: Some(context) })
    } else {
        get_tag(doc, token, Query { index, context: Some(context) })
    }
}

fn resolve_path(
    doc: &Document,
    path: &[&str],
    index: Option<usize>,
    context: NodeId,
    depth: usize,
) -> Result<Selection> {
    let (head, rest) = match path {
        [] => return Err(Error::EmptySelector("Selector array is empty")),
        [only] => return resolve_token(doc, only, index, context, depth),
        [head, rest @ ..] => (*head, rest),
    };

    let contexts = resolve_token(doc, head, None, context, depth)?.nodes(doc);
    trace!(token = head, depth, contexts = contexts.len(), "descending into path");

    let mut items = Vec::new();
    for ctx in contexts {
        let found = resolve_path(doc, rest, None, ctx, depth + 1)?;
        items.extend(found.nodes(doc));
    }

    Ok(match index {
        Some(i) => Selection::Single(items.get(i).copied()),
        None => Selection::List(items),
    })
}
