//! Document queries: getElementById, getElementsByClassName, getElementsByTagName
//!
//! Class and tag queries return a [`LiveCollection`]: it stores the query,
//! not the result, and is evaluated against the document on every access.

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::{DomNode, NodeId};
use crate::utils;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// What a live collection matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionFilter {
    /// Qualified name, or `*` for every element
    TagName(String),
    /// Every listed class token must be present
    ClassNames(Vec<String>),
}

/// A query result that reflects the document tree at access time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveCollection {
    root: NodeId,
    filter: CollectionFilter,
}

impl LiveCollection {
    /// Matching elements, in tree order
    pub fn to_vec(&self, arena: &DomArena) -> Vec<NodeId> {
        arena
            .find(self.root, |node| self.matches(arena, node))
            .unwrap_or_default()
    }

    pub fn len(&self, arena: &DomArena) -> usize {
        self.to_vec(arena).len()
    }

    pub fn is_empty(&self, arena: &DomArena) -> bool {
        self.item(arena, 0).is_none()
    }

    /// Element at `index`; out of range is `None`
    pub fn item(&self, arena: &DomArena, index: usize) -> Option<NodeId> {
        let mut seen = 0usize;
        arena
            .find_one(self.root, |node| {
                if !self.matches(arena, node) {
                    return false;
                }
                seen += 1;
                seen > index
            })
            .ok()
            .flatten()
    }

    fn matches(&self, arena: &DomArena, node: &DomNode) -> bool {
        if !node.is_element() {
            return false;
        }
        match &self.filter {
            CollectionFilter::TagName(name) => {
                if name == "*" {
                    true
                } else if arena.is_html() && node.is_html_element() {
                    node.node_name.eq_ignore_ascii_case(name)
                } else {
                    node.node_name == *name
                }
            }
            CollectionFilter::ClassNames(wanted) => {
                if wanted.is_empty() {
                    return false;
                }
                let present: AHashSet<&str> = node.class_list().collect();
                wanted.iter().all(|w| present.contains(w.as_str()))
            }
        }
    }
}

impl DomArena {
    /// First element under `root` (tree order) whose `id` is `id`
    pub fn get_element_by_id(&self, root: NodeId, id: &str) -> Result<Option<NodeId>> {
        if id.is_empty() {
            self.get(root)?;
            return Ok(None);
        }
        self.find_one(root, |node| node.is_element() && node.attr("id") == Some(id))
    }

    /// Elements under `root` carrying every class in `class_names`
    pub fn get_elements_by_class_name(&self, root: NodeId, class_names: &str) -> Result<LiveCollection> {
        self.get(root)?;
        let tokens = utils::split_class_tokens(class_names)
            .into_iter()
            .map(String::from)
            .collect();
        Ok(LiveCollection {
            root,
            filter: CollectionFilter::ClassNames(tokens),
        })
    }

    /// Elements under `root` with the given qualified name (`*` for all)
    pub fn get_elements_by_tag_name(&self, root: NodeId, name: &str) -> Result<LiveCollection> {
        self.get(root)?;
        Ok(LiveCollection {
            root,
            filter: CollectionFilter::TagName(name.to_string()),
        })
    }
}
