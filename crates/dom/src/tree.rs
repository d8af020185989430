//! Tree manipulation: append, insert-before, remove
//!
//! Inserting a node that already has a parent moves it (DOM re-parenting).
//! Hierarchy rules are checked before anything is unlinked, so a failed
//! insertion leaves the tree untouched.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::{NodeId, NodeType};
use tracing::trace;

impl DomArena {
    /// Appends `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Inserts `child` before `reference` under `parent`.
    /// A `None` reference appends.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<NodeId> {
        self.ensure_pre_insert_validity(parent, child, reference)?;

        // Inserting a node before itself means "before its next sibling"
        let reference = match reference {
            Some(r) if r == child => self.next_sibling(child)?,
            other => other,
        };

        if self.get(child)?.parent_id.is_some() {
            self.unlink(child)?;
        }

        let parent_node = self.get_mut(parent)?;
        let position = match reference {
            Some(r) => parent_node
                .children_ids
                .iter()
                .position(|&c| c == r)
                .ok_or(DomError::NotAChild { parent, child: r })?,
            None => parent_node.children_ids.len(),
        };
        parent_node.children_ids.insert(position, child);
        self.get_mut(child)?.parent_id = Some(parent);

        trace!(parent = %parent, child = %child, position, "inserted node");
        Ok(child)
    }

    /// Removes `child` from `parent`. The node stays in the arena, detached.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        self.get(parent)?;
        if self.get(child)?.parent_id != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }

        self.unlink(child)?;
        trace!(parent = %parent, child = %child, "removed node");
        Ok(child)
    }

    /// Removes `node` from whatever parent it has
    pub fn detach(&mut self, node: NodeId) -> Result<NodeId> {
        let parent = self.get(node)?.parent_id.ok_or(DomError::NoParent(node))?;
        self.remove_child(parent, node)
    }

    /// The sibling right after `node`, if any
    pub fn next_sibling(&self, node: NodeId) -> Result<Option<NodeId>> {
        let parent = match self.get(node)?.parent_id {
            Some(p) => p,
            None => return Ok(None),
        };
        let siblings = self.children(parent)?;
        Ok(siblings
            .iter()
            .position(|&c| c == node)
            .and_then(|i| siblings.get(i + 1).copied()))
    }

    /// Unlinks a node from its current parent (if any) without freeing it
    fn unlink(&mut self, child: NodeId) -> Result<()> {
        let parent = match self.get_mut(child)?.parent_id.take() {
            Some(p) => p,
            None => return Ok(()),
        };
        self.get_mut(parent)?.children_ids.retain(|c| *c != child);
        Ok(())
    }

    fn ensure_pre_insert_validity(
        &self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<()> {
        let parent_node = self.get(parent)?;
        let child_node = self.get(child)?;

        if !parent_node.can_have_children() {
            return Err(DomError::HierarchyRequest(format!(
                "{} node {} cannot have children",
                parent_node.node_type, parent
            )));
        }
        if child_node.is_document() {
            return Err(DomError::HierarchyRequest(
                "the document node cannot be inserted".to_string(),
            ));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest(format!(
                "node {} is an inclusive ancestor of {}",
                child, parent
            )));
        }
        if let Some(r) = reference {
            if self.get(r)?.parent_id != Some(parent) {
                return Err(DomError::NotAChild { parent, child: r });
            }
        }

        if parent_node.is_document() {
            match child_node.node_type {
                NodeType::Text => {
                    return Err(DomError::HierarchyRequest(
                        "the document cannot contain text".to_string(),
                    ))
                }
                NodeType::Element => {
                    let has_other_element = parent_node
                        .children_ids
                        .iter()
                        .any(|&c| c != child && self.is_element_node(c));
                    if has_other_element {
                        return Err(DomError::HierarchyRequest(
                            "the document already has an element child".to_string(),
                        ));
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn is_element_node(&self, node: NodeId) -> bool {
        self.get(node).map(|n| n.is_element()).unwrap_or(false)
    }
}
