//! Error types for DOM operations
//!
//! Simple, flat error hierarchy. No over-engineering.

use crate::types::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid node type: expected {expected}, got {actual}")]
    InvalidNodeType { expected: String, actual: String },

    #[error("Hierarchy request error: {0}")]
    HierarchyRequest(String),

    #[error("Node {0} has no parent")]
    NoParent(NodeId),

    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("Invalid character in name: {0:?}")]
    InvalidCharacter(String),

    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}
