//! Error types for tree editing

use crate::node::NodeId;

/// Errors produced by structural tree operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// No node with the given id exists in the tree
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// Two nodes in the tree share an id
    #[error("duplicate node id: {0}")]
    DuplicateId(NodeId),

    /// The root node cannot be detached from itself
    #[error("cannot remove the root node")]
    RootRemoval,
}
