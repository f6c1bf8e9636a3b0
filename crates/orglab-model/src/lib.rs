//! Org tree data model
//!
//! The hierarchical structure a user edits before submitting it for
//! analysis:
//! - [`OrgNode`]: a position in the hierarchy, exclusively owning its
//!   children (the tree is acyclic and rooted by construction)
//! - [`Kpi`]: leaf metric attached to a node, no independent lifecycle
//! - Structural editing operations that always produce a new tree value
//!   rather than mutating in place

pub mod edit;
pub mod error;
pub mod node;

pub use error::TreeError;
pub use node::{Kpi, NodeId, OrgNode};
