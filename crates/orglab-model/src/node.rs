//! Node and KPI value types
//!
//! Serde field names follow the persisted wire shape (`camelCase`), so a
//! tree written by an older profile round-trips unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Node identifier, unique within a single tree
///
/// Uniqueness is not globally enforced at construction; callers that care
/// run [`OrgNode::validate_unique_ids`](crate::OrgNode::validate_unique_ids)
/// after assembling a tree from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Fresh random id
    #[inline]
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Key performance indicator attached to a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    /// Metric name, also the identity used by KPI upserts
    pub name: String,
    /// Current measured value
    pub current_value: f64,
    /// Target value
    pub target_value: f64,
    /// Display unit (e.g. `%`)
    pub unit: String,
}

impl Kpi {
    /// Convenience constructor
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, current: f64, target: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current_value: current,
            target_value: target,
            unit: unit.into(),
        }
    }
}

/// One position in the org hierarchy
///
/// Each node exclusively owns its children, so a tree is acyclic and rooted
/// by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgNode {
    /// Identifier, unique within the tree
    pub id: NodeId,
    /// Person or team name
    pub name: String,
    /// Role title
    pub role: String,
    /// Free-text description of responsibilities
    pub functions: String,
    /// Metrics tracked for this position
    #[serde(default)]
    pub kpis: Vec<Kpi>,
    /// Direct reports
    #[serde(default)]
    pub children: Vec<OrgNode>,
    /// Marks the position the current user occupies; at most one node in a
    /// tree carries it (see [`OrgNode::with_user_position`](crate::OrgNode::with_user_position))
    #[serde(default)]
    pub is_user_position: bool,
}

impl OrgNode {
    /// New leaf node with a fresh random id
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        functions: impl Into<String>,
    ) -> Self {
        Self {
            id: NodeId::random(),
            name: name.into(),
            role: role.into(),
            functions: functions.into(),
            kpis: Vec::new(),
            children: Vec::new(),
            is_user_position: false,
        }
    }

    /// Total number of nodes in this subtree, root included
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(OrgNode::node_count).sum::<usize>()
    }

    /// Find a node by id anywhere in this subtree
    #[must_use]
    pub fn find(&self, id: &NodeId) -> Option<&OrgNode> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    pub(crate) fn find_mut(&mut self, id: &NodeId) -> Option<&mut OrgNode> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// The node currently marked as the user's own position, if any
    #[must_use]
    pub fn user_position(&self) -> Option<&OrgNode> {
        if self.is_user_position {
            return Some(self);
        }
        self.children.iter().find_map(OrgNode::user_position)
    }
}
