//! Structural editing operations
//!
//! Every operation takes the tree by reference and returns a fresh tree
//! value; callers swap the whole root on success. No shared mutable
//! references ever escape an edit.

use crate::error::TreeError;
use crate::node::{Kpi, NodeId, OrgNode};
use std::collections::HashSet;

impl OrgNode {
    /// Apply an arbitrary closure to the node with `id`, returning the new
    /// tree
    ///
    /// Building block for the named edits below; the closure sees the node
    /// with its subtree attached.
    pub fn with_updated(
        &self,
        id: &NodeId,
        f: impl FnOnce(&mut OrgNode),
    ) -> Result<OrgNode, TreeError> {
        let mut tree = self.clone();
        let node = tree
            .find_mut(id)
            .ok_or_else(|| TreeError::NodeNotFound(id.clone()))?;
        f(node);
        Ok(tree)
    }

    /// Rename a node
    pub fn with_renamed(&self, id: &NodeId, name: impl Into<String>) -> Result<OrgNode, TreeError> {
        let name = name.into();
        self.with_updated(id, |n| n.name = name)
    }

    /// Change a node's role title
    pub fn with_role(&self, id: &NodeId, role: impl Into<String>) -> Result<OrgNode, TreeError> {
        let role = role.into();
        self.with_updated(id, |n| n.role = role)
    }

    /// Change a node's responsibilities text
    pub fn with_functions(
        &self,
        id: &NodeId,
        functions: impl Into<String>,
    ) -> Result<OrgNode, TreeError> {
        let functions = functions.into();
        self.with_updated(id, |n| n.functions = functions)
    }

    /// Insert or replace a KPI on a node, keyed by KPI name
    pub fn with_kpi(&self, id: &NodeId, kpi: Kpi) -> Result<OrgNode, TreeError> {
        self.with_updated(id, |n| {
            match n.kpis.iter_mut().find(|k| k.name == kpi.name) {
                Some(existing) => *existing = kpi,
                None => n.kpis.push(kpi),
            }
        })
    }

    /// Remove a KPI by name; removing an absent KPI is a no-op
    pub fn without_kpi(&self, id: &NodeId, kpi_name: &str) -> Result<OrgNode, TreeError> {
        self.with_updated(id, |n| n.kpis.retain(|k| k.name != kpi_name))
    }

    /// Attach `child` as the last direct report of `parent_id`
    pub fn with_child(&self, parent_id: &NodeId, child: OrgNode) -> Result<OrgNode, TreeError> {
        self.with_updated(parent_id, |n| n.children.push(child))
    }

    /// Detach the node with `id` (and its whole subtree) from its parent
    ///
    /// The root cannot be removed; that would leave no tree.
    pub fn without_node(&self, id: &NodeId) -> Result<OrgNode, TreeError> {
        if &self.id == id {
            return Err(TreeError::RootRemoval);
        }
        if self.find(id).is_none() {
            return Err(TreeError::NodeNotFound(id.clone()));
        }
        let mut tree = self.clone();
        tree.prune(id);
        Ok(tree)
    }

    fn prune(&mut self, id: &NodeId) {
        self.children.retain(|c| &c.id != id);
        for child in &mut self.children {
            child.prune(id);
        }
    }

    /// Add a new parent above the current root
    ///
    /// The tree rotates: the new node (fresh random id, no KPIs) becomes the
    /// root and the old root becomes its sole child, otherwise unchanged.
    #[must_use]
    pub fn with_parent(
        &self,
        name: impl Into<String>,
        role: impl Into<String>,
        functions: impl Into<String>,
    ) -> OrgNode {
        OrgNode {
            id: NodeId::random(),
            name: name.into(),
            role: role.into(),
            functions: functions.into(),
            kpis: Vec::new(),
            children: vec![self.clone()],
            is_user_position: false,
        }
    }

    /// Mark the node with `id` as the user's position
    ///
    /// Tree-wide single select: every other node has the marker cleared, so
    /// afterwards exactly one node carries it.
    pub fn with_user_position(&self, id: &NodeId) -> Result<OrgNode, TreeError> {
        if self.find(id).is_none() {
            return Err(TreeError::NodeNotFound(id.clone()));
        }
        let mut tree = self.clone();
        tree.select_position(id);
        Ok(tree)
    }

    fn select_position(&mut self, id: &NodeId) {
        self.is_user_position = &self.id == id;
        for child in &mut self.children {
            child.select_position(id);
        }
    }

    /// Check that every id in the tree is distinct
    pub fn validate_unique_ids(&self) -> Result<(), TreeError> {
        fn walk<'a>(node: &'a OrgNode, seen: &mut HashSet<&'a NodeId>) -> Result<(), TreeError> {
            if !seen.insert(&node.id) {
                return Err(TreeError::DuplicateId(node.id.clone()));
            }
            for child in &node.children {
                walk(child, seen)?;
            }
            Ok(())
        }
        walk(self, &mut HashSet::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_level_tree() -> OrgNode {
        let mut root = OrgNode::new("Leadership", "CEO", "Direction");
        root.id = NodeId::from("root");
        let mut child = OrgNode::new("Ops", "COO", "Operations");
        child.id = NodeId::from("ops");
        root.children.push(child);
        root
    }

    #[test]
    fn rename_leaves_original_untouched() {
        let tree = two_level_tree();
        let renamed = tree.with_renamed(&NodeId::from("ops"), "Operations").unwrap();
        assert_eq!(tree.children[0].name, "Ops");
        assert_eq!(renamed.children[0].name, "Operations");
    }

    #[test]
    fn kpi_upsert_replaces_by_name() {
        let tree = two_level_tree();
        let id = NodeId::from("ops");
        let tree = tree.with_kpi(&id, Kpi::new("Uptime", 99.0, 99.9, "%")).unwrap();
        let tree = tree.with_kpi(&id, Kpi::new("Uptime", 99.5, 99.9, "%")).unwrap();
        let kpis = &tree.find(&id).unwrap().kpis;
        assert_eq!(kpis.len(), 1);
        assert_eq!(kpis[0].current_value, 99.5);
    }

    #[test]
    fn remove_root_is_refused() {
        let tree = two_level_tree();
        assert_eq!(tree.without_node(&NodeId::from("root")), Err(TreeError::RootRemoval));
    }

    #[test]
    fn remove_detaches_whole_subtree() {
        let tree = two_level_tree();
        let tree = tree
            .with_child(&NodeId::from("ops"), OrgNode::new("QA", "Lead", "Quality"))
            .unwrap();
        let tree = tree.without_node(&NodeId::from("ops")).unwrap();
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let tree = two_level_tree();
        assert!(matches!(
            tree.with_renamed(&NodeId::from("ghost"), "x"),
            Err(TreeError::NodeNotFound(_))
        ));
    }

    #[test]
    fn duplicate_ids_detected() {
        let mut tree = two_level_tree();
        let mut dup = OrgNode::new("Dup", "r", "f");
        dup.id = NodeId::from("ops");
        tree.children.push(dup);
        assert!(matches!(tree.validate_unique_ids(), Err(TreeError::DuplicateId(_))));
    }
}
