use orglab_model::{Kpi, NodeId, OrgNode};
use pretty_assertions::assert_eq;

fn sample_tree() -> OrgNode {
    let mut root = OrgNode::new("Leadership", "GENERAL DIRECTOR", "Strategic direction.");
    root.id = NodeId::from("root-ceo");
    root.kpis.push(Kpi::new("Growth", 0.0, 100.0, "%"));

    let mut sales = OrgNode::new("Sales", "CRO", "Revenue.");
    sales.id = NodeId::from("sales");
    let mut eng = OrgNode::new("Engineering", "CTO", "Product delivery.");
    eng.id = NodeId::from("eng");
    let mut platform = OrgNode::new("Platform", "Lead", "Infra.");
    platform.id = NodeId::from("platform");
    eng.children.push(platform);

    root.children.push(sales);
    root.children.push(eng);
    root
}

#[test]
fn add_parent_rotates_tree() {
    let root = sample_tree();
    let before = root.clone();

    let rotated = root.with_parent("Board", "COUNCIL", "Macro governance.");

    assert_eq!(rotated.children.len(), 1);
    assert_eq!(rotated.children[0], before);
    assert_eq!(rotated.role, "COUNCIL");
    assert!(rotated.kpis.is_empty());
    assert_ne!(rotated.id, before.id);
}

#[test]
fn user_position_is_single_select() {
    // Start from a tree where several nodes already carry the marker.
    let mut tree = sample_tree();
    tree.is_user_position = true;
    tree.children[0].is_user_position = true;
    tree.children[1].children[0].is_user_position = true;

    let tree = tree.with_user_position(&NodeId::from("eng")).unwrap();

    let mut marked = Vec::new();
    collect_marked(&tree, &mut marked);
    assert_eq!(marked, vec![NodeId::from("eng")]);
}

fn collect_marked(node: &OrgNode, out: &mut Vec<NodeId>) {
    if node.is_user_position {
        out.push(node.id.clone());
    }
    for child in &node.children {
        collect_marked(child, out);
    }
}

#[test]
fn user_position_accessor_matches_marker() {
    let tree = sample_tree().with_user_position(&NodeId::from("platform")).unwrap();
    assert_eq!(tree.user_position().map(|n| n.id.clone()), Some(NodeId::from("platform")));
}

#[test]
fn edits_compose_without_aliasing() {
    let tree = sample_tree();
    let a = tree.with_renamed(&NodeId::from("sales"), "Growth Team").unwrap();
    let b = tree.with_role(&NodeId::from("sales"), "VP Sales").unwrap();

    // Divergent edits on the same base never see each other.
    assert_eq!(a.find(&NodeId::from("sales")).unwrap().role, "CRO");
    assert_eq!(b.find(&NodeId::from("sales")).unwrap().name, "Sales");
}

#[test]
fn fresh_tree_has_unique_ids() {
    assert!(sample_tree().validate_unique_ids().is_ok());
}
