use super::*;
use crate::anchor::Attribute;
use scrollcard_ui_layout::{FixedSizePolicy, Priority};

fn pinned_child(tree: &mut LayoutTree, parent: NodeId) -> NodeId {
    let child = tree.create_node();
    tree.set_automatic_sizing(child, false).unwrap();
    tree.add_child(parent, child).unwrap();
    child
}

#[test]
fn add_child_links_parent_and_children() {
    let mut tree = LayoutTree::new();
    let root = tree.create_node();
    let a = tree.create_node();
    let b = tree.create_node();
    tree.add_child(root, a).unwrap();
    tree.add_child(root, b).unwrap();
    assert_eq!(tree.children(root).unwrap(), vec![a, b]);
    assert_eq!(tree.parent(a).unwrap(), Some(root));
    assert_eq!(tree.subtree(root).unwrap(), vec![root, a, b]);
    assert_eq!(tree.descendants(root).unwrap(), vec![a, b]);
    assert!(tree.is_within(b, root));
    assert!(!tree.is_within(root, b));
}

#[test]
fn add_child_moves_node_between_parents() {
    let mut tree = LayoutTree::new();
    let first = tree.create_node();
    let second = tree.create_node();
    let child = tree.create_node();
    tree.add_child(first, child).unwrap();
    tree.add_child(second, child).unwrap();
    assert!(tree.children(first).unwrap().is_empty());
    assert_eq!(tree.parent(child).unwrap(), Some(second));
}

#[test]
fn add_child_rejects_cycles() {
    let mut tree = LayoutTree::new();
    let root = tree.create_node();
    let child = tree.create_node();
    tree.add_child(root, child).unwrap();
    assert_eq!(
        tree.add_child(child, root),
        Err(LayoutError::Cycle {
            parent: child,
            child: root
        })
    );
    assert_eq!(
        tree.add_child(root, root),
        Err(LayoutError::Cycle {
            parent: root,
            child: root
        })
    );
}

#[test]
fn missing_nodes_are_reported() {
    let mut tree = LayoutTree::new();
    assert_eq!(tree.frame(42), Err(LayoutError::Missing { id: 42 }));
    let root = tree.create_node();
    assert_eq!(
        tree.add_child(root, 7),
        Err(LayoutError::Missing { id: 7 })
    );
}

#[test]
fn activate_validates_all_constraints_before_activating_any() {
    let mut tree = LayoutTree::new();
    let root = tree.create_node();
    let child = pinned_child(&mut tree, root);
    let good = Anchor::frame(child, Attribute::Top).equal_to(Anchor::content(root, Attribute::Top));
    let bad = Anchor::frame(child, Attribute::Top).equal_to(Anchor::frame(root, Attribute::Top));
    let result = tree.activate(&[good.clone(), bad.clone()]);
    assert_eq!(
        result,
        Err(LayoutError::UnrelatedAnchors {
            constraint: bad.id()
        })
    );
    assert!(!good.is_active());
    assert_eq!(tree.active_constraints().count(), 0);
}

#[test]
fn activate_rejects_position_against_dimension() {
    let mut tree = LayoutTree::new();
    let root = tree.create_node();
    let child = pinned_child(&mut tree, root);
    let mixed = Anchor::frame(child, Attribute::Top).equal_to(Anchor::frame(child, Attribute::Height));
    assert!(matches!(
        tree.activate(&[mixed]),
        Err(LayoutError::IncompatibleAttributes { .. })
    ));
    let crossed = Anchor::frame(child, Attribute::Left).equal_to(Anchor::content(root, Attribute::Top));
    assert!(matches!(
        tree.activate(&[crossed]),
        Err(LayoutError::IncompatibleAttributes { .. })
    ));
}

#[test]
fn dimensions_relate_across_unrelated_nodes() {
    let mut tree = LayoutTree::new();
    let a = tree.create_node();
    let b = tree.create_node();
    let aspect = Anchor::frame(a, Attribute::Width).equal_to(Anchor::frame(b, Attribute::Height));
    assert!(tree.activate(&[aspect.clone()]).is_ok());
    assert!(aspect.is_active());
}

#[test]
fn remove_from_parent_drops_only_crossing_constraints() {
    let mut tree = LayoutTree::new();
    let root = tree.create_node();
    let branch = pinned_child(&mut tree, root);
    let leaf = pinned_child(&mut tree, branch);
    let crossing =
        Anchor::frame(branch, Attribute::Top).equal_to(Anchor::content(root, Attribute::Top));
    let internal =
        Anchor::frame(leaf, Attribute::Top).equal_to(Anchor::content(branch, Attribute::Top));
    tree.activate(&[crossing.clone(), internal.clone()]).unwrap();

    tree.remove_from_parent(branch).unwrap();

    assert!(!crossing.is_active());
    assert!(internal.is_active());
    assert_eq!(tree.parent(branch).unwrap(), None);
    assert!(tree.children(root).unwrap().is_empty());
}

#[test]
fn remove_node_discards_subtree_and_its_constraints() {
    let mut tree = LayoutTree::new();
    let root = tree.create_node();
    let branch = pinned_child(&mut tree, root);
    let leaf = pinned_child(&mut tree, branch);
    let internal =
        Anchor::frame(leaf, Attribute::Top).equal_to(Anchor::content(branch, Attribute::Top));
    tree.activate(&[internal.clone()]).unwrap();

    tree.remove_node(branch).unwrap();

    assert!(!tree.contains(branch));
    assert!(!tree.contains(leaf));
    assert!(!internal.is_active());
    assert_eq!(tree.len(), 1);
}

#[test]
fn constant_changes_only_dirty_the_tree_while_active() {
    let mut tree = LayoutTree::new();
    let root = tree.create_node();
    let width = Anchor::frame(root, Attribute::Width).equal_to_constant(10.0);
    tree.layout(root, Size::new(10.0, 10.0)).unwrap();
    assert!(!tree.needs_layout());

    width.set_constant(20.0);
    assert!(!tree.needs_layout());

    tree.activate(&[width.clone()]).unwrap();
    tree.layout(root, Size::new(10.0, 10.0)).unwrap();
    width.set_constant(20.0);
    assert!(!tree.needs_layout());
    width.set_constant(30.0);
    assert!(tree.needs_layout());

    tree.layout(root, Size::new(10.0, 10.0)).unwrap();
    tree.deactivate(&[width.clone()]);
    tree.layout(root, Size::new(10.0, 10.0)).unwrap();
    width.set_constant(40.0);
    assert!(!tree.needs_layout());
}

#[test]
fn priority_changes_dirty_the_tree() {
    let mut tree = LayoutTree::new();
    let root = tree.create_node();
    let width = Anchor::frame(root, Attribute::Width).equal_to_constant(10.0);
    tree.activate(&[width.clone()]).unwrap();
    tree.layout(root, Size::new(10.0, 10.0)).unwrap();
    width.set_priority(Priority::DEFAULT_LOW);
    assert!(tree.needs_layout());
}

#[test]
fn layout_if_needed_skips_clean_trees() {
    let mut tree = LayoutTree::new();
    let root = tree.create_node();
    let size = Size::new(100.0, 50.0);
    let report = tree.layout_if_needed(root, size).unwrap();
    assert_eq!(report.map(|report| report.passes), Some(1));
    assert_eq!(tree.layout_if_needed(root, size).unwrap(), None);
    assert!(tree
        .layout_if_needed(root, Size::new(120.0, 50.0))
        .unwrap()
        .is_some());
}

#[test]
fn scroll_offsets_need_a_scroll_container() {
    let mut tree = LayoutTree::new();
    let plain = tree.create_node();
    assert_eq!(
        tree.set_scroll_offset(plain, 10.0),
        Err(LayoutError::NotScrollContainer { id: plain })
    );
    assert_eq!(
        tree.set_scroll_observer(plain, None),
        Err(LayoutError::NotScrollContainer { id: plain })
    );
    assert_eq!(tree.scroll_offset(plain), Ok(0.0));
}

#[test]
fn scroll_offset_clamps_to_content() {
    let mut tree = LayoutTree::new();
    let root = tree.create_node();
    let scroll = tree.create_scroll_node(None);
    tree.set_frame(scroll, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
    tree.add_child(root, scroll).unwrap();
    let block = tree.create_measured_node(Rc::new(FixedSizePolicy::new(100.0, 160.0)));
    tree.set_automatic_sizing(block, false).unwrap();
    tree.add_child(scroll, block).unwrap();
    let edges: Vec<LayoutConstraint> = [Attribute::Top, Attribute::Bottom, Attribute::Left]
        .into_iter()
        .map(|attribute| {
            Anchor::frame(block, attribute).equal_to(Anchor::content(scroll, attribute))
        })
        .collect();
    tree.activate(&edges).unwrap();
    tree.layout(root, Size::new(100.0, 100.0)).unwrap();

    assert_eq!(tree.max_scroll_offset(scroll), Ok(60.0));
    assert_eq!(tree.set_scroll_offset(scroll, 500.0), Ok(60.0));
    assert_eq!(tree.set_scroll_offset(scroll, -5.0), Ok(0.0));
    assert_eq!(tree.set_scroll_offset(scroll, 30.0), Ok(30.0));
    assert_eq!(tree.set_scroll_offset(scroll, f32::NAN), Ok(30.0));

    tree.layout(root, Size::new(100.0, 100.0)).unwrap();
    assert_eq!(tree.scroll_offset(scroll), Ok(30.0));
}

#[test]
fn corner_radius_is_never_negative() {
    let mut tree = LayoutTree::new();
    let node = tree.create_node();
    tree.set_corner_radius(node, -4.0).unwrap();
    assert_eq!(tree.corner_radius(node), Ok(0.0));
    tree.set_corner_radius(node, f32::NAN).unwrap();
    assert_eq!(tree.corner_radius(node), Ok(0.0));
    tree.set_corner_radius(node, 12.0).unwrap();
    assert_eq!(tree.corner_radius(node), Ok(12.0));
}

#[test]
fn disabling_automatic_sizing_reaches_every_descendant() {
    let mut tree = LayoutTree::new();
    let root = tree.create_node();
    let child = tree.create_node();
    let grandchild = tree.create_node();
    tree.add_child(root, child).unwrap();
    tree.add_child(child, grandchild).unwrap();
    tree.disable_automatic_sizing_in_subtree(root).unwrap();
    for id in [root, child, grandchild] {
        assert!(!tree.node(id).unwrap().automatic_sizing());
    }
}
