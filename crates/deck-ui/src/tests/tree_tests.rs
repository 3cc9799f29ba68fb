use super::*;
use deck_ui_graphics::{EdgeInsets, Size};

fn window() -> (ViewTree, ViewId) {
    let mut tree = ViewTree::new();
    let root = tree.create_view("window", Rect::new(0.0, 0.0, 320.0, 480.0));
    (tree, root)
}

#[test]
fn add_subview_appends_in_front() {
    let (mut tree, root) = window();
    let a = tree.create_view("a", Rect::default());
    let b = tree.create_view("b", Rect::default());
    tree.add_subview(root, a).unwrap();
    tree.add_subview(root, b).unwrap();

    assert_eq!(tree.subviews(root), &[a, b]);
    assert_eq!(tree.superview(a), Some(root));
}

#[test]
fn insert_below_places_view_behind_sibling() {
    let (mut tree, root) = window();
    let front = tree.create_view("front", Rect::default());
    let back = tree.create_view("back", Rect::default());
    tree.add_subview(root, front).unwrap();
    tree.insert_subview_below(back, front).unwrap();

    assert_eq!(tree.subviews(root), &[back, front]);
}

#[test]
fn insert_below_detached_sibling_fails() {
    let (mut tree, _root) = window();
    let loose = tree.create_view("loose", Rect::default());
    let other = tree.create_view("other", Rect::default());

    assert_eq!(
        tree.insert_subview_below(other, loose),
        Err(ViewError::NoSuperview { id: loose })
    );
}

#[test]
fn reparenting_moves_view() {
    let (mut tree, root) = window();
    let container = tree.create_view("container", Rect::default());
    let child = tree.create_view("child", Rect::default());
    tree.add_subview(root, container).unwrap();
    tree.add_subview(root, child).unwrap();
    tree.add_subview(container, child).unwrap();

    assert_eq!(tree.subviews(root), &[container]);
    assert_eq!(tree.subviews(container), &[child]);
}

#[test]
fn cycles_are_rejected() {
    let (mut tree, root) = window();
    let child = tree.create_view("child", Rect::default());
    tree.add_subview(root, child).unwrap();

    assert_eq!(
        tree.add_subview(child, root),
        Err(ViewError::WouldCreateCycle {
            parent: child,
            child: root
        })
    );
}

#[test]
fn destroy_removes_subtree_and_its_constraints() {
    let (mut tree, root) = window();
    let container = tree.create_view("container", Rect::default());
    let inner = tree.create_view("inner", Rect::default());
    tree.add_subview(root, container).unwrap();
    tree.add_subview(container, inner).unwrap();
    tree.add_active_constraint(LayoutConstraint::PinEdges {
        view: inner,
        to: container,
        insets: EdgeInsets::ZERO,
    });

    assert_eq!(tree.destroy(container), Ok(2));
    assert!(!tree.contains(inner));
    assert!(tree.subviews(root).is_empty());
    assert!(tree.constraints().is_empty());
}

#[test]
fn destroying_mask_clears_reference() {
    let (mut tree, root) = window();
    let masked = tree.create_view("masked", Rect::default());
    let mask = tree.create_view("mask", Rect::default());
    tree.add_subview(root, masked).unwrap();
    tree.node_mut(masked).unwrap().mask = Some(mask);

    tree.destroy(mask).unwrap();

    assert_eq!(tree.node(masked).unwrap().mask, None);
}

#[test]
fn remove_all_subviews_destroys_children() {
    let (mut tree, root) = window();
    for _ in 0..3 {
        let child = tree.create_view("child", Rect::default());
        tree.add_subview(root, child).unwrap();
    }

    assert_eq!(tree.remove_all_subviews(root), Ok(3));
    assert_eq!(tree.len(), 1);
}

#[test]
fn missing_views_report_errors() {
    let (mut tree, root) = window();
    let gone = tree.create_view("gone", Rect::default());
    tree.destroy(gone).unwrap();

    assert_eq!(tree.node(gone).err(), Some(ViewError::Missing { id: gone }));
    assert_eq!(
        tree.add_subview(root, gone),
        Err(ViewError::Missing { id: gone })
    );
}

#[test]
fn convert_rect_between_siblings() {
    let (mut tree, root) = window();
    let a = tree.create_view("a", Rect::new(10.0, 20.0, 100.0, 100.0));
    let b = tree.create_view("b", Rect::new(0.0, 100.0, 100.0, 100.0));
    tree.add_subview(root, a).unwrap();
    tree.add_subview(root, b).unwrap();

    let converted = tree
        .convert_rect(Rect::new(0.0, 0.0, 5.0, 5.0), a, b)
        .unwrap();
    assert_eq!(converted, Rect::new(10.0, -80.0, 5.0, 5.0));
}

#[test]
fn layout_pins_children_to_parent() {
    let (mut tree, root) = window();
    let container = tree.create_view("container", Rect::default());
    let child = tree.create_view("child", Rect::default());
    tree.add_subview(root, container).unwrap();
    tree.add_subview(container, child).unwrap();
    tree.add_active_constraint(LayoutConstraint::PinEdges {
        view: container,
        to: root,
        insets: EdgeInsets::vertical(40.0),
    });
    tree.add_active_constraint(LayoutConstraint::PinEdges {
        view: child,
        to: container,
        insets: EdgeInsets::ZERO,
    });

    assert_eq!(tree.layout_if_needed(), 2);
    assert_eq!(tree.frame(container), Some(Rect::new(0.0, 40.0, 320.0, 400.0)));
    assert_eq!(tree.frame(child), Some(Rect::new(0.0, 0.0, 320.0, 400.0)));
    assert!(!tree.needs_layout());
    assert_eq!(tree.layout_if_needed(), 0);
}

#[test]
fn swapping_aspect_constraints_updates_width() {
    let (mut tree, root) = window();
    let view = tree.create_view("view", Rect::new(0.0, 0.0, 100.0, 200.0));
    tree.add_subview(root, view).unwrap();
    let half = tree.add_active_constraint(LayoutConstraint::AspectRatio {
        view,
        ratio: 0.5,
    });
    tree.layout_if_needed();
    assert_eq!(tree.frame(view).map(|f| f.size()), Some(Size::new(100.0, 200.0)));

    tree.deactivate_constraint(half).unwrap();
    tree.add_active_constraint(LayoutConstraint::AspectRatio { view, ratio: 1.0 });
    tree.layout_if_needed();
    assert_eq!(tree.frame(view).map(|f| f.width), Some(200.0));
}

#[test]
fn snapshot_matches_source_bounds_and_counts_captures() {
    let (mut tree, root) = window();
    let source = tree.create_view("source", Rect::new(0.0, 20.0, 320.0, 460.0));
    tree.add_subview(root, source).unwrap();

    let before = tree.content_generation();
    let snapshot = tree.snapshot_view(source, true).unwrap();
    let node = tree.node(snapshot).unwrap();

    assert_eq!(node.frame, Rect::new(0.0, 0.0, 320.0, 460.0));
    assert_eq!(node.parent(), None);
    assert_eq!(
        node.content,
        ViewContent::Snapshot {
            source,
            generation: before + 1
        }
    );
    assert_eq!(tree.snapshot_captures(), 1);

    tree.snapshot_view(source, false).unwrap();
    assert_eq!(tree.snapshot_captures(), 2);
    assert_eq!(tree.content_generation(), before + 1);
}

#[test]
fn recognizers_attach_once() {
    let (mut tree, root) = window();
    let id = RecognizerId::next();
    tree.attach_recognizer(root, id).unwrap();
    tree.attach_recognizer(root, id).unwrap();
    assert_eq!(tree.node(root).unwrap().recognizers(), &[id]);

    tree.detach_recognizer(root, id);
    assert!(tree.node(root).unwrap().recognizers().is_empty());
}
