use super::*;
use std::collections::HashMap as StdHashMap;

/// Flat hierarchy: every view except `ROOT` is a direct child of `ROOT`,
/// unless listed in `parents`.
#[derive(Default)]
struct Hierarchy {
    frames: StdHashMap<u32, Rect>,
    parents: StdHashMap<u32, u32>,
}

const ROOT: u32 = 0;

impl Hierarchy {
    fn with(mut self, view: u32, frame: Rect) -> Self {
        self.frames.insert(view, frame);
        self
    }

    fn child_of(mut self, view: u32, parent: u32) -> Self {
        self.parents.insert(view, parent);
        self
    }

    fn parent(&self, view: u32) -> Option<u32> {
        if view == ROOT {
            None
        } else {
            Some(*self.parents.get(&view).unwrap_or(&ROOT))
        }
    }

    fn origin_in_root(&self, view: u32) -> (f32, f32) {
        let mut x = 0.0;
        let mut y = 0.0;
        let mut current = Some(view);
        while let Some(v) = current {
            if v != ROOT {
                let frame = self.frames[&v];
                x += frame.x;
                y += frame.y;
            }
            current = self.parent(v);
        }
        (x, y)
    }
}

impl LayoutContext<u32> for Hierarchy {
    fn frame(&self, view: u32) -> Option<Rect> {
        self.frames.get(&view).copied()
    }

    fn rect_in_superview_of(&self, view: u32, target: u32) -> Option<Rect> {
        let target_frame = self.frames.get(&target)?;
        let (tx, ty) = self.origin_in_root(target);
        let (px, py) = match self.parent(view) {
            Some(parent) => self.origin_in_root(parent),
            None => (0.0, 0.0),
        };
        Some(Rect::new(tx - px, ty - py, target_frame.width, target_frame.height))
    }

    fn depth(&self, view: u32) -> usize {
        let mut depth = 0;
        let mut current = self.parent(view);
        while let Some(v) = current {
            depth += 1;
            current = self.parent(v);
        }
        depth
    }

    fn set_frame(&mut self, view: u32, frame: Rect) {
        self.frames.insert(view, frame);
    }
}

#[test]
fn constraints_start_inactive() {
    let mut set = ConstraintSet::new();
    let id = set.add(LayoutConstraint::AspectRatio { view: 1u32, ratio: 0.5 });
    assert!(!set.is_active(id));
    assert!(set.active_for(1).is_empty());

    set.activate(id).expect("known constraint");
    assert!(set.is_active(id));
    assert_eq!(set.active_for(1).len(), 1);
}

#[test]
fn unknown_constraint_reports_error() {
    let mut set: ConstraintSet<u32> = ConstraintSet::new();
    assert_eq!(
        set.deactivate(42),
        Err(LayoutError::UnknownConstraint { id: 42 })
    );
    assert_eq!(
        LayoutError::UnknownConstraint { id: 42 }.to_string(),
        "constraint 42 not found"
    );
}

#[test]
fn centered_box_sized_from_height_and_ratio() {
    let mut hierarchy = Hierarchy::default()
        .with(ROOT, Rect::new(0.0, 0.0, 320.0, 568.0))
        .with(1, Rect::default());
    let mut set = ConstraintSet::new();
    set.add_active(LayoutConstraint::CenterIn { view: 1, to: ROOT });
    set.add_active(LayoutConstraint::HeightEqual {
        view: 1,
        to: ROOT,
        constant: -40.0,
    });
    set.add_active(LayoutConstraint::AspectRatio {
        view: 1,
        ratio: 320.0 / 568.0,
    });

    let applied = set.resolve(&mut hierarchy);

    assert_eq!(applied.len(), 1);
    let frame = hierarchy.frames[&1];
    assert_eq!(frame.height, 528.0);
    assert!((frame.width - 528.0 * 320.0 / 568.0).abs() < 1e-3);
    assert!((frame.center().x - 160.0).abs() < 1e-3);
    assert!((frame.center().y - 284.0).abs() < 1e-3);
}

#[test]
fn children_pinned_to_a_resolved_parent_see_its_new_size() {
    let mut hierarchy = Hierarchy::default()
        .with(ROOT, Rect::new(0.0, 0.0, 400.0, 400.0))
        .with(1, Rect::new(0.0, 0.0, 10.0, 10.0))
        .with(2, Rect::default())
        .child_of(2, 1);
    let mut set = ConstraintSet::new();
    set.add_active(LayoutConstraint::PinEdges {
        view: 2,
        to: 1,
        insets: EdgeInsets::ZERO,
    });
    set.add_active(LayoutConstraint::PinEdges {
        view: 1,
        to: ROOT,
        insets: EdgeInsets::uniform(10.0),
    });

    set.resolve(&mut hierarchy);

    assert_eq!(hierarchy.frames[&1], Rect::new(10.0, 10.0, 380.0, 380.0));
    assert_eq!(hierarchy.frames[&2], Rect::new(0.0, 0.0, 380.0, 380.0));
}

#[test]
fn pinning_to_an_ancestor_uses_its_coordinates() {
    // View 2 lives inside view 1, which is offset 20pt down from the root.
    let mut hierarchy = Hierarchy::default()
        .with(ROOT, Rect::new(0.0, 0.0, 375.0, 667.0))
        .with(1, Rect::new(0.0, 20.0, 375.0, 647.0))
        .with(2, Rect::default())
        .child_of(2, 1);
    let mut set = ConstraintSet::new();
    set.add_active(LayoutConstraint::PinEdges {
        view: 2,
        to: ROOT,
        insets: EdgeInsets::ZERO,
    });

    set.resolve(&mut hierarchy);

    assert_eq!(hierarchy.frames[&2], Rect::new(0.0, -20.0, 375.0, 667.0));
}

#[test]
fn newest_conflicting_constraint_wins() {
    let mut hierarchy = Hierarchy::default()
        .with(ROOT, Rect::new(0.0, 0.0, 100.0, 100.0))
        .with(1, Rect::new(0.0, 0.0, 10.0, 100.0));
    let mut set = ConstraintSet::new();
    set.add_active(LayoutConstraint::AspectRatio { view: 1, ratio: 0.5 });
    set.add_active(LayoutConstraint::AspectRatio { view: 1, ratio: 0.25 });

    set.resolve(&mut hierarchy);
    assert_eq!(hierarchy.frames[&1].width, 25.0);
}

#[test]
fn removing_a_view_drops_constraints_that_mention_it() {
    let mut set = ConstraintSet::new();
    set.add_active(LayoutConstraint::CenterIn { view: 1u32, to: 2 });
    set.add_active(LayoutConstraint::PinEdges {
        view: 3,
        to: 1,
        insets: EdgeInsets::ZERO,
    });
    set.add(LayoutConstraint::AspectRatio { view: 4, ratio: 1.0 });

    assert_eq!(set.remove_view(1), 2);
    assert_eq!(set.len(), 1);
}
