//! Live copy of the presenting view shown behind the card.
//!
//! The wrapper view is centered in the container and is `margin` points
//! shorter than it; its width follows an aspect-ratio constraint matching the
//! container. Recapturing is expensive, so [`SnapshotManager::refresh`] only
//! rebuilds when the container width actually changes.

use deck_ui::{ConstraintId, LayoutConstraint, ViewError, ViewId, ViewTree};
use deck_ui_graphics::{EdgeInsets, Rect};

pub struct SnapshotManager {
    wrapper: ViewId,
    container: ViewId,
    presenting: ViewId,
    cached_width: Option<f32>,
    aspect_constraint: Option<ConstraintId>,
    rebuilds: u64,
}

impl SnapshotManager {
    /// Create the wrapper view and insert it directly behind `front`.
    pub fn install(
        tree: &mut ViewTree,
        container: ViewId,
        presenting: ViewId,
        front: ViewId,
        margin: f32,
    ) -> Result<Self, ViewError> {
        let wrapper = tree.create_view("snapshot container", Rect::default());
        if let Err(err) = tree.insert_subview_below(wrapper, front) {
            tree.destroy(wrapper)?;
            return Err(err);
        }
        tree.add_active_constraint(LayoutConstraint::CenterIn {
            view: wrapper,
            to: container,
        });
        tree.add_active_constraint(LayoutConstraint::HeightEqual {
            view: wrapper,
            to: container,
            constant: -margin,
        });
        Ok(Self {
            wrapper,
            container,
            presenting,
            cached_width: None,
            aspect_constraint: None,
            rebuilds: 0,
        })
    }

    pub fn wrapper(&self) -> ViewId {
        self.wrapper
    }

    /// Number of times the snapshot was recaptured.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    pub fn aspect_constraint(&self) -> Option<ConstraintId> {
        self.aspect_constraint
    }

    /// Recapture the presenting view if the container width changed since the
    /// last capture. Returns whether a rebuild happened.
    pub fn refresh(&mut self, tree: &mut ViewTree) -> Result<bool, ViewError> {
        let size = tree.node(self.container)?.frame.size();
        if self.cached_width == Some(size.width) {
            return Ok(false);
        }
        let Some(ratio) = size.aspect_ratio() else {
            log::debug!("container {} has no height; skipping snapshot", self.container);
            return Ok(false);
        };

        if let Some(old) = self.aspect_constraint.take() {
            tree.deactivate_constraint(old)?;
            tree.remove_constraint(old);
        }
        self.aspect_constraint = Some(tree.add_active_constraint(LayoutConstraint::AspectRatio {
            view: self.wrapper,
            ratio,
        }));

        let snapshot = tree.snapshot_view(self.presenting, true)?;
        tree.remove_all_subviews(self.wrapper)?;
        tree.add_subview(self.wrapper, snapshot)?;
        tree.add_active_constraint(LayoutConstraint::PinEdges {
            view: snapshot,
            to: self.wrapper,
            insets: EdgeInsets::ZERO,
        });
        tree.layout_if_needed();

        self.cached_width = Some(size.width);
        self.rebuilds += 1;
        log::trace!(
            "snapshot of {} rebuilt for width {} (ratio {ratio:.3})",
            self.presenting,
            size.width
        );
        Ok(true)
    }

    /// Destroy the wrapper and everything in it.
    pub fn teardown(self, tree: &mut ViewTree) -> Result<(), ViewError> {
        tree.destroy(self.wrapper).map(|_| ())
    }
}

#[cfg(test)]
#[path = "tests/snapshot_tests.rs"]
mod tests;
