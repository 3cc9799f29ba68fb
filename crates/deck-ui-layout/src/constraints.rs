//! Layout constraints system
//!
//! A small subset of anchor-based layout: pin a view to another view's edges,
//! center it, tie its height to another view's height, or force an aspect
//! ratio. Constraints are created inactive and only participate in
//! [`ConstraintSet::resolve`] while active.

use std::fmt;
use std::hash::Hash;

use deck_core::collections::map::HashMap;
use deck_ui_graphics::{EdgeInsets, Rect, Size};
use smallvec::SmallVec;

pub type ConstraintId = u64;

/// A single layout rule for `view`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutConstraint<V> {
    /// All four edges of `view` follow the edges of `to`, inset by `insets`.
    PinEdges { view: V, to: V, insets: EdgeInsets },
    /// `view` shares its center with `to`.
    CenterIn { view: V, to: V },
    /// `view.height == to.height + constant`.
    HeightEqual { view: V, to: V, constant: f32 },
    /// `view.width == view.height * ratio`.
    AspectRatio { view: V, ratio: f32 },
}

impl<V: Copy + Eq> LayoutConstraint<V> {
    /// The view whose frame this constraint writes.
    pub fn view(&self) -> V {
        match *self {
            LayoutConstraint::PinEdges { view, .. }
            | LayoutConstraint::CenterIn { view, .. }
            | LayoutConstraint::HeightEqual { view, .. }
            | LayoutConstraint::AspectRatio { view, .. } => view,
        }
    }

    /// The view this constraint reads from, if any.
    pub fn target(&self) -> Option<V> {
        match *self {
            LayoutConstraint::PinEdges { to, .. }
            | LayoutConstraint::CenterIn { to, .. }
            | LayoutConstraint::HeightEqual { to, .. } => Some(to),
            LayoutConstraint::AspectRatio { .. } => None,
        }
    }

    pub fn involves(&self, other: V) -> bool {
        self.view() == other || self.target() == Some(other)
    }

    /// Constraints are applied position-last so centering sees final sizes.
    fn pass(&self) -> u8 {
        match self {
            LayoutConstraint::PinEdges { .. } => 0,
            LayoutConstraint::HeightEqual { .. } => 1,
            LayoutConstraint::AspectRatio { .. } => 2,
            LayoutConstraint::CenterIn { .. } => 3,
        }
    }

    fn same_slot(&self, other: &Self) -> bool {
        self.view() == other.view() && std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Geometry queries the solver needs from the view hierarchy.
pub trait LayoutContext<V> {
    /// Current frame of `view` in its superview's coordinates.
    fn frame(&self, view: V) -> Option<Rect>;

    /// Bounds of `target` expressed in the coordinate space of `view`'s
    /// superview.
    fn rect_in_superview_of(&self, view: V, target: V) -> Option<Rect>;

    /// Distance from the root; parents resolve before their children.
    fn depth(&self, view: V) -> usize;

    /// Write a resolved frame back to the hierarchy.
    fn set_frame(&mut self, view: V, frame: Rect);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    UnknownConstraint { id: ConstraintId },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::UnknownConstraint { id } => write!(f, "constraint {id} not found"),
        }
    }
}

impl std::error::Error for LayoutError {}

struct Entry<V> {
    constraint: LayoutConstraint<V>,
    active: bool,
}

/// Owns constraints and resolves frames for the views they govern.
pub struct ConstraintSet<V> {
    entries: HashMap<ConstraintId, Entry<V>>,
    next_id: ConstraintId,
}

impl<V> Default for ConstraintSet<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::default(),
            next_id: 1,
        }
    }
}

impl<V: Copy + Eq + Hash + fmt::Debug> ConstraintSet<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an inactive constraint.
    pub fn add(&mut self, constraint: LayoutConstraint<V>) -> ConstraintId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(
            id,
            Entry {
                constraint,
                active: false,
            },
        );
        id
    }

    /// Register and immediately activate a constraint.
    pub fn add_active(&mut self, constraint: LayoutConstraint<V>) -> ConstraintId {
        let id = self.add(constraint);
        self.entries.entry(id).and_modify(|entry| entry.active = true);
        self.warn_on_conflict(id);
        id
    }

    pub fn activate(&mut self, id: ConstraintId) -> Result<(), LayoutError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(LayoutError::UnknownConstraint { id })?;
        entry.active = true;
        self.warn_on_conflict(id);
        Ok(())
    }

    pub fn deactivate(&mut self, id: ConstraintId) -> Result<(), LayoutError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(LayoutError::UnknownConstraint { id })?;
        entry.active = false;
        Ok(())
    }

    pub fn remove(&mut self, id: ConstraintId) -> Option<LayoutConstraint<V>> {
        self.entries.remove(&id).map(|entry| entry.constraint)
    }

    /// Drop every constraint that reads from or writes to `view`.
    pub fn remove_view(&mut self, view: V) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.constraint.involves(view));
        before - self.entries.len()
    }

    pub fn get(&self, id: ConstraintId) -> Option<&LayoutConstraint<V>> {
        self.entries.get(&id).map(|entry| &entry.constraint)
    }

    pub fn is_active(&self, id: ConstraintId) -> bool {
        self.entries.get(&id).is_some_and(|entry| entry.active)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Active constraints writing to `view`, oldest first.
    pub fn active_for(&self, view: V) -> Vec<(ConstraintId, LayoutConstraint<V>)> {
        let mut found: Vec<(ConstraintId, LayoutConstraint<V>)> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.active && entry.constraint.view() == view)
            .map(|(id, entry)| (*id, entry.constraint))
            .collect();
        found.sort_by_key(|(id, _)| *id);
        found
    }

    fn warn_on_conflict(&self, id: ConstraintId) {
        let Some(added) = self.entries.get(&id) else {
            return;
        };
        let clashes = self.entries.iter().any(|(other_id, other)| {
            *other_id != id && other.active && other.constraint.same_slot(&added.constraint)
        });
        if clashes {
            log::warn!(
                "conflicting constraints on {:?}; the most recently added one wins (activated {id})",
                added.constraint.view()
            );
        }
    }

    /// Compute and apply frames for every view governed by an active
    /// constraint.
    ///
    /// Views are resolved parents-first and each frame is written back
    /// through the context before its descendants are resolved. Returns the
    /// frames that were applied, in application order.
    pub fn resolve(&self, context: &mut impl LayoutContext<V>) -> Vec<(V, Rect)> {
        let mut views: Vec<V> = Vec::new();
        for entry in self.entries.values().filter(|entry| entry.active) {
            let view = entry.constraint.view();
            if !views.contains(&view) {
                views.push(view);
            }
        }
        views.sort_by_key(|view| context.depth(*view));

        let mut applied: Vec<(V, Rect)> = Vec::with_capacity(views.len());
        for view in views {
            let Some(mut frame) = context.frame(view) else {
                log::debug!("skipping constraints for detached view {view:?}");
                continue;
            };
            let mut rules: SmallVec<[(ConstraintId, LayoutConstraint<V>); 4]> =
                self.active_for(view).into_iter().collect();
            rules.sort_by_key(|(id, constraint)| (constraint.pass(), *id));

            for (_, constraint) in rules {
                match constraint {
                    LayoutConstraint::PinEdges { to, insets, .. } => {
                        if let Some(rect) = context.rect_in_superview_of(view, to) {
                            frame = rect.inset(insets);
                        }
                    }
                    LayoutConstraint::HeightEqual { to, constant, .. } => {
                        if let Some(rect) = context.rect_in_superview_of(view, to) {
                            frame.height = (rect.height + constant).max(0.0);
                        }
                    }
                    LayoutConstraint::AspectRatio { ratio, .. } => {
                        frame.width = (frame.height * ratio).max(0.0);
                    }
                    LayoutConstraint::CenterIn { to, .. } => {
                        if let Some(rect) = context.rect_in_superview_of(view, to) {
                            frame = rect.centered(Size::new(frame.width, frame.height));
                        }
                    }
                }
            }
            context.set_frame(view, frame);
            applied.push((view, frame));
        }
        applied
    }
}

#[cfg(test)]
#[path = "tests/constraints_tests.rs"]
mod tests;
