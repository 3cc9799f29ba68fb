//! Arena of views addressed by [`ViewId`].
//!
//! The host owns the tree; components that decorate a presentation hold
//! `ViewId`s into it and create or destroy only the views they own.

use deck_core::collections::map::HashMap;
use deck_foundation::RecognizerId;
use deck_ui_graphics::{Point, Rect};
use deck_ui_layout::{ConstraintId, ConstraintSet, LayoutConstraint, LayoutContext};

use crate::view::{ViewContent, ViewId, ViewNode};
use crate::ViewError;

pub struct ViewTree {
    nodes: HashMap<ViewId, ViewNode>,
    next_id: u64,
    constraints: ConstraintSet<ViewId>,
    needs_layout: bool,
    content_generation: u64,
    snapshot_captures: u64,
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTree {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::default(),
            next_id: 1,
            constraints: ConstraintSet::new(),
            needs_layout: false,
            content_generation: 0,
            snapshot_captures: 0,
        }
    }

    /// Create a detached view.
    pub fn create_view(&mut self, label: &'static str, frame: Rect) -> ViewId {
        let id = ViewId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, ViewNode::new(label, frame));
        id
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All views in unspecified order.
    pub fn views(&self) -> impl Iterator<Item = (ViewId, &ViewNode)> + '_ {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn node(&self, id: ViewId) -> Result<&ViewNode, ViewError> {
        self.nodes.get(&id).ok_or(ViewError::Missing { id })
    }

    pub fn node_mut(&mut self, id: ViewId) -> Result<&mut ViewNode, ViewError> {
        self.nodes.get_mut(&id).ok_or(ViewError::Missing { id })
    }

    pub fn frame(&self, id: ViewId) -> Option<Rect> {
        self.nodes.get(&id).map(|node| node.frame)
    }

    pub fn bounds(&self, id: ViewId) -> Option<Rect> {
        self.nodes.get(&id).map(|node| node.bounds())
    }

    pub fn superview(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    pub fn subviews(&self, id: ViewId) -> &[ViewId] {
        self.nodes
            .get(&id)
            .map(|node| node.children())
            .unwrap_or(&[])
    }

    pub fn is_ancestor(&self, ancestor: ViewId, view: ViewId) -> bool {
        let mut current = Some(view);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.superview(id);
        }
        false
    }

    /// Append `child` as the frontmost subview of `parent`.
    pub fn add_subview(&mut self, parent: ViewId, child: ViewId) -> Result<(), ViewError> {
        self.check_insert(parent, child)?;
        self.detach(child);
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        self.needs_layout = true;
        Ok(())
    }

    /// Insert `child` into `sibling`'s superview directly behind `sibling`.
    pub fn insert_subview_below(&mut self, child: ViewId, sibling: ViewId) -> Result<(), ViewError> {
        let parent = self
            .superview(sibling)
            .ok_or(ViewError::NoSuperview { id: sibling })?;
        self.check_insert(parent, child)?;
        self.detach(child);
        let siblings = &mut self.node_mut(parent)?.children;
        let index = siblings
            .iter()
            .position(|id| *id == sibling)
            .unwrap_or(0);
        siblings.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        self.needs_layout = true;
        Ok(())
    }

    fn check_insert(&self, parent: ViewId, child: ViewId) -> Result<(), ViewError> {
        self.node(parent)?;
        self.node(child)?;
        if self.is_ancestor(child, parent) {
            return Err(ViewError::WouldCreateCycle { parent, child });
        }
        Ok(())
    }

    fn detach(&mut self, child: ViewId) {
        if let Some(parent) = self.superview(child) {
            if let Some(node) = self.nodes.get_mut(&parent) {
                node.children.retain(|id| *id != child);
            }
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = None;
        }
    }

    pub fn remove_from_superview(&mut self, id: ViewId) -> Result<(), ViewError> {
        self.node(id)?;
        self.detach(id);
        Ok(())
    }

    /// Remove `id` and its whole subtree from the arena, along with every
    /// constraint that mentions a removed view.
    pub fn destroy(&mut self, id: ViewId) -> Result<usize, ViewError> {
        self.node(id)?;
        self.detach(id);
        let mut stack = vec![id];
        let mut removed = 0;
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children.iter().copied());
                self.constraints.remove_view(current);
                removed += 1;
            }
        }
        // Masks pointing into the removed subtree no longer resolve.
        let nodes = &self.nodes;
        let dangling: Vec<ViewId> = nodes
            .iter()
            .filter(|(_, node)| node.mask.is_some_and(|mask| !nodes.contains_key(&mask)))
            .map(|(id, _)| *id)
            .collect();
        for view in dangling {
            if let Some(node) = self.nodes.get_mut(&view) {
                node.mask = None;
            }
        }
        Ok(removed)
    }

    /// Destroy every subview of `parent`.
    pub fn remove_all_subviews(&mut self, parent: ViewId) -> Result<usize, ViewError> {
        let children: Vec<ViewId> = self.node(parent)?.children.to_vec();
        let mut removed = 0;
        for child in children {
            removed += self.destroy(child)?;
        }
        Ok(removed)
    }

    pub fn depth(&self, id: ViewId) -> usize {
        let mut depth = 0;
        let mut current = self.superview(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.superview(parent);
        }
        depth
    }

    /// Origin of `id` in the coordinates of its root ancestor. Transforms are
    /// not applied.
    pub fn origin_in_root(&self, id: ViewId) -> Option<Point> {
        let mut node = self.nodes.get(&id)?;
        let mut x = node.frame.x;
        let mut y = node.frame.y;
        while let Some(parent) = node.parent {
            node = self.nodes.get(&parent)?;
            if node.parent.is_some() {
                x += node.frame.x;
                y += node.frame.y;
            }
        }
        Some(Point::new(x, y))
    }

    /// Convert `rect` from `from`'s bounds coordinates into `to`'s.
    pub fn convert_rect(&self, rect: Rect, from: ViewId, to: ViewId) -> Option<Rect> {
        let from_origin = self.bounds_origin_in_root(from)?;
        let to_origin = self.bounds_origin_in_root(to)?;
        Some(rect.translate(from_origin.x - to_origin.x, from_origin.y - to_origin.y))
    }

    /// Where `id`'s own bounds origin sits in root coordinates. The root
    /// itself defines the coordinate space, so its frame origin is ignored.
    fn bounds_origin_in_root(&self, id: ViewId) -> Option<Point> {
        let node = self.nodes.get(&id)?;
        if node.parent.is_none() {
            Some(Point::ZERO)
        } else {
            self.origin_in_root(id)
        }
    }

    pub fn attach_recognizer(&mut self, view: ViewId, recognizer: RecognizerId) -> Result<(), ViewError> {
        let node = self.node_mut(view)?;
        if !node.recognizers.contains(&recognizer) {
            node.recognizers.push(recognizer);
        }
        Ok(())
    }

    pub fn detach_recognizer(&mut self, view: ViewId, recognizer: RecognizerId) {
        if let Some(node) = self.nodes.get_mut(&view) {
            node.recognizers.retain(|id| *id != recognizer);
        }
    }

    // Constraints.

    pub fn add_constraint(&mut self, constraint: LayoutConstraint<ViewId>) -> ConstraintId {
        self.needs_layout = true;
        self.constraints.add(constraint)
    }

    pub fn add_active_constraint(&mut self, constraint: LayoutConstraint<ViewId>) -> ConstraintId {
        self.needs_layout = true;
        self.constraints.add_active(constraint)
    }

    pub fn activate_constraint(&mut self, id: ConstraintId) -> Result<(), ViewError> {
        self.constraints.activate(id)?;
        self.needs_layout = true;
        Ok(())
    }

    pub fn deactivate_constraint(&mut self, id: ConstraintId) -> Result<(), ViewError> {
        self.constraints.deactivate(id)?;
        self.needs_layout = true;
        Ok(())
    }

    pub fn remove_constraint(&mut self, id: ConstraintId) -> Option<LayoutConstraint<ViewId>> {
        self.needs_layout = true;
        self.constraints.remove(id)
    }

    pub fn constraints(&self) -> &ConstraintSet<ViewId> {
        &self.constraints
    }

    pub fn set_needs_layout(&mut self) {
        self.needs_layout = true;
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Resolve active constraints if anything changed since the last pass.
    pub fn layout_if_needed(&mut self) -> usize {
        if !self.needs_layout {
            return 0;
        }
        self.needs_layout = false;
        let mut pass = LayoutPass {
            nodes: &mut self.nodes,
        };
        let applied = self.constraints.resolve(&mut pass);
        log::trace!("layout pass applied {} frame(s)", applied.len());
        applied.len()
    }

    // Content and snapshots.

    /// Record that some view's drawn content changed.
    pub fn mark_content_changed(&mut self) {
        self.content_generation += 1;
    }

    pub fn content_generation(&self) -> u64 {
        self.content_generation
    }

    /// Capture a live snapshot view of `source`.
    ///
    /// With `after_screen_updates` pending layout is flushed first so the
    /// snapshot reflects the current state. The returned view is detached and
    /// sized to `source`'s bounds.
    pub fn snapshot_view(
        &mut self,
        source: ViewId,
        after_screen_updates: bool,
    ) -> Result<ViewId, ViewError> {
        let bounds = self.node(source)?.bounds();
        if after_screen_updates {
            self.layout_if_needed();
            self.content_generation += 1;
        }
        let snapshot = self.create_view("snapshot", bounds);
        self.node_mut(snapshot)?.content = ViewContent::Snapshot {
            source,
            generation: self.content_generation,
        };
        self.snapshot_captures += 1;
        log::trace!(
            "captured snapshot {snapshot} of {source} at generation {}",
            self.content_generation
        );
        Ok(snapshot)
    }

    /// Total snapshots captured over the tree's lifetime.
    pub fn snapshot_captures(&self) -> u64 {
        self.snapshot_captures
    }
}

struct LayoutPass<'a> {
    nodes: &'a mut HashMap<ViewId, ViewNode>,
}

impl LayoutPass<'_> {
    fn bounds_origin_in_root(&self, id: ViewId) -> Option<Point> {
        let mut node = self.nodes.get(&id)?;
        if node.parent.is_none() {
            return Some(Point::ZERO);
        }
        let mut x = node.frame.x;
        let mut y = node.frame.y;
        while let Some(parent) = node.parent {
            node = self.nodes.get(&parent)?;
            if node.parent.is_some() {
                x += node.frame.x;
                y += node.frame.y;
            }
        }
        Some(Point::new(x, y))
    }
}

impl LayoutContext<ViewId> for LayoutPass<'_> {
    fn frame(&self, view: ViewId) -> Option<Rect> {
        self.nodes.get(&view).map(|node| node.frame)
    }

    fn rect_in_superview_of(&self, view: ViewId, target: ViewId) -> Option<Rect> {
        let parent = self.nodes.get(&view)?.parent?;
        let target_bounds = self.nodes.get(&target)?.bounds();
        let target_origin = self.bounds_origin_in_root(target)?;
        let parent_origin = self.bounds_origin_in_root(parent)?;
        Some(target_bounds.translate(
            target_origin.x - parent_origin.x,
            target_origin.y - parent_origin.y,
        ))
    }

    fn depth(&self, view: ViewId) -> usize {
        let mut depth = 0;
        let mut current = self.nodes.get(&view).and_then(|node| node.parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes.get(&parent).and_then(|node| node.parent);
        }
        depth
    }

    fn set_frame(&mut self, view: ViewId, frame: Rect) {
        if let Some(node) = self.nodes.get_mut(&view) {
            node.frame = frame;
        }
    }
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
