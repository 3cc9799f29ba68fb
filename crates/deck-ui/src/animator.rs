//! Frame-driven view property animations.
//!
//! [`FrameAnimator`] records the animatable properties of every view, runs a
//! change block against the tree, and interpolates whatever the block changed
//! over the following frames. A direct write to an animating property wins:
//! the track notices on the next frame and stops touching it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use deck_animation::{AnimationSpec, Lerp, Tween};
use deck_core::{FrameCallbackRegistration, FrameClock, Shared, WeakShared};
use deck_ui_graphics::{Rect, Transform};

use crate::view::{ViewId, ViewNode};
use crate::ViewTree;

/// Block of property writes to animate.
pub type Changes = Box<dyn FnOnce(&mut ViewTree) + 'static>;

/// Called once: `true` when an animation reaches its end time, `false` when
/// it could not start.
pub type Completion = Box<dyn FnOnce(bool) + 'static>;

/// Host capability for animating view properties.
pub trait ViewAnimator {
    /// Apply `changes` and animate the affected properties under `spec`.
    ///
    /// `completion` runs on a later frame. If there is nothing left to
    /// animate (the tree is gone) it runs at once with `false`.
    fn animate(&self, spec: AnimationSpec, changes: Changes, completion: Option<Completion>);

    /// Stop animating every property of `view`, leaving its current values
    /// in place. Animations that lose their tracks still complete on time.
    fn stop_animations(&self, view: ViewId);

    /// Whether any animation is still pending completion.
    fn is_animating(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Property {
    Frame,
    Transform,
    Alpha,
}

struct PropertyTrack<T> {
    view: ViewId,
    tween: Tween<T>,
    last: T,
}

impl<T: Lerp + Clone + PartialEq> PropertyTrack<T> {
    fn new(view: ViewId, from: T, to: T, spec: AnimationSpec) -> Self {
        Self {
            view,
            last: from.clone(),
            tween: Tween::new(from, to, spec),
        }
    }

    /// Returns `false` once something else has written the slot.
    fn step(&mut self, slot: &mut T, elapsed_nanos: u64) -> bool {
        if *slot != self.last {
            return false;
        }
        let value = self.tween.value_at(elapsed_nanos);
        *slot = value.clone();
        self.last = value;
        true
    }
}

enum Track {
    Frame(PropertyTrack<Rect>),
    Transform(PropertyTrack<Transform>),
    Alpha(PropertyTrack<f32>),
}

impl Track {
    fn key(&self) -> (ViewId, Property) {
        match self {
            Track::Frame(track) => (track.view, Property::Frame),
            Track::Transform(track) => (track.view, Property::Transform),
            Track::Alpha(track) => (track.view, Property::Alpha),
        }
    }

    fn step(&mut self, tree: &mut ViewTree, elapsed_nanos: u64) -> bool {
        let (view, _) = self.key();
        let Ok(node) = tree.node_mut(view) else {
            return false;
        };
        match self {
            Track::Frame(track) => track.step(&mut node.frame, elapsed_nanos),
            Track::Transform(track) => track.step(&mut node.transform, elapsed_nanos),
            Track::Alpha(track) => track.step(&mut node.alpha, elapsed_nanos),
        }
    }

    /// Put the pre-change value back so the first frame starts from it.
    fn rewind(&self, node: &mut ViewNode) {
        match self {
            Track::Frame(track) => node.frame = track.tween.start,
            Track::Transform(track) => node.transform = track.tween.start,
            Track::Alpha(track) => node.alpha = track.tween.start,
        }
    }
}

#[derive(Clone, Copy)]
struct Recorded {
    frame: Rect,
    transform: Transform,
    alpha: f32,
}

impl Recorded {
    fn of(node: &ViewNode) -> Self {
        Self {
            frame: node.frame,
            transform: node.transform,
            alpha: node.alpha,
        }
    }
}

struct RunningAnimation {
    id: u64,
    spec: AnimationSpec,
    start_nanos: Option<u64>,
    tracks: Vec<Track>,
    completion: Option<Completion>,
}

#[derive(Default)]
struct AnimatorState {
    running: Vec<RunningAnimation>,
    next_id: u64,
    frame: Option<FrameCallbackRegistration>,
}

/// [`ViewAnimator`] driven by a [`FrameClock`].
#[derive(Clone)]
pub struct FrameAnimator {
    tree: WeakShared<ViewTree>,
    clock: FrameClock,
    state: Rc<RefCell<AnimatorState>>,
}

impl FrameAnimator {
    pub fn new(tree: &Shared<ViewTree>, clock: FrameClock) -> Self {
        Self {
            tree: tree.downgrade(),
            clock,
            state: Rc::new(RefCell::new(AnimatorState::default())),
        }
    }

    pub fn running_count(&self) -> usize {
        self.state.borrow().running.len()
    }

    fn ensure_frame(&self) {
        if self.state.borrow().frame.is_some() {
            return;
        }
        let weak_state = Rc::downgrade(&self.state);
        let tree = self.tree.clone();
        let clock = self.clock.clone();
        let registration = self.clock.with_frame_nanos(move |nanos| {
            on_frame(weak_state, tree, clock, nanos);
        });
        self.state.borrow_mut().frame = Some(registration);
    }
}

impl ViewAnimator for FrameAnimator {
    fn animate(&self, spec: AnimationSpec, changes: Changes, completion: Option<Completion>) {
        self.clock.runtime_handle().assert_ui_thread();
        let Some(tree) = self.tree.upgrade() else {
            log::debug!("view tree dropped; skipping animation");
            if let Some(completion) = completion {
                completion(false);
            }
            return;
        };

        let tracks = tree.update(|tree| {
            let before: Vec<(ViewId, Recorded)> = tree
                .views()
                .map(|(id, node)| (id, Recorded::of(node)))
                .collect();
            changes(tree);

            let mut tracks = Vec::new();
            for (view, old) in before {
                let Ok(node) = tree.node(view) else {
                    continue;
                };
                if node.frame != old.frame {
                    tracks.push(Track::Frame(PropertyTrack::new(
                        view, old.frame, node.frame, spec,
                    )));
                }
                if node.transform != old.transform {
                    tracks.push(Track::Transform(PropertyTrack::new(
                        view,
                        old.transform,
                        node.transform,
                        spec,
                    )));
                }
                if node.alpha != old.alpha {
                    tracks.push(Track::Alpha(PropertyTrack::new(
                        view, old.alpha, node.alpha, spec,
                    )));
                }
            }
            if !spec.is_instant() {
                for track in &tracks {
                    if let Ok(node) = tree.node_mut(track.key().0) {
                        track.rewind(node);
                    }
                }
            }
            tracks
        });

        {
            let mut state = self.state.borrow_mut();
            // A newer animation of the same property replaces the older track.
            for running in &mut state.running {
                running
                    .tracks
                    .retain(|existing| !tracks.iter().any(|track| track.key() == existing.key()));
            }
            let id = state.next_id;
            state.next_id += 1;
            log::trace!(
                "animation {id}: {} track(s) over {}ms",
                tracks.len(),
                spec.duration_millis
            );
            state.running.push(RunningAnimation {
                id,
                spec,
                start_nanos: None,
                tracks,
                completion,
            });
        }
        self.ensure_frame();
    }

    fn stop_animations(&self, view: ViewId) {
        for running in &mut self.state.borrow_mut().running {
            running.tracks.retain(|track| track.key().0 != view);
        }
    }

    fn is_animating(&self) -> bool {
        !self.state.borrow().running.is_empty()
    }
}

fn on_frame(
    state: Weak<RefCell<AnimatorState>>,
    tree: WeakShared<ViewTree>,
    clock: FrameClock,
    nanos: u64,
) {
    let Some(state) = state.upgrade() else {
        return;
    };
    if let Some(registration) = state.borrow_mut().frame.take() {
        registration.detach();
    }

    let mut finished: Vec<(u64, Option<Completion>)> = Vec::new();
    {
        let mut guard = state.borrow_mut();
        let tree = tree.upgrade();
        for animation in &mut guard.running {
            let start = *animation.start_nanos.get_or_insert(nanos);
            let elapsed = nanos.saturating_sub(start);
            if let Some(tree) = &tree {
                tree.update(|tree| {
                    animation.tracks.retain_mut(|track| {
                        let kept = track.step(tree, elapsed);
                        if !kept {
                            log::trace!("animation {}: track {:?} superseded", animation.id, track.key());
                        }
                        kept
                    });
                });
            }
            if elapsed >= animation.spec.total_nanos() {
                finished.push((animation.id, animation.completion.take()));
            }
        }
        guard
            .running
            .retain(|animation| !finished.iter().any(|(id, _)| *id == animation.id));
    }

    for (id, completion) in finished {
        log::trace!("animation {id} finished");
        if let Some(completion) = completion {
            completion(true);
        }
    }

    let reschedule = {
        let guard = state.borrow();
        !guard.running.is_empty() && guard.frame.is_none()
    };
    if reschedule {
        let weak_state = Rc::downgrade(&state);
        let next_clock = clock.clone();
        let registration = clock.with_frame_nanos(move |nanos| {
            on_frame(weak_state, tree, next_clock, nanos);
        });
        state.borrow_mut().frame = Some(registration);
    }
}

#[cfg(test)]
#[path = "tests/animator_tests.rs"]
mod tests;
