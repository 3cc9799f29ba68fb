//! The deck presentation controller.
//!
//! Hooks are invoked by the host as the presentation moves through its
//! lifecycle. The controller never holds its own borrow while calling out to
//! host code or user callbacks, so either may call back into it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use deck_core::{NotificationCenter, Shared, Subscription};
use deck_foundation::{
    GestureState, PanGestureRecognizer, PointerEvent, RecognizerId, SimultaneousRecognitionPolicy,
};
use deck_ui::{LayoutConstraint, ViewError, ViewId, ViewTree};
use deck_ui_graphics::{Color, EdgeInsets, Point, Rect, Size, Transform};

use crate::callbacks::{always_dismissible, DeckCallbacks, DismissPolicy};
use crate::geometry;
use crate::gesture::{DragStateMachine, GesturePhase};
use crate::host::{DeckViews, PresentationHost, TransitionCoordinator, STATUS_BAR_FRAME_WILL_CHANGE};
use crate::snapshot::SnapshotManager;
use crate::DeckConfig;

fn skip_missing<T>(operation: &str, result: Result<T, ViewError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("{operation}: {err}; skipping");
            None
        }
    }
}

/// Views created for one presentation and destroyed when it ends.
struct Session {
    background: ViewId,
    snapshot: SnapshotManager,
}

#[derive(Clone, Copy, Debug)]
struct StatusBarPlan {
    full_height: f32,
    target_height: f32,
    delta: f32,
}

/// At most one status bar animation runs; later heights wait in `pending`,
/// newest wins.
#[derive(Debug, Default)]
struct StatusBarUpdate {
    in_flight: bool,
    pending: Option<f32>,
}

pub struct DeckPresentationController {
    config: DeckConfig,
    tree: Shared<ViewTree>,
    views: DeckViews,
    host: Rc<dyn PresentationHost>,
    callbacks: DeckCallbacks,
    dismiss_policy: DismissPolicy,
    recognizer: PanGestureRecognizer,
    drag: DragStateMachine,
    settle_generation: u64,
    session: Option<Session>,
    snapshot_rebuilds: u64,
    status_bar: StatusBarUpdate,
    subscription: Option<Subscription>,
}

impl DeckPresentationController {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(
        config: DeckConfig,
        tree: Shared<ViewTree>,
        views: DeckViews,
        host: Rc<dyn PresentationHost>,
        callbacks: DeckCallbacks,
    ) -> DeckPresentation {
        let controller = Self {
            config,
            tree,
            views,
            host,
            callbacks,
            dismiss_policy: always_dismissible(),
            recognizer: PanGestureRecognizer::new()
                .with_touch_slop(0.0)
                .with_maximum_touches(1),
            drag: DragStateMachine::new(config),
            settle_generation: 0,
            session: None,
            snapshot_rebuilds: 0,
            status_bar: StatusBarUpdate::default(),
            subscription: None,
        };
        DeckPresentation {
            inner: Rc::new(RefCell::new(controller)),
        }
    }

    fn layout_presented(&self) -> Option<Rect> {
        let views = self.views;
        let config = self.config;
        let result = self.tree.update(|tree| {
            geometry::layout_presented(tree, views.presented, views.container, &config)
        });
        skip_missing("lay out presented view", result)
    }

    /// Build the dimming view and snapshot behind the card and start
    /// listening for drags.
    fn install_session(&mut self) -> Result<(), ViewError> {
        if self.session.is_some() {
            return Ok(());
        }
        let views = self.views;
        let margin = self.config.snapshot_vertical_margin;
        let recognizer = self.recognizer.id();
        let (session, rebuilt) = self.tree.update(|tree| -> Result<(Session, bool), ViewError> {
            tree.node(views.window)?;
            tree.node(views.presenting)?;

            let mut snapshot = SnapshotManager::install(
                tree,
                views.container,
                views.presenting,
                views.presented,
                margin,
            )?;
            let background = tree.create_view("deck background", Rect::default());
            tree.node_mut(background)?.background = Some(Color::BLACK);
            if let Err(err) = tree.insert_subview_below(background, snapshot.wrapper()) {
                tree.destroy(background)?;
                snapshot.teardown(tree)?;
                return Err(err);
            }
            // The window, not the container, so the dimming also covers the
            // status bar area.
            tree.add_active_constraint(LayoutConstraint::PinEdges {
                view: background,
                to: views.window,
                insets: EdgeInsets::ZERO,
            });
            tree.node_mut(views.presenting)?.transform = Transform::IDENTITY;

            let rebuilt = snapshot.refresh(tree)?;
            tree.attach_recognizer(views.presented, recognizer)?;
            Ok((
                Session {
                    background,
                    snapshot,
                },
                rebuilt,
            ))
        })?;

        if rebuilt {
            self.snapshot_rebuilds += 1;
        }
        self.session = Some(session);
        self.recognizer.reset();
        self.recognizer.set_enabled(true);
        log::debug!("deck presentation installed on {}", views.presented);
        Ok(())
    }

    fn teardown_session(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let presented = self.views.presented;
        let recognizer = self.recognizer.id();
        let result = self.tree.update(|tree| -> Result<(), ViewError> {
            tree.detach_recognizer(presented, recognizer);
            tree.destroy(session.background)?;
            session.snapshot.teardown(tree)
        });
        skip_missing("tear down presentation views", result);
        self.recognizer.reset();
    }

    fn refresh_snapshot(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let result = self.tree.update(|tree| session.snapshot.refresh(tree));
        let rebuilt = skip_missing("refresh snapshot", result).unwrap_or(false);
        if rebuilt {
            self.snapshot_rebuilds += 1;
        }
        rebuilt
    }

    fn decoration(&self) -> Option<(ViewId, ViewId)> {
        self.session
            .as_ref()
            .map(|session| (session.background, session.snapshot.wrapper()))
    }

    fn set_decoration_alpha(
        tree: &mut ViewTree,
        decoration: Option<(ViewId, ViewId)>,
        alpha: f32,
    ) -> Result<(), ViewError> {
        if let Some((background, wrapper)) = decoration {
            tree.node_mut(background)?.alpha = alpha;
            tree.node_mut(wrapper)?.alpha = alpha;
        }
        Ok(())
    }
}

fn resize_presented(
    tree: &mut ViewTree,
    presented: ViewId,
    size: Size,
    config: &DeckConfig,
) -> Result<(), ViewError> {
    let node = tree.node_mut(presented)?;
    node.frame = geometry::presented_frame(size, config);
    node.mask = None;
    geometry::round_top_corners(tree, presented, config)
}

/// Shared handle to a [`DeckPresentationController`].
///
/// Deferred work (animation completions, notification observers) holds a
/// [`WeakDeckPresentation`] and does nothing once the controller is gone.
#[derive(Clone)]
pub struct DeckPresentation {
    inner: Rc<RefCell<DeckPresentationController>>,
}

#[derive(Clone, Default)]
pub struct WeakDeckPresentation {
    inner: Weak<RefCell<DeckPresentationController>>,
}

impl WeakDeckPresentation {
    pub fn upgrade(&self) -> Option<DeckPresentation> {
        self.inner.upgrade().map(|inner| DeckPresentation { inner })
    }
}

impl DeckPresentation {
    pub fn downgrade(&self) -> WeakDeckPresentation {
        WeakDeckPresentation {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Observe status bar frame changes posted to `center`. Replaces any
    /// previous subscription.
    pub fn attach(&self, center: &NotificationCenter<Rect>) {
        let weak = self.downgrade();
        let subscription = center.subscribe(STATUS_BAR_FRAME_WILL_CHANGE, move |frame: &Rect| {
            if let Some(presentation) = weak.upgrade() {
                presentation.status_bar_frame_will_change(*frame);
            }
        });
        log::debug!("observing {}", subscription.name().0);
        let previous = self.inner.borrow_mut().subscription.replace(subscription);
        if let Some(previous) = previous {
            previous.cancel();
        }
    }

    pub fn detach(&self) {
        let subscription = self.inner.borrow_mut().subscription.take();
        if let Some(subscription) = subscription {
            subscription.cancel();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.inner.borrow().subscription.is_some()
    }

    pub fn set_dismiss_policy(&self, policy: DismissPolicy) {
        self.inner.borrow_mut().dismiss_policy = policy;
    }

    pub fn config(&self) -> DeckConfig {
        self.inner.borrow().config
    }

    pub fn views(&self) -> DeckViews {
        self.inner.borrow().views
    }

    pub fn recognizer_id(&self) -> RecognizerId {
        self.inner.borrow().recognizer.id()
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.inner.borrow().drag.phase()
    }

    /// True between a completed presentation and a completed dismissal.
    pub fn is_presenting(&self) -> bool {
        self.inner.borrow().session.is_some()
    }

    pub fn background_view(&self) -> Option<ViewId> {
        self.inner.borrow().decoration().map(|(background, _)| background)
    }

    pub fn snapshot_container(&self) -> Option<ViewId> {
        self.inner.borrow().decoration().map(|(_, wrapper)| wrapper)
    }

    /// Snapshot recaptures over the controller's lifetime.
    pub fn snapshot_rebuilds(&self) -> u64 {
        self.inner.borrow().snapshot_rebuilds
    }

    pub fn status_bar_update_in_flight(&self) -> bool {
        self.inner.borrow().status_bar.in_flight
    }

    /// Where the card rests for the container's current size.
    pub fn frame_of_presented_view_in_container(&self) -> Rect {
        let inner = self.inner.borrow();
        let container = inner.views.container;
        let config = inner.config;
        let size = inner.tree.with(|tree| tree.node(container).map(|node| node.frame.size()));
        skip_missing("frame of presented view", size)
            .map(|size| geometry::presented_frame(size, &config))
            .unwrap_or_default()
    }

    pub fn presentation_transition_will_begin(&self) {
        log::debug!("presentation transition will begin");
        self.inner.borrow_mut().drag.reset();
    }

    pub fn presentation_transition_did_end(&self, completed: bool) {
        log::debug!("presentation transition ended (completed: {completed})");
        if completed {
            let (laid_out, present_animation) = {
                let inner = self.inner.borrow();
                (
                    inner.layout_presented().is_some(),
                    inner.callbacks.present_animation.clone(),
                )
            };
            if laid_out {
                if let Some(callback) = present_animation {
                    callback();
                }
                let result = self.inner.borrow_mut().install_session();
                skip_missing("install presentation views", result);
            }
        }
        let completion = self.inner.borrow().callbacks.present_completion.clone();
        if let Some(completion) = completion {
            completion(completed);
        }
    }

    /// Shrinks the presenting view and fades the deck out alongside the
    /// host's dismissal transition.
    pub fn dismissal_transition_will_begin(&self) {
        log::debug!("dismissal transition will begin");
        let (host, spec, decoration) = {
            let mut inner = self.inner.borrow_mut();
            inner.drag.dismissal_began();
            inner.recognizer.set_enabled(false);
            let views = inner.views;
            let config = inner.config;
            let result = inner.tree.update(|tree| -> Result<(), ViewError> {
                let height = tree.node(views.presenting)?.frame.height;
                tree.node_mut(views.presenting)?.transform =
                    Transform::scale(geometry::dismissal_scale(height, &config));
                Ok(())
            });
            skip_missing("prepare dismissal", result);
            (
                Rc::clone(&inner.host),
                config.dismissal_fade_animation,
                inner.decoration(),
            )
        };
        if decoration.is_none() {
            return;
        }
        host.animate(
            spec,
            Box::new(move |tree| {
                let result =
                    DeckPresentationController::set_decoration_alpha(tree, decoration, 0.0);
                skip_missing("fade out deck", result);
            }),
            None,
        );
    }

    pub fn dismissal_transition_did_end(&self, completed: bool) {
        log::debug!("dismissal transition ended (completed: {completed})");
        if completed {
            let dismiss_animation = {
                let inner = self.inner.borrow();
                let views = inner.views;
                let result = inner.tree.update(|tree| {
                    geometry::restore_presenting(tree, views.presenting, views.container)
                });
                skip_missing("restore presenting view", result);
                inner.callbacks.dismiss_animation.clone()
            };
            if let Some(callback) = dismiss_animation {
                callback();
            }
            let mut inner = self.inner.borrow_mut();
            let views = inner.views;
            let result = inner.tree.update(|tree| {
                geometry::park_presented(tree, views.presented, views.container)
            });
            skip_missing("park presented view", result);
            inner.teardown_session();
            inner.drag.reset();
        } else {
            // Interactive dismissal was cancelled; put the deck back.
            let (host, decoration) = {
                let inner = self.inner.borrow();
                (Rc::clone(&inner.host), inner.decoration())
            };
            if let Some((background, wrapper)) = decoration {
                host.stop_animations(background);
                host.stop_animations(wrapper);
            }
            let mut inner = self.inner.borrow_mut();
            let views = inner.views;
            let result = inner.tree.update(|tree| -> Result<(), ViewError> {
                tree.node_mut(views.presenting)?.transform = Transform::IDENTITY;
                DeckPresentationController::set_decoration_alpha(tree, decoration, 1.0)
            });
            skip_missing("revert dismissal", result);
            inner.drag.reset();
            let enabled = inner.session.is_some();
            inner.recognizer.set_enabled(enabled);
        }
        let completion = self.inner.borrow().callbacks.dismiss_completion.clone();
        if let Some(completion) = completion {
            completion(completed);
        }
    }

    /// The container is about to become `size`. The card is re-laid out
    /// inside the transition and the snapshot refreshed once it finishes.
    pub fn size_will_transition(&self, size: Size, coordinator: &dyn TransitionCoordinator) {
        log::debug!("size will transition to {}x{}", size.width, size.height);
        let (presented, config) = {
            let inner = self.inner.borrow();
            (inner.views.presented, inner.config)
        };
        let weak = self.downgrade();
        coordinator.animate_alongside(
            Box::new(move |tree| {
                skip_missing(
                    "resize presented view",
                    resize_presented(tree, presented, size, &config),
                );
            }),
            Box::new(move || {
                if let Some(presentation) = weak.upgrade() {
                    presentation.refresh_snapshot();
                }
            }),
        );
    }

    /// Recapture the presenting view if the container width changed.
    pub fn refresh_snapshot(&self) -> bool {
        self.inner.borrow_mut().refresh_snapshot()
    }

    pub fn status_bar_frame_will_change(&self, frame: Rect) {
        let height = frame.height;
        {
            let mut inner = self.inner.borrow_mut();
            if inner.status_bar.in_flight {
                let replaced = inner.status_bar.pending.replace(height);
                log::warn!(
                    "status bar update to {height} deferred behind running update (replaces {replaced:?})"
                );
                return;
            }
        }
        self.begin_status_bar_update(height);
    }

    fn begin_status_bar_update(&self, status_bar_height: f32) {
        let (host, spec, views, plan) = {
            let mut inner = self.inner.borrow_mut();
            let views = inner.views;
            let config = inner.config;
            let plan = inner.tree.with(|tree| -> Result<StatusBarPlan, ViewError> {
                let full_height = tree.node(views.window)?.frame.height;
                let container = tree.node(views.container)?.frame;
                tree.node(views.presenting)?;
                let target_height =
                    geometry::container_height_for_status_bar(full_height, status_bar_height, &config);
                Ok(StatusBarPlan {
                    full_height,
                    target_height,
                    delta: target_height - container.height,
                })
            });
            let Some(plan) = skip_missing("status bar update", plan) else {
                return;
            };
            inner.status_bar.in_flight = true;
            (Rc::clone(&inner.host), config.status_bar_animation, views, plan)
        };
        log::debug!(
            "status bar height {status_bar_height}: container height {} (delta {})",
            plan.target_height,
            plan.delta
        );

        let weak = self.downgrade();
        host.animate(
            spec,
            Box::new(move |tree| {
                if let Ok(container) = tree.node_mut(views.container) {
                    container.frame.y -= plan.delta;
                }
                if let Ok(presenting) = tree.node_mut(views.presenting) {
                    presenting.alpha = 0.0;
                }
            }),
            Some(Box::new(move |_| {
                if let Some(presentation) = weak.upgrade() {
                    presentation.finish_status_bar_update(plan);
                }
            })),
        );
    }

    fn finish_status_bar_update(&self, plan: StatusBarPlan) {
        let pending = {
            let mut inner = self.inner.borrow_mut();
            let views = inner.views;
            let config = inner.config;
            let presenting = inner.session.is_some();
            let result = inner.tree.update(|tree| -> Result<(), ViewError> {
                let container = tree.node_mut(views.container)?;
                container.frame = Rect::new(
                    container.frame.x,
                    plan.full_height - plan.target_height,
                    container.frame.width,
                    plan.target_height,
                );
                tree.node_mut(views.presenting)?.alpha = 1.0;
                if presenting {
                    geometry::layout_presented(tree, views.presented, views.container, &config)?;
                } else {
                    // Parked off screen; only the rounding is kept current.
                    geometry::round_top_corners(tree, views.presented, &config)?;
                }
                tree.set_needs_layout();
                tree.layout_if_needed();
                Ok(())
            });
            skip_missing("finish status bar update", result);
            inner.refresh_snapshot();
            inner.status_bar.in_flight = false;
            inner.status_bar.pending.take()
        };
        if let Some(height) = pending {
            self.begin_status_bar_update(height);
        }
    }

    /// Feed a pointer event to the drag recognizer. Returns whether the
    /// recognizer claimed it.
    pub fn handle_pointer_event(&self, event: &PointerEvent) -> bool {
        let state = {
            let mut inner = self.inner.borrow_mut();
            if inner.session.is_none() {
                return false;
            }
            inner.recognizer.handle(event)
        };
        match state {
            Some(GestureState::Began) => self.drag_began(),
            Some(GestureState::Changed) => self.drag_changed(),
            Some(GestureState::Ended | GestureState::Cancelled) => self.drag_ended(),
            Some(GestureState::Possible | GestureState::Failed) | None => {}
        }
        event.is_consumed()
    }

    fn drag_began(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.drag.begin() {
            inner.recognizer.set_translation(Point::ZERO);
            log::debug!("drag began");
        }
    }

    fn drag_changed(&self) {
        let policy = Rc::clone(&self.inner.borrow().dismiss_policy);
        let enabled = policy();
        let dismiss_host = {
            let mut inner = self.inner.borrow_mut();
            let raw = inner.recognizer.translation().y;
            let update = inner.drag.update(raw, enabled);
            if update.reset_translation {
                inner.recognizer.set_translation(Point::ZERO);
            }
            if let Some(offset) = update.offset {
                log::trace!("drag {raw:.1} -> offset {offset:.2}");
                let presented = inner.views.presented;
                let result = inner.tree.update(|tree| {
                    tree.node_mut(presented)
                        .map(|node| node.transform = Transform::translation(0.0, offset))
                });
                skip_missing("apply drag offset", result);
            }
            update.dismiss.then(|| Rc::clone(&inner.host))
        };
        if let Some(host) = dismiss_host {
            log::debug!("drag crossed dismiss threshold; dismissing");
            host.dismiss(true);
        }
    }

    fn drag_ended(&self) {
        let settle = {
            let mut inner = self.inner.borrow_mut();
            let velocity = inner.recognizer.velocity();
            log::debug!(
                "drag ended at {:.1} moving {:.0}pt/s",
                inner.recognizer.translation().y,
                velocity.y
            );
            if inner.drag.end() {
                inner.settle_generation += 1;
                Some((
                    Rc::clone(&inner.host),
                    inner.config.settle_animation,
                    inner.views.presented,
                    inner.settle_generation,
                ))
            } else {
                None
            }
        };
        let Some((host, spec, presented, generation)) = settle else {
            return;
        };
        let weak = self.downgrade();
        host.animate(
            spec,
            Box::new(move |tree| {
                if let Ok(node) = tree.node_mut(presented) {
                    node.transform = Transform::IDENTITY;
                }
            }),
            Some(Box::new(move |_| {
                if let Some(presentation) = weak.upgrade() {
                    let mut inner = presentation.inner.borrow_mut();
                    if inner.settle_generation == generation {
                        inner.drag.settled();
                    }
                }
            })),
        );
    }
}

impl SimultaneousRecognitionPolicy for DeckPresentation {
    /// The deck's own recognizer may run alongside any other; questions
    /// about foreign recognizers are declined.
    fn should_recognize_simultaneously(&self, recognizer: RecognizerId, _other: RecognizerId) -> bool {
        recognizer == self.recognizer_id()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
