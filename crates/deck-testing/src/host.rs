use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use deck_animation::AnimationSpec;
use deck_core::{DefaultScheduler, NotificationCenter, Runtime, Shared};
use deck_foundation::{PointerEvent, PointerEventKind, PointerId};
use deck_presentation::{
    DeckCallbacks, DeckConfig, DeckPresentation, DeckPresentationController, DeckViews,
    PresentationHost, TransitionCoordinator, WeakDeckPresentation, STATUS_BAR_FRAME_WILL_CHANGE,
};
use deck_ui::{Changes, Completion, FrameAnimator, ViewAnimator, ViewId, ViewNode, ViewTree};
use deck_ui_graphics::{Point, Rect, Size, Transform};

/// Nanoseconds per simulated frame.
pub const FRAME_NANOS: u64 = 16_000_000;

/// How the test host answers a dismissal request from the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DismissResponse {
    /// Record the request only.
    #[default]
    Record,
    /// Start the dismissal transition synchronously, from inside the request.
    BeginTransition,
}

struct PlatformState {
    animator: FrameAnimator,
    dismissals: Cell<usize>,
    response: Cell<DismissResponse>,
    presentation: RefCell<WeakDeckPresentation>,
}

impl ViewAnimator for PlatformState {
    fn animate(&self, spec: AnimationSpec, changes: Changes, completion: Option<Completion>) {
        self.animator.animate(spec, changes, completion);
    }

    fn stop_animations(&self, view: ViewId) {
        self.animator.stop_animations(view);
    }

    fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }
}

impl PresentationHost for PlatformState {
    fn dismiss(&self, animated: bool) {
        self.dismissals.set(self.dismissals.get() + 1);
        log::debug!("test host asked to dismiss (animated: {animated})");
        if self.response.get() == DismissResponse::BeginTransition {
            let presentation = self.presentation.borrow().upgrade();
            if let Some(presentation) = presentation {
                presentation.dismissal_transition_will_begin();
            }
        }
    }
}

/// Size transition that resizes the window and container up front and runs
/// the controller's changes in a host animation.
struct SizeTransition {
    tree: Shared<ViewTree>,
    animator: FrameAnimator,
    views: DeckViews,
    size: Size,
    spec: AnimationSpec,
}

impl TransitionCoordinator for SizeTransition {
    fn animate_alongside(&self, changes: Changes, completion: Box<dyn FnOnce()>) {
        let bounds = Rect::from_size(self.size);
        self.tree.update(|tree| {
            for view in [self.views.window, self.views.container, self.views.presenting] {
                if let Ok(node) = tree.node_mut(view) {
                    node.frame = bounds;
                }
            }
            tree.set_needs_layout();
            tree.layout_if_needed();
        });
        self.animator
            .animate(self.spec, changes, Some(Box::new(move |_| completion())));
    }
}

/// A window with a presenting view and a container holding the presented
/// card, wired to a [`DeckPresentation`] with a frame-driven clock.
pub struct TestHost {
    runtime: Runtime,
    tree: Shared<ViewTree>,
    animator: FrameAnimator,
    notifications: NotificationCenter<Rect>,
    platform: Rc<PlatformState>,
    presentation: DeckPresentation,
    views: DeckViews,
    now_nanos: Cell<u64>,
    pointer: Cell<PointerId>,
    press: Cell<Point>,
}

impl TestHost {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_config(DeckConfig::default(), DeckCallbacks::default(), width, height)
    }

    pub fn with_callbacks(callbacks: DeckCallbacks, width: f32, height: f32) -> Self {
        Self::with_config(DeckConfig::default(), callbacks, width, height)
    }

    pub fn with_config(config: DeckConfig, callbacks: DeckCallbacks, width: f32, height: f32) -> Self {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let bounds = Rect::new(0.0, 0.0, width, height);

        let mut tree = ViewTree::new();
        let window = tree.create_view("window", bounds);
        let presenting = tree.create_view("presenting", bounds);
        let container = tree.create_view("container", bounds);
        let presented = tree.create_view("presented", bounds.with_y(height));
        let attach = [(window, presenting), (window, container), (container, presented)];
        for (parent, child) in attach {
            if let Err(err) = tree.add_subview(parent, child) {
                panic!("test host hierarchy: {err}");
            }
        }
        let views = DeckViews {
            window,
            container,
            presenting,
            presented,
        };

        let tree = Shared::new(tree);
        let animator = FrameAnimator::new(&tree, runtime.frame_clock());
        let platform = Rc::new(PlatformState {
            animator: animator.clone(),
            dismissals: Cell::new(0),
            response: Cell::new(DismissResponse::Record),
            presentation: RefCell::new(WeakDeckPresentation::default()),
        });
        let host: Rc<dyn PresentationHost> = platform.clone();
        let presentation =
            DeckPresentationController::new(config, tree.clone(), views, host, callbacks);
        *platform.presentation.borrow_mut() = presentation.downgrade();

        let notifications = NotificationCenter::new();
        presentation.attach(&notifications);

        Self {
            runtime,
            tree,
            animator,
            notifications,
            platform,
            presentation,
            views,
            now_nanos: Cell::new(0),
            pointer: Cell::new(1),
            press: Cell::new(Point::new(width / 2.0, height / 2.0)),
        }
    }

    pub fn presentation(&self) -> &DeckPresentation {
        &self.presentation
    }

    pub fn tree(&self) -> &Shared<ViewTree> {
        &self.tree
    }

    pub fn views(&self) -> DeckViews {
        self.views
    }

    pub fn notifications(&self) -> &NotificationCenter<Rect> {
        &self.notifications
    }

    pub fn animator(&self) -> &FrameAnimator {
        &self.animator
    }

    pub fn set_dismiss_response(&self, response: DismissResponse) {
        self.platform.response.set(response);
    }

    /// Dismissal requests received from the controller.
    pub fn dismissals(&self) -> usize {
        self.platform.dismissals.get()
    }

    /// Drive a presentation to completion.
    pub fn present(&self) {
        self.presentation.presentation_transition_will_begin();
        self.presentation.presentation_transition_did_end(true);
    }

    /// Drive a dismissal to completion.
    pub fn dismiss(&self) {
        self.presentation.dismissal_transition_will_begin();
        self.presentation.dismissal_transition_did_end(true);
    }

    // Frames.

    pub fn now_millis(&self) -> u64 {
        self.now_nanos.get() / 1_000_000
    }

    /// Run one frame.
    pub fn frame(&self) {
        let now = self.now_nanos.get() + FRAME_NANOS;
        self.now_nanos.set(now);
        self.runtime.handle().drain_frame_callbacks(now);
    }

    /// Run frames until at least `millis` have passed.
    pub fn advance_millis(&self, millis: u64) {
        let target = self.now_nanos.get() + millis * 1_000_000;
        while self.now_nanos.get() < target {
            self.frame();
        }
    }

    /// Run frames until no animation is pending. Returns the frames run.
    pub fn settle(&self) -> usize {
        let mut frames = 0;
        while self.runtime.needs_frame() || self.animator.is_animating() {
            self.frame();
            frames += 1;
            assert!(frames < 10_000, "animations never settled");
        }
        frames
    }

    // Pointer input, in window coordinates relative to the press point.

    fn event(&self, kind: PointerEventKind, dy: f32) -> PointerEvent {
        let press = self.press.get();
        PointerEvent::new(kind, Point::new(press.x, press.y + dy))
            .with_pointer(self.pointer.get())
            .with_time_ms((self.now_nanos.get() / 1_000_000) as i64)
    }

    pub fn press(&self) -> bool {
        self.pointer.set(self.pointer.get() + 1);
        self.presentation
            .handle_pointer_event(&self.event(PointerEventKind::Down, 0.0))
    }

    /// Move the pointer to `dy` below the press point.
    pub fn drag_to(&self, dy: f32) -> bool {
        self.presentation
            .handle_pointer_event(&self.event(PointerEventKind::Move, dy))
    }

    pub fn release_at(&self, dy: f32) -> bool {
        self.presentation
            .handle_pointer_event(&self.event(PointerEventKind::Up, dy))
    }

    pub fn cancel_at(&self, dy: f32) -> bool {
        self.presentation
            .handle_pointer_event(&self.event(PointerEventKind::Cancel, dy))
    }

    /// Press, then move through `offsets`, recording the card offset after
    /// each move. The pointer stays down.
    pub fn drag_through(&self, offsets: &[f32]) -> Vec<f32> {
        self.press();
        offsets
            .iter()
            .map(|dy| {
                self.drag_to(*dy);
                self.presented_offset()
            })
            .collect()
    }

    // Status bar.

    pub fn post_status_bar_height(&self, height: f32) -> usize {
        let width = self.node(self.views.window).frame.width;
        self.notifications
            .post(STATUS_BAR_FRAME_WILL_CHANGE, &Rect::new(0.0, 0.0, width, height))
    }

    // Size transitions.

    /// Resize window and container to `size` over `spec`, notifying the
    /// controller first.
    pub fn transition_to(&self, size: Size, spec: AnimationSpec) {
        let coordinator = SizeTransition {
            tree: self.tree.clone(),
            animator: self.animator.clone(),
            views: self.views,
            size,
            spec,
        };
        self.presentation.size_will_transition(size, &coordinator);
    }

    // Inspection.

    pub fn node(&self, view: ViewId) -> ViewNode {
        self.tree.with(|tree| match tree.node(view) {
            Ok(node) => node.clone(),
            Err(err) => panic!("{err}"),
        })
    }

    pub fn frame_of(&self, view: ViewId) -> Rect {
        self.node(view).frame
    }

    pub fn transform_of(&self, view: ViewId) -> Transform {
        self.node(view).transform
    }

    /// Vertical translation currently applied to the card.
    pub fn presented_offset(&self) -> f32 {
        self.transform_of(self.views.presented).translation_y
    }

    pub fn snapshot_captures(&self) -> u64 {
        self.tree.with(|tree| tree.snapshot_captures())
    }
}
