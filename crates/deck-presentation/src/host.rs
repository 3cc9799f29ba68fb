//! What the controller needs from the surrounding platform.

use deck_core::NotificationName;
use deck_ui::{Changes, ViewAnimator, ViewId};

/// Posted with the new status bar frame (`Rect`) before it changes.
pub const STATUS_BAR_FRAME_WILL_CHANGE: NotificationName =
    NotificationName("deck.status-bar-frame-will-change");

/// Presentation machinery owned by the host.
///
/// The controller animates views through the host's [`ViewAnimator`] and asks
/// the host to dismiss when the drag crosses the dismiss threshold. The host
/// answers by driving the dismissal lifecycle hooks, possibly synchronously.
pub trait PresentationHost: ViewAnimator {
    fn dismiss(&self, animated: bool);
}

/// Runs work alongside a size transition.
pub trait TransitionCoordinator {
    /// Apply `changes` inside the transition animation and call `completion`
    /// once the transition finishes.
    fn animate_alongside(&self, changes: Changes, completion: Box<dyn FnOnce()>);
}

/// The host views a presentation decorates. None of them are owned by the
/// controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeckViews {
    /// Root window; the dimming view is pinned to its edges.
    pub window: ViewId,
    /// Container the platform places the presented view in.
    pub container: ViewId,
    pub presenting: ViewId,
    pub presented: ViewId,
}
