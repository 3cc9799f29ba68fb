//! Deck-style card presentation
//!
//! A card slides up over a slightly shrunken live snapshot of the view that
//! presented it and can be dragged down to dismiss. The drag follows the
//! finger linearly at first, then with growing resistance, and dismisses once
//! it travels far enough; shorter drags settle back.
//!
//! The crate owns the geometry, the snapshot, the drag state machine and the
//! lifecycle hooks. The surrounding platform supplies the views, the
//! animation system and the dismissal itself through [`PresentationHost`].

mod callbacks;
mod config;
mod controller;
pub mod elastic;
pub mod geometry;
mod gesture;
mod host;
mod snapshot;

pub use callbacks::{always_dismissible, DeckCallbacks, DismissPolicy};
pub use config::DeckConfig;
pub use controller::{DeckPresentation, DeckPresentationController, WeakDeckPresentation};
pub use elastic::elastic_translation;
pub use gesture::{DragStateMachine, DragUpdate, GesturePhase};
pub use host::{DeckViews, PresentationHost, TransitionCoordinator, STATUS_BAR_FRAME_WILL_CHANGE};
pub use snapshot::SnapshotManager;

pub mod prelude {
    pub use crate::callbacks::DeckCallbacks;
    pub use crate::config::DeckConfig;
    pub use crate::controller::{DeckPresentation, DeckPresentationController};
    pub use crate::gesture::GesturePhase;
    pub use crate::host::{DeckViews, PresentationHost, TransitionCoordinator};
}
