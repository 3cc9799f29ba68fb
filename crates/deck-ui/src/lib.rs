//! View hierarchy for deck presentations
//!
//! A [`ViewTree`] arena of layer-like views, anchor constraints resolved by
//! [`ViewTree::layout_if_needed`], live snapshots, and a frame-driven
//! [`ViewAnimator`].

mod animator;
mod error;
mod tree;
mod view;

pub use animator::{Changes, Completion, FrameAnimator, ViewAnimator};
pub use error::ViewError;
pub use tree::ViewTree;
pub use view::{ViewContent, ViewId, ViewNode};

pub use deck_ui_layout::{ConstraintId, LayoutConstraint};

pub mod prelude {
    pub use crate::animator::{FrameAnimator, ViewAnimator};
    pub use crate::tree::ViewTree;
    pub use crate::view::{ViewId, ViewNode};
}
