//! Pointer input and gesture recognition for deck presentations

pub mod gesture_constants;
pub mod gestures;
mod pointer;
pub mod velocity_tracker;

pub use gesture_constants::*;
pub use gestures::{
    GestureState, PanGestureRecognizer, RecognizerId, SimultaneousRecognitionPolicy,
};
pub use pointer::{uptime_millis, PointerEvent, PointerEventKind, PointerId, PointerPhase};
pub use velocity_tracker::{VelocityTracker, VelocityTracker1D};

pub mod prelude {
    pub use crate::gestures::{GestureState, PanGestureRecognizer, RecognizerId};
    pub use crate::pointer::{PointerEvent, PointerEventKind, PointerPhase};
}
