pub mod pan;

pub use pan::PanGestureRecognizer;

use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a gesture recognizer instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecognizerId(u64);

impl RecognizerId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Recognizer lifecycle, mirroring continuous platform gestures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl GestureState {
    /// True while the gesture is delivering translation updates.
    pub fn is_active(self) -> bool {
        matches!(self, GestureState::Began | GestureState::Changed)
    }

    pub fn is_finished(self) -> bool {
        matches!(
            self,
            GestureState::Ended | GestureState::Cancelled | GestureState::Failed
        )
    }
}

/// Decides whether two recognizers may track the same touch sequence.
pub trait SimultaneousRecognitionPolicy {
    fn should_recognize_simultaneously(&self, recognizer: RecognizerId, other: RecognizerId)
        -> bool;
}
