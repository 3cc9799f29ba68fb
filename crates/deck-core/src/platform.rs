//! Platform abstraction traits for the deck runtime.
//!
//! The host toolkit owns the display link; this trait lets the runtime ask
//! for frames without depending on a specific windowing backend.

/// Schedules frames for the runtime.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}
