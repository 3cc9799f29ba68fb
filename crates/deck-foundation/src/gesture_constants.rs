//! Shared gesture constants.
//!
//! Values are in logical points.

/// Distance a press must travel before a pan recognizer begins.
///
/// Matches common platform touch slop (Android uses ~8dp for
/// ViewConfiguration.TOUCH_SLOP).
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Maximum reported pan velocity in points per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
