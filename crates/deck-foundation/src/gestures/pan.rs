//! Continuous pan (drag) recognizer.

use deck_ui_graphics::Point;
use smallvec::SmallVec;

use super::{GestureState, RecognizerId};
use crate::gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY};
use crate::pointer::{PointerEvent, PointerEventKind, PointerId};
use crate::velocity_tracker::VelocityTracker;

/// Tracks a drag and reports its translation from the press point.
///
/// Only `maximum_touches` pointers are tracked; additional pointers that go
/// down during a gesture are ignored. The deck presentation uses a single
/// touch.
pub struct PanGestureRecognizer {
    id: RecognizerId,
    state: GestureState,
    enabled: bool,
    touch_slop: f32,
    maximum_touches: usize,
    pointers: SmallVec<[PointerId; 2]>,
    press_position: Point,
    last_position: Point,
    translation_origin: Point,
    velocity: VelocityTracker,
}

impl Default for PanGestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PanGestureRecognizer {
    pub fn new() -> Self {
        Self {
            id: RecognizerId::next(),
            state: GestureState::Possible,
            enabled: true,
            touch_slop: DRAG_THRESHOLD,
            maximum_touches: 1,
            pointers: SmallVec::new(),
            press_position: Point::ZERO,
            last_position: Point::ZERO,
            translation_origin: Point::ZERO,
            velocity: VelocityTracker::default(),
        }
    }

    pub fn with_touch_slop(mut self, slop: f32) -> Self {
        self.touch_slop = slop.max(0.0);
        self
    }

    pub fn with_maximum_touches(mut self, touches: usize) -> Self {
        self.maximum_touches = touches.max(1);
        self
    }

    pub fn id(&self) -> RecognizerId {
        self.id
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn maximum_touches(&self) -> usize {
        self.maximum_touches
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling mid-gesture cancels it.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            if self.state.is_active() {
                self.state = GestureState::Cancelled;
            }
            self.pointers.clear();
        }
    }

    /// Translation of the primary pointer since the gesture began.
    pub fn translation(&self) -> Point {
        Point::new(
            self.last_position.x - self.translation_origin.x,
            self.last_position.y - self.translation_origin.y,
        )
    }

    /// Rebase the translation so that it currently reads `translation`.
    pub fn set_translation(&mut self, translation: Point) {
        self.translation_origin = Point::new(
            self.last_position.x - translation.x,
            self.last_position.y - translation.y,
        );
        // Velocity is relative motion; old samples no longer line up.
        self.velocity.reset();
    }

    /// Velocity of the primary pointer in points per second.
    pub fn velocity(&self) -> Point {
        self.velocity.velocity(MAX_FLING_VELOCITY)
    }

    /// Feed an event; returns the new state when one should be delivered to
    /// the recognizer's target.
    pub fn handle(&mut self, event: &PointerEvent) -> Option<GestureState> {
        if !self.enabled {
            return None;
        }
        match event.kind {
            PointerEventKind::Down => {
                if self.pointers.len() >= self.maximum_touches || self.pointers.contains(&event.id) {
                    log::trace!("pan {:?} ignoring extra pointer {}", self.id, event.id);
                    return None;
                }
                if self.pointers.is_empty() {
                    self.state = GestureState::Possible;
                    self.press_position = event.position;
                    self.last_position = event.position;
                    self.translation_origin = event.position;
                    self.velocity.reset();
                    self.velocity.add_position(event.time_ms, event.position);
                }
                self.pointers.push(event.id);
                None
            }
            PointerEventKind::Move => {
                if self.pointers.first() != Some(&event.id) {
                    return None;
                }
                self.last_position = event.position;
                self.velocity.add_position(event.time_ms, event.position);
                match self.state {
                    GestureState::Possible => {
                        let dx = event.position.x - self.press_position.x;
                        let dy = event.position.y - self.press_position.y;
                        if (dx * dx + dy * dy).sqrt() >= self.touch_slop {
                            self.state = GestureState::Began;
                            event.consume();
                            Some(self.state)
                        } else {
                            None
                        }
                    }
                    GestureState::Began | GestureState::Changed => {
                        self.state = GestureState::Changed;
                        event.consume();
                        Some(self.state)
                    }
                    _ => None,
                }
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                let index = self.pointers.iter().position(|id| *id == event.id)?;
                self.pointers.remove(index);
                if index != 0 {
                    return None;
                }
                self.pointers.clear();
                let cancelled = event.kind == PointerEventKind::Cancel;
                if self.state.is_active() {
                    self.last_position = event.position;
                    self.velocity.add_position(event.time_ms, event.position);
                    self.state = if cancelled {
                        GestureState::Cancelled
                    } else {
                        GestureState::Ended
                    };
                    event.consume();
                    Some(self.state)
                } else {
                    self.state = GestureState::Failed;
                    None
                }
            }
        }
    }

    /// Return to `Possible`, dropping any tracked pointers.
    pub fn reset(&mut self) {
        self.state = GestureState::Possible;
        self.pointers.clear();
        self.translation_origin = self.last_position;
        self.velocity.reset();
    }
}

impl std::fmt::Debug for PanGestureRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanGestureRecognizer")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("translation", &self.translation())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/pan_tests.rs"]
mod tests;
