//! Drag-to-dismiss state machine.
//!
//! Pure decision logic: the controller feeds it raw translations and applies
//! whatever [`DragUpdate`] comes back to the view tree.

use crate::elastic::{crosses_dismiss_threshold, elastic_translation};
use crate::DeckConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Tracking,
    /// Animating back to rest after a drag that did not dismiss.
    Settling,
    /// The drag crossed the dismiss threshold and the host was asked to
    /// dismiss. Further drag input is ignored until the host answers or the
    /// drag ends.
    DismissRequested,
    /// The dismissal transition is running.
    Dismissing,
}

/// What a drag update asks the controller to do.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct DragUpdate {
    /// Vertical offset to apply to the card, if any.
    pub offset: Option<f32>,
    /// Rebase the recognizer so it reads zero.
    pub reset_translation: bool,
    /// Request dismissal. Set at most once per crossing.
    pub dismiss: bool,
}

#[derive(Clone, Debug)]
pub struct DragStateMachine {
    config: DeckConfig,
    phase: GesturePhase,
}

impl DragStateMachine {
    pub fn new(config: DeckConfig) -> Self {
        Self {
            config,
            phase: GesturePhase::Idle,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// A new drag started. Returns `true` if the recognizer's translation
    /// should be reset to zero.
    pub fn begin(&mut self) -> bool {
        if self.phase == GesturePhase::Dismissing {
            return false;
        }
        self.phase = GesturePhase::Tracking;
        true
    }

    pub fn update(&mut self, raw: f32, dismiss_enabled: bool) -> DragUpdate {
        if self.phase != GesturePhase::Tracking {
            return DragUpdate::default();
        }
        if !dismiss_enabled {
            return DragUpdate {
                reset_translation: true,
                ..DragUpdate::default()
            };
        }
        let offset = elastic_translation(raw, &self.config);
        let dismiss = offset.is_some() && crosses_dismiss_threshold(raw, &self.config);
        if dismiss {
            self.phase = GesturePhase::DismissRequested;
        }
        DragUpdate {
            offset,
            reset_translation: false,
            dismiss,
        }
    }

    /// The drag ended or was cancelled. Returns `true` when the card should
    /// settle back to rest.
    ///
    /// A dismissal request the host never acted on settles too, so a
    /// declined dismissal does not leave the card hanging at its offset.
    pub fn end(&mut self) -> bool {
        match self.phase {
            GesturePhase::Tracking | GesturePhase::DismissRequested => {
                self.phase = GesturePhase::Settling;
                true
            }
            _ => false,
        }
    }

    /// The settle animation finished.
    pub fn settled(&mut self) {
        if self.phase == GesturePhase::Settling {
            self.phase = GesturePhase::Idle;
        }
    }

    /// The host started the dismissal transition, whether or not a drag
    /// asked for it.
    pub fn dismissal_began(&mut self) {
        self.phase = GesturePhase::Dismissing;
    }

    /// Back to `Idle`, whatever the current phase.
    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
    }
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
