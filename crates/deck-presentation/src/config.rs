use deck_animation::AnimationSpec;

/// Tunables for a deck presentation.
///
/// All distances are in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeckConfig {
    /// Gap between the top of the container and the presented card.
    pub top_offset: f32,
    /// Radius applied to the card's top corners.
    pub corner_radius: f32,
    /// Drag distance where linear tracking gives way to friction.
    pub elastic_threshold: f32,
    /// Raw drag distance that dismisses the card.
    pub dismiss_threshold: f32,
    /// Slope of the linear region.
    pub translation_factor: f32,
    /// Past the elastic threshold an overshoot `d` moves the card by
    /// `friction_scale * atan(d / friction_atan_divisor) + d /
    /// friction_linear_divisor` on top of the linear region's end.
    pub friction_atan_divisor: f32,
    pub friction_linear_divisor: f32,
    pub friction_scale: f32,
    /// Height taken off the container to size the presenting snapshot.
    pub snapshot_vertical_margin: f32,
    /// Status bar height at which the container fills the screen.
    pub baseline_status_bar_height: f32,
    /// Container shift when the status bar height changes.
    pub status_bar_animation: AnimationSpec,
    /// Card returning to rest after a drag that did not dismiss.
    pub settle_animation: AnimationSpec,
    /// Dimming view and snapshot fading out as the dismissal begins.
    pub dismissal_fade_animation: AnimationSpec,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            top_offset: 28.0,
            corner_radius: 8.0,
            elastic_threshold: 120.0,
            dismiss_threshold: 240.0,
            translation_factor: 0.5,
            friction_atan_divisor: 120.0,
            friction_linear_divisor: 10.0,
            friction_scale: 30.0,
            snapshot_vertical_margin: 40.0,
            baseline_status_bar_height: 20.0,
            status_bar_animation: AnimationSpec::seconds(0.1),
            settle_animation: AnimationSpec::seconds(0.25),
            dismissal_fade_animation: AnimationSpec::seconds(0.3),
        }
    }
}

impl DeckConfig {
    pub fn with_top_offset(mut self, offset: f32) -> Self {
        self.top_offset = offset;
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Override both drag thresholds. `dismiss` is raised to `elastic` when
    /// given a smaller value.
    pub fn with_thresholds(mut self, elastic: f32, dismiss: f32) -> Self {
        self.elastic_threshold = elastic.max(0.0);
        self.dismiss_threshold = dismiss.max(self.elastic_threshold);
        self
    }

    pub fn with_translation_factor(mut self, factor: f32) -> Self {
        self.translation_factor = factor;
        self
    }

    pub fn with_friction(mut self, atan_divisor: f32, linear_divisor: f32, scale: f32) -> Self {
        self.friction_atan_divisor = atan_divisor;
        self.friction_linear_divisor = linear_divisor;
        self.friction_scale = scale;
        self
    }

    pub fn with_snapshot_vertical_margin(mut self, margin: f32) -> Self {
        self.snapshot_vertical_margin = margin;
        self
    }

    pub fn with_baseline_status_bar_height(mut self, height: f32) -> Self {
        self.baseline_status_bar_height = height;
        self
    }

    pub fn with_status_bar_animation(mut self, spec: AnimationSpec) -> Self {
        self.status_bar_animation = spec;
        self
    }

    pub fn with_settle_animation(mut self, spec: AnimationSpec) -> Self {
        self.settle_animation = spec;
        self
    }

    pub fn with_dismissal_fade_animation(mut self, spec: AnimationSpec) -> Self {
        self.dismissal_fade_animation = spec;
        self
    }
}
