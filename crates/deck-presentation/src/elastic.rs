//! Rubber-band mapping from raw drag distance to card offset.

use crate::DeckConfig;

/// Visual offset for a downward drag of `raw` points.
///
/// Linear with slope `translation_factor` up to `elastic_threshold`, then an
/// arctangent friction curve that continues from the same value. Upward
/// drags (`raw < 0`) and non-finite input map to `None`.
pub fn elastic_translation(raw: f32, config: &DeckConfig) -> Option<f32> {
    if !raw.is_finite() || raw < 0.0 {
        return None;
    }
    let threshold = config.elastic_threshold;
    if raw < threshold {
        return Some(raw * config.translation_factor);
    }
    let overshoot = raw - threshold;
    let friction = config.friction_scale * (overshoot / config.friction_atan_divisor).atan()
        + overshoot / config.friction_linear_divisor;
    Some(friction + threshold * config.translation_factor)
}

/// Whether a raw drag of `raw` points should dismiss the card.
pub fn crosses_dismiss_threshold(raw: f32, config: &DeckConfig) -> bool {
    raw >= config.dismiss_threshold
}

#[cfg(test)]
#[path = "tests/elastic_tests.rs"]
mod tests;
