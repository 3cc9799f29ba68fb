//! Animation curves for deck presentations
//!
//! Provides easing curves, duration specs and a [`Tween`] that samples an
//! interpolated value for a given elapsed time. Driving tweens from frames is
//! the host animator's job.

use deck_ui_graphics::{Point, Rect, Size, Transform};

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for Point {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Point::new(self.x.lerp(&target.x, fraction), self.y.lerp(&target.y, fraction))
    }
}

impl Lerp for Size {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Size::new(
            self.width.lerp(&target.width, fraction),
            self.height.lerp(&target.height, fraction),
        )
    }
}

impl Lerp for Rect {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Rect::from_origin_size(
            self.origin().lerp(&target.origin(), fraction),
            self.size().lerp(&target.size(), fraction),
        )
    }
}

impl Lerp for Transform {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Transform {
            scale: self.scale.lerp(&target.scale, fraction),
            translation_x: self.translation_x.lerp(&target.translation_x, fraction),
            translation_y: self.translation_y.lerp(&target.translation_y, fraction),
        }
    }
}

/// Easing curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Platform default for view animations.
    FastOutSlowIn,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Evaluate the unit cubic bezier with control points (x1, y1), (x2, y2) at
/// horizontal position `fraction`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let curve = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let slope = |t: f32| (3.0 * ax * t + 2.0 * bx) * t + cx;

    // Newton-Raphson on x(t) = fraction, then bisection if it stalls.
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let error = curve(ax, bx, cx, t) - fraction;
        if error.abs() < 1e-6 {
            solved = true;
            break;
        }
        let dx = slope(t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - error / dx).clamp(0.0, 1.0);
    }

    if !solved {
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        t = fraction;
        for _ in 0..16 {
            let error = curve(ax, bx, cx, t) - fraction;
            if error.abs() < 1e-6 {
                break;
            }
            if error > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    curve(ay, by, cy, t)
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    pub easing: Easing,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    /// Tween with the platform's default view easing, duration in seconds.
    pub fn seconds(duration: f32) -> Self {
        Self::tween(
            (duration.max(0.0) * 1000.0).round() as u64,
            Easing::FastOutSlowIn,
        )
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    pub fn is_instant(&self) -> bool {
        self.duration_millis == 0
    }

    /// Total time until the animation settles, in nanoseconds.
    pub fn total_nanos(&self) -> u64 {
        self.duration_millis * 1_000_000
    }

    /// Eased progress in [0, 1] after `elapsed_nanos`.
    pub fn progress(&self, elapsed_nanos: u64) -> f32 {
        let duration_nanos = self.total_nanos().max(1);
        let linear = (elapsed_nanos as f32 / duration_nanos as f32).clamp(0.0, 1.0);
        self.easing.transform(linear)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowIn)
    }
}

/// A value moving from `start` to `target` under `spec`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    pub start: T,
    pub target: T,
    pub spec: AnimationSpec,
}

impl<T: Lerp + Clone> Tween<T> {
    pub fn new(start: T, target: T, spec: AnimationSpec) -> Self {
        Self {
            start,
            target,
            spec,
        }
    }

    pub fn value_at(&self, elapsed_nanos: u64) -> T {
        if self.is_finished(elapsed_nanos) {
            return self.target.clone();
        }
        self.start.lerp(&self.target, self.spec.progress(elapsed_nanos))
    }

    pub fn is_finished(&self, elapsed_nanos: u64) -> bool {
        elapsed_nanos >= self.spec.total_nanos()
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
