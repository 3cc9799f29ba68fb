//! Layer transforms.

use crate::{Point, Rect, Size};

/// Uniform scale followed by a translation, applied about the center of the
/// layer it is attached to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub translation_x: f32,
    pub translation_y: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        translation_x: 0.0,
        translation_y: 0.0,
    };

    pub const fn scale(scale: f32) -> Self {
        Self {
            scale,
            translation_x: 0.0,
            translation_y: 0.0,
        }
    }

    pub const fn translation(x: f32, y: f32) -> Self {
        Self {
            scale: 1.0,
            translation_x: x,
            translation_y: y,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn offset(&self) -> Point {
        Point::new(self.translation_x, self.translation_y)
    }

    /// Where a layer with untransformed `frame` appears on screen.
    pub fn apply_to_rect(&self, frame: Rect) -> Rect {
        let size = Size::new(frame.width * self.scale, frame.height * self.scale);
        frame
            .centered(size)
            .translate(self.translation_x, self.translation_y)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
