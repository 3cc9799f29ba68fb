//! Pure math/data for laying out deck presentations
//!
//! Geometry primitives, affine transforms restricted to what view layers
//! need (uniform scale plus translation), and colors.

mod color;
mod geometry;
mod transform;

pub use color::*;
pub use geometry::*;
pub use transform::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{CornerRadii, EdgeInsets, MaskedCorners, Point, Rect, Size};
    pub use crate::transform::Transform;
}
