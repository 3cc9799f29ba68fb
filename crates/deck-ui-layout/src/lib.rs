//! Layout constraints for deck presentation views

mod constraints;

pub use constraints::*;

pub mod prelude {
    pub use crate::constraints::{ConstraintId, ConstraintSet, LayoutConstraint, LayoutContext};
}
