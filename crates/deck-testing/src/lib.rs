//! Testing utilities and harness for deck presentations

mod host;

pub use host::{DismissResponse, TestHost, FRAME_NANOS};

pub mod prelude {
    pub use crate::host::{DismissResponse, TestHost};
    pub use deck_animation::AnimationSpec;
    pub use deck_presentation::prelude::*;
    pub use deck_ui_graphics::{Rect, Size, Transform};
}
