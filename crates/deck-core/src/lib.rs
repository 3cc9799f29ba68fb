//! Single-threaded runtime for deck presentations.
//!
//! Frame callbacks, shared handles and named notifications. Everything
//! here assumes one logical UI thread.

mod frame_clock;
mod notification;
mod platform;
mod runtime;
mod shared;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use notification::{NotificationCenter, NotificationName, ObserverId, Subscription};
pub use platform::RuntimeScheduler;
pub use runtime::{DefaultScheduler, FrameCallbackId, Runtime, RuntimeHandle};
pub use shared::{Shared, WeakShared};

#[cfg(feature = "std-hash")]
pub mod collections {
    pub mod map {
        pub use std::collections::{HashMap, HashSet};
    }
}

#[cfg(not(feature = "std-hash"))]
pub mod collections {
    pub mod map {
        pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
    }
}

pub mod prelude {
    pub use crate::frame_clock::FrameClock;
    pub use crate::runtime::{Runtime, RuntimeHandle};
    pub use crate::shared::{Shared, WeakShared};
}
