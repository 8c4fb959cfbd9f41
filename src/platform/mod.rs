//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall clock vs. manually stepped)
//! - Frame scheduling (requestAnimationFrame vs. manually pumped)
//! - Canvas drawing and window events (web only)

pub mod scheduler;
pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use scheduler::{FrameScheduler, ManualScheduler};
pub use time::{ManualTime, TimeSource, WallClock};
