//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall clock in milliseconds)
//! - Input events and on-screen button hit regions
//! - The JS bridge (wasm only)

pub mod input;
pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Button, InputEvent, Rect, UiLayout};
pub use time::{Clock, ManualClock, SystemClock};
