//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame on web, manual stepping natively)
//! - Frame timing (variable refresh rates, stalls)
//! - Pointer coordinates on the play canvas

pub mod frame;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use frame::{FrameClock, FrameHandle};
