//! Rendering
//!
//! Games produce a [`Scene`] (a flat draw list); the Canvas 2D backend paints
//! it in the browser. Scenes are plain data so they can be checked in tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{DrawOp, Scene};
