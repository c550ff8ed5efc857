//! Toddler Games - tap-and-giggle mini-games for the browser
//!
//! Core modules:
//! - `sim`: Entities, hit-testing and the per-game controller loop
//! - `games`: Rules for each mini-game (balloons, bubble wrap, ...)
//! - `audio`: Procedural sound cues (Web Audio on wasm)
//! - `speech`: Spoken praise (speech synthesis on wasm)
//! - `effects`: Particle bursts and celebration toasts
//! - `renderer`: Draw list + Canvas 2D backend
//! - `platform`: Frame scheduling and browser glue
//! - `settings`: Sound/speech preference flags
//! - `strings`: Localized string table
//! - `assets`: Optional image assets with glyph fallback

pub mod assets;
pub mod audio;
pub mod effects;
pub mod games;
pub mod palette;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod speech;
pub mod strings;

pub use games::{GameKind, Playable};
pub use settings::Preferences;
pub use sim::{Controller, Feedback};

use glam::Vec2;

/// Loop timing constants
pub mod consts {
    /// Longest frame delta fed to a controller (ms); longer gaps count as a stall
    pub const MAX_FRAME_DT_MS: f64 = 100.0;
    /// Delta assumed for the first frame after start (ms)
    pub const FIRST_FRAME_DT_MS: f64 = 1000.0 / 60.0;
}

/// Playable region in CSS pixels. Origin is top-left, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    /// Create an area, clamping degenerate sizes to one pixel
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a point lies inside the area (right/bottom edges exclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.y >= 0.0 && point.x < self.width && point.y < self.height
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}
