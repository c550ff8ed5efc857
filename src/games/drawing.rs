//! Finger painting: touch to paint colored dabs that slowly fade away.
//! Each new touch switches color and plays a note picked by height.

use glam::Vec2;

use crate::palette::{Color, Hue};
use crate::sim::{Entity, GameRules, HitShape, Look, Phase, Spawn, SpawnCtx, Stroke, Visual};

/// Dab radius (px)
pub const DAB_RADIUS: f32 = 14.0;
/// Dabs fade out after this long (ms)
pub const DAB_LIFETIME_MS: f32 = 6000.0;
/// Most dabs kept on the canvas; the oldest fade first
pub const MAX_DABS: usize = 600;
/// Minimum distance between dabs of one stroke (px)
pub const DAB_SPACING: f32 = 8.0;
pub const FADE_EXIT_MS: f32 = 500.0;
/// C major pentatonic, low to high (Hz)
pub const NOTES: [f32; 8] = [
    261.63, 293.66, 329.63, 392.00, 440.00, 523.25, 587.33, 659.25,
];

pub struct Drawing {
    hue: Hue,
    last: Option<Vec2>,
}

impl Drawing {
    pub fn new() -> Self {
        Self {
            hue: Hue::Red,
            last: None,
        }
    }

    pub fn hue(&self) -> Hue {
        self.hue
    }

    fn dab(&self, at: Vec2) -> Spawn {
        Spawn {
            pos: at,
            vel: Vec2::ZERO,
            shape: HitShape::None,
            visual: Visual {
                hue: self.hue,
                look: Look::Dab,
                size: DAB_RADIUS,
            },
            lifetime_ms: Some(DAB_LIFETIME_MS),
        }
    }
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new()
    }
}

/// Higher on screen plays a higher note
pub fn note_for(y: f32, height: f32) -> f32 {
    let t = (1.0 - y / height.max(1.0)).clamp(0.0, 1.0);
    let index = ((t * NOTES.len() as f32) as usize).min(NOTES.len() - 1);
    NOTES[index]
}

impl GameRules for Drawing {
    fn name(&self) -> &'static str {
        "drawing"
    }

    fn reset(&mut self) {
        self.last = None;
    }

    fn spawn(&mut self, _ctx: &mut SpawnCtx<'_>, _live: usize, _dt_ms: f32) -> Vec<Spawn> {
        Vec::new()
    }

    fn place(&mut self, _ctx: &mut SpawnCtx<'_>, at: Vec2) -> Spawn {
        self.dab(at)
    }

    /// New stroke: next color and a note
    fn on_miss(&mut self, ctx: &mut SpawnCtx<'_>, at: Vec2) -> Option<Stroke> {
        if !ctx.area.contains(at) {
            return None;
        }
        self.hue = self.hue.next();
        self.last = Some(at);
        Some(Stroke {
            spawn: self.dab(at),
            tone_hz: Some(note_for(at.y, ctx.area.height)),
        })
    }

    fn on_drag(&mut self, ctx: &mut SpawnCtx<'_>, at: Vec2) -> Option<Stroke> {
        if !ctx.area.contains(at) {
            return None;
        }
        if self.last.is_some_and(|last| last.distance(at) < DAB_SPACING) {
            return None;
        }
        self.last = Some(at);
        Some(Stroke {
            spawn: self.dab(at),
            tone_hz: None,
        })
    }

    /// Paint stays where it was put
    fn on_resize(&mut self, _ctx: &mut SpawnCtx<'_>, _entities: &mut [Entity]) -> Vec<Spawn> {
        Vec::new()
    }

    fn exit_ms(&self, phase: Phase) -> f32 {
        match phase {
            Phase::Expired => FADE_EXIT_MS,
            _ => 0.0,
        }
    }

    fn capacity(&self) -> Option<usize> {
        Some(MAX_DABS)
    }

    fn background(&self) -> Color {
        Color::WHITE
    }
}
