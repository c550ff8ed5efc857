//! Rainbow piano: a row of big colored keys, each playing one note

use glam::Vec2;

use super::drawing::NOTES;
use crate::PlayArea;
use crate::palette::{Color, Hue};
use crate::sim::{Entity, GameRules, HitShape, Look, Phase, Reaction, Spawn, SpawnCtx, Visual};

/// Keys take up this fraction of the play height
pub const KEY_HEIGHT: f32 = 0.6;
/// Gap between neighbouring keys (px)
pub const KEY_GAP: f32 = 6.0;
/// A pressed key stays down this long before it pops back up (ms)
pub const PRESS_MS: f32 = 150.0;
/// Sparkles per key press
pub const BURST: usize = 4;
/// Every Nth note gets a celebration
pub const CELEBRATE_EVERY: u32 = 24;

pub struct Piano {
    /// Width of one key slot (px)
    slot: f32,
    /// Keys currently pressed, with time left until they come back (ms)
    pressed: Vec<(usize, f32)>,
    notes: u32,
}

impl Piano {
    pub fn new() -> Self {
        Self {
            slot: 1.0,
            pressed: Vec::new(),
            notes: 0,
        }
    }

    pub fn notes_played(&self) -> u32 {
        self.notes
    }

    /// Key slot under a horizontal position, left to right
    fn index_at(&self, x: f32) -> usize {
        ((x / self.slot).max(0.0) as usize).min(NOTES.len() - 1)
    }

    fn key(&self, index: usize, area: PlayArea) -> Spawn {
        let height = area.height * KEY_HEIGHT;
        let half = Vec2::new(
            ((self.slot - KEY_GAP) / 2.0).max(1.0),
            (height / 2.0).max(1.0),
        );
        Spawn {
            pos: Vec2::new(self.slot * (index as f32 + 0.5), area.height - height / 2.0),
            vel: Vec2::ZERO,
            shape: HitShape::Rect { half },
            visual: Visual {
                hue: Hue::ALL[index % Hue::ALL.len()],
                look: Look::Key { half },
                size: half.x,
            },
            lifetime_ms: None,
        }
    }

    fn keyboard(&mut self, area: PlayArea) -> Vec<Spawn> {
        self.slot = area.width / NOTES.len() as f32;
        self.pressed.clear();
        (0..NOTES.len()).map(|i| self.key(i, area)).collect()
    }
}

impl Default for Piano {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRules for Piano {
    fn name(&self) -> &'static str {
        "piano"
    }

    fn reset(&mut self) {
        self.pressed.clear();
        self.notes = 0;
    }

    fn layout(&mut self, ctx: &mut SpawnCtx<'_>) -> Vec<Spawn> {
        self.keyboard(ctx.area)
    }

    /// Bring pressed keys back up once their press is over
    fn spawn(&mut self, ctx: &mut SpawnCtx<'_>, _live: usize, dt_ms: f32) -> Vec<Spawn> {
        let mut released = Vec::new();
        self.pressed.retain_mut(|(index, left_ms)| {
            *left_ms -= dt_ms;
            if *left_ms > 0.0 {
                return true;
            }
            released.push(*index);
            false
        });
        released.into_iter().map(|i| self.key(i, ctx.area)).collect()
    }

    fn place(&mut self, ctx: &mut SpawnCtx<'_>, at: Vec2) -> Spawn {
        self.key(self.index_at(at.x), ctx.area)
    }

    fn advance(&mut self, _entity: &mut Entity, _area: PlayArea, _dt: f32) -> bool {
        true
    }

    fn on_hit(&mut self, entity: &Entity, _live_after: usize) -> Reaction {
        let index = self.index_at(entity.pos.x);
        self.pressed.push((index, PRESS_MS));
        self.notes += 1;
        Reaction {
            outcome: Phase::Placed,
            cue: None,
            burst: Some(BURST),
            say: None,
            tone_hz: Some(NOTES[index]),
            celebrate: self.notes % CELEBRATE_EVERY == 0,
        }
    }

    /// Rebuild the keyboard across the new width
    fn on_resize(&mut self, ctx: &mut SpawnCtx<'_>, entities: &mut [Entity]) -> Vec<Spawn> {
        for key in entities.iter_mut().filter(|e| e.phase.is_live()) {
            key.finish(Phase::Expired, 0.0);
        }
        self.keyboard(ctx.area)
    }

    fn exit_ms(&self, phase: Phase) -> f32 {
        match phase {
            Phase::Placed => PRESS_MS,
            _ => 0.0,
        }
    }

    fn background(&self) -> Color {
        Color::SKY
    }
}
