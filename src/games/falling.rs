//! Catch the shapes: shapes fall from the top, tap to catch them

use glam::Vec2;
use rand::seq::IndexedRandom;

use crate::PlayArea;
use crate::audio::Cue;
use crate::palette::{Color, Hue};
use crate::sim::{
    Entity, GameRules, HitShape, Look, Phase, Phrase, Reaction, ShapeKind, Spawn, SpawnCtx,
    SpawnTimer, Visual, spawn_x, uniform,
};

/// Half extent range of a shape's box (px)
pub const HALF_MIN: f32 = 36.0;
pub const HALF_MAX: f32 = 56.0;
/// Downward acceleration (px/s²)
pub const GRAVITY: f32 = 320.0;
/// Initial fall speed range (px/s)
pub const FALL_MIN: f32 = 20.0;
pub const FALL_MAX: f32 = 80.0;
/// Shapes kept on screen
pub const TARGET: usize = 4;
/// Spawn interval range (ms)
pub const SPAWN_MIN_MS: f32 = 900.0;
pub const SPAWN_MAX_MS: f32 = 1800.0;
pub const BURST: usize = 10;
/// Caught shapes shrink away over this long (ms)
pub const CATCH_EXIT_MS: f32 = 250.0;
/// Every Nth catch gets a celebration
pub const CELEBRATE_EVERY: u32 = 8;

pub struct FallingShapes {
    timer: SpawnTimer,
    catches: u32,
}

impl FallingShapes {
    pub fn new() -> Self {
        Self {
            timer: SpawnTimer::new(SPAWN_MIN_MS, SPAWN_MAX_MS),
            catches: 0,
        }
    }

    pub fn catches(&self) -> u32 {
        self.catches
    }
}

impl Default for FallingShapes {
    fn default() -> Self {
        Self::new()
    }
}

fn half_of(entity: &Entity) -> f32 {
    match entity.shape {
        HitShape::Rect { half } => half.y,
        _ => entity.visual.size,
    }
}

impl GameRules for FallingShapes {
    fn name(&self) -> &'static str {
        "falling"
    }

    fn reset(&mut self) {
        self.timer.reset();
        self.catches = 0;
    }

    fn spawn(&mut self, ctx: &mut SpawnCtx<'_>, live: usize, dt_ms: f32) -> Vec<Spawn> {
        if live >= TARGET || !self.timer.tick(dt_ms, ctx.rng) {
            return Vec::new();
        }
        let mut spawn = self.place(ctx, Vec2::ZERO);
        let half = spawn.visual.size;
        spawn.pos = Vec2::new(spawn_x(ctx.rng, ctx.area.width, half), -half);
        vec![spawn]
    }

    fn place(&mut self, ctx: &mut SpawnCtx<'_>, at: Vec2) -> Spawn {
        let half = uniform(ctx.rng, HALF_MIN, HALF_MAX);
        let kind = ShapeKind::ALL
            .choose(ctx.rng)
            .copied()
            .unwrap_or(ShapeKind::Circle);
        Spawn {
            pos: at,
            vel: Vec2::new(0.0, uniform(ctx.rng, FALL_MIN, FALL_MAX)),
            shape: HitShape::Rect {
                half: Vec2::splat(half),
            },
            visual: Visual {
                hue: Hue::random(ctx.rng),
                look: Look::Shape(kind),
                size: half,
            },
            lifetime_ms: None,
        }
    }

    /// Closed-form constant acceleration, so any split of the same time
    /// lands in the same place. Gone once fully below the bottom edge.
    fn advance(&mut self, entity: &mut Entity, area: PlayArea, dt: f32) -> bool {
        entity.pos += entity.vel * dt + Vec2::new(0.0, 0.5 * GRAVITY * dt * dt);
        entity.vel.y += GRAVITY * dt;
        entity.pos.y - half_of(entity) <= area.height
    }

    fn on_hit(&mut self, entity: &Entity, _live_after: usize) -> Reaction {
        self.catches += 1;
        let say = match entity.visual.look {
            Look::Shape(kind) => Some(Phrase::Key(kind.key())),
            _ => None,
        };
        Reaction {
            outcome: Phase::Placed,
            cue: Some(Cue::Success),
            burst: Some(BURST),
            say,
            tone_hz: None,
            celebrate: self.catches % CELEBRATE_EVERY == 0,
        }
    }

    fn exit_ms(&self, phase: Phase) -> f32 {
        match phase {
            Phase::Placed => CATCH_EXIT_MS,
            _ => 0.0,
        }
    }

    fn background(&self) -> Color {
        Color::CREAM
    }
}
