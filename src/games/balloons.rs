//! Balloon pop: balloons float up from the bottom, tap to pop them

use glam::Vec2;

use crate::PlayArea;
use crate::audio::Cue;
use crate::palette::Hue;
use crate::sim::{
    Entity, GameRules, HitShape, Look, Phase, Phrase, Reaction, Spawn, SpawnCtx, SpawnTimer,
    Visual, spawn_x, uniform,
};

/// Balloon radius range (px)
pub const RADIUS_MIN: f32 = 38.0;
pub const RADIUS_MAX: f32 = 56.0;
/// Vertical speed range (px/s, negative is up)
pub const RISE_MIN: f32 = -140.0;
pub const RISE_MAX: f32 = -60.0;
/// Horizontal drift range (px/s)
pub const DRIFT_MIN: f32 = -20.0;
pub const DRIFT_MAX: f32 = 20.0;
/// Balloons kept on screen
pub const TARGET: usize = 6;
/// Spawn interval range (ms)
pub const SPAWN_MIN_MS: f32 = 600.0;
pub const SPAWN_MAX_MS: f32 = 1400.0;
/// Particles per pop
pub const BURST: usize = 14;
/// Every Nth pop gets praise instead of the color name
pub const PRAISE_EVERY: u32 = 5;
/// Every Nth pop gets a celebration
pub const CELEBRATE_EVERY: u32 = 10;

pub struct Balloons {
    timer: SpawnTimer,
    pops: u32,
}

impl Balloons {
    pub fn new() -> Self {
        Self {
            timer: SpawnTimer::new(SPAWN_MIN_MS, SPAWN_MAX_MS),
            pops: 0,
        }
    }

    pub fn pops(&self) -> u32 {
        self.pops
    }
}

impl Default for Balloons {
    fn default() -> Self {
        Self::new()
    }
}

fn radius_of(entity: &Entity) -> f32 {
    match entity.shape {
        HitShape::Circle { radius } => radius,
        _ => entity.visual.size,
    }
}

impl GameRules for Balloons {
    fn name(&self) -> &'static str {
        "balloons"
    }

    fn reset(&mut self) {
        self.timer.reset();
        self.pops = 0;
    }

    fn spawn(&mut self, ctx: &mut SpawnCtx<'_>, live: usize, dt_ms: f32) -> Vec<Spawn> {
        if live >= TARGET || !self.timer.tick(dt_ms, ctx.rng) {
            return Vec::new();
        }
        let radius = uniform(ctx.rng, RADIUS_MIN, RADIUS_MAX);
        let x = spawn_x(ctx.rng, ctx.area.width, radius);
        let at = Vec2::new(x, ctx.area.height + radius);
        let mut spawn = self.place(ctx, at);
        spawn.shape = HitShape::Circle { radius };
        spawn.visual.size = radius;
        vec![spawn]
    }

    fn place(&mut self, ctx: &mut SpawnCtx<'_>, at: Vec2) -> Spawn {
        let radius = uniform(ctx.rng, RADIUS_MIN, RADIUS_MAX);
        let vel = Vec2::new(
            uniform(ctx.rng, DRIFT_MIN, DRIFT_MAX),
            uniform(ctx.rng, RISE_MIN, RISE_MAX),
        );
        Spawn {
            pos: at,
            vel,
            shape: HitShape::Circle { radius },
            visual: Visual {
                hue: Hue::random(ctx.rng),
                look: Look::Balloon,
                size: radius,
            },
            lifetime_ms: None,
        }
    }

    /// Out of play once the whole balloon has risen past the top
    fn advance(&mut self, entity: &mut Entity, _area: PlayArea, dt: f32) -> bool {
        entity.pos += entity.vel * dt;
        entity.pos.y + radius_of(entity) >= 0.0
    }

    fn on_hit(&mut self, entity: &Entity, _live_after: usize) -> Reaction {
        self.pops += 1;
        let celebrate = self.pops % CELEBRATE_EVERY == 0;
        let say = if celebrate {
            None
        } else if self.pops % PRAISE_EVERY == 0 {
            Some(Phrase::AnyOf("praise"))
        } else {
            Some(Phrase::Key(entity.visual.hue.key()))
        };
        Reaction {
            outcome: Phase::Popped,
            cue: Some(Cue::Pop),
            burst: Some(BURST),
            say,
            tone_hz: None,
            celebrate,
        }
    }
}
