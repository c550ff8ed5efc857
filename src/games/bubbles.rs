//! Bubble wrap: a sheet of bubbles to pop, refilled once it is cleared

use glam::Vec2;

use crate::PlayArea;
use crate::audio::Cue;
use crate::palette::{Color, Hue};
use crate::sim::{Entity, GameRules, HitShape, Look, Phase, Reaction, Spawn, SpawnCtx, Visual};

/// Bubble radius (px)
pub const RADIUS: f32 = 34.0;
/// Distance between bubble centers (px)
pub const SPACING: f32 = 84.0;
/// Delay between clearing the sheet and the next one appearing (ms)
pub const REFILL_DELAY_MS: f32 = 1200.0;
/// Particles per pop
pub const BURST: usize = 8;
/// Popped bubbles linger this long (ms)
pub const POP_EXIT_MS: f32 = 150.0;

pub struct BubbleWrap {
    /// Time since the sheet emptied (ms)
    empty_ms: f32,
    sheets: u32,
    hue: Hue,
}

impl BubbleWrap {
    pub fn new() -> Self {
        Self {
            empty_ms: 0.0,
            sheets: 0,
            hue: Hue::Blue,
        }
    }

    /// Sheets laid out so far, including the first
    pub fn sheets(&self) -> u32 {
        self.sheets
    }

    /// Lay out a new sheet in a fresh hue
    fn sheet(&mut self, ctx: &mut SpawnCtx<'_>) -> Vec<Spawn> {
        self.hue = Hue::random(ctx.rng);
        self.sheets += 1;
        self.grid(ctx.area)
    }

    /// Centered grid of bubbles in the current hue
    fn grid(&self, area: PlayArea) -> Vec<Spawn> {
        let cols = ((area.width / SPACING).floor() as usize).max(1);
        let rows = ((area.height / SPACING).floor() as usize).max(1);
        let origin = Vec2::new(
            (area.width - cols as f32 * SPACING) / 2.0 + SPACING / 2.0,
            (area.height - rows as f32 * SPACING) / 2.0 + SPACING / 2.0,
        );
        let mut spawns = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                spawns.push(Spawn {
                    pos: origin + Vec2::new(col as f32, row as f32) * SPACING,
                    vel: Vec2::ZERO,
                    shape: HitShape::Circle { radius: RADIUS },
                    visual: Visual {
                        hue: self.hue,
                        look: Look::Bubble,
                        size: RADIUS,
                    },
                    lifetime_ms: None,
                });
            }
        }
        spawns
    }
}

impl Default for BubbleWrap {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRules for BubbleWrap {
    fn name(&self) -> &'static str {
        "bubbles"
    }

    fn reset(&mut self) {
        self.empty_ms = 0.0;
        self.sheets = 0;
    }

    fn layout(&mut self, ctx: &mut SpawnCtx<'_>) -> Vec<Spawn> {
        self.sheet(ctx)
    }

    fn spawn(&mut self, ctx: &mut SpawnCtx<'_>, live: usize, dt_ms: f32) -> Vec<Spawn> {
        if live > 0 {
            self.empty_ms = 0.0;
            return Vec::new();
        }
        self.empty_ms += dt_ms;
        if self.empty_ms < REFILL_DELAY_MS {
            return Vec::new();
        }
        self.empty_ms = 0.0;
        log::debug!("bubbles: refilling sheet");
        self.sheet(ctx)
    }

    /// Re-lay the sheet over the new area. An emptied sheet waits for its
    /// refill instead.
    fn on_resize(&mut self, ctx: &mut SpawnCtx<'_>, entities: &mut [Entity]) -> Vec<Spawn> {
        let mut live = entities.iter_mut().filter(|e| e.phase.is_live()).peekable();
        if live.peek().is_none() {
            return Vec::new();
        }
        for bubble in live {
            bubble.finish(Phase::Expired, 0.0);
        }
        self.grid(ctx.area)
    }

    fn place(&mut self, ctx: &mut SpawnCtx<'_>, at: Vec2) -> Spawn {
        Spawn {
            pos: at,
            vel: Vec2::ZERO,
            shape: HitShape::Circle { radius: RADIUS },
            visual: Visual {
                hue: Hue::random(ctx.rng),
                look: Look::Bubble,
                size: RADIUS,
            },
            lifetime_ms: None,
        }
    }

    fn on_hit(&mut self, _entity: &Entity, live_after: usize) -> Reaction {
        Reaction {
            outcome: Phase::Popped,
            cue: Some(Cue::Pop),
            burst: Some(BURST),
            say: None,
            tone_hz: None,
            celebrate: live_after == 0,
        }
    }

    fn exit_ms(&self, phase: Phase) -> f32 {
        match phase {
            Phase::Popped => POP_EXIT_MS,
            _ => 0.0,
        }
    }

    fn background(&self) -> Color {
        Color::MINT
    }
}
