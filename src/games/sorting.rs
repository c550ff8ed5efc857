//! Color sorting: shapes fall toward colored bins; tap one and it hops into
//! the bin of its color

use glam::Vec2;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::PlayArea;
use crate::audio::Cue;
use crate::palette::{Color, Hue};
use crate::sim::{
    Entity, GameRules, HitShape, Look, Phase, Phrase, Reaction, ShapeKind, Spawn, SpawnCtx,
    SpawnTimer, Visual, spawn_x, uniform,
};

/// Number of bins (and colors in play)
pub const BINS: usize = 3;
/// Bins take up this fraction of the play height
pub const BIN_HEIGHT: f32 = 0.22;
/// Gap between neighbouring bins (px)
pub const BIN_GAP: f32 = 16.0;
/// Half extent range of a falling shape (px)
pub const HALF_MIN: f32 = 34.0;
pub const HALF_MAX: f32 = 46.0;
/// Downward acceleration, gentler than the catching game (px/s²)
pub const GRAVITY: f32 = 120.0;
/// Initial fall speed range (px/s)
pub const FALL_MIN: f32 = 20.0;
pub const FALL_MAX: f32 = 60.0;
/// Shapes in the air at once
pub const TARGET: usize = 3;
/// Spawn interval range (ms)
pub const SPAWN_MIN_MS: f32 = 1000.0;
pub const SPAWN_MAX_MS: f32 = 2000.0;
pub const BURST: usize = 8;
/// Time a sorted shape takes to drop into its bin (ms)
pub const SORT_EXIT_MS: f32 = 500.0;
/// How quickly a sorted shape closes in on its bin (1/s)
pub const SORT_RATE: f32 = 9.0;
/// Every Nth sorted shape gets a celebration
pub const CELEBRATE_EVERY: u32 = 10;

/// One bin: its color and where it sits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub hue: Hue,
    pub center: Vec2,
    pub half: Vec2,
}

pub struct Sorting {
    timer: SpawnTimer,
    bins: Vec<Bin>,
    sorted: u32,
}

impl Sorting {
    pub fn new() -> Self {
        Self {
            timer: SpawnTimer::new(SPAWN_MIN_MS, SPAWN_MAX_MS),
            bins: Vec::new(),
            sorted: 0,
        }
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn sorted(&self) -> u32 {
        self.sorted
    }

    /// Bin matching a shape's color
    pub fn bin_for(&self, hue: Hue) -> Option<&Bin> {
        self.bins.iter().find(|b| b.hue == hue)
    }

    /// Place the current bin colors evenly along the bottom edge
    fn arrange(&mut self, area: PlayArea) -> Vec<Spawn> {
        let slot = area.width / self.bins.len().max(1) as f32;
        let height = area.height * BIN_HEIGHT;
        let half = Vec2::new(
            (slot / 2.0 - BIN_GAP).max(1.0),
            (height / 2.0).max(1.0),
        );
        for (i, bin) in self.bins.iter_mut().enumerate() {
            bin.center = Vec2::new(slot * (i as f32 + 0.5), area.height - height / 2.0);
            bin.half = half;
        }
        self.bins
            .iter()
            .map(|bin| Spawn {
                pos: bin.center,
                vel: Vec2::ZERO,
                shape: HitShape::None,
                visual: Visual {
                    hue: bin.hue,
                    look: Look::Bin { half: bin.half },
                    size: half.x,
                },
                lifetime_ms: None,
            })
            .collect()
    }
}

impl Default for Sorting {
    fn default() -> Self {
        Self::new()
    }
}

fn is_bin(entity: &Entity) -> bool {
    matches!(entity.visual.look, Look::Bin { .. })
}

impl GameRules for Sorting {
    fn name(&self) -> &'static str {
        "sorting"
    }

    fn reset(&mut self) {
        self.timer.reset();
        self.bins.clear();
        self.sorted = 0;
    }

    /// Pick this round's colors and set out their bins
    fn layout(&mut self, ctx: &mut SpawnCtx<'_>) -> Vec<Spawn> {
        let mut hues = Hue::ALL;
        hues.shuffle(ctx.rng);
        self.bins = hues
            .iter()
            .take(BINS)
            .map(|&hue| Bin {
                hue,
                center: Vec2::ZERO,
                half: Vec2::ZERO,
            })
            .collect();
        self.arrange(ctx.area)
    }

    fn spawn(&mut self, ctx: &mut SpawnCtx<'_>, live: usize, dt_ms: f32) -> Vec<Spawn> {
        if live >= self.bins.len() + TARGET || !self.timer.tick(dt_ms, ctx.rng) {
            return Vec::new();
        }
        let mut spawn = self.place(ctx, Vec2::ZERO);
        let half = spawn.visual.size;
        spawn.pos = Vec2::new(spawn_x(ctx.rng, ctx.area.width, half), -half);
        vec![spawn]
    }

    fn place(&mut self, ctx: &mut SpawnCtx<'_>, at: Vec2) -> Spawn {
        let half = uniform(ctx.rng, HALF_MIN, HALF_MAX);
        let hue = self
            .bins
            .choose(ctx.rng)
            .map_or_else(|| Hue::random(ctx.rng), |b| b.hue);
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
                hue,
                look: Look::Shape(kind),
                size: half,
            },
            lifetime_ms: None,
        }
    }

    /// Bins stay put; shapes fall under gravity until they drop out of sight
    fn advance(&mut self, entity: &mut Entity, area: PlayArea, dt: f32) -> bool {
        if is_bin(entity) {
            return true;
        }
        entity.pos += entity.vel * dt + Vec2::new(0.0, 0.5 * GRAVITY * dt * dt);
        entity.vel.y += GRAVITY * dt;
        entity.pos.y - entity.visual.size <= area.height
    }

    fn on_hit(&mut self, entity: &Entity, _live_after: usize) -> Reaction {
        self.sorted += 1;
        Reaction {
            outcome: Phase::Placed,
            cue: Some(Cue::Success),
            burst: Some(BURST),
            say: Some(Phrase::Key(entity.visual.hue.key())),
            tone_hz: None,
            celebrate: self.sorted % CELEBRATE_EVERY == 0,
        }
    }

    /// Sorted shapes close in on their bin, the same distance whatever the
    /// frame rate
    fn animate_exit(&mut self, entity: &mut Entity, _area: PlayArea, dt: f32) {
        if entity.phase != Phase::Placed {
            return;
        }
        let Some(bin) = self.bin_for(entity.visual.hue) else {
            return;
        };
        let target = bin.center;
        entity.pos = target + (entity.pos - target) * (-SORT_RATE * dt).exp();
    }

    /// Move the bins to the new bottom edge and keep shapes over them
    fn on_resize(&mut self, ctx: &mut SpawnCtx<'_>, entities: &mut [Entity]) -> Vec<Spawn> {
        let width = ctx.area.width;
        for entity in entities.iter_mut().filter(|e| e.phase.is_live()) {
            if is_bin(entity) {
                entity.finish(Phase::Expired, 0.0);
            } else {
                let half = entity.visual.size.min(width / 2.0);
                entity.pos.x = entity.pos.x.clamp(half, width - half);
            }
        }
        self.arrange(ctx.area)
    }

    fn exit_ms(&self, phase: Phase) -> f32 {
        match phase {
            Phase::Placed => SORT_EXIT_MS,
            _ => 0.0,
        }
    }

    fn background(&self) -> Color {
        Color::CREAM
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::settings::Preferences;
    use crate::sim::{Controller, EntityId, Feedback, PointerOutcome};
    use crate::speech::Announcer;
    use crate::speech::testing::RecordingSpeech;

    fn controller(area: PlayArea) -> Controller<Sorting> {
        let prefs = Rc::new(Preferences::in_memory());
        Controller::new(Sorting::new(), area, Feedback::silent(prefs), 17)
    }

    #[test]
    fn test_bins_line_the_bottom() {
        let area = PlayArea::new(900.0, 600.0);
        let mut ctl = controller(area);
        ctl.start();
        let bins = ctl.rules().bins().to_vec();
        assert_eq!(bins.len(), BINS);
        assert_ne!(bins[0].hue, bins[1].hue);
        assert_ne!(bins[1].hue, bins[2].hue);
        assert_ne!(bins[0].hue, bins[2].hue);
        for bin in &bins {
            assert!(bin.center.y + bin.half.y <= area.height + 1e-3);
            assert!(bin.center.x - bin.half.x >= 0.0 && bin.center.x + bin.half.x <= area.width);
        }
        assert_eq!(ctl.live_count(), BINS);
        assert!(ctl.entities().iter().all(|e| e.shape == HitShape::None));
    }

    #[test]
    fn test_bins_are_not_tappable() {
        let mut ctl = controller(PlayArea::new(900.0, 600.0));
        ctl.start();
        ctl.frame(16.0);
        let center = ctl.rules().bins()[1].center;
        assert_eq!(ctl.handle_pointer(center.x, center.y), PointerOutcome::Miss);
    }

    #[test]
    fn test_sorted_shape_drops_into_its_bin() {
        let prefs = Rc::new(Preferences::in_memory());
        let (speech, said) = RecordingSpeech::new();
        let mut feedback = Feedback::silent(prefs.clone());
        feedback.speech = Rc::new(Announcer::new(prefs, "en-US", Box::new(speech)));
        let mut ctl = Controller::new(Sorting::new(), PlayArea::new(900.0, 600.0), feedback, 3);
        ctl.start();
        let id = ctl.spawn_at(Vec2::new(450.0, 150.0));
        ctl.frame(16.0);
        let shape = ctl.entity(id).cloned().unwrap();
        let bin = *ctl.rules().bin_for(shape.visual.hue).unwrap();

        assert_eq!(ctl.handle_pointer(shape.pos.x, shape.pos.y), PointerOutcome::Hit(id));
        assert_eq!(ctl.phase_of(id), Phase::Placed);
        let color = crate::strings::StringTable::builtin()
            .text(shape.visual.hue.key())
            .to_string();
        assert_eq!(said.borrow().as_slice(), [color]);

        let before = shape.pos.distance(bin.center);
        ctl.frame(100.0);
        let after = ctl.entity(id).map(|e| e.pos.distance(bin.center)).unwrap();
        assert!(after < before * 0.5);
        for _ in 0..5 {
            ctl.frame(100.0);
        }
        assert_eq!(ctl.phase_of(id), Phase::Removed);
        assert_eq!(ctl.rules().sorted(), 1);
    }

    #[test]
    fn test_sort_glide_matches_across_frame_rates() {
        let mut rules = Sorting::new();
        let mut rng = Pcg32::seed_from_u64(4);
        let area = PlayArea::new(900.0, 600.0);
        let mut ctx = SpawnCtx { rng: &mut rng, area };
        rules.layout(&mut ctx);
        let spawn = rules.place(&mut ctx, Vec2::new(100.0, 100.0));

        let mut fine = Entity::new(EntityId(1), spawn);
        fine.phase = Phase::Active;
        fine.finish(Phase::Placed, SORT_EXIT_MS);
        let mut coarse = fine.clone();
        rules.animate_exit(&mut fine, area, 0.05);
        rules.animate_exit(&mut fine, area, 0.05);
        rules.animate_exit(&mut coarse, area, 0.1);
        assert!(fine.pos.distance(coarse.pos) < 0.01);
    }

    #[test]
    fn test_uncaught_shape_falls_away() {
        let mut ctl = controller(PlayArea::new(900.0, 600.0));
        ctl.start();
        let id = ctl.spawn_at(Vec2::new(450.0, 500.0));
        // Even the slowest shape falls 146 px within 1.5 s
        for _ in 0..30 {
            ctl.frame(100.0);
        }
        assert_eq!(ctl.phase_of(id), Phase::Removed);
        assert_eq!(ctl.rules().bins().len(), BINS);
        assert_eq!(ctl.entities().iter().filter(|e| is_bin(e)).count(), BINS);
    }

    #[test]
    fn test_live_count_stays_bounded() {
        let mut ctl = controller(PlayArea::new(900.0, 600.0));
        ctl.start();
        for _ in 0..300 {
            ctl.frame(100.0);
            assert!(ctl.live_count() <= BINS + TARGET);
        }
        assert!(ctl.live_count() > BINS);
    }

    #[test]
    fn test_resize_moves_bins() {
        let mut ctl = controller(PlayArea::new(900.0, 600.0));
        ctl.start();
        let hues: Vec<Hue> = ctl.rules().bins().iter().map(|b| b.hue).collect();
        let tall = PlayArea::new(450.0, 1000.0);
        ctl.resize(tall);
        ctl.frame(16.0);

        let bins: Vec<&Entity> = ctl.entities().iter().filter(|e| is_bin(e)).collect();
        assert_eq!(bins.len(), BINS);
        assert!(bins.iter().all(|b| tall.contains(b.pos) && b.pos.y > 800.0));
        let after: Vec<Hue> = ctl.rules().bins().iter().map(|b| b.hue).collect();
        assert_eq!(hues, after);
    }

    proptest! {
        #[test]
        fn prop_shapes_match_a_bin(seed in any::<u64>(), width in 300.0f32..2000.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut rules = Sorting::new();
            let mut ctx = SpawnCtx { rng: &mut rng, area: PlayArea::new(width, 700.0) };
            rules.layout(&mut ctx);
            let spawns = rules.spawn(&mut ctx, BINS, SPAWN_MIN_MS);
            prop_assert_eq!(spawns.len(), 1);
            let s = spawns[0];
            prop_assert!(rules.bin_for(s.visual.hue).is_some());
            prop_assert!(s.pos.x >= 0.0 && s.pos.x < width);
            prop_assert!(s.pos.y < 0.0);
            prop_assert!((FALL_MIN..FALL_MAX).contains(&s.vel.y));
        }
    }
}
