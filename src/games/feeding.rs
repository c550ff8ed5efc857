//! Feed the animal: food drifts across the screen, tap it to feed the
//! hungry animal waiting at the bottom

use glam::Vec2;
use rand::Rng;

use crate::PlayArea;
use crate::assets::SpriteRef;
use crate::audio::Cue;
use crate::palette::{Color, Hue};
use crate::sim::{
    Backdrop, Entity, GameRules, HitShape, Look, Phase, Phrase, Reaction, Spawn, SpawnCtx,
    SpawnTimer, Visual, spawn_x, uniform,
};

/// Half extent of a food item's box (px)
pub const HALF: f32 = 44.0;
/// Horizontal drift range (px/s)
pub const DRIFT_MIN: f32 = -40.0;
pub const DRIFT_MAX: f32 = 40.0;
/// Food items kept on screen
pub const TARGET: usize = 5;
/// Spawn interval range (ms)
pub const SPAWN_MIN_MS: f32 = 700.0;
pub const SPAWN_MAX_MS: f32 = 1500.0;
/// Uneaten food disappears after this long (ms)
pub const FOOD_LIFETIME_MS: f32 = 9000.0;
/// Vertical band food spawns in, as fractions of the play height
pub const BAND_TOP: f32 = 0.15;
pub const BAND_BOTTOM: f32 = 0.55;
pub const BURST: usize = 6;
/// Eaten food flies off over this long (ms)
pub const EAT_EXIT_MS: f32 = 300.0;
/// Uneaten food fades out over this long (ms)
pub const FADE_EXIT_MS: f32 = 400.0;
/// The animal answers with its own sound every Nth bite
pub const ANIMAL_SOUND_EVERY: u32 = 3;
/// Every Nth bite gets a celebration
pub const CELEBRATE_EVERY: u32 = 6;

pub const FOODS: [SpriteRef; 6] = [
    SpriteRef::new("food", "apple", "🍎"),
    SpriteRef::new("food", "banana", "🍌"),
    SpriteRef::new("food", "carrot", "🥕"),
    SpriteRef::new("food", "cheese", "🧀"),
    SpriteRef::new("food", "cookie", "🍪"),
    SpriteRef::new("food", "grapes", "🍇"),
];

/// A hungry animal and the string key of the sound it makes
pub struct Animal {
    pub sprite: SpriteRef,
    pub sound: &'static str,
}

pub static ANIMALS: [Animal; 5] = [
    Animal {
        sprite: SpriteRef::new("animals", "cat", "🐱"),
        sound: "animals.cat",
    },
    Animal {
        sprite: SpriteRef::new("animals", "dog", "🐶"),
        sound: "animals.dog",
    },
    Animal {
        sprite: SpriteRef::new("animals", "cow", "🐮"),
        sound: "animals.cow",
    },
    Animal {
        sprite: SpriteRef::new("animals", "duck", "🦆"),
        sound: "animals.duck",
    },
    Animal {
        sprite: SpriteRef::new("animals", "pig", "🐷"),
        sound: "animals.pig",
    },
];

pub struct Feeding {
    timer: SpawnTimer,
    animal: usize,
    bites: u32,
}

impl Feeding {
    pub fn new() -> Self {
        Self {
            timer: SpawnTimer::new(SPAWN_MIN_MS, SPAWN_MAX_MS),
            animal: 0,
            bites: 0,
        }
    }

    pub fn animal(&self) -> &Animal {
        &ANIMALS[self.animal % ANIMALS.len()]
    }

    pub fn bites(&self) -> u32 {
        self.bites
    }
}

impl Default for Feeding {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRules for Feeding {
    fn name(&self) -> &'static str {
        "feeding"
    }

    fn reset(&mut self) {
        self.timer.reset();
        self.bites = 0;
    }

    /// Picks the animal for this round; food arrives via the spawn timer
    fn layout(&mut self, ctx: &mut SpawnCtx<'_>) -> Vec<Spawn> {
        self.animal = ctx.rng.random_range(0..ANIMALS.len());
        log::info!("feeding: today's animal is {}", self.animal().sprite.name);
        Vec::new()
    }

    fn spawn(&mut self, ctx: &mut SpawnCtx<'_>, live: usize, dt_ms: f32) -> Vec<Spawn> {
        if live >= TARGET || !self.timer.tick(dt_ms, ctx.rng) {
            return Vec::new();
        }
        let area = ctx.area;
        let x = spawn_x(ctx.rng, area.width, HALF);
        let y = uniform(ctx.rng, area.height * BAND_TOP, area.height * BAND_BOTTOM);
        vec![self.place(ctx, Vec2::new(x, y))]
    }

    fn place(&mut self, ctx: &mut SpawnCtx<'_>, at: Vec2) -> Spawn {
        let food = FOODS[ctx.rng.random_range(0..FOODS.len())];
        Spawn {
            pos: at,
            vel: Vec2::new(uniform(ctx.rng, DRIFT_MIN, DRIFT_MAX), 0.0),
            shape: HitShape::Rect {
                half: Vec2::splat(HALF),
            },
            visual: Visual {
                hue: Hue::random(ctx.rng),
                look: Look::Sprite(food),
                size: HALF,
            },
            lifetime_ms: Some(FOOD_LIFETIME_MS),
        }
    }

    /// Drift sideways, bouncing off the left and right edges
    fn advance(&mut self, entity: &mut Entity, area: PlayArea, dt: f32) -> bool {
        entity.pos += entity.vel * dt;
        if entity.pos.x - HALF < 0.0 {
            entity.pos.x = HALF.min(area.width / 2.0);
            entity.vel.x = entity.vel.x.abs();
        } else if entity.pos.x + HALF > area.width {
            entity.pos.x = (area.width - HALF).max(area.width / 2.0);
            entity.vel.x = -entity.vel.x.abs();
        }
        true
    }

    /// Yum, the animal's own sound every few bites, or a call for more
    /// once the last food on screen is eaten
    fn on_hit(&mut self, _entity: &Entity, live_after: usize) -> Reaction {
        self.bites += 1;
        let say = if self.bites % ANIMAL_SOUND_EVERY == 0 {
            Phrase::Key(self.animal().sound)
        } else if live_after == 0 {
            Phrase::Key("feeding.more")
        } else {
            Phrase::Key("feeding.yum")
        };
        Reaction {
            outcome: Phase::Placed,
            cue: Some(Cue::Whoosh),
            burst: Some(BURST),
            say: Some(say),
            tone_hz: None,
            celebrate: self.bites % CELEBRATE_EVERY == 0,
        }
    }

    fn exit_ms(&self, phase: Phase) -> f32 {
        match phase {
            Phase::Placed => EAT_EXIT_MS,
            Phase::Expired => FADE_EXIT_MS,
            _ => 0.0,
        }
    }

    fn background(&self) -> Color {
        Color::LILAC
    }

    fn backdrop(&self, area: PlayArea) -> Option<Backdrop> {
        let size = area.width.min(area.height) * 0.22;
        Some(Backdrop {
            sprite: self.animal().sprite,
            center: Vec2::new(area.width / 2.0, area.height - size * 0.6),
            size,
        })
    }
}
