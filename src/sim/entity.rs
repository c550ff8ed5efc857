//! Entities and their lifecycle
//!
//! Every balloon, bubble, shape, food item, piano key, bin and paint dab is an
//! [`Entity`].
//! Lifecycle: `Spawning -> Active -> (Popped | Placed | Expired) -> Removed`.

use glam::Vec2;

use crate::assets::SpriteRef;
use crate::palette::{Color, Hue};

/// Per-controller entity identifier (monotonic, never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created this frame, not yet drawn
    Spawning,
    /// On screen and interactive
    Active,
    /// Tapped and bursting
    Popped,
    /// Tapped and delivered (caught, fed)
    Placed,
    /// Left the play area or ran out of time
    Expired,
    /// Gone; dropped from the controller at the end of the frame
    Removed,
}

impl Phase {
    /// Popped, Placed or Expired
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Popped | Phase::Placed | Phase::Expired)
    }

    /// Spawning or Active
    pub fn is_live(&self) -> bool {
        matches!(self, Phase::Spawning | Phase::Active)
    }
}

/// Simple shapes for the falling-shapes game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
    Star,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Star,
    ];

    /// String-table key for the spoken shape name
    pub fn key(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "shapes.circle",
            ShapeKind::Square => "shapes.square",
            ShapeKind::Triangle => "shapes.triangle",
            ShapeKind::Star => "shapes.star",
        }
    }

    /// Lowercase name, used for image file names
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Star => "star",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "⚪",
            ShapeKind::Square => "🟦",
            ShapeKind::Triangle => "🔺",
            ShapeKind::Star => "⭐",
        }
    }
}

/// How an entity is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Look {
    Balloon,
    Bubble,
    Shape(ShapeKind),
    Sprite(SpriteRef),
    Dab,
    /// Piano key with its half extents
    Key { half: Vec2 },
    /// Open box that sorted shapes drop into
    Bin { half: Vec2 },
}

impl Look {
    /// Optional image for this look in `hue`. Balloons and shapes fall back
    /// to being drawn procedurally.
    pub fn sprite(&self, hue: Hue) -> Option<SpriteRef> {
        match *self {
            Look::Balloon => Some(SpriteRef::new("balloons", hue.name(), "🎈")),
            Look::Shape(kind) => Some(SpriteRef::new("shapes", kind.name(), kind.glyph())),
            Look::Sprite(sprite) => Some(sprite),
            Look::Bubble | Look::Dab | Look::Key { .. } | Look::Bin { .. } => None,
        }
    }
}

/// Visual descriptor: color, look and nominal size (radius or half extent)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub hue: Hue,
    pub look: Look,
    pub size: f32,
}

impl Visual {
    pub fn color(&self) -> Color {
        self.hue.color()
    }
}

/// Geometry used for pointer hit-testing, centered on the entity position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitShape {
    Circle { radius: f32 },
    Rect { half: Vec2 },
    /// Not tappable
    None,
}

impl HitShape {
    /// Strict containment of `point` for a shape centered at `center`
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        let d = point - center;
        match *self {
            HitShape::Circle { radius } => d.length_squared() < radius * radius,
            HitShape::Rect { half } => d.x.abs() < half.x && d.y.abs() < half.y,
            HitShape::None => false,
        }
    }
}

/// A transient, on-screen game object
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub shape: HitShape,
    pub visual: Visual,
    pub phase: Phase,
    /// Time since spawn (ms)
    pub age_ms: f32,
    /// Expires on its own after this long (ms)
    pub lifetime_ms: Option<f32>,
    /// Remaining exit animation once terminal (ms)
    exit_ms: f32,
    exit_total_ms: f32,
}

impl Entity {
    pub fn new(id: EntityId, spawn: Spawn) -> Self {
        Self {
            id,
            pos: spawn.pos,
            vel: spawn.vel,
            shape: spawn.shape,
            visual: spawn.visual,
            phase: Phase::Spawning,
            age_ms: 0.0,
            lifetime_ms: spawn.lifetime_ms,
            exit_ms: 0.0,
            exit_total_ms: 0.0,
        }
    }

    /// Interactive and under the pointer
    pub fn is_hit(&self, point: Vec2) -> bool {
        self.phase == Phase::Active && self.shape.contains(self.pos, point)
    }

    /// Enter a terminal phase with an exit animation of `exit_ms`.
    /// A zero-length exit goes straight to `Removed`.
    pub fn finish(&mut self, phase: Phase, exit_ms: f32) {
        debug_assert!(phase.is_terminal());
        if exit_ms <= 0.0 {
            self.phase = Phase::Removed;
            return;
        }
        self.phase = phase;
        self.exit_ms = exit_ms;
        self.exit_total_ms = exit_ms;
    }

    /// Count down the exit animation; returns true once removed
    pub fn tick_exit(&mut self, dt_ms: f32) -> bool {
        if self.phase.is_terminal() {
            self.exit_ms -= dt_ms;
            if self.exit_ms <= 0.0 {
                self.phase = Phase::Removed;
            }
        }
        self.phase == Phase::Removed
    }

    /// Exit animation progress, 0..=1 (0 while live)
    pub fn exit_progress(&self) -> f32 {
        if !self.phase.is_terminal() || self.exit_total_ms <= 0.0 {
            return if self.phase == Phase::Removed { 1.0 } else { 0.0 };
        }
        (1.0 - self.exit_ms / self.exit_total_ms).clamp(0.0, 1.0)
    }

    /// Fraction of lifetime remaining (1 without a lifetime)
    pub fn life_left(&self) -> f32 {
        match self.lifetime_ms {
            Some(life) if life > 0.0 => (1.0 - self.age_ms / life).clamp(0.0, 1.0),
            _ => 1.0,
        }
    }

    pub fn lifetime_over(&self) -> bool {
        self.lifetime_ms.is_some_and(|life| self.age_ms >= life)
    }
}

/// Everything needed to create an entity; the controller assigns the id
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub pos: Vec2,
    pub vel: Vec2,
    pub shape: HitShape,
    pub visual: Visual,
    pub lifetime_ms: Option<f32>,
}

/// Static decoration drawn behind entities (e.g. the hungry animal)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backdrop {
    pub sprite: SpriteRef,
    pub center: Vec2,
    pub size: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc(radius: f32) -> Entity {
        Entity::new(
            EntityId(1),
            Spawn {
                pos: Vec2::new(100.0, 100.0),
                vel: Vec2::ZERO,
                shape: HitShape::Circle { radius },
                visual: Visual {
                    hue: Hue::Red,
                    look: Look::Bubble,
                    size: radius,
                },
                lifetime_ms: None,
            },
        )
    }

    #[test]
    fn test_circle_containment_is_strict() {
        let shape = HitShape::Circle { radius: 10.0 };
        assert!(shape.contains(Vec2::ZERO, Vec2::new(9.9, 0.0)));
        assert!(!shape.contains(Vec2::ZERO, Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_rect_containment_is_strict() {
        let shape = HitShape::Rect {
            half: Vec2::new(20.0, 10.0),
        };
        assert!(shape.contains(Vec2::ZERO, Vec2::new(19.0, -9.0)));
        assert!(!shape.contains(Vec2::ZERO, Vec2::new(20.0, 0.0)));
        assert!(!shape.contains(Vec2::ZERO, Vec2::new(0.0, 10.5)));
    }

    #[test]
    fn test_sprites_for_balloons_and_shapes() {
        let balloon = Look::Balloon.sprite(Hue::Green).unwrap();
        assert_eq!(balloon.candidates()[0], "images/balloons/green.webp");
        let star = Look::Shape(ShapeKind::Star).sprite(Hue::Red).unwrap();
        assert_eq!(star.candidates()[1], "images/shapes/star.png");
        assert_eq!(star.glyph, "⭐");
        assert_eq!(Look::Bubble.sprite(Hue::Red), None);
    }

    #[test]
    fn test_none_shape_never_hit() {
        assert!(!HitShape::None.contains(Vec2::ZERO, Vec2::ZERO));
    }

    #[test]
    fn test_spawning_is_not_hittable() {
        let mut e = disc(20.0);
        assert!(!e.is_hit(e.pos));
        e.phase = Phase::Active;
        assert!(e.is_hit(e.pos));
    }

    #[test]
    fn test_exit_countdown() {
        let mut e = disc(20.0);
        e.phase = Phase::Active;
        e.finish(Phase::Popped, 200.0);
        assert_eq!(e.phase, Phase::Popped);
        assert!(!e.tick_exit(100.0));
        assert!((e.exit_progress() - 0.5).abs() < 1e-6);
        assert!(e.tick_exit(100.0));
        assert_eq!(e.phase, Phase::Removed);
    }

    #[test]
    fn test_zero_exit_removes_immediately() {
        let mut e = disc(20.0);
        e.finish(Phase::Expired, 0.0);
        assert_eq!(e.phase, Phase::Removed);
    }

    #[test]
    fn test_lifetime() {
        let mut e = disc(5.0);
        e.lifetime_ms = Some(1000.0);
        e.age_ms = 250.0;
        assert!((e.life_left() - 0.75).abs() < 1e-6);
        assert!(!e.lifetime_over());
        e.age_ms = 1000.0;
        assert!(e.lifetime_over());
    }
}
