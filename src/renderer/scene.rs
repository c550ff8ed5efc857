//! Backend-independent draw list
//!
//! A [`Scene`] is captured from a controller's state once per frame and then
//! handed to whatever paints it (Canvas 2D in the browser).

use glam::Vec2;

use crate::PlayArea;
use crate::assets::SpriteRef;
use crate::effects::EffectEmitter;
use crate::palette::Color;
use crate::sim::{Backdrop, Entity, Look, Phase};

/// Popped entities grow by this fraction while fading
const POP_GROWTH: f32 = 0.4;
/// Entities with a lifetime start fading over this last fraction of it
const LIFE_FADE: f32 = 0.25;
/// Opacity an entity has faded to when its lifetime runs out
const LIFE_FADE_FLOOR: f32 = 0.4;
/// A pressed piano key dips to this scale
const KEY_DIP: f32 = 0.92;
/// Toast anchor as a fraction of the play height
const TOAST_ANCHOR_Y: f32 = 0.3;
/// Toast drift upward over its life (px)
const TOAST_RISE: f32 = 40.0;
/// Toast font size at full scale (px)
pub const TOAST_FONT_PX: f32 = 56.0;

/// One drawing instruction, painted in order
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear {
        color: Color,
    },
    Backdrop {
        sprite: SpriteRef,
        center: Vec2,
        size: f32,
    },
    Entity {
        look: Look,
        /// Image to use instead of `look` once loaded
        sprite: Option<SpriteRef>,
        center: Vec2,
        /// Radius or half extent
        size: f32,
        color: Color,
        alpha: f32,
        scale: f32,
    },
    Particle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    Toast {
        text: String,
        center: Vec2,
        scale: f32,
        alpha: f32,
    },
}

impl DrawOp {
    /// Drawn regardless of game state
    pub fn is_background(&self) -> bool {
        matches!(self, DrawOp::Clear { .. } | DrawOp::Backdrop { .. })
    }
}

/// Everything to paint for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub area: PlayArea,
    pub ops: Vec<DrawOp>,
}

/// Opacity as the entity nears the end of its lifetime
fn life_alpha(entity: &Entity) -> f32 {
    let left = entity.life_left();
    if left >= LIFE_FADE {
        return 1.0;
    }
    LIFE_FADE_FLOOR + (1.0 - LIFE_FADE_FLOOR) * left / LIFE_FADE
}

/// Opacity and scale for an entity, `None` when it should not be drawn
fn entity_style(entity: &Entity) -> Option<(f32, f32)> {
    let p = entity.exit_progress();
    let base = life_alpha(entity);
    match (entity.phase, entity.visual.look) {
        (Phase::Spawning | Phase::Removed, _) => None,
        (Phase::Active, _) => Some((base, 1.0)),
        (Phase::Placed, Look::Key { .. }) => Some((1.0, KEY_DIP)),
        (Phase::Popped, _) => Some((1.0 - p, 1.0 + POP_GROWTH * p)),
        (Phase::Placed, _) => Some((1.0 - 0.5 * p, 1.0 - p)),
        (Phase::Expired, _) => Some((base * (1.0 - p), 1.0)),
    }
}

impl Scene {
    /// Snapshot the background, entities (oldest first) and effects
    pub fn capture(
        area: PlayArea,
        background: Color,
        backdrop: Option<Backdrop>,
        entities: &[Entity],
        effects: &EffectEmitter,
    ) -> Self {
        let mut ops = Vec::with_capacity(2 + entities.len() + effects.particles().len());
        ops.push(DrawOp::Clear { color: background });
        if let Some(b) = backdrop {
            ops.push(DrawOp::Backdrop {
                sprite: b.sprite,
                center: b.center,
                size: b.size,
            });
        }

        for entity in entities {
            let Some((alpha, scale)) = entity_style(entity) else {
                continue;
            };
            let visual = entity.visual;
            ops.push(DrawOp::Entity {
                look: visual.look,
                sprite: visual.look.sprite(visual.hue),
                center: entity.pos,
                size: entity.visual.size,
                color: entity.visual.color(),
                alpha,
                scale,
            });
        }

        for particle in effects.particles() {
            ops.push(DrawOp::Particle {
                center: particle.position(),
                radius: particle.size,
                color: particle.color,
                alpha: particle.alpha(),
            });
        }

        for toast in effects.toasts() {
            ops.push(DrawOp::Toast {
                text: toast.text.clone(),
                center: Vec2::new(
                    area.width / 2.0,
                    area.height * TOAST_ANCHOR_Y - TOAST_RISE * toast.progress(),
                ),
                scale: toast.scale(),
                alpha: toast.alpha(),
            });
        }

        Self { area, ops }
    }

    /// Sprites this scene references, in draw order
    pub fn sprites(&self) -> impl Iterator<Item = SpriteRef> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Backdrop { sprite, .. } => Some(*sprite),
            DrawOp::Entity { sprite, .. } => *sprite,
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::audio::Synthesizer;
    use crate::palette::Hue;
    use crate::settings::Preferences;
    use crate::sim::{EntityId, HitShape, ShapeKind, Spawn, Visual};
    use crate::strings::StringTable;

    fn emitter() -> EffectEmitter {
        let prefs = Rc::new(Preferences::in_memory());
        EffectEmitter::new(
            1,
            Rc::new(Synthesizer::silent(prefs)),
            Rc::new(StringTable::builtin()),
        )
    }

    fn entity(id: u32, phase: Phase, look: Look) -> Entity {
        let mut e = Entity::new(
            EntityId(id),
            Spawn {
                pos: Vec2::new(50.0, 60.0),
                vel: Vec2::ZERO,
                shape: HitShape::Circle { radius: 20.0 },
                visual: Visual {
                    hue: Hue::Blue,
                    look,
                    size: 20.0,
                },
                lifetime_ms: None,
            },
        );
        e.phase = phase;
        e
    }

    #[test]
    fn test_background_first() {
        let scene = Scene::capture(PlayArea::default(), Color::SKY, None, &[], &emitter());
        assert_eq!(scene.ops, vec![DrawOp::Clear { color: Color::SKY }]);
    }

    #[test]
    fn test_spawning_not_drawn() {
        let entities = [
            entity(1, Phase::Spawning, Look::Balloon),
            entity(2, Phase::Active, Look::Balloon),
        ];
        let scene = Scene::capture(PlayArea::default(), Color::SKY, None, &entities, &emitter());
        assert_eq!(scene.ops.len(), 2);
        assert!(matches!(scene.ops[1], DrawOp::Entity { alpha, scale, .. } if alpha == 1.0 && scale == 1.0));
    }

    #[test]
    fn test_popped_grows_and_fades() {
        let mut e = entity(1, Phase::Active, Look::Bubble);
        e.finish(Phase::Popped, 200.0);
        e.tick_exit(100.0);
        let (alpha, scale) = entity_style(&e).unwrap();
        assert!((alpha - 0.5).abs() < 1e-5);
        assert!(scale > 1.0);
    }

    #[test]
    fn test_effects_drawn_above_entities() {
        let mut fx = emitter();
        fx.burst(Vec2::new(10.0, 10.0), Color::GOLD, 3);
        fx.show_message(Some("Yay!"));
        let entities = [entity(1, Phase::Active, Look::Bubble)];
        let scene = Scene::capture(PlayArea::default(), Color::MINT, None, &entities, &fx);
        assert_eq!(scene.ops.len(), 1 + 1 + 3 + 1);
        assert!(matches!(scene.ops[1], DrawOp::Entity { .. }));
        assert!(matches!(scene.ops[2], DrawOp::Particle { .. }));
        assert!(matches!(&scene.ops[5], DrawOp::Toast { text, .. } if text == "Yay!"));
    }

    #[test]
    fn test_sprites_lists_backdrop_and_food() {
        let apple = SpriteRef::new("food", "apple", "🍎");
        let cow = SpriteRef::new("animals", "cow", "🐮");
        let backdrop = Backdrop {
            sprite: cow,
            center: Vec2::ZERO,
            size: 10.0,
        };
        let entities = [entity(1, Phase::Active, Look::Sprite(apple))];
        let scene = Scene::capture(
            PlayArea::default(),
            Color::LILAC,
            Some(backdrop),
            &entities,
            &emitter(),
        );
        let sprites: Vec<_> = scene.sprites().collect();
        assert_eq!(sprites, vec![cow, apple]);
        assert!(scene.ops[1].is_background());
    }

    #[test]
    fn test_sprites_include_balloons_and_shapes() {
        let entities = [
            entity(1, Phase::Active, Look::Balloon),
            entity(2, Phase::Active, Look::Shape(ShapeKind::Square)),
            entity(3, Phase::Active, Look::Bubble),
        ];
        let scene = Scene::capture(PlayArea::default(), Color::SKY, None, &entities, &emitter());
        let names: Vec<_> = scene.sprites().map(|s| (s.category, s.name)).collect();
        assert_eq!(names, vec![("balloons", "blue"), ("shapes", "square")]);
    }

    #[test]
    fn test_food_fades_near_end_of_life() {
        let mut e = entity(1, Phase::Active, Look::Bubble);
        e.lifetime_ms = Some(1000.0);
        e.age_ms = 500.0;
        assert_eq!(entity_style(&e), Some((1.0, 1.0)));
        e.age_ms = 1000.0;
        let (alpha, _) = entity_style(&e).unwrap();
        assert!((alpha - LIFE_FADE_FLOOR).abs() < 1e-6);

        // The expiry fade continues from there
        e.finish(Phase::Expired, 400.0);
        e.tick_exit(200.0);
        let (alpha, _) = entity_style(&e).unwrap();
        assert!((alpha - LIFE_FADE_FLOOR * 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_pressed_key_dips() {
        let look = Look::Key {
            half: Vec2::new(40.0, 100.0),
        };
        let mut e = entity(1, Phase::Active, look);
        e.finish(Phase::Placed, 150.0);
        assert_eq!(entity_style(&e), Some((1.0, KEY_DIP)));
    }
}
