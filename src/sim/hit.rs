//! Pointer hit-testing against live entities

use glam::Vec2;

use super::entity::Entity;

/// Index of the front-most active entity containing `point`.
///
/// Entities are drawn in creation order, so the most recently created one is
/// on top and wins when shapes overlap.
pub fn front_most(entities: &[Entity], point: Vec2) -> Option<usize> {
    entities.iter().rposition(|e| e.is_hit(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Hue;
    use crate::sim::entity::{EntityId, HitShape, Look, Phase, Spawn, Visual};
    use proptest::prelude::*;

    fn active_disc(id: u32, x: f32, y: f32, radius: f32) -> Entity {
        let mut e = Entity::new(
            EntityId(id),
            Spawn {
                pos: Vec2::new(x, y),
                vel: Vec2::ZERO,
                shape: HitShape::Circle { radius },
                visual: Visual {
                    hue: Hue::Blue,
                    look: Look::Bubble,
                    size: radius,
                },
                lifetime_ms: None,
            },
        );
        e.phase = Phase::Active;
        e
    }

    #[test]
    fn test_overlap_prefers_newest() {
        let entities = vec![
            active_disc(1, 100.0, 100.0, 40.0),
            active_disc(2, 120.0, 100.0, 40.0),
        ];
        assert_eq!(front_most(&entities, Vec2::new(110.0, 100.0)), Some(1));
        assert_eq!(front_most(&entities, Vec2::new(70.0, 100.0)), Some(0));
    }

    #[test]
    fn test_terminal_entities_ignored() {
        let mut entities = vec![
            active_disc(1, 100.0, 100.0, 40.0),
            active_disc(2, 100.0, 100.0, 40.0),
        ];
        entities[1].finish(Phase::Popped, 200.0);
        assert_eq!(front_most(&entities, Vec2::new(100.0, 100.0)), Some(0));
    }

    #[test]
    fn test_miss() {
        let entities = vec![active_disc(1, 100.0, 100.0, 40.0)];
        assert_eq!(front_most(&entities, Vec2::new(300.0, 300.0)), None);
        assert_eq!(front_most(&[], Vec2::ZERO), None);
    }

    proptest! {
        #[test]
        fn prop_inside_point_hits(
            x in 0.0f32..1000.0,
            y in 0.0f32..1000.0,
            radius in 5.0f32..80.0,
            angle in 0.0f32..std::f32::consts::TAU,
            frac in 0.0f32..0.99,
        ) {
            let entities = vec![active_disc(1, x, y, radius)];
            let point = Vec2::new(x, y) + Vec2::new(angle.cos(), angle.sin()) * radius * frac;
            prop_assert_eq!(front_most(&entities, point), Some(0));
        }

        #[test]
        fn prop_outside_point_misses(
            radius in 5.0f32..80.0,
            angle in 0.0f32..std::f32::consts::TAU,
            extra in 1.01f32..5.0,
        ) {
            let entities = vec![active_disc(1, 500.0, 500.0, radius)];
            let point = Vec2::new(500.0, 500.0) + Vec2::new(angle.cos(), angle.sin()) * radius * extra;
            prop_assert_eq!(front_most(&entities, point), None);
        }
    }
}
