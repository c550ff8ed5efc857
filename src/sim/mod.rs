//! Shared game simulation
//!
//! Entity lifecycle, spawning helpers, hit-testing and the per-game
//! controller. Nothing in here touches the DOM; time comes in as frame
//! deltas and randomness from seeded generators.

pub mod controller;
pub mod entity;
pub mod hit;
pub mod spawn;

pub use controller::{
    Controller, Feedback, GameRules, Phrase, PointerOutcome, Reaction, SpawnCtx, Stroke,
};
pub use entity::{Backdrop, Entity, EntityId, HitShape, Look, Phase, ShapeKind, Spawn, Visual};
pub use hit::front_most;
pub use spawn::{SpawnTimer, spawn_x, uniform};
