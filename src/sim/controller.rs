//! Per-game controller
//!
//! Owns one game's entities and effects and runs the shared loop shape:
//! advance, expire, spawn, hit-test. What differs between games lives behind
//! [`GameRules`].

use std::rc::Rc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Backdrop, Entity, EntityId, Phase, Spawn};
use super::hit::front_most;
use crate::PlayArea;
use crate::audio::{Cue, Synthesizer};
use crate::consts::MAX_FRAME_DT_MS;
use crate::effects::{EffectEmitter, EffectRequest};
use crate::palette::Color;
use crate::platform::FrameHandle;
use crate::settings::Preferences;
use crate::speech::Announcer;
use crate::strings::StringTable;

/// Salt separating the effect RNG stream from the gameplay stream
const EFFECT_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;
/// Length of a note played by a stroke or a tap (seconds)
pub const NOTE_SECONDS: f64 = 0.25;

/// Randomness and geometry handed to spawn routines
pub struct SpawnCtx<'a> {
    pub rng: &'a mut Pcg32,
    pub area: PlayArea,
}

/// Something to say after an interaction
#[derive(Debug, Clone, PartialEq)]
pub enum Phrase {
    /// A `group.name` entry of the string table
    Key(&'static str),
    /// Random entry of a phrase list (`praise`, `celebrations`)
    AnyOf(&'static str),
}

impl Phrase {
    fn resolve(&self, strings: &StringTable, rng: &mut Pcg32) -> Option<String> {
        match self {
            Phrase::Key(key) => strings.get(key).map(str::to_string),
            Phrase::AnyOf(list) => strings.pick(list, rng).map(str::to_string),
        }
    }
}

/// What a tap on an entity does
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    /// Terminal phase to enter (`Popped` or `Placed`)
    pub outcome: Phase,
    pub cue: Option<Cue>,
    /// Particle count for the burst at the tap point
    pub burst: Option<usize>,
    pub say: Option<Phrase>,
    /// Note to play (Hz), for games where a tap makes music
    pub tone_hz: Option<f32>,
    /// Show a celebration toast (and say it when nothing else is said)
    pub celebrate: bool,
}

impl Reaction {
    /// Enter `outcome` without any feedback
    pub fn quiet(outcome: Phase) -> Self {
        Self {
            outcome,
            cue: None,
            burst: None,
            say: None,
            tone_hz: None,
            celebrate: false,
        }
    }
}

/// A paint mark left by a pointer that hit nothing
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub spawn: Spawn,
    /// Tone to play with the mark (Hz)
    pub tone_hz: Option<f32>,
}

/// Result of a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// An entity was tapped and entered its terminal phase
    Hit(EntityId),
    /// A paint mark was created
    Painted(EntityId),
    /// Nothing happened
    Miss,
}

/// Game-specific rules plugged into [`Controller`]
pub trait GameRules {
    /// Short identifier for logs
    fn name(&self) -> &'static str;

    /// Clear per-run counters (called by `start`)
    fn reset(&mut self) {}

    /// Entities laid out when the game starts
    fn layout(&mut self, _ctx: &mut SpawnCtx<'_>) -> Vec<Spawn> {
        Vec::new()
    }

    /// Spawns for this frame given the current live count
    fn spawn(&mut self, ctx: &mut SpawnCtx<'_>, live: usize, dt_ms: f32) -> Vec<Spawn>;

    /// A new entity at a given position (random look and motion)
    fn place(&mut self, ctx: &mut SpawnCtx<'_>, at: Vec2) -> Spawn;

    /// Move one live entity by `dt` seconds; false once it left the play area
    fn advance(&mut self, entity: &mut Entity, _area: PlayArea, dt: f32) -> bool {
        entity.pos += entity.vel * dt;
        true
    }

    /// React to a tap on a live entity. `live_after` excludes the tapped one.
    fn on_hit(&mut self, _entity: &Entity, _live_after: usize) -> Reaction {
        Reaction::quiet(Phase::Popped)
    }

    /// Pointer-down that hit nothing
    fn on_miss(&mut self, _ctx: &mut SpawnCtx<'_>, _at: Vec2) -> Option<Stroke> {
        None
    }

    /// Pointer moved while pressed
    fn on_drag(&mut self, _ctx: &mut SpawnCtx<'_>, _at: Vec2) -> Option<Stroke> {
        None
    }

    /// Move a terminal entity during its exit animation
    fn animate_exit(&mut self, _entity: &mut Entity, _area: PlayArea, _dt: f32) {}

    /// The play area changed size. Returns entities to add.
    ///
    /// Live entities that do not move vertically are pulled back inside the
    /// new area; moving ones are left to leave it on their own.
    fn on_resize(&mut self, ctx: &mut SpawnCtx<'_>, entities: &mut [Entity]) -> Vec<Spawn> {
        let area = ctx.area;
        for entity in entities.iter_mut().filter(|e| e.phase.is_live()) {
            let size = entity.visual.size;
            entity.pos.x = clamp_axis(entity.pos.x, size, area.width);
            if entity.vel.y == 0.0 {
                entity.pos.y = clamp_axis(entity.pos.y, size, area.height);
            }
        }
        Vec::new()
    }

    /// Exit animation length for a terminal phase (ms)
    fn exit_ms(&self, phase: Phase) -> f32 {
        match phase {
            Phase::Popped | Phase::Placed => 200.0,
            _ => 0.0,
        }
    }

    /// Live entity cap; the oldest live entity expires beyond it
    fn capacity(&self) -> Option<usize> {
        None
    }

    fn background(&self) -> Color {
        Color::SKY
    }

    fn backdrop(&self, _area: PlayArea) -> Option<Backdrop> {
        None
    }
}

/// Keep `v` at least `margin` from both ends of `0..extent`
fn clamp_axis(v: f32, margin: f32, extent: f32) -> f32 {
    if extent > 2.0 * margin {
        v.clamp(margin, extent - margin)
    } else {
        extent / 2.0
    }
}

/// Shared feedback channels injected into every controller
#[derive(Clone)]
pub struct Feedback {
    pub audio: Rc<Synthesizer>,
    pub speech: Rc<Announcer>,
    pub strings: Rc<StringTable>,
}

impl Feedback {
    /// Feedback with no audio or speech output
    pub fn silent(prefs: Rc<Preferences>) -> Self {
        let strings = Rc::new(StringTable::builtin());
        Self {
            audio: Rc::new(Synthesizer::silent(prefs.clone())),
            speech: Rc::new(Announcer::silent(prefs, &strings.lang)),
            strings,
        }
    }
}

/// Runs one game: entities, effects and the frame task
pub struct Controller<R: GameRules> {
    rules: R,
    area: PlayArea,
    entities: Vec<Entity>,
    effects: EffectEmitter,
    feedback: Feedback,
    rng: Pcg32,
    frame: Option<FrameHandle>,
    next_id: u32,
}

impl<R: GameRules> Controller<R> {
    pub fn new(rules: R, area: PlayArea, feedback: Feedback, seed: u64) -> Self {
        let effects = EffectEmitter::new(
            seed ^ EFFECT_SEED_SALT,
            feedback.audio.clone(),
            feedback.strings.clone(),
        );
        Self {
            rules,
            area,
            entities: Vec::new(),
            effects,
            feedback,
            rng: Pcg32::seed_from_u64(seed),
            frame: None,
            next_id: 1,
        }
    }

    /// Clear any prior state, lay out the game and open a new frame task.
    /// Starting a running controller is ignored.
    pub fn start(&mut self) -> FrameHandle {
        if let Some(handle) = self.frame.as_ref().filter(|h| h.is_live()) {
            log::warn!("{}: start while running ignored", self.rules.name());
            return handle.clone();
        }

        self.entities.clear();
        self.effects.clear();
        self.rules.reset();

        let mut ctx = SpawnCtx {
            rng: &mut self.rng,
            area: self.area,
        };
        let spawns = self.rules.layout(&mut ctx);
        for spawn in spawns {
            self.insert(spawn);
        }

        let handle = FrameHandle::new();
        self.frame = Some(handle.clone());
        log::info!(
            "{} started ({}x{}, {} entities)",
            self.rules.name(),
            self.area.width,
            self.area.height,
            self.entities.len()
        );
        handle
    }

    /// Advance one frame of `dt_ms` milliseconds (no-op when stopped)
    pub fn frame(&mut self, dt_ms: f64) {
        if !self.is_running() {
            return;
        }
        let dt_ms = if dt_ms.is_finite() {
            dt_ms.clamp(0.0, MAX_FRAME_DT_MS) as f32
        } else {
            0.0
        };
        let dt = dt_ms / 1000.0;
        let area = self.area;
        let expire_ms = self.rules.exit_ms(Phase::Expired);

        for entity in &mut self.entities {
            entity.age_ms += dt_ms;
            if entity.phase.is_live() {
                let in_bounds = self.rules.advance(entity, area, dt);
                if !in_bounds {
                    entity.finish(Phase::Expired, 0.0);
                } else if entity.lifetime_over() {
                    entity.finish(Phase::Expired, expire_ms);
                }
            } else {
                self.rules.animate_exit(entity, area, dt);
                entity.tick_exit(dt_ms);
            }
        }
        self.entities.retain(|e| e.phase != Phase::Removed);

        let live = self.live_count();
        let mut ctx = SpawnCtx {
            rng: &mut self.rng,
            area,
        };
        let spawns = self.rules.spawn(&mut ctx, live, dt_ms);
        for spawn in spawns {
            self.insert(spawn);
        }

        // Everything still spawning gets drawn after this frame
        for entity in &mut self.entities {
            if entity.phase == Phase::Spawning {
                entity.phase = Phase::Active;
            }
        }

        self.effects.update(dt_ms);
    }

    /// Pointer-down at `(x, y)`: tap the front-most live entity under it
    pub fn handle_pointer(&mut self, x: f32, y: f32) -> PointerOutcome {
        if !self.is_running() {
            return PointerOutcome::Miss;
        }
        let point = Vec2::new(x, y);

        let Some(index) = front_most(&self.entities, point) else {
            let mut ctx = SpawnCtx {
                rng: &mut self.rng,
                area: self.area,
            };
            let stroke = self.rules.on_miss(&mut ctx, point);
            return self.paint(stroke);
        };

        let live_after = self.live_count().saturating_sub(1);
        let reaction = self.rules.on_hit(&self.entities[index], live_after);
        let exit_ms = self.rules.exit_ms(reaction.outcome);

        let entity = &mut self.entities[index];
        entity.finish(reaction.outcome, exit_ms);
        let id = entity.id;
        let color = entity.visual.color();

        if let Some(count) = reaction.burst {
            self.effects.emit(EffectRequest {
                origin: point,
                color,
                count,
            });
        }
        if let Some(cue) = reaction.cue {
            self.feedback.audio.play_cue(cue);
        }
        if let Some(hz) = reaction.tone_hz {
            self.feedback.audio.play_tone(hz, NOTE_SECONDS);
        }

        let mut spoken = reaction
            .say
            .as_ref()
            .and_then(|phrase| phrase.resolve(&self.feedback.strings, &mut self.rng));
        if reaction.celebrate {
            let message = self
                .feedback
                .strings
                .pick("celebrations", &mut self.rng)
                .map(str::to_string);
            self.effects.show_message(message.as_deref());
            if spoken.is_none() {
                spoken = message;
            }
        }
        if let Some(text) = spoken {
            self.feedback.speech.speak(&text);
        }

        log::debug!("{}: {:?} -> {:?}", self.rules.name(), id, reaction.outcome);
        PointerOutcome::Hit(id)
    }

    /// Pointer moved while pressed
    pub fn handle_drag(&mut self, x: f32, y: f32) -> PointerOutcome {
        if !self.is_running() {
            return PointerOutcome::Miss;
        }
        let mut ctx = SpawnCtx {
            rng: &mut self.rng,
            area: self.area,
        };
        let stroke = self.rules.on_drag(&mut ctx, Vec2::new(x, y));
        self.paint(stroke)
    }

    fn paint(&mut self, stroke: Option<Stroke>) -> PointerOutcome {
        let Some(stroke) = stroke else {
            return PointerOutcome::Miss;
        };
        let id = self.insert(stroke.spawn);
        if let Some(hz) = stroke.tone_hz {
            self.feedback.audio.play_tone(hz, NOTE_SECONDS);
        }
        PointerOutcome::Painted(id)
    }

    /// Halt the frame task and drop every entity and effect. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.frame.take() {
            handle.cancel();
            log::info!("{} stopped", self.rules.name());
        }
        self.entities.clear();
        self.effects.clear();
    }

    /// Add an entity at `at` with the game's random look and motion
    pub fn spawn_at(&mut self, at: Vec2) -> EntityId {
        let mut ctx = SpawnCtx {
            rng: &mut self.rng,
            area: self.area,
        };
        let spawn = self.rules.place(&mut ctx, at);
        self.insert(spawn)
    }

    fn insert(&mut self, spawn: Spawn) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(Entity::new(id, spawn));
        self.enforce_capacity();
        id
    }

    fn enforce_capacity(&mut self) {
        let Some(cap) = self.rules.capacity() else {
            return;
        };
        let mut excess = self.live_count().saturating_sub(cap);
        if excess == 0 {
            return;
        }
        let expire_ms = self.rules.exit_ms(Phase::Expired);
        for entity in self.entities.iter_mut().filter(|e| e.phase.is_live()) {
            if excess == 0 {
                break;
            }
            entity.finish(Phase::Expired, expire_ms);
            excess -= 1;
        }
        self.entities.retain(|e| e.phase != Phase::Removed);
    }

    /// Adopt a new play area and let the game re-fit what is on screen
    pub fn resize(&mut self, area: PlayArea) {
        self.area = area;
        if !self.is_running() {
            return;
        }
        let mut ctx = SpawnCtx {
            rng: &mut self.rng,
            area,
        };
        let spawns = self.rules.on_resize(&mut ctx, &mut self.entities);
        self.entities.retain(|e| e.phase != Phase::Removed);
        for spawn in spawns {
            self.insert(spawn);
        }
        log::debug!(
            "{} resized to {}x{}",
            self.rules.name(),
            area.width,
            area.height
        );
    }

    pub fn is_running(&self) -> bool {
        self.frame.as_ref().is_some_and(FrameHandle::is_live)
    }

    /// Entities in `Spawning` or `Active`
    pub fn live_count(&self) -> usize {
        self.entities.iter().filter(|e| e.phase.is_live()).count()
    }

    /// Current phase of an entity; dropped or unknown ids report `Removed`
    pub fn phase_of(&self, id: EntityId) -> Phase {
        self.entity(id).map_or(Phase::Removed, |e| e.phase)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn effects(&self) -> &EffectEmitter {
        &self.effects
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn area(&self) -> PlayArea {
        self.area
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::audio::Voice;
    use crate::audio::testing::RecordingAudio;
    use crate::palette::Hue;
    use crate::sim::entity::{HitShape, Look, Visual};
    use crate::speech::testing::RecordingSpeech;

    /// Minimal rules: static discs, target of three, spawn every 100 ms
    struct Discs {
        pops: u32,
    }

    impl GameRules for Discs {
        fn name(&self) -> &'static str {
            "discs"
        }

        fn reset(&mut self) {
            self.pops = 0;
        }

        fn spawn(&mut self, ctx: &mut SpawnCtx<'_>, live: usize, _dt_ms: f32) -> Vec<Spawn> {
            if live >= 3 {
                return Vec::new();
            }
            let at = Vec2::new(100.0 * (live as f32 + 1.0), 100.0);
            vec![self.place(ctx, at)]
        }

        fn place(&mut self, _ctx: &mut SpawnCtx<'_>, at: Vec2) -> Spawn {
            Spawn {
                pos: at,
                vel: Vec2::ZERO,
                shape: HitShape::Circle { radius: 30.0 },
                visual: Visual {
                    hue: Hue::Green,
                    look: Look::Bubble,
                    size: 30.0,
                },
                lifetime_ms: None,
            }
        }

        fn on_hit(&mut self, _entity: &Entity, live_after: usize) -> Reaction {
            self.pops += 1;
            Reaction {
                outcome: Phase::Popped,
                cue: Some(Cue::Pop),
                burst: Some(5),
                say: Some(Phrase::Key("colors.green")),
                tone_hz: None,
                celebrate: live_after == 0,
            }
        }
    }

    struct Harness {
        ctl: Controller<Discs>,
        prefs: Rc<Preferences>,
        voices: Rc<RefCell<Vec<Voice>>>,
        said: Rc<RefCell<Vec<String>>>,
    }

    fn harness() -> Harness {
        let prefs = Rc::new(Preferences::in_memory());
        let (audio, voices) = RecordingAudio::new();
        let (speech, said) = RecordingSpeech::new();
        let strings = Rc::new(StringTable::builtin());
        let feedback = Feedback {
            audio: Rc::new(Synthesizer::new(prefs.clone(), Box::new(audio))),
            speech: Rc::new(Announcer::new(prefs.clone(), &strings.lang, Box::new(speech))),
            strings,
        };
        let ctl = Controller::new(Discs { pops: 0 }, PlayArea::new(800.0, 600.0), feedback, 11);
        Harness {
            ctl,
            prefs,
            voices,
            said,
        }
    }

    #[test]
    fn test_frame_before_start_is_noop() {
        let mut h = harness();
        h.ctl.frame(16.0);
        assert!(h.ctl.entities().is_empty());
        assert_eq!(h.ctl.handle_pointer(100.0, 100.0), PointerOutcome::Miss);
    }

    #[test]
    fn test_spawn_respects_target() {
        let mut h = harness();
        h.ctl.start();
        for _ in 0..10 {
            h.ctl.frame(16.0);
        }
        assert_eq!(h.ctl.live_count(), 3);
        assert!(h.ctl.entities().iter().all(|e| e.phase == Phase::Active));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut h = harness();
        let handle = h.ctl.start();
        h.ctl.frame(16.0);
        h.ctl.stop();
        assert!(!handle.is_live());
        assert!(!h.ctl.is_running());
        assert!(h.ctl.entities().is_empty());
        assert!(h.ctl.effects().is_idle());

        h.ctl.stop();
        assert!(!h.ctl.is_running());
        assert!(h.ctl.entities().is_empty());
        assert!(h.ctl.effects().is_idle());

        // Frames after stop do nothing
        h.ctl.frame(16.0);
        assert!(h.ctl.entities().is_empty());
    }

    #[test]
    fn test_double_start_keeps_single_loop() {
        let mut h = harness();
        let first = h.ctl.start();
        h.ctl.frame(16.0);
        let second = h.ctl.start();
        assert!(first.is_live());
        assert!(second.is_live());
        assert_eq!(h.ctl.live_count(), 1);
        h.ctl.stop();
        assert!(!first.is_live());
    }

    #[test]
    fn test_restart_after_stop() {
        let mut h = harness();
        let first = h.ctl.start();
        h.ctl.frame(16.0);
        h.ctl.stop();
        let second = h.ctl.start();
        assert!(!first.is_live());
        assert!(second.is_live());
        assert!(h.ctl.entities().is_empty());
    }

    #[test]
    fn test_hit_transitions_exactly_one() {
        let mut h = harness();
        h.ctl.start();
        h.ctl.frame(16.0);
        h.ctl.frame(16.0);
        assert_eq!(h.ctl.live_count(), 2);

        let target = h.ctl.entities()[0].id;
        let outcome = h.ctl.handle_pointer(100.0, 100.0);
        assert_eq!(outcome, PointerOutcome::Hit(target));
        assert_eq!(h.ctl.phase_of(target), Phase::Popped);
        assert_eq!(h.ctl.live_count(), 1);

        assert_eq!(h.ctl.effects().particles().len(), 5);
        assert!(
            h.ctl
                .effects()
                .particles()
                .iter()
                .all(|p| p.origin == Vec2::new(100.0, 100.0))
        );
        assert_eq!(h.voices.borrow().as_slice(), Cue::Pop.voices().as_slice());
        assert_eq!(h.said.borrow().as_slice(), ["Green".to_string()]);
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut h = harness();
        h.ctl.start();
        for _ in 0..3 {
            h.ctl.frame(16.0);
        }
        let before: Vec<_> = h.ctl.entities().iter().map(|e| (e.id, e.phase)).collect();

        assert_eq!(h.ctl.handle_pointer(700.0, 500.0), PointerOutcome::Miss);

        let after: Vec<_> = h.ctl.entities().iter().map(|e| (e.id, e.phase)).collect();
        assert_eq!(before, after);
        assert!(h.ctl.effects().is_idle());
        assert!(h.voices.borrow().is_empty());
        assert!(h.said.borrow().is_empty());
    }

    #[test]
    fn test_popped_entity_removed_after_exit() {
        let mut h = harness();
        h.ctl.start();
        h.ctl.frame(16.0);
        let PointerOutcome::Hit(id) = h.ctl.handle_pointer(100.0, 100.0) else {
            panic!("expected a hit");
        };
        h.ctl.frame(100.0);
        assert_eq!(h.ctl.phase_of(id), Phase::Popped);
        h.ctl.frame(100.0);
        assert_eq!(h.ctl.phase_of(id), Phase::Removed);
        assert!(h.ctl.entity(id).is_none());
    }

    #[test]
    fn test_tapping_popped_entity_misses() {
        let mut h = harness();
        h.ctl.start();
        h.ctl.frame(16.0);
        assert!(matches!(h.ctl.handle_pointer(100.0, 100.0), PointerOutcome::Hit(_)));
        assert_eq!(h.ctl.handle_pointer(100.0, 100.0), PointerOutcome::Miss);
    }

    #[test]
    fn test_last_pop_celebrates() {
        let mut h = harness();
        h.ctl.start();
        h.ctl.frame(16.0);
        assert_eq!(h.ctl.live_count(), 1);
        h.ctl.handle_pointer(100.0, 100.0);
        assert_eq!(h.ctl.effects().toasts().len(), 1);
        // Pop followed by the celebration fanfare
        let voices = h.voices.borrow();
        let pop = Cue::Pop.voices();
        assert_eq!(&voices[..pop.len()], pop.as_slice());
        assert_eq!(&voices[pop.len()..], Cue::Celebration.voices().as_slice());
    }

    #[test]
    fn test_sound_off_keeps_visuals() {
        let mut h = harness();
        h.prefs.set_sound_enabled(false);
        h.prefs.set_speech_enabled(false);
        h.ctl.start();
        h.ctl.frame(16.0);
        h.ctl.handle_pointer(100.0, 100.0);
        assert!(h.voices.borrow().is_empty());
        assert!(h.said.borrow().is_empty());
        assert!(!h.ctl.effects().particles().is_empty());
    }

    #[test]
    fn test_huge_delta_is_clamped() {
        let mut h = harness();
        h.ctl.start();
        h.ctl.frame(16.0);
        h.ctl.frame(1.0e9);
        let age = h.ctl.entities()[0].age_ms;
        assert!(age <= 16.0 + MAX_FRAME_DT_MS as f32 + 0.001);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut h = harness();
        h.ctl.start();
        let a = h.ctl.spawn_at(Vec2::new(10.0, 10.0));
        let b = h.ctl.spawn_at(Vec2::new(10.0, 10.0));
        assert_ne!(a, b);
        assert_eq!(h.ctl.phase_of(a), Phase::Spawning);
        assert_eq!(h.ctl.phase_of(EntityId(999)), Phase::Removed);
    }

    #[test]
    fn test_non_finite_delta_is_ignored() {
        let mut h = harness();
        h.ctl.start();
        h.ctl.frame(16.0);
        for dt in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            h.ctl.frame(dt);
        }
        let e = &h.ctl.entities()[0];
        assert_eq!(e.age_ms, 16.0);
        assert!(e.pos.is_finite());
        assert!(!e.age_ms.is_nan());
    }

    #[test]
    fn test_resize_pulls_still_entities_inside() {
        let mut h = harness();
        h.ctl.start();
        for _ in 0..3 {
            h.ctl.frame(16.0);
        }
        // Discs sit at x = 100, 200, 300
        h.ctl.resize(PlayArea::new(220.0, 50.0));
        assert_eq!(h.ctl.area(), PlayArea::new(220.0, 50.0));
        let xs: Vec<f32> = h.ctl.entities().iter().map(|e| e.pos.x).collect();
        assert_eq!(xs, [100.0, 190.0, 190.0]);
        // Too short for a 30 px disc: centered vertically
        assert!(h.ctl.entities().iter().all(|e| e.pos.y == 25.0));
    }

    #[test]
    fn test_resize_while_stopped_only_sets_area() {
        let mut h = harness();
        h.ctl.resize(PlayArea::new(50.0, 50.0));
        assert_eq!(h.ctl.area(), PlayArea::new(50.0, 50.0));
        assert!(h.ctl.entities().is_empty());
    }

    #[test]
    fn test_clamp_axis_centers_when_too_small() {
        assert_eq!(clamp_axis(500.0, 30.0, 220.0), 190.0);
        assert_eq!(clamp_axis(-5.0, 30.0, 220.0), 30.0);
        assert_eq!(clamp_axis(10.0, 30.0, 40.0), 20.0);
    }
}
