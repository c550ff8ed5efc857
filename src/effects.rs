//! Particle bursts and celebration toasts
//!
//! Purely visual and short-lived: particles fly outward and fade over
//! [`PARTICLE_LIFETIME_MS`], toasts hang around for [`MESSAGE_LIFETIME_MS`].
//! Nothing here survives longer than a second.

use std::f32::consts::TAU;
use std::rc::Rc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{Cue, Synthesizer};
use crate::palette::Color;
use crate::strings::StringTable;

/// Particle lifetime (ms)
pub const PARTICLE_LIFETIME_MS: f32 = 600.0;
/// Initial particle speed range (px/s)
pub const PARTICLE_SPEED_MIN: f32 = 150.0;
pub const PARTICLE_SPEED_MAX: f32 = 350.0;
/// Particle radius range (px)
pub const PARTICLE_SIZE_MIN: f32 = 4.0;
pub const PARTICLE_SIZE_MAX: f32 = 9.0;
/// Live particle cap; oldest are dropped first
pub const MAX_PARTICLES: usize = 512;
/// Toast lifetime (ms)
pub const MESSAGE_LIFETIME_MS: f32 = 1000.0;
/// Toast pop-in time (ms)
pub const MESSAGE_POP_IN_MS: f32 = 150.0;

/// A one-shot request for a particle burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectRequest {
    pub origin: Vec2,
    pub color: Color,
    pub count: usize,
}

/// A single burst particle. Motion is analytic in its age, so it is
/// independent of frame rate.
#[derive(Debug, Clone)]
pub struct Particle {
    pub origin: Vec2,
    /// Unit direction of travel
    pub dir: Vec2,
    /// Initial speed (px/s), decelerating linearly to rest at end of life
    pub speed: f32,
    pub color: Color,
    pub size: f32,
    pub age_ms: f32,
}

impl Particle {
    /// Life used up, 0..=1
    pub fn progress(&self) -> f32 {
        (self.age_ms / PARTICLE_LIFETIME_MS).clamp(0.0, 1.0)
    }

    /// Current position: distance = v0 * T * (u - u²/2)
    pub fn position(&self) -> Vec2 {
        let u = self.progress();
        let lifetime_s = PARTICLE_LIFETIME_MS / 1000.0;
        let distance = self.speed * lifetime_s * (u - u * u / 2.0);
        self.origin + self.dir * distance
    }

    pub fn alpha(&self) -> f32 {
        1.0 - self.progress()
    }

    pub fn is_expired(&self) -> bool {
        self.age_ms >= PARTICLE_LIFETIME_MS
    }
}

/// A floating celebration message
#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub age_ms: f32,
}

impl Toast {
    pub fn progress(&self) -> f32 {
        (self.age_ms / MESSAGE_LIFETIME_MS).clamp(0.0, 1.0)
    }

    /// Pops in from half size, then holds
    pub fn scale(&self) -> f32 {
        let t = (self.age_ms / MESSAGE_POP_IN_MS).clamp(0.0, 1.0);
        0.5 + 0.5 * t
    }

    /// Fully opaque for the first 70% of life, then fades
    pub fn alpha(&self) -> f32 {
        let p = self.progress();
        if p < 0.7 { 1.0 } else { (1.0 - p) / 0.3 }
    }

    pub fn is_expired(&self) -> bool {
        self.age_ms >= MESSAGE_LIFETIME_MS
    }
}

/// Owns every live particle and toast for one game
pub struct EffectEmitter {
    particles: Vec<Particle>,
    toasts: Vec<Toast>,
    rng: Pcg32,
    audio: Rc<Synthesizer>,
    strings: Rc<StringTable>,
}

impl EffectEmitter {
    pub fn new(seed: u64, audio: Rc<Synthesizer>, strings: Rc<StringTable>) -> Self {
        Self {
            particles: Vec::new(),
            toasts: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            audio,
            strings,
        }
    }

    /// Spray `count` particles outward from `origin`
    pub fn burst(&mut self, origin: Vec2, color: Color, count: usize) {
        for _ in 0..count {
            let angle = self.rng.random_range(0.0..TAU);
            let speed = self.rng.random_range(PARTICLE_SPEED_MIN..PARTICLE_SPEED_MAX);
            let size = self.rng.random_range(PARTICLE_SIZE_MIN..PARTICLE_SIZE_MAX);
            self.particles.push(Particle {
                origin,
                dir: Vec2::new(angle.cos(), angle.sin()),
                speed,
                color,
                size,
                age_ms: 0.0,
            });
        }

        if self.particles.len() > MAX_PARTICLES {
            let excess = self.particles.len() - MAX_PARTICLES;
            self.particles.drain(..excess);
        }
    }

    pub fn emit(&mut self, request: EffectRequest) {
        self.burst(request.origin, request.color, request.count);
    }

    /// Show a toast (random celebration phrase when `text` is `None`) and
    /// play the celebration cue
    pub fn show_message(&mut self, text: Option<&str>) {
        let text = match text {
            Some(text) => text.to_string(),
            None => self
                .strings
                .pick("celebrations", &mut self.rng)
                .unwrap_or("★")
                .to_string(),
        };
        log::debug!("Toast: {}", text);
        self.toasts.push(Toast { text, age_ms: 0.0 });
        self.audio.play_cue(Cue::Celebration);
    }

    /// Age everything and drop what has run its course
    pub fn update(&mut self, dt_ms: f32) {
        for particle in &mut self.particles {
            particle.age_ms += dt_ms;
        }
        for toast in &mut self.toasts {
            toast.age_ms += dt_ms;
        }
        self.particles.retain(|p| !p.is_expired());
        self.toasts.retain(|t| !t.is_expired());
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.toasts.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_idle(&self) -> bool {
        self.particles.is_empty() && self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::RecordingAudio;
    use crate::settings::Preferences;

    fn emitter() -> (EffectEmitter, Rc<std::cell::RefCell<Vec<crate::audio::Voice>>>) {
        let prefs = Rc::new(Preferences::in_memory());
        let (backend, log) = RecordingAudio::new();
        let audio = Rc::new(Synthesizer::new(prefs, Box::new(backend)));
        (
            EffectEmitter::new(3, audio, Rc::new(StringTable::builtin())),
            log,
        )
    }

    #[test]
    fn test_burst_spawns_count_at_origin() {
        let (mut fx, _) = emitter();
        let origin = Vec2::new(120.0, 80.0);
        fx.burst(origin, Color::GOLD, 14);
        assert_eq!(fx.particles().len(), 14);
        for p in fx.particles() {
            assert_eq!(p.position(), origin);
            assert!((p.dir.length() - 1.0).abs() < 1e-4);
            assert!(p.speed >= PARTICLE_SPEED_MIN && p.speed < PARTICLE_SPEED_MAX);
        }
    }

    #[test]
    fn test_particles_decelerate() {
        let (mut fx, _) = emitter();
        fx.burst(Vec2::ZERO, Color::WHITE, 1);
        let mut last_distance = 0.0;
        let mut last_step = f32::MAX;
        for _ in 0..5 {
            fx.update(100.0);
            let distance = fx.particles()[0].position().length();
            let step = distance - last_distance;
            assert!(step > 0.0);
            assert!(step < last_step);
            last_distance = distance;
            last_step = step;
        }
    }

    #[test]
    fn test_particles_removed_after_lifetime() {
        let (mut fx, _) = emitter();
        fx.emit(EffectRequest {
            origin: Vec2::new(10.0, 10.0),
            color: Color::WHITE,
            count: 20,
        });
        fx.update(PARTICLE_LIFETIME_MS - 1.0);
        assert_eq!(fx.particles().len(), 20);
        fx.update(17.0);
        assert!(fx.particles().is_empty());
    }

    #[test]
    fn test_particle_cap_drops_oldest() {
        let (mut fx, _) = emitter();
        fx.burst(Vec2::ZERO, Color::WHITE, MAX_PARTICLES);
        fx.update(10.0);
        fx.burst(Vec2::ONE, Color::GOLD, 10);
        assert_eq!(fx.particles().len(), MAX_PARTICLES);
        assert_eq!(fx.particles().last().unwrap().color, Color::GOLD);
        assert_eq!(fx.particles()[0].age_ms, 10.0);
    }

    #[test]
    fn test_show_message_picks_phrase_and_plays_fanfare() {
        let (mut fx, log) = emitter();
        fx.show_message(None);
        let strings = StringTable::builtin();
        let toast = &fx.toasts()[0];
        assert!(strings.list("celebrations").contains(&toast.text));
        assert_eq!(log.borrow().as_slice(), Cue::Celebration.voices().as_slice());
    }

    #[test]
    fn test_message_removed_after_lifetime() {
        let (mut fx, _) = emitter();
        fx.show_message(Some("Hi!"));
        assert_eq!(fx.toasts()[0].text, "Hi!");
        fx.update(MESSAGE_LIFETIME_MS / 2.0);
        assert_eq!(fx.toasts().len(), 1);
        fx.update(MESSAGE_LIFETIME_MS / 2.0 + 16.0);
        assert!(fx.is_idle());
    }

    #[test]
    fn test_toast_fades_late() {
        let toast = Toast {
            text: String::new(),
            age_ms: 100.0,
        };
        assert_eq!(toast.alpha(), 1.0);
        let late = Toast {
            text: String::new(),
            age_ms: 950.0,
        };
        assert!(late.alpha() < 0.2);
    }
}
