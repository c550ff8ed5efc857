//! Spawn timing and uniform sampling helpers shared by the games

use rand::Rng;

/// Uniform sample in `[lo, hi)`; collapses to `lo` for an empty range
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Uniform x coordinate keeping an object of half-width `margin` on screen.
/// Always lies in `[0, width)`; falls back to the center when the area is
/// narrower than the object.
pub fn spawn_x<R: Rng + ?Sized>(rng: &mut R, width: f32, margin: f32) -> f32 {
    let hi = width - margin;
    if hi > margin {
        rng.random_range(margin..hi)
    } else {
        width / 2.0
    }
}

/// Fires after a randomized interval, then re-arms with a fresh interval
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    min_ms: f32,
    max_ms: f32,
    elapsed_ms: f32,
    next_ms: f32,
}

impl SpawnTimer {
    /// Timer drawing intervals from `[min_ms, max_ms)`. The first interval is
    /// `min_ms` so a fresh game fills up quickly.
    pub fn new(min_ms: f32, max_ms: f32) -> Self {
        Self {
            min_ms,
            max_ms,
            elapsed_ms: 0.0,
            next_ms: min_ms,
        }
    }

    /// Advance by `dt_ms`; true when the interval has elapsed
    pub fn tick<R: Rng + ?Sized>(&mut self, dt_ms: f32, rng: &mut R) -> bool {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms < self.next_ms {
            return false;
        }
        self.elapsed_ms = 0.0;
        self.next_ms = uniform(rng, self.min_ms, self.max_ms);
        true
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
        self.next_ms = self.min_ms;
    }
}
