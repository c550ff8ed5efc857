//! Cancellable frame task
//!
//! A controller owns a [`FrameHandle`] while it runs. Whatever drives frames
//! (the browser's animation-frame callback, a test, the native demo) checks the
//! handle before running a frame and before scheduling the next one, so a
//! cancelled handle halts the loop for good.

use std::cell::Cell;
use std::rc::Rc;

use crate::consts::{FIRST_FRAME_DT_MS, MAX_FRAME_DT_MS};

/// Shared liveness flag for one run of a frame loop
#[derive(Debug, Clone)]
pub struct FrameHandle {
    live: Rc<Cell<bool>>,
}

impl FrameHandle {
    /// A new, live handle
    pub fn new() -> Self {
        Self {
            live: Rc::new(Cell::new(true)),
        }
    }

    /// Stop the loop; safe to call any number of times
    pub fn cancel(&self) {
        self.live.set(false);
    }

    pub fn is_live(&self) -> bool {
        self.live.get()
    }
}

impl Default for FrameHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts host timestamps into clamped frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous timestamp (ms), clamped to
    /// [0, MAX_FRAME_DT_MS]. The first call yields a nominal 60 Hz frame.
    /// A non-finite timestamp yields 0 and is not remembered.
    pub fn delta(&mut self, now_ms: f64) -> f64 {
        if !now_ms.is_finite() {
            log::warn!("Ignoring non-finite frame timestamp {}", now_ms);
            return 0.0;
        }
        let dt = match self.last_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_DT_MS),
            None => FIRST_FRAME_DT_MS,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp (after a restart)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
