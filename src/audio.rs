//! Audio system using Web Audio API
//!
//! Procedurally generated sound cues - no external files needed!
//! Each cue is described as a list of oscillator [`Voice`]s so the sound
//! design stays platform independent; an [`AudioBackend`] turns voices into
//! actual sound.

use std::rc::Rc;

use crate::settings::Preferences;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Something popped (balloon, bubble)
    Pop,
    /// Something was caught or fed
    Success,
    /// Swoosh up
    Whoosh,
    /// Rising fanfare for celebration toasts
    Celebration,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// Exponential ramps can't reach zero, so envelopes decay to this floor
pub const GAIN_FLOOR: f32 = 0.01;

/// Pop: frequency sweep start (Hz)
pub const POP_FREQ_START: f32 = 800.0;
/// Pop: frequency sweep end (Hz)
pub const POP_FREQ_END: f32 = 100.0;
/// Pop: sweep and decay time (seconds)
pub const POP_SECONDS: f64 = 0.1;
/// Pop: starting gain
pub const POP_GAIN: f32 = 0.3;

/// Success arpeggio (C5, E5, G5)
pub const SUCCESS_NOTES: [f32; 3] = [523.25, 659.25, 783.99];
pub const SUCCESS_STEP_SECONDS: f64 = 0.1;

/// Celebration fanfare (C5, E5, G5, C6)
pub const CELEBRATION_NOTES: [f32; 4] = [523.25, 659.25, 783.99, 1046.50];
pub const CELEBRATION_STEP_SECONDS: f64 = 0.12;

/// Gain used by [`Synthesizer::play_tone`]
pub const TONE_GAIN: f32 = 0.3;

/// One oscillator note within a cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub waveform: Waveform,
    /// Start offset from "now" (seconds)
    pub delay: f64,
    /// Oscillator stops this long after its start (seconds)
    pub duration: f64,
    pub freq_start: f32,
    /// Exponential sweep target reached after `sweep_time`; `None` holds pitch
    pub freq_end: Option<f32>,
    pub sweep_time: f64,
    pub gain_start: f32,
    /// Gain reached (exponentially) after `decay_time`
    pub gain_end: f32,
    pub decay_time: f64,
}

impl Voice {
    /// Fixed-pitch note that decays over `decay` and stops shortly after
    fn note(waveform: Waveform, freq: f32, delay: f64, decay: f64, gain: f32) -> Self {
        Self {
            waveform,
            delay,
            duration: decay + 0.05,
            freq_start: freq,
            freq_end: None,
            sweep_time: 0.0,
            gain_start: gain,
            gain_end: GAIN_FLOOR,
            decay_time: decay,
        }
    }

    /// Note whose pitch sweeps from `from` to `to` over `sweep`
    fn sweep(waveform: Waveform, from: f32, to: f32, sweep: f64, decay: f64, gain: f32) -> Self {
        Self {
            freq_end: Some(to),
            sweep_time: sweep,
            ..Self::note(waveform, from, 0.0, decay, gain)
        }
    }

    /// Time at which this voice has fully stopped, relative to "now"
    pub fn end_time(&self) -> f64 {
        self.delay + self.duration
    }
}

impl Cue {
    /// The voices making up this cue
    pub fn voices(self) -> Vec<Voice> {
        match self {
            Cue::Pop => vec![Voice {
                duration: POP_SECONDS,
                ..Voice::sweep(
                    Waveform::Sine,
                    POP_FREQ_START,
                    POP_FREQ_END,
                    POP_SECONDS,
                    POP_SECONDS,
                    POP_GAIN,
                )
            }],
            Cue::Success => SUCCESS_NOTES
                .iter()
                .enumerate()
                .map(|(i, &freq)| {
                    Voice::note(
                        Waveform::Triangle,
                        freq,
                        i as f64 * SUCCESS_STEP_SECONDS,
                        0.3,
                        0.25,
                    )
                })
                .collect(),
            Cue::Whoosh => vec![Voice::sweep(Waveform::Triangle, 200.0, 600.0, 0.15, 0.2, 0.3)],
            Cue::Celebration => CELEBRATION_NOTES
                .iter()
                .enumerate()
                .map(|(i, &freq)| {
                    Voice::note(
                        Waveform::Triangle,
                        freq,
                        i as f64 * CELEBRATION_STEP_SECONDS,
                        0.3,
                        0.25,
                    )
                })
                .collect(),
        }
    }
}

/// Single sine tone of arbitrary pitch and length
pub fn tone(frequency: f32, duration_seconds: f64) -> Voice {
    let decay = duration_seconds.max(0.01);
    Voice {
        duration: decay,
        ..Voice::note(Waveform::Sine, frequency, 0.0, decay, TONE_GAIN)
    }
}

/// Turns voice descriptions into sound
pub trait AudioBackend {
    /// Schedule voices relative to the backend's current time
    fn schedule(&self, voices: &[Voice]);

    /// Unlock output after a user gesture
    fn resume(&self) {}
}

/// Backend that discards everything (no audio capability)
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioBackend for SilentAudio {
    fn schedule(&self, _voices: &[Voice]) {}
}

/// Web Audio oscillator backend (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct WebAudio {
    ctx: web_sys::AudioContext,
}

#[cfg(target_arch = "wasm32")]
impl WebAudio {
    /// Try to create an audio context (may fail outside a secure context)
    pub fn new() -> Option<Self> {
        match web_sys::AudioContext::new() {
            Ok(ctx) => Some(Self { ctx }),
            Err(_) => {
                log::warn!("Failed to create AudioContext - audio disabled");
                None
            }
        }
    }

    /// Create an oscillator routed through its own gain node
    fn create_osc(
        &self,
        freq: f32,
        waveform: Waveform,
    ) -> Option<(web_sys::OscillatorNode, web_sys::GainNode)> {
        use web_sys::OscillatorType;

        let osc = self.ctx.create_oscillator().ok()?;
        let gain = self.ctx.create_gain().ok()?;

        osc.set_type(match waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Triangle => OscillatorType::Triangle,
        });
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&self.ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_voice(&self, now: f64, voice: &Voice) {
        let Some((osc, gain)) = self.create_osc(voice.freq_start, voice.waveform) else {
            return;
        };
        let t = now + voice.delay;

        gain.gain().set_value_at_time(voice.gain_start, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(voice.gain_end.max(GAIN_FLOOR), t + voice.decay_time)
            .ok();

        osc.frequency().set_value_at_time(voice.freq_start, t).ok();
        if let Some(end) = voice.freq_end {
            osc.frequency()
                .exponential_ramp_to_value_at_time(end, t + voice.sweep_time)
                .ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + voice.duration).ok();
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioBackend for WebAudio {
    fn schedule(&self, voices: &[Voice]) {
        // Resume context if suspended (browsers require user gesture)
        if self.ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = self.ctx.resume();
        }
        let now = self.ctx.current_time();
        for voice in voices {
            self.play_voice(now, voice);
        }
    }

    fn resume(&self) {
        let _ = self.ctx.resume();
    }
}

/// Plays cues and tones, honoring the sound preference
pub struct Synthesizer {
    prefs: Rc<Preferences>,
    backend: Box<dyn AudioBackend>,
}

impl Synthesizer {
    pub fn new(prefs: Rc<Preferences>, backend: Box<dyn AudioBackend>) -> Self {
        Self { prefs, backend }
    }

    /// Synthesizer with no audio output
    pub fn silent(prefs: Rc<Preferences>) -> Self {
        Self::new(prefs, Box::new(SilentAudio))
    }

    /// Web Audio if available, otherwise silent
    #[cfg(target_arch = "wasm32")]
    pub fn for_browser(prefs: Rc<Preferences>) -> Self {
        match WebAudio::new() {
            Some(web) => Self::new(prefs, Box::new(web)),
            None => Self::silent(prefs),
        }
    }

    /// Play a cue (no-op when sound is off)
    pub fn play_cue(&self, cue: Cue) {
        if !self.prefs.sound_enabled() {
            return;
        }
        self.backend.schedule(&cue.voices());
    }

    /// Play a single tone (no-op when sound is off)
    pub fn play_tone(&self, frequency: f32, duration_seconds: f64) {
        if !self.prefs.sound_enabled() || frequency <= 0.0 {
            return;
        }
        self.backend.schedule(&[tone(frequency, duration_seconds)]);
    }

    /// Unlock audio output (call from a user gesture)
    pub fn resume(&self) {
        self.backend.resume();
    }
}
