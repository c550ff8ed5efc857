//! Spoken praise via platform speech synthesis
//!
//! Slightly slower and higher than the platform default so it sounds friendly
//! to small ears. A new utterance cancels whatever is still being said.

use std::rc::Rc;

use crate::settings::Preferences;

/// Speaking rate (1.0 = platform default)
pub const SPEECH_RATE: f32 = 0.9;
/// Voice pitch (1.0 = platform default)
pub const SPEECH_PITCH: f32 = 1.1;

/// A request to say something
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Utterance<'a> {
    pub text: &'a str,
    pub lang: &'a str,
    pub rate: f32,
    pub pitch: f32,
}

pub trait SpeechBackend {
    fn say(&self, utterance: &Utterance<'_>);
}

/// Backend for platforms without speech synthesis
#[derive(Debug, Default)]
pub struct SilentSpeech;

impl SpeechBackend for SilentSpeech {
    fn say(&self, _utterance: &Utterance<'_>) {}
}

/// `window.speechSynthesis` backend (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct WebSpeech {
    synth: web_sys::SpeechSynthesis,
}

#[cfg(target_arch = "wasm32")]
impl WebSpeech {
    pub fn new() -> Option<Self> {
        let synth = web_sys::window().and_then(|w| w.speech_synthesis().ok());
        if synth.is_none() {
            log::warn!("Speech synthesis unavailable - speech disabled");
        }
        synth.map(|synth| Self { synth })
    }
}

#[cfg(target_arch = "wasm32")]
impl SpeechBackend for WebSpeech {
    fn say(&self, utterance: &Utterance<'_>) {
        let Ok(u) = web_sys::SpeechSynthesisUtterance::new_with_text(utterance.text) else {
            return;
        };
        u.set_lang(utterance.lang);
        u.set_rate(utterance.rate);
        u.set_pitch(utterance.pitch);
        self.synth.cancel();
        self.synth.speak(&u);
    }
}

/// Speaks short phrases in a fixed locale, honoring the speech preference
pub struct Announcer {
    prefs: Rc<Preferences>,
    lang: String,
    backend: Box<dyn SpeechBackend>,
}

impl Announcer {
    pub fn new(prefs: Rc<Preferences>, lang: &str, backend: Box<dyn SpeechBackend>) -> Self {
        Self {
            prefs,
            lang: lang.to_string(),
            backend,
        }
    }

    pub fn silent(prefs: Rc<Preferences>, lang: &str) -> Self {
        Self::new(prefs, lang, Box::new(SilentSpeech))
    }

    /// Browser speech synthesis if available, otherwise silent
    #[cfg(target_arch = "wasm32")]
    pub fn for_browser(prefs: Rc<Preferences>, lang: &str) -> Self {
        match WebSpeech::new() {
            Some(web) => Self::new(prefs, lang, Box::new(web)),
            None => Self::silent(prefs, lang),
        }
    }

    /// Say `text` (no-op when speech is off or text is blank)
    pub fn speak(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() || !self.prefs.speech_enabled() {
            return;
        }
        log::debug!("Speaking: {}", text);
        self.backend.say(&Utterance {
            text,
            lang: &self.lang,
            rate: SPEECH_RATE,
            pitch: SPEECH_PITCH,
        });
    }
}
