//! Sound and speech preferences
//!
//! The only state that outlives a page view. Each flag is stored under its own
//! key as the literal string `"true"` or `"false"`; a missing key reads back as
//! enabled.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Storage key for the sound flag
pub const SOUND_KEY: &str = "toddler_games_sound_enabled";
/// Storage key for the speech flag
pub const SPEECH_KEY: &str = "toddler_games_speech_enabled";

/// String key-value store backing the preference flags
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// Open the window's LocalStorage; private browsing may deny it
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - preferences will not persist");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(key, value);
        }
    }
}

/// Read a stored flag; anything but `"false"` counts as enabled
fn parse_flag(value: Option<String>) -> bool {
    !matches!(value.as_deref().map(str::trim), Some("false"))
}

fn flag_str(enabled: bool) -> &'static str {
    if enabled { "true" } else { "false" }
}

/// Sound/speech flags shared by every component of a page.
///
/// Read once at construction, written through on every change.
pub struct Preferences {
    sound: Cell<bool>,
    speech: Cell<bool>,
    store: RefCell<Box<dyn PreferenceStore>>,
}

impl Preferences {
    /// Load both flags from the store
    pub fn load(store: Box<dyn PreferenceStore>) -> Self {
        let sound = parse_flag(store.get(SOUND_KEY));
        let speech = parse_flag(store.get(SPEECH_KEY));
        log::info!("Preferences loaded (sound: {}, speech: {})", sound, speech);
        Self {
            sound: Cell::new(sound),
            speech: Cell::new(speech),
            store: RefCell::new(store),
        }
    }

    /// Preferences over a fresh in-memory store (everything enabled)
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStore::new()))
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound.get()
    }

    pub fn speech_enabled(&self) -> bool {
        self.speech.get()
    }

    pub fn set_sound_enabled(&self, enabled: bool) {
        self.sound.set(enabled);
        self.persist(SOUND_KEY, enabled);
    }

    pub fn set_speech_enabled(&self, enabled: bool) {
        self.speech.set(enabled);
        self.persist(SPEECH_KEY, enabled);
    }

    /// Flip the sound flag, returning the new value
    pub fn toggle_sound(&self) -> bool {
        let enabled = !self.sound_enabled();
        self.set_sound_enabled(enabled);
        enabled
    }

    /// Flip the speech flag, returning the new value
    pub fn toggle_speech(&self) -> bool {
        let enabled = !self.speech_enabled();
        self.set_speech_enabled(enabled);
        enabled
    }

    fn persist(&self, key: &str, enabled: bool) {
        self.store.borrow_mut().set(key, flag_str(enabled));
        log::info!("Preference {} = {}", key, enabled);
    }

    /// Hand the backing store back (used to simulate a reload)
    pub fn into_store(self) -> Box<dyn PreferenceStore> {
        self.store.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_flags_default_enabled() {
        let prefs = Preferences::in_memory();
        assert!(prefs.sound_enabled());
        assert!(prefs.speech_enabled());
    }

    #[test]
    fn test_empty_value_reads_enabled() {
        let mut store = MemoryStore::new();
        store.set(SOUND_KEY, "");
        let prefs = Preferences::load(Box::new(store));
        assert!(prefs.sound_enabled());
    }

    #[test]
    fn test_literal_false_reads_disabled() {
        let mut store = MemoryStore::new();
        store.set(SPEECH_KEY, "false");
        let prefs = Preferences::load(Box::new(store));
        assert!(prefs.sound_enabled());
        assert!(!prefs.speech_enabled());
    }

    #[test]
    fn test_toggle_survives_reload() {
        let prefs = Preferences::in_memory();
        assert!(!prefs.toggle_sound());

        let store = prefs.into_store();
        assert_eq!(store.get(SOUND_KEY).as_deref(), Some("false"));

        let reloaded = Preferences::load(store);
        assert!(!reloaded.sound_enabled());
        assert!(reloaded.speech_enabled());
    }

    #[test]
    fn test_toggle_twice_restores() {
        let prefs = Preferences::in_memory();
        prefs.toggle_speech();
        assert!(prefs.toggle_speech());

        let reloaded = Preferences::load(prefs.into_store());
        assert!(reloaded.speech_enabled());
    }
}
