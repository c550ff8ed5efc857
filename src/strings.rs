//! Localized string table
//!
//! A static, read-only lookup parsed once from an embedded JSON document.
//! Keys are `group.name` (e.g. `colors.red`); phrase lists such as
//! `celebrations` are picked from at random.

use std::collections::HashMap;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Deserialize;

/// Embedded locale document
const BUILTIN_LOCALE: &str = include_str!("../locales/en.json");

/// Language tag used when the table carries none
pub const DEFAULT_LANG: &str = "en-US";

/// Parsed string table for one locale
#[derive(Debug, Clone, Deserialize)]
pub struct StringTable {
    /// BCP 47 language tag handed to speech synthesis
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default)]
    celebrations: Vec<String>,
    #[serde(default)]
    praise: Vec<String>,
    /// Every other top-level object: `group -> name -> text`
    #[serde(flatten)]
    groups: HashMap<String, HashMap<String, String>>,
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

impl Default for StringTable {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            celebrations: Vec::new(),
            praise: Vec::new(),
            groups: HashMap::new(),
        }
    }
}

impl StringTable {
    /// Parse a locale document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let table: StringTable = serde_json::from_str(json)?;
        Ok(table)
    }

    /// The locale compiled into the crate. Falls back to an empty table (keys
    /// render as themselves) if the document fails to parse.
    pub fn builtin() -> Self {
        match Self::from_json(BUILTIN_LOCALE) {
            Ok(table) => table,
            Err(e) => {
                log::warn!("Built-in locale failed to parse: {} - using keys", e);
                Self::default()
            }
        }
    }

    /// Look up `group.name`
    pub fn get(&self, key: &str) -> Option<&str> {
        let (group, name) = key.split_once('.')?;
        self.groups.get(group)?.get(name).map(String::as_str)
    }

    /// Look up `group.name`, falling back to the key itself
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    /// Phrase list by name (`celebrations`, `praise`)
    pub fn list(&self, name: &str) -> &[String] {
        match name {
            "celebrations" => &self.celebrations,
            "praise" => &self.praise,
            _ => &[],
        }
    }

    /// Random phrase from a list
    pub fn pick<R: Rng + ?Sized>(&self, name: &str, rng: &mut R) -> Option<&str> {
        self.list(name).choose(rng).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_builtin_parses() {
        let table = StringTable::from_json(BUILTIN_LOCALE).expect("builtin locale");
        assert_eq!(table.lang, "en-US");
        assert!(!table.list("celebrations").is_empty());
        assert!(!table.list("praise").is_empty());
    }

    #[test]
    fn test_nested_lookup() {
        let table = StringTable::builtin();
        assert_eq!(table.get("colors.red"), Some("Red"));
        assert_eq!(table.get("feeding.yum"), Some("Yum yum!"));
        assert_eq!(table.get("colors.chartreuse"), None);
        assert_eq!(table.get("colors"), None);
    }

    #[test]
    fn test_text_falls_back_to_key() {
        let table = StringTable::builtin();
        assert_eq!(table.text("shapes.hexagon"), "shapes.hexagon");
    }

    #[test]
    fn test_pick_draws_from_list() {
        let table = StringTable::builtin();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..20 {
            let phrase = table.pick("celebrations", &mut rng).unwrap();
            assert!(table.list("celebrations").iter().any(|p| p == phrase));
        }
        assert_eq!(table.pick("nonsense", &mut rng), None);
    }

    #[test]
    fn test_missing_lang_defaults() {
        let table = StringTable::from_json(r#"{"colors": {"red": "Rojo"}}"#).unwrap();
        assert_eq!(table.lang, DEFAULT_LANG);
        assert_eq!(table.get("colors.red"), Some("Rojo"));
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(StringTable::from_json("{ not json").is_err());
    }
}
