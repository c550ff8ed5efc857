//! Optional image assets with glyph fallback
//!
//! Images are generated offline and may or may not ship with the page. Each
//! sprite resolves `images/<category>/<name>.webp`, then `.png`; until one
//! loads (or if none exists) the sprite's inline glyph is drawn instead.

use std::collections::HashMap;

/// Directory holding generated images, relative to the page
pub const ASSET_ROOT: &str = "images";
/// Extensions tried in order
pub const ASSET_EXTENSIONS: [&str; 2] = ["webp", "png"];

/// Reference to an optional image plus the glyph used without it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteRef {
    pub category: &'static str,
    pub name: &'static str,
    pub glyph: &'static str,
}

impl SpriteRef {
    pub const fn new(category: &'static str, name: &'static str, glyph: &'static str) -> Self {
        Self {
            category,
            name,
            glyph,
        }
    }

    /// Candidate URLs in preference order
    pub fn candidates(&self) -> Vec<String> {
        ASSET_EXTENSIONS
            .iter()
            .map(|ext| format!("{}/{}/{}.{}", ASSET_ROOT, self.category, self.name, ext))
            .collect()
    }

    /// String-table key for this sprite (`food.apple`)
    pub fn key(&self) -> String {
        format!("{}.{}", self.category, self.name)
    }
}

/// Load state of one sprite
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Pending,
    Loaded { url: String },
    Missing,
}

/// What the renderer should draw for a sprite right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance<'a> {
    Image(&'a str),
    Glyph(&'static str),
}

/// Tracks which sprites have resolved to real images
#[derive(Debug, Default)]
pub struct AssetCatalog {
    states: HashMap<SpriteRef, Resolution>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note interest in a sprite. Returns true the first time, meaning the
    /// caller should start loading it.
    pub fn request(&mut self, sprite: SpriteRef) -> bool {
        if self.states.contains_key(&sprite) {
            return false;
        }
        self.states.insert(sprite, Resolution::Pending);
        true
    }

    pub fn mark_loaded(&mut self, sprite: SpriteRef, url: String) {
        self.states.insert(sprite, Resolution::Loaded { url });
    }

    pub fn mark_missing(&mut self, sprite: SpriteRef) {
        log::debug!("No image for {}/{} - using glyph", sprite.category, sprite.name);
        self.states.insert(sprite, Resolution::Missing);
    }

    /// Image if loaded, glyph otherwise
    pub fn appearance(&self, sprite: &SpriteRef) -> Appearance<'_> {
        match self.states.get(sprite) {
            Some(Resolution::Loaded { url }) => Appearance::Image(url),
            _ => Appearance::Glyph(sprite.glyph),
        }
    }
}

/// Load the first candidate image that exists (WASM only)
#[cfg(target_arch = "wasm32")]
pub async fn load_first(sprite: SpriteRef) -> Option<(String, web_sys::HtmlImageElement)> {
    for url in sprite.candidates() {
        if let Some(img) = load_image(&url).await {
            return Some((url, img));
        }
    }
    None
}

#[cfg(target_arch = "wasm32")]
async fn load_image(url: &str) -> Option<web_sys::HtmlImageElement> {
    let img = web_sys::HtmlImageElement::new().ok()?;
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        img.set_onload(Some(&resolve));
        img.set_onerror(Some(&reject));
    });
    img.set_src(url);
    let loaded = wasm_bindgen_futures::JsFuture::from(promise).await.is_ok();
    img.set_onload(None);
    img.set_onerror(None);
    loaded.then_some(img)
}
