//! Canvas 2D backend for [`Scene`]s (WASM only)

use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::{PI, TAU};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::scene::{DrawOp, Scene, TOAST_FONT_PX};
use crate::PlayArea;
use crate::assets::{AssetCatalog, Appearance, SpriteRef, load_first};
use crate::palette::Color;
use crate::sim::{Look, ShapeKind};

/// Loaded images shared with in-flight loaders
#[derive(Default)]
struct ImageCache {
    catalog: AssetCatalog,
    images: HashMap<SpriteRef, HtmlImageElement>,
}

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: Rc<RefCell<ImageCache>>,
    pixel_ratio: f64,
}

impl CanvasRenderer {
    /// Wrap a canvas; `None` if it has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = match canvas.get_context("2d") {
            Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>().ok()?,
            _ => {
                log::warn!("Canvas 2D context unavailable");
                return None;
            }
        };
        Some(Self {
            canvas,
            ctx,
            images: Rc::new(RefCell::new(ImageCache::default())),
            pixel_ratio: 1.0,
        })
    }

    /// Match the backing store to the element's CSS size; returns the new
    /// play area in CSS pixels
    pub fn fit(&mut self) -> PlayArea {
        let ratio = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio()).max(1.0);
        let width = self.canvas.client_width().max(1) as f64;
        let height = self.canvas.client_height().max(1) as f64;
        self.canvas.set_width((width * ratio).round() as u32);
        self.canvas.set_height((height * ratio).round() as u32);
        self.pixel_ratio = ratio;
        log::debug!("Canvas resized to {}x{} @{}x", width, height, ratio);
        PlayArea::new(width as f32, height as f32)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Paint a scene. Failed canvas calls are skipped.
    pub fn draw(&self, scene: &Scene) {
        let ctx = &self.ctx;
        let r = self.pixel_ratio;
        ctx.set_transform(r, 0.0, 0.0, r, 0.0, 0.0).ok();
        ctx.set_global_alpha(1.0);

        for sprite in scene.sprites() {
            self.request(sprite);
        }

        for op in &scene.ops {
            match op {
                DrawOp::Clear { color } => {
                    ctx.set_fill_style_str(&color.css());
                    ctx.fill_rect(0.0, 0.0, scene.area.width as f64, scene.area.height as f64);
                }
                DrawOp::Backdrop {
                    sprite,
                    center,
                    size,
                } => {
                    self.sprite(*sprite, center.x as f64, center.y as f64, *size as f64);
                }
                DrawOp::Entity {
                    look,
                    sprite,
                    center,
                    size,
                    color,
                    alpha,
                    scale,
                } => {
                    ctx.save();
                    ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
                    ctx.translate(center.x as f64, center.y as f64).ok();
                    ctx.scale(*scale as f64, *scale as f64).ok();
                    self.entity(*look, *sprite, *size as f64, *color);
                    ctx.restore();
                }
                DrawOp::Particle {
                    center,
                    radius,
                    color,
                    alpha,
                } => {
                    ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
                    ctx.set_fill_style_str(&color.css());
                    self.disc(center.x as f64, center.y as f64, *radius as f64);
                    ctx.set_global_alpha(1.0);
                }
                DrawOp::Toast {
                    text,
                    center,
                    scale,
                    alpha,
                } => {
                    ctx.save();
                    ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
                    ctx.set_font(&format!(
                        "bold {}px sans-serif",
                        (TOAST_FONT_PX * scale).round()
                    ));
                    ctx.set_text_align("center");
                    ctx.set_text_baseline("middle");
                    ctx.set_line_width(6.0);
                    ctx.set_stroke_style_str(&Color::WHITE.css());
                    ctx.stroke_text(text, center.x as f64, center.y as f64).ok();
                    ctx.set_fill_style_str(&Color::rgb(90, 60, 160).css());
                    ctx.fill_text(text, center.x as f64, center.y as f64).ok();
                    ctx.restore();
                }
            }
        }
    }

    // ========================================================================
    // PRIMITIVES (drawn around the origin after translate/scale)
    // ========================================================================

    fn entity(&self, look: Look, sprite: Option<SpriteRef>, size: f64, color: Color) {
        let ctx = &self.ctx;
        if let Some(sprite) = sprite
            && self.image(sprite, 0.0, 0.0, size * 2.0)
        {
            return;
        }
        match look {
            Look::Balloon => {
                // String
                ctx.set_stroke_style_str("rgba(80, 80, 80, 0.6)");
                ctx.set_line_width(2.0);
                ctx.begin_path();
                ctx.move_to(0.0, size);
                ctx.quadratic_curve_to(size * 0.2, size * 1.5, 0.0, size * 2.0);
                ctx.stroke();
                // Body, slightly taller than wide
                ctx.set_fill_style_str(&color.css());
                ctx.begin_path();
                ctx.ellipse(0.0, 0.0, size * 0.9, size, 0.0, 0.0, TAU).ok();
                ctx.fill();
                // Highlight
                ctx.set_fill_style_str(&color.lighten(0.6).css_alpha(0.7));
                ctx.begin_path();
                ctx.ellipse(-size * 0.35, -size * 0.4, size * 0.18, size * 0.28, -0.5, 0.0, TAU)
                    .ok();
                ctx.fill();
            }
            Look::Bubble => {
                ctx.set_fill_style_str(&color.lighten(0.5).css_alpha(0.85));
                self.disc(0.0, 0.0, size);
                ctx.set_stroke_style_str(&color.css());
                ctx.set_line_width(3.0);
                ctx.stroke();
                ctx.set_fill_style_str(&Color::WHITE.css_alpha(0.8));
                self.disc(-size * 0.35, -size * 0.35, size * 0.2);
            }
            Look::Shape(kind) => {
                ctx.set_fill_style_str(&color.css());
                self.shape_path(kind, size);
                ctx.fill();
                ctx.set_stroke_style_str(&color.darken(0.3).css());
                ctx.set_line_width(3.0);
                ctx.stroke();
            }
            Look::Sprite(sprite) => self.sprite(sprite, 0.0, 0.0, size * 2.0),
            Look::Dab => {
                ctx.set_fill_style_str(&color.css());
                self.disc(0.0, 0.0, size);
            }
            Look::Key { half } => {
                let (hx, hy) = (half.x as f64, half.y as f64);
                ctx.set_fill_style_str(&color.lighten(0.15).css());
                ctx.fill_rect(-hx, -hy, hx * 2.0, hy * 2.0);
                ctx.set_fill_style_str(&Color::WHITE.css_alpha(0.35));
                ctx.fill_rect(-hx, -hy, hx * 2.0, hy * 0.3);
                ctx.set_stroke_style_str(&color.darken(0.3).css());
                ctx.set_line_width(3.0);
                ctx.stroke_rect(-hx, -hy, hx * 2.0, hy * 2.0);
            }
            Look::Bin { half } => {
                let (hx, hy) = (half.x as f64, half.y as f64);
                ctx.set_fill_style_str(&color.lighten(0.6).css_alpha(0.9));
                ctx.fill_rect(-hx, -hy, hx * 2.0, hy * 2.0);
                // Open top
                ctx.set_stroke_style_str(&color.css());
                ctx.set_line_width(8.0);
                ctx.begin_path();
                ctx.move_to(-hx, -hy);
                ctx.line_to(-hx, hy);
                ctx.line_to(hx, hy);
                ctx.line_to(hx, -hy);
                ctx.stroke();
            }
        }
    }

    fn disc(&self, x: f64, y: f64, radius: f64) {
        self.ctx.begin_path();
        self.ctx.arc(x, y, radius.max(0.0), 0.0, TAU).ok();
        self.ctx.fill();
    }

    fn shape_path(&self, kind: ShapeKind, half: f64) {
        let ctx = &self.ctx;
        ctx.begin_path();
        match kind {
            ShapeKind::Circle => {
                ctx.arc(0.0, 0.0, half, 0.0, TAU).ok();
            }
            ShapeKind::Square => {
                ctx.rect(-half, -half, half * 2.0, half * 2.0);
            }
            ShapeKind::Triangle => {
                ctx.move_to(0.0, -half);
                ctx.line_to(half, half);
                ctx.line_to(-half, half);
                ctx.close_path();
            }
            ShapeKind::Star => {
                for i in 0..10 {
                    let r = if i % 2 == 0 { half } else { half * 0.45 };
                    let a = -PI / 2.0 + i as f64 * PI / 5.0;
                    let (x, y) = (r * a.cos(), r * a.sin());
                    if i == 0 {
                        ctx.move_to(x, y);
                    } else {
                        ctx.line_to(x, y);
                    }
                }
                ctx.close_path();
            }
        }
    }

    /// Image if loaded, glyph otherwise
    fn sprite(&self, sprite: SpriteRef, x: f64, y: f64, size: f64) {
        if self.image(sprite, x, y, size) {
            return;
        }
        self.ctx.set_font(&format!("{}px sans-serif", (size * 0.8).round()));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.fill_text(sprite.glyph, x, y).ok();
    }

    /// Draw the sprite's image centered at `(x, y)`; false until it loads
    fn image(&self, sprite: SpriteRef, x: f64, y: f64, size: f64) -> bool {
        let cache = self.images.borrow();
        let Appearance::Image(_) = cache.catalog.appearance(&sprite) else {
            return false;
        };
        let Some(img) = cache.images.get(&sprite) else {
            return false;
        };
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                img,
                x - size / 2.0,
                y - size / 2.0,
                size,
                size,
            )
            .is_ok()
    }

    fn request(&self, sprite: SpriteRef) {
        if !self.images.borrow_mut().catalog.request(sprite) {
            return;
        }
        let images = self.images.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let loaded = load_first(sprite).await;
            let mut cache = images.borrow_mut();
            match loaded {
                Some((url, img)) => {
                    log::debug!("Loaded {}", url);
                    cache.catalog.mark_loaded(sprite, url);
                    cache.images.insert(sprite, img);
                }
                None => cache.catalog.mark_missing(sprite),
            }
        });
    }
}
