//! Toddler-friendly color palette
//!
//! Bright, high-contrast hues. Each hue carries a string-table key so games can
//! say the color out loud.

use rand::Rng;

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const SKY: Color = Color::rgb(198, 236, 255);
    pub const MINT: Color = Color::rgb(214, 245, 221);
    pub const CREAM: Color = Color::rgb(255, 246, 220);
    pub const LILAC: Color = Color::rgb(236, 226, 255);
    pub const GOLD: Color = Color::rgb(255, 206, 84);

    /// CSS hex form (`#rrggbb`)
    pub fn css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba()` form with the given alpha
    pub fn css_alpha(&self, alpha: f32) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            alpha.clamp(0.0, 1.0)
        )
    }

    /// Mix toward white by `amount` (0 = unchanged, 1 = white)
    pub fn lighten(&self, amount: f32) -> Self {
        let t = amount.clamp(0.0, 1.0);
        let mix = |c: u8| (c as f32 + (255.0 - c as f32) * t).round() as u8;
        Self::rgb(mix(self.r), mix(self.g), mix(self.b))
    }

    /// Mix toward black by `amount`
    pub fn darken(&self, amount: f32) -> Self {
        let t = 1.0 - amount.clamp(0.0, 1.0);
        let mix = |c: u8| (c as f32 * t).round() as u8;
        Self::rgb(mix(self.r), mix(self.g), mix(self.b))
    }
}

/// Named palette hues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
}

impl Hue {
    pub const ALL: [Hue; 7] = [
        Hue::Red,
        Hue::Orange,
        Hue::Yellow,
        Hue::Green,
        Hue::Blue,
        Hue::Purple,
        Hue::Pink,
    ];

    pub fn color(&self) -> Color {
        match self {
            Hue::Red => Color::rgb(255, 89, 94),
            Hue::Orange => Color::rgb(255, 146, 76),
            Hue::Yellow => Color::rgb(255, 202, 58),
            Hue::Green => Color::rgb(138, 201, 38),
            Hue::Blue => Color::rgb(25, 130, 196),
            Hue::Purple => Color::rgb(106, 76, 147),
            Hue::Pink => Color::rgb(255, 133, 192),
        }
    }

    /// Lowercase name, used for image file names
    pub fn name(&self) -> &'static str {
        match self {
            Hue::Red => "red",
            Hue::Orange => "orange",
            Hue::Yellow => "yellow",
            Hue::Green => "green",
            Hue::Blue => "blue",
            Hue::Purple => "purple",
            Hue::Pink => "pink",
        }
    }

    /// String-table key for the spoken color name
    pub fn key(&self) -> &'static str {
        match self {
            Hue::Red => "colors.red",
            Hue::Orange => "colors.orange",
            Hue::Yellow => "colors.yellow",
            Hue::Green => "colors.green",
            Hue::Blue => "colors.blue",
            Hue::Purple => "colors.purple",
            Hue::Pink => "colors.pink",
        }
    }

    /// Uniform random hue
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Next hue in palette order (wraps)
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|h| h == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}
