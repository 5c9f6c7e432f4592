//! Colors, theme palettes and per-mode draw styles.
//!
//! This module holds everything about how a particle *looks*, separate from
//! the rules that decide how it moves.
//!
//! # Themes
//!
//! | Theme | Character |
//! |-------|-----------|
//! | [`ColorTheme::Rainbow`] | Twelve soft pastels |
//! | [`ColorTheme::Fire`] | Reds, oranges and gold |
//! | [`ColorTheme::Ice`] | Whites and sky blues |
//! | [`ColorTheme::Neon`] | Saturated magenta, cyan, lime |
//!
//! A particle samples its color from the palette active when it is created
//! and keeps it for life, so switching themes only affects new particles.

use serde::{Deserialize, Serialize};

use crate::config::Mode;

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::hex(0x000000);
    pub const WHITE: Color = Color::hex(0xFFFFFF);

    /// Build a color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Components as floats in `0.0..=1.0`.
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

const RAINBOW: [Color; 12] = [
    Color::hex(0xFF6B6B),
    Color::hex(0x4ECDC4),
    Color::hex(0x45B7D1),
    Color::hex(0x96CEB4),
    Color::hex(0xFFEAA7),
    Color::hex(0xDDA0DD),
    Color::hex(0x98D8C8),
    Color::hex(0xF7DC6F),
    Color::hex(0xBB8FCE),
    Color::hex(0x85C1E9),
    Color::hex(0xF8C471),
    Color::hex(0x82E0AA),
];

// Repeated entries weight the draw toward those hues.
const FIRE: [Color; 10] = [
    Color::hex(0xFF4500),
    Color::hex(0xFF6347),
    Color::hex(0xFF7F50),
    Color::hex(0xFF8C00),
    Color::hex(0xFFA500),
    Color::hex(0xFFD700),
    Color::hex(0xFF6B35),
    Color::hex(0xFF4500),
    Color::hex(0xFF6347),
    Color::hex(0xFF7F50),
];

const ICE: [Color; 10] = [
    Color::hex(0x00BFFF),
    Color::hex(0x87CEEB),
    Color::hex(0xB0E0E6),
    Color::hex(0xADD8E6),
    Color::hex(0xF0F8FF),
    Color::hex(0xE0F6FF),
    Color::hex(0xB0E0E6),
    Color::hex(0x87CEEB),
    Color::hex(0x00BFFF),
    Color::hex(0x1E90FF),
];

const NEON: [Color; 10] = [
    Color::hex(0xFF00FF),
    Color::hex(0x00FFFF),
    Color::hex(0xFFFF00),
    Color::hex(0xFF0080),
    Color::hex(0x8000FF),
    Color::hex(0x00FF80),
    Color::hex(0xFF8000),
    Color::hex(0x0080FF),
    Color::hex(0x80FF00),
    Color::hex(0xFF0080),
];

/// Named color palettes particles are sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTheme {
    /// Soft pastels (default).
    #[default]
    Rainbow,
    /// Reds, oranges and gold.
    Fire,
    /// Whites and sky blues.
    Ice,
    /// Saturated cyberpunk colors.
    Neon,
}

impl ColorTheme {
    /// All themes in cycling order.
    pub const ALL: [ColorTheme; 4] = [
        ColorTheme::Rainbow,
        ColorTheme::Fire,
        ColorTheme::Ice,
        ColorTheme::Neon,
    ];

    /// The colors of this theme. Never empty.
    pub fn palette(self) -> &'static [Color] {
        match self {
            ColorTheme::Rainbow => &RAINBOW,
            ColorTheme::Fire => &FIRE,
            ColorTheme::Ice => &ICE,
            ColorTheme::Neon => &NEON,
        }
    }

    /// The theme after this one, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Rainbow => "rainbow",
            ColorTheme::Fire => "fire",
            ColorTheme::Ice => "ice",
            ColorTheme::Neon => "neon",
        }
    }
}

/// How a particle body is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawStyle {
    /// Filled disc of radius `size`, with a soft halo `glow` pixels wide
    /// (0 = no halo).
    Disc { glow: f32 },
    /// Unfilled ring of radius `size`.
    Ring { line_width: f32 },
}

/// Background fade color composited over the whole surface each frame.
pub const FADE_COLOR: Color = Color::BLACK;

/// Opacity of the per-frame fade. Lower values leave longer smears.
pub const FADE_ALPHA: f32 = 0.1;

/// Trail stroke width relative to particle size.
pub const TRAIL_WIDTH_SCALE: f32 = 0.5;

/// Trail segment opacity relative to the recorded life of its end point.
pub const TRAIL_ALPHA_SCALE: f32 = 0.3;

impl Mode {
    /// Draw-style table: one entry per mode.
    pub fn draw_style(self) -> DrawStyle {
        match self {
            Mode::Rain => DrawStyle::Disc { glow: 0.0 },
            Mode::Firework => DrawStyle::Disc { glow: 15.0 },
            Mode::Spiral => DrawStyle::Ring { line_width: 2.0 },
            Mode::Bounce => DrawStyle::Disc { glow: 8.0 },
            Mode::Magnetic => DrawStyle::Disc { glow: 12.0 },
            Mode::Vortex => DrawStyle::Disc { glow: 10.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        let c = Color::hex(0xFF6B35);
        assert_eq!((c.r, c.g, c.b), (0xFF, 0x6B, 0x35));
        assert_eq!(Color::WHITE.to_f32(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_palette_sizes() {
        assert_eq!(ColorTheme::Rainbow.palette().len(), 12);
        assert_eq!(ColorTheme::Fire.palette().len(), 10);
        assert_eq!(ColorTheme::Ice.palette().len(), 10);
        assert_eq!(ColorTheme::Neon.palette().len(), 10);
    }

    #[test]
    fn test_theme_cycle_wraps() {
        let mut theme = ColorTheme::Rainbow;
        let mut seen = Vec::new();
        for _ in 0..4 {
            theme = theme.next();
            seen.push(theme);
        }
        assert_eq!(
            seen,
            vec![ColorTheme::Fire, ColorTheme::Ice, ColorTheme::Neon, ColorTheme::Rainbow]
        );
    }

    #[test]
    fn test_only_spiral_draws_a_ring() {
        for mode in Mode::ALL {
            let ring = matches!(mode.draw_style(), DrawStyle::Ring { .. });
            assert_eq!(ring, mode == Mode::Spiral, "{:?}", mode);
        }
        assert_eq!(Mode::Rain.draw_style(), DrawStyle::Disc { glow: 0.0 });
    }
}
