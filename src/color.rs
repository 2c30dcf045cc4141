//! SolidColor type — the public color representation for floem-colormap.
//!
//! Stores RGBA as 8-bit channels. Equality is exact channel-wise comparison,
//! which is what the palette relies on for deduplication.

use crate::math;

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolidColor {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

/// Hue, saturation and lightness, each normalized to 0.0–1.0.
///
/// Hue is circular: 0.0 and 1.0 denote the same hue.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

impl SolidColor {
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);

    /// Red component (0–255).
    pub fn r(&self) -> u8 {
        self.r
    }
    /// Green component (0–255).
    pub fn g(&self) -> u8 {
        self.g
    }
    /// Blue component (0–255).
    pub fn b(&self) -> u8 {
        self.b
    }
    /// Alpha component (0–255).
    pub fn a(&self) -> u8 {
        self.a
    }
}

impl Default for SolidColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl SolidColor {
    /// Create from 0–255 RGB values with full opacity.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Copy of this color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Convert to 0–255 RGB tuple.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Channels as f64 in 0.0–1.0, for painting.
    pub fn to_unit_rgba(&self) -> (f64, f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
            self.a as f64 / 255.0,
        )
    }

    /// Parse a hex string (with or without `#`, 3, 6, or 8 chars).
    ///
    /// 8-char hex is interpreted as RRGGBBAA. 3 and 6-char hex default to full opacity.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let stripped = hex.trim_start_matches('#');
        if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&stripped[i..i + 2], 16).ok();
        match stripped.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&stripped[i..i + 1], 16).ok();
                Some(Self::from_rgb(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17))
            }
            6 => Some(Self::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::from_rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Format as uppercase hex (no `#` prefix).
    ///
    /// Returns 6 chars (RRGGBB) when fully opaque, 8 chars (RRGGBBAA) otherwise.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Create from HSL values (all 0.0–1.0), fully opaque.
    pub fn from_hsl(hsl: Hsl) -> Self {
        math::hsl_to_rgb(hsl.h, hsl.s, hsl.l)
    }

    /// Convert to HSL (all 0.0–1.0). Alpha is ignored.
    pub fn to_hsl(&self) -> Hsl {
        math::rgb_to_hsl(*self)
    }
}
