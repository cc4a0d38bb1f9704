/// Color utilities
///
/// This module handles:
/// - Parsing `#RRGGBB` / `#RRGGBBAA` hex strings from the style catalog
/// - Converting to `image` pixels
/// - Interpolating between gradient stops
///
/// Interpolation is plain per-channel linear interpolation in sRGB space.
/// No linearization or perceptual mixing is applied.

use image::Rgba as Pixel;
use serde::{Deserialize, Serialize};

use crate::error::ColorParseError;

/// An 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const TRANSPARENT: Rgba = Rgba { r: 255, g: 255, b: 255, a: 0 };

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a hex color such as `#1e3a5f` or `1E3A5FCC`
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.trim().trim_start_matches('#');
        if !matches!(digits.len(), 6 | 8) {
            return Err(ColorParseError::Length(hex.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::Digit(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorParseError::Digit(hex.to_string()))
        };

        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if digits.len() == 8 { channel(6)? } else { 255 },
        })
    }

    pub fn to_pixel(self) -> Pixel<u8> {
        Pixel([self.r, self.g, self.b, self.a])
    }

    /// Scale alpha by a coverage factor in `0.0..=1.0`
    pub fn with_coverage(self, coverage: f32) -> Self {
        let a = (self.a as f32 * coverage.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Linear interpolation between two colors, `t` in `0.0..=1.0`
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Sample an ordered list of evenly spaced stops at position `t`
///
/// Returns `None` when `stops` is empty.
pub fn sample_stops(stops: &[Rgba], t: f32) -> Option<Rgba> {
    match stops {
        [] => None,
        [only] => Some(*only),
        _ => {
            let segments = (stops.len() - 1) as f32;
            let scaled = t.clamp(0.0, 1.0) * segments;
            let index = (scaled.floor() as usize).min(stops.len() - 2);
            Some(stops[index].lerp(stops[index + 1], scaled - index as f32))
        }
    }
}
