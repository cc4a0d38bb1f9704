/// Checkerboard backdrops for previewing transparency
///
/// Patterns are memoized per (width, height, square) key. There is no
/// eviction: zoom levels are quantized, so a session only ever asks for a
/// handful of distinct sizes.

use std::collections::HashMap;

use image::RgbaImage;
use log::debug;

use super::renderer::RenderedImage;
use crate::color::Rgba;

pub const LIGHT_SQUARE: Rgba = Rgba::opaque(250, 250, 250);
pub const DARK_SQUARE: Rgba = Rgba::opaque(220, 220, 220);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternKey {
    pub width: u32,
    pub height: u32,
    pub square: u32,
}

#[derive(Debug, Default)]
pub struct CheckerboardCache {
    patterns: HashMap<PatternKey, RenderedImage>,
    builds: usize,
}

impl CheckerboardCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the pattern for this size, building it on first request
    pub fn get_pattern(&mut self, width: u32, height: u32, square: u32) -> RenderedImage {
        let key = PatternKey { width, height, square: square.max(1) };

        if let Some(pattern) = self.patterns.get(&key) {
            return pattern.clone();
        }

        let pattern = RenderedImage::new(build_pattern(key));
        self.builds += 1;
        debug!(
            "Built checkerboard {}x{} (square {}), {} so far",
            key.width, key.height, key.square, self.builds
        );
        self.patterns.insert(key, pattern.clone());
        pattern
    }

    /// How many patterns have been synthesized so far
    #[cfg(test)]
    pub fn builds(&self) -> usize {
        self.builds
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

fn build_pattern(key: PatternKey) -> RgbaImage {
    RgbaImage::from_fn(key.width, key.height, |x, y| {
        if (x / key.square + y / key.square) % 2 == 1 {
            LIGHT_SQUARE.to_pixel()
        } else {
            DARK_SQUARE.to_pixel()
        }
    })
}

/// Square size used behind gallery thumbnails
pub fn gallery_square(edge: u32) -> u32 {
    (edge / 18).max(4)
}

/// Square size used behind the single large preview
pub fn preview_square(width: u32) -> u32 {
    (width / 25).max(8)
}
