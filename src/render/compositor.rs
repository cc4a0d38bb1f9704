/// Background compositing for on-screen presentation
///
/// The compositor never writes into the foreground it is given. Each call
/// builds a fresh canvas (a copy of the cached checkerboard, or a solid
/// fill) and blends the foreground over it, so the transparent render used
/// for export stays untouched whatever the gallery is showing.

use std::fmt;

use image::{imageops, RgbaImage};

use super::checkerboard::CheckerboardCache;
use super::renderer::RenderedImage;
use crate::color::Rgba;

/// What to paint behind a render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackdropSpec {
    /// Checkerboard on screen, untouched alpha for export
    Transparent,
    /// One of the gallery presets
    SolidColor(Rgba),
    /// A user-picked color
    CustomColor(Rgba),
}

impl BackdropSpec {
    fn fill(self) -> Option<Rgba> {
        match self {
            BackdropSpec::Transparent => None,
            BackdropSpec::SolidColor(c) | BackdropSpec::CustomColor(c) => Some(Rgba { a: 255, ..c }),
        }
    }
}

/// Where the composited image is headed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Written to a file or the clipboard
    Export,
    /// Shown on screen; `square` is the checkerboard square size
    Preview { square: u32 },
}

/// Gallery background presets offered by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackdropPreset {
    Transparent,
    White,
    LightGray,
    DarkGray,
    Black,
    Custom,
}

impl BackdropPreset {
    pub const ALL: [BackdropPreset; 6] = [
        BackdropPreset::Transparent,
        BackdropPreset::White,
        BackdropPreset::LightGray,
        BackdropPreset::DarkGray,
        BackdropPreset::Black,
        BackdropPreset::Custom,
    ];

    /// Resolve to a spec; `custom` is only consulted for `Custom`
    pub fn spec(self, custom: Rgba) -> BackdropSpec {
        match self {
            BackdropPreset::Transparent => BackdropSpec::Transparent,
            BackdropPreset::White => BackdropSpec::SolidColor(Rgba::WHITE),
            BackdropPreset::LightGray => BackdropSpec::SolidColor(Rgba::opaque(0xE5, 0xE5, 0xE5)),
            BackdropPreset::DarkGray => BackdropSpec::SolidColor(Rgba::opaque(0x33, 0x33, 0x33)),
            BackdropPreset::Black => BackdropSpec::SolidColor(Rgba::BLACK),
            BackdropPreset::Custom => BackdropSpec::CustomColor(custom),
        }
    }
}

impl fmt::Display for BackdropPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BackdropPreset::Transparent => "Transparent",
            BackdropPreset::White => "White",
            BackdropPreset::LightGray => "Light Gray",
            BackdropPreset::DarkGray => "Dark Gray",
            BackdropPreset::Black => "Black",
            BackdropPreset::Custom => "Custom...",
        })
    }
}

#[derive(Debug, Default)]
pub struct Compositor {
    checkerboards: CheckerboardCache,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn checkerboards(&self) -> &CheckerboardCache {
        &self.checkerboards
    }

    /// Blend `foreground` over `backdrop` for `target`
    ///
    /// `Transparent` + `Export` hands back the foreground itself.
    pub fn composite(
        &mut self,
        foreground: &RenderedImage,
        backdrop: BackdropSpec,
        target: Target,
    ) -> RenderedImage {
        let (width, height) = (foreground.width(), foreground.height());

        let mut canvas: RgbaImage = match (backdrop.fill(), target) {
            (None, Target::Export) => return foreground.clone(),
            (None, Target::Preview { square }) => {
                self.checkerboards.get_pattern(width, height, square).pixels().clone()
            }
            (Some(color), _) => RgbaImage::from_pixel(width, height, color.to_pixel()),
        };

        imageops::overlay(&mut canvas, foreground.pixels(), 0, 0);
        RenderedImage::new(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::checkerboard::DARK_SQUARE;
    use crate::render::renderer::render;
    use crate::state::settings::ErrorCorrection;
    use crate::style::{catalog, ModuleShape};

    fn assert_close(pixel: &image::Rgba<u8>, expected: Rgba) {
        let want = expected.to_pixel();
        for c in 0..4 {
            assert!(pixel[c].abs_diff(want[c]) <= 1, "{pixel:?} != {want:?}");
        }
    }

    fn sample() -> RenderedImage {
        let style = catalog::find("Transparent Black", ModuleShape::Circle).unwrap();
        render("https://example.com", style, 6, 2, ErrorCorrection::Medium).unwrap()
    }

    #[test]
    fn test_export_of_transparent_is_the_foreground() {
        let mut compositor = Compositor::new();
        let fg = sample();
        let out = compositor.composite(&fg, BackdropSpec::Transparent, Target::Export);
        assert!(out.same_buffer(&fg));
        assert_eq!(compositor.checkerboards().len(), 0);
    }

    #[test]
    fn test_preview_uses_checkerboard() {
        let mut compositor = Compositor::new();
        let fg = sample();
        let out = compositor.composite(&fg, BackdropSpec::Transparent, Target::Preview { square: 5 });
        assert!(!out.has_transparency());
        // Top-left is quiet zone, so the checkerboard shows through
        assert_close(out.pixels().get_pixel(0, 0), DARK_SQUARE);
        assert_eq!(compositor.checkerboards().builds(), 1);

        compositor.composite(&fg, BackdropSpec::Transparent, Target::Preview { square: 5 });
        assert_eq!(compositor.checkerboards().builds(), 1);
    }

    #[test]
    fn test_solid_backdrop_fills_quiet_zone() {
        let mut compositor = Compositor::new();
        let fg = sample();
        let navy = Rgba::opaque(0x1e, 0x3a, 0x5f);
        let out = compositor.composite(&fg, BackdropSpec::CustomColor(navy), Target::Preview { square: 5 });
        assert_close(out.pixels().get_pixel(0, 0), navy);
        assert!(!out.has_transparency());
    }

    #[test]
    fn test_composite_never_mutates_foreground() {
        let mut compositor = Compositor::new();
        let fg = sample();
        let before = fg.as_raw().to_vec();

        for preset in BackdropPreset::ALL {
            let spec = preset.spec(Rgba::opaque(10, 200, 30));
            compositor.composite(&fg, spec, Target::Preview { square: 4 });
            compositor.composite(&fg, spec, Target::Export);
        }

        assert_eq!(fg.as_raw(), &before[..]);
        assert!(fg.has_transparency());
        let export = compositor.composite(&fg, BackdropSpec::Transparent, Target::Export);
        assert!(export.has_transparency());
    }

    #[test]
    fn test_dark_modules_survive_blending() {
        let mut compositor = Compositor::new();
        let style = catalog::find("Classic Black", ModuleShape::Square).unwrap();
        let fg = render("hello", style, 4, 0, ErrorCorrection::Low).unwrap();
        let out = compositor.composite(&fg, BackdropSpec::SolidColor(Rgba::WHITE), Target::Export);
        // Finder pattern corner module is dark
        assert_eq!(*out.pixels().get_pixel(1, 1), Rgba::BLACK.to_pixel());
    }
}
