/// Gallery thumbnail generation
///
/// Thumbnails are rendered small (module size derived from the target
/// edge), resized to exactly `edge` x `edge` with Lanczos3, and memoized per
/// (style, edge). The transparent render is what gets cached; backdrops are
/// composited on top per request, so switching backgrounds never re-encodes.

use std::collections::HashMap;

use image::imageops::{self, FilterType};
use log::{debug, trace};

use super::loader::GalleryParams;
use crate::error::RenderError;
use crate::render::checkerboard::gallery_square;
use crate::render::renderer::{render, symbol_width};
use crate::render::{Compositor, RenderedImage, Target};
use crate::state::settings::ErrorCorrection;
use crate::style::{StyleDescriptor, StyleId};

/// Every thumbnail is encoded at this level
const THUMBNAIL_EC: ErrorCorrection = ErrorCorrection::Medium;

/// Smallest module size worth rendering before the resize
const MIN_MODULE_SIZE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThumbnailKey {
    pub style: StyleId,
    pub edge: u32,
}

/// Render `style` so the result is exactly `edge` pixels square
pub fn render_thumbnail(
    data: &str,
    style: &StyleDescriptor,
    edge: u32,
    border: u32,
) -> Result<RenderedImage, RenderError> {
    let modules = symbol_width(data, THUMBNAIL_EC)? + 2 * border;
    let module_size = edge.div_ceil(modules).max(MIN_MODULE_SIZE);
    let full = render(data, style, module_size, border, THUMBNAIL_EC)?;

    if full.width() == edge && full.height() == edge {
        return Ok(full);
    }

    Ok(RenderedImage::new(imageops::resize(
        full.pixels(),
        edge,
        edge,
        FilterType::Lanczos3,
    )))
}

/// Per-style render cache plus the compositor used for gallery previews
#[derive(Debug)]
pub struct ThumbnailPipeline {
    sample_data: String,
    border: u32,
    renders: HashMap<ThumbnailKey, RenderedImage>,
    compositor: Compositor,
    render_count: usize,
}

impl ThumbnailPipeline {
    pub fn new(sample_data: impl Into<String>, border: u32) -> Self {
        Self {
            sample_data: sample_data.into(),
            border,
            renders: HashMap::new(),
            compositor: Compositor::new(),
            render_count: 0,
        }
    }

    /// Transparent thumbnail for (style, edge), rendered at most once
    pub fn transparent(&mut self, style: &StyleDescriptor, edge: u32) -> Result<RenderedImage, RenderError> {
        let key = ThumbnailKey { style: style.id, edge };
        if let Some(image) = self.renders.get(&key) {
            return Ok(image.clone());
        }

        let image = render_thumbnail(&self.sample_data, style, edge, self.border)?;
        self.render_count += 1;
        trace!("Thumbnail {} at {} px (render #{})", style.key(), edge, self.render_count);
        self.renders.insert(key, image.clone());
        Ok(image)
    }

    /// Thumbnail composited over the gallery backdrop, ready for display
    pub fn preview(&mut self, style: &StyleDescriptor, params: GalleryParams) -> Result<RenderedImage, RenderError> {
        let image = self.transparent(style, params.edge)?;
        let target = Target::Preview { square: gallery_square(params.edge) };
        Ok(self.compositor.composite(&image, params.backdrop, target))
    }

    /// Drop cached renders made for any other edge
    pub fn retain_edge(&mut self, edge: u32) {
        let before = self.renders.len();
        self.renders.retain(|key, _| key.edge == edge);
        debug!("Evicted {} stale thumbnails (keeping {} px)", before - self.renders.len(), edge);
    }

    /// Total renders performed (cache misses)
    #[cfg(test)]
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    #[cfg(test)]
    pub fn cached(&self) -> usize {
        self.renders.len()
    }

    #[cfg(test)]
    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::BackdropSpec;
    use crate::style::{catalog, ModuleShape};

    const SAMPLE: &str = "https://example.com";

    #[test]
    fn test_thumbnails_are_exactly_the_edge() {
        let style = catalog::find("Neon Pink", ModuleShape::Gapped).unwrap();
        for edge in [60, 100, 160, 200] {
            let t = render_thumbnail(SAMPLE, style, edge, 1).unwrap();
            assert_eq!((t.width(), t.height()), (edge, edge));
        }
    }

    #[test]
    fn test_cache_hits_skip_rendering() {
        let style = catalog::find("Vibrant Red", ModuleShape::Circle).unwrap();
        let mut pipeline = ThumbnailPipeline::new(SAMPLE, 1);

        let a = pipeline.transparent(style, 120).unwrap();
        let b = pipeline.transparent(style, 120).unwrap();
        assert!(a.same_buffer(&b));
        assert_eq!(pipeline.render_count(), 1);

        pipeline.transparent(style, 140).unwrap();
        assert_eq!(pipeline.render_count(), 2);
    }

    #[test]
    fn test_backdrop_change_reuses_transparent_render() {
        let style = catalog::find("Retro Amber", ModuleShape::Rounded).unwrap();
        let mut pipeline = ThumbnailPipeline::new(SAMPLE, 1);

        let checker = GalleryParams { edge: 100, backdrop: BackdropSpec::Transparent };
        let black = GalleryParams {
            backdrop: BackdropSpec::SolidColor(crate::color::Rgba::BLACK),
            ..checker
        };
        let a = pipeline.preview(style, checker).unwrap();
        let b = pipeline.preview(style, black).unwrap();

        assert_ne!(a.as_raw(), b.as_raw());
        assert_eq!(pipeline.render_count(), 1);
        assert_eq!(pipeline.compositor().checkerboards().builds(), 1);
    }

    #[test]
    fn test_retain_edge_drops_other_sizes() {
        let style = catalog::find("Soft Mint", ModuleShape::Square).unwrap();
        let mut pipeline = ThumbnailPipeline::new(SAMPLE, 1);
        pipeline.transparent(style, 80).unwrap();
        pipeline.transparent(style, 100).unwrap();

        pipeline.retain_edge(100);
        assert_eq!(pipeline.cached(), 1);
        pipeline.transparent(style, 100).unwrap();
        assert_eq!(pipeline.render_count(), 2);
    }
}
