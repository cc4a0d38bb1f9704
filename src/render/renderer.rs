use std::sync::Arc;

use image::RgbaImage;
use qrcode::types::QrError;
use qrcode::{Color, QrCode};

use super::fill::Fill;
use super::shape::CellMask;
use crate::color::Rgba;
use crate::error::{EncodingError, RenderError, StyleRenderError};
use crate::state::settings::ErrorCorrection;
use crate::style::StyleDescriptor;

/// Largest edge we are willing to allocate, in pixels
pub const MAX_EDGE: u64 = 16_384;

/// An immutable raster produced by the renderer or compositor
///
/// Clones share the same buffer, so handing a render to a cache and to the
/// compositor never copies pixels and never lets either side mutate them.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pixels: Arc<RgbaImage>,
}

impl RenderedImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels: Arc::new(pixels) }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// True when both values share one buffer
    #[cfg(test)]
    pub fn same_buffer(&self, other: &RenderedImage) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    /// True when any pixel is not fully opaque
    #[cfg(test)]
    pub fn has_transparency(&self) -> bool {
        self.pixels.pixels().any(|p| p[3] < 255)
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}

/// Everything needed for one render call
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub data: String,
    pub style: StyleDescriptor,
    /// Pixels per module
    pub module_size: u32,
    /// Quiet zone in modules
    pub border: u32,
    pub error_correction: ErrorCorrection,
}

impl RenderRequest {
    pub fn render(&self) -> Result<RenderedImage, RenderError> {
        render(
            &self.data,
            &self.style,
            self.module_size,
            self.border,
            self.error_correction,
        )
    }
}

/// Encode `data` and paint it with `style` on a transparent background
///
/// The output is a pure function of the arguments: equal inputs give
/// byte-identical buffers.
pub fn render(
    data: &str,
    style: &StyleDescriptor,
    module_size: u32,
    border: u32,
    error_correction: ErrorCorrection,
) -> Result<RenderedImage, RenderError> {
    check_style(style, module_size)?;

    let code = encode(data, error_correction)?;
    let modules = code.width() as u32;
    let edge = (modules as u64 + 2 * border as u64) * module_size as u64;
    if edge > MAX_EDGE {
        return Err(RenderError::Allocation { width: edge, height: edge });
    }
    let edge = edge as u32;

    let mask = CellMask::new(style.shape, module_size);
    let fill = Fill::new(style.fill, &style.stops, edge);
    let mut image = RgbaImage::from_pixel(edge, edge, Rgba::TRANSPARENT.to_pixel());

    for (index, color) in code.to_colors().into_iter().enumerate() {
        if color != Color::Dark {
            continue;
        }
        let mx = index as u32 % modules;
        let my = index as u32 / modules;
        let ox = (border + mx) * module_size;
        let oy = (border + my) * module_size;

        for py in 0..module_size {
            for px in 0..module_size {
                let coverage = mask.coverage(px, py);
                if coverage <= 0.0 {
                    continue;
                }
                let (x, y) = (ox + px, oy + py);
                image.put_pixel(x, y, fill.color_at(x, y).with_coverage(coverage).to_pixel());
            }
        }
    }

    Ok(RenderedImage::new(image))
}

/// Number of modules per side for `data` at `error_correction`
pub fn symbol_width(data: &str, error_correction: ErrorCorrection) -> Result<u32, EncodingError> {
    encode(data, error_correction).map(|code| code.width() as u32)
}

fn encode(data: &str, error_correction: ErrorCorrection) -> Result<QrCode, EncodingError> {
    if data.is_empty() {
        return Err(EncodingError::Empty);
    }

    QrCode::with_error_correction_level(data.as_bytes(), error_correction.level()).map_err(|e| match e {
        QrError::DataTooLong => EncodingError::DataTooLong { level: error_correction },
        other => EncodingError::Unsupported(other.to_string()),
    })
}

fn check_style(style: &StyleDescriptor, module_size: u32) -> Result<(), StyleRenderError> {
    let needed = style.fill.required_stops();
    if style.stops.len() < needed {
        return Err(StyleRenderError::MissingColorStops {
            style: style.id,
            fill: style.fill,
            needed,
            found: style.stops.len(),
        });
    }
    if module_size == 0 {
        return Err(StyleRenderError::ZeroModuleSize { style: style.id });
    }
    Ok(())
}
