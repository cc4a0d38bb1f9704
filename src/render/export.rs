/// Export of finished renders
///
/// Export always starts from the untouched transparent render. Formats
/// that keep alpha are written as-is; the others are flattened onto a solid
/// color through the compositor first.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use log::info;

use super::compositor::{BackdropSpec, Compositor, Target};
use super::renderer::RenderedImage;
use crate::color::Rgba;
use crate::error::ExportError;
use crate::state::settings::ExportFormat;
use crate::style::StyleDescriptor;

const JPEG_QUALITY: u8 = 95;

/// Encode `image` into the bytes of `format`
///
/// `flatten_onto` is only used by formats without an alpha channel.
pub fn encode(
    image: &RenderedImage,
    format: ExportFormat,
    flatten_onto: Rgba,
) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();

    if format.preserves_alpha() {
        DynamicImage::ImageRgba8(image.pixels().clone())
            .write_to(&mut Cursor::new(&mut bytes), format.image_format())?;
        return Ok(bytes);
    }

    let flat = Compositor::new().composite(image, BackdropSpec::SolidColor(flatten_onto), Target::Export);
    let rgb = DynamicImage::ImageRgba8(flat.pixels().clone()).to_rgb8();

    match format {
        ExportFormat::Jpeg => JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).encode_image(&rgb)?,
        _ => DynamicImage::ImageRgb8(rgb).write_to(&mut Cursor::new(&mut bytes), format.image_format())?,
    }

    Ok(bytes)
}

/// Color opaque formats are flattened onto
///
/// A solid backdrop wins; with the checkerboard the style's suggested
/// background is used, else white.
pub fn flatten_color(backdrop: BackdropSpec, style: &StyleDescriptor) -> Rgba {
    match backdrop {
        BackdropSpec::SolidColor(c) | BackdropSpec::CustomColor(c) => Rgba { a: 255, ..c },
        BackdropSpec::Transparent => style.flatten_color(),
    }
}

/// Default file name, e.g. `qrcode_20261014_093000.png`
pub fn default_file_name(format: ExportFormat) -> String {
    format!(
        "qrcode_{}.{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Default export directory (the user's pictures folder, else home)
pub fn default_export_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Encode and write to `path`
pub fn save(
    image: &RenderedImage,
    format: ExportFormat,
    flatten_onto: Rgba,
    path: &Path,
) -> Result<(), ExportError> {
    let bytes = encode(image, format, flatten_onto)?;
    std::fs::write(path, bytes)?;
    info!("💾 Saved {} ({}x{})", path.display(), image.width(), image.height());
    Ok(())
}

/// Save on a blocking worker so the UI thread keeps running
pub async fn save_async(
    image: RenderedImage,
    format: ExportFormat,
    flatten_onto: Rgba,
    dir: PathBuf,
) -> Result<PathBuf, String> {
    tokio::task::spawn_blocking(move || {
        let path = dir.join(default_file_name(format));
        save(&image, format, flatten_onto, &path)
            .map(|_| path)
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::renderer::render;
    use crate::state::settings::ErrorCorrection;
    use crate::style::{catalog, ModuleShape};

    fn sample() -> RenderedImage {
        let style = catalog::find("Transparent Blue", ModuleShape::Rounded).unwrap();
        render("https://example.com", style, 4, 2, ErrorCorrection::Medium).unwrap()
    }

    #[test]
    fn test_png_keeps_alpha() {
        let bytes = encode(&sample(), ExportFormat::Png, Rgba::WHITE).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0)[3], 0);
        assert_eq!(decoded.as_raw(), sample().as_raw());
    }

    #[test]
    fn test_jpeg_is_flattened() {
        let bytes = encode(&sample(), ExportFormat::Jpeg, Rgba::WHITE).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(!decoded.color().has_alpha());
        let corner = decoded.to_rgb8().get_pixel(0, 0).0;
        assert!(corner.iter().all(|&c| c > 240), "{corner:?}");
    }

    #[test]
    fn test_export_after_colored_preview_is_still_transparent() {
        let fg = sample();
        let mut compositor = Compositor::new();
        compositor.composite(&fg, BackdropSpec::SolidColor(Rgba::BLACK), Target::Preview { square: 8 });

        let bytes = encode(&fg, ExportFormat::Png, Rgba::WHITE).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert!(decoded.pixels().any(|p| p[3] == 0));
    }

    #[test]
    fn test_every_format_encodes() {
        for format in ExportFormat::ALL {
            let bytes = encode(&sample(), format, Rgba::WHITE).unwrap();
            assert!(!bytes.is_empty(), "{format} produced no bytes");
            assert_eq!(image::guess_format(&bytes).unwrap(), format.image_format());
        }
    }

    #[test]
    fn test_flatten_color_choice() {
        let suggested = catalog::find("Neon Pink", ModuleShape::Square).unwrap();
        let bare = catalog::find("Transparent Black", ModuleShape::Square).unwrap();
        let custom = Rgba::opaque(1, 2, 3);

        assert_eq!(flatten_color(BackdropSpec::Transparent, suggested), Rgba::opaque(0x0a, 0x0a, 0x0f));
        assert_eq!(flatten_color(BackdropSpec::Transparent, bare), Rgba::WHITE);
        assert_eq!(flatten_color(BackdropSpec::CustomColor(custom), suggested), custom);
        assert_eq!(flatten_color(BackdropSpec::SolidColor(Rgba::BLACK), bare), Rgba::BLACK);
    }

    #[test]
    fn test_jpeg_with_checkerboard_uses_suggested_background() {
        let style = catalog::find("Neon Pink", ModuleShape::Square).unwrap();
        let fg = render("https://example.com", style, 4, 4, ErrorCorrection::Medium).unwrap();
        let flat = flatten_color(BackdropSpec::Transparent, style);

        let bytes = encode(&fg, ExportFormat::Jpeg, flat).unwrap();
        let corner = image::load_from_memory(&bytes).unwrap().to_rgb8().get_pixel(0, 0).0;
        for (got, want) in corner.iter().zip([0x0a, 0x0a, 0x0f]) {
            assert!(got.abs_diff(want) <= 4, "{corner:?}");
        }
    }

    #[test]
    fn test_default_file_name_has_extension() {
        let name = default_file_name(ExportFormat::Tiff);
        assert!(name.starts_with("qrcode_"));
        assert!(name.ends_with(".tiff"));
    }
}
