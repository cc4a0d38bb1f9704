/// Render and export settings
///
/// These are the values the settings panel hands to every render call.
/// They serialize to JSON so a host can store them, but nothing in this
/// crate writes them to disk.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// QR redundancy tier
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorCorrection {
    /// Recovers ~7% damage
    Low,
    /// Recovers ~15% damage
    #[default]
    Medium,
    /// Recovers ~25% damage
    Quartile,
    /// Recovers ~30% damage
    High,
}

impl ErrorCorrection {
    pub const ALL: [ErrorCorrection; 4] = [
        ErrorCorrection::Low,
        ErrorCorrection::Medium,
        ErrorCorrection::Quartile,
        ErrorCorrection::High,
    ];

    pub fn level(self) -> qrcode::EcLevel {
        match self {
            ErrorCorrection::Low => qrcode::EcLevel::L,
            ErrorCorrection::Medium => qrcode::EcLevel::M,
            ErrorCorrection::Quartile => qrcode::EcLevel::Q,
            ErrorCorrection::High => qrcode::EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorCorrection::Low => "Low (7%)",
            ErrorCorrection::Medium => "Medium (15%)",
            ErrorCorrection::Quartile => "Quartile (25%)",
            ErrorCorrection::High => "High (30%)",
        })
    }
}

/// Output file format
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
    Gif,
    Tiff,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Png,
        ExportFormat::Jpeg,
        ExportFormat::Bmp,
        ExportFormat::Gif,
        ExportFormat::Tiff,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Bmp => "bmp",
            ExportFormat::Gif => "gif",
            ExportFormat::Tiff => "tiff",
        }
    }

    pub fn image_format(self) -> image::ImageFormat {
        match self {
            ExportFormat::Png => image::ImageFormat::Png,
            ExportFormat::Jpeg => image::ImageFormat::Jpeg,
            ExportFormat::Bmp => image::ImageFormat::Bmp,
            ExportFormat::Gif => image::ImageFormat::Gif,
            ExportFormat::Tiff => image::ImageFormat::Tiff,
        }
    }

    /// Whether the exported file keeps the transparent background
    pub fn preserves_alpha(self) -> bool {
        matches!(self, ExportFormat::Png | ExportFormat::Gif | ExportFormat::Tiff)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Jpeg => "JPEG",
            ExportFormat::Bmp => "BMP",
            ExportFormat::Gif => "GIF",
            ExportFormat::Tiff => "TIFF",
        })
    }
}

pub const MODULE_SIZE_RANGE: std::ops::RangeInclusive<u32> = 5..=25;
pub const BORDER_RANGE: std::ops::RangeInclusive<u32> = 0..=10;

/// Parameters for the full-size render and export
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct RenderSettings {
    /// Pixels per module (5 to 25)
    pub module_size: u32,

    /// Quiet zone width in modules (0 to 10)
    pub border: u32,

    pub error_correction: ErrorCorrection,

    pub format: ExportFormat,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            module_size: 10,
            border: 4,
            error_correction: ErrorCorrection::Medium,
            format: ExportFormat::Png,
        }
    }
}

impl RenderSettings {
    /// Pull out-of-range values back into the supported ranges
    pub fn clamped(self) -> Self {
        Self {
            module_size: self
                .module_size
                .clamp(*MODULE_SIZE_RANGE.start(), *MODULE_SIZE_RANGE.end()),
            border: self.border.clamp(*BORDER_RANGE.start(), *BORDER_RANGE.end()),
            ..self
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON, clamping anything out of range
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::clamped)
    }
}

/// Tunables for the style gallery
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GalleryConfig {
    /// Styles rendered per host tick
    pub batch_size: usize,

    /// Payload encoded into every thumbnail
    pub sample_data: String,

    /// Quiet zone around thumbnails, in modules
    pub thumbnail_border: u32,

    /// Quiet period before a zoom change restarts the gallery
    #[serde(with = "millis")]
    pub zoom_debounce: Duration,

    /// Quiet period before an edit re-renders the live preview
    #[serde(with = "millis")]
    pub preview_debounce: Duration,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            batch_size: 12,
            sample_data: "https://example.com".to_string(),
            thumbnail_border: 1,
            zoom_debounce: Duration::from_millis(200),
            preview_debounce: Duration::from_millis(250),
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = RenderSettings::default();
        assert_eq!(settings.module_size, 10);
        assert_eq!(settings.border, 4);
        assert_eq!(settings.error_correction, ErrorCorrection::Medium);
        assert_eq!(settings.format, ExportFormat::Png);
    }

    #[test]
    fn test_clamping() {
        let settings = RenderSettings {
            module_size: 40,
            border: 99,
            ..Default::default()
        }
        .clamped();
        assert_eq!(settings.module_size, 25);
        assert_eq!(settings.border, 10);

        let settings = RenderSettings { module_size: 1, ..Default::default() }.clamped();
        assert_eq!(settings.module_size, 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = RenderSettings::from_json(r#"{"border": 12, "format": "Jpeg"}"#).unwrap();
        assert_eq!(settings.border, 10);
        assert_eq!(settings.module_size, 10);
        assert_eq!(settings.format, ExportFormat::Jpeg);
    }

    #[test]
    fn test_gallery_config_json_in_millis() {
        let json = serde_json::to_string(&GalleryConfig::default()).unwrap();
        assert!(json.contains("\"preview_debounce\":250"));
        let config: GalleryConfig = serde_json::from_str(r#"{"batch_size": 6}"#).unwrap();
        assert_eq!(config.batch_size, 6);
        assert_eq!(config.preview_debounce, Duration::from_millis(250));
    }

    #[test]
    fn test_alpha_preserving_formats() {
        assert!(ExportFormat::Png.preserves_alpha());
        assert!(!ExportFormat::Jpeg.preserves_alpha());
        assert!(!ExportFormat::Bmp.preserves_alpha());
    }
}
