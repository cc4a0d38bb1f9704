/// Error types shared across rendering, the gallery and export

use thiserror::Error;

use crate::state::settings::ErrorCorrection;
use crate::style::{FillKind, StyleId};

/// The payload could not be turned into a QR symbol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("nothing to encode: data is empty")]
    Empty,
    #[error("data is too long for error correction level {level}")]
    DataTooLong { level: ErrorCorrection },
    #[error("data cannot be encoded: {0}")]
    Unsupported(String),
}

/// A style descriptor is malformed or asks for something the renderer cannot draw
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleRenderError {
    #[error("style {style} needs at least {needed} color stop(s) for a {fill:?} fill, found {found}")]
    MissingColorStops {
        style: StyleId,
        fill: FillKind,
        needed: usize,
        found: usize,
    },
    #[error("style {style} was asked to render with a module size of 0 px")]
    ZeroModuleSize { style: StyleId },
}

/// Everything that can go wrong in a single render call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Style(#[from] StyleRenderError),
    /// The only failure treated as fatal by the gallery
    #[error("cannot allocate a {width}x{height} px image buffer")]
    Allocation { width: u64, height: u64 },
}

impl RenderError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, RenderError::Allocation { .. })
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("expected 6 or 8 hex digits in {0:?}")]
    Length(String),
    #[error("invalid hex digit in {0:?}")]
    Digit(String),
}
