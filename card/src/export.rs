//! Raster export planning.
//!
//! The browser does the actual encoding (`canvas.toBlob`); this module fixes
//! everything that doesn't need a browser: the density multiplier, the
//! bitmap size for a given layout, the download name, and the error type the
//! host reports when any step fails.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use crate::layout::CardLayout;

/// Name of the downloaded image.
pub const EXPORT_FILE_NAME: &str = "spec_card.png";

/// MIME type handed to the encoder.
pub const EXPORT_MIME: &str = "image/png";

/// Pixel-density multiplier applied to the card's CSS size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportPolicy {
    /// 2x density.
    #[default]
    Standard,
    /// 2.5x density.
    High,
}

impl ExportPolicy {
    #[must_use]
    pub fn pixel_ratio(self) -> f64 {
        match self {
            Self::Standard => 2.0,
            Self::High => 2.5,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "2x",
            Self::High => "2.5x",
        }
    }
}

/// Everything the host needs to rasterize one card.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPlan {
    /// Card size in CSS pixels.
    pub css_width: f64,
    pub css_height: f64,
    /// Bitmap size in device pixels.
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub pixel_ratio: f64,
    pub file_name: &'static str,
    pub mime: &'static str,
}

/// Errors surfaced when an export can't produce a download.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("card has no area to export")]
    EmptyCard,
    #[error("could not prepare export canvas: {0}")]
    Canvas(String),
    #[error("drawing the card failed: {0}")]
    Render(String),
    #[error("image encoding failed: {0}")]
    Encode(String),
    #[error("download could not be started: {0}")]
    Download(String),
}

/// Size the bitmap for `layout` under `policy`.
///
/// # Errors
///
/// Returns [`ExportError::EmptyCard`] when the layout has no area.
pub fn plan(layout: &CardLayout, policy: ExportPolicy) -> Result<ExportPlan, ExportError> {
    if layout.width <= 0.0 || layout.height <= 0.0 {
        return Err(ExportError::EmptyCard);
    }
    let ratio = policy.pixel_ratio();
    Ok(ExportPlan {
        css_width: layout.width,
        css_height: layout.height,
        pixel_width: device_pixels(layout.width, ratio),
        pixel_height: device_pixels(layout.height, ratio),
        pixel_ratio: ratio,
        file_name: EXPORT_FILE_NAME,
        mime: EXPORT_MIME,
    })
}

/// Device-pixel extent of a CSS length at `ratio`, at least one pixel.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn device_pixels(css: f64, ratio: f64) -> u32 {
    (css * ratio).ceil().clamp(1.0, f64::from(u32::MAX)) as u32
}
