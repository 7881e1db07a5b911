//! Typed error types for glyph-raster.
//!
//! Callers at the crate boundary can match on specific variants instead of
//! relying on opaque `anyhow` strings.

use glyph_raster_config::ConfigError;
use glyph_raster_fonts::FontLoadError;
use thiserror::Error;

/// Top-level error type for the rasterizer.
#[derive(Debug, Error)]
pub enum RasterError {
    /// No drawing surface could be acquired. Fatal: every measurement and
    /// raster operation needs one.
    #[error("Drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// Bitmap production needs an async runtime and none is running.
    #[error("No async runtime available for bitmap production: {0}")]
    RuntimeUnavailable(#[from] tokio::runtime::TryCurrentError),

    /// A startup font load failed.
    #[error(transparent)]
    FontLoad(#[from] FontLoadError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
