//! Off-main-thread text rasterization and text metrics for real-time renderers.
//!
//! - [`TextMeasurer`]: synchronous pixel width and cursor hit-testing
//! - [`RasterCache`]: `(size, font_id, text)` → measured width plus an
//!   asynchronously produced [`Bitmap`], deduplicated per key
//! - [`SwashSurface`]: the CPU drawing surface both run on
//!
//! Fonts come from a [`FontRegistry`] that must finish loading before the
//! first render; see the `glyph-raster-fonts` crate.

pub mod bitmap;
pub mod cache;
pub mod cli;
pub mod color_codes;
pub mod error;
pub mod logging;
pub mod measurer;
pub mod surface;

pub use bitmap::{Bitmap, TextureFlags};
pub use cache::{CacheEntry, CacheKey, InvalidateFn, RasterCache};
pub use color_codes::strip_color_codes;
pub use error::RasterError;
pub use measurer::TextMeasurer;
pub use surface::{Canvas, DrawingSurface, SwashSurface};

// Re-export shared types from dependencies for convenience
pub use glyph_raster_config::{Config, FillColor, FontSource};
pub use glyph_raster_fonts::{FontDescriptor, FontRegistry, resolve};
