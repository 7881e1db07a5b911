//! Font catalog and font registry for the glyph-raster text rasterizer.
//!
//! This crate provides:
//! - The fixed `(size, font_id)` → [`FontDescriptor`] catalog
//! - A [`FontRegistry`] that makes named font families available to the
//!   rasterizer, loading them from URLs or paths at startup
//! - System font fallback when a requested family was never loaded
//!
//! # Architecture
//!
//! The catalog is pure: it never checks whether a family is available. The
//! registry owns font bytes and answers family lookups, substituting a
//! fallback face when the requested family is missing.

pub mod catalog;
pub mod error;
pub mod registry;

// Re-export main types for convenience
pub use catalog::{FontDescriptor, FontFace, resolve};
pub use error::FontLoadError;
pub use registry::{DefaultFontFetcher, FALLBACK_FAMILIES, FontData, FontFetcher, FontRegistry};
