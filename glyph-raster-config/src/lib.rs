//! Configuration system for the glyph-raster text rasterizer.
//!
//! This crate provides configuration loading, saving, and default values:
//!
//! - Font sources (URL or path plus the family alias to register them under)
//! - Rasterizer fill color
//! - Network policy for remote font retrieval

pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::{FillColor, FontSource};
