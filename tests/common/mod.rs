//! Shared integration test helpers for glyph-raster.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::FixedPitchSurface;
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers is used per file.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use glyph_raster::{Canvas, DrawingSurface, FillColor, FontDescriptor};

/// Deterministic surface: every char advances half the pixel size, and
/// `fill_text` paints the whole canvas in the fill color.
#[derive(Default)]
pub struct FixedPitchSurface {
    fills: Arc<AtomicUsize>,
    pub fonts_filled: Vec<FontDescriptor>,
}

impl FixedPitchSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared counter of `fill_text` calls, readable after the surface is moved.
    pub fn fill_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fills)
    }

    pub fn advance(font: &FontDescriptor) -> f32 {
        font.pixel_size as f32 / 2.0
    }
}

impl DrawingSurface for FixedPitchSurface {
    fn measure_text(&mut self, font: &FontDescriptor, text: &str) -> f32 {
        text.chars().count() as f32 * Self::advance(font)
    }

    fn fill_text(
        &mut self,
        font: &FontDescriptor,
        _text: &str,
        width: u32,
        height: u32,
        fill: FillColor,
    ) -> Canvas {
        self.fills.fetch_add(1, Ordering::SeqCst);
        self.fonts_filled.push(*font);
        Canvas::from_pixel(width, height, image::Rgba(fill.to_array()))
    }
}

/// Invalidation callback paired with a counter of how often it fired.
pub fn counting_invalidator() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    (count, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

/// First TrueType font found in the usual system locations, if any.
pub fn find_system_ttf() -> Option<PathBuf> {
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];
    CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}
