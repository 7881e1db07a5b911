//! 2D drawing surfaces used for text measurement and rasterization.
//!
//! A surface measures text and fills text into an RGBA canvas. The measurer
//! and raster cache are generic over [`DrawingSurface`] so headless builds
//! and tests can supply their own.

mod swash_surface;

use glyph_raster_config::FillColor;
use glyph_raster_fonts::FontDescriptor;

pub use swash_surface::SwashSurface;

/// Straight-alpha RGBA pixels produced by [`DrawingSurface::fill_text`].
pub type Canvas = image::RgbaImage;

pub trait DrawingSurface {
    /// Rendered advance width of `text` in pixels.
    fn measure_text(&mut self, font: &FontDescriptor, text: &str) -> f32;

    /// Fill `text` into a fresh `width` x `height` canvas.
    ///
    /// Text starts at `x = 0` with a bottom baseline at `y = height`: the
    /// bottom of the font's descent sits on the last row.
    fn fill_text(
        &mut self,
        font: &FontDescriptor,
        text: &str,
        width: u32,
        height: u32,
        fill: FillColor,
    ) -> Canvas;
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for Box<S> {
    fn measure_text(&mut self, font: &FontDescriptor, text: &str) -> f32 {
        (**self).measure_text(font, text)
    }

    fn fill_text(
        &mut self,
        font: &FontDescriptor,
        text: &str,
        width: u32,
        height: u32,
        fill: FillColor,
    ) -> Canvas {
        (**self).fill_text(font, text, width, height, fill)
    }
}
