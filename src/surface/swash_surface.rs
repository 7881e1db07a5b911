//! CPU drawing surface backed by the font registry and swash.

use std::sync::Arc;

use glyph_raster_config::FillColor;
use glyph_raster_fonts::{FontDescriptor, FontRegistry};
use swash::FontRef;
use swash::scale::image::Content;
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::{Format, Placement, Vector};

use super::{Canvas, DrawingSurface};
use crate::error::RasterError;

/// Measures and fills text using faces from a [`FontRegistry`].
///
/// Families the registry cannot supply are rendered with whatever
/// substitute it picks.
pub struct SwashSurface {
    registry: Arc<FontRegistry>,
    context: ScaleContext,
}

impl SwashSurface {
    /// Acquire a surface over `registry`.
    ///
    /// Fails when the registry has no face at all to render with.
    pub fn new(registry: Arc<FontRegistry>) -> Result<Self, RasterError> {
        if !registry.has_faces() {
            return Err(RasterError::SurfaceUnavailable(
                "font registry has no faces; load fonts or enable system fonts".to_string(),
            ));
        }
        Ok(Self {
            registry,
            context: ScaleContext::new(),
        })
    }
}

impl DrawingSurface for SwashSurface {
    fn measure_text(&mut self, font: &FontDescriptor, text: &str) -> f32 {
        if font.pixel_size <= 0 || text.is_empty() {
            return 0.0;
        }
        let Some(font_data) = self.registry.face(font.family_name) else {
            return 0.0;
        };
        text_advance(font_data.font_ref(), font.pixel_size as f32, text)
    }

    fn fill_text(
        &mut self,
        font: &FontDescriptor,
        text: &str,
        width: u32,
        height: u32,
        fill: FillColor,
    ) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        if font.pixel_size <= 0 {
            return canvas;
        }
        let Some(font_data) = self.registry.face(font.family_name) else {
            log::warn!("No face available for {}, leaving canvas empty", font);
            return canvas;
        };

        let font_ref = font_data.font_ref();
        let size = font.pixel_size as f32;
        let metrics = font_ref.metrics(&[]);
        if metrics.units_per_em == 0 {
            return canvas;
        }
        let scale = size / metrics.units_per_em as f32;
        let baseline = (height as f32 - metrics.descent * scale).round() as i32;

        let charmap = font_ref.charmap();
        let glyph_metrics = font_ref.glyph_metrics(&[]);
        let mut scaler = self.context.builder(font_ref).size(size).hint(false).build();

        let mut pen_x = 0.0f32;
        for ch in text.chars() {
            let glyph_id = charmap.map(ch);
            let image = Render::new(&[Source::Outline])
                .format(Format::Alpha)
                .offset(Vector::new(pen_x.fract(), 0.0))
                .render(&mut scaler, glyph_id);
            if let Some(image) = image
                && matches!(image.content, Content::Mask)
            {
                blit_mask(
                    &mut canvas,
                    &image.data,
                    image.placement,
                    pen_x.floor() as i32,
                    baseline,
                    fill,
                );
            }
            pen_x += glyph_metrics.advance_width(glyph_id) * scale;
        }

        canvas
    }
}

/// Sum of glyph advances for `text` at `size` pixels per em.
fn text_advance(font: FontRef<'_>, size: f32, text: &str) -> f32 {
    let units_per_em = font.metrics(&[]).units_per_em;
    if units_per_em == 0 {
        return 0.0;
    }
    let scale = size / units_per_em as f32;
    let charmap = font.charmap();
    let glyph_metrics = font.glyph_metrics(&[]);
    text.chars()
        .map(|ch| glyph_metrics.advance_width(charmap.map(ch)) * scale)
        .sum()
}

/// Composite an alpha coverage mask onto `canvas` in the fill color.
///
/// `origin_x` is the pen position and `baseline_y` the baseline row; the
/// placement offsets are relative to both. Pixels outside the canvas are
/// clipped.
fn blit_mask(
    canvas: &mut Canvas,
    mask: &[u8],
    placement: Placement,
    origin_x: i32,
    baseline_y: i32,
    fill: FillColor,
) {
    if placement.width == 0 || placement.height == 0 {
        return;
    }
    let x0 = origin_x + placement.left;
    let y0 = baseline_y - placement.top;
    let (canvas_width, canvas_height) = canvas.dimensions();

    for (row, coverage_row) in mask
        .chunks_exact(placement.width as usize)
        .take(placement.height as usize)
        .enumerate()
    {
        let y = y0 + row as i32;
        if y < 0 || y >= canvas_height as i32 {
            continue;
        }
        for (col, &coverage) in coverage_row.iter().enumerate() {
            let x = x0 + col as i32;
            if x < 0 || x >= canvas_width as i32 || coverage == 0 {
                continue;
            }
            let alpha = (coverage as u16 * fill.a as u16 / 255) as u8;
            let pixel = canvas.get_pixel_mut(x as u32, y as u32);
            pixel.0 = [fill.r, fill.g, fill.b, pixel.0[3].max(alpha)];
        }
    }
}
