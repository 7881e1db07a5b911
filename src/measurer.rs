//! Synchronous text metrics: pixel width and cursor hit-testing.
//!
//! Nothing here is cached; every call measures through the drawing surface.

use glyph_raster_fonts::{FontDescriptor, resolve};

use crate::color_codes::strip_color_codes;
use crate::surface::DrawingSurface;

/// Text metrics over a drawing surface.
pub struct TextMeasurer<S> {
    surface: S,
}

impl<S: DrawingSurface> TextMeasurer<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Pixel width of `text` with color-escape codes removed.
    pub fn measure_width(&mut self, size: i32, font_id: i32, text: &str) -> f32 {
        let font = resolve(size, font_id);
        self.surface.measure_text(&font, &strip_color_codes(text))
    }

    /// Pixel width of `text` exactly as given, color codes included.
    pub fn measure_raw(&mut self, font: &FontDescriptor, text: &str) -> f32 {
        self.surface.measure_text(font, text)
    }

    /// Map a point inside a rendered, possibly multi-line string to a
    /// character offset into `text`.
    ///
    /// Each `\n`-separated line occupies a band `size` pixels tall; a
    /// `cursor_y` above the first or below the last line clamps to that
    /// line. Within the line the result is the shortest prefix whose width
    /// reaches `cursor_x`, or the whole line when none does. Prefix widths
    /// are measured without stripping color codes, so codes count as
    /// characters here. Offsets are in `char`s and include one per `\n` of
    /// the preceding lines.
    pub fn measure_cursor_index(
        &mut self,
        size: i32,
        font_id: i32,
        text: &str,
        cursor_x: f32,
        cursor_y: f32,
    ) -> usize {
        let font = resolve(size, font_id);
        let lines: Vec<&str> = text.split('\n').collect();
        let line_index = line_at(cursor_y, size, lines.len());
        let line = lines[line_index];

        // Byte offsets ending the prefixes of 0, 1, ..., n chars.
        let prefix_ends: Vec<usize> = line
            .char_indices()
            .map(|(byte_idx, _)| byte_idx)
            .chain(std::iter::once(line.len()))
            .collect();
        let char_count = prefix_ends.len() - 1;
        let index = prefix_ends
            .iter()
            .position(|&end| self.surface.measure_text(&font, &line[..end]) >= cursor_x)
            .unwrap_or(char_count);

        let preceding: usize = lines[..line_index]
            .iter()
            .map(|prev| prev.chars().count() + 1)
            .sum();
        preceding + index
    }
}

/// Line selected by a vertical coordinate, clamped to `0..line_count`.
fn line_at(cursor_y: f32, size: i32, line_count: usize) -> usize {
    let last = line_count.saturating_sub(1);
    if size <= 0 {
        return 0;
    }
    let band = (cursor_y / size as f32).clamp(0.0, last as f32).floor();
    // NaN saturates to 0.
    band as usize
}
