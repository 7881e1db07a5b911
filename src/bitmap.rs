//! Finished text bitmaps handed to the texture-upload stage.

use std::fmt;

use bitflags::bitflags;

use crate::surface::Canvas;

bitflags! {
    /// Hints for the texture-upload stage.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureFlags: u32 {
        /// Do not generate mipmaps
        const NO_MIPMAP = 1 << 0;
        /// Clamp sampling to the edge texels
        const CLAMP_TO_EDGE = 1 << 1;
    }
}

impl TextureFlags {
    /// Flags attached to every text bitmap.
    pub const TEXT: TextureFlags = TextureFlags::NO_MIPMAP.union(TextureFlags::CLAMP_TO_EDGE);
}

/// A rasterized string, immutable once produced.
///
/// `id` equals the cache key it was produced for, so the upload stage can
/// use it as a texture identity.
pub struct Bitmap {
    pub id: String,
    pub pixels: Canvas,
    pub flags: TextureFlags,
}

impl Bitmap {
    /// Convert a filled canvas into an upload-ready bitmap.
    ///
    /// Pixels are premultiplied by alpha, the layout texture uploads expect.
    pub fn from_canvas(id: impl Into<String>, mut canvas: Canvas) -> Self {
        for pixel in canvas.pixels_mut() {
            let [r, g, b, a] = pixel.0;
            pixel.0 = [premultiply(r, a), premultiply(g, a), premultiply(b, a), a];
        }
        Bitmap {
            id: id.into(),
            pixels: canvas,
            flags: TextureFlags::TEXT,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Copy of the pixels with premultiplication undone, for straight-alpha
    /// image formats such as PNG.
    pub fn to_straight_alpha(&self) -> Canvas {
        let mut canvas = self.pixels.clone();
        for pixel in canvas.pixels_mut() {
            let [r, g, b, a] = pixel.0;
            pixel.0 = [unpremultiply(r, a), unpremultiply(g, a), unpremultiply(b, a), a];
        }
        canvas
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("id", &self.id)
            .field("width", &self.width())
            .field("height", &self.height())
            .field("flags", &self.flags)
            .finish()
    }
}

fn premultiply(channel: u8, alpha: u8) -> u8 {
    ((channel as u16 * alpha as u16 + 127) / 255) as u8
}

fn unpremultiply(channel: u8, alpha: u8) -> u8 {
    if alpha == 0 {
        return 0;
    }
    ((channel as u32 * 255 + alpha as u32 / 2) / alpha as u32).min(255) as u8
}
