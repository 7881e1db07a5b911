//! Fixed mapping from `(size, font_id)` to a concrete font descriptor.

use std::fmt;

/// Pixels subtracted from the requested size for visual alignment.
pub const SIZE_CORRECTION: i32 = 2;

/// The three faces the rasterizer knows about.
///
/// Unknown font ids resolve to [`FontFace::Mono`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Sans,
    SansBold,
    Mono,
}

impl FontFace {
    pub fn from_id(font_id: i32) -> Self {
        match font_id {
            1 => FontFace::Sans,
            2 => FontFace::SansBold,
            _ => FontFace::Mono,
        }
    }

    pub fn family_name(self) -> &'static str {
        match self {
            FontFace::Sans => "Liberation Sans",
            FontFace::SansBold => "Liberation Sans Bold",
            FontFace::Mono => "Bitstream Vera Mono",
        }
    }
}

/// Family name plus pixel size, as handed to a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontDescriptor {
    pub family_name: &'static str,
    pub pixel_size: i32,
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.pixel_size, self.family_name)
    }
}

/// Resolve a requested text size and font id to a font descriptor.
pub fn resolve(size: i32, font_id: i32) -> FontDescriptor {
    FontDescriptor {
        family_name: FontFace::from_id(font_id).family_name(),
        pixel_size: size - SIZE_CORRECTION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_sans() {
        assert_eq!(
            resolve(20, 1),
            FontDescriptor {
                family_name: "Liberation Sans",
                pixel_size: 18
            }
        );
    }

    #[test]
    fn test_resolve_bold() {
        let font = resolve(14, 2);
        assert_eq!(font.family_name, "Liberation Sans Bold");
        assert_eq!(font.pixel_size, 12);
    }

    #[test]
    fn test_unknown_ids_fall_back_to_mono() {
        for font_id in [0, 3, 99, -1] {
            assert_eq!(
                resolve(20, font_id),
                FontDescriptor {
                    family_name: "Bitstream Vera Mono",
                    pixel_size: 18
                }
            );
        }
    }

    #[test]
    fn test_descriptor_display() {
        assert_eq!(resolve(16, 1).to_string(), "14px Liberation Sans");
    }
}
