//! Plain data types referenced by [`Config`](crate::Config).

use serde::{Deserialize, Serialize};

/// A font file to make available to the rasterizer under a family alias.
///
/// `url` may be an `https://` URL, a `file://` URL, or a filesystem path.
/// Relative paths are resolved against [`Config::font_base`](crate::Config).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSource {
    pub url: String,
    pub family: String,
}

impl FontSource {
    pub fn new(url: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            family: family.into(),
        }
    }
}

/// Straight-alpha RGBA color, serialized as a `[r, g, b, a]` sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct FillColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl FillColor {
    pub const WHITE: FillColor = FillColor {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for FillColor {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        FillColor { r, g, b, a }
    }
}

impl From<FillColor> for [u8; 4] {
    fn from(color: FillColor) -> Self {
        color.to_array()
    }
}
