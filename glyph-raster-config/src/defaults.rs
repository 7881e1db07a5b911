//! Default values for configuration fields.

use crate::types::{FillColor, FontSource};

pub fn font_base() -> String {
    "fonts".to_string()
}

/// The three families the font catalog resolves to.
pub fn fonts() -> Vec<FontSource> {
    vec![
        FontSource::new("LiberationSans-Regular.ttf", "Liberation Sans"),
        FontSource::new("LiberationSans-Bold.ttf", "Liberation Sans Bold"),
        FontSource::new("VeraMono.ttf", "Bitstream Vera Mono"),
    ]
}

pub fn fill_color() -> FillColor {
    FillColor::WHITE
}

pub fn load_system_fonts() -> bool {
    true
}

pub fn allow_insecure_http() -> bool {
    false
}

pub fn http_timeout_secs() -> u64 {
    30
}

pub fn max_font_bytes() -> u64 {
    20 * 1024 * 1024
}
