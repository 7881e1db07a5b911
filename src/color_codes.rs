//! Inline color-escape codes.
//!
//! A code is a caret followed by one decimal digit (`^3`) or by `x`/`X` and
//! exactly six hex digits (`^xFF8800`). Codes are stripped before width
//! measurement only; cursor hit-testing and rasterization see them as
//! literal characters.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

static COLOR_CODE_REGEX: OnceLock<Regex> = OnceLock::new();

fn color_code_regex() -> &'static Regex {
    COLOR_CODE_REGEX.get_or_init(|| {
        Regex::new(r"\^[0-9]|\^[xX][0-9a-fA-F]{6}").expect("Failed to compile color code regex")
    })
}

/// Remove every color-escape code from `text`.
///
/// Borrows when `text` contains no codes.
pub fn strip_color_codes(text: &str) -> Cow<'_, str> {
    color_code_regex().replace_all(text, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_digit_codes() {
        assert_eq!(strip_color_codes("^1red ^7white"), "red white");
    }

    #[test]
    fn test_strip_hex_codes() {
        assert_eq!(strip_color_codes("^xFF8800orange^X00ff00green"), "orangegreen");
    }

    #[test]
    fn test_short_hex_is_literal() {
        // Five hex digits is not a hex code; `^x` is then left alone too.
        assert_eq!(strip_color_codes("^xABCDE!"), "^xABCDE!");
    }

    #[test]
    fn test_lone_caret_is_literal() {
        assert_eq!(strip_color_codes("a^b^"), "a^b^");
    }

    #[test]
    fn test_no_codes_borrows() {
        assert!(matches!(strip_color_codes("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_adjacent_codes() {
        assert_eq!(strip_color_codes("^1^2^x123456x"), "x");
        assert_eq!(strip_color_codes("^9"), "");
    }
}
