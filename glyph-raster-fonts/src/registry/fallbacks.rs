//! Substitution chain used when a requested family is not available.

/// System families tried, in order, for a family that was never loaded.
///
/// Sans families come first because two of the three catalog faces are
/// sans; the monospace entries cover the default face.
pub const FALLBACK_FAMILIES: &[&str] = &[
    "Liberation Sans",
    "Arimo",
    "DejaVu Sans",
    "Arial",
    "Helvetica",
    "Noto Sans",
    "Bitstream Vera Sans",
    "DejaVu Sans Mono",
    "Liberation Mono",
    "Menlo",
    "Consolas",
    "Courier New",
];
