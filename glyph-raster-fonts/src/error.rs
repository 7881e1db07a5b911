//! Typed error types for font retrieval and activation.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to make a font family available to the rasterizer.
#[derive(Debug, Error)]
pub enum FontLoadError {
    /// The font URL uses a scheme or form that is not permitted.
    #[error("Font URL '{url}' rejected: {reason}")]
    UrlRejected {
        /// The URL as given.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP request failed (DNS, connection, TLS, or non-2xx response).
    #[error("Failed to fetch font '{url}': {message}")]
    Fetch {
        /// The resolved URL.
        url: String,
        /// Human-readable transport error.
        message: String,
    },

    /// The font file could not be read from disk.
    #[error("Failed to read font file '{path}': {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The font file is larger than the configured limit.
    #[error("Font '{url}' exceeds the {limit} byte limit")]
    TooLarge {
        /// The URL or path of the oversized font.
        url: String,
        /// Configured byte limit.
        limit: u64,
    },

    /// The retrieved bytes are not a font that can be activated.
    #[error("Failed to load font: {url} (not a valid TrueType/OpenType font)")]
    Parse {
        /// The URL or path the bytes came from.
        url: String,
    },
}
