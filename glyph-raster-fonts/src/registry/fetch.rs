//! Font byte retrieval from URLs and filesystem paths.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use glyph_raster_config::Config;
use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};
use url::Url;

use crate::error::FontLoadError;

/// Retrieves raw font bytes for a font URL.
///
/// The registry only needs bytes; implementations decide where they come from.
pub trait FontFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FontLoadError>;
}

/// Fetches `https://` URLs over the network and everything else from disk.
///
/// Relative URLs resolve against `base`, which is either a URL prefix or a
/// directory. A leading `/` on a relative URL is origin-relative when `base`
/// is a URL, matching browser semantics.
#[derive(Debug, Clone)]
pub struct DefaultFontFetcher {
    base: String,
    allow_insecure_http: bool,
    timeout: Duration,
    max_bytes: u64,
}

impl DefaultFontFetcher {
    pub fn new(base: impl Into<String>) -> Self {
        let defaults = Config::default();
        Self {
            base: base.into(),
            allow_insecure_http: defaults.allow_insecure_http,
            timeout: Duration::from_secs(defaults.http_timeout_secs),
            max_bytes: defaults.max_font_bytes,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            base: config.font_base.clone(),
            allow_insecure_http: config.allow_insecure_http,
            timeout: Duration::from_secs(config.http_timeout_secs),
            max_bytes: config.max_font_bytes,
        }
    }

    /// Classify `url` into a network URL or a local path.
    pub fn locate(&self, url: &str) -> Result<FontLocation, FontLoadError> {
        match Url::parse(url) {
            // Single-letter schemes are Windows drive letters, not URLs.
            Ok(parsed) if parsed.scheme().len() > 1 => self.locate_url(url, parsed),
            Ok(_) => Ok(FontLocation::Path(PathBuf::from(url))),
            Err(url::ParseError::RelativeUrlWithoutBase) => self.locate_relative(url),
            Err(e) => Err(FontLoadError::UrlRejected {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn locate_relative(&self, url: &str) -> Result<FontLocation, FontLoadError> {
        match Url::parse(&self.base) {
            Ok(base) if base.scheme().len() > 1 => {
                let joined = base.join(url).map_err(|e| FontLoadError::UrlRejected {
                    url: url.to_string(),
                    reason: format!("cannot resolve against '{}': {}", self.base, e),
                })?;
                self.locate_url(joined.as_str(), joined.clone())
            }
            _ if Path::new(url).is_absolute() => Ok(FontLocation::Path(PathBuf::from(url))),
            _ => Ok(FontLocation::Path(Path::new(&self.base).join(url))),
        }
    }

    fn locate_url(&self, url: &str, parsed: Url) -> Result<FontLocation, FontLoadError> {
        match parsed.scheme() {
            "https" => Ok(FontLocation::Remote(parsed)),
            "http" if self.allow_insecure_http => Ok(FontLocation::Remote(parsed)),
            "http" => Err(FontLoadError::UrlRejected {
                url: url.to_string(),
                reason: "plain HTTP is disabled; set allow_insecure_http to permit it"
                    .to_string(),
            }),
            "file" => parsed
                .to_file_path()
                .map(FontLocation::Path)
                .map_err(|_| FontLoadError::UrlRejected {
                    url: url.to_string(),
                    reason: "file URL does not name a local path".to_string(),
                }),
            scheme => Err(FontLoadError::UrlRejected {
                url: url.to_string(),
                reason: format!("unsupported scheme '{scheme}'"),
            }),
        }
    }

    fn agent(&self) -> Agent {
        let tls_config = TlsConfig::builder()
            .provider(TlsProvider::NativeTls)
            .root_certs(RootCerts::PlatformVerifier)
            .build();

        Agent::config_builder()
            .tls_config(tls_config)
            .timeout_global(Some(self.timeout))
            .build()
            .into()
    }

    fn download(&self, url: &Url) -> Result<Vec<u8>, FontLoadError> {
        log::debug!("Downloading font from {}", url);
        let bytes = self
            .agent()
            .get(url.as_str())
            .header("User-Agent", "glyph-raster")
            .call()
            .map_err(|e| FontLoadError::Fetch {
                url: url.to_string(),
                message: e.to_string(),
            })?
            .into_body()
            .with_config()
            .limit(self.max_bytes)
            .read_to_vec()
            .map_err(|e| FontLoadError::Fetch {
                url: url.to_string(),
                message: format!("failed to read response body: {e}"),
            })?;
        Ok(bytes)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FontLoadError> {
        let io_err = |source| FontLoadError::Io {
            path: path.to_path_buf(),
            source,
        };
        let len = fs::metadata(path).map_err(io_err)?.len();
        if len > self.max_bytes {
            return Err(FontLoadError::TooLarge {
                url: path.display().to_string(),
                limit: self.max_bytes,
            });
        }
        fs::read(path).map_err(io_err)
    }
}

impl FontFetcher for DefaultFontFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FontLoadError> {
        match self.locate(url)? {
            FontLocation::Remote(remote) => self.download(&remote),
            FontLocation::Path(path) => self.read_file(&path),
        }
    }
}

/// Where a font URL points after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontLocation {
    Remote(Url),
    Path(PathBuf),
}
