//! The `Config` struct and its persistence helpers.
//!
//! Covers:
//! - `load` / `load_from` / `save_to` (YAML file I/O with atomic write)
//! - XDG-style path helpers (`config_path`, `config_dir`)
//! - `validate` for semantic checks that serde cannot express

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::ConfigError;
use crate::types::{FillColor, FontSource};

/// Rasterizer configuration.
///
/// Every field carries a serde default so partial YAML files load cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory or URL prefix that relative font URLs resolve against
    #[serde(default = "defaults::font_base")]
    pub font_base: String,

    /// Fonts loaded at startup, in order
    #[serde(default = "defaults::fonts")]
    pub fonts: Vec<FontSource>,

    /// Fill color used when rasterizing text
    #[serde(default = "defaults::fill_color")]
    pub fill_color: FillColor,

    /// Index system fonts as the fallback pool for unavailable families
    #[serde(default = "defaults::load_system_fonts")]
    pub load_system_fonts: bool,

    /// Permit plain `http://` font URLs
    #[serde(default = "defaults::allow_insecure_http")]
    pub allow_insecure_http: bool,

    /// Global timeout for a single font download
    #[serde(default = "defaults::http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Upper bound on the size of a single font file
    #[serde(default = "defaults::max_font_bytes")]
    pub max_font_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_base: defaults::font_base(),
            fonts: defaults::fonts(),
            fill_color: defaults::fill_color(),
            load_system_fonts: defaults::load_system_fonts(),
            allow_insecure_http: defaults::allow_insecure_http(),
            http_timeout_secs: defaults::http_timeout_secs(),
            max_font_bytes: defaults::max_font_bytes(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_base(mut self, font_base: impl Into<String>) -> Self {
        self.font_base = font_base.into();
        self
    }

    pub fn with_fonts(mut self, fonts: Vec<FontSource>) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_system_fonts(mut self, load_system_fonts: bool) -> Self {
        self.load_system_fonts = load_system_fonts;
        self
    }

    /// Load configuration from the default path, or return defaults if no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("glyph-raster")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("glyph-raster")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Check field values that serde accepts but the rasterizer cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (idx, source) in self.fonts.iter().enumerate() {
            if source.url.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "fonts[{idx}]: url must not be empty"
                )));
            }
            if source.family.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "fonts[{idx}]: family must not be empty (url '{}')",
                    source.url
                )));
            }
        }
        if self.http_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.max_font_bytes == 0 {
            return Err(ConfigError::Validation(
                "max_font_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
