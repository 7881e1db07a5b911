use glyph_raster_config::{Config, ConfigError, FillColor, FontSource};
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.font_base, "fonts");
    assert_eq!(config.fonts.len(), 3);
    assert_eq!(config.fonts[0].family, "Liberation Sans");
    assert_eq!(config.fonts[1].family, "Liberation Sans Bold");
    assert_eq!(config.fonts[2].family, "Bitstream Vera Mono");
    assert_eq!(config.fill_color, FillColor::WHITE);
    assert!(config.load_system_fonts);
    assert!(!config.allow_insecure_http);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_save_and_load_from() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("nested").join("config.yaml");

    let config = Config::new()
        .with_font_base("/usr/share/fonts/custom")
        .with_fonts(vec![FontSource::new("Mono.ttf", "Bitstream Vera Mono")])
        .with_system_fonts(false);
    config.save_to(&path).expect("save config");

    assert!(path.exists());
    assert!(!path.with_extension("yaml.tmp").exists());

    let loaded = Config::load_from(&path).expect("load config");
    assert_eq!(loaded, config);
}

#[test]
fn test_load_from_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.yaml");
    std::fs::write(&path, "fonts: [this is: not valid").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_load_from_rejects_invalid_values() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.yaml");
    std::fs::write(&path, "max_font_bytes: 0\n").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn test_load_from_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = Config::load_from(&temp_dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
