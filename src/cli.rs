//! Command-line interface for the glyph-raster demo binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// glyph-raster - measure and rasterize text with the configured fonts
#[derive(Parser, Debug)]
#[command(name = "glyph-raster")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.config/glyph-raster/config.yaml
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (0-4 or off/error/warn/info/debug/trace)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,
}

/// Text selection shared by every subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct TextArgs {
    /// Line height in pixels; fonts render at size - 2
    #[arg(short, long, default_value_t = 16)]
    pub size: i32,

    /// Font id: 1 = sans, 2 = sans bold, anything else = mono
    #[arg(short, long, default_value_t = 0)]
    pub font: i32,

    /// Text to measure or render; use \n for line breaks in `cursor`
    pub text: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the pixel width of TEXT with color codes stripped
    Measure {
        #[command(flatten)]
        text: TextArgs,
    },

    /// Print the character index under a point in TEXT
    Cursor {
        #[command(flatten)]
        text: TextArgs,

        /// Horizontal coordinate in pixels
        #[arg(short = 'x', long, allow_negative_numbers = true)]
        cursor_x: f32,

        /// Vertical coordinate in pixels
        #[arg(short = 'y', long, allow_negative_numbers = true)]
        cursor_y: f32,
    },

    /// Rasterize TEXT and write the bitmap as a PNG
    Render {
        #[command(flatten)]
        text: TextArgs,

        /// Output PNG path
        #[arg(short, long, default_value = "text.png")]
        out: PathBuf,
    },
}

/// Expand the two-character sequence `\n` into a newline.
pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cursor_command() {
        let cli = Cli::parse_from([
            "glyph-raster",
            "cursor",
            "--size",
            "20",
            "-x",
            "12.5",
            "-y",
            "-4",
            "ab\\ncd",
        ]);
        match cli.command {
            Commands::Cursor {
                text,
                cursor_x,
                cursor_y,
            } => {
                assert_eq!(text.size, 20);
                assert_eq!(text.font, 0);
                assert_eq!(cursor_x, 12.5);
                assert_eq!(cursor_y, -4.0);
                assert_eq!(unescape_newlines(&text.text), "ab\ncd");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "glyph-raster",
            "measure",
            "hello",
            "--log-level",
            "debug",
            "--config",
            "/tmp/c.yaml",
        ]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.yaml")));
    }
}
