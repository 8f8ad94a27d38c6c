//! Tool defaults for the ink model
//!
//! Configuration can be created programmatically, read from a small TOML
//! file, or overridden through environment variables. [`InkConfig::load`]
//! layers all three.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::point_buffer::DEFAULT_GROWTH_CHUNK;
use crate::stroke::StrokeTool;

const ENV_PEN_WIDTH: &str = "INKPAGE_PEN_WIDTH";
const ENV_HIGHLIGHTER_WIDTH: &str = "INKPAGE_HIGHLIGHTER_WIDTH";
const ENV_ERASER_HALF_SIZE: &str = "INKPAGE_ERASER_HALF_SIZE";
const ENV_POINT_GROWTH_CHUNK: &str = "INKPAGE_POINT_GROWTH_CHUNK";

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid value for a configuration key
    #[error("Invalid value for configuration key: {0}")]
    InvalidValue(String),
    /// I/O error reading or writing the configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InkConfig {
    /// Nib width for new pen strokes
    pub pen_width: f64,
    /// Nib width for new highlighter strokes
    pub highlighter_width: f64,
    /// Half the side of the square eraser footprint
    pub eraser_half_size: f64,
    /// Point slots added each time a stroke's buffer fills
    pub point_growth_chunk: usize,
}

impl Default for InkConfig {
    fn default() -> Self {
        Self {
            pen_width: 0.8,
            highlighter_width: 7.0,
            eraser_half_size: 5.0,
            point_growth_chunk: DEFAULT_GROWTH_CHUNK,
        }
    }
}

impl InkConfig {
    pub fn with_pen_width(mut self, width: f64) -> Self {
        self.pen_width = width;
        self
    }

    pub fn with_highlighter_width(mut self, width: f64) -> Self {
        self.highlighter_width = width;
        self
    }

    pub fn with_eraser_half_size(mut self, half_size: f64) -> Self {
        self.eraser_half_size = half_size;
        self
    }

    pub fn with_point_growth_chunk(mut self, chunk: usize) -> Self {
        self.point_growth_chunk = chunk.max(1);
        self
    }

    /// Default nib width for strokes drawn with `tool`
    pub fn width_for(&self, tool: StrokeTool) -> f64 {
        match tool {
            StrokeTool::Highlighter => self.highlighter_width,
            StrokeTool::Pen | StrokeTool::Eraser => self.pen_width,
        }
    }

    /// Platform config file location
    ///
    /// - macOS: ~/Library/Application Support/inkpage/config.toml
    /// - Linux: ~/.config/inkpage/config.toml
    /// - Windows: %APPDATA%\inkpage\config.toml
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("inkpage").join("config.toml")
        } else {
            PathBuf::from("inkpage.toml")
        }
    }

    /// File at [`InkConfig::default_path`] if present, then env overrides
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        let base = if path.exists() { Self::from_file(&path)? } else { Self::default() };
        base.apply_env()
    }

    /// Defaults with environment overrides applied.
    ///
    /// Environment variables:
    /// - `INKPAGE_PEN_WIDTH`
    /// - `INKPAGE_HIGHLIGHTER_WIDTH`
    /// - `INKPAGE_ERASER_HALF_SIZE`
    /// - `INKPAGE_POINT_GROWTH_CHUNK`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env()
    }

    fn apply_env(mut self) -> Result<Self, ConfigError> {
        for key in [ENV_PEN_WIDTH, ENV_HIGHLIGHTER_WIDTH, ENV_ERASER_HALF_SIZE, ENV_POINT_GROWTH_CHUNK]
        {
            if let Ok(value) = std::env::var(key) {
                self.set(key, &value)?;
            }
        }
        Ok(self)
    }

    /// Loads configuration from a TOML file.
    ///
    /// Expected file format:
    /// ```toml
    /// pen_width = 0.8
    /// highlighter_width = 7.0
    /// eraser_half_size = 5.0
    /// point_growth_chunk = 100
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&contents)
    }

    fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for line in toml_str.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                config.set(key.trim(), value.trim().trim_matches('"'))?;
            }
        }

        Ok(config)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue(key.to_string());
        match key {
            "pen_width" | ENV_PEN_WIDTH => self.pen_width = parse_width(value).ok_or_else(invalid)?,
            "highlighter_width" | ENV_HIGHLIGHTER_WIDTH => {
                self.highlighter_width = parse_width(value).ok_or_else(invalid)?
            }
            "eraser_half_size" | ENV_ERASER_HALF_SIZE => {
                self.eraser_half_size = parse_width(value).ok_or_else(invalid)?
            }
            "point_growth_chunk" | ENV_POINT_GROWTH_CHUNK => {
                self.point_growth_chunk =
                    value.parse::<usize>().ok().filter(|&chunk| chunk > 0).ok_or_else(invalid)?
            }
            _ => tracing::debug!(key, "ignoring unknown configuration key"),
        }
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path.as_ref(), self.to_toml())?;
        Ok(())
    }

    fn to_toml(&self) -> String {
        format!(
            "# inkpage configuration\n\
             pen_width = {}\n\
             highlighter_width = {}\n\
             eraser_half_size = {}\n\
             point_growth_chunk = {}\n",
            self.pen_width, self.highlighter_width, self.eraser_half_size, self.point_growth_chunk
        )
    }
}

fn parse_width(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|w| *w > 0.0 && w.is_finite())
}
