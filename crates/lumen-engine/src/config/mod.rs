//! TOML configuration.
//!
//! Every field has a default, so an empty file (or no file) is a valid config.
//! Camera planes, field of view and colours here are example settings
//! for the scenes, not contractual values.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::paint::Color;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LumenConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub logging: LoggingSection,
    /// Scene to run, for binaries that host several.
    #[serde(default)]
    pub scene: Option<String>,
}

impl LumenConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid lumen config")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    ///
    /// A present but malformed file is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_title() -> String {
    "lumen".to_string()
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_fov")]
    pub fov_y_deg: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default = "default_position")]
    pub position: [f32; 3],
}

fn default_fov() -> f32 {
    75.0
}

fn default_near() -> f32 {
    0.1
}

fn default_far() -> f32 {
    100.0
}

fn default_position() -> [f32; 3] {
    [0.0, 0.0, 3.0]
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: default_fov(),
            near: default_near(),
            far: default_far(),
            position: default_position(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// `#rrggbb` / `#rrggbbaa`.
    #[serde(default = "default_clear_color")]
    pub clear_color: String,
}

fn default_clear_color() -> String {
    "#000000".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: default_clear_color(),
        }
    }
}

impl RenderConfig {
    /// Parsed clear colour; malformed values fall back to black with a warning.
    pub fn clear_color(&self) -> Color {
        Color::from_hex(&self.clear_color).unwrap_or_else(|| {
            log::warn!("invalid clear_color {:?}, using black", self.clear_color);
            Color::BLACK
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// `env_logger` filter string, e.g. `"info,wgpu_core=warn"`.
    #[serde(default)]
    pub filter: Option<String>,
}
