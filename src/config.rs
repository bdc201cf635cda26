use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::{
    composition::{CanvasSize, Color, LayoutProfile},
    error::{ConfigError, Result},
    export::{ExportFormat, MAX_QUALITY, MIN_QUALITY},
};

/// Main configuration for the Creative Compositor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default canvas dimensions
    pub canvas: CanvasSize,

    /// Font lookup settings
    pub fonts: FontConfig,

    /// Layout profiles for the full render and the preview
    pub profiles: ProfilesConfig,

    /// Text and value tile colors
    pub palette: PaletteConfig,

    /// Export defaults
    pub export: ExportConfig,

    /// Placeholder assistant settings
    pub assistant: AssistantConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::InvalidValue {
                key: "canvas".to_string(),
                value: self.canvas.to_string()
            }.into());
        }

        self.profiles.final_render.validate("profiles.final")?;
        self.profiles.preview.validate("profiles.preview")?;
        self.export.validate()?;
        Ok(())
    }
}

/// Font fallback chain
///
/// Candidates are tried in order; the built-in bitmap face is used when none
/// of them loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    pub candidates: Vec<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            candidates: [
                "arial.ttf",
                "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/System/Library/Fonts/Supplemental/Arial.ttf",
                "/Library/Fonts/Arial.ttf",
                "C:\\Windows\\Fonts\\arial.ttf",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
        }
    }
}

/// The two layout profiles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilesConfig {
    #[serde(rename = "final")]
    pub final_render: LayoutProfile,
    pub preview: LayoutProfile,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            final_render: LayoutProfile::final_render(),
            preview: LayoutProfile::preview(),
        }
    }
}

/// Colors of everything drawn over the background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    pub headline: Color,
    pub subhead: Color,
    pub tag_line: Color,
    pub tile_fill: Color,
    pub tile_outline: Color,
    pub tile_text: Color,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            headline: Color::BRAND_RED,
            subhead: Color::BRAND_BLUE,
            tag_line: Color::BLACK,
            tile_fill: Color::BRAND_RED,
            tile_outline: Color::BLACK,
            tile_text: Color::WHITE,
        }
    }
}

/// Export defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,

    /// JPEG quality (50-100)
    pub quality: u8,

    /// Delivery size limit in kilobytes
    pub size_limit_kb: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Jpeg,
            quality: 85,
            size_limit_kb: 500,
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<()> {
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&self.quality) {
            return Err(ConfigError::InvalidValue {
                key: "export.quality".to_string(),
                value: self.quality.to_string()
            }.into());
        }

        if self.size_limit_kb == 0 {
            return Err(ConfigError::InvalidValue {
                key: "export.size_limit_kb".to_string(),
                value: self.size_limit_kb.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Placeholder assistant settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Artificial delay before placeholder actions report back (milliseconds)
    pub simulated_latency_ms: u64,
}
