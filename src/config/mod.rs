//! Configuration file support for chunkpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/chunkpad/config.toml`. Settings include the ink and brush
//! defaults, pointer scaling, where the save control writes, and where prints are sent.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ColorSpec, ExportFormat, PrintBodyFormat};
pub use types::{DrawingConfig, ExportConfig, InputConfig, PrintConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Brush radius accepted from the config file.
const BRUSH_RADIUS_RANGE: std::ops::RangeInclusive<u32> = 1..=64;
/// Text size accepted from the config file.
const FONT_SIZE_RANGE: std::ops::RangeInclusive<f64> = 8.0..=128.0;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// ink_color = "black"
/// brush_radius = 3
/// font_family = "Times"
///
/// [input]
/// scale_factor = 1.0
///
/// [export]
/// save_directory = "~/Pictures"
/// filename_template = "drawing-%Y%m%d"
///
/// [print]
/// endpoint = "http://127.0.0.1:5000/print_drawing"
/// body = "json"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Ink, brush and text defaults
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Pointer scaling
    #[serde(default)]
    pub input: InputConfig,

    /// Save control settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Print submission settings
    #[serde(default)]
    pub print: PrintConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced with the
    /// default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `brush_radius` / `max_brush_radius`: 1 - 64, and radius <= max
    /// - `font_size`: 8.0 - 128.0
    /// - `scale_factor`: finite and > 0
    /// - `filename_template`: non-empty, with only chrono format specifiers
    /// - `print.endpoint`: must be an absolute http(s) URL
    pub fn validate_and_clamp(&mut self) {
        let drawing = &mut self.drawing;

        if !BRUSH_RADIUS_RANGE.contains(&drawing.max_brush_radius) {
            log::warn!(
                "Invalid max_brush_radius {}, clamping to 1-64 range",
                drawing.max_brush_radius
            );
            drawing.max_brush_radius = drawing
                .max_brush_radius
                .clamp(*BRUSH_RADIUS_RANGE.start(), *BRUSH_RADIUS_RANGE.end());
        }

        if !(1..=drawing.max_brush_radius).contains(&drawing.brush_radius) {
            log::warn!(
                "Invalid brush_radius {}, clamping to 1-{} range",
                drawing.brush_radius,
                drawing.max_brush_radius
            );
            drawing.brush_radius = drawing.brush_radius.clamp(1, drawing.max_brush_radius);
        }

        if !FONT_SIZE_RANGE.contains(&drawing.font_size) {
            log::warn!(
                "Invalid font_size {:.1}, clamping to 8.0-128.0 range",
                drawing.font_size
            );
            drawing.font_size = if drawing.font_size.is_nan() {
                crate::draw::surface::DEFAULT_TEXT_SIZE
            } else {
                drawing
                    .font_size
                    .clamp(*FONT_SIZE_RANGE.start(), *FONT_SIZE_RANGE.end())
            };
        }

        let valid_weight = matches!(
            drawing.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                drawing.font_weight
            );
            drawing.font_weight = "normal".to_string();
        }

        if !matches!(
            drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                drawing.font_style
            );
            drawing.font_style = "normal".to_string();
        }

        let scale = self.input.scale_factor;
        if !(scale.is_finite() && scale > 0.0) {
            log::warn!("Invalid scale_factor {}, falling back to 1.0", scale);
            self.input.scale_factor = 1.0;
        }

        if self.export.filename_template.trim().is_empty() {
            log::warn!("Empty filename_template, falling back to 'drawing'");
            self.export.filename_template = "drawing".to_string();
        } else if !crate::export::is_valid_template(&self.export.filename_template) {
            log::warn!(
                "Invalid filename_template '{}', falling back to 'drawing'",
                self.export.filename_template
            );
            self.export.filename_template = "drawing".to_string();
        }

        let endpoint_ok = url::Url::parse(&self.print.endpoint)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https"));
        if !endpoint_ok {
            log::warn!(
                "Invalid print endpoint '{}', falling back to default",
                self.print.endpoint
            );
            self.print.endpoint = types::default_print_endpoint();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/chunkpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("chunkpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit file.
    ///
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to `~/.config/chunkpad/config.toml`.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    /// Serializes the configuration to TOML at `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").expect("parse");
        assert_eq!(config.drawing.brush_radius, 3);
        assert_eq!(config.drawing.max_brush_radius, 16);
        assert_eq!(config.drawing.font_family, "Times");
        assert_eq!(config.drawing.font_size, 54.0);
        assert_eq!(config.input.scale_factor, 1.0);
        assert_eq!(config.export.filename_template, "drawing");
        assert_eq!(config.print.endpoint, "http://127.0.0.1:5000/print_drawing");
        assert_eq!(config.print.body, PrintBodyFormat::Json);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [drawing]
            ink_color = [10, 20, 30]
            brush_radius = 5

            [print]
            body = "multipart"
            "#,
        )
        .expect("parse");
        assert_eq!(config.drawing.ink_color, ColorSpec::Rgb([10, 20, 30]));
        assert_eq!(config.drawing.brush_radius, 5);
        assert_eq!(config.drawing.font_style, "normal");
        assert_eq!(config.print.body, PrintBodyFormat::Multipart);
        assert_eq!(config.export.format, ExportFormat::Png);
    }

    #[test]
    fn validate_clamps_out_of_range_values() {
        let mut config = Config::default();
        config.drawing.max_brush_radius = 500;
        config.drawing.brush_radius = 0;
        config.drawing.font_size = 2.0;
        config.drawing.font_weight = "chunky".into();
        config.input.scale_factor = -3.0;
        config.print.endpoint = "not a url".into();

        config.validate_and_clamp();

        assert_eq!(config.drawing.max_brush_radius, 64);
        assert_eq!(config.drawing.brush_radius, 1);
        assert_eq!(config.drawing.font_size, 8.0);
        assert_eq!(config.drawing.font_weight, "normal");
        assert_eq!(config.input.scale_factor, 1.0);
        assert_eq!(config.print.endpoint, types::default_print_endpoint());
    }

    #[test]
    fn unknown_template_specifier_falls_back_to_default_name() {
        let mut config = Config::default();
        config.export.filename_template = "drawing_%Q".into();
        config.validate_and_clamp();
        assert_eq!(config.export.filename_template, "drawing");

        config.export.filename_template = "sketch_%Y%m%d".into();
        config.validate_and_clamp();
        assert_eq!(config.export.filename_template, "sketch_%Y%m%d");
    }

    #[test]
    fn brush_radius_is_bounded_by_max() {
        let mut config = Config::default();
        config.drawing.max_brush_radius = 4;
        config.drawing.brush_radius = 9;
        config.validate_and_clamp();
        assert_eq!(config.drawing.brush_radius, 4);
    }

    #[test]
    fn save_then_load_from_preserves_settings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.drawing.brush_radius = 7;
        config.print.endpoint = "https://printer.local/print_drawing".into();
        config.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.drawing.brush_radius, 7);
        assert_eq!(loaded.print.endpoint, "https://printer.local/print_drawing");
    }

    #[test]
    fn load_from_reports_bad_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[drawing\nbrush_radius = ").expect("write");

        let err = Config::load_from(&path).expect_err("invalid toml");
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn schema_names_every_section() {
        let schema = serde_json::to_value(Config::json_schema()).expect("schema json");
        let properties = schema["properties"].as_object().expect("properties");
        for section in ["drawing", "input", "export", "print"] {
            assert!(properties.contains_key(section), "missing {section}");
        }
    }
}
