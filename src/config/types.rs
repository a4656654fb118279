//! Configuration type definitions.

use super::enums::{ColorSpec, ExportFormat, PrintBodyFormat};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the ink, brush and text style of a fresh drawing session.
/// The brush radius can still be changed at runtime with `+`/`-`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Ink color - either a named color (black, white, red, green, blue)
    /// or an RGB array like `[0, 0, 0]`
    #[serde(default = "default_ink_color")]
    pub ink_color: ColorSpec,

    /// Initial brush radius in 2px brush pixels (valid range: 1 - 64)
    #[serde(default = "default_brush_radius")]
    pub brush_radius: u32,

    /// Largest radius the `+` key may grow the brush to (valid range: 1 - 64)
    #[serde(default = "default_max_brush_radius")]
    pub max_brush_radius: u32,

    /// Font family for committed text (e.g., "Times", "Sans", "Monospace")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", 400, 700)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,

    /// Text size in pixels (valid range: 8.0 - 128.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            ink_color: default_ink_color(),
            brush_radius: default_brush_radius(),
            max_brush_radius: default_max_brush_radius(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
            font_size: default_font_size(),
        }
    }
}

/// Pointer input settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InputConfig {
    /// Displayed size of the surface divided by its native size. 1.0 means the
    /// surface is shown at 576px; 0.5 means it is shown at half size.
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            scale_factor: default_scale_factor(),
        }
    }
}

/// Local download settings for the save control.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory the drawing is written to (`~` expands to the home directory)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// File name without extension; chrono format specifiers such as `%Y-%m-%d` are expanded
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Output format
    #[serde(default)]
    pub format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
            format: ExportFormat::default(),
        }
    }
}

/// Print submission settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PrintConfig {
    /// Endpoint the drawing is POSTed to
    #[serde(default = "default_print_endpoint")]
    pub endpoint: String,

    /// Request body encoding: "json" (data URL) or "multipart"
    #[serde(default)]
    pub body: PrintBodyFormat,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            endpoint: default_print_endpoint(),
            body: PrintBodyFormat::default(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_ink_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_brush_radius() -> u32 {
    crate::input::state::DEFAULT_BRUSH_RADIUS
}

fn default_max_brush_radius() -> u32 {
    crate::input::state::DEFAULT_MAX_BRUSH_RADIUS
}

fn default_font_family() -> String {
    "Times".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_font_size() -> f64 {
    crate::draw::surface::DEFAULT_TEXT_SIZE
}

fn default_scale_factor() -> f64 {
    1.0
}

fn default_save_directory() -> String {
    ".".to_string()
}

fn default_filename_template() -> String {
    "drawing".to_string()
}

pub(crate) fn default_print_endpoint() -> String {
    "http://127.0.0.1:5000/print_drawing".to_string()
}
