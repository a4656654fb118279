//! Configuration enum types.

use crate::draw::{Color, color::*};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// ink_color = "black"
///
/// # Custom RGB color (0-255 per component)
/// ink_color = [40, 40, 40]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: black, white, red, green, blue
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown color names fall back to black with a warning, since the
    /// printer only ever renders dark pixels anyway.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using black", name);
                BLACK
            }),
            ColorSpec::Rgb([r, g, b]) => Color {
                r: *r as f64 / 255.0,
                g: *g as f64 / 255.0,
                b: *b as f64 / 255.0,
                a: 1.0,
            },
        }
    }
}

/// Encoding of the print submission body.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PrintBodyFormat {
    /// `{"image": "data:image/png;base64,..."}`
    #[default]
    Json,
    /// multipart/form-data with a single `image` file part
    Multipart,
}

/// File format written by the save control.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    #[default]
    Png,
}

impl ExportFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_and_rgb_colors_resolve() {
        assert_eq!(ColorSpec::Name("Red".into()).to_color(), RED);
        assert_eq!(ColorSpec::Rgb([0, 0, 255]).to_color(), BLUE);
        assert_eq!(ColorSpec::Name("mauve".into()).to_color(), BLACK);
    }
}
