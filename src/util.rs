//! Utility functions for colors and integer geometry.
//!
//! This module provides:
//! - Name-to-color mapping for the configuration file (constants live in draw::color)
//! - Color-to-name mapping for status lines
//! - An axis-aligned integer rectangle used by the rasterizer and the surface

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse ink color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "black", "white", "red", "green", "blue"
///
/// # Returns
/// - `Some(Color)` if the name matches a predefined color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "black" => Some(BLACK),
        "white" => Some(WHITE),
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        _ => None,
    }
}

/// Maps a Color value to its human-readable name.
///
/// Uses approximate matching (threshold-based) to identify colors.
/// Returns "Custom" if the color doesn't match any predefined color.
pub fn color_to_name(color: &Color) -> &'static str {
    if color.r > 0.9 && color.g < 0.1 && color.b < 0.1 {
        "Red"
    } else if color.r < 0.1 && color.g > 0.9 && color.b < 0.1 {
        "Green"
    } else if color.r < 0.1 && color.g < 0.1 && color.b > 0.9 {
        "Blue"
    } else if color.r > 0.9 && color.g > 0.9 && color.b > 0.9 {
        "White"
    } else if color.r < 0.1 && color.g < 0.1 && color.b < 0.1 {
        "Black"
    } else {
        "Custom"
    }
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Axis-aligned integer rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds the inclusive bounding box of two corner points, in any drag direction.
    ///
    /// The returned rectangle covers both corners, so a degenerate drag
    /// (same point twice) yields a 1x1 rectangle.
    pub fn from_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            x: x0.min(x1),
            y: y0.min(y1),
            width: (x1 - x0).abs() + 1,
            height: (y1 - y0).abs() + 1,
        }
    }

    /// Inclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    /// Inclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }

    /// Clamps the rectangle to `0..width` x `0..height`.
    ///
    /// Returns `None` when nothing of the rectangle remains on the surface.
    pub fn clamp_to_bounds(self, width: i32, height: i32) -> Option<Self> {
        let max_x = self.x.saturating_add(self.width).clamp(0, width);
        let max_y = self.y.saturating_add(self.height).clamp(0, height);
        let x = self.x.clamp(0, width);
        let y = self.y.clamp(0, height);
        Self::new(x, y, max_x - x, max_y - y)
    }
}
