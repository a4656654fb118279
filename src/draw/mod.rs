//! Raster drawing engine (Cairo-based).
//!
//! This module defines the core drawing types used by the pixel canvas:
//! - [`RasterSurface`]: the fixed-size bitmap and its [`Canvas`] primitives
//! - [`raster`]: chunky-brush rasterization (stamps, strokes, outlines)
//! - [`History`]: bounded snapshot stack for undo
//! - [`Color`] and [`FontDescriptor`]: ink and text styling

pub mod color;
pub mod font;
pub mod history;
pub mod raster;
pub mod surface;

// Re-export commonly used types at module level
pub use color::Color;
pub use font::FontDescriptor;
pub use history::{HISTORY_LIMIT, History};
pub use surface::{
    CANVAS_HEIGHT, CANVAS_WIDTH, Canvas, ImageFormat, RasterSurface, SurfaceError, SurfaceImage,
};

// Re-export color constants for public API
pub use color::{BLACK, BLUE, GREEN, RED, WHITE};
