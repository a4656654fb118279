mod actions;
mod core;
mod gesture;
mod text;

pub use self::core::{DEFAULT_BRUSH_RADIUS, DEFAULT_MAX_BRUSH_RADIUS, DrawingState, InputState};
pub use text::TextEntry;
