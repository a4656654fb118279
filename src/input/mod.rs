//! Input handling and tool state machine.
//!
//! This module turns host pointer and keyboard events into drawing actions.
//! The normalizer maps mouse and touch events into surface-space gestures;
//! the state machine owns the surface, the tool selection and the undo
//! history, and routes each gesture to the rasterizer or the text overlay.

pub mod events;
pub mod normalize;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{
    GestureEvent, GesturePhase, Key, PointerPhase, PointerSource, RawPointerEvent, TouchPoint,
};
pub use normalize::{InputNormalizer, NormalizedInput, SurfaceGeometry};
pub use state::{DrawingState, InputState, TextEntry};
pub use tool::Tool;
