//! Tool state machine and drawing session state.

use super::text::TextEntry;
use crate::config::DrawingConfig;
use crate::draw::{FontDescriptor, History, RasterSurface, SurfaceError};
use crate::input::tool::Tool;

/// Default brush radius in brush pixels.
pub const DEFAULT_BRUSH_RADIUS: u32 = 3;
/// Default upper bound for the brush radius.
pub const DEFAULT_MAX_BRUSH_RADIUS: u32 = 16;

/// Current drawing mode state machine.
///
/// Tracks whether the user is idle or in the middle of a stroke.
/// State transitions occur on gesture start/end and on tool changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingState {
    /// Not actively drawing - waiting for a gesture
    Idle,
    /// A gesture is in progress (pointer held down)
    Stroking {
        /// Tool captured when the gesture started
        tool: Tool,
        /// Where the gesture started
        start: (i32, i32),
        /// Most recent point; for pencil/eraser also the last rasterized point
        last: (i32, i32),
    },
}

/// Main input state containing all drawing session state.
///
/// Owns the raster surface, the undo history, the tool selection and the
/// optional text overlay. Every handler reads and writes through this struct;
/// nothing lives in process-wide state.
#[derive(Debug)]
pub struct InputState {
    /// The drawable bitmap
    pub surface: RasterSurface,
    /// Undo snapshots, one per gesture start
    pub history: History,
    /// Current drawing mode state machine
    pub state: DrawingState,
    /// Whether the surface changed since the host last repainted
    pub needs_redraw: bool,
    pub(super) tool: Tool,
    pub(super) brush_radius: u32,
    pub(super) max_brush_radius: u32,
    pub(super) text_entry: Option<TextEntry>,
}

impl InputState {
    /// Creates a session drawing on `surface` with the pencil selected.
    ///
    /// # Arguments
    /// * `surface` - Surface the session draws on
    /// * `brush_radius` - Initial brush radius (clamped to `1..=max_brush_radius`)
    /// * `max_brush_radius` - Largest radius the brush may be set to
    pub fn new(surface: RasterSurface, brush_radius: u32, max_brush_radius: u32) -> Self {
        let max_brush_radius = max_brush_radius.max(1);
        Self {
            surface,
            history: History::new(),
            state: DrawingState::Idle,
            needs_redraw: true,
            tool: Tool::default(),
            brush_radius: brush_radius.clamp(1, max_brush_radius),
            max_brush_radius,
            text_entry: None,
        }
    }

    /// Creates a session on a fresh printer canvas styled from configuration.
    pub fn from_config(config: &DrawingConfig) -> Result<Self, SurfaceError> {
        let mut surface = RasterSurface::printer_canvas()?;
        surface.set_ink(config.ink_color.to_color());
        surface.set_font(
            FontDescriptor::new(
                config.font_family.clone(),
                config.font_weight.clone(),
                config.font_style.clone(),
            ),
            config.font_size,
        );
        Ok(Self::new(
            surface,
            config.brush_radius,
            config.max_brush_radius,
        ))
    }

    /// The currently selected tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// The current brush radius in brush pixels.
    pub fn brush_radius(&self) -> u32 {
        self.brush_radius
    }

    /// Returns true while a gesture is in progress.
    pub fn is_stroking(&self) -> bool {
        matches!(self.state, DrawingState::Stroking { .. })
    }

    /// Selects a tool. An in-progress stroke is ended first, exactly as if the
    /// pointer had been released at its last position.
    pub fn select_tool(&mut self, tool: Tool) {
        if let DrawingState::Stroking { last, .. } = self.state {
            log::debug!("Tool changed mid-stroke; ending stroke at {:?}", last);
            self.finish_stroke(last);
        }
        if self.tool != tool {
            log::debug!("Selected tool {}", tool);
        }
        self.tool = tool;
    }

    /// Sets the brush radius, clamped to `1..=max`.
    pub fn set_brush_radius(&mut self, radius: u32) {
        let clamped = radius.clamp(1, self.max_brush_radius);
        if clamped != radius {
            log::warn!(
                "Brush radius {} out of range, using {} (1-{})",
                radius,
                clamped,
                self.max_brush_radius
            );
        }
        self.brush_radius = clamped;
    }

    /// Adjusts the brush radius by a signed delta, clamping to the valid range.
    pub fn adjust_brush_radius(&mut self, delta: i32) {
        let next = (self.brush_radius as i64 + delta as i64).clamp(1, self.max_brush_radius as i64);
        self.brush_radius = next as u32;
        log::debug!("Brush radius adjusted to {}", self.brush_radius);
    }

    /// Restores the surface to its state before the latest stroke.
    ///
    /// Silent no-op when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let restored = self.history.undo(&mut self.surface);
        if restored {
            self.needs_redraw = true;
        }
        restored
    }

    /// Wipes the surface and forgets every undo snapshot.
    pub fn clear_canvas(&mut self) {
        self.surface.clear_all();
        self.history.clear();
        self.needs_redraw = true;
        log::info!("Canvas cleared");
    }
}
