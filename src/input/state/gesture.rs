use crate::draw::raster;
use crate::input::events::{GestureEvent, GesturePhase};
use crate::input::tool::Tool;

use super::{DrawingState, InputState};

impl InputState {
    /// Routes one normalized gesture step to the matching handler.
    pub fn on_gesture(&mut self, event: GestureEvent) {
        match event.phase {
            GesturePhase::Start => self.on_gesture_start(event.x, event.y),
            GesturePhase::Move => self.on_gesture_move(event.x, event.y),
            GesturePhase::End => self.on_gesture_end(event.x, event.y),
        }
    }

    /// Processes a gesture start (pointer/touch down).
    ///
    /// # Behavior
    /// - Snapshots the surface into the history before anything is drawn
    /// - Pencil/eraser: rasterizes the first point immediately, so a tap leaves a dot
    /// - Text: opens a text overlay anchored at the point
    /// - Line/rectangle/circle: nothing is drawn until the gesture ends
    pub fn on_gesture_start(&mut self, x: i32, y: i32) {
        if self.is_stroking() {
            log::debug!("Ignoring gesture start at ({x}, {y}) during an active stroke");
            return;
        }

        self.history.push_snapshot(&self.surface);

        let tool = self.tool;
        match tool {
            Tool::Pencil | Tool::Eraser => {
                raster::interpolate_stroke(
                    &mut self.surface,
                    (x, y),
                    (x, y),
                    self.brush_radius,
                    tool == Tool::Eraser,
                );
                self.needs_redraw = true;
            }
            Tool::Text => self.open_text_entry(x, y),
            Tool::Line | Tool::Rectangle | Tool::Circle => {}
        }

        self.state = DrawingState::Stroking {
            tool,
            start: (x, y),
            last: (x, y),
        };
    }

    /// Processes pointer motion.
    ///
    /// # Behavior
    /// - Pencil/eraser: fills the gap from the last point to this one
    /// - Shape tools: only tracks the cursor (no live preview)
    /// - Idle: ignored
    pub fn on_gesture_move(&mut self, x: i32, y: i32) {
        let DrawingState::Stroking { tool, last, .. } = &mut self.state else {
            return;
        };

        if tool.is_freehand() {
            raster::interpolate_stroke(
                &mut self.surface,
                *last,
                (x, y),
                self.brush_radius,
                *tool == Tool::Eraser,
            );
            self.needs_redraw = true;
        }
        *last = (x, y);
    }

    /// Processes a gesture end (pointer/touch up, leave or cancel).
    pub fn on_gesture_end(&mut self, x: i32, y: i32) {
        if self.is_stroking() {
            self.finish_stroke((x, y));
        }
    }

    /// Ends the active stroke at `end`, rasterizing shape tools, and returns to Idle.
    pub(super) fn finish_stroke(&mut self, end: (i32, i32)) {
        let DrawingState::Stroking { tool, start, .. } = self.state else {
            return;
        };
        self.state = DrawingState::Idle;
        if !tool.is_shape() {
            return;
        }

        let radius = self.brush_radius;
        let (x0, y0) = start;
        let (x1, y1) = end;
        match tool {
            Tool::Line => raster::stroke_line_segment(&mut self.surface, x0, y0, x1, y1),
            Tool::Rectangle => {
                raster::stroke_rectangle_outline(&mut self.surface, x0, y0, x1, y1, radius)
            }
            Tool::Circle => raster::stroke_circle_outline(&mut self.surface, x0, y0, end, radius),
            Tool::Pencil | Tool::Eraser | Tool::Text => {}
        }

        log::debug!("Committed {tool} from {start:?} to {end:?}");
        self.needs_redraw = true;
    }
}
