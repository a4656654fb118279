//! Viewport-to-surface input normalization.
//!
//! Converts mouse and touch events into one stream of [`GestureEvent`]s in
//! surface coordinates, and tells the host when it must suppress its own
//! gesture handling (scrolling, pull-to-refresh) during a touch stroke.

use super::events::{
    GestureEvent, GesturePhase, PointerPhase, PointerSource, RawPointerEvent, TouchPoint,
};
use log::debug;

/// On-screen placement of the surface element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    /// Left edge of the surface in viewport coordinates
    pub origin_x: f64,
    /// Top edge of the surface in viewport coordinates
    pub origin_y: f64,
    /// Displayed size divided by surface size
    pub scale: f64,
}

impl Default for SurfaceGeometry {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            scale: 1.0,
        }
    }
}

impl SurfaceGeometry {
    pub fn new(origin_x: f64, origin_y: f64, scale: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            scale: sanitize_scale(scale),
        }
    }

    /// Derives the scale from the element's displayed width.
    pub fn fit(origin_x: f64, origin_y: f64, displayed_width: f64, surface_width: i32) -> Self {
        let scale = if surface_width > 0 {
            displayed_width / surface_width as f64
        } else {
            1.0
        };
        Self::new(origin_x, origin_y, scale)
    }

    /// Maps viewport coordinates to surface pixels (floored).
    pub fn to_surface(&self, client_x: f64, client_y: f64) -> (i32, i32) {
        (
            ((client_x - self.origin_x) / self.scale).floor() as i32,
            ((client_y - self.origin_y) / self.scale).floor() as i32,
        )
    }

    /// Maps a surface pixel back to the viewport (its top-left corner).
    pub fn to_viewport(&self, x: i32, y: i32) -> (f64, f64) {
        (
            self.origin_x + x as f64 * self.scale,
            self.origin_y + y as f64 * self.scale,
        )
    }
}

fn sanitize_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        log::warn!("Invalid display scale {scale}, using 1.0");
        1.0
    }
}

/// A normalized gesture step plus the side effect the host must apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedInput {
    pub gesture: GestureEvent,
    /// The host must cancel the native event's default action.
    pub suppress_default: bool,
}

/// Stateful normalizer for one surface instance.
#[derive(Debug, Default)]
pub struct InputNormalizer {
    geometry: SurfaceGeometry,
    touch_active: bool,
    last_point: Option<(i32, i32)>,
}

impl InputNormalizer {
    pub fn new(geometry: SurfaceGeometry) -> Self {
        Self {
            geometry,
            touch_active: false,
            last_point: None,
        }
    }

    pub fn geometry(&self) -> SurfaceGeometry {
        self.geometry
    }

    /// Updates the surface placement (after layout or resize).
    pub fn set_geometry(&mut self, geometry: SurfaceGeometry) {
        self.geometry = geometry;
    }

    /// Whether a touch stroke is currently in progress.
    pub fn touch_active(&self) -> bool {
        self.touch_active
    }

    /// Maps a surface pixel back to the viewport, for placing overlays.
    pub fn to_viewport(&self, x: i32, y: i32) -> (f64, f64) {
        self.geometry.to_viewport(x, y)
    }

    /// Converts a native event to a surface-space gesture step.
    ///
    /// Returns `None` when the event carries no usable position.
    pub fn normalize(&mut self, event: &RawPointerEvent) -> Option<NormalizedInput> {
        let phase = match event.phase {
            PointerPhase::Down => GesturePhase::Start,
            PointerPhase::Move => GesturePhase::Move,
            PointerPhase::Up | PointerPhase::Leave | PointerPhase::Cancel => GesturePhase::End,
        };

        match &event.source {
            PointerSource::Mouse { client_x, client_y } => {
                let (x, y) = self.geometry.to_surface(*client_x, *client_y);
                self.last_point = Some((x, y));
                Some(NormalizedInput {
                    gesture: GestureEvent::new(phase, x, y),
                    suppress_default: false,
                })
            }
            PointerSource::Touch { touches } => self.normalize_touch(phase, touches),
        }
    }

    fn normalize_touch(
        &mut self,
        phase: GesturePhase,
        touches: &[TouchPoint],
    ) -> Option<NormalizedInput> {
        let point = touches
            .first()
            .map(|touch| self.geometry.to_surface(touch.client_x, touch.client_y));

        let (x, y) = match (phase, point) {
            (_, Some(point)) => point,
            // touchend carries no active touches; finish where the finger was.
            (GesturePhase::End, None) => self.last_point?,
            (_, None) => {
                debug!("Ignoring touch event without touch points");
                return None;
            }
        };

        // Suppression covers the whole stroke, including its final event.
        let suppress_default = match phase {
            GesturePhase::Start => {
                self.touch_active = true;
                true
            }
            GesturePhase::Move => self.touch_active,
            GesturePhase::End => std::mem::replace(&mut self.touch_active, false),
        };

        self.last_point = Some((x, y));
        Some(NormalizedInput {
            gesture: GestureEvent::new(phase, x, y),
            suppress_default,
        })
    }
}
