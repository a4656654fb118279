//! Host page contract.
//!
//! A host owns one drawable surface and the page controls around it. The
//! controls are addressed by fixed element ids; pointer and key events are
//! forwarded through [`Host::pointer`] and [`Host::key`].

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::Config;
use crate::draw::{ImageFormat, SurfaceError};
use crate::export::{self, DownloadConfig, ExportError, PrintManager, PrintStatus};
use crate::input::{
    InputNormalizer, InputState, Key, RawPointerEvent, SurfaceGeometry, TextEntry, Tool,
};
use crate::util;

/// A page control, identified by its element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostControl {
    /// `tool-pencil`, `tool-line`, `tool-rectangle`, `tool-circle`, `tool-text`, `tool-eraser`
    Tool(Tool),
    /// `undo`
    Undo,
    /// `clear-drawing`
    ClearDrawing,
    /// `save-drawing`
    SaveDrawing,
    /// `print-drawing`
    PrintDrawing,
}

impl HostControl {
    /// Element id of the control.
    pub fn id(self) -> String {
        match self {
            HostControl::Tool(tool) => format!("tool-{}", tool.name()),
            HostControl::Undo => "undo".to_string(),
            HostControl::ClearDrawing => "clear-drawing".to_string(),
            HostControl::SaveDrawing => "save-drawing".to_string(),
            HostControl::PrintDrawing => "print-drawing".to_string(),
        }
    }
}

impl fmt::Display for HostControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

impl FromStr for HostControl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "undo" => Ok(HostControl::Undo),
            "clear-drawing" => Ok(HostControl::ClearDrawing),
            "save-drawing" => Ok(HostControl::SaveDrawing),
            "print-drawing" => Ok(HostControl::PrintDrawing),
            other => other
                .strip_prefix("tool-")
                .and_then(|name| name.parse::<Tool>().ok())
                .map(HostControl::Tool)
                .ok_or_else(|| format!("unknown control id '{other}'")),
        }
    }
}

/// One drawing page: the session plus its controls.
pub struct Host {
    pub input: InputState,
    normalizer: InputNormalizer,
    download: DownloadConfig,
    printer: Option<PrintManager>,
    last_saved: Option<PathBuf>,
}

impl Host {
    /// Builds a page from configuration. Without a print manager the print
    /// control reports [`ExportError::ManagerStopped`].
    pub fn new(config: &Config, printer: Option<PrintManager>) -> Result<Self, SurfaceError> {
        let input = InputState::from_config(&config.drawing)?;
        let geometry = SurfaceGeometry::new(0.0, 0.0, config.input.scale_factor);
        Ok(Self {
            input,
            normalizer: InputNormalizer::new(geometry),
            download: DownloadConfig::from(&config.export),
            printer,
            last_saved: None,
        })
    }

    /// Updates where the surface element sits in the viewport.
    pub fn set_geometry(&mut self, geometry: SurfaceGeometry) {
        self.normalizer.set_geometry(geometry);
    }

    /// Activates a page control.
    pub fn click(&mut self, control: HostControl) -> Result<(), ExportError> {
        log::debug!("Control clicked: {}", control);
        match control {
            HostControl::Tool(tool) => self.input.select_tool(tool),
            HostControl::Undo => {
                if !self.input.undo() {
                    log::debug!("Nothing to undo");
                }
            }
            HostControl::ClearDrawing => self.input.clear_canvas(),
            HostControl::SaveDrawing => {
                let path = export::to_download(&self.input.surface, &self.download)?;
                log::info!("Drawing saved to {}", path.display());
                self.last_saved = Some(path);
            }
            HostControl::PrintDrawing => {
                let printer = self.printer.as_ref().ok_or(ExportError::ManagerStopped)?;
                let png = self.input.surface.export_image(ImageFormat::Png)?;
                printer.request_print(png)?;
            }
        }
        Ok(())
    }

    /// Forwards a native pointer event.
    ///
    /// Returns true when the host must suppress the event's default action.
    pub fn pointer(&mut self, event: &RawPointerEvent) -> bool {
        let Some(normalized) = self.normalizer.normalize(event) else {
            return false;
        };
        self.input.on_gesture(normalized.gesture);
        normalized.suppress_default
    }

    /// Forwards a key press.
    pub fn key(&mut self, key: Key) {
        self.input.on_key_press(key);
    }

    /// Forwards text typed into the overlay.
    pub fn type_text(&mut self, text: &str) {
        self.input.type_text(text);
    }

    /// The open text overlay and its viewport position, for placing the input box.
    pub fn text_overlay(&self) -> Option<(&TextEntry, (f64, f64))> {
        self.input.text_entry().map(|entry| {
            let (x, y) = entry.anchor;
            (entry, self.normalizer.to_viewport(x, y))
        })
    }

    /// Path written by the last successful save.
    pub fn last_saved(&self) -> Option<&PathBuf> {
        self.last_saved.as_ref()
    }

    /// Current status of the print control, if printing is available.
    pub fn print_status(&self) -> Option<PrintStatus> {
        self.printer.as_ref().map(PrintManager::status)
    }

    pub fn printer(&self) -> Option<&PrintManager> {
        self.printer.as_ref()
    }

    /// One-line summary of the tool selection.
    pub fn status_line(&self) -> String {
        let ink = self.input.surface.ink();
        format!(
            "{} | brush {} | {} ink | undo {}",
            self.input.tool(),
            self.input.brush_radius(),
            util::color_to_name(&ink),
            self.input.history.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{PointerPhase, TouchPoint};

    fn host() -> Host {
        Host::new(&Config::default(), None).expect("host")
    }

    #[test]
    fn control_ids_parse_and_print() {
        let ids = [
            "tool-pencil",
            "tool-line",
            "tool-rectangle",
            "tool-circle",
            "tool-text",
            "tool-eraser",
            "undo",
            "clear-drawing",
            "save-drawing",
            "print-drawing",
        ];
        for id in ids {
            let control: HostControl = id.parse().expect(id);
            assert_eq!(control.id(), id);
        }
        assert_eq!(
            "tool-circle".parse::<HostControl>(),
            Ok(HostControl::Tool(Tool::Circle))
        );
        assert!("tool-spray".parse::<HostControl>().is_err());
        assert!("redo".parse::<HostControl>().is_err());
    }

    #[test]
    fn mouse_drag_draws_and_undo_control_reverts() {
        let mut host = host();
        assert!(!host.pointer(&RawPointerEvent::mouse(PointerPhase::Down, 100.0, 100.0)));
        host.pointer(&RawPointerEvent::mouse(PointerPhase::Move, 140.0, 100.0));
        host.pointer(&RawPointerEvent::mouse(PointerPhase::Up, 140.0, 100.0));

        assert!(host.input.surface.is_painted(120, 100));

        host.click(HostControl::Undo).expect("undo");
        assert!(!host.input.surface.is_painted(120, 100));
        host.click(HostControl::Undo).expect("undo on empty history");
    }

    #[test]
    fn touch_stroke_requests_suppression() {
        let mut host = host();
        let at = |x, y| {
            vec![TouchPoint {
                client_x: x,
                client_y: y,
            }]
        };
        assert!(host.pointer(&RawPointerEvent::touch(PointerPhase::Down, at(50.0, 50.0))));
        assert!(host.pointer(&RawPointerEvent::touch(PointerPhase::Move, at(60.0, 50.0))));
        assert!(host.pointer(&RawPointerEvent::touch(PointerPhase::Up, Vec::new())));
        assert!(!host.input.is_stroking());
        assert!(host.input.surface.is_painted(55, 50));
    }

    #[test]
    fn pointer_leave_commits_shape() {
        let mut host = host();
        host.click(HostControl::Tool(Tool::Rectangle)).expect("tool");
        host.pointer(&RawPointerEvent::mouse(PointerPhase::Down, 10.0, 10.0));
        host.pointer(&RawPointerEvent::mouse(PointerPhase::Move, 300.0, 200.0));
        host.pointer(&RawPointerEvent::mouse(PointerPhase::Leave, 300.0, 200.0));

        assert!(!host.input.is_stroking());
        assert!(host.input.surface.is_painted(150, 10));
    }

    #[test]
    fn scaled_display_maps_to_surface_pixels() {
        let mut config = Config::default();
        config.input.scale_factor = 0.5;
        let mut host = Host::new(&config, None).expect("host");

        host.pointer(&RawPointerEvent::mouse(PointerPhase::Down, 50.0, 50.0));
        host.pointer(&RawPointerEvent::mouse(PointerPhase::Up, 50.0, 50.0));

        assert!(host.input.surface.is_painted(100, 100));
        assert!(!host.input.surface.is_painted(50, 50));
    }

    #[test]
    fn text_overlay_is_placed_in_viewport() {
        let mut host = host();
        host.set_geometry(SurfaceGeometry::new(20.0, 30.0, 1.0));
        host.click(HostControl::Tool(Tool::Text)).expect("tool");
        host.pointer(&RawPointerEvent::mouse(PointerPhase::Down, 120.0, 130.0));
        host.pointer(&RawPointerEvent::mouse(PointerPhase::Up, 120.0, 130.0));

        let (entry, position) = host.text_overlay().expect("overlay");
        assert_eq!(entry.anchor, (100, 100));
        assert_eq!(position, (120.0, 130.0));
    }

    #[test]
    fn save_control_writes_download() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = Config::default();
        config.export.save_directory = dir.path().to_string_lossy().into_owned();
        let mut host = Host::new(&config, None).expect("host");

        host.click(HostControl::SaveDrawing).expect("save");

        let saved = host.last_saved().expect("saved path");
        assert!(saved.ends_with("drawing.png"));
        assert!(saved.exists());
    }

    #[test]
    fn print_without_manager_is_an_error() {
        let mut host = host();
        let err = host.click(HostControl::PrintDrawing).expect_err("no printer");
        assert!(matches!(err, ExportError::ManagerStopped));
        assert_eq!(host.print_status(), None);
    }

    #[test]
    fn clear_control_empties_history() {
        let mut host = host();
        host.pointer(&RawPointerEvent::mouse(PointerPhase::Down, 10.0, 10.0));
        host.pointer(&RawPointerEvent::mouse(PointerPhase::Up, 10.0, 10.0));
        host.click(HostControl::ClearDrawing).expect("clear");

        assert_eq!(host.input.surface.snapshot().painted_count(), 0);
        assert!(host.input.history.is_empty());
        assert_eq!(host.status_line(), "pencil | brush 3 | Black ink | undo 0");
    }
}
