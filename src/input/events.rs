//! Generic input event types shared by every host.
//!
//! Hosts translate their native events into these types; the normalizer and
//! the tool state machine never see device-specific payloads.

use std::str::FromStr;

/// Generic key representation for cross-host compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key (commits the text overlay)
    Return,
    /// Backspace key
    Backspace,
    /// Space bar
    Space,
    /// Unmapped or unrecognized key
    Unknown,
}

impl FromStr for Key {
    type Err = String;

    /// Parses DOM-style key names (`"Enter"`, `"Escape"`, `"a"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(if c == ' ' { Key::Space } else { Key::Char(c) });
        }
        match s {
            "Enter" | "Return" => Ok(Key::Return),
            "Escape" | "Esc" => Ok(Key::Escape),
            "Backspace" => Ok(Key::Backspace),
            "Space" => Ok(Key::Space),
            "" => Err("empty key name".to_string()),
            other => Err(format!("unknown key '{other}'")),
        }
    }
}

/// Lifecycle phase of a native pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// mousedown / touchstart
    Down,
    /// mousemove / touchmove
    Move,
    /// mouseup / touchend
    Up,
    /// Pointer left the surface element
    Leave,
    /// touchcancel
    Cancel,
}

/// One touch contact in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub client_x: f64,
    pub client_y: f64,
}

/// Where a pointer event came from.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerSource {
    /// Mouse position in viewport coordinates.
    Mouse { client_x: f64, client_y: f64 },
    /// Active touch points in viewport coordinates, first contact first.
    Touch { touches: Vec<TouchPoint> },
}

/// A device-native pointer event as delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPointerEvent {
    pub phase: PointerPhase,
    pub source: PointerSource,
}

impl RawPointerEvent {
    pub fn mouse(phase: PointerPhase, client_x: f64, client_y: f64) -> Self {
        Self {
            phase,
            source: PointerSource::Mouse { client_x, client_y },
        }
    }

    pub fn touch(phase: PointerPhase, touches: Vec<TouchPoint>) -> Self {
        Self {
            phase,
            source: PointerSource::Touch { touches },
        }
    }
}

/// Device-independent gesture phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Start,
    Move,
    End,
}

/// A gesture step in surface space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureEvent {
    pub phase: GesturePhase,
    pub x: i32,
    pub y: i32,
}

impl GestureEvent {
    pub fn new(phase: GesturePhase, x: i32, y: i32) -> Self {
        Self { phase, x, y }
    }
}
