//! Drawing tool selection.

use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// The active tool decides what a gesture does to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Freehand chunky brush, stamped along the pointer path (default)
    #[default]
    Pencil,
    /// Freehand eraser, clears squares along the pointer path
    Eraser,
    /// Thin straight segment from gesture start to gesture end
    Line,
    /// Brush-stamped rectangle outline spanned by start and end
    Rectangle,
    /// Brush-stamped ring centred on start, passing through end
    Circle,
    /// Opens a text overlay at the gesture start
    Text,
}

impl Tool {
    /// Tools that rasterize continuously while the pointer moves.
    pub fn is_freehand(self) -> bool {
        matches!(self, Tool::Pencil | Tool::Eraser)
    }

    /// Tools that rasterize only once, when the gesture ends.
    pub fn is_shape(self) -> bool {
        matches!(self, Tool::Line | Tool::Rectangle | Tool::Circle)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Pencil => "pencil",
            Tool::Eraser => "eraser",
            Tool::Line => "line",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Text => "text",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pencil" => Ok(Tool::Pencil),
            "eraser" => Ok(Tool::Eraser),
            "line" => Ok(Tool::Line),
            "rectangle" => Ok(Tool::Rectangle),
            "circle" => Ok(Tool::Circle),
            "text" => Ok(Tool::Text),
            other => Err(format!("unknown tool '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for tool in [
            Tool::Pencil,
            Tool::Eraser,
            Tool::Line,
            Tool::Rectangle,
            Tool::Circle,
            Tool::Text,
        ] {
            assert_eq!(tool.name().parse::<Tool>(), Ok(tool));
        }
        assert!("spraycan".parse::<Tool>().is_err());
    }

    #[test]
    fn tool_families() {
        assert!(Tool::Eraser.is_freehand());
        assert!(!Tool::Text.is_freehand());
        assert!(Tool::Circle.is_shape());
        assert!(!Tool::Pencil.is_shape());
    }
}
