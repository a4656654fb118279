//! Scripted host interactions.
//!
//! A script is a TOML file of `[[steps]]` tables, each tagged by `action`:
//!
//! ```toml
//! [[steps]]
//! action = "click"
//! control = "tool-rectangle"
//!
//! [[steps]]
//! action = "mouse"
//! phase = "down"
//! x = 5.0
//! y = 5.0
//!
//! [[steps]]
//! action = "touch"
//! phase = "move"
//! touches = [{ x = 20.0, y = 15.0 }]
//!
//! [[steps]]
//! action = "key"
//! key = "Enter"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::export::ExportError;
use crate::host::{Host, HostControl};
use crate::input::{Key, PointerPhase, RawPointerEvent, TouchPoint};

/// Errors raised while loading or replaying a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse script: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Step {step}: {message}")]
    Invalid { step: usize, message: String },

    #[error("Step {step}: {control} failed: {source}")]
    Control {
        step: usize,
        control: HostControl,
        #[source]
        source: ExportError,
    },
}

/// Native pointer phase as written in scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptPhase {
    Down,
    Move,
    Up,
    Leave,
    Cancel,
}

impl From<ScriptPhase> for PointerPhase {
    fn from(phase: ScriptPhase) -> Self {
        match phase {
            ScriptPhase::Down => PointerPhase::Down,
            ScriptPhase::Move => PointerPhase::Move,
            ScriptPhase::Up => PointerPhase::Up,
            ScriptPhase::Leave => PointerPhase::Leave,
            ScriptPhase::Cancel => PointerPhase::Cancel,
        }
    }
}

/// One touch contact in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScriptTouch {
    pub x: f64,
    pub y: f64,
}

/// A single host interaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Step {
    /// Click a page control by element id
    Click { control: String },
    /// Mouse event at viewport coordinates
    Mouse { phase: ScriptPhase, x: f64, y: f64 },
    /// Touch event; `touches` is empty for a final touchend
    Touch {
        phase: ScriptPhase,
        #[serde(default)]
        touches: Vec<ScriptTouch>,
    },
    /// Text typed into the overlay
    Type { text: String },
    /// A single key press by DOM key name
    Key { key: String },
    /// Set the brush radius
    Brush { radius: u32 },
}

/// A parsed sequence of steps.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl Script {
    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let text = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let script: Script = text.parse()?;
        log::debug!("Loaded {} steps from {}", script.steps.len(), path.display());
        Ok(script)
    }

    /// Replays every step into `host`, stopping at the first failure.
    ///
    /// Returns whether a print was requested.
    pub fn run(&self, host: &mut Host) -> Result<bool, ScriptError> {
        let mut printed = false;
        for (index, step) in self.steps.iter().enumerate() {
            let step_no = index + 1;
            log::debug!("Step {}: {:?}", step_no, step);
            match step {
                Step::Click { control } => {
                    let control: HostControl =
                        control.parse().map_err(|message| ScriptError::Invalid {
                            step: step_no,
                            message,
                        })?;
                    host.click(control).map_err(|source| ScriptError::Control {
                        step: step_no,
                        control,
                        source,
                    })?;
                    printed |= control == HostControl::PrintDrawing;
                }
                Step::Mouse { phase, x, y } => {
                    host.pointer(&RawPointerEvent::mouse((*phase).into(), *x, *y));
                }
                Step::Touch { phase, touches } => {
                    let touches = touches
                        .iter()
                        .map(|t| TouchPoint {
                            client_x: t.x,
                            client_y: t.y,
                        })
                        .collect();
                    host.pointer(&RawPointerEvent::touch((*phase).into(), touches));
                }
                Step::Type { text } => host.type_text(text),
                Step::Key { key } => {
                    let key: Key = key.parse().map_err(|message| ScriptError::Invalid {
                        step: step_no,
                        message,
                    })?;
                    host.key(key);
                }
                Step::Brush { radius } => host.input.set_brush_radius(*radius),
            }
        }
        Ok(printed)
    }
}
