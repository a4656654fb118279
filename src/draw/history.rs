//! Bounded undo history built on surface snapshots.

use super::surface::{RasterSurface, SurfaceImage};
use log::debug;
use std::collections::VecDeque;

/// Maximum number of snapshots kept for undo.
pub const HISTORY_LIMIT: usize = 10;

/// Stack of surface snapshots, newest last.
///
/// Holds at most [`HISTORY_LIMIT`] entries; pushing beyond that drops the
/// oldest snapshot first.
#[derive(Debug, Default)]
pub struct History {
    entries: VecDeque<SurfaceImage>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current surface and appends it, evicting the oldest entry on overflow.
    pub fn push_snapshot(&mut self, surface: &RasterSurface) {
        self.entries.push_back(surface.snapshot());
        if self.entries.len() > HISTORY_LIMIT {
            self.entries.pop_front();
            debug!("History full; dropped oldest snapshot");
        }
    }

    /// Restores the most recent snapshot, removing it from the stack.
    ///
    /// Returns `false` without touching the surface when the history is empty.
    pub fn undo(&mut self, surface: &mut RasterSurface) -> bool {
        match self.entries.pop_back() {
            Some(image) => surface.restore(&image),
            None => {
                debug!("Undo requested with empty history");
                false
            }
        }
    }

    /// Drops every snapshot. Leaves the surface untouched.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
