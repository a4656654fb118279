//! Text overlay: a transient text-entry affordance anchored on the surface.

use crate::draw::raster;

use super::InputState;

/// An unconfirmed text entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    /// Baseline anchor in surface coordinates
    pub anchor: (i32, i32),
    /// Text typed so far
    pub buffer: String,
}

impl TextEntry {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            anchor: (x, y),
            buffer: String::new(),
        }
    }
}

impl InputState {
    /// The open text entry, if any.
    pub fn text_entry(&self) -> Option<&TextEntry> {
        self.text_entry.as_ref()
    }

    /// Opens a text entry at `(x, y)`, discarding any unconfirmed one.
    pub fn open_text_entry(&mut self, x: i32, y: i32) {
        if let Some(previous) = self.text_entry.replace(TextEntry::new(x, y)) {
            log::debug!(
                "Discarding unconfirmed text {:?} at {:?}",
                previous.buffer,
                previous.anchor
            );
        }
        self.needs_redraw = true;
    }

    /// Rasterizes the open entry at its anchor and closes it.
    ///
    /// Relies on the snapshot taken when the originating gesture started;
    /// committing never touches the history. Returns false if no entry was open.
    pub fn commit_text_entry(&mut self) -> bool {
        let Some(entry) = self.text_entry.take() else {
            return false;
        };
        if !entry.buffer.is_empty() {
            raster::draw_text(
                &mut self.surface,
                entry.anchor.0,
                entry.anchor.1,
                &entry.buffer,
            );
            log::debug!("Committed text {:?} at {:?}", entry.buffer, entry.anchor);
        }
        self.needs_redraw = true;
        true
    }

    /// Closes the open entry without drawing it.
    pub fn discard_text_entry(&mut self) -> bool {
        let discarded = self.text_entry.take().is_some();
        if discarded {
            self.needs_redraw = true;
        }
        discarded
    }

    /// Appends typed text to the open entry. Ignored when no entry is open.
    pub fn type_text(&mut self, text: &str) {
        if let Some(entry) = self.text_entry.as_mut() {
            entry.buffer.push_str(text);
            self.needs_redraw = true;
        }
    }
}
