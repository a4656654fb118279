use crate::input::events::Key;

use super::InputState;

impl InputState {
    /// Processes a key press event.
    ///
    /// While a text entry is open, keys edit it:
    /// - Printable characters and Space append
    /// - Backspace removes the last character
    /// - Return commits the text onto the surface
    /// - Escape discards the entry
    ///
    /// Without an entry, `+`/`=` and `-`/`_` grow and shrink the brush.
    /// Everything else is ignored.
    pub fn on_key_press(&mut self, key: Key) {
        if let Some(entry) = self.text_entry.as_mut() {
            match key {
                Key::Char(c) => entry.buffer.push(c),
                Key::Space => entry.buffer.push(' '),
                Key::Backspace => {
                    entry.buffer.pop();
                }
                Key::Return => {
                    self.commit_text_entry();
                    return;
                }
                Key::Escape => {
                    self.discard_text_entry();
                    return;
                }
                Key::Unknown => return,
            }
            self.needs_redraw = true;
            return;
        }

        match key {
            Key::Char('+') | Key::Char('=') => self.adjust_brush_radius(1),
            Key::Char('-') | Key::Char('_') => self.adjust_brush_radius(-1),
            _ => {}
        }
    }
}
