//! Display contents owned by the controller

use heapless::String;

use crate::traits::{DISPLAY_COLUMNS, DISPLAY_LINES};

/// Text for each display line plus a dirty flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    lines: [String<DISPLAY_COLUMNS>; DISPLAY_LINES],
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a blank screen that still needs drawing
    pub const fn new() -> Self {
        Self {
            lines: [String::new(), String::new()],
            dirty: true,
        }
    }

    /// Set a line, truncating to the display width
    ///
    /// Out-of-range line indices are ignored. Writing identical text does
    /// not mark the screen dirty.
    pub fn set_line(&mut self, line: usize, text: &str) {
        let Some(slot) = self.lines.get_mut(line) else {
            return;
        };
        if slot.chars().eq(text.chars().take(DISPLAY_COLUMNS)) {
            return;
        }

        slot.clear();
        for ch in text.chars() {
            if slot.push(ch).is_err() {
                break;
            }
        }
        self.dirty = true;
    }

    /// Text of a line
    pub fn line(&self, line: usize) -> &str {
        self.lines.get(line).map(|s| s.as_str()).unwrap_or("")
    }

    /// Iterate over `(index, text)` pairs
    pub fn lines(&self) -> impl Iterator<Item = (u8, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(index, text)| (index as u8, text.as_str()))
    }

    /// Check if the screen changed since the last [`Screen::mark_clean`]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the current contents as drawn
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_read() {
        let mut screen = Screen::new();
        screen.set_line(1, "OPEN");
        assert_eq!(screen.line(1), "OPEN");
        assert_eq!(screen.line(0), "");
        assert_eq!(screen.line(5), "");
    }

    #[test]
    fn test_truncates_to_width() {
        let mut screen = Screen::new();
        screen.set_line(0, "this line is far too long");
        assert_eq!(screen.line(0), "this line is far");
    }

    #[test]
    fn test_dirty_tracking() {
        let mut screen = Screen::new();
        assert!(screen.is_dirty());
        screen.mark_clean();

        screen.set_line(0, "LOCKED");
        assert!(screen.is_dirty());
        screen.mark_clean();

        screen.set_line(0, "LOCKED");
        assert!(!screen.is_dirty());

        screen.set_line(3, "ignored");
        assert!(!screen.is_dirty());
    }

    #[test]
    fn test_rewriting_long_line_stays_clean() {
        let mut screen = Screen::new();
        screen.set_line(0, "0123456789abcdefXYZ");
        screen.mark_clean();

        screen.set_line(0, "0123456789abcdefXYZ");
        assert!(!screen.is_dirty());

        // Only the hidden tail differs
        screen.set_line(0, "0123456789abcdef!!");
        assert!(!screen.is_dirty());

        screen.set_line(0, "0123456789abcdeX");
        assert!(screen.is_dirty());
        assert_eq!(screen.line(0), "0123456789abcdeX");
    }
}
