//! Input dock: text buffer and its wrapped measurement.
//!
//! The dock's height depends on how its text wraps, so the rows reported to
//! the sheet as its minimum extent come from the same wrapping the renderer
//! draws.

use super::constants::{DOCK_CHROME_COLS, DOCK_CHROME_ROWS, DOCK_PROMPT, MAX_DOCK_TEXT_ROWS};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Text entry bar at the bottom of the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputDock {
    text: String,
}

impl InputDock {
    /// Empty dock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a character. Control characters are ignored.
    pub fn insert(&mut self, c: char) {
        if !c.is_control() {
            self.text.push(c);
        }
    }

    /// Remove the last character.
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// Clear the text.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Prompt and text wrapped to the dock's inner width, capped to the last
    /// [`MAX_DOCK_TEXT_ROWS`] rows.
    pub fn lines(&self, outer_width: u16) -> Vec<String> {
        let inner = outer_width.saturating_sub(DOCK_CHROME_COLS).max(1) as usize;
        let mut lines = wrap(&format!("{DOCK_PROMPT}{}", self.text), inner);
        let cap = MAX_DOCK_TEXT_ROWS as usize;
        if lines.len() > cap {
            lines.drain(..lines.len() - cap);
        }
        lines
    }

    /// Rows the dock occupies at `outer_width`, border included.
    pub fn measure_rows(&self, outer_width: u16) -> u16 {
        self.lines(outer_width).len() as u16 + DOCK_CHROME_ROWS
    }
}

/// Greedy character wrap by display width.
///
/// Always returns at least one line. A character wider than `width` gets a
/// line of its own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            used = 0;
        }
        line.push(c);
        used += w;
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    debug_assert!(lines.iter().all(|l| l.width() <= width || l.chars().count() == 1));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dock_is_one_text_row() {
        let dock = InputDock::new();
        assert_eq!(dock.lines(40), vec![DOCK_PROMPT.to_string()]);
        assert_eq!(dock.measure_rows(40), 3);
    }

    #[test]
    fn long_text_wraps_and_grows_dock() {
        let mut dock = InputDock::new();
        for c in "abcdefghijklmnopqrstuvwxyz".chars() {
            dock.insert(c);
        }
        // Inner width 10: "> abcdefgh" then 10 per row.
        assert_eq!(
            dock.lines(12),
            vec!["> abcdefgh", "ijklmnopqr", "stuvwxyz"]
        );
        assert_eq!(dock.measure_rows(12), 5);
    }

    #[test]
    fn dock_height_is_capped() {
        let mut dock = InputDock::new();
        for _ in 0..200 {
            dock.insert('x');
        }
        assert_eq!(dock.measure_rows(12), MAX_DOCK_TEXT_ROWS + DOCK_CHROME_ROWS);
        let lines = dock.lines(12);
        assert_eq!(lines.last().map(|l| l.len()), Some(2));
    }

    #[test]
    fn wide_characters_wrap_by_display_width() {
        assert_eq!(wrap("日本語", 4), vec!["日本", "語"]);
        assert_eq!(wrap("日", 1), vec!["日"]);
    }

    #[test]
    fn editing() {
        let mut dock = InputDock::new();
        dock.insert('h');
        dock.insert('\u{7}');
        dock.insert('i');
        assert_eq!(dock.text(), "hi");
        dock.backspace();
        assert_eq!(dock.text(), "h");
        dock.clear();
        assert!(dock.is_empty());
    }
}
