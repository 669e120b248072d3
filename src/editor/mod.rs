//! Multi-line text buffer backing the editor pane.
//!
//! Cursor columns are character indices, converted to byte offsets only at the
//! point of mutation so multi-byte input never splits a code point.

use crate::utils::unicode::{char_to_byte_index, display_width};

const TAB: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorBuffer {
    lines: Vec<String>,
    row: usize,
    col: usize,
    /// First visible line.
    scroll_top: usize,
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::from_text("")
    }
}

impl EditorBuffer {
    pub fn from_text(text: &str) -> Self {
        let mut buf = Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            scroll_top: 0,
        };
        buf.set_text(text);
        buf
    }

    /// Replace the whole content and move the cursor to the start.
    pub fn set_text(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n");
        self.lines = normalized.split('\n').map(str::to_string).collect();
        self.row = 0;
        self.col = 0;
        self.scroll_top = 0;
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// (row, column) with the column counted in characters.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Terminal column of the cursor within its line.
    pub fn cursor_display_col(&self) -> usize {
        let line = &self.lines[self.row];
        display_width(&line[..char_to_byte_index(line, self.col)])
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    fn line_chars(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    fn byte_col(&self) -> usize {
        char_to_byte_index(&self.lines[self.row], self.col)
    }

    // ----- Editing; each returns whether the text changed -----

    pub fn insert_char(&mut self, c: char) -> bool {
        if c == '\n' {
            return self.insert_newline();
        }
        let at = self.byte_col();
        self.lines[self.row].insert(at, c);
        self.col += 1;
        true
    }

    /// Split the line at the cursor, carrying over the current indentation.
    pub fn insert_newline(&mut self) -> bool {
        let at = self.byte_col();
        let rest = self.lines[self.row].split_off(at);
        let indent: String = self.lines[self.row]
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect();
        let indent_chars = indent.chars().count();
        self.lines.insert(self.row + 1, indent + &rest);
        self.row += 1;
        self.col = indent_chars;
        true
    }

    pub fn insert_tab(&mut self) -> bool {
        self.insert_str(TAB)
    }

    /// Insert pasted text, which may span several lines.
    pub fn insert_str(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let mut parts = normalized.split('\n');
        let first = parts.next().unwrap_or_default();

        let at = self.byte_col();
        let tail = self.lines[self.row].split_off(at);
        self.lines[self.row].push_str(first);
        self.col += first.chars().count();

        for part in parts {
            self.lines.insert(self.row + 1, part.to_string());
            self.row += 1;
            self.col = part.chars().count();
        }
        self.lines[self.row].push_str(&tail);
        true
    }

    pub fn backspace(&mut self) -> bool {
        if self.col > 0 {
            self.col -= 1;
            let at = self.byte_col();
            self.lines[self.row].remove(at);
            true
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_chars(self.row);
            self.lines[self.row].push_str(&current);
            true
        } else {
            false
        }
    }

    pub fn delete(&mut self) -> bool {
        if self.col < self.line_chars(self.row) {
            let at = self.byte_col();
            self.lines[self.row].remove(at);
            true
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
            true
        } else {
            false
        }
    }

    // ----- Navigation -----

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_chars(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_chars(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_chars(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_chars(self.row));
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.line_chars(self.row);
    }

    pub fn page_up(&mut self, page: usize) {
        self.row = self.row.saturating_sub(page.max(1));
        self.col = self.col.min(self.line_chars(self.row));
    }

    pub fn page_down(&mut self, page: usize) {
        self.row = (self.row + page.max(1)).min(self.lines.len() - 1);
        self.col = self.col.min(self.line_chars(self.row));
    }

    /// Adjust the scroll offset so the cursor row sits inside a viewport of `height` lines.
    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.row < self.scroll_top {
            self.scroll_top = self.row;
        } else if self.row >= self.scroll_top + height {
            self.scroll_top = self.row + 1 - height;
        }
    }
}
