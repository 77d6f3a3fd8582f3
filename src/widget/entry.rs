use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use std::cmp;

/// Single-line text entry the user types new tags into
#[derive(Debug, Clone, Default)]
pub struct Entry {
    text: String,
    pub cursor_col: usize, // In chars, not bytes
    pub scroll_col: usize,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor_col = 0;
        self.scroll_col = 0;
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of a char column
    fn byte_index(&self, col: usize) -> usize {
        self.text
            .char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn insert_char(&mut self, ch: char) {
        // The entry is a single line
        if ch == '\n' || ch == '\r' {
            return;
        }
        let col = cmp::min(self.cursor_col, self.char_len());
        let at = self.byte_index(col);
        self.text.insert(at, ch);
        self.cursor_col = col + 1;
    }

    /// Insert pasted text at the cursor, line breaks become spaces
    pub fn insert_str(&mut self, s: &str) {
        for ch in s.trim_end_matches(['\n', '\r']).chars() {
            match ch {
                '\r' => {}
                '\n' => self.insert_char(' '),
                _ => self.insert_char(ch),
            }
        }
    }

    /// Delete the character before the cursor
    pub fn delete_char(&mut self) {
        let col = cmp::min(self.cursor_col, self.char_len());
        if col == 0 {
            return;
        }
        let at = self.byte_index(col - 1);
        self.text.remove(at);
        self.cursor_col = col - 1;
    }

    /// Delete the character under the cursor
    pub fn delete_forward(&mut self) {
        let col = cmp::min(self.cursor_col, self.char_len());
        if col >= self.char_len() {
            return;
        }
        let at = self.byte_index(col);
        self.text.remove(at);
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_col = self.cursor_col.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor_col = cmp::min(self.cursor_col + 1, self.char_len());
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_col = self.char_len();
    }

    pub fn move_cursor_word_left(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = cmp::min(self.cursor_col, chars.len());

        // Skip whitespace to the left
        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }

        // Skip word characters to the left
        while pos > 0 && is_word_char(chars[pos - 1]) {
            pos -= 1;
        }

        self.cursor_col = pos;
    }

    pub fn move_cursor_word_right(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = cmp::min(self.cursor_col, chars.len());

        while pos < chars.len() && is_word_char(chars[pos]) {
            pos += 1;
        }
        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
        }

        self.cursor_col = pos;
    }

    /// Apply a plain editing key. Returns false for keys the entry does not handle.
    pub fn apply_key(&mut self, key: KeyEvent) -> bool {
        let word = key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char(ch) if !word => self.insert_char(ch),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left if word => self.move_cursor_word_left(),
            KeyCode::Right if word => self.move_cursor_word_right(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.move_cursor_home(),
            KeyCode::End => self.move_cursor_end(),
            _ => return false,
        }
        true
    }

    pub fn update_horizontal_scroll(&mut self, viewport_width: usize) {
        // viewport_width includes the borders
        let effective_width = viewport_width.saturating_sub(2).max(1);

        if self.cursor_col < self.scroll_col {
            self.scroll_col = self.cursor_col;
        } else if self.cursor_col >= self.scroll_col + effective_width {
            self.scroll_col = self.cursor_col.saturating_sub(effective_width - 1);
        }
    }

    /// The slice of text visible after horizontal scrolling
    pub fn visible_text(&self, viewport_width: usize) -> String {
        self.text
            .chars()
            .skip(self.scroll_col)
            .take(viewport_width.saturating_sub(2))
            .collect()
    }

    pub fn get_cursor_screen_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if area.width < 3 || area.height < 3 {
            return None;
        }
        let col = cmp::min(self.cursor_col, self.char_len());
        if col < self.scroll_col {
            return None;
        }
        let visible_col = col - self.scroll_col;
        let max_x = area.width.saturating_sub(2) as usize;
        if visible_col >= max_x {
            return None;
        }
        Some((area.x + 1 + visible_col as u16, area.y + 1))
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
