//! Single-line text entry with a cursor
//!
//! Backs the image reference and build tag fields.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

/// State for a text input field with cursor support
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    buffer: String,
    /// Byte offset into `buffer`
    cursor: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor is placed at the end of the initial value
    pub fn with_value(value: &str) -> Self {
        Self {
            buffer: value.to_string(),
            cursor: value.len(),
        }
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Apply an editing key; returns false for keys that are not edits
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('u') => {
                    self.clear();
                    true
                }
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    true
                }
                KeyCode::Char('e') => {
                    self.cursor = self.buffer.len();
                    true
                }
                _ => false,
            };
        }

        match key.code {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.buffer.len(),
            _ => return false,
        }
        true
    }

    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character at the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_char_boundary();
            self.buffer.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_char_boundary();
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.buffer.len() {
            self.cursor = self.next_char_boundary();
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Render as spans with the cursor cell reversed when focused
    pub fn spans(&self, focused: bool, color: Color) -> Line<'static> {
        let style = Style::default().fg(color);
        if !focused {
            return Line::from(Span::styled(self.buffer.clone(), style));
        }

        let (before, rest) = self.buffer.split_at(self.cursor);
        let mut chars = rest.chars();
        let at_cursor = chars.next().map(String::from).unwrap_or_else(|| " ".to_string());
        Line::from(vec![
            Span::styled(before.to_string(), style),
            Span::styled(at_cursor, style.add_modifier(Modifier::REVERSED)),
            Span::styled(chars.as_str().to_string(), style),
        ])
    }

    fn prev_char_boundary(&self) -> usize {
        let mut idx = self.cursor.saturating_sub(1);
        while idx > 0 && !self.buffer.is_char_boundary(idx) {
            idx -= 1;
        }
        idx
    }

    fn next_char_boundary(&self) -> usize {
        let mut idx = self.cursor + 1;
        while idx < self.buffer.len() && !self.buffer.is_char_boundary(idx) {
            idx += 1;
        }
        idx.min(self.buffer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut TextInputState, text: &str) {
        for c in text.chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_appends() {
        let mut input = TextInputState::new();
        type_str(&mut input, "nginx:latest");
        assert_eq!(input.value(), "nginx:latest");
        assert_eq!(input.cursor(), 12);
    }

    #[test]
    fn test_edit_in_middle() {
        let mut input = TextInputState::with_value("ngnx");
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Char('i')));
        assert_eq!(input.value(), "nginx");

        input.handle_key(key(KeyCode::Home));
        input.handle_key(key(KeyCode::Delete));
        assert_eq!(input.value(), "ginx");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input = TextInputState::with_value("abc");
        input.handle_key(key(KeyCode::Home));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.value(), "abc");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = TextInputState::with_value("registry.local/app");
        assert!(input.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert!(input.is_empty());
    }

    #[test]
    fn test_non_edit_keys_are_not_consumed() {
        let mut input = TextInputState::new();
        assert!(!input.handle_key(key(KeyCode::Enter)));
        assert!(!input.handle_key(key(KeyCode::Esc)));
    }

    #[test]
    fn test_multibyte_cursor_movement() {
        let mut input = TextInputState::with_value("tag");
        input.handle_key(key(KeyCode::Left));
        input.insert('\u{00e9}');
        assert_eq!(input.value(), "ta\u{00e9}g");

        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.value(), "tag");
        input.handle_key(key(KeyCode::Right));
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_spans_mark_cursor() {
        let input = TextInputState::with_value("ab");
        let line = input.spans(true, Color::White);
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, " ");
    }
}
