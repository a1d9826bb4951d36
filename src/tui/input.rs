//! Single-line editable text field.
//!
//! The cursor is a byte offset that always sits on a char boundary. Inserts
//! past the configured char limit are dropped silently; the field never
//! reports overflow.

use crossterm::event::{KeyCode, KeyEvent};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct InputField {
    buffer: String,
    /// Byte offset of the cursor within `buffer`.
    cursor: usize,
    max_chars: usize,
    placeholder: String,
    focused: bool,
}

impl InputField {
    pub fn new(placeholder: &str, max_chars: usize) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            max_chars,
            placeholder: placeholder.to_string(),
            focused: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_value(&mut self, value: &str) {
        self.buffer = value.chars().take(self.max_chars).collect();
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Display column of the cursor, accounting for wide characters.
    pub fn cursor_column(&self) -> usize {
        self.buffer[..self.cursor].width()
    }

    /// Consumes a key event. Returns whether the event was handled; the field
    /// ignores everything while blurred.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.focused {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.insert_char(c);
                true
            }
            KeyCode::Backspace => {
                self.delete_char();
                true
            }
            KeyCode::Left => {
                self.move_cursor_left();
                true
            }
            KeyCode::Right => {
                self.move_cursor_right();
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.buffer.len();
                true
            }
            _ => false,
        }
    }

    /// Inserts pasted text at the cursor, clipped to the char limit.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            self.insert_char(c);
        }
    }

    fn insert_char(&mut self, c: char) {
        if self.buffer.chars().count() >= self.max_chars {
            return;
        }
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn delete_char(&mut self) {
        if self.cursor > 0 {
            let prev_char_boundary = self.buffer[..self.cursor]
                .char_indices()
                .last()
                .map(|(idx, _)| idx)
                .unwrap_or(0);
            self.buffer.remove(prev_char_boundary);
            self.cursor = prev_char_boundary;
        }
    }

    fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.buffer[..self.cursor]
                .char_indices()
                .last()
                .map(|(idx, _)| idx)
                .unwrap_or(0);
        }
    }

    fn move_cursor_right(&mut self) {
        if self.cursor < self.buffer.len() {
            if let Some((_, c)) = self.buffer[self.cursor..].char_indices().next() {
                self.cursor += c.len_utf8();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use proptest::prelude::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(field: &mut InputField, text: &str) {
        for c in text.chars() {
            field.handle_key(&key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn blurred_field_consumes_nothing() {
        let mut field = InputField::new("", 10);
        assert!(!field.handle_key(&key(KeyCode::Char('a'))));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let mut field = InputField::new("", 10);
        field.focus();
        type_str(&mut field, "lint");
        field.handle_key(&key(KeyCode::Left));
        field.handle_key(&key(KeyCode::Left));
        field.handle_key(&key(KeyCode::Char('n')));
        assert_eq!(field.value(), "linnt");
    }

    #[test]
    fn overflow_is_rejected_silently() {
        let mut field = InputField::new("", 3);
        field.focus();
        type_str(&mut field, "abcdef");
        assert_eq!(field.value(), "abc");
        // Still consumed, just dropped.
        assert!(field.handle_key(&key(KeyCode::Char('z'))));
        assert_eq!(field.value(), "abc");
    }

    #[test]
    fn backspace_removes_whole_chars() {
        let mut field = InputField::new("", 10);
        field.focus();
        type_str(&mut field, "héllo");
        field.handle_key(&key(KeyCode::Backspace));
        field.handle_key(&key(KeyCode::Backspace));
        field.handle_key(&key(KeyCode::Backspace));
        field.handle_key(&key(KeyCode::Backspace));
        assert_eq!(field.value(), "h");
        field.handle_key(&key(KeyCode::Backspace));
        field.handle_key(&key(KeyCode::Backspace));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn cursor_moves_stay_on_char_boundaries() {
        let mut field = InputField::new("", 10);
        field.focus();
        type_str(&mut field, "aé日");
        field.handle_key(&key(KeyCode::Home));
        field.handle_key(&key(KeyCode::Right));
        field.handle_key(&key(KeyCode::Char('x')));
        assert_eq!(field.value(), "axé日");
    }

    #[test]
    fn set_value_clips_to_limit_and_moves_cursor_to_end() {
        let mut field = InputField::new("", 4);
        field.set_value("run all the tests");
        assert_eq!(field.value(), "run ");
        field.focus();
        field.handle_key(&key(KeyCode::Backspace));
        assert_eq!(field.value(), "run");
    }

    #[test]
    fn paste_filters_control_chars_and_respects_limit() {
        let mut field = InputField::new("", 8);
        field.focus();
        field.insert_str("run\ttests\nnow");
        assert_eq!(field.value(), "runtests");
    }

    proptest! {
        #[test]
        fn never_exceeds_max_chars(inputs in proptest::collection::vec(any::<char>(), 0..64)) {
            let mut field = InputField::new("", 10);
            field.focus();
            for c in inputs {
                field.handle_key(&key(KeyCode::Char(c)));
            }
            prop_assert!(field.value().chars().count() <= 10);
        }

        #[test]
        fn cursor_stays_valid_under_arbitrary_edits(ops in proptest::collection::vec(0u8..5, 0..128)) {
            let mut field = InputField::new("", 20);
            field.focus();
            for op in ops {
                let code = match op {
                    0 => KeyCode::Char('é'),
                    1 => KeyCode::Char('z'),
                    2 => KeyCode::Backspace,
                    3 => KeyCode::Left,
                    _ => KeyCode::Right,
                };
                field.handle_key(&key(code));
                prop_assert!(field.value().is_char_boundary(field.cursor));
            }
        }
    }
}
