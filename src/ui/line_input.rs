use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
}

/// Single-line editor behind the import prompt. Newlines in pasted text
/// are folded to spaces; input stops growing at `max_chars`.
pub struct LineInput {
    text: Vec<char>,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
    max_chars: usize,
}

impl LineInput {
    pub fn new(text: &str, max_chars: usize) -> Self {
        let mut input = Self {
            text: Vec::new(),
            cursor: 0,
            max_chars,
        };
        input.insert_str(text);
        input
    }

    pub fn value(&self) -> String {
        self.text.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.text.len() >= self.max_chars
    }

    /// Returns (before_cursor, cursor_char, after_cursor) for styled rendering.
    /// When cursor is at end of text, cursor_char is None.
    pub fn render_parts(&self) -> (String, Option<char>, String) {
        let before = self.text[..self.cursor].iter().collect();
        match self.text.get(self.cursor) {
            Some(&ch) => (before, Some(ch), self.text[self.cursor + 1..].iter().collect()),
            None => (before, None, String::new()),
        }
    }

    /// Insert at the cursor, up to the character limit. Returns how many
    /// characters were accepted.
    pub fn insert_str(&mut self, s: &str) -> usize {
        let mut accepted = 0;
        for ch in s.chars() {
            if self.is_full() {
                break;
            }
            let ch = match ch {
                '\r' => continue,
                '\n' | '\t' => ' ',
                other => other,
            };
            self.text.insert(self.cursor, ch);
            self.cursor += 1;
            accepted += 1;
        }
        accepted
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.text.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.len(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.text.remove(self.cursor);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.text.len() {
                    self.text.remove(self.cursor);
                }
            }
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.text.len(),
            KeyCode::Char('u') if ctrl => {
                self.text.clear();
                self.cursor = 0;
            }
            KeyCode::Char('w') if ctrl => self.delete_word_back(),
            KeyCode::Char(ch) if !ctrl => {
                let mut buf = [0u8; 4];
                self.insert_str(ch.encode_utf8(&mut buf));
            }
            _ => {}
        }
        InputResult::Continue
    }

    /// unix-word-rubout: skip whitespace, then non-whitespace.
    fn delete_word_back(&mut self) {
        let mut pos = self.cursor;
        while pos > 0 && self.text[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !self.text[pos - 1].is_whitespace() {
            pos -= 1;
        }
        self.text.drain(pos..self.cursor);
        self.cursor = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn insert_at_start_middle_end() {
        let mut input = LineInput::new("ac", 100);
        input.handle(key(KeyCode::Char('d')));
        assert_eq!(input.value(), "acd");

        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Char('z')));
        assert_eq!(input.value(), "zacd");
        assert_eq!(input.cursor, 1);

        input.handle(key(KeyCode::Right));
        input.handle(key(KeyCode::Char('b')));
        assert_eq!(input.value(), "zabcd");
        assert_eq!(input.cursor, 3);
    }

    #[test]
    fn backspace_and_delete_at_boundaries() {
        let mut input = LineInput::new("ab", 100);
        input.handle(key(KeyCode::Backspace));
        input.handle(key(KeyCode::Backspace));
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor, 0);

        let mut input = LineInput::new("ab", 100);
        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "b");
        input.handle(key(KeyCode::End));
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn ctrl_w_word_delete() {
        let mut input = LineInput::new("foo bar  ", 100);
        input.handle(ctrl('w'));
        assert_eq!(input.value(), "foo ");

        let mut empty = LineInput::new("", 100);
        empty.handle(ctrl('w'));
        assert_eq!(empty.value(), "");
    }

    #[test]
    fn ctrl_a_e_u() {
        let mut input = LineInput::new("test", 100);
        input.handle(ctrl('a'));
        assert_eq!(input.cursor, 0);
        input.handle(ctrl('e'));
        assert_eq!(input.cursor, 4);
        input.handle(ctrl('u'));
        assert!(input.is_empty());
    }

    #[test]
    fn limit_caps_typing_and_paste() {
        let mut input = LineInput::new("abc", 5);
        assert_eq!(input.insert_str("defgh"), 2);
        assert_eq!(input.value(), "abcde");
        assert!(input.is_full());
        input.handle(key(KeyCode::Char('z')));
        assert_eq!(input.value(), "abcde");
    }

    #[test]
    fn paste_folds_newlines() {
        let mut input = LineInput::new("", 100);
        input.insert_str("one\r\ntwo\tthree");
        assert_eq!(input.value(), "one two three");
    }

    #[test]
    fn multibyte_editing() {
        let mut input = LineInput::new("héllo", 100);
        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "hllo");
        assert_eq!(input.len(), 4);
    }

    #[test]
    fn render_parts_positions() {
        let mut input = LineInput::new("abc", 100);
        assert_eq!(input.render_parts(), ("abc".to_string(), None, String::new()));
        input.cursor = 1;
        assert_eq!(
            input.render_parts(),
            ("a".to_string(), Some('b'), "c".to_string())
        );
    }

    #[test]
    fn submit_and_cancel() {
        let mut input = LineInput::new("test", 100);
        assert_eq!(input.handle(key(KeyCode::Enter)), InputResult::Submit);
        assert_eq!(input.handle(key(KeyCode::Esc)), InputResult::Cancel);
    }
}
