//! Single-line query input used by the locator and supply chain panels.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Editable query text. The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    content: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial content, cursor at the end
    pub fn with_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            cursor: content.chars().count(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Presence check used to gate triggers. Whitespace counts as content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte offset of the `n`th character, or the end of the string.
    fn byte_at(&self, n: usize) -> usize {
        self.content
            .char_indices()
            .nth(n)
            .map_or(self.content.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_at(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Remove the character left of the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_at(self.cursor);
        self.content.remove(at);
    }

    /// Remove the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_at(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Apply an editing key. Returns false when the key is not an edit.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            let clear = key.code == KeyCode::Char('u');
            if clear {
                self.clear();
            }
            return clear;
        }

        match key.code {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    /// The part of the content that fits in `width` columns with the cursor visible,
    /// and the cursor column inside it.
    pub fn viewport(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        let skip = self.cursor.saturating_sub(width - 1);
        let visible: String = self.content.chars().skip(skip).take(width).collect();
        (visible, self.cursor - skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_text_input_with_content() {
        let input = TextInput::with_content("Foxconn");
        assert_eq!(input.content(), "Foxconn");
        assert_eq!(input.cursor(), 7);
        assert!(!input.is_empty());
    }

    #[test]
    fn test_whitespace_is_not_empty() {
        assert!(TextInput::new().is_empty());
        assert!(!TextInput::with_content(" ").is_empty());
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = TextInput::new();
        for c in "iPhone".chars() {
            assert!(input.handle_key(&key(KeyCode::Char(c))));
        }
        assert_eq!(input.content(), "iPhone");
        input.handle_key(&key(KeyCode::Backspace));
        assert_eq!(input.content(), "iPhon");
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn test_backspace_at_start() {
        let mut input = TextInput::new();
        input.backspace();
        assert_eq!(input.content(), "");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_delete_at_home() {
        let mut input = TextInput::with_content("Acme");
        input.handle_key(&key(KeyCode::Home));
        input.handle_key(&key(KeyCode::Delete));
        assert_eq!(input.content(), "cme");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_multibyte_cursor_moves() {
        let mut input = TextInput::with_content("Nestlé");
        input.move_left();
        assert_eq!(input.cursor(), 5);
        input.insert('x');
        assert_eq!(input.content(), "Nestlxé");
        input.move_right();
        assert_eq!(input.cursor(), 7);
        input.move_right();
        assert_eq!(input.cursor(), 7);
        input.backspace();
        assert_eq!(input.content(), "Nestlx");
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = TextInput::with_content("Tesla");
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert!(input.handle_key(&ctrl_u));
        assert!(input.is_empty());

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!input.handle_key(&ctrl_c));
    }

    #[test]
    fn test_unhandled_key() {
        let mut input = TextInput::new();
        assert!(!input.handle_key(&key(KeyCode::F(1))));
        assert!(!input.handle_key(&key(KeyCode::Enter)));
    }

    #[test]
    fn test_viewport_scrolls_to_cursor() {
        let input = TextInput::with_content("abcdefghij");
        let (visible, column) = input.viewport(4);
        assert_eq!(visible, "hij");
        assert_eq!(column, 3);

        let mut input = input;
        input.move_home();
        let (visible, column) = input.viewport(4);
        assert_eq!(visible, "abcd");
        assert_eq!(column, 0);
    }
}
