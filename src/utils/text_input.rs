use crate::keymap::Action;

/// Editable single-line text with a char-indexed cursor.
///
/// # Example
/// ```
/// use rivulex::utils::TextInput;
///
/// let mut input = TextInput::new();
/// input.insert_char('h');
/// input.insert_char('i');
/// assert_eq!(input.text(), "hi");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a text input with initial text, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn text_trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Replace the text and move the cursor to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor. Control characters are ignored.
    pub fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let byte_index = self
            .text
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor)
            .unwrap_or(self.text.len());
        self.text.insert(byte_index, c);
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.remove_at(self.cursor - 1);
            self.cursor -= 1;
        }
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            self.remove_at(self.cursor);
        }
    }

    fn remove_at(&mut self, index: usize) {
        if let Some((byte_index, _)) = self.text.char_indices().nth(index) {
            self.text.remove(byte_index);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Handle an editing action from the keymap. Returns true if consumed.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::Home => self.move_home(),
            Action::End => self.move_end(),
            Action::Backspace => self.backspace(),
            Action::DeleteChar => self.delete(),
            _ => return false,
        }
        true
    }

    /// Whether `action` should still fire while a text field has focus.
    ///
    /// Everything bound to a plain character stays out of this list so the
    /// character reaches the field instead.
    pub fn is_action_allowed_when_focused(action: &Action) -> bool {
        matches!(
            action,
            Action::Cancel
                | Action::Confirm
                | Action::NextTab
                | Action::PrevTab
                | Action::MoveUp
                | Action::MoveDown
                | Action::MoveLeft
                | Action::MoveRight
                | Action::Home
                | Action::End
                | Action::Backspace
                | Action::DeleteChar
                | Action::Quit
                | Action::SwitchAccessMode
                | Action::TogglePasswordVisibility
                | Action::CreateAccount
                | Action::OpenSafetyRouting
                | Action::Refresh
                | Action::Save
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_in_middle() {
        let mut input = TextInput::with_text("hello");
        input.move_home();
        input.move_right();
        input.move_right();
        input.insert_char('x');
        assert_eq!(input.text(), "hexllo");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_unicode_handling() {
        let mut input = TextInput::with_text("Área");
        input.move_home();
        input.move_right();
        input.insert_char('ñ');
        assert_eq!(input.text(), "Áñrea");
        input.backspace();
        input.backspace();
        assert_eq!(input.text(), "rea");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_control_chars_ignored() {
        let mut input = TextInput::new();
        input.insert_char('\n');
        input.insert_char('\t');
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_backspace_and_delete_at_edges() {
        let mut input = TextInput::with_text("hello");
        input.delete();
        assert_eq!(input.text(), "hello");
        input.move_home();
        input.backspace();
        assert_eq!(input.text(), "hello");
        input.delete();
        assert_eq!(input.text(), "ello");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_clear_and_set_text() {
        let mut input = TextInput::with_text("hello");
        input.clear();
        assert_eq!(input.cursor(), 0);
        assert!(input.is_blank());
        input.set_text("world");
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn test_blank_and_trimmed() {
        let input = TextInput::with_text("   ");
        assert!(input.is_blank());
        let input = TextInput::with_text("  Borno  ");
        assert_eq!(input.text_trimmed(), "Borno");
        assert!(!input.is_blank());
    }

    #[test]
    fn test_typing_then_backspace_action() {
        let mut input = TextInput::new();
        input.insert_char('a');
        input.insert_char('@');
        assert!(input.handle_action(Action::Backspace));
        assert_eq!(input.text(), "a");
        assert!(!input.handle_action(Action::Confirm));
    }

    #[test]
    fn test_handle_action() {
        let mut input = TextInput::with_text("hello");
        assert!(input.handle_action(Action::Home));
        assert!(input.handle_action(Action::MoveRight));
        assert!(input.handle_action(Action::DeleteChar));
        assert_eq!(input.text(), "hllo");
        assert!(!input.handle_action(Action::ToggleSelect));
    }

    #[test]
    fn test_is_action_allowed_when_focused() {
        assert!(TextInput::is_action_allowed_when_focused(&Action::Confirm));
        assert!(TextInput::is_action_allowed_when_focused(&Action::NextTab));
        assert!(TextInput::is_action_allowed_when_focused(&Action::Save));
        // Space must type a space, not toggle
        assert!(!TextInput::is_action_allowed_when_focused(&Action::ToggleSelect));
    }
}
