//! Single-line text input
//!
//! Holds the value and a cursor measured in characters, so editing is safe
//! for multi-byte input. Rendering places the terminal cursor by display
//! width (CJK and emoji take two cells).

use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::traits::{Handled, Interactive};

#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    /// Cursor position in characters (0..=char count)
    cursor: usize,
}

impl TextField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Render as a bordered input; places the terminal cursor when focused
    pub fn render(&self, f: &mut Frame, area: Rect, label: &str, theme: &Theme, focused: bool) {
        let border_color = if focused {
            theme.highlight
        } else {
            theme.border
        };

        let inner_width = area.width.saturating_sub(2) as usize;
        let before_cursor: String = self.value.chars().take(self.cursor).collect();
        let cursor_col = before_cursor.width();

        // Scroll horizontally so the cursor stays visible
        let scroll = cursor_col.saturating_sub(inner_width.saturating_sub(1));

        let input = Paragraph::new(self.value.as_str())
            .style(Style::default().fg(theme.foreground))
            .scroll((0, scroll as u16))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(border_color))
                    .title(format!(" {} ", label)),
            );
        f.render_widget(input, area);

        if focused {
            f.set_cursor_position(Position::new(
                area.x + 1 + (cursor_col - scroll) as u16,
                area.y + 1,
            ));
        }
    }
}

impl Interactive for TextField {
    /// Editing keys; anything else bubbles up
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => self.clear(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert(c)
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.home(),
            KeyCode::End => self.end(),
            _ => return Handled::No,
        }
        Handled::Yes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextField {
        let mut field = TextField::default();
        for c in text.chars() {
            field.insert(c);
        }
        field
    }

    #[test]
    fn insert_and_backspace() {
        let mut field = typed("Smith");
        field.backspace();
        assert_eq!(field.value(), "Smit");
        assert_eq!(field.cursor(), 4);
    }

    #[test]
    fn editing_in_the_middle_is_utf8_safe() {
        let mut field = typed("Zoë");
        field.move_left();
        field.insert('x');
        assert_eq!(field.value(), "Zoxë");

        field.home();
        field.delete();
        assert_eq!(field.value(), "oxë");

        field.end();
        field.backspace();
        assert_eq!(field.value(), "ox");
    }

    #[test]
    fn cursor_is_clamped() {
        let mut field = typed("ab");
        field.move_right();
        assert_eq!(field.cursor(), 2);
        field.home();
        field.move_left();
        field.backspace();
        assert_eq!(field.cursor(), 0);
        assert_eq!(field.value(), "ab");
    }

    #[test]
    fn keys_route_through_handle_key() {
        let mut field = TextField::default();
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(field.handle_key(press(KeyCode::Char('J'))), Handled::Yes);
        assert_eq!(field.handle_key(press(KeyCode::Char('o'))), Handled::Yes);
        assert_eq!(field.handle_key(press(KeyCode::Enter)), Handled::No);
        assert_eq!(
            field.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Handled::No
        );
        assert_eq!(field.value(), "Jo");

        field.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn shifted_characters_are_inserted() {
        let mut field = TextField::default();
        field.handle_key(KeyEvent::new(KeyCode::Char('O'), KeyModifiers::SHIFT));
        assert_eq!(field.value(), "O");
    }
}
