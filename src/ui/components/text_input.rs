use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::Theme;

/// Single-line text input rendered as a labelled, bordered field.
///
/// Unlike the selectable components this widget is driven directly by its
/// parent form, which decides which field currently has focus. The cursor
/// is a character index, never a byte index.
pub struct TextInput {
    label: &'static str,
    value: String,
    cursor: usize,
    masked: bool,
}

impl TextInput {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            cursor: 0,
            masked: false,
        }
    }

    pub const fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Byte offset of the cursor's character position.
    fn byte_idx(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn insert_char(&mut self, c: char) {
        let idx = self.byte_idx();
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    /// Insert pasted text at the cursor.
    pub fn insert_str(&mut self, text: &str) {
        let idx = self.byte_idx();
        self.value.insert_str(idx, text);
        self.cursor += text.chars().count();
    }

    /// Handle a key event, returning true if it was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let idx = self.byte_idx();
                    self.value.remove(idx);
                }
                true
            }
            (KeyCode::Delete, _) => {
                if self.cursor < self.char_count() {
                    let idx = self.byte_idx();
                    self.value.remove(idx);
                }
                true
            }
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            (KeyCode::Right, _) => {
                if self.cursor < self.char_count() {
                    self.cursor += 1;
                }
                true
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                true
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.char_count();
                true
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.clear();
                true
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert_char(c);
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let display_chars: Vec<char> = if self.masked {
            std::iter::repeat_n('*', self.char_count()).collect()
        } else {
            self.value.chars().collect()
        };

        let line = if focused {
            let cursor = self.cursor.min(display_chars.len());
            let before: String = display_chars[..cursor].iter().collect();
            let cursor_char = display_chars.get(cursor).copied().unwrap_or(' ');
            let rest: String = display_chars.get(cursor + 1..).unwrap_or(&[]).iter().collect();

            let input_style = Style::default().fg(theme.text);
            let cursor_style = Style::default()
                .fg(theme.base)
                .bg(theme.text)
                .add_modifier(Modifier::BOLD);

            Line::from(vec![
                Span::styled(before, input_style),
                Span::styled(cursor_char.to_string(), cursor_style),
                Span::styled(rest, input_style),
            ])
        } else {
            Line::from(Span::styled(
                display_chars.iter().collect::<String>(),
                Style::default().fg(theme.subtext0),
            ))
        };

        let border_color = if focused {
            theme.border_focused()
        } else {
            theme.border()
        };

        let block = Block::default()
            .title(format!(" {} ", self.label))
            .title_style(Style::default().fg(theme.subtext1))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut TextInput, code: KeyCode) {
        input.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(input: &mut TextInput, text: &str) {
        for c in text.chars() {
            press(input, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_and_editing() {
        let mut input = TextInput::new("Usuario");
        type_str(&mut input, "maria");
        assert_eq!(input.value(), "maria");

        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "mari");

        press(&mut input, KeyCode::Home);
        press(&mut input, KeyCode::Delete);
        assert_eq!(input.value(), "ari");
    }

    #[test]
    fn test_cursor_insertion() {
        let mut input = TextInput::new("Email");
        type_str(&mut input, "ab");
        press(&mut input, KeyCode::Left);
        type_str(&mut input, "X");
        assert_eq!(input.value(), "aXb");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new("Usuario");
        type_str(&mut input, "peña");
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "pea");
    }

    #[test]
    fn test_clear_line() {
        let mut input = TextInput::new("Contraseña");
        type_str(&mut input, "secret");
        input.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(input.value(), "");
    }
}
