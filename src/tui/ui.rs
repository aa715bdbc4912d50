//! Common UI components and utilities for the sign-up TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// Common UI styles
pub struct Styles;

impl Styles {
    pub fn default() -> Style {
        Style::default()
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn success() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn info() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn inactive() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn active_border() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn inactive_border() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn error_border() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn button() -> Style {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }
}

/// Single-line text input widget. The buffer is mutated directly on each
/// keystroke and only read out at submit time; no validation runs here.
#[derive(Debug, Clone)]
pub struct InputField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub is_focused: bool,
    pub masked: bool,
    /// Cursor position in characters, not bytes.
    cursor: usize,
}

impl InputField {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            is_focused: false,
            masked: false,
            cursor: 0,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.cursor = self.value.chars().count();
        self
    }

    /// Render the value as mask characters (password fields).
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    /// Column offset of the cursor in display cells. Masked fields render
    /// one bullet per character, so their offset is the character index;
    /// plain fields sum the display width of the characters before the
    /// cursor (double-width glyphs occupy two cells).
    fn cursor_column(&self) -> usize {
        if self.masked {
            self.cursor
        } else {
            self.value
                .chars()
                .take(self.cursor)
                .map(|c| c.width().unwrap_or(0))
                .sum()
        }
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Render the input field. `invalid` draws the border in the error color
    /// when the field currently carries a validation or submission error.
    pub fn render(&self, f: &mut Frame, area: Rect, invalid: bool) {
        let display_text = if self.value.is_empty() && !self.placeholder.is_empty() {
            self.placeholder.clone()
        } else if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        };

        let border_style = if self.is_focused {
            Styles::active_border()
        } else if invalid {
            Styles::error_border()
        } else {
            Styles::inactive_border()
        };

        let block = Block::default()
            .title(self.label.as_str())
            .borders(Borders::ALL)
            .border_style(border_style);

        let input_style = if self.value.is_empty() && !self.placeholder.is_empty() {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let paragraph = Paragraph::new(display_text).style(input_style).block(block);

        f.render_widget(paragraph, area);

        // Render cursor if focused
        if self.is_focused {
            let cursor_x = area.x + 1 + self.cursor_column() as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width - 1 {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete_track_cursor() {
        let mut field = InputField::new("Email");
        for c in "a@b".chars() {
            field.insert_char(c);
        }
        assert_eq!(field.value, "a@b");
        field.delete_char();
        assert_eq!(field.value, "a@");
        field.move_cursor_to_start();
        field.delete_char_forward();
        assert_eq!(field.value, "@");
    }

    #[test]
    fn test_multibyte_input_keeps_char_boundaries() {
        let mut field = InputField::new("Password");
        field.insert_char('ぱ');
        field.insert_char('す');
        field.move_cursor_left();
        field.insert_char('!');
        assert_eq!(field.value, "ぱ!す");
        field.delete_char();
        assert_eq!(field.value, "ぱす");
    }

    #[test]
    fn test_cursor_column_counts_display_cells() {
        let mut field = InputField::new("Email");
        field.insert_char('ぱ');
        field.insert_char('a');
        // A double-width glyph before the cursor pushes it two cells.
        assert_eq!(field.cursor_column(), 3);
        field.move_cursor_left();
        assert_eq!(field.cursor_column(), 2);

        // Masked fields render single-width bullets regardless of the
        // underlying characters.
        let mut masked = InputField::new("Password").masked();
        masked.insert_char('ぱ');
        masked.insert_char('す');
        assert_eq!(masked.cursor_column(), 2);
    }

    #[test]
    fn test_with_value_places_cursor_at_end() {
        let mut field = InputField::new("Email").with_value("@");
        field.insert_char('x');
        assert_eq!(field.value, "@x");
    }
}
