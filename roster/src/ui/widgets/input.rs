//! Input field widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::RosterTheme;

/// Single-line name entry with a block cursor
pub struct InputWidget<'a> {
    content: &'a str,
    cursor_position: usize,
    theme: &'a RosterTheme,
    placeholder: &'a str,
    is_active: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(content: &'a str, theme: &'a RosterTheme) -> Self {
        Self {
            content,
            cursor_position: content.chars().count(),
            theme,
            placeholder: "Creature name...",
            is_active: true,
        }
    }

    pub fn cursor_position(mut self, pos: usize) -> Self {
        self.cursor_position = pos;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Add creature ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.is_active));

        let inner = block.inner(area);
        block.render(area, buf);

        let prompt = Span::styled("> ", self.theme.input_style());

        let line = if self.content.is_empty() && !self.is_active {
            Line::from(vec![
                prompt,
                Span::styled(self.placeholder, Style::default().add_modifier(Modifier::DIM)),
            ])
        } else {
            // Character-based slicing keeps the cursor unicode-safe
            let before_cursor: String = self.content.chars().take(self.cursor_position).collect();
            let at_cursor = self
                .content
                .chars()
                .nth(self.cursor_position)
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            let after_cursor: String = self
                .content
                .chars()
                .skip(self.cursor_position + 1)
                .collect();

            let cursor_style = if self.is_active {
                Style::default()
                    .add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
                    .fg(self.theme.input_text)
            } else {
                Style::default()
            };

            Line::from(vec![
                prompt,
                Span::raw(before_cursor),
                Span::styled(at_cursor, cursor_style),
                Span::raw(after_cursor),
            ])
        };

        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(widget: InputWidget<'_>) -> String {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_placeholder_when_idle() {
        let theme = RosterTheme::default();
        let text = rendered(InputWidget::new("", &theme).active(false));
        assert!(text.contains("> Creature name..."));
    }

    #[test]
    fn test_content_with_cursor() {
        let theme = RosterTheme::default();
        let text = rendered(InputWidget::new("pikachu", &theme).cursor_position(2));
        assert!(text.contains("> pikachu"));
    }
}
