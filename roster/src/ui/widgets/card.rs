//! Creature card and empty slot widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use roster_core::CreatureRecord;

use crate::ui::theme::RosterTheme;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// One filled team slot
pub struct CardWidget<'a> {
    record: &'a CreatureRecord,
    theme: &'a RosterTheme,
}

impl<'a> CardWidget<'a> {
    pub fn new(record: &'a CreatureRecord, theme: &'a RosterTheme) -> Self {
        Self { record, theme }
    }
}

impl Widget for CardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(
                format!(" #{} {} ", self.record.id(), self.record.name()),
                self.theme.card_title_style(),
            ))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut badges = Vec::new();
        for (i, kind) in self.record.types().iter().enumerate() {
            if i > 0 {
                badges.push(Span::raw(" "));
            }
            badges.push(Span::styled(
                format!("[{}]", kind.to_uppercase()),
                self.theme.type_style(kind),
            ));
        }

        let lines = vec![
            Line::from(badges),
            Line::from(""),
            Line::from(Span::styled(self.record.image_alt(), self.theme.system_style())),
            Line::from(Span::styled(
                self.record.image_url().to_string(),
                Style::default().add_modifier(Modifier::UNDERLINED | Modifier::DIM),
            )),
        ];

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

/// A slot with no card yet, possibly waiting on a lookup
pub struct EmptySlot<'a> {
    slot: usize,
    looking_up: Option<&'a str>,
    frame: u8,
    theme: &'a RosterTheme,
}

impl<'a> EmptySlot<'a> {
    pub fn new(slot: usize, theme: &'a RosterTheme) -> Self {
        Self {
            slot,
            looking_up: None,
            frame: 0,
            theme,
        }
    }

    pub fn looking_up(mut self, name: Option<&'a str>, frame: u8) -> Self {
        self.looking_up = name;
        self.frame = frame;
        self
    }
}

impl Widget for EmptySlot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" Slot {} ", self.slot + 1))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let inner = block.inner(area);
        block.render(area, buf);

        let line = match self.looking_up {
            Some(name) => {
                let spinner = SPINNER[self.frame as usize % SPINNER.len()];
                Line::from(vec![
                    Span::styled(format!("{spinner} "), Style::default().fg(self.theme.pending)),
                    Span::styled(
                        format!("looking up {name}..."),
                        Style::default()
                            .fg(self.theme.pending)
                            .add_modifier(Modifier::ITALIC),
                    ),
                ])
            }
            None => Line::from(Span::styled("empty", self.theme.system_style())),
        };

        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::testing::fixture;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_card_shows_record() {
        let theme = RosterTheme::default();
        let record = fixture("bulbasaur");
        let area = Rect::new(0, 0, 40, 7);
        let mut buf = Buffer::empty(area);

        CardWidget::new(&record, &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("#1 bulbasaur"));
        assert!(text.contains("[GRASS] [POISON]"));
        assert!(text.contains("Pokemon bulbasaur image"));
    }

    #[test]
    fn test_empty_slot_spinner() {
        let theme = RosterTheme::default();
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);

        EmptySlot::new(1, &theme)
            .looking_up(Some("eevee"), 1)
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Slot 2"));
        assert!(text.contains("/ looking up eevee..."));
    }
}
