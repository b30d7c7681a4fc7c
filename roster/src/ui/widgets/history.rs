//! Completed-team history panel

use std::sync::Arc;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use roster_core::HistorySnapshot;

use crate::ui::theme::RosterTheme;

/// Every completed team, oldest first
pub struct HistoryWidget<'a> {
    snapshots: &'a [Arc<HistorySnapshot>],
    scroll: usize,
    theme: &'a RosterTheme,
}

impl<'a> HistoryWidget<'a> {
    pub fn new(snapshots: &'a [Arc<HistorySnapshot>], theme: &'a RosterTheme) -> Self {
        Self {
            snapshots,
            scroll: 0,
            theme,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let mut lines = Vec::new();
        for snapshot in self.snapshots {
            lines.push(Line::from(Span::styled(
                snapshot.title(),
                self.theme.card_title_style(),
            )));
            for member in snapshot.members() {
                let label = format!("  #{:<4} {:<14}", member.id(), member.name());
                let mut spans = vec![Span::raw(label)];
                for kind in member.types() {
                    spans.push(Span::styled(format!(" {kind}"), self.theme.type_style(kind)));
                }
                lines.push(Line::from(spans));
            }
            lines.push(Line::from(""));
        }
        lines
    }
}

impl Widget for HistoryWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" History ({}) ", self.snapshots.len()))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let lines = if self.snapshots.is_empty() {
            vec![Line::from(Span::styled(
                "Completed teams will appear here.",
                self.theme.system_style(),
            ))]
        } else {
            self.lines()
        };

        let scroll = self.scroll.min(u16::MAX as usize) as u16;
        Paragraph::new(lines)
            .block(block)
            .scroll((scroll, 0))
            .render(area, buf);
    }
}
