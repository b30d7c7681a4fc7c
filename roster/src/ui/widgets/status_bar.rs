//! Status bar and hotkey bar widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use roster_core::{RosterState, ROSTER_CAPACITY};

use crate::app::InputMode;
use crate::board::NoticeKind;
use crate::ui::theme::RosterTheme;

/// Mode, team fill and the latest notice
pub struct StatusBarWidget<'a> {
    input_mode: InputMode,
    state: RosterState,
    teams: usize,
    theme: &'a RosterTheme,
    notice: Option<(&'a str, NoticeKind)>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(
        input_mode: InputMode,
        state: RosterState,
        teams: usize,
        theme: &'a RosterTheme,
    ) -> Self {
        Self {
            input_mode,
            state,
            teams,
            theme,
            notice: None,
        }
    }

    pub fn notice(mut self, notice: Option<(&'a str, NoticeKind)>) -> Self {
        self.notice = notice;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Input mode indicator (vim-style)
        let (input_mode_text, input_mode_style) = match self.input_mode {
            InputMode::Normal => (
                "NORMAL",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            InputMode::Insert => (
                "INSERT",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        };

        let filled = match self.state {
            RosterState::Empty => 0,
            RosterState::Partial(n) => n,
            RosterState::Full => ROSTER_CAPACITY,
        };
        let team_style = if self.state == RosterState::Full {
            Style::default().fg(self.theme.info_text).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut spans = vec![
            Span::styled(format!("-- {input_mode_text} --"), input_mode_style),
            Span::raw(" | "),
            Span::styled(format!("Team: {filled}/{ROSTER_CAPACITY}"), team_style),
            Span::raw(" | "),
            Span::styled(format!("Completed: {}", self.teams), self.theme.system_style()),
        ];

        if let Some((text, kind)) = self.notice {
            let style = match kind {
                NoticeKind::Info => Style::default().fg(self.theme.info_text),
                NoticeKind::Error => Style::default()
                    .fg(self.theme.error_text)
                    .add_modifier(Modifier::BOLD),
            };
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(text, style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Hotkey bar widget
pub struct HotkeyBarWidget {
    input_mode: InputMode,
}

impl HotkeyBarWidget {
    pub fn new(input_mode: InputMode) -> Self {
        Self { input_mode }
    }
}

impl Widget for HotkeyBarWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hotkeys = match self.input_mode {
            InputMode::Normal => vec![
                ("i:add", true),
                ("c:clear", true),
                ("j/k:history", true),
                ("q:quit", true),
                ("?:help", false),
            ],
            InputMode::Insert => vec![
                ("Esc:normal", true),
                ("Enter:add", true),
                ("↑↓:recent", false),
            ],
        };

        let spans: Vec<Span> = hotkeys
            .iter()
            .flat_map(|(text, primary)| {
                let style = if *primary {
                    Style::default()
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };
                vec![Span::styled(*text, style), Span::raw("  ")]
            })
            .collect();

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
