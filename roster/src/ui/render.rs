//! Render orchestration for the roster TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputMode};
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{
    CardWidget, EmptySlot, HistoryWidget, HotkeyBarWidget, InputWidget, StatusBarWidget,
};

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);
    render_team(frame, app, &layout.card_areas);

    let history =
        HistoryWidget::new(&app.board.history, &app.theme).scroll(app.board.history_scroll);
    frame.render_widget(history, layout.history_area);

    let status = StatusBarWidget::new(
        app.input_mode,
        app.session().store().state(),
        app.session().history().len(),
        &app.theme,
    )
    .notice(app.board.notice());
    frame.render_widget(status, layout.status_bar);

    frame.render_widget(HotkeyBarWidget::new(app.input_mode), layout.hotkey_bar);

    render_input(frame, app, layout.input_area);

    if app.show_help {
        render_help_overlay(frame, app, area);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let next_team = app.session().history().len() + 1;
    let line = Line::from(Span::styled(
        format!(" Roster Builder | Team {next_team} "),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Cards fill slots left to right; running lookups take the next slots.
fn render_team(frame: &mut Frame, app: &App, areas: &[Rect]) {
    let cards = &app.board.cards;
    let mut in_flight = app.in_flight().iter();

    for (slot, area) in areas.iter().enumerate() {
        match cards.get(slot) {
            Some(record) => frame.render_widget(CardWidget::new(record, &app.theme), *area),
            None => {
                let name = in_flight.next().map(String::as_str);
                let empty = EmptySlot::new(slot, &app.theme).looking_up(name, app.animation_frame);
                frame.render_widget(empty, *area);
            }
        }
    }
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = app.input_mode == InputMode::Insert;

    let placeholder = if app.open_slots() == 0 {
        "Team is full. Press 'c' to start a new one"
    } else {
        "Press 'i' and type a creature name"
    };

    let input = InputWidget::new(app.input_buffer(), &app.theme)
        .cursor_position(app.cursor_position())
        .active(is_active)
        .placeholder(placeholder);

    frame.render_widget(input, area);
}

fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(48, 20, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().add_modifier(Modifier::UNDERLINED),
        ))
    };

    let help_text = vec![
        Line::from(Span::styled(
            " Roster Builder - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Input Modes:"),
        Line::from("  i/a/Enter   Type a creature name"),
        Line::from("  Enter       Add it to the team"),
        Line::from("  Esc         Return to NORMAL mode"),
        Line::from(""),
        heading("Team (NORMAL mode):"),
        Line::from("  c           Clear the current team"),
        Line::from("  j/k         Scroll history"),
        Line::from("  g/G         First/latest team"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from("Three creatures complete a team and add"),
        Line::from("it to the history."),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}
