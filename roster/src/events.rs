//! Event handling for the roster TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, InputMode};

/// Result of handling an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
    /// A name was submitted and should be looked up
    AddCreature(String),
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.board.scroll_history_up(3);
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            app.board.scroll_history_down(3);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    if app.show_help {
        return handle_help_key(app, key);
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Insert => handle_insert_mode(app, key),
    }
}

/// Handle keys in NORMAL mode (hotkeys)
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('i') | KeyCode::Char('a') | KeyCode::Enter => {
            app.enter_insert_mode();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('c') => {
            app.clear_team();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') => EventResult::Quit,

        // History scrolling
        KeyCode::Char('j') | KeyCode::Down => {
            app.board.scroll_history_down(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.board.scroll_history_up(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('g') => {
            app.board.history_scroll = 0;
            EventResult::NeedsRedraw
        }
        KeyCode::Char('G') => {
            app.board.scroll_to_latest();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle keys in INSERT mode (typing a creature name)
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.enter_normal_mode();
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => match app.submit_input() {
            Some(name) => EventResult::AddCreature(name),
            None => EventResult::NeedsRedraw,
        },

        KeyCode::Left => {
            app.cursor_left();
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            app.cursor_right();
            EventResult::NeedsRedraw
        }
        KeyCode::Home => {
            app.cursor_home();
            EventResult::NeedsRedraw
        }
        KeyCode::End => {
            app.cursor_end();
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            app.backspace();
            EventResult::NeedsRedraw
        }
        KeyCode::Delete => {
            app.delete();
            EventResult::NeedsRedraw
        }
        KeyCode::Up => {
            app.history_prev();
            EventResult::NeedsRedraw
        }
        KeyCode::Down => {
            app.history_next();
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            app.type_char(c);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Any of these closes the help overlay
fn handle_help_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}
