//! Main application state and logic

use std::collections::VecDeque;
use std::sync::Arc;

use roster_core::{
    CommitOutcome, CreatureRecord, FetchError, PendingAdd, PokeApiFetcher, RosterSession,
    ROSTER_CAPACITY,
};

use crate::board::Board;
use crate::ui::theme::RosterTheme;

/// Vim-style input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal mode - hotkeys (default)
    #[default]
    Normal,
    /// Insert mode - typing a creature name
    Insert,
}

/// A lookup that has settled on its task and is ready to be applied.
#[derive(Debug)]
pub struct LookupDone {
    pub pending: PendingAdd,
    pub result: Result<CreatureRecord, FetchError>,
}

/// Main application state
pub struct App {
    session: RosterSession,
    pub board: Board,
    pub theme: RosterTheme,

    // Input state
    pub input_mode: InputMode,
    input_buffer: String,
    cursor_position: usize,
    pub input_history: VecDeque<String>,
    pub history_index: Option<usize>,

    pub show_help: bool,
    pub should_quit: bool,

    // Lookups currently running, oldest first
    in_flight: Vec<String>,
    pub animation_frame: u8,
}

impl App {
    pub fn new(session: RosterSession) -> Self {
        let mut board = Board::new();
        board.set_info("Press 'i' to enter a creature name, '?' for help");

        Self {
            session,
            board,
            theme: RosterTheme::default(),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            cursor_position: 0,
            input_history: VecDeque::with_capacity(50),
            history_index: None,
            show_help: false,
            should_quit: false,
            in_flight: Vec::new(),
            animation_frame: 0,
        }
    }

    /// Reserve a slot for `name`. `None` when there is nothing to look up.
    pub fn begin_lookup(&mut self, name: &str) -> Option<PendingAdd> {
        if name.trim().is_empty() {
            return None;
        }

        // The session has already notified the board on failure
        let pending = self.session.begin_add(name, &mut self.board).ok()?;
        self.in_flight.push(pending.name().to_string());
        self.board.set_info(format!("Looking up {}...", pending.name()));
        Some(pending)
    }

    /// Apply a settled lookup to the team.
    pub fn finish_lookup(&mut self, done: LookupDone) {
        let LookupDone { pending, result } = done;

        if let Some(pos) = self.in_flight.iter().position(|n| n == pending.name()) {
            self.in_flight.remove(pos);
        }

        if let Ok(CommitOutcome::TeamCompleted(snapshot)) =
            self.session.complete_add(pending, result, &mut self.board)
        {
            self.board.set_info(format!("{} complete!", snapshot.title()));
        }
    }

    pub fn clear_team(&mut self) {
        self.session.clear(&mut self.board);
    }

    pub fn fetcher(&self) -> Arc<PokeApiFetcher> {
        self.session.fetcher()
    }

    pub fn session(&self) -> &RosterSession {
        &self.session
    }

    /// Names still being looked up.
    pub fn in_flight(&self) -> &[String] {
        &self.in_flight
    }

    /// Slots left once every running lookup lands.
    pub fn open_slots(&self) -> usize {
        ROSTER_CAPACITY.saturating_sub(self.session.roster().len() + self.session.store().pending())
    }

    /// Tick for animations
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn enter_insert_mode(&mut self) {
        self.input_mode = InputMode::Insert;
        self.show_help = false;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Take the typed name, remembering it for history browsing.
    pub fn submit_input(&mut self) -> Option<String> {
        let input = std::mem::take(&mut self.input_buffer);
        self.cursor_position = 0;
        self.history_index = None;

        let input = input.trim().to_string();
        if input.is_empty() {
            return None;
        }

        self.input_history.push_front(input.clone());
        self.input_history.truncate(50);
        Some(input)
    }

    /// Handle a typed character (unicode-safe)
    pub fn type_char(&mut self, c: char) {
        let byte_pos = self.byte_index(self.cursor_position);
        self.input_buffer.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.remove_char_at_cursor();
        }
    }

    pub fn delete(&mut self) {
        self.remove_char_at_cursor();
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.input_buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }

    /// Recall an older name
    pub fn history_prev(&mut self) {
        let next = match self.history_index {
            None => 0,
            Some(i) => i + 1,
        };
        if let Some(entry) = self.input_history.get(next) {
            self.set_input(entry.clone());
            self.history_index = Some(next);
        }
    }

    /// Recall a newer name, or return to an empty line
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(0) => {
                self.clear_input();
                self.history_index = None;
            }
            Some(i) => {
                if let Some(entry) = self.input_history.get(i - 1) {
                    self.set_input(entry.clone());
                    self.history_index = Some(i - 1);
                }
            }
        }
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn set_input(&mut self, content: impl Into<String>) {
        self.input_buffer = content.into();
        self.cursor_position = self.input_buffer.chars().count();
    }

    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.input_buffer
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len())
    }

    fn remove_char_at_cursor(&mut self) {
        if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position) {
            self.input_buffer
                .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::NoticeKind;
    use roster_core::testing::fixture;
    use roster_core::SessionConfig;

    fn test_app() -> App {
        // Nothing listens on the discard port; lookups are fed in by hand
        let config = SessionConfig::new().with_api_base("http://127.0.0.1:9/api/v2");
        App::new(RosterSession::new(config).unwrap())
    }

    fn land(app: &mut App, name: &str) {
        let pending = app.begin_lookup(name).unwrap();
        app.finish_lookup(LookupDone {
            pending,
            result: Ok(fixture(name)),
        });
    }

    #[test]
    fn test_lookup_fills_team() {
        let mut app = test_app();
        land(&mut app, "pikachu");
        land(&mut app, "charmander");
        assert_eq!(app.board.cards.len(), 2);
        assert!(app.board.history.is_empty());

        land(&mut app, "bulbasaur");
        assert_eq!(app.board.history.len(), 1);
        assert_eq!(app.board.notice(), Some(("Team 1 complete!", NoticeKind::Info)));
        assert!(app.in_flight().is_empty());
    }

    #[test]
    fn test_full_team_refuses_lookup() {
        let mut app = test_app();
        for name in ["pikachu", "charmander", "bulbasaur"] {
            land(&mut app, name);
        }

        assert!(app.begin_lookup("eevee").is_none());
        assert_eq!(
            app.board.notice(),
            Some(("Cannot add more creatures. The team is complete.", NoticeKind::Error))
        );
    }

    #[test]
    fn test_pending_lookups_hold_slots() {
        let mut app = test_app();
        let first = app.begin_lookup("pikachu").unwrap();
        let _second = app.begin_lookup("eevee").unwrap();
        assert_eq!(app.open_slots(), 1);
        assert_eq!(app.in_flight(), ["pikachu", "eevee"]);

        app.finish_lookup(LookupDone {
            pending: first,
            result: Err(FetchError::NotFound {
                name: "pikachu".into(),
                status: Some(404),
            }),
        });
        assert_eq!(app.open_slots(), 2);
        assert_eq!(app.in_flight(), ["eevee"]);
        assert_eq!(
            app.board.notice(),
            Some(("Creature not found: pikachu", NoticeKind::Error))
        );
    }

    #[test]
    fn test_blank_name_is_ignored() {
        let mut app = test_app();
        assert!(app.begin_lookup("   ").is_none());
        assert_eq!(app.open_slots(), ROSTER_CAPACITY);
    }

    #[test]
    fn test_clear_team_keeps_history() {
        let mut app = test_app();
        for name in ["pikachu", "charmander", "bulbasaur"] {
            land(&mut app, name);
        }
        app.clear_team();
        assert!(app.board.cards.is_empty());
        assert!(app.session().roster().is_empty());
        assert_eq!(app.board.history.len(), 1);
    }

    #[test]
    fn test_input_editing() {
        let mut app = test_app();
        for c in "pkachu".chars() {
            app.type_char(c);
        }
        app.cursor_home();
        app.cursor_right();
        app.type_char('i');
        assert_eq!(app.input_buffer(), "pikachu");

        app.cursor_end();
        app.backspace();
        assert_eq!(app.input_buffer(), "pikach");
        app.cursor_home();
        app.delete();
        assert_eq!(app.input_buffer(), "ikach");
    }

    #[test]
    fn test_input_history() {
        let mut app = test_app();
        app.set_input("pikachu");
        assert_eq!(app.submit_input().as_deref(), Some("pikachu"));
        app.set_input("  eevee ");
        assert_eq!(app.submit_input().as_deref(), Some("eevee"));
        app.set_input("   ");
        assert_eq!(app.submit_input(), None);

        app.history_prev();
        assert_eq!(app.input_buffer(), "eevee");
        app.history_prev();
        assert_eq!(app.input_buffer(), "pikachu");
        app.history_prev();
        assert_eq!(app.input_buffer(), "pikachu");
        app.history_next();
        assert_eq!(app.input_buffer(), "eevee");
        app.history_next();
        assert_eq!(app.input_buffer(), "");
    }
}
