//! The TUI's side of the roster view: what the panels currently show.

use std::sync::Arc;

use roster_core::{CreatureRecord, HistorySnapshot, HistoryView, RosterError, RosterView};

/// Severity of the status-line notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Cards, history and the latest notice, as last rendered by the session.
#[derive(Debug, Default)]
pub struct Board {
    pub cards: Vec<CreatureRecord>,
    pub history: Vec<Arc<HistorySnapshot>>,
    pub history_scroll: usize,
    notice: Option<(String, NoticeKind)>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notice(&self) -> Option<(&str, NoticeKind)> {
        self.notice.as_ref().map(|(text, kind)| (text.as_str(), *kind))
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.notice = Some((text.into(), NoticeKind::Info));
    }

    pub fn scroll_history_up(&mut self, lines: usize) {
        self.history_scroll = self.history_scroll.saturating_sub(lines);
    }

    pub fn scroll_history_down(&mut self, lines: usize) {
        let max = self.history_line_count().saturating_sub(1);
        self.history_scroll = (self.history_scroll + lines).min(max);
    }

    /// Scroll so the most recent team's heading is the top line.
    pub fn scroll_to_latest(&mut self) {
        let latest = self
            .history
            .last()
            .map(|s| s.members().len() + 2)
            .unwrap_or(0);
        self.history_scroll = self.history_line_count().saturating_sub(latest);
    }

    /// Lines the history panel needs: a title plus one per member, and a gap.
    pub fn history_line_count(&self) -> usize {
        self.history.iter().map(|s| s.members().len() + 2).sum()
    }
}

impl RosterView for Board {
    fn render_card(&mut self, record: &CreatureRecord) {
        self.cards.push(record.clone());
        self.set_info(format!("Added {} (#{})", record.name(), record.id()));
    }

    fn clear_cards(&mut self) {
        self.cards.clear();
        self.set_info("Team cleared");
    }

    fn notify(&mut self, error: &RosterError) {
        self.notice = Some((error.to_string(), NoticeKind::Error));
    }

    fn history_view(&mut self) -> Option<&mut dyn HistoryView> {
        Some(self)
    }
}

impl HistoryView for Board {
    fn render_history(&mut self, snapshots: &[Arc<HistorySnapshot>]) {
        self.history = snapshots.to_vec();
        self.scroll_to_latest();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::testing::{fixture, MockFetcher};
    use roster_core::RosterSession;

    #[tokio::test]
    async fn test_board_tracks_session() {
        let mut session = RosterSession::with_fetcher(MockFetcher::with_starters());
        let mut board = Board::new();

        for name in ["pikachu", "charmander", "bulbasaur"] {
            session.add_creature(name, &mut board).await.unwrap();
        }

        assert_eq!(board.cards.len(), 3);
        assert_eq!(board.history.len(), 1);
        assert_eq!(board.history_line_count(), 5);

        session.clear(&mut board);
        assert!(board.cards.is_empty());
        assert_eq!(board.notice(), Some(("Team cleared", NoticeKind::Info)));
    }

    #[test]
    fn test_board_error_notice() {
        let mut board = Board::new();
        board.render_card(&fixture("eevee"));
        assert_eq!(board.notice(), Some(("Added eevee (#133)", NoticeKind::Info)));

        let err = RosterError::Fetch(roster_core::FetchError::Transport("timed out".into()));
        board.notify(&err);
        assert_eq!(board.notice(), Some(("Lookup failed: timed out", NoticeKind::Error)));
    }

    #[test]
    fn test_completed_team_scrolls_into_view() {
        use roster_core::RosterStore;

        let mut store = RosterStore::new();
        let mut board = Board::new();
        for _ in 0..2 {
            store.clear();
            for name in ["pikachu", "charmander", "bulbasaur"] {
                let reservation = store.try_reserve_slot().unwrap();
                store.commit(reservation, fixture(name)).unwrap();
            }
        }

        board.render_history(store.history().snapshots());
        assert_eq!(board.history[0].title(), "Team 1");
        assert_eq!(board.history_scroll, 5);

        board.scroll_history_up(10);
        assert_eq!(board.history_scroll, 0);
        board.scroll_to_latest();
        assert_eq!(board.history_scroll, 5);
    }

    #[test]
    fn test_history_scroll_is_bounded() {
        let mut board = Board::new();
        board.scroll_history_down(10);
        assert_eq!(board.history_scroll, 0);
        board.scroll_history_up(3);
        assert_eq!(board.history_scroll, 0);
    }
}
