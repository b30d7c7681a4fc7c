//! The seam between the roster engine and whatever draws it.
//!
//! Views are projections: the session calls them after state changes and
//! never reads anything back.

use std::sync::Arc;

use crate::history::HistorySnapshot;
use crate::record::CreatureRecord;
use crate::session::RosterError;

/// Renders the list of completed teams.
pub trait HistoryView {
    /// Redraw the whole history from scratch.
    fn render_history(&mut self, snapshots: &[Arc<HistorySnapshot>]);
}

/// Renders the team being built and user-facing notices.
pub trait RosterView {
    /// Append one creature card to the team area.
    fn render_card(&mut self, record: &CreatureRecord);

    /// Remove every card from the team area.
    fn clear_cards(&mut self);

    /// Show an error to the user.
    fn notify(&mut self, error: &RosterError);

    /// The history renderer, if this host has one.
    ///
    /// Hosts without a history area keep the default; snapshots are still
    /// recorded by the store.
    fn history_view(&mut self) -> Option<&mut dyn HistoryView> {
        None
    }
}
