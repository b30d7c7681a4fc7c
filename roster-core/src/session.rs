//! RosterSession - the add / clear use cases wired to a store, a fetcher and a view.
//!
//! Adding a creature is split into two halves so a host can run lookups on
//! its own tasks:
//!
//! ```ignore
//! let pending = session.begin_add("pikachu", &mut view)?;   // reserve a slot
//! let result = fetcher.fetch(pending.name()).await;         // anywhere
//! session.complete_add(pending, result, &mut view)?;        // commit + render
//! ```
//!
//! [`RosterSession::add_creature`] does all three in sequence.

use std::sync::Arc;

use thiserror::Error;

use crate::fetch::{CreatureFetcher, FetchError, PokeApiFetcher};
use crate::history::History;
use crate::record::CreatureRecord;
use crate::store::{CommitOutcome, ForeignReservation, Reservation, RosterFull, RosterStore};
use crate::view::RosterView;

/// Errors surfaced by roster operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error(transparent)]
    Full(#[from] RosterFull),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Lookup for {name} was started by a different roster.")]
    ForeignLookup { name: String },
}

impl RosterError {
    pub fn is_full(&self) -> bool {
        matches!(self, RosterError::Full(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RosterError::Fetch(FetchError::NotFound { .. }))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, RosterError::Fetch(FetchError::Transport(_)))
    }
}

/// Configuration for a roster session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// API root override. `None` means `POKEAPI_BASE_URL` or the public API.
    pub api_base: Option<String>,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point lookups at a different API root.
    pub fn with_api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = Some(url.into());
        self
    }
}

/// A lookup that holds a slot and is waiting for its result.
#[derive(Debug)]
pub struct PendingAdd {
    name: String,
    reservation: Reservation,
}

impl PendingAdd {
    /// The trimmed name to look up.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One roster-building session: a store and the fetcher feeding it.
pub struct RosterSession<F = PokeApiFetcher> {
    store: RosterStore,
    fetcher: Arc<F>,
}

impl RosterSession<PokeApiFetcher> {
    /// Create a session that looks creatures up on PokeAPI.
    pub fn new(config: SessionConfig) -> Result<Self, RosterError> {
        let config_err = |e: pokeapi::Error| RosterError::Config(e.to_string());

        let api = match config.api_base {
            Some(base) => pokeapi::PokeApi::new()
                .and_then(|api| api.with_base_url(base))
                .map_err(config_err)?,
            None => pokeapi::PokeApi::from_env().map_err(config_err)?,
        };

        Ok(Self::with_fetcher(PokeApiFetcher::new(api)))
    }
}

impl<F: CreatureFetcher> RosterSession<F> {
    /// Create a session around any fetcher.
    pub fn with_fetcher(fetcher: F) -> Self {
        Self {
            store: RosterStore::new(),
            fetcher: Arc::new(fetcher),
        }
    }

    /// Reserve a slot for `name`.
    ///
    /// On a full team the view is notified and no lookup should be made.
    pub fn begin_add(
        &mut self,
        name: &str,
        view: &mut dyn RosterView,
    ) -> Result<PendingAdd, RosterError> {
        match self.store.try_reserve_slot() {
            Ok(reservation) => {
                let name = name.trim().to_string();
                tracing::debug!(%name, pending = self.store.pending(), "slot reserved");
                Ok(PendingAdd { name, reservation })
            }
            Err(full) => {
                let err = RosterError::from(full);
                tracing::warn!(name = name.trim(), "{err}");
                view.notify(&err);
                Err(err)
            }
        }
    }

    /// Apply the result of a lookup started by [`RosterSession::begin_add`].
    ///
    /// A failed lookup gives its slot back and leaves the team untouched.
    /// A successful one is committed and drawn; when it completes the team,
    /// the history view (if any) is redrawn too.
    pub fn complete_add(
        &mut self,
        pending: PendingAdd,
        result: Result<CreatureRecord, FetchError>,
        view: &mut dyn RosterView,
    ) -> Result<CommitOutcome, RosterError> {
        let PendingAdd { name, reservation } = pending;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                if let Err(foreign) = self.store.release(reservation) {
                    return Err(Self::refuse_foreign(name, foreign, view));
                }
                match &e {
                    FetchError::NotFound { status, .. } => {
                        tracing::warn!(%name, ?status, "creature not found")
                    }
                    FetchError::Transport(reason) => {
                        tracing::error!(%name, %reason, "creature lookup failed")
                    }
                }
                let err = RosterError::from(e);
                view.notify(&err);
                return Err(err);
            }
        };

        tracing::debug!(%name, id = record.id(), "committing creature");
        let outcome = match self.store.commit(reservation, record.clone()) {
            Ok(outcome) => outcome,
            Err(foreign) => return Err(Self::refuse_foreign(name, foreign, view)),
        };
        view.render_card(&record);

        if let CommitOutcome::TeamCompleted(snapshot) = &outcome {
            match view.history_view() {
                Some(history_view) => history_view.render_history(self.store.history().snapshots()),
                None => tracing::error!(
                    team = snapshot.ordinal(),
                    "no history view registered; team recorded but not rendered"
                ),
            }
        }

        Ok(outcome)
    }

    /// A pending add from another session never touches this team.
    ///
    /// Its reservation is dropped here, so the issuing session keeps that
    /// slot held.
    fn refuse_foreign(
        name: String,
        foreign: ForeignReservation,
        view: &mut dyn RosterView,
    ) -> RosterError {
        let ForeignReservation { reservation: _ } = foreign;
        let err = RosterError::ForeignLookup { name };
        tracing::error!("{err}");
        view.notify(&err);
        err
    }

    /// Reserve, look up, and commit in one go.
    pub async fn add_creature(
        &mut self,
        name: &str,
        view: &mut dyn RosterView,
    ) -> Result<CommitOutcome, RosterError> {
        let pending = self.begin_add(name, view)?;
        let result = self.fetcher.fetch(pending.name()).await;
        self.complete_add(pending, result, view)
    }

    /// Empty the current team and its cards. History is kept.
    pub fn clear(&mut self, view: &mut dyn RosterView) {
        self.store.clear();
        view.clear_cards();
        tracing::debug!(teams = self.store.history().len(), "team cleared");
    }

    /// Shared handle to the fetcher, for running lookups off the session.
    pub fn fetcher(&self) -> Arc<F> {
        Arc::clone(&self.fetcher)
    }

    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    pub fn roster(&self) -> &[CreatureRecord] {
        self.store.roster()
    }

    pub fn history(&self) -> &History {
        self.store.history()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ROSTER_CAPACITY;

    #[test]
    fn test_session_config() {
        let config = SessionConfig::new().with_api_base("http://127.0.0.1:8000/api/v2");
        assert_eq!(config.api_base.as_deref(), Some("http://127.0.0.1:8000/api/v2"));
    }

    #[test]
    fn test_session_rejects_bad_base_url() {
        let err = RosterSession::new(SessionConfig::new().with_api_base("ftp://nope"))
            .err()
            .expect("non-http base should be rejected");
        assert!(matches!(err, RosterError::Config(_)));
    }

    #[test]
    fn test_error_classification() {
        let full = RosterError::from(RosterFull { capacity: 3 });
        assert!(full.is_full());
        assert_eq!(
            full.to_string(),
            "Cannot add more creatures. The team is complete."
        );

        let missing = RosterError::from(FetchError::NotFound {
            name: "x".into(),
            status: Some(404),
        });
        assert!(missing.is_not_found());

        let transport = RosterError::from(FetchError::Transport("reset".into()));
        assert!(transport.is_transport());
        assert!(!transport.is_full());
    }

    #[tokio::test]
    async fn test_pending_add_from_other_session_is_refused() {
        use crate::testing::{fixture, MockFetcher, RecordingView};

        let mut first = RosterSession::with_fetcher(MockFetcher::with_starters());
        let mut second = RosterSession::with_fetcher(MockFetcher::with_starters());
        let mut view = RecordingView::new();
        for name in ["pikachu", "charmander", "bulbasaur"] {
            second.add_creature(name, &mut view).await.unwrap();
        }

        let pending = first.begin_add("eevee", &mut view).unwrap();
        let err = second
            .complete_add(pending, Ok(fixture("eevee")), &mut view)
            .unwrap_err();

        assert_eq!(
            err,
            RosterError::ForeignLookup {
                name: "eevee".into()
            }
        );
        assert_eq!(second.roster().len(), ROSTER_CAPACITY);
        assert_eq!(second.history().len(), 1);
        assert_eq!(second.store().pending(), 0);
        assert_eq!(view.cards.len(), 3);
        assert_eq!(
            view.notices.last().map(String::as_str),
            Some("Lookup for eevee was started by a different roster.")
        );
    }
}
