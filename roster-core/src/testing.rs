//! Testing utilities for the roster engine.
//!
//! This module provides tools for integration testing:
//! - `MockFetcher` for deterministic lookups without network calls
//! - `RecordingView` for asserting what the session asked the host to draw
//! - `TestHarness` for scripted roster scenarios
//! - Assertion helpers for verifying roster state

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::fetch::{CreatureFetcher, FetchError};
use crate::history::HistorySnapshot;
use crate::record::CreatureRecord;
use crate::session::{RosterError, RosterSession};
use crate::store::CommitOutcome;
use crate::view::{HistoryView, RosterView};

const SPRITE_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// Canned records for a few well-known creatures.
///
/// Panics on names it does not know; only meant for tests.
pub fn fixture(name: &str) -> CreatureRecord {
    let (id, types): (u32, &[&str]) = match name {
        "bulbasaur" => (1, &["grass", "poison"][..]),
        "charmander" => (4, &["fire"][..]),
        "squirtle" => (7, &["water"][..]),
        "pikachu" => (25, &["electric"][..]),
        "eevee" => (133, &["normal"][..]),
        other => panic!("no fixture for {other}"),
    };

    CreatureRecord::new(
        id,
        name,
        types.iter().map(|t| t.to_string()).collect(),
        format!("{SPRITE_BASE}/{id}.png"),
    )
    .expect("fixtures are valid records")
}

/// A fetcher that answers from a table instead of the network.
///
/// Names missing from the table resolve to `NotFound` with status 404.
#[derive(Default)]
pub struct MockFetcher {
    responses: Mutex<HashMap<String, Result<CreatureRecord, FetchError>>>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Knows every name [`fixture`] knows.
    pub fn with_starters() -> Self {
        let fetcher = Self::new();
        for name in ["bulbasaur", "charmander", "squirtle", "pikachu", "eevee"] {
            fetcher.respond(name, Ok(fixture(name)));
        }
        fetcher
    }

    /// Script the answer for `name`.
    pub fn respond(&self, name: &str, response: Result<CreatureRecord, FetchError>) {
        self.responses
            .lock()
            .expect("mock fetcher lock poisoned")
            .insert(name.to_string(), response);
    }

    /// Make `name` fail at the transport level.
    pub fn fail_transport(&self, name: &str, reason: &str) {
        self.respond(name, Err(FetchError::Transport(reason.to_string())));
    }

    /// Every name looked up so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("mock fetcher lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock fetcher lock poisoned").len()
    }
}

#[async_trait]
impl CreatureFetcher for MockFetcher {
    async fn fetch(&self, name: &str) -> Result<CreatureRecord, FetchError> {
        self.calls
            .lock()
            .expect("mock fetcher lock poisoned")
            .push(name.to_string());

        self.responses
            .lock()
            .expect("mock fetcher lock poisoned")
            .get(name)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::NotFound {
                    name: name.to_string(),
                    status: Some(404),
                })
            })
    }
}

/// A view that records every call made to it.
#[derive(Debug)]
pub struct RecordingView {
    /// Cards currently shown, in render order.
    pub cards: Vec<CreatureRecord>,
    /// Number of `clear_cards` calls.
    pub clears: usize,
    /// Each history render, as the snapshots it was given.
    pub history_renders: Vec<Vec<Arc<HistorySnapshot>>>,
    /// Every notice shown, as display text.
    pub notices: Vec<String>,
    has_history: bool,
}

impl RecordingView {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            clears: 0,
            history_renders: Vec::new(),
            notices: Vec::new(),
            has_history: true,
        }
    }

    /// A host that has no history area.
    pub fn without_history() -> Self {
        Self {
            has_history: false,
            ..Self::new()
        }
    }

    pub fn card_names(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.name()).collect()
    }
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterView for RecordingView {
    fn render_card(&mut self, record: &CreatureRecord) {
        self.cards.push(record.clone());
    }

    fn clear_cards(&mut self) {
        self.cards.clear();
        self.clears += 1;
    }

    fn notify(&mut self, error: &RosterError) {
        self.notices.push(error.to_string());
    }

    fn history_view(&mut self) -> Option<&mut dyn HistoryView> {
        if self.has_history {
            Some(self)
        } else {
            None
        }
    }
}

impl HistoryView for RecordingView {
    fn render_history(&mut self, snapshots: &[Arc<HistorySnapshot>]) {
        self.history_renders.push(snapshots.to_vec());
    }
}

/// Test harness for running roster scenarios.
pub struct TestHarness {
    /// The session under test.
    pub session: RosterSession<MockFetcher>,
    /// What the session drew.
    pub view: RecordingView,
}

impl TestHarness {
    /// A harness whose fetcher knows the starter fixtures.
    pub fn new() -> Self {
        Self::with_fetcher(MockFetcher::with_starters())
    }

    pub fn with_fetcher(fetcher: MockFetcher) -> Self {
        Self {
            session: RosterSession::with_fetcher(fetcher),
            view: RecordingView::new(),
        }
    }

    /// Add a creature through the full session flow.
    pub async fn add(&mut self, name: &str) -> Result<CommitOutcome, RosterError> {
        self.session.add_creature(name, &mut self.view).await
    }

    /// Clear the team.
    pub fn clear(&mut self) {
        self.session.clear(&mut self.view);
    }

    pub fn roster_names(&self) -> Vec<&str> {
        self.session.roster().iter().map(|r| r.name()).collect()
    }

    pub fn history_len(&self) -> usize {
        self.session.history().len()
    }

    /// Lookups the session has issued.
    pub fn fetch_count(&self) -> usize {
        self.session.fetcher().call_count()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the current team holds exactly these names, in order.
#[track_caller]
pub fn assert_roster(harness: &TestHarness, names: &[&str]) {
    let actual = harness.roster_names();
    assert_eq!(actual, names, "Expected team {names:?}, got {actual:?}");
}

/// Assert how many teams have been completed.
#[track_caller]
pub fn assert_history_len(harness: &TestHarness, expected: usize) {
    let actual = harness.history_len();
    assert_eq!(
        actual, expected,
        "Expected {expected} completed teams, got {actual}"
    );
}

/// Assert the last notice shown to the user.
#[track_caller]
pub fn assert_last_notice(harness: &TestHarness, expected: &str) {
    assert_eq!(
        harness.view.notices.last().map(String::as_str),
        Some(expected),
        "Expected last notice {expected:?}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fetcher_scripted() {
        let fetcher = MockFetcher::with_starters();
        let record = fetcher.fetch("eevee").await.unwrap();
        assert_eq!(record.id(), 133);
        assert_eq!(fetcher.calls(), vec!["eevee"]);
    }

    #[tokio::test]
    async fn test_mock_fetcher_unknown_is_not_found() {
        let fetcher = MockFetcher::new();
        let err = fetcher.fetch("missingno").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound { status: Some(404), .. }));
    }

    #[tokio::test]
    async fn test_harness_basic_flow() {
        let mut harness = TestHarness::new();
        harness.add("squirtle").await.unwrap();

        assert_roster(&harness, &["squirtle"]);
        assert_eq!(harness.view.card_names(), vec!["squirtle"]);
        assert_eq!(harness.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_harness_transport_failure() {
        let fetcher = MockFetcher::new();
        fetcher.fail_transport("pikachu", "connection reset");
        let mut harness = TestHarness::with_fetcher(fetcher);

        let err = harness.add("pikachu").await.unwrap_err();
        assert!(err.is_transport());
        assert_last_notice(&harness, "Lookup failed: connection reset");
        assert_roster(&harness, &[]);
    }
}
