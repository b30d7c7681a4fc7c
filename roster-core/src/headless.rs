//! Headless roster interface for programmatic use.
//!
//! This module provides a text-only way to drive a roster session. It's
//! designed for:
//! - Scripted sessions fed from stdin
//! - Integration tests that want readable output
//!
//! # Example
//!
//! ```ignore
//! use roster_core::headless::HeadlessRoster;
//! use roster_core::SessionConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut roster = HeadlessRoster::new(SessionConfig::new())?;
//!
//!     for line in roster.send("pikachu").await.lines {
//!         println!("{line}");
//!     }
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use crate::fetch::{CreatureFetcher, PokeApiFetcher};
use crate::history::HistorySnapshot;
use crate::record::CreatureRecord;
use crate::session::{RosterError, RosterSession, SessionConfig};
use crate::store::CommitOutcome;
use crate::view::{HistoryView, RosterView};

/// A [`RosterView`] that renders everything as plain text lines.
#[derive(Debug, Default)]
pub struct TextView {
    output: Vec<String>,
    without_history: bool,
}

impl TextView {
    pub fn new() -> Self {
        Self::default()
    }

    /// A view with no history area.
    pub fn without_history() -> Self {
        Self {
            output: Vec::new(),
            without_history: true,
        }
    }

    /// Take everything rendered since the last call.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    fn push(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }
}

/// Format one card as text.
pub fn card_lines(record: &CreatureRecord, indent: &str) -> Vec<String> {
    let image = if record.image_url().is_empty() {
        format!("({})", record.image_alt())
    } else {
        record.image_url().to_string()
    };

    vec![
        format!(
            "{indent}[#{}] {} ({})",
            record.id(),
            record.name(),
            record.types().join(", ")
        ),
        format!("{indent}  image: {image}"),
    ]
}

impl RosterView for TextView {
    fn render_card(&mut self, record: &CreatureRecord) {
        for line in card_lines(record, "") {
            self.push(line);
        }
    }

    fn clear_cards(&mut self) {
        self.push("[CLEARED] Team is empty.");
    }

    fn notify(&mut self, error: &RosterError) {
        self.push(format!("[ERROR] {error}"));
    }

    fn history_view(&mut self) -> Option<&mut dyn HistoryView> {
        if self.without_history {
            None
        } else {
            Some(self)
        }
    }
}

impl HistoryView for TextView {
    fn render_history(&mut self, snapshots: &[Arc<HistorySnapshot>]) {
        self.push("[HISTORY]");
        for snapshot in snapshots {
            self.push(format!("{}:", snapshot.title()));
            for member in snapshot.members() {
                for line in card_lines(member, "  ") {
                    self.push(line);
                }
            }
        }
    }
}

/// Output of one headless command.
#[derive(Debug, Default)]
pub struct HeadlessReply {
    pub lines: Vec<String>,
    pub quit: bool,
}

/// A roster session paired with a [`TextView`].
pub struct HeadlessRoster<F = PokeApiFetcher> {
    session: RosterSession<F>,
    view: TextView,
}

impl HeadlessRoster<PokeApiFetcher> {
    /// Create a headless roster backed by PokeAPI.
    pub fn new(config: SessionConfig) -> Result<Self, RosterError> {
        Ok(Self::with_session(RosterSession::new(config)?))
    }
}

impl<F: CreatureFetcher> HeadlessRoster<F> {
    pub fn with_session(session: RosterSession<F>) -> Self {
        Self {
            session,
            view: TextView::new(),
        }
    }

    /// Process one input line.
    ///
    /// Lines starting with `#` are commands; anything else is a creature
    /// name to add.
    pub async fn send(&mut self, line: &str) -> HeadlessReply {
        let line = line.trim();
        if line.is_empty() {
            return HeadlessReply::default();
        }

        let Some(command) = line.strip_prefix('#') else {
            return self.add(line).await;
        };

        let mut reply = HeadlessReply::default();
        match command.split_whitespace().next() {
            Some("quit") | Some("exit") => {
                reply.lines.push("Goodbye!".to_string());
                reply.quit = true;
            }
            Some("clear") => {
                self.session.clear(&mut self.view);
                reply.lines = self.view.take_output();
            }
            Some("team") => reply.lines = self.team_lines(),
            Some("history") => {
                let snapshots = self.session.history().snapshots().to_vec();
                if snapshots.is_empty() {
                    reply.lines.push("[HISTORY] No completed teams yet.".to_string());
                } else {
                    self.view.render_history(&snapshots);
                    reply.lines = self.view.take_output();
                }
            }
            Some("json") => match serde_json::to_string_pretty(self.session.history()) {
                Ok(json) => reply.lines.extend(json.lines().map(str::to_string)),
                Err(e) => reply.lines.push(format!("[ERROR] {e}")),
            },
            Some("help") => reply.lines = help_lines(),
            _ => reply
                .lines
                .push(format!("[ERROR] Unknown command: #{command}")),
        }
        reply
    }

    async fn add(&mut self, name: &str) -> HeadlessReply {
        let result = self.session.add_creature(name, &mut self.view).await;
        let mut lines = self.view.take_output();

        match result {
            Ok(CommitOutcome::SlotFilled) => lines.push(format!(
                "[TEAM] {}/{}",
                self.session.store().len(),
                crate::ROSTER_CAPACITY
            )),
            Ok(CommitOutcome::TeamCompleted(snapshot)) => {
                lines.push(format!("[TEAM] {} complete!", snapshot.title()))
            }
            Err(_) => {}
        }

        HeadlessReply { lines, quit: false }
    }

    fn team_lines(&self) -> Vec<String> {
        let roster = self.session.roster();
        let mut lines = vec![format!(
            "[TEAM] {}/{}",
            roster.len(),
            crate::ROSTER_CAPACITY
        )];
        for record in roster {
            lines.extend(card_lines(record, "  "));
        }
        lines
    }

    pub fn session(&self) -> &RosterSession<F> {
        &self.session
    }
}

/// Command summary printed by `#help`.
pub fn help_lines() -> Vec<String> {
    [
        "[HELP]",
        "  <name>    - Add a creature to the team",
        "  #clear    - Empty the current team",
        "  #team     - Show the current team",
        "  #history  - Show completed teams",
        "  #json     - Print completed teams as JSON",
        "  #quit     - Exit",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
