//! Creature roster engine.
//!
//! This crate provides:
//! - A capacity-bounded team store with an append-only history of completed teams
//! - Creature lookups through a pluggable fetcher (PokeAPI by default)
//! - A session that wires lookups, commits and rendering together
//! - A plain-text view and test harness
//!
//! # Quick Start
//!
//! ```ignore
//! use roster_core::{RosterSession, SessionConfig, TextView};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = RosterSession::new(SessionConfig::new())?;
//!     let mut view = TextView::new();
//!
//!     session.add_creature("pikachu", &mut view).await?;
//!     for line in view.take_output() {
//!         println!("{line}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod fetch;
pub mod headless;
pub mod history;
pub mod record;
pub mod session;
pub mod store;
pub mod testing;
pub mod view;

// Primary public API
pub use fetch::{CreatureFetcher, FetchError, PokeApiFetcher};
pub use headless::{HeadlessReply, HeadlessRoster, TextView};
pub use history::{History, HistorySnapshot};
pub use record::{CreatureRecord, RecordError};
pub use session::{PendingAdd, RosterError, RosterSession, SessionConfig};
pub use store::{
    CommitOutcome, ForeignReservation, Reservation, RosterFull, RosterState, RosterStore,
    ROSTER_CAPACITY,
};
pub use testing::{MockFetcher, RecordingView, TestHarness};
pub use view::{HistoryView, RosterView};
