//! RosterStore - owns the current team and the history of completed teams.
//!
//! A slot is claimed with [`RosterStore::try_reserve_slot`] before the lookup
//! starts, and the returned [`Reservation`] is either consumed by
//! [`RosterStore::commit`] or handed back with [`RosterStore::release`].
//! Reservations are counted, so `len + pending <= capacity` holds even when
//! several lookups are in flight at once. Each reservation carries the id of
//! the store that issued it, and no other store will accept it.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::history::{History, HistorySnapshot};
use crate::record::CreatureRecord;

/// Maximum number of creatures on one team.
pub const ROSTER_CAPACITY: usize = 3;

/// Returned when no slot is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot add more creatures. The team is complete.")]
pub struct RosterFull {
    pub capacity: usize,
}

/// A claim on one free slot, held while a lookup is in flight.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a reservation must be committed or released"]
pub struct Reservation {
    store: Uuid,
}

/// Returned when a reservation is handed to a store that did not issue it.
///
/// The reservation comes back untouched so it can be released to its owner.
#[derive(Debug, PartialEq, Eq, Error)]
#[error("reservation belongs to a different roster")]
pub struct ForeignReservation {
    pub reservation: Reservation,
}

/// What a commit did to the team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The record took a slot and the team still has room.
    SlotFilled,
    /// The record filled the team; a snapshot was appended to history.
    TeamCompleted(Arc<HistorySnapshot>),
}

/// Where the team is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterState {
    Empty,
    Partial(usize),
    Full,
}

/// The current team plus every team completed so far.
#[derive(Debug)]
pub struct RosterStore {
    id: Uuid,
    roster: Vec<CreatureRecord>,
    pending: usize,
    history: History,
}

impl Default for RosterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            roster: Vec::with_capacity(ROSTER_CAPACITY),
            pending: 0,
            history: History::new(),
        }
    }

    /// Claim a slot for a lookup that is about to start.
    ///
    /// Fails without touching anything when every slot is either filled or
    /// already reserved.
    pub fn try_reserve_slot(&mut self) -> Result<Reservation, RosterFull> {
        if self.roster.len() + self.pending >= ROSTER_CAPACITY {
            return Err(RosterFull {
                capacity: ROSTER_CAPACITY,
            });
        }
        self.pending += 1;
        Ok(Reservation { store: self.id })
    }

    /// Hand back a reservation whose lookup failed.
    pub fn release(&mut self, reservation: Reservation) -> Result<(), ForeignReservation> {
        self.redeem(reservation)
    }

    /// Put a fetched record into the reserved slot.
    ///
    /// When this fills the team, a copy of the team is appended to history
    /// in the same call. A reservation from another store is refused and the
    /// team is left untouched.
    pub fn commit(
        &mut self,
        reservation: Reservation,
        record: CreatureRecord,
    ) -> Result<CommitOutcome, ForeignReservation> {
        self.redeem(reservation)?;
        self.roster.push(record);

        if self.roster.len() == ROSTER_CAPACITY {
            let snapshot = self.history.record(&self.roster);
            tracing::info!(team = snapshot.ordinal(), "team completed");
            Ok(CommitOutcome::TeamCompleted(snapshot))
        } else {
            Ok(CommitOutcome::SlotFilled)
        }
    }

    /// Consume one of this store's reservations.
    ///
    /// Own reservations are counted in `pending`, so the count can never
    /// underflow and `len + pending <= capacity` keeps holding.
    fn redeem(&mut self, reservation: Reservation) -> Result<(), ForeignReservation> {
        if reservation.store != self.id {
            tracing::error!(
                store = %self.id,
                issuer = %reservation.store,
                "refused reservation from another roster"
            );
            return Err(ForeignReservation { reservation });
        }
        self.pending -= 1;
        Ok(())
    }

    /// Empty the team. History and outstanding reservations are kept.
    pub fn clear(&mut self) {
        self.roster.clear();
    }

    pub fn roster(&self) -> &[CreatureRecord] {
        &self.roster
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.roster.len() == ROSTER_CAPACITY
    }

    /// Lookups currently holding a reservation.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn state(&self) -> RosterState {
        match self.roster.len() {
            0 => RosterState::Empty,
            n if n >= ROSTER_CAPACITY => RosterState::Full,
            n => RosterState::Partial(n),
        }
    }
}
