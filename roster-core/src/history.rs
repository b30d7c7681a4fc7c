//! Append-only log of completed teams.

use std::sync::Arc;

use serde::Serialize;

use crate::record::CreatureRecord;

/// A frozen copy of a team taken the moment it filled up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistorySnapshot {
    ordinal: usize,
    members: Vec<CreatureRecord>,
}

impl HistorySnapshot {
    /// 1-based position in the history ("Team 1", "Team 2", ...).
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn members(&self) -> &[CreatureRecord] {
        &self.members
    }

    /// Heading used when the snapshot is rendered.
    pub fn title(&self) -> String {
        format!("Team {}", self.ordinal)
    }
}

/// Completed teams in the order they were completed.
///
/// There is no removal API; snapshots are shared out as `Arc`s and never
/// mutated after [`History::record`] creates them.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct History {
    snapshots: Vec<Arc<HistorySnapshot>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `members` into a new snapshot and append it.
    pub(crate) fn record(&mut self, members: &[CreatureRecord]) -> Arc<HistorySnapshot> {
        let snapshot = Arc::new(HistorySnapshot {
            ordinal: self.snapshots.len() + 1,
            members: members.to_vec(),
        });
        self.snapshots.push(Arc::clone(&snapshot));
        snapshot
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[Arc<HistorySnapshot>] {
        &self.snapshots
    }

    pub fn last(&self) -> Option<&Arc<HistorySnapshot>> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistorySnapshot> {
        self.snapshots.iter().map(|s| s.as_ref())
    }
}
