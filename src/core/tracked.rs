//! History paired with its undo/redo snapshots.

use super::error::HistoryError;
use super::history::CalculationHistory;
use super::record::Calculation;
use super::snapshot::{Snapshot, SnapshotManager};
use std::num::NonZeroUsize;

/// A [`CalculationHistory`] together with the [`SnapshotManager`] that owns
/// its undo/redo states.
///
/// Every mutating method captures a snapshot as part of the same call, and
/// undo/redo restore the returned snapshot before returning, so the live
/// history and the top of the undo stack never drift apart.
///
/// # Example
///
/// ```rust
/// use reckoner::core::{Calculation, TrackedHistory};
/// use std::num::NonZeroUsize;
///
/// let mut tracked = TrackedHistory::new(NonZeroUsize::new(10).unwrap());
/// tracked.append(Calculation::new(10.0, 5.0, "add", 15.0));
///
/// tracked.undo().unwrap();
/// assert!(tracked.records().is_empty());
///
/// tracked.redo().unwrap();
/// assert_eq!(tracked.records()[0].result(), 15.0);
/// ```
#[derive(Clone, Debug)]
pub struct TrackedHistory {
    store: CalculationHistory,
    snapshots: SnapshotManager,
}

impl TrackedHistory {
    /// Empty history seeded as the initial undo state.
    pub fn new(max_history: NonZeroUsize) -> Self {
        Self::seeded(max_history, &[])
    }

    /// History seeded with `initial` records, keeping at most the most
    /// recent `max_history` of them.
    pub fn seeded(max_history: NonZeroUsize, initial: &[Calculation]) -> Self {
        let mut store = CalculationHistory::new(max_history);
        store.replace(most_recent(initial, max_history));
        let snapshots = SnapshotManager::new(Snapshot::capture(&store.get_all()));
        Self { store, snapshots }
    }

    /// Append a record and capture the new state.
    pub fn append(&mut self, record: Calculation) {
        self.store.append(record);
        self.capture();
    }

    /// Empty the history and capture the empty state.
    pub fn clear(&mut self) {
        self.store.clear();
        self.capture();
    }

    /// Replace the history with `records` (trimmed to capacity) and capture
    /// the new state. Used when loading from storage mid-session.
    pub fn restore(&mut self, records: &[Calculation]) {
        let max_history = self.store.max_history();
        self.store.replace(most_recent(records, max_history));
        self.capture();
    }

    pub fn undo(&mut self) -> Result<(), HistoryError> {
        let snapshot = self.snapshots.undo()?;
        self.store.replace(snapshot.records());
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), HistoryError> {
        let snapshot = self.snapshots.redo()?;
        self.store.replace(snapshot.records());
        Ok(())
    }

    /// Read-only view of the committed records, oldest first.
    pub fn records(&self) -> &[Calculation] {
        self.snapshots.current().records()
    }

    pub fn store(&self) -> &CalculationHistory {
        &self.store
    }

    pub fn snapshots(&self) -> &SnapshotManager {
        &self.snapshots
    }

    fn capture(&mut self) {
        self.snapshots.capture(&self.store.get_all());
    }
}

fn most_recent(records: &[Calculation], max_history: NonZeroUsize) -> &[Calculation] {
    let start = records.len().saturating_sub(max_history.get());
    &records[start..]
}
