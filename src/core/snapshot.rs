//! Snapshot capture and restore for undo/redo.
//!
//! A [`Snapshot`] is an immutable copy of the full history at one point in
//! time. The [`SnapshotManager`] keeps two stacks of them and hands back the
//! state a caller should restore after an undo or redo.

use super::error::HistoryError;
use super::record::Calculation;
use std::sync::Arc;
use tracing::debug;

/// Immutable point-in-time copy of a history's records.
///
/// Snapshots own their own storage, so later mutations of the live history
/// never show through. Cloning a snapshot shares the same frozen records.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    records: Arc<[Calculation]>,
}

impl Snapshot {
    /// Copy `records` into a new snapshot.
    pub fn capture(records: &[Calculation]) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn empty() -> Self {
        Self::capture(&[])
    }

    pub fn records(&self) -> &[Calculation] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Undo and redo stacks of history snapshots.
///
/// The undo stack is never empty: it is seeded with the initial state and
/// its top always mirrors the live history after a successful mutation.
/// Undo refuses to pop that seed.
///
/// # Example
///
/// ```rust
/// use reckoner::core::{Calculation, Snapshot, SnapshotManager};
///
/// let mut manager = SnapshotManager::new(Snapshot::empty());
/// let after_add = vec![Calculation::new(10.0, 5.0, "add", 15.0)];
/// manager.capture(&after_add);
///
/// let restored = manager.undo().unwrap();
/// assert!(restored.is_empty());
///
/// let restored = manager.redo().unwrap();
/// assert_eq!(restored.records(), after_add.as_slice());
/// ```
#[derive(Clone, Debug)]
pub struct SnapshotManager {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
}

impl SnapshotManager {
    /// Create a manager seeded with the session's initial state.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            undo: vec![initial],
            redo: Vec::new(),
        }
    }

    /// Push a copy of `current_state` and discard any redoable states.
    pub fn capture(&mut self, current_state: &[Calculation]) {
        self.undo.push(Snapshot::capture(current_state));
        self.redo.clear();
        debug!(
            undo_depth = self.undo.len(),
            records = current_state.len(),
            "captured history snapshot"
        );
    }

    /// Step back one state, returning the snapshot to restore.
    pub fn undo(&mut self) -> Result<Snapshot, HistoryError> {
        if self.undo.len() <= 1 {
            return Err(HistoryError::NoPriorState);
        }
        let top = self.undo.pop().ok_or(HistoryError::NoPriorState)?;
        self.redo.push(top);
        debug!(
            undo_depth = self.undo.len(),
            redo_depth = self.redo.len(),
            "undo"
        );
        Ok(self.current().clone())
    }

    /// Step forward one state, returning the snapshot to restore.
    pub fn redo(&mut self) -> Result<Snapshot, HistoryError> {
        let snapshot = self.redo.pop().ok_or(HistoryError::NoFutureState)?;
        self.undo.push(snapshot.clone());
        debug!(
            undo_depth = self.undo.len(),
            redo_depth = self.redo.len(),
            "redo"
        );
        Ok(snapshot)
    }

    /// The state the live history should currently match.
    pub fn current(&self) -> &Snapshot {
        // The seed is never popped.
        &self.undo[self.undo.len() - 1]
    }

    pub fn can_undo(&self) -> bool {
        self.undo.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}
