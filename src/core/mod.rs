//! Core history state machine.
//!
//! This module contains the calculation log and its undo/redo machinery:
//! - Immutable calculation records
//! - A capacity-bounded history store
//! - Snapshot capture and restore on two stacks
//! - Synchronous observer notification
//!
//! Nothing here performs I/O; persistence and the interactive shell live
//! outside the core and drive it through these types.

mod error;
mod history;
mod notifier;
mod record;
mod snapshot;
mod tracked;

pub use error::HistoryError;
pub use history::CalculationHistory;
pub use notifier::{Event, FnObserver, ListenerFailure, Notifier, Observer, ObserverError};
pub use record::Calculation;
pub use snapshot::{Snapshot, SnapshotManager};
pub use tracked::TrackedHistory;
