//! Undo/redo boundary errors.

use thiserror::Error;

/// Errors raised when undo or redo would step outside the captured states.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Cannot undo: No previous state.")]
    NoPriorState,

    #[error("Cannot redo: No future state.")]
    NoFutureState,
}
