//! Crate-wide error type.

use crate::config::ConfigError;
use crate::core::HistoryError;
use crate::logging::LoggingError;
use crate::operations::{OperationError, UnknownOperationError};
use crate::persistence::PersistenceError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CalculatorError>;

/// Any error the calculator can report to its caller.
///
/// Only [`Operation`](Self::Operation), [`UnknownOperation`](Self::UnknownOperation)
/// and [`History`](Self::History) come from the calculator itself; none of
/// them leave the history changed.
#[derive(Debug, Error)]
pub enum CalculatorError {
    #[error(transparent)]
    UnknownOperation(#[from] UnknownOperationError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
