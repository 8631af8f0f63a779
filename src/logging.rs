//! Log file setup for the calculator binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary, which calls [`init_logging`] once at startup.

use crate::config::CalculatorConfig;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur while installing the log subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Send `tracing` output to the configured log file, appending to it.
pub fn init_logging(config: &CalculatorConfig) -> Result<PathBuf, LoggingError> {
    let path = config.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggingError::Open {
            path: path.clone(),
            source,
        })?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.log_level)
        .try_init()
        .map_err(|error| LoggingError::AlreadyInitialized(error.to_string()))?;

    Ok(path)
}
