//! Built-in observers: structured logging and autosave.

use crate::core::{Event, Observer, ObserverError};
use crate::persistence::HistoryFile;
use tracing::info;

/// Logs every committed change; calculations are logged as JSON records.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl Observer for LoggingObserver {
    fn name(&self) -> &str {
        "logging"
    }

    fn on_event(&mut self, event: &Event<'_>) -> Result<(), ObserverError> {
        match event {
            Event::Calculation { record, .. } => {
                let json = serde_json::to_string(record)
                    .map_err(|error| ObserverError::new(error.to_string()))?;
                info!(record = %json, "Calculation: {record}");
            }
            other => info!(
                event = other.tag(),
                records = other.history().len(),
                "history changed"
            ),
        }
        Ok(())
    }
}

/// Saves the full history after every calculation.
#[derive(Debug)]
pub struct AutoSaveObserver {
    file: HistoryFile,
}

impl AutoSaveObserver {
    pub fn new(file: HistoryFile) -> Self {
        Self { file }
    }
}

impl Observer for AutoSaveObserver {
    fn name(&self) -> &str {
        "autosave"
    }

    fn on_event(&mut self, event: &Event<'_>) -> Result<(), ObserverError> {
        if let Event::Calculation { history, .. } = event {
            self.file
                .save(history)
                .map_err(|error| ObserverError::new(error.to_string()))?;
        }
        Ok(())
    }
}
