//! Calculator session.
//!
//! A [`Calculator`] owns one tracked history, the operation registry, the
//! configuration it was built with, and the observers to notify. Each
//! request runs to completion (compute, mutate, capture, notify) before the
//! next one starts; a request that fails leaves the history untouched and
//! notifies no one.

mod observers;

pub use observers::{AutoSaveObserver, LoggingObserver};

use crate::config::CalculatorConfig;
use crate::core::{Calculation, Event, ListenerFailure, Notifier, Observer, TrackedHistory};
use crate::error::Result;
use crate::operations::OperationRegistry;
use crate::persistence::{HistoryFile, PersistenceError};
use tracing::{error, info, instrument};
use uuid::Uuid;

/// Value produced by a committed change, plus any observer failures.
///
/// Observer failures never undo the change; they are handed back so the
/// caller can surface them.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub listener_failures: Vec<ListenerFailure>,
}

impl<T> Outcome<T> {
    fn new(value: T, listener_failures: Vec<ListenerFailure>) -> Self {
        Self {
            value,
            listener_failures,
        }
    }
}

/// Interactive calculator session.
///
/// # Example
///
/// ```rust
/// use reckoner::calculator::Calculator;
/// use reckoner::config::CalculatorConfig;
/// use reckoner::operations::OperationRegistry;
///
/// let mut calc = Calculator::new(CalculatorConfig::default(), OperationRegistry::standard());
///
/// let outcome = calc.execute("add", 10.0, 5.0).unwrap();
/// assert_eq!(outcome.value.result(), 15.0);
///
/// calc.undo().unwrap();
/// assert!(calc.history().is_empty());
///
/// calc.redo().unwrap();
/// assert_eq!(calc.history().len(), 1);
/// ```
pub struct Calculator {
    id: Uuid,
    config: CalculatorConfig,
    registry: OperationRegistry,
    history: TrackedHistory,
    notifier: Notifier,
}

impl Calculator {
    /// Session with an empty history and no observers.
    pub fn new(config: CalculatorConfig, registry: OperationRegistry) -> Self {
        Self::seeded(config, registry, &[])
    }

    /// Session seeded with `initial` records and no observers.
    ///
    /// The seed is the undo floor: it can never be undone.
    pub fn seeded(
        config: CalculatorConfig,
        registry: OperationRegistry,
        initial: &[Calculation],
    ) -> Self {
        let id = Uuid::new_v4();
        let history = TrackedHistory::seeded(config.max_history, initial);
        info!(
            session = %id,
            records = history.records().len(),
            max_history = config.max_history.get(),
            "calculator session started"
        );
        Self {
            id,
            config,
            registry,
            history,
            notifier: Notifier::new(),
        }
    }

    /// Session for interactive use: the standard operations, history seeded
    /// from the configured file (empty if missing or unreadable), a logging
    /// observer, and an autosave observer when auto-save is enabled.
    pub fn open(config: CalculatorConfig) -> Self {
        let initial = config.history_file().load_or_empty();
        let mut calculator = Self::seeded(config, OperationRegistry::standard(), &initial);
        calculator.attach(LoggingObserver);
        if calculator.config.auto_save {
            let file = calculator.history_file();
            calculator.attach(AutoSaveObserver::new(file));
        }
        calculator
    }

    /// Register an observer after all existing ones.
    pub fn attach<O>(&mut self, observer: O)
    where
        O: Observer + 'static,
    {
        self.notifier.attach(observer);
    }

    /// Run operation `name` on `a` and `b` and record the rounded result.
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn execute(&mut self, name: &str, a: f64, b: f64) -> Result<Outcome<Calculation>> {
        let operation = self.registry.resolve(name)?;
        let result = round_to(operation.apply(a, b)?, self.config.precision);
        let record = Calculation::new(a, b, operation.name(), result);

        self.history.append(record.clone());
        let failures = self.notifier.notify(&Event::Calculation {
            record: &record,
            history: self.history.records(),
        });
        Ok(Outcome::new(record, failures))
    }

    /// Restore the previous state.
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn undo(&mut self) -> Result<Outcome<()>> {
        self.history.undo()?;
        let failures = self.notifier.notify(&Event::Undo {
            history: self.history.records(),
        });
        Ok(Outcome::new((), failures))
    }

    /// Restore the most recently undone state.
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn redo(&mut self) -> Result<Outcome<()>> {
        self.history.redo()?;
        let failures = self.notifier.notify(&Event::Redo {
            history: self.history.records(),
        });
        Ok(Outcome::new((), failures))
    }

    /// Empty the history. The clear itself can be undone.
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn clear(&mut self) -> Outcome<()> {
        self.history.clear();
        let failures = self.notifier.notify(&Event::Cleared {
            history: self.history.records(),
        });
        Outcome::new((), failures)
    }

    /// Write the history to the configured file.
    ///
    /// A failure is returned as-is; in-memory state is never affected.
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn save(&self) -> std::result::Result<(), PersistenceError> {
        self.history_file()
            .save(self.history.records())
            .inspect_err(|err| error!(error = %err, "failed to save history"))
    }

    /// Replace the history with the configured file's contents, returning
    /// the number of records loaded.
    ///
    /// A missing or malformed file loads as an empty history. The load is
    /// captured like any other change, so it can be undone.
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn load(&mut self) -> Outcome<usize> {
        let records = self.history_file().load_or_empty();
        self.history.restore(&records);
        let loaded = self.history.records().len();
        let failures = self.notifier.notify(&Event::Loaded {
            history: self.history.records(),
        });
        Outcome::new(loaded, failures)
    }

    /// Copy of the current history, oldest first.
    pub fn history(&self) -> Vec<Calculation> {
        self.history.store().get_all()
    }

    pub fn can_undo(&self) -> bool {
        self.history.snapshots().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.snapshots().can_redo()
    }

    pub fn tracked(&self) -> &TrackedHistory {
        &self.history
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    fn history_file(&self) -> HistoryFile {
        self.config.history_file()
    }
}

/// Round half away from zero to `precision` decimal places.
///
/// Values too large to scale are returned unchanged.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FnObserver, HistoryError, ObserverError};
    use crate::error::CalculatorError;
    use crate::operations::{OperationError, UnknownOperationError};
    use std::cell::RefCell;
    use std::num::NonZeroUsize;
    use std::rc::Rc;
    use tempfile::{tempdir, TempDir};

    fn test_config(dir: &TempDir) -> CalculatorConfig {
        CalculatorConfig {
            log_dir: dir.path().join("logs"),
            history_dir: dir.path().join("data"),
            max_history: NonZeroUsize::new(5).unwrap(),
            auto_save: false,
            precision: 2,
            max_input: 1000.0,
            ..CalculatorConfig::default()
        }
    }

    fn calculator(dir: &TempDir) -> Calculator {
        Calculator::new(test_config(dir), OperationRegistry::standard())
    }

    #[test]
    fn execute_rounds_and_records() {
        let dir = tempdir().unwrap();
        let mut calc = calculator(&dir);

        let outcome = calc.execute("add", 10.123, 5.456).unwrap();

        assert_eq!(outcome.value.result(), 15.58);
        assert!(outcome.listener_failures.is_empty());
        assert_eq!(calc.history().len(), 1);
    }

    #[test]
    fn execute_normalizes_operation_name() {
        let dir = tempdir().unwrap();
        let mut calc = calculator(&dir);

        let outcome = calc.execute("MULTIPLY", 3.0, 4.0).unwrap();

        assert_eq!(outcome.value.operation_name(), "multiply");
    }

    #[test]
    fn failed_operation_changes_nothing() {
        let dir = tempdir().unwrap();
        let mut calc = calculator(&dir);
        let events = Rc::new(RefCell::new(0));
        let counter = events.clone();
        calc.attach(FnObserver::new("count", move |_event: &Event<'_>| {
            *counter.borrow_mut() += 1;
            Ok(())
        }));
        calc.execute("add", 1.0, 1.0).unwrap();
        let depth_before = calc.tracked().snapshots().undo_depth();

        let error = calc.execute("divide", 1.0, 0.0).unwrap_err();

        assert!(matches!(
            error,
            CalculatorError::Operation(OperationError::DivisionByZero)
        ));
        assert_eq!(calc.history().len(), 1);
        assert_eq!(calc.tracked().snapshots().undo_depth(), depth_before);
        assert_eq!(calc.tracked().snapshots().redo_depth(), 0);
        assert_eq!(*events.borrow(), 1);
    }

    #[test]
    fn unknown_operation_changes_nothing() {
        let dir = tempdir().unwrap();
        let mut calc = calculator(&dir);

        let error = calc.execute("sqrt", 4.0, 0.0).unwrap_err();

        assert!(matches!(
            error,
            CalculatorError::UnknownOperation(UnknownOperationError { .. })
        ));
        assert!(calc.history().is_empty());
        assert!(!calc.can_undo());
    }

    #[test]
    fn undo_and_redo_restore_states() {
        let dir = tempdir().unwrap();
        let mut calc = calculator(&dir);
        calc.execute("add", 10.0, 5.0).unwrap();
        calc.execute("subtract", 20.0, 5.0).unwrap();
        assert_eq!(calc.history().len(), 2);

        calc.undo().unwrap();
        let history = calc.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].result(), 15.0);

        calc.redo().unwrap();
        let history = calc.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].result(), 15.0);
        assert_eq!(history[1].operation_name(), "subtract");
    }

    #[test]
    fn fresh_session_cannot_undo_or_redo() {
        let dir = tempdir().unwrap();
        let mut calc = calculator(&dir);

        assert!(matches!(
            calc.undo(),
            Err(CalculatorError::History(HistoryError::NoPriorState))
        ));
        assert!(matches!(
            calc.redo(),
            Err(CalculatorError::History(HistoryError::NoFutureState))
        ));
    }

    #[test]
    fn clear_is_undoable() {
        let dir = tempdir().unwrap();
        let mut calc = calculator(&dir);
        calc.execute("add", 1.0, 2.0).unwrap();

        calc.clear();
        assert!(calc.history().is_empty());

        calc.undo().unwrap();
        assert_eq!(calc.history().len(), 1);
    }

    #[test]
    fn observer_failures_do_not_roll_back() {
        let dir = tempdir().unwrap();
        let mut calc = calculator(&dir);
        calc.attach(FnObserver::new("broken", |_event: &Event<'_>| {
            Err(ObserverError::new("boom"))
        }));

        let outcome = calc.execute("add", 1.0, 2.0).unwrap();

        assert_eq!(outcome.listener_failures.len(), 1);
        assert_eq!(outcome.listener_failures[0].observer, "broken");
        assert_eq!(calc.history().len(), 1);
    }

    #[test]
    fn observers_receive_committed_history() {
        let dir = tempdir().unwrap();
        let mut calc = calculator(&dir);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        calc.attach(FnObserver::new("spy", move |event: &Event<'_>| {
            sink.borrow_mut()
                .push((event.tag(), event.history().len()));
            Ok(())
        }));

        calc.execute("add", 1.0, 2.0).unwrap();
        calc.execute("add", 3.0, 4.0).unwrap();
        calc.undo().unwrap();
        calc.clear();

        assert_eq!(
            *seen.borrow(),
            vec![("calculation", 1), ("calculation", 2), ("undo", 1), ("clear", 0)]
        );
    }

    #[test]
    fn save_and_load_use_configured_file() {
        let dir = tempdir().unwrap();
        let mut calc = calculator(&dir);
        calc.execute("add", 10.0, 5.0).unwrap();
        calc.save().unwrap();
        calc.clear();

        let outcome = calc.load();

        assert_eq!(outcome.value, 1);
        assert_eq!(calc.history()[0].result(), 15.0);
        calc.undo().unwrap();
        assert!(calc.history().is_empty());
    }

    #[test]
    fn blank_operation_never_reaches_saved_history() {
        let dir = tempdir().unwrap();
        let mut registry = OperationRegistry::standard();
        assert!(registry.register("", |a, b| Ok(a + b)).is_err());
        let mut calc = Calculator::new(test_config(&dir), registry);
        calc.execute("add", 1.0, 1.0).unwrap();

        assert!(matches!(
            calc.execute("", 2.0, 3.0),
            Err(CalculatorError::UnknownOperation(_))
        ));
        calc.save().unwrap();
        calc.clear();

        assert_eq!(calc.load().value, 1);
    }

    #[test]
    fn load_of_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let mut calc = calculator(&dir);
        calc.execute("add", 1.0, 1.0).unwrap();

        let outcome = calc.load();

        assert_eq!(outcome.value, 0);
        assert!(calc.history().is_empty());
    }

    #[test]
    fn load_trims_to_capacity() {
        let dir = tempdir().unwrap();
        let config = test_config(&dir);
        let records: Vec<_> = (0..8)
            .map(|i| Calculation::new(i as f64, 1.0, "add", i as f64 + 1.0))
            .collect();
        config.history_file().save(&records).unwrap();
        let mut calc = Calculator::new(config, OperationRegistry::standard());

        calc.load();

        let history = calc.history();
        assert_eq!(history.len(), 5);
        assert_eq!(history[0].operand_a(), 3.0);
    }

    #[test]
    fn save_failure_leaves_history_intact() {
        let dir = tempdir().unwrap();
        let mut config = test_config(&dir);
        std::fs::write(dir.path().join("blocker"), "").unwrap();
        config.history_dir = dir.path().join("blocker");
        let mut calc = Calculator::new(config, OperationRegistry::standard());
        calc.execute("add", 1.0, 1.0).unwrap();

        assert!(calc.save().is_err());
        assert_eq!(calc.history().len(), 1);
        assert!(calc.can_undo());
    }

    #[test]
    fn open_seeds_from_file_and_autosaves() {
        let dir = tempdir().unwrap();
        let config = CalculatorConfig {
            auto_save: true,
            ..test_config(&dir)
        };
        config
            .history_file()
            .save(&[Calculation::new(2.0, 2.0, "multiply", 4.0)])
            .unwrap();

        let mut calc = Calculator::open(config.clone());
        assert_eq!(calc.history().len(), 1);
        assert!(!calc.can_undo());

        calc.execute("add", 1.0, 1.0).unwrap();

        assert_eq!(config.history_file().load().unwrap().len(), 2);
    }

    #[test]
    fn round_to_rounds_half_away_from_zero() {
        assert_eq!(round_to(2.345, 0), 2.0);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(1.23456, 4), 1.2346);
        assert_eq!(round_to(1e300, 15), 1e300);
    }
}
