//! Observer notification for committed history changes.
//!
//! Observers are invoked synchronously, in registration order, after the
//! change they describe has already been committed. An observer that fails
//! cannot undo that change; its failure is reported back to the caller.

use super::record::Calculation;
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// A committed change to the calculation history.
///
/// Every event carries a read-only view of the history as it stands after
/// the change.
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub enum Event<'a> {
    /// A calculation succeeded and its record was appended.
    Calculation {
        record: &'a Calculation,
        history: &'a [Calculation],
    },
    /// A previous state was restored.
    Undo { history: &'a [Calculation] },
    /// An undone state was restored.
    Redo { history: &'a [Calculation] },
    /// The history was emptied.
    Cleared { history: &'a [Calculation] },
    /// The history was replaced from persisted storage.
    Loaded { history: &'a [Calculation] },
}

impl<'a> Event<'a> {
    /// Stable tag naming the kind of event.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Calculation { .. } => "calculation",
            Self::Undo { .. } => "undo",
            Self::Redo { .. } => "redo",
            Self::Cleared { .. } => "clear",
            Self::Loaded { .. } => "load",
        }
    }

    /// The history after the change.
    pub fn history(&self) -> &'a [Calculation] {
        match *self {
            Self::Calculation { history, .. }
            | Self::Undo { history }
            | Self::Redo { history }
            | Self::Cleared { history }
            | Self::Loaded { history } => history,
        }
    }
}

/// Error returned by an observer that could not handle an event.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ObserverError {
    pub message: String,
}

impl ObserverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A failed observer invocation, as reported to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ListenerFailure {
    pub observer: String,
    pub event: &'static str,
    pub error: ObserverError,
}

impl fmt::Display for ListenerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "observer '{}' failed on '{}': {}",
            self.observer, self.event, self.error
        )
    }
}

/// Reacts to committed history changes.
pub trait Observer {
    /// Name used when reporting failures.
    fn name(&self) -> &str;

    fn on_event(&mut self, event: &Event<'_>) -> Result<(), ObserverError>;
}

type Callback = Box<dyn FnMut(&Event<'_>) -> Result<(), ObserverError>>;

/// Observer backed by a closure.
///
/// # Example
///
/// ```rust
/// use reckoner::core::{Calculation, Event, FnObserver, Notifier};
///
/// let mut notifier = Notifier::new();
/// notifier.attach(FnObserver::new("print", |event: &Event<'_>| {
///     println!("{}", event.tag());
///     Ok(())
/// }));
///
/// let record = Calculation::new(1.0, 2.0, "add", 3.0);
/// let history = vec![record.clone()];
/// let failures = notifier.notify(&Event::Calculation { record: &record, history: &history });
/// assert!(failures.is_empty());
/// ```
pub struct FnObserver {
    name: String,
    callback: Callback,
}

impl FnObserver {
    pub fn new<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: FnMut(&Event<'_>) -> Result<(), ObserverError> + 'static,
    {
        Self {
            name: name.into(),
            callback: Box::new(callback),
        }
    }
}

impl Observer for FnObserver {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_event(&mut self, event: &Event<'_>) -> Result<(), ObserverError> {
        (self.callback)(event)
    }
}

/// Ordered list of observers.
#[derive(Default)]
pub struct Notifier {
    observers: Vec<Box<dyn Observer>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer after all existing ones.
    pub fn attach<O>(&mut self, observer: O)
    where
        O: Observer + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Invoke every observer in registration order.
    ///
    /// A failing observer does not stop the ones after it. Failures are
    /// logged and returned; none are retried.
    pub fn notify(&mut self, event: &Event<'_>) -> Vec<ListenerFailure> {
        let mut failures = Vec::new();
        for observer in &mut self.observers {
            if let Err(error) = observer.on_event(event) {
                let failure = ListenerFailure {
                    observer: observer.name().to_string(),
                    event: event.tag(),
                    error,
                };
                warn!(%failure, "observer failed");
                failures.push(failure);
            }
        }
        failures
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.observers.iter().map(|o| o.name().to_string()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(name: &str, log: Rc<RefCell<Vec<String>>>) -> FnObserver {
        let label = name.to_string();
        FnObserver::new(name, move |event: &Event<'_>| {
            log.borrow_mut().push(format!("{label}:{}", event.tag()));
            Ok(())
        })
    }

    #[test]
    fn observers_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::new();
        notifier.attach(recording("first", log.clone()));
        notifier.attach(recording("second", log.clone()));

        let record = Calculation::new(1.0, 2.0, "add", 3.0);
        let history = vec![record.clone()];
        let failures = notifier.notify(&Event::Calculation {
            record: &record,
            history: &history,
        });

        assert!(failures.is_empty());
        assert_eq!(
            *log.borrow(),
            vec!["first:calculation".to_string(), "second:calculation".to_string()]
        );
    }

    #[test]
    fn failing_observer_does_not_stop_later_ones() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::new();
        notifier.attach(FnObserver::new("broken", |_event: &Event<'_>| {
            Err(ObserverError::new("disk full"))
        }));
        notifier.attach(recording("after", log.clone()));

        let failures = notifier.notify(&Event::Cleared { history: &[] });

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].observer, "broken");
        assert_eq!(failures[0].event, "clear");
        assert_eq!(
            failures[0].to_string(),
            "observer 'broken' failed on 'clear': disk full"
        );
        assert_eq!(*log.borrow(), vec!["after:clear".to_string()]);
    }

    #[test]
    fn event_exposes_committed_history() {
        let record = Calculation::new(4.0, 2.0, "divide", 2.0);
        let history = vec![record.clone()];
        let event = Event::Calculation {
            record: &record,
            history: &history,
        };

        assert_eq!(event.history().len(), 1);
        assert_eq!(Event::Undo { history: &[] }.tag(), "undo");
        assert_eq!(Event::Redo { history: &[] }.tag(), "redo");
        assert_eq!(Event::Loaded { history: &[] }.tag(), "load");
    }
}
