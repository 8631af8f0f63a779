//! Reckoner: an interactive calculator with a bounded, undoable history
//!
//! Every committed calculation is appended to a capacity-bounded history.
//! Each change to the history is captured as an immutable snapshot, so any
//! change (a calculation, a clear, a load) can be undone and redone. Observers
//! are notified after each committed change; the built-in ones log
//! calculations and save the history to a CSV file.
//!
//! # Core Concepts
//!
//! - **Calculation**: An immutable record of one operation and its result
//! - **Snapshots**: Undo and redo stacks of history states
//! - **Observers**: Side effects run after a change is committed
//!
//! # Example
//!
//! ```rust
//! use reckoner::{Calculator, CalculatorConfig, OperationRegistry};
//!
//! let mut calc = Calculator::new(CalculatorConfig::default(), OperationRegistry::standard());
//!
//! calc.execute("power", 2.0, 10.0).unwrap();
//! calc.execute("modulus", -7.0, 3.0).unwrap();
//! assert_eq!(calc.history()[1].result(), 2.0);
//!
//! calc.clear();
//! calc.undo().unwrap();
//! assert_eq!(calc.history().len(), 2);
//! ```

pub mod calculator;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod operations;
pub mod persistence;
pub mod repl;
pub mod validation;

// Re-export commonly used types
pub use calculator::{Calculator, Outcome};
pub use cli::run_from_env;
pub use config::CalculatorConfig;
pub use core::{Calculation, Event, Observer};
pub use error::{CalculatorError, Result};
pub use operations::OperationRegistry;
