//! Boundary validation of user input.
//!
//! Input is checked before the calculator is invoked, using Stillwater's
//! `Validation` type so that every problem is reported in a single pass.
//!
//! # Example
//!
//! ```rust
//! use reckoner::validation::validate_operands;
//!
//! let error = validate_operands(&["one", "2e12"], 1e9).unwrap_err();
//! assert!(error.to_string().contains("input 1"));
//! assert!(error.to_string().contains("input 2"));
//! ```

pub mod error;
mod operands;

pub use error::{OperandIssue, ValidationError};
pub use operands::validate_operands;
