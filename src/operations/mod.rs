//! Arithmetic operations available to the calculator.
//!
//! Operations are plain binary functions looked up by name in an
//! [`OperationRegistry`]. They may fail (division by zero, even roots of
//! negative numbers) but never touch calculator state.

mod arithmetic;
pub mod error;
mod registry;

pub use error::{InvalidOperationName, OperationError, UnknownOperationError};
pub use registry::{Operation, OperationRegistry};
