//! Operation errors.

use thiserror::Error;

/// Errors raised while computing an operation's result.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OperationError {
    #[error("Division by zero.")]
    DivisionByZero,

    #[error("Modulus by zero.")]
    ModulusByZero,

    #[error("Integer division by zero.")]
    IntegerDivisionByZero,

    #[error("Cannot calculate percentage with respect to zero.")]
    PercentageOfZero,

    #[error("Even root of a negative number.")]
    EvenRootOfNegative,

    #[error("Root degree cannot be zero.")]
    ZeroRootDegree,

    #[error("Operation '{operation}' produced a non-finite result.")]
    NonFinite { operation: String },
}

/// The requested operation name is not registered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown operation: '{name}'")]
pub struct UnknownOperationError {
    pub name: String,
}

/// An operation name that cannot be registered.
///
/// Names must be non-empty and free of whitespace so they can be typed as a
/// single command word and stored in a history record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid operation name: '{name}'")]
pub struct InvalidOperationName {
    pub name: String,
}
