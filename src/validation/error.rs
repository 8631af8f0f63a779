//! Validation errors and the individual issues they collect.

use thiserror::Error;

/// A single problem with one operand token.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OperandIssue {
    #[error("input {position} ('{token}') is not a valid number")]
    NotANumber { position: usize, token: String },

    #[error("input {position} must be a finite number")]
    NotFinite { position: usize },

    #[error("input {position} ({value}) must be between -{max} and {max}")]
    OutOfRange { position: usize, value: f64, max: f64 },
}

/// User input rejected before it reaches the calculator.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Exactly two numerical inputs are required (got {found}).")]
    WrongArity { found: usize },

    #[error("Invalid input: {}", join_issues(.issues))]
    Operands { issues: Vec<OperandIssue> },
}

fn join_issues(issues: &[OperandIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
