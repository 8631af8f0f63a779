//! Operand parsing and range checks.

use super::error::{OperandIssue, ValidationError};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Parse exactly two operand tokens, each within `[-max_value, max_value]`.
///
/// Every problem with every token is reported, not just the first one.
///
/// # Example
///
/// ```rust
/// use reckoner::validation::{validate_operands, ValidationError};
///
/// assert_eq!(validate_operands(&["10", "-2.5"], 1000.0), Ok((10.0, -2.5)));
/// assert_eq!(
///     validate_operands(&["10"], 1000.0),
///     Err(ValidationError::WrongArity { found: 1 })
/// );
/// ```
pub fn validate_operands(tokens: &[&str], max_value: f64) -> Result<(f64, f64), ValidationError> {
    let [a, b] = tokens else {
        return Err(ValidationError::WrongArity {
            found: tokens.len(),
        });
    };

    let checks = vec![check_operand(1, a, max_value), check_operand(2, b, max_value)];

    match Validation::all_vec(checks) {
        Validation::Success(values) => Ok((values[0], values[1])),
        Validation::Failure(issues) => Err(ValidationError::Operands {
            issues: issues.iter().cloned().collect(),
        }),
    }
}

fn check_operand(
    position: usize,
    token: &str,
    max_value: f64,
) -> Validation<f64, NonEmptyVec<OperandIssue>> {
    match token.parse::<f64>() {
        Ok(value) if !value.is_finite() => Validation::fail(OperandIssue::NotFinite { position }),
        Ok(value) if value.abs() > max_value => Validation::fail(OperandIssue::OutOfRange {
            position,
            value,
            max: max_value,
        }),
        Ok(value) => Validation::success(value),
        Err(_) => Validation::fail(OperandIssue::NotANumber {
            position,
            token: token.to_string(),
        }),
    }
}
