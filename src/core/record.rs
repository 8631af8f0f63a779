//! Immutable calculation records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Record of a single completed calculation.
///
/// Records are immutable values: every field is fixed at construction and
/// only exposed through accessors. Identity is positional within a
/// [`CalculationHistory`](super::CalculationHistory), so two records with
/// identical fields are still distinct entries.
///
/// # Example
///
/// ```rust
/// use reckoner::core::Calculation;
///
/// let calc = Calculation::new(10.0, 5.0, "add", 15.0);
/// assert_eq!(calc.operation_name(), "add");
/// assert_eq!(calc.result(), 15.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    operand_a: f64,
    operand_b: f64,
    operation_name: String,
    result: f64,
    timestamp: DateTime<Utc>,
}

impl Calculation {
    /// Create a record stamped with the current time.
    pub fn new(operand_a: f64, operand_b: f64, operation_name: impl Into<String>, result: f64) -> Self {
        Self::with_timestamp(operand_a, operand_b, operation_name, result, Utc::now())
    }

    /// Create a record with an explicit timestamp, as when restoring from disk.
    pub fn with_timestamp(
        operand_a: f64,
        operand_b: f64,
        operation_name: impl Into<String>,
        result: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            operand_a,
            operand_b,
            operation_name: operation_name.into(),
            result,
            timestamp,
        }
    }

    pub fn operand_a(&self) -> f64 {
        self.operand_a
    }

    pub fn operand_b(&self) -> f64 {
        self.operand_b
    }

    pub fn operation_name(&self) -> &str {
        &self.operation_name
    }

    pub fn result(&self) -> f64 {
        self.result
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.operand_a, self.operation_name, self.operand_b, self.result
        )
    }
}
