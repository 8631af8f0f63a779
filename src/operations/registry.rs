//! Name-to-function registry for binary operations.

use super::arithmetic;
use super::error::{InvalidOperationName, OperationError, UnknownOperationError};
use std::fmt;
use std::sync::Arc;

type BinaryFn = Arc<dyn Fn(f64, f64) -> Result<f64, OperationError> + Send + Sync>;

/// A named binary numeric function.
///
/// Operations never yield NaN or infinity: a non-finite result is reported
/// as [`OperationError::NonFinite`].
#[derive(Clone)]
pub struct Operation {
    name: String,
    function: BinaryFn,
}

impl Operation {
    pub fn new<F>(name: impl Into<String>, function: F) -> Self
    where
        F: Fn(f64, f64) -> Result<f64, OperationError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            function: Arc::new(function),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, a: f64, b: f64) -> Result<f64, OperationError> {
        let result = (self.function)(a, b)?;
        if !result.is_finite() {
            return Err(OperationError::NonFinite {
                operation: self.name.clone(),
            });
        }
        Ok(result)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation").field("name", &self.name).finish()
    }
}

/// Registry of operations, kept in registration order.
///
/// Names are matched case-insensitively and stored lower-cased.
///
/// # Example
///
/// ```rust
/// use reckoner::operations::OperationRegistry;
///
/// let registry = OperationRegistry::standard();
/// let divide = registry.resolve("divide").unwrap();
/// assert_eq!(divide.apply(9.0, 3.0), Ok(3.0));
/// assert!(divide.apply(1.0, 0.0).is_err());
/// assert!(registry.resolve("sqrt").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct OperationRegistry {
    operations: Vec<Operation>,
}

impl OperationRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the ten standard operations.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.insert(Operation::new("add", arithmetic::add));
        registry.insert(Operation::new("subtract", arithmetic::subtract));
        registry.insert(Operation::new("multiply", arithmetic::multiply));
        registry.insert(Operation::new("divide", arithmetic::divide));
        registry.insert(Operation::new("power", arithmetic::power));
        registry.insert(Operation::new("root", arithmetic::root));
        registry.insert(Operation::new("modulus", arithmetic::modulus));
        registry.insert(Operation::new("int_divide", arithmetic::int_divide));
        registry.insert(Operation::new("percent", arithmetic::percent));
        registry.insert(Operation::new("abs_diff", arithmetic::abs_diff));
        registry
    }

    /// Register `function` under `name`, replacing any operation already
    /// registered under that name.
    ///
    /// Empty names and names containing whitespace are rejected.
    pub fn register<F>(&mut self, name: &str, function: F) -> Result<(), InvalidOperationName>
    where
        F: Fn(f64, f64) -> Result<f64, OperationError> + Send + Sync + 'static,
    {
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(InvalidOperationName {
                name: name.to_string(),
            });
        }
        self.insert(Operation::new(name.to_lowercase(), function));
        Ok(())
    }

    fn insert(&mut self, operation: Operation) {
        match self
            .operations
            .iter_mut()
            .find(|existing| existing.name == operation.name)
        {
            Some(existing) => *existing = operation,
            None => self.operations.push(operation),
        }
    }

    /// Registered names in registration order.
    pub fn list_operations(&self) -> Vec<&str> {
        self.operations.iter().map(Operation::name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn resolve(&self, name: &str) -> Result<&Operation, UnknownOperationError> {
        self.find(name).ok_or_else(|| UnknownOperationError {
            name: name.to_string(),
        })
    }

    fn find(&self, name: &str) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|operation| operation.name.eq_ignore_ascii_case(name))
    }
}
