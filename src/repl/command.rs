//! Parsing of REPL input lines.

use crate::operations::OperationRegistry;
use crate::validation::{validate_operands, ValidationError};
use thiserror::Error;

/// Built-in commands and their help text, in display order.
pub const BUILTINS: [(&str, &str); 8] = [
    ("history", "Display calculation history."),
    ("clear", "Clear calculation history."),
    ("undo", "Undo the last change."),
    ("redo", "Redo the last undone change."),
    ("save", "Manually save history."),
    ("load", "Manually load history."),
    ("help", "Display this help menu."),
    ("exit", "Exit the application."),
];

/// A parsed REPL command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Calculate { operation: String, a: f64, b: f64 },
    History,
    Clear,
    Undo,
    Redo,
    Save,
    Load,
    Help,
    Exit,
}

/// Input that could not be turned into a command
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("Unknown command: '{0}'")]
    Unknown(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    ///
    /// Registered operation names take precedence over built-in commands.
    /// Operands are validated here, before the calculator sees them.
    ///
    /// # Example
    ///
    /// ```rust
    /// use reckoner::operations::OperationRegistry;
    /// use reckoner::repl::Command;
    ///
    /// let registry = OperationRegistry::standard();
    /// assert_eq!(
    ///     Command::parse("add 5 3", &registry, 1e9),
    ///     Ok(Some(Command::Calculate { operation: "add".to_string(), a: 5.0, b: 3.0 }))
    /// );
    /// assert_eq!(Command::parse("  ", &registry, 1e9), Ok(None));
    /// ```
    pub fn parse(
        line: &str,
        registry: &OperationRegistry,
        max_input: f64,
    ) -> Result<Option<Self>, ParseError> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };
        let name = name.to_lowercase();
        let args: Vec<&str> = tokens.collect();

        if registry.contains(&name) {
            let (a, b) = validate_operands(&args, max_input)?;
            return Ok(Some(Self::Calculate {
                operation: name,
                a,
                b,
            }));
        }

        let command = match name.as_str() {
            "history" => Self::History,
            "clear" => Self::Clear,
            "undo" => Self::Undo,
            "redo" => Self::Redo,
            "save" => Self::Save,
            "load" => Self::Load,
            "help" => Self::Help,
            "exit" => Self::Exit,
            _ => return Err(ParseError::Unknown(name)),
        };
        Ok(Some(command))
    }
}
