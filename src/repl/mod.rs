//! Read-eval-print loop over a [`Calculator`].
//!
//! The loop works over any `BufRead`/`Write` pair, so it can be driven by a
//! terminal or by a script.

mod command;

pub use command::{Command, ParseError, BUILTINS};

use crate::calculator::Calculator;
use crate::core::ListenerFailure;
use chrono::SecondsFormat;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// Whether the loop should keep reading input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive shell around one calculator session.
///
/// # Example
///
/// ```rust
/// use reckoner::calculator::Calculator;
/// use reckoner::config::CalculatorConfig;
/// use reckoner::operations::OperationRegistry;
/// use reckoner::repl::Repl;
///
/// let calculator = Calculator::new(CalculatorConfig::default(), OperationRegistry::standard());
/// let mut repl = Repl::new(calculator);
/// let mut output = Vec::new();
///
/// repl.run("multiply 6 7\nexit\n".as_bytes(), &mut output).unwrap();
///
/// let output = String::from_utf8(output).unwrap();
/// assert!(output.contains("Result: 42"));
/// ```
pub struct Repl {
    calculator: Calculator,
}

impl Repl {
    pub fn new(calculator: Calculator) -> Self {
        Self { calculator }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Print the banner and help, then process lines until `exit` or end of
    /// input.
    pub fn run<R, W>(&mut self, mut input: R, output: &mut W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(output, "Welcome to the Advanced Calculator!")?;
        self.write_help(output)?;

        let mut line = String::new();
        loop {
            write!(output, ">>> ")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(output, "\nExiting...")?;
                break;
            }
            if self.execute_line(&line, output)? == Flow::Exit {
                break;
            }
        }
        info!(session = %self.calculator.id(), "calculator session ended");
        Ok(())
    }

    /// Process one input line.
    pub fn execute_line<W: Write>(&mut self, line: &str, output: &mut W) -> io::Result<Flow> {
        let parsed = Command::parse(
            line,
            self.calculator.registry(),
            self.calculator.config().max_input,
        );
        match parsed {
            Ok(Some(command)) => {
                debug!(?command, "dispatching command");
                self.dispatch(command, output)
            }
            Ok(None) => Ok(Flow::Continue),
            Err(ParseError::Unknown(name)) => {
                writeln!(output, "Unknown command: '{name}'")?;
                Ok(Flow::Continue)
            }
            Err(ParseError::Invalid(error)) => {
                writeln!(output, "Error: {error}")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch<W: Write>(&mut self, command: Command, output: &mut W) -> io::Result<Flow> {
        match command {
            Command::Calculate { operation, a, b } => {
                match self.calculator.execute(&operation, a, b) {
                    Ok(outcome) => {
                        writeln!(output, "Result: {}", outcome.value.result())?;
                        write_failures(output, &outcome.listener_failures)?;
                    }
                    Err(error) => writeln!(output, "Error: {error}")?,
                }
            }
            Command::History => self.write_history(output)?,
            Command::Clear => {
                let outcome = self.calculator.clear();
                writeln!(output, "History cleared.")?;
                write_failures(output, &outcome.listener_failures)?;
            }
            Command::Undo => match self.calculator.undo() {
                Ok(outcome) => {
                    writeln!(output, "Undo successful.")?;
                    write_failures(output, &outcome.listener_failures)?;
                }
                Err(error) => writeln!(output, "Error: {error}")?,
            },
            Command::Redo => match self.calculator.redo() {
                Ok(outcome) => {
                    writeln!(output, "Redo successful.")?;
                    write_failures(output, &outcome.listener_failures)?;
                }
                Err(error) => writeln!(output, "Error: {error}")?,
            },
            Command::Save => match self.calculator.save() {
                Ok(()) => writeln!(output, "History saved.")?,
                Err(error) => writeln!(output, "Error: {error}")?,
            },
            Command::Load => {
                let outcome = self.calculator.load();
                writeln!(output, "History loaded ({} records).", outcome.value)?;
                write_failures(output, &outcome.listener_failures)?;
            }
            Command::Help => self.write_help(output)?,
            Command::Exit => {
                writeln!(output, "Exiting Calculator. Goodbye!")?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn write_history<W: Write>(&self, output: &mut W) -> io::Result<()> {
        let history = self.calculator.history();
        if history.is_empty() {
            return writeln!(output, "History is empty.");
        }
        writeln!(output, "\n--- Calculation History ---")?;
        for calc in &history {
            writeln!(
                output,
                "{}: {}",
                calc.timestamp().to_rfc3339_opts(SecondsFormat::Secs, true),
                calc
            )?;
        }
        writeln!(output, "---------------------------")
    }

    fn write_help<W: Write>(&self, output: &mut W) -> io::Result<()> {
        writeln!(output, "\nAvailable Commands:")?;
        for operation in self.calculator.registry().list_operations() {
            writeln!(output, "  {operation:<12} <a> <b>")?;
        }
        for (name, description) in BUILTINS {
            writeln!(output, "  {name:<12} - {description}")?;
        }
        Ok(())
    }
}

fn write_failures<W: Write>(output: &mut W, failures: &[ListenerFailure]) -> io::Result<()> {
    for failure in failures {
        writeln!(output, "Warning: {failure}")?;
    }
    Ok(())
}
