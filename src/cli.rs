//! Command-line entry point.
//!
//! Flags are layered over the `CALCULATOR_*` environment before the
//! configuration is validated; the session then runs on stdin and stdout.

use clap::Parser;
use std::io;
use std::path::PathBuf;

use crate::calculator::Calculator;
use crate::config::{
    CalculatorConfig, AUTO_SAVE_VAR, ENCODING_VAR, HISTORY_DIR_VAR, LOG_DIR_VAR, LOG_LEVEL_VAR,
    MAX_HISTORY_VAR, MAX_INPUT_VAR, PRECISION_VAR,
};
use crate::error::Result;
use crate::logging::init_logging;
use crate::repl::Repl;

/// Command-line options. Each one overrides the matching `CALCULATOR_*`
/// environment variable.
#[derive(Debug, Default, Parser)]
#[command(
    name = "reckoner",
    about = "Interactive calculator with undoable, persistent history",
    version
)]
pub struct Cli {
    /// Directory for the log file.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Directory for the history file.
    #[arg(long)]
    pub history_dir: Option<PathBuf>,

    /// Maximum number of calculations kept in history.
    #[arg(long)]
    pub max_history: Option<String>,

    /// Decimal places results are rounded to.
    #[arg(long)]
    pub precision: Option<String>,

    /// Largest accepted operand magnitude.
    #[arg(long)]
    pub max_input: Option<String>,

    /// History file encoding (utf-8, latin-1, ascii).
    #[arg(long)]
    pub encoding: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Do not save history after each calculation.
    #[arg(long)]
    pub no_auto_save: bool,
}

impl Cli {
    fn override_for(&self, var: &str) -> Option<String> {
        match var {
            LOG_DIR_VAR => self.log_dir.as_ref().map(|p| p.display().to_string()),
            HISTORY_DIR_VAR => self.history_dir.as_ref().map(|p| p.display().to_string()),
            MAX_HISTORY_VAR => self.max_history.clone(),
            PRECISION_VAR => self.precision.clone(),
            MAX_INPUT_VAR => self.max_input.clone(),
            ENCODING_VAR => self.encoding.clone(),
            LOG_LEVEL_VAR => self.log_level.clone(),
            AUTO_SAVE_VAR if self.no_auto_save => Some("false".to_string()),
            _ => None,
        }
    }

    /// Configuration from these options layered over `env`.
    pub fn config_with<F>(&self, env: F) -> Result<CalculatorConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config =
            CalculatorConfig::from_lookup(|var| self.override_for(var).or_else(|| env(var)))?;
        Ok(config)
    }

    /// Configuration from these options layered over the process environment.
    pub fn config(&self) -> Result<CalculatorConfig> {
        self.config_with(|var| std::env::var(var).ok())
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = cli.config()?;
    config.ensure_dirs()?;
    init_logging(&config)?;

    let mut repl = Repl::new(Calculator::open(config));
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl.run(stdin.lock(), &mut stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalculatorError;
    use crate::persistence::TextEncoding;

    fn env(var: &str) -> Option<String> {
        match var {
            PRECISION_VAR => Some("6".to_string()),
            MAX_HISTORY_VAR => Some("50".to_string()),
            _ => None,
        }
    }

    #[test]
    fn flags_override_environment() {
        let cli = Cli::parse_from([
            "reckoner",
            "--precision",
            "2",
            "--encoding",
            "latin-1",
            "--no-auto-save",
        ]);

        let config = cli.config_with(env).unwrap();

        assert_eq!(config.precision, 2);
        assert_eq!(config.max_history.get(), 50);
        assert_eq!(config.encoding, TextEncoding::Latin1);
        assert!(!config.auto_save);
    }

    #[test]
    fn no_flags_uses_environment_and_defaults() {
        let config = Cli::default().config_with(env).unwrap();

        assert_eq!(config.precision, 6);
        assert!(config.auto_save);
        assert_eq!(config.history_dir, PathBuf::from("data"));
    }

    #[test]
    fn invalid_flag_is_a_config_error() {
        let cli = Cli::parse_from(["reckoner", "--max-history", "0"]);

        let error = cli.config_with(|_| None).unwrap_err();

        assert!(matches!(error, CalculatorError::Config(_)));
        assert!(error.to_string().contains("CALCULATOR_MAX_HISTORY_SIZE"));
    }
}
