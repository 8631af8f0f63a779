//! Calculator configuration.
//!
//! Configuration is read once at startup from `CALCULATOR_*` environment
//! variables (or any other lookup, such as command-line overrides layered
//! over the environment), validated as a whole, and then passed by value to
//! the calculator. Nothing re-reads or re-validates it afterwards.

use crate::persistence::{HistoryFile, TextEncoding};
use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;
use tracing::Level;

pub const LOG_DIR_VAR: &str = "CALCULATOR_LOG_DIR";
pub const HISTORY_DIR_VAR: &str = "CALCULATOR_HISTORY_DIR";
pub const MAX_HISTORY_VAR: &str = "CALCULATOR_MAX_HISTORY_SIZE";
pub const AUTO_SAVE_VAR: &str = "CALCULATOR_AUTO_SAVE";
pub const PRECISION_VAR: &str = "CALCULATOR_PRECISION";
pub const MAX_INPUT_VAR: &str = "CALCULATOR_MAX_INPUT_VALUE";
pub const ENCODING_VAR: &str = "CALCULATOR_DEFAULT_ENCODING";
pub const LOG_LEVEL_VAR: &str = "CALCULATOR_LOG_LEVEL";

/// Name of the history file inside the history directory.
pub const HISTORY_FILE_NAME: &str = "calculation_history.csv";

/// Name of the log file inside the log directory.
pub const LOG_FILE_NAME: &str = "calculator.log";

/// Largest supported number of decimal places.
pub const MAX_PRECISION: u32 = 15;

/// A single invalid configuration value
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigIssue {
    #[error("Invalid value for {var}: '{value}'. Must be an integer.")]
    NotAnInteger { var: &'static str, value: String },

    #[error("Invalid value for {var}: '{value}'. Must be a number.")]
    NotANumber { var: &'static str, value: String },

    #[error("Invalid boolean value for {var}: '{value}'")]
    NotABoolean { var: &'static str, value: String },

    #[error("Invalid value for {var}: '{value}'. Must be {expected}.")]
    OutOfRange {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Unsupported encoding for {var}: '{value}'")]
    UnsupportedEncoding { var: &'static str, value: String },

    #[error("Invalid log level for {var}: '{value}'")]
    InvalidLogLevel { var: &'static str, value: String },
}

/// Errors that can occur while building or applying configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more values failed validation
    #[error("Invalid configuration: {}", join_issues(.issues))]
    Invalid { issues: Vec<ConfigIssue> },

    /// A configured directory could not be created
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
}

impl From<ConfigIssue> for ConfigError {
    fn from(issue: ConfigIssue) -> Self {
        Self::Invalid {
            issues: vec![issue],
        }
    }
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validated calculator settings.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculatorConfig {
    pub log_dir: PathBuf,
    pub history_dir: PathBuf,
    pub max_history: NonZeroUsize,
    pub auto_save: bool,
    pub precision: u32,
    pub max_input: f64,
    pub encoding: TextEncoding,
    pub log_level: Level,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            history_dir: PathBuf::from("data"),
            max_history: NonZeroUsize::new(100).unwrap_or(NonZeroUsize::MIN),
            auto_save: true,
            precision: 4,
            max_input: 1e9,
            encoding: TextEncoding::Utf8,
            log_level: Level::INFO,
        }
    }
}

impl CalculatorConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unset variables take their defaults. Every invalid value is
    /// reported, not just the first.
    ///
    /// # Example
    ///
    /// ```rust
    /// use reckoner::config::{CalculatorConfig, ConfigError};
    ///
    /// let config = CalculatorConfig::from_lookup(|name| match name {
    ///     "CALCULATOR_PRECISION" => Some("2".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.precision, 2);
    /// assert_eq!(config.max_history.get(), 100);
    ///
    /// let error = CalculatorConfig::from_lookup(|name| match name {
    ///     "CALCULATOR_PRECISION" => Some("xyz".to_string()),
    ///     "CALCULATOR_AUTO_SAVE" => Some("maybe".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap_err();
    /// assert!(matches!(error, ConfigError::Invalid { ref issues } if issues.len() == 2));
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_history = lookup(MAX_HISTORY_VAR)
            .map_or(Ok(defaults.max_history), |raw| parse_max_history(&raw));
        let auto_save = lookup(AUTO_SAVE_VAR)
            .map_or(Ok(defaults.auto_save), |raw| parse_bool(AUTO_SAVE_VAR, &raw));
        let precision = lookup(PRECISION_VAR)
            .map_or(Ok(defaults.precision), |raw| parse_precision(&raw));
        let max_input = lookup(MAX_INPUT_VAR)
            .map_or(Ok(defaults.max_input), |raw| parse_max_input(&raw));
        let encoding = lookup(ENCODING_VAR).map_or(Ok(defaults.encoding), |raw| {
            TextEncoding::from_str(&raw).map_err(|_| ConfigIssue::UnsupportedEncoding {
                var: ENCODING_VAR,
                value: raw.clone(),
            })
        });
        let log_level = lookup(LOG_LEVEL_VAR).map_or(Ok(defaults.log_level), |raw| {
            Level::from_str(raw.trim()).map_err(|_| ConfigIssue::InvalidLogLevel {
                var: LOG_LEVEL_VAR,
                value: raw.clone(),
            })
        });

        let checks = vec![
            check(&max_history),
            check(&auto_save),
            check(&precision),
            check(&max_input),
            check(&encoding),
            check(&log_level),
        ];
        if let Validation::Failure(issues) = Validation::all_vec(checks) {
            return Err(ConfigError::Invalid {
                issues: issues.iter().cloned().collect(),
            });
        }

        Ok(Self {
            log_dir: lookup(LOG_DIR_VAR).map_or(defaults.log_dir, PathBuf::from),
            history_dir: lookup(HISTORY_DIR_VAR).map_or(defaults.history_dir, PathBuf::from),
            max_history: max_history?,
            auto_save: auto_save?,
            precision: precision?,
            max_input: max_input?,
            encoding: encoding?,
            log_level: log_level?,
        })
    }

    /// Path of the persisted history.
    pub fn history_path(&self) -> PathBuf {
        self.history_dir.join(HISTORY_FILE_NAME)
    }

    /// The persisted history with its configured encoding.
    pub fn history_file(&self) -> HistoryFile {
        HistoryFile::new(self.history_path(), self.encoding)
    }

    /// Path of the log file.
    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }

    /// Create the log and history directories if they do not exist.
    pub fn ensure_dirs(&self) -> Result<(), ConfigError> {
        create_dir(&self.log_dir)?;
        create_dir(&self.history_dir)
    }
}

fn create_dir(path: &Path) -> Result<(), ConfigError> {
    fs::create_dir_all(path).map_err(|source| ConfigError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn check<T>(parsed: &Result<T, ConfigIssue>) -> Validation<(), NonEmptyVec<ConfigIssue>> {
    match parsed {
        Ok(_) => Validation::success(()),
        Err(issue) => Validation::fail(issue.clone()),
    }
}

fn parse_max_history(raw: &str) -> Result<NonZeroUsize, ConfigIssue> {
    let value: usize = raw.trim().parse().map_err(|_| ConfigIssue::NotAnInteger {
        var: MAX_HISTORY_VAR,
        value: raw.to_string(),
    })?;
    NonZeroUsize::new(value).ok_or_else(|| ConfigIssue::OutOfRange {
        var: MAX_HISTORY_VAR,
        value: raw.to_string(),
        expected: "at least 1",
    })
}

fn parse_precision(raw: &str) -> Result<u32, ConfigIssue> {
    let value: i64 = raw.trim().parse().map_err(|_| ConfigIssue::NotAnInteger {
        var: PRECISION_VAR,
        value: raw.to_string(),
    })?;
    u32::try_from(value)
        .ok()
        .filter(|precision| *precision <= MAX_PRECISION)
        .ok_or_else(|| ConfigIssue::OutOfRange {
            var: PRECISION_VAR,
            value: raw.to_string(),
            expected: "between 0 and 15",
        })
}

fn parse_max_input(raw: &str) -> Result<f64, ConfigIssue> {
    let value: f64 = raw.trim().parse().map_err(|_| ConfigIssue::NotANumber {
        var: MAX_INPUT_VAR,
        value: raw.to_string(),
    })?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigIssue::OutOfRange {
            var: MAX_INPUT_VAR,
            value: raw.to_string(),
            expected: "a positive finite number",
        })
    }
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigIssue> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "t" | "y" | "yes" => Ok(true),
        "false" | "0" | "f" | "n" | "no" => Ok(false),
        _ => Err(ConfigIssue::NotABoolean {
            var,
            value: raw.to_string(),
        }),
    }
}
