//! Persistence error types.

use super::encoding::TextEncoding;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while saving or loading history files
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading the history file failed
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// Writing the history file failed
    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// Text could not be converted to or from the configured encoding
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The file has no header line
    #[error("History file has no header line")]
    MissingHeader,

    /// A required column is absent from the header
    #[error("History file is missing column '{column}'")]
    MissingColumn { column: &'static str },

    /// A data row could not be parsed
    #[error("Malformed history at line {line}: {message}")]
    Malformed { line: usize, message: String },
}

/// Errors converting between text and bytes
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Unsupported text encoding '{name}'")]
    Unsupported { name: String },

    #[error("Character {ch:?} cannot be encoded as {encoding}")]
    Unencodable { ch: char, encoding: TextEncoding },

    #[error("Byte 0x{byte:02x} at offset {offset} is not valid {encoding}")]
    Undecodable {
        byte: u8,
        offset: usize,
        encoding: TextEncoding,
    },
}
