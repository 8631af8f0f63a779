//! Saving and loading calculation history.
//!
//! History is stored as delimited text (see [`codec`]) in a configurable
//! text encoding. Saving is best effort: a failed write is reported but
//! never alters in-memory state. Loading is fail-soft when asked to be:
//! a missing file is an empty history, and a malformed one is logged and
//! treated as empty.

pub mod codec;
mod encoding;
pub mod error;

pub use codec::{decode_records, encode_records, HEADER};
pub use encoding::TextEncoding;
pub use error::{EncodingError, PersistenceError};

use crate::core::Calculation;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A history file on disk and the encoding used to read and write it.
///
/// # Example
///
/// ```rust
/// use reckoner::core::Calculation;
/// use reckoner::persistence::{HistoryFile, TextEncoding};
///
/// let dir = tempfile::tempdir().unwrap();
/// let file = HistoryFile::new(dir.path().join("history.csv"), TextEncoding::Utf8);
///
/// file.save(&[Calculation::new(10.0, 5.0, "add", 15.0)]).unwrap();
/// let loaded = file.load().unwrap();
/// assert_eq!(loaded[0].result(), 15.0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryFile {
    path: PathBuf,
    encoding: TextEncoding,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>, encoding: TextEncoding) -> Self {
        Self {
            path: path.into(),
            encoding,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Write `records`, replacing the file. Missing parent directories are
    /// created.
    pub fn save(&self, records: &[Calculation]) -> Result<(), PersistenceError> {
        let bytes = self.encoding.encode(&encode_records(records))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.write_error(source))?;
        }
        fs::write(&self.path, bytes).map_err(|source| self.write_error(source))?;
        debug!(path = %self.path.display(), records = records.len(), "saved history");
        Ok(())
    }

    /// Read every record. A missing file yields an empty history; any other
    /// failure is returned.
    pub fn load(&self) -> Result<Vec<Calculation>, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no history file; starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let records = decode_records(&self.encoding.decode(&bytes)?)?;
        debug!(path = %self.path.display(), records = records.len(), "loaded history");
        Ok(records)
    }

    /// Like [`load`](Self::load), but any failure is logged and yields an
    /// empty history.
    pub fn load_or_empty(&self) -> Vec<Calculation> {
        self.load().unwrap_or_else(|error| {
            warn!(path = %self.path.display(), %error, "could not load history; starting empty");
            Vec::new()
        })
    }

    fn write_error(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
