//! Text encodings supported for history files.

use super::error::EncodingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encoding applied to history file text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    #[default]
    Utf8,
    Latin1,
    Ascii,
}

impl TextEncoding {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
            Self::Ascii => "ascii",
        }
    }

    pub fn encode(&self, text: &str) -> Result<Vec<u8>, EncodingError> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Latin1 => self.encode_narrow(text, 0xFF),
            Self::Ascii => self.encode_narrow(text, 0x7F),
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<String, EncodingError> {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|error| {
                    let offset = error.valid_up_to();
                    EncodingError::Undecodable {
                        byte: bytes[offset],
                        offset,
                        encoding: *self,
                    }
                }),
            Self::Latin1 => Ok(bytes.iter().map(|&byte| char::from(byte)).collect()),
            Self::Ascii => match bytes.iter().position(|byte| !byte.is_ascii()) {
                Some(offset) => Err(EncodingError::Undecodable {
                    byte: bytes[offset],
                    offset,
                    encoding: *self,
                }),
                None => Ok(bytes.iter().map(|&byte| char::from(byte)).collect()),
            },
        }
    }

    fn encode_narrow(&self, text: &str, max: u32) -> Result<Vec<u8>, EncodingError> {
        text.chars()
            .map(|ch| {
                u8::try_from(u32::from(ch))
                    .ok()
                    .filter(|byte| u32::from(*byte) <= max)
                    .ok_or(EncodingError::Unencodable {
                        ch,
                        encoding: *self,
                    })
            })
            .collect()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();
        match normalized.as_str() {
            "utf8" => Ok(Self::Utf8),
            "latin1" | "iso88591" | "l1" => Ok(Self::Latin1),
            "ascii" | "usascii" => Ok(Self::Ascii),
            _ => Err(EncodingError::Unsupported {
                name: s.to_string(),
            }),
        }
    }
}
