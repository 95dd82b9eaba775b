//! Reading exported report files.
//!
//! SIGRA exports its reports as UTF-16 text. Older exports, and reports that
//! went through a spreadsheet, are sometimes re-saved as ISO-8859-1. No
//! attempt is made to guess which of the two a file uses.

use std::{
    fmt, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// The text encoding of a report file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    /// UTF-16. Endianness is taken from the byte order mark, little-endian
    /// if there is none.
    #[default]
    #[serde(rename = "utf-16", alias = "utf16")]
    Utf16,

    /// ISO-8859-1.
    #[serde(rename = "latin-1", alias = "latin1", alias = "iso-8859-1")]
    Latin1,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf16 => f.write_str("utf-16"),
            Self::Latin1 => f.write_str("latin-1"),
        }
    }
}

/// Error returned for an encoding name other than UTF-16 or Latin-1.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unsupported encoding '{0}', expected 'utf-16' or 'latin-1'")]
pub struct UnknownEncodingError(String);

impl FromStr for Encoding {
    type Err = UnknownEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-16" | "utf16" => Ok(Self::Utf16),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Self::Latin1),
            _ => Err(UnknownEncodingError(s.to_string())),
        }
    }
}

/// Errors that can occur when reading a report file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A UTF-16 file has an odd number of bytes.
    #[error("{path} is not UTF-16: odd length of {len} bytes")]
    OddLength {
        /// The file that was being decoded.
        path: PathBuf,
        /// Its length in bytes.
        len: usize,
    },

    /// A UTF-16 file contains an unpaired surrogate.
    #[error("{path} is not valid UTF-16")]
    InvalidUtf16 {
        /// The file that was being decoded.
        path: PathBuf,
    },
}

/// Resolves the file a report path refers to.
///
/// Reports are usually named after their export code without an extension
/// (`OFELST`), while the files on disk carry `.txt`. A path without an
/// extension that does not exist is retried with `.txt` appended.
#[must_use]
pub fn resolve(path: &Path) -> PathBuf {
    if path.extension().is_none() && !path.exists() {
        let mut with_txt = path.as_os_str().to_owned();
        with_txt.push(".txt");
        let candidate = PathBuf::from(with_txt);
        if candidate.exists() {
            return candidate;
        }
    }
    path.to_path_buf()
}

/// Reads a report file into a string.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid text in the
/// given encoding.
pub fn read_to_string(path: &Path, encoding: Encoding) -> Result<String, LoadError> {
    let path = resolve(path);
    tracing::debug!("reading {} as {encoding}", path.display());

    let bytes = std::fs::read(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;

    match encoding {
        Encoding::Utf16 => decode_utf16(&bytes).map_err(|error| match error {
            Utf16Error::OddLength => LoadError::OddLength {
                path,
                len: bytes.len(),
            },
            Utf16Error::Invalid => LoadError::InvalidUtf16 { path },
        }),
        Encoding::Latin1 => Ok(decode_latin1(&bytes)),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Utf16Error {
    OddLength,
    Invalid,
}

fn decode_utf16(bytes: &[u8]) -> Result<String, Utf16Error> {
    if bytes.len() % 2 != 0 {
        return Err(Utf16Error::OddLength);
    }

    let (big_endian, body) = match bytes {
        [0xFE, 0xFF, rest @ ..] => (true, rest),
        [0xFF, 0xFE, rest @ ..] => (false, rest),
        _ => (false, bytes),
    };

    let units = body.chunks_exact(2).map(|pair| {
        let pair = [pair[0], pair[1]];
        if big_endian {
            u16::from_be_bytes(pair)
        } else {
            u16::from_le_bytes(pair)
        }
    });

    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|_| Utf16Error::Invalid)
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}
