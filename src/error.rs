// SPDX-License-Identifier: MPL-2.0
//! Error types shared by the signature check, the EXIF decoder and the
//! batch report driver.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be opened or read, or is shorter than the
    /// signature length.
    #[error("I/O Error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Leading bytes do not match any known JPEG signature.
    #[error("'{}' does not match any known JPEG signature", path.display())]
    FormatMismatch { path: PathBuf },

    /// The container cannot be parsed or fails its integrity check.
    #[error("Corrupt file '{}': {reason}", path.display())]
    CorruptFile { path: PathBuf, reason: String },

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Report Error: {0}")]
    Report(String),
}

impl Error {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
        Error::CorruptFile {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// True when the file simply is not a JPEG.
    pub fn is_format_mismatch(&self) -> bool {
        matches!(self, Error::FormatMismatch { .. })
    }

    /// True for per-file failures a batch run should log and step over.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Error::Io { .. } | Error::FormatMismatch { .. } | Error::CorruptFile { .. }
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Report(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
