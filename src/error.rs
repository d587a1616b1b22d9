//! Failure taxonomy for a detection run. Each kind is a distinct variant so
//! callers can decide whether to prompt, fall back to a fixed separator, or
//! give up.

use std::io;
use std::path::{Path, PathBuf};

/// Shorthand for results whose error is a [`DetectError`].
pub type Result<T, E = DetectError> = std::result::Result<T, E>;

/// Everything that can go wrong while sniffing one input.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    /// The exclude list emptied the candidate set. Raised before any file
    /// I/O happens.
    #[error("no candidate separators to try")]
    NoCandidates,

    /// The input path doesn't name an existing file.
    #[error("Can't find file: {}", .path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The input exists but can't be opened for reading.
    #[error("Can't open file: {}", .path.display())]
    Open {
        /// The unreadable path.
        path: PathBuf,
        /// The underlying I/O failure.
        source: io::Error,
    },

    /// Reading failed partway through the scan.
    #[error("Error reading file: {}", .path.display())]
    Read {
        /// The input being read.
        path: PathBuf,
        /// The underlying I/O failure.
        source: io::Error,
    },

    /// Some record had zero occurrences of every remaining candidate.
    #[error("every candidate separator was eliminated by record {record}")]
    AllEliminated {
        /// The record that knocked out the last survivor(s).
        record: u64,
    },

    /// Lucky mode reached the end of the input with the field still crowded.
    #[error("{} candidates survived to the end of the input; no single guess", .survivors.len())]
    Ambiguous {
        /// The candidates still standing, in character order.
        survivors: Vec<char>,
    },

    /// A survivor was seen on too few records for a sample standard
    /// deviation, so the ranking pass can't say anything about it.
    #[error("separator '{}' was seen in only {samples} record(s); ranking needs 2", .separator.escape_default())]
    InsufficientData {
        /// The unrankable candidate.
        separator: char,
        /// How many counts its history holds.
        samples: usize,
    },
}

impl DetectError {
    /// A read failure that doesn't know its path yet; [`DetectError::locate`]
    /// fills it in once a caller with a real path is on the stack.
    pub(crate) fn read(source: io::Error) -> Self {
        DetectError::Read { path: PathBuf::from("<input>"), source }
    }

    #[must_use]
    pub(crate) fn locate(self, path: &Path) -> Self {
        match self {
            DetectError::Read { source, .. } => {
                DetectError::Read { path: path.to_owned(), source }
            }
            other => other,
        }
    }
}
