//! `sepsniff` guesses the field separator of a delimited text file by
//! watching which candidate characters keep appearing, record after record.
//! Candidates that miss a record are eliminated as the file streams by; if
//! more than one reaches the end of the input, the survivors are ranked by
//! how steady their per-record counts were. The `sniff` module is the
//! kernel of the crate; `args` parses the command line and `input` hides
//! the decoding details.
//!
//! Current limitations:
//! * Counting is purely literal. A separator inside a quoted field still
//!   counts, so heavily quoted data can fool the ranking.

#![cfg_attr(debug_assertions, allow(dead_code, unused_imports))]
#![deny(unused_must_use)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![deny(missing_docs)]

use std::path::Path;

pub mod args;
mod candidates;
mod error;
mod input;
mod sniff;
mod stats;
mod trace;

pub use candidates::DEFAULT_CANDIDATES;
pub use error::{DetectError, Result};

use trace::Trace;

/// Knobs for one detection run. The defaults leave the candidate set at
/// [`DEFAULT_CANDIDATES`] and produce a ranked list.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Candidate characters to drop before scanning starts. Characters not
    /// in the set are ignored.
    pub exclude: Vec<char>,
    /// Extra candidate characters to try alongside the defaults. Including
    /// a default is a no-op on membership.
    pub include: Vec<char>,
    /// Settle for the single most likely separator and skip the ranking
    /// pass; fails if the input leaves more than one possibility.
    pub lucky: bool,
    /// Narrate every elimination and ranking decision on standard error.
    pub trace: bool,
}

/// What a run found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Lucky mode's single answer.
    Separator(char),
    /// Normal mode's surviving candidates, most likely first. Never empty.
    Ranking(Vec<char>),
}

impl Detection {
    /// The most likely separator, however the run was configured.
    #[must_use]
    pub fn best(&self) -> Option<char> {
        match self {
            Detection::Separator(sep) => Some(*sep),
            Detection::Ranking(separators) => separators.first().copied(),
        }
    }
}

/// Detects the separator used by the file at `path`.
///
/// In normal mode the answer is [`Detection::Ranking`]: every candidate that
/// appeared on every record, most likely first. With [`Options::lucky`] set
/// the answer is the bare [`Detection::Separator`], provided the elimination
/// pass narrows the field to one. See [`DetectError`] for the ways a run can
/// fail instead.
pub fn detect(path: impl AsRef<Path>, options: &Options) -> Result<Detection> {
    let path = path.as_ref();
    let trace = Trace::new(options.trace);
    trace.say(|| format!("sniffing {}", path.display()));
    sniff::sniff(|| input::open(path), options, &trace).map_err(|err| err.locate(path))
}

/// Like [`detect`], but over bytes already in memory. Handy for callers
/// that have the data anyway, and for tests.
pub fn detect_bytes(input: &[u8], options: &Options) -> Result<Detection> {
    let trace = Trace::new(options.trace);
    trace.say(|| "sniffing in-memory input".to_string());
    sniff::sniff(|| Ok(input), options, &trace)
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use assert_fs::{prelude::*, TempDir};

    fn path_with(temp: &TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let f = temp.child(name);
        f.write_binary(contents).unwrap();
        f.path().to_owned()
    }

    #[test]
    fn a_file_and_its_bytes_detect_identically() {
        let contents: &[u8] = b"a,b,c\nd;e,f\ng,h,i\n";
        let temp = TempDir::new().unwrap();
        let path = path_with(&temp, "data.csv", contents);
        let options = Options::default();
        assert_eq!(
            detect(&path, &options).unwrap(),
            detect_bytes(contents, &options).unwrap()
        );
    }

    #[test]
    fn a_missing_file_is_reported_as_such() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nowhere.csv");
        let err = detect(&path, &Options::default()).unwrap_err();
        assert!(matches!(err, DetectError::NotFound { .. }));
    }

    #[test]
    fn an_empty_candidate_set_beats_a_missing_file() {
        let options = Options { exclude: DEFAULT_CANDIDATES.to_vec(), ..Options::default() };
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nowhere.csv");
        let err = detect(&path, &options).unwrap_err();
        assert!(matches!(err, DetectError::NoCandidates));
    }

    fn to_utf_16le(source: &str) -> Vec<u8> {
        let mut result = b"\xff\xfe".to_vec();
        for b in source.as_bytes().iter() {
            result.push(*b);
            result.push(0);
        }
        result
    }

    #[test]
    fn utf_16le_input_is_decoded_before_sniffing() {
        let temp = TempDir::new().unwrap();
        let path = path_with(&temp, "utf16.csv", &to_utf_16le("a,b\nc,d\n"));
        let found = detect(&path, &Options::default()).unwrap();
        assert_eq!(found, Detection::Ranking(vec![',']));
    }

    #[test]
    fn best_agrees_across_result_shapes() {
        assert_eq!(Detection::Separator('\t').best(), Some('\t'));
        assert_eq!(Detection::Ranking(vec![';', ',']).best(), Some(';'));
    }
}
