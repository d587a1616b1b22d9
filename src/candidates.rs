//! The candidate set: which characters are still in the running as the
//! separator, and the per-record counts seen for each so far.

use bstr::ByteSlice;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use memchr::memchr_iter;

use crate::error::DetectError;
use crate::trace::{visible, Trace};
use crate::Options;

/// The separators tried when the caller doesn't say otherwise.
pub const DEFAULT_CANDIDATES: [char; 5] = [',', ';', ':', '|', '\t'];

/// What a candidate remembers about the records it appeared in. The scan
/// only needs to know *that* a candidate occurred; whether the counts are
/// kept for the ranking pass depends on the flavor.
pub(crate) trait History: Default {
    /// Note that the candidate occurred `count` times in the current record.
    fn record(&mut self, count: usize);
    /// Every count recorded so far, in record order.
    fn samples(&self) -> &[usize];
}

/// Count history for the ranking pass.
#[derive(Debug, Default)]
pub(crate) struct Recorded(Vec<usize>);

impl History for Recorded {
    fn record(&mut self, count: usize) {
        self.0.push(count);
    }
    fn samples(&self) -> &[usize] {
        &self.0
    }
}

/// Lucky mode never ranks, so it doesn't keep counts either.
#[derive(Default)]
pub(crate) struct Ignored;

impl History for Ignored {
    fn record(&mut self, _count: usize) {}
    fn samples(&self) -> &[usize] {
        &[]
    }
}

type Histories<H> = IndexMap<char, H, FxBuildHasher>;

#[derive(Debug)]
pub(crate) struct CandidateSet<H: History> {
    candidates: Histories<H>,
}

impl<H: History> CandidateSet<H> {
    /// Builds the set a scan starts from: the defaults, minus `exclude`,
    /// plus `include` — in that order, so an included character survives
    /// its own exclusion. Candidates are kept in character order so that
    /// trace output and tie-breaking never depend on hash order.
    pub(crate) fn from_options(options: &Options, trace: &Trace) -> Result<Self, DetectError> {
        let mut chars: Vec<char> = DEFAULT_CANDIDATES
            .into_iter()
            .filter(|sep| !options.exclude.contains(sep))
            .collect();
        for &sep in &options.exclude {
            if DEFAULT_CANDIDATES.contains(&sep) {
                trace.say(|| format!("excluding '{}'", visible(sep)));
            }
        }
        for &sep in &options.include {
            trace.say(|| format!("including '{}'", visible(sep)));
            chars.push(sep);
        }
        chars.sort_unstable();
        chars.dedup();
        if chars.is_empty() {
            return Err(DetectError::NoCandidates);
        }
        let mut candidates = Histories::<H>::default();
        for sep in chars {
            candidates.insert(sep, H::default());
        }
        Ok(CandidateSet { candidates })
    }

    pub(crate) fn len(&self) -> usize {
        self.candidates.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The one candidate left, if the set is down to exactly one.
    pub(crate) fn sole_survivor(&self) -> Option<char> {
        if self.candidates.len() == 1 {
            self.candidates.keys().next().copied()
        } else {
            None
        }
    }

    pub(crate) fn survivors(&self) -> impl Iterator<Item = char> + '_ {
        self.candidates.keys().copied()
    }

    /// Counts every still-alive candidate against one record. A candidate
    /// that fails to appear is out for good; one that does appear has the
    /// count added to its history. The keys are snapshotted up front so
    /// removal can't upset the iteration.
    pub(crate) fn observe(&mut self, record: u64, line: &[u8], trace: &Trace) {
        let snapshot: Vec<char> = self.candidates.keys().copied().collect();
        for sep in snapshot {
            let count = occurrences(line, sep);
            if count == 0 {
                // shift_remove keeps the survivors in character order
                self.candidates.shift_remove(&sep);
                trace.say(|| format!("record {record}: '{}' absent, eliminated", visible(sep)));
            } else {
                trace.say(|| format!("record {record}: '{}' x {count}", visible(sep)));
                if let Some(history) = self.candidates.get_mut(&sep) {
                    history.record(count);
                }
            }
        }
    }

    pub(crate) fn into_histories(self) -> impl Iterator<Item = (char, H)> {
        self.candidates.into_iter()
    }
}

/// Occurrences of `sep` in `line`, matched as a literal character — `|` and
/// friends are never pattern syntax here. ASCII candidates go through
/// `memchr`; anything wider is matched on decoded chars, since a multi-byte
/// character's bytes can collide with other characters' continuation bytes.
#[allow(clippy::cast_possible_truncation)]
fn occurrences(line: &[u8], sep: char) -> usize {
    if sep.is_ascii() {
        memchr_iter(sep as u8, line).count()
    } else {
        line.chars().filter(|&c| c == sep).count()
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;

    fn quiet() -> Trace {
        Trace::new(false)
    }

    fn members<H: History>(set: &CandidateSet<H>) -> Vec<char> {
        set.survivors().collect()
    }

    #[test]
    fn defaults_minus_exclude_plus_include() {
        let options = Options {
            exclude: vec![',', ';'],
            include: vec!['~'],
            ..Options::default()
        };
        let set = CandidateSet::<Recorded>::from_options(&options, &quiet()).unwrap();
        assert_eq!(members(&set), vec!['\t', ':', '|', '~']);
    }

    #[test]
    fn including_a_default_is_a_membership_noop() {
        let options = Options { include: vec![','], ..Options::default() };
        let set = CandidateSet::<Recorded>::from_options(&options, &quiet()).unwrap();
        let mut expected = DEFAULT_CANDIDATES.to_vec();
        expected.sort_unstable();
        assert_eq!(members(&set), expected);
    }

    #[test]
    fn include_wins_over_exclude() {
        let options = Options {
            exclude: vec!['|'],
            include: vec!['|'],
            ..Options::default()
        };
        let set = CandidateSet::<Ignored>::from_options(&options, &quiet()).unwrap();
        assert!(members(&set).contains(&'|'));
    }

    #[test]
    fn excluding_everything_is_rejected() {
        let options = Options { exclude: DEFAULT_CANDIDATES.to_vec(), ..Options::default() };
        let err = CandidateSet::<Recorded>::from_options(&options, &quiet()).unwrap_err();
        assert!(matches!(err, DetectError::NoCandidates));
    }

    #[test]
    fn excluding_a_stranger_changes_nothing() {
        let options = Options { exclude: vec!['~'], ..Options::default() };
        let set = CandidateSet::<Recorded>::from_options(&options, &quiet()).unwrap();
        assert_eq!(set.len(), DEFAULT_CANDIDATES.len());
    }

    #[test]
    fn a_record_without_a_candidate_eliminates_it() {
        let mut set =
            CandidateSet::<Recorded>::from_options(&Options::default(), &quiet()).unwrap();
        set.observe(1, b"a,b,c", &quiet());
        assert_eq!(members(&set), vec![',']);
        assert_eq!(set.sole_survivor(), Some(','));
    }

    #[test]
    fn recorded_histories_accumulate_counts() {
        let mut set =
            CandidateSet::<Recorded>::from_options(&Options::default(), &quiet()).unwrap();
        set.observe(1, b"a,b,c", &quiet());
        set.observe(2, b"d,e", &quiet());
        let (sep, history) = set.into_histories().next().unwrap();
        assert_eq!(sep, ',');
        assert_eq!(history.samples(), &[2, 1]);
    }

    #[test]
    fn ignored_histories_stay_empty() {
        let mut set =
            CandidateSet::<Ignored>::from_options(&Options::default(), &quiet()).unwrap();
        set.observe(1, b"a,b,c", &quiet());
        let (_, history) = set.into_histories().next().unwrap();
        assert!(history.samples().is_empty());
    }

    #[test]
    fn pipe_is_counted_literally() {
        assert_eq!(occurrences(b"a|b|c", '|'), 2);
        assert_eq!(occurrences(b"plain text", '|'), 0);
    }

    #[test]
    fn non_ascii_candidates_are_counted_on_chars() {
        let line = "x\u{00a7}y\u{00a7}z".as_bytes();
        assert_eq!(occurrences(line, '\u{00a7}'), 2);
        assert_eq!(occurrences(line, 'x'), 1);
    }
}
