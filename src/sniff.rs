//! The two-pass sniffing kernel: a streaming elimination pass over the
//! input's records, then a variability ranking of whatever survives.

use std::io::BufRead;

use bstr::io::BufReadExt;

use crate::candidates::{CandidateSet, History, Ignored, Recorded};
use crate::error::DetectError;
use crate::stats;
use crate::trace::{visible, Trace};
use crate::{Detection, Options};

/// What the elimination pass learned before it stopped reading.
#[derive(Clone, Copy)]
enum Outcome {
    /// Exactly one candidate was left standing.
    Unique(char),
    /// Some record zeroed out every remaining candidate.
    Extinct { record: u64 },
    /// End of input with the set never having shrunk to one.
    Exhausted,
}

/// Runs a whole detection: builds the candidate set, then opens the input.
/// In that order — an empty set must fail before any file is touched.
pub(crate) fn sniff<R: BufRead>(
    open: impl FnOnce() -> Result<R, DetectError>,
    options: &Options,
    trace: &Trace,
) -> Result<Detection, DetectError> {
    if options.lucky {
        trace.say(|| "mode: single best guess".to_string());
        let mut set = CandidateSet::<Ignored>::from_options(options, trace)?;
        match scan(open()?, &mut set, trace)? {
            Outcome::Unique(sep) => {
                trace.say(|| format!("detected separator '{}'", visible(sep)));
                Ok(Detection::Separator(sep))
            }
            Outcome::Extinct { record } => Err(DetectError::AllEliminated { record }),
            Outcome::Exhausted => match set.sole_survivor() {
                Some(sep) => {
                    trace.say(|| format!("detected separator '{}'", visible(sep)));
                    Ok(Detection::Separator(sep))
                }
                None => Err(DetectError::Ambiguous { survivors: set.survivors().collect() }),
            },
        }
    } else {
        trace.say(|| "mode: ranked survivors".to_string());
        let mut set = CandidateSet::<Recorded>::from_options(options, trace)?;
        match scan(open()?, &mut set, trace)? {
            Outcome::Unique(sep) => {
                trace.say(|| format!("detected separator '{}'", visible(sep)));
                Ok(Detection::Ranking(vec![sep]))
            }
            Outcome::Extinct { record } => Err(DetectError::AllEliminated { record }),
            Outcome::Exhausted => match set.sole_survivor() {
                Some(sep) => {
                    trace.say(|| format!("detected separator '{}'", visible(sep)));
                    Ok(Detection::Ranking(vec![sep]))
                }
                None => rank(set, trace).map(Detection::Ranking),
            },
        }
    }
}

/// Streams records through the candidate set, stopping as soon as the set
/// shrinks to one survivor — or to none. Records are handed to us with the
/// `\n` or `\r\n` terminator already stripped.
fn scan<H: History>(
    mut reader: impl BufRead,
    set: &mut CandidateSet<H>,
    trace: &Trace,
) -> Result<Outcome, DetectError> {
    let mut record: u64 = 0;
    let mut outcome = Outcome::Exhausted;
    reader
        .for_byte_line(|line| {
            record += 1;
            let before = set.len();
            set.observe(record, line, trace);
            let after = set.len();
            if after < before {
                trace.say(|| format!("record {record}: {before} -> {after} candidates"));
            }
            match set.sole_survivor() {
                Some(sep) => {
                    outcome = Outcome::Unique(sep);
                    Ok(false)
                }
                None if set.is_empty() => {
                    outcome = Outcome::Extinct { record };
                    Ok(false)
                }
                None => Ok(true),
            }
        })
        .map_err(DetectError::read)?;
    Ok(outcome)
}

/// Orders the survivors by how steady their per-record counts were. A
/// character that really delimits fields shows up a near-constant number of
/// times per record, so the lowest deviation ranks first; ties break on the
/// character itself.
fn rank(set: CandidateSet<Recorded>, trace: &Trace) -> Result<Vec<char>, DetectError> {
    let mut ranked = Vec::new();
    for (sep, history) in set.into_histories() {
        let samples = history.samples();
        let Some(summary) = stats::summarize(samples) else {
            return Err(DetectError::InsufficientData { separator: sep, samples: samples.len() });
        };
        trace.say(|| {
            format!(
                "'{}': mean {:.3}, std dev {:.3} over {} records",
                visible(sep),
                summary.mean,
                summary.std_dev,
                samples.len()
            )
        });
        ranked.push((sep, summary));
    }
    ranked.sort_by(|a, b| a.1.std_dev.total_cmp(&b.1.std_dev).then(a.0.cmp(&b.0)));
    trace.say(|| {
        let order: Vec<String> = ranked.iter().map(|&(sep, _)| visible(sep)).collect();
        format!("ranked, steadiest first: {}", order.join(" "))
    });
    Ok(ranked.into_iter().map(|(sep, _)| sep).collect())
}
