//! Human-readable narration of a detection run. This channel is for eyes
//! only: nothing in it is part of the crate's contract, and errors are
//! never reported through it.

use std::io::Write;

pub(crate) struct Trace {
    on: bool,
}

impl Trace {
    pub(crate) fn new(on: bool) -> Self {
        Trace { on }
    }

    /// Emit one narration line on standard error. The closure keeps the
    /// formatting work off the path when tracing is off; a failed write is
    /// dropped, not reported.
    pub(crate) fn say<F: FnOnce() -> String>(&self, line: F) {
        if self.on {
            let _ = writeln!(std::io::stderr(), "{}", line());
        }
    }
}

/// Renders `sep` so that invisible separators (TAB, above all) show up in
/// narration and error text.
pub(crate) fn visible(sep: char) -> String {
    sep.escape_default().to_string()
}
