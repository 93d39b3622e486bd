//! Channel for internal defects.
//!
//! Some conditions can only arise when the calling layer breaks a contract,
//! for example a range built from a handle that no file owns. Those are
//! reported here in addition to being returned as ordinary errors: each
//! report is logged at error level under the `quarto_span::bug` target and
//! recorded in a process-wide list that tests and hosts can inspect.

use crate::error::SpanError;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::panic::Location;
use std::sync::Mutex;

/// A recorded internal defect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bug {
    /// What went wrong
    pub description: String,
    /// Source file of the reporting call site
    pub file: &'static str,
    /// Source line of the reporting call site
    pub line: u32,
}

impl fmt::Display for Bug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.description)
    }
}

/// First report of each call site, keyed by source file and line
static BUGS: Lazy<Mutex<HashMap<(&'static str, u32), Bug>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Report an internal defect.
///
/// Only the first report of a call site is kept, whatever its description;
/// every report is logged.
#[track_caller]
pub fn report(description: impl Into<String>) {
    let caller = Location::caller();
    record(Bug {
        description: description.into(),
        file: caller.file(),
        line: caller.line(),
    });
}

/// Report `err` as an internal defect and hand it back.
#[track_caller]
pub fn error(err: SpanError) -> SpanError {
    report(err.to_string());
    err
}

fn record(bug: Bug) {
    tracing::error!(
        target: "quarto_span::bug",
        file = bug.file,
        line = bug.line,
        "{}",
        bug.description
    );

    BUGS.lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .entry((bug.file, bug.line))
        .or_insert(bug);
}

/// All defects recorded so far, ordered by call site.
pub fn list() -> Vec<Bug> {
    let mut bugs: Vec<Bug> = BUGS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .values()
        .cloned()
        .collect();
    bugs.sort_by(|a, b| (a.file, a.line).cmp(&(b.file, b.line)));
    bugs
}

/// Forget all recorded defects.
pub fn clear() {
    BUGS.lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clear();
}
