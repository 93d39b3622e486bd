//! Core types for position handles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// An opaque position handle
///
/// Handles are drawn from the address space of a [`SourceContext`], which
/// reserves a disjoint block of handles for every file it registers. A
/// handle is only meaningful together with the file that issued it.
///
/// [`SourceContext`]: crate::SourceContext
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Pos(pub usize);

impl Pos {
    /// The invalid handle
    pub const NONE: Pos = Pos(0);

    /// Whether this handle can belong to a file
    pub fn is_valid(self) -> bool {
        self != Pos::NONE
    }
}

impl Add<usize> for Pos {
    type Output = Pos;

    fn add(self, bytes: usize) -> Pos {
        Pos(self.0 + bytes)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved location in a file (1-indexed line, 1-indexed byte column)
///
/// The filename and line are the ones reported after applying any line
/// directive active at `offset`, so they may differ from the name and
/// numbering of the file that owns the handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Filename, possibly remapped by a line directive
    pub filename: String,
    /// Byte offset from start of the owning file (0-indexed)
    pub offset: usize,
    /// Line number (1-indexed), 0 if unknown
    pub line: usize,
    /// Column number (1-indexed, in bytes), 0 if unknown
    pub column: usize,
}

impl Location {
    pub fn is_valid(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return if self.filename.is_empty() {
                f.write_str("-")
            } else {
                f.write_str(&self.filename)
            };
        }
        if !self.filename.is_empty() {
            write!(f, "{}:", self.filename)?;
        }
        write!(f, "{}", self.line)?;
        if self.column != 0 {
            write!(f, ":{}", self.column)?;
        }
        Ok(())
    }
}
