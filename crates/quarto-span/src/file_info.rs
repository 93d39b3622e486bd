//! Line-start tables for offset lookups

use serde::{Deserialize, Serialize};

/// Line-start table of a file
///
/// Stores the byte offset at which each line begins, which enables fast
/// conversion between byte offsets and (line, column) pairs without keeping
/// the file content around.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInformation {
    /// Byte offset of the first byte of each line, strictly increasing
    line_starts: Vec<usize>,

    /// Total length of the file in bytes
    total_length: usize,
}

impl FileInformation {
    /// Create file information by scanning content for newlines
    ///
    /// A trailing newline does not start a new line: `"ab\n"` has a single
    /// line, and empty content has none.
    ///
    /// # Example
    ///
    /// ```
    /// use quarto_span::FileInformation;
    ///
    /// let info = FileInformation::new(b"line 1\nline 2\nline 3");
    /// assert_eq!(info.line_count(), 3);
    /// assert_eq!(info.line_start(2), Some(7));
    /// ```
    pub fn new(content: &[u8]) -> Self {
        let mut line_starts = Vec::new();
        if !content.is_empty() {
            line_starts.push(0);
        }
        line_starts.extend(
            memchr::memchr_iter(b'\n', content)
                .map(|idx| idx + 1)
                .filter(|&start| start < content.len()),
        );

        FileInformation {
            line_starts,
            total_length: content.len(),
        }
    }

    /// Create file information for `total_length` bytes with no lines yet
    pub fn empty(total_length: usize) -> Self {
        FileInformation {
            line_starts: Vec::new(),
            total_length,
        }
    }

    /// Create file information from an explicit line-start table
    ///
    /// Returns `None` unless every line start is larger than the previous
    /// one and smaller than `total_length`.
    pub fn from_line_starts(line_starts: Vec<usize>, total_length: usize) -> Option<Self> {
        let increasing = line_starts.windows(2).all(|pair| pair[0] < pair[1]);
        let in_bounds = line_starts.last().is_none_or(|&last| last < total_length);
        (increasing && in_bounds).then_some(FileInformation {
            line_starts,
            total_length,
        })
    }

    /// Record the start of a new line
    ///
    /// The offset is ignored if it does not come after the last recorded
    /// line start, or if it is not inside the file.
    pub fn add_line(&mut self, offset: usize) -> bool {
        let after_last = self.line_starts.last().is_none_or(|&last| last < offset);
        if after_last && offset < self.total_length {
            self.line_starts.push(offset);
            true
        } else {
            false
        }
    }

    /// Get the total length of the file in bytes
    pub fn total_length(&self) -> usize {
        self.total_length
    }

    /// Get the number of lines in the file
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset of the start of `line` (1-indexed)
    pub fn line_start(&self, line: usize) -> Option<usize> {
        let index = line.checked_sub(1)?;
        self.line_starts.get(index).copied()
    }

    /// Index (0-based) of the line containing `offset`, if any line does
    pub(crate) fn line_index(&self, offset: usize) -> Option<usize> {
        // First line start strictly after offset; the line before it holds offset
        self.line_starts
            .partition_point(|&start| start <= offset)
            .checked_sub(1)
    }

    /// Convert a byte offset to a raw (line, column) pair, both 1-indexed
    ///
    /// Uses binary search over the line starts. Line directives are not
    /// applied. An offset before the first recorded line yields `(0, 0)`.
    /// Bounds are the caller's responsibility.
    pub fn line_column(&self, offset: usize) -> (usize, usize) {
        match self.line_index(offset) {
            Some(index) => (index + 1, offset - self.line_starts[index] + 1),
            None => (0, 0),
        }
    }
}
