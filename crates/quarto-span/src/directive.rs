//! Line directives: sub-ranges of a file that report another filename/line

use crate::file_info::FileInformation;
use serde::{Deserialize, Serialize};

/// A line-directive override
///
/// From `offset` onwards the line containing `offset` is reported as `line`
/// of `filename`, and the following lines count up from there, until the
/// next directive takes over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDirective {
    /// Byte offset where the override starts
    pub offset: usize,
    /// Filename reported for the overridden region
    pub filename: String,
    /// Line number (1-indexed) reported for the line containing `offset`
    pub line: usize,
}

/// Directives of one file, kept sorted by offset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDirectives {
    directives: Vec<LineDirective>,
}

impl LineDirectives {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a directive, replacing any directive at the same offset
    pub fn add(&mut self, directive: LineDirective) {
        match self
            .directives
            .binary_search_by_key(&directive.offset, |d| d.offset)
        {
            Ok(idx) => self.directives[idx] = directive,
            Err(idx) => self.directives.insert(idx, directive),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineDirective> {
        self.directives.iter()
    }

    /// The directive in effect at `offset`, if any
    pub fn lookup(&self, offset: usize) -> Option<&LineDirective> {
        let idx = self.directives.partition_point(|d| d.offset <= offset);
        idx.checked_sub(1).map(|idx| &self.directives[idx])
    }

    /// Apply the directive in effect at `offset` to a raw line number
    ///
    /// Returns the overriding filename and the adjusted line, or `None` when
    /// no directive covers `offset`.
    pub fn adjust(
        &self,
        offset: usize,
        raw_line: usize,
        lines: &FileInformation,
    ) -> Option<(&str, usize)> {
        let directive = self.lookup(offset)?;
        let line = match lines.line_index(directive.offset) {
            Some(idx) => directive.line + raw_line.saturating_sub(idx + 1),
            None => raw_line,
        };
        Some((directive.filename.as_str(), line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive(offset: usize, filename: &str, line: usize) -> LineDirective {
        LineDirective {
            offset,
            filename: filename.to_string(),
            line,
        }
    }

    #[test]
    fn test_lookup_empty() {
        let directives = LineDirectives::new();
        assert!(directives.is_empty());
        assert!(directives.lookup(0).is_none());
    }

    #[test]
    fn test_add_keeps_order() {
        let mut directives = LineDirectives::new();
        directives.add(directive(20, "b.tmpl", 1));
        directives.add(directive(5, "a.tmpl", 10));
        directives.add(directive(12, "c.tmpl", 3));

        let offsets: Vec<usize> = directives.iter().map(|d| d.offset).collect();
        assert_eq!(offsets, vec![5, 12, 20]);
    }

    #[test]
    fn test_add_replaces_same_offset() {
        let mut directives = LineDirectives::new();
        directives.add(directive(5, "a.tmpl", 10));
        directives.add(directive(5, "b.tmpl", 1));

        assert_eq!(directives.len(), 1);
        assert_eq!(directives.lookup(5).unwrap().filename, "b.tmpl");
    }

    #[test]
    fn test_lookup_boundaries() {
        let mut directives = LineDirectives::new();
        directives.add(directive(5, "a.tmpl", 10));
        directives.add(directive(12, "b.tmpl", 1));

        assert!(directives.lookup(4).is_none());
        assert_eq!(directives.lookup(5).unwrap().filename, "a.tmpl");
        assert_eq!(directives.lookup(11).unwrap().filename, "a.tmpl");
        assert_eq!(directives.lookup(12).unwrap().filename, "b.tmpl");
        assert_eq!(directives.lookup(1000).unwrap().filename, "b.tmpl");
    }

    #[test]
    fn test_adjust_counts_from_directive_line() {
        // Lines start at 0, 4, 8, 12
        let lines = FileInformation::new(b"aaa\nbbb\nccc\nddd");
        let mut directives = LineDirectives::new();
        directives.add(directive(4, "gen.tmpl", 40));

        assert_eq!(directives.adjust(0, 1, &lines), None);
        assert_eq!(directives.adjust(4, 2, &lines), Some(("gen.tmpl", 40)));
        assert_eq!(directives.adjust(9, 3, &lines), Some(("gen.tmpl", 41)));
        assert_eq!(directives.adjust(13, 4, &lines), Some(("gen.tmpl", 42)));
    }

    #[test]
    fn test_adjust_mid_line_directive() {
        let lines = FileInformation::new(b"aaa\nbbb\nccc");
        let mut directives = LineDirectives::new();
        // Starts inside line 2, which is reported as line 7
        directives.add(directive(6, "x.tmpl", 7));

        assert_eq!(directives.adjust(5, 2, &lines), None);
        assert_eq!(directives.adjust(6, 2, &lines), Some(("x.tmpl", 7)));
        assert_eq!(directives.adjust(8, 3, &lines), Some(("x.tmpl", 8)));
    }
}
