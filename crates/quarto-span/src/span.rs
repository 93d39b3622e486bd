//! Portable, fully resolved spans
//!
//! A [`Span`] names its file by URI and carries line/column and byte offset
//! information for both ends, so it can travel without the [`SourceFile`]
//! that produced it. Either half of a [`Point`] may be missing; the
//! `with_*` methods fill it in from a [`PositionConverter`] for the
//! matching file content.
//!
//! [`SourceFile`]: crate::SourceFile

use crate::converter::PositionConverter;
use crate::error::{Result, SpanError};
use crate::uri::SpanUri;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One end of a span
///
/// `line` and `column` are 1-indexed, 0 meaning unset. Columns count bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub line: usize,
    pub column: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub offset: Option<usize>,
}

impl Point {
    pub fn new(line: usize, column: usize, offset: Option<usize>) -> Self {
        let mut point = Point {
            line,
            column,
            offset,
        };
        point.clean();
        point
    }

    /// A point known only by its byte offset
    pub fn from_offset(offset: usize) -> Self {
        Point::new(0, 0, Some(offset))
    }

    pub fn has_position(&self) -> bool {
        self.line > 0
    }

    pub fn has_offset(&self) -> bool {
        self.offset.is_some()
    }

    pub fn is_valid(&self) -> bool {
        self.has_position() || self.has_offset()
    }

    /// Normalize: a column without a line is dropped, a line without a
    /// column starts at column 1.
    pub fn clean(&mut self) {
        if self.line == 0 {
            self.column = 0;
        } else if self.column == 0 {
            self.column = 1;
        }
    }

    fn update_offset(&mut self, converter: &PositionConverter) -> Result<()> {
        self.offset = Some(converter.to_offset(self.line, self.column)?);
        Ok(())
    }

    fn update_position(&mut self, converter: &PositionConverter) -> Result<()> {
        let offset = self.offset.ok_or(SpanError::InvalidSpan)?;
        let (line, column) = converter.to_position(offset)?;
        self.line = line;
        self.column = column;
        Ok(())
    }

    fn compare(&self, other: &Point) -> Ordering {
        if let (Some(a), Some(b)) = (self.offset, other.offset) {
            return a.cmp(&b);
        }
        self.line
            .cmp(&other.line)
            .then(self.column.cmp(&other.column))
    }
}

/// A location in a file, resolved to line/column and byte offsets
///
/// An unset `end` means the span is a point at `start`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub uri: SpanUri,
    pub start: Point,
    pub end: Point,
}

impl Span {
    /// Create a normalized span
    pub fn new(uri: SpanUri, start: Point, end: Point) -> Self {
        let mut span = Span { uri, start, end };
        span.start.clean();
        span.end.clean();
        span.clean();
        span
    }

    /// A span covering a single point
    pub fn point(uri: SpanUri, at: Point) -> Self {
        Span::new(uri, at, Point::default())
    }

    /// Normalize: an unset end becomes the start.
    pub fn clean(&mut self) {
        if !self.end.is_valid() {
            self.end = self.start;
        }
    }

    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    pub fn is_valid(&self) -> bool {
        self.start.is_valid()
    }

    pub fn has_position(&self) -> bool {
        self.start.has_position()
    }

    pub fn has_offset(&self) -> bool {
        self.start.has_offset()
    }

    /// Fill in the byte offsets of both ends from their line/column
    pub fn with_offset(mut self, converter: &PositionConverter) -> Result<Span> {
        self.update(converter, false, true)?;
        Ok(self)
    }

    /// Fill in line/column of both ends from their byte offsets
    pub fn with_position(mut self, converter: &PositionConverter) -> Result<Span> {
        self.update(converter, true, false)?;
        Ok(self)
    }

    /// Fill in whichever of offsets and line/column is missing
    pub fn with_all(mut self, converter: &PositionConverter) -> Result<Span> {
        self.update(converter, true, true)?;
        Ok(self)
    }

    fn update(
        &mut self,
        converter: &PositionConverter,
        with_position: bool,
        with_offset: bool,
    ) -> Result<()> {
        if !self.is_valid() {
            return Err(SpanError::InvalidSpan);
        }
        if with_position && !self.has_position() {
            self.start.update_position(converter)?;
            if self.end.offset == self.start.offset {
                self.end = self.start;
            } else {
                self.end.update_position(converter)?;
            }
        }
        let end_lacks_offset = self.end.has_position() && !self.end.has_offset();
        if with_offset && (!self.has_offset() || end_lacks_offset) {
            self.start.update_offset(converter)?;
            if self.end.line == self.start.line && self.end.column == self.start.column {
                self.end.offset = self.start.offset;
            } else {
                self.end.update_offset(converter)?;
            }
        }
        Ok(())
    }

    /// Order by URI, then start, then end
    ///
    /// Points are compared by offset when both have one, by line and column
    /// otherwise.
    pub fn compare(&self, other: &Span) -> Ordering {
        self.uri
            .cmp(&other.uri)
            .then_with(|| self.start.compare(&other.start))
            .then_with(|| self.end.compare(&other.end))
    }

    /// Parse the textual forms produced by `Display`
    ///
    /// Accepts `path`, `path:line`, `path:line:col`, an optional `#offset`
    /// after any point, and a `-` followed by an end of the form `col`,
    /// `line:col` or `#offset`. Input that does not end in a location is
    /// taken as a bare path.
    pub fn parse(input: &str) -> Span {
        let uri = |path: &str| SpanUri::from_path(path);

        let mut valid = input;
        let mut hold = 0;
        let mut offset = None;
        let mut had_column = false;

        let mut suffix = Suffix::strip(input);
        if suffix.sep == Some('#') {
            offset = suffix.num;
            suffix = Suffix::strip(suffix.remains);
        }
        if suffix.sep == Some(':') {
            valid = suffix.remains;
            hold = suffix.num.unwrap_or(0);
            had_column = true;
            suffix = Suffix::strip(suffix.remains);
        }
        match suffix.sep {
            Some(':') => {
                let start = Point::new(suffix.num.unwrap_or(0), hold, offset);
                return Span::point(uri(suffix.remains), start);
            }
            Some('-') => {}
            _ => return Span::point(uri(valid), Point::new(hold, 0, offset)),
        }

        // Only the range forms get here. Whether the numbers seen so far
        // are a line or a column depends on what precedes the '-'.
        let mut end = Point::new(suffix.num.unwrap_or(0), hold, offset);
        offset = None;
        suffix = Suffix::strip(suffix.remains);
        if suffix.sep == Some('#') {
            offset = suffix.num;
            suffix = Suffix::strip(suffix.remains);
        }
        if suffix.sep != Some(':') {
            return Span::point(uri(valid), end);
        }
        valid = suffix.remains;
        hold = suffix.num.unwrap_or(0);
        suffix = Suffix::strip(suffix.remains);
        if suffix.sep != Some(':') {
            return Span::new(uri(valid), Point::new(hold, 0, offset), end);
        }
        let line = suffix.num.unwrap_or(0);
        if !had_column {
            // A lone number after '-' is a column on the start line
            end = Point::new(line, end.line, end.offset);
        }
        Span::new(uri(suffix.remains), Point::new(line, hold, offset), end)
    }
}

/// Trailing `<sep><number>` of a span string
struct Suffix<'a> {
    remains: &'a str,
    sep: Option<char>,
    num: Option<usize>,
}

impl<'a> Suffix<'a> {
    fn strip(input: &'a str) -> Self {
        let digits_at = input.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        let (remains, num) = match input[digits_at..].parse::<usize>() {
            Ok(num) if digits_at > 0 => (&input[..digits_at], Some(num)),
            _ => (input, None),
        };
        match remains.chars().last() {
            Some(sep @ (':' | '#' | '-')) => Suffix {
                remains: &remains[..remains.len() - 1],
                sep: Some(sep),
                num,
            },
            _ => Suffix {
                remains: input,
                sep: None,
                num: None,
            },
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.uri.is_empty() {
            write!(f, "{}", self.uri.filename().display())?;
        }
        if !self.is_valid() {
            return Ok(());
        }
        if self.has_position() {
            write!(f, ":{}:{}", self.start.line, self.start.column)?;
            if self.is_point() {
                return Ok(());
            }
            if self.end.line == self.start.line {
                write!(f, "-{}", self.end.column)
            } else {
                write!(f, "-{}:{}", self.end.line, self.end.column)
            }
        } else {
            let start = self.start.offset.unwrap_or(0);
            write!(f, ":#{}", start)?;
            match self.end.offset {
                Some(end) if !self.is_point() => write!(f, "-#{}", end),
                _ => Ok(()),
            }
        }
    }
}
