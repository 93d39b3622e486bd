//! Error types for position conversion.

use thiserror::Error;

/// Errors that can occur while converting between handles, line/column
/// pairs and byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
    /// The start handle of a range is not valid.
    #[error("start pos is not valid")]
    InvalidStart,

    /// A handle does not belong to the file it was resolved against.
    #[error("invalid pos: {pos} not in [{base}, {end}]")]
    InvalidPosition {
        /// The offending handle
        pos: usize,
        /// First handle of the file
        base: usize,
        /// Last handle of the file (end of file)
        end: usize,
    },

    /// A byte offset lies past the end of the file.
    #[error("offset {offset} is past the end of the file {size}")]
    OffsetOutOfRange { offset: usize, size: usize },

    /// A line number is not a line of the file.
    #[error("line {line} is not in file")]
    InvalidLine { line: usize },

    /// A line number lies past the implicit line after the last one.
    #[error("line {line} is beyond end of file {max_line}")]
    LineOutOfRange { line: usize, max_line: usize },

    /// A column was requested on the implicit line after the last one.
    #[error("column {column} is beyond end of file")]
    ColumnOutOfRange { column: usize },

    /// Start and end of a span resolve to different filenames.
    #[error("span begins in file {start:?} but ends in {end:?}")]
    CrossFileSpan { start: String, end: String },

    /// A span carries neither a position nor an offset.
    #[error("cannot add information to an invalid span")]
    InvalidSpan,

    /// A range has valid handles but no file.
    #[error("missing file association")]
    MissingFileAssociation,

    /// The converter is bound to a different file than the resolved one.
    #[error("must supply converter for file {file:?} containing lines from {filename:?}")]
    ConverterMismatch {
        /// Name of the file the handles belong to
        file: String,
        /// Filename the handles resolve to
        filename: String,
    },

    /// A converter was requested without a file.
    #[error("missing file for converter")]
    MissingFile,
}

impl SpanError {
    /// Create an "offset out of range" error.
    pub fn offset_out_of_range(offset: usize, size: usize) -> Self {
        Self::OffsetOutOfRange { offset, size }
    }

    /// Create a "cross file span" error.
    pub fn cross_file(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::CrossFileSpan {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Create a "converter mismatch" error.
    pub fn converter_mismatch(file: impl Into<String>, filename: impl Into<String>) -> Self {
        Self::ConverterMismatch {
            file: file.into(),
            filename: filename.into(),
        }
    }

    /// Whether this error indicates a defect in the calling layer rather
    /// than bad input.
    pub fn is_bug(&self) -> bool {
        matches!(
            self,
            Self::MissingFileAssociation | Self::ConverterMismatch { .. } | Self::MissingFile
        )
    }

    /// Whether this error reports a location outside the bounds of a file.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::InvalidPosition { .. }
                | Self::OffsetOutOfRange { .. }
                | Self::InvalidLine { .. }
                | Self::LineOutOfRange { .. }
                | Self::ColumnOutOfRange { .. }
        )
    }
}

/// Result type for position conversion.
pub type Result<T> = std::result::Result<T, SpanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bug_classification() {
        assert!(SpanError::MissingFileAssociation.is_bug());
        assert!(SpanError::MissingFile.is_bug());
        assert!(SpanError::converter_mismatch("a.go", "b.tmpl").is_bug());

        assert!(!SpanError::InvalidStart.is_bug());
        assert!(!SpanError::cross_file("a", "b").is_bug());
        assert!(!SpanError::offset_out_of_range(11, 10).is_bug());
    }

    #[test]
    fn test_out_of_range_classification() {
        assert!(SpanError::offset_out_of_range(11, 10).is_out_of_range());
        assert!(SpanError::LineOutOfRange { line: 4, max_line: 3 }.is_out_of_range());
        assert!(SpanError::ColumnOutOfRange { column: 2 }.is_out_of_range());
        assert!(SpanError::InvalidLine { line: 0 }.is_out_of_range());

        assert!(!SpanError::InvalidStart.is_out_of_range());
        assert!(!SpanError::InvalidSpan.is_out_of_range());
    }

    #[test]
    fn test_messages() {
        insta::assert_snapshot!(
            SpanError::offset_out_of_range(11, 10),
            @"offset 11 is past the end of the file 10"
        );
        insta::assert_snapshot!(
            SpanError::cross_file("a.go", "b.tmpl"),
            @r#"span begins in file "a.go" but ends in "b.tmpl""#
        );
        insta::assert_snapshot!(
            SpanError::InvalidPosition { pos: 40, base: 1, end: 11 },
            @"invalid pos: 40 not in [1, 11]"
        );
    }
}
