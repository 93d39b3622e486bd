//! Conversion between byte offsets and line/column pairs for one file

use crate::bug;
use crate::context::{FileBuilder, SourceContext, SourceFile};
use crate::error::{Result, SpanError};
use crate::types::{Location, Pos};

use std::sync::Arc;

/// Converts between byte offsets and (line, column) pairs of one file
///
/// Holds nothing but the file, so a converter can be cloned and reused for
/// any number of conversions.
#[derive(Debug, Clone)]
pub struct PositionConverter {
    file: Arc<SourceFile>,
}

impl PositionConverter {
    pub fn new(file: Arc<SourceFile>) -> Self {
        PositionConverter { file }
    }

    /// Create a converter for a file that may be missing
    ///
    /// A missing file is a defect of the caller: it is reported through
    /// [`bug`] and returned as [`SpanError::MissingFile`].
    #[track_caller]
    pub fn from_optional(file: Option<Arc<SourceFile>>) -> Result<Self> {
        match file {
            Some(file) => Ok(Self::new(file)),
            None => Err(bug::error(SpanError::MissingFile)),
        }
    }

    /// Create a converter for raw content that belongs to no context yet
    ///
    /// # Example
    ///
    /// ```
    /// use quarto_span::PositionConverter;
    ///
    /// let conv = PositionConverter::from_content("main.go", b"ab\ncd");
    /// assert_eq!(conv.to_position(4).unwrap(), (2, 2));
    /// assert_eq!(conv.to_offset(2, 1).unwrap(), 3);
    /// ```
    pub fn from_content(name: impl Into<String>, content: &[u8]) -> Self {
        let mut ctx = SourceContext::new();
        Self::new(ctx.add_file(FileBuilder::for_content(name, content)))
    }

    pub fn file(&self) -> &Arc<SourceFile> {
        &self.file
    }

    /// Line and column (both 1-indexed) of a byte offset
    ///
    /// Line directives apply. The end-of-file offset is reported as column 1
    /// of the line after the last one.
    pub fn to_position(&self, offset: usize) -> Result<(usize, usize)> {
        let location = location_from_offset(&self.file, offset)?;
        Ok((location.line, location.column))
    }

    /// Byte offset of a line and column (both 1-indexed)
    ///
    /// Columns count bytes and 0 is taken as column 1. The line after the
    /// last one is accepted with column 1 (or unset) and maps to the end of
    /// the file.
    pub fn to_offset(&self, line: usize, column: usize) -> Result<usize> {
        if line == 0 {
            return Err(SpanError::InvalidLine { line });
        }
        let max_line = self.file.line_count() + 1;
        if line > max_line {
            return Err(SpanError::LineOutOfRange { line, max_line });
        }
        if line == max_line {
            if column > 1 {
                return Err(SpanError::ColumnOutOfRange { column });
            }
            return Ok(self.file.size());
        }
        let start = self
            .file
            .line_start(line)
            .ok_or(SpanError::InvalidLine { line })?;
        // The first byte of a line is column 1; an unset column means 1
        let pos = start
            .0
            .checked_add(column.max(1) - 1)
            .ok_or(SpanError::ColumnOutOfRange { column })?;
        self.file.offset(Pos(pos))
    }
}

/// Location of an offset, with the end of file moved to the next line
pub(crate) fn location_from_offset(file: &SourceFile, offset: usize) -> Result<Location> {
    if offset > file.size() {
        return Err(SpanError::offset_out_of_range(offset, file.size()));
    }
    let mut location = file.location_at(offset, true);
    if offset == file.size() {
        location.line += 1;
        location.column = 1;
    }
    Ok(location)
}
