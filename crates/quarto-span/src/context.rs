//! Source context: file descriptors and the handle space they share

use crate::directive::{LineDirective, LineDirectives};
use crate::error::{Result, SpanError};
use crate::file_info::FileInformation;
use crate::types::{Location, Pos};
use serde::{Deserialize, Serialize};

use std::sync::Arc;

/// Context for handing out position handles
///
/// Every registered file owns the handles `[base, base + size]`; the last
/// one denotes end of file. Blocks of different files never overlap, so a
/// handle identifies both a file and an offset within it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceContext {
    /// Base of the next file to be added
    base: usize,
    /// Files sorted by base
    files: Vec<Arc<SourceFile>>,
}

/// An immutable descriptor of one parsed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// File path or identifier
    name: String,
    /// First handle belonging to this file
    base: usize,
    /// Line-start table and size
    lines: FileInformation,
    /// Line-directive overrides
    #[serde(skip_serializing_if = "LineDirectives::is_empty", default)]
    directives: LineDirectives,
}

/// Accumulates the contents of a [`SourceFile`] before it is registered
#[derive(Debug, Clone)]
pub struct FileBuilder {
    name: String,
    lines: FileInformation,
    directives: LineDirectives,
}

impl FileBuilder {
    /// Start a file of `size` bytes with no lines
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        FileBuilder {
            name: name.into(),
            lines: FileInformation::empty(size),
            directives: LineDirectives::new(),
        }
    }

    /// Start a file whose size and line table come from `content`
    pub fn for_content(name: impl Into<String>, content: &[u8]) -> Self {
        FileBuilder {
            name: name.into(),
            lines: FileInformation::new(content),
            directives: LineDirectives::new(),
        }
    }

    /// Replace the line table with the lines found in `content`
    ///
    /// Content longer or shorter than the declared size changes the size.
    pub fn set_lines_for_content(&mut self, content: &[u8]) {
        self.lines = FileInformation::new(content);
    }

    /// Replace the line table; see [`FileInformation::from_line_starts`]
    pub fn set_lines(&mut self, line_starts: Vec<usize>) -> bool {
        match FileInformation::from_line_starts(line_starts, self.lines.total_length()) {
            Some(lines) => {
                self.lines = lines;
                true
            }
            None => false,
        }
    }

    /// Record the start of a new line; see [`FileInformation::add_line`]
    pub fn add_line(&mut self, offset: usize) -> bool {
        self.lines.add_line(offset)
    }

    /// Report the region starting at `offset` as `filename`, the line
    /// containing `offset` being `line`
    ///
    /// Ignored if `offset` is not inside the file.
    pub fn add_line_directive(
        &mut self,
        offset: usize,
        filename: impl Into<String>,
        line: usize,
    ) -> bool {
        if offset >= self.lines.total_length() {
            return false;
        }
        self.directives.add(LineDirective {
            offset,
            filename: filename.into(),
            line,
        });
        true
    }
}

impl SourceFile {
    /// The file's own name, before any line directive
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First handle of the file
    pub fn base(&self) -> Pos {
        Pos(self.base)
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.lines.total_length()
    }

    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    pub fn file_info(&self) -> &FileInformation {
        &self.lines
    }

    pub fn directives(&self) -> &LineDirectives {
        &self.directives
    }

    /// Whether `pos` is one of this file's handles
    pub fn contains(&self, pos: Pos) -> bool {
        self.base <= pos.0 && pos.0 <= self.base + self.size()
    }

    /// Handle for a byte offset; `offset == size` is the end-of-file handle
    pub fn pos(&self, offset: usize) -> Result<Pos> {
        if offset > self.size() {
            return Err(SpanError::offset_out_of_range(offset, self.size()));
        }
        Ok(Pos(self.base + offset))
    }

    /// Byte offset of a handle
    pub fn offset(&self, pos: Pos) -> Result<usize> {
        if !self.contains(pos) {
            return Err(SpanError::InvalidPosition {
                pos: pos.0,
                base: self.base,
                end: self.base + self.size(),
            });
        }
        Ok(pos.0 - self.base)
    }

    /// Handle of the first byte of `line` (1-indexed)
    pub fn line_start(&self, line: usize) -> Option<Pos> {
        self.lines.line_start(line).map(|offset| Pos(self.base + offset))
    }

    /// Location of a handle, with line directives applied
    pub fn location(&self, pos: Pos) -> Result<Location> {
        Ok(self.location_at(self.offset(pos)?, true))
    }

    /// Location of a handle in the file's own name and numbering
    pub fn raw_location(&self, pos: Pos) -> Result<Location> {
        Ok(self.location_at(self.offset(pos)?, false))
    }

    /// Location of an in-bounds offset
    pub(crate) fn location_at(&self, offset: usize, adjusted: bool) -> Location {
        let (line, column) = self.lines.line_column(offset);
        let mut location = Location {
            filename: self.name.clone(),
            offset,
            line,
            column,
        };
        if adjusted {
            if let Some((filename, line)) = self.directives.adjust(offset, line, &self.lines) {
                location.filename = filename.to_string();
                location.line = line;
            }
        }
        location
    }
}

impl SourceContext {
    /// Create a new empty source context
    pub fn new() -> Self {
        SourceContext {
            base: 1,
            files: Vec::new(),
        }
    }

    /// Base that the next added file will receive
    pub fn base(&self) -> Pos {
        Pos(self.base)
    }

    /// Register a file and reserve its block of handles
    pub fn add_file(&mut self, builder: FileBuilder) -> Arc<SourceFile> {
        let base = self.base;
        let size = builder.lines.total_length();
        self.base = base + size + 1;

        tracing::debug!(
            name = %builder.name,
            base,
            size,
            lines = builder.lines.line_count(),
            directives = builder.directives.len(),
            "Registered source file"
        );

        let file = Arc::new(SourceFile {
            name: builder.name,
            base,
            lines: builder.lines,
            directives: builder.directives,
        });
        self.files.push(Arc::clone(&file));
        file
    }

    /// The file owning `pos`, if any
    pub fn file(&self, pos: Pos) -> Option<Arc<SourceFile>> {
        if !pos.is_valid() {
            return None;
        }
        let idx = self.files.partition_point(|f| f.base <= pos.0);
        let file = self.files.get(idx.checked_sub(1)?)?;
        file.contains(pos).then(|| Arc::clone(file))
    }

    /// Location of `pos` in whichever file owns it
    pub fn location(&self, pos: Pos) -> Option<Location> {
        self.file(pos)?.location(pos).ok()
    }

    pub fn files(&self) -> impl Iterator<Item = &Arc<SourceFile>> {
        self.files.iter()
    }
}

impl Default for SourceContext {
    fn default() -> Self {
        Self::new()
    }
}
