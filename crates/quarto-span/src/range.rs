//! Handle ranges and their conversion to and from spans

use crate::bug;
use crate::context::{SourceContext, SourceFile};
use crate::converter::{PositionConverter, location_from_offset};
use crate::error::{Result, SpanError};
use crate::span::{Point, Span};
use crate::types::{Location, Pos};
use crate::uri::SpanUri;

use std::sync::Arc;

/// A range of position handles together with the file that issued them
///
/// `file` is only `None` for ranges built from handles no file owns;
/// converting such a range fails instead of producing wrong data.
#[derive(Debug, Clone)]
pub struct Range {
    pub start: Pos,
    pub end: Pos,
    pub file: Option<Arc<SourceFile>>,
}

impl Range {
    /// Create a range from two handles of `ctx`
    ///
    /// Pass [`Pos::NONE`] as `end` for a point. A `start` that no file owns
    /// is reported through [`bug`]; the range is still returned, without a
    /// file.
    #[track_caller]
    pub fn new(ctx: &SourceContext, start: Pos, end: Pos) -> Self {
        let file = ctx.file(start);
        if file.is_none() {
            bug::report(format!("no file for start pos {start}"));
        }
        Range { start, end, file }
    }

    /// Create a range from offsets into `file`
    pub fn from_offsets(file: Arc<SourceFile>, start: usize, end: usize) -> Result<Self> {
        Ok(Range {
            start: file.pos(start)?,
            end: file.pos(end)?,
            file: Some(file),
        })
    }

    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// Resolve to a span, using a converter over the range's own file
    pub fn to_span(&self) -> Result<Span> {
        file_span(self.file.as_ref(), None, self.start, self.end)
    }
}

/// Resolve the handles `start` and `end` of `file` to a span
///
/// The span is named after the filename `start` resolves to, which line
/// directives may make different from `file`'s own name. `converter`, when
/// given, must be a converter for that filename since it computes the
/// span's offsets; without one, `file` itself is used.
pub fn file_span(
    file: Option<&Arc<SourceFile>>,
    converter: Option<&PositionConverter>,
    start: Pos,
    end: Pos,
) -> Result<Span> {
    if !start.is_valid() {
        return Err(SpanError::InvalidStart);
    }
    let Some(file) = file else {
        return Err(bug::error(SpanError::MissingFileAssociation));
    };

    let start_location = location(file, start)?;
    let mut span = Span {
        uri: SpanUri::from_path(&start_location.filename),
        start: Point::new(start_location.line, start_location.column, None),
        end: Point::default(),
    };
    if end.is_valid() {
        let end_location = location(file, end)?;
        // A file with line directives holds sections of several files
        if end_location.filename != start_location.filename {
            return Err(SpanError::cross_file(
                start_location.filename,
                end_location.filename,
            ));
        }
        span.end = Point::new(end_location.line, end_location.column, None);
    }
    span.start.clean();
    span.end.clean();
    span.clean();

    let own_converter;
    let converter = match converter {
        Some(converter) => converter,
        None => {
            own_converter = PositionConverter::new(Arc::clone(file));
            &own_converter
        }
    };
    if converter.file().name() != start_location.filename {
        return Err(bug::error(SpanError::converter_mismatch(
            file.name(),
            start_location.filename,
        )));
    }

    tracing::trace!(%span, file = file.name(), "Resolved range");
    span.with_offset(converter)
}

fn location(file: &SourceFile, pos: Pos) -> Result<Location> {
    location_from_offset(file, file.offset(pos)?)
}

impl Span {
    /// Convert to a range of handles in the converter's file
    pub fn to_range(&self, converter: &PositionConverter) -> Result<Range> {
        let span = self.clone().with_offset(converter)?;
        let file = converter.file();

        // Handles past the end of the file would belong to the next file
        let start = span.start.offset.ok_or(SpanError::InvalidSpan)?;
        let end = span.end.offset.ok_or(SpanError::InvalidSpan)?;
        for offset in [start, end] {
            if offset > file.size() {
                return Err(bug::error(SpanError::offset_out_of_range(
                    offset,
                    file.size(),
                )));
            }
        }

        Range::from_offsets(Arc::clone(file), start, end)
    }
}
