//! Position conversion for Quarto
//!
//! This crate translates between the three ways tooling names a place in a
//! source file:
//! - a [`Pos`] handle, cheap and only meaningful with the [`SourceFile`]
//!   that issued it,
//! - a line/column pair (1-indexed, byte columns), for humans and editors,
//! - a byte offset (0-indexed), for slicing content.
//!
//! # Overview
//!
//! The core types are:
//! - [`SourceContext`]: Registers files and hands out disjoint handle blocks
//! - [`SourceFile`]: Immutable descriptor with line starts and line directives
//! - [`PositionConverter`]: Offset ↔ line/column for one file
//! - [`Range`]: A pair of handles plus their file
//! - [`Span`]: A portable, fully resolved location named by URI
//!
//! Parsers produce [`Range`]s; locations that leave the process are
//! resolved to [`Span`]s with [`Range::to_span`] or [`file_span`], and
//! spans coming back in are matched against parsed structure with
//! [`Span::to_range`].
//!
//! Conditions that only a broken caller can produce are reported through
//! [`bug`] as well as returned as errors.
//!
//! # Example
//!
//! ```rust
//! use quarto_span::*;
//!
//! let mut ctx = SourceContext::new();
//! let file = ctx.add_file(FileBuilder::for_content("main.go", b"ab\ncd"));
//!
//! let range = Range::new(&ctx, file.base() + 1, file.base() + 4);
//! let span = range.to_span().unwrap();
//! assert_eq!((span.start.line, span.start.column), (1, 2));
//! assert_eq!((span.end.line, span.end.column), (2, 2));
//!
//! let back = span.to_range(&PositionConverter::new(file)).unwrap();
//! assert_eq!((back.start, back.end), (range.start, range.end));
//! ```

pub mod bug;
pub mod context;
pub mod converter;
pub mod directive;
pub mod error;
pub mod file_info;
pub mod range;
pub mod span;
pub mod types;
pub mod uri;

// Re-export main types
pub use context::{FileBuilder, SourceContext, SourceFile};
pub use converter::PositionConverter;
pub use directive::{LineDirective, LineDirectives};
pub use error::{Result, SpanError};
pub use file_info::FileInformation;
pub use range::{Range, file_span};
pub use span::{Point, Span};
pub use types::{Location, Pos};
pub use uri::SpanUri;
