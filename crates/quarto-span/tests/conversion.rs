//! End-to-end conversions between handles, line/column pairs and offsets.

use quarto_span::{
    FileBuilder, Point, PositionConverter, Range, SourceContext, Span, SpanError, SpanUri, bug,
    file_span,
};
use std::sync::Arc;

/// Log to the test output; set RUST_LOG=quarto_span=trace for details
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_ten_byte_single_line_file() {
    let conv = PositionConverter::from_content("ten.go", b"abcdefghij");

    assert_eq!(conv.to_position(10).unwrap(), (2, 1));
    assert_eq!(conv.to_position(9).unwrap(), (1, 10));
    assert_eq!(conv.to_offset(1, 1).unwrap(), 0);

    let err = conv.to_offset(2, 2).unwrap_err();
    assert!(err.is_out_of_range());
    insta::assert_snapshot!(err, @"column 2 is beyond end of file");
}

#[test]
fn test_two_line_file() {
    let conv = PositionConverter::from_content("two.go", b"ab\ncd");

    assert_eq!(conv.file().size(), 5);
    assert_eq!(conv.file().line_start(1), Some(conv.file().base()));
    assert_eq!(conv.file().line_start(2), Some(conv.file().base() + 3));
    assert_eq!(conv.to_position(4).unwrap(), (2, 2));
    assert_eq!(conv.to_offset(2, 1).unwrap(), 3);
}

#[test]
fn test_lines_past_implicit_last_line_fail() {
    let conv = PositionConverter::from_content("two.go", b"ab\ncd");
    for line in 4..10 {
        let err = conv.to_offset(line, 1).unwrap_err();
        assert_eq!(err, SpanError::LineOutOfRange { line, max_line: 3 });
    }
    insta::assert_snapshot!(conv.to_offset(4, 1).unwrap_err(), @"line 4 is beyond end of file 3");
}

#[test]
fn test_point_range_gives_point_span_and_back() {
    init_tracing();
    let mut ctx = SourceContext::new();
    let file = ctx.add_file(FileBuilder::for_content("/src/point.go", b"hello\nworld\n"));

    let range = Range::new(&ctx, file.base() + 7, file.base() + 7);
    assert!(range.is_point());
    let span = range.to_span().unwrap();
    assert!(span.is_point());

    let back = span.to_range(&PositionConverter::new(Arc::clone(&file))).unwrap();
    assert!(back.is_point());
    assert_eq!(back.start, range.start);
}

#[test]
fn test_range_span_range_is_identity() {
    init_tracing();
    let content = b"package main\n\nfunc main() {\n\tprintln(\"hi\")\n}\n";
    let mut ctx = SourceContext::new();
    // Another file first, so handles and offsets differ
    ctx.add_file(FileBuilder::for_content("other.go", b"package other\n"));
    let file = ctx.add_file(FileBuilder::for_content("/src/main.go", content));
    let conv = PositionConverter::new(Arc::clone(&file));

    for (start, end) in [(0, 7), (14, 27), (28, 43), (0, content.len()), (45, 45)] {
        let range = Range::new(&ctx, file.base() + start, file.base() + end);
        let span = range.to_span().unwrap();
        assert_eq!(span.start.offset, Some(start));
        assert_eq!(span.end.offset, Some(end));

        let back = span.to_range(&conv).unwrap();
        assert_eq!((back.start, back.end), (range.start, range.end));
    }
}

#[test]
fn test_span_from_editor_resolves_to_range() {
    let mut ctx = SourceContext::new();
    let file = ctx.add_file(FileBuilder::for_content("/src/main.go", b"ab\ncd\nef"));
    let conv = PositionConverter::new(Arc::clone(&file));

    // An editor sends line/column only
    let span = Span::parse("/src/main.go:2:1-3:3");
    let range = span.to_range(&conv).unwrap();
    assert_eq!(range.start, file.base() + 3);
    assert_eq!(range.end, file.base() + 8);

    let resolved = range.to_span().unwrap();
    assert_eq!(resolved.uri, SpanUri::from_path("/src/main.go"));
    assert_eq!(resolved.start, Point::new(2, 1, Some(3)));
    // The end of file is reported on the implicit trailing line
    assert_eq!(resolved.end, Point::new(4, 1, Some(8)));
}

#[test]
fn test_line_directives_across_a_generated_file() {
    init_tracing();
    let content = b"// generated\nline a\nline b\nline c\n";
    let mut builder = FileBuilder::for_content("/gen/out.go", content);
    builder.add_line_directive(13, "/tmpl/page.tmpl", 7);
    builder.add_line_directive(27, "/tmpl/footer.tmpl", 1);
    let mut ctx = SourceContext::new();
    let file = ctx.add_file(builder);

    let header = ctx.location(file.base() + 3).unwrap();
    assert_eq!(header.to_string(), "/gen/out.go:1:4");
    let body = ctx.location(file.base() + 21).unwrap();
    assert_eq!(body.to_string(), "/tmpl/page.tmpl:8:2");
    let footer = ctx.location(file.base() + 28).unwrap();
    assert_eq!(footer.to_string(), "/tmpl/footer.tmpl:1:2");

    // Start in page.tmpl, end in footer.tmpl
    let err = Range::new(&ctx, file.base() + 14, file.base() + 28)
        .to_span()
        .unwrap_err();
    assert!(matches!(err, SpanError::CrossFileSpan { .. }));

    // Both ends in page.tmpl, resolved with a converter for the template
    let template =
        PositionConverter::from_content("/tmpl/page.tmpl", b"x\nx\nx\nx\nx\nx\nline a\nline b\n");
    let span =
        file_span(Some(&file), Some(&template), file.base() + 14, file.base() + 24).unwrap();
    assert_eq!(span.uri, SpanUri::from_path("/tmpl/page.tmpl"));
    assert_eq!(span.start, Point::new(7, 2, Some(13)));
    assert_eq!(span.end, Point::new(8, 5, Some(23)));
}

#[test]
fn test_defects_are_reported_and_returned() {
    init_tracing();
    let ctx = SourceContext::new();

    let range = Range::new(&ctx, quarto_span::Pos(7), quarto_span::Pos(9));
    assert!(range.file.is_none());
    let err = range.to_span().unwrap_err();
    assert!(err.is_bug());

    let descriptions: Vec<String> = bug::list().into_iter().map(|b| b.description).collect();
    assert!(descriptions.contains(&"no file for start pos 7".to_string()));
    assert!(descriptions.contains(&"missing file association".to_string()));
    assert!(bug::list().iter().all(|b| b.file.ends_with(".rs")));
}
