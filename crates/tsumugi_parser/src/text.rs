//! Plain text parser.
//!
//! This parser treats plain text as a simple document with paragraphs.

use tsumugi_ast::{Node, Point, Position};

use crate::{ParseError, Parser};

/// Plain text parser implementation.
///
/// The text is split into paragraphs by blank lines, and each paragraph
/// holds a single text node with the paragraph's lines. Leading and
/// trailing whitespace of a paragraph is not part of its value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextParser;

impl PlainTextParser {
    /// Creates a new plain text parser.
    pub fn new() -> Self {
        Self
    }
}

impl Parser for PlainTextParser {
    fn name(&self) -> &str {
        "text"
    }

    fn extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn parse(&self, source: &str) -> Result<Node, ParseError> {
        let index = LineIndex::new(source);
        let mut paragraphs = Vec::new();
        // Byte range of the paragraph being collected.
        let mut current: Option<(usize, usize)> = None;
        let mut offset = 0;

        for line in source.split_inclusive('\n') {
            let content = line.trim_end_matches(['\n', '\r']);
            if content.trim().is_empty() {
                if let Some((start, end)) = current.take() {
                    paragraphs.push(paragraph(source, &index, start, end));
                }
            } else {
                let start = current.map_or(offset, |(start, _)| start);
                current = Some((start, offset + content.len()));
            }
            offset += line.len();
        }

        if let Some((start, end)) = current {
            paragraphs.push(paragraph(source, &index, start, end));
        }

        let position = Position::new(index.point(0), index.point(source.len()));
        Ok(Node::root(paragraphs).with_position(position))
    }
}

fn paragraph(source: &str, index: &LineIndex, start: usize, end: usize) -> Node {
    let raw = &source[start..end];
    let leading = raw.len() - raw.trim_start().len();
    let value = raw.trim();
    let start = start + leading;
    let position = Position::new(index.point(start), index.point(start + value.len()));

    Node::paragraph(vec![Node::text(value).with_position(position)]).with_position(position)
}

/// Maps byte offsets to 1-indexed line/column points.
struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self { line_starts }
    }

    fn point(&self, offset: usize) -> Point {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let column = offset - self.line_starts[line - 1] + 1;
        Point::new(line, column, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tsumugi_ast::NodeKind;

    fn paragraphs(source: &str) -> Vec<String> {
        let ast = PlainTextParser::new().parse(source).unwrap();
        ast.children()
            .unwrap_or_default()
            .iter()
            .map(|p| {
                assert_eq!(p.kind(), NodeKind::Paragraph);
                p.to_text()
            })
            .collect()
    }

    #[test]
    fn test_parse_simple_text() {
        let ast = PlainTextParser::new().parse("Hello, world!").unwrap();

        assert_eq!(ast.kind(), NodeKind::Root);
        assert_eq!(paragraphs("Hello, world!"), vec!["Hello, world!"]);
    }

    #[rstest]
    #[case("First paragraph.\n\nSecond paragraph.", vec!["First paragraph.", "Second paragraph."])]
    #[case("a\nb\n\n\n\nc\n", vec!["a\nb", "c"])]
    #[case("  indented  \n", vec!["indented"])]
    #[case("one\r\n\r\ntwo", vec!["one", "two"])]
    #[case("\n\n  \n", vec![])]
    #[case("", vec![])]
    fn test_paragraph_splitting(#[case] source: &str, #[case] expected: Vec<&str>) {
        assert_eq!(paragraphs(source), expected);
    }

    #[test]
    fn test_positions() {
        let source = "First\n\n  Second line";
        let ast = PlainTextParser::new().parse(source).unwrap();
        let children = ast.children().unwrap();

        let first = children[0].position().unwrap();
        assert_eq!(first.start, Point::new(1, 1, 0));
        assert_eq!(first.end, Point::new(1, 6, 5));

        let second = children[1].position().unwrap();
        assert_eq!(second.start, Point::new(3, 3, 9));
        assert_eq!(second.end, Point::new(3, 14, 20));
        assert_eq!(&source[second.start.offset..second.end.offset], "Second line");

        let root = ast.position().unwrap();
        assert_eq!(root.end.offset, source.len());
    }

    #[test]
    fn test_parser_name_and_extensions() {
        let parser = PlainTextParser::new();

        assert_eq!(parser.name(), "text");
        assert!(parser.can_parse("TXT"));
        assert!(!parser.can_parse("md"));
    }

    #[test]
    fn test_line_index_points() {
        let index = LineIndex::new("ab\ncd\n");

        assert_eq!(index.point(0), Point::new(1, 1, 0));
        assert_eq!(index.point(2), Point::new(1, 3, 2));
        assert_eq!(index.point(3), Point::new(2, 1, 3));
        assert_eq!(index.point(6), Point::new(3, 1, 6));
    }
}
