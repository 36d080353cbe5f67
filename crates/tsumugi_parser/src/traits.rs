//! Parser trait definition.

use tsumugi_ast::Node;

use crate::ParseError;

/// Trait for parsing source text into an mdast tree.
///
/// Implementations must return a tree whose top node is `root`.
///
/// # Example
///
/// ```rust
/// use tsumugi_ast::Node;
/// use tsumugi_parser::{ParseError, Parser};
///
/// struct LineParser;
///
/// impl Parser for LineParser {
///     fn name(&self) -> &str {
///         "lines"
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &["lines"]
///     }
///
///     fn parse(&self, source: &str) -> Result<Node, ParseError> {
///         let children = source
///             .lines()
///             .map(|line| Node::paragraph(vec![Node::text(line)]))
///             .collect();
///         Ok(Node::root(children))
///     }
/// }
///
/// let tree = LineParser.parse("a\nb").unwrap();
/// assert_eq!(tree.to_text(), "ab");
/// assert!(LineParser.can_parse("LINES"));
/// ```
pub trait Parser: Send + Sync {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles.
    ///
    /// Extensions should not include the leading dot (e.g., `["md", "markdown"]`).
    fn extensions(&self) -> &[&str];

    /// Parses the source text into a tree rooted at a `root` node.
    fn parse(&self, source: &str) -> Result<Node, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
