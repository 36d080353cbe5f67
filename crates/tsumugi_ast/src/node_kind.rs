//! Node kind definitions for mdast.
//!
//! These kinds correspond to the `type` field of mdast nodes.
//! See: https://github.com/syntax-tree/mdast

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The discriminant of a [`Node`](crate::Node).
///
/// The serialized and displayed names match mdast's `type` values
/// (`"root"`, `"thematicBreak"`, `"inlineCode"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    // Document structure
    /// Root document node.
    Root,

    // Block content
    /// Paragraph containing phrasing content.
    Paragraph,
    /// Heading of depth 1 to 6.
    Heading,
    /// Thematic break (horizontal rule).
    ThematicBreak,
    /// Block quote.
    Blockquote,
    /// Ordered or unordered list.
    List,
    /// Item in a list.
    ListItem,
    /// Table (GFM).
    Table,
    /// Table row (GFM).
    TableRow,
    /// Table cell (GFM).
    TableCell,
    /// Raw HTML.
    Html,
    /// Fenced or indented code block.
    Code,

    // Frontmatter and definitions
    /// YAML frontmatter.
    Yaml,
    /// Link reference definition.
    Definition,
    /// Footnote definition.
    FootnoteDefinition,

    // Phrasing content
    /// Plain text.
    Text,
    /// Emphasis (italic).
    Emphasis,
    /// Strong importance (bold).
    Strong,
    /// Strikethrough (GFM).
    Delete,
    /// Inline code.
    InlineCode,
    /// Hard line break.
    Break,
    /// Hyperlink.
    Link,
    /// Image.
    Image,
    /// Link reference.
    LinkReference,
    /// Image reference.
    ImageReference,
    /// Inline footnote.
    Footnote,
    /// Footnote reference.
    FootnoteReference,
}

/// Error returned when a string names no known node kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown node kind: {0}")]
pub struct UnknownNodeKind(pub String);

impl NodeKind {
    /// Every node kind, in declaration order.
    pub const ALL: [NodeKind; 27] = [
        NodeKind::Root,
        NodeKind::Paragraph,
        NodeKind::Heading,
        NodeKind::ThematicBreak,
        NodeKind::Blockquote,
        NodeKind::List,
        NodeKind::ListItem,
        NodeKind::Table,
        NodeKind::TableRow,
        NodeKind::TableCell,
        NodeKind::Html,
        NodeKind::Code,
        NodeKind::Yaml,
        NodeKind::Definition,
        NodeKind::FootnoteDefinition,
        NodeKind::Text,
        NodeKind::Emphasis,
        NodeKind::Strong,
        NodeKind::Delete,
        NodeKind::InlineCode,
        NodeKind::Break,
        NodeKind::Link,
        NodeKind::Image,
        NodeKind::LinkReference,
        NodeKind::ImageReference,
        NodeKind::Footnote,
        NodeKind::FootnoteReference,
    ];

    /// Returns the mdast `type` name of this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::ThematicBreak => "thematicBreak",
            NodeKind::Blockquote => "blockquote",
            NodeKind::List => "list",
            NodeKind::ListItem => "listItem",
            NodeKind::Table => "table",
            NodeKind::TableRow => "tableRow",
            NodeKind::TableCell => "tableCell",
            NodeKind::Html => "html",
            NodeKind::Code => "code",
            NodeKind::Yaml => "yaml",
            NodeKind::Definition => "definition",
            NodeKind::FootnoteDefinition => "footnoteDefinition",
            NodeKind::Text => "text",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::Delete => "delete",
            NodeKind::InlineCode => "inlineCode",
            NodeKind::Break => "break",
            NodeKind::Link => "link",
            NodeKind::Image => "image",
            NodeKind::LinkReference => "linkReference",
            NodeKind::ImageReference => "imageReference",
            NodeKind::Footnote => "footnote",
            NodeKind::FootnoteReference => "footnoteReference",
        }
    }

    /// Returns true if nodes of this kind hold children.
    #[inline]
    pub const fn is_parent(&self) -> bool {
        matches!(
            self,
            NodeKind::Root
                | NodeKind::Paragraph
                | NodeKind::Heading
                | NodeKind::Blockquote
                | NodeKind::List
                | NodeKind::ListItem
                | NodeKind::Table
                | NodeKind::TableRow
                | NodeKind::TableCell
                | NodeKind::FootnoteDefinition
                | NodeKind::Emphasis
                | NodeKind::Strong
                | NodeKind::Delete
                | NodeKind::Link
                | NodeKind::LinkReference
                | NodeKind::Footnote
        )
    }

    /// Returns true if nodes of this kind hold a string `value`.
    #[inline]
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            NodeKind::Html
                | NodeKind::Code
                | NodeKind::Yaml
                | NodeKind::Text
                | NodeKind::InlineCode
        )
    }

    /// Returns true if nodes of this kind hold neither children nor a value.
    #[inline]
    pub const fn is_void(&self) -> bool {
        !self.is_parent() && !self.is_literal()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = UnknownNodeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownNodeKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_is_parent() {
        assert!(NodeKind::Root.is_parent());
        assert!(NodeKind::Heading.is_parent());
        assert!(NodeKind::LinkReference.is_parent());
        assert!(!NodeKind::Text.is_parent());
        assert!(!NodeKind::Image.is_parent());
    }

    #[test]
    fn test_is_literal() {
        assert!(NodeKind::Text.is_literal());
        assert!(NodeKind::Code.is_literal());
        assert!(NodeKind::Yaml.is_literal());
        assert!(!NodeKind::Paragraph.is_literal());
        assert!(!NodeKind::Break.is_literal());
    }

    #[test]
    fn test_parent_and_literal_are_exclusive() {
        for kind in NodeKind::ALL {
            assert!(
                !(kind.is_parent() && kind.is_literal()),
                "{kind} cannot be both parent and literal"
            );
        }
    }

    #[test]
    fn test_void_kinds() {
        let void: Vec<_> = NodeKind::ALL.into_iter().filter(|k| k.is_void()).collect();
        assert_eq!(
            void,
            vec![
                NodeKind::ThematicBreak,
                NodeKind::Definition,
                NodeKind::Break,
                NodeKind::Image,
                NodeKind::ImageReference,
                NodeKind::FootnoteReference,
            ]
        );
    }

    #[rstest]
    #[case(NodeKind::Root, "root")]
    #[case(NodeKind::ThematicBreak, "thematicBreak")]
    #[case(NodeKind::ListItem, "listItem")]
    #[case(NodeKind::InlineCode, "inlineCode")]
    #[case(NodeKind::FootnoteDefinition, "footnoteDefinition")]
    #[case(NodeKind::Html, "html")]
    fn test_display(#[case] kind: NodeKind, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
    }

    #[test]
    fn test_from_str_accepts_every_display_name() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.to_string().parse::<NodeKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "Header".parse::<NodeKind>().unwrap_err();
        assert_eq!(err, UnknownNodeKind("Header".to_string()));
        assert_eq!(err.to_string(), "unknown node kind: Header");
    }

    #[test]
    fn test_serde_matches_display() {
        for kind in NodeKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn test_deserialization() {
        let kind: NodeKind = serde_json::from_str("\"imageReference\"").unwrap();
        assert_eq!(kind, NodeKind::ImageReference);
    }
}
