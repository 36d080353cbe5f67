//! Node definitions.
//!
//! The core syntax tree type used throughout Tsumugi. Every mdast node kind
//! is a variant of [`Node`] wrapping a struct with that kind's fields.

use serde::{Deserialize, Serialize};

use crate::{NodeKind, Position};

/// A node in the mdast syntax tree.
///
/// `Node` is a closed sum type: matching on it is exhaustive, and the
/// serialized form carries the mdast `type` tag.
///
/// # Example
///
/// ```rust
/// use tsumugi_ast::{Node, NodeKind};
///
/// let paragraph = Node::paragraph(vec![
///     Node::text("Hello, "),
///     Node::strong(vec![Node::text("world")]),
/// ]);
///
/// assert_eq!(paragraph.kind(), NodeKind::Paragraph);
/// assert_eq!(paragraph.to_text(), "Hello, world");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Root(Root),
    Paragraph(Paragraph),
    Heading(Heading),
    ThematicBreak(ThematicBreak),
    Blockquote(Blockquote),
    List(List),
    ListItem(ListItem),
    Table(Table),
    TableRow(TableRow),
    TableCell(TableCell),
    Html(Html),
    Code(Code),
    Yaml(Yaml),
    Definition(Definition),
    FootnoteDefinition(FootnoteDefinition),
    Text(Text),
    Emphasis(Emphasis),
    Strong(Strong),
    Delete(Delete),
    InlineCode(InlineCode),
    Break(Break),
    Link(Link),
    Image(Image),
    LinkReference(LinkReference),
    ImageReference(ImageReference),
    Footnote(Footnote),
    FootnoteReference(FootnoteReference),
}

/// Document root. Valid only at the top of a tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Root {
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// A unit of discourse. Content model: phrasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Heading of a section. Content model: phrasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Rank of the heading, from 1 to 6.
    pub depth: u8,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThematicBreak {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// A section quoted from somewhere else. Content model: flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blockquote {
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// A list of items. Content model: list items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct List {
    /// Whether the items are intentionally ordered.
    #[serde(default)]
    pub ordered: bool,
    /// Starting number of an ordered list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    /// Whether any item is separated from its siblings by a blank line.
    #[serde(default)]
    pub spread: bool,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// An item in a [`List`]. Content model: flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Task list state: done, not done, or not a task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default)]
    pub spread: bool,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Column alignment of a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignKind {
    Left,
    Right,
    Center,
}

/// Two-dimensional data (GFM). Content model: table rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Alignment per column; `None` when a column is not aligned.
    #[serde(default)]
    pub align: Vec<Option<AlignKind>>,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// A row of cells. The first row of a table is its head.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// A header or data cell. Content model: phrasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// A fragment of raw HTML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Html {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// A block of preformatted text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Code {
    pub value: String,
    /// Language of the code, from the info string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Rest of the info string after the language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// YAML frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Yaml {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// A resource definition (`[label]: url "title"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Content of a footnote (`[^label]: ...`). Content model: flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FootnoteDefinition {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Everything that is just text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Emphasis {
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Strong {
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineCode {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Break {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// A hyperlink. Content model: static phrasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Explicitness of a reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// `[foo]`
    Shortcut,
    /// `[foo][]`
    Collapsed,
    /// `[text][foo]`
    #[default]
    Full,
}

/// A link through association. Content model: static phrasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkReference {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub reference_type: ReferenceKind,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReference {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub reference_type: ReferenceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Inline footnote content (`^[note]`). Content model: phrasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Footnote {
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FootnoteReference {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Node {
                #[inline]
                fn from(node: $variant) -> Self {
                    Node::$variant(node)
                }
            }
        )*
    };
}

impl_from_variant!(
    Root,
    Paragraph,
    Heading,
    ThematicBreak,
    Blockquote,
    List,
    ListItem,
    Table,
    TableRow,
    TableCell,
    Html,
    Code,
    Yaml,
    Definition,
    FootnoteDefinition,
    Text,
    Emphasis,
    Strong,
    Delete,
    InlineCode,
    Break,
    Link,
    Image,
    LinkReference,
    ImageReference,
    Footnote,
    FootnoteReference,
);

impl Node {
    /// Creates a root node.
    pub fn root(children: Vec<Node>) -> Self {
        Node::Root(Root {
            children,
            position: None,
        })
    }

    /// Creates a paragraph node.
    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(Paragraph {
            children,
            position: None,
        })
    }

    /// Creates a heading node of the given depth.
    pub fn heading(depth: u8, children: Vec<Node>) -> Self {
        Node::Heading(Heading {
            depth,
            children,
            position: None,
        })
    }

    /// Creates a blockquote node.
    pub fn blockquote(children: Vec<Node>) -> Self {
        Node::Blockquote(Blockquote {
            children,
            position: None,
        })
    }

    /// Creates a list node.
    pub fn list(ordered: bool, children: Vec<Node>) -> Self {
        Node::List(List {
            ordered,
            start: ordered.then_some(1),
            children,
            ..List::default()
        })
    }

    /// Creates a list item node.
    pub fn list_item(children: Vec<Node>) -> Self {
        Node::ListItem(ListItem {
            children,
            ..ListItem::default()
        })
    }

    /// Creates a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text {
            value: value.into(),
            position: None,
        })
    }

    /// Creates an inline code node.
    pub fn inline_code(value: impl Into<String>) -> Self {
        Node::InlineCode(InlineCode {
            value: value.into(),
            position: None,
        })
    }

    /// Creates a code block node.
    pub fn code(lang: Option<&str>, value: impl Into<String>) -> Self {
        Node::Code(Code {
            value: value.into(),
            lang: lang.map(str::to_string),
            ..Code::default()
        })
    }

    /// Creates a raw HTML node.
    pub fn html(value: impl Into<String>) -> Self {
        Node::Html(Html {
            value: value.into(),
            position: None,
        })
    }

    /// Creates an emphasis node.
    pub fn emphasis(children: Vec<Node>) -> Self {
        Node::Emphasis(Emphasis {
            children,
            position: None,
        })
    }

    /// Creates a strong node.
    pub fn strong(children: Vec<Node>) -> Self {
        Node::Strong(Strong {
            children,
            position: None,
        })
    }

    /// Creates a link node.
    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Link(Link {
            url: url.into(),
            children,
            ..Link::default()
        })
    }

    /// Creates an image node.
    pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Node::Image(Image {
            url: url.into(),
            alt: Some(alt.into()),
            ..Image::default()
        })
    }

    /// Creates a thematic break node.
    pub fn thematic_break() -> Self {
        Node::ThematicBreak(ThematicBreak::default())
    }

    /// Returns the kind of this node.
    pub const fn kind(&self) -> NodeKind {
        match self {
            Node::Root(_) => NodeKind::Root,
            Node::Paragraph(_) => NodeKind::Paragraph,
            Node::Heading(_) => NodeKind::Heading,
            Node::ThematicBreak(_) => NodeKind::ThematicBreak,
            Node::Blockquote(_) => NodeKind::Blockquote,
            Node::List(_) => NodeKind::List,
            Node::ListItem(_) => NodeKind::ListItem,
            Node::Table(_) => NodeKind::Table,
            Node::TableRow(_) => NodeKind::TableRow,
            Node::TableCell(_) => NodeKind::TableCell,
            Node::Html(_) => NodeKind::Html,
            Node::Code(_) => NodeKind::Code,
            Node::Yaml(_) => NodeKind::Yaml,
            Node::Definition(_) => NodeKind::Definition,
            Node::FootnoteDefinition(_) => NodeKind::FootnoteDefinition,
            Node::Text(_) => NodeKind::Text,
            Node::Emphasis(_) => NodeKind::Emphasis,
            Node::Strong(_) => NodeKind::Strong,
            Node::Delete(_) => NodeKind::Delete,
            Node::InlineCode(_) => NodeKind::InlineCode,
            Node::Break(_) => NodeKind::Break,
            Node::Link(_) => NodeKind::Link,
            Node::Image(_) => NodeKind::Image,
            Node::LinkReference(_) => NodeKind::LinkReference,
            Node::ImageReference(_) => NodeKind::ImageReference,
            Node::Footnote(_) => NodeKind::Footnote,
            Node::FootnoteReference(_) => NodeKind::FootnoteReference,
        }
    }

    /// Returns the children of a parent node, or `None` for other nodes.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Root(n) => Some(&n.children),
            Node::Paragraph(n) => Some(&n.children),
            Node::Heading(n) => Some(&n.children),
            Node::Blockquote(n) => Some(&n.children),
            Node::List(n) => Some(&n.children),
            Node::ListItem(n) => Some(&n.children),
            Node::Table(n) => Some(&n.children),
            Node::TableRow(n) => Some(&n.children),
            Node::TableCell(n) => Some(&n.children),
            Node::FootnoteDefinition(n) => Some(&n.children),
            Node::Emphasis(n) => Some(&n.children),
            Node::Strong(n) => Some(&n.children),
            Node::Delete(n) => Some(&n.children),
            Node::Link(n) => Some(&n.children),
            Node::LinkReference(n) => Some(&n.children),
            Node::Footnote(n) => Some(&n.children),
            _ => None,
        }
    }

    /// Returns the children of a parent node mutably.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root(n) => Some(&mut n.children),
            Node::Paragraph(n) => Some(&mut n.children),
            Node::Heading(n) => Some(&mut n.children),
            Node::Blockquote(n) => Some(&mut n.children),
            Node::List(n) => Some(&mut n.children),
            Node::ListItem(n) => Some(&mut n.children),
            Node::Table(n) => Some(&mut n.children),
            Node::TableRow(n) => Some(&mut n.children),
            Node::TableCell(n) => Some(&mut n.children),
            Node::FootnoteDefinition(n) => Some(&mut n.children),
            Node::Emphasis(n) => Some(&mut n.children),
            Node::Strong(n) => Some(&mut n.children),
            Node::Delete(n) => Some(&mut n.children),
            Node::Link(n) => Some(&mut n.children),
            Node::LinkReference(n) => Some(&mut n.children),
            Node::Footnote(n) => Some(&mut n.children),
            _ => None,
        }
    }

    /// Returns the value of a literal node, or `None` for other nodes.
    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Html(n) => Some(&n.value),
            Node::Code(n) => Some(&n.value),
            Node::Yaml(n) => Some(&n.value),
            Node::Text(n) => Some(&n.value),
            Node::InlineCode(n) => Some(&n.value),
            _ => None,
        }
    }

    /// Returns the value of a literal node mutably.
    pub fn value_mut(&mut self) -> Option<&mut String> {
        match self {
            Node::Html(n) => Some(&mut n.value),
            Node::Code(n) => Some(&mut n.value),
            Node::Yaml(n) => Some(&mut n.value),
            Node::Text(n) => Some(&mut n.value),
            Node::InlineCode(n) => Some(&mut n.value),
            _ => None,
        }
    }

    /// Returns the source position of this node, if known.
    pub fn position(&self) -> Option<&Position> {
        self.position_slot().as_ref()
    }

    /// Sets the source position of this node.
    pub fn set_position(&mut self, position: Option<Position>) {
        *self.position_slot_mut() = position;
    }

    /// Sets the source position and returns the node.
    pub fn with_position(mut self, position: Position) -> Self {
        self.set_position(Some(position));
        self
    }

    /// Returns true if this node holds children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        self.kind().is_parent()
    }

    /// Returns true if this node holds a string value.
    #[inline]
    pub fn is_literal(&self) -> bool {
        self.kind().is_literal()
    }

    /// Returns the flattened text content of this node.
    ///
    /// Literal values are returned as-is, images contribute their `alt`
    /// text, and parents concatenate the text of their children.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(value) = self.value() {
            out.push_str(value);
            return;
        }
        match self {
            Node::Image(Image { alt: Some(alt), .. })
            | Node::ImageReference(ImageReference { alt: Some(alt), .. }) => out.push_str(alt),
            _ => {
                for child in self.children().unwrap_or_default() {
                    child.collect_text(out);
                }
            }
        }
    }

    fn position_slot(&self) -> &Option<Position> {
        match self {
            Node::Root(n) => &n.position,
            Node::Paragraph(n) => &n.position,
            Node::Heading(n) => &n.position,
            Node::ThematicBreak(n) => &n.position,
            Node::Blockquote(n) => &n.position,
            Node::List(n) => &n.position,
            Node::ListItem(n) => &n.position,
            Node::Table(n) => &n.position,
            Node::TableRow(n) => &n.position,
            Node::TableCell(n) => &n.position,
            Node::Html(n) => &n.position,
            Node::Code(n) => &n.position,
            Node::Yaml(n) => &n.position,
            Node::Definition(n) => &n.position,
            Node::FootnoteDefinition(n) => &n.position,
            Node::Text(n) => &n.position,
            Node::Emphasis(n) => &n.position,
            Node::Strong(n) => &n.position,
            Node::Delete(n) => &n.position,
            Node::InlineCode(n) => &n.position,
            Node::Break(n) => &n.position,
            Node::Link(n) => &n.position,
            Node::Image(n) => &n.position,
            Node::LinkReference(n) => &n.position,
            Node::ImageReference(n) => &n.position,
            Node::Footnote(n) => &n.position,
            Node::FootnoteReference(n) => &n.position,
        }
    }

    fn position_slot_mut(&mut self) -> &mut Option<Position> {
        match self {
            Node::Root(n) => &mut n.position,
            Node::Paragraph(n) => &mut n.position,
            Node::Heading(n) => &mut n.position,
            Node::ThematicBreak(n) => &mut n.position,
            Node::Blockquote(n) => &mut n.position,
            Node::List(n) => &mut n.position,
            Node::ListItem(n) => &mut n.position,
            Node::Table(n) => &mut n.position,
            Node::TableRow(n) => &mut n.position,
            Node::TableCell(n) => &mut n.position,
            Node::Html(n) => &mut n.position,
            Node::Code(n) => &mut n.position,
            Node::Yaml(n) => &mut n.position,
            Node::Definition(n) => &mut n.position,
            Node::FootnoteDefinition(n) => &mut n.position,
            Node::Text(n) => &mut n.position,
            Node::Emphasis(n) => &mut n.position,
            Node::Strong(n) => &mut n.position,
            Node::Delete(n) => &mut n.position,
            Node::InlineCode(n) => &mut n.position,
            Node::Break(n) => &mut n.position,
            Node::Link(n) => &mut n.position,
            Node::Image(n) => &mut n.position,
            Node::LinkReference(n) => &mut n.position,
            Node::ImageReference(n) => &mut n.position,
            Node::Footnote(n) => &mut n.position,
            Node::FootnoteReference(n) => &mut n.position,
        }
    }
}
