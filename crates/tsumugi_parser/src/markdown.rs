//! Markdown parser using markdown-rs (wooorm/markdown-rs).
//!
//! markdown-rs already produces mdast, so conversion is mostly a field by
//! field copy into the owned [`Node`] tree. Constructs that have no node kind
//! here (math, TOML frontmatter, MDX) are kept as `html` literals holding
//! their source text.

use markdown::mdast;
use markdown::{ParseOptions, to_mdast, unist};
use tsumugi_ast::{
    AlignKind, Blockquote, Break, Code, Definition, Delete, Emphasis, FootnoteDefinition,
    FootnoteReference, Heading, Html, Image, ImageReference, InlineCode, Link, LinkReference,
    List, ListItem, Node, Paragraph, Point, Position, ReferenceKind, Root, Strong, Table,
    TableCell, TableRow, Text, ThematicBreak, Yaml,
};

use crate::{ParseError, Parser};

/// Syntax extensions enabled on top of CommonMark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// GitHub Flavored Markdown: tables, strikethrough, task lists,
    /// footnotes and autolink literals.
    pub gfm: bool,
    /// YAML frontmatter delimited by `---`.
    pub frontmatter: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            frontmatter: false,
        }
    }
}

/// Markdown parser implementation.
///
/// Uses `markdown-rs` for parsing, which supports:
/// - CommonMark
/// - GFM (GitHub Flavored Markdown)
/// - Frontmatter (optional)
#[derive(Debug, Clone, Default)]
pub struct MarkdownParser {
    options: MarkdownOptions,
}

impl MarkdownParser {
    /// Creates a new Markdown parser with default options (GFM, no frontmatter).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a Markdown parser with the given options.
    pub fn with_options(options: MarkdownOptions) -> Self {
        Self { options }
    }

    /// Returns the options this parser was created with.
    pub fn options(&self) -> MarkdownOptions {
        self.options
    }

    fn parse_options(&self) -> ParseOptions {
        let mut options = if self.options.gfm {
            ParseOptions::gfm()
        } else {
            ParseOptions::default()
        };
        options.constructs.frontmatter = self.options.frontmatter;
        options
    }
}

impl Parser for MarkdownParser {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown", "mdown", "mkdn", "mkd"]
    }

    fn parse(&self, source: &str) -> Result<Node, ParseError> {
        let tree = to_mdast(source, &self.parse_options())
            .map_err(|e| ParseError::invalid_source(e.to_string()))?;
        if !matches!(tree, mdast::Node::Root(_)) {
            return Err(ParseError::internal("markdown-rs returned a non-root tree"));
        }

        Ok(convert_node(&tree, source))
    }
}

fn convert_node(node: &mdast::Node, source: &str) -> Node {
    let position = node_position(node);

    match node {
        mdast::Node::Root(root) => Root {
            children: convert_children(&root.children, source),
            position,
        }
        .into(),

        mdast::Node::Paragraph(para) => Paragraph {
            children: convert_children(&para.children, source),
            position,
        }
        .into(),

        mdast::Node::Heading(heading) => Heading {
            depth: heading.depth,
            children: convert_children(&heading.children, source),
            position,
        }
        .into(),

        mdast::Node::ThematicBreak(_) => ThematicBreak { position }.into(),

        mdast::Node::Blockquote(quote) => Blockquote {
            children: convert_children(&quote.children, source),
            position,
        }
        .into(),

        mdast::Node::List(list) => List {
            ordered: list.ordered,
            start: list.start,
            spread: list.spread,
            children: convert_children(&list.children, source),
            position,
        }
        .into(),

        mdast::Node::ListItem(item) => ListItem {
            checked: item.checked,
            spread: item.spread,
            children: convert_children(&item.children, source),
            position,
        }
        .into(),

        mdast::Node::Html(html) => Html {
            value: html.value.clone(),
            position,
        }
        .into(),

        mdast::Node::Code(code) => Code {
            value: code.value.clone(),
            lang: code.lang.clone(),
            meta: code.meta.clone(),
            position,
        }
        .into(),

        mdast::Node::Yaml(yaml) => Yaml {
            value: yaml.value.clone(),
            position,
        }
        .into(),

        mdast::Node::Definition(def) => Definition {
            identifier: def.identifier.clone(),
            label: def.label.clone(),
            url: def.url.clone(),
            title: def.title.clone(),
            position,
        }
        .into(),

        // Footnotes (GFM)
        mdast::Node::FootnoteDefinition(def) => FootnoteDefinition {
            identifier: def.identifier.clone(),
            label: def.label.clone(),
            children: convert_children(&def.children, source),
            position,
        }
        .into(),

        mdast::Node::FootnoteReference(reference) => FootnoteReference {
            identifier: reference.identifier.clone(),
            label: reference.label.clone(),
            position,
        }
        .into(),

        // Table support (GFM)
        mdast::Node::Table(table) => Table {
            align: table.align.iter().map(convert_align).collect(),
            children: convert_children(&table.children, source),
            position,
        }
        .into(),

        mdast::Node::TableRow(row) => TableRow {
            children: convert_children(&row.children, source),
            position,
        }
        .into(),

        mdast::Node::TableCell(cell) => TableCell {
            children: convert_children(&cell.children, source),
            position,
        }
        .into(),

        mdast::Node::Text(text) => Text {
            value: text.value.clone(),
            position,
        }
        .into(),

        mdast::Node::Emphasis(em) => Emphasis {
            children: convert_children(&em.children, source),
            position,
        }
        .into(),

        mdast::Node::Strong(strong) => Strong {
            children: convert_children(&strong.children, source),
            position,
        }
        .into(),

        mdast::Node::Delete(del) => Delete {
            children: convert_children(&del.children, source),
            position,
        }
        .into(),

        mdast::Node::InlineCode(code) => InlineCode {
            value: code.value.clone(),
            position,
        }
        .into(),

        mdast::Node::Break(_) => Break { position }.into(),

        mdast::Node::Link(link) => Link {
            url: link.url.clone(),
            title: link.title.clone(),
            children: convert_children(&link.children, source),
            position,
        }
        .into(),

        mdast::Node::Image(image) => Image {
            url: image.url.clone(),
            title: image.title.clone(),
            alt: Some(image.alt.clone()),
            position,
        }
        .into(),

        // Reference nodes
        mdast::Node::LinkReference(reference) => LinkReference {
            identifier: reference.identifier.clone(),
            label: reference.label.clone(),
            reference_type: convert_reference_kind(&reference.reference_kind),
            children: convert_children(&reference.children, source),
            position,
        }
        .into(),

        mdast::Node::ImageReference(reference) => ImageReference {
            identifier: reference.identifier.clone(),
            label: reference.label.clone(),
            reference_type: convert_reference_kind(&reference.reference_kind),
            alt: Some(reference.alt.clone()),
            position,
        }
        .into(),

        // Fallback for unsupported nodes
        _ => Html {
            value: source_slice(position.as_ref(), source).to_string(),
            position,
        }
        .into(),
    }
}

fn convert_children(children: &[mdast::Node], source: &str) -> Vec<Node> {
    children
        .iter()
        .map(|child| convert_node(child, source))
        .collect()
}

fn convert_align(align: &mdast::AlignKind) -> Option<AlignKind> {
    match align {
        mdast::AlignKind::Left => Some(AlignKind::Left),
        mdast::AlignKind::Right => Some(AlignKind::Right),
        mdast::AlignKind::Center => Some(AlignKind::Center),
        mdast::AlignKind::None => None,
    }
}

fn convert_reference_kind(kind: &mdast::ReferenceKind) -> ReferenceKind {
    match kind {
        mdast::ReferenceKind::Shortcut => ReferenceKind::Shortcut,
        mdast::ReferenceKind::Collapsed => ReferenceKind::Collapsed,
        mdast::ReferenceKind::Full => ReferenceKind::Full,
    }
}

fn node_position(node: &mdast::Node) -> Option<Position> {
    node.position()
        .map(|pos| Position::new(convert_point(&pos.start), convert_point(&pos.end)))
}

fn convert_point(point: &unist::Point) -> Point {
    Point::new(point.line, point.column, point.offset)
}

fn source_slice<'s>(position: Option<&Position>, source: &'s str) -> &'s str {
    position
        .and_then(|pos| source.get(pos.start.offset..pos.end.offset))
        .unwrap_or_default()
}
