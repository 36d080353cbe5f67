//! # tsumugi_ast
//!
//! mdast definitions for Tsumugi.
//!
//! This crate provides the syntax tree that flows through a Tsumugi
//! processor. The tree follows the [mdast] vocabulary so that it serializes
//! to the same JSON shape other mdast tools read and write.
//!
//! ## Architecture
//!
//! - [`Node`] is a closed sum type with one variant per mdast node kind
//! - Parent nodes own their children; literal nodes own a `value`
//! - [`NodeKind`] is the fieldless discriminant used for dispatch and filtering
//! - [`ContentModel`] classifies which kinds may appear under which parents
//!
//! ## Example
//!
//! ```rust
//! use tsumugi_ast::{Node, NodeKind, visit};
//!
//! let tree = Node::root(vec![
//!     Node::heading(1, vec![Node::text("Hello world!")]),
//! ]);
//!
//! let mut depths = Vec::new();
//! visit(&tree, NodeKind::Heading, |node| {
//!     if let Node::Heading(heading) = node {
//!         depths.push(heading.depth);
//!     }
//! });
//! assert_eq!(depths, vec![1]);
//! ```
//!
//! [mdast]: https://github.com/syntax-tree/mdast

mod content;
mod node;
mod node_kind;
mod position;
pub mod visitor;

pub use content::{ContentModel, ContentModelError};
pub use node::{
    AlignKind, Blockquote, Break, Code, Definition, Delete, Emphasis, Footnote,
    FootnoteDefinition, FootnoteReference, Heading, Html, Image, ImageReference, InlineCode,
    Link, LinkReference, List, ListItem, Node, Paragraph, ReferenceKind, Root, Strong, Table,
    TableCell, TableRow, Text, ThematicBreak, Yaml,
};
pub use node_kind::{NodeKind, UnknownNodeKind};
pub use position::{Point, Position};

// Re-export commonly used visitor items for convenience
pub use visitor::{Action, VisitResult, Visitor, visit, visit_mut, visit_with};
