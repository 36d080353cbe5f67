//! Tree traversal.
//!
//! # Overview
//!
//! - [`visit`] - Call a function for every node of one kind
//! - [`visit_with`] - Same, with skip/exit control via [`Action`]
//! - [`visit_mut`] - Same, with mutable access to matched nodes
//! - [`Visitor`] - Typed read-only traversal trait
//! - [`walk_node`] / [`walk_children`] - Default traversal used by [`Visitor`]
//!
//! # Examples
//!
//! ## Collecting Text Content
//!
//! ```rust
//! use tsumugi_ast::{Node, Text};
//! use tsumugi_ast::visitor::{Visitor, VisitResult, walk_node};
//! use std::ops::ControlFlow;
//!
//! struct TextCollector<'a> {
//!     texts: Vec<&'a str>,
//! }
//!
//! impl<'a> Visitor<'a> for TextCollector<'a> {
//!     fn visit_text(&mut self, node: &'a Text) -> VisitResult {
//!         self.texts.push(&node.value);
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let tree = Node::root(vec![Node::paragraph(vec![Node::text("hello")])]);
//!
//! let mut collector = TextCollector { texts: Vec::new() };
//! walk_node(&mut collector, &tree);
//! assert_eq!(collector.texts, vec!["hello"]);
//! ```
//!
//! ## Early Termination
//!
//! ```rust
//! use tsumugi_ast::{Action, Node, NodeKind, visit_with};
//!
//! let tree = Node::root(vec![
//!     Node::heading(1, vec![Node::text("first")]),
//!     Node::heading(2, vec![Node::text("second")]),
//! ]);
//!
//! let mut first = None;
//! visit_with(&tree, NodeKind::Heading, |node| {
//!     first = Some(node.to_text());
//!     Action::Exit
//! });
//! assert_eq!(first.as_deref(), Some("first"));
//! ```

mod filter;
mod mutable;
mod typed;
mod walk;

pub use filter::{Action, visit, visit_with};
pub use mutable::visit_mut;
pub use typed::{VisitResult, Visitor};
pub use walk::{walk_children, walk_node};
