//! Visitor trait for traversing mdast nodes.
//!
//! Each `visit_*` method receives the typed struct of one node kind and
//! has a default implementation that walks its children, so a visitor
//! only overrides the kinds it cares about.

use std::ops::ControlFlow;

use crate::node::{
    Blockquote, Break, Code, Definition, Delete, Emphasis, Footnote, FootnoteDefinition,
    FootnoteReference, Heading, Html, Image, ImageReference, InlineCode, Link, LinkReference,
    List, ListItem, Paragraph, Root, Strong, Table, TableCell, TableRow, Text, ThematicBreak,
    Yaml,
};
use crate::Node;

use super::walk::{walk_children, walk_node};

/// Result type for visitor methods to control traversal.
///
/// - `ControlFlow::Continue(())` - continue visiting
/// - `ControlFlow::Break(())` - stop traversal early
pub type VisitResult = ControlFlow<()>;

/// Visitor trait for traversing mdast nodes without modification.
///
/// # Lifetime
///
/// The `'a` lifetime is the lifetime of the visited tree, so visitors can
/// keep references to the nodes they see.
///
/// # Control Flow
///
/// Return `ControlFlow::Break(())` from any hook to stop the whole
/// traversal. Use the `?` operator for convenient propagation.
pub trait Visitor<'a>: Sized {
    /// Called before a node is dispatched.
    #[inline]
    fn enter_node(&mut self, _node: &'a Node) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called after a node and all its children were visited.
    #[inline]
    fn exit_node(&mut self, _node: &'a Node) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Visits any node. Every child walked by [`walk_children`] goes
    /// through this method, so overriding it intercepts the whole tree.
    #[inline]
    fn visit_node(&mut self, node: &'a Node) -> VisitResult {
        walk_node(self, node)
    }

    // === Document ===

    fn visit_root(&mut self, node: &'a Root) -> VisitResult {
        walk_children(self, &node.children)
    }

    // === Flow content ===

    fn visit_paragraph(&mut self, node: &'a Paragraph) -> VisitResult {
        walk_children(self, &node.children)
    }

    fn visit_heading(&mut self, node: &'a Heading) -> VisitResult {
        walk_children(self, &node.children)
    }

    fn visit_thematic_break(&mut self, _node: &'a ThematicBreak) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_blockquote(&mut self, node: &'a Blockquote) -> VisitResult {
        walk_children(self, &node.children)
    }

    fn visit_list(&mut self, node: &'a List) -> VisitResult {
        walk_children(self, &node.children)
    }

    fn visit_list_item(&mut self, node: &'a ListItem) -> VisitResult {
        walk_children(self, &node.children)
    }

    fn visit_html(&mut self, _node: &'a Html) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_code(&mut self, _node: &'a Code) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_yaml(&mut self, _node: &'a Yaml) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_definition(&mut self, _node: &'a Definition) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_footnote_definition(&mut self, node: &'a FootnoteDefinition) -> VisitResult {
        walk_children(self, &node.children)
    }

    // === Tables (GFM) ===

    fn visit_table(&mut self, node: &'a Table) -> VisitResult {
        walk_children(self, &node.children)
    }

    fn visit_table_row(&mut self, node: &'a TableRow) -> VisitResult {
        walk_children(self, &node.children)
    }

    fn visit_table_cell(&mut self, node: &'a TableCell) -> VisitResult {
        walk_children(self, &node.children)
    }

    // === Phrasing content ===

    fn visit_text(&mut self, _node: &'a Text) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_emphasis(&mut self, node: &'a Emphasis) -> VisitResult {
        walk_children(self, &node.children)
    }

    fn visit_strong(&mut self, node: &'a Strong) -> VisitResult {
        walk_children(self, &node.children)
    }

    fn visit_delete(&mut self, node: &'a Delete) -> VisitResult {
        walk_children(self, &node.children)
    }

    fn visit_inline_code(&mut self, _node: &'a InlineCode) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_break(&mut self, _node: &'a Break) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_link(&mut self, node: &'a Link) -> VisitResult {
        walk_children(self, &node.children)
    }

    fn visit_image(&mut self, _node: &'a Image) -> VisitResult {
        ControlFlow::Continue(())
    }

    // === References and footnotes ===

    fn visit_link_reference(&mut self, node: &'a LinkReference) -> VisitResult {
        walk_children(self, &node.children)
    }

    fn visit_image_reference(&mut self, _node: &'a ImageReference) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_footnote(&mut self, node: &'a Footnote) -> VisitResult {
        walk_children(self, &node.children)
    }

    fn visit_footnote_reference(&mut self, _node: &'a FootnoteReference) -> VisitResult {
        ControlFlow::Continue(())
    }
}
