//! Walk functions for tree traversal.
//!
//! These functions provide the traversal logic behind the default
//! implementations of the [`Visitor`] trait.

use std::ops::ControlFlow;

use crate::Node;

use super::typed::{VisitResult, Visitor};

/// Walks a node by dispatching to the type-specific visitor method.
///
/// This function:
/// 1. Calls `enter_node` on the visitor
/// 2. Dispatches to the `visit_*` method for the node's kind
/// 3. Calls `exit_node` on the visitor
pub fn walk_node<'a, V>(visitor: &mut V, node: &'a Node) -> VisitResult
where
    V: Visitor<'a>,
{
    visitor.enter_node(node)?;

    let result = match node {
        Node::Root(n) => visitor.visit_root(n),

        Node::Paragraph(n) => visitor.visit_paragraph(n),
        Node::Heading(n) => visitor.visit_heading(n),
        Node::ThematicBreak(n) => visitor.visit_thematic_break(n),
        Node::Blockquote(n) => visitor.visit_blockquote(n),
        Node::List(n) => visitor.visit_list(n),
        Node::ListItem(n) => visitor.visit_list_item(n),
        Node::Html(n) => visitor.visit_html(n),
        Node::Code(n) => visitor.visit_code(n),
        Node::Yaml(n) => visitor.visit_yaml(n),
        Node::Definition(n) => visitor.visit_definition(n),
        Node::FootnoteDefinition(n) => visitor.visit_footnote_definition(n),

        Node::Table(n) => visitor.visit_table(n),
        Node::TableRow(n) => visitor.visit_table_row(n),
        Node::TableCell(n) => visitor.visit_table_cell(n),

        Node::Text(n) => visitor.visit_text(n),
        Node::Emphasis(n) => visitor.visit_emphasis(n),
        Node::Strong(n) => visitor.visit_strong(n),
        Node::Delete(n) => visitor.visit_delete(n),
        Node::InlineCode(n) => visitor.visit_inline_code(n),
        Node::Break(n) => visitor.visit_break(n),
        Node::Link(n) => visitor.visit_link(n),
        Node::Image(n) => visitor.visit_image(n),

        Node::LinkReference(n) => visitor.visit_link_reference(n),
        Node::ImageReference(n) => visitor.visit_image_reference(n),
        Node::Footnote(n) => visitor.visit_footnote(n),
        Node::FootnoteReference(n) => visitor.visit_footnote_reference(n),
    };

    result?;

    visitor.exit_node(node)
}

/// Walks a list of children in order through [`Visitor::visit_node`].
///
/// Stops at the first child whose traversal breaks.
#[inline]
pub fn walk_children<'a, V>(visitor: &mut V, children: &'a [Node]) -> VisitResult
where
    V: Visitor<'a>,
{
    for child in children {
        visitor.visit_node(child)?;
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Heading, Text};
    use crate::NodeKind;

    /// Counts nodes by kind and records enter/exit order.
    #[derive(Default)]
    struct NodeCounter {
        headings: usize,
        texts: usize,
        total: usize,
        events: Vec<String>,
    }

    impl<'a> Visitor<'a> for NodeCounter {
        fn enter_node(&mut self, node: &'a Node) -> VisitResult {
            self.total += 1;
            self.events.push(format!("enter {}", node.kind()));
            ControlFlow::Continue(())
        }

        fn exit_node(&mut self, node: &'a Node) -> VisitResult {
            self.events.push(format!("exit {}", node.kind()));
            ControlFlow::Continue(())
        }

        fn visit_heading(&mut self, node: &'a Heading) -> VisitResult {
            self.headings += 1;
            walk_children(self, &node.children)
        }

        fn visit_text(&mut self, _node: &'a Text) -> VisitResult {
            self.texts += 1;
            ControlFlow::Continue(())
        }
    }

    fn sample_tree() -> Node {
        Node::root(vec![
            Node::heading(1, vec![Node::text("Title")]),
            Node::paragraph(vec![
                Node::text("a "),
                Node::emphasis(vec![Node::text("b")]),
            ]),
        ])
    }

    #[test]
    fn walk_node_visits_single_text_node() {
        let node = Node::text("hello");
        let mut counter = NodeCounter::default();

        let result = walk_node(&mut counter, &node);

        assert!(result.is_continue());
        assert_eq!(counter.texts, 1);
        assert_eq!(counter.total, 1);
    }

    #[test]
    fn walk_node_visits_every_node() {
        let tree = sample_tree();
        let mut counter = NodeCounter::default();

        walk_node(&mut counter, &tree);

        assert_eq!(counter.total, 7);
        assert_eq!(counter.headings, 1);
        assert_eq!(counter.texts, 3);
    }

    #[test]
    fn walk_node_enters_and_exits_in_document_order() {
        let tree = Node::root(vec![Node::heading(1, vec![Node::text("T")])]);
        let mut counter = NodeCounter::default();

        walk_node(&mut counter, &tree);

        assert_eq!(
            counter.events,
            vec![
                "enter root",
                "enter heading",
                "enter text",
                "exit text",
                "exit heading",
                "exit root",
            ]
        );
    }

    /// Stops at the first text node.
    struct FirstText<'a> {
        found: Option<&'a str>,
    }

    impl<'a> Visitor<'a> for FirstText<'a> {
        fn visit_text(&mut self, node: &'a Text) -> VisitResult {
            self.found = Some(&node.value);
            ControlFlow::Break(())
        }
    }

    #[test]
    fn walk_node_stops_on_break() {
        let tree = sample_tree();
        let mut finder = FirstText { found: None };

        let result = walk_node(&mut finder, &tree);

        assert!(result.is_break());
        assert_eq!(finder.found, Some("Title"));
    }

    #[test]
    fn walk_children_visits_slice_in_order() {
        let children = vec![Node::text("a"), Node::thematic_break(), Node::text("b")];
        let mut counter = NodeCounter::default();

        walk_children(&mut counter, &children);

        assert_eq!(counter.total, 3);
        assert_eq!(counter.events[2], format!("enter {}", NodeKind::ThematicBreak));
    }

    #[test]
    fn walk_children_of_empty_slice_continues() {
        let mut counter = NodeCounter::default();
        assert!(walk_children(&mut counter, &[]).is_continue());
        assert_eq!(counter.total, 0);
    }
}
