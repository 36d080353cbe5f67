//! Kind-filtered traversal with mutable access.

use crate::{Node, NodeKind};

/// Calls `callback` with mutable access to every node of `kind` in `tree`.
///
/// Traversal is pre-order. The callback runs before the node's children
/// are visited, so children it inserts are visited and children it removes
/// are not.
///
/// ```rust
/// use tsumugi_ast::{Node, NodeKind, visit_mut};
///
/// let mut tree = Node::root(vec![Node::heading(1, vec![Node::text("hi")])]);
/// visit_mut(&mut tree, NodeKind::Text, |node| {
///     if let Some(value) = node.value_mut() {
///         value.make_ascii_uppercase();
///     }
/// });
/// assert_eq!(tree.to_text(), "HI");
/// ```
pub fn visit_mut<F>(tree: &mut Node, kind: NodeKind, mut callback: F)
where
    F: FnMut(&mut Node),
{
    walk_mut(tree, kind, &mut callback);
}

fn walk_mut<F>(node: &mut Node, kind: NodeKind, callback: &mut F)
where
    F: FnMut(&mut Node),
{
    if node.kind() == kind {
        callback(node);
    }
    if let Some(children) = node.children_mut() {
        for child in children.iter_mut() {
            walk_mut(child, kind, callback);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rewrites_every_matching_literal() {
        let mut tree = Node::root(vec![
            Node::paragraph(vec![Node::text("a"), Node::inline_code("b")]),
            Node::blockquote(vec![Node::paragraph(vec![Node::text("c")])]),
        ]);

        visit_mut(&mut tree, NodeKind::Text, |node| {
            if let Some(value) = node.value_mut() {
                value.push('!');
            }
        });

        assert_eq!(tree.to_text(), "a!bc!");
    }

    #[test]
    fn children_added_by_callback_are_visited() {
        let mut tree = Node::root(vec![Node::paragraph(vec![])]);
        let mut seen = 0;

        visit_mut(&mut tree, NodeKind::Paragraph, |node| {
            if let Some(children) = node.children_mut() {
                children.push(Node::emphasis(vec![Node::text("x")]));
            }
        });
        visit_mut(&mut tree, NodeKind::Text, |_| seen += 1);

        assert_eq!(seen, 1);
    }

    #[test]
    fn children_removed_by_callback_are_not_visited() {
        let mut tree = Node::root(vec![
            Node::blockquote(vec![Node::paragraph(vec![Node::text("gone")])]),
            Node::paragraph(vec![Node::text("kept")]),
        ]);
        let mut seen = Vec::new();

        visit_mut(&mut tree, NodeKind::Blockquote, |node| {
            if let Some(children) = node.children_mut() {
                children.clear();
            }
        });
        visit_mut(&mut tree, NodeKind::Text, |node| seen.push(node.to_text()));

        assert_eq!(seen, vec!["kept"]);
    }

    #[test]
    fn replacing_a_matched_node() {
        let mut tree = Node::root(vec![Node::thematic_break(), Node::text("t")]);

        visit_mut(&mut tree, NodeKind::ThematicBreak, |node| {
            *node = Node::html("<hr>");
        });

        let kinds: Vec<_> = tree
            .children()
            .unwrap_or_default()
            .iter()
            .map(Node::kind)
            .collect();
        assert_eq!(kinds, vec![NodeKind::Html, NodeKind::Text]);
    }

    #[test]
    fn no_match_leaves_tree_unchanged() {
        let original = Node::root(vec![Node::paragraph(vec![Node::text("same")])]);
        let mut tree = original.clone();

        visit_mut(&mut tree, NodeKind::Code, |node| *node = Node::text("changed"));

        assert_eq!(tree, original);
    }
}
