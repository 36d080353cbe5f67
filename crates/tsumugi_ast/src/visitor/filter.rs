//! Kind-filtered traversal.
//!
//! [`visit`] walks a whole tree in pre-order and hands every node of one
//! kind to a callback. [`visit_with`] lets the callback skip a subtree or
//! stop the traversal.

use std::ops::ControlFlow;

use crate::{Node, NodeKind};

use super::typed::{VisitResult, Visitor};
use super::walk::walk_node;

/// What to do after a matched node was handed to the callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Descend into the node's children and keep going.
    #[default]
    Continue,
    /// Do not descend into this node's children; continue with its siblings.
    Skip,
    /// Stop the traversal.
    Exit,
}

/// Calls `callback` for every node of `kind` in `tree`, in pre-order.
///
/// Every node of the tree is inspected regardless of its content category.
/// A node is passed to the callback before any of its descendants, and
/// never more than once. A tree without matches is not an error.
///
/// ```rust
/// use tsumugi_ast::{Node, NodeKind, visit};
///
/// let tree = Node::root(vec![Node::paragraph(vec![
///     Node::text("a"),
///     Node::strong(vec![Node::text("b")]),
/// ])]);
///
/// let mut values = Vec::new();
/// visit(&tree, NodeKind::Text, |node| values.push(node.to_text()));
/// assert_eq!(values, ["a", "b"]);
/// ```
pub fn visit<'a, F>(tree: &'a Node, kind: NodeKind, mut callback: F)
where
    F: FnMut(&'a Node),
{
    visit_with(tree, kind, |node| {
        callback(node);
        Action::Continue
    });
}

/// Like [`visit`], with the callback choosing how traversal proceeds.
///
/// Returns `false` if the traversal was stopped with [`Action::Exit`].
pub fn visit_with<'a, F>(tree: &'a Node, kind: NodeKind, callback: F) -> bool
where
    F: FnMut(&'a Node) -> Action,
{
    let mut filter = KindFilter { kind, callback };
    filter.visit_node(tree).is_continue()
}

struct KindFilter<F> {
    kind: NodeKind,
    callback: F,
}

impl<'a, F> Visitor<'a> for KindFilter<F>
where
    F: FnMut(&'a Node) -> Action,
{
    fn visit_node(&mut self, node: &'a Node) -> VisitResult {
        if node.kind() == self.kind {
            match (self.callback)(node) {
                Action::Continue => {}
                Action::Skip => return ControlFlow::Continue(()),
                Action::Exit => return ControlFlow::Break(()),
            }
        }
        walk_node(self, node)
    }
}
