//! Content model classification.
//!
//! mdast groups node kinds into content categories (flow, phrasing, static
//! phrasing, ...) and constrains which categories a parent may hold. The
//! tree itself is a single [`Node`] type, so the constraint is checked at
//! runtime with [`Node::check_content_model`].

use thiserror::Error;

use crate::{Node, NodeKind, Position};

/// The kinds of children a parent node accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentModel {
    /// Any content except `root` (the root node's model).
    Any,
    /// Block content, definitions and footnote definitions.
    Flow,
    /// Phrasing content: static phrasing plus links and link references.
    Phrasing,
    /// Phrasing content without links.
    StaticPhrasing,
    /// List items only.
    ListItems,
    /// Table rows only.
    TableRows,
    /// Table cells only.
    TableCells,
    /// No children at all (literal and void nodes).
    Empty,
}

impl ContentModel {
    /// Returns true if a child of `kind` may appear under this model.
    pub const fn allows(&self, kind: NodeKind) -> bool {
        match self {
            ContentModel::Any => !matches!(kind, NodeKind::Root),
            ContentModel::Flow => kind.is_block() || kind.is_definition(),
            ContentModel::Phrasing => kind.is_phrasing(),
            ContentModel::StaticPhrasing => kind.is_static_phrasing(),
            ContentModel::ListItems => matches!(kind, NodeKind::ListItem),
            ContentModel::TableRows => matches!(kind, NodeKind::TableRow),
            ContentModel::TableCells => matches!(kind, NodeKind::TableCell),
            ContentModel::Empty => false,
        }
    }
}

impl NodeKind {
    /// Returns the content model of nodes of this kind.
    pub const fn content_model(&self) -> ContentModel {
        match self {
            NodeKind::Root => ContentModel::Any,
            NodeKind::Blockquote | NodeKind::ListItem | NodeKind::FootnoteDefinition => {
                ContentModel::Flow
            }
            NodeKind::Paragraph
            | NodeKind::Heading
            | NodeKind::TableCell
            | NodeKind::Emphasis
            | NodeKind::Strong
            | NodeKind::Delete
            | NodeKind::Footnote => ContentModel::Phrasing,
            NodeKind::Link | NodeKind::LinkReference => ContentModel::StaticPhrasing,
            NodeKind::List => ContentModel::ListItems,
            NodeKind::Table => ContentModel::TableRows,
            NodeKind::TableRow => ContentModel::TableCells,
            _ => ContentModel::Empty,
        }
    }

    /// Returns true if this kind is block content.
    #[inline]
    pub const fn is_block(&self) -> bool {
        matches!(
            self,
            NodeKind::Paragraph
                | NodeKind::Heading
                | NodeKind::ThematicBreak
                | NodeKind::Blockquote
                | NodeKind::List
                | NodeKind::Table
                | NodeKind::Html
                | NodeKind::Code
        )
    }

    /// Returns true if this kind is definition content.
    #[inline]
    pub const fn is_definition(&self) -> bool {
        matches!(self, NodeKind::Definition | NodeKind::FootnoteDefinition)
    }

    /// Returns true if this kind is frontmatter content.
    #[inline]
    pub const fn is_frontmatter(&self) -> bool {
        matches!(self, NodeKind::Yaml)
    }

    /// Returns true if this kind is static phrasing content.
    #[inline]
    pub const fn is_static_phrasing(&self) -> bool {
        matches!(
            self,
            NodeKind::Text
                | NodeKind::Emphasis
                | NodeKind::Strong
                | NodeKind::Delete
                | NodeKind::Html
                | NodeKind::InlineCode
                | NodeKind::Break
                | NodeKind::Image
                | NodeKind::ImageReference
                | NodeKind::Footnote
                | NodeKind::FootnoteReference
        )
    }

    /// Returns true if this kind is phrasing content.
    #[inline]
    pub const fn is_phrasing(&self) -> bool {
        self.is_static_phrasing() || matches!(self, NodeKind::Link | NodeKind::LinkReference)
    }
}

/// A parent holds a child its content model does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{child} is not allowed in {parent} (content model {model:?})")]
pub struct ContentModelError {
    /// Kind of the offending parent.
    pub parent: NodeKind,
    /// Kind of the offending child.
    pub child: NodeKind,
    /// The parent's content model.
    pub model: ContentModel,
    /// Position of the child, if known.
    pub position: Option<Position>,
}

impl Node {
    /// Checks that every parent in this tree holds only children its
    /// content model allows, and that `root` appears only at the top.
    ///
    /// Returns the first violation in document order.
    pub fn check_content_model(&self) -> Result<(), ContentModelError> {
        let model = self.kind().content_model();
        for child in self.children().unwrap_or_default() {
            if !model.allows(child.kind()) {
                return Err(ContentModelError {
                    parent: self.kind(),
                    child: child.kind(),
                    model,
                    position: child.position().copied(),
                });
            }
            child.check_content_model()?;
        }
        Ok(())
    }

    /// Replaces the children of this node after checking that each one
    /// is allowed by the node's content model.
    ///
    /// Literal and void nodes accept only an empty list. Only the direct
    /// children are checked.
    ///
    /// ```rust
    /// use tsumugi_ast::{Node, NodeKind};
    ///
    /// let heading = Node::heading(2, vec![])
    ///     .try_with_children(vec![Node::text("Title")])
    ///     .unwrap();
    /// assert_eq!(heading.to_text(), "Title");
    ///
    /// let err = Node::list(false, vec![])
    ///     .try_with_children(vec![Node::text("loose")])
    ///     .unwrap_err();
    /// assert_eq!(err.child, NodeKind::Text);
    /// ```
    pub fn try_with_children(mut self, children: Vec<Node>) -> Result<Self, ContentModelError> {
        let parent = self.kind();
        let model = parent.content_model();
        if let Some(child) = children.iter().find(|child| !model.allows(child.kind())) {
            return Err(ContentModelError {
                parent,
                child: child.kind(),
                model,
                position: child.position().copied(),
            });
        }
        if let Some(slot) = self.children_mut() {
            *slot = children;
        }
        Ok(self)
    }

    /// Checks the content model and returns the node on success.
    ///
    /// ```rust
    /// use tsumugi_ast::Node;
    ///
    /// let ok = Node::paragraph(vec![Node::text("hi")]).validated();
    /// assert!(ok.is_ok());
    ///
    /// let err = Node::paragraph(vec![Node::paragraph(vec![])]).validated();
    /// assert!(err.is_err());
    /// ```
    pub fn validated(self) -> Result<Self, ContentModelError> {
        self.check_content_model()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Table, TableCell, TableRow};
    use rstest::rstest;

    #[rstest]
    #[case(NodeKind::Paragraph, ContentModel::Phrasing)]
    #[case(NodeKind::Heading, ContentModel::Phrasing)]
    #[case(NodeKind::Blockquote, ContentModel::Flow)]
    #[case(NodeKind::ListItem, ContentModel::Flow)]
    #[case(NodeKind::Link, ContentModel::StaticPhrasing)]
    #[case(NodeKind::List, ContentModel::ListItems)]
    #[case(NodeKind::Table, ContentModel::TableRows)]
    #[case(NodeKind::TableRow, ContentModel::TableCells)]
    #[case(NodeKind::Text, ContentModel::Empty)]
    #[case(NodeKind::Image, ContentModel::Empty)]
    fn test_content_model(#[case] kind: NodeKind, #[case] expected: ContentModel) {
        assert_eq!(kind.content_model(), expected);
    }

    #[test]
    fn test_phrasing_includes_static_phrasing() {
        for kind in NodeKind::ALL {
            if kind.is_static_phrasing() {
                assert!(kind.is_phrasing(), "{kind} should be phrasing");
            }
        }
        assert!(NodeKind::Link.is_phrasing());
        assert!(!NodeKind::Link.is_static_phrasing());
    }

    #[test]
    fn test_html_is_block_and_phrasing() {
        assert!(NodeKind::Html.is_block());
        assert!(NodeKind::Html.is_phrasing());
    }

    #[test]
    fn test_root_is_never_allowed_as_child() {
        let tree = Node::root(vec![Node::root(vec![])]);
        let err = tree.check_content_model().unwrap_err();

        assert_eq!(err.parent, NodeKind::Root);
        assert_eq!(err.child, NodeKind::Root);
    }

    #[test]
    fn test_valid_document() {
        let tree = Node::root(vec![
            Node::heading(1, vec![Node::text("Title")]),
            Node::blockquote(vec![Node::paragraph(vec![Node::strong(vec![
                Node::text("quoted"),
            ])])]),
            Node::list(
                false,
                vec![Node::list_item(vec![Node::paragraph(vec![Node::link(
                    "https://example.com",
                    vec![Node::text("link")],
                )])])],
            ),
            Table {
                children: vec![
                    TableRow {
                        children: vec![
                            TableCell {
                                children: vec![Node::text("cell")],
                                position: None,
                            }
                            .into(),
                        ],
                        position: None,
                    }
                    .into(),
                ],
                ..Table::default()
            }
            .into(),
        ]);

        assert_eq!(tree.check_content_model(), Ok(()));
    }

    #[test]
    fn test_block_inside_paragraph_is_rejected() {
        let tree = Node::root(vec![Node::paragraph(vec![Node::heading(2, vec![])])]);
        let err = tree.check_content_model().unwrap_err();

        assert_eq!(err.parent, NodeKind::Paragraph);
        assert_eq!(err.child, NodeKind::Heading);
        assert_eq!(err.model, ContentModel::Phrasing);
        assert!(err.to_string().contains("heading is not allowed in paragraph"));
    }

    #[test]
    fn test_link_inside_link_is_rejected() {
        let tree = Node::link(
            "https://a.example",
            vec![Node::link("https://b.example", vec![])],
        );

        assert!(tree.check_content_model().is_err());
    }

    #[test]
    fn test_literal_with_no_children_is_valid() {
        assert!(Node::text("plain").check_content_model().is_ok());
    }

    #[test]
    fn test_try_with_children_keeps_attributes() {
        let node = Node::heading(3, vec![])
            .try_with_children(vec![Node::text("a"), Node::emphasis(vec![])])
            .unwrap();

        match node {
            Node::Heading(heading) => {
                assert_eq!(heading.depth, 3);
                assert_eq!(heading.children.len(), 2);
            }
            other => panic!("Expected Heading, got {}", other.kind()),
        }
    }

    #[test]
    fn test_try_with_children_rejects_children_of_literal() {
        let err = Node::text("leaf")
            .try_with_children(vec![Node::text("child")])
            .unwrap_err();

        assert_eq!(err.parent, NodeKind::Text);
        assert_eq!(err.model, ContentModel::Empty);
        assert!(Node::text("leaf").try_with_children(vec![]).is_ok());
    }

    #[test]
    fn test_list_requires_list_items() {
        let tree = Node::list(false, vec![Node::paragraph(vec![])]);
        let err = tree.validated().unwrap_err();

        assert_eq!(err.model, ContentModel::ListItems);
    }
}
