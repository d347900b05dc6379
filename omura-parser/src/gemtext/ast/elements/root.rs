//! Root element
//!
//! The document node. Its children are the line-level nodes in source order, and its
//! location runs from the first token to the last.

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use super::{Link, Node};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Root {
    pub children: Vec<Node>,
    pub location: Range,
}

impl Root {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            children,
            location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }

    /// Links in document order.
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.children.iter().filter_map(|child| match child {
            Node::Link(link) => Some(link),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl AstNode for Root {
    fn node_type(&self) -> &'static str {
        "Root"
    }
    fn display_label(&self) -> String {
        format!("{} nodes", self.children.len())
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_root(self);
        for child in &self.children {
            child.accept(visitor);
        }
        visitor.leave_root(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemtext::ast::Text;

    #[test]
    fn test_links_skips_other_nodes() {
        let root = Root::new(vec![
            Node::Link(Link::new(Some("gemini://a.example/".into()), "A")),
            Node::Text(Text::new("between")),
            Node::Link(Link::new(Some("/b".into()), "")),
        ]);
        let urls: Vec<_> = root.links().filter_map(|l| l.url.as_deref()).collect();
        assert_eq!(urls, vec!["gemini://a.example/", "/b"]);
    }
}
