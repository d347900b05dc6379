//! The node sum type
//!
//!     [Node] wraps every element so the compiler can keep open nodes of different kinds on one
//!     stack. It serializes as an object tagged with `"type"`, the element fields inlined.

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use super::{Break, Heading, Link, List, ListItem, Pre, Quote, Root, Text};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Root(Root),
    Heading(Heading),
    Link(Link),
    List(List),
    ListItem(ListItem),
    Pre(Pre),
    Quote(Quote),
    Text(Text),
    Break(Break),
}

impl Node {
    fn as_ast_node(&self) -> &dyn AstNode {
        match self {
            Node::Root(n) => n,
            Node::Heading(n) => n,
            Node::Link(n) => n,
            Node::List(n) => n,
            Node::ListItem(n) => n,
            Node::Pre(n) => n,
            Node::Quote(n) => n,
            Node::Text(n) => n,
            Node::Break(n) => n,
        }
    }

    pub fn location_mut(&mut self) -> &mut Range {
        match self {
            Node::Root(n) => &mut n.location,
            Node::Heading(n) => &mut n.location,
            Node::Link(n) => &mut n.location,
            Node::List(n) => &mut n.location,
            Node::ListItem(n) => &mut n.location,
            Node::Pre(n) => &mut n.location,
            Node::Quote(n) => &mut n.location,
            Node::Text(n) => &mut n.location,
            Node::Break(n) => &mut n.location,
        }
    }

    /// Take `child` as the last child of this node.
    ///
    /// Only Root and List hold children: Root takes anything but another Root, List takes
    /// only ListItems. A refused child is handed back unchanged.
    pub fn adopt(&mut self, child: Node) -> Result<(), Node> {
        match self {
            Node::Root(root) => match child {
                Node::Root(_) => Err(child),
                child => {
                    root.children.push(child);
                    Ok(())
                }
            },
            Node::List(list) => match child {
                Node::ListItem(item) => {
                    list.items.push(item);
                    Ok(())
                }
                other => Err(other),
            },
            _ => Err(child),
        }
    }
}

impl AstNode for Node {
    fn node_type(&self) -> &'static str {
        self.as_ast_node().node_type()
    }
    fn display_label(&self) -> String {
        self.as_ast_node().display_label()
    }
    fn range(&self) -> &Range {
        self.as_ast_node().range()
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        self.as_ast_node().accept(visitor)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.node_type(), self.display_label())
    }
}
