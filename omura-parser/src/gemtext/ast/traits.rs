//! AST traits - Common interfaces for uniform node access

use super::elements::{Break, Heading, Link, List, ListItem, Pre, Quote, Root, Text};
use super::range::Range;

/// Visitor trait for traversing the AST
///
/// Each visit method corresponds to a node type. Default implementations are empty, so you
/// only need to override the methods you care about. Containers get a matching `leave_*`
/// call after their children.
pub trait Visitor {
    fn visit_root(&mut self, _root: &Root) {}
    fn leave_root(&mut self, _root: &Root) {}

    fn visit_list(&mut self, _list: &List) {}
    fn leave_list(&mut self, _list: &List) {}

    fn visit_list_item(&mut self, _item: &ListItem) {}
    fn visit_heading(&mut self, _heading: &Heading) {}
    fn visit_link(&mut self, _link: &Link) {}
    fn visit_pre(&mut self, _pre: &Pre) {}
    fn visit_quote(&mut self, _quote: &Quote) {}
    fn visit_text(&mut self, _text: &Text) {}
    fn visit_break(&mut self, _brk: &Break) {}
}

/// Common interface for all AST nodes
pub trait AstNode {
    fn node_type(&self) -> &'static str;
    fn display_label(&self) -> String;
    fn range(&self) -> &Range;

    /// Accept a visitor for traversing this node and its children
    fn accept(&self, visitor: &mut dyn Visitor);
}
