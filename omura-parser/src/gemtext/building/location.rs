//! Location utilities for AST node building
//!
//! Nodes take their locations from the tokens they were built from: a node starts where its
//! opening token starts and ends where its closing token ends. Containers grow as children
//! are attached, so a parent's location always encloses its children.

use crate::gemtext::ast::traits::{AstNode, Visitor};
use crate::gemtext::ast::{Break, Heading, Link, List, ListItem, Pre, Quote, Range, Root, Text};

/// The range from the start of `open` to the end of `close`.
pub fn between(open: &Range, close: &Range) -> Range {
    Range::new(open.span.start..close.span.end, open.start, close.end)
}

/// Extend `parent` so that it ends no earlier than `child`.
pub fn grow_to_cover(parent: &mut Range, child: &Range) {
    if child.span.end > parent.span.end {
        parent.extend_to(child);
    }
}

/// Walks a tree keeping the ranges of the open containers, and records every node that
/// sticks out of its innermost container.
#[derive(Debug, Default)]
struct EnclosureCheck {
    containers: Vec<(&'static str, Range)>,
    problems: Vec<String>,
}

impl EnclosureCheck {
    fn check(&mut self, node: &dyn AstNode) {
        let Some((kind, parent)) = self.containers.last() else {
            return;
        };
        if !parent.encloses(node.range()) {
            self.problems.push(format!(
                "{}({}) @ {} outside {} @ {}",
                node.node_type(),
                node.display_label(),
                node.range(),
                kind,
                parent
            ));
        }
    }
}

impl Visitor for EnclosureCheck {
    fn visit_root(&mut self, root: &Root) {
        self.containers.push(("Root", root.location.clone()));
    }
    fn leave_root(&mut self, _root: &Root) {
        self.containers.pop();
    }
    fn visit_list(&mut self, list: &List) {
        self.check(list);
        self.containers.push(("List", list.location.clone()));
    }
    fn leave_list(&mut self, _list: &List) {
        self.containers.pop();
    }
    fn visit_list_item(&mut self, item: &ListItem) {
        self.check(item);
    }
    fn visit_heading(&mut self, heading: &Heading) {
        self.check(heading);
    }
    fn visit_link(&mut self, link: &Link) {
        self.check(link);
    }
    fn visit_pre(&mut self, pre: &Pre) {
        self.check(pre);
    }
    fn visit_quote(&mut self, quote: &Quote) {
        self.check(quote);
    }
    fn visit_text(&mut self, text: &Text) {
        self.check(text);
    }
    fn visit_break(&mut self, brk: &Break) {
        self.check(brk);
    }
}

/// Describe every node whose location is not enclosed by its parent's.
///
/// An empty result means the tree is consistent.
pub fn unenclosed_nodes(root: &Root) -> Vec<String> {
    let mut check = EnclosureCheck::default();
    root.accept(&mut check);
    check.problems
}
