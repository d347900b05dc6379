//! Fluent assertion API for AST nodes
//!
//! Every assertion carries a context path (`root:children[2]:items[0]`) that is printed when
//! it fails, so a failure names the node it was looking at.

use crate::gemtext::ast::traits::AstNode;
use crate::gemtext::ast::{Heading, Link, List, ListItem, Node, Pre, Quote, Root, Text};

/// Create an assertion builder for a document
pub fn assert_ast(root: &Root) -> RootAssertion<'_> {
    RootAssertion { root }
}

fn summarize(children: &[Node]) -> String {
    children
        .iter()
        .map(|child| child.node_type())
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct RootAssertion<'a> {
    root: &'a Root,
}

impl<'a> RootAssertion<'a> {
    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.root.children.len();
        assert_eq!(
            actual,
            expected,
            "root: Expected {} children, found {} children: [{}]",
            expected,
            actual,
            summarize(&self.root.children)
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        assert!(
            index < self.root.children.len(),
            "root: Child index {} out of bounds (root has {} children: [{}])",
            index,
            self.root.children.len(),
            summarize(&self.root.children)
        );
        assertion(NodeAssertion {
            node: &self.root.children[index],
            context: format!("root:children[{}]", index),
        });
        self
    }

    /// Assert the node types of all children, in order.
    pub fn kinds(self, expected: &[&str]) -> Self {
        let actual: Vec<_> = self.root.children.iter().map(|c| c.node_type()).collect();
        assert_eq!(actual, expected, "root: child kinds differ");
        self
    }
}

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

macro_rules! expect_variant {
    ($self:ident, $variant:ident, $assertion:ident) => {
        match $self.node {
            Node::$variant(node) => $assertion {
                node,
                context: $self.context,
            },
            other => panic!(
                "{}: Expected {}, found {}",
                $self.context,
                stringify!($variant),
                other.node_type()
            ),
        }
    };
}

impl<'a> NodeAssertion<'a> {
    pub fn assert_heading(self) -> HeadingAssertion<'a> {
        expect_variant!(self, Heading, HeadingAssertion)
    }
    pub fn assert_link(self) -> LinkAssertion<'a> {
        expect_variant!(self, Link, LinkAssertion)
    }
    pub fn assert_list(self) -> ListAssertion<'a> {
        expect_variant!(self, List, ListAssertion)
    }
    pub fn assert_pre(self) -> PreAssertion<'a> {
        expect_variant!(self, Pre, PreAssertion)
    }
    pub fn assert_quote(self) -> QuoteAssertion<'a> {
        expect_variant!(self, Quote, QuoteAssertion)
    }
    pub fn assert_text(self) -> TextAssertion<'a> {
        expect_variant!(self, Text, TextAssertion)
    }
    pub fn assert_break(self) {
        assert!(
            matches!(self.node, Node::Break(_)),
            "{}: Expected Break, found {}",
            self.context,
            self.node.node_type()
        );
    }
}

fn check_text(context: &str, field: &str, actual: &str, expected: &str) {
    assert_eq!(
        actual, expected,
        "{}: Expected {} {:?}, found {:?}",
        context, field, expected, actual
    );
}

pub struct HeadingAssertion<'a> {
    node: &'a Heading,
    context: String,
}

impl HeadingAssertion<'_> {
    pub fn rank(self, expected: u8) -> Self {
        assert_eq!(
            self.node.rank, expected,
            "{}: Expected heading rank {}, found {}",
            self.context, expected, self.node.rank
        );
        self
    }
    pub fn text(self, expected: &str) -> Self {
        check_text(&self.context, "heading text", &self.node.text, expected);
        self
    }
}

pub struct LinkAssertion<'a> {
    node: &'a Link,
    context: String,
}

impl LinkAssertion<'_> {
    pub fn url(self, expected: &str) -> Self {
        assert_eq!(
            self.node.url.as_deref(),
            Some(expected),
            "{}: Expected link url {:?}",
            self.context,
            expected
        );
        self
    }
    pub fn no_url(self) -> Self {
        assert!(
            self.node.url.is_none(),
            "{}: Expected link without url, found {:?}",
            self.context,
            self.node.url
        );
        self
    }
    pub fn text(self, expected: &str) -> Self {
        check_text(&self.context, "link text", &self.node.text, expected);
        self
    }
}

pub struct ListAssertion<'a> {
    node: &'a List,
    context: String,
}

impl<'a> ListAssertion<'a> {
    pub fn item_count(self, expected: usize) -> Self {
        let actual = self.node.items.len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} list items, found {} list items",
            self.context, expected, actual
        );
        self
    }
    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ListItemAssertion<'a>),
    {
        assert!(
            index < self.node.items.len(),
            "{}: Item index {} out of bounds (list has {} items)",
            self.context,
            index,
            self.node.items.len()
        );
        assertion(ListItemAssertion {
            node: &self.node.items[index],
            context: format!("{}:items[{}]", self.context, index),
        });
        self
    }
    /// Assert the text of every item, in order.
    pub fn item_texts(self, expected: &[&str]) -> Self {
        let actual: Vec<_> = self.node.items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(actual, expected, "{}: list item texts differ", self.context);
        self
    }
}

pub struct ListItemAssertion<'a> {
    node: &'a ListItem,
    context: String,
}

impl ListItemAssertion<'_> {
    pub fn text(self, expected: &str) -> Self {
        check_text(&self.context, "item text", &self.node.text, expected);
        self
    }
}

pub struct PreAssertion<'a> {
    node: &'a Pre,
    context: String,
}

impl PreAssertion<'_> {
    pub fn alt(self, expected: Option<&str>) -> Self {
        assert_eq!(
            self.node.alt.as_deref(),
            expected,
            "{}: Expected pre alt {:?}, found {:?}",
            self.context,
            expected,
            self.node.alt
        );
        self
    }
    pub fn text(self, expected: &str) -> Self {
        check_text(&self.context, "pre text", &self.node.text, expected);
        self
    }
}

pub struct QuoteAssertion<'a> {
    node: &'a Quote,
    context: String,
}

impl QuoteAssertion<'_> {
    pub fn text(self, expected: &str) -> Self {
        check_text(&self.context, "quote text", &self.node.text, expected);
        self
    }
}

pub struct TextAssertion<'a> {
    node: &'a Text,
    context: String,
}

impl TextAssertion<'_> {
    pub fn value(self, expected: &str) -> Self {
        check_text(&self.context, "text value", &self.node.value, expected);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemtext::loader::DocumentLoader;

    #[test]
    fn test_chained_assertions() {
        let root = DocumentLoader::from_string("## Two\n* a\n* b\n").parse();
        assert_ast(&root)
            .child_count(2)
            .child(0, |c| {
                c.assert_heading().rank(2).text("Two");
            })
            .child(1, |c| {
                c.assert_list()
                    .item_count(2)
                    .item(1, |i| {
                        i.text("b");
                    });
            });
    }

    #[test]
    #[should_panic(expected = "root:children[0]: Expected Link, found Heading")]
    fn test_wrong_kind_names_context() {
        let root = DocumentLoader::from_string("# x\n").parse();
        assert_ast(&root).child(0, |c| {
            c.assert_link();
        });
    }
}
