//! Text and Break elements
//!
//! A text line is any line that no other rule claims, kept verbatim. A break stands for an
//! intentional blank line outside preformatted blocks; ordinary line ends leave no node.

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text {
    pub value: String,
    pub location: Range,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }
}

impl AstNode for Text {
    fn node_type(&self) -> &'static str {
        "Text"
    }
    fn display_label(&self) -> String {
        self.value.clone()
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_text(self);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Break {
    pub location: Range,
}

impl Break {
    pub fn at(location: Range) -> Self {
        Self { location }
    }
}

impl AstNode for Break {
    fn node_type(&self) -> &'static str {
        "Break"
    }
    fn display_label(&self) -> String {
        String::new()
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_break(self);
    }
}
