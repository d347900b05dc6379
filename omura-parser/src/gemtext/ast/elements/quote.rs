//! Quote element

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use serde::Serialize;

/// A `>` line. The text is the rest of the line after optional whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: String,
    pub location: Range,
}

impl Quote {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }
}

impl AstNode for Quote {
    fn node_type(&self) -> &'static str {
        "Quote"
    }
    fn display_label(&self) -> String {
        self.text.clone()
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_quote(self);
    }
}
