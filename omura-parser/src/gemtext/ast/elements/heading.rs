//! Heading element
//!
//! A line starting with one to three `#`. The rank is the number of `#` characters, the text
//! is the rest of the line after optional whitespace (empty for a bare marker).

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub rank: u8,
    pub text: String,
    pub location: Range,
}

impl Heading {
    pub fn new(rank: u8, text: impl Into<String>) -> Self {
        Self {
            rank,
            text: text.into(),
            location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }
}

impl AstNode for Heading {
    fn node_type(&self) -> &'static str {
        "Heading"
    }
    fn display_label(&self) -> String {
        format!("{} {}", "#".repeat(self.rank as usize), self.text)
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_heading(self);
    }
}
