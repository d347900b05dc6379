//! Preformatted element
//!
//!     A block between two fence lines. Nothing inside is interpreted: the text is the raw
//!     content lines, each with its own line terminator. The text after the opening fence is
//!     the alt text (often a language name); text after the closing fence is ignored.
//!
//!         ```sh
//!         # not a heading
//!         ```
//!
//!     gives `Pre { alt: Some("sh"), text: "# not a heading\n" }`.
//!
//!     A block without a closing fence runs to the end of the document.

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pre {
    pub alt: Option<String>,
    pub text: String,
    pub location: Range,
}

impl Pre {
    pub fn new(alt: Option<String>, text: impl Into<String>) -> Self {
        Self {
            alt,
            text: text.into(),
            location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }
}

impl AstNode for Pre {
    fn node_type(&self) -> &'static str {
        "Pre"
    }
    fn display_label(&self) -> String {
        match &self.alt {
            Some(alt) => format!("{} ({} lines)", alt, self.text.lines().count()),
            None => format!("{} lines", self.text.lines().count()),
        }
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_pre(self);
    }
}
