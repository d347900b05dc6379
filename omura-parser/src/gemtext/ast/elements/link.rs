//! Link element
//!
//! A `=>` line. The url is the first run of non-whitespace after the arrow; it is missing on
//! a bare `=>` line. The text is what follows the url, and is only ever set when a url is.
//! Urls are kept exactly as written: resolving relative references is up to the client.

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub url: Option<String>,
    pub text: String,
    pub location: Range,
}

impl Link {
    pub fn new(url: Option<String>, text: impl Into<String>) -> Self {
        Self {
            url,
            text: text.into(),
            location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }

    /// What a reader should see: the text, or the url when there is no text.
    pub fn label(&self) -> &str {
        if self.text.is_empty() {
            self.url.as_deref().unwrap_or("")
        } else {
            &self.text
        }
    }
}

impl AstNode for Link {
    fn node_type(&self) -> &'static str {
        "Link"
    }
    fn display_label(&self) -> String {
        match &self.url {
            Some(url) if !self.text.is_empty() => format!("{} {}", url, self.text),
            Some(url) => url.clone(),
            None => String::new(),
        }
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_link(self);
    }
}
