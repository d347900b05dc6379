//! Token definitions for gemtext
//!
//!     A token is a slice of one source line together with what that slice means. The lexer
//!     never merges lines, so every token value is either a part of a single line, a line
//!     terminator (`Eol`), or the empty end-of-file marker (`Eof`).
//!
//!     Kind-specific data lives on the kind itself: only `Eol` carries the `hard` flag, which
//!     tells an intentional blank line (a paragraph break) apart from an ordinary line end.
//!
//! Token Kinds By Line Type
//!
//!         fence line:   PreSequence PreAlt?
//!         heading line: HeadingSequence Whitespace? HeadingText?
//!         list line:    ListSequence Whitespace? ListText?
//!         link line:    LinkSequence Whitespace? LinkUrl? Whitespace? LinkText?
//!         quote line:   QuoteSequence Whitespace? QuoteText?
//!         other line:   Text (or PreText inside a preformatted block)
//!
//!     Each line is followed by `Eol`; the stream always ends with `Eof`.

use crate::gemtext::ast::Range;
use serde::Serialize;
use std::fmt;

/// The kind of a token, with the fields that only that kind needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TokenKind {
    Whitespace,
    Eof,
    Eol { hard: bool },
    PreSequence,
    PreAlt,
    PreText,
    HeadingSequence,
    HeadingText,
    ListSequence,
    ListText,
    LinkSequence,
    LinkUrl,
    LinkText,
    QuoteSequence,
    QuoteText,
    Text,
}

impl TokenKind {
    /// The camelCase name used in serialized token streams.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Eof => "eof",
            TokenKind::Eol { .. } => "eol",
            TokenKind::PreSequence => "preSequence",
            TokenKind::PreAlt => "preAlt",
            TokenKind::PreText => "preText",
            TokenKind::HeadingSequence => "headingSequence",
            TokenKind::HeadingText => "headingText",
            TokenKind::ListSequence => "listSequence",
            TokenKind::ListText => "listText",
            TokenKind::LinkSequence => "linkSequence",
            TokenKind::LinkUrl => "linkUrl",
            TokenKind::LinkText => "linkText",
            TokenKind::QuoteSequence => "quoteSequence",
            TokenKind::QuoteText => "quoteText",
            TokenKind::Text => "text",
        }
    }

    pub fn is_eol(&self) -> bool {
        matches!(self, TokenKind::Eol { .. })
    }

    /// True for an end of line that terminated an empty, non-preformatted line.
    pub fn is_hard_eol(&self) -> bool {
        matches!(self, TokenKind::Eol { hard: true })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Eol { hard: true } => write!(f, "eol(hard)"),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// A token: its kind, the literal source text it covers, and where that text is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(flatten)]
    pub kind: TokenKind,
    pub value: String,
    pub location: Range,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, location: Range) -> Self {
        Self {
            kind,
            value: value.into(),
            location,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?} @ {}", self.kind, self.value, self.location)
    }
}
