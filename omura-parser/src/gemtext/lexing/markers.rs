//! Line markers
//!
//!     Gemtext decides what a line is from its first characters only. The marker lexer is run
//!     on a single line and only its first token is ever used: either the line starts with a
//!     marker, or logos reports an error and the line is plain text.
//!
//!     Heading markers are capped at three `#`. A line like `#### x` lexes as a `###` marker
//!     followed by the heading text `# x`.
use logos::Logos;

/// The line-start markers of gemtext.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    #[token("```")]
    Fence,

    #[regex(r"#{1,3}")]
    Heading,

    #[token("*")]
    ListBullet,

    #[token("=>")]
    LinkArrow,

    #[token(">")]
    QuoteMarker,
}

/// Identify the marker a line starts with, returning it with its byte length.
pub fn line_marker(line: &str) -> Option<(Marker, usize)> {
    let mut lexer = Marker::lexer(line);
    match lexer.next() {
        Some(Ok(marker)) if lexer.span().start == 0 => Some((marker, lexer.span().end)),
        _ => None,
    }
}

/// Gemtext separators are spaces and tabs only.
pub fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Byte length of the run of spaces and tabs at the start of `text`.
pub fn leading_blank_len(text: &str) -> usize {
    text.len() - text.trim_start_matches(is_blank).len()
}
