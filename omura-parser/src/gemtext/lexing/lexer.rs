//! Streaming gemtext lexer
//!
//!     The lexer accepts input in arbitrary byte chunks. Complete lines (terminated by LF) are
//!     tokenized as soon as they arrive; a trailing fragment without LF is kept until more
//!     input or the end signal. Line boundaries therefore never depend on how the input was
//!     chunked.
//!
//! Cursor
//!
//!     The cursor advances by exactly the byte length of each token value. A value ending in
//!     LF moves to the next line and resets the column to 1. Columns and offsets count bytes.
//!
//! Preformatted Mode
//!
//!     A fence line toggles preformatted mode. While it is on, every line except another fence
//!     is a single `PreText` token, whatever it starts with, and empty lines produce soft line
//!     ends instead of hard ones.
//!
//! Line Terminators
//!
//!     A CR directly before the LF belongs to the `Eol` token (`"\r\n"`), not to the line
//!     content, so CRLF documents produce the same content tokens as LF documents.

use super::markers::{is_blank, leading_blank_len, line_marker, Marker};
use crate::gemtext::ast::{Position, Range};
use crate::gemtext::token::{Token, TokenKind};

const FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    line: usize,
    column: usize,
    offset: usize,
}

impl Cursor {
    fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn advance(&mut self, value: &str) {
        self.offset += value.len();
        if value.ends_with('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += value.len();
        }
    }
}

/// Incremental gemtext tokenizer.
#[derive(Debug)]
pub struct Lexer {
    pending: Vec<u8>,
    cursor: Cursor,
    preformatted: bool,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            cursor: Cursor::new(),
            preformatted: false,
            tokens: Vec::new(),
        }
    }

    /// Feed the next chunk of input. Every complete line in it is tokenized immediately.
    pub fn feed(&mut self, chunk: impl AsRef<[u8]>) {
        let mut rest = chunk.as_ref();
        while let Some(newline) = rest.iter().position(|&b| b == b'\n') {
            self.pending.extend_from_slice(&rest[..newline]);
            let line = std::mem::take(&mut self.pending);
            self.lex_line(&line, true);
            rest = &rest[newline + 1..];
        }
        self.pending.extend_from_slice(rest);
    }

    /// Signal the end of input: lex the unterminated fragment, if any, and append `Eof`.
    pub fn finish(mut self) -> Vec<Token> {
        let fragment = std::mem::take(&mut self.pending);
        if !fragment.is_empty() {
            self.lex_line(&fragment, false);
        }
        self.push(TokenKind::Eof, "");
        self.tokens
    }

    pub fn is_preformatted(&self) -> bool {
        self.preformatted
    }

    fn lex_line(&mut self, raw: &[u8], terminated: bool) {
        let (content, terminator) = match raw.strip_suffix(b"\r") {
            Some(content) if terminated => (content, "\r\n"),
            _ => (raw, "\n"),
        };
        let line = String::from_utf8_lossy(content);

        if !line.is_empty() {
            self.lex_content(&line);
        }
        if terminated {
            let hard = line.is_empty() && !self.preformatted;
            self.push(TokenKind::Eol { hard }, terminator);
        }
    }

    fn lex_content(&mut self, line: &str) {
        if self.preformatted && !line.starts_with(FENCE) {
            self.push(TokenKind::PreText, line);
            return;
        }

        match line_marker(line) {
            Some((Marker::Fence, len)) => {
                self.push(TokenKind::PreSequence, &line[..len]);
                if line.len() > len {
                    self.push(TokenKind::PreAlt, &line[len..]);
                }
                self.preformatted = !self.preformatted;
            }
            Some((Marker::Heading, len)) => {
                self.push(TokenKind::HeadingSequence, &line[..len]);
                self.lex_remainder(&line[len..], TokenKind::HeadingText);
            }
            Some((Marker::ListBullet, len)) => {
                self.push(TokenKind::ListSequence, &line[..len]);
                self.lex_remainder(&line[len..], TokenKind::ListText);
            }
            Some((Marker::LinkArrow, len)) => {
                self.push(TokenKind::LinkSequence, &line[..len]);
                self.lex_link(&line[len..]);
            }
            Some((Marker::QuoteMarker, len)) => {
                self.push(TokenKind::QuoteSequence, &line[..len]);
                self.lex_remainder(&line[len..], TokenKind::QuoteText);
            }
            None => self.push(TokenKind::Text, line),
        }
    }

    /// Optional whitespace, then the rest of the line as a single `kind` token.
    fn lex_remainder(&mut self, rest: &str, kind: TokenKind) {
        let rest = self.lex_whitespace(rest);
        if !rest.is_empty() {
            self.push(kind, rest);
        }
    }

    fn lex_link(&mut self, rest: &str) {
        let rest = self.lex_whitespace(rest);
        let url_len = rest.find(is_blank).unwrap_or(rest.len());
        if url_len > 0 {
            self.push(TokenKind::LinkUrl, &rest[..url_len]);
        }
        self.lex_remainder(&rest[url_len..], TokenKind::LinkText);
    }

    /// Emit a whitespace token for leading blanks, returning what follows them.
    fn lex_whitespace<'a>(&mut self, text: &'a str) -> &'a str {
        let len = leading_blank_len(text);
        if len > 0 {
            self.push(TokenKind::Whitespace, &text[..len]);
        }
        &text[len..]
    }

    fn push(&mut self, kind: TokenKind, value: &str) {
        let start = self.cursor;
        self.cursor.advance(value);
        let location = Range::new(
            start.offset..self.cursor.offset,
            start.position(),
            self.cursor.position(),
        );
        self.tokens.push(Token::new(kind, value, location));
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokenize a complete source in one call.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new();
    lexer.feed(source);
    lexer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .into_iter()
            .map(|token| (token.kind, token.value))
            .collect()
    }

    fn tk(kind: TokenKind, value: &str) -> (TokenKind, String) {
        (kind, value.to_string())
    }

    const SOFT: TokenKind = TokenKind::Eol { hard: false };
    const HARD: TokenKind = TokenKind::Eol { hard: true };

    #[test]
    fn test_heading_line() {
        assert_eq!(
            kinds("## Section two\n"),
            vec![
                tk(TokenKind::HeadingSequence, "##"),
                tk(TokenKind::Whitespace, " "),
                tk(TokenKind::HeadingText, "Section two"),
                tk(SOFT, "\n"),
                tk(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_link_line_with_tab_separator() {
        assert_eq!(
            kinds("=>gemini://x.example/ \tAn example link\n"),
            vec![
                tk(TokenKind::LinkSequence, "=>"),
                tk(TokenKind::LinkUrl, "gemini://x.example/"),
                tk(TokenKind::Whitespace, " \t"),
                tk(TokenKind::LinkText, "An example link"),
                tk(SOFT, "\n"),
                tk(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_bare_link_sequence() {
        assert_eq!(
            kinds("=>  "),
            vec![
                tk(TokenKind::LinkSequence, "=>"),
                tk(TokenKind::Whitespace, "  "),
                tk(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_blank_line_is_hard_break() {
        assert_eq!(
            kinds("a\n\nb"),
            vec![
                tk(TokenKind::Text, "a"),
                tk(SOFT, "\n"),
                tk(HARD, "\n"),
                tk(TokenKind::Text, "b"),
                tk(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_preformatted_lines_are_not_classified() {
        assert_eq!(
            kinds("```sh\n# not a heading\n\n```\n"),
            vec![
                tk(TokenKind::PreSequence, "```"),
                tk(TokenKind::PreAlt, "sh"),
                tk(SOFT, "\n"),
                tk(TokenKind::PreText, "# not a heading"),
                tk(SOFT, "\n"),
                tk(SOFT, "\n"),
                tk(TokenKind::PreSequence, "```"),
                tk(SOFT, "\n"),
                tk(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_crlf_terminator_belongs_to_eol() {
        assert_eq!(
            kinds("> quoted\r\n\r\n"),
            vec![
                tk(TokenKind::QuoteSequence, ">"),
                tk(TokenKind::Whitespace, " "),
                tk(TokenKind::QuoteText, "quoted"),
                tk(SOFT, "\r\n"),
                tk(HARD, "\r\n"),
                tk(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_chunking_does_not_change_tokens() {
        let source = "# Title\n* one\n=> gemini://a.example/ A\n```\ncode\n```\n";
        let whole = tokenize(source);

        let mut lexer = Lexer::new();
        for chunk in source.as_bytes().chunks(3) {
            lexer.feed(chunk);
        }
        assert_eq!(lexer.finish(), whole);
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        let source = "* café\n";
        let bytes = source.as_bytes();
        let mut lexer = Lexer::new();
        lexer.feed(&bytes[..5]);
        lexer.feed(&bytes[5..]);
        let tokens = lexer.finish();
        assert_eq!(tokens[2].value, "café");
        assert_eq!(tokens[2].location.span, 2..7);
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("# Hi\nx");
        let spans: Vec<_> = tokens
            .iter()
            .map(|t| (t.location.start, t.location.end, t.location.span.clone()))
            .collect();
        assert_eq!(
            spans,
            vec![
                (Position::new(1, 1), Position::new(1, 2), 0..1),
                (Position::new(1, 2), Position::new(1, 3), 1..2),
                (Position::new(1, 3), Position::new(1, 5), 2..4),
                (Position::new(1, 5), Position::new(2, 1), 4..5),
                (Position::new(2, 1), Position::new(2, 2), 5..6),
                (Position::new(2, 2), Position::new(2, 2), 6..6),
            ]
        );
    }

    #[test]
    fn test_unterminated_fence_leaves_mode_on() {
        let mut lexer = Lexer::new();
        lexer.feed("```\nstill code\n");
        assert!(lexer.is_preformatted());
        let tokens = lexer.finish();
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_empty_input_is_only_eof() {
        assert_eq!(kinds(""), vec![tk(TokenKind::Eof, "")]);
    }
}
