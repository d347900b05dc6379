//! # omura-parser
//!
//! A parser for gemtext, the line-oriented markup served over the Gemini protocol.
//!
//! Parsing runs in two stages:
//!
//! - the lexer ([gemtext::lexing]) splits raw text into tokens with exact source positions,
//!   one line at a time, accepting input in arbitrary chunks;
//! - the compiler ([gemtext::building]) folds the tokens into a [Root] document whose nodes
//!   each carry the location of the source they came from.
//!
//! Neither stage can fail: every byte sequence is some gemtext document.
//!
//! For testing guidelines, see the [testing module](gemtext::testing).

pub mod gemtext;

pub use gemtext::ast::{Node, Root};
pub use gemtext::lexing::{tokenize, Lexer};
pub use gemtext::token::{Token, TokenKind};

/// Parse a complete gemtext source into a document.
pub fn parse_document(source: &str) -> Root {
    gemtext::building::compile(&tokenize(source))
}
