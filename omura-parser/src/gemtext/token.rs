//! Core token types and helpers shared across the lexer, the compiler, and tooling.

pub mod core;
pub mod formatting;

pub use core::{Token, TokenKind};
pub use formatting::detokenize;
