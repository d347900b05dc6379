//! AST building
//!
//!     Turns the lexer's flat token stream into a document tree. Building never fails: every
//!     token stream, including an empty one, compiles to a Root.
//!
//!     The [compiler] walks the tokens once, keeping open containers on an explicit stack;
//!     [location] holds the range helpers it uses to give every node its source location.

pub mod compiler;
pub mod location;

pub use compiler::Compiler;

use crate::gemtext::ast::Root;
use crate::gemtext::token::Token;

/// Compile a token stream into a document.
pub fn compile(tokens: &[Token]) -> Root {
    Compiler::new(tokens).compile()
}
