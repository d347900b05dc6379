//! Gemtext parsing: tokens, lexer, AST, compiler and output formats

pub mod ast;
pub mod building;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod testing;
pub mod token;
