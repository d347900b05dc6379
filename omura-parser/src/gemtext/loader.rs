//! Document loading utilities
//!
//! `DocumentLoader` reads gemtext from a string, raw bytes or a file and runs the lexer or
//! the full parse on it. It is used by the CLI and by tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use omura_parser::gemtext::loader::DocumentLoader;
//!
//! let root = DocumentLoader::from_path("capsule/index.gmi")?.parse();
//! let tokens = DocumentLoader::from_string("# Hello\n").tokenize();
//! ```

use crate::gemtext::ast::Root;
use crate::gemtext::building::compile;
use crate::gemtext::lexing::Lexer;
use crate::gemtext::token::Token;
use std::fs;
use std::io;
use std::path::Path;

/// Gemtext source held as bytes, so that invalid UTF-8 reaches the lexer unchanged.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    source: Vec<u8>,
}

impl DocumentLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let source = fs::read(path)?;
        Ok(DocumentLoader { source })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into().into_bytes(),
        }
    }

    /// Load a response body or any other raw bytes.
    pub fn from_bytes<B: Into<Vec<u8>>>(source: B) -> Self {
        DocumentLoader {
            source: source.into(),
        }
    }

    pub fn tokenize(&self) -> Vec<Token> {
        let mut lexer = Lexer::new();
        lexer.feed(&self.source);
        lexer.finish()
    }

    /// Tokenize and compile into a document tree.
    pub fn parse(&self) -> Root {
        compile(&self.tokenize())
    }

    /// The source, decoded lossily.
    pub fn source(&self) -> String {
        String::from_utf8_lossy(&self.source).into_owned()
    }
}
