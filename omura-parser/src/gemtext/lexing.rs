//! Lexer
//!
//!     Gemtext is line oriented: what a line means is decided by its first characters, and no
//!     construct spans lines except preformatted blocks. The lexer therefore works one line at
//!     a time, and the only state it carries between lines is whether a fence is open.
//!
//!     Line starts are recognized by a small logos lexer (see [markers]). The rest of each line
//!     is split by hand into whitespace, url and text tokens, since the rules there depend on
//!     which marker started the line.
//!
//!     The lexer never fails. Any line that is not recognized is a text line, and invalid UTF-8
//!     is decoded lossily.
//!
//!     See [lexer] for the streaming interface and position tracking.

pub mod lexer;
pub mod markers;

pub use lexer::{tokenize, Lexer};
