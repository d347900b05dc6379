//! Output formats for parsed documents
//!
//!     - [treeviz]: one line per node, for reading trees in a terminal or a test.
//!     - JSON: tokens and nodes derive `serde::Serialize`; see [to_json_str] and
//!       [tokens_to_json_str].

pub mod treeviz;

pub use treeviz::to_treeviz_str;

use crate::gemtext::ast::Root;
use crate::gemtext::token::Token;

/// Pretty-printed JSON for a document tree.
pub fn to_json_str(root: &Root) -> serde_json::Result<String> {
    serde_json::to_string_pretty(root)
}

/// Pretty-printed JSON for a token stream.
pub fn tokens_to_json_str(tokens: &[Token]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tokens)
}
