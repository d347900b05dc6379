//! Detokenizer for gemtext
//!
//! Converts a token stream back into source text. Every token value is a literal slice of
//! the input (line terminators included), so concatenating the values in order rebuilds the
//! source byte for byte, as long as the input was valid UTF-8.
//!
//! This is used for round-trip checks of the lexer and for debugging token streams.

use super::core::Token;

/// Detokenize a stream of tokens into a string
pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.value.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemtext::lexing::tokenize;

    #[test]
    fn test_detokenize_mixed_document() {
        let source = "# Title\n\n=> gemini://x.example/\tExample\r\n```alt\n* not a list\n```\n> tail";
        assert_eq!(detokenize(&tokenize(source)), source);
    }

    #[test]
    fn test_detokenize_empty() {
        assert_eq!(detokenize(&tokenize("")), "");
    }
}
