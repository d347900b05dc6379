//! Property-based tests for the lexer
//!
//! Documents are generated line by line from every gemtext line kind, with LF or CRLF
//! terminators, and checked for the invariants that downstream tooling relies on:
//! token values rebuild the source, positions agree with a byte-offset index, and
//! chunking never changes the result.

use omura_parser::gemtext::ast::SourceLocation;
use omura_parser::gemtext::building::location::unenclosed_nodes;
use omura_parser::gemtext::token::detokenize;
use omura_parser::{parse_document, tokenize, Lexer, TokenKind};
use proptest::prelude::*;

fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "#{1,4}[ \t]?[a-zA-Z ]{0,12}",
        "\\*[ \t]?[a-z ]{0,10}",
        "=>[ \t]{0,2}[a-z:/.]{0,12}[ \t]{0,2}[a-zA-Z ]{0,10}",
        ">[ ]?[a-z ]{0,10}",
        "```[a-z]{0,5}",
        "[a-zA-Zé ]{0,16}",
        Just(String::new()),
    ]
}

fn document_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec((line_strategy(), prop::bool::ANY), 0..12),
        prop::bool::ANY,
    )
        .prop_map(|(lines, terminate_last)| {
            let mut source = String::new();
            let count = lines.len();
            for (i, (line, crlf)) in lines.into_iter().enumerate() {
                source.push_str(&line);
                if i + 1 < count || terminate_last {
                    source.push_str(if crlf { "\r\n" } else { "\n" });
                }
            }
            source
        })
}

proptest! {
    #[test]
    fn detokenize_rebuilds_source(source in document_strategy()) {
        prop_assert_eq!(detokenize(&tokenize(&source)), source);
    }

    #[test]
    fn positions_match_byte_offsets(source in document_strategy()) {
        let index = SourceLocation::new(source.as_bytes());
        let tokens = tokenize(&source);
        let mut offset = 0;
        for token in &tokens {
            prop_assert_eq!(token.location.span.start, offset);
            prop_assert_eq!(token.location.span.len(), token.value.len());
            prop_assert_eq!(token.location.start, index.byte_to_position(token.location.span.start));
            prop_assert_eq!(token.location.end, index.byte_to_position(token.location.span.end));
            offset = token.location.span.end;
        }
        prop_assert_eq!(offset, source.len());
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn chunking_does_not_change_tokens(source in document_strategy(), size in 1usize..8) {
        let mut lexer = Lexer::new();
        for chunk in source.as_bytes().chunks(size) {
            lexer.feed(chunk);
        }
        prop_assert_eq!(lexer.finish(), tokenize(&source));
    }

    #[test]
    fn hard_eol_only_after_empty_line(source in document_strategy()) {
        let tokens = tokenize(&source);
        for (i, token) in tokens.iter().enumerate() {
            if token.kind.is_hard_eol() {
                prop_assert!(i == 0 || tokens[i - 1].kind.is_eol());
            }
        }
    }

    #[test]
    fn nodes_stay_within_parents(source in document_strategy()) {
        let root = parse_document(&source);
        prop_assert!(unenclosed_nodes(&root).is_empty());
        prop_assert_eq!(root.location.span.end, source.len());
    }
}
