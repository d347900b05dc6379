//! Document compiler
//!
//!     A single forward pass over the token stream. Open nodes live on an explicit stack,
//!     innermost last, with the Root at the bottom from the start. A node that closes is
//!     popped and handed to the node below it, so the tree is built bottom-up and owned: no
//!     node ever refers to its parent.
//!
//!     Line nodes (headings, links, items, quotes, text, breaks, preformatted blocks) never
//!     stay open: their fields are read with a short lookahead over the tokens of their line
//!     and they are attached at once. Only a List stays open across lines, while the next line
//!     is another list line.
//!
//! Misplaced Children
//!
//!     If the innermost open node refuses a child (a List only holds ListItems), that node is
//!     closed first and the child is offered to the next one down. This is a loop over a small
//!     work list, not recursion, and nothing is dropped.
//!
//! Tokens Without Meaning
//!
//!     Soft line ends, the end-of-file marker and whitespace between lines produce no node.

use super::location::{between, grow_to_cover};
use crate::gemtext::ast::traits::AstNode;
use crate::gemtext::ast::{Break, Heading, Link, List, ListItem, Node, Pre, Quote, Root, Text};
use crate::gemtext::token::{Token, TokenKind};

pub struct Compiler<'t> {
    tokens: &'t [Token],
    index: usize,
    stack: Vec<Node>,
}

impl<'t> Compiler<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        let root = match tokens.first() {
            Some(first) => Root::default().at(between(&first.location, &first.location)),
            None => Root::default(),
        };
        Self {
            tokens,
            index: 0,
            stack: vec![Node::Root(root)],
        }
    }

    pub fn compile(mut self) -> Root {
        while let Some(token) = self.current() {
            self.step(token);
        }
        self.finish()
    }

    fn step(&mut self, token: &'t Token) {
        match token.kind {
            TokenKind::Eol { hard: true } => {
                self.index += 1;
                self.leaf(Node::Break(Break::default()), token, token);
            }
            TokenKind::HeadingSequence => self.heading(token),
            TokenKind::LinkSequence => self.link(token),
            TokenKind::ListSequence => self.list_item(token),
            TokenKind::PreSequence => self.preformatted(token),
            TokenKind::QuoteSequence => self.quote(token),
            TokenKind::Text | TokenKind::PreText => {
                self.index += 1;
                self.leaf(Node::Text(Text::new(token.value.as_str())), token, token);
            }
            _ => self.index += 1,
        }
    }

    fn heading(&mut self, open: &'t Token) {
        self.index += 1;
        let mut last = open;
        let text = self.line_tail(TokenKind::HeadingText, &mut last);
        let rank = open.value.len().min(3) as u8;
        self.leaf(Node::Heading(Heading::new(rank, text)), open, last);
    }

    fn link(&mut self, open: &'t Token) {
        self.index += 1;
        let mut last = open;
        let url = self.tail_token(TokenKind::LinkUrl, &mut last);
        let text = match url {
            Some(_) => self.line_tail(TokenKind::LinkText, &mut last),
            None => String::new(),
        };
        let url = url.map(|token| token.value.clone());
        self.leaf(Node::Link(Link::new(url, text)), open, last);
    }

    fn list_item(&mut self, open: &'t Token) {
        if !matches!(self.stack.last(), Some(Node::List(_))) {
            self.enter(Node::List(List::new(Vec::new())), open);
        }
        self.index += 1;
        let mut last = open;
        let text = self.line_tail(TokenKind::ListText, &mut last);
        self.leaf(Node::ListItem(ListItem::new(text)), open, last);

        let continues = matches!(
            (self.peek(0), self.peek(1)),
            (Some(eol), Some(next)) if eol.kind.is_eol() && next.is(TokenKind::ListSequence)
        );
        if !continues {
            self.exit(last);
        }
    }

    fn preformatted(&mut self, open: &'t Token) {
        self.index += 1;
        let mut last = open;
        let alt = self.advance_if(TokenKind::PreAlt).map(|token| {
            last = token;
            token.value.clone()
        });
        if let Some(eol) = self.current().filter(|token| token.kind.is_eol()) {
            self.index += 1;
            last = eol;
        }

        let mut text = String::new();
        while let Some(token) = self.current() {
            match token.kind {
                TokenKind::Eol { .. } | TokenKind::Text | TokenKind::PreText => {
                    self.index += 1;
                    text.push_str(&token.value);
                    last = token;
                }
                TokenKind::PreSequence => {
                    self.index += 1;
                    last = token;
                    if let Some(ignored_alt) = self.advance_if(TokenKind::PreAlt) {
                        last = ignored_alt;
                    }
                    break;
                }
                TokenKind::Eof => {
                    self.index += 1;
                    last = token;
                    break;
                }
                _ => break,
            }
        }
        self.leaf(Node::Pre(Pre::new(alt, text)), open, last);
    }

    fn quote(&mut self, open: &'t Token) {
        self.index += 1;
        let mut last = open;
        let text = self.line_tail(TokenKind::QuoteText, &mut last);
        self.leaf(Node::Quote(Quote::new(text)), open, last);
    }

    /// Optional whitespace, then an optional token of `kind`. `last` follows what was consumed.
    fn tail_token(&mut self, kind: TokenKind, last: &mut &'t Token) -> Option<&'t Token> {
        if let Some(whitespace) = self.advance_if(TokenKind::Whitespace) {
            *last = whitespace;
        }
        let token = self.advance_if(kind)?;
        *last = token;
        Some(token)
    }

    fn line_tail(&mut self, kind: TokenKind, last: &mut &'t Token) -> String {
        self.tail_token(kind, last)
            .map(|token| token.value.clone())
            .unwrap_or_default()
    }

    fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.index)
    }

    fn peek(&self, ahead: usize) -> Option<&'t Token> {
        self.tokens.get(self.index + ahead)
    }

    fn advance_if(&mut self, kind: TokenKind) -> Option<&'t Token> {
        let token = self.current().filter(|token| token.is(kind))?;
        self.index += 1;
        Some(token)
    }

    fn enter(&mut self, mut node: Node, open: &Token) {
        *node.location_mut() = between(&open.location, &open.location);
        self.stack.push(node);
    }

    /// Close the innermost open node at the end of `close`. The Root is never closed here.
    fn exit(&mut self, close: &Token) {
        if self.stack.len() <= 1 {
            return;
        }
        if let Some(mut node) = self.stack.pop() {
            grow_to_cover(node.location_mut(), &close.location);
            self.attach(node);
        }
    }

    fn leaf(&mut self, mut node: Node, open: &Token, close: &Token) {
        *node.location_mut() = between(&open.location, &close.location);
        self.attach(node);
    }

    fn attach(&mut self, child: Node) {
        let mut pending = vec![child];
        while let Some(node) = pending.pop() {
            let range = node.range().clone();
            let Some(parent) = self.stack.last_mut() else {
                break;
            };
            let orphan = match parent.adopt(node) {
                Ok(()) => {
                    grow_to_cover(parent.location_mut(), &range);
                    continue;
                }
                Err(orphan) => orphan,
            };
            // Only a second Root is ever refused by the Root.
            if self.stack.len() > 1 {
                if let Some(closed) = self.stack.pop() {
                    pending.push(orphan);
                    pending.push(closed);
                }
            }
        }
    }

    fn finish(mut self) -> Root {
        let last = self.tokens.last();
        while self.stack.len() > 1 {
            if let Some(mut node) = self.stack.pop() {
                if let Some(last) = last {
                    grow_to_cover(node.location_mut(), &last.location);
                }
                self.attach(node);
            }
        }
        match self.stack.pop() {
            Some(Node::Root(mut root)) => {
                if let Some(last) = last {
                    grow_to_cover(&mut root.location, &last.location);
                }
                root
            }
            _ => Root::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemtext::ast::Position;
    use crate::gemtext::lexing::tokenize;

    fn compile(source: &str) -> Root {
        Compiler::new(&tokenize(source)).compile()
    }

    #[test]
    fn test_heading_spans_its_line() {
        let root = compile("# Title\n");
        assert_eq!(root.children.len(), 1);
        let Node::Heading(heading) = &root.children[0] else {
            panic!("expected heading, got {}", root.children[0]);
        };
        assert_eq!(heading.rank, 1);
        assert_eq!(heading.text, "Title");
        assert_eq!(heading.location.span, 0..7);
        assert_eq!(heading.location.start, Position::new(1, 1));
        assert_eq!(heading.location.end, Position::new(1, 8));
    }

    #[test]
    fn test_root_spans_document() {
        let root = compile("a\nb\n");
        assert_eq!(root.location.span, 0..4);
        assert_eq!(root.location.start, Position::new(1, 1));
        assert_eq!(root.location.end, Position::new(3, 1));
    }

    #[test]
    fn test_empty_input() {
        let root = compile("");
        assert!(root.is_empty());
        assert_eq!(root.location.span, 0..0);
        let root = Compiler::new(&[]).compile();
        assert!(root.is_empty());
    }

    #[test]
    fn test_list_closes_before_blank_line() {
        let root = compile("* a\n* b\n\n* c\n");
        let kinds: Vec<_> = root.children.iter().map(|c| c.node_type()).collect();
        assert_eq!(kinds, vec!["List", "Break", "List"]);
        let Node::List(first) = &root.children[0] else {
            panic!("expected list");
        };
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.location.span, 0..7);
    }

    #[test]
    fn test_unterminated_pre_runs_to_eof() {
        let root = compile("```\nx\n* y");
        assert_eq!(root.children.len(), 1);
        let Node::Pre(pre) = &root.children[0] else {
            panic!("expected pre");
        };
        assert_eq!(pre.alt, None);
        assert_eq!(pre.text, "x\n* y");
        assert_eq!(pre.location.span.end, 9);
    }

    #[test]
    fn test_closing_fence_alt_is_ignored() {
        let root = compile("```a\nb\n```trailing\nafter\n");
        let Node::Pre(pre) = &root.children[0] else {
            panic!("expected pre");
        };
        assert_eq!(pre.alt.as_deref(), Some("a"));
        assert_eq!(pre.text, "b\n");
        assert!(matches!(&root.children[1], Node::Text(t) if t.value == "after"));
    }

    #[test]
    fn test_misplaced_child_goes_to_grandparent() {
        let tokens = tokenize("* a\n");
        let mut compiler = Compiler::new(&tokens);
        compiler.enter(Node::List(List::new(Vec::new())), &tokens[0]);
        compiler.attach(Node::Text(Text::new("stray").at(tokens[2].location.clone())));
        let root = compiler.finish();
        let kinds: Vec<_> = root.children.iter().map(|c| c.node_type()).collect();
        assert_eq!(kinds, vec!["List", "Text"]);
    }
}
