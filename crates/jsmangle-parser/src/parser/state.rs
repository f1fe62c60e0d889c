//! Parser state and token navigation.

use super::ParseError;
use crate::base::NodeIndex;
use crate::node::{NodeArena, NodeData, SourceType};
use jsmangle_scanner::{Scanner, SyntaxKind, Token, is_reserved_word};

pub struct ParserState {
    pub(super) tokens: Vec<Token>,
    pub(super) current: usize,
    pub(super) arena: NodeArena,
    pub(super) source_type: SourceType,
    /// Set while parsing a `for` head, where `in` ends an expression.
    pub(super) no_in: bool,
}

impl ParserState {
    pub fn new(source: &str, source_type: SourceType) -> Result<Self, ParseError> {
        let tokens = Scanner::new(source).scan_all()?;
        Ok(Self {
            arena: NodeArena::with_capacity(tokens.len()),
            tokens,
            current: 0,
            source_type,
            no_in: false,
        })
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn parse_program(&mut self) -> Result<NodeIndex, ParseError> {
        let mut body = Vec::new();
        while self.token().kind != SyntaxKind::EndOfFile {
            body.push(self.parse_statement()?);
        }
        let source_type = self.source_type;
        Ok(self.arena.alloc(NodeData::Program { body, source_type }))
    }

    // =========================================================================
    // Token navigation
    // =========================================================================

    #[inline]
    pub(super) fn token(&self) -> &Token {
        self.peek(0)
    }

    /// Token `n` positions ahead; the trailing `EndOfFile` repeats forever.
    #[inline]
    pub(super) fn peek(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.current + n).min(last)]
    }

    pub(super) fn next_token(&mut self) -> Token {
        let token = self.token().clone();
        if token.kind != SyntaxKind::EndOfFile {
            self.current += 1;
        }
        token
    }

    #[inline]
    pub(super) fn is_punct(&self, text: &str) -> bool {
        self.token().is_punct(text)
    }

    #[inline]
    pub(super) fn is_word(&self, text: &str) -> bool {
        self.token().is_word(text)
    }

    pub(super) fn eat_punct(&mut self, text: &str) -> bool {
        if self.is_punct(text) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub(super) fn eat_word(&mut self, text: &str) -> bool {
        if self.is_word(text) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub(super) fn expect_punct(&mut self, text: &str) -> Result<(), ParseError> {
        if self.eat_punct(text) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{text}'")))
        }
    }

    pub(super) fn expect_word(&mut self, text: &str) -> Result<(), ParseError> {
        if self.eat_word(text) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{text}'")))
        }
    }

    pub(super) fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.token();
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: if token.kind == SyntaxKind::EndOfFile {
                "end of file".to_string()
            } else {
                token.text.clone()
            },
            pos: token.pos,
        }
    }

    /// Whether the current token can start a binding or reference identifier.
    pub(super) fn is_identifier(&self) -> bool {
        let token = self.token();
        token.kind == SyntaxKind::Identifier && !is_reserved_word(&token.text)
    }

    /// Any identifier name, reserved words included (property names).
    pub(super) fn parse_identifier_name(&mut self) -> Result<String, ParseError> {
        if self.token().kind == SyntaxKind::Identifier {
            Ok(self.next_token().text)
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    /// An identifier usable as a binding or reference.
    pub(super) fn parse_identifier(&mut self) -> Result<NodeIndex, ParseError> {
        if !self.is_identifier() {
            return Err(self.unexpected("identifier"));
        }
        let name = self.next_token().text;
        Ok(self.arena.alloc_identifier(name))
    }

    /// Automatic semicolon insertion: a missing `;` is accepted before `}`,
    /// at end of input, or after a line break.
    pub(super) fn consume_semicolon(&mut self) -> Result<(), ParseError> {
        if self.eat_punct(";") {
            return Ok(());
        }
        let token = self.token();
        if token.is_punct("}") || token.kind == SyntaxKind::EndOfFile || token.preceded_by_line_break
        {
            Ok(())
        } else {
            Err(self.unexpected("';'"))
        }
    }

    /// Run `f` with the `in` operator allowed or disallowed, restoring the
    /// previous setting afterwards.
    pub(super) fn with_no_in<T>(
        &mut self,
        no_in: bool,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved = self.no_in;
        self.no_in = no_in;
        let result = f(self);
        self.no_in = saved;
        result
    }
}
