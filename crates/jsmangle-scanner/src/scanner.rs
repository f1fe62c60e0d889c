//! Scanner state machine.

use crate::{SyntaxKind, Token};

/// Punctuators ordered longest first so the first prefix match wins.
const PUNCTUATORS: &[&str] = &[
    ">>>=", "...", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "**", "<<", ">>", "{", "}", "(", ")", "[", "]", ";", ",", "<", ">", "+", "-",
    "*", "/", "%", "&", "|", "^", "!", "~", "?", ":", "=", ".",
];

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("unterminated string literal at offset {pos}")]
    UnterminatedString { pos: u32 },
    #[error("unterminated comment at offset {pos}")]
    UnterminatedComment { pos: u32 },
    #[error("unexpected character {ch:?} at offset {pos}")]
    UnexpectedCharacter { ch: char, pos: u32 },
}

pub fn is_identifier_start(ch: char) -> bool {
    ch == '$' || ch == '_' || unicode_ident::is_xid_start(ch)
}

pub fn is_identifier_part(ch: char) -> bool {
    ch == '$' || unicode_ident::is_xid_continue(ch)
}

pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Scan the whole input. The returned buffer always ends with an
    /// `EndOfFile` token.
    pub fn scan_all(mut self) -> Result<Vec<Token>, ScanError> {
        let mut tokens = Vec::new();
        loop {
            let preceded_by_line_break = self.skip_trivia()?;
            let start = self.pos;
            let Some(ch) = self.peek() else {
                tokens.push(Token {
                    kind: SyntaxKind::EndOfFile,
                    text: String::new(),
                    pos: offset(start),
                    end: offset(start),
                    preceded_by_line_break,
                });
                return Ok(tokens);
            };

            let kind = if is_identifier_start(ch) {
                self.scan_identifier();
                SyntaxKind::Identifier
            } else if ch.is_ascii_digit()
                || (ch == '.' && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()))
            {
                self.scan_number();
                SyntaxKind::NumericLiteral
            } else if ch == '"' || ch == '\'' {
                self.scan_string(ch)?;
                SyntaxKind::StringLiteral
            } else {
                self.scan_punctuator(ch)?;
                SyntaxKind::Punctuator
            };

            tokens.push(Token {
                kind,
                text: self.text[start..self.pos].to_string(),
                pos: offset(start),
                end: offset(self.pos),
                preceded_by_line_break,
            });
        }
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    #[inline]
    fn peek_at(&self, n: usize) -> Option<char> {
        self.text[self.pos..].chars().nth(n)
    }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Skip whitespace and comments. Returns whether a line terminator was seen.
    fn skip_trivia(&mut self) -> Result<bool, ScanError> {
        let mut saw_line_break = false;
        while let Some(ch) = self.peek() {
            match ch {
                '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                    saw_line_break = true;
                    self.bump();
                }
                c if c.is_whitespace() || c == '\u{feff}' => {
                    self.bump();
                }
                '/' if self.peek_at(1) == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' || c == '\r' {
                            break;
                        }
                        self.bump();
                    }
                }
                '/' if self.peek_at(1) == Some('*') => {
                    let start = self.pos;
                    self.pos += 2;
                    match self.text[self.pos..].find("*/") {
                        Some(rel) => {
                            if self.text[self.pos..self.pos + rel].contains(['\n', '\r']) {
                                saw_line_break = true;
                            }
                            self.pos += rel + 2;
                        }
                        None => {
                            return Err(ScanError::UnterminatedComment { pos: offset(start) });
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(saw_line_break)
    }

    fn scan_identifier(&mut self) {
        self.bump();
        while self.peek().is_some_and(is_identifier_part) {
            self.bump();
        }
    }

    fn scan_number(&mut self) {
        if self.peek() == Some('0')
            && matches!(self.peek_at(1), Some('x' | 'X' | 'o' | 'O' | 'b' | 'B'))
        {
            self.pos += 2;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit() || c == '_') {
                self.bump();
            }
            return;
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.bump();
        }
        if self.peek() == Some('.') {
            self.bump();
            while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
                self.bump();
            }
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some('+' | '-')));
            if self.peek_at(1 + sign).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1 + sign;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.bump();
                }
            }
        }
        if self.peek() == Some('n') {
            self.bump();
        }
    }

    fn scan_string(&mut self, quote: char) -> Result<(), ScanError> {
        let start = self.pos;
        self.bump();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(()),
                Some('\\') => {
                    if self.bump().is_none() {
                        break;
                    }
                }
                Some('\n' | '\r') | None => break,
                Some(_) => {}
            }
        }
        Err(ScanError::UnterminatedString { pos: offset(start) })
    }

    fn scan_punctuator(&mut self, ch: char) -> Result<(), ScanError> {
        let rest = &self.text[self.pos..];
        for punct in PUNCTUATORS {
            if rest.starts_with(*punct) {
                // `?.` followed by a digit is a conditional with a decimal literal.
                if *punct == "?."
                    && rest[2..].chars().next().is_some_and(|c| c.is_ascii_digit())
                {
                    continue;
                }
                self.pos += punct.len();
                return Ok(());
            }
        }
        Err(ScanError::UnexpectedCharacter {
            ch,
            pos: offset(self.pos),
        })
    }
}

#[inline]
fn offset(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}
