//! JavaScript scanner/tokenizer for the jsmangle renamer.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token categories
//! - `Token` - A scanned token with its source text and offsets
//! - `Scanner` - Converts source text into a token buffer
//!
//! Keywords are scanned as identifiers; the parser decides which words are
//! reserved in which position.

mod scanner;
pub use scanner::{ScanError, Scanner, is_identifier_part, is_identifier_start};

/// Token categories produced by the scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Identifier,
    NumericLiteral,
    StringLiteral,
    Punctuator,
    EndOfFile,
}

/// A scanned token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    /// Raw source text of the token (string literals keep their quotes).
    pub text: String,
    pub pos: u32,
    pub end: u32,
    /// Whether a line terminator appeared between the previous token and this one.
    pub preceded_by_line_break: bool,
}

impl Token {
    #[inline]
    pub fn is(&self, kind: SyntaxKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    #[inline]
    pub fn is_punct(&self, text: &str) -> bool {
        self.is(SyntaxKind::Punctuator, text)
    }

    #[inline]
    pub fn is_word(&self, text: &str) -> bool {
        self.is(SyntaxKind::Identifier, text)
    }
}

/// Words that can never be used as binding or reference identifiers.
pub const RESERVED_WORDS: &[&str] = &[
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "let",
    "new",
    "null",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// Check if a word is reserved.
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod tests;
