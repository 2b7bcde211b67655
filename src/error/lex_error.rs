use std::fmt;

use crate::{error::report, interpreter::position::Span};

/// The kinds of errors the lexer can report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexErrorKind {
    /// A character that cannot start any token.
    #[error("Illegal Character: '{character}'")]
    IllegalCharacter {
        /// The offending character.
        character: char,
    },
    /// A character that must be followed by a specific one.
    #[error("Expected Character: {details}")]
    ExpectedCharacter {
        /// What was expected and where.
        details: String,
    },
    /// A number literal with more than one decimal point.
    #[error("Illegal Character: malformed number '{literal}'")]
    MalformedNumber {
        /// The literal as written.
        literal: String,
    },
    /// A string literal without its closing quote.
    #[error("Illegal Character: unterminated string literal")]
    UnterminatedString,
    /// An integer literal that does not fit in a 64-bit signed integer.
    #[error("Illegal Character: integer literal '{literal}' is too large")]
    LiteralTooLarge {
        /// The literal as written.
        literal: String,
    },
}

/// An error raised while tokenizing, with the span it was found at.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    #[must_use]
    pub const fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&report::describe(&self.kind.to_string(), Some(&self.span)))
    }
}

impl std::error::Error for LexError {}
