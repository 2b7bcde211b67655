use std::fmt;

use crate::{error::report, interpreter::position::Span};

/// The kinds of errors the parser can report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    /// The current token does not fit the grammar.
    #[error("Invalid Syntax: {details}")]
    InvalidSyntax {
        /// A human readable description of what was expected.
        details: String,
    },
    /// The token stream ended without an end-of-input token.
    #[error("Invalid Syntax: Unexpected end of input")]
    UnexpectedEndOfInput,
}

/// A syntax error and the span of the token that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Option<Span>,
}

impl ParseError {
    /// Creates an `InvalidSyntax` error located at `span`.
    #[must_use]
    pub fn invalid_syntax(details: impl Into<String>, span: &Span) -> Self {
        Self { kind: ParseErrorKind::InvalidSyntax { details: details.into() },
               span: Some(span.clone()), }
    }

    #[must_use]
    pub const fn end_of_input() -> Self {
        Self { kind: ParseErrorKind::UnexpectedEndOfInput,
               span: None, }
    }

    /// Returns the byte offset the error points at, if known.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.span.as_ref().map(|span| span.start.index)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&report::describe(&self.kind.to_string(), self.span.as_ref()))
    }
}

impl std::error::Error for ParseError {}
