/// Lexical errors.
///
/// Raised while turning source text into tokens: illegal characters, a `!`
/// without `=`, malformed numbers and unterminated strings.
pub mod lex_error;
/// Parsing errors.
///
/// Raised when the token stream does not match the grammar. Only the first
/// error along the committed parse path is reported.
pub mod parse_error;
/// Rendering of error reports.
///
/// Builds the human readable report shared by every error family: the
/// headline, the traceback of call contexts and the underlined source line.
pub mod report;
/// Runtime errors.
///
/// Contains all error kinds that can be raised during evaluation, such as
/// division by zero, illegal operations, unknown names or failing built-ins.
pub mod runtime_error;

pub use lex_error::{LexError, LexErrorKind};
pub use parse_error::{ParseError, ParseErrorKind};
pub use runtime_error::{RuntimeError, RuntimeErrorKind};

/// Any error a script run can end with.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the runtime error kind, if this is a runtime error.
    #[must_use]
    pub const fn runtime_kind(&self) -> Option<&RuntimeErrorKind> {
        match self {
            Self::Runtime(error) => Some(&error.kind),
            _ => None,
        }
    }
}
