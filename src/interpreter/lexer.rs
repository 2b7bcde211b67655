use logos::Logos;

use crate::{
    error::{LexError, LexErrorKind},
    interpreter::position::{LineIndex, SourceFile, Span},
};

/// The kinds of lexical tokens recognised in KodeScript source.
///
/// Keywords are matched as fixed tokens, so they take priority over the
/// identifier pattern for an equal-length match.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum TokenKind {
    /// Numeric literals with more than one decimal point, such as `1.2.3`.
    #[regex(r"[0-9]+\.[0-9]*(\.[0-9]*)+", |lex| lex.slice().to_string())]
    MalformedNumber(String),
    /// Floating-point literals, such as `3.14`, `2.` or `1e-05`.
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_float)]
    Float(f64),
    /// Integer literals, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Int(i64),
    /// Double-quoted string literals with escapes already resolved.
    #[regex(r#""([^"\\]|\\(.|\n))*""#, unescape, allow_greedy = true)]
    Str(String),
    /// A string literal that reaches the end of input without a closing quote.
    #[regex(r#""([^"\\]|\\(.|\n))*"#, allow_greedy = true)]
    UnterminatedString,
    /// Identifier tokens; variable, function or module names.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `var`
    #[token("var")]
    Var,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// `if`
    #[token("if")]
    If,
    /// `elif`
    #[token("elif")]
    Elif,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `to`
    #[token("to")]
    To,
    /// `step`
    #[token("step")]
    Step,
    /// `while`
    #[token("while")]
    While,
    /// `func`
    #[token("func")]
    Func,
    /// `end`
    #[token("end")]
    End,
    /// `return`
    #[token("return")]
    Return,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `break`
    #[token("break")]
    Break,
    /// `in`
    #[token("in")]
    In,
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `//`
    #[token("//")]
    DoubleSlash,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `->`
    #[token("->")]
    Arrow,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `=`
    #[token("=")]
    Equals,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// A `!` that is not followed by `=`.
    #[token("!")]
    Bang,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `.`
    #[token(".")]
    Dot,
    /// Line breaks and `;` both separate statements.
    #[token("\n")]
    #[token(";")]
    NewLine,
    /// Spaces, tabs and carriage returns.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
    /// End of input. Never produced by the scanner itself; [`tokenize`]
    /// appends exactly one.
    Eof,
}

/// A token together with the span of source it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Returns the identifier text if this token is an identifier.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

/// Converts source text into a sequence of positioned tokens.
///
/// Lexing stops at the first error. On success the sequence always ends with
/// exactly one [`TokenKind::Eof`] token.
///
/// # Errors
/// Returns a [`LexError`] for illegal characters, a `!` that is not part of
/// `!=`, numbers with several decimal points, unterminated strings and integer
/// literals that do not fit in 64 bits.
///
/// # Example
/// ```
/// use kode::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("<stdin>", "var x = 1.5").unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
/// assert_eq!(kinds,
///            vec![TokenKind::Var,
///                 TokenKind::Identifier("x".to_string()),
///                 TokenKind::Equals,
///                 TokenKind::Float(1.5),
///                 TokenKind::Eof]);
///
/// assert!(tokenize("<stdin>", "1.2.3").is_err());
/// ```
pub fn tokenize(filename: &str, text: &str) -> Result<Vec<Token>, LexError> {
    let file = SourceFile::new(filename, text);
    let index = LineIndex::new(&file);

    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(text);

    while let Some(result) = lexer.next() {
        let span = index.span(lexer.span());
        let kind = match result {
            Ok(TokenKind::MalformedNumber(literal)) => {
                return Err(LexError::new(LexErrorKind::MalformedNumber { literal }, span));
            },
            Ok(TokenKind::UnterminatedString) => {
                return Err(LexError::new(LexErrorKind::UnterminatedString, span));
            },
            Ok(TokenKind::Bang) => {
                return Err(LexError::new(LexErrorKind::ExpectedCharacter { details: "'=' (after '!')".to_string() },
                                         span));
            },
            Ok(kind) => kind,
            Err(()) => {
                let slice = lexer.slice();
                let kind = if slice.starts_with(|c: char| c.is_ascii_digit()) {
                    LexErrorKind::LiteralTooLarge { literal: slice.to_string() }
                } else {
                    LexErrorKind::IllegalCharacter { character: slice.chars().next().unwrap_or('?') }
                };
                return Err(LexError::new(kind, span));
            },
        };
        tokens.push(Token { kind, span });
    }

    tokens.push(Token { kind: TokenKind::Eof,
                        span: index.span(text.len()..text.len()) });

    Ok(tokens)
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<TokenKind>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Some(i64)`: The parsed integer value if it fits.
/// - `None`: If the literal overflows, which the lexer reports as an error.
fn parse_integer(lex: &logos::Lexer<TokenKind>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Strips the quotes of a string literal and resolves escape sequences.
///
/// `\n`, `\t`, `\"` and `\\` are recognised; any other escaped character is
/// kept as-is.
fn unescape(lex: &logos::Lexer<TokenKind>) -> String {
    let slice = lex.slice();
    let body = &slice[1..slice.len() - 1];

    let mut text = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => text.push('\n'),
            Some('t') => text.push('\t'),
            Some(other) => text.push(other),
            None => {},
        }
    }
    text
}
