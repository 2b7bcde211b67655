use std::iter::Peekable;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{core::ParseResult, statement::parse_statement},
    },
};

/// Returns the current token without consuming it.
///
/// # Errors
/// `UnexpectedEndOfInput` if the stream is exhausted, which only happens for
/// token sequences that lack the final end-of-input token.
pub(in crate::interpreter::parser) fn current<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token> + Clone
{
    tokens.peek().copied().ok_or_else(ParseError::end_of_input)
}

/// Consumes and returns the current token.
pub(in crate::interpreter::parser) fn advance<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token> + Clone
{
    tokens.next().ok_or_else(ParseError::end_of_input)
}

/// Returns `true` if the current token is of the given kind.
pub(in crate::interpreter::parser) fn check<'a, I>(tokens: &mut Peekable<I>, kind: &TokenKind) -> bool
    where I: Iterator<Item = &'a Token> + Clone
{
    tokens.peek().is_some_and(|token| token.kind == *kind)
}

/// Consumes the current token if it is of the given kind.
///
/// # Errors
/// An `InvalidSyntax` error with `message`, located at the current token.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    kind: &TokenKind,
                                                    message: &str)
                                                    -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = current(tokens)?;
    if token.kind == *kind {
        tokens.next();
        Ok(token)
    } else {
        Err(ParseError::invalid_syntax(message, &token.span))
    }
}

/// Consumes an identifier and returns its name with the token it came from.
pub(in crate::interpreter::parser) fn expect_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                               message: &str)
                                                               -> ParseResult<(String, &'a Token)>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = current(tokens)?;
    match token.identifier() {
        Some(name) => {
            tokens.next();
            Ok((name.to_string(), token))
        },
        None => Err(ParseError::invalid_syntax(message, &token.span)),
    }
}

/// Builds an `InvalidSyntax` error located at the current token.
pub(in crate::interpreter::parser) fn error_at<'a, I>(tokens: &mut Peekable<I>, message: &str) -> ParseError
    where I: Iterator<Item = &'a Token> + Clone
{
    match tokens.peek() {
        Some(token) => ParseError::invalid_syntax(message, &token.span),
        None => ParseError::end_of_input(),
    }
}

/// Skips consecutive newline tokens and returns how many were skipped.
pub(in crate::interpreter::parser) fn skip_newlines<'a, I>(tokens: &mut Peekable<I>) -> usize
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut count = 0;
    while check(tokens, &TokenKind::NewLine) {
        tokens.next();
        count += 1;
    }
    count
}

/// Replaces the error of a rule that failed without consuming any token by a
/// message listing what the rule itself accepts.
///
/// An error raised after the rule made progress is more precise and is kept.
pub(in crate::interpreter::parser) fn or_expected(result: ParseResult<Node>,
                                                  start: &Token,
                                                  message: &str)
                                                  -> ParseResult<Node> {
    match result {
        Err(error) if error.index() == Some(start.span.start.index) => {
            Err(ParseError::invalid_syntax(message, &start.span))
        },
        other => other,
    }
}

/// Explains why parsing stopped at the current token.
///
/// A statement that failed after a newline is backtracked, so the token an
/// enclosing rule stops at is often the start of that statement. Re-parsing
/// it surfaces the real error when the statement got past its first token;
/// otherwise the error says what the enclosing rule expected.
pub(in crate::interpreter::parser) fn surface_error<'a, I>(tokens: &mut Peekable<I>, message: &str) -> ParseError
    where I: Iterator<Item = &'a Token> + Clone
{
    let fallback = error_at(tokens, message);
    let mut probe = tokens.clone();
    match parse_statement(&mut probe) {
        Err(error) if error.index().is_some() && error.index() != fallback.index() => error,
        _ => fallback,
    }
}
