use std::iter::Peekable;

use crate::{
    ast::Node,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{advance, check, skip_newlines, surface_error},
        },
    },
};

/// Parses a sequence of statements separated by newlines.
///
/// Leading newlines are skipped and the first statement is required. After
/// that, every run of newlines may be followed by another statement; a
/// statement that fails to parse there ends the sequence instead, with the
/// tokens rewound to where it began. This lets a block stop at `end`, `elif`,
/// `else` or `}` without knowing which of them closes it.
///
/// Grammar: `statements := NEWLINE* statement (NEWLINE+ statement)* NEWLINE*`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A `Node::List` with one node per statement.
pub fn parse_statements<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    skip_newlines(tokens);

    let first = parse_statement(tokens)?;
    let mut span = first.span().clone();
    let mut statements = vec![first];

    while skip_newlines(tokens) > 0 {
        let checkpoint = tokens.clone();
        match parse_statement(tokens) {
            Ok(statement) => {
                span = span.to(statement.span());
                statements.push(statement);
            },
            Err(_) => {
                *tokens = checkpoint;
                break;
            },
        }
    }

    Ok(Node::List { elements: statements,
                    span })
}

/// Parses the body that follows a `:`.
///
/// A newline right after the colon opens a block of statements; anything
/// else is a single inline statement. The flag in the result is `true` for
/// blocks, which evaluate to null.
pub fn parse_body<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<(Node, bool)>
    where I: Iterator<Item = &'a Token> + Clone
{
    if check(tokens, &TokenKind::NewLine) {
        tokens.next();
        Ok((parse_statements(tokens)?, true))
    } else {
        Ok((parse_statement(tokens)?, false))
    }
}

/// Consumes the `end` keyword closing a block.
///
/// # Errors
/// The error of the statement the block stopped at, or `Expected 'end'`.
pub fn expect_end<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token> + Clone
{
    if check(tokens, &TokenKind::End) {
        advance(tokens)
    } else {
        Err(surface_error(tokens, "Expected 'end'"))
    }
}
