use std::iter::Peekable;

use crate::{
    ast::Node,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{current, or_expected},
        },
    },
};

/// Parses a single statement.
///
/// `return` takes an optional expression: when no expression can be parsed
/// after it, the tokens are left untouched and the statement returns null.
///
/// Grammar:
/// ```text
///     statement := "return" expression?
///                | "continue"
///                | "break"
///                | expression
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A `Node::Return`, `Node::Continue`, `Node::Break` or an expression node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let start = current(tokens)?;

    match start.kind {
        TokenKind::Return => {
            tokens.next();
            let checkpoint = tokens.clone();
            match parse_expression(tokens) {
                Ok(value) => Ok(Node::Return { span:  start.span.to(value.span()),
                                               value: Some(Box::new(value)), }),
                Err(_) => {
                    *tokens = checkpoint;
                    Ok(Node::Return { value: None,
                                      span:  start.span.clone(), })
                },
            }
        },
        TokenKind::Continue => {
            tokens.next();
            Ok(Node::Continue { span: start.span.clone() })
        },
        TokenKind::Break => {
            tokens.next();
            Ok(Node::Break { span: start.span.clone() })
        },
        _ => {
            let result = parse_expression(tokens);
            or_expected(result,
                        start,
                        "Expected 'return', 'continue', 'break', 'var', 'if', 'for', 'while', 'func', int, float, \
                         identifier, '+', '-', '(', '[', '{' or 'not'")
        },
    }
}
