use std::iter::Peekable;

use crate::{
    ast::{Node, UnaryOperator},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{binary::parse_power, core::ParseResult, utils::current},
    },
};

/// Parses a signed factor.
///
/// Signs nest, so `--x` is `-(-x)`, and bind looser than `^`, so `-2 ^ 2`
/// is `-(2 ^ 2)`.
///
/// Grammar:
/// ```text
///     factor := ("+" | "-") factor
///             | power
/// ```
pub fn parse_factor<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let start = current(tokens)?;

    let op = match start.kind {
        TokenKind::Plus => UnaryOperator::Plus,
        TokenKind::Minus => UnaryOperator::Negate,
        _ => return parse_power(tokens),
    };

    tokens.next();
    let operand = parse_factor(tokens)?;
    let span = start.span.to(operand.span());
    Ok(Node::UnaryOp { op,
                       operand: Box::new(operand),
                       span })
}
