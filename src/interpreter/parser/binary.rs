use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Node, UnaryOperator},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            function::parse_call,
            unary::parse_factor,
            utils::{current, or_expected},
        },
    },
};

/// Parses a left-associative chain of binary operations.
///
/// `left_operand` parses the first operand and `right_operand` every operand
/// after an operator. Passing a lower-precedence rule as `right_operand`
/// makes the operator bind to the right, which is how `^` is parsed.
///
/// Grammar: `chain := left_operand (operator right_operand)*`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
/// - `left_operand`: The rule for the first operand.
/// - `operators`: The operators accepted at this precedence level.
/// - `right_operand`: The rule for every following operand.
///
/// # Returns
/// A tree of `Node::BinOp`, or the single operand if no operator follows.
pub fn parse_binary_chain<'a, I, L, R>(tokens: &mut Peekable<I>,
                                       left_operand: L,
                                       operators: &[BinaryOperator],
                                       right_operand: R)
                                       -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone,
          L: Fn(&mut Peekable<I>) -> ParseResult<Node>,
          R: Fn(&mut Peekable<I>) -> ParseResult<Node>
{
    let mut left = left_operand(tokens)?;
    loop {
        if let Some(token) = tokens.peek()
           && let Some(op) = token_to_binary_operator(&token.kind)
           && operators.contains(&op)
        {
            tokens.next();
            let right = right_operand(tokens)?;
            let span = left.span().to(right.span());
            left = Node::BinOp { left: Box::new(left),
                                 op,
                                 right: Box::new(right),
                                 span };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses a comparison, or a `not` applied to one.
///
/// Grammar:
/// ```text
///     comparison := "not" comparison
///                 | arithmetic (("==" | "!=" | "<" | ">" | "<=" | ">=") arithmetic)*
/// ```
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let start = current(tokens)?;

    if start.kind == TokenKind::Not {
        tokens.next();
        let operand = parse_comparison(tokens)?;
        let span = start.span.to(operand.span());
        return Ok(Node::UnaryOp { op: UnaryOperator::Not,
                                  operand: Box::new(operand),
                                  span });
    }

    let result = parse_binary_chain(tokens,
                                    parse_arithmetic,
                                    &[BinaryOperator::Equal,
                                      BinaryOperator::NotEqual,
                                      BinaryOperator::Less,
                                      BinaryOperator::Greater,
                                      BinaryOperator::LessEqual,
                                      BinaryOperator::GreaterEqual],
                                    parse_arithmetic);
    or_expected(result,
                start,
                "Expected int or float, identifier, '+', '-', '(', '[', '{' or 'not'")
}

/// Parses addition and subtraction.
///
/// Grammar: `arithmetic := term (("+" | "-") term)*`
pub fn parse_arithmetic<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_binary_chain(tokens,
                       parse_term,
                       &[BinaryOperator::Add, BinaryOperator::Sub],
                       parse_term)
}

/// Parses multiplication, the two divisions and the remainder.
///
/// Grammar: `term := factor (("*" | "/" | "//" | "%") factor)*`
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_binary_chain(tokens,
                       parse_factor,
                       &[BinaryOperator::Mul,
                         BinaryOperator::Div,
                         BinaryOperator::IntDiv,
                         BinaryOperator::Mod],
                       parse_factor)
}

/// Parses exponentiation.
///
/// The exponent is parsed as a factor, so `^` is right-associative and a
/// signed exponent such as `2 ^ -1` needs no parentheses.
///
/// Grammar: `power := call ("^" factor)*`
pub fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_binary_chain(tokens, parse_call, &[BinaryOperator::Pow], parse_factor)
}

/// Maps a token to its binary operator, if it is one.
pub const fn token_to_binary_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    let op = match kind {
        TokenKind::Plus => BinaryOperator::Add,
        TokenKind::Minus => BinaryOperator::Sub,
        TokenKind::Star => BinaryOperator::Mul,
        TokenKind::Slash => BinaryOperator::Div,
        TokenKind::DoubleSlash => BinaryOperator::IntDiv,
        TokenKind::Percent => BinaryOperator::Mod,
        TokenKind::Caret => BinaryOperator::Pow,
        TokenKind::EqualEqual => BinaryOperator::Equal,
        TokenKind::BangEqual => BinaryOperator::NotEqual,
        TokenKind::Less => BinaryOperator::Less,
        TokenKind::Greater => BinaryOperator::Greater,
        TokenKind::LessEqual => BinaryOperator::LessEqual,
        TokenKind::GreaterEqual => BinaryOperator::GreaterEqual,
        TokenKind::And => BinaryOperator::And,
        TokenKind::Or => BinaryOperator::Or,
        _ => return None,
    };
    Some(op)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{lexer::tokenize, parser::core::parse};

    fn single_statement(source: &str) -> Node {
        let tokens = tokenize("<test>", source).unwrap();
        match parse(&tokens).unwrap() {
            Node::List { mut elements, .. } => elements.remove(0),
            other => panic!("expected a statement list, got {other:?}"),
        }
    }

    fn operator(node: &Node) -> BinaryOperator {
        match node {
            Node::BinOp { op, .. } => *op,
            other => panic!("expected a binary operation, got {other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let node = single_statement("1 + 2 * 3");
        let Node::BinOp { op, right, .. } = &node else { panic!() };
        assert_eq!(*op, BinaryOperator::Add);
        assert_eq!(operator(right), BinaryOperator::Mul);
    }

    #[test]
    fn power_is_right_associative() {
        let node = single_statement("2 ^ 3 ^ 2");
        let Node::BinOp { left, right, .. } = &node else { panic!() };
        assert!(matches!(**left, Node::Number { .. }));
        assert_eq!(operator(right), BinaryOperator::Pow);
    }

    #[test]
    fn subtraction_is_left_associative() {
        let node = single_statement("10 - 3 - 2");
        let Node::BinOp { left, right, .. } = &node else { panic!() };
        assert_eq!(operator(left), BinaryOperator::Sub);
        assert!(matches!(**right, Node::Number { .. }));
    }

    #[test]
    fn logical_operators_bind_loosest() {
        let node = single_statement("1 < 2 and 3 == 3");
        let Node::BinOp { op, left, right, .. } = &node else { panic!() };
        assert_eq!(*op, BinaryOperator::And);
        assert_eq!(operator(left), BinaryOperator::Less);
        assert_eq!(operator(right), BinaryOperator::Equal);
    }

    #[test]
    fn not_applies_to_a_whole_comparison() {
        let node = single_statement("not 1 == 2");
        let Node::UnaryOp { op, operand, .. } = &node else { panic!() };
        assert_eq!(*op, UnaryOperator::Not);
        assert_eq!(operator(operand), BinaryOperator::Equal);
    }

    #[test]
    fn operators_render_as_written() {
        let rendered: Vec<String> = [BinaryOperator::IntDiv, BinaryOperator::NotEqual, BinaryOperator::Or]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, ["//", "!=", "or"]);
        assert_eq!(UnaryOperator::Not.to_string(), "not");
    }
}
