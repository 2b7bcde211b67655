use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Node},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            binary::{parse_binary_chain, parse_comparison},
            block::parse_statements,
            utils::{current, expect, expect_identifier, or_expected, skip_newlines, surface_error},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program.
///
/// A program is a sequence of statements separated by newlines or `;`. The
/// result is a `Node::List` holding one node per statement. A program with
/// nothing but newlines and comments parses to an empty list.
///
/// Grammar: `program := NEWLINE* statement (NEWLINE+ statement)* NEWLINE* EOF`
///
/// # Parameters
/// - `tokens`: The token sequence produced by the lexer, ending with `Eof`.
///
/// # Returns
/// The root node of the program.
///
/// # Errors
/// An `InvalidSyntax` error located at the first token that could not be
/// placed in the grammar.
///
/// # Example
/// ```
/// use kode::{
///     ast::Node,
///     interpreter::{lexer::tokenize, parser::core::parse},
/// };
///
/// let tokens = tokenize("<stdin>", "var a = 1; a + 2").unwrap();
/// let Node::List { elements, .. } = parse(&tokens).unwrap() else {
///     panic!("a program parses to a list of statements");
/// };
/// assert_eq!(elements.len(), 2);
///
/// let tokens = tokenize("<stdin>", "1 +").unwrap();
/// assert!(parse(&tokens).is_err());
/// ```
pub fn parse(tokens: &[Token]) -> ParseResult<Node> {
    let mut tokens = tokens.iter().peekable();

    skip_newlines(&mut tokens);
    let first = current(&mut tokens)?;
    if first.kind == TokenKind::Eof {
        return Ok(Node::List { elements: Vec::new(),
                               span:     first.span.clone(), });
    }

    let program = parse_statements(&mut tokens)?;

    if current(&mut tokens)?.kind != TokenKind::Eof {
        return Err(surface_error(&mut tokens,
                                 "Expected '+', '-', '*', '/', '//', '%', '^', a comparison, 'and', 'or' or a new line"));
    }
    Ok(program)
}

/// Parses an expression.
///
/// An expression is either a variable assignment or a chain of comparisons
/// joined by `and`/`or`, which bind loosest of all operators and associate
/// to the left.
///
/// Grammar:
/// ```text
///     expression := "var" IDENTIFIER "=" expression
///                 | comparison (("and" | "or") comparison)*
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A `Node::VarAssign`, or the node of the operator chain.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let start = current(tokens)?;

    if start.kind == TokenKind::Var {
        tokens.next();
        let (name, _) = expect_identifier(tokens, "Expected identifier")?;
        expect(tokens, &TokenKind::Equals, "Expected '='")?;
        let value = parse_expression(tokens)?;
        let span = start.span.to(value.span());
        return Ok(Node::VarAssign { name,
                                    value: Box::new(value),
                                    span });
    }

    let result = parse_binary_chain(tokens,
                                    parse_comparison,
                                    &[BinaryOperator::And, BinaryOperator::Or],
                                    parse_comparison);
    or_expected(result,
                start,
                "Expected int or float, identifier, 'var', 'if', 'for', 'while', 'func', '+', '-', '(', '[', '{' or 'not'")
}
