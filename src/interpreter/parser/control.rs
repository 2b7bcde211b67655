use std::iter::Peekable;

use crate::{
    ast::{ElseCase, ForEach, ForRange, IfCase, Node},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            block::{expect_end, parse_body},
            core::{ParseResult, parse_expression},
            utils::{advance, check, error_at, expect, expect_identifier, surface_error},
        },
        position::Span,
    },
};

/// Parses an `if` expression with optional `elif` cases and `else` branch.
///
/// Syntax:
/// ```text
///     if <condition>: <statement> [elif ...] [else: <statement>]
///
///     if <condition>:
///         <statements>
///     elif <condition>:
///         <statements>
///     else:
///         <statements>
///     end
/// ```
/// Inline cases evaluate to the value of their statement. A block case must
/// be followed by `end`, `elif` or `else`, and a block `else` by `end`.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `if` keyword.
///
/// # Returns
/// A `Node::If` with every case in source order.
///
/// # Errors
/// - `InvalidSyntax` if a `:` or the closing `end` is missing.
/// - Propagates any errors from the conditions and bodies.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let if_token = advance(tokens)?;
    let mut cases = Vec::new();

    loop {
        let condition = parse_expression(tokens)?;
        expect(tokens, &TokenKind::Colon, "Expected ':'")?;
        let (body, is_block) = parse_body(tokens)?;
        let mut end = body.span().clone();
        cases.push(IfCase { condition,
                            body,
                            should_return_null: is_block });

        if is_block && check(tokens, &TokenKind::End) {
            end = advance(tokens)?.span.clone();
            return Ok(Node::If { cases,
                                 else_case: None,
                                 span: if_token.span.to(&end) });
        }

        if check(tokens, &TokenKind::Elif) {
            tokens.next();
            continue;
        }

        if check(tokens, &TokenKind::Else) {
            tokens.next();
            expect(tokens, &TokenKind::Colon, "Expected ':'")?;
            let (body, is_block) = parse_body(tokens)?;
            end = if is_block { expect_end(tokens)?.span.clone() } else { body.span().clone() };
            return Ok(Node::If { cases,
                                 else_case: Some(Box::new(ElseCase { body,
                                                                     should_return_null: is_block })),
                                 span: if_token.span.to(&end) });
        }

        if is_block {
            return Err(surface_error(tokens, "Expected 'end', 'elif' or 'else'"));
        }

        return Ok(Node::If { cases,
                             else_case: None,
                             span: if_token.span.to(&end) });
    }
}

/// Parses a counting or a for-each loop.
///
/// Syntax:
/// ```text
///     for <name> = <start> to <end> [step <step>]: <body>
///     for <name> in <iterable>: <body>
/// ```
/// A block body starts on the line after the `:` and ends with `end`.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `for` keyword.
///
/// # Returns
/// A `Node::For` or a `Node::ForEach`.
pub fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let for_token = advance(tokens)?;
    let (var, _) = expect_identifier(tokens, "Expected identifier")?;

    if check(tokens, &TokenKind::Equals) {
        tokens.next();
        let start = parse_expression(tokens)?;
        expect(tokens, &TokenKind::To, "Expected 'to'")?;
        let end = parse_expression(tokens)?;
        let step = if check(tokens, &TokenKind::Step) {
            tokens.next();
            Some(Box::new(parse_expression(tokens)?))
        } else {
            None
        };
        let (body, should_return_null, span) = parse_loop_body(tokens, for_token)?;

        return Ok(Node::For(ForRange { var,
                                       start: Box::new(start),
                                       end: Box::new(end),
                                       step,
                                       body: Box::new(body),
                                       should_return_null,
                                       span }));
    }

    if check(tokens, &TokenKind::In) {
        tokens.next();
        let iterable = parse_expression(tokens)?;
        let (body, should_return_null, span) = parse_loop_body(tokens, for_token)?;

        return Ok(Node::ForEach(ForEach { var,
                                          iterable: Box::new(iterable),
                                          body: Box::new(body),
                                          should_return_null,
                                          span }));
    }

    Err(error_at(tokens, "Expected '=' or 'in'"))
}

/// Parses a `while` loop.
///
/// Syntax: `while <condition>: <body>`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `while` keyword.
///
/// # Returns
/// A `Node::While`.
pub fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let while_token = advance(tokens)?;
    let condition = parse_expression(tokens)?;
    let (body, should_return_null, span) = parse_loop_body(tokens, while_token)?;

    Ok(Node::While { condition: Box::new(condition),
                     body: Box::new(body),
                     should_return_null,
                     span })
}

/// Parses `: body` of a loop, including the closing `end` of a block body.
fn parse_loop_body<'a, I>(tokens: &mut Peekable<I>, keyword: &Token) -> ParseResult<(Node, bool, Span)>
    where I: Iterator<Item = &'a Token> + Clone
{
    expect(tokens, &TokenKind::Colon, "Expected ':'")?;
    let (body, is_block) = parse_body(tokens)?;
    let end = if is_block { expect_end(tokens)?.span.clone() } else { body.span().clone() };
    Ok((body, is_block, keyword.span.to(&end)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{lexer::tokenize, parser::core::parse};

    fn first_statement(source: &str) -> ParseResult<Node> {
        match parse(&tokenize("<test>", source).unwrap())? {
            Node::List { mut elements, .. } => Ok(elements.remove(0)),
            other => panic!("expected a statement list, got {other:?}"),
        }
    }

    #[test]
    fn inline_if_with_elif_and_else() {
        let node = first_statement("if 0: 1 elif 1: 2 else: 3").unwrap();
        let Node::If { cases, else_case, .. } = node else { panic!() };
        assert_eq!(cases.len(), 2);
        assert!(cases.iter().all(|case| !case.should_return_null));
        assert!(else_case.is_some_and(|case| !case.should_return_null));
    }

    #[test]
    fn block_if_requires_a_terminator() {
        assert!(first_statement("if 1:\n  2\nend").is_ok());
        let error = first_statement("if 1:\n  2\n").unwrap_err();
        assert_eq!(error.kind.to_string(), "Invalid Syntax: Expected 'end', 'elif' or 'else'");
    }

    #[test]
    fn block_else_requires_end() {
        let error = first_statement("if 1:\n  2\nelse:\n  3\n").unwrap_err();
        assert_eq!(error.kind.to_string(), "Invalid Syntax: Expected 'end'");
    }

    #[test]
    fn counting_loop_with_step() {
        let Node::For(range) = first_statement("for i = 10 to 0 step -2: i").unwrap() else { panic!() };
        assert_eq!(range.var, "i");
        assert!(range.step.is_some());
        assert!(!range.should_return_null);
    }

    #[test]
    fn for_each_block_loop() {
        let Node::ForEach(each) = first_statement("for x in [1, 2]:\n  x\nend").unwrap() else { panic!() };
        assert_eq!(each.var, "x");
        assert!(each.should_return_null);
    }

    #[test]
    fn for_without_assignment_or_in() {
        let error = first_statement("for i to 3: i").unwrap_err();
        assert_eq!(error.kind.to_string(), "Invalid Syntax: Expected '=' or 'in'");
    }

    #[test]
    fn errors_inside_blocks_are_reported_where_they_occur() {
        let error = first_statement("while 1:\n  var = 2\nend").unwrap_err();
        assert_eq!(error.kind.to_string(), "Invalid Syntax: Expected identifier");
        assert_eq!(error.span.unwrap().start.line, 1);
    }
}
