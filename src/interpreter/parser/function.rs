use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{FunctionDef, KeywordArg, Node},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            atom::parse_atom,
            block::parse_statements,
            core::{ParseResult, parse_expression},
            utils::{advance, check, current, expect, expect_identifier, or_expected, surface_error},
        },
    },
};

/// Parses an atom followed by an optional argument list.
///
/// Positional arguments come first. A `name=value` argument turns the
/// preceding positional argument into a keyword; every argument after it
/// must then be a keyword too.
///
/// Grammar:
/// ```text
///     call     := atom ("(" arguments? ")")?
///     arguments := expression ("," expression)* ("=" expression ("," IDENTIFIER "=" expression)*)?
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A `Node::Call`, or the atom itself if no `(` follows it.
pub fn parse_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let callee = parse_atom(tokens)?;

    if !check(tokens, &TokenKind::LParen) {
        return Ok(callee);
    }
    tokens.next();

    let mut args = Vec::new();
    let mut keyword_args = Vec::new();

    if !check(tokens, &TokenKind::RParen) {
        let start = current(tokens)?;
        args.push(or_expected(parse_expression(tokens),
                              start,
                              "Expected ')', 'var', 'if', 'for', 'while', 'func', int, float, identifier, '+', \
                               '-', '(', '[', '{' or 'not'")?);

        while check(tokens, &TokenKind::Comma) {
            tokens.next();
            args.push(parse_expression(tokens)?);
        }

        if check(tokens, &TokenKind::Equals) {
            let equals = advance(tokens)?;
            let name = match args.pop() {
                Some(Node::VarAccess { name, module: None, .. }) => name,
                _ => return Err(ParseError::invalid_syntax("Expected an identifier", &equals.span)),
            };
            keyword_args.push(KeywordArg { name,
                                           value: parse_expression(tokens)? });

            while check(tokens, &TokenKind::Comma) {
                tokens.next();
                let (name, _) = expect_identifier(tokens, "Expected identifier")?;
                expect(tokens, &TokenKind::Equals, "Expected '='")?;
                keyword_args.push(KeywordArg { name,
                                               value: parse_expression(tokens)? });
            }
        }
    }

    let close = expect(tokens, &TokenKind::RParen, "Expected ',' or ')'")?;
    let span = callee.span().to(&close.span);
    Ok(Node::Call { callee: Box::new(callee),
                    args,
                    keyword_args,
                    span })
}

/// Parses a named or anonymous function definition.
///
/// Syntax:
/// ```text
///     func [name](a, b, c=<atom>, d=<atom>) -> <expression>
///
///     func [name](a, b) {
///         <statements>
///     }
/// ```
/// Parameters with a default are optional and must follow every required
/// parameter. Defaults are atoms. An arrow body returns its value
/// implicitly; a brace body needs an explicit `return`.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `func` keyword.
///
/// # Returns
/// A `Node::FunctionDef`.
///
/// # Errors
/// `InvalidSyntax` for a malformed parameter list or a missing body.
pub fn parse_function_def<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let func_token = advance(tokens)?;

    let name = match current(tokens)?.identifier() {
        Some(name) => {
            tokens.next();
            expect(tokens, &TokenKind::LParen, "Expected '('")?;
            Some(name.to_string())
        },
        None => {
            expect(tokens, &TokenKind::LParen, "Expected identifier or '('")?;
            None
        },
    };

    let (params, optional_params) = parse_parameters(tokens)?;

    let (body, should_auto_return, end) = if check(tokens, &TokenKind::Arrow) {
        tokens.next();
        let body = parse_expression(tokens)?;
        let end = body.span().clone();
        (body, true, end)
    } else {
        expect(tokens, &TokenKind::LBrace, "Expected '->' or '{'")?;
        expect(tokens, &TokenKind::NewLine, "Expected a new line")?;
        let body = parse_statements(tokens)?;
        let close = if check(tokens, &TokenKind::RBrace) {
            advance(tokens)?
        } else {
            return Err(surface_error(tokens, "Expected '}'"));
        };
        (body, false, close.span.clone())
    };

    Ok(Node::FunctionDef(Rc::new(FunctionDef { name,
                                               params,
                                               optional_params,
                                               body: Rc::new(body),
                                               should_auto_return,
                                               span: func_token.span.to(&end) })))
}

type Parameters = (Vec<String>, Vec<(String, Node)>);

/// Parses the parameter list after `(`, including the closing `)`.
fn parse_parameters<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Parameters>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut params = Vec::new();
    let mut optional_params = Vec::new();

    if check(tokens, &TokenKind::RParen) {
        tokens.next();
        return Ok((params, optional_params));
    }

    let (first, _) = expect_identifier(tokens, "Expected identifier or ')'")?;
    params.push(first);

    while check(tokens, &TokenKind::Comma) {
        tokens.next();
        let (param, _) = expect_identifier(tokens, "Expected identifier")?;
        params.push(param);
    }

    if check(tokens, &TokenKind::Equals) {
        tokens.next();
        if let Some(param) = params.pop() {
            optional_params.push((param, parse_atom(tokens)?));
        }

        while check(tokens, &TokenKind::Comma) {
            tokens.next();
            let (param, _) = expect_identifier(tokens, "Expected identifier")?;
            expect(tokens, &TokenKind::Equals, "Expected '='")?;
            optional_params.push((param, parse_atom(tokens)?));
        }
    }

    expect(tokens, &TokenKind::RParen, "Expected ',' or ')'")?;
    Ok((params, optional_params))
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
    fn arrow_function_with_defaults() {
        let Node::FunctionDef(def) = first_statement("func f(a, b=2, c=\"x\") -> a + b").unwrap() else {
            panic!()
        };
        assert_eq!(def.name.as_deref(), Some("f"));
        assert_eq!(def.params, ["a"]);
        let optional: Vec<&str> = def.optional_params.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(optional, ["b", "c"]);
        assert!(def.should_auto_return);
    }

    #[test]
    fn brace_function_body() {
        let Node::FunctionDef(def) = first_statement("func (x) {\n  return x\n}").unwrap() else { panic!() };
        assert!(def.name.is_none());
        assert!(!def.should_auto_return);
    }

    #[test]
    fn required_parameter_after_default_is_rejected() {
        let error = first_statement("func f(a=1, b) -> b").unwrap_err();
        assert_eq!(error.kind.to_string(), "Invalid Syntax: Expected '='");
    }

    #[test]
    fn call_with_keyword_arguments() {
        let Node::Call { args, keyword_args, .. } = first_statement("f(1, 2, c=3, d=4)").unwrap() else {
            panic!()
        };
        assert_eq!(args.len(), 2);
        let names: Vec<&str> = keyword_args.iter().map(|arg| arg.name.as_str()).collect();
        assert_eq!(names, ["c", "d"]);
    }

    #[test]
    fn keyword_name_must_be_an_identifier() {
        let error = first_statement("f(1 = 2)").unwrap_err();
        assert_eq!(error.kind.to_string(), "Invalid Syntax: Expected an identifier");
    }

    #[test]
    fn unclosed_call() {
        let error = first_statement("print(1 2)").unwrap_err();
        assert_eq!(error.kind.to_string(), "Invalid Syntax: Expected ',' or ')'");
    }
}
