use std::iter::Peekable;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            collection::{parse_dict, parse_list},
            control::{parse_for, parse_if, parse_while},
            core::{ParseResult, parse_expression},
            function::parse_function_def,
            utils::{current, expect, expect_identifier},
        },
    },
};

/// Parses an atom, the operand every operator ultimately applies to.
///
/// Atoms include:
/// - integer, float and string literals
/// - variable names, optionally qualified by a module (`module.name`)
/// - parenthesised expressions
/// - list (`[...]`) and dictionary (`{...}`) literals
/// - `if`, `for` and `while` expressions
/// - function definitions
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// The node of the atom.
///
/// # Errors
/// `InvalidSyntax` if the current token cannot start an atom.
pub fn parse_atom<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = current(tokens)?;

    match &token.kind {
        TokenKind::Int(value) => {
            tokens.next();
            Ok(Node::Number { value: (*value).into(),
                              span:  token.span.clone(), })
        },
        TokenKind::Float(value) => {
            tokens.next();
            Ok(Node::Number { value: (*value).into(),
                              span:  token.span.clone(), })
        },
        TokenKind::Str(value) => {
            tokens.next();
            Ok(Node::String { value: value.clone(),
                              span:  token.span.clone(), })
        },
        TokenKind::Identifier(name) => {
            tokens.next();
            parse_qualified_name(tokens, name, token)
        },
        TokenKind::LParen => {
            tokens.next();
            let expr = parse_expression(tokens)?;
            expect(tokens, &TokenKind::RParen, "Expected ')'")?;
            Ok(expr)
        },
        TokenKind::LBracket => parse_list(tokens),
        TokenKind::LBrace => parse_dict(tokens),
        TokenKind::If => parse_if(tokens),
        TokenKind::For => parse_for(tokens),
        TokenKind::While => parse_while(tokens),
        TokenKind::Func => parse_function_def(tokens),
        _ => Err(ParseError::invalid_syntax("Expected int or float, identifier, '+', '-', '(', '[', '{', 'if', \
                                             'for', 'while' or 'func'",
                                            &token.span)),
    }
}

/// Parses the rest of a variable reference after its first identifier.
///
/// `name` alone refers to a variable in scope; `name.member` refers to
/// `member` in the module registered as `name`.
fn parse_qualified_name<'a, I>(tokens: &mut Peekable<I>, name: &str, first: &'a Token) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    if current(tokens)?.kind != TokenKind::Dot {
        return Ok(Node::VarAccess { name:   name.to_string(),
                                    module: None,
                                    span:   first.span.clone(), });
    }

    tokens.next();
    let (member, last) = expect_identifier(tokens, "Expected an identifier")?;
    Ok(Node::VarAccess { name:   member,
                         module: Some(name.to_string()),
                         span:   first.span.to(&last.span), })
}
