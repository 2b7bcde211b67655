use std::iter::Peekable;

use crate::{
    ast::{DictEntry, Node},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{advance, check, current, expect, or_expected},
        },
    },
};

/// Parses a list literal.
///
/// Grammar: `list := "[" (expression ("," expression)*)? "]"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening bracket.
///
/// # Returns
/// A `Node::List` with the element expressions in source order.
pub fn parse_list<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let open = advance(tokens)?;
    let mut elements = Vec::new();

    if !check(tokens, &TokenKind::RBracket) {
        let start = current(tokens)?;
        let first = parse_expression(tokens);
        elements.push(or_expected(first,
                                  start,
                                  "Expected ']', 'var', 'if', 'for', 'while', 'func', int, float, identifier, \
                                   '+', '-', '(', '[', '{' or 'not'")?);

        while check(tokens, &TokenKind::Comma) {
            tokens.next();
            elements.push(parse_expression(tokens)?);
        }
    }

    let close = expect(tokens, &TokenKind::RBracket, "Expected ',' or ']'")?;
    Ok(Node::List { elements,
                    span: open.span.to(&close.span) })
}

/// Parses a dictionary literal.
///
/// Keys must be string literals. Writing a key twice keeps its first
/// position and the last value.
///
/// Grammar: `dict := "{" (STRING ":" expression ("," STRING ":" expression)*)? "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening brace.
///
/// # Returns
/// A `Node::Dict` with unique keys.
pub fn parse_dict<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let open = advance(tokens)?;
    let mut entries: Vec<DictEntry> = Vec::new();

    if !check(tokens, &TokenKind::RBrace) {
        loop {
            let (key, value) = parse_dict_entry(tokens)?;
            match entries.iter_mut().find(|entry| entry.key == key) {
                Some(entry) => entry.value = value,
                None => entries.push(DictEntry { key, value }),
            }

            if !check(tokens, &TokenKind::Comma) {
                break;
            }
            tokens.next();
        }
    }

    let close = expect(tokens, &TokenKind::RBrace, "Expected ',' or '}'")?;
    Ok(Node::Dict { entries,
                    span: open.span.to(&close.span) })
}

fn parse_dict_entry<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<(String, Node)>
    where I: Iterator<Item = &'a Token> + Clone
{
    let key_start = current(tokens)?;
    let key = match parse_expression(tokens) {
        Ok(Node::String { value, .. }) => value,
        Ok(_) => return Err(ParseError::invalid_syntax("Expected string", &key_start.span)),
        Err(error) if error.index() == Some(key_start.span.start.index) => {
            return Err(ParseError::invalid_syntax("Expected string or '}'", &key_start.span));
        },
        Err(error) => return Err(error),
    };

    expect(tokens, &TokenKind::Colon, "Expected ':'")?;

    let value_start = current(tokens)?;
    let value = or_expected(parse_expression(tokens),
                            value_start,
                            "Expected 'var', 'if', 'for', 'while', 'func', int, float, identifier, '+', '-', '(', \
                             '[', '{' or 'not'")?;
    Ok((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{lexer::tokenize, parser::core::parse, value::number::Number};

    fn parse_source(source: &str) -> ParseResult<Node> {
        parse(&tokenize("<test>", source).unwrap())
    }

    #[test]
    fn duplicate_keys_keep_first_position_and_last_value() {
        let Node::List { elements, .. } = parse_source("{\"a\": 1, \"b\": 2, \"a\": 3}").unwrap() else {
            panic!()
        };
        let Node::Dict { entries, .. } = &elements[0] else { panic!() };
        let keys: Vec<&str> = entries.iter().map(|entry| entry.key.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
        assert!(matches!(entries[0].value, Node::Number { value, .. } if value == Number::Int(3)));
    }

    #[test]
    fn non_string_keys_are_rejected() {
        let error = parse_source("{1: 2}").unwrap_err();
        assert_eq!(error.kind.to_string(), "Invalid Syntax: Expected string");
    }

    #[test]
    fn unclosed_list_reports_the_missing_bracket() {
        let error = parse_source("[1, 2").unwrap_err();
        assert_eq!(error.kind.to_string(), "Invalid Syntax: Expected ',' or ']'");
    }

    #[test]
    fn empty_literals_parse() {
        assert!(parse_source("[]").is_ok());
        assert!(parse_source("{}").is_ok());
    }
}
