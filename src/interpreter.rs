/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// dispatches operators to the value model, manages scopes, and exposes the
/// catalogue of built-in functions. It is the core execution engine of the
/// interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, forwarding return/break/continue signals.
/// - Implements the function call protocol for user and built-in functions.
/// - Reports runtime errors such as division by zero or illegal operations.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// carrying the span it was read from. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into positioned tokens.
/// - Handles numeric and string literals, identifiers, keywords and
///   operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Validates grammar, backtracking over optional branches.
/// - Reports the first committed syntax error with its location.
pub mod parser;
/// Source positions and spans.
///
/// Positions identify a character within a named source file and are attached
/// to every token, node, value and error for diagnostics.
pub mod position;
/// Symbol tables, call contexts and the module registry.
pub mod scope;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the values a script can produce: numbers, strings,
/// lists, dictionaries, user functions and built-in functions, together with
/// the operator contract shared by all of them.
///
/// # Responsibilities
/// - Defines the `Value` type and all supported variants.
/// - Implements arithmetic, comparison and boolean operators.
/// - Implements display and truthiness rules.
pub mod value;
