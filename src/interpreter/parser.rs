/// Entry points of the parser.
///
/// Contains `parse`, which turns a whole token sequence into a program, and
/// the expression rule with variable assignment.
pub mod core;

/// Literal and primary expressions.
///
/// Parses numbers, strings, names, parenthesised expressions and dispatches
/// to the compound expressions that start with a keyword or bracket.
pub mod atom;

/// Binary operator parsing.
///
/// Implements the precedence ladder from `and`/`or` down to `^`.
pub mod binary;

/// Statement sequences and block bodies.
///
/// Parses newline-separated statements, backtracking over a statement that
/// fails after a newline so the enclosing construct can end the block.
pub mod block;

/// List and dictionary literals.
pub mod collection;

/// Conditional and loop expressions.
///
/// Parses `if`/`elif`/`else`, both forms of `for`, and `while`, each with an
/// inline or a block body.
pub mod control;

/// Function definitions and calls.
pub mod function;

/// Single statements: `return`, `continue`, `break` or an expression.
pub mod statement;

/// Unary operators.
pub mod unary;

/// Utility functions for the parser.
///
/// Provides token inspection, expectation and error-surfacing helpers shared
/// by all parsing rules.
pub mod utils;
