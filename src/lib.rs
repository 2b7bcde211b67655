//! # kode
//!
//! kode is a tree-walking interpreter for KodeScript, a small imperative
//! scripting language. It lexes, parses and evaluates `.kode` scripts with
//! support for first-class functions, lists, dictionaries, modules and a
//! catalogue of built-in functions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use crate::{
    error::Error,
    interpreter::{evaluator::core::Interpreter, value::core::Value},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum that represents the syntactic
/// structure of a script as a tree. The AST is built by the parser and
/// traversed by the evaluator; every node carries the source span it was
/// parsed from.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// Every error carries the span it was raised at so that the report can
/// underline the offending source. Runtime errors additionally carry the
/// call context chain used to render a traceback.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, the value model
/// and scoping to provide a complete runtime for KodeScript programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Owns the session state (global table and module registry).
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `i64`, `usize`, and `f64` without silent data
///   loss.
/// - Resolve script-level indices against container lengths.
pub mod util;

/// Runs a script in a fresh interpreter session and returns its value.
///
/// A whole program evaluates to a list holding the value of every top-level
/// statement. Use [`Interpreter`] directly to keep globals and imported
/// modules alive between runs.
///
/// # Errors
/// Returns the first lexical, syntax or runtime error encountered.
///
/// # Examples
/// ```
/// use kode::run;
///
/// let value = run("<stdin>", "var x = 2 + 2\nx * 10").unwrap();
/// assert_eq!(value.to_string(), "[4, 40]");
///
/// // 'y' is never defined
/// assert!(run("<stdin>", "var x = y + 1").is_err());
/// ```
pub fn run(filename: &str, source: &str) -> Result<Value, Error> {
    Interpreter::new().run(filename, source, "")
}
