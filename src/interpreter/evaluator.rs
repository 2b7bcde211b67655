/// The interpreter session and node dispatch.
///
/// Contains the `Interpreter` that owns the global table and module registry,
/// the control-flow channel used during evaluation, and the host entry point.
pub mod core;

/// Binary operator evaluation.
///
/// Evaluates both operands and dispatches to the left operand's value
/// operations.
pub mod binary;

/// Unary operator evaluation.
pub mod unary;

/// Conditional and `while` evaluation.
pub mod control;

/// Evaluation of counting and for-each loops.
///
/// Manages the loop variable and collects the body values of inline loops.
pub mod for_loop;

/// Utility types for evaluation.
///
/// Provides the call site handed to built-ins and helpers that check argument
/// kinds.
pub mod utils;

/// Function definitions, the call protocol and the built-in catalogue.
pub mod function;
