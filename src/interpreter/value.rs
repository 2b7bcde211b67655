/// The `Value` type and its display and truthiness rules.
pub mod core;
/// The `Number` type and its arithmetic.
///
/// Integers and floats share one type; integer arithmetic is checked and
/// mixed arithmetic promotes to floating point.
pub mod number;
/// Operator dispatch over values.
///
/// Implements every binary and unary operator of the language on top of
/// `Value`, reporting illegal operand combinations as runtime errors.
pub mod ops;
