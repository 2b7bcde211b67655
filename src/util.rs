/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss, and for resolving
/// script-level indices against container lengths.
///
/// All conversion functions return a `Result` carrying a caller-supplied
/// error, so each call site decides how a failed conversion is reported.
pub mod num;
