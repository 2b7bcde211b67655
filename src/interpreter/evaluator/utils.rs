use std::rc::Rc;

use crate::{
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        evaluator::core::Unwind,
        position::Span,
        scope::Context,
        value::{
            core::{DictRef, ListRef, Value},
            number::Number,
        },
    },
};

/// Where a built-in was called from.
///
/// Errors raised by a built-in point at the whole call expression and carry
/// the built-in's own context, so the traceback ends inside the built-in.
pub struct CallSite {
    pub span:    Span,
    pub context: Rc<Context>,
}

impl CallSite {
    /// Builds an error of the given kind located at the call.
    #[must_use]
    pub fn error(&self, kind: RuntimeErrorKind) -> Unwind {
        Unwind::Error(RuntimeError::new(kind, Some(self.span.clone()), Some(Rc::clone(&self.context))))
    }

    #[must_use]
    pub fn type_error(&self, details: &str) -> Unwind {
        self.error(RuntimeErrorKind::TypeError { details: details.to_string() })
    }

    #[must_use]
    pub fn domain_error(&self, details: &str) -> Unwind {
        self.error(RuntimeErrorKind::DomainError { details: details.to_string() })
    }

    #[must_use]
    pub fn out_of_bounds(&self, details: &str) -> Unwind {
        self.error(RuntimeErrorKind::IndexOutOfBounds { details: details.to_string() })
    }

    /// Stamps a built-in's result with the call span and context.
    #[must_use]
    pub fn value(&self, value: Value) -> Value {
        value.with_span(self.span.clone())
             .with_context(Rc::clone(&self.context))
    }
}

/// Returns the list inside `value`, or a `TypeError` with `message`.
pub fn expect_list<'v>(value: &'v Value, site: &CallSite, message: &str) -> Result<&'v ListRef, Unwind> {
    value.as_list().ok_or_else(|| site.type_error(message))
}

/// Returns the dictionary inside `value`, or a `TypeError` with `message`.
pub fn expect_dict<'v>(value: &'v Value, site: &CallSite, message: &str) -> Result<&'v DictRef, Unwind> {
    value.as_dict().ok_or_else(|| site.type_error(message))
}

/// Returns the text inside `value`, or a `TypeError` with `message`.
pub fn expect_string<'v>(value: &'v Value, site: &CallSite, message: &str) -> Result<&'v str, Unwind> {
    value.as_str().ok_or_else(|| site.type_error(message))
}

/// Returns the number inside `value`, or a `TypeError` with `message`.
pub fn expect_number(value: &Value, site: &CallSite, message: &str) -> Result<Number, Unwind> {
    value.as_number().ok_or_else(|| site.type_error(message))
}

/// Returns the integral value of a number argument.
///
/// # Errors
/// `TypeError` with `message` for non-numbers and `DomainError` for numbers
/// with a fractional part or outside the integer range.
pub fn expect_integer(value: &Value, site: &CallSite, message: &str) -> Result<i64, Unwind> {
    expect_number(value, site, message)?.as_integral()
                                        .ok_or_else(|| site.domain_error("Argument must be an integer"))
}

/// Returns the single character of a one-character string argument.
pub fn expect_char(value: &Value, site: &CallSite) -> Result<char, Unwind> {
    let text = expect_string(value, site, "Second argument must be a string")?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(site.type_error("Second argument must be a single character string")),
    }
}
