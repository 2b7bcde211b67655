use crate::{
    interpreter::{
        evaluator::{core::EvalResult, core::Interpreter, utils::CallSite},
        value::{
            core::{Value, ValueKind},
            number::Number,
        },
    },
    util::num::f64_to_i64_checked,
};

/// Converts a value to its display string.
///
/// # Errors
/// `TypeError` for functions and built-ins.
///
/// # Example
/// ```
/// let value = kode::run("<stdin>", "to_str([1, \"a\", 2.5]) + \"!\"").unwrap();
/// assert_eq!(value.to_string(), "[[1, a, 2.5]!]");
/// ```
pub fn to_str(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    if args[0].is_function() {
        return Err(site.type_error("Cannot convert Function to String"));
    }
    Ok(site.value(Value::string(args[0].to_string())))
}

/// Converts a number or a numeric string to an integer.
///
/// Floats are truncated towards zero. Strings must spell an integer,
/// optionally surrounded by whitespace.
///
/// # Errors
/// `TypeError` for anything that cannot be converted.
///
/// # Example
/// ```
/// let value = kode::run("<stdin>", "to_int(3.9); to_int(-3.9); to_int(\" 42 \")").unwrap();
/// assert_eq!(value.to_string(), "[3, -3, 42]");
/// assert!(kode::run("<stdin>", "to_int(\"4.5\")").is_err());
/// ```
pub fn to_int(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let converted = match &args[0].kind {
        ValueKind::Number(Number::Int(value)) => Some(*value),
        ValueKind::Number(Number::Float(value)) => f64_to_i64_checked(value.trunc(), ()).ok(),
        ValueKind::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };

    converted.map(|value| site.value(Value::int(value)))
             .ok_or_else(|| site.type_error("Argument can't be converted to Integer"))
}

/// Converts a number or a numeric string to a float.
///
/// # Errors
/// `TypeError` for anything that cannot be converted.
pub fn to_float(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let converted = match &args[0].kind {
        ValueKind::Number(number) => Some(number.as_f64()),
        ValueKind::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    converted.map(|value| site.value(Value::float(value)))
             .ok_or_else(|| site.type_error("Argument can't be converted to Float"))
}
