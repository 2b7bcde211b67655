use crate::{
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::{CallSite, expect_char, expect_number, expect_string},
        },
        value::core::Value,
    },
    util::num::f64_to_i64_checked,
};

/// Concatenates two strings.
pub fn concat(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let first = expect_string(&args[0], site, "First argument must be a string")?;
    let second = expect_string(&args[1], site, "Second argument must be a string")?;
    Ok(site.value(Value::string(format!("{first}{second}"))))
}

/// Splits a string at every occurrence of a character.
///
/// # Returns
/// A list of strings. Adjacent separators produce empty strings.
///
/// # Example
/// ```
/// let value = kode::run("<stdin>", "split_char(\"a,b,,c\", \",\")").unwrap();
/// assert_eq!(value.to_string(), "[[a, b, , c]]");
/// ```
pub fn split_char(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let text = expect_string(&args[0], site, "First argument must be a string")?;
    let separator = expect_char(&args[1], site)?;

    let parts = text.split(separator)
                    .map(|part| site.value(Value::string(part)))
                    .collect();
    Ok(site.value(Value::list(parts)))
}

/// Returns the characters of a string from `start` up to, but excluding,
/// `end`.
///
/// # Errors
/// - `TypeError` for arguments of the wrong kind.
/// - `IndexOutOfBounds` if either bound exceeds the string length, or if
///   `end` is before `start`.
/// - `DomainError` for bounds that are negative or not whole numbers.
///
/// # Example
/// ```
/// let value = kode::run("<stdin>", "slice(\"héllo\", 1, 4)").unwrap();
/// assert_eq!(value.to_string(), "[éll]");
/// ```
pub fn slice(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let text = expect_string(&args[0], site, "First argument must be a string")?;
    let start = expect_number(&args[1], site, "Second argument must be a number")?;
    let end = expect_number(&args[2], site, "Third argument must be a number")?;

    let length = text.chars().count();
    let bound = |number: f64| f64_to_i64_checked(number, ()).ok()
                                                            .and_then(|value| usize::try_from(value).ok());

    #[allow(clippy::cast_precision_loss)]
    let length_f64 = length as f64;
    if start.as_f64() > length_f64 {
        return Err(site.out_of_bounds("Second argument exceeds the maximum string length"));
    }
    if end.as_f64() > length_f64 {
        return Err(site.out_of_bounds("Third argument exceeds the maximum string length"));
    }
    if end.as_f64() < start.as_f64() {
        return Err(site.out_of_bounds("Third argument exceeds the start index value"));
    }

    let (Some(start), Some(end)) = (bound(start.as_f64()), bound(end.as_f64())) else {
        return Err(site.domain_error("Slice bounds must be non-negative integers"));
    };

    let sliced: String = text.chars().skip(start).take(end - start).collect();
    Ok(site.value(Value::string(sliced)))
}

/// Counts the occurrences of a character in a string.
pub fn frequency(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let text = expect_string(&args[0], site, "First argument must be a string")?;
    let wanted = expect_char(&args[1], site)?;

    let count = text.chars().filter(|&c| c == wanted).count();
    let count = i64::try_from(count).unwrap_or(i64::MAX);
    Ok(site.value(Value::int(count)))
}

/// Returns the character index of the first occurrence of a character, or
/// `-1` if it does not occur.
///
/// # Example
/// ```
/// let value = kode::run("<stdin>", "findIndex(\"kode\", \"d\"); findIndex(\"kode\", \"z\")").unwrap();
/// assert_eq!(value.to_string(), "[2, -1]");
/// ```
pub fn find_index(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let text = expect_string(&args[0], site, "First argument must be a string")?;
    let wanted = expect_char(&args[1], site)?;

    let index = text.chars()
                    .position(|c| c == wanted)
                    .and_then(|index| i64::try_from(index).ok())
                    .unwrap_or(-1);
    Ok(site.value(Value::int(index)))
}
