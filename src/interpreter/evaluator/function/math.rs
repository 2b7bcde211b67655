use crate::{
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::{CallSite, expect_integer, expect_number},
        },
        value::{core::Value, number::Number},
    },
};

/// Returns the absolute value of a number, keeping its kind.
pub fn abs(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let number = match expect_number(&args[0], site, "Argument must be a number")? {
        Number::Int(value) => Number::Int(value.checked_abs()
                                               .ok_or_else(|| site.error(RuntimeErrorKind::Overflow))?),
        Number::Float(value) => Number::Float(value.abs()),
    };
    Ok(site.value(Value::number(number)))
}

/// Returns the smaller (or, with `largest`, the larger) of two numbers.
///
/// On a tie the first argument is returned, so `min(1, 1.0)` is `1`.
///
/// # Example
/// ```
/// let value = kode::run("<stdin>", "min(3, 2.5); max(3, 2.5); min(1, 1.0)").unwrap();
/// assert_eq!(value.to_string(), "[2.5, 3, 1]");
/// ```
pub fn min_max(args: &[Value], site: &CallSite, largest: bool) -> EvalResult<Value> {
    let a = expect_number(&args[0], site, "Argument must be a number")?;
    let b = expect_number(&args[1], site, "Argument must be a number")?;

    let wanted = if largest { std::cmp::Ordering::Greater } else { std::cmp::Ordering::Less };
    let result = if b.compare(a) == Some(wanted) { b } else { a };
    Ok(site.value(Value::number(result)))
}

/// Returns the list of integers from `begin` up to, but excluding, `end`.
///
/// # Errors
/// `TypeError` for non-numbers, `DomainError` for fractional bounds.
///
/// # Example
/// ```
/// let value = kode::run("<stdin>", "range(2, 6); range(3, 1)").unwrap();
/// assert_eq!(value.to_string(), "[[2, 3, 4, 5], []]");
/// ```
pub fn range(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let begin = expect_integer(&args[0], site, "First argument must be a number")?;
    let end = expect_integer(&args[1], site, "Second argument must be a number")?;

    let elements = (begin..end).map(|i| site.value(Value::int(i))).collect();
    Ok(site.value(Value::list(elements)))
}

/// Formats an integer in octal with a `0o` prefix.
///
/// # Example
/// ```
/// let value = kode::run("<stdin>", "oct(15); oct(-8); oct(0)").unwrap();
/// assert_eq!(value.to_string(), "[0o17, -0o10, 0o0]");
/// ```
pub fn oct(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let number = expect_integer(&args[0], site, "Argument must be a number")?;

    let sign = if number < 0 { "-" } else { "" };
    Ok(site.value(Value::string(format!("{sign}0o{:o}", number.unsigned_abs()))))
}

/// Computes the factorial of an integer. Values below `1` yield `1`.
///
/// # Errors
/// `Overflow` when the result exceeds the integer range.
///
/// # Example
/// ```
/// let value = kode::run("<stdin>", "fact(5); fact(0)").unwrap();
/// assert_eq!(value.to_string(), "[120, 1]");
/// assert!(kode::run("<stdin>", "fact(30)").is_err());
/// ```
pub fn fact(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let number = expect_integer(&args[0], site, "Argument must be a number")?;

    let result = (1..=number).try_fold(1_i64, i64::checked_mul)
                             .ok_or_else(|| site.error(RuntimeErrorKind::Overflow))?;
    Ok(site.value(Value::int(result)))
}

/// Returns `1` if a positive integer is prime, `0` otherwise.
///
/// # Errors
/// `DomainError` for fractional numbers and numbers below `1`.
///
/// # Example
/// ```
/// let value = kode::run("<stdin>", "is_prime(1); is_prime(2); is_prime(91); is_prime(97)").unwrap();
/// assert_eq!(value.to_string(), "[0, 1, 0, 1]");
/// ```
pub fn is_prime(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let number = expect_number(&args[0], site, "Argument must be a number")?;
    let Some(n) = number.as_integral() else {
        return Err(site.domain_error("Argument must be a positive integer"));
    };
    if n <= 0 {
        return Err(site.domain_error("Argument must be a positive number"));
    }

    Ok(site.value(Value::boolean(is_prime_number(n.unsigned_abs()))))
}

fn is_prime_number(n: u64) -> bool {
    match n {
        0 | 1 => false,
        2 | 3 => true,
        _ if n % 2 == 0 || n % 3 == 0 => false,
        _ => {
            let mut i = 5_u64;
            while i.saturating_mul(i) <= n {
                if n % i == 0 || n % (i + 2) == 0 {
                    return false;
                }
                i += 6;
            }
            true
        },
    }
}

#[cfg(test)]
mod tests {
    use super::is_prime_number;

    #[test]
    fn primes_below_fifty() {
        let primes: Vec<u64> = (0..50).filter(|&n| is_prime_number(n)).collect();
        assert_eq!(primes, [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]);
    }

    #[test]
    fn squares_of_primes_are_composite() {
        assert!(!is_prime_number(25));
        assert!(!is_prime_number(49));
        assert!(!is_prime_number(7919 * 7919));
        assert!(is_prime_number(7919));
    }
}
