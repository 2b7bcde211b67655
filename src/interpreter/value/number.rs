use std::{cmp::Ordering, fmt};

use crate::{error::RuntimeErrorKind, util::num::f64_to_i64_checked};

/// A numeric value that is either an integer or a float.
///
/// Arithmetic follows the usual scripting-language rules: integer operands
/// stay integral, except `/` which always yields a float. `//` floors and `%`
/// takes the sign of the divisor. Integer arithmetic is checked; the
/// operations return `None` on overflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Number {
    fn from(value: bool) -> Self {
        Self::Int(i64::from(value))
    }
}

impl Number {
    /// Returns the value as a float.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Float(value) => value,
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(value) => value == 0,
            Self::Float(value) => value == 0.0,
        }
    }

    /// Numbers are truthy unless they are zero.
    #[must_use]
    pub fn is_true(self) -> bool {
        !self.is_zero()
    }

    /// Returns the integral value, if this is an integer or a float without a
    /// fractional part.
    ///
    /// ```
    /// use kode::interpreter::value::number::Number;
    ///
    /// assert_eq!(Number::Float(4.0).as_integral(), Some(4));
    /// assert_eq!(Number::Float(4.5).as_integral(), None);
    /// assert_eq!(Number::Int(-3).as_integral(), Some(-3));
    /// ```
    #[must_use]
    pub fn as_integral(self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(value),
            Self::Float(value) => f64_to_i64_checked(value, ()).ok(),
        }
    }

    /// Truncates towards zero, failing for values outside the `i64` range.
    #[must_use]
    pub fn truncate(self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(value),
            Self::Float(value) => f64_to_i64_checked(value.trunc(), ()).ok(),
        }
    }

    #[must_use]
    pub fn add(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => a.checked_add(b).map(Self::Int),
            _ => Some(Self::Float(self.as_f64() + rhs.as_f64())),
        }
    }

    #[must_use]
    pub fn sub(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => a.checked_sub(b).map(Self::Int),
            _ => Some(Self::Float(self.as_f64() - rhs.as_f64())),
        }
    }

    #[must_use]
    pub fn mul(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => a.checked_mul(b).map(Self::Int),
            _ => Some(Self::Float(self.as_f64() * rhs.as_f64())),
        }
    }

    /// True division. The caller rules out a zero divisor.
    #[must_use]
    pub fn div(self, rhs: Self) -> Self {
        Self::Float(self.as_f64() / rhs.as_f64())
    }

    /// Floor division. The caller rules out a zero divisor.
    ///
    /// ```
    /// use kode::interpreter::value::number::Number;
    ///
    /// assert_eq!(Number::Int(7).floor_div(Number::Int(2)), Some(Number::Int(3)));
    /// assert_eq!(Number::Int(-7).floor_div(Number::Int(2)), Some(Number::Int(-4)));
    /// assert_eq!(Number::Float(7.5).floor_div(Number::Int(2)), Some(Number::Float(3.0)));
    /// ```
    #[must_use]
    pub fn floor_div(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => {
                let quotient = a.checked_div(b)?;
                if a % b != 0 && (a < 0) != (b < 0) {
                    Some(Self::Int(quotient - 1))
                } else {
                    Some(Self::Int(quotient))
                }
            },
            _ => Some(Self::Float((self.as_f64() / rhs.as_f64()).floor())),
        }
    }

    /// Remainder with the sign of the divisor. The caller rules out a zero
    /// divisor.
    ///
    /// ```
    /// use kode::interpreter::value::number::Number;
    ///
    /// assert_eq!(Number::Int(7).rem(Number::Int(3)), Some(Number::Int(1)));
    /// assert_eq!(Number::Int(-7).rem(Number::Int(3)), Some(Number::Int(2)));
    /// assert_eq!(Number::Int(7).rem(Number::Int(-3)), Some(Number::Int(-2)));
    /// ```
    #[must_use]
    pub fn rem(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => {
                let remainder = a.checked_rem(b)?;
                if remainder != 0 && (remainder < 0) != (b < 0) {
                    Some(Self::Int(remainder + b))
                } else {
                    Some(Self::Int(remainder))
                }
            },
            _ => {
                let (a, b) = (self.as_f64(), rhs.as_f64());
                let remainder = a % b;
                if remainder != 0.0 && (remainder < 0.0) != (b < 0.0) {
                    Some(Self::Float(remainder + b))
                } else {
                    Some(Self::Float(remainder))
                }
            },
        }
    }

    /// Exponentiation. Integers raised to non-negative integers stay
    /// integral; everything else is computed in floating point.
    pub fn pow(self, rhs: Self) -> Result<Self, RuntimeErrorKind> {
        match (self, rhs) {
            (Self::Int(base), Self::Int(exponent)) if exponent >= 0 => u32::try_from(exponent).ok()
                                                                                               .and_then(|e| base.checked_pow(e))
                                                                                               .map(Self::Int)
                                                                                               .ok_or(RuntimeErrorKind::Overflow),
            _ if self.is_zero() && rhs.as_f64() < 0.0 => Err(RuntimeErrorKind::DivisionByZero),
            _ => Ok(Self::Float(self.as_f64().powf(rhs.as_f64()))),
        }
    }

    /// Compares two numbers by value, across kinds.
    #[must_use]
    pub fn compare(self, rhs: Self) -> Option<Ordering> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
            _ => self.as_f64().partial_cmp(&rhs.as_f64()),
        }
    }

    /// Numeric equality across kinds, so `1 == 1.0`.
    #[must_use]
    pub fn equals(self, rhs: Self) -> bool {
        self.compare(rhs) == Some(Ordering::Equal)
    }
}

impl fmt::Display for Number {
    /// Integers print plainly; floats always show a fractional part or an
    /// exponent, e.g. `5.0`, `0.25`, `1e+20`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) if value.is_nan() => f.write_str("nan"),
            Self::Float(value) if value.is_infinite() => f.write_str(if value > 0.0 { "inf" } else { "-inf" }),
            Self::Float(value) => {
                let magnitude = value.abs();
                if magnitude >= 1e16 || (magnitude != 0.0 && magnitude < 1e-4) {
                    let text = format!("{value:e}");
                    let (mantissa, exponent) = text.split_once('e').unwrap_or((&text, "0"));
                    let (sign, digits) = exponent.strip_prefix('-')
                                                 .map_or(("+", exponent), |digits| ("-", digits));
                    write!(f, "{mantissa}e{sign}{digits:0>2}")
                } else if value.fract() == 0.0 {
                    write!(f, "{value:.1}")
                } else {
                    write!(f, "{value}")
                }
            },
        }
    }
}
