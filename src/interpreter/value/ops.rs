use std::cmp::Ordering;

use crate::{
    ast::{BinaryOperator, UnaryOperator},
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        position::Span,
        value::{
            core::{ListRef, Value, ValueKind},
            number::Number,
        },
    },
    util::num::resolve_index,
};

impl Value {
    /// Applies a binary operator with `self` as the left operand.
    ///
    /// Numbers support every operator. Strings support `+` with another
    /// string and `*` with an integer. A list divided by a number yields the
    /// element at that index. The result carries the context of the left
    /// operand but no span; the evaluator stamps it with the span of the
    /// whole expression.
    ///
    /// # Errors
    /// - `IllegalOperation` for unsupported operand kinds, spanning both
    ///   operands.
    /// - `DivisionByZero` for `/`, `//` and `%` with a zero right operand.
    /// - `IndexOutOfBounds` when dividing a list by an invalid index.
    /// - `Overflow` when integer arithmetic overflows.
    ///
    /// # Example
    /// ```
    /// use kode::{ast::BinaryOperator, interpreter::value::core::Value};
    ///
    /// let sum = Value::int(2).binary_op(BinaryOperator::Add, &Value::float(0.5)).unwrap();
    /// assert_eq!(sum, Value::float(2.5));
    ///
    /// let word = Value::string("ab").binary_op(BinaryOperator::Mul, &Value::int(3)).unwrap();
    /// assert_eq!(word.to_string(), "ababab");
    ///
    /// assert!(Value::int(1).binary_op(BinaryOperator::Div, &Value::int(0)).is_err());
    /// assert!(Value::string("a").binary_op(BinaryOperator::Sub, &Value::int(1)).is_err());
    /// ```
    pub fn binary_op(&self, op: BinaryOperator, other: &Self) -> Result<Self, RuntimeError> {
        let kind = match (&self.kind, &other.kind) {
            (ValueKind::Number(a), ValueKind::Number(b)) => ValueKind::Number(self.number_op(*a, op, *b, other)?),
            (ValueKind::String(a), ValueKind::String(b)) if op == BinaryOperator::Add => {
                ValueKind::String(format!("{a}{b}"))
            },
            (ValueKind::String(text), ValueKind::Number(Number::Int(times))) if op == BinaryOperator::Mul => {
                let times = usize::try_from(*times).unwrap_or(0);
                if text.len().checked_mul(times).is_none() {
                    return Err(self.error(RuntimeErrorKind::Overflow, self.span_to(other)));
                }
                ValueKind::String(text.repeat(times))
            },
            (ValueKind::List(elements), ValueKind::Number(index)) if op == BinaryOperator::Div => {
                return self.list_element(elements, *index, other);
            },
            _ => return Err(self.illegal_operation(Some(other))),
        };

        let result = Self::new(kind);
        Ok(match &self.context {
               Some(context) => result.with_context(context.clone()),
               None => result,
           })
    }

    /// Applies a unary operator.
    ///
    /// `+` returns the operand unchanged, `-` multiplies it by `-1` and `not`
    /// maps zero to `1` and every other number to `0`.
    ///
    /// # Errors
    /// `IllegalOperation` if the operand does not support the operator.
    pub fn unary_op(&self, op: UnaryOperator) -> Result<Self, RuntimeError> {
        match op {
            UnaryOperator::Plus => Ok(self.clone()),
            UnaryOperator::Negate => self.binary_op(BinaryOperator::Mul, &Self::int(-1)),
            UnaryOperator::Not => match self.kind {
                ValueKind::Number(number) => {
                    let result = Self::boolean(number.is_zero());
                    Ok(match &self.context {
                           Some(context) => result.with_context(context.clone()),
                           None => result,
                       })
                },
                _ => Err(self.illegal_operation(None)),
            },
        }
    }

    /// Builds an `IllegalOperation` error spanning `self` and `other`.
    #[must_use]
    pub fn illegal_operation(&self, other: Option<&Self>) -> RuntimeError {
        let span = match other {
            Some(other) => self.span_to(other),
            None => self.span.clone(),
        };
        self.error(RuntimeErrorKind::IllegalOperation, span)
    }

    fn number_op(&self, a: Number, op: BinaryOperator, b: Number, other: &Self) -> Result<Number, RuntimeError> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, IntDiv, Less, LessEqual, Mod, Mul, NotEqual, Or, Pow, Sub,
        };

        let overflow = || self.error(RuntimeErrorKind::Overflow, self.span_to(other));

        let result = match op {
            Div | IntDiv | Mod if b.is_zero() => {
                return Err(self.error(RuntimeErrorKind::DivisionByZero, other.span.clone()));
            },
            Add => a.add(b).ok_or_else(overflow)?,
            Sub => a.sub(b).ok_or_else(overflow)?,
            Mul => a.mul(b).ok_or_else(overflow)?,
            Div => a.div(b),
            IntDiv => a.floor_div(b).ok_or_else(overflow)?,
            Mod => a.rem(b).ok_or_else(overflow)?,
            Pow => a.pow(b)
                    .map_err(|kind| self.error(kind, self.span_to(other)))?,
            Equal => Number::from(a.equals(b)),
            NotEqual => Number::from(!a.equals(b)),
            Less => Number::from(a.compare(b) == Some(Ordering::Less)),
            Greater => Number::from(a.compare(b) == Some(Ordering::Greater)),
            LessEqual => Number::from(matches!(a.compare(b), Some(Ordering::Less | Ordering::Equal))),
            GreaterEqual => Number::from(matches!(a.compare(b), Some(Ordering::Greater | Ordering::Equal))),
            And => {
                let picked = if a.is_true() { b } else { a };
                Number::Int(picked.truncate().ok_or_else(overflow)?)
            },
            Or => {
                let picked = if a.is_true() { a } else { b };
                Number::Int(picked.truncate().ok_or_else(overflow)?)
            },
        };
        Ok(result)
    }

    fn list_element(&self, elements: &ListRef, index: Number, other: &Self) -> Result<Self, RuntimeError> {
        let elements = elements.borrow();
        let position = match index {
            Number::Int(index) => resolve_index(elements.len(), index),
            Number::Float(_) => None,
        };
        position.map(|position| elements[position].clone())
                .ok_or_else(|| {
                    self.error(RuntimeErrorKind::IndexOutOfBounds { details: "Element at this index could not be retrieved from the list because the index is out of bounds".to_string() },
                               other.span.clone())
                })
    }

    fn span_to(&self, other: &Self) -> Option<Span> {
        match (&self.span, &other.span) {
            (Some(start), Some(end)) => Some(start.to(end)),
            (start, end) => start.clone().or_else(|| end.clone()),
        }
    }

    fn error(&self, kind: RuntimeErrorKind, span: Option<Span>) -> RuntimeError {
        RuntimeError::new(kind, span, self.context.clone())
    }
}
