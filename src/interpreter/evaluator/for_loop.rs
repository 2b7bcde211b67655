use std::{cmp::Ordering, rc::Rc};

use crate::{
    ast::{ForEach, ForRange, Node},
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        evaluator::{
            control::{LoopStep, loop_result},
            core::{EvalResult, Interpreter},
        },
        scope::Frame,
        value::{core::Value, number::Number},
    },
};

impl Interpreter {
    /// Evaluates a counting `for` loop.
    ///
    /// `start`, `end` and `step` are evaluated once, before the first
    /// iteration; the step defaults to `1`. The direction follows the sign of
    /// the step alone: a non-negative step runs while the variable is below
    /// `end`, a negative step while it is above. The loop variable is bound
    /// in the enclosing scope and keeps its last value after the loop.
    ///
    /// # Parameters
    /// - `range`: Loop header and body.
    /// - `frame`: The evaluation frame.
    ///
    /// # Returns
    /// The list of body values for an inline body, null for a block body.
    ///
    /// # Example
    /// ```
    /// use kode::interpreter::evaluator::core::Interpreter;
    ///
    /// let mut session = Interpreter::new();
    /// let value = session.run("<stdin>", "for i = 0 to 10 step 3: i * i", "").unwrap();
    /// assert_eq!(value.to_string(), "[[0, 9, 36, 81]]");
    ///
    /// let value = session.run("<stdin>", "for i = 5 to 0: i", "").unwrap();
    /// assert_eq!(value.to_string(), "[[]]");
    /// ```
    pub(crate) fn eval_for(&mut self, range: &ForRange, frame: &Frame) -> EvalResult<Value> {
        let start = self.eval_bound(&range.start, frame)?;
        let end = self.eval_bound(&range.end, frame)?;
        let step = match &range.step {
            Some(step) => self.eval_bound(step, frame)?,
            None => Number::Int(1),
        };

        let ascending = step.compare(Number::Int(0)) != Some(Ordering::Less);
        let mut values = Vec::new();
        let mut current = start;

        loop {
            let keep_going = if ascending {
                current.compare(end) == Some(Ordering::Less)
            } else {
                current.compare(end) == Some(Ordering::Greater)
            };
            if !keep_going {
                break;
            }

            frame.scope
                 .borrow_mut()
                 .set(&range.var, Value::number(current));
            current = current.add(step).ok_or_else(|| {
                                           RuntimeError::new(RuntimeErrorKind::Overflow,
                                                             Some(range.span.clone()),
                                                             Some(Rc::clone(&frame.context)))
                                       })?;

            match self.eval_loop_body(&range.body, frame)? {
                LoopStep::Value(value) => values.push(value),
                LoopStep::Skip => {},
                LoopStep::Stop => break,
            }
        }

        Ok(loop_result(values, range.should_return_null, &range.span, frame))
    }

    /// Evaluates a `for ... in` loop.
    ///
    /// The iterable must be a list. Its elements are snapshotted before the
    /// first iteration, so the body may modify the list without affecting
    /// which elements are visited.
    ///
    /// # Errors
    /// `TypeError` if the iterable is not a list.
    pub(crate) fn eval_for_each(&mut self, each: &ForEach, frame: &Frame) -> EvalResult<Value> {
        let iterable = self.eval(&each.iterable, frame)?;
        let elements = match iterable.as_list() {
            Some(elements) => elements.borrow().clone(),
            None => {
                let kind = RuntimeErrorKind::TypeError { details: "Can only iterate over a list".to_string() };
                return Err(RuntimeError::new(kind, iterable.span.clone(), Some(Rc::clone(&frame.context))).into());
            },
        };

        let mut values = Vec::new();
        for element in elements {
            frame.scope.borrow_mut().set(&each.var, element);
            match self.eval_loop_body(&each.body, frame)? {
                LoopStep::Value(value) => values.push(value),
                LoopStep::Skip => {},
                LoopStep::Stop => break,
            }
        }

        Ok(loop_result(values, each.should_return_null, &each.span, frame))
    }

    fn eval_bound(&mut self, node: &Node, frame: &Frame) -> EvalResult<Number> {
        let value = self.eval(node, frame)?;
        match value.as_number() {
            Some(number) => Ok(number),
            None => Err(value.illegal_operation(None).into()),
        }
    }
}
