use std::rc::Rc;

use crate::{
    ast::{ElseCase, IfCase, Node},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter, Unwind, stamp},
        position::Span,
        scope::Frame,
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates an `if` chain.
    ///
    /// The body of the first case whose condition is truthy is evaluated; if
    /// none is, the `else` body is. Inline bodies yield their value, block
    /// bodies and chains where nothing matched yield null.
    pub(crate) fn eval_if(&mut self,
                          cases: &[IfCase],
                          else_case: Option<&ElseCase>,
                          frame: &Frame)
                          -> EvalResult<Value> {
        for case in cases {
            let condition = self.eval(&case.condition, frame)?;
            if condition.is_true() {
                let value = self.eval(&case.body, frame)?;
                return Ok(if case.should_return_null { Value::null() } else { value });
            }
        }

        match else_case {
            Some(case) => {
                let value = self.eval(&case.body, frame)?;
                Ok(if case.should_return_null { Value::null() } else { value })
            },
            None => Ok(Value::null()),
        }
    }

    /// Evaluates a `while` loop.
    ///
    /// The condition is re-evaluated before every iteration. An inline loop
    /// yields the list of its body values.
    pub(crate) fn eval_while(&mut self,
                             condition: &Node,
                             body: &Node,
                             should_return_null: bool,
                             span: &Span,
                             frame: &Frame)
                             -> EvalResult<Value> {
        let mut values = Vec::new();

        while self.eval(condition, frame)?.is_true() {
            match self.eval_loop_body(body, frame)? {
                LoopStep::Value(value) => values.push(value),
                LoopStep::Skip => {},
                LoopStep::Stop => break,
            }
        }

        Ok(loop_result(values, should_return_null, span, frame))
    }

    /// Evaluates one iteration of a loop body, consuming `break` and
    /// `continue`.
    pub(crate) fn eval_loop_body(&mut self, body: &Node, frame: &Frame) -> EvalResult<LoopStep> {
        match self.eval(body, frame) {
            Ok(value) => Ok(LoopStep::Value(value)),
            Err(Unwind::Continue) => Ok(LoopStep::Skip),
            Err(Unwind::Break) => Ok(LoopStep::Stop),
            Err(other) => Err(other),
        }
    }
}

/// How a loop proceeds after one iteration.
pub(crate) enum LoopStep {
    /// The body completed with a value.
    Value(Value),
    /// `continue`
    Skip,
    /// `break`
    Stop,
}

/// The value of a finished loop: null for block bodies, otherwise the list
/// of collected body values.
pub(crate) fn loop_result(values: Vec<Value>, should_return_null: bool, span: &Span, frame: &Frame) -> Value {
    if should_return_null {
        Value::null().with_context(Rc::clone(&frame.context))
    } else {
        stamp(Value::list(values), span, frame)
    }
}
