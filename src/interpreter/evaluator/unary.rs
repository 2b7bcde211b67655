use crate::{
    ast::{Node, UnaryOperator},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        position::Span,
        scope::Frame,
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a unary operation.
    ///
    /// `-x` is computed as `x * -1`, so it applies to everything that can be
    /// multiplied by a number; `not` applies to numbers only.
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                operand: &Node,
                                span: &Span,
                                frame: &Frame)
                                -> EvalResult<Value> {
        let value = self.eval(operand, frame)?;
        Ok(value.unary_op(op)?.with_span(span.clone()))
    }
}
