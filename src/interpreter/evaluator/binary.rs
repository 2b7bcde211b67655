use crate::{
    ast::{BinaryOperator, Node},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        position::Span,
        scope::Frame,
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a binary operation.
    ///
    /// Both operands are always evaluated, left first; `and` and `or` do not
    /// short-circuit. The operation itself is dispatched on the left value,
    /// and the result is stamped with the span of the whole expression.
    ///
    /// # Parameters
    /// - `left`: Left operand node.
    /// - `op`: Binary operator.
    /// - `right`: Right operand node.
    /// - `span`: Span of the whole expression.
    /// - `frame`: The evaluation frame.
    ///
    /// # Returns
    /// The value of the operation.
    ///
    /// # Example
    /// ```
    /// use kode::interpreter::evaluator::core::Interpreter;
    ///
    /// let mut session = Interpreter::new();
    /// let value = session.run("<stdin>", "7 // 2; 7 % -3; 2 ^ 10; 1 < 2 and 0", "").unwrap();
    /// assert_eq!(value.to_string(), "[3, -2, 1024, 0]");
    /// ```
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Node,
                                 op: BinaryOperator,
                                 right: &Node,
                                 span: &Span,
                                 frame: &Frame)
                                 -> EvalResult<Value> {
        let left = self.eval(left, frame)?;
        let right = self.eval(right, frame)?;
        Ok(left.binary_op(op, &right)?.with_span(span.clone()))
    }
}
