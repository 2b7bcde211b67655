use std::rc::Rc;

use tracing::{trace, warn};

use crate::{
    ast::{FunctionDef, KeywordArg, Node},
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter, Unwind, stamp},
            function::{collection, io, math, module, string, types},
            utils::CallSite,
        },
        position::Span,
        scope::{Context, Frame, SymbolTable},
        value::core::{Function, Value, ValueKind},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the session, its evaluated arguments in declaration
/// order and the call site used for error reporting.
pub type BuiltinFn = fn(&mut Interpreter, &[Value], &CallSite) -> EvalResult<Value>;

/// A native function from the built-in catalogue.
///
/// Built-ins take exactly as many positional arguments as they have
/// parameters and accept no keyword arguments.
pub struct Builtin {
    pub name:   &'static str,
    pub params: &'static [&'static str],
    func:       BuiltinFn,
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin")
         .field("name", &self.name)
         .field("params", &self.params)
         .finish_non_exhaustive()
    }
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the parameter names, which also fix the arity,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BUILTIN_TABLE` (static table every global scope is populated from),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                params: [$($param:literal),* $(,)?],
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        pub static BUILTIN_TABLE: &[Builtin] = &[
            $(
                Builtin { name: $name, params: &[$($param),*], func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print"       => { params: ["value"], func: io::print },
    "input"       => { params: [], func: io::input },
    "clear"       => { params: [], func: io::clear },
    "is_number"   => { params: ["value"], func: |_, args, site| Ok(site.value(Value::boolean(args[0].as_number().is_some()))) },
    "is_string"   => { params: ["value"], func: |_, args, site| Ok(site.value(Value::boolean(args[0].as_str().is_some()))) },
    "is_list"     => { params: ["value"], func: |_, args, site| Ok(site.value(Value::boolean(args[0].as_list().is_some()))) },
    "is_function" => { params: ["value"], func: |_, args, site| Ok(site.value(Value::boolean(args[0].is_function()))) },
    "append"      => { params: ["list", "value"], func: collection::append },
    "concat"      => { params: ["string1", "string2"], func: string::concat },
    "split_char"  => { params: ["string", "char"], func: string::split_char },
    "slice"       => { params: ["string", "start", "end"], func: string::slice },
    "frequency"   => { params: ["string", "char"], func: string::frequency },
    "findIndex"   => { params: ["string", "char"], func: string::find_index },
    "insert"      => { params: ["list", "index", "value"], func: collection::insert },
    "set"         => { params: ["list", "index", "value"], func: collection::set },
    "pop"         => { params: ["list", "index"], func: collection::pop },
    "extend"      => { params: ["listA", "listB"], func: collection::extend },
    "get"         => { params: ["list", "index"], func: collection::get },
    "len"         => { params: ["list"], func: collection::len },
    "importAs"    => { params: ["path", "name"], func: module::import_as },
    "run"         => { params: ["fn"], func: module::run },
    "to_str"      => { params: ["value"], func: types::to_str },
    "to_int"      => { params: ["number"], func: types::to_int },
    "to_float"    => { params: ["number"], func: types::to_float },
    "abs"         => { params: ["number"], func: math::abs },
    "has_key"     => { params: ["d", "key"], func: collection::has_key },
    "range"       => { params: ["begin", "end"], func: math::range },
    "min"         => { params: ["numberA", "numberB"], func: |_, args, site| math::min_max(args, site, false) },
    "max"         => { params: ["a", "b"], func: |_, args, site| math::min_max(args, site, true) },
    "oct"         => { params: ["number"], func: math::oct },
    "fact"        => { params: ["number"], func: math::fact },
    "sort"        => { params: ["list"], func: collection::sort },
    "is_prime"    => { params: ["number"], func: math::is_prime },
}

impl Interpreter {
    /// Evaluates a function definition.
    ///
    /// Default values are evaluated once, here. The function closes over the
    /// scope it is defined in, and a named function is bound in that scope.
    ///
    /// # Errors
    /// `FunctionAlreadyDefined` if the name is already bound in the global
    /// table, which includes the names of the built-ins.
    pub(crate) fn eval_function_def(&mut self, def: &FunctionDef, frame: &Frame) -> EvalResult<Value> {
        if let Some(name) = &def.name
           && self.globals().borrow().contains_local(name)
        {
            return Err(RuntimeError::new(RuntimeErrorKind::FunctionAlreadyDefined { name: name.clone() },
                                         Some(def.span.clone()),
                                         Some(Rc::clone(&frame.context))).into());
        }

        let mut optional_params = Vec::with_capacity(def.optional_params.len());
        for (name, default) in &def.optional_params {
            optional_params.push((name.clone(), self.eval(default, frame)?));
        }

        let module = frame.scope.borrow().name().map(str::to_string);
        let function = Function { name: def.name.clone(),
                                  body: Rc::clone(&def.body),
                                  params: def.params.clone(),
                                  optional_params,
                                  should_auto_return: def.should_auto_return,
                                  module,
                                  closure: Rc::clone(&frame.scope) };
        let value = stamp(Value::function(function), &def.span, frame);

        if let Some(name) = &def.name {
            frame.scope.borrow_mut().set(name, value.clone());
        }
        Ok(value)
    }

    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then the positional arguments and then
    /// the keyword arguments, each left to right. Every keyword must name an
    /// optional parameter of the callee before its value is evaluated.
    ///
    /// # Parameters
    /// - `callee`: The node producing the function.
    /// - `args`: Positional argument nodes.
    /// - `keyword_args`: Keyword argument nodes.
    /// - `span`: Span of the whole call.
    /// - `frame`: The caller's frame.
    ///
    /// # Returns
    /// The result of the call, stamped with the call span and the caller's
    /// context.
    pub(crate) fn eval_call(&mut self,
                            callee: &Node,
                            args: &[Node],
                            keyword_args: &[KeywordArg],
                            span: &Span,
                            frame: &Frame)
                            -> EvalResult<Value> {
        let callee = self.eval(callee, frame)?.with_span(span.clone());

        let mut positional = Vec::with_capacity(args.len());
        for arg in args {
            positional.push(self.eval(arg, frame)?);
        }

        if !callee.is_function() {
            return Err(callee.illegal_operation(None).into());
        }

        let mut keywords = Vec::with_capacity(keyword_args.len());
        for keyword in keyword_args {
            if !callee.accepts_keyword(&keyword.name) {
                return Err(RuntimeError::new(RuntimeErrorKind::NoSuchArgument { name: keyword.name.clone() },
                                             Some(span.clone()),
                                             Some(Rc::clone(&frame.context))).into());
            }
            keywords.push((keyword.name.clone(), self.eval(&keyword.value, frame)?));
        }

        let result = self.call_value(&callee, positional, &keywords, span, frame)?;
        Ok(stamp(result, span, frame))
    }

    /// Calls a function or built-in value with evaluated arguments.
    ///
    /// # Errors
    /// - `IllegalOperation` if the value is not callable.
    /// - `CallDepthExceeded` if the configured call depth is reached.
    /// - `TooManyArguments` or `TooFewArguments` for a positional arity
    ///   mismatch.
    /// - Anything raised by the callee.
    pub fn call_value(&mut self,
                      callee: &Value,
                      args: Vec<Value>,
                      keywords: &[(String, Value)],
                      span: &Span,
                      frame: &Frame)
                      -> EvalResult<Value> {
        if !callee.is_function() {
            return Err(callee.illegal_operation(None).into());
        }

        self.enter_call(span, &frame.context)?;
        let result = match &callee.kind {
            ValueKind::Function(function) => self.call_function(function, args, keywords, span, frame),
            ValueKind::BuiltIn(builtin) => self.call_builtin(builtin, args, span, frame),
            _ => Err(callee.illegal_operation(None).into()),
        };
        self.leave_call();
        result
    }

    fn call_function(&mut self,
                     function: &Function,
                     args: Vec<Value>,
                     keywords: &[(String, Value)],
                     span: &Span,
                     frame: &Frame)
                     -> EvalResult<Value> {
        let name = function.display_name();
        check_arity(name, function.params.len(), args.len(), span, frame)?;

        let context = Context::child(&frame.context, name, Some(span.start.clone()));
        let scope = SymbolTable::new(Some(Rc::clone(&function.closure))).into_scope();
        {
            let mut table = scope.borrow_mut();
            for (param, value) in function.params.iter().zip(args) {
                table.set(param, value.with_context(Rc::clone(&context)));
            }
            for (param, default) in &function.optional_params {
                let value = keywords.iter()
                                    .rev()
                                    .find(|(keyword, _)| keyword == param)
                                    .map_or(default, |(_, value)| value);
                table.set(param, value.clone().with_context(Rc::clone(&context)));
            }
        }

        trace!(function = name, module = ?function.module, depth = self.depth(), "calling function");

        let frame = Frame { context, scope };
        match self.eval(&function.body, &frame) {
            Ok(value) if function.should_auto_return => Ok(value),
            Ok(_) => Ok(Value::null()),
            Err(Unwind::Return(value)) => Ok(value),
            Err(Unwind::Break | Unwind::Continue) => {
                warn!(function = name, "'break' or 'continue' outside of a loop ended the call");
                Ok(Value::null())
            },
            Err(error) => Err(error),
        }
    }

    fn call_builtin(&mut self, builtin: &Builtin, args: Vec<Value>, span: &Span, frame: &Frame) -> EvalResult<Value> {
        check_arity(builtin.name, builtin.params.len(), args.len(), span, frame)?;

        let context = Context::child(&frame.context, builtin.name, Some(span.start.clone()));
        let args: Vec<Value> = args.into_iter()
                                   .map(|arg| arg.with_context(Rc::clone(&context)))
                                   .collect();
        let site = CallSite { span: span.clone(),
                              context };

        trace!(builtin = builtin.name, depth = self.depth(), "calling built-in");
        (builtin.func)(self, &args, &site)
    }
}

/// Verifies that a call passes exactly as many positional arguments as the
/// callee has required parameters.
fn check_arity(name: &str, expected: usize, passed: usize, span: &Span, frame: &Frame) -> Result<(), RuntimeError> {
    let kind = if passed > expected {
        RuntimeErrorKind::TooManyArguments { name:  name.to_string(),
                                             count: passed - expected, }
    } else if passed < expected {
        RuntimeErrorKind::TooFewArguments { name:  name.to_string(),
                                            count: expected - passed, }
    } else {
        return Ok(());
    };
    Err(RuntimeError::new(kind, Some(span.clone()), Some(Rc::clone(&frame.context))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_are_unique() {
        let mut names = BUILTIN_FUNCTIONS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BUILTIN_TABLE.len());
    }

    #[test]
    fn parameter_lists_fix_the_arity() {
        let arity = |name: &str| {
            BUILTIN_TABLE.iter()
                         .find(|builtin| builtin.name == name)
                         .map(|builtin| builtin.params.len())
        };
        assert_eq!(arity("input"), Some(0));
        assert_eq!(arity("print"), Some(1));
        assert_eq!(arity("split_char"), Some(2));
        assert_eq!(arity("slice"), Some(3));
        assert_eq!(arity("hola"), None);
    }
}
