use std::rc::Rc;

use tracing::{debug, warn};

use crate::{
    ast::Node,
    error::{Error, RuntimeError, RuntimeErrorKind},
    interpreter::{
        evaluator::function::core::BUILTIN_TABLE,
        lexer::tokenize,
        parser::core::parse,
        position::Span,
        scope::{Context, Frame, ModuleRegistry, Scope, SymbolTable},
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// Everything that stops normal evaluation travels through the error side so
/// that `?` forwards it unchanged.
pub type EvalResult<T> = Result<T, Unwind>;

/// An outcome that interrupts normal evaluation.
///
/// Loops consume `Break` and `Continue`; function calls consume `Return`.
/// Errors are never consumed below the host entry point.
#[derive(Debug)]
pub enum Unwind {
    /// A runtime error.
    Error(RuntimeError),
    /// `return`, with the returned value.
    Return(Value),
    /// `continue`
    Continue,
    /// `break`
    Break,
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Self::Error(error)
    }
}

/// Default limit on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// Remaining stack below which `eval` switches to a fresh segment.
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each stack segment allocated for deep evaluation.
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// Session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How many calls may be active at once; `None` disables the limit.
    pub max_call_depth: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH) }
    }
}

/// Reads the text of script files for `run` and `importAs`.
pub trait SourceLoader {
    /// Returns the whole contents of the file at `path`.
    ///
    /// # Errors
    /// Any I/O error encountered while reading.
    fn load(&self, path: &str) -> std::io::Result<String>;
}

/// Loads scripts from the file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load(&self, path: &str) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// An interpreter session.
///
/// A session owns the global symbol table and the module registry, so
/// separate sessions never observe each other's state.
///
/// ## Usage
///
/// `run` resets the globals before executing, which is what running a script
/// means. `execute` keeps them, which is what a REPL needs.
///
/// # Example
/// ```
/// use kode::interpreter::evaluator::core::Interpreter;
///
/// let mut session = Interpreter::new();
/// session.execute("<stdin>", "var n = 20").unwrap();
/// let value = session.execute("<stdin>", "n + 1").unwrap();
/// assert_eq!(value.to_string(), "[21]");
/// ```
pub struct Interpreter {
    globals: Scope,
    modules: ModuleRegistry,
    config:  Config,
    depth:   usize,
    loader:  Box<dyn SourceLoader>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates a session with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self { globals: global_table(None),
               modules: ModuleRegistry::default(),
               config,
               depth: 0,
               loader: Box::new(FsLoader) }
    }

    /// Replaces the loader used by `run` and `importAs`.
    #[must_use]
    pub fn with_loader(mut self, loader: impl SourceLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The current global table.
    #[must_use]
    pub const fn globals(&self) -> &Scope {
        &self.globals
    }

    #[must_use]
    pub const fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    /// Runs a script.
    ///
    /// With an empty `module_name` the global table is reset and the script
    /// runs in it. Otherwise the script runs in the module table registered
    /// under that name.
    ///
    /// # Parameters
    /// - `filename`: The name reported in diagnostics.
    /// - `text`: The source text.
    /// - `module_name`: The module to run in, or `""` for the globals.
    ///
    /// # Returns
    /// The value of the program, which is the list of its statement values,
    /// or the value of a top-level `return`.
    ///
    /// # Errors
    /// The first lexical, syntax or runtime error. `ModuleNotDefined` if no
    /// module is registered under `module_name`.
    pub fn run(&mut self, filename: &str, text: &str, module_name: &str) -> Result<Value, Error> {
        debug!(filename, module = module_name, "running script");

        let scope = if module_name.is_empty() {
            self.reset_globals();
            Rc::clone(&self.globals)
        } else {
            self.modules
                .find(module_name)
                .ok_or_else(|| RuntimeError::bare(RuntimeErrorKind::ModuleNotDefined { module: module_name.to_string() }))?
        };

        self.execute_in(filename, text, scope)
    }

    /// Executes source in the current global table without resetting it.
    ///
    /// # Errors
    /// The first lexical, syntax or runtime error.
    pub fn execute(&mut self, filename: &str, text: &str) -> Result<Value, Error> {
        let scope = Rc::clone(&self.globals);
        self.execute_in(filename, text, scope)
    }

    /// Replaces the global table by a fresh one holding only the pre-bound
    /// names and the built-ins.
    pub fn reset_globals(&mut self) {
        self.globals = global_table(None);
    }

    /// Creates and registers an empty module table named `name`.
    pub(crate) fn register_module(&mut self, name: &str) {
        debug!(module = name, "registering module");
        self.modules.register(global_table(Some(name)));
    }

    /// Reads a script through the session's loader.
    pub(crate) fn load_source(&self, path: &str) -> std::io::Result<String> {
        debug!(path, "loading script");
        self.loader.load(path)
    }

    fn execute_in(&mut self, filename: &str, text: &str, scope: Scope) -> Result<Value, Error> {
        let tokens = tokenize(filename, text)?;
        let program = parse(&tokens)?;
        let frame = Frame { context: Context::root("<program>"),
                            scope };

        match self.eval(&program, &frame) {
            Ok(value) | Err(Unwind::Return(value)) => Ok(value),
            Err(Unwind::Error(error)) => Err(error.into()),
            Err(Unwind::Break | Unwind::Continue) => {
                warn!(filename, "'break' or 'continue' outside of a loop ended the program");
                Ok(Value::null())
            },
        }
    }

    /// Evaluates a node.
    ///
    /// This is the dispatch point of the tree walk: every node kind is routed
    /// to its evaluation routine, and every routine evaluates its children
    /// through here. The stack grows on demand, so nesting is bounded by the
    /// call depth limit rather than by the size of the host thread's stack.
    ///
    /// # Parameters
    /// - `node`: Node to evaluate.
    /// - `frame`: The context and scope the node is evaluated in.
    ///
    /// # Returns
    /// The value of the node, or the outcome that interrupted it.
    pub fn eval(&mut self, node: &Node, frame: &Frame) -> EvalResult<Value> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_node(node, frame))
    }

    fn eval_node(&mut self, node: &Node, frame: &Frame) -> EvalResult<Value> {
        match node {
            Node::Number { value, span } => Ok(stamp(Value::number(*value), span, frame)),
            Node::String { value, span } => Ok(stamp(Value::string(value.as_str()), span, frame)),
            Node::List { elements, span } => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval(element, frame)?);
                }
                Ok(stamp(Value::list(values), span, frame))
            },
            Node::Dict { entries, span } => {
                let mut values = Vec::with_capacity(entries.len());
                for entry in entries {
                    values.push((entry.key.clone(), self.eval(&entry.value, frame)?));
                }
                Ok(stamp(Value::dict(values), span, frame))
            },
            Node::VarAccess { name, module, span } => self.eval_var_access(name, module.as_deref(), span, frame),
            Node::VarAssign { name, value, .. } => {
                let value = self.eval(value, frame)?;
                frame.scope.borrow_mut().set(name, value.clone());
                Ok(value)
            },
            Node::BinOp { left, op, right, span } => self.eval_binary_op(left, *op, right, span, frame),
            Node::UnaryOp { op, operand, span } => self.eval_unary_op(*op, operand, span, frame),
            Node::If { cases, else_case, .. } => self.eval_if(cases, else_case.as_deref(), frame),
            Node::For(range) => self.eval_for(range, frame),
            Node::ForEach(each) => self.eval_for_each(each, frame),
            Node::While { condition,
                          body,
                          should_return_null,
                          span, } => self.eval_while(condition, body, *should_return_null, span, frame),
            Node::FunctionDef(def) => self.eval_function_def(def, frame),
            Node::Call { callee,
                         args,
                         keyword_args,
                         span, } => self.eval_call(callee, args, keyword_args, span, frame),
            Node::Return { value, .. } => {
                let value = match value {
                    Some(value) => self.eval(value, frame)?,
                    None => Value::null(),
                };
                Err(Unwind::Return(value))
            },
            Node::Continue { .. } => Err(Unwind::Continue),
            Node::Break { .. } => Err(Unwind::Break),
        }
    }

    /// Looks a variable up and re-stamps the copy with the access site.
    ///
    /// A qualified name is looked up in the module registry, independent of
    /// the scope chain.
    fn eval_var_access(&self, name: &str, module: Option<&str>, span: &Span, frame: &Frame) -> EvalResult<Value> {
        let error = |kind| RuntimeError::new(kind, Some(span.clone()), Some(Rc::clone(&frame.context)));

        let value = match module {
            Some(module) => {
                // Newest registration wins when a name was imported twice.
                let table = self.modules
                                .find(module)
                                .ok_or_else(|| error(RuntimeErrorKind::ModuleNotDefined { module: module.to_string() }))?;
                table.borrow().get(name)
            },
            None => frame.scope.borrow().get(name),
        };

        let value = value.ok_or_else(|| error(RuntimeErrorKind::UnknownVariable { name: name.to_string() }))?;
        Ok(stamp(value, span, frame))
    }

    /// Adjusts the number of active calls, failing when the configured limit
    /// would be exceeded.
    pub(crate) fn enter_call(&mut self, span: &Span, context: &Rc<Context>) -> Result<(), RuntimeError> {
        if let Some(limit) = self.config.max_call_depth
           && self.depth >= limit
        {
            return Err(RuntimeError::new(RuntimeErrorKind::CallDepthExceeded { limit },
                                         Some(span.clone()),
                                         Some(Rc::clone(context))));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave_call(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }
}

/// Re-stamps a value with the span and context of the node producing it.
pub(crate) fn stamp(value: Value, span: &Span, frame: &Frame) -> Value {
    value.with_span(span.clone())
         .with_context(Rc::clone(&frame.context))
}

/// Builds a root table holding the pre-bound names and every built-in.
fn global_table(name: Option<&str>) -> Scope {
    let mut table = match name {
        Some(name) => SymbolTable::named(name),
        None => SymbolTable::new(None),
    };

    table.set("None", Value::null());
    table.set("False", Value::boolean(false));
    table.set("True", Value::boolean(true));
    for builtin in BUILTIN_TABLE {
        table.set(builtin.name, Value::builtin(builtin));
    }

    table.into_scope()
}
