use std::{fmt, rc::Rc};

use crate::{
    error::report,
    interpreter::{position::Span, scope::Context},
};

/// Represents all errors that can occur during evaluation.
///
/// Built-in functions report wrong argument kinds as `TypeError`, values out
/// of a function's domain as `DomainError` and bad indices as
/// `IndexOutOfBounds`; their messages are shown verbatim.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeErrorKind {
    /// An operator was applied to values it does not support.
    #[error("Illegal operation")]
    IllegalOperation,
    /// A name is not bound anywhere in the reachable scope chain.
    #[error("'{name}' is not defined")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
    },
    /// `module.name` referred to a module that was never imported.
    #[error("'{module}' module is not defined")]
    ModuleNotDefined {
        /// The name of the module.
        module: String,
    },
    /// A call passed more positional arguments than the callee accepts.
    #[error("{count} too many args passed into '{name}'")]
    TooManyArguments {
        /// The name of the callee.
        name:  String,
        /// How many arguments were surplus.
        count: usize,
    },
    /// A call passed fewer positional arguments than the callee requires.
    #[error("{count} too few args passed into '{name}'")]
    TooFewArguments {
        /// The name of the callee.
        name:  String,
        /// How many arguments were missing.
        count: usize,
    },
    /// A keyword argument does not name one of the callee's optional
    /// parameters.
    #[error("There is no argument named {name}")]
    NoSuchArgument {
        /// The keyword that was passed.
        name: String,
    },
    /// A named function was defined while its name was already bound
    /// globally.
    #[error("There is a function called '{name}' already defined")]
    FunctionAlreadyDefined {
        /// The name of the function.
        name: String,
    },
    /// A value had an unexpected kind.
    #[error("{details}")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
    },
    /// A numeric argument was outside the domain of a built-in.
    #[error("{details}")]
    DomainError {
        /// Details about the rejected value.
        details: String,
    },
    /// A list index or slice bound was out of range.
    #[error("{details}")]
    IndexOutOfBounds {
        /// Details about the rejected index.
        details: String,
    },
    /// Attempted `/`, `//` or `%` with a zero right operand.
    #[error("Division by zero")]
    DivisionByZero,
    /// A script file could not be read.
    #[error("Failed to load the file \"{path}\"\n{details}")]
    IoError {
        /// The path that was requested.
        path:    String,
        /// The underlying I/O message.
        details: String,
    },
    /// `run` or `importAs` was given a file without the `.kode` extension.
    #[error("File extension must be .kode")]
    ExtensionError,
    /// A script executed through `run` or `importAs` failed.
    #[error("Failed to finish executing script \"{path}\"\n{details}")]
    ScriptFailed {
        /// The path of the failing script.
        path:    String,
        /// The full report of the inner error.
        details: String,
    },
    /// Integer arithmetic overflowed.
    #[error("Integer overflow while trying to compute result")]
    Overflow,
    /// Nested calls exceeded the configured call-depth limit.
    #[error("Maximum call depth of {limit} exceeded")]
    CallDepthExceeded {
        /// The configured limit.
        limit: usize,
    },
}

/// A runtime error with the span it was raised at and the context chain
/// active at that moment.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub kind:    RuntimeErrorKind,
    pub span:    Option<Span>,
    pub context: Option<Rc<Context>>,
}

impl RuntimeError {
    #[must_use]
    pub const fn new(kind: RuntimeErrorKind, span: Option<Span>, context: Option<Rc<Context>>) -> Self {
        Self { kind, span, context }
    }

    /// Creates an error without location information.
    #[must_use]
    pub const fn bare(kind: RuntimeErrorKind) -> Self {
        Self::new(kind, None, None)
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = report::traceback(self.span.as_ref(), self.context.as_deref());
        text.push_str(&format!("Runtime Error: {}", self.kind));
        if let Some(span) = &self.span {
            text.push_str("\n\n");
            text.push_str(&report::string_with_arrows(span));
        }
        f.write_str(&text)
    }
}

impl std::error::Error for RuntimeError {}
