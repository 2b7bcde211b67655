use std::rc::Rc;

use crate::interpreter::{position::Span, value::number::Number};

/// An abstract syntax tree (AST) node.
///
/// `Node` has one variant per grammar construct. Nodes are built once by the
/// parser and never mutated; function values keep their body alive through an
/// `Rc`. Statement blocks and list literals share the `List` variant, so a
/// block evaluates to the list of its statement values.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An integer or floating-point literal.
    Number {
        /// The literal value.
        value: Number,
        /// Source span of the literal.
        span:  Span,
    },
    /// A string literal with escapes already resolved.
    String {
        /// The literal text.
        value: String,
        /// Source span of the literal.
        span:  Span,
    },
    /// A list literal or a block of statements.
    List {
        /// The elements or statements, in source order.
        elements: Vec<Node>,
        /// Source span of the whole list.
        span:     Span,
    },
    /// A dictionary literal. Keys are unique by text.
    Dict {
        /// The entries, in order of first appearance.
        entries: Vec<DictEntry>,
        /// Source span of the whole literal.
        span:    Span,
    },
    /// Reference to a variable, optionally qualified by a module name.
    VarAccess {
        /// Name of the variable.
        name:   String,
        /// The module the name is looked up in, for `module.name`.
        module: Option<String>,
        /// Source span of the reference.
        span:   Span,
    },
    /// `var name = value`
    VarAssign {
        /// Name of the variable.
        name:  String,
        /// The assigned expression.
        value: Box<Node>,
        /// Source span of the assignment.
        span:  Span,
    },
    /// A binary operation.
    BinOp {
        /// Left operand.
        left:  Box<Node>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Node>,
        /// Source span of the operation.
        span:  Span,
    },
    /// A unary operation.
    UnaryOp {
        /// The operator.
        op:      UnaryOperator,
        /// The operand.
        operand: Box<Node>,
        /// Source span of the operation.
        span:    Span,
    },
    /// An `if`/`elif`/`else` chain.
    If {
        /// The `if` and `elif` cases, tried in order.
        cases:     Vec<IfCase>,
        /// The `else` branch, if any.
        else_case: Option<Box<ElseCase>>,
        /// Source span of the whole chain.
        span:      Span,
    },
    /// `for name = start to end [step step]: body`
    For(ForRange),
    /// `for name in iterable: body`
    ForEach(ForEach),
    /// `while condition: body`
    While {
        /// The loop condition, evaluated before every iteration.
        condition:          Box<Node>,
        /// The loop body.
        body:               Box<Node>,
        /// `true` for block bodies, which make the loop evaluate to null.
        should_return_null: bool,
        /// Source span of the loop.
        span:               Span,
    },
    /// A named or anonymous function definition.
    FunctionDef(Rc<FunctionDef>),
    /// A call with positional and keyword arguments.
    Call {
        /// The expression producing the callee.
        callee:       Box<Node>,
        /// Positional arguments, in source order.
        args:         Vec<Node>,
        /// Keyword arguments, in source order.
        keyword_args: Vec<KeywordArg>,
        /// Source span of the call.
        span:         Span,
    },
    /// `return [value]`
    Return {
        /// The returned expression, if any.
        value: Option<Box<Node>>,
        /// Source span of the statement.
        span:  Span,
    },
    /// `continue`
    Continue {
        /// Source span of the keyword.
        span: Span,
    },
    /// `break`
    Break {
        /// Source span of the keyword.
        span: Span,
    },
}

impl Node {
    /// Gets the source span of `self`.
    #[must_use]
    pub fn span(&self) -> &Span {
        match self {
            Self::Number { span, .. }
            | Self::String { span, .. }
            | Self::List { span, .. }
            | Self::Dict { span, .. }
            | Self::VarAccess { span, .. }
            | Self::VarAssign { span, .. }
            | Self::BinOp { span, .. }
            | Self::UnaryOp { span, .. }
            | Self::If { span, .. }
            | Self::While { span, .. }
            | Self::Call { span, .. }
            | Self::Return { span, .. }
            | Self::Continue { span }
            | Self::Break { span } => span,
            Self::For(range) => &range.span,
            Self::ForEach(each) => &each.span,
            Self::FunctionDef(def) => &def.span,
        }
    }
}

/// A single `key: value` entry of a dictionary literal.
#[derive(Debug, Clone, PartialEq)]
pub struct DictEntry {
    /// The key text.
    pub key:   String,
    /// The value expression.
    pub value: Node,
}

/// One `if`/`elif` case.
#[derive(Debug, Clone, PartialEq)]
pub struct IfCase {
    /// The condition of the case.
    pub condition:          Node,
    /// The body evaluated when the condition is true.
    pub body:               Node,
    /// `true` for block bodies, which make the case evaluate to null.
    pub should_return_null: bool,
}

/// The `else` branch of an `if` chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ElseCase {
    /// The body of the branch.
    pub body:               Node,
    /// `true` for block bodies, which make the branch evaluate to null.
    pub should_return_null: bool,
}

/// Context for a counting for-loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForRange {
    /// The loop variable name.
    pub var:                String,
    /// The first value of the loop variable.
    pub start:              Box<Node>,
    /// The exclusive bound of the loop variable.
    pub end:                Box<Node>,
    /// The increment; `1` when absent.
    pub step:               Option<Box<Node>>,
    /// The body of the loop to be evaluated for each iteration.
    pub body:               Box<Node>,
    /// `true` for block bodies, which make the loop evaluate to null.
    pub should_return_null: bool,
    /// Source span of the loop.
    pub span:               Span,
}

/// Context for a for-each loop over a list.
#[derive(Debug, Clone, PartialEq)]
pub struct ForEach {
    /// The loop variable name.
    pub var:                String,
    /// The expression producing the list.
    pub iterable:           Box<Node>,
    /// The body of the loop to be evaluated for each element.
    pub body:               Box<Node>,
    /// `true` for block bodies, which make the loop evaluate to null.
    pub should_return_null: bool,
    /// Source span of the loop.
    pub span:               Span,
}

/// Represents a user-defined function definition.
///
/// Parameters with a default value are optional; they always follow the
/// required ones.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function, `None` for anonymous functions.
    pub name:               Option<String>,
    /// Required parameter names, in order.
    pub params:             Vec<String>,
    /// Optional parameter names with their default value expressions.
    pub optional_params:    Vec<(String, Node)>,
    /// The body evaluated when the function is called.
    pub body:               Rc<Node>,
    /// `true` for `-> expr` bodies, whose value is returned implicitly.
    pub should_auto_return: bool,
    /// Source span of the definition.
    pub span:               Span,
}

/// A `name=value` argument of a call.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordArg {
    /// The parameter name.
    pub name:  String,
    /// The argument expression.
    pub value: Node,
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Floor division (`//`)
    IntDiv,
    /// Remainder (`%`)
    Mod,
    /// Exponentiation (`^`)
    Pow,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical and (`and`)
    And,
    /// Logical or (`or`)
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Identity (`+x`).
    Plus,
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical NOT (`not x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, IntDiv, Less, LessEqual, Mod, Mul, NotEqual, Or, Pow, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            IntDiv => "//",
            Mod => "%",
            Pow => "^",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            And => "and",
            Or => "or",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Plus => "+",
            Self::Negate => "-",
            Self::Not => "not",
        };
        write!(f, "{operator}")
    }
}
