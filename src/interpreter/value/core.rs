use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    ast::Node,
    interpreter::{
        evaluator::function::core::Builtin,
        position::Span,
        scope::{Context, Scope},
        value::number::Number,
    },
};

/// The element container of a list value, shared by every copy of it.
pub type ListRef = Rc<RefCell<Vec<Value>>>;
/// The entry container of a dictionary value, shared by every copy of it.
///
/// Entries keep insertion order and keys are unique by text; lookup walks the
/// entries.
pub type DictRef = Rc<RefCell<Vec<(String, Value)>>>;

/// The payload of a runtime value.
#[derive(Clone)]
pub enum ValueKind {
    /// A numeric value. Booleans are the numbers `1` and `0`.
    Number(Number),
    /// An immutable piece of text.
    String(String),
    /// An ordered, mutable, shared sequence of values.
    List(ListRef),
    /// A mapping from string keys to values, shared like lists.
    Dict(DictRef),
    /// A user-defined function.
    Function(Rc<Function>),
    /// A native function from the built-in catalogue.
    BuiltIn(&'static Builtin),
}

/// A runtime value in the interpreter.
///
/// Every value remembers the span it was produced at and the context it was
/// produced in; both are used for error attribution only. Cloning a value
/// copies numbers and strings but shares the containers of lists and
/// dictionaries, so mutations through one copy are visible through all
/// copies.
#[derive(Clone)]
pub struct Value {
    pub kind:    ValueKind,
    pub span:    Option<Span>,
    pub context: Option<Rc<Context>>,
}

/// A user-defined function value.
pub struct Function {
    /// The declared name, `None` for anonymous functions.
    pub name:               Option<String>,
    /// The body, shared with the AST it was parsed into.
    pub body:               Rc<Node>,
    /// Required parameter names, in order.
    pub params:             Vec<String>,
    /// Optional parameter names with the defaults evaluated at definition.
    pub optional_params:    Vec<(String, Value)>,
    /// Whether the value of the body is returned implicitly.
    pub should_auto_return: bool,
    /// The module the function was defined in, if any.
    pub module:             Option<String>,
    /// The scope the function was defined in; calls run in a child of it.
    pub closure:            Scope,
}

impl Function {
    /// The name used in messages, `<anonymous>` when the function has none.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

impl Value {
    #[must_use]
    pub const fn new(kind: ValueKind) -> Self {
        Self { kind,
               span: None,
               context: None }
    }

    #[must_use]
    pub const fn number(number: Number) -> Self {
        Self::new(ValueKind::Number(number))
    }

    #[must_use]
    pub const fn int(value: i64) -> Self {
        Self::number(Number::Int(value))
    }

    #[must_use]
    pub const fn float(value: f64) -> Self {
        Self::number(Number::Float(value))
    }

    /// The null value, which is the number `0`.
    #[must_use]
    pub const fn null() -> Self {
        Self::int(0)
    }

    /// `1` for `true`, `0` for `false`.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::number(Number::from(value))
    }

    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::new(ValueKind::String(text.into()))
    }

    #[must_use]
    pub fn list(elements: Vec<Self>) -> Self {
        Self::new(ValueKind::List(Rc::new(RefCell::new(elements))))
    }

    #[must_use]
    pub fn dict(entries: Vec<(String, Self)>) -> Self {
        Self::new(ValueKind::Dict(Rc::new(RefCell::new(entries))))
    }

    #[must_use]
    pub fn function(function: Function) -> Self {
        Self::new(ValueKind::Function(Rc::new(function)))
    }

    #[must_use]
    pub const fn builtin(builtin: &'static Builtin) -> Self {
        Self::new(ValueKind::BuiltIn(builtin))
    }

    /// Re-stamps the value with the span it is now being used at.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Re-stamps the value with the context it is now being used in.
    #[must_use]
    pub fn with_context(mut self, context: Rc<Context>) -> Self {
        self.context = Some(context);
        self
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<Number> {
        match self.kind {
            ValueKind::Number(number) => Some(number),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::String(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&ListRef> {
        match &self.kind {
            ValueKind::List(elements) => Some(elements),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_dict(&self) -> Option<&DictRef> {
        match &self.kind {
            ValueKind::Dict(entries) => Some(entries),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self.kind, ValueKind::Function(_) | ValueKind::BuiltIn(_))
    }

    /// Numbers are truthy unless zero, strings unless empty. Lists,
    /// dictionaries and functions are always falsy.
    #[must_use]
    pub fn is_true(&self) -> bool {
        match &self.kind {
            ValueKind::Number(number) => number.is_true(),
            ValueKind::String(text) => !text.is_empty(),
            _ => false,
        }
    }

    /// Returns `true` if a keyword argument with this name can be passed to
    /// the value when it is called.
    #[must_use]
    pub fn accepts_keyword(&self, name: &str) -> bool {
        match &self.kind {
            ValueKind::Function(function) => function.optional_params
                                                     .iter()
                                                     .any(|(param, _)| param == name),
            _ => false,
        }
    }

    /// Renders the value the way it appears inside a dictionary: strings are
    /// quoted with `"` and `\` escaped, everything else prints as usual.
    #[must_use]
    pub fn repr(&self) -> String {
        Repr(self).to_string()
    }

    /// Writes the value, tracking the containers already being written so
    /// that a list or dictionary reachable from itself prints as `[...]` or
    /// `{...}`.
    fn render(&self, f: &mut fmt::Formatter<'_>, quoted: bool, seen: &mut Vec<*const ()>) -> fmt::Result {
        match &self.kind {
            ValueKind::Number(number) => write!(f, "{number}"),
            ValueKind::String(text) if quoted => write_quoted(f, text),
            ValueKind::String(text) => f.write_str(text),
            ValueKind::List(elements) => {
                let address = Rc::as_ptr(elements).cast::<()>();
                if seen.contains(&address) {
                    return f.write_str("[...]");
                }
                seen.push(address);
                f.write_str("[")?;
                for (i, element) in elements.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    element.render(f, false, seen)?;
                }
                seen.pop();
                f.write_str("]")
            },
            ValueKind::Dict(entries) => {
                let address = Rc::as_ptr(entries).cast::<()>();
                if seen.contains(&address) {
                    return f.write_str("{...}");
                }
                seen.push(address);
                f.write_str("{")?;
                for (i, (key, value)) in entries.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, key)?;
                    f.write_str(": ")?;
                    value.render(f, true, seen)?;
                }
                seen.pop();
                f.write_str("}")
            },
            ValueKind::Function(function) => write!(f, "<function {}>", function.display_name()),
            ValueKind::BuiltIn(builtin) => write!(f, "<built-in function {}>", builtin.name),
        }
    }

    /// Structural equality. A pair of containers met again while it is
    /// still being compared counts as equal.
    fn equals(&self, other: &Self, seen: &mut Vec<(*const (), *const ())>) -> bool {
        match (&self.kind, &other.kind) {
            (ValueKind::Number(a), ValueKind::Number(b)) => a.equals(*b),
            (ValueKind::String(a), ValueKind::String(b)) => a == b,
            (ValueKind::List(a), ValueKind::List(b)) => {
                let pair = (Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>());
                if Rc::ptr_eq(a, b) || seen.contains(&pair) {
                    return true;
                }
                seen.push(pair);
                let (a, b) = (a.borrow(), b.borrow());
                let equal = a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y, seen));
                seen.pop();
                equal
            },
            (ValueKind::Dict(a), ValueKind::Dict(b)) => {
                let pair = (Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>());
                if Rc::ptr_eq(a, b) || seen.contains(&pair) {
                    return true;
                }
                seen.push(pair);
                let (a, b) = (a.borrow(), b.borrow());
                let equal = a.len() == b.len()
                            && a.iter()
                                .zip(b.iter())
                                .all(|((key_a, x), (key_b, y))| key_a == key_b && x.equals(y, seen));
                seen.pop();
                equal
            },
            (ValueKind::Function(a), ValueKind::Function(b)) => Rc::ptr_eq(a, b),
            (ValueKind::BuiltIn(a), ValueKind::BuiltIn(b)) => a.name == b.name,
            _ => false,
        }
    }
}

/// Writes `text` as a string literal the lexer reads back unchanged.
fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in text.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

/// Display adapter for `Value::repr`.
struct Repr<'a>(&'a Value);

impl fmt::Display for Repr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.render(f, true, &mut Vec::new())
    }
}

/// Numbers compare by numeric value across kinds; lists and dictionaries
/// compare by contents; functions compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, &mut Vec::new())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, false, &mut Vec::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValueKind::Number(number) => write!(f, "Number({number:?})"),
            ValueKind::String(text) => write!(f, "String({text:?})"),
            ValueKind::List(_) => write!(f, "List({})", Repr(self)),
            ValueKind::Dict(_) => write!(f, "Dict({})", Repr(self)),
            ValueKind::Function(function) => write!(f, "Function({})", function.display_name()),
            ValueKind::BuiltIn(builtin) => write!(f, "BuiltIn({})", builtin.name),
        }
    }
}
