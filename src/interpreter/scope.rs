use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::{position::Position, value::core::Value};

/// A shared, mutable symbol table.
pub type Scope = Rc<RefCell<SymbolTable>>;

/// A mapping from names to values, chained to an optional parent table.
///
/// Lookups walk up the parent chain; `set` and `remove` only touch the local
/// table. Module tables carry the module name they were registered under.
///
/// # Example
/// ```
/// use kode::interpreter::{scope::SymbolTable, value::core::Value};
///
/// let globals = SymbolTable::new(None).into_scope();
/// globals.borrow_mut().set("x", Value::int(1));
///
/// let mut local = SymbolTable::new(Some(globals.clone()));
/// assert_eq!(local.get("x"), Some(Value::int(1)));
///
/// local.set("x", Value::int(2));
/// assert_eq!(local.get("x"), Some(Value::int(2)));
/// assert_eq!(local.remove("x"), Some(Value::int(2)));
/// assert_eq!(local.get("x"), Some(Value::int(1)));
/// ```
#[derive(Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Value>,
    parent:  Option<Scope>,
    name:    Option<String>,
}

impl SymbolTable {
    /// Creates an anonymous table chained to `parent`.
    #[must_use]
    pub fn new(parent: Option<Scope>) -> Self {
        Self { symbols: HashMap::new(),
               parent,
               name: None }
    }

    /// Creates a root table registered under a module name.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self { symbols: HashMap::new(),
               parent:  None,
               name:    Some(name.to_string()), }
    }

    #[must_use]
    pub fn into_scope(self) -> Scope {
        Rc::new(RefCell::new(self))
    }

    /// Looks a name up in this table and then in its ancestors.
    ///
    /// A bound value is returned even when it is falsy; only absence yields
    /// `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.symbols.get(name) {
            return Some(value.clone());
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.borrow().get(name))
    }

    /// Returns `true` if the name is bound in this table itself.
    #[must_use]
    pub fn contains_local(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.symbols.insert(name.to_string(), value);
    }

    /// Unbinds a name from this table, leaving ancestors untouched.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.symbols.remove(name)
    }

    /// The module name this table was registered under, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A call frame identity used for diagnostics.
///
/// Contexts chain to the caller's context together with the position the call
/// was made from, which is what a traceback prints. They play no part in name
/// lookup.
#[derive(Debug)]
pub struct Context {
    pub display_name:     String,
    pub parent:           Option<Rc<Self>>,
    pub parent_entry_pos: Option<Position>,
}

impl Context {
    /// Creates a top-level context such as `<program>`.
    #[must_use]
    pub fn root(display_name: &str) -> Rc<Self> {
        Rc::new(Self { display_name:     display_name.to_string(),
                       parent:           None,
                       parent_entry_pos: None, })
    }

    /// Creates the context of a call made from `parent` at `entry`.
    #[must_use]
    pub fn child(parent: &Rc<Self>, display_name: &str, entry: Option<Position>) -> Rc<Self> {
        Rc::new(Self { display_name:     display_name.to_string(),
                       parent:           Some(Rc::clone(parent)),
                       parent_entry_pos: entry, })
    }
}

/// The evaluation environment of a node: its diagnostic context and the
/// symbol table names are resolved in.
#[derive(Clone)]
pub struct Frame {
    pub context: Rc<Context>,
    pub scope:   Scope,
}

/// A flat registry of named module tables.
///
/// Module lookup is independent of the lexical scope chain. Tables are only
/// ever appended; when a module name is registered twice, the latest table
/// wins.
#[derive(Default)]
pub struct ModuleRegistry {
    tables: Vec<Scope>,
}

impl ModuleRegistry {
    pub fn register(&mut self, table: Scope) {
        self.tables.push(table);
    }

    /// Finds the most recently registered table with the given name.
    ///
    /// The search runs newest first, so re-importing a module under the same
    /// name shadows the earlier table.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Scope> {
        self.tables
            .iter()
            .rev()
            .find(|table| table.borrow().name() == Some(name))
            .cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_unbinds_only_the_local_name() {
        let globals = SymbolTable::new(None).into_scope();
        globals.borrow_mut().set("x", Value::int(1));

        let mut local = SymbolTable::new(Some(globals.clone()));
        assert_eq!(local.remove("x"), None);
        assert_eq!(local.get("x"), Some(Value::int(1)));

        local.set("y", Value::int(2));
        assert_eq!(local.remove("y"), Some(Value::int(2)));
        assert_eq!(local.get("y"), None);
        assert!(globals.borrow().contains_local("x"));
    }

    #[test]
    fn latest_module_registration_shadows_earlier_ones() {
        let mut registry = ModuleRegistry::default();
        let first = SymbolTable::named("lib").into_scope();
        first.borrow_mut().set("v", Value::int(1));
        let second = SymbolTable::named("lib").into_scope();
        second.borrow_mut().set("v", Value::int(2));

        registry.register(first);
        registry.register(second);

        let found = registry.find("lib").map(|table| table.borrow().get("v"));
        assert_eq!(found, Some(Some(Value::int(2))));
        assert!(registry.find("other").is_none());
        assert_eq!(registry.len(), 2);
    }
}
