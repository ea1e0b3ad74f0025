//! Chained evaluation scopes.
//!
//! Lookup walks the parent chain and yields `Nil` for unbound names; an
//! unbound read is not an error in nc. Binding always writes into the
//! local scope (shadowing), never a parent. The builtin root scope is
//! marked read-only after installation.

use nc_ir::Name;
use rustc_hash::FxHashMap;

use crate::shared::Shared;
use crate::value::Value;

pub type EnvRef = Shared<Env>;

/// Why a bind was rejected. The evaluator converts this into an
/// `EvalError` with the name's text filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindError {
    ReadOnly,
}

#[derive(Debug, Default)]
pub struct Env {
    bindings: FxHashMap<Name, Value>,
    parent: Option<EnvRef>,
    read_only: bool,
}

impl Env {
    /// A fresh scope with no parent.
    pub fn root() -> EnvRef {
        Shared::new(Env::default())
    }

    /// A fresh scope chained under `parent`.
    pub fn child(parent: &EnvRef) -> EnvRef {
        Shared::new(Env {
            bindings: FxHashMap::default(),
            parent: Some(parent.clone()),
            read_only: false,
        })
    }

    pub fn mark_read_only(&mut self) {
        self.read_only = true;
    }

    /// Resolve `name` through the scope chain; unbound names are `Nil`.
    pub fn lookup(&self, name: Name) -> Value {
        if let Some(value) = self.bindings.get(&name) {
            return value.clone();
        }
        match &self.parent {
            Some(parent) => parent.borrow().lookup(name),
            None => Value::Nil,
        }
    }

    /// Bind `name` in this scope only.
    pub fn bind(&mut self, name: Name, value: Value) -> Result<(), BindError> {
        if self.read_only {
            return Err(BindError::ReadOnly);
        }
        self.bindings.insert(name, value);
        Ok(())
    }

    /// Unchecked insert, for installing builtins and call parameters.
    pub(crate) fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nc_ir::SharedInterner;
    use pretty_assertions::assert_eq;

    #[test]
    fn unbound_lookup_is_nil() {
        let interner = SharedInterner::default();
        let x = interner.intern("x");
        let env = Env::root();
        assert_eq!(env.borrow().lookup(x), Value::Nil);
    }

    #[test]
    fn lookup_walks_the_parent_chain() {
        let interner = SharedInterner::default();
        let x = interner.intern("x");
        let root = Env::root();
        root.borrow_mut().bind(x, Value::Int(1)).unwrap();
        let child = Env::child(&root);
        let grandchild = Env::child(&child);
        assert_eq!(grandchild.borrow().lookup(x), Value::Int(1));
    }

    #[test]
    fn bind_shadows_instead_of_climbing() {
        let interner = SharedInterner::default();
        let x = interner.intern("x");
        let root = Env::root();
        root.borrow_mut().bind(x, Value::Int(1)).unwrap();
        let child = Env::child(&root);
        child.borrow_mut().bind(x, Value::Int(2)).unwrap();
        assert_eq!(child.borrow().lookup(x), Value::Int(2));
        assert_eq!(root.borrow().lookup(x), Value::Int(1));
    }

    #[test]
    fn read_only_scope_rejects_bind() {
        let interner = SharedInterner::default();
        let x = interner.intern("x");
        let root = Env::root();
        root.borrow_mut().mark_read_only();
        assert_eq!(
            root.borrow_mut().bind(x, Value::Int(1)),
            Err(BindError::ReadOnly)
        );
        // A child of a read-only scope is still writable.
        let child = Env::child(&root);
        assert!(child.borrow_mut().bind(x, Value::Int(1)).is_ok());
    }
}
