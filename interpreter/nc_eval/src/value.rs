//! The runtime value model.
//!
//! Scalars (`Nil`, `Int`, `Float`, `Inf`, `Str`) have value semantics;
//! `List`, `Range`, and `Callable` are reference-semantic handles, so
//! mutation through one copy is visible through every copy.

use std::fmt;
use std::rc::Rc;

use nc_ir::{Expr, Name};

use crate::env::EnvRef;
use crate::range::RangeValue;
use crate::shared::Shared;
use crate::EvalResult;

#[derive(Clone, Debug)]
pub enum Value {
    Nil,
    Int(i64),
    Float(f64),
    Inf,
    Str(Rc<str>),
    List(Shared<Vec<Value>>),
    Range(RangeValue),
    Callable(Callable),
}

impl Value {
    pub fn int(value: i64) -> Value {
        Value::Int(value)
    }

    pub fn float(value: f64) -> Value {
        Value::Float(value)
    }

    pub fn string(text: impl Into<Rc<str>>) -> Value {
        Value::Str(text.into())
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Shared::new(items))
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Inf => "Inf",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Range(_) => "range",
            Value::Callable(_) => "callable",
        }
    }

    /// Numeric view, when one exists. `Inf` is not a number here; it
    /// only has meaning as a range endpoint.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Nonzero numbers and nonempty strings/lists are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(v) => *v != 0,
            Value::Float(v) => *v != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.borrow().is_empty(),
            Value::Nil | Value::Inf | Value::Range(_) | Value::Callable(_) => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) | (Value::Inf, Value::Inf) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                Shared::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Value::Range(a), Value::Range(b)) => a.same_range(b),
            (Value::Callable(a), Value::Callable(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Inf => f.write_str("Inf"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Range(range) => write!(f, "{}..{}", range.start(), range.stop()),
            Value::Callable(callable) => write!(f, "<fn {}>", callable.describe()),
        }
    }
}

/// A callable value: a script-defined closure or a native builtin.
#[derive(Clone)]
pub enum Callable {
    Script(Rc<ScriptFn>),
    Native(NativeFn),
}

impl Callable {
    pub fn arity(&self) -> usize {
        match self {
            Callable::Script(func) => func.params.len(),
            Callable::Native(native) => native.arity,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Callable::Script(_) => "script",
            Callable::Native(native) => native.name,
        }
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callable::Script(a), Callable::Script(b)) => Rc::ptr_eq(a, b),
            (Callable::Native(a), Callable::Native(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The captured env can point back at this callable; keep Debug
        // shallow to avoid walking the cycle.
        match self {
            Callable::Script(func) => write!(f, "Script({:?})", func.name),
            Callable::Native(native) => write!(f, "Native({})", native.name),
        }
    }
}

/// A script-defined function: parameters, shared body, and the
/// environment captured at definition time (lexical scoping).
pub struct ScriptFn {
    pub name: Name,
    pub params: Vec<Name>,
    pub body: Rc<Expr>,
    pub env: EnvRef,
}

/// A builtin implemented in Rust.
#[derive(Clone, Copy)]
pub struct NativeFn {
    pub name: &'static str,
    pub arity: usize,
    pub func: fn(&[Value]) -> EvalResult,
}
