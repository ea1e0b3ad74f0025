//! Elementwise lifting of scalar kernels.
//!
//! Broadcasting recurses into nested lists; a scalar paired with a list
//! is applied against every element, and two lists must have equal
//! lengths at every level.

use crate::errors::{length_mismatch, EvalResult};
use crate::value::Value;

/// Apply a unary scalar kernel elementwise.
pub fn broadcast1<F>(f: &F, value: Value) -> EvalResult
where
    F: Fn(Value) -> EvalResult,
{
    if let Value::List(items) = value {
        let snapshot: Vec<Value> = items.borrow().clone();
        let mut out = Vec::with_capacity(snapshot.len());
        for item in snapshot {
            out.push(broadcast1(f, item)?);
        }
        Ok(Value::list(out))
    } else {
        f(value)
    }
}

/// Apply a binary scalar kernel elementwise.
pub fn broadcast2<F>(f: &F, lhs: Value, rhs: Value) -> EvalResult
where
    F: Fn(Value, Value) -> EvalResult,
{
    match (lhs, rhs) {
        (Value::List(left), Value::List(right)) => {
            let left: Vec<Value> = left.borrow().clone();
            let right: Vec<Value> = right.borrow().clone();
            if left.len() != right.len() {
                return Err(length_mismatch(left.len(), right.len()));
            }
            let mut out = Vec::with_capacity(left.len());
            for (a, b) in left.into_iter().zip(right) {
                out.push(broadcast2(f, a, b)?);
            }
            Ok(Value::list(out))
        }
        (Value::List(left), scalar) => {
            let left: Vec<Value> = left.borrow().clone();
            let mut out = Vec::with_capacity(left.len());
            for a in left {
                out.push(broadcast2(f, a, scalar.clone())?);
            }
            Ok(Value::list(out))
        }
        (scalar, Value::List(right)) => {
            let right: Vec<Value> = right.borrow().clone();
            let mut out = Vec::with_capacity(right.len());
            for b in right {
                out.push(broadcast2(f, scalar.clone(), b)?);
            }
            Ok(Value::list(out))
        }
        (lhs, rhs) => f(lhs, rhs),
    }
}
