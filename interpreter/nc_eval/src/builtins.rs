//! The builtin math table.
//!
//! Installed into a read-only root scope; every builtin takes one
//! argument, coerces it to float, and broadcasts over lists.

use nc_ir::SharedInterner;

use crate::broadcast::broadcast1;
use crate::env::{Env, EnvRef};
use crate::operators::number;
use crate::value::{Callable, NativeFn, Value};
use crate::EvalResult;

const BUILTINS: &[(&str, fn(&[Value]) -> EvalResult)] = &[
    ("sin", native_sin),
    ("cos", native_cos),
    ("tan", native_tan),
    ("asin", native_asin),
    ("acos", native_acos),
    ("atan", native_atan),
    ("exp", native_exp),
    ("log", native_log),
    ("sqrt", native_sqrt),
];

/// Build the read-only root scope holding the math builtins.
pub fn builtin_root(interner: &SharedInterner) -> EnvRef {
    let root = Env::root();
    {
        let mut env = root.borrow_mut();
        for &(name, func) in BUILTINS {
            let callable = Callable::Native(NativeFn {
                name,
                arity: 1,
                func,
            });
            env.define(interner.intern(name), Value::Callable(callable));
        }
        env.mark_read_only();
    }
    root
}

fn unary_math(f: fn(f64) -> f64, args: &[Value]) -> EvalResult {
    let arg = args.first().cloned().unwrap_or(Value::Nil);
    broadcast1(&|v: Value| Ok(Value::Float(f(number(&v)?))), arg)
}

fn native_sin(args: &[Value]) -> EvalResult {
    unary_math(f64::sin, args)
}

fn native_cos(args: &[Value]) -> EvalResult {
    unary_math(f64::cos, args)
}

fn native_tan(args: &[Value]) -> EvalResult {
    unary_math(f64::tan, args)
}

fn native_asin(args: &[Value]) -> EvalResult {
    unary_math(f64::asin, args)
}

fn native_acos(args: &[Value]) -> EvalResult {
    unary_math(f64::acos, args)
}

fn native_atan(args: &[Value]) -> EvalResult {
    unary_math(f64::atan, args)
}

fn native_exp(args: &[Value]) -> EvalResult {
    unary_math(f64::exp, args)
}

fn native_log(args: &[Value]) -> EvalResult {
    unary_math(f64::ln, args)
}

fn native_sqrt(args: &[Value]) -> EvalResult {
    unary_math(f64::sqrt, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn root_contains_the_math_table_and_is_read_only() {
        let interner = SharedInterner::default();
        let root = builtin_root(&interner);
        let sin = root.borrow().lookup(interner.intern("sin"));
        assert!(matches!(sin, Value::Callable(_)));
        assert!(root
            .borrow_mut()
            .bind(interner.intern("x"), Value::Int(1))
            .is_err());
    }

    #[test]
    fn builtins_broadcast_over_lists() {
        let result = native_sqrt(&[Value::list(vec![Value::Int(4), Value::Int(9)])]).unwrap();
        assert_eq!(
            result,
            Value::list(vec![Value::Float(2.0), Value::Float(3.0)])
        );
    }

    #[test]
    fn non_numeric_argument_is_a_type_mismatch() {
        assert!(native_sin(&[Value::string("x")]).is_err());
    }
}
