//! Binary and unary operator evaluation.
//!
//! Scalar kernels live here and are lifted over lists through the
//! broadcast module. Numeric promotion: int⊗int stays int, anything
//! involving a float goes float; `Inf` is not an operand (it only
//! bounds ranges). Comparisons yield `Int(1)`/`Int(0)`; ordering a
//! `Nil` operand is simply false rather than an error, so guards over
//! unbound names fall through to nil.

use nc_ir::{BinaryOp, UnaryOp};

use crate::broadcast::{broadcast1, broadcast2};
use crate::errors::{
    binary_type_mismatch, division_by_zero, no_length, type_mismatch, unbounded_length,
    EvalResult,
};
use crate::value::Value;

/// Evaluate `lhs op rhs` with broadcasting.
///
/// `&`/`|` arrive here only on the non-short-circuit (list) path; the
/// interpreter handles scalar short-circuiting before evaluating the
/// right operand.
pub fn evaluate_binary(lhs: Value, rhs: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => broadcast2(&scalar_add, lhs, rhs),
        BinaryOp::Sub => broadcast2(&scalar_sub, lhs, rhs),
        BinaryOp::Mul => broadcast2(&scalar_mul, lhs, rhs),
        BinaryOp::Div => broadcast2(&scalar_div, lhs, rhs),
        BinaryOp::Mod => broadcast2(&scalar_mod, lhs, rhs),
        BinaryOp::Pow => broadcast2(&scalar_pow, lhs, rhs),
        BinaryOp::Lt => broadcast2(&scalar_lt, lhs, rhs),
        BinaryOp::Gt => broadcast2(&scalar_gt, lhs, rhs),
        BinaryOp::LtEq => broadcast2(&scalar_lt_eq, lhs, rhs),
        BinaryOp::GtEq => broadcast2(&scalar_gt_eq, lhs, rhs),
        BinaryOp::Eq => broadcast2(&scalar_eq, lhs, rhs),
        BinaryOp::NotEq => broadcast2(&scalar_not_eq, lhs, rhs),
        BinaryOp::And => broadcast2(&scalar_and, lhs, rhs),
        BinaryOp::Or => broadcast2(&scalar_or, lhs, rhs),
    }
}

/// Evaluate a unary operator. `-` and `!` broadcast; `#` does not (the
/// length of a list is the list's, not its elements').
pub fn evaluate_unary(value: Value, op: UnaryOp) -> EvalResult {
    match op {
        UnaryOp::Neg => broadcast1(&scalar_neg, value),
        UnaryOp::Not => broadcast1(&scalar_not, value),
        UnaryOp::Len => length(value),
    }
}

/// Numeric coercion with a typed error, for builtins and range bounds.
pub fn number(value: &Value) -> EvalResult<f64> {
    value
        .as_number()
        .ok_or_else(|| type_mismatch("number", value.type_name()))
}

pub(crate) fn scalar_add(lhs: Value, rhs: Value) -> EvalResult {
    arith(lhs, rhs, "+", i64::wrapping_add, |a, b| a + b)
}

pub(crate) fn scalar_sub(lhs: Value, rhs: Value) -> EvalResult {
    arith(lhs, rhs, "-", i64::wrapping_sub, |a, b| a - b)
}

pub(crate) fn scalar_mul(lhs: Value, rhs: Value) -> EvalResult {
    arith(lhs, rhs, "*", i64::wrapping_mul, |a, b| a * b)
}

fn scalar_div(lhs: Value, rhs: Value) -> EvalResult {
    if let (Value::Int(a), Value::Int(b)) = (&lhs, &rhs) {
        if *b == 0 {
            return Err(division_by_zero());
        }
        return Ok(Value::Int(a.wrapping_div(*b)));
    }
    let (a, b) = float_pair(&lhs, &rhs, "/")?;
    Ok(Value::Float(a / b))
}

fn scalar_mod(lhs: Value, rhs: Value) -> EvalResult {
    if let (Value::Int(a), Value::Int(b)) = (&lhs, &rhs) {
        if *b == 0 {
            return Err(division_by_zero());
        }
        return Ok(Value::Int(a.wrapping_rem(*b)));
    }
    let (a, b) = float_pair(&lhs, &rhs, "%")?;
    Ok(Value::Float(a % b))
}

/// `^` always computes through floating pow; an int base and exponent
/// truncate back to int.
fn scalar_pow(lhs: Value, rhs: Value) -> EvalResult {
    let (a, b) = float_pair(&lhs, &rhs, "^")?;
    let result = a.powf(b);
    if let (Value::Int(_), Value::Int(_)) = (&lhs, &rhs) {
        Ok(Value::Int(result as i64))
    } else {
        Ok(Value::Float(result))
    }
}

fn scalar_lt(lhs: Value, rhs: Value) -> EvalResult {
    ordering(lhs, rhs, "<", |a, b| a < b)
}

fn scalar_gt(lhs: Value, rhs: Value) -> EvalResult {
    ordering(lhs, rhs, ">", |a, b| a > b)
}

fn scalar_lt_eq(lhs: Value, rhs: Value) -> EvalResult {
    ordering(lhs, rhs, "<=", |a, b| a <= b)
}

fn scalar_gt_eq(lhs: Value, rhs: Value) -> EvalResult {
    ordering(lhs, rhs, ">=", |a, b| a >= b)
}

fn scalar_eq(lhs: Value, rhs: Value) -> EvalResult {
    Ok(truth(scalar_equals(&lhs, &rhs)))
}

fn scalar_not_eq(lhs: Value, rhs: Value) -> EvalResult {
    Ok(truth(!scalar_equals(&lhs, &rhs)))
}

pub(crate) fn scalar_and(lhs: Value, rhs: Value) -> EvalResult {
    Ok(truth(lhs.is_truthy() && rhs.is_truthy()))
}

pub(crate) fn scalar_or(lhs: Value, rhs: Value) -> EvalResult {
    Ok(truth(lhs.is_truthy() || rhs.is_truthy()))
}

fn scalar_neg(value: Value) -> EvalResult {
    match value {
        Value::Int(v) => Ok(Value::Int(v.wrapping_neg())),
        Value::Float(v) => Ok(Value::Float(-v)),
        other => Err(type_mismatch("number", other.type_name())),
    }
}

fn scalar_not(value: Value) -> EvalResult {
    Ok(truth(!value.is_truthy()))
}

fn length(value: Value) -> EvalResult {
    match value {
        Value::List(items) => Ok(Value::Int(to_i64(items.borrow().len()))),
        Value::Str(s) => Ok(Value::Int(to_i64(s.len()))),
        Value::Range(range) => {
            if range.is_unbounded() {
                return Err(unbounded_length());
            }
            Ok(Value::Int(to_i64(range.to_list()?.len())))
        }
        other => Err(no_length(other.type_name())),
    }
}

fn arith(
    lhs: Value,
    rhs: Value,
    op: &'static str,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> EvalResult {
    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(int_op(*a, *b))),
        _ => {
            let (a, b) = float_pair(&lhs, &rhs, op)?;
            Ok(Value::Float(float_op(a, b)))
        }
    }
}

fn ordering(
    lhs: Value,
    rhs: Value,
    op: &'static str,
    cmp: fn(f64, f64) -> bool,
) -> EvalResult {
    // Nil orders below nothing and above nothing.
    if matches!(lhs, Value::Nil) || matches!(rhs, Value::Nil) {
        return Ok(truth(false));
    }
    let (a, b) = float_pair(&lhs, &rhs, op)?;
    Ok(truth(cmp(a, b)))
}

fn scalar_equals(lhs: &Value, rhs: &Value) -> bool {
    match (lhs.as_number(), rhs.as_number()) {
        (Some(a), Some(b)) => a == b,
        _ => match (lhs, rhs) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Nil, Value::Nil) | (Value::Inf, Value::Inf) => true,
            _ => false,
        },
    }
}

fn float_pair(lhs: &Value, rhs: &Value, op: &'static str) -> EvalResult<(f64, f64)> {
    match (lhs.as_number(), rhs.as_number()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(binary_type_mismatch(op, lhs.type_name(), rhs.type_name())),
    }
}

fn truth(value: bool) -> Value {
    Value::Int(i64::from(value))
}

fn to_i64(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}
