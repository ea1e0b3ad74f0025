//! Lazy stateful ranges.
//!
//! A range is a cursor, not a collection: `next()` advances shared state,
//! so every copy of the handle sees the same progress. Lifecycle is
//! fresh → running → exhausted; the call that discovers the end yields
//! nothing and marks the range exhausted, and any call after that is an
//! error.

use std::fmt;

use crate::errors::{
    exhausted_range, invalid_count, invalid_step, unbounded_enumeration, EvalResult,
};
use crate::operators::scalar_add;
use crate::shared::Shared;
use crate::value::Value;

#[derive(Debug)]
struct RangeState {
    start: Value,
    stop: Value,
    step: Value,
    current: Value,
    /// Elements produced so far; only tracked for count-bounded ranges.
    emitted: u64,
    /// `Some` for count-bounded ranges.
    length: Option<u64>,
    started: bool,
    exhausted: bool,
}

#[derive(Clone, Debug)]
pub struct RangeValue {
    state: Shared<RangeState>,
}

impl RangeValue {
    fn from_parts(start: Value, stop: Value, step: Value, length: Option<u64>) -> RangeValue {
        RangeValue {
            state: Shared::new(RangeState {
                start,
                stop,
                step,
                current: Value::Nil,
                emitted: 0,
                length,
                started: false,
                exhausted: false,
            }),
        }
    }

    /// `start..stop..s` over integers. The step's sign is normalized to
    /// the start→stop direction.
    pub fn int_step(start: i64, stop: i64, step: i64) -> EvalResult<RangeValue> {
        if step == 0 {
            return Err(invalid_step());
        }
        let step = if stop < start { -step.abs() } else { step.abs() };
        Ok(RangeValue::from_parts(
            Value::Int(start),
            Value::Int(stop),
            Value::Int(step),
            None,
        ))
    }

    /// Float stepping, same sign normalization as [`RangeValue::int_step`].
    pub fn float_step(start: f64, stop: f64, step: f64) -> EvalResult<RangeValue> {
        if step == 0.0 {
            return Err(invalid_step());
        }
        let step = if stop < start { -step.abs() } else { step.abs() };
        Ok(RangeValue::from_parts(
            Value::Float(start),
            Value::Float(stop),
            Value::Float(step),
            None,
        ))
    }

    /// `start..Inf..s`: never terminates on its own.
    pub fn int_unbounded(start: i64, step: i64) -> EvalResult<RangeValue> {
        if step == 0 {
            return Err(invalid_step());
        }
        Ok(RangeValue::from_parts(
            Value::Int(start),
            Value::Inf,
            Value::Int(step),
            None,
        ))
    }

    pub fn float_unbounded(start: f64, step: f64) -> EvalResult<RangeValue> {
        if step == 0.0 {
            return Err(invalid_step());
        }
        Ok(RangeValue::from_parts(
            Value::Float(start),
            Value::Inf,
            Value::Float(step),
            None,
        ))
    }

    /// `start..stop..+n`: exactly `n` elements, the last exactly `stop`.
    ///
    /// When the span does not divide evenly into `n - 1` steps the range
    /// falls back to float stepping.
    pub fn int_count(start: i64, stop: i64, count: i64) -> EvalResult<RangeValue> {
        if count < 2 {
            return Err(invalid_count(count));
        }
        let span = stop - start;
        let divisions = count - 1;
        if span % divisions == 0 {
            Ok(RangeValue::from_parts(
                Value::Int(start),
                Value::Int(stop),
                Value::Int(span / divisions),
                Some(count.unsigned_abs()),
            ))
        } else {
            RangeValue::float_count(start as f64, stop as f64, count)
        }
    }

    pub fn float_count(start: f64, stop: f64, count: i64) -> EvalResult<RangeValue> {
        if count < 2 {
            return Err(invalid_count(count));
        }
        let step = (stop - start) / ((count - 1) as f64);
        Ok(RangeValue::from_parts(
            Value::Float(start),
            Value::Float(stop),
            Value::Float(step),
            Some(count.unsigned_abs()),
        ))
    }

    pub fn start(&self) -> Value {
        self.state.borrow().start.clone()
    }

    pub fn stop(&self) -> Value {
        self.state.borrow().stop.clone()
    }

    /// Step-bounded toward `Inf`: no call to `next()` ever terminates it.
    pub fn is_unbounded(&self) -> bool {
        let state = self.state.borrow();
        state.length.is_none() && matches!(state.stop, Value::Inf)
    }

    pub fn same_range(&self, other: &RangeValue) -> bool {
        Shared::ptr_eq(&self.state, &other.state)
    }

    /// Advance the cursor.
    ///
    /// `Ok(Some(v))` while running, `Ok(None)` on the call that finds the
    /// end, `Err(ExhaustedRange)` on every call after that.
    pub fn next(&self) -> EvalResult<Option<Value>> {
        let mut state = self.state.borrow_mut();
        if state.exhausted {
            return Err(exhausted_range());
        }

        if let Some(length) = state.length {
            if state.emitted == length {
                state.current = Value::Nil;
                state.exhausted = true;
                return Ok(None);
            }
            let value = if state.emitted + 1 == length {
                // Assign the endpoint instead of accumulating into it, so
                // float rounding never drifts the final element.
                state.stop.clone()
            } else if state.started {
                scalar_add(state.current.clone(), state.step.clone())?
            } else {
                state.started = true;
                state.start.clone()
            };
            state.emitted += 1;
            state.current = value.clone();
            return Ok(Some(value));
        }

        let value = if state.started {
            scalar_add(state.current.clone(), state.step.clone())?
        } else {
            state.started = true;
            state.start.clone()
        };
        if !in_range(&value, &state.start, &state.stop) {
            state.current = Value::Nil;
            state.exhausted = true;
            return Ok(None);
        }
        state.current = value.clone();
        Ok(Some(value))
    }

    /// Materialize the remaining elements.
    pub fn to_list(&self) -> EvalResult<Vec<Value>> {
        if self.is_unbounded() {
            return Err(unbounded_enumeration());
        }
        let mut items = Vec::new();
        while let Some(value) = self.next()? {
            items.push(value);
        }
        Ok(items)
    }
}

impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start(), self.stop())
    }
}

/// Membership in the closed interval between the endpoints; an `Inf`
/// stop admits everything.
fn in_range(value: &Value, start: &Value, stop: &Value) -> bool {
    if matches!(stop, Value::Inf) {
        return true;
    }
    let (Some(v), Some(a), Some(b)) = (value.as_number(), start.as_number(), stop.as_number())
    else {
        return false;
    };
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    lo <= v && v <= hi
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;
    use pretty_assertions::assert_eq;

    fn ints(range: &RangeValue) -> Vec<Value> {
        range.to_list().unwrap()
    }

    #[test]
    fn step_range_is_inclusive_of_stop() {
        let range = RangeValue::int_step(0, 2, 1).unwrap();
        assert_eq!(
            ints(&range),
            vec![Value::Int(0), Value::Int(1), Value::Int(2)]
        );
    }

    #[test]
    fn step_sign_is_normalized_to_direction() {
        let range = RangeValue::int_step(5, 1, 1).unwrap();
        assert_eq!(
            ints(&range),
            vec![
                Value::Int(5),
                Value::Int(4),
                Value::Int(3),
                Value::Int(2),
                Value::Int(1),
            ]
        );
    }

    #[test]
    fn step_overshoot_stops_before_leaving_the_interval() {
        let range = RangeValue::int_step(0, 5, 2).unwrap();
        assert_eq!(
            ints(&range),
            vec![Value::Int(0), Value::Int(2), Value::Int(4)]
        );
    }

    #[test]
    fn divisible_count_range_stays_integer() {
        let range = RangeValue::int_count(0, 10, 6).unwrap();
        assert_eq!(
            ints(&range),
            vec![
                Value::Int(0),
                Value::Int(2),
                Value::Int(4),
                Value::Int(6),
                Value::Int(8),
                Value::Int(10),
            ]
        );
    }

    #[test]
    fn indivisible_count_range_falls_back_to_float() {
        let range = RangeValue::int_count(0, 10, 5).unwrap();
        let items = ints(&range);
        assert_eq!(items.len(), 5);
        assert_eq!(
            items,
            vec![
                Value::Float(0.0),
                Value::Float(2.5),
                Value::Float(5.0),
                Value::Float(7.5),
                Value::Float(10.0),
            ]
        );
    }

    #[test]
    fn count_range_last_element_is_exactly_stop() {
        let range = RangeValue::float_count(0.0, 1.0, 3).unwrap();
        let items = ints(&range);
        assert_eq!(items.last(), Some(&Value::Float(1.0)));
    }

    #[test]
    fn next_after_exhaustion_is_an_error() {
        let range = RangeValue::int_step(0, 1, 1).unwrap();
        assert_eq!(range.next().unwrap(), Some(Value::Int(0)));
        assert_eq!(range.next().unwrap(), Some(Value::Int(1)));
        assert_eq!(range.next().unwrap(), None);
        let err = range.next().unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::ExhaustedRange);
    }

    #[test]
    fn copies_share_the_cursor() {
        let range = RangeValue::int_step(0, 10, 1).unwrap();
        let alias = range.clone();
        assert_eq!(range.next().unwrap(), Some(Value::Int(0)));
        assert_eq!(alias.next().unwrap(), Some(Value::Int(1)));
        assert_eq!(range.next().unwrap(), Some(Value::Int(2)));
    }

    #[test]
    fn unbounded_range_never_terminates_but_cannot_enumerate() {
        let range = RangeValue::int_unbounded(3, 2).unwrap();
        assert!(range.is_unbounded());
        assert_eq!(range.next().unwrap(), Some(Value::Int(3)));
        assert_eq!(range.next().unwrap(), Some(Value::Int(5)));
        let err = range.to_list().unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::UnboundedEnumeration);
    }

    #[test]
    fn zero_step_and_tiny_count_are_rejected() {
        assert_eq!(
            RangeValue::int_step(0, 5, 0).unwrap_err().kind,
            EvalErrorKind::InvalidStep
        );
        assert_eq!(
            RangeValue::int_count(0, 5, 1).unwrap_err().kind,
            EvalErrorKind::InvalidCount { count: 1 }
        );
    }

    #[test]
    fn single_element_interval() {
        let range = RangeValue::int_step(4, 4, 1).unwrap();
        assert_eq!(ints(&range), vec![Value::Int(4)]);
    }
}
