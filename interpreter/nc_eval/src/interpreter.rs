//! The tree-walking evaluator.

use std::rc::Rc;

use nc_ir::{AssignTarget, BinaryOp, Expr, Literal, Name, SharedInterner};
use tracing::trace;

use crate::builtins;
use crate::commands::CommandRegistry;
use crate::env::{BindError, Env, EnvRef};
use crate::errors::{
    arity_mismatch, index_out_of_range, invalid_parameter, not_callable, read_only_binding,
    type_mismatch, undefined_name, unknown_command,
};
use crate::operators::{evaluate_binary, evaluate_unary, number};
use crate::print_handler::PrintHandler;
use crate::range::RangeValue;
use crate::value::{Callable, ScriptFn, Value};
use crate::EvalResult;

pub struct Interpreter {
    interner: SharedInterner,
    commands: CommandRegistry,
    printer: PrintHandler,
}

impl Interpreter {
    pub fn new(interner: SharedInterner) -> Self {
        Interpreter::with_printer(interner, PrintHandler::default())
    }

    pub fn with_printer(interner: SharedInterner, printer: PrintHandler) -> Self {
        let commands = CommandRegistry::with_defaults(&interner);
        Interpreter {
            interner,
            commands,
            printer,
        }
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn printer(&self) -> &PrintHandler {
        &self.printer
    }

    /// A writable global scope over the read-only builtin root.
    pub fn global_env(&self) -> EnvRef {
        Env::child(&builtins::builtin_root(&self.interner))
    }

    pub fn eval(&self, expr: &Expr, env: &EnvRef) -> EvalResult {
        match expr {
            Expr::Literal(literal) => Ok(self.eval_literal(literal)),
            Expr::Ident(name) => Ok(env.borrow().lookup(*name)),
            Expr::Unary { op, operand } => {
                let value = self.eval(operand, env)?;
                evaluate_unary(value, *op)
            }
            Expr::Binary { op, lhs, rhs } => match op {
                BinaryOp::And => self.eval_and(lhs, rhs, env),
                BinaryOp::Or => self.eval_or(lhs, rhs, env),
                _ => {
                    let left = self.eval(lhs, env)?;
                    let right = self.eval(rhs, env)?;
                    evaluate_binary(left, right, *op)
                }
            },
            Expr::Assign { target, value } => self.eval_assign(target, value, env),
            Expr::Index { name, index } => self.eval_index(*name, index, env),
            Expr::Program(stmnts) | Expr::Block(stmnts) => self.eval_sequence(stmnts, env),
            Expr::List(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval(item, env)?);
                }
                Ok(Value::list(values))
            }
            Expr::Call { callee, args } => self.eval_call(*callee, args, env),
            Expr::FuncDef { name, params, body } => self.eval_fdef(*name, params, body, env),
            Expr::For {
                var,
                iterable,
                body,
            } => self.eval_for(*var, iterable, body, env),
            Expr::Range {
                start,
                stop,
                count,
                step,
            } => self.eval_range(start, stop, count.as_deref(), step.as_deref(), env),
            Expr::Command { name, args } => match self.commands.get(*name) {
                Some(command) => command(self, env, args),
                None => Err(unknown_command(self.interner.lookup(*name))),
            },
            Expr::Case { value, condition } => {
                if self.eval(condition, env)?.is_truthy() {
                    self.eval(value, env)
                } else {
                    Ok(Value::Nil)
                }
            }
            Expr::CaseChain(cases) => {
                for case in cases {
                    let value = self.eval(case, env)?;
                    if !matches!(value, Value::Nil) {
                        return Ok(value);
                    }
                }
                Ok(Value::Nil)
            }
        }
    }

    fn eval_literal(&self, literal: &Literal) -> Value {
        match literal {
            Literal::Int(v) => Value::Int(*v),
            Literal::Float(v) => Value::Float(*v),
            Literal::Str(name) => Value::string(self.interner.lookup(*name)),
            Literal::Inf => Value::Inf,
        }
    }

    fn eval_sequence(&self, stmnts: &[Expr], env: &EnvRef) -> EvalResult {
        let mut result = Value::Nil;
        for stmnt in stmnts {
            result = self.eval(stmnt, env)?;
        }
        Ok(result)
    }

    /// Short-circuit on scalar truthiness; a non-empty list operand on
    /// either side switches to elementwise evaluation. An empty list is
    /// just falsy.
    fn eval_and(&self, lhs: &Expr, rhs: &Expr, env: &EnvRef) -> EvalResult {
        let left = self.eval(lhs, env)?;
        if broadcasts(&left) {
            let right = self.eval(rhs, env)?;
            return evaluate_binary(left, right, BinaryOp::And);
        }
        if !left.is_truthy() {
            return Ok(Value::Int(0));
        }
        let right = self.eval(rhs, env)?;
        if broadcasts(&right) {
            return evaluate_binary(left, right, BinaryOp::And);
        }
        Ok(Value::Int(i64::from(right.is_truthy())))
    }

    fn eval_or(&self, lhs: &Expr, rhs: &Expr, env: &EnvRef) -> EvalResult {
        let left = self.eval(lhs, env)?;
        if broadcasts(&left) {
            let right = self.eval(rhs, env)?;
            return evaluate_binary(left, right, BinaryOp::Or);
        }
        if left.is_truthy() {
            return Ok(Value::Int(1));
        }
        let right = self.eval(rhs, env)?;
        if broadcasts(&right) {
            return evaluate_binary(left, right, BinaryOp::Or);
        }
        Ok(Value::Int(i64::from(right.is_truthy())))
    }

    fn eval_assign(&self, target: &AssignTarget, value: &Expr, env: &EnvRef) -> EvalResult {
        let value = self.eval(value, env)?;
        match target {
            AssignTarget::Name(name) => {
                self.bind(env, *name, value.clone())?;
                Ok(value)
            }
            AssignTarget::Index { name, index } => {
                let target_value = env.borrow().lookup(*name);
                let items = match target_value {
                    Value::List(items) => items,
                    Value::Nil => return Err(undefined_name(self.interner.lookup(*name))),
                    other => return Err(type_mismatch("list", other.type_name())),
                };
                let index = self.eval_list_index(index, env)?;
                let mut list = items.borrow_mut();
                let len = list.len();
                match usize::try_from(index).ok().and_then(|i| list.get_mut(i)) {
                    Some(slot) => {
                        *slot = value.clone();
                        Ok(value)
                    }
                    None => Err(index_out_of_range(index, len)),
                }
            }
        }
    }

    fn eval_index(&self, name: Name, index: &Expr, env: &EnvRef) -> EvalResult {
        let target_value = env.borrow().lookup(name);
        let items = match target_value {
            Value::List(items) => items,
            Value::Nil => return Err(undefined_name(self.interner.lookup(name))),
            other => return Err(type_mismatch("list", other.type_name())),
        };
        let index = self.eval_list_index(index, env)?;
        let list = items.borrow();
        usize::try_from(index)
            .ok()
            .and_then(|i| list.get(i).cloned())
            .ok_or_else(|| index_out_of_range(index, list.len()))
    }

    fn eval_list_index(&self, index: &Expr, env: &EnvRef) -> EvalResult<i64> {
        match self.eval(index, env)? {
            Value::Int(i) => Ok(i),
            other => Err(type_mismatch("int", other.type_name())),
        }
    }

    fn eval_call(&self, callee: Name, args: &[Expr], env: &EnvRef) -> EvalResult {
        let callable = match env.borrow().lookup(callee) {
            Value::Callable(callable) => callable,
            Value::Nil => return Err(undefined_name(self.interner.lookup(callee))),
            other => return Err(not_callable(other.type_name())),
        };

        // Arguments evaluate in the caller's environment.
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg, env)?);
        }

        match callable {
            Callable::Native(native) => {
                if values.len() != native.arity {
                    return Err(arity_mismatch(native.name, native.arity, values.len()));
                }
                (native.func)(&values)
            }
            Callable::Script(func) => {
                if values.len() != func.params.len() {
                    return Err(arity_mismatch(
                        self.interner.lookup(callee),
                        func.params.len(),
                        values.len(),
                    ));
                }
                trace!(name = self.interner.lookup(callee), "calling function");
                // The body runs in a child of the environment captured
                // at definition time, not the caller's.
                let local = Env::child(&func.env);
                {
                    let mut scope = local.borrow_mut();
                    for (param, value) in func.params.iter().zip(values) {
                        scope.define(*param, value);
                    }
                }
                self.eval(&func.body, &local)
            }
        }
    }

    fn eval_fdef(
        &self,
        name: Name,
        params: &[Expr],
        body: &Rc<Expr>,
        env: &EnvRef,
    ) -> EvalResult {
        let mut param_names = Vec::with_capacity(params.len());
        for param in params {
            match param {
                Expr::Ident(param_name) => param_names.push(*param_name),
                _ => return Err(invalid_parameter(self.interner.lookup(name))),
            }
        }
        let func = ScriptFn {
            name,
            params: param_names,
            body: Rc::clone(body),
            env: env.clone(),
        };
        self.bind(env, name, Value::Callable(Callable::Script(Rc::new(func))))?;
        Ok(Value::Nil)
    }

    /// The loop variable binds in the current scope and persists after
    /// the loop. The loop's value is the last iteration's body value.
    fn eval_for(&self, var: Name, iterable: &Expr, body: &Expr, env: &EnvRef) -> EvalResult {
        let iterable = self.eval(iterable, env)?;
        let mut result = Value::Nil;
        match iterable {
            Value::List(items) => {
                let snapshot: Vec<Value> = items.borrow().clone();
                for item in snapshot {
                    self.bind(env, var, item)?;
                    result = self.eval(body, env)?;
                }
            }
            Value::Range(range) => {
                while let Some(item) = range.next()? {
                    self.bind(env, var, item)?;
                    result = self.eval(body, env)?;
                }
            }
            scalar => {
                self.bind(env, var, scalar)?;
                result = self.eval(body, env)?;
            }
        }
        Ok(result)
    }

    fn eval_range(
        &self,
        start: &Expr,
        stop: &Expr,
        count: Option<&Expr>,
        step: Option<&Expr>,
        env: &EnvRef,
    ) -> EvalResult {
        let start = self.eval(start, env)?;
        let stop = self.eval(stop, env)?;
        let count = match count {
            Some(expr) => Some(self.eval_list_index(expr, env)?),
            None => None,
        };
        let step = match step {
            Some(expr) => Some(self.eval(expr, env)?),
            None => None,
        };

        let range = if matches!(stop, Value::Inf) {
            self.unbounded_range(&start, count, step.as_ref())?
        } else {
            self.bounded_range(&start, &stop, count, step.as_ref())?
        };
        Ok(Value::Range(range))
    }

    /// `a..Inf` family. A count rewrites to the bounded `a..a+n-1`; a
    /// step (or the default step of 1) never terminates.
    fn unbounded_range(
        &self,
        start: &Value,
        count: Option<i64>,
        step: Option<&Value>,
    ) -> EvalResult<RangeValue> {
        if let Some(n) = count {
            let last = n.wrapping_sub(1);
            return match start {
                Value::Int(a) => RangeValue::int_step(*a, a.wrapping_add(last), 1),
                _ => {
                    let a = number(start)?;
                    RangeValue::float_step(a, a + last as f64, 1.0)
                }
            };
        }
        match step {
            Some(step) => match (start, step) {
                (Value::Int(a), Value::Int(s)) => RangeValue::int_unbounded(*a, *s),
                _ => RangeValue::float_unbounded(number(start)?, number(step)?),
            },
            None => match start {
                Value::Int(a) => RangeValue::int_unbounded(*a, 1),
                _ => RangeValue::float_unbounded(number(start)?, 1.0),
            },
        }
    }

    /// `a..b` family: a count picks the count constructors, a step the
    /// step constructors; the bare form defaults to step 1 over ints and
    /// a 100-element count range over floats.
    fn bounded_range(
        &self,
        start: &Value,
        stop: &Value,
        count: Option<i64>,
        step: Option<&Value>,
    ) -> EvalResult<RangeValue> {
        if let Some(n) = count {
            return match (start, stop) {
                (Value::Int(a), Value::Int(b)) => RangeValue::int_count(*a, *b, n),
                _ => RangeValue::float_count(number(start)?, number(stop)?, n),
            };
        }
        if let Some(step) = step {
            return match (start, stop, step) {
                (Value::Int(a), Value::Int(b), Value::Int(s)) => RangeValue::int_step(*a, *b, *s),
                _ => RangeValue::float_step(number(start)?, number(stop)?, number(step)?),
            };
        }
        match (start, stop) {
            (Value::Int(a), Value::Int(b)) => RangeValue::int_step(*a, *b, 1),
            _ => RangeValue::float_count(number(start)?, number(stop)?, 100),
        }
    }

    fn bind(&self, env: &EnvRef, name: Name, value: Value) -> EvalResult<()> {
        env.borrow_mut().bind(name, value).map_err(|BindError::ReadOnly| {
            read_only_binding(self.interner.lookup(name))
        })
    }
}

/// Only a non-empty list turns `&`/`|` elementwise.
fn broadcasts(value: &Value) -> bool {
    match value {
        Value::List(items) => !items.borrow().is_empty(),
        _ => false,
    }
}
