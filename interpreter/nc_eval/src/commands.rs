//! Command statements.
//!
//! Commands are statement-level forms dispatched by interned name. Only
//! `print` is wired up; the other command words lex but do not dispatch.

use nc_ir::{Expr, Name, SharedInterner};
use rustc_hash::FxHashMap;

use crate::env::EnvRef;
use crate::errors::unbounded_enumeration;
use crate::interpreter::Interpreter;
use crate::value::Value;
use crate::EvalResult;

pub type CommandFn = fn(&Interpreter, &EnvRef, &[Expr]) -> EvalResult;

pub struct CommandRegistry {
    commands: FxHashMap<Name, CommandFn>,
}

impl CommandRegistry {
    pub fn with_defaults(interner: &SharedInterner) -> Self {
        let mut commands: FxHashMap<Name, CommandFn> = FxHashMap::default();
        commands.insert(interner.intern("print"), cmd_print as CommandFn);
        CommandRegistry { commands }
    }

    pub fn get(&self, name: Name) -> Option<CommandFn> {
        self.commands.get(&name).copied()
    }
}

/// Evaluate each argument and write one line. Scalars and lists are
/// space-separated display forms; a range argument streams lazily as
/// `[v1, v2, ...]` without materializing a list first.
fn cmd_print(interp: &Interpreter, env: &EnvRef, args: &[Expr]) -> EvalResult {
    let mut line = String::new();
    for (i, arg) in args.iter().enumerate() {
        let value = interp.eval(arg, env)?;
        if let Value::Range(range) = value {
            if range.is_unbounded() {
                return Err(unbounded_enumeration());
            }
            line.push('[');
            let mut first = true;
            while let Some(item) = range.next()? {
                if !first {
                    line.push_str(", ");
                }
                first = false;
                line.push_str(&item.to_string());
            }
            line.push(']');
        } else {
            if i > 0 {
                line.push(' ');
            }
            line.push_str(&value.to_string());
        }
    }
    interp.printer().println(&line);
    Ok(Value::Nil)
}
