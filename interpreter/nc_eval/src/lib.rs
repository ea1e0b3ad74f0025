//! The nc evaluation runtime.
//!
//! A tree-walking interpreter over the [`nc_ir`] AST: values with
//! reference semantics for lists/ranges/callables, chained environments
//! with a read-only builtin root, lazy stateful ranges, and elementwise
//! broadcasting of scalar operators.
//!
//! The evaluated language is single-threaded; an [`Interpreter`] and the
//! values it produces stay on one thread.

mod broadcast;
mod builtins;
mod commands;
mod env;
mod errors;
mod interpreter;
mod operators;
mod print_handler;
mod range;
mod shared;
mod value;

#[cfg(test)]
mod tests;

pub use broadcast::{broadcast1, broadcast2};
pub use builtins::builtin_root;
pub use commands::{CommandFn, CommandRegistry};
pub use env::{BindError, Env, EnvRef};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::Interpreter;
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{BufferPrinter, PrintHandler};
pub use range::RangeValue;
pub use shared::Shared;
pub use value::{Callable, NativeFn, ScriptFn, Value};
