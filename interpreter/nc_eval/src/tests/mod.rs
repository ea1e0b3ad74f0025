//! End-to-end evaluator tests: source text through lexer and parser into
//! the interpreter.

mod interpreter_tests;

use nc_ir::SharedInterner;

use crate::{EvalResult, Interpreter, PrintHandler};

/// Run a program against a fresh interpreter with buffered output.
/// Returns the program's value and whatever `print` wrote.
pub(crate) fn eval_source(source: &str) -> (EvalResult, String) {
    let interner = SharedInterner::default();
    let interpreter = Interpreter::with_printer(interner.clone(), PrintHandler::buffer());
    let env = interpreter.global_env();
    let tokens = nc_lexer::lex(source, &interner).expect("lex failure");
    let program = nc_parse::parse(&tokens).expect("parse failure");
    let result = interpreter.eval(&program, &env);
    let output = interpreter.printer().output();
    (result, output)
}

/// Shorthand for programs expected to succeed.
pub(crate) fn eval_ok(source: &str) -> crate::Value {
    let (result, _) = eval_source(source);
    result.expect("evaluation failure")
}
