//! CLI subcommands: run, lex, parse.

use std::fs;

use nc_eval::Interpreter;
use nc_ir::SharedInterner;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Lex(#[from] nc_lexer::LexError),
    #[error("{0}")]
    Parse(#[from] nc_parse::ParseError),
    #[error("{0}")]
    Eval(#[from] nc_eval::EvalError),
}

/// Lex, parse, and evaluate a script. Script output goes to stdout via
/// the `print` command; the program's final value is discarded.
pub fn run_file(path: &str) -> Result<(), CliError> {
    let source = fs::read_to_string(path)?;
    debug!(path, bytes = source.len(), "running script");

    let interner = SharedInterner::default();
    let tokens = nc_lexer::lex(&source, &interner)?;
    let program = nc_parse::parse(&tokens)?;

    let interpreter = Interpreter::new(interner);
    let env = interpreter.global_env();
    interpreter.eval(&program, &env)?;
    Ok(())
}

/// Print the token stream, one token per line.
pub fn lex_file(path: &str) -> Result<(), CliError> {
    let source = fs::read_to_string(path)?;
    let interner = SharedInterner::default();
    let tokens = nc_lexer::lex(&source, &interner)?;
    for token in &tokens {
        println!("{:>5}  {:?}", token.span.to_string(), token.kind);
    }
    Ok(())
}

/// Print the parsed AST.
pub fn parse_file(path: &str) -> Result<(), CliError> {
    let source = fs::read_to_string(path)?;
    let interner = SharedInterner::default();
    let tokens = nc_lexer::lex(&source, &interner)?;
    let program = nc_parse::parse(&tokens)?;
    println!("{program:#?}");
    Ok(())
}
