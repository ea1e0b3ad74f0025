//! The `nc` command-line interpreter.

use std::process::ExitCode;

mod commands;

use commands::CliError;

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        None | Some("help" | "--help" | "-h") => {
            print_usage();
            ExitCode::SUCCESS
        }
        Some("version" | "--version" | "-V") => {
            println!("nc {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Some("run") => with_file(&args, commands::run_file),
        Some("lex") => with_file(&args, commands::lex_file),
        Some("parse") => with_file(&args, commands::parse_file),
        // A bare path argument runs it.
        Some(path) => report(commands::run_file(path)),
    }
}

fn with_file(args: &[String], command: fn(&str) -> Result<(), CliError>) -> ExitCode {
    match args.get(2) {
        Some(path) => report(command(path)),
        None => {
            eprintln!("error: missing <file> argument");
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn report(result: Result<(), CliError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("nc - numeric calculator language");
    println!();
    println!("USAGE:");
    println!("    nc <file>            Run an nc script");
    println!("    nc run <file>        Run an nc script");
    println!("    nc lex <file>        Print the token stream");
    println!("    nc parse <file>      Print the parsed AST");
    println!("    nc help              Show this help");
    println!("    nc version           Show the version");
    println!();
    println!("Set RUST_LOG=debug for pipeline tracing.");
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
