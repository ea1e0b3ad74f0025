//! Runtime error taxonomy.
//!
//! Every failure the evaluator can hit is a structured [`EvalErrorKind`];
//! call sites build errors through the factory functions at the bottom of
//! this module rather than spelling out the struct.

use std::fmt;

use crate::value::Value;

/// Result alias used throughout the runtime.
pub type EvalResult<T = Value> = Result<T, EvalError>;

#[derive(Debug, Clone, PartialEq)]
pub enum EvalErrorKind {
    /// A value of the wrong type where a specific type was required.
    TypeMismatch { expected: String, got: String },
    /// Operand types a binary operator cannot combine.
    BinaryTypeMismatch {
        op: &'static str,
        left: String,
        right: String,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    /// A function definition whose parameter list is not all identifiers.
    InvalidParameter { name: String },
    UndefinedName { name: String },
    NotCallable { type_name: String },
    IndexOutOfRange { index: i64, len: usize },
    /// Elementwise operation over lists of different lengths.
    LengthMismatch { left: usize, right: usize },
    /// `next()` on a range that already terminated.
    ExhaustedRange,
    /// Materializing or streaming an infinite range.
    UnboundedEnumeration,
    /// `#` on an infinite range.
    UnboundedLength,
    /// `#` on a value type with no defined length.
    NoLength { type_name: String },
    DivisionByZero,
    /// Count-bounded range with fewer than two elements requested.
    InvalidCount { count: i64 },
    /// Step-bounded range with a zero step.
    InvalidStep,
    UnknownCommand { name: String },
    /// Assignment into a read-only scope.
    ReadOnlyBinding { name: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalErrorKind::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            EvalErrorKind::BinaryTypeMismatch { op, left, right } => {
                write!(f, "operator '{op}' cannot combine {left} and {right}")
            }
            EvalErrorKind::ArityMismatch {
                name,
                expected,
                got,
            } => {
                write!(f, "'{name}' takes {expected} argument(s), got {got}")
            }
            EvalErrorKind::InvalidParameter { name } => {
                write!(f, "parameters of '{name}' must be identifiers")
            }
            EvalErrorKind::UndefinedName { name } => write!(f, "'{name}' is not defined"),
            EvalErrorKind::NotCallable { type_name } => {
                write!(f, "value of type {type_name} is not callable")
            }
            EvalErrorKind::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for list of length {len}")
            }
            EvalErrorKind::LengthMismatch { left, right } => {
                write!(f, "length mismatch: {left} vs {right}")
            }
            EvalErrorKind::ExhaustedRange => f.write_str("range is exhausted"),
            EvalErrorKind::UnboundedEnumeration => {
                f.write_str("cannot enumerate an unbounded range")
            }
            EvalErrorKind::UnboundedLength => {
                f.write_str("an unbounded range has no length")
            }
            EvalErrorKind::NoLength { type_name } => {
                write!(f, "value of type {type_name} has no length")
            }
            EvalErrorKind::DivisionByZero => f.write_str("division by zero"),
            EvalErrorKind::InvalidCount { count } => {
                write!(f, "range count must be at least 2, got {count}")
            }
            EvalErrorKind::InvalidStep => f.write_str("range step must be nonzero"),
            EvalErrorKind::UnknownCommand { name } => write!(f, "unknown command '{name}'"),
            EvalErrorKind::ReadOnlyBinding { name } => {
                write!(f, "cannot bind '{name}' in a read-only scope")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: String,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError { kind, message }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::new(EvalErrorKind::TypeMismatch {
        expected: expected.to_owned(),
        got: got.to_owned(),
    })
}

pub fn binary_type_mismatch(op: &'static str, left: &str, right: &str) -> EvalError {
    EvalError::new(EvalErrorKind::BinaryTypeMismatch {
        op,
        left: left.to_owned(),
        right: right.to_owned(),
    })
}

pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::new(EvalErrorKind::ArityMismatch {
        name: name.to_owned(),
        expected,
        got,
    })
}

pub fn invalid_parameter(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidParameter {
        name: name.to_owned(),
    })
}

pub fn undefined_name(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::UndefinedName {
        name: name.to_owned(),
    })
}

pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::NotCallable {
        type_name: type_name.to_owned(),
    })
}

pub fn index_out_of_range(index: i64, len: usize) -> EvalError {
    EvalError::new(EvalErrorKind::IndexOutOfRange { index, len })
}

pub fn length_mismatch(left: usize, right: usize) -> EvalError {
    EvalError::new(EvalErrorKind::LengthMismatch { left, right })
}

pub fn exhausted_range() -> EvalError {
    EvalError::new(EvalErrorKind::ExhaustedRange)
}

pub fn unbounded_enumeration() -> EvalError {
    EvalError::new(EvalErrorKind::UnboundedEnumeration)
}

pub fn unbounded_length() -> EvalError {
    EvalError::new(EvalErrorKind::UnboundedLength)
}

pub fn no_length(type_name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::NoLength {
        type_name: type_name.to_owned(),
    })
}

pub fn division_by_zero() -> EvalError {
    EvalError::new(EvalErrorKind::DivisionByZero)
}

pub fn invalid_count(count: i64) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidCount { count })
}

pub fn invalid_step() -> EvalError {
    EvalError::new(EvalErrorKind::InvalidStep)
}

pub fn unknown_command(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::UnknownCommand {
        name: name.to_owned(),
    })
}

pub fn read_only_binding(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::ReadOnlyBinding {
        name: name.to_owned(),
    })
}
