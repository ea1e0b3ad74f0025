//! The expression tree.
//!
//! Everything in nc is an expression; statements are just expressions
//! separated by newlines or semicolons, and a program's value is its last
//! statement's value.

use std::rc::Rc;

use crate::{BinaryOp, Name, UnaryOp};

/// Literal constants.
#[derive(Clone, PartialEq, Debug)]
pub enum Literal {
    Int(i64),
    Float(f64),
    /// Interned string contents (quotes stripped, no escapes).
    Str(Name),
    /// The `Inf` keyword.
    Inf,
}

/// The left side of an assignment.
#[derive(Clone, PartialEq, Debug)]
pub enum AssignTarget {
    /// `x = e`
    Name(Name),
    /// `xs[i] = e`
    Index { name: Name, index: Box<Expr> },
}

#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    Literal(Literal),
    Ident(Name),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Assign {
        target: AssignTarget,
        value: Box<Expr>,
    },
    /// Indexed read, `xs[i]`.
    Index {
        name: Name,
        index: Box<Expr>,
    },
    /// Top-level statement sequence.
    Program(Vec<Expr>),
    /// Braced statement sequence, `{ ... }`.
    Block(Vec<Expr>),
    /// List literal, `[a, b, c]`.
    List(Vec<Expr>),
    Call {
        callee: Name,
        args: Vec<Expr>,
    },
    /// `f(a, b) = body`. The body is shared with the closure bound at
    /// evaluation time, hence `Rc`.
    FuncDef {
        name: Name,
        params: Vec<Expr>,
        body: Rc<Expr>,
    },
    For {
        var: Name,
        iterable: Box<Expr>,
        body: Box<Expr>,
    },
    /// Range literal `start..stop`, optionally `..+count` or `..step`.
    Range {
        start: Box<Expr>,
        stop: Box<Expr>,
        count: Option<Box<Expr>>,
        step: Option<Box<Expr>>,
    },
    /// Command statement, e.g. `print x y`.
    Command {
        name: Name,
        args: Vec<Expr>,
    },
    /// Guarded expression, `value if condition`.
    Case {
        value: Box<Expr>,
        condition: Box<Expr>,
    },
    /// A block whose statements are all cases; yields the first non-nil.
    CaseChain(Vec<Expr>),
}

impl Expr {
    pub fn int(value: i64) -> Expr {
        Expr::Literal(Literal::Int(value))
    }

    pub fn float(value: f64) -> Expr {
        Expr::Literal(Literal::Float(value))
    }
}
