//! Shared IR for the nc interpreter.
//!
//! Everything the pipeline crates agree on lives here: source spans,
//! interned names, the token inventory, operator enums, and the AST.
//! `nc_lexer` produces tokens, `nc_parse` turns them into [`Expr`] trees,
//! and `nc_eval` walks those trees.

mod ast;
mod interner;
mod name;
mod ops;
mod span;
mod token;

pub use ast::{AssignTarget, Expr, Literal};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use ops::{BinaryOp, UnaryOp};
pub use span::Span;
pub use token::{Token, TokenKind};
