use std::fmt;

use crate::{Name, Span};

/// A lexed token: kind (with payload for literals and names) plus span.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Token inventory.
///
/// Newlines are significant (statement separators), so `Eol` is a real
/// token. Command words (`print`, `write`, ...) lex as `Command` rather
/// than `Ident` because they head a distinct statement form.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum TokenKind {
    // Literals and names
    Int(i64),
    Float(f64),
    Str(Name),
    Ident(Name),
    Command(Name),

    // Keywords
    If,
    And,
    Or,
    Not,
    For,
    In,
    Inf,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Percent,
    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    NotEq,
    Eq,
    Hash,
    Bang,
    DotDot,

    // Delimiters
    Comma,
    Colon,
    Semicolon,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    // Structure
    Eol,
    Eof,
}

impl TokenKind {
    /// Human-readable description for diagnostics.
    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::Int(_) => "integer literal",
            TokenKind::Float(_) => "float literal",
            TokenKind::Str(_) => "string literal",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Command(_) => "command",
            TokenKind::If => "'if'",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Not => "'not'",
            TokenKind::For => "'for'",
            TokenKind::In => "'in'",
            TokenKind::Inf => "'Inf'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Caret => "'^'",
            TokenKind::Percent => "'%'",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::LtEq => "'<='",
            TokenKind::GtEq => "'>='",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Eq => "'='",
            TokenKind::Hash => "'#'",
            TokenKind::Bang => "'!'",
            TokenKind::DotDot => "'..'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Eol => "end of line",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
