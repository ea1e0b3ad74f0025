use nc_ir::Span;
use thiserror::Error;

/// Scanner failure. Every variant carries the offending span.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {span}")]
    UnexpectedChar { ch: char, span: Span },

    #[error("unterminated string literal at {span}")]
    UnterminatedString { span: Span },

    #[error("malformed number '{text}' at {span}")]
    MalformedNumber { text: String, span: Span },
}

impl LexError {
    pub const fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. }
            | LexError::UnterminatedString { span }
            | LexError::MalformedNumber { span, .. } => *span,
        }
    }
}
