//! Scanner for nc source text.
//!
//! Hand-rolled byte scanner; newlines are significant and come through as
//! [`TokenKind::Eol`]. The one lexical quirk worth knowing: `#` followed
//! by a space starts a comment running to end of line, while a bare `#`
//! is the length operator. `1..5` lexes as `Int(1) DotDot Int(5)`; the
//! fraction dot of a float is never followed by another dot.

mod error;

pub use error::LexError;

use nc_ir::{SharedInterner, Span, Token, TokenKind};
use tracing::debug;

/// Tokenize `source`, appending a final [`TokenKind::Eof`].
pub fn lex(source: &str, interner: &SharedInterner) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer {
        src: source,
        bytes: source.as_bytes(),
        pos: 0,
        interner: interner.clone(),
        tokens: Vec::new(),
    };
    lexer.run()?;
    debug!(tokens = lexer.tokens.len(), "lexed source");
    Ok(lexer.tokens)
}

struct Lexer<'src> {
    src: &'src str,
    bytes: &'src [u8],
    pos: usize,
    interner: SharedInterner,
    tokens: Vec<Token>,
}

impl Lexer<'_> {
    fn run(&mut self) -> Result<(), LexError> {
        while let Some(byte) = self.peek() {
            let start = self.pos;
            match byte {
                b' ' | b'\t' | b'\r' => {
                    self.pos += 1;
                }
                b'\n' => {
                    self.pos += 1;
                    self.push(TokenKind::Eol, start);
                }
                b'#' => {
                    if self.peek_at(1) == Some(b' ') {
                        // Comment: skip to end of line, leave the newline
                        // to produce its own Eol token.
                        while let Some(b) = self.peek() {
                            if b == b'\n' {
                                break;
                            }
                            self.pos += 1;
                        }
                    } else {
                        self.pos += 1;
                        self.push(TokenKind::Hash, start);
                    }
                }
                b'<' => self.one_or_two(TokenKind::Lt, b'=', TokenKind::LtEq),
                b'>' => self.one_or_two(TokenKind::Gt, b'=', TokenKind::GtEq),
                b'=' => self.one_or_two(TokenKind::Eq, b'=', TokenKind::EqEq),
                b'!' => self.one_or_two(TokenKind::Bang, b'=', TokenKind::NotEq),
                b'+' => self.single(TokenKind::Plus),
                b'-' => self.single(TokenKind::Minus),
                b'*' => self.single(TokenKind::Star),
                b'/' => self.single(TokenKind::Slash),
                b'^' => self.single(TokenKind::Caret),
                b'%' => self.single(TokenKind::Percent),
                b'&' => self.single(TokenKind::And),
                b'|' => self.single(TokenKind::Or),
                b',' => self.single(TokenKind::Comma),
                b':' => self.single(TokenKind::Colon),
                b';' => self.single(TokenKind::Semicolon),
                b'(' => self.single(TokenKind::LParen),
                b')' => self.single(TokenKind::RParen),
                b'[' => self.single(TokenKind::LBracket),
                b']' => self.single(TokenKind::RBracket),
                b'{' => self.single(TokenKind::LBrace),
                b'}' => self.single(TokenKind::RBrace),
                b'.' => {
                    if self.peek_at(1) == Some(b'.') {
                        self.pos += 2;
                        self.push(TokenKind::DotDot, start);
                    } else if self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) {
                        self.number()?;
                    } else {
                        return Err(self.unexpected(start));
                    }
                }
                b'"' => self.string()?,
                b if b.is_ascii_digit() => self.number()?,
                b if b.is_ascii_alphabetic() || b == b'_' => self.ident_or_keyword(),
                _ => return Err(self.unexpected(start)),
            }
        }

        let end = self.pos;
        self.push(TokenKind::Eof, end);
        Ok(())
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        let span = Span::new(to_u32(start), to_u32(self.pos));
        self.tokens.push(Token::new(kind, span));
    }

    fn single(&mut self, kind: TokenKind) {
        let start = self.pos;
        self.pos += 1;
        self.push(kind, start);
    }

    fn one_or_two(&mut self, single: TokenKind, second: u8, double: TokenKind) {
        let start = self.pos;
        if self.peek_at(1) == Some(second) {
            self.pos += 2;
            self.push(double, start);
        } else {
            self.pos += 1;
            self.push(single, start);
        }
    }

    fn unexpected(&self, start: usize) -> LexError {
        let ch = self.src[start..].chars().next().unwrap_or('\0');
        let end = start + ch.len_utf8();
        LexError::UnexpectedChar {
            ch,
            span: Span::new(to_u32(start), to_u32(end)),
        }
    }

    /// Digits, optional fraction, optional exponent.
    ///
    /// The fraction dot is only consumed when not followed by a second
    /// dot, so range syntax survives: `1..5` is not `1.` then `.5`.
    fn number(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        let mut is_float = false;

        self.eat_digits();

        if self.peek() == Some(b'.') && self.peek_at(1) != Some(b'.') {
            is_float = true;
            self.pos += 1;
            self.eat_digits();
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            let exp_len = match self.peek_at(1) {
                Some(b) if b.is_ascii_digit() => 1,
                Some(b'-') if self.peek_at(2).is_some_and(|b| b.is_ascii_digit()) => 2,
                _ => 0,
            };
            if exp_len > 0 {
                is_float = true;
                self.pos += exp_len;
                self.eat_digits();
            }
        }

        let text = &self.src[start..self.pos];
        let span = Span::new(to_u32(start), to_u32(self.pos));

        let kind = if is_float {
            TokenKind::Float(parse_float(text, span)?)
        } else {
            match text.parse::<i64>() {
                Ok(value) => TokenKind::Int(value),
                // Out of i64 range: fall back to float.
                Err(_) => TokenKind::Float(parse_float(text, span)?),
            }
        };
        self.push(kind, start);
        Ok(())
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    /// Double-quoted, no escape sequences.
    fn string(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        self.pos += 1;
        let content_start = self.pos;
        loop {
            match self.peek() {
                Some(b'"') => break,
                Some(_) => self.pos += 1,
                None => {
                    return Err(LexError::UnterminatedString {
                        span: Span::new(to_u32(start), to_u32(self.pos)),
                    });
                }
            }
        }
        let name = self.interner.intern(&self.src[content_start..self.pos]);
        self.pos += 1;
        self.push(TokenKind::Str(name), start);
        Ok(())
    }

    fn ident_or_keyword(&mut self) {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.pos += 1;
        }
        let text = &self.src[start..self.pos];
        let kind = match text {
            "if" => TokenKind::If,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "for" => TokenKind::For,
            "in" => TokenKind::In,
            "Inf" => TokenKind::Inf,
            "print" | "write" | "table" | "sum" | "prod" | "dump" => {
                TokenKind::Command(self.interner.intern(text))
            }
            _ => TokenKind::Ident(self.interner.intern(text)),
        };
        self.push(kind, start);
    }
}

fn parse_float(text: &str, span: Span) -> Result<f64, LexError> {
    text.parse::<f64>().map_err(|_| LexError::MalformedNumber {
        text: text.to_owned(),
        span,
    })
}

fn to_u32(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let interner = SharedInterner::default();
        lex(source, &interner)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn integers_and_floats() {
        assert_eq!(
            kinds("42 3.5 .5 1e3 2e-2 7."),
            vec![
                TokenKind::Int(42),
                TokenKind::Float(3.5),
                TokenKind::Float(0.5),
                TokenKind::Float(1000.0),
                TokenKind::Float(0.02),
                TokenKind::Float(7.0),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn range_dots_do_not_eat_into_numbers() {
        assert_eq!(
            kinds("1..5"),
            vec![
                TokenKind::Int(1),
                TokenKind::DotDot,
                TokenKind::Int(5),
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("1.5..2.5"),
            vec![
                TokenKind::Float(1.5),
                TokenKind::DotDot,
                TokenKind::Float(2.5),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn hash_space_is_comment_bare_hash_is_operator() {
        let interner = SharedInterner::default();
        let xs = interner.intern("xs");
        let tokens: Vec<_> = lex("#xs # trailing comment\n1", &interner)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            tokens,
            vec![
                TokenKind::Hash,
                TokenKind::Ident(xs),
                TokenKind::Eol,
                TokenKind::Int(1),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comment_at_end_of_input_terminates() {
        assert_eq!(kinds("# no newline after this"), vec![TokenKind::Eof]);
    }

    #[test]
    fn two_char_operators() {
        assert_eq!(
            kinds("<= >= == != < > = !"),
            vec![
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eq,
                TokenKind::Bang,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords_and_commands() {
        let interner = SharedInterner::default();
        let i = interner.intern("i");
        let xs = interner.intern("xs");
        let tokens: Vec<_> = lex("for i in xs", &interner)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            tokens,
            vec![
                TokenKind::For,
                TokenKind::Ident(i),
                TokenKind::In,
                TokenKind::Ident(xs),
                TokenKind::Eof,
            ]
        );
        assert!(matches!(kinds("print x")[0], TokenKind::Command(_)));
        assert!(matches!(kinds("Inf")[0], TokenKind::Inf));
    }

    #[test]
    fn strings_have_no_escapes() {
        let interner = SharedInterner::default();
        let tokens = lex("\"a \\ b\"", &interner).unwrap();
        match tokens[0].kind {
            TokenKind::Str(s) => assert_eq!(interner.lookup(s), "a \\ b"),
            other => panic!("expected string, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_string_errors() {
        let interner = SharedInterner::default();
        let err = lex("\"abc", &interner).unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
    }

    #[test]
    fn unknown_character_errors_with_span() {
        let interner = SharedInterner::default();
        let err = lex("1 @ 2", &interner).unwrap_err();
        match err {
            LexError::UnexpectedChar { ch, span } => {
                assert_eq!(ch, '@');
                assert_eq!(span, Span::new(2, 3));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn newlines_are_tokens() {
        assert_eq!(
            kinds("1\n2"),
            vec![
                TokenKind::Int(1),
                TokenKind::Eol,
                TokenKind::Int(2),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn huge_integer_falls_back_to_float() {
        assert_eq!(kinds("99999999999999999999")[0], TokenKind::Float(1e20));
    }
}
