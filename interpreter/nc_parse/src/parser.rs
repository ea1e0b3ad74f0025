use std::rc::Rc;

use nc_ir::{AssignTarget, BinaryOp, Expr, Literal, Name, Span, Token, TokenKind, UnaryOp};
use tracing::debug;

use crate::ParseError;

/// Parse a full token stream into an [`Expr::Program`].
pub fn parse(tokens: &[Token]) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(tokens);
    let program = parser.program()?;
    debug!("parsed program");
    Ok(program)
}

/// Cursor over the token stream.
pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn peek(&self) -> Token {
        self.tokens
            .get(self.pos)
            .copied()
            .unwrap_or(Token::new(TokenKind::Eof, Span::DUMMY))
    }

    fn kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn bump(&mut self) -> Token {
        let token = self.peek();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.kind() == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.kind() == kind {
            Ok(self.bump())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        ParseError::UnexpectedToken {
            expected: expected.to_owned(),
            found: token.kind.describe().to_owned(),
            span: token.span,
        }
    }

    fn at_statement_end(&self) -> bool {
        matches!(
            self.kind(),
            TokenKind::Eol | TokenKind::Semicolon | TokenKind::Eof | TokenKind::RBrace
        )
    }

    fn skip_separators(&mut self) {
        while matches!(self.kind(), TokenKind::Eol | TokenKind::Semicolon) {
            self.bump();
        }
    }

    /// program : { stmnt (EOL | ';') }
    pub fn program(&mut self) -> Result<Expr, ParseError> {
        let mut stmnts = Vec::new();
        loop {
            self.skip_separators();
            if self.kind() == TokenKind::Eof {
                break;
            }
            stmnts.push(self.stmnt()?);
            if !self.at_statement_end() {
                return Err(self.unexpected("end of statement"));
            }
        }
        Ok(Expr::Program(stmnts))
    }

    fn stmnt(&mut self) -> Result<Expr, ParseError> {
        match self.kind() {
            TokenKind::For => self.for_stmnt(),
            TokenKind::Command(name) => {
                self.bump();
                let mut args = Vec::new();
                while !self.at_statement_end() {
                    args.push(self.expr()?);
                }
                Ok(Expr::Command { name, args })
            }
            _ => {
                let value = self.expr()?;
                if self.eat(TokenKind::If) {
                    let condition = self.expr()?;
                    Ok(Expr::Case {
                        value: Box::new(value),
                        condition: Box::new(condition),
                    })
                } else {
                    Ok(value)
                }
            }
        }
    }

    /// stmnt : 'for' IDENT 'in' expr [EOL] stmnt
    fn for_stmnt(&mut self) -> Result<Expr, ParseError> {
        self.expect(TokenKind::For)?;
        let var = self.expect_ident()?;
        self.expect(TokenKind::In)?;
        let iterable = self.expr()?;
        self.eat(TokenKind::Eol);
        let body = self.stmnt()?;
        Ok(Expr::For {
            var,
            iterable: Box::new(iterable),
            body: Box::new(body),
        })
    }

    fn expect_ident(&mut self) -> Result<Name, ParseError> {
        match self.kind() {
            TokenKind::Ident(name) => {
                self.bump();
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    pub fn expr(&mut self) -> Result<Expr, ParseError> {
        self.disj()
    }

    fn disj(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.conj()?;
        while self.eat(TokenKind::Or) {
            let rhs = self.conj()?;
            lhs = binary(BinaryOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn conj(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.comp()?;
        while self.eat(TokenKind::And) {
            let rhs = self.comp()?;
            lhs = binary(BinaryOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn comp(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.range()?;
        loop {
            let op = match self.kind() {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::LtEq => BinaryOp::LtEq,
                TokenKind::GtEq => BinaryOp::GtEq,
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::NotEq,
                _ => break,
            };
            self.bump();
            let rhs = self.range()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// range : sum [ '..' sum [ '..' ['+'] sum ] ]
    fn range(&mut self) -> Result<Expr, ParseError> {
        let start = self.sum()?;
        if !self.eat(TokenKind::DotDot) {
            return Ok(start);
        }
        let stop = self.sum()?;
        let mut count = None;
        let mut step = None;
        if self.eat(TokenKind::DotDot) {
            if self.eat(TokenKind::Plus) {
                count = Some(Box::new(self.sum()?));
            } else {
                step = Some(Box::new(self.sum()?));
            }
        }
        Ok(Expr::Range {
            start: Box::new(start),
            stop: Box::new(stop),
            count,
            step,
        })
    }

    fn sum(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.bump();
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.factor()?;
        loop {
            let op = match self.kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.bump();
            let rhs = self.factor()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// factor : ('-'|'#'|'!'|'not') factor | atom ['^' factor]
    ///
    /// `^` is right-associative and binds tighter than the prefix
    /// operators, so `-x^2` is `-(x^2)`.
    fn factor(&mut self) -> Result<Expr, ParseError> {
        let op = match self.kind() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Bang | TokenKind::Not => Some(UnaryOp::Not),
            TokenKind::Hash => Some(UnaryOp::Len),
            _ => None,
        };
        if let Some(op) = op {
            self.bump();
            let operand = self.factor()?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }

        let base = self.atom()?;
        if self.eat(TokenKind::Caret) {
            let exponent = self.factor()?;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, ParseError> {
        match self.kind() {
            TokenKind::Int(value) => {
                self.bump();
                Ok(Expr::int(value))
            }
            TokenKind::Float(value) => {
                self.bump();
                Ok(Expr::float(value))
            }
            TokenKind::Str(name) => {
                self.bump();
                Ok(Expr::Literal(Literal::Str(name)))
            }
            TokenKind::Inf => {
                self.bump();
                Ok(Expr::Literal(Literal::Inf))
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LBracket => {
                self.bump();
                let items = self.items(TokenKind::RBracket)?;
                Ok(Expr::List(items))
            }
            TokenKind::LBrace => {
                self.bump();
                self.block()
            }
            TokenKind::Ident(name) => {
                self.bump();
                self.ident_tail(name)
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    /// What may follow an identifier: assignment, call, function
    /// definition, indexed read, or indexed assignment.
    fn ident_tail(&mut self, name: Name) -> Result<Expr, ParseError> {
        match self.kind() {
            TokenKind::Eq => {
                self.bump();
                let value = self.expr()?;
                Ok(Expr::Assign {
                    target: AssignTarget::Name(name),
                    value: Box::new(value),
                })
            }
            TokenKind::LParen => {
                self.bump();
                let args = self.items(TokenKind::RParen)?;
                if self.eat(TokenKind::Eq) {
                    let body = self.expr()?;
                    Ok(Expr::FuncDef {
                        name,
                        params: args,
                        body: Rc::new(body),
                    })
                } else {
                    Ok(Expr::Call { callee: name, args })
                }
            }
            TokenKind::LBracket => {
                self.bump();
                let index = self.expr()?;
                self.expect(TokenKind::RBracket)?;
                if self.eat(TokenKind::Eq) {
                    let value = self.expr()?;
                    Ok(Expr::Assign {
                        target: AssignTarget::Index {
                            name,
                            index: Box::new(index),
                        },
                        value: Box::new(value),
                    })
                } else {
                    Ok(Expr::Index {
                        name,
                        index: Box::new(index),
                    })
                }
            }
            _ => Ok(Expr::Ident(name)),
        }
    }

    /// items : [ expr { ',' expr } ] `close`
    fn items(&mut self, close: TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        if self.eat(close) {
            return Ok(items);
        }
        loop {
            items.push(self.expr()?);
            if !self.eat(TokenKind::Comma) {
                self.expect(close)?;
                return Ok(items);
            }
        }
    }

    /// Statements up to the closing brace. A block whose first statement
    /// is a case becomes a case chain.
    fn block(&mut self) -> Result<Expr, ParseError> {
        let mut stmnts = Vec::new();
        loop {
            self.skip_separators();
            if self.eat(TokenKind::RBrace) {
                break;
            }
            if self.kind() == TokenKind::Eof {
                return Err(self.unexpected("'}'"));
            }
            stmnts.push(self.stmnt()?);
            if !self.at_statement_end() {
                return Err(self.unexpected("end of statement"));
            }
        }
        if matches!(stmnts.first(), Some(Expr::Case { .. })) {
            Ok(Expr::CaseChain(stmnts))
        } else {
            Ok(Expr::Block(stmnts))
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}
