//! The calculator grammar, parsed and evaluated in a single pass.
//!
//! ```text
//!   expr : term ((PLUS | MINUS) term)*
//!   term : factor ((MUL | INTEGER_DIV | FLOAT_DIV) factor)*
//! factor : (PLUS | MINUS)* (INTEGER_CONST | REAL_CONST | LPAREN expr RPAREN)
//! ```
//!
//! No syntax tree is built: every rule returns the value of the text it consumed.

use crate::{
    error::Error,
    lexer::{TokenKind, TokenValue},
    parser::{ParserError, ParserErrorKind, TokenCursor, MAX_NESTING_DEPTH},
    value::{
        error::{RuntimeError, RuntimeErrorKind},
        Number,
    },
};
use log::debug;

pub struct Calculator<'src> {
    cursor: TokenCursor<'src>,
    depth: usize,
}

impl<'src> Calculator<'src> {
    /// Primes the first token, failing only if it is lexically invalid.
    pub fn new(source: &'src str) -> Result<Self, Error> {
        Ok(Self {
            cursor: TokenCursor::new(source)?,
            depth: 0,
        })
    }

    pub fn run(mut self) -> Result<Number, Error> {
        let value = self.expr()?;
        self.cursor.expect_end()?;
        debug!("Evaluated expression to {value}");
        Ok(value)
    }

    fn expr(&mut self) -> Result<Number, Error> {
        let mut lhs = self.term()?;
        loop {
            let kind = self.cursor.current().kind;
            if !matches!(kind, TokenKind::Plus | TokenKind::Minus) {
                break;
            }
            let span = self.cursor.advance()?.span;
            let rhs = self.term()?;
            let result = match kind {
                TokenKind::Plus => lhs.add(&rhs),
                _ => lhs.subtract(&rhs),
            };
            lhs = result.map_err(|kind| RuntimeError { kind, span })?;
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Number, Error> {
        let mut lhs = self.factor()?;
        loop {
            let kind = self.cursor.current().kind;
            if !matches!(
                kind,
                TokenKind::Star | TokenKind::IntegerDiv | TokenKind::Slash
            ) {
                break;
            }
            let span = self.cursor.advance()?.span;
            let rhs = self.factor()?;
            let result = match kind {
                TokenKind::Star => lhs.multiply(&rhs),
                TokenKind::IntegerDiv => lhs.integer_divide(&rhs),
                _ => Ok(lhs.float_divide(&rhs)),
            };
            lhs = result.map_err(|kind| RuntimeError { kind, span })?;
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<Number, Error> {
        let mut minus_signs = Vec::new();
        loop {
            match self.cursor.current().kind {
                TokenKind::Plus => {}
                TokenKind::Minus => minus_signs.push(self.cursor.current().span),
                _ => break,
            }
            self.cursor.advance()?;
        }

        let mut value = self.primary()?;
        // The sign closest to the operand applies first.
        for span in minus_signs.into_iter().rev() {
            value = value
                .numeric_negate()
                .map_err(|kind| RuntimeError { kind, span })?;
        }
        Ok(value)
    }

    fn primary(&mut self) -> Result<Number, Error> {
        let token = self.cursor.current().clone();
        match (token.kind, token.value) {
            (TokenKind::IntegerLiteral, TokenValue::Integer(v)) => {
                self.cursor.advance()?;
                Ok(Number::Integer(v))
            }
            (TokenKind::RealLiteral, TokenValue::Real(v)) => {
                self.cursor.advance()?;
                Ok(Number::Real(v))
            }
            (TokenKind::LeftParenthesis, _) => {
                if self.depth >= MAX_NESTING_DEPTH {
                    let token = self.cursor.current().clone();
                    return Err(ParserError::too_deeply_nested(&token, MAX_NESTING_DEPTH).into());
                }
                self.cursor.advance()?;
                self.depth += 1;
                let value = self.expr()?;
                self.depth -= 1;
                self.cursor.expect(TokenKind::RightParenthesis)?;
                Ok(value)
            }
            // There are no declarations in this grammar so every name is undefined.
            (TokenKind::Ident, TokenValue::Ident(name)) => Err(RuntimeError {
                kind: RuntimeErrorKind::UndefinedVariable(name),
                span: token.span,
            }
            .into()),
            _ => {
                let token = self.cursor.current().clone();
                Err(ParserError {
                    span: token.span,
                    kind: ParserErrorKind::NonExpression(token),
                }
                .into())
            }
        }
    }
}

/// Evaluates `source` with the calculator grammar.
pub fn evaluate(source: &str) -> Result<Number, Error> {
    Calculator::new(source)?.run()
}
