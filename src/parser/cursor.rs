use super::{ParserError, ParserErrorKind};
use crate::lexer::{Lexer, Token, TokenKind};

/// A single token of lookahead over a [`Lexer`].
///
/// The cursor is primed with the first token on construction and always holds the next
/// unconsumed token.
#[derive(Debug)]
pub struct TokenCursor<'src> {
    lexer: Lexer<'src>,
    current: Token,
}

impl<'src> TokenCursor<'src> {
    pub fn new(source: &'src str) -> Result<Self, ParserError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consumes the current token and pulls the next one from the lexer.
    pub fn advance(&mut self) -> Result<Token, ParserError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub fn expect(&mut self, expected: TokenKind) -> Result<Token, ParserError> {
        if self.current.kind != expected {
            Err(ParserError::unexpected(&self.current, expected))
        } else {
            self.advance()
        }
    }

    pub fn eat_if(&mut self, kind: TokenKind) -> Result<Option<Token>, ParserError> {
        if self.current.kind != kind {
            Ok(None)
        } else {
            self.advance().map(Some)
        }
    }

    pub fn expect_end(&self) -> Result<(), ParserError> {
        if self.current.kind == TokenKind::Eof {
            Ok(())
        } else {
            Err(ParserError {
                span: self.current.span,
                kind: ParserErrorKind::TrailingInput(self.current.clone()),
            })
        }
    }
}
