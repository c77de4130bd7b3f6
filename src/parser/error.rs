use crate::lexer::{LexicalError, Span, Token, TokenKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParserErrorKind {
    #[error("Expected {expected} but got {}.", .actual.kind)]
    UnexpectedToken { actual: Token, expected: TokenKind },
    #[error("Expected an expression but got {}.", .0.kind)]
    NonExpression(Token),
    #[error("Expected a type (INTEGER or REAL) but got {}.", .0.kind)]
    NonTypeSpec(Token),
    #[error("Expected end of input but got {}.", .0.kind)]
    TrailingInput(Token),
    #[error("Nesting deeper than {limit} levels at {}.", .opener.kind)]
    TooDeeplyNested { opener: Token, limit: usize },
    #[error("{}", .0.kind)]
    LexicalError(LexicalError),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind} at offset {}", .span.start)]
pub struct ParserError {
    #[source]
    pub kind: ParserErrorKind,
    pub span: Span,
}

impl ParserError {
    pub fn unexpected(actual: &Token, expected: TokenKind) -> Self {
        Self {
            span: actual.span,
            kind: ParserErrorKind::UnexpectedToken {
                actual: actual.clone(),
                expected,
            },
        }
    }

    pub fn too_deeply_nested(opener: &Token, limit: usize) -> Self {
        Self {
            span: opener.span,
            kind: ParserErrorKind::TooDeeplyNested {
                opener: opener.clone(),
                limit,
            },
        }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            ParserErrorKind::UnexpectedToken { .. } => "PS001",
            ParserErrorKind::NonExpression(_) => "PS002",
            ParserErrorKind::NonTypeSpec(_) => "PS003",
            ParserErrorKind::TrailingInput(_) => "PS004",
            ParserErrorKind::TooDeeplyNested { .. } => "PS005",
            ParserErrorKind::LexicalError(ref e) => e.code(),
        }
    }
}

impl From<LexicalError> for ParserError {
    fn from(value: LexicalError) -> Self {
        Self {
            span: value.span,
            kind: ParserErrorKind::LexicalError(value),
        }
    }
}
