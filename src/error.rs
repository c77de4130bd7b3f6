use crate::{
    analyzer::SemanticError,
    lexer::{LexicalError, Span},
    parser::ParserError,
    value::error::RuntimeError,
};
use thiserror::Error;

/// Any error that aborts a run, from lexing through execution.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl From<LexicalError> for Error {
    fn from(value: LexicalError) -> Self {
        Self::Parser(value.into())
    }
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::Parser(e) => e.code(),
            Error::Semantic(e) => e.code(),
            Error::Runtime(e) => e.code(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Error::Parser(e) => e.span,
            Error::Semantic(e) => e.span,
            Error::Runtime(e) => e.span,
        }
    }

    /// Whether the error was detected before any code ran.
    pub fn is_static(&self) -> bool {
        !matches!(self, Error::Runtime(_))
    }
}
