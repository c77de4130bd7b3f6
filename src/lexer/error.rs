use super::token::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexicalErrorKind {
    #[error("Unrecognized character {0:?}")]
    Unrecognized(char),
    #[error("Unterminated comment")]
    UnclosedComment,
    #[error("Integer literal {0} is out of range")]
    InvalidNumber(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind} at offset {}", .span.start)]
pub struct LexicalError {
    #[source]
    pub kind: LexicalErrorKind,
    pub span: Span,
}

impl LexicalError {
    pub fn code(&self) -> &'static str {
        match self.kind {
            LexicalErrorKind::Unrecognized(_) => "LX001",
            LexicalErrorKind::UnclosedComment => "LX002",
            LexicalErrorKind::InvalidNumber(_) => "LX003",
        }
    }
}
