use crate::{lexer::Span, string::Ident, value::VariableType};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SemanticErrorKind {
    #[error("Undefined variable: {0}")]
    UndefinedVariable(Ident),
    #[error("Duplicate identifier: {duplicate}")]
    DuplicateIdentifier { original: Ident, duplicate: Ident },
    #[error("Can't assign a {actual} value to {target} of type {expected}")]
    TypeMismatch {
        target: Ident,
        expected: VariableType,
        actual: VariableType,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind} at offset {}", .span.start)]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    pub span: Span,
}

impl SemanticError {
    pub fn code(&self) -> &'static str {
        match self.kind {
            SemanticErrorKind::UndefinedVariable(_) => "SM001",
            SemanticErrorKind::DuplicateIdentifier { .. } => "SM002",
            SemanticErrorKind::TypeMismatch { .. } => "SM003",
        }
    }
}
