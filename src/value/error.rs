use super::{Number, VariableType};
use crate::lexer::Span;
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    #[error("Undefined variable: {0}")]
    UndefinedVariable(CompactString),
    #[error("Variable {0} is read before it is assigned")]
    UninitializedVariable(CompactString),
    #[error("Can't assign {value} to {name} of type {expected}")]
    TypeMismatch {
        name: CompactString,
        expected: VariableType,
        value: Number,
    },
    #[error("Integer division by zero")]
    DivisionByZero,
    #[error("Integer overflow")]
    Overflow,
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind} at offset {}", .span.start)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub span: Span,
}

impl RuntimeError {
    pub fn code(&self) -> &'static str {
        match self.kind {
            RuntimeErrorKind::UndefinedVariable(_) => "RT001",
            RuntimeErrorKind::UninitializedVariable(_) => "RT002",
            RuntimeErrorKind::TypeMismatch { .. } => "RT003",
            RuntimeErrorKind::DivisionByZero => "RT004",
            RuntimeErrorKind::Overflow => "RT005",
        }
    }
}
