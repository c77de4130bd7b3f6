use super::expression::Expression;
use crate::lexer::Span;
use crate::string::Ident;
use crate::value::VariableType;

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub kind: VariableType,
    pub span: Span,
}

/// `a, b, c : INTEGER`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub names: Vec<Ident>,
    pub type_spec: TypeSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Ident,
    pub value: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundStatement {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Compound(CompoundStatement),
    Assignment(Assignment),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub declarations: Vec<VariableDecl>,
    pub body: CompoundStatement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: Ident,
    pub block: Block,
}

impl Program {
    pub fn declarations(&self) -> impl Iterator<Item = (&Ident, &TypeSpec)> {
        self.block
            .declarations
            .iter()
            .flat_map(|decl| decl.names.iter().map(move |name| (name, &decl.type_spec)))
    }
}
