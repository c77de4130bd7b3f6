mod error;
pub mod formatter;

use crate::{
    parser::{
        expression::{
            Expression, ExpressionAtomKind, ExpressionNode, InfixOperator,
        },
        statement::{Assignment, CompoundStatement, Program, Statement},
    },
    string::{Ident, IdentName},
    value::VariableType,
};
pub use error::{SemanticError, SemanticErrorKind};
use log::debug;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    BuiltinType(VariableType),
    Variable { name: Ident, kind: VariableType },
}

/// Every name visible in a program: the built-in types followed by the declared variables.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: HashMap<IdentName, Symbol>,
    order: Vec<IdentName>,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut table = Self {
            symbols: HashMap::new(),
            order: Vec::new(),
        };
        table.define("INTEGER".into(), Symbol::BuiltinType(VariableType::Integer));
        table.define("REAL".into(), Symbol::BuiltinType(VariableType::Real));
        table
    }

    fn define(&mut self, name: IdentName, symbol: Symbol) {
        if self.symbols.insert(name.clone(), symbol).is_none() {
            self.order.push(name);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn lookup_variable(&self, name: &str) -> Option<VariableType> {
        match self.lookup(name)? {
            Symbol::Variable { kind, .. } => Some(*kind),
            Symbol::BuiltinType(_) => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IdentName, &Symbol)> {
        self.order.iter().map(|name| (name, &self.symbols[name]))
    }

    pub fn variables(&self) -> impl Iterator<Item = (&IdentName, VariableType)> {
        self.iter().filter_map(|(name, symbol)| match symbol {
            Symbol::Variable { kind, .. } => Some((name, *kind)),
            Symbol::BuiltinType(_) => None,
        })
    }
}

/// Static checks run on a parsed program before it is executed.
pub struct Analyzer {
    symbols: SymbolTable,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
        }
    }

    pub fn check(mut self, program: &Program) -> Result<SymbolTable, SemanticError> {
        for (name, type_spec) in program.declarations() {
            self.declare(name, type_spec.kind)?;
        }
        self.check_compound(&program.block.body)?;
        debug!(
            "Program {} passed semantic analysis with {} variables",
            program.name,
            self.symbols.variables().count()
        );
        Ok(self.symbols)
    }

    fn declare(&mut self, name: &Ident, kind: VariableType) -> Result<(), SemanticError> {
        if let Some(Symbol::Variable { name: original, .. }) = self.symbols.lookup(&name.name) {
            return Err(SemanticError {
                kind: SemanticErrorKind::DuplicateIdentifier {
                    original: original.clone(),
                    duplicate: name.clone(),
                },
                span: name.span,
            });
        }
        self.symbols.define(
            name.name.clone(),
            Symbol::Variable {
                name: name.clone(),
                kind,
            },
        );
        Ok(())
    }

    fn resolve(&self, name: &Ident) -> Result<VariableType, SemanticError> {
        self.symbols
            .lookup_variable(&name.name)
            .ok_or_else(|| SemanticError {
                kind: SemanticErrorKind::UndefinedVariable(name.clone()),
                span: name.span,
            })
    }
}

// Statements
impl Analyzer {
    fn check_compound(&self, compound: &CompoundStatement) -> Result<(), SemanticError> {
        for statement in compound.statements.iter() {
            match statement {
                Statement::Compound(inner) => self.check_compound(inner)?,
                Statement::Assignment(assignment) => self.check_assignment(assignment)?,
                Statement::Empty => {}
            }
        }
        Ok(())
    }

    fn check_assignment(&self, assignment: &Assignment) -> Result<(), SemanticError> {
        let expected = self.resolve(&assignment.target)?;
        let actual = self.infer(&assignment.value)?;
        if !expected.accepts(actual) {
            return Err(SemanticError {
                kind: SemanticErrorKind::TypeMismatch {
                    target: assignment.target.clone(),
                    expected,
                    actual,
                },
                span: assignment.span,
            });
        }
        Ok(())
    }
}

// Expressions
impl Analyzer {
    /// Infers the static type of an expression.
    fn infer(&self, expression: &Expression) -> Result<VariableType, SemanticError> {
        expression.fold(|node, types| match node {
            ExpressionNode::Atom(atom) => match atom.kind {
                ExpressionAtomKind::Integer(_) => Ok(VariableType::Integer),
                ExpressionAtomKind::Real(_) => Ok(VariableType::Real),
                ExpressionAtomKind::Identifier(ref name) => self.resolve(name),
            },
            ExpressionNode::Prefix { rhs, .. } => Ok(types.take(*rhs)),
            ExpressionNode::Group { inner, .. } => Ok(types.take(*inner)),
            ExpressionNode::Infix {
                operator, lhs, rhs, ..
            } => {
                let lhs = types.take(*lhs);
                let rhs = types.take(*rhs);
                Ok(match operator {
                    InfixOperator::Add | InfixOperator::Subtract | InfixOperator::Multiply => {
                        lhs.promote(rhs)
                    }
                    InfixOperator::FloatDivide => VariableType::Real,
                    InfixOperator::IntegerDivide => VariableType::Integer,
                })
            }
        })
    }
}
