use super::environment::Environment;
use crate::{
    parser::{
        expression::{
            Expression, ExpressionAtomKind, ExpressionNode, InfixOperator, PrefixOperator,
        },
        statement::{Assignment, CompoundStatement, Program, Statement},
    },
    value::{
        error::{RuntimeError, RuntimeErrorKind},
        Number,
    },
};
use log::{debug, trace};

pub struct TreeWalkInterpreter {
    environment: Environment,
}

impl TreeWalkInterpreter {
    pub fn new() -> Self {
        Self {
            environment: Environment::new(),
        }
    }

    /// Declares every variable of `program`, executes its body and hands back the variables.
    pub fn run(mut self, program: &Program) -> Result<Environment, RuntimeError> {
        for (name, type_spec) in program.declarations() {
            self.environment.declare(&name.name, type_spec.kind);
        }
        self.interpret_compound(&program.block.body)?;
        debug!(
            "Program {} finished with {} variables",
            program.name,
            self.environment.iter().count()
        );
        Ok(self.environment)
    }
}

// Statements
impl TreeWalkInterpreter {
    fn interpret_compound(&mut self, compound: &CompoundStatement) -> Result<(), RuntimeError> {
        for statement in compound.statements.iter() {
            match statement {
                Statement::Compound(inner) => self.interpret_compound(inner)?,
                Statement::Assignment(assignment) => self.interpret_assignment(assignment)?,
                Statement::Empty => {}
            }
        }
        Ok(())
    }

    fn interpret_assignment(&mut self, assignment: &Assignment) -> Result<(), RuntimeError> {
        let value = self.evaluate(&assignment.value)?;
        let target = &assignment.target;
        trace!("{target} := {value}");
        self.environment
            .assign(&target.name, value)
            .map_err(|kind| RuntimeError {
                kind,
                span: assignment.span,
            })
    }
}

// Expressions
impl TreeWalkInterpreter {
    fn evaluate(&self, expression: &Expression) -> Result<Number, RuntimeError> {
        expression.fold(|node, values| match node {
            ExpressionNode::Atom(atom) => match atom.kind {
                ExpressionAtomKind::Integer(v) => Ok(Number::Integer(v)),
                ExpressionAtomKind::Real(v) => Ok(Number::Real(v)),
                ExpressionAtomKind::Identifier(ref name) => self
                    .environment
                    .get(&name.name)
                    .map_err(|kind| RuntimeError {
                        kind,
                        span: atom.span,
                    }),
            },
            ExpressionNode::Group { inner, .. } => Ok(values.take(*inner)),
            ExpressionNode::Prefix {
                operator,
                rhs,
                span,
            } => {
                let rhs = values.take(*rhs);
                match operator {
                    PrefixOperator::Plus => Ok(rhs),
                    PrefixOperator::Minus => rhs.numeric_negate().map_err(|kind| RuntimeError {
                        kind,
                        span: *span,
                    }),
                }
            }
            ExpressionNode::Infix {
                operator,
                lhs,
                rhs,
                span,
            } => {
                let lhs = values.take(*lhs);
                let rhs = values.take(*rhs);
                let result: Result<Number, RuntimeErrorKind> = match operator {
                    InfixOperator::Add => lhs.add(&rhs),
                    InfixOperator::Subtract => lhs.subtract(&rhs),
                    InfixOperator::Multiply => lhs.multiply(&rhs),
                    InfixOperator::IntegerDivide => lhs.integer_divide(&rhs),
                    InfixOperator::FloatDivide => Ok(lhs.float_divide(&rhs)),
                };
                result.map_err(|kind| RuntimeError { kind, span: *span })
            }
        })
    }
}
