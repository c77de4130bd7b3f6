mod cursor;
mod error;
pub mod expression;
pub mod formatter;
pub mod statement;

pub use cursor::TokenCursor;
pub use error::{ParserError, ParserErrorKind};
use expression::{
    Expression, ExpressionAtom, ExpressionAtomKind, ExpressionNode, ExpressionNodeRef,
    ExpressionTree, InfixOperator, PrefixOperator,
};
use log::debug;
use statement::{
    Assignment, Block, CompoundStatement, Program, Statement, TypeSpec, VariableDecl,
};

use crate::{
    lexer::{Token, TokenKind, TokenValue},
    string::Ident,
    value::VariableType,
};

/// Recursive descent parser for the declarative grammar.
///
/// ```text
///              program : PROGRAM variable SEMI block DOT
///                block : declarations compound_statement
///         declarations : VAR (variable_declaration SEMI)+
///                      | empty
/// variable_declaration : ID (COMMA ID)* COLON type_spec
///            type_spec : INTEGER | REAL
///   compound_statement : BEGIN statement_list END
///       statement_list : statement (SEMI statement)*
///            statement : compound_statement | assignment_statement | empty
/// assignment_statement : variable ASSIGN expr
///                 expr : term ((PLUS | MINUS) term)*
///                 term : factor ((MUL | INTEGER_DIV | FLOAT_DIV) factor)*
///               factor : (PLUS | MINUS)* primary
///              primary : INTEGER_CONST | REAL_CONST | LPAREN expr RPAREN | variable
/// ```
pub struct Parser<'src> {
    cursor: TokenCursor<'src>,
    depth: usize,
}

/// How many parentheses or `BEGIN` blocks may be open at once.
pub const MAX_NESTING_DEPTH: usize = 128;

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Result<Self, ParserError> {
        Ok(Self {
            cursor: TokenCursor::new(source)?,
            depth: 0,
        })
    }

    /// Runs `parse` one nesting level below `opener`.
    fn nested<T>(
        &mut self,
        opener: &Token,
        parse: impl FnOnce(&mut Self) -> Result<T, ParserError>,
    ) -> Result<T, ParserError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParserError::too_deeply_nested(opener, MAX_NESTING_DEPTH));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn expect_ident(&mut self) -> Result<Ident, ParserError> {
        let token = self.cursor.expect(TokenKind::Ident)?;
        Ok(Self::to_ident(token))
    }

    fn to_ident(token: Token) -> Ident {
        let Token {
            value: TokenValue::Ident(name),
            span,
            ..
        } = token
        else {
            unreachable!("Identifier tokens always carry their name.");
        };
        Ident { name, span }
    }
}

// Program structure
impl<'src> Parser<'src> {
    pub fn parse(mut self) -> Result<Program, ParserError> {
        let program = self.parse_program()?;
        self.cursor.expect_end()?;
        debug!(
            "Parsed program {} with {} declared variables",
            program.name,
            program.declarations().count()
        );
        Ok(program)
    }

    fn parse_program(&mut self) -> Result<Program, ParserError> {
        self.cursor.expect(TokenKind::KeywordProgram)?;
        let name = self.expect_ident()?;
        self.cursor.expect(TokenKind::Semicolon)?;
        let block = self.parse_block()?;
        self.cursor.expect(TokenKind::Dot)?;
        Ok(Program { name, block })
    }

    fn parse_block(&mut self) -> Result<Block, ParserError> {
        let declarations = self.parse_declarations()?;
        let body = self.parse_compound_statement()?;
        Ok(Block { declarations, body })
    }

    fn parse_declarations(&mut self) -> Result<Vec<VariableDecl>, ParserError> {
        let mut declarations = Vec::new();
        if self.cursor.eat_if(TokenKind::KeywordVar)?.is_none() {
            return Ok(declarations);
        }

        loop {
            declarations.push(self.parse_variable_declaration()?);
            self.cursor.expect(TokenKind::Semicolon)?;
            if !self.cursor.check(TokenKind::Ident) {
                break;
            }
        }
        Ok(declarations)
    }

    fn parse_variable_declaration(&mut self) -> Result<VariableDecl, ParserError> {
        let mut names = vec![self.expect_ident()?];
        while self.cursor.eat_if(TokenKind::Comma)?.is_some() {
            names.push(self.expect_ident()?);
        }
        self.cursor.expect(TokenKind::Colon)?;
        let type_spec = self.parse_type_spec()?;
        Ok(VariableDecl { names, type_spec })
    }

    fn parse_type_spec(&mut self) -> Result<TypeSpec, ParserError> {
        let kind = match self.cursor.current().kind {
            TokenKind::KeywordInteger => VariableType::Integer,
            TokenKind::KeywordReal => VariableType::Real,
            _ => {
                let token = self.cursor.current().clone();
                return Err(ParserError {
                    span: token.span,
                    kind: ParserErrorKind::NonTypeSpec(token),
                });
            }
        };
        let token = self.cursor.advance()?;
        Ok(TypeSpec {
            kind,
            span: token.span,
        })
    }
}

// Statements
impl<'src> Parser<'src> {
    fn parse_compound_statement(&mut self) -> Result<CompoundStatement, ParserError> {
        let begin = self.cursor.expect(TokenKind::KeywordBegin)?;
        let statements = self.nested(&begin, Self::parse_statement_list)?;
        let end = self.cursor.expect(TokenKind::KeywordEnd)?;
        Ok(CompoundStatement {
            statements,
            span: begin.span.merge(&end.span),
        })
    }

    fn parse_statement_list(&mut self) -> Result<Vec<Statement>, ParserError> {
        let mut statements = vec![self.parse_statement()?];
        while self.cursor.eat_if(TokenKind::Semicolon)?.is_some() {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        match self.cursor.current().kind {
            TokenKind::KeywordBegin => Ok(Statement::Compound(self.parse_compound_statement()?)),
            TokenKind::Ident => Ok(Statement::Assignment(self.parse_assignment_statement()?)),
            _ => Ok(Statement::Empty),
        }
    }

    fn parse_assignment_statement(&mut self) -> Result<Assignment, ParserError> {
        let target = self.expect_ident()?;
        self.cursor.expect(TokenKind::Assign)?;
        let value = self.parse_expression_tree()?;
        Ok(Assignment {
            span: target.span.merge(&value.get_span()),
            target,
            value,
        })
    }
}

// Expressions
impl<'src> Parser<'src> {
    /// Parses a standalone expression that must span the whole input.
    pub fn parse_expression(mut self) -> Result<Expression, ParserError> {
        let expression = self.parse_expression_tree()?;
        self.cursor.expect_end()?;
        Ok(expression)
    }

    fn parse_expression_tree(&mut self) -> Result<Expression, ParserError> {
        let mut tree = ExpressionTree::new();
        let root = self.parse_expr(&mut tree)?;
        Ok(tree
            .finish(root)
            .expect("Root was obtained from the tree itself so it must be valid."))
    }

    fn parse_expr(&mut self, tree: &mut ExpressionTree) -> Result<ExpressionNodeRef, ParserError> {
        let mut lhs = self.parse_term(tree)?;
        loop {
            let operator = match self.cursor.current().kind {
                TokenKind::Plus => InfixOperator::Add,
                TokenKind::Minus => InfixOperator::Subtract,
                _ => break,
            };
            let span = self.cursor.advance()?.span;
            let rhs = self.parse_term(tree)?;
            lhs = tree.push(ExpressionNode::Infix {
                operator,
                lhs,
                rhs,
                span,
            });
        }
        Ok(lhs)
    }

    fn parse_term(&mut self, tree: &mut ExpressionTree) -> Result<ExpressionNodeRef, ParserError> {
        let mut lhs = self.parse_factor(tree)?;
        loop {
            let operator = match self.cursor.current().kind {
                TokenKind::Star => InfixOperator::Multiply,
                TokenKind::IntegerDiv => InfixOperator::IntegerDivide,
                TokenKind::Slash => InfixOperator::FloatDivide,
                _ => break,
            };
            let span = self.cursor.advance()?.span;
            let rhs = self.parse_factor(tree)?;
            lhs = tree.push(ExpressionNode::Infix {
                operator,
                lhs,
                rhs,
                span,
            });
        }
        Ok(lhs)
    }

    fn parse_factor(
        &mut self,
        tree: &mut ExpressionTree,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let mut signs = Vec::new();
        loop {
            let operator = match self.cursor.current().kind {
                TokenKind::Plus => PrefixOperator::Plus,
                TokenKind::Minus => PrefixOperator::Minus,
                _ => break,
            };
            let span = self.cursor.advance()?.span;
            signs.push((operator, span));
        }

        let mut node = self.parse_primary(tree)?;
        // The sign closest to the operand applies first.
        for (operator, span) in signs.into_iter().rev() {
            node = tree.push(ExpressionNode::Prefix {
                operator,
                rhs: node,
                span,
            });
        }
        Ok(node)
    }

    fn parse_primary(
        &mut self,
        tree: &mut ExpressionTree,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let token = self.cursor.current().clone();
        let node = match token.kind {
            TokenKind::IntegerLiteral | TokenKind::RealLiteral => {
                self.cursor.advance()?;
                let kind = match token.value {
                    TokenValue::Integer(v) => ExpressionAtomKind::Integer(v),
                    TokenValue::Real(v) => ExpressionAtomKind::Real(v),
                    _ => unreachable!("Numeric literal tokens always carry their value."),
                };
                ExpressionNode::Atom(ExpressionAtom {
                    kind,
                    span: token.span,
                })
            }
            TokenKind::Ident => {
                let token = self.cursor.advance()?;
                let span = token.span;
                ExpressionNode::Atom(ExpressionAtom {
                    kind: ExpressionAtomKind::Identifier(Self::to_ident(token)),
                    span,
                })
            }
            TokenKind::LeftParenthesis => {
                self.cursor.advance()?;
                let inner = self.nested(&token, |parser| parser.parse_expr(tree))?;
                let close = self.cursor.expect(TokenKind::RightParenthesis)?;
                ExpressionNode::Group {
                    inner,
                    span: token.span.merge(&close.span),
                }
            }
            _ => {
                return Err(ParserError {
                    span: token.span,
                    kind: ParserErrorKind::NonExpression(token),
                })
            }
        };
        Ok(tree.push(node))
    }
}
