use super::{
    expression::{
        Expression, ExpressionAtomKind, ExpressionNode, ExpressionNodeRef, InfixOperator,
        PrefixOperator,
    },
    statement::{CompoundStatement, Program, Statement},
    ParserError, ParserErrorKind,
};
use crate::lexer::{
    formatter::{
        byte_indexed_config, BasicFormatter as BasicTokenFormatter,
        PrettyFormatter as PrettyTokenFormatter, TokenFormatter,
    },
    LineBreaks,
};
use ariadne::{Color, Label, Report, ReportKind, Source};
use std::{fmt::Write, path::Path};

const WRITE_FMT_MSG: &'static str =
    "Encountered an error while attempting to write format string to buffer.";
const ARIADNE_MSG: &'static str = "Ariadne produces valid utf-8 strings";
const ARIADNE_WRITE_MSG: &'static str = "Write into buffer should not fail.";

/// Renders syntax trees as S-expressions.
pub struct SExpressionFormatter;

impl SExpressionFormatter {
    pub fn format_expression(tree: &Expression) -> String {
        enum Step {
            Node(ExpressionNodeRef),
            Text(&'static str),
        }

        // Pending output in reverse order, so deep trees need no recursion.
        let mut pending = vec![Step::Node(tree.get_root_ref())];
        let mut buffer = String::new();
        while let Some(step) = pending.pop() {
            let node = match step {
                Step::Text(text) => {
                    buffer.push_str(text);
                    continue;
                }
                Step::Node(node) => tree
                    .get_node(node)
                    .expect("Node refs always come from the same tree."),
            };
            match node {
                ExpressionNode::Atom(atom) => match atom.kind {
                    ExpressionAtomKind::Integer(v) => write!(buffer, "{v}"),
                    ExpressionAtomKind::Real(v) => write!(buffer, "{v:?}"),
                    ExpressionAtomKind::Identifier(ref name) => write!(buffer, "{name}"),
                }
                .expect(WRITE_FMT_MSG),
                ExpressionNode::Prefix { operator, rhs, .. } => {
                    write!(buffer, "({} ", Self::format_prefix_operator(operator))
                        .expect(WRITE_FMT_MSG);
                    pending.extend([Step::Text(")"), Step::Node(*rhs)]);
                }
                ExpressionNode::Infix {
                    operator, lhs, rhs, ..
                } => {
                    write!(buffer, "({} ", Self::format_infix_operator(operator))
                        .expect(WRITE_FMT_MSG);
                    pending.extend([
                        Step::Text(")"),
                        Step::Node(*rhs),
                        Step::Text(" "),
                        Step::Node(*lhs),
                    ]);
                }
                ExpressionNode::Group { inner, .. } => {
                    buffer.push_str("(group ");
                    pending.extend([Step::Text(")"), Step::Node(*inner)]);
                }
            }
        }
        buffer
    }

    pub fn format_program(program: &Program) -> String {
        let mut buffer = String::new();
        write!(buffer, "(program {}", program.name).expect(WRITE_FMT_MSG);
        for (name, type_spec) in program.declarations() {
            write!(buffer, "\n  (var {} {})", name, type_spec.kind).expect(WRITE_FMT_MSG);
        }
        buffer.push('\n');
        Self::format_compound(&mut buffer, &program.block.body, 1);
        buffer.push(')');
        buffer
    }

    fn format_compound(buffer: &mut String, compound: &CompoundStatement, depth: usize) {
        let indent = "  ".repeat(depth);
        write!(buffer, "{indent}(begin").expect(WRITE_FMT_MSG);
        for statement in compound.statements.iter() {
            buffer.push('\n');
            match statement {
                Statement::Compound(inner) => Self::format_compound(buffer, inner, depth + 1),
                Statement::Assignment(assignment) => write!(
                    buffer,
                    "{indent}  (:= {} {})",
                    assignment.target,
                    Self::format_expression(&assignment.value)
                )
                .expect(WRITE_FMT_MSG),
                Statement::Empty => write!(buffer, "{indent}  (noop)").expect(WRITE_FMT_MSG),
            }
        }
        buffer.push(')');
    }

    fn format_prefix_operator(operator: &PrefixOperator) -> &'static str {
        match operator {
            PrefixOperator::Plus => "+",
            PrefixOperator::Minus => "-",
        }
    }

    fn format_infix_operator(operator: &InfixOperator) -> &'static str {
        match operator {
            InfixOperator::Add => "+",
            InfixOperator::Subtract => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::IntegerDivide => "DIV",
            InfixOperator::FloatDivide => "/",
        }
    }
}

pub trait ParserFormatter {
    fn format_error(&self, error: &ParserError) -> String;
}

pub struct DebugParserFormatter;

impl ParserFormatter for DebugParserFormatter {
    fn format_error(&self, error: &ParserError) -> String {
        format!("{error:?}")
    }
}

pub struct BasicParserFormatter<'src> {
    token_formatter: BasicTokenFormatter<'src>,
}

impl<'src> BasicParserFormatter<'src> {
    pub fn new(text: &'src str) -> Self {
        Self {
            token_formatter: BasicTokenFormatter::new(text),
        }
    }

    pub fn get_line_breaks(&self) -> &LineBreaks {
        self.token_formatter.get_line_breaks()
    }
}

impl<'src> ParserFormatter for BasicParserFormatter<'src> {
    fn format_error(&self, error: &ParserError) -> String {
        if let ParserErrorKind::LexicalError(ref e) = error.kind {
            return self.token_formatter.format_lexical_error(e);
        }
        let line = self.get_line_breaks().get_line_from_span(error.span);
        let column = self.get_line_breaks().get_column_from_span(error.span);
        format!("({line}:{column}) Syntax error: {}", error.kind)
    }
}

pub struct PrettyParserFormatter<'src> {
    token_formatter: PrettyTokenFormatter<'src>,
}

impl<'src> PrettyParserFormatter<'src> {
    pub fn new(text: &'src str, path: &'src Path) -> Self {
        Self {
            token_formatter: PrettyTokenFormatter::new(text, path),
        }
    }
}

impl<'src> ParserFormatter for PrettyParserFormatter<'src> {
    fn format_error(&self, error: &ParserError) -> String {
        let (message, label) = match &error.kind {
            ParserErrorKind::LexicalError(e) => {
                return self.token_formatter.format_lexical_error(e);
            }
            ParserErrorKind::UnexpectedToken { actual, expected } => (
                "Expected a different token",
                format!("Expected {} but got {}", expected, actual.kind),
            ),
            ParserErrorKind::NonExpression(token) => (
                "Expected a valid expression operator or atom token",
                format!("Not an expression token {}", token.kind),
            ),
            ParserErrorKind::NonTypeSpec(token) => (
                "Expected a type specification",
                format!("{} is not INTEGER or REAL", token.kind),
            ),
            ParserErrorKind::TrailingInput(token) => (
                "Unexpected input after the end of the program",
                format!("{} should not be here", token.kind),
            ),
            ParserErrorKind::TooDeeplyNested { opener, limit } => (
                "Nesting is too deep",
                format!("This {} opens level {} of at most {limit}", opener.kind, limit + 1),
            ),
        };

        let text = self.token_formatter.get_text();
        let path = &self.token_formatter.get_path().to_string_lossy();
        let span = error.span;
        let mut output = std::io::Cursor::new(Vec::new());
        Report::build(ReportKind::Error, (path, span.range()))
            .with_config(byte_indexed_config())
            .with_code(error.code())
            .with_message(message)
            .with_label(
                Label::new((path, span.range()))
                    .with_message(label)
                    .with_color(Color::BrightRed),
            )
            .finish()
            .write((path, Source::from(text)), &mut output)
            .expect(ARIADNE_WRITE_MSG);
        String::from_utf8(output.into_inner()).expect(ARIADNE_MSG)
    }
}
