use super::{SemanticError, SemanticErrorKind, Symbol, SymbolTable};
use crate::lexer::{formatter::byte_indexed_config, LineBreaks};
use ariadne::{Color, Label, Report, ReportKind, Source};
use std::{fmt::Write, path::Path};

const WRITE_FMT_MSG: &'static str =
    "Encountered an error while attempting to write format string to buffer.";
const ARIADNE_MSG: &'static str = "Ariadne produces valid utf-8 strings";
const ARIADNE_WRITE_MSG: &'static str = "Write into buffer should not fail.";

pub fn format_symbol_table(table: &SymbolTable) -> String {
    let mut buffer = String::from("Symbol table:");
    for (name, symbol) in table.iter() {
        match symbol {
            Symbol::BuiltinType(_) => write!(buffer, "\n  {name:<12} <builtin type>"),
            Symbol::Variable { kind, .. } => write!(buffer, "\n  {name:<12} {kind}"),
        }
        .expect(WRITE_FMT_MSG);
    }
    buffer
}

pub trait AnalyzerFormatter {
    fn format_error(&self, error: &SemanticError) -> String {
        let mut buffer = String::new();
        self.format_error_in_place(&mut buffer, error);
        buffer
    }
    fn format_error_in_place(&self, buffer: &mut String, error: &SemanticError);
}

pub struct DebugAnalyzerFormatter;

impl AnalyzerFormatter for DebugAnalyzerFormatter {
    fn format_error_in_place(&self, buffer: &mut String, error: &SemanticError) {
        write!(buffer, "{error:?}").expect(WRITE_FMT_MSG);
    }
}

pub struct BasicAnalyzerFormatter {
    line_breaks: LineBreaks,
}

impl BasicAnalyzerFormatter {
    pub fn new(text: &str) -> Self {
        Self {
            line_breaks: LineBreaks::new(text),
        }
    }
}

impl AnalyzerFormatter for BasicAnalyzerFormatter {
    fn format_error_in_place(&self, buffer: &mut String, error: &SemanticError) {
        let line = self.line_breaks.get_line_from_span(error.span);
        let column = self.line_breaks.get_column_from_span(error.span);
        write!(buffer, "({line}:{column}) Semantic error: {}", error.kind).expect(WRITE_FMT_MSG);
    }
}

pub struct PrettyAnalyzerFormatter<'src> {
    text: &'src str,
    path: &'src Path,
}

impl<'src> PrettyAnalyzerFormatter<'src> {
    pub fn new(text: &'src str, path: &'src Path) -> Self {
        Self { text, path }
    }
}

impl<'src> AnalyzerFormatter for PrettyAnalyzerFormatter<'src> {
    fn format_error_in_place(&self, buffer: &mut String, error: &SemanticError) {
        let path = &self.path.to_string_lossy();
        let span = error.span;
        let report = Report::build(ReportKind::Error, (path, span.range()))
            .with_config(byte_indexed_config())
            .with_code(error.code());
        let report = match &error.kind {
            SemanticErrorKind::UndefinedVariable(name) => report
                .with_message("Use of an undeclared variable")
                .with_label(
                    Label::new((path, span.range()))
                        .with_message(format!("{name} is not declared in a VAR section"))
                        .with_color(Color::BrightRed),
                ),
            SemanticErrorKind::DuplicateIdentifier {
                original,
                duplicate,
            } => report
                .with_message("Variable declared more than once")
                .with_label(
                    Label::new((path, original.span.range()))
                        .with_message("Variable is first declared here...")
                        .with_color(Color::BrightYellow),
                )
                .with_label(
                    Label::new((path, duplicate.span.range()))
                        .with_message("but is declared again over here")
                        .with_color(Color::BrightRed),
                ),
            SemanticErrorKind::TypeMismatch {
                target,
                expected,
                actual,
            } => report
                .with_message("Assignment of an incompatible type")
                .with_label(
                    Label::new((path, span.range()))
                        .with_message(format!(
                            "{target} is {expected} but the value is {actual}"
                        ))
                        .with_color(Color::BrightRed),
                ),
        };

        let mut output = std::io::Cursor::new(Vec::new());
        report
            .finish()
            .write((path, Source::from(self.text)), &mut output)
            .expect(ARIADNE_WRITE_MSG);
        buffer.push_str(&String::from_utf8(output.into_inner()).expect(ARIADNE_MSG));
    }
}
