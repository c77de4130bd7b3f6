use super::error::{RuntimeError, RuntimeErrorKind};
use super::Number;
use crate::interpreter::Environment;
use crate::lexer::{formatter::byte_indexed_config, LineBreaks};
use ariadne::{Color, Label, Report, ReportKind, Source};
use owo_colors::colors::*;
use owo_colors::OwoColorize;
use std::path::Path;

const ARIADNE_MSG: &'static str = "Ariadne produces valid utf-8 strings";
const ARIADNE_WRITE_MSG: &'static str = "Write into buffer should not fail.";

pub trait ValueFormatter {
    fn format(&self, value: &Number) -> String;
    fn format_environment(&self, environment: &Environment) -> String;
    fn format_error(&self, error: &RuntimeError) -> String;
}

pub struct DebugFormatter;

impl ValueFormatter for DebugFormatter {
    fn format(&self, value: &Number) -> String {
        format!("{value:?}")
    }

    fn format_environment(&self, environment: &Environment) -> String {
        format!("{environment:?}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        format!("{error:?}")
    }
}

pub struct BasicFormatter {
    line_breaks: LineBreaks,
}

impl BasicFormatter {
    pub fn new(text: &str) -> Self {
        let line_breaks = LineBreaks::new(text);
        Self { line_breaks }
    }
}

impl ValueFormatter for BasicFormatter {
    fn format(&self, value: &Number) -> String {
        format!("{value}")
    }

    fn format_environment(&self, environment: &Environment) -> String {
        format!("{environment}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        let line = self.line_breaks.get_line_from_span(error.span);
        let column = self.line_breaks.get_column_from_span(error.span);
        format!("({line}:{column}) Runtime error: {}", error.kind)
    }
}

pub struct PrettyFormatter<'src> {
    text: &'src str,
    path: &'src Path,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(text: &'src str, path: &'src Path) -> Self {
        Self { text, path }
    }
}

impl<'src> ValueFormatter for PrettyFormatter<'src> {
    fn format(&self, value: &Number) -> String {
        match value {
            Number::Integer(_) => format!("{}", value.fg::<BrightCyan>()),
            Number::Real(_) => format!("{}", value.fg::<BrightGreen>()),
        }
    }

    fn format_environment(&self, environment: &Environment) -> String {
        let lines: Vec<String> = environment
            .iter()
            .map(|(name, variable)| {
                let value = match variable.value {
                    Some(ref value) => self.format(value),
                    None => format!("{}", "<uninitialized>".fg::<BrightBlack>()),
                };
                format!(
                    "{} : {} = {value}",
                    name.fg::<BrightWhite>(),
                    variable.kind.fg::<BrightMagenta>()
                )
            })
            .collect();
        lines.join("\n")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        let path = &self.path.to_string_lossy();
        let span = error.span;
        let label = match error.kind {
            RuntimeErrorKind::UndefinedVariable(ref name) => {
                format!("{} is not declared", name.fg::<BrightYellow>())
            }
            RuntimeErrorKind::UninitializedVariable(ref name) => format!(
                "{} has no value at this point",
                name.fg::<BrightYellow>()
            ),
            RuntimeErrorKind::TypeMismatch {
                ref name,
                expected,
                value,
            } => format!(
                "{} is {} but the value {value} is {}",
                name.fg::<BrightYellow>(),
                expected.fg::<BrightBlue>(),
                value.get_type().fg::<BrightBlue>()
            ),
            RuntimeErrorKind::DivisionByZero => "The divisor evaluates to zero".into(),
            RuntimeErrorKind::Overflow => "The result does not fit in 64 bits".into(),
        };

        let mut output = std::io::Cursor::new(Vec::new());
        Report::build(ReportKind::Error, (path, span.range()))
            .with_config(byte_indexed_config())
            .with_code(error.code())
            .with_message(format!("{}", error.kind))
            .with_label(
                Label::new((path, span.range()))
                    .with_message(label)
                    .with_color(Color::BrightRed),
            )
            .finish()
            .write((path, Source::from(self.text)), &mut output)
            .expect(ARIADNE_WRITE_MSG);
        String::from_utf8(output.into_inner()).expect(ARIADNE_MSG)
    }
}
