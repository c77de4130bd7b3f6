use super::{
    token::{Token, TokenValue},
    LineBreaks,
};
use crate::lexer::{Lexer, LexicalError, LexicalErrorKind};
use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use owo_colors::colors::*;
use owo_colors::OwoColorize;
use std::path::Path;

const ARIADNE_MSG: &'static str = "Ariadne produces valid utf-8 strings";
const ARIADNE_WRITE_MSG: &'static str = "Write into buffer should not fail.";

/// Report settings shared by every pretty formatter. Spans hold byte offsets.
pub fn byte_indexed_config() -> Config {
    Config::default().with_index_type(IndexType::Byte)
}

/// Interface for creating new token formatters.
pub trait TokenFormatter {
    /// Formats a token into a string.
    fn format(&self, token: &Token) -> String;
    /// Formats a lexer error into a string.
    fn format_lexical_error(&self, error: &LexicalError) -> String;
}

pub trait ToFormatter<F>
where
    F: TokenFormatter,
{
    fn create_formatter(&self) -> F;
}

fn format_value(value: &TokenValue) -> String {
    match value {
        TokenValue::None => "null".into(),
        TokenValue::Integer(v) => format!("{v}"),
        TokenValue::Real(v) => format!("{v:?}"),
        TokenValue::Ident(name) => format!("{name}"),
    }
}

pub struct BasicFormatter<'src> {
    text: &'src str,
    line_breaks: LineBreaks,
}

impl<'src> BasicFormatter<'src> {
    pub fn new(text: &'src str) -> Self {
        Self {
            text,
            line_breaks: LineBreaks::new(text),
        }
    }

    pub fn get_line_breaks(&self) -> &LineBreaks {
        &self.line_breaks
    }
}

impl<'src> ToFormatter<BasicFormatter<'src>> for Lexer<'src> {
    fn create_formatter(&self) -> BasicFormatter<'src> {
        BasicFormatter {
            text: self.get_source(),
            line_breaks: self.get_line_breaks(),
        }
    }
}

impl<'src> TokenFormatter for BasicFormatter<'src> {
    fn format(&self, token: &Token) -> String {
        let lexeme = &self.text[token.span.range()];
        format!("{} {lexeme} {}", token.kind, format_value(&token.value))
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        let line = self.line_breaks.get_line_from_span(error.span);
        let column = self.line_breaks.get_column_from_span(error.span);
        match error.kind {
            LexicalErrorKind::Unrecognized(c) => {
                format!("({line}:{column}) Error: Unexpected character: {c}")
            }
            LexicalErrorKind::UnclosedComment => {
                format!("({line}:{column}) Error: Unterminated comment.")
            }
            LexicalErrorKind::InvalidNumber(ref lexeme) => {
                format!("({line}:{column}) Error: Integer literal out of range: {lexeme}")
            }
        }
    }
}

pub struct DebugFormatter;

impl<'src> ToFormatter<DebugFormatter> for Lexer<'src> {
    fn create_formatter(&self) -> DebugFormatter {
        DebugFormatter {}
    }
}

impl TokenFormatter for DebugFormatter {
    fn format(&self, token: &Token) -> String {
        format!("{token:?}")
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        format!("{error:?}")
    }
}

pub struct PrettyFormatter<'src> {
    text: &'src str,
    path: &'src Path,
    line_breaks: LineBreaks,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(text: &'src str, path: &'src Path) -> Self {
        Self {
            text,
            path,
            line_breaks: LineBreaks::new(text),
        }
    }

    pub fn get_text(&self) -> &'src str {
        self.text
    }

    pub fn get_path(&self) -> &'src Path {
        self.path
    }
}

impl<'src> TokenFormatter for PrettyFormatter<'src> {
    fn format(&self, token: &Token) -> String {
        let line = self.line_breaks.get_line_from_span(token.span);
        let column = self.line_breaks.get_column_from_span(token.span);
        let lexeme = &self.text[token.span.range()];
        format!(
            "{:>4}:{:<3} {} {} {}",
            line.fg::<BrightBlue>(),
            column.fg::<BrightBlue>(),
            token.kind.fg::<BrightMagenta>(),
            lexeme,
            format_value(&token.value).fg::<BrightYellow>(),
        )
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        let path = &self.path.to_string_lossy();
        let span = error.span;
        let label = match error.kind {
            LexicalErrorKind::Unrecognized(c) => format!("{c:?} does not start any token"),
            LexicalErrorKind::UnclosedComment => "The comment opened here is never closed".into(),
            LexicalErrorKind::InvalidNumber(_) => "This literal does not fit in 64 bits".into(),
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
