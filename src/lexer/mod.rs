mod cursor;
mod error;
pub mod formatter;
mod token;

use cursor::SourceCursor;
pub use error::{LexicalError, LexicalErrorKind};
use log::trace;
use std::{ops::Range, rc::Rc};
pub use token::{Span, SpanIndex, SpanLength, Token, TokenKind, TokenValue, KEYWORD_HASHMAP};

#[derive(Debug, Clone)]
pub struct LineBreaks {
    text: Rc<str>,
    line_breaks: Rc<[Range<SpanIndex>]>,
}

impl LineBreaks {
    /// Splits `text` into line ranges. The last range reaches one byte past the end of the
    /// text so that `END_OF_INPUT` lands on a line of its own after a trailing newline.
    pub fn new(text: &str) -> Self {
        let mut line_breaks = Vec::new();
        let mut cursor = SpanIndex::from(0usize);
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                let offset = (offset + 1).into();
                line_breaks.push(cursor..offset);
                cursor = offset;
            }
        }
        line_breaks.push(cursor..(text.len() + 1).into());
        Self {
            text: text.into(),
            line_breaks: line_breaks.into(),
        }
    }

    pub fn get_max_line(&self) -> u32 {
        self.line_breaks.len() as u32
    }

    pub fn get_line(&self, offset: SpanIndex) -> u32 {
        self.line_breaks
            .binary_search_by(|r| {
                if offset < r.start {
                    std::cmp::Ordering::Greater
                } else if offset >= r.end {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .map(|v| (v + 1) as u32)
            .unwrap_or(self.get_max_line())
    }

    pub fn get_line_from_span(&self, span: Span) -> u32 {
        self.get_line(span.start)
    }

    /// 1-based column of the span's first character, counted in characters.
    pub fn get_column_from_span(&self, span: Span) -> u32 {
        let line = self.get_line_from_span(span) as usize;
        let line_start = self.line_breaks[line - 1].start.to_usize();
        let offset = span.start.to_usize().clamp(line_start, self.text.len());
        let prefix = self.text.get(line_start..offset).unwrap_or_default();
        (prefix.chars().count() + 1) as u32
    }
}

#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    cursor: SourceCursor<'src>,
    line_breaks: LineBreaks,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            cursor: SourceCursor::new(source),
            line_breaks: LineBreaks::new(source),
        }
    }

    pub fn get_source(&self) -> &'src str {
        self.source
    }

    pub fn get_line_breaks(&self) -> LineBreaks {
        self.line_breaks.clone()
    }
}

impl<'src> Lexer<'src> {
    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        let token = self.scan_token()?;
        trace!("Lexed {} at {:?}", token.kind, token.span.range());
        Ok(token)
    }

    fn scan_token(&mut self) -> Result<Token, LexicalError> {
        self.skip_trivia()?;

        let start = self.cursor.offset();
        let Some(c) = self.cursor.current() else {
            return Ok(Token::just(TokenKind::Eof, Span::new(start, start)));
        };

        if c.is_ascii_alphabetic() || c == '_' {
            return Ok(self.lex_ident_or_keyword(start));
        }
        if c == ':' && self.cursor.peek() == Some('=') {
            self.cursor.advance();
            self.cursor.advance();
            return Ok(Token::just(TokenKind::Assign, Span::new(start, start + 2)));
        }
        if c.is_ascii_digit() {
            return self.lex_number(start);
        }

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LeftParenthesis,
            ')' => TokenKind::RightParenthesis,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            _ => {
                self.cursor.advance();
                return Err(LexicalError {
                    kind: LexicalErrorKind::Unrecognized(c),
                    span: Span::new(start, self.cursor.offset()),
                });
            }
        };
        self.cursor.advance();
        Ok(Token::just(kind, Span::new(start, self.cursor.offset())))
    }

    /// Skips whitespace and `{ ... }` comments. Comments do not nest.
    fn skip_trivia(&mut self) -> Result<(), LexicalError> {
        loop {
            self.cursor.advance_while(|c| c.is_whitespace());
            if self.cursor.current() != Some('{') {
                return Ok(());
            }
            let start = self.cursor.offset();
            self.cursor.advance_while(|c| c != '}');
            if self.cursor.current().is_none() {
                return Err(LexicalError {
                    kind: LexicalErrorKind::UnclosedComment,
                    span: Span::new(start, self.cursor.offset()),
                });
            }
            self.cursor.advance();
        }
    }

    fn lex_ident_or_keyword(&mut self, start: usize) -> Token {
        self.cursor
            .advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let lexeme = self.cursor.slice_from(start);
        let span = Span::new(start, self.cursor.offset());
        match KEYWORD_HASHMAP.get(lexeme) {
            Some(kind) => Token::just(*kind, span),
            None => Token {
                kind: TokenKind::Ident,
                value: TokenValue::Ident(lexeme.into()),
                span,
            },
        }
    }

    fn lex_number(&mut self, start: usize) -> Result<Token, LexicalError> {
        self.cursor.advance_while(|c| c.is_ascii_digit());

        let is_real = self.cursor.current() == Some('.')
            && self.cursor.peek().is_some_and(|c| c.is_ascii_digit());
        if is_real {
            self.cursor.advance();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }

        let lexeme = self.cursor.slice_from(start);
        let span = Span::new(start, self.cursor.offset());
        if is_real {
            let value: f64 = lexeme
                .parse()
                .expect("Digits around a single dot always parse as `f64`.");
            Ok(Token {
                kind: TokenKind::RealLiteral,
                value: TokenValue::Real(value),
                span,
            })
        } else {
            let value: i64 = lexeme.parse().map_err(|_| LexicalError {
                kind: LexicalErrorKind::InvalidNumber(lexeme.into()),
                span,
            })?;
            Ok(Token {
                kind: TokenKind::IntegerLiteral,
                value: TokenValue::Integer(value),
                span,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Lexer, LexicalErrorKind, LineBreaks, Span, TokenKind, TokenValue};

    #[test]
    fn assign_is_preferred_over_colon() {
        let mut lexer = Lexer::new("a := b : c");
        let kinds: Vec<TokenKind> = std::iter::from_fn(|| {
            let token = lexer.next_token().ok()?;
            (token.kind != TokenKind::Eof).then_some(token.kind)
        })
        .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Ident,
            ]
        );
    }

    #[test]
    fn integer_followed_by_dot_is_not_real() {
        let mut lexer = Lexer::new("3.");
        let first = lexer.next_token().unwrap();
        assert_eq!(first.value, TokenValue::Integer(3));
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Dot);
    }

    #[test]
    fn unclosed_comment_is_an_error() {
        let mut lexer = Lexer::new("1 { never closed");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::IntegerLiteral);
        let error = lexer.next_token().unwrap_err();
        assert_eq!(error.kind, LexicalErrorKind::UnclosedComment);
    }

    #[test]
    fn columns_are_one_based() {
        let breaks = LineBreaks::new("ab\ncd");
        assert_eq!(breaks.get_line_from_span(Span::new(3, 4)), 2);
        assert_eq!(breaks.get_column_from_span(Span::new(4, 5)), 2);
    }
}
