mod span;

use compact_str::CompactString;
pub use span::{SpanIndex, SpanLength};
use std::collections::HashMap;
use std::fmt::Display;
use std::ops::Range;
use std::sync::LazyLock;

/// The hashmap for keywords. Keywords are matched case-sensitively.
pub static KEYWORD_HASHMAP: LazyLock<HashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert("PROGRAM", TokenKind::KeywordProgram);
    map.insert("VAR", TokenKind::KeywordVar);
    map.insert("BEGIN", TokenKind::KeywordBegin);
    map.insert("END", TokenKind::KeywordEnd);
    map.insert("INTEGER", TokenKind::KeywordInteger);
    map.insert("REAL", TokenKind::KeywordReal);
    map.insert("DIV", TokenKind::IntegerDiv);
    map
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// The byte position of the start of the token.
    pub start: SpanIndex,
    /// The length of the token in bytes.
    pub length: SpanLength,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.into(),
            length: (end - start).into(),
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start.into()..(self.start + self.length).into()
    }

    pub fn end(&self) -> SpanIndex {
        self.start + self.length
    }

    pub fn merge(&self, other: &Span) -> Span {
        let start = self.start.min(other.start);
        let end = self.end().max(other.end());
        let length = end - start;
        Span { start, length }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Parentheses
    LeftParenthesis,
    RightParenthesis,
    // Punctuation
    Comma,
    Colon,
    Dot,
    Semicolon,
    // Operators
    Assign,
    Minus,
    Plus,
    Star,
    Slash,
    IntegerDiv,

    // Literals
    IntegerLiteral,
    RealLiteral,
    Ident,

    // Keywords
    KeywordProgram,
    KeywordVar,
    KeywordBegin,
    KeywordEnd,
    KeywordInteger,
    KeywordReal,

    // End of input.
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::LeftParenthesis => write!(f, "LPAREN"),
            TokenKind::RightParenthesis => write!(f, "RPAREN"),
            TokenKind::Comma => write!(f, "COMMA"),
            TokenKind::Colon => write!(f, "COLON"),
            TokenKind::Dot => write!(f, "DOT"),
            TokenKind::Semicolon => write!(f, "SEMI"),
            TokenKind::Assign => write!(f, "ASSIGN"),
            TokenKind::Minus => write!(f, "MINUS"),
            TokenKind::Plus => write!(f, "PLUS"),
            TokenKind::Star => write!(f, "MUL"),
            TokenKind::Slash => write!(f, "FLOAT_DIV"),
            TokenKind::IntegerDiv => write!(f, "INTEGER_DIV"),
            TokenKind::IntegerLiteral => write!(f, "INTEGER_CONST"),
            TokenKind::RealLiteral => write!(f, "REAL_CONST"),
            TokenKind::Ident => write!(f, "IDENTIFIER"),
            TokenKind::KeywordProgram => write!(f, "PROGRAM"),
            TokenKind::KeywordVar => write!(f, "VAR"),
            TokenKind::KeywordBegin => write!(f, "BEGIN"),
            TokenKind::KeywordEnd => write!(f, "END"),
            TokenKind::KeywordInteger => write!(f, "INTEGER"),
            TokenKind::KeywordReal => write!(f, "REAL"),
            TokenKind::Eof => write!(f, "END_OF_INPUT"),
        }
    }
}

/// The payload carried by a token. Operators, punctuation and keywords carry no payload as
/// their text is fixed by their kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    None,
    Integer(i64),
    Real(f64),
    Ident(CompactString),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub span: Span,
}

impl Token {
    pub fn just(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            value: TokenValue::None,
            span,
        }
    }
}
