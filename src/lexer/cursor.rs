/// Character cursor over the source text.
///
/// `offset` always lies in `[0, source.len()]` and `current` is the character starting at
/// `offset`, or `None` once the offset reaches the end of the source.
#[derive(Debug, Clone)]
pub struct SourceCursor<'src> {
    source: &'src str,
    offset: usize,
    current: Option<char>,
}

impl<'src> SourceCursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            current: source.chars().next(),
        }
    }

    pub fn current(&self) -> Option<char> {
        self.current
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The character after the current one. Does not consume any input.
    pub fn peek(&self) -> Option<char> {
        let c = self.current?;
        self.source[self.offset + c.len_utf8()..].chars().next()
    }

    pub fn advance(&mut self) {
        if let Some(c) = self.current {
            self.offset += c.len_utf8();
            self.current = self.source[self.offset..].chars().next();
        }
    }

    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.current {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
    }

    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.offset]
    }
}

#[cfg(test)]
mod tests {
    use super::SourceCursor;

    #[test]
    fn cursor_stops_at_end() {
        let mut cursor = SourceCursor::new("ab");
        assert_eq!(cursor.current(), Some('a'));
        assert_eq!(cursor.peek(), Some('b'));
        cursor.advance();
        assert_eq!(cursor.peek(), None);
        cursor.advance();
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.offset(), 2);
        cursor.advance();
        assert_eq!(cursor.offset(), 2);
    }
}
