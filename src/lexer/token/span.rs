use std::ops::{Add, Sub};

/// Byte offset into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpanIndex(u32);

/// Number of bytes between two offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanLength(u32);

impl SpanIndex {
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for SpanIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Offsets are stored as `u32`, so sources are limited to 4 GiB.
impl From<usize> for SpanIndex {
    fn from(offset: usize) -> Self {
        Self(offset as u32)
    }
}

impl From<SpanIndex> for usize {
    fn from(index: SpanIndex) -> Self {
        index.to_usize()
    }
}

impl From<usize> for SpanLength {
    fn from(length: usize) -> Self {
        Self(length as u32)
    }
}

impl Add<SpanLength> for SpanIndex {
    type Output = SpanIndex;

    fn add(self, length: SpanLength) -> SpanIndex {
        SpanIndex(self.0 + length.0)
    }
}

impl Sub for SpanIndex {
    type Output = SpanLength;

    fn sub(self, start: SpanIndex) -> SpanLength {
        SpanLength(self.0 - start.0)
    }
}
