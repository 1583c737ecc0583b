//! Source location types
//!
//! This module contains the location metadata carried through the pipeline:
//! - `Span` for pointing errors at a line (or fragment of a line) of the log
//! - `Located<T>` for raw values that remember where they were written

use std::fmt;

/// Span representing a location in the source text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

impl Span {
    /// Span covering a whole line. `offset` is the byte offset of the line start.
    pub fn for_line(line: usize, offset: usize, text: &str) -> Self {
        Self {
            start: offset,
            end: offset + text.len(),
            line,
            col: 1,
        }
    }

    /// Span for a fragment found at `byte_idx` inside the line this span covers
    pub fn narrow(&self, byte_idx: usize, len: usize) -> Self {
        let start = (self.start + byte_idx).min(self.end);
        Self {
            start,
            end: (start + len).min(self.end),
            line: self.line,
            col: self.col + byte_idx,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A raw value together with the span it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Located<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }

    pub fn line(&self) -> usize {
        self.span.line
    }
}
