//! Source location tracking
//!
//! Tokens, clauses and errors all point back into the rule text through a
//! `Span`. `start` and `end` are byte offsets. `line` and `col` are 1-based,
//! `col` counts characters, and both only differ from a single-line view
//! when a rule was loaded from a rule-set source with several lines.

use serde::Serialize;

/// Span representing a location in source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

impl Span {
    /// Span of `start..end` on the first line of a rule
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            line: 1,
            col: start + 1,
        }
    }

    /// Span of `start..end` on the first line of `text`, with the column
    /// counted in characters.
    pub fn in_text(text: &str, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            line: 1,
            col: text[..start].chars().count() + 1,
        }
    }

    /// Move a span computed against a single rule into a larger source,
    /// where the rule starts at byte `offset` on line `line`, column `col`.
    pub fn relocate(self, offset: usize, line: usize, col: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            line,
            col: self.col + col - 1,
        }
    }

    /// Span covering both `self` and `other`
    pub fn to(self, other: Span) -> Self {
        Self {
            start: self.start,
            end: other.end,
            line: self.line,
            col: self.col,
        }
    }
}
