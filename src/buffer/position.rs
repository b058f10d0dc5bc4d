//! Position and range types for addressing locations in a buffer.
//!
//! A `Position` is only meaningful relative to a specific buffer snapshot:
//! structural edits above it shift what it points at.

use std::fmt;

/// A position in the text buffer (line and column, both 0-indexed).
///
/// Columns count characters within the line, not visual width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn zero() -> Self {
        Self { line: 0, column: 0 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// An ordered span between two positions, `start <= end` under line-major
/// ordering. Represents a selection or the extent of an edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Create a range, swapping the endpoints if given out of order.
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A zero-width range at a single position.
    pub const fn collapsed(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Check if the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if the range stays within a single line.
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Check if a position falls within this range (start inclusive, end exclusive).
    pub fn contains(&self, pos: Position) -> bool {
        pos >= self.start && pos < self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
