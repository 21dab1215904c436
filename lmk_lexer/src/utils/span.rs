//! Source location tracking for the LMK lexer
//!
//! This module provides types for tracking positions and spans in the
//! preprocessed line buffer. Accurate location tracking is essential for
//! providing helpful error messages and for replaying a token stream.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the preprocessed line buffer.
///
/// Rows and columns are 0-based. Ordering is row-major: a position on an
/// earlier row always compares less than any position on a later row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Row number (0-based)
    pub row: u32,
    /// Column number (0-based)
    pub col: u32,
}

impl Position {
    /// Create a new position
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Create the starting position (row 0, column 0)
    pub fn start() -> Self {
        Self { row: 0, col: 0 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(u32, u32)> for Position {
    fn from((row, col): (u32, u32)) -> Self {
        Self { row, col }
    }
}

/// A span of source text from start to end position, both inclusive.
///
/// The end position is the location of the last character that belongs to
/// the span, never the location of the next unconsumed character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (inclusive)
    pub end: Position,
}

impl Span {
    /// Create a new span
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a single-character span
    pub fn single(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Get the start position of this span
    pub fn start(&self) -> Position {
        self.start
    }

    /// Get the end position of this span
    pub fn end(&self) -> Position {
        self.end
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Check if this span contains a position
    pub fn contains(&self, pos: Position) -> bool {
        pos >= self.start && pos <= self.end
    }

    /// Rows covered by this span, start row through end row inclusive
    pub fn rows(&self) -> std::ops::RangeInclusive<u32> {
        self.start.row..=self.end.row
    }

    /// Check if the span is well-formed (`end >= start`)
    pub fn is_ordered(&self) -> bool {
        self.end >= self.start
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.row == self.end.row {
            write!(
                f,
                "{}:{}-{}",
                self.start.row, self.start.col, self.end.col
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}
