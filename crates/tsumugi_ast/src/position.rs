//! Point and position types for source locations.
//!
//! These types follow unist's `position` field: a start and end point,
//! each carrying a 1-indexed line, a 1-indexed column and a 0-indexed
//! byte offset.

use serde::{Deserialize, Serialize};

/// A single place in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset (0-indexed).
    pub offset: usize,
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// The range a node covers in the source text.
///
/// `start` is inclusive and `end` is exclusive, both by byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Place of the first character of the node.
    pub start: Point,
    /// Place of the first character after the node.
    pub end: Point,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Returns the length of the position in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    /// Returns true if the position covers no bytes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Returns true if this position contains the given byte offset.
    #[inline]
    pub const fn contains(&self, offset: usize) -> bool {
        self.start.offset <= offset && offset < self.end.offset
    }

    /// Merges two positions into one that covers both.
    #[inline]
    pub fn merge(&self, other: &Position) -> Position {
        Position {
            start: if self.start.offset <= other.start.offset {
                self.start
            } else {
                other.start
            },
            end: if self.end.offset >= other.end.offset {
                self.end
            } else {
                other.end
            },
        }
    }
}
