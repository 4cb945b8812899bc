//! Span and position types for source locations.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A position in source text.
///
/// Uses 1-indexed lines and 0-indexed columns. Columns count UTF-8 code units
/// from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (0-indexed).
    pub column: u32,
}

impl Position {
    /// The first column of the first line.
    pub const FILE_START: Position = Position::new(1, 0);

    /// Creates a new position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A span representing a range in source text.
///
/// Uses byte offsets (0-indexed) for efficient slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (0-indexed, inclusive).
    pub start: u32,
    /// End byte offset (0-indexed, exclusive).
    pub end: u32,
}

impl Span {
    /// Creates a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Creates an empty span at `offset`.
    #[inline]
    pub const fn empty(offset: u32) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Creates a span from a `usize` range.
    ///
    /// Offsets are saturated to `u32::MAX`.
    pub fn from_range(range: Range<usize>) -> Self {
        let clamp = |v: usize| u32::try_from(v).unwrap_or(u32::MAX);
        Self::new(clamp(range.start), clamp(range.end))
    }

    /// Returns the span as a `usize` range for slicing.
    #[inline]
    pub const fn as_range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Returns the length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if this span contains the given offset.
    #[inline]
    pub const fn contains(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Returns true if the two spans share at least one byte, or if a
    /// zero-width span sits strictly inside the other.
    ///
    /// Touching spans (`a.end == b.start`) do not overlap.
    #[inline]
    pub const fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl From<Range<u32>> for Span {
    fn from(range: Range<u32>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Location information combining start and end positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// Start position.
    pub start: Position,
    /// End position.
    pub end: Position,
}

impl Location {
    /// Creates a new location.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A zero-width location at line 1, column 0.
    #[inline]
    pub const fn file_start() -> Self {
        Self::new(Position::FILE_START, Position::FILE_START)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position() {
        let pos = Position::new(1, 0);
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 0);
        assert_eq!(pos, Position::FILE_START);
    }

    #[test]
    fn test_span() {
        let span = Span::new(10, 20);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
        assert!(span.contains(15));
        assert!(!span.contains(5));
        assert!(!span.contains(20));
    }

    #[test]
    fn test_empty_span() {
        let span = Span::empty(5);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
        assert_eq!(span.as_range(), 5..5);
    }

    #[test]
    fn test_span_from_range() {
        let span = Span::from_range(3..8);
        assert_eq!(span, Span::new(3, 8));
        assert_eq!(span.as_range(), 3..8);
        assert_eq!(Span::from(3u32..8u32), span);
    }

    #[test]
    fn test_span_overlaps() {
        let span = Span::new(10, 20);

        assert!(span.overlaps(&Span::new(15, 25)));
        assert!(span.overlaps(&Span::new(0, 11)));
        assert!(span.overlaps(&Span::new(12, 13)));
        assert!(!span.overlaps(&Span::new(20, 30)));
        assert!(!span.overlaps(&Span::new(0, 10)));
        assert!(!span.overlaps(&Span::empty(20)));
    }

    #[test]
    fn test_location() {
        let loc = Location::new(Position::new(1, 0), Position::new(1, 10));

        assert_eq!(loc.start.line, 1);
        assert_eq!(loc.start.column, 0);
        assert_eq!(loc.end.line, 1);
        assert_eq!(loc.end.column, 10);
    }

    #[test]
    fn test_location_file_start() {
        let loc = Location::file_start();
        assert_eq!(loc.start, Position::new(1, 0));
        assert_eq!(loc.end, Position::new(1, 0));
    }

    #[test]
    fn test_span_deserialization() {
        let json = r#"{"start": 5, "end": 15}"#;
        let span: Span = serde_json::from_str(json).unwrap();
        assert_eq!(span.start, 5);
        assert_eq!(span.end, 15);
    }

    #[test]
    fn test_location_serialization() {
        let loc = Location::new(Position::new(2, 3), Position::new(2, 7));
        let json = serde_json::to_value(loc).unwrap();
        assert_eq!(json["start"]["line"], 2);
        assert_eq!(json["end"]["column"], 7);
    }
}
