//! Offset to line/column mapping.

use crate::{Location, Position, Span};

/// Line-start table for one source text.
///
/// Built once in O(n); each lookup is a binary search over the line starts.
/// A line starts after every `\n`, so a `\r\n` terminator belongs to the line
/// it ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the first byte of each line. Always starts with `0`.
    line_starts: Vec<u32>,
    /// Total length of the source in bytes.
    len: u32,
}

impl LineIndex {
    /// Builds the index for `source`.
    pub fn new(source: &str) -> Self {
        let mut line_starts = Vec::with_capacity(source.len() / 32 + 1);
        line_starts.push(0);
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| (i + 1) as u32),
        );

        Self {
            line_starts,
            len: source.len() as u32,
        }
    }

    /// Returns the number of lines. An empty text has one (empty) line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the byte length of the indexed source.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Returns true if the indexed source is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the byte offset where `line` (1-indexed) starts.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.line_starts.get(line as usize - 1).copied()
    }

    /// Converts a byte offset to a position.
    ///
    /// `offset == len` (one past the last byte) is valid and maps to the end
    /// of the last line. Larger offsets are clamped to the end of the text.
    pub fn position(&self, offset: u32) -> Position {
        let offset = offset.min(self.len);
        let idx = self.line_starts.partition_point(|start| *start <= offset);
        // line_starts[0] == 0 <= offset, so idx >= 1.
        let line_idx = idx - 1;
        let column = offset - self.line_starts[line_idx];

        Position::new(line_idx as u32 + 1, column)
    }

    /// Converts a position back to a byte offset, if it lies within the text.
    pub fn offset(&self, position: Position) -> Option<u32> {
        let start = self.line_start(position.line)?;
        let line_end = self
            .line_start(position.line + 1)
            .unwrap_or(self.len);
        let offset = start.checked_add(position.column)?;
        (offset <= line_end).then_some(offset)
    }

    /// Converts a byte span to a location.
    pub fn location(&self, span: Span) -> Location {
        Location::new(self.position(span.start), self.position(span.end))
    }
}
