//! Edit application errors.

use std::ops::Range;

use thiserror::Error;

/// Errors that can occur while applying edits to a text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The edit range does not fit the text.
    #[error("Edit range {}..{} is out of bounds for text of length {len}", .range.start, .range.end)]
    OutOfBounds { range: Range<usize>, len: usize },

    /// The edit range splits a multi-byte character.
    #[error("Edit range {}..{} does not lie on character boundaries", .range.start, .range.end)]
    NotCharBoundary { range: Range<usize> },

    /// Two edits touch the same bytes.
    #[error("Edit range {}..{} overlaps edit range {}..{}", .first.start, .first.end, .second.start, .second.end)]
    Overlap {
        first: Range<usize>,
        second: Range<usize>,
    },
}
