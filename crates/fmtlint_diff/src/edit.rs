//! Edit synthesis and application.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::{Changeset, EditError};

/// The kind of a [`FixOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditKind {
    Insert,
    Delete,
    Replace,
}

/// A single edit against the original text.
///
/// Ranges are byte offsets into the original text only, so operations computed
/// from one [`Changeset`] are independent of each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FixOperation {
    /// Insert `text` at byte offset `at`.
    Insert { at: usize, text: String },
    /// Delete the bytes in `range`.
    Delete { range: Range<usize> },
    /// Replace the bytes in `range` with `text`.
    Replace { range: Range<usize>, text: String },
}

impl FixOperation {
    /// Creates an insert operation.
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::Insert {
            at,
            text: text.into(),
        }
    }

    /// Creates a delete operation.
    pub fn delete(range: Range<usize>) -> Self {
        Self::Delete { range }
    }

    /// Creates a replace operation.
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self::Replace {
            range,
            text: text.into(),
        }
    }

    /// Returns the kind of this operation.
    pub fn kind(&self) -> EditKind {
        match self {
            Self::Insert { .. } => EditKind::Insert,
            Self::Delete { .. } => EditKind::Delete,
            Self::Replace { .. } => EditKind::Replace,
        }
    }

    /// Returns the range of original text this operation consumes. Inserts
    /// consume an empty range.
    pub fn range(&self) -> Range<usize> {
        match self {
            Self::Insert { at, .. } => *at..*at,
            Self::Delete { range } | Self::Replace { range, .. } => range.clone(),
        }
    }

    /// Returns the start offset in the original text.
    pub fn start(&self) -> usize {
        self.range().start
    }

    /// Returns the text this operation writes. Empty for deletions.
    pub fn text(&self) -> &str {
        match self {
            Self::Insert { text, .. } | Self::Replace { text, .. } => text,
            Self::Delete { .. } => "",
        }
    }
}

/// Converts located regions into fix operations, one per region, in ascending
/// order of their start offset.
pub fn synthesize(changes: &Changeset<'_>) -> Vec<FixOperation> {
    let mut ops: Vec<FixOperation> = changes
        .regions()
        .iter()
        .filter_map(|region| {
            let text = changes.new_text(region);
            match (region.old.is_empty(), text.is_empty()) {
                (true, true) => None,
                (true, false) => Some(FixOperation::insert(region.old.start, text)),
                (false, true) => Some(FixOperation::delete(region.old.clone())),
                (false, false) => Some(FixOperation::replace(region.old.clone(), text)),
            }
        })
        .collect();

    ops.sort_by_key(FixOperation::start);
    ops
}

/// Applies `ops` to `source`.
///
/// Operations may be given in any order; they must not overlap. Two inserts at
/// the same offset are rejected since their relative order is ambiguous.
pub fn apply_operations(source: &str, ops: &[FixOperation]) -> Result<String, EditError> {
    let mut sorted: Vec<&FixOperation> = ops.iter().collect();
    sorted.sort_by_key(|op| (op.start(), op.range().end));

    for op in &sorted {
        let range = op.range();
        if range.start > range.end || range.end > source.len() {
            return Err(EditError::OutOfBounds {
                range,
                len: source.len(),
            });
        }
        if !source.is_char_boundary(range.start) || !source.is_char_boundary(range.end) {
            return Err(EditError::NotCharBoundary { range });
        }
    }

    for pair in sorted.windows(2) {
        let (first, second) = (pair[0].range(), pair[1].range());
        let same_insert_point =
            first.is_empty() && second.is_empty() && first.start == second.start;
        if second.start < first.end || same_insert_point {
            return Err(EditError::Overlap { first, second });
        }
    }

    let mut result = source.to_string();
    for op in sorted.iter().rev() {
        result.replace_range(op.range(), op.text());
    }

    Ok(result)
}
