//! # fmtlint_ast
//!
//! Source position types for fmtlint.
//!
//! Offsets are UTF-8 byte offsets into the original source text. Locations use
//! 1-indexed lines and 0-indexed columns, the convention lint hosts report in.
//!
//! ## Example
//!
//! ```rust
//! use fmtlint_ast::{LineIndex, Position, Span};
//!
//! let index = LineIndex::new("let a = 1\nlet b = 2\n");
//!
//! assert_eq!(index.position(10), Position::new(2, 0));
//! assert_eq!(index.location(Span::new(4, 5)).start, Position::new(1, 4));
//! ```

mod line_index;
mod span;

pub use line_index::LineIndex;
pub use span::{Location, Position, Span};
