//! # fmtlint_diff
//!
//! Turns "original text" plus "formatted text" into a list of independent,
//! position-addressed edits.
//!
//! This crate provides:
//! - [`locate`]: finds the changed regions between two texts
//! - [`synthesize`]: converts the regions into insert/delete/replace operations
//! - [`apply_operations`]: applies operations back onto the original text
//!
//! ## Example
//!
//! ```rust
//! use fmtlint_diff::{FixOperation, apply_operations, locate, synthesize};
//!
//! let original = "const isOdd = (n) => n % 2 === 1;";
//! let formatted = "const isOdd = n => n % 2 === 1;";
//!
//! let changes = locate(original, formatted);
//! let ops = synthesize(&changes);
//!
//! assert_eq!(ops, vec![FixOperation::delete(14..15), FixOperation::delete(16..17)]);
//! assert_eq!(apply_operations(original, &ops).unwrap(), formatted);
//! ```

mod edit;
mod error;
mod locate;

pub use edit::{EditKind, FixOperation, apply_operations, synthesize};
pub use error::EditError;
pub use locate::{
    CHAR_DIFF_LIMIT, Changeset, DEFAULT_DEADLINE, DiffOptions, DiffRegion, Granularity, locate,
    locate_with,
};
