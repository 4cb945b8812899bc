//! Built-in rules.

pub mod oxfmt;

pub use oxfmt::OxfmtRule;
