//! # fmtlint_core
//!
//! Core linter engine for fmtlint.
//!
//! This crate provides:
//! - The `oxfmt/oxfmt` rule, which reports where a file differs from its
//!   formatted form
//! - The main `Linter` orchestrator
//! - Configuration loading
//! - File discovery and filtering
//! - Parallel processing and multi-pass fixing
//!
//! ## Example
//!
//! ```rust,ignore
//! use fmtlint_core::{Linter, LinterConfig};
//!
//! let config = LinterConfig::from_file(".fmtlint.json")?;
//! let linter = Linter::new(config)?;
//!
//! let (results, _failures) = linter.lint_patterns(&["src".to_string()])?;
//! for result in results {
//!     println!("{}: {} issues", result.path.display(), result.diagnostics.len());
//! }
//! ```

mod config;
mod error;
pub mod file_finder;
mod fix;
mod fixer;
pub mod format_config;
mod linter;
pub mod options;
pub mod parser;
pub mod plugin;
pub mod reporter;
mod result;
pub mod rules;

pub use config::{DEFAULT_MAX_FIX_PASSES, LinterConfig, RuleEntry, RuleLevel};
pub use error::LinterError;
pub use fix::{FixCoordinator, FixResult};
pub use fixer::{FixerResult, apply_fixes_to_content};
pub use linter::{FixFilesResult, LintFilesResult, Linter};
pub use result::{FixOutcome, LintResult, LintSummary};

pub use fmtlint_ast::{Location, Position, Span};
pub use fmtlint_diff::Granularity;
pub use fmtlint_plugin::{Diagnostic, Fix, Severity};
