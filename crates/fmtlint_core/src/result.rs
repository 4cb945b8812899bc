//! Lint result types.

use std::path::PathBuf;

use fmtlint_plugin::{Diagnostic, Severity};
use serde::Serialize;

use crate::fix::FixResult;

/// Result of linting a single file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LintResult {
    /// Path to the linted file.
    pub path: PathBuf,

    /// Diagnostics found in the file, ordered by position.
    pub diagnostics: Vec<Diagnostic>,
}

impl LintResult {
    pub fn new(path: PathBuf, diagnostics: Vec<Diagnostic>) -> Self {
        Self { path, diagnostics }
    }

    /// Returns true if there are any diagnostics.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Returns the number of diagnostics with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Returns the number of diagnostics carrying a fix.
    pub fn fixable_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_fixable()).count()
    }
}

/// Result of fixing one text.
#[derive(Debug, Clone, PartialEq)]
pub struct FixOutcome {
    /// Text after all passes.
    pub output: String,
    /// Whether the text differs from the input.
    pub modified: bool,
    /// Number of fixes applied over all passes.
    pub fixes_applied: usize,
    /// Diagnostics remaining in `output`.
    pub remaining: Vec<Diagnostic>,
    /// How the passes ended.
    pub status: FixResult,
}

/// Summary of linting multiple files.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LintSummary {
    /// Total files processed.
    pub files_checked: usize,
    /// Total diagnostics found.
    pub total_diagnostics: usize,
    /// Diagnostics that can be fixed automatically.
    pub fixable: usize,
    /// Files with at least one diagnostic.
    pub files_with_errors: usize,
}

impl LintSummary {
    pub fn from_results(results: &[LintResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            summary.files_checked += 1;
            summary.total_diagnostics += result.diagnostics.len();
            summary.fixable += result.fixable_count();
            if result.has_errors() {
                summary.files_with_errors += 1;
            }
            summary
        })
    }
}
