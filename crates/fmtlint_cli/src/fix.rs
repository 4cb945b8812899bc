//! Fix summary reporting

use std::path::PathBuf;

use fmtlint_core::{FixOutcome, FixResult};

/// Summary of applied fixes.
#[derive(Debug, Default, PartialEq)]
pub struct FixSummary {
    pub total_fixes: usize,
    pub files_fixed: usize,
    pub fixes_by_file: Vec<(PathBuf, usize)>,
    /// Files whose passes stopped before converging.
    pub unconverged: Vec<(PathBuf, FixResult)>,
}

impl FixSummary {
    pub fn from_outcomes(outcomes: &[(PathBuf, FixOutcome)]) -> Self {
        let mut summary = Self::default();

        for (path, outcome) in outcomes {
            if outcome.modified {
                summary.fixes_by_file.push((path.clone(), outcome.fixes_applied));
                summary.total_fixes += outcome.fixes_applied;
                summary.files_fixed += 1;
            }
            if !outcome.status.converged() {
                summary.unconverged.push((path.clone(), outcome.status));
            }
        }

        summary
    }
}

/// Outputs the fix summary.
pub fn output_fix_summary(summary: &FixSummary, dry_run: bool) {
    if summary.total_fixes == 0 && summary.unconverged.is_empty() {
        println!("No fixable issues found.");
        return;
    }

    if summary.total_fixes > 0 {
        let action = if dry_run { "Would fix" } else { "Fixed" };

        println!(
            "\n{} {} issues in {} files:",
            action, summary.total_fixes, summary.files_fixed
        );
        for (path, count) in &summary.fixes_by_file {
            println!("  {}: {} fixes", path.display(), count);
        }

        if dry_run {
            println!("\nRun without --dry-run to apply fixes.");
        }
    }

    for (path, status) in &summary.unconverged {
        match status {
            FixResult::CycleDetected { cycle_length } => eprintln!(
                "  {}: fixes cycle with period {}",
                path.display(),
                cycle_length
            ),
            FixResult::MaxPassesReached { passes } => eprintln!(
                "  {}: still changing after {} passes",
                path.display(),
                passes
            ),
            FixResult::Converged { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn outcome(fixes_applied: usize, status: FixResult) -> FixOutcome {
        FixOutcome {
            output: String::new(),
            modified: fixes_applied > 0,
            fixes_applied,
            remaining: Vec::new(),
            status,
        }
    }

    #[test]
    fn summarizes_outcomes() {
        let outcomes = vec![
            (PathBuf::from("a.js"), outcome(3, FixResult::Converged { passes: 2 })),
            (PathBuf::from("b.js"), outcome(0, FixResult::Converged { passes: 1 })),
            (
                PathBuf::from("c.js"),
                outcome(4, FixResult::CycleDetected { cycle_length: 2 }),
            ),
        ];

        let summary = FixSummary::from_outcomes(&outcomes);

        assert_eq!(summary.total_fixes, 7);
        assert_eq!(summary.files_fixed, 2);
        assert_eq!(
            summary.fixes_by_file,
            vec![(PathBuf::from("a.js"), 3), (PathBuf::from("c.js"), 4)]
        );
        assert_eq!(
            summary.unconverged,
            vec![(
                PathBuf::from("c.js"),
                FixResult::CycleDetected { cycle_length: 2 }
            )]
        );
    }
}
