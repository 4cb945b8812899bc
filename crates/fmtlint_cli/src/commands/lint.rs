//! Lint command implementation

use std::env;
use std::path::PathBuf;

use fmtlint_core::{LintResult, Linter, LinterConfig, LinterError};
use miette::{IntoDiagnostic, Result};

use crate::cli::{Cli, OutputFormat};
use crate::fix::{FixSummary, output_fix_summary};
use crate::output::output_results;

pub fn run_lint(
    cli: &Cli,
    patterns: &[String],
    format: OutputFormat,
    fix: bool,
    dry_run: bool,
) -> Result<bool> {
    let cwd = env::current_dir().into_diagnostic()?;
    let config = LinterConfig::load(cli.config.as_deref(), &cwd).into_diagnostic()?;
    let linter = Linter::new(config).into_diagnostic()?;

    if fix {
        let files = linter.discover_files(patterns).into_diagnostic()?;
        let (outcomes, failures) = linter.fix_files(&files, dry_run).into_diagnostic()?;
        report_failures(&failures);

        if format == OutputFormat::Text {
            output_fix_summary(&FixSummary::from_outcomes(&outcomes), dry_run);
        }

        let results: Vec<LintResult> = outcomes
            .into_iter()
            .map(|(path, outcome)| LintResult::new(path, outcome.remaining))
            .collect();
        let has_errors = output_results(&results, format)?;
        return Ok(has_errors || !failures.is_empty());
    }

    let (results, failures) = linter.lint_patterns(patterns).into_diagnostic()?;
    report_failures(&failures);

    let has_errors = output_results(&results, format)?;

    Ok(has_errors || !failures.is_empty())
}

fn report_failures(failures: &[(PathBuf, LinterError)]) {
    if !failures.is_empty() {
        eprintln!("\n{} file(s) failed to lint:", failures.len());
        for (path, error) in failures {
            eprintln!("  {}: {}", path.display(), error);
        }
    }
}
