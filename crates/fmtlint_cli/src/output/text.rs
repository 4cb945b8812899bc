//! Text output formatter

use fmtlint_core::{Diagnostic, LintResult, LintSummary};

pub fn output_text(results: &[LintResult]) {
    for result in results {
        if result.diagnostics.is_empty() {
            continue;
        }

        println!("\n{}:", result.path.display());
        for diag in &result.diagnostics {
            println!("  {}", format_diagnostic(diag));
        }
    }

    let summary = LintSummary::from_results(results);

    println!();
    println!(
        "Checked {} files, found {} issues",
        summary.files_checked, summary.total_diagnostics
    );
}

/// Formats one diagnostic as `line:column severity [rule] message`.
fn format_diagnostic(diag: &Diagnostic) -> String {
    let (line, column) = match diag.loc {
        Some(loc) => (loc.start.line, loc.start.column),
        None => (1, diag.span.start),
    };
    format!(
        "{}:{} {} [{}] {}",
        line,
        column,
        diag.severity.as_str(),
        diag.rule_id,
        diag.message
    )
}
