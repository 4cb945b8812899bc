//! JSON output formatter
//!
//! One entry per file, with the diagnostics and their counts by severity.

use fmtlint_core::{Diagnostic, LintResult, Severity};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileReport<'a> {
    path: String,
    error_count: usize,
    warning_count: usize,
    fixable_count: usize,
    diagnostics: &'a [Diagnostic],
}

impl<'a> From<&'a LintResult> for FileReport<'a> {
    fn from(result: &'a LintResult) -> Self {
        Self {
            path: result.path.display().to_string(),
            error_count: result.count(Severity::Error),
            warning_count: result.count(Severity::Warning),
            fixable_count: result.fixable_count(),
            diagnostics: &result.diagnostics,
        }
    }
}

fn render(results: &[LintResult]) -> Result<String> {
    let reports: Vec<FileReport<'_>> = results.iter().map(FileReport::from).collect();
    serde_json::to_string_pretty(&reports).into_diagnostic()
}

pub fn output_json(results: &[LintResult]) -> Result<()> {
    println!("{}", render(results)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmtlint_core::{Fix, Span};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn renders_counts_and_fixes_per_file() {
        let results = vec![
            LintResult::new(
                PathBuf::from("a.js"),
                vec![
                    Diagnostic::new("oxfmt/oxfmt", "Insert `;`", Span::empty(9))
                        .with_fix(Fix::insert(9, ";")),
                    Diagnostic::new("oxfmt/oxfmt", "Unexpected token", Span::new(2, 3))
                        .with_severity(Severity::Warning),
                ],
            ),
            LintResult::new(PathBuf::from("b.js"), Vec::new()),
        ];

        let value: serde_json::Value = serde_json::from_str(&render(&results).unwrap()).unwrap();

        assert_eq!(value[0]["path"], "a.js");
        assert_eq!(value[0]["errorCount"], 1);
        assert_eq!(value[0]["warningCount"], 1);
        assert_eq!(value[0]["fixableCount"], 1);
        assert_eq!(value[0]["diagnostics"][0]["fix"]["text"], ";");
        assert_eq!(value[0]["diagnostics"][1]["span"]["start"], 2);
        assert_eq!(value[1]["errorCount"], 0);
        assert_eq!(value[1]["diagnostics"], serde_json::json!([]));
    }

    #[test]
    fn no_results_render_an_empty_array() {
        assert_eq!(render(&[]).unwrap(), "[]");
    }
}
