//! Output formatting module

mod json;
mod text;

use fmtlint_core::LintResult;
use miette::Result;

use crate::cli::OutputFormat;

/// Prints `results` and returns whether any file has diagnostics.
pub fn output_results(results: &[LintResult], format: OutputFormat) -> Result<bool> {
    let has_errors = results.iter().any(|r| r.has_errors());

    match format {
        OutputFormat::Json => json::output_json(results)?,
        OutputFormat::Text => text::output_text(results),
    }

    Ok(has_errors)
}
