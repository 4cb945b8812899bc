//! The `oxfmt/oxfmt` rule: reports every place where a file differs from
//! what the formatter would produce.

use std::sync::{Arc, OnceLock};

use fmtlint_ast::{Location, Span};
use fmtlint_diff::DiffOptions;
use fmtlint_formatter::{
    FormatDiagnostic, FormatOptions, FormatRequest, Formatter, FormatterError, FormatterSettings,
    shared_formatter,
};
use fmtlint_plugin::{Fixable, Report, Rule, RuleContext, RuleDocs, RuleMeta, RuleType};
use tracing::warn;

use crate::format_config::merge_options;
use crate::options::{FORMAT_OPTIONS, options_schema};
use crate::reporter::{MESSAGES, report_differences};

/// Rule name within the plugin.
pub const NAME: &str = "oxfmt";

/// Builds the rule's metadata.
pub fn rule_meta() -> RuleMeta {
    MESSAGES
        .iter()
        .fold(RuleMeta::new(NAME, RuleType::Layout), |meta, (id, template)| {
            meta.with_message(*id, *template)
        })
        .with_fixable(Fixable::Code)
        .with_docs(RuleDocs {
            description: "Format code via oxfmt".to_string(),
            url: Some("https://github.com/ntnyq/eslint-plugin-oxfmt".to_string()),
            recommended: true,
        })
        .with_schema(vec![options_schema(FORMAT_OPTIONS)])
}

/// Formats each file and reports the differences.
pub struct OxfmtRule {
    meta: RuleMeta,
    settings: FormatterSettings,
    base_options: FormatOptions,
    diff_options: DiffOptions,
    /// Bound on the first check.
    formatter: OnceLock<Arc<dyn Formatter>>,
}

impl OxfmtRule {
    /// Creates a rule that talks to the formatter described by `settings`.
    pub fn new(settings: FormatterSettings) -> Self {
        Self {
            meta: rule_meta(),
            settings,
            base_options: FormatOptions::new(),
            diff_options: DiffOptions::default(),
            formatter: OnceLock::new(),
        }
    }

    /// Creates a rule bound to a specific formatter.
    pub fn with_formatter(formatter: Arc<dyn Formatter>) -> Self {
        let rule = Self::new(FormatterSettings::default());
        // A fresh OnceLock is always empty.
        let _ = rule.formatter.set(formatter);
        rule
    }

    /// Sets options applied under the rule's own options.
    pub fn with_base_options(mut self, base_options: FormatOptions) -> Self {
        self.base_options = base_options;
        self
    }

    pub fn with_diff_options(mut self, diff_options: DiffOptions) -> Self {
        self.diff_options = diff_options;
        self
    }

    fn formatter(&self) -> Result<&Arc<dyn Formatter>, FormatterError> {
        if let Some(formatter) = self.formatter.get() {
            return Ok(formatter);
        }
        let bridge: Arc<dyn Formatter> = shared_formatter(&self.settings)?;
        Ok(self.formatter.get_or_init(|| bridge))
    }
}

impl Rule for OxfmtRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, ctx: &mut RuleContext<'_>) {
        let source = ctx.source();
        let options = merge_options(&self.base_options, ctx.options().first());
        let request = FormatRequest::new(ctx.filename(), source, options);

        match self.formatter().and_then(|formatter| formatter.format(request)) {
            Ok(result) if result.has_errors() => {
                for error in &result.errors {
                    report_format_error(ctx, error);
                }
            }
            Ok(result) => report_differences(ctx, source, &result.code, &self.diff_options),
            Err(err) => {
                warn!("Failed to format {}: {}", ctx.filename(), err);
                let message = format!("Failed to format file {}", ctx.filename());
                ctx.report(Report::message(message).loc(Location::file_start()));
            }
        }
    }
}

/// Reports an error the formatter found in the source, without a fix.
fn report_format_error(ctx: &mut RuleContext<'_>, error: &FormatDiagnostic) {
    let report = Report::message(error.message.clone());
    let report = match error.primary_label() {
        Some(label) => report.span(Span::new(label.start, label.end.max(label.start))),
        None => report.loc(Location::file_start()),
    };
    ctx.report(report);
}
