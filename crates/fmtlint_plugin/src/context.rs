//! Per-file rule context.

use std::cell::OnceCell;

use fmtlint_ast::{LineIndex, Location, Span};
use tracing::warn;

use crate::{Diagnostic, Fix, RuleMeta, Severity, interpolate};

/// The message of a [`Report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportMessage {
    /// A literal message.
    Text(String),
    /// A template from the rule's metadata, filled with `data`.
    Id {
        id: String,
        data: Vec<(String, String)>,
    },
}

/// A violation as described by a rule, before the host turns it into a
/// [`Diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    message: ReportMessage,
    span: Span,
    loc: Option<Location>,
    fix: Option<Fix>,
}

impl Report {
    /// Creates a report with a literal message at the start of the file.
    pub fn message(text: impl Into<String>) -> Self {
        Self::with(ReportMessage::Text(text.into()))
    }

    /// Creates a report using the message template `id`.
    pub fn message_id(id: impl Into<String>) -> Self {
        Self::with(ReportMessage::Id {
            id: id.into(),
            data: Vec::new(),
        })
    }

    fn with(message: ReportMessage) -> Self {
        Self {
            message,
            span: Span::empty(0),
            loc: None,
            fix: None,
        }
    }

    /// Adds a template value. Ignored for literal messages.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let ReportMessage::Id { data, .. } = &mut self.message {
            data.push((key.into(), value.into()));
        }
        self
    }

    /// Sets the byte span. The location is derived from it unless set
    /// explicitly.
    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Sets an explicit location.
    pub fn loc(mut self, loc: Location) -> Self {
        self.loc = Some(loc);
        self
    }

    /// Attaches a fix.
    pub fn fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }
}

/// Everything a rule sees while checking one file.
pub struct RuleContext<'a> {
    rule_id: &'a str,
    meta: &'a RuleMeta,
    filename: &'a str,
    source: &'a str,
    options: &'a [serde_json::Value],
    severity: Severity,
    /// Built on first use; most clean files never need it.
    line_index: OnceCell<LineIndex>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> RuleContext<'a> {
    /// Creates a context for one rule run over one file.
    pub fn new(
        rule_id: &'a str,
        meta: &'a RuleMeta,
        filename: &'a str,
        source: &'a str,
        options: &'a [serde_json::Value],
        severity: Severity,
    ) -> Self {
        Self {
            rule_id,
            meta,
            filename,
            source,
            options,
            severity,
            line_index: OnceCell::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Returns the full rule id (`plugin/rule`).
    pub fn rule_id(&self) -> &'a str {
        self.rule_id
    }

    /// Returns the file name as given by the host.
    pub fn filename(&self) -> &'a str {
        self.filename
    }

    /// Returns the source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the configured rule options.
    pub fn options(&self) -> &'a [serde_json::Value] {
        self.options
    }

    /// Returns the line index of the source text.
    pub fn line_index(&self) -> &LineIndex {
        self.line_index.get_or_init(|| LineIndex::new(self.source))
    }

    /// Converts a byte span to a location.
    pub fn location(&self, span: Span) -> Location {
        self.line_index().location(span)
    }

    /// Records a violation.
    pub fn report(&mut self, report: Report) {
        let (message, message_id) = match report.message {
            ReportMessage::Text(text) => (text, None),
            ReportMessage::Id { id, data } => match self.meta.message(&id) {
                Some(template) => (interpolate(template, &data), Some(id)),
                None => {
                    warn!("Rule '{}' reported unknown message id '{}'", self.rule_id, id);
                    (id.clone(), Some(id))
                }
            },
        };

        let loc = report.loc.unwrap_or_else(|| self.location(report.span));

        let mut diagnostic = Diagnostic::new(self.rule_id, message, report.span)
            .with_severity(self.severity)
            .with_location(loc);
        diagnostic.message_id = message_id;
        diagnostic.fix = report.fix;

        self.diagnostics.push(diagnostic);
    }

    /// Returns the violations reported so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the context, returning the reported violations.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleType;
    use fmtlint_ast::Position;

    fn meta() -> RuleMeta {
        RuleMeta::new("demo", RuleType::Layout)
            .with_message("insert", "Insert `{{ insertText }}`")
    }

    #[test]
    fn report_with_literal_message_derives_location() {
        let meta = meta();
        let mut ctx = RuleContext::new("demo/demo", &meta, "a.js", "ab\ncd", &[], Severity::Warning);

        ctx.report(Report::message("Something").span(Span::new(3, 5)));

        let diags = ctx.into_diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_id, "demo/demo");
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].message_id, None);
        assert_eq!(
            diags[0].loc,
            Some(Location::new(Position::new(2, 0), Position::new(2, 2)))
        );
    }

    #[test]
    fn report_with_message_id_interpolates() {
        let meta = meta();
        let mut ctx = RuleContext::new("demo/demo", &meta, "a.js", "x", &[], Severity::Error);

        ctx.report(
            Report::message_id("insert")
                .data("insertText", ";")
                .span(Span::empty(1))
                .fix(Fix::insert(1, ";")),
        );

        let diag = &ctx.diagnostics()[0];
        assert_eq!(diag.message, "Insert `;`");
        assert_eq!(diag.message_id.as_deref(), Some("insert"));
        assert_eq!(diag.fix, Some(Fix::insert(1, ";")));
    }

    #[test]
    fn unknown_message_id_falls_back_to_id() {
        let meta = meta();
        let mut ctx = RuleContext::new("demo/demo", &meta, "a.js", "x", &[], Severity::Error);

        ctx.report(Report::message_id("missing"));

        assert_eq!(ctx.diagnostics()[0].message, "missing");
    }

    #[test]
    fn explicit_location_wins() {
        let meta = meta();
        let mut ctx = RuleContext::new("demo/demo", &meta, "a.js", "ab\ncd", &[], Severity::Error);

        ctx.report(
            Report::message("Parse error")
                .span(Span::new(3, 4))
                .loc(Location::file_start()),
        );

        assert_eq!(ctx.diagnostics()[0].loc, Some(Location::file_start()));
    }

    #[test]
    fn data_is_ignored_for_literal_messages() {
        let report = Report::message("plain").data("k", "v");
        assert_eq!(report.message, ReportMessage::Text("plain".to_string()));
    }

    #[test]
    fn exposes_file_information() {
        let meta = meta();
        let options = [serde_json::json!({ "semi": false })];
        let ctx = RuleContext::new("demo/demo", &meta, "src/a.js", "x", &options, Severity::Error);

        assert_eq!(ctx.filename(), "src/a.js");
        assert_eq!(ctx.source(), "x");
        assert_eq!(ctx.options()[0]["semi"], false);
        assert_eq!(ctx.line_index().line_count(), 1);
    }
}
