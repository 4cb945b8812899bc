//! Diagnostic types for lint results.

use fmtlint_ast::{Location, Span};
use serde::{Deserialize, Serialize};

/// Severity level for diagnostics.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed.
    #[default]
    Error,
    /// Warning - should be reviewed.
    Warning,
    /// Info - informational message.
    Info,
}

impl Severity {
    /// Returns the lowercase name used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// A diagnostic message from a lint rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The rule that generated this diagnostic.
    pub rule_id: String,

    /// The diagnostic message.
    pub message: String,

    /// The message template id, when the message came from rule metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    /// Byte span in the source.
    pub span: Span,

    /// Line/column location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<Location>,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// Optional fix for this diagnostic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    pub fn new(rule_id: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Self {
            rule_id: rule_id.into(),
            message: message.into(),
            message_id: None,
            span,
            loc: None,
            severity: Severity::Error,
            fix: None,
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, loc: Location) -> Self {
        self.loc = Some(loc);
        self
    }

    /// Sets the message template id.
    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    /// Sets an auto-fix.
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Returns true if this diagnostic carries a fix.
    pub fn is_fixable(&self) -> bool {
        self.fix.is_some()
    }
}

/// An auto-fix for a diagnostic: replace `span` with `text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fix {
    /// The byte span to replace.
    pub span: Span,

    /// The replacement text.
    pub text: String,
}

impl Fix {
    /// Creates a new fix.
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }

    /// Creates a fix that inserts text at a position.
    pub fn insert(offset: u32, text: impl Into<String>) -> Self {
        Self {
            span: Span::empty(offset),
            text: text.into(),
        }
    }

    /// Creates a fix that deletes a span.
    pub fn delete(span: Span) -> Self {
        Self {
            span,
            text: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmtlint_ast::Position;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new("oxfmt/oxfmt", "Insert `;`", Span::new(0, 0));

        assert_eq!(diag.rule_id, "oxfmt/oxfmt");
        assert_eq!(diag.message, "Insert `;`");
        assert_eq!(diag.severity, Severity::Error);
        assert!(!diag.is_fixable());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let fix = Fix::insert(26, ";");
        let loc = Location::new(Position::new(1, 26), Position::new(1, 26));

        let diag = Diagnostic::new("oxfmt/oxfmt", "Insert `;`", Span::empty(26))
            .with_severity(Severity::Warning)
            .with_location(loc)
            .with_message_id("insert")
            .with_fix(fix);

        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.loc, Some(loc));
        assert_eq!(diag.message_id.as_deref(), Some("insert"));
        assert!(diag.is_fixable());
    }

    #[test]
    fn test_fix_insert() {
        let fix = Fix::insert(10, "inserted");

        assert_eq!(fix.span, Span::new(10, 10));
        assert_eq!(fix.text, "inserted");
    }

    #[test]
    fn test_fix_delete() {
        let fix = Fix::delete(Span::new(5, 15));

        assert_eq!(fix.span, Span::new(5, 15));
        assert!(fix.text.is_empty());
    }

    #[test]
    fn test_severity_default_and_names() {
        assert_eq!(Severity::default(), Severity::Error);
        assert_eq!(Severity::Error.as_str(), "error");
        assert_eq!(Severity::Warning.as_str(), "warning");
        assert_eq!(Severity::Info.as_str(), "info");
    }

    #[test]
    fn test_diagnostic_serialization_skips_empty_fields() {
        let diag = Diagnostic::new("oxfmt/oxfmt", "Failed to format file a.js", Span::empty(0));
        let json = serde_json::to_value(&diag).unwrap();

        assert_eq!(json["rule_id"], "oxfmt/oxfmt");
        assert_eq!(json["severity"], "error");
        assert!(json.get("fix").is_none());
        assert!(json.get("message_id").is_none());
    }

    #[test]
    fn test_diagnostic_deserialization() {
        let json = r#"{
            "rule_id": "oxfmt/oxfmt",
            "message": "Delete `;`",
            "span": { "start": 21, "end": 22 },
            "fix": { "span": { "start": 21, "end": 22 }, "text": "" }
        }"#;

        let diag: Diagnostic = serde_json::from_str(json).unwrap();

        assert_eq!(diag.span, Span::new(21, 22));
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.fix, Some(Fix::delete(Span::new(21, 22))));
    }

    #[test]
    fn test_diagnostic_sorting_and_deduplication() {
        let first = Diagnostic::new("r", "m", Span::new(5, 15));
        let second = Diagnostic::new("r", "m", Span::new(10, 20));

        let mut diagnostics = vec![second.clone(), first.clone(), second.clone()];
        diagnostics.sort();
        diagnostics.dedup();
        diagnostics.sort_by_key(|d| d.span.start);

        assert_eq!(diagnostics, vec![first, second]);
    }
}
