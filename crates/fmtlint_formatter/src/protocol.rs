//! Formatter request and response types.
//!
//! These are also the JSON documents exchanged with a process formatter: the
//! request is written to its stdin, the result read from its stdout.

use serde::{Deserialize, Serialize};

/// Formatter options, passed through verbatim.
pub type FormatOptions = serde_json::Map<String, serde_json::Value>;

/// One formatting request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatRequest {
    pub filename: String,
    pub source_text: String,
    #[serde(default)]
    pub options: FormatOptions,
}

impl FormatRequest {
    /// Creates a request.
    pub fn new(
        filename: impl Into<String>,
        source_text: impl Into<String>,
        options: FormatOptions,
    ) -> Self {
        Self {
            filename: filename.into(),
            source_text: source_text.into(),
            options,
        }
    }
}

/// The formatter's answer.
///
/// When `errors` is non-empty the formatter could not format the file and
/// `code` is meaningless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatResult {
    pub code: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FormatDiagnostic>,
}

impl FormatResult {
    /// A successful result.
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            errors: Vec::new(),
        }
    }

    /// A result carrying formatter-reported errors.
    pub fn errors(errors: Vec<FormatDiagnostic>) -> Self {
        Self {
            code: String::new(),
            errors,
        }
    }

    /// Returns true if the formatter reported errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A problem the formatter found in the source, such as a syntax error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatDiagnostic {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<ErrorLabel>,
}

impl FormatDiagnostic {
    /// Creates a diagnostic without a source range.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            labels: Vec::new(),
        }
    }

    /// Adds a labelled source range.
    pub fn with_label(mut self, start: u32, end: u32) -> Self {
        self.labels.push(ErrorLabel { start, end });
        self
    }

    /// Returns the first label, which locates the error.
    pub fn primary_label(&self) -> Option<&ErrorLabel> {
        self.labels.first()
    }
}

/// A byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLabel {
    pub start: u32,
    pub end: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn request_uses_camel_case() {
        let mut options = FormatOptions::new();
        options.insert("semi".to_string(), serde_json::Value::Bool(false));
        let request = FormatRequest::new("a.js", "x", options);

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "filename": "a.js",
                "sourceText": "x",
                "options": { "semi": false }
            })
        );
    }

    #[test]
    fn result_without_errors() {
        let result: FormatResult = serde_json::from_str(r#"{ "code": "x;\n" }"#).unwrap();

        assert_eq!(result, FormatResult::code("x;\n"));
        assert!(!result.has_errors());
    }

    #[test]
    fn result_with_labelled_errors_ignores_unknown_fields() {
        let json = r#"{
            "code": "",
            "errors": [
                { "message": "Unexpected token", "severity": "Error", "labels": [{ "start": 4, "end": 5 }] },
                { "message": "Something else" }
            ]
        }"#;
        let result: FormatResult = serde_json::from_str(json).unwrap();

        assert!(result.has_errors());
        assert_eq!(
            result.errors[0].primary_label(),
            Some(&ErrorLabel { start: 4, end: 5 })
        );
        assert_eq!(result.errors[1].primary_label(), None);
    }

    #[test]
    fn diagnostic_builder() {
        let diag = FormatDiagnostic::new("Expected `;`").with_label(1, 2).with_label(5, 6);

        assert_eq!(diag.labels.len(), 2);
        assert_eq!(diag.primary_label(), Some(&ErrorLabel { start: 1, end: 2 }));
    }
}
