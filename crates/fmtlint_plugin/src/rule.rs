//! Rule trait and metadata.

use serde::Serialize;

use crate::RuleContext;

/// What kind of problem a rule reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    /// Likely bugs.
    Problem,
    /// Better ways of doing things.
    Suggestion,
    /// Whitespace, semicolons, quotes and other presentation concerns.
    Layout,
}

/// What a rule's fixes may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fixable {
    Code,
    Whitespace,
}

/// Documentation metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleDocs {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub recommended: bool,
}

/// Static description of a rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleMeta {
    /// Rule name without the plugin prefix.
    pub name: String,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixable: Option<Fixable>,
    pub docs: RuleDocs,
    /// Message templates keyed by message id.
    pub messages: Vec<(String, String)>,
    /// JSON Schema for each positional option.
    pub schema: Vec<serde_json::Value>,
}

impl RuleMeta {
    /// Creates metadata with no fixes, messages or options.
    pub fn new(name: impl Into<String>, rule_type: RuleType) -> Self {
        Self {
            name: name.into(),
            rule_type,
            fixable: None,
            docs: RuleDocs::default(),
            messages: Vec::new(),
            schema: Vec::new(),
        }
    }

    /// Marks the rule as fixable.
    pub fn with_fixable(mut self, fixable: Fixable) -> Self {
        self.fixable = Some(fixable);
        self
    }

    /// Sets the documentation.
    pub fn with_docs(mut self, docs: RuleDocs) -> Self {
        self.docs = docs;
        self
    }

    /// Adds a message template.
    pub fn with_message(mut self, id: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.push((id.into(), template.into()));
        self
    }

    /// Sets the option schema.
    pub fn with_schema(mut self, schema: Vec<serde_json::Value>) -> Self {
        self.schema = schema;
        self
    }

    /// Looks up a message template by id.
    pub fn message(&self, id: &str) -> Option<&str> {
        self.messages
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, template)| template.as_str())
    }
}

/// A lint rule.
///
/// The host calls [`check`](Rule::check) once per file with a fresh context.
/// Rules must not keep per-file state between calls.
pub trait Rule: Send + Sync {
    /// Returns the rule's metadata.
    fn meta(&self) -> &RuleMeta;

    /// Inspects one file and reports through `ctx`.
    fn check(&self, ctx: &mut RuleContext<'_>);
}
