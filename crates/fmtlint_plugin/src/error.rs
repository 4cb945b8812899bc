//! Plugin error types.

use thiserror::Error;

/// Errors that can occur when configuring rules.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Rule options do not match the rule's schema.
    #[error("Invalid options for rule '{rule}': {message}")]
    InvalidOptions { rule: String, message: String },

    /// The rule id is not provided by any plugin.
    #[error("Rule not found: {0}")]
    UnknownRule(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PluginError {
    /// Creates an invalid options error.
    pub fn invalid_options(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Creates an unknown rule error.
    pub fn unknown_rule(name: impl Into<String>) -> Self {
        Self::UnknownRule(name.into())
    }
}
