//! Formatter invocation errors.

use std::time::Duration;

use thiserror::Error;

/// Errors that prevent the formatter from producing a result.
///
/// Syntax errors found by the formatter are not errors here; they come back as
/// [`FormatResult::errors`](crate::FormatResult::errors).
#[derive(Debug, Error)]
pub enum FormatterError {
    /// The formatter process could not be started.
    #[error("Failed to spawn formatter '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The formatter process exited unsuccessfully.
    #[error("Formatter exited with {status}: {stderr}")]
    Process { status: String, stderr: String },

    /// The formatter answered with something that is not a result.
    #[error("Invalid formatter response: {0}")]
    Protocol(String),

    /// The bridge has shut down or its worker died.
    #[error("Formatter bridge disconnected")]
    Disconnected,

    /// The formatter did not answer in time.
    #[error("Formatter timed out after {0:?}")]
    Timeout(Duration),

    /// The formatter panicked.
    #[error("Formatter panicked: {0}")]
    Panicked(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FormatterError {
    /// Creates a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }
}
