//! # fmtlint_formatter
//!
//! Invocation of the external formatter.
//!
//! The formatter is a text-to-text transformer:
//! `format(filename, text, options) -> {code, errors}`. It may be asynchronous
//! or run out of process, while lint rules run synchronously. This crate hides
//! the difference:
//!
//! - [`Formatter`]: the synchronous interface rules call
//! - [`AsyncFormatter`]: the interface formatter backends implement
//! - [`SyncBridge`]: a worker pool that runs an [`AsyncFormatter`] and blocks
//!   the caller until its result is ready
//! - [`ProcessFormatter`]: a backend speaking JSON over a child process's stdio
//! - [`shared_formatter`]: one bridge per settings, released by
//!   [`shutdown_shared_formatters`]
//!
//! ## Example
//!
//! ```rust
//! use fmtlint_formatter::{FnFormatter, FormatRequest, FormatResult, Formatter};
//!
//! let formatter = FnFormatter(|request: FormatRequest| {
//!     Ok(FormatResult::code(format!("{};", request.source_text)))
//! });
//!
//! let result = formatter
//!     .format(FormatRequest::new("a.js", "f()", Default::default()))
//!     .unwrap();
//! assert_eq!(result.code, "f();");
//! ```

mod bridge;
mod error;
mod formatter;
mod process;
mod protocol;
mod registry;

pub use bridge::{BridgeOptions, SyncBridge};
pub use error::FormatterError;
pub use formatter::{AsyncFormatter, FnFormatter, Formatter};
pub use process::ProcessFormatter;
pub use protocol::{ErrorLabel, FormatDiagnostic, FormatOptions, FormatRequest, FormatResult};
pub use registry::{FormatterSettings, shared_formatter, shutdown_shared_formatters};
