//! Formatter traits.

use std::future::Future;

use crate::{FormatRequest, FormatResult, FormatterError};

/// A synchronous formatter.
///
/// This is what lint rules call. Implementations must be shareable across the
/// threads of a parallel lint run.
pub trait Formatter: Send + Sync {
    /// Formats one file.
    fn format(&self, request: FormatRequest) -> Result<FormatResult, FormatterError>;
}

/// A formatter backend that completes asynchronously.
///
/// Run it behind a [`SyncBridge`](crate::SyncBridge) to get a [`Formatter`].
pub trait AsyncFormatter: Send + Sync + 'static {
    /// Formats one file.
    fn format(
        &self,
        request: FormatRequest,
    ) -> impl Future<Output = Result<FormatResult, FormatterError>> + Send;
}

/// A [`Formatter`] backed by a closure.
pub struct FnFormatter<F>(pub F);

impl<F> Formatter for FnFormatter<F>
where
    F: Fn(FormatRequest) -> Result<FormatResult, FormatterError> + Send + Sync,
{
    fn format(&self, request: FormatRequest) -> Result<FormatResult, FormatterError> {
        (self.0)(request)
    }
}

impl<T: Formatter + ?Sized> Formatter for std::sync::Arc<T> {
    fn format(&self, request: FormatRequest) -> Result<FormatResult, FormatterError> {
        (**self).format(request)
    }
}
