//! Synchronous bridge over an asynchronous formatter.
//!
//! Callers hand a request to a pool of worker threads through one shared
//! queue and block on a private reply channel. Each worker owns a
//! current-thread tokio runtime and drives one formatting future at a time, so
//! the pool size bounds the number of concurrent formatter invocations.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, warn};

use crate::{AsyncFormatter, FormatRequest, FormatResult, Formatter, FormatterError};

type Reply = Result<FormatResult, FormatterError>;

struct Job {
    request: FormatRequest,
    reply: Sender<Reply>,
}

/// Bridge configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeOptions {
    /// Number of worker threads. At least one is always started.
    pub workers: usize,
    /// Upper bound for a single invocation.
    pub timeout: Option<Duration>,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            workers: 1,
            timeout: None,
        }
    }
}

impl BridgeOptions {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A [`Formatter`] that runs an [`AsyncFormatter`] on background workers.
///
/// Dropping the bridge closes the queue and joins the workers after they
/// finish their current job.
pub struct SyncBridge {
    queue: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl SyncBridge {
    /// Starts the worker pool.
    pub fn new<F: AsyncFormatter>(
        formatter: F,
        options: BridgeOptions,
    ) -> Result<Self, FormatterError> {
        let formatter = Arc::new(formatter);
        let (queue, jobs) = crossbeam_channel::unbounded::<Job>();
        let count = options.workers.max(1);
        let mut workers = Vec::with_capacity(count);

        for index in 0..count {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let jobs = jobs.clone();
            let formatter = Arc::clone(&formatter);
            let timeout = options.timeout;

            let handle = thread::Builder::new()
                .name(format!("fmtlint-formatter-{index}"))
                .spawn(move || run_worker(runtime, formatter.as_ref(), jobs, timeout))?;
            workers.push(handle);
        }

        debug!("Started formatter bridge with {} worker(s)", count);

        Ok(Self {
            queue: Some(queue),
            workers,
        })
    }

    /// Returns the number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

impl Formatter for SyncBridge {
    fn format(&self, request: FormatRequest) -> Result<FormatResult, FormatterError> {
        let queue = self.queue.as_ref().ok_or(FormatterError::Disconnected)?;
        let (reply, result) = crossbeam_channel::bounded(1);

        queue
            .send(Job { request, reply })
            .map_err(|_| FormatterError::Disconnected)?;

        result.recv().map_err(|_| FormatterError::Disconnected)?
    }
}

impl Drop for SyncBridge {
    fn drop(&mut self) {
        // Closing the queue ends every worker loop.
        self.queue.take();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                warn!("Formatter worker thread panicked during shutdown");
            }
        }
    }
}

fn run_worker<F: AsyncFormatter>(
    runtime: tokio::runtime::Runtime,
    formatter: &F,
    jobs: Receiver<Job>,
    timeout: Option<Duration>,
) {
    while let Ok(Job { request, reply }) = jobs.recv() {
        let filename = request.filename.clone();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            runtime.block_on(async {
                match timeout {
                    Some(limit) => tokio::time::timeout(limit, formatter.format(request))
                        .await
                        .unwrap_or(Err(FormatterError::Timeout(limit))),
                    None => formatter.format(request).await,
                }
            })
        }));

        let result = outcome.unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            warn!("Formatter panicked on '{}': {}", filename, message);
            Err(FormatterError::Panicked(message))
        });

        if reply.send(result).is_err() {
            debug!("Caller stopped waiting for '{}'", filename);
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
