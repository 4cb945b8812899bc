//! Process-wide formatter bridges.
//!
//! Starting a bridge spawns threads, so every rule instance configured with
//! the same settings shares one. Bridges live until
//! [`shutdown_shared_formatters`] is called, which stops their workers.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{BridgeOptions, FormatterError, ProcessFormatter, SyncBridge};

/// Default formatter command.
pub const DEFAULT_COMMAND: &str = "oxfmt-worker";

/// How to reach the external formatter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatterSettings {
    /// Program to run for each request.
    pub command: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Number of concurrent formatter invocations.
    pub workers: usize,
    /// Per-invocation time limit in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl Default for FormatterSettings {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            args: Vec::new(),
            workers: std::thread::available_parallelism()
                .map(|n| n.get().min(4))
                .unwrap_or(1),
            timeout_ms: None,
        }
    }
}

impl FormatterSettings {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    pub fn bridge_options(&self) -> BridgeOptions {
        BridgeOptions {
            workers: self.workers,
            timeout: self.timeout_ms.map(Duration::from_millis),
        }
    }

    pub fn process_formatter(&self) -> ProcessFormatter {
        ProcessFormatter::new(&self.command).with_args(self.args.iter().cloned())
    }
}

static BRIDGES: OnceLock<Mutex<HashMap<FormatterSettings, Arc<SyncBridge>>>> = OnceLock::new();

/// Returns the bridge for `settings`, starting it on first use.
pub fn shared_formatter(settings: &FormatterSettings) -> Result<Arc<SyncBridge>, FormatterError> {
    let mut bridges = BRIDGES.get_or_init(Default::default).lock();

    if let Some(bridge) = bridges.get(settings) {
        return Ok(Arc::clone(bridge));
    }

    debug!("Starting formatter bridge for '{}'", settings.command);
    let bridge = Arc::new(SyncBridge::new(
        settings.process_formatter(),
        settings.bridge_options(),
    )?);
    bridges.insert(settings.clone(), Arc::clone(&bridge));

    Ok(bridge)
}

/// Releases every shared bridge and returns how many were registered.
///
/// A bridge's workers are joined once the last handle to it is dropped, so
/// callers should drop their rules first. Later calls to [`shared_formatter`]
/// start fresh bridges.
pub fn shutdown_shared_formatters() -> usize {
    let Some(bridges) = BRIDGES.get() else {
        return 0;
    };
    // Drop outside the lock; joining workers can take a while.
    let drained: Vec<_> = bridges.lock().drain().map(|(_, bridge)| bridge).collect();
    let count = drained.len();
    debug!("Shutting down {} formatter bridge(s)", count);
    drop(drained);
    count
}
