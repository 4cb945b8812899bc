//! Multi-pass fixing.
//!
//! Fixes from one pass can expose new differences, so a file is linted and
//! fixed repeatedly until nothing changes. Every intermediate text is hashed so
//! a sequence of fixes that undoes itself is caught instead of running until
//! the pass limit.

use blake3::Hash;
use tracing::{debug, warn};

use crate::config::DEFAULT_MAX_FIX_PASSES;

/// How a multi-pass fix ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixResult {
    /// A pass made no change.
    Converged { passes: usize },
    /// The pass limit was hit while the text was still changing.
    MaxPassesReached { passes: usize },
    /// A pass produced a text seen before.
    CycleDetected { cycle_length: usize },
}

impl FixResult {
    /// Returns true if fixing stopped because nothing was left to change.
    pub fn converged(&self) -> bool {
        matches!(self, FixResult::Converged { .. })
    }
}

/// Drives repeated fix passes over one text.
#[derive(Debug, Clone, Copy)]
pub struct FixCoordinator {
    max_passes: usize,
}

impl FixCoordinator {
    pub fn new(max_passes: usize) -> Self {
        Self {
            max_passes: max_passes.max(1),
        }
    }

    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Runs `apply_pass` until it returns `None` or a stop condition hits.
    ///
    /// `apply_pass` receives the current text and returns the fixed text, or
    /// `None` when it has nothing to fix.
    pub fn run<F>(&self, content: &mut String, mut apply_pass: F) -> FixResult
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut history: Vec<Hash> = vec![hash_content(content)];

        for pass in 1..=self.max_passes {
            let Some(fixed) = apply_pass(content) else {
                debug!("Fixing converged after {} pass(es)", pass);
                return FixResult::Converged { passes: pass };
            };

            *content = fixed;
            let current = hash_content(content);

            if let Some(previous) = history.iter().position(|h| *h == current) {
                let cycle_length = history.len() - previous;
                warn!("Fix cycle of length {} detected, stopping", cycle_length);
                return FixResult::CycleDetected { cycle_length };
            }
            history.push(current);
        }

        warn!("Fixing stopped after {} passes", self.max_passes);
        FixResult::MaxPassesReached {
            passes: self.max_passes,
        }
    }
}

impl Default for FixCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FIX_PASSES)
    }
}

fn hash_content(content: &str) -> Hash {
    blake3::hash(content.as_bytes())
}
