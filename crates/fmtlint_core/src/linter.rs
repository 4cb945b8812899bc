//! The linter host.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, warn};

use fmtlint_plugin::{Diagnostic, Rule, RuleContext, Severity};

use crate::config::{LinterConfig, RuleEntry};
use crate::file_finder::FileFinder;
use crate::fix::{FixCoordinator, FixResult};
use crate::fixer::apply_fixes_to_content;
use crate::format_config::load_format_config;
use crate::options::validate_rule_options;
use crate::parser::read_source;
use crate::plugin::{self, RuleSetup};
use crate::result::{FixOutcome, LintResult};
use crate::LinterError;

/// Result of linting multiple files.
///
/// Contains a tuple of:
/// - Successful lint results
/// - Failed files with their errors (path and error)
pub type LintFilesResult = Result<(Vec<LintResult>, Vec<(PathBuf, LinterError)>), LinterError>;

/// Result of fixing multiple files.
pub type FixFilesResult =
    Result<(Vec<(PathBuf, FixOutcome)>, Vec<(PathBuf, LinterError)>), LinterError>;

/// An enabled rule with its configured severity and options.
struct ConfiguredRule {
    id: String,
    rule: Arc<dyn Rule>,
    severity: Severity,
    options: Vec<Value>,
}

/// The core linter engine.
///
/// Runs the configured rules over files, in parallel across files, and
/// applies their fixes.
pub struct Linter {
    config: LinterConfig,
    rules: Vec<ConfiguredRule>,
    finder: FileFinder,
    coordinator: FixCoordinator,
}

impl Linter {
    /// Creates a linter from configuration.
    ///
    /// Fails if a rule is unknown or its options do not match its schema, or
    /// if the formatter config file cannot be loaded.
    pub fn new(config: LinterConfig) -> Result<Self, LinterError> {
        let base_dir = config.base_dir();
        let setup = RuleSetup {
            formatter: config.formatter.clone(),
            base_options: load_format_config(config.format_config.as_deref(), &base_dir)?,
            diff_options: config.diff_options(),
        };

        let mut linter = Self {
            finder: FileFinder::new(&base_dir, &config.include, &config.exclude)?,
            coordinator: FixCoordinator::new(config.max_fix_passes),
            rules: Vec::new(),
            config,
        };

        let entries: Vec<(String, RuleEntry)> = linter
            .config
            .enabled_rules()
            .into_iter()
            .map(|(id, entry)| (id.to_string(), entry.clone()))
            .collect();

        for (id, entry) in entries {
            let rule = plugin::create_rule(&id, &setup)?;
            linter.add_rule(&id, rule, entry)?;
        }

        debug!("Linter created with {} rule(s)", linter.rules.len());
        Ok(linter)
    }

    /// Adds a rule instance under `id`, validating `entry`'s options against
    /// the rule's schema. Disabled entries are ignored.
    pub fn add_rule(
        &mut self,
        id: &str,
        rule: Arc<dyn Rule>,
        entry: RuleEntry,
    ) -> Result<(), LinterError> {
        let Some(severity) = entry.level.severity() else {
            return Ok(());
        };

        validate_rule_options(id, &rule.meta().schema, &entry.options)?;

        self.rules.retain(|configured| configured.id != id);
        self.rules.push(ConfiguredRule {
            id: id.to_string(),
            rule,
            severity,
            options: entry.options,
        });
        Ok(())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LinterConfig {
        &self.config
    }

    /// Returns the ids of the active rules.
    pub fn rule_ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id.as_str()).collect()
    }

    /// Runs every rule over `text`. Diagnostics are ordered by position.
    pub fn lint_source(&self, path: &Path, text: &str) -> Vec<Diagnostic> {
        let filename = path.to_string_lossy();
        let mut diagnostics = Vec::new();

        for configured in &self.rules {
            let mut ctx = RuleContext::new(
                &configured.id,
                configured.rule.meta(),
                &filename,
                text,
                &configured.options,
                configured.severity,
            );
            configured.rule.check(&mut ctx);
            diagnostics.extend(ctx.into_diagnostics());
        }

        diagnostics.sort_by_key(|d| (d.span.start, d.span.end));
        diagnostics
    }

    /// Lints one file.
    pub fn lint_file(&self, path: &Path) -> Result<LintResult, LinterError> {
        debug!("Linting {}", path.display());
        let source = read_source(path)?;
        let diagnostics = self.lint_source(path, &source.text);
        Ok(LintResult::new(path.to_path_buf(), diagnostics))
    }

    /// Lints files matching the given patterns.
    ///
    /// Returns a tuple of (successful results, failed files with errors).
    pub fn lint_patterns(&self, patterns: &[String]) -> LintFilesResult {
        let files = self.finder.discover_files(patterns)?;
        self.lint_files(&files)
    }

    /// Resolves patterns to files without linting them.
    pub fn discover_files(&self, patterns: &[String]) -> Result<Vec<PathBuf>, LinterError> {
        self.finder.discover_files(patterns)
    }

    /// Lints a list of files in parallel using rayon.
    ///
    /// A file that cannot be read or decoded is reported as a failure and does
    /// not stop the others.
    pub fn lint_files(&self, paths: &[PathBuf]) -> LintFilesResult {
        let results: Vec<Result<LintResult, (PathBuf, LinterError)>> = paths
            .par_iter()
            .map(|path| self.lint_file(path).map_err(|e| (path.clone(), e)))
            .collect();

        Ok(partition(results))
    }

    /// Repeatedly lints `text` and applies fixes until nothing changes, a
    /// cycle is detected or the pass limit is reached.
    pub fn fix_source(&self, path: &Path, text: &str) -> FixOutcome {
        let mut output = text.to_string();
        let mut fixes_applied = 0;
        let mut remaining = None;

        let status = self.coordinator.run(&mut output, |current| {
            let diagnostics = self.lint_source(path, current);
            let fixed = apply_fixes_to_content(current, &diagnostics);
            if fixed.modified {
                fixes_applied += fixed.fixes_applied;
                Some(fixed.fixed_content)
            } else {
                remaining = Some(diagnostics);
                None
            }
        });

        let remaining = match (status, remaining) {
            (FixResult::Converged { .. }, Some(diagnostics)) => diagnostics,
            _ => self.lint_source(path, &output),
        };

        FixOutcome {
            modified: output != text,
            output,
            fixes_applied,
            remaining,
            status,
        }
    }

    /// Fixes one file, writing it back unless `dry_run` is set.
    pub fn fix_file(&self, path: &Path, dry_run: bool) -> Result<FixOutcome, LinterError> {
        debug!("Fixing {}", path.display());
        let source = read_source(path)?;
        let outcome = self.fix_source(path, &source.text);

        if outcome.modified && !dry_run {
            fs::write(path, source.to_disk_text(&outcome.output)).map_err(|e| {
                LinterError::file(format!("Failed to write {}: {}", path.display(), e))
            })?;
        }

        Ok(outcome)
    }

    /// Fixes a list of files in parallel.
    pub fn fix_files(&self, paths: &[PathBuf], dry_run: bool) -> FixFilesResult {
        let results: Vec<Result<(PathBuf, FixOutcome), (PathBuf, LinterError)>> = paths
            .par_iter()
            .map(|path| {
                self.fix_file(path, dry_run)
                    .map(|outcome| (path.clone(), outcome))
                    .map_err(|e| (path.clone(), e))
            })
            .collect();

        Ok(partition(results))
    }
}

fn partition<T>(
    results: Vec<Result<T, (PathBuf, LinterError)>>,
) -> (Vec<T>, Vec<(PathBuf, LinterError)>) {
    let mut successes = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(success) => successes.push(success),
            Err((path, error)) => {
                warn!("Failed to lint {}: {}", path.display(), error);
                failures.push((path, error));
            }
        }
    }
    (successes, failures)
}
