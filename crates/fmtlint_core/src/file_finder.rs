use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::error::LinterError;

/// Files picked up from directories and globs when no `include` is configured.
pub const DEFAULT_INCLUDE: &[&str] = &["**/*.{js,jsx,mjs,cjs,ts,tsx,mts,cts}"];

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// Resolves command-line patterns to files.
///
/// A pattern is a file, a directory (walked recursively) or a glob matched
/// against paths relative to the base directory. Files found by walking must
/// match `include`; every file is checked against `exclude`.
pub struct FileFinder {
    base_dir: PathBuf,
    include_globs: GlobSet,
    exclude_globs: Option<GlobSet>,
}

impl FileFinder {
    pub fn new(
        base_dir: impl Into<PathBuf>,
        include: &[String],
        exclude: &[String],
    ) -> Result<Self, LinterError> {
        let include_globs = if include.is_empty() {
            let defaults: Vec<String> = DEFAULT_INCLUDE.iter().map(|p| p.to_string()).collect();
            Self::build_globset(&defaults)?
        } else {
            Self::build_globset(include)?
        };

        Ok(Self {
            base_dir: base_dir.into(),
            include_globs: include_globs.unwrap_or_else(GlobSet::empty),
            exclude_globs: Self::build_globset(exclude)?,
        })
    }

    fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, LinterError> {
        if patterns.is_empty() {
            return Ok(None);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| LinterError::config(format!("Invalid glob pattern: {}", e)))?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| LinterError::config(format!("Failed to build globset: {}", e)))?;

        Ok(Some(globset))
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.base_dir).unwrap_or(path)
    }

    /// Returns true if `path` matches an exclude pattern.
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclude_globs
            .as_ref()
            .is_some_and(|excludes| excludes.is_match(self.relative(path)))
    }

    /// Returns true if a walked file should be skipped.
    pub fn should_ignore(&self, path: &Path) -> bool {
        self.is_excluded(path) || !self.include_globs.is_match(self.relative(path))
    }

    pub fn discover_files(&self, patterns: &[String]) -> Result<Vec<PathBuf>, LinterError> {
        let mut files = Vec::new();
        let mut glob_builder = GlobSetBuilder::new();
        let mut has_globs = false;

        for pattern in patterns {
            let path = match pattern.as_str() {
                "." => self.base_dir.clone(),
                _ => self.base_dir.join(pattern),
            };
            if path.is_file() {
                if !self.is_excluded(&path) {
                    files.push(path);
                }
            } else if path.is_dir() {
                files.extend(self.walk(&path).filter(|file| !self.should_ignore(file)));
            } else {
                let glob = Glob::new(pattern).map_err(|e| {
                    LinterError::config(format!("Invalid pattern '{}': {}", pattern, e))
                })?;
                glob_builder.add(glob);
                has_globs = true;
            }
        }

        if has_globs {
            let glob_set = glob_builder
                .build()
                .map_err(|e| LinterError::config(format!("Failed to build globset: {}", e)))?;

            files.extend(self.walk(&self.base_dir).filter(|file| {
                glob_set.is_match(self.relative(file)) && !self.is_excluded(file)
            }));
        }

        files.sort();
        files.dedup();

        info!("Discovered {} files to lint", files.len());
        Ok(files)
    }

    fn walk(&self, root: &Path) -> impl Iterator<Item = PathBuf> {
        debug!("Walking {}", root.display());
        WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| !is_skipped_dir(entry))
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(DirEntry::into_path)
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}
