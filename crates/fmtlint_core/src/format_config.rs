//! Formatter configuration files.
//!
//! Base formatter options come from an `.oxfmtrc.json` / `.oxfmtrc.jsonc`
//! file. Options given directly to the rule are layered on top.

use std::fs;
use std::path::{Path, PathBuf};

use fmtlint_formatter::FormatOptions;
use jsonc_parser::ParseOptions;
use serde_json::Value;
use tracing::{debug, info};

use crate::LinterError;

/// File names searched for, in order of preference.
pub const FORMAT_CONFIG_FILES: &[&str] = &[".oxfmtrc.json", ".oxfmtrc.jsonc"];

/// Loads the base formatter options.
///
/// An explicit `config_path` is resolved against `cwd` and must exist.
/// Otherwise `cwd` and its ancestors are searched. Without a file the base is
/// empty.
pub fn load_format_config(
    config_path: Option<&Path>,
    cwd: &Path,
) -> Result<FormatOptions, LinterError> {
    let path = match config_path {
        Some(path) => cwd.join(path),
        None => match find_format_config(cwd) {
            Some(path) => path,
            None => {
                debug!("No formatter config found from {}", cwd.display());
                return Ok(FormatOptions::new());
            }
        },
    };

    info!("Using formatter config {}", path.display());
    let content = fs::read_to_string(&path).map_err(|e| {
        LinterError::config(format!(
            "Failed to read formatter config {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_format_config(&content)
        .map_err(|e| LinterError::config(format!("{}: {}", path.display(), e)))
}

/// Finds the nearest formatter config in `start` or its ancestors.
pub fn find_format_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        FORMAT_CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Parses formatter config text. Comments are allowed and `$schema` is
/// dropped.
pub fn parse_format_config(content: &str) -> Result<FormatOptions, String> {
    let value = jsonc_parser::parse_to_serde_value(content, &ParseOptions::default())
        .map_err(|e| format!("Invalid formatter config: {}", e))?;

    match value {
        None => Ok(FormatOptions::new()),
        Some(Value::Object(mut options)) => {
            options.remove("$schema");
            Ok(options)
        }
        Some(_) => Err("Formatter config must be an object".to_string()),
    }
}

/// Layers explicit rule options over the base options.
///
/// The merge is shallow: an explicit key replaces the base value entirely.
pub fn merge_options(base: &FormatOptions, explicit: Option<&Value>) -> FormatOptions {
    let mut merged = base.clone();
    if let Some(Value::Object(explicit)) = explicit {
        for (key, value) in explicit {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
