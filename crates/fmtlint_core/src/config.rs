//! Linter configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use fmtlint_diff::{DiffOptions, Granularity};
use fmtlint_formatter::FormatterSettings;
use fmtlint_plugin::Severity;
use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::LinterError;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Default upper bound on fix passes.
pub const DEFAULT_MAX_FIX_PASSES: usize = 10;

/// Severity of a configured rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Off,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl RuleLevel {
    /// Returns the diagnostic severity, or `None` when the rule is off.
    pub fn severity(self) -> Option<Severity> {
        match self {
            RuleLevel::Off => None,
            RuleLevel::Warn => Some(Severity::Warning),
            RuleLevel::Error => Some(Severity::Error),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuleLevel::Off => "off",
            RuleLevel::Warn => "warn",
            RuleLevel::Error => "error",
        }
    }
}

/// A rule's level and positional options.
///
/// Written either as a bare level (`"error"`) or as an array whose first
/// element is the level (`["error", { "semi": false }]`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawRuleEntry")]
pub struct RuleEntry {
    pub level: RuleLevel,
    pub options: Vec<Value>,
}

impl RuleEntry {
    pub fn new(level: RuleLevel) -> Self {
        Self {
            level,
            options: Vec::new(),
        }
    }

    pub fn with_options(level: RuleLevel, options: Vec<Value>) -> Self {
        Self { level, options }
    }

    /// Returns whether the rule is enabled.
    pub fn is_enabled(&self) -> bool {
        self.level != RuleLevel::Off
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRuleEntry {
    Level(RuleLevel),
    Configured(Vec<Value>),
}

impl TryFrom<RawRuleEntry> for RuleEntry {
    type Error = String;

    fn try_from(raw: RawRuleEntry) -> Result<Self, Self::Error> {
        match raw {
            RawRuleEntry::Level(level) => Ok(RuleEntry::new(level)),
            RawRuleEntry::Configured(mut values) => {
                if values.is_empty() {
                    return Err("rule entry must start with a level".to_string());
                }
                let level = serde_json::from_value(values.remove(0))
                    .map_err(|e| format!("invalid rule level: {}", e))?;
                Ok(RuleEntry::with_options(level, values))
            }
        }
    }
}

/// Configuration for the linter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinterConfig {
    /// Rule entries keyed by full rule id.
    #[serde(default = "default_rules")]
    pub rules: BTreeMap<String, RuleEntry>,

    /// File patterns to include.
    #[serde(default)]
    pub include: Vec<String>,

    /// File patterns to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// External formatter settings.
    #[serde(default)]
    pub formatter: FormatterSettings,

    /// Explicit formatter config file, relative to `base_dir`.
    #[serde(default)]
    pub format_config: Option<PathBuf>,

    #[serde(default)]
    pub granularity: Granularity,

    #[serde(default = "default_max_fix_passes")]
    pub max_fix_passes: usize,

    /// Directory containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_rules() -> BTreeMap<String, RuleEntry> {
    crate::plugin::recommended()
        .rules
        .into_iter()
        .map(|(id, level)| (id, RuleEntry::new(level)))
        .collect()
}

fn default_max_fix_passes() -> usize {
    DEFAULT_MAX_FIX_PASSES
}

impl LinterConfig {
    /// Configuration file names, in order of preference.
    pub const CONFIG_FILES: &'static [&'static str] = &[".fmtlint.jsonc", ".fmtlint.json"];

    /// Creates the configuration used when no file exists: the recommended
    /// preset with default formatter settings.
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
            include: Vec::new(),
            exclude: Vec::new(),
            formatter: FormatterSettings::default(),
            format_config: None,
            granularity: Granularity::default(),
            max_fix_passes: DEFAULT_MAX_FIX_PASSES,
            base_dir: None,
        }
    }

    /// Finds a configuration file in `dir`.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads `explicit` if given, else the file discovered in `cwd`, else the
    /// defaults.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self, LinterError> {
        match explicit
            .map(|path| cwd.join(path))
            .or_else(|| Self::discover(cwd))
        {
            Some(path) => {
                info!("Using config {}", path.display());
                Self::from_file(path)
            }
            None => {
                info!("No config file found, using the recommended preset");
                let mut config = Self::new();
                config.base_dir = Some(cwd.to_path_buf());
                Ok(config)
            }
        }
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.fmtlint.jsonc`, `.fmtlint.json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LinterError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from JSONC text with schema validation.
    pub fn from_json(json: &str) -> Result<Self, LinterError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| LinterError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(LinterError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| LinterError::config(format!("Invalid config: {}", e)))
    }

    /// Returns enabled rules with their entries.
    pub fn enabled_rules(&self) -> Vec<(&str, &RuleEntry)> {
        self.rules
            .iter()
            .filter(|(_, entry)| entry.is_enabled())
            .map(|(id, entry)| (id.as_str(), entry))
            .collect()
    }

    /// Returns the diff options derived from this configuration, bounded by
    /// the default diff deadline.
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions::new(self.granularity)
    }

    /// Returns the directory relative paths are resolved against.
    pub fn base_dir(&self) -> PathBuf {
        self.base_dir
            .clone()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self::new()
    }
}
