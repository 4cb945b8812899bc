//! The oxfmt plugin: its metadata, rules and presets.

use std::collections::BTreeMap;
use std::sync::Arc;

use fmtlint_diff::DiffOptions;
use fmtlint_formatter::{FormatOptions, FormatterSettings};
use fmtlint_plugin::{PluginError, Rule, RuleMeta};
use serde::Serialize;

use crate::config::RuleLevel;
use crate::parser::ParserKind;
use crate::rules::{OxfmtRule, oxfmt};

/// Plugin prefix of every rule id.
pub const PLUGIN_NAME: &str = "oxfmt";

/// Plugin identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PluginMeta {
    pub name: &'static str,
    pub version: &'static str,
}

/// A named configuration shipped with the plugin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub parser: ParserKind,
    pub rules: BTreeMap<String, RuleLevel>,
}

/// What a rule instance needs from the linter configuration.
#[derive(Debug, Clone, Default)]
pub struct RuleSetup {
    pub formatter: FormatterSettings,
    pub base_options: FormatOptions,
    pub diff_options: DiffOptions,
}

pub fn meta() -> PluginMeta {
    PluginMeta {
        name: "fmtlint-plugin-oxfmt",
        version: env!("CARGO_PKG_VERSION"),
    }
}

/// Metadata of every rule, keyed by full rule id.
pub fn rules() -> Vec<(String, RuleMeta)> {
    vec![(rule_id(oxfmt::NAME), oxfmt::rule_meta())]
}

/// Looks up a rule's metadata by full id.
pub fn rule_meta(rule_id: &str) -> Option<RuleMeta> {
    rules()
        .into_iter()
        .find(|(id, _)| id == rule_id)
        .map(|(_, meta)| meta)
}

/// Instantiates a rule by full id.
pub fn create_rule(rule_id: &str, setup: &RuleSetup) -> Result<Arc<dyn Rule>, PluginError> {
    match rule_id.strip_prefix(PLUGIN_NAME).and_then(|r| r.strip_prefix('/')) {
        Some(oxfmt::NAME) => Ok(Arc::new(
            OxfmtRule::new(setup.formatter.clone())
                .with_base_options(setup.base_options.clone())
                .with_diff_options(setup.diff_options),
        )),
        _ => Err(PluginError::unknown_rule(rule_id)),
    }
}

/// The `recommended` preset: every rule as an error on plain text.
pub fn recommended() -> Preset {
    Preset {
        name: "oxfmt/recommended",
        parser: ParserKind::Plain,
        rules: BTreeMap::from([(rule_id(oxfmt::NAME), RuleLevel::Error)]),
    }
}

/// Presets keyed by short name.
pub fn configs() -> Vec<(&'static str, Preset)> {
    vec![("recommended", recommended())]
}

fn rule_id(name: &str) -> String {
    format!("{PLUGIN_NAME}/{name}")
}
