//! Formatter option table and rule option validation.
//!
//! Every option the `oxfmt/oxfmt` rule accepts is declared once in
//! [`FORMAT_OPTIONS`]. The rule's JSON Schema is generated from that table and
//! rule options are checked against it with `jsonschema` when the linter is
//! built.

use jsonschema::Validator;
use serde_json::{Map, Value, json};

use fmtlint_plugin::PluginError;

/// The value type of a formatter option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Boolean,
    Integer,
    /// A string restricted to the given values.
    Enum(&'static [&'static str]),
    StringList,
    /// A list of string lists.
    StringGroups,
    /// A nested object with its own closed set of options.
    Object(&'static [OptionSpec]),
}

/// One entry of the option table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
}

const fn option(name: &'static str, description: &'static str, kind: OptionKind) -> OptionSpec {
    OptionSpec {
        name,
        description,
        kind,
    }
}

const SORT_IMPORTS_OPTIONS: &[OptionSpec] = &[
    option(
        "groups",
        "Custom groups configuration for organizing imports.\nEach array element represents a group, and multiple group names in the same array are treated as one.",
        OptionKind::StringGroups,
    ),
    option(
        "ignoreCase",
        "Ignore case when sorting. (Default: true)",
        OptionKind::Boolean,
    ),
    option(
        "internalPattern",
        "Glob patterns to identify internal imports.",
        OptionKind::StringList,
    ),
    option(
        "newlinesBetween",
        "Add newlines between import groups. (Default: true)",
        OptionKind::Boolean,
    ),
    option(
        "order",
        "Sort order. (Default: \"asc\")",
        OptionKind::Enum(&["asc", "desc"]),
    ),
    option(
        "partitionByComment",
        "Partition imports by comments. (Default: false)",
        OptionKind::Boolean,
    ),
    option(
        "partitionByNewline",
        "Partition imports by newlines. (Default: false)",
        OptionKind::Boolean,
    ),
    option(
        "sortSideEffects",
        "Sort side-effect imports. (Default: false)",
        OptionKind::Boolean,
    ),
];

/// Options passed through to the formatter.
pub const FORMAT_OPTIONS: &[OptionSpec] = &[
    option(
        "arrowParens",
        "Include parentheses around a sole arrow function parameter. (Default: \"always\")",
        OptionKind::Enum(&["always", "avoid"]),
    ),
    option(
        "bracketSameLine",
        "Put the > of a multi-line JSX element at the end of the last line\ninstead of being alone on the next line. (Default: false)",
        OptionKind::Boolean,
    ),
    option(
        "bracketSpacing",
        "Print spaces between brackets in object literals. (Default: true)",
        OptionKind::Boolean,
    ),
    option(
        "embeddedLanguageFormatting",
        "Control whether formats quoted code embedded in the file. (Default: \"auto\")",
        OptionKind::Enum(&["auto", "off"]),
    ),
    option(
        "endOfLine",
        "Which end of line characters to apply. (Default: \"lf\")",
        OptionKind::Enum(&["lf", "crlf", "cr"]),
    ),
    option(
        "experimentalSortImports",
        "Experimental: Sort import statements. Disabled by default.",
        OptionKind::Object(SORT_IMPORTS_OPTIONS),
    ),
    option(
        "experimentalSortPackageJson",
        "Experimental: Sort package.json keys. (Default: true)",
        OptionKind::Boolean,
    ),
    option(
        "ignorePatterns",
        "Ignore files matching these glob patterns. Current working directory is used as the root.",
        OptionKind::StringList,
    ),
    option(
        "insertFinalNewline",
        "Whether to insert a final newline at the end of the file. (Default: true)",
        OptionKind::Boolean,
    ),
    option(
        "jsxSingleQuote",
        "Use single quotes instead of double quotes in JSX. (Default: false)",
        OptionKind::Boolean,
    ),
    option(
        "objectWrap",
        "How to wrap object literals when they could fit on one line or span multiple lines. (Default: \"preserve\")",
        OptionKind::Enum(&["preserve", "collapse", "always"]),
    ),
    option(
        "printWidth",
        "The line length that the printer will wrap on. (Default: 100)",
        OptionKind::Integer,
    ),
    option(
        "quoteProps",
        "Change when properties in objects are quoted. (Default: \"as-needed\")",
        OptionKind::Enum(&["as-needed", "consistent", "preserve"]),
    ),
    option(
        "semi",
        "Print semicolons at the ends of statements. (Default: true)",
        OptionKind::Boolean,
    ),
    option(
        "singleAttributePerLine",
        "Put each attribute on a new line in JSX. (Default: false)",
        OptionKind::Boolean,
    ),
    option(
        "singleQuote",
        "Use single quotes instead of double quotes. (Default: false)",
        OptionKind::Boolean,
    ),
    option(
        "tabWidth",
        "Number of spaces per indentation level. (Default: 2)",
        OptionKind::Integer,
    ),
    option(
        "trailingComma",
        "Print trailing commas wherever possible. (Default: \"all\")",
        OptionKind::Enum(&["all", "es5", "none"]),
    ),
    option(
        "useTabs",
        "Use tabs for indentation or spaces. (Default: false)",
        OptionKind::Boolean,
    ),
];

/// Builds a closed object schema from an option table.
pub fn options_schema(specs: &[OptionSpec]) -> Value {
    let properties: Map<String, Value> = specs
        .iter()
        .map(|spec| (spec.name.to_string(), spec_schema(spec)))
        .collect();

    json!({
        "type": "object",
        "additionalProperties": false,
        "properties": properties,
    })
}

fn spec_schema(spec: &OptionSpec) -> Value {
    let mut schema = match spec.kind {
        OptionKind::Boolean => json!({ "type": "boolean" }),
        OptionKind::Integer => json!({ "type": "integer" }),
        OptionKind::Enum(values) => json!({ "type": "string", "enum": values }),
        OptionKind::StringList => json!({ "type": "array", "items": { "type": "string" } }),
        OptionKind::StringGroups => json!({
            "type": "array",
            "items": { "type": "array", "items": { "type": "string" } },
        }),
        OptionKind::Object(nested) => options_schema(nested),
    };

    if let Some(object) = schema.as_object_mut() {
        object.insert(
            "description".to_string(),
            Value::String(spec.description.to_string()),
        );
    }
    schema
}

/// Checks positional rule options against the rule's schema.
///
/// A rule accepts at most one option per schema entry.
pub fn validate_rule_options(
    rule_id: &str,
    schema: &[Value],
    options: &[Value],
) -> Result<(), PluginError> {
    if options.len() > schema.len() {
        return Err(PluginError::invalid_options(
            rule_id,
            format!(
                "expected at most {} option(s), got {}",
                schema.len(),
                options.len()
            ),
        ));
    }

    for (index, (schema, option)) in schema.iter().zip(options).enumerate() {
        let validator = Validator::new(schema).map_err(|e| {
            PluginError::invalid_options(rule_id, format!("invalid schema #{index}: {e}"))
        })?;

        let errors: Vec<String> = validator
            .iter_errors(option)
            .map(|e| {
                let path = e.instance_path().to_string();
                if path.is_empty() {
                    e.to_string()
                } else {
                    format!("{} at {}", e, path)
                }
            })
            .collect();

        if !errors.is_empty() {
            return Err(PluginError::invalid_options(rule_id, errors.join("; ")));
        }
    }

    Ok(())
}
