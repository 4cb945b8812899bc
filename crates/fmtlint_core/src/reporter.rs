//! Reports the difference between source text and its formatted form.
//!
//! Each edit needed to turn the source into the formatted text becomes one
//! fixable violation. Applying every fix in one pass reproduces the
//! formatted text exactly.

use fmtlint_ast::Span;
use fmtlint_diff::{DiffOptions, FixOperation, locate_with, synthesize};
use fmtlint_plugin::{Fix, Report, RuleContext, show_invisibles};
use tracing::debug;

pub const INSERT: &str = "insert";
pub const DELETE: &str = "delete";
pub const REPLACE: &str = "replace";

/// Message templates used by [`report_differences`], keyed by message id.
pub const MESSAGES: &[(&str, &str)] = &[
    (INSERT, "Insert `{{ insertText }}`"),
    (DELETE, "Delete `{{ deleteText }}`"),
    (REPLACE, "Replace `{{ deleteText }}` with `{{ insertText }}`"),
];

/// Reports one violation per edit between `original` and `formatted`.
pub fn report_differences(
    ctx: &mut RuleContext<'_>,
    original: &str,
    formatted: &str,
    options: &DiffOptions,
) {
    if original == formatted {
        return;
    }

    let changes = locate_with(original, formatted, options);
    let operations = synthesize(&changes);
    debug!(
        "{}: {} formatting difference(s)",
        ctx.filename(),
        operations.len()
    );

    for operation in operations {
        ctx.report(to_report(original, operation));
    }
}

fn to_report(original: &str, operation: FixOperation) -> Report {
    match operation {
        FixOperation::Insert { at, text } => {
            let offset = Span::from_range(at..at).start;
            Report::message_id(INSERT)
                .data("insertText", show_invisibles(&text))
                .span(Span::empty(offset))
                .fix(Fix::insert(offset, text))
        }
        FixOperation::Delete { range } => {
            let span = Span::from_range(range.clone());
            Report::message_id(DELETE)
                .data("deleteText", show_invisibles(&original[range]))
                .span(span)
                .fix(Fix::delete(span))
        }
        FixOperation::Replace { range, text } => {
            let span = Span::from_range(range.clone());
            Report::message_id(REPLACE)
                .data("deleteText", show_invisibles(&original[range]))
                .data("insertText", show_invisibles(&text))
                .span(span)
                .fix(Fix::new(span, text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmtlint_ast::{Location, Position};
    use fmtlint_diff::Granularity;
    use fmtlint_plugin::{Diagnostic, RuleMeta, RuleType, Severity};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    use crate::fixer::apply_fixes_to_content;

    fn meta() -> RuleMeta {
        MESSAGES.iter().fold(
            RuleMeta::new("oxfmt", RuleType::Layout),
            |meta, (id, template)| meta.with_message(*id, *template),
        )
    }

    fn report(original: &str, formatted: &str, granularity: Granularity) -> Vec<Diagnostic> {
        let meta = meta();
        let mut ctx = RuleContext::new("oxfmt/oxfmt", &meta, "test.js", original, &[], Severity::Error);
        report_differences(&mut ctx, original, formatted, &DiffOptions::new(granularity));
        ctx.into_diagnostics()
    }

    #[test]
    fn identical_texts_report_nothing() {
        let source = "const a = 1;\n";
        assert!(report(source, source, Granularity::Char).is_empty());
    }

    #[test]
    fn missing_semicolon() {
        let original = r#"console.log("hello world")"#;
        let formatted = r#"console.log("hello world");"#;

        let diags = report(original, formatted, Granularity::Char);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Insert `;`");
        assert_eq!(diags[0].message_id.as_deref(), Some(INSERT));
        assert_eq!(
            diags[0].loc,
            Some(Location::new(Position::new(1, 26), Position::new(1, 26)))
        );
        assert_eq!(diags[0].fix, Some(Fix::insert(26, ";")));
    }

    #[test]
    fn arrow_parens_become_two_deletions() {
        let original = "const isOdd = (n) => n % 2 === 1;";
        let formatted = "const isOdd = n => n % 2 === 1;";

        let diags = report(original, formatted, Granularity::Char);

        let messages: Vec<&str> = diags.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["Delete `(`", "Delete `)`"]);
        assert_eq!(diags[0].span, Span::new(14, 15));
        assert_eq!(diags[1].span, Span::new(16, 17));

        let fixed = apply_fixes_to_content(original, &diags);
        assert_eq!(fixed.fixed_content, formatted);
    }

    #[test]
    fn replacement_shows_invisibles() {
        let original = "if (a) {\n  b();\n}\n";
        let formatted = "if (a) {\n\tb();\n}\n";

        let diags = report(original, formatted, Granularity::Char);

        assert_eq!(diags.len(), 1);
        insta::assert_snapshot!(diags[0].message, @"Replace `··` with `↹`");
        assert_eq!(
            diags[0].loc,
            Some(Location::new(Position::new(2, 0), Position::new(2, 2)))
        );
    }

    #[test]
    fn line_granularity_reports_whole_lines() {
        let original = "a;\nb  ;\nc;\n";
        let formatted = "a;\nb;\nc;\n";

        let diags = report(original, formatted, Granularity::Line);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Replace `b··;⏎` with `b;⏎`");
    }

    #[test]
    fn emptied_file_is_one_deletion() {
        let diags = report("x\n", "", Granularity::Char);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Delete `x⏎`");
        assert_eq!(
            diags[0].loc,
            Some(Location::new(Position::new(1, 0), Position::new(2, 0)))
        );
    }

    #[rstest]
    #[case::semicolon(r#"console.log("hello world")"#, "console.log(\"hello world\");\n")]
    #[case::quotes("a = \"x\";\n", "a = 'x';\n")]
    #[case::indent("{\n    a;\n}\n", "{\n  a;\n}\n")]
    #[case::wrap(
        "foo(reallyLongArg(), omgSoManyParameters());",
        "foo(\n  reallyLongArg(),\n  omgSoManyParameters(),\n);\n"
    )]
    #[case::crlf("const a = 1;\nconst b = 2;", "const a = 1;\r\nconst b = 2;\r\n")]
    #[case::unicode("const s = \"café\" ;", "const s = \"café\";")]
    fn fixes_reproduce_formatted_text(
        #[case] original: &str,
        #[case] formatted: &str,
        #[values(Granularity::Char, Granularity::Line, Granularity::Whole)] granularity: Granularity,
    ) {
        let diags = report(original, formatted, granularity);
        assert!(diags.iter().all(Diagnostic::is_fixable));

        let fixed = apply_fixes_to_content(original, &diags);

        assert_eq!(fixed.fixed_content, formatted);
        assert_eq!(fixed.fixes_applied, diags.len());
        assert!(report(&fixed.fixed_content, formatted, granularity).is_empty());
    }

    proptest! {
        #[test]
        fn applying_every_fix_leaves_nothing_to_report(
            original in "[ab;=(){}\n\t '\"]{0,48}",
            formatted in "[ab;=(){}\n\t '\"]{0,48}",
            granularity in prop_oneof![
                Just(Granularity::Char),
                Just(Granularity::Line),
                Just(Granularity::Whole),
            ],
        ) {
            let diags = report(&original, &formatted, granularity);
            prop_assert_eq!(diags.is_empty(), original == formatted);

            let fixed = apply_fixes_to_content(&original, &diags);

            prop_assert_eq!(fixed.fixes_applied, diags.len());
            prop_assert_eq!(&fixed.fixed_content, &formatted);
            prop_assert!(report(&fixed.fixed_content, &formatted, granularity).is_empty());
        }
    }
}
