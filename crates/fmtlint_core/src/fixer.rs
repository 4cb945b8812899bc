//! Applies diagnostic fixes to text.

use tracing::{debug, warn};

use fmtlint_plugin::{Diagnostic, Fix};

/// Result of applying fixes to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixerResult {
    /// Number of fixes applied.
    pub fixes_applied: usize,
    /// The fixed content.
    pub fixed_content: String,
    /// Whether the content was modified.
    pub modified: bool,
}

impl FixerResult {
    pub fn new(fixes_applied: usize, fixed_content: String, modified: bool) -> Self {
        Self {
            fixes_applied,
            fixed_content,
            modified,
        }
    }

    /// Creates a result indicating no changes were made.
    pub fn unchanged(content: String) -> Self {
        Self::new(0, content, false)
    }
}

/// Applies the fixes carried by `diagnostics` to `content`.
///
/// Fixes are applied from the end of the text towards the start so earlier
/// offsets stay valid. A fix that overlaps one already accepted, or whose span
/// is out of bounds or splits a character, is skipped.
pub fn apply_fixes_to_content(content: &str, diagnostics: &[Diagnostic]) -> FixerResult {
    let mut fixes: Vec<&Fix> = diagnostics.iter().filter_map(|d| d.fix.as_ref()).collect();

    if fixes.is_empty() {
        return FixerResult::unchanged(content.to_string());
    }

    // Descending by start; for equal starts the longer span goes first.
    fixes.sort_by(|a, b| {
        b.span
            .start
            .cmp(&a.span.start)
            .then(b.span.end.cmp(&a.span.end))
    });
    let fixes = filter_overlapping_fixes(fixes);

    let mut result = content.to_string();
    let mut applied = 0;

    for fix in &fixes {
        let range = fix.span.as_range();

        if range.start > range.end
            || range.end > result.len()
            || !result.is_char_boundary(range.start)
            || !result.is_char_boundary(range.end)
        {
            warn!(
                "Invalid fix span: start={}, end={}, content_len={}",
                range.start,
                range.end,
                result.len()
            );
            continue;
        }

        debug!(
            "Applying fix: replace [{}..{}] with {:?}",
            range.start, range.end, fix.text
        );
        result.replace_range(range, &fix.text);
        applied += 1;
    }

    FixerResult::new(applied, result, applied > 0)
}

/// Drops fixes that collide with one already accepted.
///
/// Expects `fixes` sorted by start descending. Two fixes collide when their
/// spans overlap or when both insert at the same offset.
pub(crate) fn filter_overlapping_fixes(fixes: Vec<&Fix>) -> Vec<&Fix> {
    #[cfg(debug_assertions)]
    for window in fixes.windows(2) {
        debug_assert!(
            window[0].span.start >= window[1].span.start,
            "Fixes must be sorted by start descending for filter_overlapping_fixes"
        );
    }

    let mut result: Vec<&Fix> = Vec::with_capacity(fixes.len());

    for fix in fixes {
        // `last` has the smallest start of the accepted fixes, so it is the
        // only one `fix` can collide with.
        let collides = result.last().is_some_and(|last| {
            let same_insert_point =
                fix.span.is_empty() && last.span.is_empty() && fix.span.start == last.span.start;
            fix.span.end > last.span.start || same_insert_point
        });

        if collides {
            warn!(
                "Skipping overlapping fix at [{}, {}]",
                fix.span.start, fix.span.end
            );
        } else {
            result.push(fix);
        }
    }

    result
}
