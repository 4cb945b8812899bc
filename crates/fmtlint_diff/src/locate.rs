//! Difference localization.
//!
//! The common prefix and suffix of the two texts are always trimmed first. The
//! remaining middle span is then diffed with Myers' algorithm over characters
//! or lines, depending on [`Granularity`], so that a small change in a large
//! file yields a small region instead of "everything from here on changed".
//!
//! Myers costs O(N·D). A character diff is only run directly on middles up to
//! [`CHAR_DIFF_LIMIT`] bytes; larger middles are diffed by line first and each
//! changed hunk is refined by character when it is small enough. All diffing
//! for one call shares a single deadline, past which the remaining work
//! degrades to coarser regions.

use std::ops::Range;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use similar::{Algorithm, DiffTag};
use tracing::debug;

/// How finely the middle span is split into regions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One token per character. Smallest regions.
    #[default]
    Char,
    /// One token per line, terminator included.
    Line,
    /// Prefix/suffix trimming only: at most one region.
    Whole,
}

/// Default bound on the time spent diffing one pair of texts.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(1);

/// Largest middle span, in bytes of both texts together, diffed directly by
/// character.
pub const CHAR_DIFF_LIMIT: usize = 16 * 1024;

/// Options for [`locate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Region granularity.
    pub granularity: Granularity,
    /// Upper bound on the time spent in Myers' algorithm. Past it the result
    /// degrades to coarser, still correct, regions.
    pub deadline: Option<Duration>,
}

impl DiffOptions {
    /// Creates options with the given granularity and [`DEFAULT_DEADLINE`].
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            deadline: Some(DEFAULT_DEADLINE),
        }
    }

    /// Sets the deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Removes the deadline.
    pub fn without_deadline(mut self) -> Self {
        self.deadline = None;
        self
    }
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self::new(Granularity::default())
    }
}

/// A maximal span that differs between the two texts.
///
/// `old` indexes the original text, `new` the formatted text. Both are byte
/// ranges on `char` boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiffRegion {
    pub old: Range<usize>,
    pub new: Range<usize>,
}

impl DiffRegion {
    /// Creates a region.
    pub fn new(old: Range<usize>, new: Range<usize>) -> Self {
        Self { old, new }
    }

    /// True if the region only adds text.
    pub fn is_insert(&self) -> bool {
        self.old.is_empty() && !self.new.is_empty()
    }

    /// True if the region only removes text.
    pub fn is_delete(&self) -> bool {
        !self.old.is_empty() && self.new.is_empty()
    }
}

/// The located differences between an original and a formatted text.
///
/// Regions are in ascending order and never overlap; the text between two
/// consecutive regions is identical in both inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changeset<'a> {
    original: &'a str,
    formatted: &'a str,
    regions: Vec<DiffRegion>,
}

impl<'a> Changeset<'a> {
    /// Returns the original text.
    pub fn original(&self) -> &'a str {
        self.original
    }

    /// Returns the formatted text.
    pub fn formatted(&self) -> &'a str {
        self.formatted
    }

    /// Returns the located regions.
    pub fn regions(&self) -> &[DiffRegion] {
        &self.regions
    }

    /// Returns true if the texts are identical.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Returns the number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// The original text covered by `region`.
    pub fn old_text(&self, region: &DiffRegion) -> &'a str {
        &self.original[region.old.clone()]
    }

    /// The formatted text that replaces `region`.
    pub fn new_text(&self, region: &DiffRegion) -> &'a str {
        &self.formatted[region.new.clone()]
    }
}

/// Locates the differences between `original` and `formatted` at character
/// granularity.
pub fn locate<'a>(original: &'a str, formatted: &'a str) -> Changeset<'a> {
    locate_with(original, formatted, &DiffOptions::default())
}

/// Locates the differences between `original` and `formatted`.
pub fn locate_with<'a>(
    original: &'a str,
    formatted: &'a str,
    options: &DiffOptions,
) -> Changeset<'a> {
    let mut changeset = Changeset {
        original,
        formatted,
        regions: Vec::new(),
    };

    if original == formatted {
        return changeset;
    }

    let (prefix, suffix) = match options.granularity {
        Granularity::Line => line_aligned_affixes(original, formatted),
        Granularity::Whole => common_affixes(original, formatted),
        Granularity::Char => {
            let (prefix, suffix) = common_affixes(original, formatted);
            let middle = original.len() + formatted.len() - 2 * (prefix + suffix);
            if middle > CHAR_DIFF_LIMIT {
                // Keep lines intact for the line pass.
                line_aligned_affixes(original, formatted)
            } else {
                (prefix, suffix)
            }
        }
    };

    let old_mid = prefix..original.len() - suffix;
    let new_mid = prefix..formatted.len() - suffix;
    let deadline = options.deadline.map(|d| Instant::now() + d);

    changeset.regions = match options.granularity {
        Granularity::Whole => vec![DiffRegion::new(old_mid, new_mid)],
        Granularity::Char => char_regions(original, formatted, old_mid, new_mid, deadline),
        Granularity::Line => line_regions(original, formatted, old_mid, new_mid, deadline),
    };

    debug!(
        "Located {} region(s) (prefix={}, suffix={}, granularity={:?})",
        changeset.regions.len(),
        prefix,
        suffix,
        options.granularity
    );

    changeset
}

/// Byte lengths of the longest common prefix and of the longest common suffix
/// of the remainder, both on `char` boundaries.
fn common_affixes(a: &str, b: &str) -> (usize, usize) {
    let prefix = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()));

    let suffix = a[prefix..]
        .chars()
        .rev()
        .zip(b[prefix..].chars().rev())
        .take_while(|(ca, cb)| ca == cb)
        .map(|(c, _)| c.len_utf8())
        .sum();

    (prefix, suffix)
}

/// Like [`common_affixes`], but both affixes are shrunk to whole lines of
/// both texts.
fn line_aligned_affixes(a: &str, b: &str) -> (usize, usize) {
    let (prefix, suffix) = common_affixes(a, b);

    let prefix = a[..prefix].rfind('\n').map_or(0, |i| i + 1);

    let at_line_start = |text: &str| {
        let start = text.len() - suffix;
        start == prefix || text[..start].ends_with('\n')
    };
    let suffix_start = a.len() - suffix;
    let suffix = if at_line_start(a) && at_line_start(b) {
        suffix
    } else {
        let tail = &a[suffix_start..];
        tail.find('\n').map_or(0, |i| tail.len() - (i + 1))
    };

    (prefix, suffix)
}

fn line_regions(
    original: &str,
    formatted: &str,
    old: Range<usize>,
    new: Range<usize>,
    deadline: Option<Instant>,
) -> Vec<DiffRegion> {
    let old_tokens = LineTokens::new(&original[old.clone()]);
    let new_tokens = LineTokens::new(&formatted[new.clone()]);
    diff_tokens(&old_tokens, &new_tokens, old.start, new.start, deadline)
}

fn char_regions(
    original: &str,
    formatted: &str,
    old: Range<usize>,
    new: Range<usize>,
    deadline: Option<Instant>,
) -> Vec<DiffRegion> {
    if old.len() + new.len() <= CHAR_DIFF_LIMIT {
        let old_tokens = CharTokens::new(&original[old.clone()]);
        let new_tokens = CharTokens::new(&formatted[new.clone()]);
        return diff_tokens(&old_tokens, &new_tokens, old.start, new.start, deadline);
    }

    debug!(
        "Middle span of {} bytes exceeds the character diff limit, diffing by line first",
        old.len() + new.len()
    );

    let mut regions = Vec::new();
    for hunk in line_regions(original, formatted, old, new, deadline) {
        if hunk.old.len() + hunk.new.len() > CHAR_DIFF_LIMIT {
            let old_lines: Vec<_> = line_spans(original, hunk.old.clone()).collect();
            let new_lines: Vec<_> = line_spans(formatted, hunk.new.clone()).collect();
            // Line-for-line rewrite, e.g. a re-indent.
            if old_lines.len() == new_lines.len() {
                for (old_line, new_line) in old_lines.into_iter().zip(new_lines) {
                    refine(original, formatted, old_line, new_line, deadline, &mut regions);
                }
                continue;
            }
        }
        refine(original, formatted, hunk.old, hunk.new, deadline, &mut regions);
    }
    regions
}

/// Byte ranges of the lines of `text[range]`, terminators included.
fn line_spans(text: &str, range: Range<usize>) -> impl Iterator<Item = Range<usize>> + '_ {
    let base = range.start;
    text[range].split_inclusive('\n').scan(base, |cursor, line| {
        let start = *cursor;
        *cursor += line.len();
        Some(start..*cursor)
    })
}

/// Trims the affixes of one hunk and diffs what remains by character, or
/// keeps it as a single region when it is still over [`CHAR_DIFF_LIMIT`].
fn refine(
    original: &str,
    formatted: &str,
    old: Range<usize>,
    new: Range<usize>,
    deadline: Option<Instant>,
    regions: &mut Vec<DiffRegion>,
) {
    let (prefix, suffix) = common_affixes(&original[old.clone()], &formatted[new.clone()]);
    let old = old.start + prefix..old.end - suffix;
    let new = new.start + prefix..new.end - suffix;
    if old.is_empty() && new.is_empty() {
        return;
    }

    if old.len() + new.len() <= CHAR_DIFF_LIMIT {
        let old_tokens = CharTokens::new(&original[old.clone()]);
        let new_tokens = CharTokens::new(&formatted[new.clone()]);
        for region in diff_tokens(&old_tokens, &new_tokens, old.start, new.start, deadline) {
            push_merged(regions, region);
        }
    } else {
        push_merged(regions, DiffRegion::new(old, new));
    }
}

/// Appends `region`, folding it into the last one when the two touch.
fn push_merged(regions: &mut Vec<DiffRegion>, region: DiffRegion) {
    if let Some(last) = regions.last_mut()
        && last.old.end == region.old.start
        && last.new.end == region.new.start
    {
        last.old.end = region.old.end;
        last.new.end = region.new.end;
        return;
    }
    regions.push(region);
}

/// A tokenized slice of text with the byte offset of every token boundary.
trait Tokens {
    type Token: Eq + std::hash::Hash + Ord;

    fn tokens(&self) -> &[Self::Token];

    /// `boundaries()[i]` is the byte offset of token `i`; the last entry is the
    /// slice length.
    fn boundaries(&self) -> &[usize];
}

struct CharTokens {
    tokens: Vec<char>,
    boundaries: Vec<usize>,
}

impl CharTokens {
    fn new(text: &str) -> Self {
        let mut tokens = Vec::with_capacity(text.len());
        let mut boundaries = Vec::with_capacity(text.len() + 1);
        for (offset, ch) in text.char_indices() {
            tokens.push(ch);
            boundaries.push(offset);
        }
        boundaries.push(text.len());
        Self { tokens, boundaries }
    }
}

impl Tokens for CharTokens {
    type Token = char;

    fn tokens(&self) -> &[char] {
        &self.tokens
    }

    fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }
}

struct LineTokens<'a> {
    tokens: Vec<&'a str>,
    boundaries: Vec<usize>,
}

impl<'a> LineTokens<'a> {
    fn new(text: &'a str) -> Self {
        let mut tokens = Vec::new();
        let mut boundaries = Vec::new();
        let mut offset = 0;
        for line in text.split_inclusive('\n') {
            tokens.push(line);
            boundaries.push(offset);
            offset += line.len();
        }
        boundaries.push(text.len());
        Self { tokens, boundaries }
    }
}

impl<'a> Tokens for LineTokens<'a> {
    type Token = &'a str;

    fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }
}

/// Runs Myers over two token sequences and converts the non-equal operations
/// into byte regions shifted by `old_base` and `new_base`.
fn diff_tokens<T: Tokens>(
    old: &T,
    new: &T,
    old_base: usize,
    new_base: usize,
    deadline: Option<Instant>,
) -> Vec<DiffRegion> {
    let ops = similar::capture_diff_slices_deadline(
        Algorithm::Myers,
        old.tokens(),
        new.tokens(),
        deadline,
    );

    let old_bounds = old.boundaries();
    let new_bounds = new.boundaries();
    let mut regions: Vec<DiffRegion> = Vec::new();

    for op in &ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        if tag == DiffTag::Equal {
            continue;
        }

        let old_bytes =
            old_base + old_bounds[old_range.start]..old_base + old_bounds[old_range.end];
        let new_bytes =
            new_base + new_bounds[new_range.start]..new_base + new_bounds[new_range.end];

        // Adjacent delete/insert pairs that the replace grouping did not merge.
        push_merged(&mut regions, DiffRegion::new(old_bytes, new_bytes));
    }

    regions
}
