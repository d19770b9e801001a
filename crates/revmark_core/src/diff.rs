//! Two-level diff engine.
//!
//! Paragraphs are first aligned as atomic symbols. Paragraphs left unmatched
//! between two aligned ones are paired by word similarity, and every pair is
//! then aligned token by token. Alignment uses a longest-common-subsequence
//! table, or an anchor-based split when the table would exceed
//! [`DiffOptions::max_lcs_cells`].

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::tokenizer::{Paragraph, Token};

/// Default upper bound on LCS table cells for a single alignment.
pub const DEFAULT_MAX_LCS_CELLS: usize = 4_000_000;

/// Default minimum word similarity for pairing two changed paragraphs.
pub const DEFAULT_PAIRING_THRESHOLD: f64 = 0.5;

/// Gap size above which changed paragraphs are paired by position.
const MAX_PAIRING_CELLS: usize = 250_000;

/// Tunables for alignment
#[derive(Debug, Clone, Serialize)]
pub struct DiffOptions {
    /// Largest `(n+1)·(m+1)` table allowed before the anchor fallback kicks in
    pub max_lcs_cells: usize,
    /// Minimum Dice similarity over words for two paragraphs to be paired
    pub pairing_threshold: f64,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            max_lcs_cells: DEFAULT_MAX_LCS_CELLS,
            pairing_threshold: DEFAULT_PAIRING_THRESHOLD,
        }
    }
}

/// One step of an index-level edit script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `a[old]` and `b[new]` are equal and kept
    Keep {
        /// Index into `a`
        old: usize,
        /// Index into `b`
        new: usize,
    },
    /// `a[i]` is removed
    Remove(usize),
    /// `b[j]` is added
    Add(usize),
}

/// A token-level edit operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "token", rename_all = "snake_case")]
pub enum EditOp {
    /// Token present in both texts
    Retain(Token),
    /// Token only in the edited text
    Insert(Token),
    /// Token only in the original text
    Delete(Token),
}

impl EditOp {
    /// The token carried by this op
    pub fn token(&self) -> &Token {
        match self {
            EditOp::Retain(t) | EditOp::Insert(t) | EditOp::Delete(t) => t,
        }
    }
}

/// How a paragraph as a whole relates to the two texts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphChange {
    /// Present in both texts, content possibly changed
    Matched,
    /// Only in the edited text
    Inserted,
    /// Only in the original text
    Deleted,
}

/// The edit script of one output paragraph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphEdit {
    /// Whether the paragraph itself was inserted or deleted
    pub change: ParagraphChange,
    /// Token operations in reading order
    pub ops: Vec<EditOp>,
    /// Break after the paragraph in the original text; empty when inserted
    pub original_separator: String,
    /// Break after the paragraph in the edited text; empty when deleted
    pub edited_separator: String,
}

impl ParagraphEdit {
    /// Whether the paragraph carries no insert or delete at all
    pub fn is_unchanged(&self) -> bool {
        self.change == ParagraphChange::Matched
            && self.ops.iter().all(|op| matches!(op, EditOp::Retain(_)))
    }
}

/// Align two tokenized texts into one edit script per output paragraph.
pub fn align(
    original: &[Paragraph],
    edited: &[Paragraph],
    options: &DiffOptions,
) -> Vec<ParagraphEdit> {
    let old_texts: Vec<String> = original.iter().map(Paragraph::text).collect();
    let new_texts: Vec<String> = edited.iter().map(Paragraph::text).collect();
    let steps = diff_sequences(&old_texts, &new_texts, options.max_lcs_cells);

    log::debug!(
        "Paragraph alignment: {} original, {} edited, {} steps",
        original.len(),
        edited.len(),
        steps.len()
    );

    let mut edits = Vec::with_capacity(steps.len());
    let mut removed = Vec::new();
    let mut added = Vec::new();

    for step in steps {
        match step {
            Step::Keep { old, new } => {
                flush_gap(original, edited, &removed, &added, options, &mut edits);
                removed.clear();
                added.clear();
                edits.push(ParagraphEdit {
                    change: ParagraphChange::Matched,
                    ops: original[old].tokens.iter().cloned().map(EditOp::Retain).collect(),
                    original_separator: original[old].separator.clone(),
                    edited_separator: edited[new].separator.clone(),
                });
            }
            Step::Remove(i) => removed.push(i),
            Step::Add(j) => added.push(j),
        }
    }
    flush_gap(original, edited, &removed, &added, options, &mut edits);

    edits
}

/// Token-level edit script between two paragraphs.
pub fn diff_paragraph(old: &Paragraph, new: &Paragraph, max_lcs_cells: usize) -> Vec<EditOp> {
    let a: Vec<&str> = old.tokens.iter().map(|t| t.text.as_str()).collect();
    let b: Vec<&str> = new.tokens.iter().map(|t| t.text.as_str()).collect();

    diff_sequences(&a, &b, max_lcs_cells)
        .into_iter()
        .map(|step| match step {
            Step::Keep { old: i, .. } => EditOp::Retain(old.tokens[i].clone()),
            Step::Remove(i) => EditOp::Delete(old.tokens[i].clone()),
            Step::Add(j) => EditOp::Insert(new.tokens[j].clone()),
        })
        .collect()
}

/// Emit the paragraphs of one unmatched stretch.
fn flush_gap(
    original: &[Paragraph],
    edited: &[Paragraph],
    removed: &[usize],
    added: &[usize],
    options: &DiffOptions,
    edits: &mut Vec<ParagraphEdit>,
) {
    if removed.is_empty() && added.is_empty() {
        return;
    }

    let pairs = pair_paragraphs(original, edited, removed, added, options.pairing_threshold);

    let deleted = |i: usize| ParagraphEdit {
        change: ParagraphChange::Deleted,
        ops: original[i].tokens.iter().cloned().map(EditOp::Delete).collect(),
        original_separator: original[i].separator.clone(),
        edited_separator: String::new(),
    };
    let inserted = |j: usize| ParagraphEdit {
        change: ParagraphChange::Inserted,
        ops: edited[j].tokens.iter().cloned().map(EditOp::Insert).collect(),
        original_separator: String::new(),
        edited_separator: edited[j].separator.clone(),
    };

    let (mut ri, mut ai) = (0, 0);
    for (pi, pj) in pairs {
        while removed[ri] != pi {
            edits.push(deleted(removed[ri]));
            ri += 1;
        }
        while added[ai] != pj {
            edits.push(inserted(added[ai]));
            ai += 1;
        }
        edits.push(ParagraphEdit {
            change: ParagraphChange::Matched,
            ops: diff_paragraph(&original[pi], &edited[pj], options.max_lcs_cells),
            original_separator: original[pi].separator.clone(),
            edited_separator: edited[pj].separator.clone(),
        });
        ri += 1;
        ai += 1;
    }
    edits.extend(removed[ri..].iter().map(|&i| deleted(i)));
    edits.extend(added[ai..].iter().map(|&j| inserted(j)));
}

/// Pair removed and added paragraphs that are rewrites of each other.
///
/// Returns `(original index, edited index)` pairs increasing in both.
fn pair_paragraphs(
    original: &[Paragraph],
    edited: &[Paragraph],
    removed: &[usize],
    added: &[usize],
    threshold: f64,
) -> Vec<(usize, usize)> {
    let (k, m) = (removed.len(), added.len());
    if k == 0 || m == 0 {
        return Vec::new();
    }
    // A single paragraph replaced by a single paragraph is an in-place rewrite
    if k == 1 && m == 1 {
        return vec![(removed[0], added[0])];
    }
    if k.saturating_mul(m) > MAX_PAIRING_CELLS {
        log::debug!("Pairing {}x{} paragraphs by position", k, m);
        return removed.iter().copied().zip(added.iter().copied()).collect();
    }

    let old_words: Vec<WordBag> = removed.iter().map(|&i| WordBag::new(&original[i])).collect();
    let new_words: Vec<WordBag> = added.iter().map(|&j| WordBag::new(&edited[j])).collect();
    let similar: Vec<bool> = (0..k * m)
        .map(|cell| old_words[cell / m].similarity(&new_words[cell % m]) >= threshold)
        .collect();

    let width = m + 1;
    let mut table = vec![0u32; (k + 1) * width];
    for i in (0..k).rev() {
        for j in (0..m).rev() {
            let skip = table[(i + 1) * width + j].max(table[i * width + j + 1]);
            let take = if similar[i * m + j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                0
            };
            table[i * width + j] = skip.max(take);
        }
    }

    let mut pairs = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < k && j < m {
        if similar[i * m + j] && table[i * width + j] == table[(i + 1) * width + j + 1] + 1 {
            pairs.push((removed[i], added[j]));
            i += 1;
            j += 1;
        } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    pairs
}

/// Multiset of lowercased words used for paragraph similarity
struct WordBag {
    counts: HashMap<String, usize>,
    total: usize,
    has_content: bool,
}

impl WordBag {
    fn new(paragraph: &Paragraph) -> Self {
        let mut counts = HashMap::new();
        let mut total = 0;
        for word in paragraph.words() {
            *counts.entry(word.text.to_lowercase()).or_insert(0) += 1;
            total += 1;
        }
        Self {
            counts,
            total,
            has_content: !paragraph.is_empty(),
        }
    }

    /// Dice coefficient over the two word multisets.
    fn similarity(&self, other: &WordBag) -> f64 {
        if self.total == 0 || other.total == 0 {
            // Word-less paragraphs (scene breaks, rules) only pair with each other
            return if self.total == other.total && self.has_content && other.has_content {
                1.0
            } else {
                0.0
            };
        }
        let shared: usize = self
            .counts
            .iter()
            .map(|(word, n)| (*n).min(other.counts.get(word).copied().unwrap_or(0)))
            .sum();
        (2 * shared) as f64 / (self.total + other.total) as f64
    }
}

/// Minimal edit script turning `a` into `b`.
///
/// Matches are taken as early as possible, so shared prefixes stay intact.
/// Within every change hunk removals come before additions.
pub fn diff_sequences<T: Eq + Hash>(a: &[T], b: &[T], max_lcs_cells: usize) -> Vec<Step> {
    let mut steps = Vec::with_capacity(a.len().max(b.len()));
    diff_range(a, b, 0, a.len(), 0, b.len(), max_lcs_cells, &mut steps);
    group_hunks(&mut steps);
    steps
}

#[allow(clippy::too_many_arguments)]
fn diff_range<T: Eq + Hash>(
    a: &[T],
    b: &[T],
    mut a_lo: usize,
    mut a_hi: usize,
    mut b_lo: usize,
    mut b_hi: usize,
    max_lcs_cells: usize,
    steps: &mut Vec<Step>,
) {
    while a_lo < a_hi && b_lo < b_hi && a[a_lo] == b[b_lo] {
        steps.push(Step::Keep {
            old: a_lo,
            new: b_lo,
        });
        a_lo += 1;
        b_lo += 1;
    }

    let mut suffix = 0;
    while a_lo < a_hi && b_lo < b_hi && a[a_hi - 1] == b[b_hi - 1] {
        a_hi -= 1;
        b_hi -= 1;
        suffix += 1;
    }

    let (n, m) = (a_hi - a_lo, b_hi - b_lo);
    if n == 0 {
        steps.extend((b_lo..b_hi).map(Step::Add));
    } else if m == 0 {
        steps.extend((a_lo..a_hi).map(Step::Remove));
    } else if (n + 1)
        .checked_mul(m + 1)
        .is_some_and(|cells| cells <= max_lcs_cells)
    {
        lcs_walk(a, b, a_lo, a_hi, b_lo, b_hi, steps);
    } else {
        anchored(a, b, a_lo, a_hi, b_lo, b_hi, max_lcs_cells, steps);
    }

    steps.extend((0..suffix).map(|s| Step::Keep {
        old: a_hi + s,
        new: b_hi + s,
    }));
}

/// Full dynamic-programming LCS over `a[a_lo..a_hi]` and `b[b_lo..b_hi]`.
fn lcs_walk<T: Eq>(
    a: &[T],
    b: &[T],
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
    steps: &mut Vec<Step>,
) {
    let (n, m) = (a_hi - a_lo, b_hi - b_lo);
    let width = m + 1;
    // table[i][j] = LCS length of a[a_lo + i..a_hi] and b[b_lo + j..b_hi]
    let mut table = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i * width + j] = if a[a_lo + i] == b[b_lo + j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[a_lo + i] == b[b_lo + j] {
            steps.push(Step::Keep {
                old: a_lo + i,
                new: b_lo + j,
            });
            i += 1;
            j += 1;
        } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
            steps.push(Step::Remove(a_lo + i));
            i += 1;
        } else {
            steps.push(Step::Add(b_lo + j));
            j += 1;
        }
    }
    steps.extend((a_lo + i..a_hi).map(Step::Remove));
    steps.extend((b_lo + j..b_hi).map(Step::Add));
}

/// Bounded alignment for ranges too large for a full table.
///
/// Elements occurring exactly once on each side become anchor candidates;
/// the longest chain of candidates increasing on both sides is kept and the
/// ranges between anchors are aligned recursively.
#[allow(clippy::too_many_arguments)]
fn anchored<T: Eq + Hash>(
    a: &[T],
    b: &[T],
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
    max_lcs_cells: usize,
    steps: &mut Vec<Step>,
) {
    let anchors = unique_anchors(a, b, a_lo, a_hi, b_lo, b_hi);
    log::debug!(
        "Anchor fallback on {}x{} range: {} anchors",
        a_hi - a_lo,
        b_hi - b_lo,
        anchors.len()
    );

    if anchors.is_empty() {
        log::warn!(
            "No anchors in {}x{} range, marking it fully replaced",
            a_hi - a_lo,
            b_hi - b_lo
        );
        steps.extend((a_lo..a_hi).map(Step::Remove));
        steps.extend((b_lo..b_hi).map(Step::Add));
        return;
    }

    let (mut prev_a, mut prev_b) = (a_lo, b_lo);
    for (ia, ib) in anchors {
        diff_range(a, b, prev_a, ia, prev_b, ib, max_lcs_cells, steps);
        steps.push(Step::Keep { old: ia, new: ib });
        prev_a = ia + 1;
        prev_b = ib + 1;
    }
    diff_range(a, b, prev_a, a_hi, prev_b, b_hi, max_lcs_cells, steps);
}

/// Longest chain of once-only elements, increasing on both sides.
fn unique_anchors<T: Eq + Hash>(
    a: &[T],
    b: &[T],
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> Vec<(usize, usize)> {
    // (count in a, index in a, count in b, index in b)
    let mut seen: HashMap<&T, (u32, usize, u32, usize)> = HashMap::new();
    for i in a_lo..a_hi {
        let entry = seen.entry(&a[i]).or_insert((0, i, 0, 0));
        entry.0 += 1;
    }
    for j in b_lo..b_hi {
        if let Some(entry) = seen.get_mut(&b[j]) {
            entry.2 += 1;
            entry.3 = j;
        }
    }

    let mut candidates: Vec<(usize, usize)> = seen
        .into_values()
        .filter(|&(ca, _, cb, _)| ca == 1 && cb == 1)
        .map(|(_, ia, _, ib)| (ia, ib))
        .collect();
    candidates.sort_unstable();

    longest_increasing(&candidates)
}

/// Patience-style longest increasing subsequence on the second coordinate.
fn longest_increasing(candidates: &[(usize, usize)]) -> Vec<(usize, usize)> {
    // tails[k] = index into candidates of the smallest tail of a chain of length k + 1
    let mut tails: Vec<usize> = Vec::new();
    let mut prev: Vec<Option<usize>> = vec![None; candidates.len()];

    for (idx, &(_, ib)) in candidates.iter().enumerate() {
        let pos = tails.partition_point(|&t| candidates[t].1 < ib);
        if pos > 0 {
            prev[idx] = Some(tails[pos - 1]);
        }
        if pos == tails.len() {
            tails.push(idx);
        } else {
            tails[pos] = idx;
        }
    }

    let mut chain = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(idx) = cursor {
        chain.push(candidates[idx]);
        cursor = prev[idx];
    }
    chain.reverse();
    chain
}

/// Reorder every stretch of non-keep steps into removals then additions.
fn group_hunks(steps: &mut [Step]) {
    let mut start = 0;
    while start < steps.len() {
        if matches!(steps[start], Step::Keep { .. }) {
            start += 1;
            continue;
        }
        let end = steps[start..]
            .iter()
            .position(|s| matches!(s, Step::Keep { .. }))
            .map_or(steps.len(), |p| start + p);
        // Stable: keeps removal and addition order within the hunk
        steps[start..end].sort_by_key(|s| matches!(s, Step::Add(_)));
        start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    /// Apply steps and return (rebuilt a, rebuilt b)
    fn replay(a: &[char], b: &[char], steps: &[Step]) -> (String, String) {
        let mut old = String::new();
        let mut new = String::new();
        for step in steps {
            match *step {
                Step::Keep { old: i, new: j } => {
                    assert_eq!(a[i], b[j]);
                    old.push(a[i]);
                    new.push(b[j]);
                }
                Step::Remove(i) => old.push(a[i]),
                Step::Add(j) => new.push(b[j]),
            }
        }
        (old, new)
    }

    fn keeps(steps: &[Step]) -> usize {
        steps
            .iter()
            .filter(|s| matches!(s, Step::Keep { .. }))
            .count()
    }

    #[test]
    fn test_lcs_is_minimal() {
        let a = chars("ABCBDAB");
        let b = chars("BDCABA");
        let steps = diff_sequences(&a, &b, DEFAULT_MAX_LCS_CELLS);
        assert_eq!(keeps(&steps), 4);
        let (old, new) = replay(&a, &b, &steps);
        assert_eq!(old, "ABCBDAB");
        assert_eq!(new, "BDCABA");
    }

    #[test]
    fn test_removals_before_additions() {
        let a = chars("xaby");
        let b = chars("xcdy");
        let steps = diff_sequences(&a, &b, DEFAULT_MAX_LCS_CELLS);
        assert_eq!(
            steps,
            vec![
                Step::Keep { old: 0, new: 0 },
                Step::Remove(1),
                Step::Remove(2),
                Step::Add(1),
                Step::Add(2),
                Step::Keep { old: 3, new: 3 },
            ]
        );
    }

    #[test]
    fn test_earliest_match_preferred() {
        // Both "a" in b could match the single "a"; the earliest wins
        let a = chars("a");
        let b = chars("aa");
        let steps = diff_sequences(&a, &b, DEFAULT_MAX_LCS_CELLS);
        assert_eq!(steps, vec![Step::Keep { old: 0, new: 0 }, Step::Add(1)]);
    }

    #[test]
    fn test_empty_sides() {
        let empty: Vec<char> = Vec::new();
        let b = chars("abc");
        assert_eq!(
            diff_sequences(&empty, &b, 10),
            vec![Step::Add(0), Step::Add(1), Step::Add(2)]
        );
        assert_eq!(
            diff_sequences(&b, &empty, 10),
            vec![Step::Remove(0), Step::Remove(1), Step::Remove(2)]
        );
        assert!(diff_sequences(&empty, &empty, 10).is_empty());
    }

    #[test]
    fn test_anchor_fallback_matches_unique_elements() {
        let a: Vec<u32> = (0..200).collect();
        let mut b = a.clone();
        b[10] = 1000;
        b[150] = 2000;
        b.insert(0, 3000);
        b.push(4000);
        // Far below the 201x205 table
        let steps = diff_sequences(&a, &b, 64);
        assert_eq!(keeps(&steps), 198);

        let removed: Vec<usize> = steps
            .iter()
            .filter_map(|s| match s {
                Step::Remove(i) => Some(*i),
                _ => None,
            })
            .collect();
        assert_eq!(removed, vec![10, 150]);
    }

    #[test]
    fn test_anchor_fallback_without_anchors_replaces_range() {
        let a = chars("aaaaaaaa");
        let b = chars("bbbbbbbb");
        let steps = diff_sequences(&a, &b, 4);
        assert_eq!(keeps(&steps), 0);
        assert_eq!(steps.len(), 16);
        assert!(matches!(steps[0], Step::Remove(0)));
        assert!(matches!(steps[8], Step::Add(0)));
    }

    #[test]
    fn test_longest_increasing_chain() {
        let candidates = vec![(0, 3), (1, 1), (2, 2), (3, 0), (4, 4)];
        assert_eq!(
            longest_increasing(&candidates),
            vec![(1, 1), (2, 2), (4, 4)]
        );
    }

    #[test]
    fn test_align_hello_world() {
        let old = tokenize("Hello world");
        let new = tokenize("Hello there");
        let edits = align(&old, &new, &DiffOptions::default());
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].change, ParagraphChange::Matched);

        let rendered: Vec<String> = edits[0]
            .ops
            .iter()
            .map(|op| match op {
                EditOp::Retain(t) => format!("={}", t.text),
                EditOp::Insert(t) => format!("+{}", t.text),
                EditOp::Delete(t) => format!("-{}", t.text),
            })
            .collect();
        assert_eq!(rendered, vec!["=Hello", "= ", "-world", "+there"]);
    }

    #[test]
    fn test_align_inserted_paragraph() {
        let old = tokenize("First.\n\nThird.");
        let new = tokenize("First.\n\nSecond.\n\nThird.");
        let edits = align(&old, &new, &DiffOptions::default());
        let changes: Vec<ParagraphChange> = edits.iter().map(|e| e.change).collect();
        assert_eq!(
            changes,
            vec![
                ParagraphChange::Matched,
                ParagraphChange::Inserted,
                ParagraphChange::Matched
            ]
        );
        assert!(edits[0].is_unchanged());
        assert!(edits[2].is_unchanged());
    }

    #[test]
    fn test_align_pairs_similar_paragraphs() {
        let old = tokenize("The storm rolled in over the hills.\n\nEnd.");
        let new = tokenize(
            "A brand new opening line.\n\nThe storm rolled slowly in over the hills.\n\nEnd.",
        );
        let edits = align(&old, &new, &DiffOptions::default());
        let changes: Vec<ParagraphChange> = edits.iter().map(|e| e.change).collect();
        assert_eq!(
            changes,
            vec![
                ParagraphChange::Inserted,
                ParagraphChange::Matched,
                ParagraphChange::Matched
            ]
        );
        assert!(!edits[1].is_unchanged());
        assert!(edits[2].is_unchanged());
    }

    #[test]
    fn test_align_deleted_paragraph() {
        let old = tokenize("Keep.\n\nDrop this one entirely.\n\nKeep too.");
        let new = tokenize("Keep.\n\nKeep too.");
        let edits = align(&old, &new, &DiffOptions::default());
        assert_eq!(edits.len(), 3);
        assert_eq!(edits[1].change, ParagraphChange::Deleted);
        assert!(edits[1].ops.iter().all(|op| matches!(op, EditOp::Delete(_))));
    }

    #[test]
    fn test_align_carries_each_side_separator() {
        let old = tokenize("Keep.\n\n\nDrop.");
        let new = tokenize("Keep.\r\n\r\nAdd.");
        let edits = align(&old, &new, &DiffOptions::default());
        assert_eq!(edits[0].original_separator, "\n\n\n");
        assert_eq!(edits[0].edited_separator, "\r\n\r\n");
        assert!(edits[1..].iter().all(|e| e.original_separator.is_empty()));
        assert!(edits[1..].iter().all(|e| e.edited_separator.is_empty()));
    }

    #[test]
    fn test_word_bag_similarity() {
        let a = WordBag::new(&tokenize("the cat sat")[0]);
        let b = WordBag::new(&tokenize("The cat stood")[0]);
        let c = WordBag::new(&tokenize("* * *")[0]);
        let d = WordBag::new(&tokenize("- - -")[0]);
        assert!((a.similarity(&b) - 2.0 * 2.0 / 6.0).abs() < 1e-9);
        assert_eq!(a.similarity(&c), 0.0);
        assert_eq!(c.similarity(&d), 1.0);
    }
}
