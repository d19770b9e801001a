//! Revision mapping: edit scripts to runs carrying revision metadata.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::diff::{EditOp, ParagraphChange, ParagraphEdit};

/// Author recorded on every revision unless configured otherwise.
pub const DEFAULT_AUTHOR: &str = "AI Editor";

/// What a run represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunKind {
    /// Text present in both versions
    Unchanged,
    /// Text only in the edited version
    Inserted,
    /// Text only in the original version
    Deleted,
}

/// Metadata of one tracked change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Revision {
    /// Document-unique id, increasing in document order
    pub id: u32,
    /// Who made the change
    pub author: String,
    /// When the change was made; shared by the whole document
    pub date: DateTime<Utc>,
}

/// A maximal span of same-kind edits within one paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    /// Unchanged, inserted or deleted
    pub kind: RunKind,
    /// Concatenated token text
    pub text: String,
    /// Present exactly when `kind` is not [`RunKind::Unchanged`]
    pub revision: Option<Revision>,
}

impl Run {
    fn unchanged(text: String) -> Self {
        Self {
            kind: RunKind::Unchanged,
            text,
            revision: None,
        }
    }
}

/// Revision state of a paragraph's trailing mark, the break that ends it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "revision", rename_all = "snake_case")]
pub enum ParagraphMark {
    /// The break exists in both versions
    Unchanged,
    /// The break was added along with a whole paragraph
    Inserted(Revision),
    /// The break was removed along with a whole paragraph
    Deleted(Revision),
}

impl ParagraphMark {
    /// The revision attached to the mark, if any
    pub fn revision(&self) -> Option<&Revision> {
        match self {
            ParagraphMark::Unchanged => None,
            ParagraphMark::Inserted(rev) | ParagraphMark::Deleted(rev) => Some(rev),
        }
    }
}

/// A paragraph rendered as runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisedParagraph {
    /// Runs in reading order; never empty
    pub runs: Vec<Run>,
    /// Revision state of the paragraph mark
    pub mark: ParagraphMark,
    /// Whether the paragraph itself was inserted or deleted
    pub change: ParagraphChange,
    /// Break after the paragraph in the original text
    pub original_separator: String,
    /// Break after the paragraph in the edited text
    pub edited_separator: String,
}

impl RevisedParagraph {
    /// Whether this paragraph carries no revision at all
    pub fn is_unchanged(&self) -> bool {
        self.mark == ParagraphMark::Unchanged
            && self.runs.iter().all(|r| r.kind == RunKind::Unchanged)
    }

    /// Whether the paragraph exists in the original text
    pub fn in_original(&self) -> bool {
        self.change != ParagraphChange::Inserted
    }

    /// Whether the paragraph exists in the edited text
    pub fn in_edited(&self) -> bool {
        self.change != ParagraphChange::Deleted
    }

    fn text_without(&self, skip: RunKind) -> String {
        self.runs
            .iter()
            .filter(|r| r.kind != skip)
            .map(|r| r.text.as_str())
            .collect()
    }
}

/// A removed span and the span that replaced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangePair {
    /// Index of the output paragraph the change sits in
    pub paragraph: usize,
    /// Deleted text, empty for a pure insertion
    pub original: String,
    /// Inserted text, empty for a pure deletion
    pub edited: String,
}

/// Counts describing a revised document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RevisionSummary {
    /// Output paragraphs
    pub paragraphs: usize,
    /// Paragraphs inserted as a whole
    pub inserted_paragraphs: usize,
    /// Paragraphs deleted as a whole
    pub deleted_paragraphs: usize,
    /// Inserted runs
    pub insertions: usize,
    /// Deleted runs
    pub deletions: usize,
    /// Characters across inserted runs
    pub inserted_chars: usize,
    /// Characters across deleted runs
    pub deleted_chars: usize,
}

impl RevisionSummary {
    /// Whether the two versions were identical
    pub fn is_identical(&self) -> bool {
        self.insertions == 0
            && self.deletions == 0
            && self.inserted_paragraphs == 0
            && self.deleted_paragraphs == 0
    }
}

impl std::fmt::Display for RevisionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} paragraphs, {} insertions (+{} chars), {} deletions (-{} chars)",
            self.paragraphs,
            self.insertions,
            self.inserted_chars,
            self.deletions,
            self.deleted_chars
        )
    }
}

/// A whole document of revised paragraphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisedDocument {
    /// Paragraphs in document order
    pub paragraphs: Vec<RevisedParagraph>,
    /// Author recorded on every revision
    pub author: String,
    /// Time recorded on every revision
    pub timestamp: DateTime<Utc>,
    /// First id not used by any revision
    pub next_revision_id: u32,
}

impl RevisedDocument {
    /// The original text: unchanged and deleted runs of every paragraph
    /// that is not a whole-paragraph insertion.
    pub fn original_text(&self) -> String {
        let mut out = String::new();
        for p in self.paragraphs.iter().filter(|p| p.in_original()) {
            out.push_str(&p.text_without(RunKind::Inserted));
            out.push_str(&p.original_separator);
        }
        out
    }

    /// The edited text: unchanged and inserted runs of every paragraph
    /// that is not a whole-paragraph deletion.
    pub fn edited_text(&self) -> String {
        let mut out = String::new();
        for p in self.paragraphs.iter().filter(|p| p.in_edited()) {
            out.push_str(&p.text_without(RunKind::Deleted));
            out.push_str(&p.edited_separator);
        }
        out
    }

    /// Every revision id in emission order
    pub fn revision_ids(&self) -> Vec<u32> {
        let mut ids = Vec::new();
        for paragraph in &self.paragraphs {
            ids.extend(paragraph.mark.revision().map(|rev| rev.id));
            ids.extend(
                paragraph
                    .runs
                    .iter()
                    .filter_map(|r| r.revision.as_ref().map(|rev| rev.id)),
            );
        }
        ids
    }

    /// Runs of the given kind, in document order
    pub fn runs_of(&self, kind: RunKind) -> impl Iterator<Item = &Run> {
        self.paragraphs
            .iter()
            .flat_map(|p| p.runs.iter())
            .filter(move |r| r.kind == kind)
    }

    /// Deleted/inserted spans, with a deletion directly followed by an
    /// insertion reported as one replacement.
    pub fn change_pairs(&self) -> Vec<ChangePair> {
        let mut pairs = Vec::new();
        for (index, paragraph) in self.paragraphs.iter().enumerate() {
            let mut pending: Option<String> = None;
            for run in &paragraph.runs {
                match run.kind {
                    RunKind::Deleted => {
                        if let Some(original) = pending.replace(run.text.clone()) {
                            pairs.push(ChangePair {
                                paragraph: index,
                                original,
                                edited: String::new(),
                            });
                        }
                    }
                    RunKind::Inserted => pairs.push(ChangePair {
                        paragraph: index,
                        original: pending.take().unwrap_or_default(),
                        edited: run.text.clone(),
                    }),
                    RunKind::Unchanged => {
                        if let Some(original) = pending.take() {
                            pairs.push(ChangePair {
                                paragraph: index,
                                original,
                                edited: String::new(),
                            });
                        }
                    }
                }
            }
            if let Some(original) = pending {
                pairs.push(ChangePair {
                    paragraph: index,
                    original,
                    edited: String::new(),
                });
            }
        }
        pairs
    }

    /// Counts of paragraphs, runs and characters by kind
    pub fn summary(&self) -> RevisionSummary {
        let mut summary = RevisionSummary {
            paragraphs: self.paragraphs.len(),
            ..Default::default()
        };
        for paragraph in &self.paragraphs {
            match paragraph.change {
                ParagraphChange::Inserted => summary.inserted_paragraphs += 1,
                ParagraphChange::Deleted => summary.deleted_paragraphs += 1,
                ParagraphChange::Matched => {}
            }
            for run in &paragraph.runs {
                match run.kind {
                    RunKind::Inserted => {
                        summary.insertions += 1;
                        summary.inserted_chars += run.text.chars().count();
                    }
                    RunKind::Deleted => {
                        summary.deletions += 1;
                        summary.deleted_chars += run.text.chars().count();
                    }
                    RunKind::Unchanged => {}
                }
            }
        }
        summary
    }
}

/// Hands out revision ids for one document
struct RevisionStamp<'a> {
    next_id: u32,
    author: &'a str,
    date: DateTime<Utc>,
}

impl RevisionStamp<'_> {
    fn next(&mut self) -> Revision {
        let id = self.next_id;
        self.next_id += 1;
        Revision {
            id,
            author: self.author.to_string(),
            date: self.date,
        }
    }
}

/// Coalesce per-paragraph edit scripts into runs and stamp revisions.
///
/// Ids start at 1 and follow document order: a paragraph's mark, then its
/// runs. Mark revisions follow [`mark_changes`].
pub fn map_to_runs(
    edits: &[ParagraphEdit],
    author: &str,
    timestamp: DateTime<Utc>,
) -> RevisedDocument {
    let mut stamp = RevisionStamp {
        next_id: 1,
        author,
        date: timestamp,
    };
    let marks = mark_changes(edits);

    let paragraphs = edits
        .iter()
        .zip(marks)
        .map(|(edit, mark_change)| {
            // The mark is rendered ahead of the runs, so it is stamped first
            let mark = match mark_change {
                ParagraphChange::Matched => ParagraphMark::Unchanged,
                ParagraphChange::Inserted => ParagraphMark::Inserted(stamp.next()),
                ParagraphChange::Deleted => ParagraphMark::Deleted(stamp.next()),
            };

            let mut runs = coalesce(&edit.ops);
            for run in runs.iter_mut().filter(|r| r.kind != RunKind::Unchanged) {
                run.revision = Some(stamp.next());
            }
            if runs.is_empty() {
                runs.push(Run::unchanged(String::new()));
            }

            RevisedParagraph {
                runs,
                mark,
                change: edit.change,
                original_separator: edit.original_separator.clone(),
                edited_separator: edit.edited_separator.clone(),
            }
        })
        .collect();

    RevisedDocument {
        paragraphs,
        author: author.to_string(),
        timestamp,
        next_revision_id: stamp.next_id,
    }
}

/// Which revision each paragraph mark records.
///
/// A mark stands for the break after its paragraph, so a whole inserted or
/// deleted paragraph normally revises its own mark. The last mark of the
/// document cannot be revised: a trailing block of whole-paragraph changes
/// instead records each change on the mark before it, and the last mark
/// stays unchanged.
///
/// When no paragraph survives in both texts there is no mark to shift onto.
/// Marks are then chosen so accepting every change yields exactly the
/// inserted paragraphs.
pub fn mark_changes(edits: &[ParagraphEdit]) -> Vec<ParagraphChange> {
    let mut marks: Vec<ParagraphChange> = edits.iter().map(|e| e.change).collect();
    let Some(last) = edits.len().checked_sub(1) else {
        return marks;
    };

    match edits.iter().rposition(|e| e.change == ParagraphChange::Matched) {
        Some(kept) if kept == last => {}
        Some(kept) => {
            for j in kept + 1..=last {
                marks[j - 1] = edits[j].change;
            }
        }
        None => {
            let last_inserted = edits
                .iter()
                .rposition(|e| e.change == ParagraphChange::Inserted);
            for (j, mark) in marks.iter_mut().enumerate() {
                let splits = edits[j].change == ParagraphChange::Inserted && Some(j) != last_inserted;
                *mark = if splits {
                    ParagraphChange::Inserted
                } else {
                    ParagraphChange::Deleted
                };
            }
        }
    }
    marks[last] = ParagraphChange::Matched;
    marks
}

fn coalesce(ops: &[EditOp]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for op in ops {
        let kind = match op {
            EditOp::Retain(_) => RunKind::Unchanged,
            EditOp::Insert(_) => RunKind::Inserted,
            EditOp::Delete(_) => RunKind::Deleted,
        };
        let text = &op.token().text;
        match runs.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(text),
            _ => runs.push(Run {
                kind,
                text: text.clone(),
                revision: None,
            }),
        }
    }
    runs
}
