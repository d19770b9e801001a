//! The generate pipeline: tokenize, align, map revisions, build parts, pack.
//!
//! Every call is independent. The revision counter and the revision
//! timestamp live only for the duration of one [`Generator::generate`] call,
//! so a single [`Generator`] can be shared across threads.
//!
//! # Example
//!
//! ```ignore
//! use revmark_core::engine::generate;
//!
//! let bytes = generate("Hello world", "Hello there")?;
//! assert_eq!(&bytes[..2], b"PK");
//! ```

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;

use crate::diff::{DEFAULT_MAX_LCS_CELLS, DEFAULT_PAIRING_THRESHOLD, DiffOptions, align};
use crate::docx;
use crate::error::{Result, RevmarkError, Side};
use crate::package::pack;
use crate::revision::{DEFAULT_AUTHOR, RevisedDocument, RevisionSummary, map_to_runs};
use crate::tokenizer::tokenize_checked;

/// Options for one or many generate calls
#[derive(Debug, Clone, Serialize)]
pub struct EngineOptions {
    /// Author recorded on every revision
    pub author: String,
    /// Largest LCS table before the anchor fallback is used
    pub max_lcs_cells: usize,
    /// Minimum word similarity for pairing rewritten paragraphs
    pub pairing_threshold: f64,
    /// Fixed revision time; the current time is used when unset
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            author: DEFAULT_AUTHOR.to_string(),
            max_lcs_cells: DEFAULT_MAX_LCS_CELLS,
            pairing_threshold: DEFAULT_PAIRING_THRESHOLD,
            timestamp: None,
        }
    }
}

impl EngineOptions {
    fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            max_lcs_cells: self.max_lcs_cells,
            pairing_threshold: self.pairing_threshold,
        }
    }
}

/// Result of a successful generate call
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    /// The `.docx` package
    pub bytes: Vec<u8>,
    /// The revised document the package was rendered from
    pub document: RevisedDocument,
    /// Counts of what changed
    pub summary: RevisionSummary,
}

/// Turns original/edited pairs into tracked-changes documents
#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: EngineOptions,
}

impl Generator {
    /// Create a generator with the given options
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// The options this generator runs with
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Compute the revised document without rendering it.
    ///
    /// Fails on empty input and when the runs do not rebuild both texts.
    pub fn revise(&self, original: &str, edited: &str) -> Result<RevisedDocument> {
        let original_paragraphs = tokenize_checked(original, Side::Original)?;
        let edited_paragraphs = tokenize_checked(edited, Side::Edited)?;

        let edits = align(
            &original_paragraphs,
            &edited_paragraphs,
            &self.options.diff_options(),
        );

        // One edit event time for the whole document
        let timestamp = self
            .options
            .timestamp
            .unwrap_or_else(Utc::now)
            .trunc_subsecs(0);
        let document = map_to_runs(&edits, &self.options.author, timestamp);

        verify(&document.original_text(), original, Side::Original)?;
        verify(&document.edited_text(), edited, Side::Edited)?;

        Ok(document)
    }

    /// Produce the `.docx` bytes together with the revised document.
    pub fn generate(&self, original: &str, edited: &str) -> Result<GeneratedDocument> {
        let document = self.revise(original, edited)?;
        let parts = docx::build(&document)?;
        let bytes = pack(&parts)?;
        let summary = document.summary();

        log::info!(
            "Generated {} byte document: {}",
            bytes.len(),
            summary
        );

        Ok(GeneratedDocument {
            bytes,
            document,
            summary,
        })
    }
}

/// Generate a tracked-changes `.docx` with default options.
pub fn generate(original: &str, edited: &str) -> Result<Vec<u8>> {
    Generator::default()
        .generate(original, edited)
        .map(|generated| generated.bytes)
}

fn verify(rebuilt: &str, input: &str, side: Side) -> Result<()> {
    if rebuilt != input {
        return Err(RevmarkError::Consistency {
            side,
            expected_len: input.len(),
            actual_len: rebuilt.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use crate::revision::RunKind;
    use chrono::TimeZone;

    fn generator() -> Generator {
        Generator::new(EngineOptions {
            timestamp: Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()),
            ..Default::default()
        })
    }

    #[test]
    fn test_generate_starts_with_pk() {
        let bytes = generate("Hello world", "Hello there").unwrap();
        assert_eq!(&bytes[..2], &[0x50, 0x4B]);
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = generator().generate("   ", "text").unwrap_err();
        assert!(matches!(
            err,
            RevmarkError::Input(InputError::Empty(Side::Original))
        ));

        let err = generator().generate("text", "\n\n").unwrap_err();
        assert!(matches!(
            err,
            RevmarkError::Input(InputError::Empty(Side::Edited))
        ));
    }

    #[test]
    fn test_timestamp_shared_and_truncated() {
        let options = EngineOptions {
            timestamp: Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
                + chrono::Duration::milliseconds(750)),
            ..Default::default()
        };
        let doc = Generator::new(options)
            .revise("one two three", "one 2 three four")
            .unwrap();
        let dates: Vec<DateTime<Utc>> = doc
            .paragraphs
            .iter()
            .flat_map(|p| p.runs.iter())
            .filter_map(|r| r.revision.as_ref().map(|rev| rev.date))
            .collect();
        assert!(dates.len() >= 2);
        assert!(
            dates
                .iter()
                .all(|d| *d == Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_custom_author() {
        let options = EngineOptions {
            author: "Copy Desk".to_string(),
            ..Default::default()
        };
        let doc = Generator::new(options).revise("a b", "a c").unwrap();
        let rev = doc.runs_of(RunKind::Inserted).next().unwrap();
        assert_eq!(rev.revision.as_ref().unwrap().author, "Copy Desk");
    }

    #[test]
    fn test_verify_reports_side() {
        let err = verify("abc", "abcd", Side::Edited).unwrap_err();
        assert!(matches!(
            err,
            RevmarkError::Consistency {
                side: Side::Edited,
                expected_len: 4,
                actual_len: 3
            }
        ));
    }

    #[test]
    fn test_summary_matches_document() {
        let generated = generator()
            .generate("Chapter One\n\nThe cat sat.", "Chapter One\n\nThe cat sat calmly.")
            .unwrap();
        assert_eq!(generated.summary, generated.document.summary());
        assert_eq!(generated.summary.insertions, 1);
        assert_eq!(generated.summary.deletions, 0);
        assert_eq!(generated.summary.paragraphs, 2);
    }
}
