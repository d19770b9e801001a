//! CLI handler for summary command

use std::path::Path;

use serde::Serialize;

use revmark_core::config::Config;
use revmark_core::engine::Generator;
use revmark_core::revision::RevisionSummary;
use revmark_core::style_rules::{RuleRegistry, StyleMatch};

use crate::cli::util::read_inputs;

#[derive(Serialize)]
struct SummaryReport {
    summary: RevisionSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    style_matches: Option<Vec<StyleMatch>>,
}

/// Handle the summary command
/// Returns true on success, false on error
pub fn handle_summary(
    config: &Config,
    original: &Path,
    edited: &Path,
    json: bool,
    rules: bool,
) -> bool {
    let Some((original_text, edited_text)) = read_inputs(config, original, edited) else {
        return false;
    };

    let generator = Generator::new(config.engine_options());
    let document = match generator.revise(&original_text, &edited_text) {
        Ok(document) => document,
        Err(e) => {
            match serde_json::to_string(&e.to_serializable()) {
                Ok(s) if json => eprintln!("{}", s),
                _ => eprintln!("✗ {}", e),
            }
            return false;
        }
    };

    let report = SummaryReport {
        summary: document.summary(),
        style_matches: rules
            .then(|| RuleRegistry::builtin().classify_pairs(&document.change_pairs())),
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("✗ Could not serialize summary: {}", e);
                return false;
            }
        }
        return true;
    }

    print_report(&report);
    true
}

fn print_report(report: &SummaryReport) {
    let summary = &report.summary;

    println!("Revision Summary");
    println!("================");
    println!("Paragraphs: {}", summary.paragraphs);
    println!(
        "Insertions: {} (+{} chars)",
        summary.insertions, summary.inserted_chars
    );
    println!(
        "Deletions: {} (-{} chars)",
        summary.deletions, summary.deleted_chars
    );
    if summary.inserted_paragraphs > 0 || summary.deleted_paragraphs > 0 {
        println!(
            "Whole paragraphs: {} inserted, {} deleted",
            summary.inserted_paragraphs, summary.deleted_paragraphs
        );
    }

    let Some(matches) = &report.style_matches else {
        return;
    };

    println!();
    if matches.is_empty() {
        println!("No style-rule matches.");
        return;
    }
    println!("Style-rule matches ({}):", matches.len());
    for m in matches {
        println!(
            "  [{}] {:?} -> {:?}",
            m.rule_id, m.original, m.edited
        );
    }
}
