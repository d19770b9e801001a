//! Style-rule classification of individual changes.
//!
//! A rule is a pure predicate over one `(original, edited)` pair that says
//! whether the change looks like an application of a known style rule.
//! Rules know nothing about diffing; callers feed them pairs, typically the
//! [`ChangePair`]s of a revised document.
//!
//! ```ignore
//! use revmark_core::style_rules::RuleRegistry;
//!
//! let registry = RuleRegistry::builtin();
//! let matches = registry.classify("3", "three");
//! assert_eq!(matches[0].rule_id, "spelled_number");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::revision::ChangePair;

/// Broad family a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Commas, periods and other marks
    Punctuation,
    /// Quotes, dashes, ellipses
    Typography,
    /// Whitespace between words and sentences
    Spacing,
    /// Numerals versus spelled-out numbers
    Numbers,
    /// Word forms such as contractions
    Grammar,
    /// Letter case
    Capitalization,
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RuleCategory::Punctuation => "punctuation",
            RuleCategory::Typography => "typography",
            RuleCategory::Spacing => "spacing",
            RuleCategory::Numbers => "numbers",
            RuleCategory::Grammar => "grammar",
            RuleCategory::Capitalization => "capitalization",
        };
        write!(f, "{}", name)
    }
}

/// Predicate signature shared by all rules
pub type Detector = fn(original: &str, edited: &str) -> bool;

/// A tagged rule descriptor
#[derive(Debug, Clone, Copy)]
pub struct StyleRule {
    /// Stable identifier
    pub id: &'static str,
    /// Rule family
    pub category: RuleCategory,
    /// One-line human description
    pub description: &'static str,
    /// The predicate
    pub detect: Detector,
}

/// A rule that fired on a change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleMatch {
    /// Id of the rule that fired
    pub rule_id: &'static str,
    /// Family of the rule that fired
    pub category: RuleCategory,
    /// Original side of the change
    pub original: String,
    /// Edited side of the change
    pub edited: String,
}

/// Ordered collection of rules
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<StyleRule>,
}

impl RuleRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in rule
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for rule in BUILTIN_RULES {
            registry.register(*rule);
        }
        registry
    }

    /// Add a rule; a rule with the same id is replaced in place.
    pub fn register(&mut self, rule: StyleRule) {
        match self.rules.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    /// Registered rules in evaluation order
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Look a rule up by id
    pub fn get(&self, id: &str) -> Option<&StyleRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Every rule that fires on one change
    pub fn classify(&self, original: &str, edited: &str) -> Vec<StyleMatch> {
        if original == edited {
            return Vec::new();
        }
        self.rules
            .iter()
            .filter(|rule| (rule.detect)(original, edited))
            .map(|rule| StyleMatch {
                rule_id: rule.id,
                category: rule.category,
                original: original.to_string(),
                edited: edited.to_string(),
            })
            .collect()
    }

    /// Classify many change pairs, in order
    pub fn classify_pairs(&self, pairs: &[ChangePair]) -> Vec<StyleMatch> {
        pairs
            .iter()
            .flat_map(|pair| self.classify(&pair.original, &pair.edited))
            .collect()
    }
}

/// Rules shipped with the crate
pub const BUILTIN_RULES: &[StyleRule] = &[
    StyleRule {
        id: "serial_comma",
        category: RuleCategory::Punctuation,
        description: "Adds a comma before the final 'and'/'or' of a list",
        detect: serial_comma,
    },
    StyleRule {
        id: "curly_quotes",
        category: RuleCategory::Typography,
        description: "Replaces straight quotes with typographic quotes",
        detect: curly_quotes,
    },
    StyleRule {
        id: "ellipsis",
        category: RuleCategory::Typography,
        description: "Replaces three periods with an ellipsis character",
        detect: ellipsis,
    },
    StyleRule {
        id: "em_dash",
        category: RuleCategory::Typography,
        description: "Replaces hyphen dashes with an em dash",
        detect: em_dash,
    },
    StyleRule {
        id: "double_space",
        category: RuleCategory::Spacing,
        description: "Collapses repeated spaces to one",
        detect: double_space,
    },
    StyleRule {
        id: "spelled_number",
        category: RuleCategory::Numbers,
        description: "Spells out small numbers, or the reverse",
        detect: spelled_number,
    },
    StyleRule {
        id: "contraction_expanded",
        category: RuleCategory::Grammar,
        description: "Expands a contraction into its full form",
        detect: contraction_expanded,
    },
    StyleRule {
        id: "capitalization",
        category: RuleCategory::Capitalization,
        description: "Changes letter case only",
        detect: capitalization,
    },
    StyleRule {
        id: "punctuation_only",
        category: RuleCategory::Punctuation,
        description: "Changes punctuation without touching words",
        detect: punctuation_only,
    },
];

static SERIAL_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",(\s+)(and|or)\b").unwrap());
static HYPHEN_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*--\s*|\s+-\s+").unwrap());
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w]+").unwrap());

const SMALL_NUMBERS: &[(&str, &str)] = &[
    ("0", "zero"),
    ("1", "one"),
    ("2", "two"),
    ("3", "three"),
    ("4", "four"),
    ("5", "five"),
    ("6", "six"),
    ("7", "seven"),
    ("8", "eight"),
    ("9", "nine"),
    ("10", "ten"),
];

const CONTRACTIONS: &[(&str, &str)] = &[
    ("can't", "cannot"),
    ("won't", "will not"),
    ("don't", "do not"),
    ("doesn't", "does not"),
    ("didn't", "did not"),
    ("isn't", "is not"),
    ("aren't", "are not"),
    ("wasn't", "was not"),
    ("weren't", "were not"),
    ("it's", "it is"),
    ("i'm", "i am"),
    ("you're", "you are"),
    ("they're", "they are"),
    ("we're", "we are"),
    ("i've", "i have"),
    ("couldn't", "could not"),
    ("shouldn't", "should not"),
    ("wouldn't", "would not"),
];

fn serial_comma(original: &str, edited: &str) -> bool {
    SERIAL_COMMA.is_match(edited) && SERIAL_COMMA.replace_all(edited, "$1$2") == original
}

fn straighten_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            c => c,
        })
        .collect()
}

fn curly_quotes(original: &str, edited: &str) -> bool {
    original.contains(['"', '\''])
        && edited.contains(['\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'])
        && straighten_quotes(edited) == original
}

fn ellipsis(original: &str, edited: &str) -> bool {
    original.contains("...") && edited.contains('…') && edited.replace('…', "...") == original
}

fn em_dash(original: &str, edited: &str) -> bool {
    edited.contains('—')
        && HYPHEN_DASH.is_match(original)
        && HYPHEN_DASH.replace_all(original, "—") == edited.replace(" — ", "—")
}

fn double_space(original: &str, edited: &str) -> bool {
    MULTI_SPACE.is_match(original) && MULTI_SPACE.replace_all(original, " ") == edited
}

fn spelled_number(original: &str, edited: &str) -> bool {
    let (original, edited) = (original.trim(), edited.trim().to_lowercase());
    SMALL_NUMBERS.iter().any(|(digits, word)| {
        (original == *digits && edited == *word)
            || (original.to_lowercase() == *word && edited == *digits)
    })
}

fn contraction_expanded(original: &str, edited: &str) -> bool {
    let original = straighten_quotes(original.trim()).to_lowercase();
    let edited = edited.trim().to_lowercase();
    CONTRACTIONS
        .iter()
        .any(|(short, long)| original == *short && edited == *long)
}

fn capitalization(original: &str, edited: &str) -> bool {
    original.to_lowercase() == edited.to_lowercase()
}

fn punctuation_only(original: &str, edited: &str) -> bool {
    let words = |s: &str| NON_WORD.replace_all(s, " ").trim().to_string();
    let has_punctuation = |s: &str| s.chars().any(|c| c.is_ascii_punctuation());
    (has_punctuation(original) || has_punctuation(edited)) && words(original) == words(edited)
}
