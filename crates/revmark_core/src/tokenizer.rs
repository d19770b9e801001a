//! Paragraph and word tokenization.
//!
//! Text is split into paragraphs on every hard break (a run of two or more
//! newlines, each optionally preceded by `\r`), then each paragraph is
//! scanned into word, whitespace and punctuation tokens. Token texts are
//! exact substrings of the input and every paragraph keeps the break that
//! followed it, so [`join_paragraphs`] gives back the input byte for byte.
//!
//! | Input | Paragraphs |
//! |-------|------------|
//! | `"a\n\nb"` | `["a", "b"]` |
//! | `"a\nb"` | `["a\nb"]` (soft break kept as a token) |
//! | `"a\n\n\nb"` | `["a", "b"]` |
//! | `"a\r\n\r\nb"` | `["a", "b"]` |
//! | `"\n\nb"` | `["", "b"]` |

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{InputError, Result, Side};

/// Separator between two paragraphs: two or more line endings in a row.
static HARD_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:\r?\n){2,}").unwrap());

/// Classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Maximal run of alphanumeric characters or `_`
    Word,
    /// Maximal run of whitespace, or a single soft line break
    Whitespace,
    /// Any other single character
    Punctuation,
}

/// An atomic unit of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// What the token is made of
    pub kind: TokenKind,
    /// Exact source substring
    pub text: String,
    /// Index of the paragraph the token belongs to
    pub paragraph: usize,
}

impl Token {
    /// Whether this token is a soft line break inside a paragraph
    pub fn is_soft_break(&self) -> bool {
        self.text == "\n"
    }
}

/// A tokenized paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    /// Position of the paragraph in its source text
    pub index: usize,
    /// Tokens in reading order
    pub tokens: Vec<Token>,
    /// Hard break that followed the paragraph in its source, empty for the last
    pub separator: String,
}

impl Paragraph {
    /// Paragraph text rebuilt from its tokens
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Whether the paragraph has no content at all
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over word tokens only
    pub fn words(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.kind == TokenKind::Word)
    }
}

/// Split `text` into tokenized paragraphs.
///
/// Always yields at least one paragraph; the empty string is one empty
/// paragraph.
pub fn tokenize(text: &str) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut start = 0;

    for brk in HARD_BREAK.find_iter(text) {
        let index = paragraphs.len();
        paragraphs.push(Paragraph {
            index,
            tokens: tokenize_paragraph(&text[start..brk.start()], index),
            separator: brk.as_str().to_string(),
        });
        start = brk.end();
    }

    let index = paragraphs.len();
    paragraphs.push(Paragraph {
        index,
        tokens: tokenize_paragraph(&text[start..], index),
        separator: String::new(),
    });
    paragraphs
}

/// Like [`tokenize`], but rejects text that is empty after trimming.
pub fn tokenize_checked(text: &str, side: Side) -> Result<Vec<Paragraph>> {
    if text.trim().is_empty() {
        return Err(InputError::Empty(side).into());
    }
    Ok(tokenize(text))
}

/// Scan one paragraph body into tokens.
pub fn tokenize_paragraph(body: &str, paragraph: usize) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<TokenKind> = None;

    for (offset, ch) in body.char_indices() {
        let kind = classify(ch);
        // Soft breaks and punctuation never extend a token
        let extends = current == Some(kind) && kind != TokenKind::Punctuation && ch != '\n';
        let follows_break = offset > 0 && body[..offset].ends_with('\n');

        if !extends || follows_break {
            if let Some(prev) = current
                && offset > start
            {
                tokens.push(Token {
                    kind: prev,
                    text: body[start..offset].to_string(),
                    paragraph,
                });
            }
            start = offset;
        }
        current = Some(kind);
    }

    if let Some(kind) = current
        && start < body.len()
    {
        tokens.push(Token {
            kind,
            text: body[start..].to_string(),
            paragraph,
        });
    }

    tokens
}

fn classify(ch: char) -> TokenKind {
    if ch.is_alphanumeric() || ch == '_' {
        TokenKind::Word
    } else if ch.is_whitespace() {
        TokenKind::Whitespace
    } else {
        TokenKind::Punctuation
    }
}

/// Rebuild the source text of a paragraph list.
pub fn join_paragraphs(paragraphs: &[Paragraph]) -> String {
    let mut out = String::new();
    for p in paragraphs {
        out.push_str(&p.text());
        out.push_str(&p.separator);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_words_whitespace_punctuation() {
        let tokens = tokenize_paragraph("Hello,  world!", 0);
        assert_eq!(texts(&tokens), vec!["Hello", ",", "  ", "world", "!"]);
        assert_eq!(tokens[0].kind, TokenKind::Word);
        assert_eq!(tokens[1].kind, TokenKind::Punctuation);
        assert_eq!(tokens[2].kind, TokenKind::Whitespace);
    }

    #[test]
    fn test_punctuation_is_single_char() {
        let tokens = tokenize_paragraph("wait...", 0);
        assert_eq!(texts(&tokens), vec!["wait", ".", ".", "."]);
    }

    #[test]
    fn test_soft_break_is_own_token() {
        let tokens = tokenize_paragraph("line one \n line two", 0);
        assert_eq!(
            texts(&tokens),
            vec!["line", " ", "one", " ", "\n", " ", "line", " ", "two"]
        );
        assert!(tokens[4].is_soft_break());
    }

    #[test]
    fn test_consecutive_soft_breaks_split() {
        let tokens = tokenize_paragraph("\nb", 0);
        assert_eq!(texts(&tokens), vec!["\n", "b"]);
    }

    #[test]
    fn test_unicode_words() {
        let tokens = tokenize_paragraph("café naïve_ok 42", 0);
        assert_eq!(texts(&tokens), vec!["café", " ", "naïve_ok", " ", "42"]);
    }

    fn paragraph_texts(text: &str) -> Vec<String> {
        tokenize(text).iter().map(|p| p.text()).collect()
    }

    #[test]
    fn test_paragraph_split_rules() {
        assert_eq!(paragraph_texts("a\n\nb"), vec!["a", "b"]);
        assert_eq!(paragraph_texts("a\n\n\n\nb"), vec!["a", "b"]);
        assert_eq!(paragraph_texts("\n\nb"), vec!["", "b"]);
        assert_eq!(paragraph_texts("a\n\n"), vec!["a", ""]);
    }

    #[test]
    fn test_three_newlines_are_one_break() {
        let paras = tokenize("a\n\n\nb");
        assert_eq!(paras.len(), 2);
        assert_eq!(paras[0].text(), "a");
        assert_eq!(paras[0].separator, "\n\n\n");
        assert_eq!(paras[1].text(), "b");
        assert_eq!(paras[1].separator, "");
    }

    #[test]
    fn test_windows_line_endings() {
        let paras = tokenize("One.\r\n\r\nTwo.");
        assert_eq!(paras.len(), 2);
        assert_eq!(paras[0].text(), "One.");
        assert_eq!(paras[0].separator, "\r\n\r\n");
        assert_eq!(paras[1].text(), "Two.");

        // a lone CRLF stays a soft break
        assert_eq!(paragraph_texts("line\r\nnext"), vec!["line\r\nnext"]);
        assert_eq!(paragraph_texts("mixed\n\r\nends"), vec!["mixed", "ends"]);
    }

    #[test]
    fn test_paragraph_indices() {
        let paras = tokenize("one\n\ntwo words");
        assert_eq!(paras[1].index, 1);
        assert!(paras[1].tokens.iter().all(|t| t.paragraph == 1));
        assert_eq!(paras[1].words().count(), 2);
    }

    #[test]
    fn test_round_trip_is_exact() {
        let samples = [
            "",
            "Plain.",
            "Chapter One\n\nThe cat sat.",
            "  leading and trailing  \n\n\n",
            "tabs\tand\r\nwindows\r\n\r\nlines",
            "a\n\n\nb\r\n\r\n\r\nc",
            "\n\n\n\n\n",
            "emoji 🙂 and — dashes … done",
        ];
        for sample in samples {
            let rebuilt = join_paragraphs(&tokenize(sample));
            assert_eq!(rebuilt, sample);
        }
    }

    #[test]
    fn test_empty_text_is_one_empty_paragraph() {
        let paras = tokenize("");
        assert_eq!(paras.len(), 1);
        assert!(paras[0].is_empty());
    }

    #[test]
    fn test_checked_rejects_blank() {
        assert!(tokenize_checked("   \n\n ", Side::Original).is_err());
        assert!(tokenize_checked("x", Side::Edited).is_ok());
    }
}
