//! XML text helpers shared by the document builder.

use crate::error::{Result, RevmarkError};

/// Whether `ch` may appear in an XML 1.0 document.
pub fn is_xml_char(ch: char) -> bool {
    matches!(ch,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Escape the five XML special characters, rejecting characters XML cannot carry.
pub fn escape(text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    for (offset, ch) in text.char_indices() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if is_xml_char(c) => out.push(c),
            c => {
                return Err(RevmarkError::InvalidXmlChar {
                    code: c as u32,
                    offset,
                });
            }
        }
    }
    Ok(out)
}

/// Whether a text element needs `xml:space="preserve"` to keep its whitespace.
pub fn needs_preserve(text: &str) -> bool {
    text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace)
}
