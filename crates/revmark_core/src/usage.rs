//! Usage limits at the boundary between stored settings and the engine.
//!
//! Stored settings encode limits as a single integer where any negative
//! number means "no limit" and zero means "no usage allowed". That encoding
//! is converted into [`TokenLimit`] once, at the boundary, and nothing past
//! it looks at signs.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, RevmarkError};
use crate::tokenizer::{TokenKind, tokenize};

/// How many tokens a caller may process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenLimit {
    /// No cap
    #[default]
    Unlimited,
    /// Nothing may be processed
    Restricted,
    /// At most this many tokens
    Limited(u64),
}

impl TokenLimit {
    /// Convert the stored integer form.
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            n if n < 0 => TokenLimit::Unlimited,
            0 => TokenLimit::Restricted,
            n => TokenLimit::Limited(n as u64),
        }
    }

    /// The stored integer form; `-1` for unlimited.
    pub fn to_raw(self) -> i64 {
        match self {
            TokenLimit::Unlimited => -1,
            TokenLimit::Restricted => 0,
            TokenLimit::Limited(n) => i64::try_from(n).unwrap_or(i64::MAX),
        }
    }

    /// Tokens still available after `used`; `None` when unlimited.
    pub fn remaining(self, used: u64) -> Option<u64> {
        match self {
            TokenLimit::Unlimited => None,
            TokenLimit::Restricted => Some(0),
            TokenLimit::Limited(n) => Some(n.saturating_sub(used)),
        }
    }

    /// Fail unless `requested` more tokens fit after `used`.
    pub fn check(self, used: u64, requested: u64) -> Result<()> {
        match self.remaining(used) {
            Some(left) if requested > left => Err(RevmarkError::LimitExceeded {
                limit: self.to_string(),
                requested,
            }),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for TokenLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenLimit::Unlimited => write!(f, "unlimited"),
            TokenLimit::Restricted => write!(f, "restricted"),
            TokenLimit::Limited(n) => write!(f, "limited to {}", n),
        }
    }
}

impl Serialize for TokenLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.to_raw())
    }
}

impl<'de> Deserialize<'de> for TokenLimit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        i64::deserialize(deserializer).map(TokenLimit::from_raw)
    }
}

/// Number of word tokens in `text`, the unit limits are counted in.
pub fn count_words(text: &str) -> u64 {
    tokenize(text)
        .iter()
        .flat_map(|p| p.tokens.iter())
        .filter(|t| t.kind == TokenKind::Word)
        .count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw() {
        assert_eq!(TokenLimit::from_raw(-1), TokenLimit::Unlimited);
        assert_eq!(TokenLimit::from_raw(-500), TokenLimit::Unlimited);
        assert_eq!(TokenLimit::from_raw(0), TokenLimit::Restricted);
        assert_eq!(TokenLimit::from_raw(1200), TokenLimit::Limited(1200));
    }

    #[test]
    fn test_raw_round_trip_normalizes_unlimited() {
        assert_eq!(TokenLimit::from_raw(-42).to_raw(), -1);
        assert_eq!(TokenLimit::Limited(7).to_raw(), 7);
    }

    #[test]
    fn test_check() {
        assert!(TokenLimit::Unlimited.check(u64::MAX, 10).is_ok());
        assert!(TokenLimit::Restricted.check(0, 1).is_err());
        assert!(TokenLimit::Restricted.check(0, 0).is_ok());
        assert!(TokenLimit::Limited(100).check(90, 10).is_ok());

        let err = TokenLimit::Limited(100).check(90, 11).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Token limit exceeded: 11 requested, limited to 100"
        );
    }

    #[test]
    fn test_remaining_saturates() {
        assert_eq!(TokenLimit::Limited(5).remaining(9), Some(0));
        assert_eq!(TokenLimit::Unlimited.remaining(9), None);
    }

    #[test]
    fn test_serde_uses_integer_form() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            limit: TokenLimit,
        }
        let parsed: Wrapper = serde_json::from_str(r#"{"limit": -3}"#).unwrap();
        assert_eq!(parsed.limit, TokenLimit::Unlimited);
        let json = serde_json::to_string(&Wrapper {
            limit: TokenLimit::Limited(50),
        })
        .unwrap();
        assert_eq!(json, r#"{"limit":50}"#);
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("Hello, world!\n\nTwo more."), 4);
        assert_eq!(count_words(""), 0);
    }
}
