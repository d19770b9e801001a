//! Shared utilities for CLI commands

use std::path::Path;

use revmark_core::config::Config;
use revmark_core::usage::count_words;

/// Load the config from `path`, or from the default location.
/// A missing file means defaults.
///
/// A file that fails to parse is reported and replaced by defaults so that
/// commands keep working.
pub fn load_config(path: Option<&Path>) -> Config {
    let loaded = match path {
        Some(path) if path.exists() => Config::load_from(path),
        Some(_) => Ok(Config::default()),
        None => Config::load(),
    };
    match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("⚠ Could not load config, using defaults: {}", e);
            Config::default()
        }
    }
}

/// Read an input text, reporting failures to stderr.
pub fn read_text(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            eprintln!("✗ Could not read '{}': {}", path.display(), e);
            None
        }
    }
}

/// Read both inputs and check them against the configured token limit.
pub fn read_inputs(config: &Config, original: &Path, edited: &Path) -> Option<(String, String)> {
    let original_text = read_text(original)?;
    let edited_text = read_text(edited)?;

    let requested = count_words(&original_text) + count_words(&edited_text);
    if let Err(e) = config.token_limit.check(0, requested) {
        eprintln!("✗ {}", e);
        return None;
    }
    log::debug!("Read {} words across both inputs", requested);

    Some((original_text, edited_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmark_core::usage::TokenLimit;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("none.toml")));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "author = \"Desk\"\ntoken_limit = 0\n").unwrap();

        let config = load_config(Some(&path));
        assert_eq!(config.author, "Desk");
        assert_eq!(config.token_limit, TokenLimit::Restricted);
    }

    #[test]
    fn test_restricted_limit_blocks_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "some words").unwrap();
        std::fs::write(&b, "other words").unwrap();

        let config = Config {
            token_limit: TokenLimit::Restricted,
            ..Default::default()
        };
        assert!(read_inputs(&config, &a, &b).is_none());
        assert!(read_inputs(&Config::default(), &a, &b).is_some());
    }

    #[test]
    fn test_unreadable_input() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_text(&dir.path().join("missing.txt")).is_none());
    }
}
