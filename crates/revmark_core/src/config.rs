//! Configuration types for revmark.
//!
//! This module provides the [`Config`] struct which stores engine defaults.
//! Configuration is persisted as TOML (typically at
//! `~/.config/revmark/config.toml` on Unix systems).
//!
//! # Key Configuration Fields
//!
//! - `author`: Name recorded on every tracked change
//! - `max_lcs_cells`: Alignment table budget before the anchor fallback
//! - `pairing_threshold`: Word similarity needed to pair rewritten paragraphs
//! - `default_file_name`: Name used for generated documents
//! - `token_limit`: Word budget per run; negative means unlimited
//!
//! # Example
//!
//! ```ignore
//! use revmark_core::config::Config;
//!
//! let config = Config::load()?;
//! let generator = Generator::new(config.engine_options());
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::diff::{DEFAULT_MAX_LCS_CELLS, DEFAULT_PAIRING_THRESHOLD};
use crate::engine::EngineOptions;
use crate::error::{Result, RevmarkError};
use crate::file_name::DEFAULT_FILE_NAME;
use crate::revision::DEFAULT_AUTHOR;
use crate::usage::TokenLimit;

/// `Config` holds the parts of revmark the user can configure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Author recorded on every revision
    pub author: String,

    /// Largest LCS table (cells) before alignment switches to anchors
    pub max_lcs_cells: usize,

    /// Minimum word similarity (0.0 to 1.0) for pairing rewritten paragraphs
    pub pairing_threshold: f64,

    /// File name used when none is given on the command line
    pub default_file_name: String,

    /// Word budget for a single run, stored as an integer:
    /// negative is unlimited, zero is restricted
    #[serde(skip_serializing_if = "is_unlimited")]
    pub token_limit: TokenLimit,
}

fn is_unlimited(limit: &TokenLimit) -> bool {
    *limit == TokenLimit::Unlimited
}

impl Default for Config {
    fn default() -> Self {
        Self {
            author: DEFAULT_AUTHOR.to_string(),
            max_lcs_cells: DEFAULT_MAX_LCS_CELLS,
            pairing_threshold: DEFAULT_PAIRING_THRESHOLD,
            default_file_name: DEFAULT_FILE_NAME.to_string(),
            token_limit: TokenLimit::Unlimited,
        }
    }
}

impl Config {
    /// Engine options matching this configuration
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            author: self.author.clone(),
            max_lcs_cells: self.max_lcs_cells,
            pairing_threshold: self.pairing_threshold,
            timestamp: None,
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Load config from a path, returning default if it cannot be read.
    pub fn load_from_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Using default config ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }
}

// ============================================================================
// Native-only implementation (not available in WASM)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl Config {
    /// Get the config file path (~/.config/revmark/config.toml)
    /// Only available on native platforms
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("revmark").join("config.toml"))
    }

    /// Load config from default location, or return default if file doesn't exist
    /// Only available on native platforms
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path()
            && path.exists()
        {
            return Self::load_from(&path);
        }

        Ok(Config::default())
    }

    /// Save config to default location
    /// Only available on native platforms
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or(RevmarkError::NoConfigDir)?;
        self.save_to(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.author, "AI Editor");
        assert_eq!(config.default_file_name, "edited-manuscript.docx");
        assert_eq!(config.token_limit, TokenLimit::Unlimited);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("author = \"Copy Desk\"\ntoken_limit = 5000").unwrap();
        assert_eq!(config.author, "Copy Desk");
        assert_eq!(config.token_limit, TokenLimit::Limited(5000));
        assert_eq!(config.max_lcs_cells, DEFAULT_MAX_LCS_CELLS);
    }

    #[test]
    fn test_negative_limit_is_unlimited() {
        let config: Config = toml::from_str("token_limit = -1").unwrap();
        assert_eq!(config.token_limit, TokenLimit::Unlimited);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            author: "Line Editor".to_string(),
            token_limit: TokenLimit::Restricted,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_or_default(&dir.path().join("absent.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_engine_options() {
        let options = Config::default().engine_options();
        assert_eq!(options.author, "AI Editor");
        assert!(options.timestamp.is_none());
    }
}
