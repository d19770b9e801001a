#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Configuration options
pub mod config;

/// Word-level alignment (paragraph pairing, LCS, anchor fallback)
pub mod diff;

/// WordprocessingML parts for a revised document
pub mod docx;

/// Generate pipeline
pub mod engine;

/// Error (common error types)
pub mod error;

/// Download file names
pub mod file_name;

/// Zip packaging
pub mod package;

/// Revision runs, ids and summaries
pub mod revision;

/// Style-rule classification of change pairs
pub mod style_rules;

/// Tokenizer (paragraphs and tokens)
pub mod tokenizer;

/// Usage limits
pub mod usage;

/// XML escaping
pub mod xml;

pub use docx::DOCX_MIME_TYPE;
pub use engine::{EngineOptions, GeneratedDocument, Generator, generate};
pub use error::{Result, RevmarkError};
