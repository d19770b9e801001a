use serde::Serialize;
use thiserror::Error;

/// Which side of a comparison an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The original manuscript text
    Original,
    /// The edited manuscript text
    Edited,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Original => write!(f, "original"),
            Side::Edited => write!(f, "edited"),
        }
    }
}

/// Problems with the text handed to the engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{0} text is empty")]
    Empty(Side),
}

/// Unified error type for revmark operations
#[derive(Debug, Error)]
pub enum RevmarkError {
    // Input errors
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    // Algorithmic errors
    #[error(
        "Internal consistency error: rebuilt {side} text does not match input \
         ({actual_len} bytes rebuilt, {expected_len} expected)"
    )]
    Consistency {
        side: Side,
        expected_len: usize,
        actual_len: usize,
    },

    // Serialization errors
    #[error("Character U+{code:04X} at offset {offset} cannot be written to XML")]
    InvalidXmlChar { code: u32, offset: usize },

    #[error("Package write failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Config errors
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    // Usage errors
    #[error("Token limit exceeded: {requested} requested, {limit}")]
    LimitExceeded { limit: String, requested: u64 },
}

/// Result type alias for revmark operations
pub type Result<T> = std::result::Result<T, RevmarkError>;

/// A serializable representation of RevmarkError for IPC and JSON output
#[derive(Debug, Clone, Serialize)]
pub struct SerializableError {
    /// Error kind/variant name
    pub kind: String,
    /// Human-readable error message
    pub message: String,
}

impl From<&RevmarkError> for SerializableError {
    fn from(err: &RevmarkError) -> Self {
        let kind = match err {
            RevmarkError::Input(_) => "Input",
            RevmarkError::Consistency { .. } => "Consistency",
            RevmarkError::InvalidXmlChar { .. } => "InvalidXmlChar",
            RevmarkError::Zip(_) => "Zip",
            RevmarkError::Io(_) => "Io",
            RevmarkError::ConfigParse(_) => "ConfigParse",
            RevmarkError::ConfigSerialize(_) => "ConfigSerialize",
            RevmarkError::NoConfigDir => "NoConfigDir",
            RevmarkError::LimitExceeded { .. } => "LimitExceeded",
        }
        .to_string();

        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<RevmarkError> for SerializableError {
    fn from(err: RevmarkError) -> Self {
        SerializableError::from(&err)
    }
}

impl RevmarkError {
    /// Convert to a serializable representation for IPC
    pub fn to_serializable(&self) -> SerializableError {
        SerializableError::from(self)
    }

    /// Whether the error was caused by the caller's input rather than the engine
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            RevmarkError::Input(_) | RevmarkError::LimitExceeded { .. }
        )
    }
}
