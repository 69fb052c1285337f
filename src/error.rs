//! Error types for snapshot loading and comparison
//!
//! Only input-integrity problems are errors. Data-quality conditions (missing
//! baseline keys, sub-epsilon measurements, key collisions) are reported as
//! verdicts or log lines and never surface here.

use thiserror::Error;

/// Errors that can occur while loading snapshots or configuring the comparator
#[derive(Error, Debug)]
pub enum ComparatorError {
    #[error("Malformed snapshot: {0}")]
    MalformedInput(String),

    #[error("cannot convert count: {count:?} (operation {key})")]
    InvalidCount { key: String, count: String },

    #[error("Snapshot file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid comparator configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`ComparatorError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The payload could not be parsed or carries an invalid field
    MalformedInput,
    /// The snapshot source could not be read
    Io,
    /// The comparator was configured with out-of-range values
    InvalidConfig,
}

impl ComparatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedInput(_) | Self::InvalidCount { .. } => ErrorKind::MalformedInput,
            Self::FileNotFound(_) | Self::Io(_) => ErrorKind::Io,
            Self::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }
}

impl From<serde_json::Error> for ComparatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

/// Result type for comparator operations
pub type Result<T> = std::result::Result<T, ComparatorError>;
