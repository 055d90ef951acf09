//! Error types for the nim-qlearn crate

use thiserror::Error;

/// Main error type for the nim-qlearn crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: cannot take {amount} stick(s) from heap {heap_index}")]
    InvalidMove { heap_index: usize, amount: usize },

    #[error("invalid action code {code}: heap index and amount must be single digits")]
    InvalidAction { code: usize },

    #[error("no legal actions available: the game is finished")]
    NoLegalActions,

    #[error("invalid heaps {heaps:?}: each heap must stay within {initial:?}")]
    InvalidHeaps { heaps: Vec<u8>, initial: Vec<u8> },

    #[error("no saved agent '{name}' with {training_epochs} training epochs")]
    AgentSnapshotNotFound { name: String, training_epochs: usize },

    #[error("unsupported snapshot format version {found} (expected {expected})")]
    UnsupportedSnapshotVersion { found: u32, expected: u32 },

    #[error("invalid snapshot: {message}")]
    InvalidSnapshot { message: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
