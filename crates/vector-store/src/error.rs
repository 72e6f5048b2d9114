use thiserror::Error;

pub type Result<T> = std::result::Result<T, VectorStoreError>;

#[derive(Error, Debug)]
pub enum VectorStoreError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    /// More neighbors were requested than were precomputed for the word.
    #[error(
        "Neighbor cache for '{word}' holds {available} neighbors, but {requested} were requested"
    )]
    IndexCapacityMismatch {
        word: String,
        requested: usize,
        available: usize,
    },

    #[error("{0}")]
    Other(String),
}

impl VectorStoreError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }
}
