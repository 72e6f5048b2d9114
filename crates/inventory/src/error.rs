use sense_graph::GraphError;
use thiserror::Error;

/// Result type for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;

/// Errors that can occur while inducing, reading or writing sense inventories
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Malformed inventory row
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// A record that cannot be written without corrupting the file
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl InventoryError {
    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
