use sense_inventory::InventoryError;
use sense_vector_store::VectorStoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DisambiguatorError>;

#[derive(Error, Debug)]
pub enum DisambiguatorError {
    /// Raised only in strict mode; otherwise such senses are dropped
    #[error("Keyword '{keyword}' of a sense of '{word}' is not in the embedding vocabulary")]
    UnknownKeyword { word: String, keyword: String },

    #[error("No model loaded for language '{0}'")]
    UnknownLanguage(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    VectorStore(#[from] VectorStoreError),
}
