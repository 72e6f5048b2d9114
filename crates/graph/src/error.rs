use sense_vector_store::VectorStoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Neighbor lookup failed: {0}")]
    VectorStore(#[from] VectorStoreError),
}
