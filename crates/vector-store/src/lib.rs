//! # Sense Vector Store
//!
//! Word vectors and nearest-neighbor search for graph-based sense induction.
//!
//! ## Features
//!
//! - **Normalized word vectors** loaded from word2vec/fastText text dumps (plain or gzip)
//! - **Exact inner-product search** over the embedding matrix
//! - **Precomputed neighbor cache** with strict capacity checks
//! - **Publish-and-swap cell** for replacing loaded models under live readers
//!
//! ## Architecture
//!
//! ```text
//! cc.en.300.vec.gz
//!     │
//!     ├──> WordVectors (EmbeddingStore)
//!     │      └─> word → unit vector
//!     │
//!     ├──> FlatIndex (NeighborIndex)
//!     │      └─> matrix · query → top-k
//!     │
//!     └──> NeighborCache (NeighborIndex)
//!            └─> word → precomputed top-k, batched and parallel
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use sense_vector_store::{FlatIndex, NeighborIndex, WordVectors};
//!
//! fn main() -> sense_vector_store::Result<()> {
//!     let vectors = WordVectors::load("cc.en.300.vec.gz", Some(100_000))?;
//!     let index = FlatIndex::new(&vectors);
//!
//!     for neighbor in index.neighbors("bank", 10)? {
//!         println!("{}: {:.3}", neighbor.word, neighbor.similarity);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod embeddings;
mod error;
mod flat_index;
mod neighbor_cache;
pub mod ops;
mod shared;
mod types;

pub use embeddings::WordVectors;
pub use error::{Result, VectorStoreError};
pub use flat_index::FlatIndex;
pub use neighbor_cache::{NeighborCache, DEFAULT_BATCH_SIZE};
pub use shared::Shared;
pub use types::{EmbeddingStore, Neighbor, NeighborIndex};
