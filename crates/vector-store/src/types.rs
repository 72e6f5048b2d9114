use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A word returned by a neighbor query together with its cosine similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub word: String,
    pub similarity: f32,
}

impl Neighbor {
    pub fn new(word: impl Into<String>, similarity: f32) -> Self {
        Self {
            word: word.into(),
            similarity,
        }
    }
}

/// Read-only word → unit vector lookup.
///
/// Implementations must be safe to share between threads once loaded; nothing on the
/// query path mutates them.
pub trait EmbeddingStore: Send + Sync {
    /// Dimension of every vector in the store
    fn dimension(&self) -> usize;

    /// L2-normalized vector for `word`, if the word is in the vocabulary
    fn vector(&self, word: &str) -> Option<&[f32]>;

    fn contains(&self, word: &str) -> bool {
        self.vector(word).is_some()
    }
}

/// Nearest-neighbor queries by cosine similarity.
pub trait NeighborIndex: Send + Sync {
    /// Top `k` neighbors of `word`, nearest first, never including `word` itself.
    ///
    /// A word outside the vocabulary has no neighbors and yields an empty list.
    fn neighbors(&self, word: &str, k: usize) -> Result<Vec<Neighbor>>;

    /// Top `k` words nearest to an arbitrary query vector, nearest first.
    fn nearest(&self, vector: &[f32], k: usize) -> Result<Vec<Neighbor>>;
}
