use crate::error::{Result, VectorStoreError};
use crate::types::{Neighbor, NeighborIndex};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Default number of words pushed through the index per batch
pub const DEFAULT_BATCH_SIZE: usize = 2000;

/// Neighbor lists precomputed for a vocabulary at a fixed depth.
///
/// Induction asks for the neighbors of the same words many times (once as an ego, again
/// as a node of other egos' networks), so the lists are computed once up front. Asking a
/// cached word for more neighbors than were stored is an [`IndexCapacityMismatch`]:
/// silently returning fewer would change the networks being built.
///
/// Words that were not precomputed fall through to the underlying index.
///
/// [`IndexCapacityMismatch`]: VectorStoreError::IndexCapacityMismatch
pub struct NeighborCache<'a, I> {
    index: &'a I,
    depth: usize,
    neighbors: HashMap<String, Vec<Neighbor>>,
}

#[derive(Serialize, Deserialize)]
struct CacheFile {
    depth: usize,
    neighbors: HashMap<String, Vec<Neighbor>>,
}

impl<'a, I: NeighborIndex> NeighborCache<'a, I> {
    /// Query `depth` neighbors for every word, `batch_size` words at a time.
    /// Words inside a batch are queried in parallel.
    pub fn build<W>(index: &'a I, words: &[W], depth: usize, batch_size: usize) -> Result<Self>
    where
        W: AsRef<str> + Sync,
    {
        let batch_size = batch_size.max(1);
        let total = words.len();
        let mut neighbors = HashMap::with_capacity(total);

        for (batch_no, batch) in words.chunks(batch_size).enumerate() {
            let start = batch_no * batch_size;
            log::info!(
                "Neighbor batch {} to {} of {}",
                start,
                start + batch.len(),
                total
            );

            let rows = batch
                .par_iter()
                .map(|word| {
                    let word = word.as_ref();
                    index
                        .neighbors(word, depth)
                        .map(|found| (word.to_string(), found))
                })
                .collect::<Result<Vec<_>>>()?;
            neighbors.extend(rows);
        }

        Ok(Self {
            index,
            depth,
            neighbors,
        })
    }

    /// Number of neighbors requested per word at build time
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.neighbors.contains_key(word)
    }

    /// Save cache to disk as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        log::info!("Saving neighbor cache to {:?}", path.as_ref());
        let file = CacheFile {
            depth: self.depth,
            neighbors: self.neighbors.clone(),
        };
        let data = serde_json::to_string(&file)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Load a cache saved by [`NeighborCache::save`] on top of `index`
    pub fn load(index: &'a I, path: impl AsRef<Path>) -> Result<Self> {
        log::info!("Loading neighbor cache from {:?}", path.as_ref());
        let data = std::fs::read_to_string(path)?;
        let file: CacheFile = serde_json::from_str(&data)?;
        log::info!(
            "Loaded neighbors for {} words (depth {})",
            file.neighbors.len(),
            file.depth
        );
        Ok(Self {
            index,
            depth: file.depth,
            neighbors: file.neighbors,
        })
    }
}

impl<I: NeighborIndex> NeighborIndex for NeighborCache<'_, I> {
    fn neighbors(&self, word: &str, k: usize) -> Result<Vec<Neighbor>> {
        match self.neighbors.get(word) {
            Some(cached) if cached.len() >= k => Ok(cached[..k].to_vec()),
            Some(cached) => Err(VectorStoreError::IndexCapacityMismatch {
                word: word.to_string(),
                requested: k,
                available: cached.len(),
            }),
            None => self.index.neighbors(word, k),
        }
    }

    fn nearest(&self, vector: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        self.index.nearest(vector, k)
    }
}
