use crate::embeddings::WordVectors;
use crate::error::{Result, VectorStoreError};
use crate::ops::norm;
use crate::types::{EmbeddingStore, Neighbor, NeighborIndex};
use ndarray::ArrayView1;

/// Exact inner-product index over a [`WordVectors`] matrix.
///
/// Every query is a single matrix-vector product followed by a partial sort, which
/// is enough for vocabularies in the low hundreds of thousands. Queries are read-only,
/// so one index can serve any number of threads.
pub struct FlatIndex<'a> {
    vectors: &'a WordVectors,
}

impl<'a> FlatIndex<'a> {
    pub fn new(vectors: &'a WordVectors) -> Self {
        Self { vectors }
    }

    pub fn vectors(&self) -> &'a WordVectors {
        self.vectors
    }

    /// Rank all rows against `query`, skipping `exclude`.
    /// Returns (row, score) sorted by score descending, then by row.
    fn top_k(&self, query: &[f32], k: usize, exclude: Option<usize>) -> Result<Vec<(usize, f32)>> {
        let dimension = self.vectors.dimension();
        if query.len() != dimension {
            return Err(VectorStoreError::InvalidDimension {
                expected: dimension,
                actual: query.len(),
            });
        }

        let scores = self.vectors.matrix().dot(&ArrayView1::from(query));
        let mut ranked: Vec<(usize, f32)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|(row, _)| Some(*row) != exclude)
            .collect();

        let k = k.min(ranked.len());
        if k == 0 {
            return Ok(Vec::new());
        }

        let by_score =
            |a: &(usize, f32), b: &(usize, f32)| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0));
        if k < ranked.len() {
            ranked.select_nth_unstable_by(k - 1, by_score);
            ranked.truncate(k);
        }
        ranked.sort_by(by_score);

        Ok(ranked)
    }

    fn to_neighbors(&self, ranked: Vec<(usize, f32)>, scale: f32) -> Vec<Neighbor> {
        ranked
            .into_iter()
            .filter_map(|(row, score)| {
                self.vectors
                    .word_at(row)
                    .map(|word| Neighbor::new(word, score / scale))
            })
            .collect()
    }
}

impl NeighborIndex for FlatIndex<'_> {
    fn neighbors(&self, word: &str, k: usize) -> Result<Vec<Neighbor>> {
        let (Some(row), Some(vector)) = (self.vectors.row_of(word), self.vectors.vector(word))
        else {
            log::debug!("'{}' is not in the vocabulary", word);
            return Ok(Vec::new());
        };
        let ranked = self.top_k(vector, k, Some(row))?;
        Ok(self.to_neighbors(ranked, 1.0))
    }

    fn nearest(&self, vector: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        let ranked = self.top_k(vector, k, None)?;
        // Report cosine similarity even for unnormalized queries.
        let scale = norm(vector);
        let scale = if scale > 0.0 { scale } else { 1.0 };
        Ok(self.to_neighbors(ranked, scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectors() -> WordVectors {
        WordVectors::from_entries(
            3,
            vec![
                ("a", vec![1.0, 0.0, 0.0]),
                ("b", vec![0.9, 0.1, 0.0]),
                ("c", vec![0.0, 1.0, 0.0]),
                ("d", vec![0.0, 0.0, 1.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_neighbors_exclude_query_word() {
        let vectors = vectors();
        let index = FlatIndex::new(&vectors);

        let results = index.neighbors("a", 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].word, "b");
        assert!(results[0].similarity > 0.9);
        assert!(results.iter().all(|n| n.word != "a"));
    }

    #[test]
    fn test_neighbors_of_unknown_word_is_empty() {
        let vectors = vectors();
        let index = FlatIndex::new(&vectors);
        assert!(index.neighbors("zzz", 5).unwrap().is_empty());
    }

    #[test]
    fn test_k_larger_than_vocabulary() {
        let vectors = vectors();
        let index = FlatIndex::new(&vectors);
        assert_eq!(index.neighbors("a", 100).unwrap().len(), 3);
        assert!(index.neighbors("a", 0).unwrap().is_empty());
    }

    #[test]
    fn test_nearest_reports_cosine_for_unnormalized_query() {
        let vectors = vectors();
        let index = FlatIndex::new(&vectors);

        let results = index.nearest(&[0.0, 5.0, 0.0], 1).unwrap();
        assert_eq!(results[0].word, "c");
        assert!((results[0].similarity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_nan_row_does_not_break_ranking() {
        let vectors = WordVectors::from_entries(
            3,
            vec![
                ("a", vec![1.0, 0.0, 0.0]),
                ("x", vec![f32::NAN, 0.0, 0.0]),
                ("b", vec![0.9, 0.1, 0.0]),
                ("c", vec![0.0, 1.0, 0.0]),
                ("d", vec![0.0, 0.0, 1.0]),
            ],
        )
        .unwrap();
        let index = FlatIndex::new(&vectors);

        let results = index.neighbors("a", 4).unwrap();
        assert_eq!(results.len(), 4);
        let finite: Vec<&str> = results
            .iter()
            .filter(|n| n.similarity.is_finite())
            .map(|n| n.word.as_str())
            .collect();
        assert_eq!(finite, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let vectors = vectors();
        let index = FlatIndex::new(&vectors);
        assert!(index.nearest(&[1.0, 0.0], 1).is_err());
    }
}
