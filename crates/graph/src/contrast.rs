use crate::error::Result;
use crate::types::{DiscriminativePair, PairSet};
use sense_vector_store::{ops, EmbeddingStore, Neighbor, NeighborIndex};

/// Finds pairs of an ego's neighbors that point to different senses.
///
/// For every neighbor `a` of the ego, the vector `ego - a` removes the aspect of the
/// ego that `a` stands for. Its nearest word `b` (other than the ego itself, which is
/// usually the top hit) tends to lie near another sense; when `b` is also a neighbor
/// of the ego, `(a, b)` is a discriminative pair.
pub struct ContrastFinder<'a, E, N> {
    store: &'a E,
    index: &'a N,
}

impl<'a, E: EmbeddingStore, N: NeighborIndex> ContrastFinder<'a, E, N> {
    pub fn new(store: &'a E, index: &'a N) -> Self {
        Self { store, index }
    }

    /// Discriminative pairs among the top `neighbors_number` neighbors of `ego`.
    ///
    /// An ego outside the vocabulary has no neighbors and therefore no pairs.
    pub fn find_pairs(&self, ego: &str, neighbors_number: usize) -> Result<PairSet> {
        let mut pairs = PairSet::new();

        let neighbors = self.index.neighbors(ego, neighbors_number)?;
        let Some(ego_vector) = self.store.vector(ego) else {
            log::debug!("'{}' has no vector, no pairs", ego);
            return Ok(pairs);
        };

        for neighbor in &neighbors {
            let Some(vector) = self.store.vector(&neighbor.word) else {
                continue;
            };

            let opposite = ops::difference(ego_vector, vector);
            let hits = self.index.nearest(&opposite, 2)?;
            let Some(hit) = hits.into_iter().find(|hit| hit.word != ego) else {
                continue;
            };

            if hit.word != neighbor.word && contains_word(&neighbors, &hit.word) {
                log::trace!("{}: '{}' contrasts with '{}'", ego, neighbor.word, hit.word);
                pairs.insert(DiscriminativePair::new(neighbor.word.as_str(), hit.word));
            }
        }

        log::debug!(
            "{}: {} discriminative pairs among {} neighbors",
            ego,
            pairs.len(),
            neighbors.len()
        );
        Ok(pairs)
    }
}

/// Trimmed, case-insensitive membership test
fn contains_word(neighbors: &[Neighbor], word: &str) -> bool {
    let word = word.trim().to_lowercase();
    neighbors
        .iter()
        .any(|neighbor| neighbor.word.trim().to_lowercase() == word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sense_vector_store::{FlatIndex, WordVectors};

    fn bank_vectors() -> WordVectors {
        WordVectors::from_entries(
            4,
            vec![
                ("bank", vec![1.0, 1.0, 0.0, 0.0]),
                ("money", vec![1.0, 0.1, 0.0, 0.0]),
                ("deposit", vec![1.0, 0.2, 0.3, 0.0]),
                ("river", vec![0.1, 1.0, 0.0, 0.0]),
                ("shore", vec![0.2, 1.0, 0.0, 0.3]),
                ("cash", vec![0.6, 0.0, 0.0, 0.8]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_bank_pairs_cross_senses() {
        let vectors = bank_vectors();
        let index = FlatIndex::new(&vectors);
        let finder = ContrastFinder::new(&vectors, &index);

        let pairs = finder.find_pairs("bank", 4).unwrap();
        let expected: PairSet = [
            DiscriminativePair::new("deposit", "river"),
            DiscriminativePair::new("money", "river"),
            DiscriminativePair::new("money", "shore"),
        ]
        .into_iter()
        .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_unknown_ego_has_no_pairs() {
        let vectors = bank_vectors();
        let index = FlatIndex::new(&vectors);
        let finder = ContrastFinder::new(&vectors, &index);

        assert!(finder.find_pairs("galaxy", 4).unwrap().is_empty());
    }

    #[test]
    fn test_membership_ignores_case_and_padding() {
        let neighbors = vec![Neighbor::new(" River", 0.9)];
        assert!(contains_word(&neighbors, "river "));
        assert!(!contains_word(&neighbors, "shore"));
    }
}
