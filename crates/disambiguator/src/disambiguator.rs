use crate::config::{DisambiguatorConfig, NoContextPolicy};
use crate::error::{DisambiguatorError, Result};
use sense_inventory::{Sense, SenseInventory};
use sense_vector_store::{ops, EmbeddingStore};
use serde::Serialize;
use std::collections::HashSet;

/// A candidate sense and how well it fits the context.
///
/// `confidence` is the raw dot product of the sense keyword with the context vector,
/// not a probability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSense {
    pub sense: Sense,
    pub confidence: f32,
}

impl RankedSense {
    pub fn unknown() -> Self {
        Self {
            sense: Sense::unknown(),
            confidence: 1.0,
        }
    }
}

/// Flat result record for one token of a disambiguated text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenSense {
    pub token: String,
    pub word: String,
    pub keyword: String,
    pub cluster: Vec<String>,
    pub confidence: f32,
}

impl TokenSense {
    fn new(token: &str, ranked: RankedSense) -> Self {
        Self {
            token: token.to_string(),
            word: ranked.sense.word,
            keyword: ranked.sense.keyword,
            cluster: ranked.sense.cluster,
            confidence: ranked.confidence,
        }
    }
}

/// Ranks the known senses of a word by how well they fit its context.
///
/// Only the context words that separate the candidate senses best are used: each
/// context word is scored by the spread (max - min) of its similarities to the sense
/// keywords, the top `most_significant` are averaged, and the senses are ranked by
/// similarity to that average. Nothing is retained between calls.
pub struct Disambiguator<'a, E> {
    store: &'a E,
    inventory: &'a SenseInventory,
    config: DisambiguatorConfig,
}

impl<'a, E: EmbeddingStore> Disambiguator<'a, E> {
    pub fn new(
        store: &'a E,
        inventory: &'a SenseInventory,
        config: DisambiguatorConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            inventory,
            config,
        })
    }

    pub fn config(&self) -> &DisambiguatorConfig {
        &self.config
    }

    /// All distinct senses of `word` under the configured case folding
    pub fn senses(&self, word: &str) -> Vec<Sense> {
        let mut seen = HashSet::new();
        self.inventory
            .lookup(word, self.config.case_folding)
            .into_iter()
            .map(|record| record.sense())
            .filter(|sense| seen.insert(sense.clone()))
            .collect()
    }

    /// Rank the senses of `target` given the surrounding `tokens`.
    ///
    /// The result is never empty: a word without usable senses yields the unknown
    /// sense with confidence `1.0`.
    pub fn disambiguate<T: AsRef<str>>(
        &self,
        tokens: &[T],
        target: &str,
    ) -> Result<Vec<RankedSense>> {
        let senses = self.senses(target);
        if senses.is_empty() {
            log::debug!("'{}' is not in the inventory", target);
            return Ok(vec![RankedSense::unknown()]);
        }

        let sense_vectors = self.sense_vectors(senses)?;
        if sense_vectors.is_empty() {
            return Ok(vec![RankedSense::unknown()]);
        }

        let context_vectors = self.context_vectors(tokens, target);

        let mut scored: Vec<(f32, &[f32])> = context_vectors
            .iter()
            .filter_map(|(_, vector)| {
                discrimination(vector, &sense_vectors).map(|score| (score, *vector))
            })
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let best: Vec<&[f32]> = scored
            .iter()
            .take(self.config.most_significant)
            .map(|(_, vector)| *vector)
            .collect();

        let Some(context_vector) = ops::mean(&best) else {
            log::debug!("No usable context for '{}'", target);
            return Ok(self.without_context(sense_vectors));
        };

        let mut ranked: Vec<RankedSense> = sense_vectors
            .into_iter()
            .map(|(sense, vector)| RankedSense {
                sense,
                confidence: ops::dot(vector, &context_vector),
            })
            .collect();
        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        Ok(ranked)
    }

    /// Keyword and confidence of the best sense of `target`
    pub fn best_sense<T: AsRef<str>>(&self, tokens: &[T], target: &str) -> Result<(String, f32)> {
        let ranked = self.disambiguate(tokens, target)?;
        Ok(ranked
            .into_iter()
            .next()
            .map_or_else(
                || (Sense::unknown().keyword, 1.0),
                |best| (best.sense.keyword, best.confidence),
            ))
    }

    /// Disambiguate every token of `tokens`, using the whole sequence as context
    pub fn disambiguate_text<T: AsRef<str>>(&self, tokens: &[T]) -> Result<Vec<Vec<TokenSense>>> {
        tokens
            .iter()
            .map(|token| -> Result<Vec<TokenSense>> {
                let token = token.as_ref();
                let ranked = self.disambiguate(tokens, token)?;
                Ok(ranked
                    .into_iter()
                    .map(|sense| TokenSense::new(token, sense))
                    .collect())
            })
            .collect()
    }

    fn sense_vectors(&self, senses: Vec<Sense>) -> Result<Vec<(Sense, &'a [f32])>> {
        let store: &'a E = self.store;
        let mut vectors = Vec::with_capacity(senses.len());

        for sense in senses {
            match store.vector(&sense.keyword) {
                Some(vector) => vectors.push((sense, vector)),
                None if self.config.strict_keywords => {
                    return Err(DisambiguatorError::UnknownKeyword {
                        word: sense.word,
                        keyword: sense.keyword,
                    });
                }
                None => {
                    log::warn!(
                        "Keyword '{}' is not in the embedding model, skipping the sense",
                        sense.keyword
                    );
                }
            }
        }

        Ok(vectors)
    }

    /// Vectors of the distinct context tokens, target occurrences excluded
    fn context_vectors<'t, T: AsRef<str>>(
        &self,
        tokens: &'t [T],
        target: &str,
    ) -> Vec<(&'t str, &'a [f32])> {
        let store: &'a E = self.store;
        let mut seen = HashSet::new();
        let mut vectors = Vec::new();

        for token in tokens {
            let token = token.as_ref();
            if is_target(token, target) || !seen.insert(token) {
                continue;
            }
            match store.vector(token) {
                Some(vector) => vectors.push((token, vector)),
                None => log::debug!("Context word '{}' is not in the embedding model", token),
            }
        }

        vectors
    }

    fn without_context(&self, sense_vectors: Vec<(Sense, &[f32])>) -> Vec<RankedSense> {
        match self.config.no_context {
            NoContextPolicy::Unknown => vec![RankedSense::unknown()],
            NoContextPolicy::UniformTie => {
                let confidence = 1.0 / sense_vectors.len() as f32;
                sense_vectors
                    .into_iter()
                    .map(|(sense, _)| RankedSense { sense, confidence })
                    .collect()
            }
        }
    }
}

/// Spread of a context word's similarities to the candidate senses
fn discrimination(vector: &[f32], sense_vectors: &[(Sense, &[f32])]) -> Option<f32> {
    let mut scores = sense_vectors.iter().map(|(_, sense)| ops::dot(vector, sense));
    let first = scores.next()?;
    let (min, max) = scores.fold((first, first), |(min, max), s| (min.min(s), max.max(s)));
    Some(max - min)
}

/// Whether `token` is an occurrence of `target`: same lower-cased prefix and at most
/// one extra character, so inflected forms like "banks" count too.
pub fn is_target(token: &str, target: &str) -> bool {
    token.to_lowercase().starts_with(&target.to_lowercase())
        && token.chars().count() <= target.chars().count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sense_inventory::{SenseRecord, UNKNOWN};
    use sense_vector_store::WordVectors;

    fn record(word: &str, sense_id: usize, keyword: &str, cluster: &[&str]) -> SenseRecord {
        SenseRecord {
            word: word.to_string(),
            sense_id,
            keyword: keyword.to_string(),
            cluster: cluster.iter().map(|w| w.to_string()).collect(),
        }
    }

    fn ruby_vectors() -> WordVectors {
        WordVectors::from_entries(
            3,
            vec![
                ("Ruby", vec![1.0, 1.0, 0.0]),
                ("Python", vec![1.0, 0.0, 0.1]),
                ("Perl", vec![0.9, 0.0, 0.3]),
                ("sapphire", vec![0.0, 1.0, 0.1]),
                ("emerald", vec![0.0, 0.9, 0.3]),
                ("the", vec![0.5, 0.5, 0.7]),
            ],
        )
        .unwrap()
    }

    fn ruby_inventory() -> SenseInventory {
        SenseInventory::from_records(vec![
            record("Ruby", 0, "Python", &["Python", "Perl"]),
            record("Ruby", 1, "sapphire", &["sapphire", "emerald"]),
        ])
    }

    #[test]
    fn test_is_target() {
        assert!(is_target("bank", "bank"));
        assert!(is_target("Banks", "bank"));
        assert!(!is_target("bankrupt", "bank"));
        assert!(!is_target("river", "bank"));
    }

    #[test]
    fn test_related_context_word_wins() {
        let vectors = ruby_vectors();
        let inventory = ruby_inventory();
        let wsd = Disambiguator::new(&vectors, &inventory, DisambiguatorConfig::default()).unwrap();

        let ranked = wsd.disambiguate(&["Ruby", "Perl"], "Ruby").unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].sense.keyword, "Python");
        assert!(ranked[0].confidence > ranked[1].confidence);

        let ranked = wsd.disambiguate(&["the", "emerald", "Ruby"], "Ruby").unwrap();
        assert_eq!(ranked[0].sense.keyword, "sapphire");
    }

    #[test]
    fn test_unknown_word() {
        let vectors = ruby_vectors();
        let inventory = ruby_inventory();
        let wsd = Disambiguator::new(&vectors, &inventory, DisambiguatorConfig::default()).unwrap();

        let ranked = wsd.disambiguate(&["a", "galaxy"], "galaxy").unwrap();
        assert_eq!(ranked, vec![RankedSense::unknown()]);
        assert_eq!(ranked[0].sense.word, UNKNOWN);
    }

    #[test]
    fn test_only_target_in_context_ties_senses() {
        let vectors = ruby_vectors();
        let inventory = ruby_inventory();
        let wsd = Disambiguator::new(&vectors, &inventory, DisambiguatorConfig::default()).unwrap();

        let ranked = wsd.disambiguate(&["Ruby"], "Ruby").unwrap();
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| (r.confidence - 0.5).abs() < 1e-6));
    }

    #[test]
    fn test_single_sense_without_context_is_certain() {
        let vectors = ruby_vectors();
        let inventory =
            SenseInventory::from_records(vec![record("Ruby", 0, "Python", &["Python"])]);
        let wsd = Disambiguator::new(&vectors, &inventory, DisambiguatorConfig::default()).unwrap();

        let ranked = wsd.disambiguate(&["Ruby", "unseen"], "Ruby").unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].confidence, 1.0);
    }

    #[test]
    fn test_unknown_policy_without_context() {
        let vectors = ruby_vectors();
        let inventory = ruby_inventory();
        let config = DisambiguatorConfig {
            no_context: NoContextPolicy::Unknown,
            ..Default::default()
        };
        let wsd = Disambiguator::new(&vectors, &inventory, config).unwrap();

        assert_eq!(
            wsd.disambiguate(&["Ruby"], "Ruby").unwrap(),
            vec![RankedSense::unknown()]
        );
    }

    #[test]
    fn test_keywords_without_vectors() {
        let vectors = ruby_vectors();
        let inventory = SenseInventory::from_records(vec![
            record("Ruby", 0, "Python", &["Python"]),
            record("Ruby", 1, "corundum", &["corundum"]),
        ]);

        let lenient =
            Disambiguator::new(&vectors, &inventory, DisambiguatorConfig::default()).unwrap();
        let ranked = lenient.disambiguate(&["Ruby", "Perl"], "Ruby").unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].sense.keyword, "Python");

        let strict_config = DisambiguatorConfig {
            strict_keywords: true,
            ..Default::default()
        };
        let strict = Disambiguator::new(&vectors, &inventory, strict_config).unwrap();
        let err = strict.disambiguate(&["Ruby", "Perl"], "Ruby").unwrap_err();
        assert!(matches!(err, DisambiguatorError::UnknownKeyword { .. }));

        let orphan =
            SenseInventory::from_records(vec![record("Ruby", 0, "corundum", &["corundum"])]);
        let wsd = Disambiguator::new(&vectors, &orphan, DisambiguatorConfig::default()).unwrap();
        assert_eq!(
            wsd.disambiguate(&["Ruby", "Perl"], "Ruby").unwrap(),
            vec![RankedSense::unknown()]
        );
    }

    #[test]
    fn test_case_folded_lookup_deduplicates() {
        let vectors = ruby_vectors();
        let inventory = SenseInventory::from_records(vec![
            record("Ruby", 0, "Python", &["Python", "Perl"]),
            record("ruby", 0, "sapphire", &["sapphire"]),
        ]);

        let wsd = Disambiguator::new(&vectors, &inventory, DisambiguatorConfig::default()).unwrap();
        assert_eq!(wsd.senses("ruby").len(), 2);
        assert_eq!(wsd.senses("RUBY").len(), 2);

        let exact = DisambiguatorConfig {
            case_folding: sense_inventory::CaseFolding::Exact,
            ..Default::default()
        };
        let wsd = Disambiguator::new(&vectors, &inventory, exact).unwrap();
        assert_eq!(wsd.senses("ruby").len(), 1);
    }

    #[test]
    fn test_disambiguate_text_covers_every_token() {
        let vectors = ruby_vectors();
        let inventory = ruby_inventory();
        let wsd = Disambiguator::new(&vectors, &inventory, DisambiguatorConfig::default()).unwrap();

        let result = wsd.disambiguate_text(&["Ruby", "Perl"]).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0][0].token, "Ruby");
        assert_eq!(result[0][0].keyword, "Python");
        assert_eq!(result[1].len(), 1);
        assert_eq!(result[1][0].word, UNKNOWN);
        assert_eq!(result[1][0].token, "Perl");

        assert_eq!(wsd.best_sense(&["Ruby", "Perl"], "Ruby").unwrap().0, "Python");
    }
}
