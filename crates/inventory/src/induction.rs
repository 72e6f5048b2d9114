use crate::compiler::compile;
use crate::error::{InventoryError, Result};
use crate::sense::SenseRecord;
use rayon::prelude::*;
use sense_graph::{ChineseWhispers, ContrastFinder, EgoNetworkBuilder};
use sense_vector_store::{EmbeddingStore, NeighborIndex};
use serde::Serialize;

/// Words induced in parallel before their results are handed to the sink
const CHUNK_SIZE: usize = 256;

/// Outcome of a batch induction run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InductionReport {
    /// Words that went through induction, failed ones included
    pub processed: usize,

    /// Words that produced at least one sense
    pub with_senses: usize,

    /// Words without discriminative pairs
    pub without_senses: usize,

    /// Sense records produced
    pub senses: usize,

    /// Words skipped as punctuation
    pub skipped: usize,

    /// Words whose induction failed; they are absent from the inventory
    pub failed: Vec<String>,
}

/// Runs contrast discovery, ego-network construction, clustering and compilation for
/// one word at a time.
///
/// Words are independent of each other: the store and index are only read, so a
/// batch fans out over the rayon pool.
pub struct SenseInducer<'a, E, N> {
    store: &'a E,
    index: &'a N,
    neighbors_number: usize,
    labeler: ChineseWhispers,
}

impl<'a, E: EmbeddingStore, N: NeighborIndex> SenseInducer<'a, E, N> {
    pub fn new(
        store: &'a E,
        index: &'a N,
        neighbors_number: usize,
        labeler: ChineseWhispers,
    ) -> Self {
        Self {
            store,
            index,
            neighbors_number,
            labeler,
        }
    }

    pub fn neighbors_number(&self) -> usize {
        self.neighbors_number
    }

    /// Senses of `ego`; empty when the word has no discriminative pairs
    pub fn induce(&self, ego: &str) -> Result<Vec<SenseRecord>> {
        let pairs = ContrastFinder::new(self.store, self.index)
            .find_pairs(ego, self.neighbors_number)?;
        if pairs.is_empty() {
            return Ok(Vec::new());
        }

        let network = EgoNetworkBuilder::new(self.index, self.neighbors_number).build(ego, &pairs)?;
        let clusters = self.labeler.cluster(&network);
        Ok(compile(&network, &clusters))
    }

    /// Induce senses for every word and pass each word's records to `sink` in
    /// vocabulary order.
    ///
    /// A failing word is logged and recorded in the report; the batch goes on. So is a
    /// word whose records `sink` rejects as [`InventoryError::InvalidRecord`]; any other
    /// `sink` error (the output is unwritable) aborts the batch.
    pub fn induce_all<W, F>(
        &self,
        words: &[W],
        skip_punctuation: bool,
        mut sink: F,
    ) -> Result<InductionReport>
    where
        W: AsRef<str> + Sync,
        F: FnMut(&str, &[SenseRecord]) -> Result<()>,
    {
        let mut report = InductionReport::default();

        for chunk in words.chunks(CHUNK_SIZE) {
            let results: Vec<(&str, Option<Result<Vec<SenseRecord>>>)> = chunk
                .par_iter()
                .map(|word| {
                    let word = word.as_ref();
                    if skip_punctuation && is_punctuation(word) {
                        (word, None)
                    } else {
                        (word, Some(self.induce(word)))
                    }
                })
                .collect();

            for (word, result) in results {
                match result {
                    None => {
                        log::debug!("Skipping '{}': punctuation", word);
                        report.skipped += 1;
                    }
                    Some(Ok(records)) => {
                        report.processed += 1;
                        match sink(word, &records) {
                            Ok(()) if records.is_empty() => report.without_senses += 1,
                            Ok(()) => {
                                report.with_senses += 1;
                                report.senses += records.len();
                            }
                            Err(InventoryError::InvalidRecord(reason)) => {
                                log::error!(
                                    "{} neighbors, '{}': {}",
                                    self.neighbors_number,
                                    word,
                                    reason
                                );
                                report.failed.push(word.to_string());
                            }
                            Err(err) => return Err(err),
                        }
                    }
                    Some(Err(err)) => {
                        log::error!("{} neighbors, '{}': {}", self.neighbors_number, word, err);
                        report.processed += 1;
                        report.failed.push(word.to_string());
                    }
                }
            }
        }

        log::info!(
            "{} neighbors: {} words processed, {} senses, {} without senses, {} skipped, {} failed",
            self.neighbors_number,
            report.processed,
            report.senses,
            report.without_senses,
            report.skipped,
            report.failed.len()
        );

        Ok(report)
    }
}

/// Whether `word` is empty or consists of punctuation only
pub fn is_punctuation(word: &str) -> bool {
    word.chars().all(|ch| ch.is_ascii_punctuation())
}
