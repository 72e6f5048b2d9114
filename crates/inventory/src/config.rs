use crate::error::{InventoryError, Result};
use sense_graph::{Weighting, DEFAULT_ITERATIONS};
use sense_vector_store::DEFAULT_BATCH_SIZE;
use serde::{Deserialize, Serialize};

/// Configuration for batch sense induction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InductionConfig {
    /// Neighbor budgets; one inventory is induced per value
    pub neighbor_counts: Vec<usize>,

    /// Upper bound on label propagation passes
    pub iterations: usize,

    /// Edge weighting used during label propagation
    pub weighting: Weighting,

    /// Words per neighbor precomputation batch
    pub batch_size: usize,

    /// Maximum number of vocabulary words to process (None = all)
    pub limit: Option<usize>,

    /// Skip words made only of punctuation
    pub skip_punctuation: bool,
}

impl Default for InductionConfig {
    fn default() -> Self {
        Self {
            neighbor_counts: vec![50, 100, 200],
            iterations: DEFAULT_ITERATIONS,
            weighting: Weighting::Top,
            batch_size: DEFAULT_BATCH_SIZE,
            limit: Some(100_000),
            skip_punctuation: true,
        }
    }
}

impl InductionConfig {
    /// Depth the neighbor cache must have to serve every budget
    pub fn cache_depth(&self) -> usize {
        self.neighbor_counts.iter().copied().max().unwrap_or(0)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.neighbor_counts.is_empty() {
            return Err(InventoryError::invalid_config(
                "neighbor_counts must not be empty",
            ));
        }
        if self.neighbor_counts.contains(&0) {
            return Err(InventoryError::invalid_config(
                "neighbor_counts must be > 0",
            ));
        }
        if self.batch_size == 0 {
            return Err(InventoryError::invalid_config("batch_size must be > 0"));
        }
        Ok(())
    }
}
