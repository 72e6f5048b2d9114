use crate::error::{DisambiguatorError, Result};
use sense_inventory::CaseFolding;
use serde::{Deserialize, Serialize};

/// Number of most discriminative context words averaged by default
pub const MOST_SIGNIFICANT_NUM: usize = 3;

/// What to return when no context word can be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoContextPolicy {
    /// Every candidate sense with confidence `1 / n`
    #[default]
    UniformTie,

    /// The single unknown sense with confidence `1.0`
    Unknown,
}

/// Configuration for disambiguation requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisambiguatorConfig {
    /// How many of the most discriminative context words are averaged
    pub most_significant: usize,

    /// Spellings tried when looking up the target's senses
    pub case_folding: CaseFolding,

    /// Fail instead of dropping senses whose keyword has no vector
    pub strict_keywords: bool,

    pub no_context: NoContextPolicy,
}

impl Default for DisambiguatorConfig {
    fn default() -> Self {
        Self {
            most_significant: MOST_SIGNIFICANT_NUM,
            case_folding: CaseFolding::TitleLower,
            strict_keywords: false,
            no_context: NoContextPolicy::UniformTie,
        }
    }
}

impl DisambiguatorConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.most_significant == 0 {
            return Err(DisambiguatorError::InvalidConfig(
                "most_significant must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
