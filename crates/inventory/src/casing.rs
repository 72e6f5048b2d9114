use crate::error::InventoryError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which spellings of a word are tried when looking up its senses.
///
/// Inventories built from cased and uncased embeddings disagree on capitalisation,
/// so the policy belongs to the deployment rather than to the lookup code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseFolding {
    /// The word exactly as given
    Exact,

    /// As given, Title-cased and lower-cased
    #[default]
    TitleLower,

    /// As given, Title-cased, lower-cased and UPPER-cased
    TitleLowerUpper,
}

impl CaseFolding {
    /// Distinct spellings to try, the given one first
    pub fn variants(&self, word: &str) -> Vec<String> {
        let mut variants = vec![word.to_string()];
        let mut push = |candidate: String| {
            if !variants.contains(&candidate) {
                variants.push(candidate);
            }
        };

        match self {
            Self::Exact => {}
            Self::TitleLower => {
                push(title_case(word));
                push(word.to_lowercase());
            }
            Self::TitleLowerUpper => {
                push(title_case(word));
                push(word.to_lowercase());
                push(word.to_uppercase());
            }
        }

        variants
    }
}

impl FromStr for CaseFolding {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Self::Exact),
            "title-lower" => Ok(Self::TitleLower),
            "title-lower-upper" => Ok(Self::TitleLowerUpper),
            other => Err(InventoryError::invalid_config(format!(
                "unknown case folding '{other}' (expected exact, title-lower or title-lower-upper)"
            ))),
        }
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut in_run = false;
    for ch in word.chars() {
        if ch.is_alphabetic() {
            if in_run {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}
