use anyhow::{Context, Result};
use sense_disambiguator::{DisambiguatorConfig, LanguageModel, RankedSense, TokenSense};
use sense_inventory::{CaseFolding, SenseInventory, SenseRecord};
use sense_vector_store::WordVectors;
use serde::Serialize;
use std::path::PathBuf;

/// Disambiguation output: one ranking for a single target, or one per token
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Disambiguation {
    Target {
        target: String,
        senses: Vec<RankedSense>,
    },
    Text {
        tokens: Vec<Vec<TokenSense>>,
    },
}

pub async fn load_inventory(path: PathBuf) -> Result<SenseInventory> {
    tokio::task::spawn_blocking(move || {
        SenseInventory::load(&path)
            .with_context(|| format!("Failed to load inventory {}", path.display()))
    })
    .await
    .context("Inventory loader panicked")?
}

/// Load vectors and inventory side by side
pub async fn load_model(
    vectors: PathBuf,
    inventory: PathBuf,
    max_vectors: Option<usize>,
) -> Result<LanguageModel> {
    let vectors_task = tokio::task::spawn_blocking(move || {
        WordVectors::load(&vectors, max_vectors)
            .with_context(|| format!("Failed to load vectors from {}", vectors.display()))
    });
    let inventory_task = load_inventory(inventory);

    let (vectors, inventory) = tokio::join!(vectors_task, inventory_task);
    let vectors = vectors.context("Vector loader panicked")??;

    Ok(LanguageModel::new(vectors, inventory?))
}

/// Inventory rows of `word` under `folding`
pub fn senses(inventory: &SenseInventory, word: &str, folding: CaseFolding) -> Vec<SenseRecord> {
    inventory.lookup(word, folding).into_iter().cloned().collect()
}

pub fn disambiguate(
    model: &LanguageModel,
    config: DisambiguatorConfig,
    tokens: &[String],
    target: Option<&str>,
) -> Result<Disambiguation> {
    let wsd = model.disambiguator(config)?;

    Ok(match target {
        Some(target) => Disambiguation::Target {
            target: target.to_string(),
            senses: wsd.disambiguate(tokens, target)?,
        },
        None => Disambiguation::Text {
            tokens: wsd.disambiguate_text(tokens)?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn model() -> LanguageModel {
        let vectors = WordVectors::from_entries(
            2,
            vec![
                ("bank", vec![1.0, 1.0]),
                ("money", vec![1.0, 0.0]),
                ("river", vec![0.0, 1.0]),
                ("cash", vec![0.9, 0.1]),
            ],
        )
        .unwrap();
        let inventory = SenseInventory::from_records(vec![
            SenseRecord {
                word: "bank".to_string(),
                sense_id: 0,
                keyword: "money".to_string(),
                cluster: vec!["money".to_string()],
            },
            SenseRecord {
                word: "bank".to_string(),
                sense_id: 1,
                keyword: "river".to_string(),
                cluster: vec!["river".to_string()],
            },
        ]);
        LanguageModel::new(vectors, inventory)
    }

    #[test]
    fn test_senses_case_folded() {
        let model = model();
        assert_eq!(senses(&model.inventory, "Bank", CaseFolding::TitleLower).len(), 2);
        assert!(senses(&model.inventory, "Bank", CaseFolding::Exact).is_empty());
    }

    #[test]
    fn test_disambiguate_target_and_text() {
        let model = model();
        let tokens = vec!["cash".to_string(), "bank".to_string()];

        match disambiguate(&model, DisambiguatorConfig::default(), &tokens, Some("bank")).unwrap() {
            Disambiguation::Target { target, senses } => {
                assert_eq!(target, "bank");
                assert_eq!(senses[0].sense.keyword, "money");
            }
            other => panic!("unexpected {other:?}"),
        }

        match disambiguate(&model, DisambiguatorConfig::default(), &tokens, None).unwrap() {
            Disambiguation::Text { tokens } => {
                assert_eq!(tokens.len(), 2);
                assert_eq!(tokens[1][0].keyword, "money");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
