use crate::config::DisambiguatorConfig;
use crate::disambiguator::Disambiguator;
use crate::error::{DisambiguatorError, Result};
use sense_inventory::SenseInventory;
use sense_vector_store::{Shared, WordVectors};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Embeddings and sense inventory of one language
pub struct LanguageModel {
    pub vectors: WordVectors,
    pub inventory: SenseInventory,
}

impl LanguageModel {
    pub fn new(vectors: WordVectors, inventory: SenseInventory) -> Self {
        Self { vectors, inventory }
    }

    pub fn load(
        vectors_path: impl AsRef<Path>,
        inventory_path: impl AsRef<Path>,
        limit: Option<usize>,
    ) -> Result<Self> {
        let vectors = WordVectors::load(vectors_path, limit)?;
        let inventory = SenseInventory::load(inventory_path)?;
        log::info!(
            "Loaded {} vectors and {} senses of {} words",
            vectors.len(),
            inventory.len(),
            inventory.word_count()
        );
        Ok(Self::new(vectors, inventory))
    }

    pub fn disambiguator(
        &self,
        config: DisambiguatorConfig,
    ) -> Result<Disambiguator<'_, WordVectors>> {
        Disambiguator::new(&self.vectors, &self.inventory, config)
    }
}

/// Where a language's model files live
#[derive(Debug, Clone)]
pub struct ModelSource {
    pub language: String,
    pub vectors: PathBuf,
    pub inventory: PathBuf,
}

/// Loaded models keyed by language code.
///
/// Each model sits behind a [`Shared`] slot: a request takes a snapshot and keeps it
/// for its whole duration, while [`ModelRegistry::replace`] swaps in a freshly loaded
/// model without blocking readers.
#[derive(Default)]
pub struct ModelRegistry {
    models: HashMap<String, Shared<LanguageModel>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite the model of `language`
    pub fn register(&mut self, language: impl Into<String>, model: LanguageModel) {
        self.models.insert(language.into(), Shared::new(model));
    }

    /// Load every source; a language whose files cannot be loaded is logged and left out
    pub fn load_all(sources: &[ModelSource], limit: Option<usize>) -> Self {
        let mut registry = Self::new();
        for source in sources {
            match LanguageModel::load(&source.vectors, &source.inventory, limit) {
                Ok(model) => {
                    log::info!("Model for '{}' is ready", source.language);
                    registry.register(source.language.clone(), model);
                }
                Err(err) => {
                    log::error!("Failed to load the model for '{}': {}", source.language, err);
                }
            }
        }
        registry
    }

    /// Snapshot of the current model of `language`
    pub fn get(&self, language: &str) -> Result<Arc<LanguageModel>> {
        self.models
            .get(language)
            .map(Shared::load)
            .ok_or_else(|| DisambiguatorError::UnknownLanguage(language.to_string()))
    }

    /// Swap in a new model for an already registered language
    pub fn replace(&self, language: &str, model: LanguageModel) -> Result<()> {
        let slot = self
            .models
            .get(language)
            .ok_or_else(|| DisambiguatorError::UnknownLanguage(language.to_string()))?;
        slot.publish(model);
        log::info!("Model for '{}' replaced", language);
        Ok(())
    }

    /// Registered languages, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.models.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }
}
