use anyhow::{Context, Result};
use sense_disambiguator::DisambiguatorConfig;
use sense_inventory::InductionConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings file contents; every section is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub induction: InductionConfig,
    pub disambiguation: DisambiguatorConfig,
}

impl AppConfig {
    /// Read `path` when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
