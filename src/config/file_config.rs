use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub library_path: Option<String>,
    pub user_id: Option<String>,

    // Feature configs
    pub similarity: Option<SimilarityConfig>,
    pub mixing: Option<MixingConfig>,
    pub corpus: Option<CorpusFileConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SimilarityConfig {
    pub limit: Option<i32>,
    /// "semantic", "features" or "combined"
    pub mode: Option<String>,
    pub min_similarity: Option<f64>,
    pub include_same_album: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct MixingConfig {
    pub limit: Option<i32>,
    pub bpm_tolerance: Option<i32>,
    /// "exact", "harmonic" or "any"
    pub key_mode: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct CorpusFileConfig {
    pub page_size: Option<usize>,
    pub page_timeout_ms: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
