mod file_config;

pub use file_config::{CorpusFileConfig, FileConfig, MixingConfig, SimilarityConfig};

use crate::recommendations::{
    CorpusConfig, KeyMode, MixingOptions, SimilarityMode, SimilarityOptions,
};
use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::Duration;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub library_path: Option<PathBuf>,
    pub user_id: Option<String>,
    pub page_size: Option<usize>,
    pub page_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Core settings
    pub library_path: PathBuf,
    pub user_id: String,

    // Defaults for requests that don't set their own options
    pub similarity: SimilarityOptions,
    pub mixing: MixingOptions,
    pub corpus: CorpusConfig,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let library_path = file
            .library_path
            .map(PathBuf::from)
            .or_else(|| cli.library_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("library_path must be specified via --library or in config file")
            })?;

        if !library_path.exists() {
            bail!("Library file does not exist: {:?}", library_path);
        }
        if !library_path.is_file() {
            bail!("library_path is not a file: {:?}", library_path);
        }

        let user_id = file
            .user_id
            .or_else(|| cli.user_id.clone())
            .ok_or_else(|| anyhow::anyhow!("user_id must be specified via --user or in config file"))?;

        let corpus_file = file.corpus.unwrap_or_default();
        let page_size = corpus_file
            .page_size
            .or(cli.page_size)
            .unwrap_or(CorpusConfig::default().page_size);
        if page_size == 0 {
            bail!("page_size must be greater than 0");
        }
        let page_timeout = corpus_file
            .page_timeout_ms
            .or(cli.page_timeout_ms)
            .map(Duration::from_millis);
        let corpus = CorpusConfig {
            page_size,
            page_timeout,
        };

        let similarity_file = file.similarity.unwrap_or_default();
        let similarity_defaults = SimilarityOptions::default();
        let similarity = SimilarityOptions {
            limit: similarity_file.limit.unwrap_or(similarity_defaults.limit),
            mode: similarity_file
                .mode
                .as_deref()
                .map(SimilarityMode::from)
                .unwrap_or(similarity_defaults.mode),
            min_similarity: similarity_file
                .min_similarity
                .unwrap_or(similarity_defaults.min_similarity),
            include_same_album: similarity_file
                .include_same_album
                .unwrap_or(similarity_defaults.include_same_album),
        }
        .normalized();

        let mixing_file = file.mixing.unwrap_or_default();
        let mixing_defaults = MixingOptions::default();
        let mixing = MixingOptions {
            limit: mixing_file.limit.unwrap_or(mixing_defaults.limit),
            bpm_tolerance: mixing_file
                .bpm_tolerance
                .unwrap_or(mixing_defaults.bpm_tolerance),
            key_mode: mixing_file
                .key_mode
                .as_deref()
                .map(KeyMode::from)
                .unwrap_or(mixing_defaults.key_mode),
        }
        .normalized();

        Ok(Self {
            library_path,
            user_id,
            similarity,
            mixing,
            corpus,
        })
    }
}
