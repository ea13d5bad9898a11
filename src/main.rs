use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use track_recommender::config::{AppConfig, CliConfig, FileConfig};
use track_recommender::metrics;
use track_recommender::recommendations::{
    camelot, KeyMode, MatchingService, MixingOptions, RecommendationEngine, SimilarityMode,
    SimilarityOptions,
};
use track_recommender::JsonTrackStore;

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(path_buf))
}

#[derive(Parser, Debug)]
#[command(version, about = "Similar and DJ-mixable track recommendations")]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override CLI flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the JSON library snapshot.
    #[clap(long, value_parser = parse_path)]
    pub library: Option<PathBuf>,

    /// The user whose library is searched.
    #[clap(long)]
    pub user: Option<String>,

    /// Number of tracks fetched per library page.
    #[clap(long)]
    pub page_size: Option<usize>,

    /// Timeout for a single library page, in milliseconds.
    #[clap(long)]
    pub page_timeout_ms: Option<u64>,

    /// Print Prometheus metrics to stderr after the command.
    #[clap(long)]
    pub print_metrics: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tracks similar to a source track.
    Similar {
        track_id: String,
        #[clap(long)]
        limit: Option<i32>,
        /// semantic, features or combined
        #[clap(long)]
        mode: Option<String>,
        #[clap(long)]
        min_similarity: Option<f64>,
        /// Skip tracks from the source track's album.
        #[clap(long)]
        exclude_same_album: bool,
    },
    /// Tracks that can be DJ-mixed after a source track.
    Mixable {
        track_id: String,
        #[clap(long)]
        limit: Option<i32>,
        #[clap(long)]
        bpm_tolerance: Option<i32>,
        /// exact, harmonic or any
        #[clap(long)]
        key_mode: Option<String>,
    },
    /// Graded BPM and key matches for a source track.
    Compatible {
        track_id: String,
        /// 0 returns every match.
        #[clap(long, default_value_t = 20)]
        limit: usize,
    },
    /// Tracks close to a tempo, including double and half time.
    Bpm {
        bpm: f64,
        #[clap(long, default_value_t = 20)]
        limit: usize,
    },
    /// Tracks whose key mixes with the given key.
    Key {
        key: String,
        #[clap(long, default_value_t = 20)]
        limit: usize,
    },
    /// Camelot keys that mix with the given key.
    Keys { key: String },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize response")?;
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    metrics::init_metrics();

    if let Command::Keys { key } = &cli_args.command {
        let Some(parsed) = camelot::parse_key(key) else {
            bail!("Unrecognized key: {}", key);
        };
        print_json(&camelot::compatible_keys(&parsed.to_string()))?;
        return print_metrics_if_requested(cli_args.print_metrics);
    }

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let cli_config = CliConfig {
        library_path: cli_args.library.clone(),
        user_id: cli_args.user.clone(),
        page_size: cli_args.page_size,
        page_timeout_ms: cli_args.page_timeout_ms,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    let store = Arc::new(JsonTrackStore::load(&config.library_path)?);
    let user_id = config.user_id.as_str();

    match cli_args.command {
        Command::Similar {
            track_id,
            limit,
            mode,
            min_similarity,
            exclude_same_album,
        } => {
            let opts = SimilarityOptions {
                limit: limit.unwrap_or(config.similarity.limit),
                mode: mode
                    .as_deref()
                    .map(SimilarityMode::from)
                    .unwrap_or(config.similarity.mode),
                min_similarity: min_similarity.unwrap_or(config.similarity.min_similarity),
                include_same_album: config.similarity.include_same_album && !exclude_same_album,
            };
            let engine = RecommendationEngine::with_corpus_config(store, config.corpus.clone());
            let response = engine.find_similar_tracks(user_id, &track_id, opts).await?;
            print_json(&response)?;
        }
        Command::Mixable {
            track_id,
            limit,
            bpm_tolerance,
            key_mode,
        } => {
            let opts = MixingOptions {
                limit: limit.unwrap_or(config.mixing.limit),
                bpm_tolerance: bpm_tolerance.unwrap_or(config.mixing.bpm_tolerance),
                key_mode: key_mode
                    .as_deref()
                    .map(KeyMode::from)
                    .unwrap_or(config.mixing.key_mode),
            };
            let engine = RecommendationEngine::with_corpus_config(store, config.corpus.clone());
            let response = engine.find_mixable_tracks(user_id, &track_id, opts).await?;
            print_json(&response)?;
        }
        Command::Compatible { track_id, limit } => {
            let service = MatchingService::new(store, config.corpus.clone());
            let matches = service
                .find_compatible_tracks(user_id, &track_id, limit)
                .await?;
            print_json(&matches)?;
        }
        Command::Bpm { bpm, limit } => {
            let service = MatchingService::new(store, config.corpus.clone());
            let matches = service.find_bpm_compatible(user_id, bpm, limit).await?;
            print_json(&matches)?;
        }
        Command::Key { key, limit } => {
            let service = MatchingService::new(store, config.corpus.clone());
            let matches = service.find_key_compatible(user_id, &key, limit).await?;
            print_json(&matches)?;
        }
        Command::Keys { .. } => {}
    }

    print_metrics_if_requested(cli_args.print_metrics)
}

/// Metrics go to stderr so stdout stays valid JSON.
fn print_metrics_if_requested(enabled: bool) -> Result<()> {
    if enabled {
        eprint!("{}", metrics::gather_text()?);
    }
    Ok(())
}
