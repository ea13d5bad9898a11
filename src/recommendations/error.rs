use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while computing recommendations.
///
/// Scoring itself cannot fail; every variant comes from reading the library.
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("source track not found: {0}")]
    SourceTrackNotFound(String),

    #[error("failed to get source track: {0}")]
    SourceTrackFetch(#[source] anyhow::Error),

    #[error("failed to get user tracks: {0}")]
    CorpusFetch(#[source] anyhow::Error),

    #[error("failed to get user tracks: page {page} timed out after {timeout:?}")]
    CorpusFetchTimedOut { page: usize, timeout: Duration },
}

impl RecommendationError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RecommendationError::SourceTrackNotFound(_) => "not_found",
            RecommendationError::SourceTrackFetch(_) => "source_fetch_failed",
            RecommendationError::CorpusFetch(_) | RecommendationError::CorpusFetchTimedOut { .. } => {
                "corpus_fetch_failed"
            }
        }
    }
}
