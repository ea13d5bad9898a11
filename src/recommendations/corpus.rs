//! Full-corpus track fetching.
//!
//! Every call drives the store's paginated listing to exhaustion and returns
//! the user's whole library. Nothing is cached between calls.

use super::error::RecommendationError;
use crate::track_store::{Track, TrackFilter, TrackStore};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Corpus fetching settings.
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    /// Tracks requested per page.
    pub page_size: usize,
    /// Upper bound for a single page request. `None` waits indefinitely.
    pub page_timeout: Option<Duration>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_timeout: None,
        }
    }
}

/// Fetch all tracks of `user_id`.
///
/// Any page failure aborts the whole fetch, no partial corpus is returned.
pub async fn fetch_all_tracks(
    store: &dyn TrackStore,
    user_id: &str,
    config: &CorpusConfig,
) -> Result<Vec<Track>, RecommendationError> {
    let mut all_tracks = Vec::new();
    let mut cursor: Option<String> = None;
    let mut page_number = 0;

    loop {
        let filter = TrackFilter {
            limit: config.page_size,
            cursor: cursor.take(),
        };

        let request = store.list_tracks(user_id, &filter);
        let page = match config.page_timeout {
            Some(timeout) => tokio::time::timeout(timeout, request).await.map_err(|_| {
                RecommendationError::CorpusFetchTimedOut {
                    page: page_number,
                    timeout,
                }
            })?,
            None => request.await,
        }
        .map_err(RecommendationError::CorpusFetch)?;

        debug!(
            "Fetched page {} with {} tracks for user {}",
            page_number,
            page.items.len(),
            user_id
        );
        all_tracks.extend(page.items);
        page_number += 1;

        match page.next_cursor {
            Some(next) if page.has_more && !next.is_empty() => cursor = Some(next),
            _ => break,
        }
    }

    Ok(all_tracks)
}
