//! Null track store implementation.
//!
//! A no-op implementation of TrackStore for setups without a library.

use super::models::{Track, TrackFilter, TrackPage};
use super::trait_def::TrackStore;
use anyhow::Result;
use async_trait::async_trait;

/// A no-op track store that returns empty/none for all operations.
pub struct NullTrackStore;

#[async_trait]
impl TrackStore for NullTrackStore {
    async fn get_track(&self, _user_id: &str, _track_id: &str) -> Result<Option<Track>> {
        Ok(None)
    }

    async fn list_tracks(&self, _user_id: &str, _filter: &TrackFilter) -> Result<TrackPage> {
        Ok(TrackPage::default())
    }
}
