//! TrackStore trait definition.
//!
//! This trait is the read path into the library storage. The recommendation
//! engine never writes through it.

use super::models::{Track, TrackFilter, TrackPage};
use anyhow::Result;
use async_trait::async_trait;

/// Trait for track storage backends.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait TrackStore: Send + Sync {
    /// Get a track by ID for the given user.
    ///
    /// Returns `Ok(None)` if the user has no track with that ID.
    async fn get_track(&self, user_id: &str, track_id: &str) -> Result<Option<Track>>;

    /// List one page of the user's tracks.
    ///
    /// Callers keep requesting pages with the returned `next_cursor` until
    /// `has_more` is false or no cursor is returned.
    async fn list_tracks(&self, user_id: &str, filter: &TrackFilter) -> Result<TrackPage>;
}
