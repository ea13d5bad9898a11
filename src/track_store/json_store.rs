//! Track store backed by a JSON library snapshot.
//!
//! The snapshot is a single document of the form `{"tracks": [...]}` where
//! every track carries its owner's `userId`. The whole snapshot is held in
//! memory; listings are paginated with an offset cursor.

use super::models::{Track, TrackFilter, TrackPage};
use super::trait_def::TrackStore;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// In-memory track store loaded from a JSON snapshot.
pub struct JsonTrackStore {
    tracks: Vec<Track>,
}

impl JsonTrackStore {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// Load the snapshot at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read library file: {:?}", path))?;
        let snapshot: LibrarySnapshot = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse library file: {:?}", path))?;

        info!(
            "Loaded {} tracks from library file {:?}",
            snapshot.tracks.len(),
            path
        );
        Ok(Self::new(snapshot.tracks))
    }

    pub fn tracks_count(&self) -> usize {
        self.tracks.len()
    }

    fn user_tracks<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a Track> + 'a {
        self.tracks.iter().filter(move |t| t.user_id == user_id)
    }
}

#[async_trait]
impl TrackStore for JsonTrackStore {
    async fn get_track(&self, user_id: &str, track_id: &str) -> Result<Option<Track>> {
        Ok(self.user_tracks(user_id).find(|t| t.id == track_id).cloned())
    }

    async fn list_tracks(&self, user_id: &str, filter: &TrackFilter) -> Result<TrackPage> {
        let offset = match filter.cursor.as_deref() {
            None | Some("") => 0,
            Some(cursor) => match cursor.parse::<usize>() {
                Ok(offset) => offset,
                Err(_) => bail!("Invalid track listing cursor: {:?}", cursor),
            },
        };
        let limit = if filter.limit == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            filter.limit
        };

        let total = self.user_tracks(user_id).count();
        let items: Vec<Track> = self
            .user_tracks(user_id)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        let next_offset = offset + items.len();
        let has_more = next_offset < total;
        Ok(TrackPage {
            items,
            next_cursor: has_more.then(|| next_offset.to_string()),
            has_more,
        })
    }
}
