//! Track models shared between stores and the recommendation engine.

use serde::{Deserialize, Serialize};

// =============================================================================
// Core Entity
// =============================================================================

/// A track in a user's library.
///
/// `bpm == 0` and an empty `key_camelot` mean the value is unknown, they are
/// never real values. Use [`Track::known_bpm`] and [`Track::known_key`] to read
/// them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Track {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub artist: String,
    pub album_artist: String,
    pub album: String,
    pub album_id: String,
    pub genre: String,
    pub year: u32,
    pub track_number: u32,
    pub disc_number: u32,
    /// Duration in seconds
    pub duration: u32,
    pub play_count: u32,
    pub tags: Vec<String>,
    pub bpm: u32,
    pub key_camelot: String,
}

impl Track {
    /// BPM if known.
    pub fn known_bpm(&self) -> Option<u32> {
        (self.bpm > 0).then_some(self.bpm)
    }

    /// Camelot key if known.
    pub fn known_key(&self) -> Option<&str> {
        (!self.key_camelot.is_empty()).then_some(self.key_camelot.as_str())
    }

    /// Project the track to the caller-facing shape.
    ///
    /// Cover art resolution belongs to the caller, which passes the URL in.
    pub fn to_response(&self, cover_art_url: Option<String>) -> TrackResponse {
        TrackResponse {
            id: self.id.clone(),
            title: self.title.clone(),
            artist: self.artist.clone(),
            album_artist: non_empty(&self.album_artist),
            album: non_empty(&self.album),
            album_id: non_empty(&self.album_id),
            genre: non_empty(&self.genre),
            year: (self.year > 0).then_some(self.year),
            track_number: (self.track_number > 0).then_some(self.track_number),
            disc_number: (self.disc_number > 0).then_some(self.disc_number),
            duration: self.duration,
            duration_str: format_duration(self.duration),
            cover_art_url,
            play_count: self.play_count,
            tags: self.tags.clone(),
            bpm: self.known_bpm(),
            key_camelot: self.known_key().map(str::to_string),
        }
    }
}

/// A track as returned to callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disc_number: Option<u32>,
    pub duration: u32,
    pub duration_str: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_art_url: Option<String>,
    pub play_count: u32,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bpm: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_camelot: Option<String>,
}

// =============================================================================
// Listing
// =============================================================================

/// Filter options for listing a user's tracks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackFilter {
    /// Maximum number of tracks per page.
    pub limit: usize,
    /// Continuation cursor from a previous page, `None` for the first page.
    pub cursor: Option<String>,
}

/// One page of a track listing.
#[derive(Clone, Debug, Default)]
pub struct TrackPage {
    pub items: Vec<Track>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn format_duration(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
