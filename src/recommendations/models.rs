//! Response types for recommendation requests.

use crate::track_store::TrackResponse;
use serde::{Deserialize, Serialize};

/// A track similar to the source track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarTrack {
    pub track: TrackResponse,
    pub similarity: f64,
    /// Absolute BPM difference, 0 when either BPM is unknown.
    pub bpm_diff: u32,
    pub key_compatible: bool,
    pub match_reasons: Vec<String>,
}

/// Result of a similar tracks search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarTracksResponse {
    pub source_track: TrackResponse,
    pub similar: Vec<SimilarTrack>,
    /// Length of `similar`, after the limit is applied.
    pub total_matches: usize,
}

/// A track that can be DJ-mixed with the source track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixableTrack {
    pub track: TrackResponse,
    pub bpm_diff: u32,
    /// "Same Key", a harmonic transition label, or empty when keys were not compared.
    pub key_transition: String,
    pub mix_score: f64,
}

/// Result of a mixable tracks search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixableTracksResponse {
    pub source_track: TrackResponse,
    pub mixable: Vec<MixableTrack>,
}
