//! Graded BPM and key matching for DJ track selection.
//!
//! Unlike the similarity and mix scorers this service grades every pair
//! instead of filtering on hard tolerances: BPM closeness is measured in
//! percent and accounts for double and half time, keys are graded by their
//! distance on the Camelot wheel.

use super::camelot::parse_key;
use super::corpus::{fetch_all_tracks, CorpusConfig};
use super::error::RecommendationError;
use crate::track_store::{Track, TrackStore};
use serde::Serialize;
use std::sync::Arc;

const NEUTRAL_SCORE: f64 = 0.5;
const MIN_OVERALL_SCORE: f64 = 0.3;
const MIN_SINGLE_AXIS_SCORE: f64 = 0.5;

/// How two keys relate on the Camelot wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyRelation {
    Same,
    Relative,
    Neighbor,
    Compatible,
    EnergyShift,
    Tritone,
    Incompatible,
    Unknown,
}

/// A graded match between a reference and a library track.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub track: Track,
    pub bpm_compatibility: f64,
    pub key_compatibility: f64,
    pub overall_score: f64,
    /// Smallest BPM difference, taking double and half time into account.
    pub bpm_diff: f64,
    pub key_relation: KeyRelation,
}

/// BPM match score in `0.0..=1.0` and the smallest difference found.
pub fn bpm_match_score(source_bpm: f64, target_bpm: f64) -> (f64, f64) {
    let best_diff = [target_bpm, target_bpm * 2.0, target_bpm / 2.0]
        .iter()
        .map(|bpm| (source_bpm - bpm).abs())
        .fold(f64::MAX, f64::min);

    let percent_diff = best_diff / source_bpm * 100.0;
    let score = if percent_diff <= 3.0 {
        1.0 - percent_diff / 10.0
    } else if percent_diff <= 6.0 {
        0.7 - (percent_diff - 3.0) / 10.0
    } else if percent_diff <= 10.0 {
        0.4 - (percent_diff - 6.0) / 10.0
    } else {
        0.0
    };

    (score.max(0.0), best_diff)
}

/// Key match score and relation. Keys may use Camelot or standard notation.
pub fn key_match_score(source_key: &str, target_key: &str) -> (f64, KeyRelation) {
    let (Some(source), Some(target)) = (parse_key(source_key), parse_key(target_key)) else {
        return (NEUTRAL_SCORE, KeyRelation::Unknown);
    };

    let same_mode = source.is_minor() == target.is_minor();
    match (source.wheel_distance(&target), same_mode) {
        (0, true) => (1.0, KeyRelation::Same),
        (0, false) => (0.9, KeyRelation::Relative),
        (1, true) => (0.85, KeyRelation::Neighbor),
        (2, true) => (0.6, KeyRelation::Compatible),
        (1, false) => (0.7, KeyRelation::EnergyShift),
        (6, true) => (0.4, KeyRelation::Tritone),
        _ => (0.3, KeyRelation::Incompatible),
    }
}

/// Graded matching over a user's library.
pub struct MatchingService {
    store: Arc<dyn TrackStore>,
    corpus_config: CorpusConfig,
}

impl MatchingService {
    pub fn new(store: Arc<dyn TrackStore>, corpus_config: CorpusConfig) -> Self {
        Self {
            store,
            corpus_config,
        }
    }

    /// Tracks that match `track_id` on both BPM and key.
    ///
    /// A missing source track yields no matches. A `limit` of 0 returns every
    /// match.
    pub async fn find_compatible_tracks(
        &self,
        user_id: &str,
        track_id: &str,
        limit: usize,
    ) -> Result<Vec<MatchResult>, RecommendationError> {
        let Some(source) = self
            .store
            .get_track(user_id, track_id)
            .await
            .map_err(RecommendationError::SourceTrackFetch)?
        else {
            return Ok(Vec::new());
        };

        let tracks = self.corpus(user_id).await?;
        let results = tracks
            .into_iter()
            .filter(|track| track.id != track_id)
            .filter_map(|track| {
                let (bpm_score, bpm_diff) = match (source.known_bpm(), track.known_bpm()) {
                    (Some(a), Some(b)) => bpm_match_score(a as f64, b as f64),
                    _ => (NEUTRAL_SCORE, 0.0),
                };
                let (key_score, key_relation) = match (source.known_key(), track.known_key()) {
                    (Some(a), Some(b)) => key_match_score(a, b),
                    _ => (NEUTRAL_SCORE, KeyRelation::Unknown),
                };

                let overall_score = (bpm_score + key_score) / 2.0;
                (overall_score >= MIN_OVERALL_SCORE).then_some(MatchResult {
                    track,
                    bpm_compatibility: bpm_score,
                    key_compatibility: key_score,
                    overall_score,
                    bpm_diff,
                    key_relation,
                })
            })
            .collect();

        Ok(sort_and_limit(results, limit))
    }

    /// Tracks whose tempo is close to `target_bpm`.
    pub async fn find_bpm_compatible(
        &self,
        user_id: &str,
        target_bpm: f64,
        limit: usize,
    ) -> Result<Vec<MatchResult>, RecommendationError> {
        if target_bpm <= 0.0 {
            return Ok(Vec::new());
        }

        let tracks = self.corpus(user_id).await?;
        let results = tracks
            .into_iter()
            .filter_map(|track| {
                let bpm = track.known_bpm()?;
                let (score, bpm_diff) = bpm_match_score(target_bpm, bpm as f64);
                (score >= MIN_SINGLE_AXIS_SCORE).then_some(MatchResult {
                    track,
                    bpm_compatibility: score,
                    key_compatibility: 1.0,
                    overall_score: score,
                    bpm_diff,
                    key_relation: KeyRelation::Unknown,
                })
            })
            .collect();

        Ok(sort_and_limit(results, limit))
    }

    /// Tracks whose key mixes with `target_key`.
    pub async fn find_key_compatible(
        &self,
        user_id: &str,
        target_key: &str,
        limit: usize,
    ) -> Result<Vec<MatchResult>, RecommendationError> {
        let tracks = self.corpus(user_id).await?;
        let results = tracks
            .into_iter()
            .filter_map(|track| {
                let (score, key_relation) = key_match_score(target_key, track.known_key()?);
                (score >= MIN_SINGLE_AXIS_SCORE).then_some(MatchResult {
                    track,
                    bpm_compatibility: 1.0,
                    key_compatibility: score,
                    overall_score: score,
                    bpm_diff: 0.0,
                    key_relation,
                })
            })
            .collect();

        Ok(sort_and_limit(results, limit))
    }

    async fn corpus(&self, user_id: &str) -> Result<Vec<Track>, RecommendationError> {
        fetch_all_tracks(self.store.as_ref(), user_id, &self.corpus_config).await
    }
}

fn sort_and_limit(mut results: Vec<MatchResult>, limit: usize) -> Vec<MatchResult> {
    results.sort_by(|a, b| {
        b.overall_score
            .total_cmp(&a.overall_score)
            .then_with(|| a.track.id.cmp(&b.track.id))
    });
    if limit > 0 {
        results.truncate(limit);
    }
    results
}
