//! Candidate ranking for similar and mixable tracks.
//!
//! Each request reads the user's whole library, scores every candidate in a
//! single pass, sorts by score and truncates to the requested limit. Ties are
//! broken by track ID so identical inputs always rank identically.

use super::camelot::{bpm_compatibility, is_key_compatible, key_transition, KeyTransition};
use super::corpus::{fetch_all_tracks, CorpusConfig};
use super::error::RecommendationError;
use super::mix::score_mix;
use super::models::{MixableTrack, MixableTracksResponse, SimilarTrack, SimilarTracksResponse};
use super::options::{KeyMode, MixingOptions, SimilarityOptions};
use super::similarity::score_similarity;
use crate::metrics;
use crate::track_store::{Track, TrackStore};
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Finds similar and DJ-mixable tracks in a user's library.
pub struct RecommendationEngine {
    store: Arc<dyn TrackStore>,
    corpus_config: CorpusConfig,
}

impl RecommendationEngine {
    pub fn new(store: Arc<dyn TrackStore>) -> Self {
        Self::with_corpus_config(store, CorpusConfig::default())
    }

    pub fn with_corpus_config(store: Arc<dyn TrackStore>, corpus_config: CorpusConfig) -> Self {
        Self {
            store,
            corpus_config,
        }
    }

    /// Find tracks similar to `track_id` in the user's library.
    pub async fn find_similar_tracks(
        &self,
        user_id: &str,
        track_id: &str,
        opts: SimilarityOptions,
    ) -> Result<SimilarTracksResponse, RecommendationError> {
        let started = Instant::now();
        let result = self.similar_tracks(user_id, track_id, opts).await;
        record_outcome("similar", &result, started);
        result.map(|(response, _)| response)
    }

    /// Find tracks that can be DJ-mixed after `track_id`.
    pub async fn find_mixable_tracks(
        &self,
        user_id: &str,
        track_id: &str,
        opts: MixingOptions,
    ) -> Result<MixableTracksResponse, RecommendationError> {
        let started = Instant::now();
        let result = self.mixable_tracks(user_id, track_id, opts).await;
        record_outcome("mixable", &result, started);
        result.map(|(response, _)| response)
    }

    async fn similar_tracks(
        &self,
        user_id: &str,
        track_id: &str,
        opts: SimilarityOptions,
    ) -> Result<(SimilarTracksResponse, usize), RecommendationError> {
        let source = self.source_track(user_id, track_id).await?;
        let opts = opts.normalized();
        let corpus = fetch_all_tracks(self.store.as_ref(), user_id, &self.corpus_config).await?;

        let similar = rank_similar(&source, &corpus, &opts);
        debug!(
            "Similar tracks for {}: {} candidates, {} returned",
            track_id,
            corpus.len(),
            similar.len()
        );

        let response = SimilarTracksResponse {
            source_track: source.to_response(None),
            total_matches: similar.len(),
            similar,
        };
        Ok((response, corpus.len()))
    }

    async fn mixable_tracks(
        &self,
        user_id: &str,
        track_id: &str,
        opts: MixingOptions,
    ) -> Result<(MixableTracksResponse, usize), RecommendationError> {
        let source = self.source_track(user_id, track_id).await?;
        let opts = opts.normalized();
        let corpus = fetch_all_tracks(self.store.as_ref(), user_id, &self.corpus_config).await?;

        let mixable = rank_mixable(&source, &corpus, &opts);
        debug!(
            "Mixable tracks for {}: {} candidates, {} returned",
            track_id,
            corpus.len(),
            mixable.len()
        );

        let response = MixableTracksResponse {
            source_track: source.to_response(None),
            mixable,
        };
        Ok((response, corpus.len()))
    }

    async fn source_track(&self, user_id: &str, track_id: &str) -> Result<Track, RecommendationError> {
        self.store
            .get_track(user_id, track_id)
            .await
            .map_err(RecommendationError::SourceTrackFetch)?
            .ok_or_else(|| RecommendationError::SourceTrackNotFound(track_id.to_string()))
    }
}

fn record_outcome<T>(kind: &str, result: &Result<(T, usize), RecommendationError>, started: Instant) {
    match result {
        Ok((_, corpus_size)) => {
            metrics::record_recommendation(kind, "ok", Some(*corpus_size), started.elapsed())
        }
        Err(e) => {
            warn!("{} tracks request failed: {}", kind, e);
            metrics::record_recommendation(kind, e.kind(), None, started.elapsed())
        }
    }
}

/// Score `corpus` against `source` and keep the best matches above the threshold.
///
/// `opts` must already be normalized.
pub fn rank_similar(source: &Track, corpus: &[Track], opts: &SimilarityOptions) -> Vec<SimilarTrack> {
    let mut candidates: Vec<SimilarTrack> = corpus
        .iter()
        .filter(|track| track.id != source.id)
        .filter(|track| {
            opts.include_same_album || source.album.is_empty() || track.album != source.album
        })
        .filter_map(|track| {
            let scored = score_similarity(source, track, opts.mode);
            if scored.score < opts.min_similarity {
                return None;
            }

            let bpm_diff = match (source.known_bpm(), track.known_bpm()) {
                (Some(a), Some(b)) => a.abs_diff(b),
                _ => 0,
            };
            Some(SimilarTrack {
                track: track.to_response(None),
                similarity: scored.score,
                bpm_diff,
                key_compatible: is_key_compatible(&source.key_camelot, &track.key_camelot),
                match_reasons: scored.reasons,
            })
        })
        .collect();

    candidates.sort_by(|a, b| by_score_then_id(a.similarity, b.similarity, &a.track.id, &b.track.id));
    candidates.truncate(opts.limit_len());
    candidates
}

/// Filter `corpus` down to tracks that mix with `source` and rank them.
///
/// `opts` must already be normalized.
pub fn rank_mixable(source: &Track, corpus: &[Track], opts: &MixingOptions) -> Vec<MixableTrack> {
    let mut candidates: Vec<MixableTrack> = corpus
        .iter()
        .filter(|track| track.id != source.id)
        .filter_map(|track| {
            // Unknown BPM on either side is always reported as compatible.
            let (bpm_diff, bpm_ok) = bpm_compatibility(source.bpm, track.bpm, opts.tolerance());
            if !bpm_ok {
                return None;
            }

            let transition = mix_key_transition(source, track, opts.key_mode)?;
            Some(MixableTrack {
                track: track.to_response(None),
                bpm_diff,
                key_transition: transition.to_string(),
                mix_score: score_mix(source, track, bpm_diff),
            })
        })
        .collect();

    candidates.sort_by(|a, b| by_score_then_id(a.mix_score, b.mix_score, &a.track.id, &b.track.id));
    candidates.truncate(opts.limit_len());
    candidates
}

/// Transition label for a candidate, `None` when its key excludes it.
///
/// Keys are only compared when both are known; otherwise the candidate passes
/// with an empty label.
fn mix_key_transition(source: &Track, candidate: &Track, key_mode: KeyMode) -> Option<&'static str> {
    let (Some(from), Some(to)) = (source.known_key(), candidate.known_key()) else {
        return Some("");
    };
    match key_mode {
        KeyMode::Any => Some(""),
        KeyMode::Exact => (from == to).then(|| KeyTransition::Same.label()),
        KeyMode::Harmonic => key_transition(from, to).map(|t| t.label()),
    }
}

fn by_score_then_id(score_a: f64, score_b: f64, id_a: &str, id_b: &str) -> Ordering {
    score_b.total_cmp(&score_a).then_with(|| id_a.cmp(id_b))
}
