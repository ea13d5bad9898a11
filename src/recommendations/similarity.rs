//! Rule-based track similarity scoring.
//!
//! Two independent axes, each in `0.0..=1.0`:
//! - semantic: metadata overlap (artist, genre, tags)
//! - features: audio feature closeness (BPM, harmonic key)
//!
//! The "semantic" axis is plain metadata matching, not learned embeddings.

use super::camelot::is_key_compatible;
use super::options::SimilarityMode;
use crate::track_store::Track;
use std::collections::HashSet;

const SAME_ARTIST_WEIGHT: f64 = 0.4;
const SAME_GENRE_WEIGHT: f64 = 0.3;
const SHARED_TAGS_WEIGHT: f64 = 0.3;

const CLOSE_BPM_DIFF: u32 = 5;
const NEAR_BPM_DIFF: u32 = 10;
const CLOSE_BPM_SCORE: f64 = 0.5;
const NEAR_BPM_SCORE: f64 = 0.3;
const HARMONIC_KEY_SCORE: f64 = 0.5;

const COMBINED_SEMANTIC_WEIGHT: f64 = 0.6;
const COMBINED_FEATURE_WEIGHT: f64 = 0.4;

pub const REASON_SAME_ARTIST: &str = "same artist";
pub const REASON_SAME_GENRE: &str = "same genre";
pub const REASON_SHARED_TAGS: &str = "shared tags";
pub const REASON_SIMILAR_BPM: &str = "similar BPM";
pub const REASON_HARMONIC_KEY: &str = "harmonic key";

/// A similarity score with the reasons that contributed to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoredSimilarity {
    pub score: f64,
    pub reasons: Vec<String>,
}

/// Score `candidate` against `source` using the given mode.
pub fn score_similarity(source: &Track, candidate: &Track, mode: SimilarityMode) -> ScoredSimilarity {
    match mode {
        SimilarityMode::Semantic => semantic_similarity(source, candidate),
        SimilarityMode::Features => feature_similarity(source, candidate),
        SimilarityMode::Combined => {
            let semantic = semantic_similarity(source, candidate);
            let features = feature_similarity(source, candidate);

            let mut reasons = semantic.reasons;
            reasons.extend(features.reasons);
            ScoredSimilarity {
                score: semantic.score * COMBINED_SEMANTIC_WEIGHT
                    + features.score * COMBINED_FEATURE_WEIGHT,
                reasons,
            }
        }
    }
}

/// Metadata overlap: same artist, same genre and shared tags.
pub fn semantic_similarity(source: &Track, candidate: &Track) -> ScoredSimilarity {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    if !source.artist.is_empty() && source.artist == candidate.artist {
        score += SAME_ARTIST_WEIGHT;
        reasons.push(REASON_SAME_ARTIST.to_string());
    }

    if !source.genre.is_empty() && source.genre == candidate.genre {
        score += SAME_GENRE_WEIGHT;
        reasons.push(REASON_SAME_GENRE.to_string());
    }

    let overlap = count_overlapping_tags(&source.tags, &candidate.tags);
    if overlap > 0 {
        let denominator = source.tags.len().max(candidate.tags.len());
        score += overlap as f64 / denominator as f64 * SHARED_TAGS_WEIGHT;
        reasons.push(REASON_SHARED_TAGS.to_string());
    }

    ScoredSimilarity {
        score: score.min(1.0),
        reasons,
    }
}

/// Audio feature closeness over BPM and key.
///
/// A feature only counts when both tracks have a known value for it. With no
/// comparable feature the score is 0.
pub fn feature_similarity(source: &Track, candidate: &Track) -> ScoredSimilarity {
    let mut score = 0.0;
    let mut reasons = Vec::new();
    let mut feature_count = 0u32;

    if let (Some(a), Some(b)) = (source.known_bpm(), candidate.known_bpm()) {
        let diff = a.abs_diff(b);
        if diff <= CLOSE_BPM_DIFF {
            score += CLOSE_BPM_SCORE;
            reasons.push(REASON_SIMILAR_BPM.to_string());
        } else if diff <= NEAR_BPM_DIFF {
            score += NEAR_BPM_SCORE;
        }
        feature_count += 1;
    }

    if let (Some(a), Some(b)) = (source.known_key(), candidate.known_key()) {
        if is_key_compatible(a, b) {
            score += HARMONIC_KEY_SCORE;
            reasons.push(REASON_HARMONIC_KEY.to_string());
        }
        feature_count += 1;
    }

    if feature_count > 0 {
        // Each feature maxes out at 0.5, rescale to 0..=1.
        score = (score / feature_count as f64 * 2.0).min(1.0);
    }

    ScoredSimilarity { score, reasons }
}

/// Number of distinct tags of `b` that also appear in `a`.
fn count_overlapping_tags(a: &[String], b: &[String]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let in_a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let in_b: HashSet<&str> = b.iter().map(String::as_str).collect();
    in_b.intersection(&in_a).count()
}
