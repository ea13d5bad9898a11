//! DJ mixability scoring.
//!
//! Weighted sum of BPM closeness (0.5), key compatibility (0.4) and genre
//! match (0.1). Unknown BPM or key earn half credit for their term so tracks
//! lacking analysis are not pushed to the bottom.

use super::camelot::is_key_compatible;
use crate::track_store::Track;

const BPM_WEIGHT: f64 = 0.5;
const BPM_FALLOFF: f64 = 10.0;
const UNKNOWN_BPM_SCORE: f64 = 0.25;

const EXACT_KEY_SCORE: f64 = 0.4;
const HARMONIC_KEY_SCORE: f64 = 0.35;
const UNKNOWN_KEY_SCORE: f64 = 0.2;

const GENRE_SCORE: f64 = 0.1;

/// Mix score in `0.0..=1.0` for playing `candidate` after `source`.
///
/// `bpm_diff` is the absolute BPM difference, ignored when either BPM is unknown.
pub fn score_mix(source: &Track, candidate: &Track, bpm_diff: u32) -> f64 {
    let mut score = 0.0;

    if source.known_bpm().is_some() && candidate.known_bpm().is_some() {
        let closeness = (1.0 - bpm_diff as f64 / BPM_FALLOFF).max(0.0);
        score += closeness * BPM_WEIGHT;
    } else {
        score += UNKNOWN_BPM_SCORE;
    }

    match (source.known_key(), candidate.known_key()) {
        (Some(a), Some(b)) if a == b => score += EXACT_KEY_SCORE,
        (Some(a), Some(b)) if is_key_compatible(a, b) => score += HARMONIC_KEY_SCORE,
        (Some(_), Some(_)) => {}
        _ => score += UNKNOWN_KEY_SCORE,
    }

    if !source.genre.is_empty() && source.genre == candidate.genre {
        score += GENRE_SCORE;
    }

    score
}
