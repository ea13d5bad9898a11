//! Request options for similar and mixable track searches.
//!
//! Out-of-range values are normalized to defaults rather than rejected.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: i32 = 10;
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.5;
pub const DEFAULT_BPM_TOLERANCE: i32 = 5;

/// Which similarity axes to score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMode {
    /// Metadata overlap only.
    Semantic,
    /// Audio feature closeness only.
    Features,
    /// 60% semantic, 40% features. Unknown mode names fall back to this.
    #[default]
    #[serde(other)]
    Combined,
}

impl From<&str> for SimilarityMode {
    fn from(value: &str) -> Self {
        match value {
            "semantic" => SimilarityMode::Semantic,
            "features" => SimilarityMode::Features,
            _ => SimilarityMode::Combined,
        }
    }
}

/// How strictly keys must match for mixing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    Exact,
    Any,
    /// Unknown mode names fall back to this.
    #[default]
    #[serde(other)]
    Harmonic,
}

impl From<&str> for KeyMode {
    fn from(value: &str) -> Self {
        match value {
            "exact" => KeyMode::Exact,
            "any" => KeyMode::Any,
            _ => KeyMode::Harmonic,
        }
    }
}

/// Options for [`find_similar_tracks`](super::RecommendationEngine::find_similar_tracks).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimilarityOptions {
    /// Maximum number of similar tracks to return.
    pub limit: i32,
    pub mode: SimilarityMode,
    /// Minimum similarity score (0.0-1.0).
    pub min_similarity: f64,
    /// Whether to include tracks from the source track's album.
    pub include_same_album: bool,
}

impl Default for SimilarityOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            mode: SimilarityMode::Combined,
            min_similarity: DEFAULT_MIN_SIMILARITY,
            include_same_album: true,
        }
    }
}

impl SimilarityOptions {
    /// Replace out-of-range values with their defaults.
    pub fn normalized(mut self) -> Self {
        if self.limit <= 0 {
            self.limit = DEFAULT_LIMIT;
        }
        if self.min_similarity.is_nan() || self.min_similarity <= 0.0 {
            self.min_similarity = DEFAULT_MIN_SIMILARITY;
        }
        self
    }

    /// Result limit as a length. Only meaningful after [`Self::normalized`].
    pub fn limit_len(&self) -> usize {
        self.limit.max(1) as usize
    }
}

/// Options for [`find_mixable_tracks`](super::RecommendationEngine::find_mixable_tracks).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MixingOptions {
    /// Maximum number of mixable tracks to return.
    pub limit: i32,
    /// Allowed BPM difference.
    pub bpm_tolerance: i32,
    pub key_mode: KeyMode,
}

impl Default for MixingOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            bpm_tolerance: DEFAULT_BPM_TOLERANCE,
            key_mode: KeyMode::Harmonic,
        }
    }
}

impl MixingOptions {
    /// Replace out-of-range values with their defaults.
    pub fn normalized(mut self) -> Self {
        if self.limit <= 0 {
            self.limit = DEFAULT_LIMIT;
        }
        if self.bpm_tolerance <= 0 {
            self.bpm_tolerance = DEFAULT_BPM_TOLERANCE;
        }
        self
    }

    pub fn limit_len(&self) -> usize {
        self.limit.max(1) as usize
    }

    pub fn tolerance(&self) -> u32 {
        self.bpm_tolerance.max(0) as u32
    }
}
