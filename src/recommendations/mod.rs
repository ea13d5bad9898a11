//! Track similarity and DJ mixing recommendations.
//!
//! Scoring is pure and lives in [`camelot`], [`similarity`], [`mix`] and
//! [`matching`]. The [`RecommendationEngine`] and [`MatchingService`] read the
//! user's library through a [`TrackStore`](crate::track_store::TrackStore)
//! and rank candidates.

pub mod camelot;
pub mod corpus;
mod engine;
mod error;
pub mod matching;
pub mod mix;
mod models;
mod options;
pub mod similarity;

pub use corpus::{fetch_all_tracks, CorpusConfig};
pub use engine::{rank_mixable, rank_similar, RecommendationEngine};
pub use error::RecommendationError;
pub use matching::{KeyRelation, MatchResult, MatchingService};
pub use models::{MixableTrack, MixableTracksResponse, SimilarTrack, SimilarTracksResponse};
pub use options::{
    KeyMode, MixingOptions, SimilarityMode, SimilarityOptions, DEFAULT_BPM_TOLERANCE,
    DEFAULT_LIMIT, DEFAULT_MIN_SIMILARITY,
};
