//! Track Recommender Library
//!
//! Similar-track and DJ-mixable-track recommendations over a user's music
//! library. The library itself is reached through the [`TrackStore`] trait.

pub mod config;
pub mod metrics;
pub mod recommendations;
pub mod track_store;

// Re-export commonly used types for convenience
pub use recommendations::{
    MixableTracksResponse, MixingOptions, RecommendationEngine, RecommendationError,
    SimilarTracksResponse, SimilarityOptions,
};
pub use track_store::{JsonTrackStore, NullTrackStore, Track, TrackStore};
