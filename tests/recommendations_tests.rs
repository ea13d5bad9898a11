//! Integration tests for similar and mixable track recommendations
//!
//! Runs the engine against the fixture library in `common`.

mod common;

use common::*;
use std::sync::Arc;
use track_recommender::recommendations::{KeyMode, SimilarityMode};
use track_recommender::{
    JsonTrackStore, MixingOptions, RecommendationEngine, RecommendationError, SimilarityOptions,
    Track,
};

fn engine() -> RecommendationEngine {
    RecommendationEngine::new(test_store())
}

fn similar_ids(response: &track_recommender::SimilarTracksResponse) -> Vec<&str> {
    response
        .similar
        .iter()
        .map(|s| s.track.id.as_str())
        .collect()
}

fn mixable_ids(response: &track_recommender::MixableTracksResponse) -> Vec<&str> {
    response
        .mixable
        .iter()
        .map(|m| m.track.id.as_str())
        .collect()
}

// =============================================================================
// Similar Tracks
// =============================================================================

#[tokio::test]
async fn test_similar_tracks_combined_defaults() {
    let response = engine()
        .find_similar_tracks(TEST_USER, SOURCE_TRACK_ID, SimilarityOptions::default())
        .await
        .unwrap();

    assert_eq!(response.source_track.id, SOURCE_TRACK_ID);
    assert_eq!(
        similar_ids(&response),
        vec![SAME_ALBUM_TRACK_ID, HARMONIC_TRACK_ID, SAME_ARTIST_TRACK_ID]
    );
    assert_eq!(response.total_matches, 3);

    let top = &response.similar[0];
    assert!((top.similarity - 1.0).abs() < 1e-9);
    assert_eq!(top.bpm_diff, 2);
    assert!(top.key_compatible);
    assert_eq!(
        top.match_reasons,
        vec![
            "same artist",
            "same genre",
            "shared tags",
            "similar BPM",
            "harmonic key"
        ]
    );

    let justice = &response.similar[1];
    assert!((justice.similarity - 0.67).abs() < 1e-9);
    assert_eq!(justice.bpm_diff, 5);

    let da_funk = &response.similar[2];
    assert!((da_funk.similarity - 0.51).abs() < 1e-9);
    assert!(!da_funk.key_compatible);
}

#[tokio::test]
async fn test_similar_tracks_exclude_same_album() {
    let opts = SimilarityOptions {
        include_same_album: false,
        ..Default::default()
    };
    let response = engine()
        .find_similar_tracks(TEST_USER, SOURCE_TRACK_ID, opts)
        .await
        .unwrap();

    assert_eq!(
        similar_ids(&response),
        vec![HARMONIC_TRACK_ID, SAME_ARTIST_TRACK_ID]
    );
    assert!(response
        .similar
        .iter()
        .all(|s| s.track.album.as_deref() != Some(DISCOVERY_ALBUM)));
}

#[tokio::test]
async fn test_similar_tracks_semantic_mode_breaks_ties_by_id() {
    let opts = SimilarityOptions {
        mode: SimilarityMode::Semantic,
        min_similarity: 0.4,
        ..Default::default()
    };
    let response = engine()
        .find_similar_tracks(TEST_USER, SOURCE_TRACK_ID, opts)
        .await
        .unwrap();

    // Genesis and 1999 both score 0.45
    assert_eq!(
        similar_ids(&response),
        vec![
            SAME_ALBUM_TRACK_ID,
            SAME_ARTIST_TRACK_ID,
            UNANALYZED_TRACK_ID,
            HARMONIC_TRACK_ID,
        ]
    );
}

#[tokio::test]
async fn test_similar_tracks_features_mode() {
    let opts = SimilarityOptions {
        mode: SimilarityMode::Features,
        ..Default::default()
    };
    let response = engine()
        .find_similar_tracks(TEST_USER, SOURCE_TRACK_ID, opts)
        .await
        .unwrap();

    assert_eq!(
        similar_ids(&response),
        vec![SAME_ALBUM_TRACK_ID, HARMONIC_TRACK_ID]
    );
    for similar in &response.similar {
        assert_eq!(similar.match_reasons, vec!["similar BPM", "harmonic key"]);
    }
}

#[tokio::test]
async fn test_similar_tracks_limit_truncates_and_sets_total() {
    let opts = SimilarityOptions {
        limit: 1,
        ..Default::default()
    };
    let response = engine()
        .find_similar_tracks(TEST_USER, SOURCE_TRACK_ID, opts)
        .await
        .unwrap();

    assert_eq!(similar_ids(&response), vec![SAME_ALBUM_TRACK_ID]);
    assert_eq!(response.total_matches, 1);
}

#[tokio::test]
async fn test_similar_tracks_invalid_options_are_normalized() {
    let opts = SimilarityOptions {
        limit: -1,
        min_similarity: 0.0,
        ..Default::default()
    };
    let normalized = engine()
        .find_similar_tracks(TEST_USER, SOURCE_TRACK_ID, opts)
        .await
        .unwrap();
    let defaults = engine()
        .find_similar_tracks(TEST_USER, SOURCE_TRACK_ID, SimilarityOptions::default())
        .await
        .unwrap();

    assert!(normalized.similar.len() <= 10);
    assert_eq!(normalized, defaults);
}

#[tokio::test]
async fn test_similar_tracks_threshold_is_respected() {
    let opts = SimilarityOptions {
        mode: SimilarityMode::Semantic,
        min_similarity: 0.9,
        ..Default::default()
    };
    let response = engine()
        .find_similar_tracks(TEST_USER, SOURCE_TRACK_ID, opts)
        .await
        .unwrap();

    assert_eq!(similar_ids(&response), vec![SAME_ALBUM_TRACK_ID]);
    assert!(response.similar.iter().all(|s| s.similarity >= 0.9));
}

#[tokio::test]
async fn test_similar_tracks_is_idempotent() {
    let engine = engine();
    let first = engine
        .find_similar_tracks(TEST_USER, SOURCE_TRACK_ID, SimilarityOptions::default())
        .await
        .unwrap();
    let second = engine
        .find_similar_tracks(TEST_USER, SOURCE_TRACK_ID, SimilarityOptions::default())
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_similar_tracks_never_contain_source_or_other_users() {
    let opts = SimilarityOptions {
        mode: SimilarityMode::Semantic,
        min_similarity: 0.01,
        limit: 100,
        ..Default::default()
    };
    let response = engine()
        .find_similar_tracks(TEST_USER, SOURCE_TRACK_ID, opts)
        .await
        .unwrap();

    let ids = similar_ids(&response);
    assert!(!ids.contains(&SOURCE_TRACK_ID));
    assert!(!ids.contains(&OTHER_USER_TRACK_ID));
}

#[tokio::test]
async fn test_similar_tracks_source_not_found() {
    let err = engine()
        .find_similar_tracks(TEST_USER, "no-such-track", SimilarityOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RecommendationError::SourceTrackNotFound(ref id) if id == "no-such-track"));
}

#[tokio::test]
async fn test_similar_tracks_other_users_track_is_not_found() {
    let err = engine()
        .find_similar_tracks(TEST_USER, OTHER_USER_TRACK_ID, SimilarityOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RecommendationError::SourceTrackNotFound(_)));
}

#[tokio::test]
async fn test_similar_tracks_single_track_library() {
    let source: Track = create_test_library()
        .into_iter()
        .find(|t| t.id == SOURCE_TRACK_ID)
        .unwrap();
    let engine = RecommendationEngine::new(Arc::new(JsonTrackStore::new(vec![source])));

    let response = engine
        .find_similar_tracks(TEST_USER, SOURCE_TRACK_ID, SimilarityOptions::default())
        .await
        .unwrap();

    assert!(response.similar.is_empty());
    assert_eq!(response.total_matches, 0);
}

#[tokio::test]
async fn test_mixable_tracks_single_track_library() {
    let source: Track = create_test_library()
        .into_iter()
        .find(|t| t.id == SOURCE_TRACK_ID)
        .unwrap();
    let engine = RecommendationEngine::new(Arc::new(JsonTrackStore::new(vec![source])));

    let response = engine
        .find_mixable_tracks(TEST_USER, SOURCE_TRACK_ID, MixingOptions::default())
        .await
        .unwrap();

    assert_eq!(response.source_track.id, SOURCE_TRACK_ID);
    assert!(response.mixable.is_empty());
}

// =============================================================================
// Mixable Tracks
// =============================================================================

#[tokio::test]
async fn test_mixable_tracks_harmonic_defaults() {
    let response = engine()
        .find_mixable_tracks(TEST_USER, SOURCE_TRACK_ID, MixingOptions::default())
        .await
        .unwrap();

    assert_eq!(response.source_track.id, SOURCE_TRACK_ID);
    assert_eq!(
        mixable_ids(&response),
        vec![SAME_ALBUM_TRACK_ID, HARMONIC_TRACK_ID, UNANALYZED_TRACK_ID]
    );

    let same_key = &response.mixable[0];
    assert_eq!(same_key.key_transition, "Same Key");
    assert_eq!(same_key.bpm_diff, 2);
    assert!((same_key.mix_score - 0.9).abs() < 1e-9);

    let fifth_up = &response.mixable[1];
    assert_eq!(fifth_up.key_transition, "Perfect Fifth Up");
    assert!((fifth_up.mix_score - 0.7).abs() < 1e-9);

    // Unknown BPM and key are neither blocked nor rewarded
    let unanalyzed = &response.mixable[2];
    assert_eq!(unanalyzed.bpm_diff, 0);
    assert_eq!(unanalyzed.key_transition, "");
    assert!((unanalyzed.mix_score - 0.55).abs() < 1e-9);
}

#[tokio::test]
async fn test_mixable_tracks_exact_key_mode() {
    let opts = MixingOptions {
        key_mode: KeyMode::Exact,
        ..Default::default()
    };
    let response = engine()
        .find_mixable_tracks(TEST_USER, SOURCE_TRACK_ID, opts)
        .await
        .unwrap();

    assert_eq!(
        mixable_ids(&response),
        vec![SAME_ALBUM_TRACK_ID, UNANALYZED_TRACK_ID]
    );
}

#[tokio::test]
async fn test_mixable_tracks_any_key_mode_with_wide_tolerance() {
    let opts = MixingOptions {
        key_mode: KeyMode::Any,
        bpm_tolerance: 20,
        ..Default::default()
    };
    let response = engine()
        .find_mixable_tracks(TEST_USER, SOURCE_TRACK_ID, opts)
        .await
        .unwrap();

    assert_eq!(
        mixable_ids(&response),
        vec![
            SAME_ALBUM_TRACK_ID,
            HARMONIC_TRACK_ID,
            UNANALYZED_TRACK_ID,
            SAME_ARTIST_TRACK_ID,
            UNRELATED_TRACK_ID,
        ]
    );
    assert!(response.mixable.iter().all(|m| m.key_transition.is_empty()));
}

#[tokio::test]
async fn test_mixable_tracks_bpm_outside_tolerance_excluded() {
    let response = engine()
        .find_mixable_tracks(TEST_USER, SOURCE_TRACK_ID, MixingOptions::default())
        .await
        .unwrap();

    let ids = mixable_ids(&response);
    // 111 and 140 BPM against 123 with a tolerance of 5
    assert!(!ids.contains(&SAME_ARTIST_TRACK_ID));
    assert!(!ids.contains(&UNRELATED_TRACK_ID));
    assert!(response.mixable.iter().all(|m| m.bpm_diff <= 5));
}

#[tokio::test]
async fn test_mixable_tracks_invalid_options_are_normalized() {
    let opts = MixingOptions {
        limit: 0,
        bpm_tolerance: -5,
        key_mode: KeyMode::Harmonic,
    };
    let normalized = engine()
        .find_mixable_tracks(TEST_USER, SOURCE_TRACK_ID, opts)
        .await
        .unwrap();
    let defaults = engine()
        .find_mixable_tracks(TEST_USER, SOURCE_TRACK_ID, MixingOptions::default())
        .await
        .unwrap();

    assert_eq!(normalized, defaults);
}

#[tokio::test]
async fn test_mixable_tracks_source_not_found() {
    let err = engine()
        .find_mixable_tracks(TEST_USER, "no-such-track", MixingOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RecommendationError::SourceTrackNotFound(_)));
    assert_eq!(err.to_string(), "source track not found: no-such-track");
}

// =============================================================================
// Store Failures
// =============================================================================

#[cfg(feature = "mock")]
mod store_failures {
    use super::*;
    use anyhow::anyhow;
    use track_recommender::track_store::MockTrackStore;

    #[tokio::test]
    async fn test_source_lookup_failure_is_propagated() {
        let mut store = MockTrackStore::new();
        store
            .expect_get_track()
            .returning(|_, _| Err(anyhow!("database unavailable")));
        store.expect_list_tracks().never();

        let engine = RecommendationEngine::new(Arc::new(store));
        let err = engine
            .find_similar_tracks(TEST_USER, SOURCE_TRACK_ID, SimilarityOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, RecommendationError::SourceTrackFetch(_)));
        assert!(err.to_string().starts_with("failed to get source track"));
    }

    #[tokio::test]
    async fn test_corpus_failure_is_propagated() {
        let source = create_test_library().remove(0);
        let mut store = MockTrackStore::new();
        store
            .expect_get_track()
            .returning(move |_, _| Ok(Some(source.clone())));
        store
            .expect_list_tracks()
            .returning(|_, _| Err(anyhow!("throttled")));

        let engine = RecommendationEngine::new(Arc::new(store));
        let err = engine
            .find_mixable_tracks(TEST_USER, SOURCE_TRACK_ID, MixingOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, RecommendationError::CorpusFetch(_)));
        assert!(err.to_string().starts_with("failed to get user tracks"));
    }
}
