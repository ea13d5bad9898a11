//! Fixture library used by the integration tests.

use super::constants::*;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use track_recommender::track_store::LibrarySnapshot;
use track_recommender::{JsonTrackStore, Track};

#[allow(clippy::too_many_arguments)]
fn track(
    id: &str,
    user_id: &str,
    title: &str,
    artist: &str,
    album: &str,
    genre: &str,
    tags: &[&str],
    bpm: u32,
    key: &str,
) -> Track {
    Track {
        id: id.to_string(),
        user_id: user_id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        album: album.to_string(),
        genre: genre.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        bpm,
        key_camelot: key.to_string(),
        duration: 320,
        ..Default::default()
    }
}

/// Alice's six tracks followed by one track owned by bob.
pub fn create_test_library() -> Vec<Track> {
    vec![
        track(
            SOURCE_TRACK_ID,
            TEST_USER,
            "One More Time",
            "Daft Punk",
            DISCOVERY_ALBUM,
            "Electronic",
            &["house", "french"],
            123,
            "8B",
        ),
        track(
            SAME_ALBUM_TRACK_ID,
            TEST_USER,
            "Digital Love",
            "Daft Punk",
            DISCOVERY_ALBUM,
            "Electronic",
            &["house", "french"],
            125,
            "8B",
        ),
        track(
            SAME_ARTIST_TRACK_ID,
            TEST_USER,
            "Da Funk",
            "Daft Punk",
            "Homework",
            "Electronic",
            &["house"],
            111,
            "3A",
        ),
        track(
            HARMONIC_TRACK_ID,
            TEST_USER,
            "Genesis",
            "Justice",
            "Cross",
            "Electronic",
            &["french", "electro"],
            128,
            "9B",
        ),
        track(
            UNRELATED_TRACK_ID,
            TEST_USER,
            "So What",
            "Miles Davis",
            "Kind of Blue",
            "Jazz",
            &["modal"],
            140,
            "2A",
        ),
        track(
            UNANALYZED_TRACK_ID,
            TEST_USER,
            "1999",
            "Cassius",
            "1999",
            "Electronic",
            &["house"],
            0,
            "",
        ),
        track(
            OTHER_USER_TRACK_ID,
            OTHER_USER,
            "One More Time",
            "Daft Punk",
            DISCOVERY_ALBUM,
            "Electronic",
            &["house", "french"],
            123,
            "8B",
        ),
    ]
}

pub fn test_store() -> Arc<JsonTrackStore> {
    Arc::new(JsonTrackStore::new(create_test_library()))
}

/// Write the fixture library to a temporary JSON snapshot file.
pub fn write_library_file() -> NamedTempFile {
    let snapshot = LibrarySnapshot {
        tracks: create_test_library(),
    };
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&snapshot).unwrap().as_bytes())
        .unwrap();
    file
}
