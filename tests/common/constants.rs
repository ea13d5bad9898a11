//! Shared constants for integration tests
//!
//! When the fixture library changes, update only this file and `fixtures.rs`.

// ============================================================================
// Users
// ============================================================================

/// Owner of the fixture library
pub const TEST_USER: &str = "alice";

/// Second user whose tracks must never leak into alice's results
pub const OTHER_USER: &str = "bob";

// ============================================================================
// Track IDs
// ============================================================================

/// "One More Time" by Daft Punk, 123 BPM, 8B
pub const SOURCE_TRACK_ID: &str = "track-one-more-time";

/// "Digital Love" by Daft Punk, same album, 125 BPM, 8B
pub const SAME_ALBUM_TRACK_ID: &str = "track-digital-love";

/// "Da Funk" by Daft Punk, other album, 111 BPM, 3A
pub const SAME_ARTIST_TRACK_ID: &str = "track-da-funk";

/// "Genesis" by Justice, 128 BPM, 9B
pub const HARMONIC_TRACK_ID: &str = "track-genesis";

/// "So What" by Miles Davis, 140 BPM, 2A
pub const UNRELATED_TRACK_ID: &str = "track-so-what";

/// "1999" by Cassius, no BPM or key analysis
pub const UNANALYZED_TRACK_ID: &str = "track-cassius-1999";

/// Bob's copy of "One More Time"
pub const OTHER_USER_TRACK_ID: &str = "bob-one-more-time";

// ============================================================================
// Album
// ============================================================================

pub const DISCOVERY_ALBUM: &str = "Discovery";
