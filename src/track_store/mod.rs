mod json_store;
mod models;
mod null_store;
mod trait_def;

pub use json_store::{JsonTrackStore, LibrarySnapshot};
pub use models::*;
pub use null_store::NullTrackStore;
pub use trait_def::TrackStore;

#[cfg(feature = "mock")]
pub use trait_def::MockTrackStore;
