//! Common test infrastructure
//!
//! Shared fixture library and helpers for the integration tests.
//! Tests should only import from this module, not from internal submodules.

mod constants;
mod fixtures;

pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{create_test_library, test_store, write_library_file};
