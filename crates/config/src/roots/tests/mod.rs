//! Tests for root registry loading.
//!
//! Responsibilities:
//! - Test each failure class of the loader against fixture roots files.
//! - Test loader options (base directory, key match check).
//! - Test registry publication and reload through `RegistryHandle`.
//!
//! Invariants:
//! - Fixture paths are relative to the crate root, which is the working
//!   directory of `cargo test`.
//! - Scratch files live in `tempfile` directories and are cleaned up
//!   automatically.

pub mod loader_tests;

use std::path::PathBuf;

/// Path to a file under `tests/testdata`.
pub fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join(name)
}
