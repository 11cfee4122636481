//! Shared test utilities for multiroot-cli integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory.
//! - Locate the fixture files shared with the config crate.
//!
//! Invariants / Assumptions:
//! - Fixture roots files name key paths relative to the config crate root,
//!   so commands that load roots pass `--base-dir` with `config_crate_dir()`.

use std::path::PathBuf;

use assert_cmd::Command;

/// Returns a hermetic `multiroot-cli` command for integration testing.
///
/// Environment variables that change CLI defaults are cleared so the host
/// cannot leak into the test.
pub fn multiroot_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("multiroot-cli");
    cmd.env_remove("MULTIROOT_ROOTS")
        .env_remove("MULTIROOT_LOG_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

/// Root of the `multiroot-config` crate.
pub fn config_crate_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("config")
}

/// Path to a fixture under the config crate's `tests/testdata`.
pub fn testdata(name: &str) -> PathBuf {
    config_crate_dir().join("tests").join("testdata").join(name)
}
