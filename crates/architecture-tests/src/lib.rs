//! Shared helpers for workspace architecture tests.
//!
//! Responsibilities:
//! - Locate the workspace root regardless of the test's working directory.
//! - Enumerate the Rust source files the hygiene tests inspect.

use std::fs;
use std::path::{Path, PathBuf};

/// Walks up from the current directory to the `Cargo.toml` declaring `[workspace]`.
pub fn find_workspace_root() -> PathBuf {
    let current_dir = std::env::current_dir().expect("Failed to get current directory");

    let mut dir = current_dir.as_path();
    loop {
        let cargo_toml = dir.join("Cargo.toml");
        if cargo_toml.exists()
            && let Ok(content) = fs::read_to_string(&cargo_toml)
            && content.contains("[workspace]")
        {
            return dir.to_path_buf();
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => return current_dir,
        }
    }
}

/// Every `.rs` file under `crates/`, excluding this crate and build output.
pub fn workspace_rust_files() -> Vec<PathBuf> {
    let crates_dir = find_workspace_root().join("crates");
    walkdir::WalkDir::new(&crates_dir)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e.path()))
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.into_path())
        .collect()
}

fn is_skipped_dir(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name == "target" || name == "architecture-tests")
}

/// Returns true for files that only hold tests.
pub fn is_test_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().replace('\\', "/");
    path_str.contains("/tests/") || path_str.ends_with("_tests.rs")
}

/// Source text before the trailing `#[cfg(test)] mod tests { .. }` block.
pub fn non_test_source(content: &str) -> &str {
    match content.find("#[cfg(test)]\nmod tests {") {
        Some(index) => &content[..index],
        None => content,
    }
}

/// Describes why `line` drops a temp directory guard early, if it does.
///
/// `let _ = tempfile::..` drops the guard immediately; a named binding,
/// including an underscore-prefixed one such as `_dir`, keeps it alive
/// until the end of scope.
pub fn tempfile_binding_violation(line: &str) -> Option<&'static str> {
    let trimmed = line.trim();
    if trimmed.starts_with("//") {
        return None;
    }

    if trimmed.starts_with("let _ = tempfile::")
        || trimmed.starts_with("let _ = tempdir()")
        || trimmed.starts_with("let _ = NamedTempFile")
    {
        return Some("tempfile instance bound to `_` - use a named variable for RAII cleanup");
    }

    if trimmed.contains("tempfile::tempdir()") && !trimmed.starts_with("let ") {
        return Some("tempfile call result not retained - bind to a variable for RAII cleanup");
    }
    None
}
