//! `normalize`: rewrite a config file in canonical form.
//!
//! Comments and blank lines are dropped, sections and keys come out sorted,
//! and values are quoted only where needed to read back unchanged.

use std::path::Path;

use anyhow::{Context, Result};
use multiroot_config::ConfigStore;

pub fn run(input: &Path, output: &Path) -> Result<()> {
    let store = ConfigStore::parse_file(input)
        .with_context(|| format!("Failed to normalize {}", input.display()))?;

    store
        .write_file(output)
        .with_context(|| format!("Failed to write normalized config to {}", output.display()))?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        sections = store.list_sections().len(),
        "Normalized config file"
    );
    Ok(())
}
