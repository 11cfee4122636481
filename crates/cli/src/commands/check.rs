//! `check`: load a roots file and summarize the resulting registry.

use std::path::PathBuf;

use anyhow::{Context, Result};
use multiroot_config::{RootLoader, RootRegistry, Signer, default_roots_path};

use crate::args::OutputFormat;
use crate::formatters::{RootSummary, get_formatter};

pub fn run(
    file: Option<PathBuf>,
    base_dir: Option<PathBuf>,
    skip_key_match: bool,
    output: OutputFormat,
) -> Result<()> {
    let path = match file {
        Some(path) => path,
        None => default_roots_path().context(
            "Unable to determine the default roots file location; pass FILE or set MULTIROOT_ROOTS",
        )?,
    };

    let mut loader = RootLoader::new().with_key_match_check(!skip_key_match);
    if let Some(dir) = base_dir {
        loader = loader.with_base_dir(dir);
    }

    let registry = loader
        .load(&path)
        .with_context(|| format!("Failed to load roots from {}", path.display()))?;

    print!("{}", get_formatter(output).format_roots(&summarize(&registry))?);
    Ok(())
}

fn summarize(registry: &RootRegistry) -> Vec<RootSummary> {
    registry
        .iter()
        .map(|root| RootSummary {
            label: root.label().to_string(),
            algorithm: root.signer().algorithm().to_string(),
            subject: root.certificate().subject(),
            fingerprint_sha256: hex::encode(root.certificate().fingerprint_sha256()),
        })
        .collect()
}
