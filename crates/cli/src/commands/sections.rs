//! `sections`: list the sections of a config file.

use std::path::Path;

use anyhow::{Context, Result};
use multiroot_config::ConfigStore;

use crate::args::OutputFormat;
use crate::formatters::{SectionSummary, get_formatter};

pub fn run(file: &Path, output: OutputFormat) -> Result<()> {
    let store = ConfigStore::parse_file(file)
        .with_context(|| format!("Failed to read sections from {}", file.display()))?;

    let sections: Vec<SectionSummary> = store
        .list_sections()
        .into_iter()
        .map(|name| SectionSummary {
            name: name.to_string(),
            keys: store.section(name).map_or(0, |section| section.len()),
        })
        .collect();

    print!("{}", get_formatter(output).format_sections(&sections)?);
    Ok(())
}
