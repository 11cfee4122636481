//! Output formatters for CLI commands.
//!
//! Provides table (tab-separated) and JSON output.

use anyhow::Result;
use serde::Serialize;

use crate::args::OutputFormat;

/// One loaded root as reported by `check`.
#[derive(Debug, Clone, Serialize)]
pub struct RootSummary {
    pub label: String,
    pub algorithm: String,
    pub subject: String,
    /// Lowercase hex SHA-256 of the certificate DER.
    pub fingerprint_sha256: String,
}

/// One section as reported by `sections`.
#[derive(Debug, Clone, Serialize)]
pub struct SectionSummary {
    pub name: String,
    pub keys: usize,
}

/// Formatter trait for different output types.
pub trait Formatter {
    fn format_roots(&self, roots: &[RootSummary]) -> Result<String>;

    fn format_sections(&self, sections: &[SectionSummary]) -> Result<String>;
}

pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_roots(&self, roots: &[RootSummary]) -> Result<String> {
        if roots.is_empty() {
            return Ok("No roots found.\n".to_string());
        }

        let mut output = String::from("Label\tAlgorithm\tSubject\tSHA-256 Fingerprint\n");
        for root in roots {
            output.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                root.label, root.algorithm, root.subject, root.fingerprint_sha256
            ));
        }
        Ok(output)
    }

    fn format_sections(&self, sections: &[SectionSummary]) -> Result<String> {
        let mut output = String::from("Section\tKeys\n");
        for section in sections {
            output.push_str(&format!("{}\t{}\n", section.name, section.keys));
        }
        Ok(output)
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_roots(&self, roots: &[RootSummary]) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(roots)?))
    }

    fn format_sections(&self, sections: &[SectionSummary]) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(sections)?))
    }
}

/// Get a formatter for the specified output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
