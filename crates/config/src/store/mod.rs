//! Sectioned key/value configuration store.
//!
//! Responsibilities:
//! - Parse the line-oriented `[section]` / `key = value` format into memory.
//! - Answer lookups, existence checks and section enumeration.
//! - Serialize every section and key back to the same format.
//!
//! Does NOT handle:
//! - Interpreting sections as roots (see `roots`).
//! - Preserving comments, blank lines or original ordering on write.
//!
//! Invariants:
//! - The `default` section always exists, even when the file declares no keys
//!   before its first header.
//! - Section names are unique; a repeated header merges into the earlier one.
//! - Parsing stops at the first malformed line; no partial store is returned.
//! - `parse(write(store)) == store` for any store produced by parsing.

mod error;
mod parse;
mod section;

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use crate::constants::DEFAULT_SECTION;

pub use error::{LineError, ParseError, SetError, SyntaxErrorKind, WriteError};
pub use section::Section;

use parse::{Line, classify_line, is_valid_key, is_valid_section_name, render_value};

/// In-memory view of a sectioned config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    sections: BTreeMap<String, Section>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        let mut sections = BTreeMap::new();
        sections.insert(DEFAULT_SECTION.to_string(), Section::new());
        Self { sections }
    }
}

impl ConfigStore {
    /// Creates a store holding only the empty default section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    /// Returns `ParseError::Read` if the file cannot be read (including a
    /// non-existent path) and `ParseError::Syntax` for the first line that
    /// does not follow the format.
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ParseError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let store = content.parse::<ConfigStore>().map_err(|e| ParseError::Syntax {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(
            path = %path.display(),
            sections = store.sections.len(),
            "Parsed config file"
        );
        Ok(store)
    }

    /// Names of every section, including `default`.
    ///
    /// Callers must not rely on the order matching the file.
    pub fn list_sections(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    /// Returns true if a section called `name` exists.
    pub fn section_in_config(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// The implicit section for keys declared before any header.
    pub fn default_section(&self) -> &Section {
        // Every constructor inserts the default section and nothing removes it.
        static EMPTY: Section = Section::EMPTY;
        self.sections.get(DEFAULT_SECTION).unwrap_or(&EMPTY)
    }

    /// Sections other than `default`, in name order.
    pub fn named_sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections
            .iter()
            .filter(|(name, _)| name.as_str() != DEFAULT_SECTION)
            .map(|(name, section)| (name.as_str(), section))
    }

    /// Looks up `key` in `section`, returning an empty string when either is absent.
    ///
    /// Absence is not an error at this layer; use [`ConfigStore::try_get`]
    /// when absent and empty must be told apart.
    pub fn get(&self, section: &str, key: &str) -> &str {
        self.try_get(section, key).unwrap_or_default()
    }

    pub fn try_get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key)
    }

    /// Sets `key` in `section`, creating the section if needed.
    ///
    /// Names that could not be written back as a header, and keys outside the
    /// key alphabet, are rejected so `write_file` output always re-parses.
    pub fn set(
        &mut self,
        section: &str,
        key: &str,
        value: impl Into<String>,
    ) -> Result<Option<String>, SetError> {
        let rejected = |kind| SetError {
            section: section.to_string(),
            key: key.to_string(),
            kind,
        };
        if !is_valid_section_name(section) {
            return Err(rejected(SyntaxErrorKind::InvalidSectionHeader));
        }
        if !is_valid_key(key) {
            return Err(rejected(SyntaxErrorKind::InvalidKey));
        }
        let value = value.into();
        if value.contains(['\n', '\r']) {
            return Err(rejected(SyntaxErrorKind::UnrecognizedLine));
        }
        Ok(self
            .sections
            .entry(section.to_string())
            .or_default()
            .insert(key, value))
    }

    /// Serializes every section and key to `path`.
    ///
    /// The store is never modified. A failure part-way through may leave a
    /// partially written file behind; removing it is the caller's concern.
    ///
    /// # Errors
    /// Returns `WriteError` if `path` cannot be created (e.g. it names an
    /// existing directory) or a write fails.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), WriteError> {
        let path = path.as_ref();
        let to_write_error = |e: std::io::Error| WriteError {
            path: path.to_path_buf(),
            source: e,
        };

        let file = std::fs::File::create(path).map_err(to_write_error)?;
        let mut writer = std::io::BufWriter::new(file);
        write!(writer, "{self}").map_err(to_write_error)?;
        writer.flush().map_err(to_write_error)?;

        tracing::debug!(path = %path.display(), "Wrote config file");
        Ok(())
    }
}

impl FromStr for ConfigStore {
    type Err = LineError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let mut store = ConfigStore::new();
        let mut current = DEFAULT_SECTION.to_string();

        for (index, raw) in content.lines().enumerate() {
            let line = classify_line(raw).map_err(|kind| LineError {
                line: index + 1,
                kind,
            })?;

            match line {
                Line::Blank | Line::Comment => {}
                Line::Header(name) => {
                    store.sections.entry(name.to_string()).or_default();
                    current = name.to_string();
                }
                Line::Assignment { key, value } => {
                    store
                        .sections
                        .entry(current.clone())
                        .or_default()
                        .insert(key, value);
                }
            }
        }

        Ok(store)
    }
}

impl fmt::Display for ConfigStore {
    /// Renders the store in the file format: default keys first without a
    /// header, then one block per named section.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first_block = true;

        let defaults = self.default_section();
        if !defaults.is_empty() {
            write_entries(f, defaults)?;
            first_block = false;
        }

        for (name, section) in self.named_sections() {
            if !first_block {
                writeln!(f)?;
            }
            first_block = false;
            writeln!(f, "[{name}]")?;
            write_entries(f, section)?;
        }
        Ok(())
    }
}

fn write_entries(f: &mut fmt::Formatter<'_>, section: &Section) -> fmt::Result {
    for (key, value) in section.iter() {
        writeln!(f, "{key} = {}", render_value(value))?;
    }
    Ok(())
}
