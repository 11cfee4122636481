//! Error types for the sectioned config store.
//!
//! Responsibilities:
//! - Describe read failures and grammar violations found while parsing.
//! - Describe failures to write a store back to disk.
//!
//! Invariants:
//! - Syntax errors carry the 1-based line number and the kind of defect only.
//!   The offending line is NEVER echoed, because root sections may hold
//!   module PINs or other secrets.

use std::path::PathBuf;

use thiserror::Error;

/// The grammar rule a rejected line violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// Line starts with `[` but is not a well-formed `[name]` header.
    InvalidSectionHeader,
    /// Header brackets enclose nothing but whitespace.
    EmptySectionName,
    /// Text before `=` is empty or contains characters not allowed in keys.
    InvalidKey,
    /// Not a header, assignment, comment or blank line.
    UnrecognizedLine,
}

impl std::fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::InvalidSectionHeader => "malformed section header",
            Self::EmptySectionName => "empty section name",
            Self::InvalidKey => "invalid key (allowed: letters, digits, '_', '-', '.')",
            Self::UnrecognizedLine => "expected a section header, key = value, or comment",
        };
        f.write_str(message)
    }
}

/// A grammar violation at a specific line of the input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct LineError {
    /// 1-based line number.
    pub line: usize,
    /// What was wrong with the line.
    pub kind: SyntaxErrorKind,
}

/// Errors that can occur when parsing a config file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read config file at {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}")]
    Syntax {
        path: PathBuf,
        source: LineError,
    },
}

/// An entry rejected by `ConfigStore::set` because it could not be written
/// back and re-parsed. The value is never included.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot set '{key}' in section '{section}': {kind}")]
pub struct SetError {
    pub section: String,
    pub key: String,
    pub kind: SyntaxErrorKind,
}

/// Failure to serialize a store to disk.
#[derive(Error, Debug)]
#[error("Failed to write config file at {path}")]
pub struct WriteError {
    pub path: PathBuf,
    pub source: std::io::Error,
}
