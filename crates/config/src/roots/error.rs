//! Error types for root registry loading.
//!
//! Responsibilities:
//! - Name every way a roots file can fail to become a registry.
//! - Carry the offending section label and file path where one exists.
//!
//! Does NOT handle:
//! - Store syntax errors beyond wrapping them (see `store::error`).
//!
//! Invariants:
//! - Every variant except `Parse` identifies the section that failed.
//! - Messages never include key material or raw config lines.

use std::path::PathBuf;

use thiserror::Error;

use super::certificate::CertificateError;
use super::key::KeyError;
use super::spec::SpecDefect;
use crate::store::ParseError;

/// Errors that can occur while building a root registry.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("root '{label}' is not a valid root specification: {defect}")]
    MalformedSpec { label: String, defect: SpecDefect },

    #[error("root '{label}' uses key-storage module '{module}', which is not supported")]
    UnsupportedKeyStorage { label: String, module: String },

    #[error("root '{label}' has no private_key path")]
    MissingPrivateKeyFile { label: String },

    #[error("root '{label}' has no certificate path")]
    MissingCertificateFile { label: String },

    #[error("root '{label}': failed to read {field} at {path}")]
    ReadFailure {
        label: String,
        field: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("root '{label}': invalid private key at {path}")]
    InvalidPrivateKey {
        label: String,
        path: PathBuf,
        #[source]
        source: KeyError,
    },

    #[error("root '{label}': invalid certificate at {path}")]
    InvalidCertificate {
        label: String,
        path: PathBuf,
        #[source]
        source: CertificateError,
    },

    #[error("root '{label}': private key does not match the certificate's public key")]
    KeyMismatch { label: String },

    #[error("root '{label}' is declared more than once")]
    DuplicateLabel { label: String },
}

impl LoadError {
    /// Label of the section that failed, if the failure is tied to one.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Parse(_) => None,
            Self::MalformedSpec { label, .. }
            | Self::UnsupportedKeyStorage { label, .. }
            | Self::MissingPrivateKeyFile { label }
            | Self::MissingCertificateFile { label }
            | Self::ReadFailure { label, .. }
            | Self::InvalidPrivateKey { label, .. }
            | Self::InvalidCertificate { label, .. }
            | Self::KeyMismatch { label }
            | Self::DuplicateLabel { label } => Some(label),
        }
    }
}
