//! Building a root registry from a roots file.
//!
//! Responsibilities:
//! - Walk every named section and resolve it into a `Root`.
//! - Read key and certificate files, resolving relative paths.
//! - Enforce key/certificate consistency unless disabled.
//!
//! Does NOT handle:
//! - Parsing the file format (see `store`).
//! - Publishing the registry to concurrent readers (see `handle.rs`).
//!
//! Invariants:
//! - All-or-nothing: the first failing section aborts the load and no
//!   registry is returned.
//! - Sections are visited in name order, so the reported failure is
//!   deterministic for a given file.
//! - Raw private key bytes only live inside a `SecretSlice` and are zeroized
//!   once decoded.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretSlice};

use super::certificate::RootCertificate;
use super::error::LoadError;
use super::key::{PrivateKey, Signer};
use super::registry::{Root, RootRegistry};
use super::spec::{RootSpec, classify, root_fields};
use crate::constants::{CERTIFICATE_FIELD, DEFAULT_SECTION, PRIVATE_KEY_FIELD};
use crate::store::{ConfigStore, Section};

/// Loads a roots file with default options.
///
/// Relative paths resolve against the process working directory and every
/// key must match its certificate.
///
/// # Errors
/// See [`RootLoader::load`].
pub fn load_roots(path: impl AsRef<Path>) -> Result<RootRegistry, LoadError> {
    RootLoader::new().load(path)
}

/// Builder for loading root registries.
#[derive(Debug, Clone)]
pub struct RootLoader {
    base_dir: Option<PathBuf>,
    verify_key_match: bool,
}

impl Default for RootLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RootLoader {
    pub fn new() -> Self {
        Self {
            base_dir: None,
            verify_key_match: true,
        }
    }

    /// Resolve relative key and certificate paths against `dir` instead of
    /// the working directory.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Enable or disable the private key / certificate public key check.
    pub fn with_key_match_check(mut self, enabled: bool) -> Self {
        self.verify_key_match = enabled;
        self
    }

    /// Parses `path` and resolves every root it declares.
    ///
    /// # Errors
    /// Returns `LoadError::Parse` if the file cannot be read or parsed, and
    /// the first per-section failure otherwise.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<RootRegistry, LoadError> {
        let path = path.as_ref();
        let store = ConfigStore::parse_file(path)?;
        let registry = self.load_store(&store)?;
        tracing::info!(
            path = %path.display(),
            roots = registry.len(),
            "Loaded root registry"
        );
        Ok(registry)
    }

    /// Resolves every named section of an already parsed store.
    ///
    /// # Errors
    /// Returns the first per-section failure.
    pub fn load_store(&self, store: &ConfigStore) -> Result<RootRegistry, LoadError> {
        let defaults = store.default_section();
        let misplaced = root_fields(defaults);
        if !misplaced.is_empty() {
            tracing::warn!(
                section = DEFAULT_SECTION,
                fields = ?misplaced,
                "Default section holds root fields but never declares a root; move them under a [label] header"
            );
        } else if !defaults.is_empty() {
            tracing::debug!(
                section = DEFAULT_SECTION,
                keys = defaults.len(),
                "Skipping default section"
            );
        }

        let mut roots = BTreeMap::new();
        for (label, section) in store.named_sections() {
            let root = self.load_root(label, section)?;
            match roots.entry(label.to_string()) {
                Entry::Occupied(_) => {
                    return Err(LoadError::DuplicateLabel {
                        label: label.to_string(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(root);
                }
            }
        }

        Ok(RootRegistry::from_map(roots))
    }

    fn load_root(&self, label: &str, section: &Section) -> Result<Root, LoadError> {
        let (key_path, cert_path) = match classify(section) {
            RootSpec::FileBacked {
                private_key,
                certificate,
            } => (private_key, certificate),
            RootSpec::TokenBacked { module } => {
                return Err(LoadError::UnsupportedKeyStorage {
                    label: label.to_string(),
                    module: module.to_string(),
                });
            }
            RootSpec::Invalid(defect) => {
                return Err(LoadError::MalformedSpec {
                    label: label.to_string(),
                    defect,
                });
            }
        };

        let key_path = key_path.ok_or_else(|| LoadError::MissingPrivateKeyFile {
            label: label.to_string(),
        })?;
        let private_key = self.load_private_key(label, key_path)?;

        let cert_path = cert_path.ok_or_else(|| LoadError::MissingCertificateFile {
            label: label.to_string(),
        })?;
        let certificate = self.load_certificate(label, cert_path)?;

        if self.verify_key_match {
            let spki = certificate
                .public_key_der()
                .map_err(|e| LoadError::InvalidCertificate {
                    label: label.to_string(),
                    path: self.resolve(cert_path),
                    source: e,
                })?;
            if !private_key.matches_public_key_der(&spki) {
                return Err(LoadError::KeyMismatch {
                    label: label.to_string(),
                });
            }
        }

        tracing::debug!(
            label = %label,
            algorithm = %private_key.algorithm(),
            subject = %certificate.subject(),
            "Loaded root"
        );
        Ok(Root::new(label.to_string(), private_key, certificate))
    }

    fn load_private_key(&self, label: &str, path: &str) -> Result<PrivateKey, LoadError> {
        let path = self.resolve(path);
        let pem = SecretSlice::from(read_file(label, PRIVATE_KEY_FIELD, &path)?);
        PrivateKey::from_pem(pem.expose_secret()).map_err(|e| LoadError::InvalidPrivateKey {
            label: label.to_string(),
            path,
            source: e,
        })
    }

    fn load_certificate(&self, label: &str, path: &str) -> Result<RootCertificate, LoadError> {
        let path = self.resolve(path);
        let pem = read_file(label, CERTIFICATE_FIELD, &path)?;
        RootCertificate::from_pem(&pem).map_err(|e| LoadError::InvalidCertificate {
            label: label.to_string(),
            path,
            source: e,
        })
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

fn read_file(label: &str, field: &'static str, path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|e| LoadError::ReadFailure {
        label: label.to_string(),
        field,
        path: path.to_path_buf(),
        source: e,
    })
}
