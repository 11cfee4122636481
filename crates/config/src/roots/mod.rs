//! Root registry loading.
//!
//! Responsibilities:
//! - Interpret each named section of a roots file as a root specification.
//! - Decode file-backed private keys and certificates into usable roots.
//! - Publish loaded registries for concurrent readers.
//!
//! Does NOT handle:
//! - Key-storage modules or hardware tokens; such roots are rejected.
//! - Certificate issuance or chain validation.
//!
//! Invariants:
//! - A registry is returned only when every section resolved.
//! - A registry never changes after construction; reloads replace it whole.

mod certificate;
mod error;
mod handle;
mod key;
mod loader;
mod registry;
mod spec;

#[cfg(test)]
mod tests;

pub use certificate::{CertificateError, RootCertificate};
pub use error::LoadError;
pub use handle::RegistryHandle;
pub use key::{
    EcdsaP256Key, EcdsaP384Key, KeyAlgorithm, KeyError, PrivateKey, RsaKey, SignError, Signer,
};
pub use loader::{RootLoader, load_roots};
pub use registry::{Root, RootRegistry};
pub use spec::{RootSpec, SpecDefect, classify};
