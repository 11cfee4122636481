//! Configuration layer for a multi-root certificate authority.
//!
//! This crate parses the sectioned `[section]` / `key = value` config format
//! and turns a roots file into a registry of labeled signing identities.

pub mod constants;
mod path;
pub mod roots;
pub mod store;

pub use path::default_roots_path;
pub use roots::{
    KeyAlgorithm, LoadError, PrivateKey, RegistryHandle, Root, RootCertificate, RootLoader,
    RootRegistry, Signer, load_roots,
};
pub use store::{ConfigStore, ParseError, Section, SetError, SyntaxErrorKind, WriteError};
