//! Classification of a config section into a root specification.
//!
//! Responsibilities:
//! - Decide, from a section's keys alone, which identity group it declares.
//! - Normalize `file://` private key paths.
//!
//! Does NOT handle:
//! - Reading or decoding files (see `loader.rs`).
//!
//! Invariants:
//! - Classification is pure: no I/O, no logging, same input gives same output.
//! - Token-backed fields win over unrecognized keys, so a module-backed root is
//!   always reported as unsupported rather than malformed.

use std::fmt;

use crate::constants::{
    CERTIFICATE_FIELD, FILE_BACKED_FIELDS, FILE_SCHEME, PRIVATE_KEY_FIELD, TOKEN_BACKED_FIELDS,
    TOKEN_SCHEMES,
};
use crate::store::Section;

/// What a section declares, before any file is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootSpec<'a> {
    /// Key and certificate come from files. Either path may still be missing;
    /// `None` covers both an absent key and an empty value.
    FileBacked {
        private_key: Option<&'a str>,
        certificate: Option<&'a str>,
    },
    /// Key lives in an external key-storage module named by `module`.
    TokenBacked { module: &'a str },
    Invalid(SpecDefect),
}

/// Why a section is not a root specification at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecDefect {
    /// Neither `private_key`/`certificate` nor module fields are present.
    NoKeySource,
    /// File-backed and module-backed fields appear together.
    MixedKeySources,
    /// A key outside both field groups.
    UnrecognizedField(String),
}

impl fmt::Display for SpecDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoKeySource => write!(
                f,
                "no key source: set {PRIVATE_KEY_FIELD} and {CERTIFICATE_FIELD}"
            ),
            Self::MixedKeySources => {
                f.write_str("file-backed and key-storage module fields cannot be combined")
            }
            Self::UnrecognizedField(field) => write!(f, "unrecognized field '{field}'"),
        }
    }
}

pub fn classify(section: &Section) -> RootSpec<'_> {
    let private_key = section.get(PRIVATE_KEY_FIELD);
    let module_uri =
        private_key.filter(|value| TOKEN_SCHEMES.iter().any(|scheme| value.starts_with(scheme)));
    let module_field = TOKEN_BACKED_FIELDS
        .iter()
        .find_map(|field| section.get(field));

    let has_file_fields = FILE_BACKED_FIELDS
        .iter()
        .any(|field| section.contains_key(field));

    if let Some(module) = module_field {
        if has_file_fields {
            return RootSpec::Invalid(SpecDefect::MixedKeySources);
        }
        return RootSpec::TokenBacked { module };
    }
    if let Some(module) = module_uri {
        return RootSpec::TokenBacked { module };
    }

    let unrecognized = section.keys().find(|key| !is_known_field(key));
    if let Some(field) = unrecognized {
        return RootSpec::Invalid(SpecDefect::UnrecognizedField(field.to_string()));
    }

    if !has_file_fields {
        return RootSpec::Invalid(SpecDefect::NoKeySource);
    }

    RootSpec::FileBacked {
        private_key: private_key.map(strip_file_scheme).filter(|p| !p.is_empty()),
        certificate: section.get(CERTIFICATE_FIELD).filter(|p| !p.is_empty()),
    }
}

/// Keys of `section` that belong to either root field group.
pub(crate) fn root_fields(section: &Section) -> Vec<&str> {
    section.keys().filter(|key| is_known_field(key)).collect()
}

fn is_known_field(key: &str) -> bool {
    FILE_BACKED_FIELDS
        .iter()
        .chain(TOKEN_BACKED_FIELDS.iter())
        .any(|field| *field == key)
}

fn strip_file_scheme(path: &str) -> &str {
    path.strip_prefix(FILE_SCHEME).unwrap_or(path)
}
