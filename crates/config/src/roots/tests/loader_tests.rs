//! Loader tests against the fixture roots files.

use super::testdata;
use crate::roots::{
    CertificateError, KeyAlgorithm, KeyError, LoadError, RootLoader, SpecDefect, Signer,
    load_roots,
};
use crate::store::{ConfigStore, ParseError};

#[test]
fn test_load_two_roots() {
    let registry = load_roots(testdata("roots.conf")).unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.labels().collect::<Vec<_>>(),
        vec!["backup", "primary"]
    );

    let primary = registry.get("primary").unwrap();
    assert!(matches!(
        primary.private_key().algorithm(),
        KeyAlgorithm::Rsa { .. }
    ));
    assert!(primary.certificate().subject().contains("Primary Test Root"));

    let backup = registry.get("backup").unwrap();
    assert_eq!(backup.signer().algorithm(), KeyAlgorithm::EcdsaP256);
}

#[test]
fn test_default_section_is_not_a_root() {
    let store: ConfigStore = format!(
        "log_level = debug\n[primary]\nprivate_key = {}\ncertificate = {}\n",
        testdata("primary.key").display(),
        testdata("primary.crt").display()
    )
    .parse()
    .unwrap();

    let registry = RootLoader::new().load_store(&store).unwrap();
    assert_eq!(registry.len(), 1);
    assert!(!registry.contains("default"));
}

#[test]
fn test_empty_file_gives_empty_registry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roots.conf");
    std::fs::write(&path, "# no roots yet\n").unwrap();

    let registry = load_roots(&path).unwrap();
    assert!(registry.is_empty());
}

#[test]
fn test_missing_file_is_parse_error() {
    let err = load_roots(testdata("enoent.conf")).unwrap_err();
    assert!(matches!(err, LoadError::Parse(ParseError::Read { .. })));
    assert_eq!(err.label(), None);
}

#[test]
fn test_syntax_error_is_parse_error() {
    let err = load_roots(testdata("bad.conf")).unwrap_err();
    assert!(matches!(err, LoadError::Parse(ParseError::Syntax { .. })));
}

#[test]
fn test_ksm_root_is_unsupported() {
    let err = load_roots(testdata("roots_ksm.conf")).unwrap_err();
    match err {
        LoadError::UnsupportedKeyStorage { label, module } => {
            assert_eq!(label, "hsm");
            assert_eq!(module, "hsm-01");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_files_are_read_failures() {
    let err = load_roots(testdata("roots_missing_certificate.conf")).unwrap_err();
    assert!(matches!(
        err,
        LoadError::ReadFailure {
            field: "certificate",
            ..
        }
    ));

    let err = load_roots(testdata("roots_missing_private_key.conf")).unwrap_err();
    assert!(matches!(
        err,
        LoadError::ReadFailure {
            field: "private_key",
            ..
        }
    ));
    assert_eq!(err.label(), Some("primary"));
}

#[test]
fn test_bad_certificate() {
    let err = load_roots(testdata("roots_bad_certificate.conf")).unwrap_err();
    assert!(matches!(
        err,
        LoadError::InvalidCertificate {
            source: CertificateError::NoCertificate,
            ..
        }
    ));
}

#[test]
fn test_bad_private_key() {
    let err = load_roots(testdata("roots_bad_private_key.conf")).unwrap_err();
    assert!(matches!(
        err,
        LoadError::InvalidPrivateKey {
            source: KeyError::Decode { .. },
            ..
        }
    ));
}

#[test]
fn test_missing_entries() {
    let err = load_roots(testdata("roots_missing_private_key_entry.conf")).unwrap_err();
    assert!(matches!(err, LoadError::MissingPrivateKeyFile { .. }));

    let err = load_roots(testdata("roots_missing_certificate_entry.conf")).unwrap_err();
    assert!(matches!(err, LoadError::MissingCertificateFile { .. }));
}

#[test]
fn test_malformed_specs() {
    let err = load_roots(testdata("roots_badspec.conf")).unwrap_err();
    assert!(matches!(
        err,
        LoadError::MalformedSpec {
            defect: SpecDefect::NoKeySource,
            ..
        }
    ));

    let err = load_roots(testdata("roots_badspec2.conf")).unwrap_err();
    assert!(matches!(
        err,
        LoadError::MalformedSpec {
            defect: SpecDefect::MixedKeySources,
            ..
        }
    ));

    let err = load_roots(testdata("roots_badspec3.conf")).unwrap_err();
    match err {
        LoadError::MalformedSpec {
            defect: SpecDefect::UnrecognizedField(field),
            ..
        } => assert_eq!(field, "profile"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_key_mismatch() {
    let err = load_roots(testdata("roots_mismatch.conf")).unwrap_err();
    assert!(matches!(err, LoadError::KeyMismatch { ref label } if label == "primary"));

    let registry = RootLoader::new()
        .with_key_match_check(false)
        .load(testdata("roots_mismatch.conf"))
        .unwrap();
    assert!(registry.contains("primary"));
}

#[test]
fn test_base_dir_resolves_relative_paths() {
    let err = load_roots(testdata("roots_relative.conf")).unwrap_err();
    assert!(matches!(err, LoadError::ReadFailure { .. }));

    let registry = RootLoader::new()
        .with_base_dir(testdata(""))
        .load(testdata("roots_relative.conf"))
        .unwrap();
    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.get("p384").unwrap().signer().algorithm(),
        KeyAlgorithm::EcdsaP384
    );
}

#[test]
fn test_first_failure_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roots.conf");
    std::fs::write(
        &path,
        format!(
            "[alpha]\nprivate_key = {}\ncertificate = {}\n\n[beta]\nksm = hsm\n",
            testdata("primary.key").display(),
            testdata("primary.crt").display()
        ),
    )
    .unwrap();

    let err = load_roots(&path).unwrap_err();
    assert_eq!(err.label(), Some("beta"));
}

#[test]
fn test_error_messages_name_the_root() {
    let err = load_roots(testdata("roots_missing_certificate_entry.conf")).unwrap_err();
    assert!(err.to_string().contains("'primary'"));
}

#[test]
fn test_root_fields_in_default_section_declare_no_root() {
    let store: ConfigStore = format!(
        "[default]\nprivate_key = {}\ncertificate = {}\n",
        testdata("primary.key").display(),
        testdata("primary.crt").display()
    )
    .parse()
    .unwrap();

    assert_eq!(
        crate::roots::spec::root_fields(store.default_section()),
        vec!["certificate", "private_key"]
    );
    let registry = RootLoader::new().load_store(&store).unwrap();
    assert!(registry.is_empty());
}
