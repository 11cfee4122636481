//! Integration tests for the multiroot-cli subcommands and exit codes.

mod common;

use common::{config_crate_dir, multiroot_cmd, testdata};
use multiroot_config::ConfigStore;
use predicates::prelude::*;

#[test]
fn test_check_lists_roots() {
    multiroot_cmd()
        .arg("check")
        .arg(testdata("roots.conf"))
        .arg("--base-dir")
        .arg(config_crate_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("Label\tAlgorithm"))
        .stdout(predicate::str::contains("primary\tRSA-2048"))
        .stdout(predicate::str::contains("backup\tECDSA-P256"));
}

#[test]
fn test_check_json_output() {
    let output = multiroot_cmd()
        .args(["check", "--output", "json", "--base-dir"])
        .arg(config_crate_dir())
        .arg(testdata("roots.conf"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let roots: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let roots = roots.as_array().unwrap();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0]["label"], "backup");
    assert_eq!(roots[1]["label"], "primary");
    assert_eq!(
        roots[1]["fingerprint_sha256"].as_str().unwrap().len(),
        64
    );
}

#[test]
fn test_check_reads_path_from_env() {
    multiroot_cmd()
        .env("MULTIROOT_ROOTS", testdata("roots.conf"))
        .arg("check")
        .arg("--base-dir")
        .arg(config_crate_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("primary"));
}

#[test]
fn test_check_unsupported_module_exits_3() {
    multiroot_cmd()
        .arg("check")
        .arg(testdata("roots_ksm.conf"))
        .arg("--base-dir")
        .arg(config_crate_dir())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("'hsm'"));
}

#[test]
fn test_check_parse_failures_exit_2() {
    multiroot_cmd()
        .arg("check")
        .arg(testdata("does_not_exist.conf"))
        .assert()
        .code(2);

    multiroot_cmd()
        .arg("check")
        .arg(testdata("bad.conf"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn test_check_key_mismatch() {
    multiroot_cmd()
        .arg("check")
        .arg(testdata("roots_mismatch.conf"))
        .arg("--base-dir")
        .arg(config_crate_dir())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("does not match"));

    multiroot_cmd()
        .arg("check")
        .arg(testdata("roots_mismatch.conf"))
        .arg("--base-dir")
        .arg(config_crate_dir())
        .arg("--skip-key-match")
        .assert()
        .success();
}

#[test]
fn test_check_empty_roots_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roots.conf");
    std::fs::write(&path, "# nothing configured\n").unwrap();

    multiroot_cmd()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No roots found."));
}

#[test]
fn test_sections() {
    multiroot_cmd()
        .arg("sections")
        .arg(testdata("test.conf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("default\t0"))
        .stdout(predicate::str::contains("sectionName\t5"));
}

#[test]
fn test_normalize_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("normalized.conf");

    multiroot_cmd()
        .arg("normalize")
        .arg(testdata("test.conf"))
        .arg(&out)
        .assert()
        .success();

    let original = ConfigStore::parse_file(testdata("test.conf")).unwrap();
    let normalized = ConfigStore::parse_file(&out).unwrap();
    assert_eq!(original, normalized);
}

#[test]
fn test_normalize_to_directory_exits_4() {
    let dir = tempfile::tempdir().unwrap();

    multiroot_cmd()
        .arg("normalize")
        .arg(testdata("test.conf"))
        .arg(dir.path())
        .assert()
        .code(4);
}

#[test]
fn test_normalize_bad_input_exits_2() {
    let dir = tempfile::tempdir().unwrap();

    multiroot_cmd()
        .arg("normalize")
        .arg(testdata("bad.conf"))
        .arg(dir.path().join("out.conf"))
        .assert()
        .code(2);
    assert!(!dir.path().join("out.conf").exists());
}

#[test]
fn test_help_lists_subcommands() {
    multiroot_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("sections"))
        .stdout(predicate::str::contains("normalize"));
}
