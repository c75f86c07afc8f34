//! Exit codes and error messages.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stackform(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stackform").unwrap();
    cmd.current_dir(temp.path())
        .env("XDG_CONFIG_HOME", temp.path())
        .env("HOME", temp.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    stackform(&temp)
        .arg("--frobnicate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--frobnicate"));
    assert!(!temp.path().join("vpc_new.yaml").exists());
}

#[test]
fn unknown_format_flag_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    stackform(&temp)
        .args(["--format", "xml"])
        .assert()
        .code(2);
}

#[test]
fn missing_config_file_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    stackform(&temp)
        .args(["--config", "absent.toml"])
        .assert()
        .code(4)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Configuration error"));
    assert!(!temp.path().join("vpc_new.yaml").exists());
}

#[test]
fn bad_config_value_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bad.toml"), "[output]\nformat = \"xml\"\n").unwrap();

    stackform(&temp)
        .args(["--config", "bad.toml"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("STACKFORM_OUTPUT__"));
}

#[test]
fn bad_environment_value_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    stackform(&temp)
        .env("STACKFORM_OUTPUT__FORMAT", "xml")
        .assert()
        .code(4);
    assert!(!temp.path().join("vpc_new.yaml").exists());
}

#[test]
fn verbose_failure_shows_cause() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("blocker"), "").unwrap();

    stackform(&temp)
        .args(["-v", "-o", "blocker/vpc.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("blocker"))
        .stderr(predicate::str::contains("Use -v").not());
}
