//! Command-line integration tests for the `autoreg` binary.
//!
//! Each test writes a properties file into a temporary directory, runs the
//! binary against it with `assert_cmd`, and checks stdout and the file on disk.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const FULL_CONFIG: &str = "# the registration key\n\
                           agent.auto.register.key = some secret key\n\
                           \n\
                           agent.auto.register.resources = linux,docker\n\
                           agent.auto.register.environments = production,blue\n\
                           agent.auto.register.hostname = agent42.example.com\n";

fn write_config(contents: &str) -> Result<(TempDir, PathBuf)> {
    let dir = tempdir()?;
    let path = dir.path().join("autoregister.properties");
    fs::write(&path, contents)?;
    Ok((dir, path))
}

fn autoreg(path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("autoreg").unwrap();
    cmd.env_remove("AUTOREG_PROPERTIES_FILE");
    cmd.env("RUST_LOG", "debug");
    cmd.arg("--file").arg(path);
    cmd
}

#[test]
fn test_show_prints_settings_with_masked_key() -> Result<()> {
    let (_dir, path) = write_config(FULL_CONFIG)?;

    autoreg(&path)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("agent.auto.register.key = [REDACTED: 15 chars]"))
        .stdout(predicate::str::contains("agent.auto.register.resources = linux,docker"))
        .stdout(predicate::str::contains("agent.auto.register.hostname = agent42.example.com"))
        .stdout(predicate::str::contains("agent.auto.register.elasticAgent.agentId = (not set)"))
        .stdout(predicate::str::contains("some secret key").not());
    Ok(())
}

#[test]
fn test_show_json_with_revealed_key() -> Result<()> {
    let (_dir, path) = write_config(FULL_CONFIG)?;

    let output = autoreg(&path).args(["show", "--json", "--reveal-key"]).output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["key"], "some secret key");
    assert_eq!(json["environments"], serde_json::json!(["production", "blue"]));
    Ok(())
}

#[test]
fn test_show_missing_file_reports_nothing_set() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("missing.properties");

    autoreg(&path)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("agent.auto.register.key = (not set)"));
    Ok(())
}

#[test]
fn test_scrub_rewrites_file() -> Result<()> {
    let (_dir, path) = write_config(FULL_CONFIG)?;

    autoreg(&path)
        .arg("scrub")
        .assert()
        .success()
        .stdout(predicate::str::contains("Scrubbed 4 auto-registration properties"));

    let scrubbed = fs::read_to_string(&path)?;
    assert!(scrubbed.starts_with(
        "# the registration key\n\
         # The autoregister key has been intentionally removed by Go as a security measure.\n\
         # agent.auto.register.key = some secret key\n\n"
    ));
    assert!(scrubbed.lines().all(|l| l.is_empty() || l.starts_with('#')));
    Ok(())
}

#[test]
fn test_scrub_dry_run_leaves_file_untouched() -> Result<()> {
    let (_dir, path) = write_config(FULL_CONFIG)?;

    autoreg(&path)
        .args(["scrub", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# agent.auto.register.hostname = agent42.example.com"));

    assert_eq!(fs::read_to_string(&path)?, FULL_CONFIG);
    Ok(())
}

#[test]
fn test_scrub_dry_run_missing_file_fails() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("missing.properties");

    autoreg(&path)
        .args(["scrub", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to preview scrub"))
        .stderr(predicate::str::contains("Failed to read properties file"));
    assert!(!path.exists());
    Ok(())
}

#[test]
fn test_scrub_without_keys_reports_nothing_found() -> Result<()> {
    let (_dir, path) = write_config("other.setting = 1\n")?;

    autoreg(&path)
        .arg("scrub")
        .assert()
        .success()
        .stdout(predicate::str::contains("No auto-registration properties found"));
    Ok(())
}

#[test]
fn test_scrub_missing_file_fails() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("missing.properties");

    autoreg(&path)
        .arg("scrub")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to scrub"));
    Ok(())
}

#[test]
fn test_file_can_come_from_environment() -> Result<()> {
    let (_dir, path) = write_config("agent.auto.register.hostname = from-env\n")?;

    Command::cargo_bin("autoreg")?
        .env("AUTOREG_PROPERTIES_FILE", &path)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("agent.auto.register.hostname = from-env"));
    Ok(())
}
