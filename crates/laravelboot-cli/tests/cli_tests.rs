//! Integration tests for the `laravelboot` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary, run in `dir`, with colours and the release check off.
fn laravelboot(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("laravelboot");
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env("LARAVELBOOT_UPDATE__CHECK", "false")
        .env_remove("RUST_LOG");
    cmd
}

// ── basics ───────────────────────────────────────────────────────────────────

#[test]
fn version_prints_banner() {
    let temp = TempDir::new().unwrap();
    laravelboot(temp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "LaravelBoot v{}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    laravelboot(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn missing_project_name_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    laravelboot(temp.path()).arg("new").assert().code(2);
}

#[test]
fn unknown_command_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    laravelboot(temp.path()).arg("frobnicate").assert().code(2);
}

// ── new ──────────────────────────────────────────────────────────────────────

#[test]
fn hidden_project_name_is_rejected() {
    let temp = TempDir::new().unwrap();
    laravelboot(temp.path())
        .args(["new", ".hidden"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid project name"));
    assert!(!temp.path().join(".hidden").exists());
}

#[test]
fn nested_project_name_is_rejected() {
    let temp = TempDir::new().unwrap();
    laravelboot(temp.path())
        .args(["new", "a/b", "--dry-run"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("path separators"));
}

// ── add ──────────────────────────────────────────────────────────────────────

#[test]
fn add_dry_run_describes_without_writing() {
    let temp = TempDir::new().unwrap();
    laravelboot(temp.path())
        .args(["add", "docker", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run] Would create file"))
        .stdout(predicate::str::contains("Dockerfile"));

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn add_writes_docker_files() {
    let temp = TempDir::new().unwrap();
    laravelboot(temp.path())
        .args(["add", "docker"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Feature 'docker' added successfully"));

    assert!(temp.path().join("docker-compose.yml").is_file());
    assert!(temp.path().join("docker/Dockerfile").is_file());
}

#[test]
fn add_unknown_feature_fails() {
    let temp = TempDir::new().unwrap();
    laravelboot(temp.path())
        .args(["add", "bogus"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("bogus"));
}

#[test]
fn malformed_project_config_is_fatal() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".laravelboot.yaml"), "auth: [unclosed\n").unwrap();

    laravelboot(temp.path())
        .args(["add", "auth", "--dry-run"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(".laravelboot.yaml"));
}

// ── init ─────────────────────────────────────────────────────────────────────

#[test]
fn init_defaults_writes_config() {
    let temp = TempDir::new().unwrap();
    laravelboot(temp.path())
        .args(["init", "--defaults"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Configuration saved to .laravelboot.yaml",
        ));

    let text = fs::read_to_string(temp.path().join(".laravelboot.yaml")).unwrap();
    let doc: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
    assert_eq!(doc["auth"].as_str(), Some("sanctum"));
    assert_eq!(doc["database"].as_str(), Some("mysql"));
    assert_eq!(doc["infra"][0].as_str(), Some("docker"));
}

#[test]
fn init_keeps_existing_config_without_force() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".laravelboot.yaml");
    fs::write(&path, "project_name: keep-me\n").unwrap();

    laravelboot(temp.path())
        .args(["init", "--defaults"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "project_name: keep-me\n");

    laravelboot(temp.path())
        .args(["init", "--defaults", "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains("myapp"));
}

#[test]
fn init_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    laravelboot(temp.path())
        .args(["init", "--defaults", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run] Would create file"));
    assert!(!temp.path().join(".laravelboot.yaml").exists());
}

// ── list / completions / settings ────────────────────────────────────────────

#[test]
fn list_shows_catalog() {
    let temp = TempDir::new().unwrap();
    laravelboot(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("docker"))
        .stdout(predicate::str::contains("roles"))
        .stdout(predicate::str::contains("monitoring"));
}

#[test]
fn list_json_is_parseable() {
    let temp = TempDir::new().unwrap();
    let out = laravelboot(temp.path())
        .args(["list", "--tier", "enterprise", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value[0]["aggregate"], "enterprise");
    assert_eq!(value[0]["features"][0], "quality");
}

#[test]
fn completions_for_bash() {
    let temp = TempDir::new().unwrap();
    laravelboot(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("laravelboot"));
}

#[test]
fn missing_settings_file_fails() {
    let temp = TempDir::new().unwrap();
    laravelboot(temp.path())
        .args(["--config", "nope.toml", "version"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}
