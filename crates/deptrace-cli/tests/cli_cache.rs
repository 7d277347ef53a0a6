use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[allow(deprecated)]
fn deptrace_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("deptrace").unwrap();
    cmd.env("DEPTRACE_HOME", home).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cache_info_reports_packages() {
    let tmp = TempDir::new().unwrap();
    let cache = tmp.path().join("cache.json");
    fs::write(
        &cache,
        r#"{"mainnet::0x1::MoveStdlib": {"address": "0x1", "name": "MoveStdlib"}}"#,
    )
    .unwrap();

    deptrace_cmd(tmp.path())
        .args(["cache", "info", "--cache-file"])
        .arg(&cache)
        .assert()
        .success()
        .stdout(predicate::str::contains("Packages: 1"))
        .stdout(predicate::str::contains("mainnet: 1"));
}

#[test]
fn test_cache_info_without_cache() {
    let tmp = TempDir::new().unwrap();
    deptrace_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["cache", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created yet"));
}

#[test]
fn test_cache_clean_removes_file() {
    let tmp = TempDir::new().unwrap();
    let cache = tmp.path().join("cache.json");
    fs::write(&cache, "{}").unwrap();

    deptrace_cmd(tmp.path())
        .args(["cache", "clean", "--cache-file"])
        .arg(&cache)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared metadata cache"));
    assert!(!cache.exists());

    deptrace_cmd(tmp.path())
        .args(["cache", "clean", "--cache-file"])
        .arg(&cache)
        .assert()
        .success()
        .stdout(predicate::str::contains("No metadata cache"));
}

#[test]
fn test_cache_file_from_config() {
    let tmp = TempDir::new().unwrap();
    let cache = tmp.path().join("custom.json");
    fs::write(&cache, "{}").unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        format!("[cache]\nfile = {:?}\n", cache.display().to_string()),
    )
    .unwrap();

    deptrace_cmd(tmp.path())
        .args(["cache", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.json"));
}
