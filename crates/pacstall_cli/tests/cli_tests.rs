//! End-to-end tests of the `pacstall` binary.

use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

fn pacstall(args: &[&str], config: &std::path::Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pacstall"))
        .args(args)
        .env("PACSTALL_CONFIG", config)
        .env("PACSTALL_DISABLE_PROMPTS", "1")
        .env("NO_COLOR", "1")
        .env_remove("PACSTALL_LOG")
        .output()
        .expect("failed to run pacstall")
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    let output = pacstall(&["--version"], &dir.path().join("config.toml"));

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Pacstall 2.0.0 Kournikova"
    );
}

#[test]
fn test_no_arguments_prints_help() {
    let dir = TempDir::new().unwrap();
    let output = pacstall(&[], &dir.path().join("config.toml"));

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn test_unknown_flag_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let output = pacstall(&["install", "--frobnicate"], &dir.path().join("config.toml"));

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_upgrade_without_packages() {
    let dir = TempDir::new().unwrap();
    let output = pacstall(&["upgrade"], &dir.path().join("config.toml"));

    assert_eq!(output.status.code(), Some(64));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No packages specified"));
}

#[test]
fn test_missing_config_exits_with_no_input() {
    let dir = TempDir::new().unwrap();
    let output = pacstall(&["repo", "list"], &dir.path().join("config.toml"));

    assert_eq!(output.status.code(), Some(66));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[!] ERROR:"));
}

#[test]
fn test_malformed_config_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[settings]\n").unwrap();

    let output = pacstall(&["repo", "list"], &config);

    assert_eq!(output.status.code(), Some(78));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Config attribute 'repository' is required"));
}

#[test]
fn test_config_init_writes_default_document() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");

    let output = pacstall(&["config", "init"], &config);
    assert!(output.status.success());
    assert!(fs::read_to_string(&config)
        .unwrap()
        .contains("https://github.com/pacstall/pacstall-programs"));

    let again = pacstall(&["config", "init"], &config);
    assert_eq!(again.status.code(), Some(73));
}
