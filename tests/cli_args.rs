//! Tests for CLI argument parsing, run against the built binary.

mod common;

use common::temp_config;
use std::process::Command;

fn reduxlite_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_reduxlite"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let output = reduxlite_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in ["demo", "fetch", "query", "catalog"] {
        assert!(stdout.contains(subcommand), "missing {subcommand}");
    }
}

#[test]
fn test_query_prints_sorted_query_string() {
    let (_dir, path) = temp_config("");
    let output = reduxlite_cmd()
        .args(["--config", path.to_str().unwrap()])
        .args(["query", "--channel", "beta", "--os", "mac"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "channel=beta&os=mac"
    );
}

#[test]
fn test_query_uses_config_defaults() {
    let (_dir, path) = temp_config("[defaults]\nchannel = \"nightly\"\nos = \"linux\"\n");
    let output = reduxlite_cmd()
        .args(["--config", path.to_str().unwrap(), "query"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "channel=nightly&os=linux"
    );
}

#[test]
fn test_unknown_channel_is_rejected() {
    let output = reduxlite_cmd()
        .args(["query", "--channel", "aurora"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown channel 'aurora'"));
}

#[test]
fn test_missing_config_file_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");
    let output = reduxlite_cmd()
        .args(["--config", missing.to_str().unwrap(), "query"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read config file"));
}

#[test]
fn test_catalog_lists_options() {
    let output = reduxlite_cmd()
        .arg("catalog")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let catalog: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        catalog["products"],
        serde_json::json!(["firefox", "thunderbird", "fenix"])
    );
    assert_eq!(catalog["oses"], serde_json::json!(["windows", "mac", "linux"]));
}

#[test]
fn test_fetch_with_simulated_source_prints_state() {
    let (_dir, path) = temp_config("[api]\ndelay_ms = 10\n");
    let output = reduxlite_cmd()
        .args(["--config", path.to_str().unwrap(), "fetch"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json = stdout.trim_start_matches("# state").trim();
    let state: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(state["randomNumbers"].as_array().unwrap().len(), 10);
    assert_eq!(state["isWaiting"], serde_json::json!(false));
}
