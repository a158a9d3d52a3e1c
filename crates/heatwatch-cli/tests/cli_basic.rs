//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str], home: &Path) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "heatwatch-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env_remove("HEATWATCH_PREHEAT_MINUTES")
        .env_remove("HEATWATCH_COOLOFF_MINUTES")
        .env_remove("HEATWATCH_NO_HEAT_TAG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

const EVENTS: &str = r#"[
  {"summary": "Test event noon", "start": "1980-01-01T12:00:00Z", "end": "1980-01-01T14:00:00Z"},
  {"summary": "Test cold event", "description": "This event is !cold!. Yay.",
   "start": "1980-01-01T14:00:00Z", "end": "1980-01-01T14:30:00Z"}
]"#;

fn write_events(dir: &Path) -> String {
    let path = dir.join("events.json");
    std::fs::write(&path, EVENTS).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_check_heating_needed() {
    let home = tempfile::tempdir().unwrap();
    let events = write_events(home.path());
    let (stdout, _, code) = run_cli(
        &["check", "--events", &events, "--now", "1980-01-01T12:00:00Z"],
        home.path(),
    );
    assert_eq!(code, 0, "expected heating needed");
    assert!(stdout.contains("Found event that needs heating: Test event noon"));
    assert!(stdout.contains("Heating needed"));
}

#[test]
fn test_check_no_heating_needed() {
    let home = tempfile::tempdir().unwrap();
    let events = write_events(home.path());
    let (stdout, _, code) = run_cli(
        &[
            "check", "--events", &events, "--now", "1980-01-01T14:10:00Z", "--no-heat-tag", "!cold!",
        ],
        home.path(),
    );
    assert_eq!(code, 2, "expected no heating needed");
    assert!(stdout.contains("No heating needed"));
}

#[test]
fn test_check_json_output() {
    let home = tempfile::tempdir().unwrap();
    let events = write_events(home.path());
    let (stdout, _, code) = run_cli(
        &[
            "check", "--events", &events, "--now", "1980-01-01T11:45:00Z", "--preheat", "30", "--json",
        ],
        home.path(),
    );
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    let events = parsed.as_array().expect("JSON array");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["summary"], "Test event noon");
}

#[test]
fn test_check_missing_events_file() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        &["check", "--events", "/nonexistent/heatwatch/events.json", "--quiet"],
        home.path(),
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_set_and_get() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(&["config", "set", "heating.preheat_minutes", "45"], home.path());
    assert_eq!(code, 0);
    assert!(stdout.contains("ok"));

    let (stdout, _, code) = run_cli(&["config", "get", "heating.preheat_minutes"], home.path());
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "45");
}

#[test]
fn test_config_rejects_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(&["config", "set", "heating.bogus", "1"], home.path());
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown configuration key"));
}

#[test]
fn test_config_list_is_json() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(&["config", "list"], home.path());
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    assert_eq!(parsed["heating"]["cooloff_minutes"], 0);
}
