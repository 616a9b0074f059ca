//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated config directory and verify
//! its output.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command with optional stdin and return (stdout, stderr, code).
fn run_cli(config_dir: &Path, args: &[&str], stdin: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_humancalc"))
        .args(args)
        .env("HUMANCALC_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");
    let output = child.wait_with_output().expect("Failed to wait for CLI");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);
    (stdout, stderr, code)
}

/// Config dir with display delays turned off so play sessions run instantly.
fn fast_config_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (key, value) in [
        ("display.memorize_ms", "0"),
        ("display.countdown_ticks", "0"),
        ("display.tick_ms", "0"),
    ] {
        let (_, stderr, code) = run_cli(dir.path(), &["config", "set", key, value], "");
        assert_eq!(code, 0, "config set {key} failed: {stderr}");
    }
    dir
}

#[test]
fn test_rules() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["rules"], "");
    assert_eq!(code, 0, "Rules failed");
    assert!(stdout.contains("Easy"));
    assert!(stdout.contains("1..200"));
    assert!(stdout.contains("1..50"));
}

#[test]
fn test_question_json() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &["question", "--difficulty", "easy", "--ops", "+", "--seed", "7"],
        "",
    );
    assert_eq!(code, 0, "Question failed: {stderr}");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let question = &json["question"];
    assert_eq!(question["operator"], "add");
    assert_eq!(question["difficulty"], "easy");
    assert_eq!(question["time_limit_secs"], 10);
    let a = question["operands"][0].as_i64().unwrap();
    let b = question["operands"][1].as_i64().unwrap();
    assert!((1..=10).contains(&a) && (1..=10).contains(&b));
    assert_eq!(question["expected_answer"]["integer"].as_i64(), Some(a + b));
    assert_eq!(json["text"], format!("{a} + {b}"));
}

#[test]
fn test_question_is_reproducible_with_seed() {
    let dir = tempfile::tempdir().unwrap();
    let args = ["question", "--ops", "+,-,x,/", "--seed", "99"];
    let (first, _, _) = run_cli(dir.path(), &args, "");
    let (second, _, _) = run_cli(dir.path(), &args, "");
    assert_eq!(first, second);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "game.difficulty"], "");
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "normal");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "game.difficulty", "hard"], "");
    assert_eq!(code, 0, "Config set failed");
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "game.difficulty"], "");
    assert_eq!(stdout.trim(), "hard");
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "game.nope"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "list"], "");
    assert_eq!(code, 0, "Config list failed");
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["display"]["memorize_ms"], 1200);
}

#[test]
fn test_play_invalid_answer_then_quit() {
    let dir = fast_config_dir();
    let (stdout, stderr, code) = run_cli(dir.path(), &["play", "-d", "easy"], "abc\nq\n");
    assert_eq!(code, 0, "Play failed: {stderr}");
    assert!(stdout.contains("Memorize:"));
    assert!(stdout.contains("Invalid answer"));
    assert!(stdout.contains("Rounds: 1"));
    assert!(stdout.contains("invalid: 1"));
}

#[test]
fn test_play_json_events() {
    let dir = fast_config_dir();
    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &["play", "--json", "--rounds", "2", "--ops", "x", "--seed", "5"],
        "0\nn\n0\n",
    );
    assert_eq!(code, 0, "Play failed: {stderr}");

    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let types: Vec<&str> = events.iter().filter_map(|e| e["type"].as_str()).collect();
    assert_eq!(
        types,
        vec![
            "session_unlocked",
            "round_started",
            "answer_window_opened",
            "round_resolved",
            "round_started",
            "answer_window_opened",
            "round_resolved",
            "session_reset",
        ]
    );
    // Products of operands >= 1 are never 0.
    let resolved: Vec<_> = events
        .iter()
        .filter(|e| e["type"] == "round_resolved")
        .collect();
    assert!(resolved.iter().all(|e| e["outcome"] == "incorrect"));

    let summary = events
        .iter()
        .find(|e| e.get("rounds").is_some())
        .expect("summary line");
    assert_eq!(summary["rounds"], 2);
    assert_eq!(summary["incorrect"], 2);
}

#[test]
fn test_play_locked_session_fails() {
    let dir = fast_config_dir();
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "access.unlocked", "false"], "");
    assert_eq!(code, 0);
    let (_, stderr, code) = run_cli(dir.path(), &["play"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("locked"));
}

#[test]
fn test_play_without_operators_fails() {
    let dir = fast_config_dir();
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "game.operators", ""], "");
    assert_eq!(code, 0);
    let (_, stderr, code) = run_cli(dir.path(), &["play"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("at least one operation"));
}

#[test]
fn test_play_zero_rounds_is_rejected() {
    let dir = fast_config_dir();
    let (stdout, stderr, code) = run_cli(dir.path(), &["play", "--rounds", "0"], "1\n");
    assert_ne!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("--rounds"));
}
