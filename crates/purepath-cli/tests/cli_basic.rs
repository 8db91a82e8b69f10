//! Basic CLI E2E tests.
//!
//! Each test runs the binary against its own temporary data directory and
//! verifies the JSON it prints.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    run_cli_with_input(data_dir, args, "")
}

fn run_cli_with_input(data_dir: &Path, args: &[&str], input: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_purepath"))
        .args(args)
        .env("PUREPATH_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .env_remove("GEMINI_API_KEY")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_stats_show_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["stats", "show"]);
    assert_eq!(code, 0);
    let summary = json(&stdout);
    assert_eq!(summary["current_streak_days"], 0);
    assert_eq!(summary["total_checkins"], 0);
    assert_eq!(summary["level"], 1);
}

#[test]
fn test_checkin_increments_counter() {
    let dir = tempfile::tempdir().unwrap();
    for expected in 1..=2 {
        let (stdout, stderr, code) = run_cli(dir.path(), &["stats", "checkin"]);
        assert_eq!(code, 0);
        assert!(stderr.contains("Check-in recorded"));
        let event = json(&stdout);
        assert_eq!(event["type"], "CheckInRecorded");
        assert_eq!(event["total_checkins"], expected);
    }
    let (stdout, _, _) = run_cli(dir.path(), &["stats", "show"]);
    assert_eq!(json(&stdout)["total_checkins"], 2);
}

#[test]
fn test_relapse_with_yes() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["stats", "relapse", "--yes"]);
    assert_eq!(code, 0);
    let event = json(&stdout);
    assert_eq!(event["type"], "RelapseRecorded");
    assert_eq!(event["ended_streak_days"], 0);

    let (stdout, _, _) = run_cli(dir.path(), &["stats", "show"]);
    assert!(!json(&stdout)["last_relapse_date"].is_null());
}

#[test]
fn test_relapse_declined_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli_with_input(dir.path(), &["stats", "relapse"], "n\n");
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("cancelled"));

    let (stdout, _, _) = run_cli(dir.path(), &["stats", "show"]);
    assert!(json(&stdout)["last_relapse_date"].is_null());
}

#[test]
fn test_dashboard_greets_user() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, _) = run_cli(dir.path(), &["stats", "dashboard"]);
    assert!(stdout.contains("Welcome back, friend."));

    run_cli(dir.path(), &["login", "--name", "Robin"]);
    let (stdout, _, _) = run_cli(dir.path(), &["stats", "dashboard"]);
    assert!(stdout.contains("Welcome back, Robin."));
}

#[test]
fn test_login_whoami_logout() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["whoami"]);
    assert_ne!(code, 0);

    let (stdout, _, code) = run_cli(dir.path(), &["login", "--name", "Sam"]);
    assert_eq!(code, 0);
    assert_eq!(json(&stdout)["type"], "UserSignedIn");

    let (stdout, _, _) = run_cli(dir.path(), &["whoami"]);
    let user = json(&stdout);
    assert_eq!(user["name"], "Sam");
    assert_eq!(user["isGuest"], false);

    let (_, _, code) = run_cli(dir.path(), &["logout"]);
    assert_eq!(code, 0);
    let (_, stderr, code) = run_cli(dir.path(), &["whoami"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("not signed in"));
}

#[test]
fn test_learn_show_unknown_falls_back_to_root() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["learn", "show", "no-such-topic"]);
    assert_eq!(code, 0);
    assert_eq!(json(&stdout)["id"], "root");
}

#[test]
fn test_learn_search_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["learn", "search", "DOPAMINE"]);
    assert_eq!(code, 0);
    let results = json(&stdout);
    let ids: Vec<_> = results
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();
    assert!(ids.contains(&"dopamine".to_string()));
}

#[test]
fn test_learn_browse_drill_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli_with_input(dir.path(), &["learn", "browse"], "1\nb\nq\n");
    assert_eq!(code, 0);
    assert!(stdout.matches("Next steps:").count() >= 2);
}

#[test]
fn test_learn_validate_reports_dangling_related() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["learn", "validate"]);
    assert_eq!(code, 0);
    let report = json(&stdout);
    assert!(report["child_cycles"].as_array().unwrap().is_empty());
    assert!(!report["dangling_related"].as_array().unwrap().is_empty());
}

#[test]
fn test_shield_done_marks_guide() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["shield", "done", "ios"]);
    assert_eq!(code, 0);
    assert_eq!(json(&stdout)["type"], "ShieldGuideConfigured");

    let (stdout, _, _) = run_cli(dir.path(), &["shield", "list"]);
    let guides = json(&stdout);
    let ios = guides
        .as_array()
        .unwrap()
        .iter()
        .find(|g| g["id"] == "ios")
        .unwrap();
    assert_eq!(ios["configured"], true);

    let (_, stderr, code) = run_cli(dir.path(), &["shield", "done", "linux"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_panic_without_cycles_prints_quote() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["panic", "--cycles", "0"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Breathe"));
    assert!(!stdout.contains("Inhale"));
}

#[test]
fn test_library_list() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["library", "list"]);
    assert_eq!(code, 0);
    let topics = json(&stdout);
    assert_eq!(topics.as_array().unwrap().len(), 6);
    assert_eq!(topics[0]["cached"], false);
}

#[test]
fn test_library_unknown_topic_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["library", "read", "astrology"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no library topic"));
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "coach.model"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "gemini-2.5-flash");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "panic.cycles", "5"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "panic.cycles"]);
    assert_eq!(stdout.trim(), "5");

    let (_, _, code) = run_cli(dir.path(), &["config", "get", "nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_completions_bash() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("purepath"));
}
