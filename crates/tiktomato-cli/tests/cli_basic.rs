//! Basic CLI E2E tests.
//!
//! Tests run the built binary against a throwaway data directory and verify
//! outputs.

mod common;

use std::io::Write;
use std::thread;
use std::time::Duration;

use common::{
    finish_cli, json_lines, run_cli, run_cli_failure, run_cli_success, run_cli_with_bytes,
    run_cli_with_input, spawn_cli,
};

#[test]
fn test_settings_defaults() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run_cli_success(dir.path(), &["settings", "get", "workTime"]).trim(), "25");
    assert_eq!(run_cli_success(dir.path(), &["settings", "get", "shortBreak"]).trim(), "5");
    assert_eq!(run_cli_success(dir.path(), &["settings", "get", "longBreak"]).trim(), "15");
    assert_eq!(
        run_cli_success(dir.path(), &["settings", "get", "countdownFont"]).trim(),
        "bitter"
    );
}

#[test]
fn test_settings_set_and_list() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["settings", "set", "workTime", "40"]);
    assert_eq!(run_cli_success(dir.path(), &["settings", "get", "workTime"]).trim(), "40");

    let listed: serde_json::Value =
        serde_json::from_str(&run_cli_success(dir.path(), &["settings", "list"])).unwrap();
    assert_eq!(listed["work_minutes"], 40);
    assert_eq!(listed["short_break_minutes"], 5);

    run_cli_success(dir.path(), &["settings", "reset"]);
    assert_eq!(run_cli_success(dir.path(), &["settings", "get", "workTime"]).trim(), "25");
}

#[test]
fn test_settings_rejects_bad_values() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli_failure(dir.path(), &["settings", "set", "workTime", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
    run_cli_failure(dir.path(), &["settings", "set", "volume", "3"]);
    run_cli_failure(dir.path(), &["settings", "get", "volume"]);
    assert_eq!(run_cli_success(dir.path(), &["settings", "get", "workTime"]).trim(), "25");
}

#[test]
fn test_background_select_and_upload() {
    let dir = tempfile::tempdir().unwrap();
    let listed: serde_json::Value =
        serde_json::from_str(&run_cli_success(dir.path(), &["background", "list"])).unwrap();
    assert_eq!(listed[0]["selected"], true);

    run_cli_success(dir.path(), &["background", "select", "1"]);
    let listed: serde_json::Value =
        serde_json::from_str(&run_cli_success(dir.path(), &["background", "list"])).unwrap();
    assert_eq!(listed[1]["selected"], true);
    run_cli_failure(dir.path(), &["background", "select", "99"]);

    let image = dir.path().join("bg.png");
    std::fs::write(&image, b"\x89PNG\r\n\x1a\n").unwrap();
    run_cli_success(dir.path(), &["background", "upload", image.to_str().unwrap()]);
    assert_eq!(
        run_cli_success(dir.path(), &["settings", "get", "bgImage"]).trim(),
        "data:image/png;base64,iVBORw0KGgo="
    );

    let text = dir.path().join("notes.txt");
    std::fs::write(&text, b"not an image").unwrap();
    run_cli_failure(dir.path(), &["background", "upload", text.to_str().unwrap()]);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        run_cli_success(dir.path(), &["config", "get", "tick_interval_ms"]).trim(),
        "1000"
    );
    run_cli_success(dir.path(), &["config", "set", "tick_interval_ms", "500"]);
    assert_eq!(
        run_cli_success(dir.path(), &["config", "get", "tick_interval_ms"]).trim(),
        "500"
    );
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "theme", "dark"]);
    assert_eq!(code, 1);
}

#[test]
fn test_run_session_commands() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["settings", "set", "shortBreak", "7"]);

    let (stdout, stderr, code) = run_cli_with_input(
        dir.path(),
        &["run"],
        "status\nshort\nstart\npause\nfs\nexit\nbogus\nquit\n",
    );
    assert_eq!(code, 0, "run failed: {stderr}");
    assert!(stderr.contains("unknown command: bogus"));

    let events = json_lines(&stdout);
    let types: Vec<&str> = events.iter().filter_map(|e| e["type"].as_str()).collect();
    assert_eq!(
        types,
        vec![
            "StateSnapshot",
            "StateSnapshot",
            "ModeSwitched",
            "TimerStarted",
            "TimerPaused",
            "FullscreenEntered",
            "FullscreenExited",
        ]
    );
    assert_eq!(events[0]["mode"], "work");
    assert_eq!(events[0]["remaining_secs"], 1500);
    assert_eq!(events[2]["to"], "shortBreak");
    assert_eq!(events[2]["duration_secs"], 420);
    // Piped stdout has no alternate screen: the logical flag flips anyway.
    assert_eq!(events[5]["exclusive"], false);
}

#[test]
fn test_run_focus_requires_apply() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) =
        run_cli_with_input(dir.path(), &["run"], "focus\napply\nfocus\nstatus\n");
    assert_eq!(code, 0);
    assert!(stderr.contains("apply settings before entering focus mode"));

    let events = json_lines(&stdout);
    let last = events.last().unwrap();
    assert_eq!(last["type"], "StateSnapshot");
    assert_eq!(last["is_fullscreen"], true);
    assert_eq!(last["settings_applied"], true);
}

#[test]
fn test_run_survives_non_utf8_input() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) =
        run_cli_with_bytes(dir.path(), &["run"], b"start\n\xff\xfe\nstatus\nquit\n");
    assert_eq!(code, 0, "run failed: {stderr}");
    assert!(stderr.contains("unknown command"));

    let events = json_lines(&stdout);
    let types: Vec<&str> = events.iter().filter_map(|e| e["type"].as_str()).collect();
    assert_eq!(types, vec!["StateSnapshot", "TimerStarted", "StateSnapshot"]);
    assert_eq!(events[2]["is_running"], true);
}

#[test]
fn test_run_counts_down_to_finish() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["config", "set", "tick_interval_ms", "1"]);
    run_cli_success(dir.path(), &["settings", "set", "workTime", "1"]);

    let mut child = spawn_cli(dir.path(), &["run"]);
    let mut stdin = child.stdin.take().expect("stdin is piped");
    stdin.write_all(b"start\n").unwrap();
    stdin.flush().unwrap();
    // 60 ticks at 1 ms each; leave plenty of slack for slow machines.
    thread::sleep(Duration::from_secs(3));
    stdin.write_all(b"status\nquit\n").unwrap();
    drop(stdin);

    let (stdout, stderr, code) = finish_cli(child);
    assert_eq!(code, 0, "run failed: {stderr}");
    let events = json_lines(&stdout);
    let finished: Vec<_> = events
        .iter()
        .filter(|e| e["type"] == "TimerFinished")
        .collect();
    assert_eq!(finished.len(), 1);

    let last = events.last().unwrap();
    assert_eq!(last["type"], "StateSnapshot");
    assert_eq!(last["remaining_secs"], 0);
    assert_eq!(last["finished"], true);
    assert_eq!(last["is_running"], false);
}
