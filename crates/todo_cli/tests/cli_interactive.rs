use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("todoapp-{nanos}-{file_name}"))
}

fn run_session(store_path: &PathBuf, script: &str) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_todo_cli"))
        .env("TODOAPP_STORE_PATH", store_path)
        .env("TODOAPP_CONFIG_PATH", temp_path("missing-config.json"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start interactive session");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn interactive_session_adds_and_lists() {
    let store_path = temp_path("cli-interactive.json");
    let output = run_session(
        &store_path,
        "add \"buy milk\"\nadd bread\ntoggle 1\nlist completed\nexit\nadd ignored\n",
    );
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: buy milk"));
    assert!(stdout.contains("Added task: bread"));
    assert!(stdout.contains("Completed task: buy milk"));
    assert!(stdout.contains("[x] buy milk"));
    assert!(!stdout.contains("[ ] bread"));
    assert!(!stdout.contains("ignored"));
}

#[test]
fn interactive_session_reports_errors_and_continues() {
    let store_path = temp_path("cli-interactive-errors.json");
    let output = run_session(
        &store_path,
        "archive 1\nadd \"unterminated\ntoggle 9\nadd after\n",
    );
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
    assert!(stderr.contains("unterminated quote"));
    assert!(stderr.contains("ERROR: not_found"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Added task: after"));
}

#[test]
fn interactive_help_lists_commands() {
    let store_path = temp_path("cli-interactive-help.json");
    let output = run_session(&store_path, "help\n?\nquit\n");
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.matches("clear-completed").count() >= 2);
    assert!(stdout.contains("toggle-all"));
}
