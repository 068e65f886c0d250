use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("todoapp-{nanos}-{file_name}"))
}

fn write_store(path: &PathBuf, tasks: serde_json::Value) {
    let content = serde_json::json!({
        "schema_version": 1,
        "entries": { "todos": tasks.to_string() }
    });
    std::fs::write(path, serde_json::to_string_pretty(&content).unwrap()).unwrap();
}

fn task(id: &str, rank: Option<u64>) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("title {id}"),
        "completed": rank.is_some(),
        "completionRank": rank,
        "creationDate": "October 15, 2026",
        "creationTime": "09:00 am",
        "completionDate": rank.map(|_| "October 15, 2026"),
        "completionTime": rank.map(|_| "10:00 am")
    })
}

fn mixed() -> serde_json::Value {
    serde_json::json!([
        task("c1", Some(10)),
        task("a1", None),
        task("c2", Some(40)),
        task("a2", None),
        task("c3", Some(20)),
        task("c4", Some(30)),
    ])
}

fn list_json(store_path: &PathBuf, args: &[&str]) -> serde_json::Value {
    let output = Command::new(env!("CARGO_BIN_EXE_todo_cli"))
        .args(args)
        .env("TODOAPP_STORE_PATH", store_path)
        .env("TODOAPP_CONFIG_PATH", temp_path("missing-config.json"))
        .output()
        .expect("failed to run list command");
    assert!(output.status.success());
    serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap()
}

fn item_ids(frame: &serde_json::Value) -> Vec<String> {
    frame["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn list_filters_select_subsets() {
    let store_path = temp_path("cli-list-filters.json");
    write_store(&store_path, mixed());

    let all = list_json(&store_path, &["--json", "list"]);
    let active = list_json(&store_path, &["--json", "list", "active"]);
    let completed = list_json(&store_path, &["--json", "list", "completed"]);
    let unknown = list_json(&store_path, &["--json", "list", "someday"]);
    std::fs::remove_file(&store_path).ok();

    assert_eq!(item_ids(&all).len(), 6);
    assert_eq!(item_ids(&active), vec!["a1", "a2"]);
    assert_eq!(item_ids(&completed), vec!["c1", "c2", "c3", "c4"]);
    assert_eq!(item_ids(&unknown).len(), 6);
    assert_eq!(unknown["filter"], "all");
}

#[test]
fn list_highlights_three_latest_completions() {
    let store_path = temp_path("cli-list-highlights.json");
    write_store(&store_path, mixed());

    let frame = list_json(&store_path, &["--json", "--filter", "completed", "list"]);
    std::fs::remove_file(&store_path).ok();

    let highlights: Vec<(String, String)> = frame["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|item| {
            item["decorations"]
                .as_array()
                .unwrap()
                .iter()
                .find(|decoration| decoration["kind"] == "highlight")
                .map(|decoration| {
                    (
                        item["id"].as_str().unwrap().to_string(),
                        decoration["color"].as_str().unwrap().to_string(),
                    )
                })
        })
        .collect();

    assert_eq!(
        highlights,
        vec![
            ("c2".to_string(), "green".to_string()),
            ("c3".to_string(), "yellow".to_string()),
            ("c4".to_string(), "magenta".to_string()),
        ]
    );
}

#[test]
fn list_all_marks_last_created_as_entering() {
    let store_path = temp_path("cli-list-entering.json");
    write_store(&store_path, mixed());

    let frame = list_json(&store_path, &["--json", "list", "all"]);
    std::fs::remove_file(&store_path).ok();

    let entering: Vec<&str> = frame["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|item| {
            item["decorations"]
                .as_array()
                .unwrap()
                .iter()
                .any(|decoration| decoration["kind"] == "entering")
        })
        .map(|item| item["id"].as_str().unwrap())
        .collect();
    assert_eq!(entering, vec!["c4"]);
    assert_eq!(frame["toggle_all_checked"], false);
    assert_eq!(frame["focus"], "new_todo");
}

#[test]
fn list_plain_text_shows_table_and_footer() {
    let store_path = temp_path("cli-list-plain.json");
    write_store(&store_path, mixed());

    let output = Command::new(env!("CARGO_BIN_EXE_todo_cli"))
        .args(["list", "active"])
        .env("TODOAPP_STORE_PATH", &store_path)
        .env("TODOAPP_CONFIG_PATH", temp_path("missing-config.json"))
        .output()
        .expect("failed to run list command");
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[ ] title a1"));
    assert!(stdout.contains("[ ] title a2"));
    assert!(!stdout.contains("title c1"));
    assert!(stdout.contains("2 items left | all [active] completed | clear-completed (4)"));
}

#[test]
fn list_empty_store_hides_footer() {
    let store_path = temp_path("cli-list-empty.json");

    let frame = list_json(&store_path, &["--json", "list"]);
    std::fs::remove_file(&store_path).ok();

    assert!(frame["items"].as_array().unwrap().is_empty());
    assert_eq!(frame["main_visible"], false);
    assert!(frame["footer"].is_null());
}

#[test]
fn list_corrupt_store_reads_as_empty() {
    let store_path = temp_path("cli-list-corrupt.json");
    let content = serde_json::json!({
        "schema_version": 1,
        "entries": { "todos": "[{\"id\": " }
    });
    std::fs::write(&store_path, content.to_string()).unwrap();

    let frame = list_json(&store_path, &["--json", "list"]);
    std::fs::remove_file(&store_path).ok();

    assert!(frame["items"].as_array().unwrap().is_empty());
}

#[test]
fn show_prints_task_details() {
    let store_path = temp_path("cli-show.json");
    write_store(&store_path, mixed());

    let output = Command::new(env!("CARGO_BIN_EXE_todo_cli"))
        .args(["show", "c2"])
        .env("TODOAPP_STORE_PATH", &store_path)
        .env("TODOAPP_CONFIG_PATH", temp_path("missing-config.json"))
        .output()
        .expect("failed to run show command");
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("id: c2"));
    assert!(stdout.contains("status: completed"));
    assert!(stdout.contains("completed: October 15, 2026 10:00 am"));
}
