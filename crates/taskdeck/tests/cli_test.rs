//! Integration tests for the `taskdeck` CLI binary.
//!
//! Every test runs against a throwaway data directory and config path so
//! nothing touches the user's real tasks or configuration.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `taskdeck` binary with env isolation.
fn taskdeck_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("taskdeck");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("TASKDECK_OUTPUT")
        .env_remove("TASKDECK_CONFIG")
        .env_remove("TASKDECK_DATA_DIR")
        .env_remove("TASKDECK_BASE_URL")
        .env_remove("TASKDECK_TIMEOUT")
        .env_remove("TASKDECK_API__BASE_URL")
        .env_remove("TASKDECK_API__TIMEOUT")
        .arg("--config")
        .arg(home.join("taskdeck.toml"))
        .arg("--data-dir")
        .arg(home.join("tasks"));
    cmd
}

/// Run a command with `-o json-compact` and parse its stdout.
fn run_json(home: &Path, args: &[&str]) -> Value {
    let output = taskdeck_cmd(home)
        .args(["-o", "json-compact"])
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "command {args:?} failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = TempDir::new().unwrap();
    let output = cargo_bin_cmd!("taskdeck")
        .env("HOME", home.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    taskdeck_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("tasks")
                .and(predicate::str::contains("users"))
                .and(predicate::str::contains("posts")),
        );
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    taskdeck_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("taskdeck"));
}

#[test]
fn test_completions_zsh() {
    let home = TempDir::new().unwrap();
    taskdeck_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Tasks ───────────────────────────────────────────────────────────

#[test]
fn test_add_list_toggle_remove() {
    let home = TempDir::new().unwrap();
    let home = home.path();

    let milk = run_json(home, &["tasks", "add", "buy", "milk"]);
    assert_eq!(milk["text"], "buy milk");
    assert_eq!(milk["completed"], false);
    let milk_id = milk["id"].as_u64().unwrap();

    let bread = run_json(home, &["tasks", "add", "bake bread"]);
    let bread_id = bread["id"].as_u64().unwrap();
    assert_ne!(milk_id, bread_id);

    let toggled = run_json(home, &["tasks", "toggle", &milk_id.to_string()]);
    assert_eq!(toggled["completed"], true);

    let completed = run_json(home, &["tasks", "list", "--filter", "completed"]);
    assert_eq!(completed.as_array().unwrap().len(), 1);
    assert_eq!(completed[0]["id"], milk_id);

    let active = run_json(home, &["tasks", "list", "--filter", "active"]);
    assert_eq!(active[0]["text"], "bake bread");

    let stats = run_json(home, &["tasks", "stats"]);
    assert_eq!(stats, json!({ "total": 2, "active": 1, "completed": 1 }));

    taskdeck_cmd(home)
        .args(["tasks", "remove", &milk_id.to_string()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed 'buy milk'"));

    let all = run_json(home, &["tasks", "list"]);
    assert_eq!(all, json!([bread]));
}

#[test]
fn test_list_search_is_case_insensitive() {
    let home = TempDir::new().unwrap();
    let home = home.path();
    run_json(home, &["tasks", "add", "Water the PLANTS"]);
    run_json(home, &["tasks", "add", "call mom"]);

    let found = run_json(home, &["tasks", "list", "--search", "plants"]);
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["text"], "Water the PLANTS");
}

#[test]
fn test_tasks_persist_as_json_array() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["tasks", "add", "persist me"]);

    let raw = std::fs::read_to_string(home.path().join("tasks").join("tasks.json")).unwrap();
    let stored: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[0]["text"], "persist me");
    assert!(stored[0]["createdAt"].is_string());
}

#[test]
fn test_blank_add_is_silently_ignored() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["tasks", "add", "keep me"]);

    taskdeck_cmd(home.path())
        .args(["tasks", "add", "   "])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    let stats = run_json(home.path(), &["tasks", "stats"]);
    assert_eq!(stats, json!({ "total": 1, "active": 1, "completed": 0 }));
}

#[test]
fn test_toggle_missing_task_is_not_found() {
    let home = TempDir::new().unwrap();
    taskdeck_cmd(home.path())
        .args(["tasks", "toggle", "42"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("42"));
}

// ── Remote collections ──────────────────────────────────────────────

#[test]
fn test_users_unreachable_api_is_connection_error() {
    let home = TempDir::new().unwrap();
    taskdeck_cmd(home.path())
        .args(["--base-url", "http://127.0.0.1:1", "--timeout", "2", "users"])
        .assert()
        .code(7);
}

fn user(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "username": format!("user{id}"),
        "email": format!("user{id}@example.com"),
        "company": { "name": "Acme" },
        "address": { "city": "Springfield" }
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn test_users_search_and_page() {
    let server = MockServer::start().await;
    let users: Vec<Value> = (1..=8).map(|id| user(id, &format!("Person {id}"))).collect();
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(users)))
        .mount(&server)
        .await;

    let base_url = server.uri();
    let page = tokio::task::spawn_blocking(move || {
        let home = TempDir::new().unwrap();
        run_json(
            home.path(),
            &[
                "--base-url",
                &base_url,
                "--page-size",
                "3",
                "users",
                "--search",
                "person",
                "--page",
                "3",
            ],
        )
    })
    .await
    .unwrap();

    assert_eq!(page["matched"], 8);
    assert_eq!(page["total_pages"], 3);
    assert_eq!(page["page"], 3);
    let names: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Person 7", "Person 8"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_users_table_notes_unmatched_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user(1, "Leanne Graham")])))
        .mount(&server)
        .await;

    let base_url = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        let home = TempDir::new().unwrap();
        taskdeck_cmd(home.path())
            .args(["--base-url", &base_url, "users", "--search", "zed"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No users found matching \"zed\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_posts_server_error_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let base_url = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        let home = TempDir::new().unwrap();
        taskdeck_cmd(home.path())
            .args(["--base-url", &base_url, "posts"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("HTTP 500"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_flag() {
    let home = TempDir::new().unwrap();
    taskdeck_cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("taskdeck.toml"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let home = TempDir::new().unwrap();
    taskdeck_cmd(home.path())
        .args(["config", "init"])
        .assert()
        .success();
    assert!(home.path().join("taskdeck.toml").exists());

    taskdeck_cmd(home.path())
        .args(["config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    taskdeck_cmd(home.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_show_reflects_flag_overrides() {
    let home = TempDir::new().unwrap();
    taskdeck_cmd(home.path())
        .args(["--page-size", "12", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page_size = 12"));
}
