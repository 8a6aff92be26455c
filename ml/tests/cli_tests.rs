//! End-to-end tests for the `ml` binary
//!
//! Each test runs against its own database and data directories.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ml(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ml").expect("binary builds");
    cmd.current_dir(temp.path())
        .env("XDG_DATA_HOME", temp.path().join("data"))
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .arg("--database")
        .arg(temp.path().join("madlib.db"));
    cmd
}

// =============================================================================
// Command scenarios
// =============================================================================

#[test]
fn test_create_add_render() {
    let temp = TempDir::new().expect("Failed to create temp dir");

    ml(&temp)
        .args(["say", "madlib", "create", "foo", "Hello", "{name}!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello {name}!"));

    ml(&temp)
        .args(["say", "madlib", "add", "name", "World"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added."));

    ml(&temp)
        .args(["say", "--unaddressed", "foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello World!"));
}

#[test]
fn test_hyphenated_value() {
    let temp = TempDir::new().expect("Failed to create temp dir");

    ml(&temp).args(["say", "madlib", "create", "count", "{num}"]).assert().success();

    ml(&temp)
        .args(["say", "madlib", "add", "num", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added."));

    ml(&temp)
        .args(["say", "--unaddressed", "count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-1"));
}

#[test]
fn test_list_and_delete() {
    let temp = TempDir::new().expect("Failed to create temp dir");

    ml(&temp).args(["say", "madlib", "create", "Greeting", "hi"]).assert().success();

    ml(&temp)
        .args(["say", "madlib", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("greeting"));

    for _ in 0..2 {
        ml(&temp)
            .args(["say", "madlib", "delete", "greeting"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Deleted."));
    }

    ml(&temp)
        .args(["say", "--unaddressed", "greeting"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not handled)"));
}

#[test]
fn test_unaddressed_command_not_handled() {
    let temp = TempDir::new().expect("Failed to create temp dir");

    ml(&temp)
        .args(["say", "--unaddressed", "madlib", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not handled)"));
}

#[test]
fn test_malformed_command_prints_help() {
    let temp = TempDir::new().expect("Failed to create temp dir");

    ml(&temp)
        .args(["say", "madlib", "remove", "adjective", "very", "big"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Address me and use the command madlib"));
}

// =============================================================================
// Startup
// =============================================================================

#[test]
fn test_unopenable_database_fails() {
    let temp = TempDir::new().expect("Failed to create temp dir");

    // A directory cannot be opened as a database file
    let mut cmd = Command::cargo_bin("ml").expect("binary builds");
    cmd.current_dir(temp.path())
        .env("XDG_DATA_HOME", temp.path().join("data"))
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .arg("--database")
        .arg(temp.path())
        .args(["say", "madlib", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open madlib store"));
}

#[test]
fn test_config_file_database() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp.path().join("from-config.db");
    let config_path = temp.path().join("madlib.yml");
    std::fs::write(&config_path, format!("database: {}\n", db_path.display())).unwrap();

    let mut cmd = Command::cargo_bin("ml").expect("binary builds");
    cmd.current_dir(temp.path())
        .env("XDG_DATA_HOME", temp.path().join("data"))
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .arg("--config")
        .arg(&config_path)
        .args(["say", "madlib", "create", "foo", "bar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bar"));

    assert!(db_path.exists());
}
