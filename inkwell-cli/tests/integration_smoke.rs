//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn inkwell() -> Command {
    let mut cmd = Command::cargo_bin("inkwell").unwrap();
    cmd.env_remove("INKWELL_DATABASE_URL")
        .env_remove("INKWELL_DATABASE_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_top_level_help_lists_commands() {
    inkwell()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn test_serve_help() {
    inkwell()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--cors-permissive"));
}

#[test]
fn test_migrate_help() {
    inkwell()
        .args(["migrate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--database-key"));
}

#[test]
fn test_key_value_is_hidden_in_help() {
    inkwell()
        .env("INKWELL_DATABASE_KEY", "hunter2")
        .args(["status", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_serve_without_credentials_fails() {
    let dir = std::env::temp_dir();
    inkwell()
        .current_dir(dir)
        .env("HOME", "/nonexistent-inkwell-home")
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("INKWELL_DATABASE_URL"));
}

#[test]
fn test_status_without_key_fails() {
    inkwell()
        .current_dir(std::env::temp_dir())
        .env("HOME", "/nonexistent-inkwell-home")
        .args(["status", "--database-url", "postgres://localhost/blog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("INKWELL_DATABASE_KEY"));
}

#[test]
fn test_credentials_are_read_from_dotenv_file() {
    let dir = tempfile::tempdir().unwrap();
    // An unparsable URL fails fast, after the credential check has passed.
    std::fs::write(
        dir.path().join(".env"),
        "INKWELL_DATABASE_URL=not-a-postgres-url\nINKWELL_DATABASE_KEY=from-dotenv\n",
    )
    .unwrap();

    inkwell()
        .current_dir(dir.path())
        .env("HOME", "/nonexistent-inkwell-home")
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid store configuration"))
        .stderr(predicate::str::contains("not set").not());
}

#[test]
fn test_unknown_command_fails() {
    inkwell().arg("publish").assert().failure();
}
