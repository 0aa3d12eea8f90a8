//! Integration tests for addressbook
//!
//! Library-level store behavior against real files, plus the `ab` binary.

use std::fs;
use std::path::Path;

use addressbook::{Contact, ContactStore, StoreError, codec};
use assert_cmd::Command;
use chrono::NaiveDate;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE: &str = "Alice Smith,555-1000,1990-01-01\ngarbage-line\nBob,555-2000,1985-06-15\n";

fn write_db(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("db.txt");
    fs::write(&path, content).expect("Failed to write db");
    path
}

fn ab(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ab").expect("Binary should build");
    // Keep any real user config out of the way
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd
}

// =============================================================================
// Store Tests
// =============================================================================

#[test]
fn test_session_edit_save_reload() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_db(temp_dir.path(), SAMPLE);

    let (mut store, report) = ContactStore::open(&path);
    assert_eq!(report.loaded, 2);
    assert_eq!(report.malformed.len(), 1);

    let carol = Contact::new("Carol", "555-3000", NaiveDate::from_ymd_opt(1970, 3, 3).unwrap());
    store.add(carol.clone());
    store
        .edit_at(1, Contact::new("Robert", "555-2000", NaiveDate::from_ymd_opt(1985, 6, 15).unwrap()))
        .expect("Edit should succeed");
    assert!(matches!(
        store.edit_at(3, carol.clone()),
        Err(StoreError::InvalidIndex { index: 3, len: 3 })
    ));
    store.save().expect("Save should succeed");

    // The skipped line is gone after a rewrite
    let (reloaded, report) = ContactStore::open(&path);
    assert!(report.is_clean());
    assert_eq!(reloaded.list(), store.list());
    let names: Vec<&str> = reloaded.list().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Alice Smith", "Robert", "Carol"]);
}

#[test]
fn test_unsaved_changes_are_lost_on_reopen() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_db(temp_dir.path(), SAMPLE);

    let (mut store, _) = ContactStore::open(&path);
    store.add(Contact::new("Carol", "555-3000", NaiveDate::from_ymd_opt(1970, 3, 3).unwrap()));
    drop(store);

    let (store, _) = ContactStore::open(&path);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_file_written_by_store_is_canonical() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_db(temp_dir.path(), "Alice,555-1000,1/5/1990 12:00:00 AM\nBob,555-2000,15.06.1985\n");

    let (mut store, report) = ContactStore::open(&path);
    assert!(report.is_clean());
    store.save().expect("Save should succeed");

    let content = fs::read_to_string(&path).unwrap();
    for (i, line) in content.lines().enumerate() {
        let contact = codec::decode(line, i + 1).expect("Saved line should decode");
        assert_eq!(codec::encode(&contact), line);
    }
    assert_eq!(content, "Alice,555-1000,1990-01-05\nBob,555-2000,1985-06-15\n");
}

// =============================================================================
// CLI Tests
// =============================================================================

#[test]
fn test_cli_list() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_db(temp_dir.path(), SAMPLE);

    ab(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Line #2"))
        .stdout(predicate::str::contains("1. Name: Alice Smith, Phone: 555-1000"))
        .stdout(predicate::str::contains("2. Name: Bob, Phone: 555-2000"));
}

#[test]
fn test_cli_list_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    ab(temp_dir.path())
        .args(["list", "--database", "absent.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File not found."))
        .stdout(predicate::str::contains(addressbook::shell::NO_CONTACTS));
}

#[test]
fn test_cli_search() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_db(temp_dir.path(), SAMPLE);

    ab(temp_dir.path())
        .args(["search", "BOB"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Bob"))
        .stdout(predicate::str::contains("Alice").not());

    ab(temp_dir.path())
        .args(["search", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No contacts found."));
}

#[test]
fn test_cli_add_saves() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_db(temp_dir.path(), "Alice,555-1000,1990-01-01\n");

    ab(temp_dir.path())
        .args(["add", "--name", "Carol", "--phone", "555-3000", "--birth", "1970-03-03"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Alice,555-1000,1990-01-01\nCarol,555-3000,1970-03-03\n"
    );
}

#[test]
fn test_cli_add_rejects_bad_date() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_db(temp_dir.path(), "Alice,555-1000,1990-01-01\n");

    ab(temp_dir.path())
        .args(["add", "-n", "Carol", "-p", "555-3000", "-b", "someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date of birth"));

    assert_eq!(fs::read_to_string(&path).unwrap(), "Alice,555-1000,1990-01-01\n");
}

#[test]
fn test_cli_add_refuses_to_drop_malformed_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_db(temp_dir.path(), SAMPLE);

    ab(temp_dir.path())
        .args(["add", "-n", "Carol", "-p", "555-3000", "-b", "1970-03-03"])
        .assert()
        .failure();

    assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE);
}

#[test]
fn test_cli_config_database() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("people.txt"), "Dana,555-4000,2001-09-09\n").unwrap();
    fs::write(temp_dir.path().join("addressbook.yml"), "database: people.txt\n").unwrap();

    ab(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Dana"));
}

#[test]
fn test_cli_interactive_session_from_stdin() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_db(temp_dir.path(), "Alice,555-1000,1990-01-01\n");

    ab(temp_dir.path())
        .write_stdin("1\n2\nCarol\n555-3000\n1970-03-03\n9\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("All contacts:"))
        .stdout(predicate::str::contains("No such operation."))
        .stdout(predicate::str::contains("Contacts saved to file."))
        .stdout(predicate::str::contains("Goodbye!"));

    let (store, _) = ContactStore::open(&path);
    assert_eq!(store.len(), 2);
    assert_eq!(store.list()[1].name, "Carol");
}
