//! Binary tests driving the menu and subcommands

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn hotel(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("hotel").unwrap();
    cmd.arg("--data-dir").arg(dir.path()).env_remove("HOTEL_LOG");
    cmd
}

#[test]
fn menu_exits_cleanly() {
    let dir = TempDir::new().unwrap();

    hotel(&dir)
        .write_stdin("0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("LANGHAM HOTEL MANAGEMENT SYSTEM"))
        .stdout(predicate::str::contains(
            "Thank you for using LANGHAM HOTEL MANAGEMENT SYSTEM",
        ));
}

#[test]
fn menu_ends_on_eof() {
    let dir = TempDir::new().unwrap();

    hotel(&dir)
        .arg("menu")
        .write_stdin("42\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter a valid number between 0-9"));
}

#[test]
fn menu_session_saves_allocations() {
    let dir = TempDir::new().unwrap();

    hotel(&dir)
        .write_stdin("1\n3\n101\n102\n103\n4\n1\n102\n5001\nA. Smith\n7\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Room 103 has been added successfully"))
        .stdout(predicate::str::contains("Room 102 has been allocated to A. Smith"))
        .stdout(predicate::str::contains("File saved as 'lhms_allocations.txt'"));

    let saved = std::fs::read_to_string(dir.path().join("lhms_allocations.txt")).unwrap();
    assert!(saved.contains("Room Number: 102"));
    assert!(saved.contains("Customer Number: 5001"));
    assert!(saved.contains("Customer Name: A. Smith"));

    hotel(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Customer Name: A. Smith"))
        .stdout(predicate::str::contains("1 allocation(s) captured at"));

    hotel(&dir)
        .arg("backup")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created: lhms_allocations_backup_"));
    assert!(!dir.path().join("lhms_allocations.txt").exists());

    hotel(&dir)
        .arg("backups")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 1 backup(s)"));

    hotel(&dir)
        .args(["audit", "-n", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ALLOCATE"))
        .stdout(predicate::str::contains("ROTATE"));
}

#[test]
fn show_without_file_fails() {
    let dir = TempDir::new().unwrap();

    hotel(&dir)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn backup_without_file_fails() {
    let dir = TempDir::new().unwrap();

    hotel(&dir)
        .arg("backup")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn config_reports_paths() {
    let dir = TempDir::new().unwrap();

    hotel(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(dir.path().display().to_string()))
        .stdout(predicate::str::contains("lhms_allocations_backup.txt"));
    assert!(!dir.path().join("hotel-cli.json").exists());

    hotel(&dir)
        .args(["config", "--write"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings written to"));
    assert!(dir.path().join("hotel-cli.json").exists());
}
