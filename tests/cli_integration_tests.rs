//! CLI Integration Tests
//!
//! Runs the nfl-import binary with assert_cmd against workbooks written to a
//! temporary directory.

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::TempDir;

fn nfl_import(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("nfl-import").unwrap();
    cmd.env_remove("NFL_IMPORT_DB")
        .env_remove("RUST_LOG")
        .arg("--database")
        .arg(db);
    cmd
}

fn write_teams(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let headers = [
        "Team(s)",
        "Conference",
        "Division ",
        "Name",
        "Location",
        "Capacity",
        "Surface",
        "Roof Type",
        "Opened",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    let rows = [
        ("Green Bay Packers", "Lambeau Field", 81441.0),
        ("Chicago Bears", "Soldier Field", 61500.0),
        ("Expansion", "TBD", 65000.0),
    ];
    for (i, (team, stadium, capacity)) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, *team).unwrap();
        sheet.write_string(r, 1, "NFC").unwrap();
        sheet.write_string(r, 2, "NFC North").unwrap();
        sheet.write_string(r, 3, *stadium).unwrap();
        sheet.write_string(r, 4, "Midwest").unwrap();
        sheet.write_number(r, 5, *capacity).unwrap();
        sheet.write_string(r, 6, "Grass").unwrap();
        sheet.write_string(r, 7, "Open").unwrap();
        sheet.write_number(r, 8, 1957.0).unwrap();
    }
    workbook.save(path).unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("nfl-import").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("nfl-import"))
        .stdout(predicate::str::contains("restore-defaults"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("nfl-import").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nfl-import"));
}

#[test]
fn test_teams_help_lists_columns() {
    let mut cmd = Command::cargo_bin("nfl-import").unwrap();
    cmd.args(["teams", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Roof Type"))
        .stdout(predicate::str::contains("--replace"));
}

#[test]
fn test_souvenirs_has_no_replace_flag() {
    let dir = TempDir::new().unwrap();
    nfl_import(&dir.path().join("nfl.db"))
        .args(["souvenirs", "--replace"])
        .assert()
        .failure();
}

// ═══════════════════════════════════════════════════════════════════════════
// IMPORT TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_teams_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("nfl.db");

    nfl_import(&db)
        .arg("teams")
        .arg(dir.path().join("teams-stadiums.xlsx"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source file not found"));

    assert!(!db.exists());
}

#[test]
fn test_teams_import_prints_summary() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("teams-stadiums.xlsx");
    write_teams(&file);

    nfl_import(&dir.path().join("nfl.db"))
        .arg("teams")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Inserted: 2"))
        .stdout(predicate::str::contains("Skipped:  1"))
        .stdout(predicate::str::contains("Total teams in database: 2"))
        .stdout(predicate::str::contains("Green Bay Packers - Lambeau Field"));
}

#[test]
fn test_teams_reimport_updates() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("nfl.db");
    let file = dir.path().join("teams-stadiums.xlsx");
    write_teams(&file);

    nfl_import(&db).arg("teams").arg(&file).assert().success();
    nfl_import(&db)
        .arg("teams")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated:  2"))
        .stdout(predicate::str::contains("Total teams in database: 2"));
}

#[test]
fn test_import_detects_kind_from_name() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("2024-teams-stadiums.xlsx");
    write_teams(&file);

    nfl_import(&dir.path().join("nfl.db"))
        .args(["import"])
        .arg(&file)
        .arg("--replace")
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected teams import"))
        .stdout(predicate::str::contains("REPLACE MODE"));
}

#[test]
fn test_import_unknown_name_fails() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("roster.xlsx");
    write_teams(&file);

    nfl_import(&dir.path().join("nfl.db"))
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot tell import kind"));
}

#[test]
fn test_database_from_env() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("from-env.db");
    let file = dir.path().join("teams-stadiums.xlsx");
    write_teams(&file);

    let mut cmd = Command::cargo_bin("nfl-import").unwrap();
    cmd.env("NFL_IMPORT_DB", &db)
        .arg("teams")
        .arg(&file)
        .assert()
        .success();

    assert!(db.exists());
}

// ═══════════════════════════════════════════════════════════════════════════
// RESTORE DEFAULTS TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_restore_defaults_after_import() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("nfl.db");
    let file = dir.path().join("teams-stadiums.xlsx");
    write_teams(&file);

    nfl_import(&db).arg("teams").arg(&file).assert().success();
    nfl_import(&db)
        .arg("restore-defaults")
        .assert()
        .success()
        .stdout(predicate::str::contains("Teams checked: 2"))
        .stdout(predicate::str::contains("Updated: 0 teams"));
}
