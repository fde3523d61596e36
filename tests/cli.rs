#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cli() -> Command {
    Command::cargo_bin("entrepot-cli").unwrap()
}

#[test]
fn peaks_for_february() {
    cli()
        .args(["peaks", "--month", "2", "--year", "2026"])
        .assert()
        .success()
        .stdout("2,15,25\n");
}

#[test]
fn generate_then_revalidate() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("schedule.json");
    let out_str = out.to_str().unwrap();

    cli()
        .args(["generate", "--month", "2", "--year", "2026"])
        .args(["--employees", "phong,tung,tuan", "--out", out_str])
        .assert()
        .code(predicate::in_iter([0, 2]))
        .stdout(predicate::str::contains("phong | total"));
    assert!(out.exists());

    cli()
        .args(["validate", "--schedule", out_str, "--employees", "phong,tung,tuan"])
        .assert()
        .code(predicate::in_iter([0, 2]))
        .stderr(predicate::str::contains("error:").not());

    cli()
        .args(["stats", "--schedule", out_str, "--employees", "phong,tung,tuan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tuan | total"));
}

#[test]
fn staffing_reports_json() {
    cli()
        .args(["staffing", "--month", "2", "--year", "2026", "--employees", "a,b,c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"action\": \"hire\""));
}

#[test]
fn missing_roster_fails() {
    cli()
        .args(["generate", "--month", "2", "--year", "2026"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--employees"));
}

#[test]
fn invalid_month_fails_fast() {
    cli()
        .args(["generate", "--month", "13", "--year", "2026", "--employees", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid month"));
}
