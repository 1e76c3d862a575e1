//! CLI integration tests for the `periods` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

const NOW: &str = "2010-11-11T12:25:30Z";

fn periods() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("periods"))
}

fn json_output(args: &[&str]) -> Value {
    let output = periods().args(args).output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help() {
    periods()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("range"))
        .stdout(predicate::str::contains("shortcut"))
        .stdout(predicate::str::contains("filter"));
}

#[test]
fn test_range_next_year() {
    let out = json_output(&["range", "year", "1", "--now", NOW]);
    assert_eq!(out["start"], "2011-01-01T00:00:00Z");
    assert_eq!(out["end"], "2011-12-31T23:59:59Z");
    assert_eq!(out["unit"], "year");
    assert_eq!(out["count"], 1);
    assert_eq!(out["include_current"], false);
}

#[test]
fn test_range_negative_count() {
    let out = json_output(&["range", "year", "-2", "--now", NOW]);
    assert_eq!(out["start"], "2008-01-01T00:00:00Z");
    assert_eq!(out["end"], "2009-12-31T23:59:59Z");
}

#[test]
fn test_range_include_current() {
    let out = json_output(&["range", "year", "-2", "--include-current", "--now", NOW]);
    assert_eq!(out["start"], "2008-01-01T00:00:00Z");
    assert_eq!(out["end"], "2010-12-31T23:59:59Z");
}

#[test]
fn test_range_invalid_unit_fails() {
    periods()
        .args(["range", "fortnight", "1", "--now", NOW])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fortnight"));
}

#[test]
fn test_shortcut_today_in_timezone() {
    let out = json_output(&["shortcut", "today", "--now", NOW, "--timezone", "Asia/Tokyo"]);
    // 12:25:30 UTC is 21:25:30 in Tokyo, still Nov 11.
    assert_eq!(out["start"], "2010-11-11T00:00:00+09:00");
    assert_eq!(out["end"], "2010-11-11T23:59:59+09:00");
    assert_eq!(out["shortcut"], "today");
    assert_eq!(out["timezone"], "Asia/Tokyo");
}

#[test]
fn test_shortcut_next_week_sunday_start() {
    let out = json_output(&["shortcut", "nextWeek", "--now", NOW, "--week-start", "sunday"]);
    assert_eq!(out["start"], "2010-11-14T00:00:00Z");
    assert_eq!(out["end"], "2010-11-20T23:59:59Z");
}

#[test]
fn test_week_start_short_alias() {
    let full = json_output(&["shortcut", "thisWeek", "--now", NOW, "--week-start", "sunday"]);
    let short = json_output(&["shortcut", "thisWeek", "--now", NOW, "--week-start", "sun"]);
    assert_eq!(full, short);
    assert_eq!(short["start"], "2010-11-07T00:00:00Z");
}

#[test]
fn test_invalid_week_start_rejected_by_parser() {
    periods()
        .args(["shortcut", "today", "--week-start", "friday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("possible values"))
        .stderr(predicate::str::contains("monday"))
        .stderr(predicate::str::contains("sunday"));
}

#[test]
fn test_help_lists_week_start_choices() {
    periods()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--week-start"))
        .stdout(predicate::str::contains("sunday"));
}

#[test]
fn test_unknown_shortcut_fails() {
    periods()
        .args(["shortcut", "nextFortnight", "--now", NOW])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown period shortcut"));
}

#[test]
fn test_filter_defaults_column() {
    let out = json_output(&["filter", r#"{"unit":"month","count":1}"#, "--now", NOW]);
    assert_eq!(out["column"], "created_at");
    assert_eq!(out["start"], "2010-12-01T00:00:00Z");
    assert_eq!(out["end"], "2010-12-31T23:59:59Z");
}

#[test]
fn test_filter_explicit_column() {
    let out = json_output(&[
        "filter",
        r#"{"unit":"hour","count":1,"column":"seen_at"}"#,
        "--now",
        NOW,
    ]);
    assert_eq!(out["column"], "seen_at");
    assert_eq!(out["start"], "2010-11-11T13:00:00Z");
    assert_eq!(out["end"], "2010-11-11T13:59:59Z");
}

#[test]
fn test_filter_invalid_json_fails() {
    periods()
        .args(["filter", "{not json", "--now", NOW])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse filter JSON"));
}

#[test]
fn test_shortcuts_lists_all() {
    let out = json_output(&["shortcuts"]);
    let entries = out.as_array().unwrap();
    assert_eq!(entries.len(), 18);
    assert!(entries.iter().any(|e| e["name"] == "yesterday" && e["count"] == -1));
    assert!(entries.iter().any(|e| e["name"] == "thisMonth" && e["include_current"] == true));
}

#[test]
fn test_invalid_timezone_fails() {
    periods()
        .args(["shortcut", "today", "--now", NOW, "--timezone", "Mars/Olympus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

#[test]
fn test_invalid_now_fails() {
    periods()
        .args(["shortcut", "today", "--now", "yesterday-ish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --now"));
}
