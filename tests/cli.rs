#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli() -> Command {
    Command::cargo_bin("roulement-cli").unwrap()
}

#[test]
fn generate_writes_calendar_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("shift-calendar.ics");
    let csv = dir.path().join("intervals.csv");

    cli()
        .args(["generate", "--start", "2024-01-01", "--pattern", "4/3", "--title", "Shift"])
        .arg("--out")
        .arg(&out)
        .arg("--out-csv")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("53 interval(s) written"))
        .stdout(predicate::str::contains("2024-01-08 → 2024-01-12 | Sequence 1: 4 on, 3 off"));

    let ics = fs::read_to_string(&out).unwrap();
    assert!(ics.starts_with("BEGIN:VCALENDAR\nVERSION:2.0\n"));
    assert!(ics.ends_with("END:VEVENT\nEND:VCALENDAR"));
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 53);

    let rows = fs::read_to_string(&csv).unwrap();
    assert!(rows.starts_with("start,end,sequence\n2024-01-01,2024-01-05,"));
}

#[test]
fn plan_file_round_trips_through_cli() {
    let dir = tempdir().unwrap();
    let plan = dir.path().join("plan.json");
    let out = dir.path().join("nuit.ics");

    cli()
        .args(["init-plan", "--start", "2024-02-01", "--pattern", "2/2,3/1", "--index", "1"])
        .args(["--title", "Nuit"])
        .arg("--out")
        .arg(&plan)
        .assert()
        .success();

    cli()
        .arg("generate")
        .arg("--plan")
        .arg(&plan)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "2024-02-01 → 2024-02-04 | Sequence 2: 3 on, 1 off\n2024-02-05 → 2024-02-07 | Sequence 1: 2 on, 2 off",
        ));

    let ics = fs::read_to_string(&out).unwrap();
    assert!(ics.contains("SUMMARY:Nuit\n"));
}

#[test]
fn preview_prints_month_grids() {
    cli()
        .args(["preview", "--start", "2024-11-25", "--pattern", "4/3", "--months", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("November 2024"))
        .stdout(predicate::str::contains("December 2024"))
        .stdout(predicate::str::contains("January 2025").not());
}

#[test]
fn rejects_zero_on_days() {
    cli()
        .args(["generate", "--start", "2024-01-01", "--pattern", "0/3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("on-days"));
}

#[test]
fn rejects_missing_start() {
    cli()
        .args(["preview", "--pattern", "4/3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--start"));
}

#[test]
fn csv_pattern_with_json_export_into_directory() {
    let dir = tempdir().unwrap();
    let pattern = dir.path().join("pattern.csv");
    let json = dir.path().join("intervals.json");
    fs::write(&pattern, "on,off\n2,2\n3,1\n").unwrap();

    cli()
        .args(["generate", "--start", "2024-01-30", "--index", "1"])
        .arg("--pattern-csv")
        .arg(&pattern)
        .arg("--out-json")
        .arg(&json)
        .arg("--out")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "2024-01-30 → 2024-02-02 | Sequence 2: 3 on, 1 off\n2024-02-03 → 2024-02-05 | Sequence 1: 2 on, 2 off",
        ));

    let ics = fs::read_to_string(dir.path().join("shift-calendar.ics")).unwrap();
    assert!(ics.contains("DTSTART;VALUE=DATE:20240130\nDTEND;VALUE=DATE:20240202\nSUMMARY:Shift\n"));

    let rows: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(rows[1]["start"], "2024-02-03");
    assert_eq!(rows[1]["sequence"], "Sequence 1: 2 on, 2 off");
}

#[test]
fn crlf_export_folds_long_titles() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("long.ics");
    let title = "Garde de nuit ".repeat(8);

    cli()
        .args(["generate", "--start", "2024-12-01", "--pattern", "5/2", "--escape", "--crlf"])
        .args(["--title", title.as_str()])
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let ics = fs::read_to_string(&out).unwrap();
    assert!(ics.split("\r\n").all(|l| l.len() <= 75));
    assert!(ics.contains("\r\n "));
}

#[test]
fn preview_before_start_year_is_empty() {
    cli()
        .args(["preview", "--start", "2024-01-01", "--end-year", "2023", "--pattern", "4/3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No events to display."));
}

#[test]
fn rejects_year_outside_export_range() {
    cli()
        .args(["generate", "--start", "2024-01-01", "--end-year", "10000", "--pattern", "4/3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("0..=9999"));
}
