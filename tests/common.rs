#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveTime, Weekday};
use echampo::models::{Grade, Recurrence, ScheduleEntry, Subject, WeekParity};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn ech() -> Command {
    cargo_bin_cmd!("echampo")
}

/// `echampo --db <db> --test` ready for a subcommand.
pub fn ech_db(db_path: &str) -> Command {
    let mut cmd = ech();
    cmd.args(["--db", db_path, "--test"]);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_echampo.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize an empty DB (no default subjects)
pub fn init_empty(db_path: &str) {
    ech_db(db_path).args(["init", "--empty"]).assert().success();
}

/// Empty DB plus two subjects (Maths coef 2, History) and three grades.
pub fn init_db_with_data(db_path: &str) {
    init_empty(db_path);

    ech_db(db_path)
        .args(["subject", "add", "Maths", "--color", "Ocean", "--coef", "2"])
        .assert()
        .success();
    ech_db(db_path)
        .args(["subject", "add", "History", "--color", "#FFA94D"])
        .assert()
        .success();

    ech_db(db_path)
        .args(["grade", "add", "Maths", "10", "--date", "2025-09-10"])
        .assert()
        .success();
    ech_db(db_path)
        .args(["grade", "add", "Maths", "18", "--coef", "2", "--date", "2025-10-02"])
        .assert()
        .success();
    ech_db(db_path)
        .args(["grade", "add", "History", "12", "--date", "2025-10-15"])
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// In-memory fixtures for library-level tests
// ---------------------------------------------------------------------------

pub fn subject(id: i64, name: &str, coefficient: Option<f64>) -> Subject {
    let mut s = Subject::new(name, "#45B7D1", coefficient);
    s.id = id;
    s
}

pub fn grade(subject_id: i64, value: f64, max: f64, coefficient: f64) -> Grade {
    let date = NaiveDate::from_ymd_opt(2025, 10, 1).expect("date");
    Grade::new(subject_id, value, max, coefficient, None, date)
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("time")
}

pub fn slot(id: i64, day: Weekday, start: NaiveTime, end: NaiveTime, week: WeekParity) -> ScheduleEntry {
    let mut e = ScheduleEntry::new(1, day, start, end, week, Recurrence::Weekly);
    e.id = id;
    e
}
